use assert_cmd::prelude::*;
use serde_json::Value;
use std::fs;
use std::process::Command;

const FORKED: &str = r#"{
  "nodes": [
    {"id": "r", "name": "Root"},
    {"id": "x"},
    {"id": "y"},
    {"id": "z"}
  ],
  "links": [
    {"source": "r", "target": "x"},
    {"source": "r", "target": "y"},
    {"source": "y", "target": "z"}
  ]
}"#;

fn stdout_json(output: &std::process::Output) -> Value {
    assert!(
        output.status.success(),
        "command failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).expect("stdout is JSON")
}

#[test]
fn cli_layout_prints_a_frame() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let input = tmp.path().join("forked.json");
    fs::write(&input, FORKED).expect("write dataset");

    let exe = assert_cmd::cargo_bin!("dagview");
    let output = Command::new(exe)
        .args([
            "layout",
            "--direction",
            "tb",
            input.to_string_lossy().as_ref(),
        ])
        .output()
        .expect("run dagview");
    let frame = stdout_json(&output);

    assert_eq!(frame["direction"], "TB");
    assert_eq!(frame["nodes"].as_array().map(Vec::len), Some(4));
    assert_eq!(frame["edges"].as_array().map(Vec::len), Some(3));
    assert_eq!(frame["nodes"][0]["title"], "Root");
    assert_eq!(frame["nodes"][1]["x"], -115.0);
    assert_eq!(frame["nodes"][1]["y"], 220.0);
}

#[test]
fn cli_layout_reads_stdin_and_json5_config() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let config = tmp.path().join("view.json5");
    fs::write(
        &config,
        "// compact grid\n{ direction: 'TB', nodeWidth: 10, nodeSeparation: 0, nodeHeight: 20, levelSeparation: 5, }\n",
    )
    .expect("write config");

    let exe = assert_cmd::cargo_bin!("dagview");
    let assert = assert_cmd::Command::new(exe)
        .args(["layout", "--config", config.to_string_lossy().as_ref(), "-"])
        .write_stdin(FORKED)
        .assert()
        .success();
    let frame: Value = serde_json::from_slice(&assert.get_output().stdout).expect("JSON");

    assert_eq!(frame["nodeWidth"], 10.0);
    assert_eq!(frame["nodes"][1]["x"], -5.0);
    assert_eq!(frame["nodes"][1]["y"], 25.0);
}

#[test]
fn cli_layout_replays_events() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let input = tmp.path().join("forked.json");
    let events = tmp.path().join("events.json");
    fs::write(&input, FORKED).expect("write dataset");
    fs::write(
        &events,
        r#"[{"event": "node-clicked", "id": "y"}, {"event": "direction-changed", "value": "BT"}]"#,
    )
    .expect("write events");

    let exe = assert_cmd::cargo_bin!("dagview");
    let output = Command::new(exe)
        .args([
            "layout",
            "--events",
            events.to_string_lossy().as_ref(),
            input.to_string_lossy().as_ref(),
        ])
        .output()
        .expect("run dagview");
    let frame = stdout_json(&output);

    assert_eq!(frame["direction"], "BT");
    let ids: Vec<&str> = frame["nodes"]
        .as_array()
        .expect("nodes")
        .iter()
        .filter_map(|n| n["id"].as_str())
        .collect();
    assert_eq!(ids, vec!["r", "x", "y"]);
}

#[test]
fn cli_check_reports_renamed_duplicates() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let input = tmp.path().join("dupes.json");
    fs::write(
        &input,
        r#"{"nodes": [{"id": "X"}, {"id": "X"}, {"id": "Y"}], "links": [{"source": "X", "target": "Y"}]}"#,
    )
    .expect("write dataset");

    let exe = assert_cmd::cargo_bin!("dagview");
    let output = Command::new(exe)
        .args(["check", input.to_string_lossy().as_ref()])
        .output()
        .expect("run dagview");
    let summary = stdout_json(&output);

    assert_eq!(summary["nodes"], 3);
    assert_eq!(summary["edges"], 1);
    assert_eq!(summary["remaps"][0]["from"], "X");
    assert_eq!(summary["remaps"][0]["to"], "X_1");
}

#[test]
fn cli_fails_on_a_cycle() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let input = tmp.path().join("cycle.json");
    fs::write(
        &input,
        r#"{"nodes": [{"id": "a"}, {"id": "b"}], "links": [{"source": "a", "target": "b"}, {"source": "b", "target": "a"}]}"#,
    )
    .expect("write dataset");

    let exe = assert_cmd::cargo_bin!("dagview");
    let output = Command::new(exe)
        .args(["layout", input.to_string_lossy().as_ref()])
        .output()
        .expect("run dagview");

    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("cycle"));
}

#[test]
fn cli_rejects_unknown_flags() {
    let exe = assert_cmd::cargo_bin!("dagview");
    Command::new(exe)
        .args(["layout", "--bogus"])
        .assert()
        .code(2);

    let exe = assert_cmd::cargo_bin!("dagview");
    Command::new(exe)
        .args(["layout", "--direction", "sideways"])
        .assert()
        .code(2);
}
