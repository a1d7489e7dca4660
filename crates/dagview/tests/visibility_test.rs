use dagview::state::NodeStates;
use dagview::visibility::visible_subgraph;
use dagview::{Dag, Dataset, RawEdge, RawNode, build_graph};

fn dag(nodes: &[&str], links: &[(&str, &str)]) -> Dag {
    build_graph(Dataset::new(
        nodes.iter().map(|id| RawNode::new(*id)).collect(),
        links.iter().map(|(s, t)| RawEdge::new(*s, *t)).collect(),
    ))
    .unwrap()
}

fn edge_pairs(g: &dagview::visibility::VisibleGraph) -> Vec<(String, String)> {
    g.edges.iter().map(|e| (e.v.clone(), e.w.clone())).collect()
}

fn diamond() -> Dag {
    dag(
        &["a", "b", "c", "d"],
        &[("a", "b"), ("a", "c"), ("b", "d"), ("c", "d")],
    )
}

#[test]
fn everything_is_visible_when_expanded() {
    let dag = diamond();
    let states = NodeStates::from_dag(&dag);
    let visible = visible_subgraph(&dag, &states).unwrap();

    assert_eq!(visible.node_ids(), vec!["a", "b", "d", "c"]);
    assert_eq!(
        edge_pairs(&visible),
        vec![
            ("a".to_string(), "b".to_string()),
            ("a".to_string(), "c".to_string()),
            ("b".to_string(), "d".to_string()),
            ("c".to_string(), "d".to_string()),
        ]
    );
    assert_eq!(
        visible.node("d").unwrap().parent_ids,
        vec!["b".to_string(), "c".to_string()]
    );
}

#[test]
fn shared_descendant_stays_visible_through_another_parent() {
    let dag = diamond();
    let mut states = NodeStates::from_dag(&dag);
    states.toggle("b");
    let visible = visible_subgraph(&dag, &states).unwrap();

    assert!(visible.contains("d"));
    assert_eq!(visible.node("d").unwrap().parent_ids, vec!["c".to_string()]);
    assert!(visible.children_of("b").is_empty());
    assert_eq!(visible.edges.len(), 3);
}

#[test]
fn collapse_and_expand_round_trip() {
    let dag = dag(
        &["r", "x", "y", "z", "w"],
        &[("r", "x"), ("r", "y"), ("x", "z"), ("z", "w")],
    );
    let mut states = NodeStates::from_dag(&dag);
    let before = visible_subgraph(&dag, &states).unwrap();

    states.toggle("x");
    let collapsed = visible_subgraph(&dag, &states).unwrap();
    assert_eq!(collapsed.node_ids(), vec!["r", "x", "y"]);
    assert!(!collapsed.contains("z"));
    assert!(!collapsed.contains("w"));

    states.toggle("x");
    let after = visible_subgraph(&dag, &states).unwrap();
    assert_eq!(after, before);
}

#[test]
fn visibility_is_idempotent() {
    let dag = diamond();
    let mut states = NodeStates::from_dag(&dag);
    states.toggle("c");
    let first = visible_subgraph(&dag, &states).unwrap();
    let second = visible_subgraph(&dag, &states).unwrap();
    assert_eq!(first, second);
}

#[test]
fn collapsed_root_stays_visible_alone() {
    let dag = diamond();
    let mut states = NodeStates::from_dag(&dag);
    states.toggle("a");
    let visible = visible_subgraph(&dag, &states).unwrap();

    assert_eq!(visible.node_ids(), vec!["a"]);
    assert!(visible.edges.is_empty());
}

#[test]
fn every_root_starts_a_walk() {
    let dag = dag(&["a", "b", "c"], &[("b", "c")]);
    let states = NodeStates::from_dag(&dag);
    let visible = visible_subgraph(&dag, &states).unwrap();
    assert_eq!(visible.node_ids(), vec!["a", "b", "c"]);
}

#[test]
fn stacked_diamonds_visit_each_node_once() {
    // 40 stacked diamonds: 2^40 root-to-sink paths, 121 nodes.
    let mut nodes: Vec<String> = vec!["n0".to_string()];
    let mut links: Vec<(String, String)> = Vec::new();
    for level in 0..40 {
        let top = format!("n{level}");
        let bottom = format!("n{}", level + 1);
        let left = format!("l{level}");
        let right = format!("r{level}");
        links.push((top.clone(), left.clone()));
        links.push((top, right.clone()));
        links.push((left.clone(), bottom.clone()));
        links.push((right.clone(), bottom.clone()));
        nodes.extend([left, right, bottom]);
    }
    let node_refs: Vec<&str> = nodes.iter().map(String::as_str).collect();
    let link_refs: Vec<(&str, &str)> = links
        .iter()
        .map(|(s, t)| (s.as_str(), t.as_str()))
        .collect();
    let dag = dag(&node_refs, &link_refs);
    let states = NodeStates::from_dag(&dag);

    let visible = visible_subgraph(&dag, &states).unwrap();
    assert_eq!(visible.nodes.len(), 121);
    assert_eq!(visible.edges.len(), 160);
}
