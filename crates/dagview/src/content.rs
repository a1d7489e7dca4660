//! Rendered-content descriptors.
//!
//! Node payloads declare a `contentType` and carry a `content` value. The adapter gets a typed
//! descriptor instead of raw JSON; shapes that do not match their declared type degrade to
//! `Empty`, and unknown types pass the content through as `Raw`.

use serde::Serialize;
use serde_json::{Map, Value};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TreeItem {
    pub name: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<TreeItem>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "value", rename_all = "camelCase")]
pub enum NodeContent {
    Empty,
    Text(String),
    Html(String),
    Tree(Vec<TreeItem>),
    List(Vec<String>),
    Table {
        headers: Vec<String>,
        rows: Vec<Vec<String>>,
    },
    Image {
        src: String,
    },
    #[serde(rename_all = "camelCase")]
    Chart {
        chart_id: String,
    },
    Raw(Value),
}

impl NodeContent {
    pub fn from_payload(id: &str, payload: &Map<String, Value>) -> Self {
        let content = match payload.get("content") {
            None | Some(Value::Null) => return NodeContent::Empty,
            Some(v) => v,
        };

        match payload.get("contentType").and_then(Value::as_str) {
            Some("text") => NodeContent::Text(display_text(content)),
            Some("html") => NodeContent::Html(display_text(content)),
            Some("tree") => match content.as_array() {
                Some(items) if !items.is_empty() => NodeContent::Tree(tree_items(items)),
                _ => NodeContent::Empty,
            },
            Some("list") => match content.as_array() {
                Some(items) => NodeContent::List(items.iter().map(display_text).collect()),
                None => NodeContent::Empty,
            },
            Some("table") => {
                let headers = content.get("headers").and_then(Value::as_array);
                let rows = content.get("rows").and_then(Value::as_array);
                let (Some(headers), Some(rows)) = (headers, rows) else {
                    return NodeContent::Empty;
                };
                NodeContent::Table {
                    headers: headers.iter().map(display_text).collect(),
                    rows: rows
                        .iter()
                        .map(|row| {
                            row.as_array()
                                .map(|cells| cells.iter().map(display_text).collect())
                                .unwrap_or_default()
                        })
                        .collect(),
                }
            }
            Some("image") => NodeContent::Image {
                src: display_text(content),
            },
            Some("chart") => NodeContent::Chart {
                chart_id: id.to_string(),
            },
            _ => NodeContent::Raw(content.clone()),
        }
    }
}

/// Payload `name`, falling back to the node id.
pub fn node_title(id: &str, payload: &Map<String, Value>) -> String {
    match payload.get("name") {
        Some(Value::String(s)) if !s.is_empty() => s.clone(),
        Some(v @ Value::Number(_)) => v.to_string(),
        _ => id.to_string(),
    }
}

pub fn node_tooltip(payload: &Map<String, Value>) -> Option<String> {
    match payload.get("tooltip") {
        Some(Value::String(s)) if !s.is_empty() => Some(s.clone()),
        _ => None,
    }
}

fn tree_items(items: &[Value]) -> Vec<TreeItem> {
    items
        .iter()
        .map(|item| TreeItem {
            name: item.get("name").map(display_text).unwrap_or_default(),
            children: item
                .get("children")
                .and_then(Value::as_array)
                .map(|c| tree_items(c))
                .unwrap_or_default(),
        })
        .collect()
}

fn display_text(v: &Value) -> String {
    match v {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}
