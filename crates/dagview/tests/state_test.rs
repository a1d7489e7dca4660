use dagview::state::{CollapseAllScope, NodeStates};
use dagview::{Dag, Dataset, RawEdge, RawNode, build_graph};

fn dag(nodes: &[&str], links: &[(&str, &str)]) -> Dag {
    build_graph(Dataset::new(
        nodes.iter().map(|id| RawNode::new(*id)).collect(),
        links.iter().map(|(s, t)| RawEdge::new(*s, *t)).collect(),
    ))
    .unwrap()
}

// r -> a -> b -> c
fn chain() -> Dag {
    dag(&["r", "a", "b", "c"], &[("r", "a"), ("a", "b"), ("b", "c")])
}

#[test]
fn initial_state_is_fully_expanded() {
    let dag = chain();
    let states = NodeStates::from_dag(&dag);

    assert_eq!(states.len(), 4);
    assert_eq!(states.collapsed_count(), 0);
    let r = states.get("r").unwrap();
    assert!(r.is_root && r.has_children && !r.collapsed);
    let c = states.get("c").unwrap();
    assert!(!c.is_root && !c.has_children);
}

#[test]
fn toggle_flips_nodes_with_children_only() {
    let dag = chain();
    let mut states = NodeStates::from_dag(&dag);

    assert_eq!(states.toggle("a"), Some(true));
    assert!(states.is_collapsed("a"));
    assert_eq!(states.toggle("a"), Some(false));
    assert!(!states.is_collapsed("a"));

    assert_eq!(states.toggle("c"), None);
    assert_eq!(states.toggle("missing"), None);
    assert!(!states.is_collapsed("c"));
}

#[test]
fn roots_can_be_toggled_directly() {
    let dag = chain();
    let mut states = NodeStates::from_dag(&dag);
    assert_eq!(states.toggle("r"), Some(true));
}

#[test]
fn collapse_all_exempts_roots_by_default() {
    let dag = chain();
    let mut states = NodeStates::from_dag(&dag);

    let changed = states.collapse_all(&dag, CollapseAllScope::default());
    assert_eq!(changed, 2);
    assert!(!states.is_collapsed("r"));
    assert!(states.is_collapsed("a"));
    assert!(states.is_collapsed("b"));
    assert!(!states.is_collapsed("c"));

    // Already collapsed nodes do not count again.
    assert_eq!(states.collapse_all(&dag, CollapseAllScope::AllNonRoots), 0);
}

#[test]
fn collapse_all_first_level_only_touches_children_of_roots() {
    let dag = chain();
    let mut states = NodeStates::from_dag(&dag);

    assert_eq!(states.collapse_all(&dag, CollapseAllScope::FirstLevel), 1);
    assert!(states.is_collapsed("a"));
    assert!(!states.is_collapsed("b"));
}

#[test]
fn collapse_all_including_roots() {
    let dag = chain();
    let mut states = NodeStates::from_dag(&dag);

    assert_eq!(states.collapse_all(&dag, CollapseAllScope::IncludingRoots), 3);
    assert!(states.is_collapsed("r"));
}

#[test]
fn expand_all_leaves_nothing_collapsed() {
    let dag = chain();
    let mut states = NodeStates::from_dag(&dag);
    states.collapse_all(&dag, CollapseAllScope::IncludingRoots);

    assert_eq!(states.expand_all(), 3);
    assert_eq!(states.collapsed_count(), 0);
    assert_eq!(states.expand_all(), 0);
}

#[test]
fn set_collapsed_reports_changes() {
    let dag = chain();
    let mut states = NodeStates::from_dag(&dag);

    assert!(states.set_collapsed("b", true));
    assert!(!states.set_collapsed("b", true));
    assert!(!states.set_collapsed("c", true));
    assert!(states.set_collapsed("b", false));
}

#[test]
fn collapse_scope_deserializes_from_camel_case() {
    let scope: CollapseAllScope = serde_json::from_str("\"firstLevel\"").unwrap();
    assert_eq!(scope, CollapseAllScope::FirstLevel);
    let scope: CollapseAllScope = serde_json::from_str("\"includingRoots\"").unwrap();
    assert_eq!(scope, CollapseAllScope::IncludingRoots);
}
