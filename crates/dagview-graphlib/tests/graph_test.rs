use dagview_graphlib::{Graph, alg};

#[test]
fn nodes_keep_insertion_order_and_labels_can_be_replaced() {
    let mut g: Graph<i32> = Graph::new();
    assert_eq!(g.set_node("b", 1), 0);
    assert_eq!(g.set_node("a", 2), 1);
    assert_eq!(g.set_node("b", 3), 0);

    assert_eq!(g.nodes().collect::<Vec<_>>(), vec!["b", "a"]);
    assert_eq!(g.node("b"), Some(&3));
    assert_eq!(g.node_count(), 2);
}

#[test]
fn set_edge_requires_existing_endpoints() {
    let mut g: Graph<()> = Graph::new();
    g.set_node("a", ());

    assert!(!g.set_edge("a", "missing"));
    assert!(!g.set_edge("missing", "a"));
    assert_eq!(g.edge_count(), 0);
}

#[test]
fn parallel_edges_collapse_into_one() {
    let mut g: Graph<()> = Graph::new();
    g.set_node("a", ());
    g.set_node("b", ());

    assert!(g.set_edge("a", "b"));
    assert!(g.set_edge("a", "b"));

    assert_eq!(g.edge_count(), 1);
    assert_eq!(g.successors("a"), vec!["b"]);
    assert!(g.has_edge("a", "b"));
    assert!(!g.has_edge("b", "a"));
}

#[test]
fn adjacency_follows_edge_insertion_order() {
    let mut g: Graph<()> = Graph::new();
    g.set_path(&["a", "c"]);
    g.set_path(&["a", "b"]);
    g.set_path(&["d", "b"]);

    assert_eq!(g.successors("a"), vec!["c", "b"]);
    let b = g.node_ix("b").unwrap();
    let preds: Vec<&str> = g
        .predecessors_ix(b)
        .map(|ix| g.node_id(ix).unwrap())
        .collect();
    assert_eq!(preds, vec!["a", "d"]);
    assert_eq!(g.in_degree("b"), 2);
    assert_eq!(g.out_degree("b"), 0);
    assert!(g.successors("missing").is_empty());
}

#[test]
fn topsort_orders_a_diamond() {
    let mut g: Graph<()> = Graph::new();
    g.set_path(&["a", "b", "d"]);
    g.set_path(&["a", "c", "d"]);

    let order = alg::topsort(&g).unwrap();
    let ids: Vec<&str> = order.iter().map(|&ix| g.node_id(ix).unwrap()).collect();
    assert_eq!(ids, vec!["a", "b", "c", "d"]);
}

#[test]
fn topsort_reports_nodes_on_a_cycle() {
    let mut g: Graph<()> = Graph::new();
    g.set_path(&["root", "a", "b", "a"]);

    let err = alg::topsort(&g).unwrap_err();
    assert_eq!(err.nodes, vec!["a".to_string(), "b".to_string()]);
    assert!(err.to_string().contains("a, b"));
}

#[test]
fn topsort_rejects_self_loops() {
    let mut g: Graph<()> = Graph::new();
    g.set_path(&["a", "a"]);

    assert!(alg::topsort(&g).is_err());
}

#[test]
fn preorder_visits_shared_children_once() {
    let mut g: Graph<()> = Graph::new();
    g.set_path(&["a", "b", "d"]);
    g.set_path(&["a", "c", "d"]);
    g.set_path(&["e", "d"]);

    let roots = [g.node_ix("a").unwrap(), g.node_ix("e").unwrap()];
    let ids: Vec<&str> = alg::preorder(&g, &roots, |_| true)
        .into_iter()
        .map(|ix| g.node_id(ix).unwrap())
        .collect();
    assert_eq!(ids, vec!["a", "b", "d", "c", "e"]);
}

#[test]
fn preorder_stops_below_nodes_it_does_not_descend_into() {
    let mut g: Graph<()> = Graph::new();
    g.set_path(&["a", "b", "c"]);
    g.set_path(&["a", "d"]);

    let b = g.node_ix("b").unwrap();
    let roots = [g.node_ix("a").unwrap()];
    let ids: Vec<&str> = alg::preorder(&g, &roots, |ix| ix != b)
        .into_iter()
        .map(|ix| g.node_id(ix).unwrap())
        .collect();
    assert_eq!(ids, vec!["a", "b", "d"]);
}
