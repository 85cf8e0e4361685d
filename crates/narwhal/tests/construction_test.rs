use narwhal::{
    Attrs, EdgeKey, EdgeSpec, Graph, GraphError, GraphOptions, KeyedCollection, NodeSpec, SetAlgebra,
    attrs, attrs_from_json, attrs_to_json,
};
use serde_json::json;

fn sample() -> Graph<&'static str> {
    let mut g = Graph::undirected();
    g.nodes_mut().add("a", attrs([("label", json!("A"))]));
    g.edges_mut().add("a", "b", attrs([("w", json!(1))]));
    g.edges_mut().add("b", "c", attrs([("w", json!(2))]));
    g.nodes_mut().extend(["lonely"]);
    g
}

#[test]
fn specs_round_trip_into_an_equal_graph() {
    let g = sample();
    let copy = Graph::from_parts(g.options(), g.nodes().to_specs(), g.edges().to_specs()).unwrap();

    let edges = g.edges();
    assert!(copy.edges().set_eq(edges.keys_owned()));
    assert!(copy.nodes().set_eq(g.nodes().iter().copied()));
    assert_eq!(copy.nodes().get(&"a"), g.nodes().get(&"a"));
    assert_eq!(copy.edges().get(&"c", &"b"), g.edges().get(&"b", &"c"));
    assert!(copy.validate().is_ok());
}

#[test]
fn from_parts_accepts_bare_specs() {
    let g: Graph<i32> = Graph::from_parts(
        GraphOptions::directed(),
        [NodeSpec::bare(9)],
        [EdgeSpec::pair(1, 2), EdgeSpec::with_attrs(2, 3, attrs([("w", json!(5))]))],
    )
    .unwrap();

    assert_eq!(g.nodes().iter().copied().collect::<Vec<_>>(), vec![9, 1, 2, 3]);
    assert_eq!(g.size(), 2);
}

#[test]
fn copies_do_not_share_records() {
    let g = sample();
    let mut copy = g.copy();
    copy.edges_mut()
        .get_mut(&"a", &"b")
        .unwrap()
        .insert("w".to_string(), json!(100));
    copy.nodes_mut().discard(&"lonely");

    assert_eq!(g.edges().get(&"a", &"b").unwrap().get("w"), Some(&json!(1)));
    assert!(g.nodes().contains(&"lonely"));

    let mut cloned = g.clone();
    cloned.graph_attrs_mut().insert("k".to_string(), json!(1));
    assert!(g.graph_attrs().is_empty());
    assert_eq!(Graph::from_graph(&cloned).graph_attrs().get("k"), Some(&json!(1)));
}

#[test]
fn structure_copies_drop_every_attribute() {
    let g = sample();
    let bare = g.copy_structure();

    assert!(bare.nodes().set_eq(g.nodes().iter().copied()));
    assert!(bare.edges().set_eq(g.edges().keys_owned()));
    assert!(bare.nodes().values().all(|attrs| attrs.is_empty()));
    assert!(bare.edges().values().all(|attrs| attrs.is_empty()));
    assert!(bare.graph_attrs().is_empty());

    let mut multi: Graph<&str> = Graph::new(GraphOptions::directed().with_multigraph(true));
    multi.edges_mut()
        .add_keyed("a", "b", Some("x".into()), attrs([("w", json!(1))]))
        .unwrap();
    multi.edges_mut().add("a", "b", Attrs::default());
    let bare = multi.copy_structure();
    assert_eq!(
        bare.multi_edges().keys_between(&"a", &"b"),
        vec![&EdgeKey::Name("x".to_string()), &EdgeKey::Index(0)]
    );
    assert!(bare.multi_edges().get(&"a", &"b", Some(&"x".into())).unwrap().is_empty());
}

#[test]
fn weight_matrix_builds_weighted_edges() {
    let rows = vec![
        vec![0.0, 1.5, 0.0],
        vec![1.5, 0.0, 2.0],
        vec![0.0, 2.0, 0.0],
    ];

    let undirected = Graph::<usize>::from_weight_matrix(GraphOptions::undirected(), &rows).unwrap();
    assert_eq!(undirected.order(), 3);
    assert_eq!(undirected.size(), 2);
    assert_eq!(
        undirected.edges().get(&1, &0).unwrap().get("weight"),
        Some(&json!(1.5))
    );

    let directed = Graph::<usize>::from_weight_matrix(GraphOptions::directed(), &rows).unwrap();
    assert_eq!(directed.size(), 4);
    assert_eq!(directed.size_weighted("weight"), 7.0);
}

#[test]
fn undirected_weight_matrix_reads_either_triangle() {
    let rows = vec![vec![0.0, 0.0], vec![5.0, 0.0]];
    let g = Graph::<usize>::from_weight_matrix(GraphOptions::undirected(), &rows).unwrap();
    assert_eq!(g.size(), 1);
    assert!(g.edges().contains(&0, &1));
    assert_eq!(g.edges().get(&1, &0).unwrap().get("weight"), Some(&json!(5.0)));

    let rows = vec![vec![0.0, 2.0], vec![3.0, 0.0]];
    let err = Graph::<usize>::from_weight_matrix(GraphOptions::undirected(), &rows).unwrap_err();
    assert!(matches!(err, GraphError::InvalidArgument { .. }));

    let multi = GraphOptions::undirected().with_multigraph(true);
    let rows = vec![vec![0.0, 2.0], vec![2.0, 0.0]];
    assert_eq!(Graph::<usize>::from_weight_matrix(multi, &rows).unwrap().size(), 1);
}

#[test]
fn weight_matrix_must_be_square() {
    let rows = vec![vec![0.0, 1.0], vec![1.0]];
    let err = Graph::<usize>::from_weight_matrix(GraphOptions::undirected(), &rows).unwrap_err();
    assert!(matches!(err, GraphError::InvalidArgument { .. }));

    let rows = vec![vec![f64::NAN]];
    assert!(Graph::<usize>::from_weight_matrix(GraphOptions::undirected(), &rows).is_err());
}

#[test]
fn adjacency_list_builds_edges_from_each_row() {
    let lists = vec![vec![1, 2], vec![2], vec![]];
    let g = Graph::<usize>::from_adjacency_list(GraphOptions::directed(), &lists).unwrap();
    let edges: Vec<(usize, usize)> = g.edges().iter().map(|(u, v)| (*u, *v)).collect();
    assert_eq!(edges, vec![(0, 1), (0, 2), (1, 2)]);

    let err = Graph::<usize>::from_adjacency_list(GraphOptions::directed(), &[vec![4]]).unwrap_err();
    assert!(matches!(err, GraphError::InvalidArgument { .. }));
}

#[test]
fn options_load_from_json() {
    let options = GraphOptions::from_value(&json!({ "directed": true })).unwrap();
    assert!(options.directed);
    assert!(!options.multigraph);
    assert_eq!(GraphOptions::from_value(&json!({})).unwrap(), GraphOptions::default());

    assert!(GraphOptions::from_value(&json!(3)).is_err());
    assert!(matches!(
        GraphOptions::from_value(&json!({ "directed": "yes" })),
        Err(GraphError::InvalidArgument { .. })
    ));
}

#[test]
fn node_records_convert_to_and_from_json() {
    let mut g: Graph<&str> = Graph::undirected();
    let record = attrs_from_json(json!({ "label": "A", "rank": 2 })).unwrap();
    g.nodes_mut().add("a", record);

    assert_eq!(
        attrs_to_json(g.nodes().get(&"a").unwrap()),
        json!({ "label": "A", "rank": 2 })
    );
    assert!(attrs_from_json(json!("nope")).is_err());
}

#[test]
fn clear_drops_nodes_edges_and_graph_attributes() {
    let mut g = Graph::with_attrs(GraphOptions::directed(), attrs([("name", json!("g"))]));
    g.edges_mut().add(1, 2, Attrs::default());

    g.clear();
    assert!(g.is_empty());
    assert_eq!(g.size(), 0);
    assert!(g.graph_attrs().is_empty());
    assert!(g.is_directed());
}

#[test]
fn tables_stay_consistent_through_mixed_mutations() {
    let mut g: Graph<u32> = Graph::new(GraphOptions::undirected().with_multigraph(true));
    for i in 0..40u32 {
        g.edges_mut().add(i % 7, (i * 3) % 11, attrs([("i", json!(i))]));
    }
    for node in [0, 5, 9] {
        g.nodes_mut().discard(&node);
    }
    for i in 0..10u32 {
        g.edges_mut().discard(&(i % 7), &((i * 5) % 11));
    }
    g.nodes_mut().extend([0, 100]);
    assert!(g.validate().is_ok());
    assert_eq!(g.degree().total(), 2 * g.size());
}
