use narwhal::{Attrs, EdgeKey, EdgeSpec, Graph, GraphError, GraphOptions, attrs};
use serde_json::{Value, json};

#[test]
fn path_of_four_edges() {
    for directed in [false, true] {
        let mut g: Graph<i32> = Graph::new(GraphOptions {
            directed,
            multigraph: false,
        });
        g.edges_mut().add(1, 2, attrs([("foo", json!("f"))]));
        g.edges_mut().add(2, 3, Attrs::default());
        g.edges_mut().add(3, 4, Attrs::default());
        g.edges_mut().add(4, 5, Attrs::default());

        assert_eq!(g.nodes().len(), 5);
        assert_eq!(g.edges().len(), 4);
        assert!(g.edges().contains(&2, &3));
        assert_eq!(g.edges().contains(&3, &2), !directed);
        assert!(g.validate().is_ok());
    }
}

#[test]
fn added_edge_reads_back_its_attributes() {
    let mut g: Graph<&str> = Graph::directed();
    let record = attrs([("weight", json!(4)), ("line", json!("red"))]);
    assert!(g.edges_mut().add("a", "b", record.clone()));

    assert!(g.edges().contains(&"a", &"b"));
    assert_eq!(g.edges().get(&"a", &"b"), Some(&record));
    assert!(g.edges().contains_item(&"a", &"b", &record));
    assert!(!g.edges().contains_item(&"a", &"b", &Attrs::default()));
}

#[test]
fn re_adding_an_edge_merges_and_reports_not_new() {
    let mut g: Graph<i32> = Graph::undirected();
    assert!(g.edges_mut().add(1, 2, attrs([("w", json!(1))])));
    assert!(!g.edges_mut().add(1, 2, attrs([("w", json!(1))])));
    assert_eq!(g.edges().len(), 1);

    assert!(!g.edges_mut().add(1, 2, attrs([("label", json!("x"))])));
    let record = g.edges().get(&1, &2).unwrap();
    assert_eq!(record.get("w"), Some(&json!(1)));
    assert_eq!(record.get("label"), Some(&json!("x")));
}

#[test]
fn undirected_orientations_share_one_record() {
    let mut g: Graph<i32> = Graph::undirected();
    g.edges_mut().add(1, 2, attrs([("w", json!(1))]));
    g.edges_mut()
        .get_mut(&2, &1)
        .unwrap()
        .insert("w".to_string(), json!(5));

    assert_eq!(g.edges().get(&1, &2).unwrap().get("w"), Some(&json!(5)));
    assert!(std::ptr::eq(
        g.edges().get(&1, &2).unwrap(),
        g.edges().get(&2, &1).unwrap()
    ));
    assert_eq!(g.edges().iter().collect::<Vec<_>>(), vec![(&1, &2)]);

    assert!(!g.edges_mut().add(2, 1, attrs([("label", json!("x"))])));
    assert_eq!(g.edges().len(), 1);
    assert!(g.validate().is_ok());
}

#[test]
fn directed_reverse_is_a_separate_edge() {
    let mut g: Graph<i32> = Graph::directed();
    assert!(g.edges_mut().add(1, 2, attrs([("dir", json!("fwd"))])));
    assert!(g.edges_mut().add(2, 1, attrs([("dir", json!("back"))])));

    assert_eq!(g.edges().len(), 2);
    assert_eq!(g.edges().get(&2, &1).unwrap().get("dir"), Some(&json!("back")));
    assert!(g.validate().is_ok());
}

#[test]
fn succ_and_pred_resolve_to_the_same_record() {
    let mut g: Graph<&str> = Graph::directed();
    g.edges_mut().add("a", "b", Attrs::default());
    g.edges_mut()
        .get_mut(&"a", &"b")
        .unwrap()
        .insert("seen".to_string(), json!(true));

    let succ = g.successors();
    let pred = g.predecessors();
    let from_succ = succ.get(&"a").unwrap().get(&"b").unwrap();
    let from_pred = pred.get(&"b").unwrap().get(&"a").unwrap();
    assert!(std::ptr::eq(from_succ, from_pred));
    assert_eq!(from_pred.get("seen"), Some(&json!(true)));
}

#[test]
fn discard_and_remove() {
    let mut g: Graph<i32> = Graph::directed();
    g.edges_mut().add(1, 2, Attrs::default());

    assert!(g.edges_mut().discard(&1, &2));
    assert!(!g.edges_mut().discard(&1, &2));
    let err = g.edges_mut().remove(&1, &2).unwrap_err();
    assert!(matches!(err, GraphError::EdgeNotFound { .. }));

    assert_eq!(g.nodes().len(), 2);
    assert!(g.validate().is_ok());
}

#[test]
fn undirected_discard_accepts_either_orientation() {
    let mut g: Graph<i32> = Graph::undirected();
    g.edges_mut().add(1, 2, Attrs::default());
    assert!(g.edges_mut().discard(&2, &1));
    assert!(g.edges().is_empty());
    assert!(g.validate().is_ok());
}

#[test]
fn try_get_reports_missing_edges() {
    let mut g: Graph<i32> = Graph::directed();
    g.edges_mut().add(1, 2, Attrs::default());

    assert!(g.edges().try_get(&1, &2).is_ok());
    assert!(matches!(
        g.edges().try_get(&2, &1),
        Err(GraphError::EdgeNotFound { .. })
    ));
}

#[test]
fn edge_data_view_projects_one_attribute() {
    let mut g: Graph<i32> = Graph::undirected();
    g.edges_mut().add(1, 2, attrs([("weight", json!(3))]));
    g.edges_mut().add(2, 3, Attrs::default());
    g.edges_mut().add(3, 4, attrs([("weight", json!(7))]));

    let weights = g.edges().data("weight");
    let got: Vec<((i32, i32), &Value)> = weights.iter().collect();
    assert_eq!(got, vec![((1, 2), &json!(3)), ((3, 4), &json!(7))]);
    assert_eq!(weights.get(&(2, 3)), None);

    let defaulted = g.edges().data_or("weight", json!(1));
    assert_eq!(defaulted.get(&(2, 3)), Some(json!(1)));
}

#[test]
fn update_checks_every_spec_before_mutating() {
    let mut g: Graph<i32> = Graph::undirected();
    let err = g
        .edges_mut()
        .update([
            EdgeSpec::pair(1, 2),
            EdgeSpec::keyed(2, 3, "express", Attrs::default()),
        ])
        .unwrap_err();

    assert!(matches!(err, GraphError::InvalidArgument { .. }));
    assert!(g.nodes().is_empty());
    assert!(g.edges().is_empty());
}

#[test]
fn update_counts_created_edges() {
    let mut g: Graph<i32> = Graph::undirected();
    let common = attrs([("kind", json!("road"))]);
    let created = g
        .edges_mut()
        .update_with(
            [
                EdgeSpec::pair(1, 2),
                EdgeSpec::with_attrs(2, 1, attrs([("lanes", json!(2))])),
                EdgeSpec::MultiKeyed(2, 3, None, attrs([("kind", json!("rail"))])),
            ],
            &common,
        )
        .unwrap();

    assert_eq!(created, 2);
    let road = g.edges().get(&1, &2).unwrap();
    assert_eq!(road.get("lanes"), Some(&json!(2)));
    assert_eq!(road.get("kind"), Some(&json!("road")));
    assert_eq!(g.edges().get(&3, &2).unwrap().get("kind"), Some(&json!("rail")));
}

#[test]
fn keyed_adds_are_rejected_on_simple_graphs() {
    let mut g: Graph<i32> = Graph::directed();
    let err = g
        .edges_mut()
        .add_keyed(1, 2, Some(EdgeKey::Index(3)), Attrs::default())
        .unwrap_err();
    assert!(matches!(err, GraphError::InvalidArgument { .. }));
    assert!(g.nodes().is_empty());
}

#[test]
fn clear_removes_edges_but_keeps_nodes() {
    let mut g: Graph<i32> = Graph::directed();
    g.edges_mut().add(1, 2, Attrs::default());
    g.edges_mut().add(2, 3, Attrs::default());

    g.edges_mut().clear();
    assert_eq!(g.nodes().len(), 3);
    assert!(g.edges().is_empty());
    assert!(g.adjacency().get(&2).unwrap().is_empty());
    assert!(g.validate().is_ok());

    assert!(g.edges_mut().add(1, 2, Attrs::default()));
    assert_eq!(g.size(), 1);
}

#[test]
fn selfloop_edges() {
    let mut g: Graph<i32> = Graph::undirected();
    g.edges_mut().add(1, 1, Attrs::default());
    g.edges_mut().add(1, 2, Attrs::default());

    assert_eq!(g.edges().selfloops().collect::<Vec<_>>(), vec![(&1, &1)]);
    assert!(g.validate().is_ok());
}

#[test]
fn values_and_items_follow_table_order() {
    let mut g: Graph<&str> = Graph::directed();
    g.edges_mut().add("b", "c", attrs([("n", json!(1))]));
    g.edges_mut().add("a", "b", attrs([("n", json!(2))]));
    g.edges_mut().add("b", "a", attrs([("n", json!(3))]));

    let order: Vec<(&str, &str)> = g.edges().iter().map(|(u, v)| (*u, *v)).collect();
    assert_eq!(order, vec![("b", "c"), ("b", "a"), ("a", "b")]);

    let ns: Vec<&Value> = g.edges().values().filter_map(|a| a.get("n")).collect();
    assert_eq!(ns, vec![&json!(1), &json!(3), &json!(2)]);
}
