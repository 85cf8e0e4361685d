use narwhal::{Attrs, EdgeKey, Graph, GraphOptions, KeyedCollection, SetAlgebra};

fn to_vec<T>(set: narwhal::FxIndexSet<T>) -> Vec<T> {
    set.into_iter().collect()
}

#[test]
fn node_views_behave_like_sets() {
    let mut g: Graph<i32> = Graph::undirected();
    g.nodes_mut().extend(1..=5);
    let nodes = g.nodes();

    assert_eq!(to_vec(nodes.union([5, 6])), vec![1, 2, 3, 4, 5, 6]);
    assert_eq!(to_vec(nodes.intersection([6, 5, 4])), vec![4, 5]);
    assert_eq!(to_vec(nodes.difference([1, 2])), vec![3, 4, 5]);
    assert_eq!(to_vec(nodes.symmetric_difference([4, 5, 6, 7])), vec![1, 2, 3, 6, 7]);
    assert!(nodes.is_subset(1..=9));
    assert!(!nodes.is_subset([1]));
    assert!(nodes.is_superset([1, 2]));
    assert!(nodes.is_disjoint([8, 9]));
    assert!(nodes.set_eq([5, 4, 3, 2, 1, 1]));
}

#[test]
fn undirected_edges_match_reversed_pairs() {
    let mut g: Graph<i32> = Graph::undirected();
    g.edges_mut().add(1, 2, Attrs::default());
    g.edges_mut().add(2, 3, Attrs::default());
    let edges = g.edges();

    assert_eq!(to_vec(edges.intersection([(2, 1), (3, 4)])), vec![(1, 2)]);
    assert_eq!(edges.union([(2, 1)]).len(), 2);
    assert_eq!(to_vec(edges.difference([(3, 2)])), vec![(1, 2)]);
    assert_eq!(
        to_vec(edges.symmetric_difference([(2, 1), (4, 5)])),
        vec![(2, 3), (4, 5)]
    );
    assert!(edges.set_eq([(2, 1), (3, 2)]));
    assert!(edges.is_superset([(2, 1)]));
    assert!(edges.contains_key(&(3, 2)));
}

#[test]
fn directed_edges_keep_orientation() {
    let mut g: Graph<i32> = Graph::directed();
    g.edges_mut().add(1, 2, Attrs::default());
    let edges = g.edges();

    assert!(to_vec(edges.intersection([(2, 1)])).is_empty());
    assert!(edges.is_disjoint([(2, 1)]));
    assert_eq!(to_vec(edges.union([(2, 1)])), vec![(1, 2), (2, 1)]);
}

#[test]
fn neighbor_maps_compose() {
    let mut g: Graph<i32> = Graph::undirected();
    for (u, v) in [(1, 2), (1, 3), (1, 4), (5, 3), (5, 4), (5, 6)] {
        g.edges_mut().add(u, v, Attrs::default());
    }
    let adj = g.adjacency();
    let left = adj.get(&1).unwrap();
    let right = adj.get(&5).unwrap();

    assert_eq!(to_vec(left.intersection(right.keys_owned())), vec![3, 4]);
    assert_eq!(to_vec(left.difference(right.keys_owned())), vec![2]);
    assert!(!left.is_disjoint(right.keys_owned()));
}

#[test]
fn multi_edge_keys_take_part_in_set_operations() {
    let mut g: Graph<&str> = Graph::new(GraphOptions::undirected().with_multigraph(true));
    g.edges_mut().add("a", "b", Attrs::default());
    g.edges_mut().add("a", "b", Attrs::default());
    let multi = g.multi_edges();

    assert_eq!(
        to_vec(multi.intersection([("b", "a", EdgeKey::Index(1)), ("a", "b", EdgeKey::Index(7))])),
        vec![("a", "b", EdgeKey::Index(1))]
    );
    assert!(multi.set_eq([("a", "b", EdgeKey::Index(0)), ("b", "a", EdgeKey::Index(1))]));
}

#[test]
fn subgraph_nodes_are_sets_too() {
    let mut g: Graph<i32> = Graph::undirected();
    g.nodes_mut().extend(1..=6);
    let sub = g.subgraph([2, 4, 6]);

    assert!(sub.nodes().is_subset(g.nodes().iter().copied()));
    assert_eq!(to_vec(sub.nodes().difference([4])), vec![2, 6]);
}

#[test]
fn undirected_foreign_pairs_count_once_in_either_orientation() {
    let mut g: Graph<i32> = Graph::undirected();
    g.edges_mut().add(1, 2, Attrs::default());
    let edges = g.edges();

    let union = edges.union([(3, 4), (4, 3)]);
    assert_eq!(to_vec(union), vec![(1, 2), (3, 4)]);
    assert_eq!(
        to_vec(edges.symmetric_difference([(4, 3), (3, 4), (2, 1)])),
        vec![(4, 3)]
    );
    assert!(edges.is_subset([(2, 1), (5, 6), (6, 5)]));
}

#[test]
fn undirected_foreign_multi_edges_count_once() {
    let mut g: Graph<&str> = Graph::new(GraphOptions::undirected().with_multigraph(true));
    g.edges_mut().add("a", "b", Attrs::default());
    let multi = g.multi_edges();

    let union = multi.union([("c", "d", EdgeKey::Index(0)), ("d", "c", EdgeKey::Index(0))]);
    assert_eq!(union.len(), 2);
}

#[test]
fn directed_foreign_pairs_stay_distinct() {
    let g: Graph<i32> = Graph::directed();
    assert_eq!(g.edges().union([(3, 4), (4, 3)]).len(), 2);
}
