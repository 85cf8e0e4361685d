//! Node-subset projections of a [`Graph`](crate::Graph).
//!
//! The member set is computed once, when the projection is built, as the requested nodes that
//! exist in the parent, kept in the parent's insertion order. Later changes to the parent are
//! not reflected in the member set. Edges are visible when both endpoints are members; their
//! records are the parent's own.

use crate::attrs::{Attrs, weight_of};
use crate::cache::{Side, ViewCaches};
use crate::graph::Graph;
use crate::key::EdgeKey;
use crate::options::GraphOptions;
use crate::store::Store;
use crate::views::adjacency::AdjacencyView;
use crate::views::degree::{DegreeView, degree_view};
use crate::views::edges::{EdgeView, MultiEdgeView};
use crate::views::nodes::NodeView;
use crate::views::{Scope, side_for};
use crate::{FxIndexSet, NodeId};
use std::borrow::Cow;

pub(crate) fn members_of<N, I>(
    store: &Store<N>,
    requested: I,
    within: Option<&FxIndexSet<N>>,
) -> FxIndexSet<N>
where
    N: NodeId,
    I: IntoIterator<Item = N>,
{
    let mut members: Vec<(usize, N)> = requested
        .into_iter()
        .filter(|node| within.is_none_or(|outer| outer.contains(node)))
        .filter_map(|node| store.nodes.get_index_of(&node).map(|ix| (ix, node)))
        .collect();
    members.sort_unstable_by_key(|(ix, _)| *ix);
    members.dedup_by_key(|(ix, _)| *ix);
    members.into_iter().map(|(_, node)| node).collect()
}

/// Read-only projection. Owns its own neighbor caches.
#[derive(Debug)]
pub struct Subgraph<'g, N: NodeId> {
    store: &'g Store<N>,
    graph_attrs: &'g Attrs,
    members: Cow<'g, FxIndexSet<N>>,
    caches: ViewCaches<N>,
}

impl<'g, N: NodeId> Subgraph<'g, N> {
    pub(crate) fn new(store: &'g Store<N>, graph_attrs: &'g Attrs, members: FxIndexSet<N>) -> Self {
        tracing::trace!(
            members = members.len(),
            parent = store.nodes.len(),
            "built subgraph projection"
        );
        Self {
            store,
            graph_attrs,
            members: Cow::Owned(members),
            caches: ViewCaches::default(),
        }
    }

    fn scope(&self) -> Scope<'_, N> {
        Scope::within(self.store, &self.members)
    }

    pub fn options(&self) -> GraphOptions {
        self.store.options
    }

    pub fn is_directed(&self) -> bool {
        self.store.is_directed()
    }

    pub fn is_multigraph(&self) -> bool {
        self.store.is_multigraph()
    }

    pub fn order(&self) -> usize {
        self.members.len()
    }

    pub fn len(&self) -> usize {
        self.order()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Number of edge records with both endpoints in the projection.
    pub fn size(&self) -> usize {
        self.scope().record_count()
    }

    pub fn size_weighted(&self, weight: &str) -> f64 {
        self.scope()
            .records()
            .map(|(_, _, _, attrs)| weight_of(attrs, weight))
            .sum()
    }

    /// The parent's graph-level attributes.
    pub fn graph_attrs(&self) -> &Attrs {
        self.graph_attrs
    }

    pub fn nodes(&self) -> NodeView<'_, N> {
        NodeView::new(self.scope())
    }

    pub fn edges(&self) -> EdgeView<'_, N> {
        EdgeView::new(self.scope())
    }

    pub fn multi_edges(&self) -> MultiEdgeView<'_, N> {
        MultiEdgeView::new(self.scope())
    }

    pub fn adjacency(&self) -> AdjacencyView<'_, N> {
        AdjacencyView::new(self.scope(), Side::Union, &self.caches.adjacency)
    }

    pub fn successors(&self) -> AdjacencyView<'_, N> {
        self.adjacency_for(Side::Succ)
    }

    pub fn predecessors(&self) -> AdjacencyView<'_, N> {
        self.adjacency_for(Side::Pred)
    }

    fn adjacency_for(&self, side: Side) -> AdjacencyView<'_, N> {
        let side = side_for(self.is_directed(), side);
        AdjacencyView::new(self.scope(), side, self.caches.for_side(side))
    }

    pub fn degree(&self) -> DegreeView<'_, N> {
        degree_view(self.scope(), Side::Union)
    }

    pub fn in_degree(&self) -> DegreeView<'_, N> {
        degree_view(self.scope(), side_for(self.is_directed(), Side::Pred))
    }

    pub fn out_degree(&self) -> DegreeView<'_, N> {
        degree_view(self.scope(), side_for(self.is_directed(), Side::Succ))
    }

    /// A projection of this projection; only current members can be selected.
    pub fn subgraph<I>(&self, nodes: I) -> Subgraph<'_, N>
    where
        I: IntoIterator<Item = N>,
    {
        let members = members_of(self.store, nodes, Some(&*self.members));
        Subgraph::new(self.store, self.graph_attrs, members)
    }

    /// Copies the projection into a standalone graph.
    pub fn to_graph(&self) -> Graph<N> {
        Graph::rebuild(
            self.options(),
            self.graph_attrs.clone(),
            self.nodes().to_specs(),
            self.edges().to_specs(),
        )
    }
}

/// A projection that can edit node and edge attributes of its members in place.
///
/// Membership and structure cannot change through it; edits land in the parent's records.
#[derive(Debug)]
pub struct SubgraphMut<'g, N: NodeId> {
    store: &'g mut Store<N>,
    graph_attrs: &'g Attrs,
    members: FxIndexSet<N>,
}

impl<'g, N: NodeId> SubgraphMut<'g, N> {
    pub(crate) fn new(
        store: &'g mut Store<N>,
        graph_attrs: &'g Attrs,
        members: FxIndexSet<N>,
    ) -> Self {
        Self {
            store,
            graph_attrs,
            members,
        }
    }

    pub fn contains(&self, node: &N) -> bool {
        self.members.contains(node)
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn node_attrs_mut(&mut self, node: &N) -> Option<&mut Attrs> {
        if !self.members.contains(node) {
            return None;
        }
        self.store.nodes.get_mut(node)
    }

    /// First record of `(u, v)`.
    pub fn edge_attrs_mut(&mut self, u: &N, v: &N) -> Option<&mut Attrs> {
        if !self.members.contains(u) || !self.members.contains(v) {
            return None;
        }
        self.store.record_mut(u, v, None)
    }

    pub fn edge_keyed_attrs_mut(&mut self, u: &N, v: &N, key: &EdgeKey) -> Option<&mut Attrs> {
        if !self.members.contains(u) || !self.members.contains(v) {
            return None;
        }
        self.store.record_mut(u, v, Some(key))
    }

    /// Read-only view of the same projection.
    pub fn as_subgraph(&self) -> Subgraph<'_, N> {
        Subgraph {
            store: &*self.store,
            graph_attrs: self.graph_attrs,
            members: Cow::Borrowed(&self.members),
            caches: ViewCaches::default(),
        }
    }
}
