use crate::attrs::{Attrs, weight_of};
use crate::cache::{Side, ViewCaches};
use crate::error::{GraphError, Result};
use crate::key::{EdgeSpec, NodeSpec};
use crate::options::GraphOptions;
use crate::store::Store;
use crate::subgraph::{Subgraph, SubgraphMut, members_of};
use crate::views::adjacency::AdjacencyView;
use crate::views::degree::{DegreeView, degree_view};
use crate::views::edges::{EdgeView, EdgeViewMut, MultiEdgeView};
use crate::views::nodes::{NodeView, NodeViewMut};
use crate::views::{Scope, side_for};
use crate::NodeId;
use serde_json::Value;

/// A directed or undirected (multi)graph with attribute records on nodes, edges and the graph.
///
/// Nodes are created on first reference by any node- or edge-adding operation. Views returned
/// by [`Graph::nodes`], [`Graph::edges`], [`Graph::adjacency`] and friends borrow the graph;
/// mutation goes through [`Graph::nodes_mut`] and [`Graph::edges_mut`].
#[derive(Debug)]
pub struct Graph<N> {
    store: Store<N>,
    attrs: Attrs,
    caches: ViewCaches<N>,
}

impl<N: NodeId> Default for Graph<N> {
    fn default() -> Self {
        Self::new(GraphOptions::default())
    }
}

impl<N: NodeId> Clone for Graph<N> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            attrs: self.attrs.clone(),
            caches: ViewCaches::default(),
        }
    }
}

impl<N: NodeId> Graph<N> {
    pub fn new(options: GraphOptions) -> Self {
        Self::with_attrs(options, Attrs::default())
    }

    pub fn directed() -> Self {
        Self::new(GraphOptions::directed())
    }

    pub fn undirected() -> Self {
        Self::new(GraphOptions::undirected())
    }

    pub fn with_attrs(options: GraphOptions, attrs: Attrs) -> Self {
        Self {
            store: Store::new(options),
            attrs,
            caches: ViewCaches::default(),
        }
    }

    /// Builds a graph from node and edge collections, e.g. the `to_specs()` output of
    /// another graph's views.
    pub fn from_parts<NI, EI>(options: GraphOptions, nodes: NI, edges: EI) -> Result<Self>
    where
        NI: IntoIterator<Item = NodeSpec<N>>,
        EI: IntoIterator<Item = EdgeSpec<N>>,
    {
        let mut graph = Self::new(options);
        graph.nodes_mut().update(nodes);
        graph.edges_mut().update(edges)?;
        Ok(graph)
    }

    /// A structurally equal graph with freshly allocated records.
    pub fn from_graph(other: &Graph<N>) -> Self {
        Self::rebuild(
            other.store.options,
            other.attrs.clone(),
            other.nodes().to_specs(),
            other.edges().to_specs(),
        )
    }

    pub fn copy(&self) -> Self {
        Self::from_graph(self)
    }

    /// Same nodes, edges and multigraph keys, with every attribute record left empty.
    pub fn copy_structure(&self) -> Self {
        let multigraph = self.is_multigraph();
        let nodes = self.nodes().iter().cloned().map(NodeSpec::Bare).collect();
        let edges = self
            .multi_edges()
            .iter()
            .map(|(u, v, key)| {
                if multigraph {
                    EdgeSpec::MultiKeyed(u.clone(), v.clone(), Some(key.clone()), Attrs::default())
                } else {
                    EdgeSpec::Pair(u.clone(), v.clone())
                }
            })
            .collect();
        Self::rebuild(self.store.options, Attrs::default(), nodes, edges)
    }

    /// Assembles a graph from specs known to fit `options`.
    pub(crate) fn rebuild(
        options: GraphOptions,
        attrs: Attrs,
        nodes: Vec<NodeSpec<N>>,
        edges: Vec<EdgeSpec<N>>,
    ) -> Self {
        let mut graph = Self::with_attrs(options, attrs);
        for spec in nodes {
            let (node, attrs) = spec.into_parts();
            graph.store.add_node(node, attrs);
        }
        for spec in edges {
            let (u, v, key, attrs) = spec.into_parts();
            graph.store.add_edge(u, v, key, attrs);
        }
        graph
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

    /// Number of nodes.
    pub fn order(&self) -> usize {
        self.store.nodes.len()
    }

    pub fn len(&self) -> usize {
        self.order()
    }

    pub fn is_empty(&self) -> bool {
        self.store.nodes.is_empty()
    }

    /// Number of edge records (parallel multigraph edges count individually).
    pub fn size(&self) -> usize {
        self.store.edge_count()
    }

    /// Sum of the `weight` attribute over every edge record; missing weights count 1.
    pub fn size_weighted(&self, weight: &str) -> f64 {
        self.scope()
            .records()
            .map(|(_, _, _, attrs)| weight_of(attrs, weight))
            .sum()
    }

    pub fn graph_attrs(&self) -> &Attrs {
        &self.attrs
    }

    pub fn graph_attrs_mut(&mut self) -> &mut Attrs {
        &mut self.attrs
    }

    fn scope(&self) -> Scope<'_, N> {
        Scope::whole(&self.store)
    }

    pub fn nodes(&self) -> NodeView<'_, N> {
        NodeView::new(self.scope())
    }

    pub fn nodes_mut(&mut self) -> NodeViewMut<'_, N> {
        NodeViewMut::new(&mut self.store, &self.caches)
    }

    pub fn edges(&self) -> EdgeView<'_, N> {
        EdgeView::new(self.scope())
    }

    pub fn multi_edges(&self) -> MultiEdgeView<'_, N> {
        MultiEdgeView::new(self.scope())
    }

    pub fn edges_mut(&mut self) -> EdgeViewMut<'_, N> {
        EdgeViewMut::new(&mut self.store)
    }

    /// Every node mapped to its neighbors on either side.
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

    /// Read-only projection onto the listed nodes that exist in this graph.
    pub fn subgraph<I>(&self, nodes: I) -> Subgraph<'_, N>
    where
        I: IntoIterator<Item = N>,
    {
        let members = members_of(&self.store, nodes, None);
        Subgraph::new(&self.store, &self.attrs, members)
    }

    /// Projection that also allows editing the attributes of its nodes and edges.
    pub fn subgraph_mut<I>(&mut self, nodes: I) -> SubgraphMut<'_, N>
    where
        I: IntoIterator<Item = N>,
    {
        let members = members_of(&self.store, nodes, None);
        SubgraphMut::new(&mut self.store, &self.attrs, members)
    }

    /// Removes all nodes, edges and graph attributes.
    pub fn clear(&mut self) {
        self.store.clear();
        self.attrs.clear();
        self.caches.clear();
    }

    /// Checks that the adjacency tables mirror each other and every record is referenced.
    pub fn validate(&self) -> Result<()> {
        self.store.validate()
    }
}

impl Graph<usize> {
    /// Nodes `0..n` with an edge for every nonzero cell, weighted by the cell value.
    ///
    /// On undirected graphs `rows[u][v]` and `rows[v][u]` describe the same edge: either cell
    /// may carry it, and when both are nonzero they must agree.
    pub fn from_weight_matrix(options: GraphOptions, rows: &[Vec<f64>]) -> Result<Self> {
        let n = rows.len();
        if let Some((ix, row)) = rows.iter().enumerate().find(|(_, row)| row.len() != n) {
            return Err(GraphError::invalid(format!(
                "adjacency matrix is not square: row {ix} has {} columns, expected {n}",
                row.len()
            )));
        }
        if rows.iter().flatten().any(|cell| !cell.is_finite()) {
            return Err(GraphError::invalid("adjacency matrix has a non-finite cell"));
        }
        if !options.directed {
            for u in 0..n {
                for v in 0..u {
                    let (lower, upper) = (rows[u][v], rows[v][u]);
                    if lower != 0.0 && upper != 0.0 && lower != upper {
                        return Err(GraphError::invalid(format!(
                            "undirected adjacency matrix is asymmetric at ({u}, {v}): \
                             {lower} vs {upper}"
                        )));
                    }
                }
            }
        }

        let mut graph = Self::new(options);
        for node in 0..n {
            graph.store.add_node(node, Attrs::default());
        }
        for (u, row) in rows.iter().enumerate() {
            for (v, &weight) in row.iter().enumerate() {
                if weight == 0.0 {
                    continue;
                }
                // Already added from the upper triangle.
                if !options.directed && v < u && rows[v][u] != 0.0 {
                    continue;
                }
                let mut attrs = Attrs::default();
                attrs.insert("weight".to_string(), Value::from(weight));
                graph.store.add_edge(u, v, None, attrs);
            }
        }
        tracing::debug!(nodes = n, edges = graph.size(), "built graph from weight matrix");
        Ok(graph)
    }

    /// Nodes `0..lists.len()`, with an edge from `i` to every entry of `lists[i]`.
    pub fn from_adjacency_list(options: GraphOptions, lists: &[Vec<usize>]) -> Result<Self> {
        let n = lists.len();
        for (u, nbrs) in lists.iter().enumerate() {
            if let Some(v) = nbrs.iter().find(|&&v| v >= n) {
                return Err(GraphError::invalid(format!(
                    "adjacency list of node {u} names node {v}, but only {n} nodes exist"
                )));
            }
        }

        let mut graph = Self::new(options);
        for node in 0..n {
            graph.store.add_node(node, Attrs::default());
        }
        for (u, nbrs) in lists.iter().enumerate() {
            for &v in nbrs {
                graph.store.add_edge(u, v, None, Attrs::default());
            }
        }
        Ok(graph)
    }
}
