use super::Scope;
use super::data::{DataSource, DataView};
use super::set_ops::KeyedCollection;
use crate::attrs::{Attrs, layered};
use crate::cache::ViewCaches;
use crate::error::{GraphError, Result};
use crate::key::NodeSpec;
use crate::store::Store;
use crate::{FxIndexSet, NodeId};
use serde_json::Value;

/// Node ids and their attribute records.
pub struct NodeView<'g, N> {
    scope: Scope<'g, N>,
}

impl<N> Clone for NodeView<'_, N> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<N> Copy for NodeView<'_, N> {}

impl<'g, N: NodeId> NodeView<'g, N> {
    pub(crate) fn new(scope: Scope<'g, N>) -> Self {
        Self { scope }
    }

    pub fn len(&self) -> usize {
        self.scope.node_count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn contains(&self, node: &N) -> bool {
        self.scope.contains_node(node)
    }

    pub fn get(&self, node: &N) -> Option<&'g Attrs> {
        self.scope.node_attrs(node)
    }

    pub fn try_get(&self, node: &N) -> Result<&'g Attrs> {
        self.get(node).ok_or_else(|| GraphError::node_not_found(node))
    }

    pub fn iter(self) -> impl Iterator<Item = &'g N> + 'g {
        self.scope.node_ids()
    }

    pub fn keys(self) -> impl Iterator<Item = &'g N> + 'g {
        self.iter()
    }

    pub fn values(self) -> impl Iterator<Item = &'g Attrs> + 'g {
        self.items().map(|(_, attrs)| attrs)
    }

    pub fn items(self) -> impl Iterator<Item = (&'g N, &'g Attrs)> + 'g {
        self.scope.node_items()
    }

    /// The value of attribute `name` for every node that has it.
    pub fn data(self, name: &str) -> DataView<'g, Self, &'g Value> {
        let name = name.to_string();
        DataView::new(self, move |attrs: &'g Attrs| attrs.get(&name))
    }

    /// Like [`NodeView::data`], but nodes without the attribute report `default`.
    pub fn data_or(self, name: &str, default: Value) -> DataView<'g, Self, Value> {
        let name = name.to_string();
        DataView::new(self, move |attrs: &'g Attrs| {
            Some(attrs.get(&name).cloned().unwrap_or_else(|| default.clone()))
        })
    }

    pub fn data_with<T, F>(self, extract: F) -> DataView<'g, Self, T>
    where
        T: Clone,
        F: Fn(&'g Attrs) -> Option<T> + 'g,
    {
        DataView::new(self, extract)
    }

    /// Nodes carrying a self-loop.
    pub fn selfloops(self) -> impl Iterator<Item = &'g N> + 'g {
        let scope = self.scope;
        scope
            .node_ids()
            .filter(move |node| scope.bundle(node, node).is_some())
    }

    /// Owned copies of every node and record, ready to seed another graph.
    pub fn to_specs(&self) -> Vec<NodeSpec<N>> {
        self.items()
            .map(|(node, attrs)| NodeSpec::WithAttrs(node.clone(), attrs.clone()))
            .collect()
    }
}

impl<N: NodeId> KeyedCollection for NodeView<'_, N> {
    type Key = N;

    fn len(&self) -> usize {
        NodeView::len(self)
    }

    fn contains_key(&self, key: &N) -> bool {
        self.contains(key)
    }

    fn keys_owned(&self) -> impl Iterator<Item = N> + '_ {
        self.iter().cloned()
    }
}

impl<'g, N: NodeId> DataSource<'g> for NodeView<'g, N> {
    type Key = N;
    type Item = &'g Attrs;

    fn entries(&self) -> Box<dyn Iterator<Item = (N, &'g Attrs)> + 'g> {
        Box::new(self.items().map(|(node, attrs)| (node.clone(), attrs)))
    }

    fn entry(&self, key: &N) -> Option<&'g Attrs> {
        self.get(key)
    }
}

/// Node mutations. Borrowing this view locks the graph for the duration.
pub struct NodeViewMut<'g, N> {
    store: &'g mut Store<N>,
    caches: &'g ViewCaches<N>,
}

impl<'g, N: NodeId> NodeViewMut<'g, N> {
    pub(crate) fn new(store: &'g mut Store<N>, caches: &'g ViewCaches<N>) -> Self {
        Self { store, caches }
    }

    pub fn as_view(&self) -> NodeView<'_, N> {
        NodeView::new(Scope::whole(self.store))
    }

    pub fn len(&self) -> usize {
        self.store.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.nodes.is_empty()
    }

    pub fn contains(&self, node: &N) -> bool {
        self.store.nodes.contains_key(node)
    }

    /// Adds `node`, or merges `attrs` into its record when it already exists.
    /// Returns `true` when the node was created.
    pub fn add(&mut self, node: N, attrs: Attrs) -> bool {
        self.store.add_node(node, attrs)
    }

    /// Removes `node` with all incident edges. Returns `false` when it was absent.
    pub fn discard(&mut self, node: &N) -> bool {
        self.destroy(node).is_some()
    }

    pub fn remove(&mut self, node: &N) -> Result<()> {
        self.destroy(node)
            .map(|_| ())
            .ok_or_else(|| GraphError::node_not_found(node))
    }

    /// Bulk add. Returns how many nodes were created.
    pub fn update<I>(&mut self, specs: I) -> usize
    where
        I: IntoIterator<Item = NodeSpec<N>>,
    {
        self.update_with(specs, &Attrs::default())
    }

    /// Bulk add with attributes shared by every node; per-node attributes win on conflicts.
    pub fn update_with<I>(&mut self, specs: I, common: &Attrs) -> usize
    where
        I: IntoIterator<Item = NodeSpec<N>>,
    {
        let mut created = 0;
        for spec in specs {
            let (node, attrs) = spec.into_parts();
            if self.store.add_node(node, layered(common, attrs)) {
                created += 1;
            }
        }
        created
    }

    pub fn extend<I>(&mut self, nodes: I) -> usize
    where
        I: IntoIterator<Item = N>,
    {
        self.update(nodes.into_iter().map(NodeSpec::Bare))
    }

    /// Removes every node and edge, and drops cached neighbor sets.
    pub fn clear(&mut self) {
        self.store.clear();
        self.caches.clear();
    }

    pub fn get_mut(&mut self, node: &N) -> Option<&mut Attrs> {
        self.store.nodes.get_mut(node)
    }

    /// Keeps only the nodes also listed in `keep`. Returns how many were removed.
    pub fn retain_only<I>(&mut self, keep: I) -> usize
    where
        I: IntoIterator<Item = N>,
    {
        let keep: FxIndexSet<N> = keep.into_iter().collect();
        let doomed: Vec<N> = self
            .store
            .nodes
            .keys()
            .filter(|node| !keep.contains(*node))
            .cloned()
            .collect();
        self.remove_all(doomed)
    }

    /// Removes every listed node that is present. Returns how many were removed.
    pub fn difference_update<I>(&mut self, nodes: I) -> usize
    where
        I: IntoIterator<Item = N>,
    {
        self.remove_all(nodes)
    }

    /// Removes listed nodes that are present and adds the ones that are not.
    pub fn symmetric_difference_update<I>(&mut self, nodes: I)
    where
        I: IntoIterator<Item = N>,
    {
        let toggled: FxIndexSet<N> = nodes.into_iter().collect();
        for node in toggled {
            if self.destroy(&node).is_none() {
                self.store.add_node(node, Attrs::default());
            }
        }
    }

    fn remove_all<I>(&mut self, nodes: I) -> usize
    where
        I: IntoIterator<Item = N>,
    {
        nodes
            .into_iter()
            .filter(|node| self.destroy(node).is_some())
            .count()
    }

    /// Removes `node` and forgets its cached neighbor sets.
    fn destroy(&mut self, node: &N) -> Option<Attrs> {
        let attrs = self.store.remove_node(node)?;
        self.caches.forget(node);
        Some(attrs)
    }
}
