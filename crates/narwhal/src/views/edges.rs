use super::Scope;
use super::data::{DataSource, DataView};
use super::set_ops::KeyedCollection;
use crate::NodeId;
use crate::attrs::{Attrs, layered};
use crate::error::{GraphError, Result};
use crate::key::{EdgeKey, EdgeSpec};
use crate::store::Store;
use serde_json::Value;

fn specs_of<'g, N: NodeId>(scope: Scope<'g, N>) -> Vec<EdgeSpec<N>> {
    let multigraph = scope.store.is_multigraph();
    scope
        .records()
        .map(|(u, v, key, attrs)| {
            if multigraph {
                EdgeSpec::MultiKeyed(u.clone(), v.clone(), Some(key.clone()), attrs.clone())
            } else {
                EdgeSpec::PairWithAttrs(u.clone(), v.clone(), attrs.clone())
            }
        })
        .collect()
}

/// One entry per adjacent pair. On multigraphs the pair's first record stands in for it.
///
/// Undirected graphs report each edge once, in the orientation it was stored with, while
/// lookups accept either orientation.
pub struct EdgeView<'g, N> {
    scope: Scope<'g, N>,
}

impl<N> Clone for EdgeView<'_, N> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<N> Copy for EdgeView<'_, N> {}

impl<'g, N: NodeId> EdgeView<'g, N> {
    pub(crate) fn new(scope: Scope<'g, N>) -> Self {
        Self { scope }
    }

    pub fn len(&self) -> usize {
        self.scope.pair_count()
    }

    pub fn is_empty(&self) -> bool {
        self.iter().next().is_none()
    }

    pub fn contains(&self, u: &N, v: &N) -> bool {
        self.scope.bundle(u, v).is_some()
    }

    pub fn get(&self, u: &N, v: &N) -> Option<&'g Attrs> {
        self.scope.bundle(u, v).and_then(|bundle| bundle.first())
    }

    pub fn try_get(&self, u: &N, v: &N) -> Result<&'g Attrs> {
        self.get(u, v)
            .ok_or_else(|| GraphError::edge_not_found(u, v, None))
    }

    pub fn iter(self) -> impl Iterator<Item = (&'g N, &'g N)> + 'g {
        self.scope.pairs().map(|(u, v, _)| (u, v))
    }

    pub fn keys(self) -> impl Iterator<Item = (&'g N, &'g N)> + 'g {
        self.iter()
    }

    pub fn values(self) -> impl Iterator<Item = &'g Attrs> + 'g {
        self.items().map(|(_, _, attrs)| attrs)
    }

    pub fn items(self) -> impl Iterator<Item = (&'g N, &'g N, &'g Attrs)> + 'g {
        self.scope
            .pairs()
            .filter_map(|(u, v, bundle)| bundle.first().map(|attrs| (u, v, attrs)))
    }

    /// True when `(u, v)` is an edge whose record equals `attrs`.
    pub fn contains_item(&self, u: &N, v: &N, attrs: &Attrs) -> bool {
        self.get(u, v).is_some_and(|record| record == attrs)
    }

    pub fn data(self, name: &str) -> DataView<'g, Self, &'g Value> {
        let name = name.to_string();
        DataView::new(self, move |attrs: &'g Attrs| attrs.get(&name))
    }

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

    pub fn selfloops(self) -> impl Iterator<Item = (&'g N, &'g N)> + 'g {
        self.iter().filter(|(u, v)| u == v)
    }

    /// Owned copies of every edge record. Multigraph specs keep their keys.
    pub fn to_specs(&self) -> Vec<EdgeSpec<N>> {
        specs_of(self.scope)
    }
}

impl<N: NodeId> KeyedCollection for EdgeView<'_, N> {
    type Key = (N, N);

    fn len(&self) -> usize {
        EdgeView::len(self)
    }

    fn contains_key(&self, (u, v): &(N, N)) -> bool {
        self.contains(u, v)
    }

    fn keys_owned(&self) -> impl Iterator<Item = (N, N)> + '_ {
        self.iter().map(|(u, v)| (u.clone(), v.clone()))
    }

    fn resolve_key(&self, (u, v): &(N, N)) -> Option<(N, N)> {
        self.scope.stored_pair(u, v)
    }

    fn mirrored_key(&self, (u, v): &(N, N)) -> Option<(N, N)> {
        (!self.scope.store.is_directed()).then(|| (v.clone(), u.clone()))
    }
}

impl<'g, N: NodeId> DataSource<'g> for EdgeView<'g, N> {
    type Key = (N, N);
    type Item = &'g Attrs;

    fn entries(&self) -> Box<dyn Iterator<Item = ((N, N), &'g Attrs)> + 'g> {
        Box::new(
            self.items()
                .map(|(u, v, attrs)| ((u.clone(), v.clone()), attrs)),
        )
    }

    fn entry(&self, (u, v): &(N, N)) -> Option<&'g Attrs> {
        self.get(u, v)
    }
}

/// One entry per edge record, keyed by `(u, v, key)`.
pub struct MultiEdgeView<'g, N> {
    scope: Scope<'g, N>,
}

impl<N> Clone for MultiEdgeView<'_, N> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<N> Copy for MultiEdgeView<'_, N> {}

impl<'g, N: NodeId> MultiEdgeView<'g, N> {
    pub(crate) fn new(scope: Scope<'g, N>) -> Self {
        Self { scope }
    }

    pub fn len(&self) -> usize {
        self.scope.record_count()
    }

    pub fn is_empty(&self) -> bool {
        self.iter().next().is_none()
    }

    pub fn contains(&self, u: &N, v: &N, key: &EdgeKey) -> bool {
        self.get(u, v, Some(key)).is_some()
    }

    /// Record of `(u, v, key)`; without a key, the pair's first record.
    pub fn get(&self, u: &N, v: &N, key: Option<&EdgeKey>) -> Option<&'g Attrs> {
        self.scope.bundle(u, v).and_then(|bundle| bundle.record(key))
    }

    pub fn try_get(&self, u: &N, v: &N, key: Option<&EdgeKey>) -> Result<&'g Attrs> {
        self.get(u, v, key)
            .ok_or_else(|| GraphError::edge_not_found(u, v, key))
    }

    /// Keys of the records between `u` and `v`, in insertion order.
    pub fn keys_between(&self, u: &N, v: &N) -> Vec<&'g EdgeKey> {
        self.scope
            .bundle(u, v)
            .map(|bundle| bundle.records.keys().collect())
            .unwrap_or_default()
    }

    pub fn iter(self) -> impl Iterator<Item = (&'g N, &'g N, &'g EdgeKey)> + 'g {
        self.scope.records().map(|(u, v, key, _)| (u, v, key))
    }

    pub fn keys(self) -> impl Iterator<Item = (&'g N, &'g N, &'g EdgeKey)> + 'g {
        self.iter()
    }

    pub fn values(self) -> impl Iterator<Item = &'g Attrs> + 'g {
        self.scope.records().map(|(_, _, _, attrs)| attrs)
    }

    pub fn items(self) -> impl Iterator<Item = (&'g N, &'g N, &'g EdgeKey, &'g Attrs)> + 'g {
        self.scope.records()
    }

    pub fn contains_item(&self, u: &N, v: &N, key: &EdgeKey, attrs: &Attrs) -> bool {
        self.get(u, v, Some(key))
            .is_some_and(|record| record == attrs)
    }

    pub fn data(self, name: &str) -> DataView<'g, Self, &'g Value> {
        let name = name.to_string();
        DataView::new(self, move |attrs: &'g Attrs| attrs.get(&name))
    }

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

    pub fn selfloops(self) -> impl Iterator<Item = (&'g N, &'g N, &'g EdgeKey)> + 'g {
        self.iter().filter(|(u, v, _)| u == v)
    }

    pub fn to_specs(&self) -> Vec<EdgeSpec<N>> {
        specs_of(self.scope)
    }
}

impl<N: NodeId> KeyedCollection for MultiEdgeView<'_, N> {
    type Key = (N, N, EdgeKey);

    fn len(&self) -> usize {
        MultiEdgeView::len(self)
    }

    fn contains_key(&self, (u, v, key): &(N, N, EdgeKey)) -> bool {
        self.contains(u, v, key)
    }

    fn keys_owned(&self) -> impl Iterator<Item = (N, N, EdgeKey)> + '_ {
        self.iter()
            .map(|(u, v, key)| (u.clone(), v.clone(), key.clone()))
    }

    fn resolve_key(&self, (u, v, key): &(N, N, EdgeKey)) -> Option<(N, N, EdgeKey)> {
        if !self.contains(u, v, key) {
            return None;
        }
        self.scope
            .stored_pair(u, v)
            .map(|(a, b)| (a, b, key.clone()))
    }

    fn mirrored_key(&self, (u, v, key): &(N, N, EdgeKey)) -> Option<(N, N, EdgeKey)> {
        (!self.scope.store.is_directed()).then(|| (v.clone(), u.clone(), key.clone()))
    }
}

impl<'g, N: NodeId> DataSource<'g> for MultiEdgeView<'g, N> {
    type Key = (N, N, EdgeKey);
    type Item = &'g Attrs;

    fn entries(&self) -> Box<dyn Iterator<Item = ((N, N, EdgeKey), &'g Attrs)> + 'g> {
        Box::new(
            self.items()
                .map(|(u, v, key, attrs)| ((u.clone(), v.clone(), key.clone()), attrs)),
        )
    }

    fn entry(&self, (u, v, key): &(N, N, EdgeKey)) -> Option<&'g Attrs> {
        self.get(u, v, Some(key))
    }
}

/// Edge mutations.
pub struct EdgeViewMut<'g, N> {
    store: &'g mut Store<N>,
}

impl<'g, N: NodeId> EdgeViewMut<'g, N> {
    pub(crate) fn new(store: &'g mut Store<N>) -> Self {
        Self { store }
    }

    pub fn as_view(&self) -> EdgeView<'_, N> {
        EdgeView::new(Scope::whole(self.store))
    }

    pub fn as_multi_view(&self) -> MultiEdgeView<'_, N> {
        MultiEdgeView::new(Scope::whole(self.store))
    }

    pub fn len(&self) -> usize {
        self.store.pair_count()
    }

    pub fn is_empty(&self) -> bool {
        self.store.pair_count() == 0
    }

    /// Adds `(u, v)`, creating missing endpoints.
    ///
    /// Simple graphs merge `attrs` into an existing record and return `false`. Multigraphs
    /// always add a new parallel edge under a fresh key.
    pub fn add(&mut self, u: N, v: N, attrs: Attrs) -> bool {
        let (_, created) = self.store.add_edge(u, v, None, attrs);
        created
    }

    /// Adds a keyed multigraph edge. `None` picks the smallest free integer key for the pair;
    /// an existing key merges `attrs` and reports `false`.
    pub fn add_keyed(
        &mut self,
        u: N,
        v: N,
        key: Option<EdgeKey>,
        attrs: Attrs,
    ) -> Result<(EdgeKey, bool)> {
        if !self.store.is_multigraph() {
            return Err(GraphError::invalid(
                "edge keys are only accepted by multigraphs",
            ));
        }
        Ok(self.store.add_edge(u, v, key, attrs))
    }

    /// Removes `(u, v)`; on multigraphs, only its most recently added record.
    pub fn discard(&mut self, u: &N, v: &N) -> bool {
        self.store.remove_edge(u, v, None).is_some()
    }

    pub fn discard_keyed(&mut self, u: &N, v: &N, key: &EdgeKey) -> bool {
        self.store.remove_edge(u, v, Some(key)).is_some()
    }

    pub fn remove(&mut self, u: &N, v: &N) -> Result<()> {
        self.store
            .remove_edge(u, v, None)
            .map(|_| ())
            .ok_or_else(|| GraphError::edge_not_found(u, v, None))
    }

    pub fn remove_keyed(&mut self, u: &N, v: &N, key: &EdgeKey) -> Result<()> {
        self.store
            .remove_edge(u, v, Some(key))
            .map(|_| ())
            .ok_or_else(|| GraphError::edge_not_found(u, v, Some(key)))
    }

    /// Bulk add. Returns how many records were created.
    pub fn update<I>(&mut self, specs: I) -> Result<usize>
    where
        I: IntoIterator<Item = EdgeSpec<N>>,
    {
        self.update_with(specs, &Attrs::default())
    }

    /// Bulk add with attributes shared by every edge; per-edge attributes win on conflicts.
    ///
    /// All specs are checked before any edge is added.
    pub fn update_with<I>(&mut self, specs: I, common: &Attrs) -> Result<usize>
    where
        I: IntoIterator<Item = EdgeSpec<N>>,
    {
        let specs: Vec<EdgeSpec<N>> = specs.into_iter().collect();
        if !self.store.is_multigraph() {
            if let Some(spec) = specs.iter().find(|spec| spec.explicit_key().is_some()) {
                let (u, v) = spec.endpoints();
                return Err(GraphError::invalid(format!(
                    "keyed edge ({u:?}, {v:?}) given to a graph without multi-edges"
                )));
            }
        }

        let mut created = 0;
        for spec in specs {
            let (u, v, key, attrs) = spec.into_parts();
            let (_, is_new) = self.store.add_edge(u, v, key, layered(common, attrs));
            if is_new {
                created += 1;
            }
        }
        Ok(created)
    }

    /// Removes every edge; nodes stay.
    pub fn clear(&mut self) {
        self.store.clear_edges();
    }

    pub fn get_mut(&mut self, u: &N, v: &N) -> Option<&mut Attrs> {
        self.store.record_mut(u, v, None)
    }

    pub fn get_keyed_mut(&mut self, u: &N, v: &N, key: &EdgeKey) -> Option<&mut Attrs> {
        self.store.record_mut(u, v, Some(key))
    }
}
