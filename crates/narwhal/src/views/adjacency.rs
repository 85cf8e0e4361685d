//! Node-to-neighbors views.
//!
//! The neighbor set of a node is cached by the owning graph (or subgraph) on first access
//! and served from the cache until [`AdjacencyView::invalidate`] or
//! [`AdjacencyView::invalidate_all`] is called. Edge records are read live, so records that
//! were removed after the neighbor set was cached are skipped.

use super::Scope;
use super::set_ops::KeyedCollection;
use crate::NodeId;
use crate::attrs::Attrs;
use crate::cache::{NeighborCache, NeighborSnapshot, Side};
use crate::error::{GraphError, Result};
use crate::key::EdgeKey;
use crate::store::Bundle;
use crate::store::arena::Arena;
use std::rc::Rc;

pub struct AdjacencyView<'g, N> {
    scope: Scope<'g, N>,
    side: Side,
    cache: &'g NeighborCache<N>,
}

impl<N> Clone for AdjacencyView<'_, N> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<N> Copy for AdjacencyView<'_, N> {}

impl<'g, N: NodeId> AdjacencyView<'g, N> {
    pub(crate) fn new(scope: Scope<'g, N>, side: Side, cache: &'g NeighborCache<N>) -> Self {
        Self { scope, side, cache }
    }

    /// Number of nodes.
    pub fn len(&self) -> usize {
        self.scope.node_count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn contains(&self, node: &N) -> bool {
        self.scope.contains_node(node)
    }

    pub fn get(&self, node: &N) -> Option<NeighborMap<'g, N>> {
        if !self.scope.contains_node(node) {
            return None;
        }
        let scope = self.scope;
        let side = self.side;
        let snapshot = self
            .cache
            .get_or_materialize(node, || scope.neighbor_snapshot(node, side));
        Some(NeighborMap {
            snapshot,
            bundles: &self.scope.store.bundles,
        })
    }

    pub fn try_get(&self, node: &N) -> Result<NeighborMap<'g, N>> {
        self.get(node)
            .ok_or_else(|| GraphError::node_not_found(node))
    }

    pub fn iter(self) -> impl Iterator<Item = (&'g N, NeighborMap<'g, N>)> + 'g {
        self.scope
            .node_ids()
            .filter_map(move |node| self.get(node).map(|nbrs| (node, nbrs)))
    }

    /// Whether the neighbor set of `node` is currently cached.
    pub fn is_cached(&self, node: &N) -> bool {
        self.cache.is_cached(node)
    }

    /// Drops the cached neighbor set of `node`. Returns `true` if one was cached.
    pub fn invalidate(&self, node: &N) -> bool {
        self.cache.invalidate(node)
    }

    pub fn invalidate_all(&self) {
        self.cache.invalidate_all();
    }
}

/// Neighbors of one node, each mapped to the edge record(s) connecting them.
///
/// For the full adjacency of a directed graph this is the union of successors then
/// predecessors. A neighbor on both sides (a self-loop, or reciprocal directed edges) looks up
/// to its successor record, but is counted and iterated once per side.
pub struct NeighborMap<'g, N> {
    snapshot: Rc<NeighborSnapshot<N>>,
    bundles: &'g Arena<Bundle>,
}

impl<N> Clone for NeighborMap<'_, N> {
    fn clone(&self) -> Self {
        Self {
            snapshot: Rc::clone(&self.snapshot),
            bundles: self.bundles,
        }
    }
}

impl<'g, N: NodeId> NeighborMap<'g, N> {
    fn live(&self) -> impl Iterator<Item = (&N, &'g Bundle)> + '_ {
        let bundles = self.bundles;
        self.snapshot
            .primary
            .iter()
            .chain(self.snapshot.secondary.iter())
            .filter_map(move |(nbr, slot)| bundles.get(*slot).map(|bundle| (nbr, bundle)))
    }

    fn bundle(&self, nbr: &N) -> Option<&'g Bundle> {
        let bundles = self.bundles;
        self.snapshot
            .primary
            .get(nbr)
            .and_then(|slot| bundles.get(*slot))
            .or_else(|| {
                self.snapshot
                    .secondary
                    .get(nbr)
                    .and_then(|slot| bundles.get(*slot))
            })
    }

    pub fn len(&self) -> usize {
        self.live().count()
    }

    pub fn is_empty(&self) -> bool {
        self.live().next().is_none()
    }

    pub fn contains(&self, nbr: &N) -> bool {
        self.bundle(nbr).is_some()
    }

    /// The first record of the edge to `nbr`.
    pub fn get(&self, nbr: &N) -> Option<&'g Attrs> {
        self.bundle(nbr).and_then(Bundle::first)
    }

    /// Every record of the edge to `nbr`, with its key.
    pub fn get_keyed(&self, nbr: &N) -> impl Iterator<Item = (&'g EdgeKey, &'g Attrs)> + use<'g, N> {
        self.bundle(nbr)
            .into_iter()
            .flat_map(|bundle| bundle.records.iter())
    }

    pub fn iter(&self) -> impl Iterator<Item = &N> + '_ {
        self.live().map(|(nbr, _)| nbr)
    }

    /// Neighbors with the record [`NeighborMap::get`] resolves them to; a neighbor listed on
    /// both sides reports its successor record both times.
    pub fn items(&self) -> impl Iterator<Item = (&N, &'g Attrs)> + '_ {
        self.live()
            .filter_map(|(nbr, _)| self.get(nbr).map(|attrs| (nbr, attrs)))
    }
}

impl<N: NodeId> KeyedCollection for NeighborMap<'_, N> {
    type Key = N;

    fn len(&self) -> usize {
        NeighborMap::len(self)
    }

    fn contains_key(&self, key: &N) -> bool {
        self.contains(key)
    }

    fn keys_owned(&self) -> impl Iterator<Item = N> + '_ {
        self.iter().cloned()
    }
}
