//! Per-view neighbor caches.
//!
//! A node's neighbor set is copied out of the adjacency tables the first time an
//! [`AdjacencyView`](crate::AdjacencyView) is asked for it and kept until explicitly
//! invalidated. Only neighbor ids and record slots are cached; attribute records are always
//! read from the arena, and slots freed since the snapshot resolve to nothing.

use crate::NodeId;
use crate::store::Row;
use hashbrown::HashMap;
use rustc_hash::FxBuildHasher;
use std::cell::RefCell;
use std::rc::Rc;

/// Which adjacency rows a view unions together.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Side {
    /// `succ[n]` followed by `pred[n]`.
    Union,
    Succ,
    Pred,
}

#[derive(Debug, Clone, Default)]
pub(crate) struct NeighborSnapshot<N> {
    pub(crate) primary: Row<N>,
    pub(crate) secondary: Row<N>,
}

#[derive(Debug)]
pub(crate) struct NeighborCache<N> {
    entries: RefCell<HashMap<N, Rc<NeighborSnapshot<N>>, FxBuildHasher>>,
}

impl<N> Default for NeighborCache<N> {
    fn default() -> Self {
        Self {
            entries: RefCell::new(HashMap::default()),
        }
    }
}

impl<N: NodeId> NeighborCache<N> {
    pub(crate) fn get_or_materialize(
        &self,
        node: &N,
        build: impl FnOnce() -> NeighborSnapshot<N>,
    ) -> Rc<NeighborSnapshot<N>> {
        if let Some(hit) = self.entries.borrow().get(node) {
            return Rc::clone(hit);
        }
        let snapshot = Rc::new(build());
        tracing::trace!(
            node = ?node,
            neighbors = snapshot.primary.len() + snapshot.secondary.len(),
            "materialized neighbor cache"
        );
        self.entries
            .borrow_mut()
            .insert(node.clone(), Rc::clone(&snapshot));
        snapshot
    }

    pub(crate) fn invalidate(&self, node: &N) -> bool {
        self.entries.borrow_mut().remove(node).is_some()
    }

    pub(crate) fn invalidate_all(&self) {
        self.entries.borrow_mut().clear();
    }

    pub(crate) fn is_cached(&self, node: &N) -> bool {
        self.entries.borrow().contains_key(node)
    }
}

/// The caches owned by one graph or subgraph, one per adjacency flavor.
#[derive(Debug)]
pub(crate) struct ViewCaches<N> {
    pub(crate) adjacency: NeighborCache<N>,
    pub(crate) successors: NeighborCache<N>,
    pub(crate) predecessors: NeighborCache<N>,
}

impl<N> Default for ViewCaches<N> {
    fn default() -> Self {
        Self {
            adjacency: NeighborCache::default(),
            successors: NeighborCache::default(),
            predecessors: NeighborCache::default(),
        }
    }
}

impl<N: NodeId> ViewCaches<N> {
    pub(crate) fn for_side(&self, side: Side) -> &NeighborCache<N> {
        match side {
            Side::Union => &self.adjacency,
            Side::Succ => &self.successors,
            Side::Pred => &self.predecessors,
        }
    }

    /// Drops every cached neighbor set of `node`.
    pub(crate) fn forget(&self, node: &N) {
        self.adjacency.invalidate(node);
        self.successors.invalidate(node);
        self.predecessors.invalidate(node);
    }

    pub(crate) fn clear(&self) {
        self.adjacency.invalidate_all();
        self.successors.invalidate_all();
        self.predecessors.invalidate_all();
    }
}
