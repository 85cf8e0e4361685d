//! Read-only (and a few mutable) views over a [`Store`].
//!
//! Every view is bound to a [`Scope`]: the whole graph, or the frozen node subset of a
//! subgraph projection. Edges are in scope only when both endpoints are.

pub mod adjacency;
pub mod data;
pub mod degree;
pub mod edges;
pub mod nodes;
pub mod set_ops;

use crate::attrs::Attrs;
use crate::cache::{NeighborSnapshot, Side};
use crate::key::EdgeKey;
use crate::store::{AdjTable, Bundle, Row, Store};
use crate::{FxIndexSet, NodeId};

pub(crate) struct Scope<'g, N> {
    pub(crate) store: &'g Store<N>,
    pub(crate) members: Option<&'g FxIndexSet<N>>,
}

impl<N> Clone for Scope<'_, N> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<N> Copy for Scope<'_, N> {}

impl<'g, N: NodeId> Scope<'g, N> {
    pub(crate) fn whole(store: &'g Store<N>) -> Self {
        Self {
            store,
            members: None,
        }
    }

    pub(crate) fn within(store: &'g Store<N>, members: &'g FxIndexSet<N>) -> Self {
        Self {
            store,
            members: Some(members),
        }
    }

    pub(crate) fn admits(&self, node: &N) -> bool {
        self.members.is_none_or(|members| members.contains(node))
    }

    pub(crate) fn contains_node(&self, node: &N) -> bool {
        self.admits(node) && self.store.nodes.contains_key(node)
    }

    pub(crate) fn node_count(&self) -> usize {
        match self.members {
            Some(members) => members.len(),
            None => self.store.nodes.len(),
        }
    }

    pub(crate) fn node_attrs(&self, node: &N) -> Option<&'g Attrs> {
        if !self.admits(node) {
            return None;
        }
        self.store.nodes.get(node)
    }

    /// Node ids in table insertion order (subgraph members are kept in that order too).
    pub(crate) fn node_ids(self) -> Box<dyn Iterator<Item = &'g N> + 'g> {
        match self.members {
            Some(members) => Box::new(members.iter()),
            None => Box::new(self.store.nodes.keys()),
        }
    }

    pub(crate) fn node_items(self) -> impl Iterator<Item = (&'g N, &'g Attrs)> + 'g {
        let nodes = &self.store.nodes;
        self.node_ids()
            .filter_map(move |node| nodes.get_key_value(node))
    }

    /// `(u, v, bundle)` for every adjacent pair in scope, in stored orientation.
    pub(crate) fn pairs(self) -> impl Iterator<Item = (&'g N, &'g N, &'g Bundle)> + 'g {
        let store = self.store;
        self.node_ids()
            .filter_map(move |u| store.succ.get_key_value(u))
            .flat_map(move |(u, row)| {
                row.iter()
                    .filter(move |(v, _)| self.admits(v))
                    .filter_map(move |(v, slot)| store.bundles.get(*slot).map(|b| (u, v, b)))
            })
    }

    /// `(u, v, key, attrs)` for every edge record in scope.
    pub(crate) fn records(
        self,
    ) -> impl Iterator<Item = (&'g N, &'g N, &'g EdgeKey, &'g Attrs)> + 'g {
        self.pairs().flat_map(|(u, v, bundle)| {
            bundle
                .records
                .iter()
                .map(move |(key, attrs)| (u, v, key, attrs))
        })
    }

    pub(crate) fn pair_count(&self) -> usize {
        match self.members {
            Some(_) => self.pairs().count(),
            None => self.store.pair_count(),
        }
    }

    pub(crate) fn record_count(&self) -> usize {
        match self.members {
            Some(_) => self.pairs().map(|(_, _, b)| b.records.len()).sum(),
            None => self.store.edge_count(),
        }
    }

    pub(crate) fn bundle(&self, u: &N, v: &N) -> Option<&'g Bundle> {
        if !self.admits(u) || !self.admits(v) {
            return None;
        }
        self.store.bundle(u, v)
    }

    /// Stored orientation of `(u, v)` when the pair is in scope.
    pub(crate) fn stored_pair(&self, u: &N, v: &N) -> Option<(N, N)> {
        if !self.admits(u) || !self.admits(v) {
            return None;
        }
        self.store.locate(u, v).map(|(a, b, _)| (a, b))
    }

    fn row_in_scope(&self, table: &'g AdjTable<N>, node: &N) -> Row<N> {
        table
            .get(node)
            .map(|row| {
                row.iter()
                    .filter(|(nbr, _)| self.admits(nbr))
                    .map(|(nbr, slot)| (nbr.clone(), *slot))
                    .collect()
            })
            .unwrap_or_default()
    }

    pub(crate) fn neighbor_snapshot(&self, node: &N, side: Side) -> NeighborSnapshot<N> {
        let (primary, secondary) = match side {
            Side::Union => (
                self.row_in_scope(&self.store.succ, node),
                self.row_in_scope(&self.store.pred, node),
            ),
            Side::Succ => (self.row_in_scope(&self.store.succ, node), Row::default()),
            Side::Pred => (self.row_in_scope(&self.store.pred, node), Row::default()),
        };
        NeighborSnapshot { primary, secondary }
    }

    /// Adjacency rows of `node` counted by degree views for the given side.
    pub(crate) fn incident_rows(&self, node: &N, side: Side) -> [Option<&'g Row<N>>; 2] {
        let store = self.store;
        match side {
            Side::Union => [store.succ.get(node), store.pred.get(node)],
            Side::Succ => [store.succ.get(node), None],
            Side::Pred => [store.pred.get(node), None],
        }
    }
}

/// Successor / predecessor flavors collapse to the neighbor union on undirected graphs.
pub(crate) fn side_for(directed: bool, side: Side) -> Side {
    if directed { side } else { Side::Union }
}
