//! Node table plus the mirrored `succ` / `pred` adjacency tables.
//!
//! Every adjacent pair owns one [`Bundle`] in the record arena. `succ[u][v]` and `pred[v][u]`
//! hold the same [`SlotId`], so both orientations resolve to the same records. Undirected edges
//! are stored once, in the orientation they were first added with; the reverse orientation is
//! found through `pred[u][v]`.

pub mod arena;

use crate::attrs::{Attrs, merge_into};
use crate::error::{GraphError, Result};
use crate::key::EdgeKey;
use crate::options::GraphOptions;
use crate::{FxIndexMap, NodeId};
use arena::{Arena, SlotId};
use hashbrown::HashSet;
use rustc_hash::FxBuildHasher;

pub(crate) type Row<N> = FxIndexMap<N, SlotId>;
pub(crate) type AdjTable<N> = FxIndexMap<N, Row<N>>;

/// All records between one adjacent pair, keyed by edge key.
#[derive(Debug, Clone, Default)]
pub(crate) struct Bundle {
    pub(crate) records: FxIndexMap<EdgeKey, Attrs>,
}

impl Bundle {
    pub(crate) fn first(&self) -> Option<&Attrs> {
        self.records.first().map(|(_, attrs)| attrs)
    }

    pub(crate) fn record(&self, key: Option<&EdgeKey>) -> Option<&Attrs> {
        match key {
            Some(key) => self.records.get(key),
            None => self.first(),
        }
    }

    fn record_mut(&mut self, key: Option<&EdgeKey>) -> Option<&mut Attrs> {
        match key {
            Some(key) => self.records.get_mut(key),
            None => self.records.first_mut().map(|(_, attrs)| attrs),
        }
    }

    /// Smallest non-negative integer key not used by this pair.
    fn next_free_key(&self) -> EdgeKey {
        let mut ix = 0u64;
        while self.records.contains_key(&EdgeKey::Index(ix)) {
            ix += 1;
        }
        EdgeKey::Index(ix)
    }
}

#[derive(Debug, Clone)]
pub(crate) struct Store<N> {
    pub(crate) options: GraphOptions,
    pub(crate) nodes: FxIndexMap<N, Attrs>,
    pub(crate) succ: AdjTable<N>,
    pub(crate) pred: AdjTable<N>,
    pub(crate) bundles: Arena<Bundle>,
}

impl<N: NodeId> Store<N> {
    pub(crate) fn new(options: GraphOptions) -> Self {
        Self {
            options,
            nodes: FxIndexMap::default(),
            succ: AdjTable::default(),
            pred: AdjTable::default(),
            bundles: Arena::default(),
        }
    }

    pub(crate) fn is_directed(&self) -> bool {
        self.options.directed
    }

    pub(crate) fn is_multigraph(&self) -> bool {
        self.options.multigraph
    }

    /// Inserts `node` or merges `attrs` into its existing record. Returns `true` when created.
    pub(crate) fn add_node(&mut self, node: N, attrs: Attrs) -> bool {
        if let Some(existing) = self.nodes.get_mut(&node) {
            merge_into(existing, attrs);
            return false;
        }
        self.succ.insert(node.clone(), Row::default());
        self.pred.insert(node.clone(), Row::default());
        self.nodes.insert(node, attrs);
        true
    }

    pub(crate) fn ensure_node(&mut self, node: &N) {
        if !self.nodes.contains_key(node) {
            self.add_node(node.clone(), Attrs::default());
        }
    }

    /// Removes `node` and every incident edge from both tables.
    pub(crate) fn remove_node(&mut self, node: &N) -> Option<Attrs> {
        let attrs = self.nodes.shift_remove(node)?;
        let out_row = self.succ.shift_remove(node).unwrap_or_default();
        let in_row = self.pred.shift_remove(node).unwrap_or_default();
        let incident = out_row.len() + in_row.len();

        for (v, slot) in out_row {
            if &v != node {
                if let Some(row) = self.pred.get_mut(&v) {
                    row.shift_remove(node);
                }
            }
            self.bundles.remove(slot);
        }
        for (u, slot) in in_row {
            if &u != node {
                if let Some(row) = self.succ.get_mut(&u) {
                    row.shift_remove(node);
                }
            }
            // A self-loop slot was already freed above; the second remove is a no-op.
            self.bundles.remove(slot);
        }

        tracing::debug!(node = ?node, incident, "removed node");
        Some(attrs)
    }

    /// Slot for the pair `(u, v)`; undirected graphs also match the reverse orientation.
    pub(crate) fn pair_slot(&self, u: &N, v: &N) -> Option<SlotId> {
        if let Some(slot) = self.succ.get(u).and_then(|row| row.get(v)) {
            return Some(*slot);
        }
        if self.is_directed() {
            return None;
        }
        self.pred.get(u).and_then(|row| row.get(v)).copied()
    }

    /// The stored orientation and slot of `(u, v)`.
    pub(crate) fn locate(&self, u: &N, v: &N) -> Option<(N, N, SlotId)> {
        if let Some(slot) = self.succ.get(u).and_then(|row| row.get(v)) {
            return Some((u.clone(), v.clone(), *slot));
        }
        if self.is_directed() {
            return None;
        }
        self.pred
            .get(u)
            .and_then(|row| row.get(v))
            .map(|slot| (v.clone(), u.clone(), *slot))
    }

    pub(crate) fn bundle(&self, u: &N, v: &N) -> Option<&Bundle> {
        self.pair_slot(u, v).and_then(|slot| self.bundles.get(slot))
    }

    pub(crate) fn record_mut(&mut self, u: &N, v: &N, key: Option<&EdgeKey>) -> Option<&mut Attrs> {
        let slot = self.pair_slot(u, v)?;
        self.bundles
            .get_mut(slot)
            .and_then(|bundle| bundle.record_mut(key))
    }

    /// Adds or merges an edge record. Returns the record key and whether the record is new.
    ///
    /// Simple graphs always use [`EdgeKey::FIRST`] and ignore `key`. On multigraphs `None`
    /// allocates a fresh key, while an existing key merges `attrs` into its record.
    pub(crate) fn add_edge(
        &mut self,
        u: N,
        v: N,
        key: Option<EdgeKey>,
        attrs: Attrs,
    ) -> (EdgeKey, bool) {
        self.ensure_node(&u);
        self.ensure_node(&v);
        let multigraph = self.is_multigraph();

        let existing = self.pair_slot(&u, &v);
        if let Some(bundle) = existing.and_then(|slot| self.bundles.get_mut(slot)) {
            let key = match key {
                Some(key) if multigraph => key,
                None if multigraph => bundle.next_free_key(),
                _ => EdgeKey::FIRST,
            };
            return match bundle.records.get_mut(&key) {
                Some(record) => {
                    merge_into(record, attrs);
                    (key, false)
                }
                None => {
                    bundle.records.insert(key.clone(), attrs);
                    (key, true)
                }
            };
        }

        let key = match key {
            Some(key) if multigraph => key,
            _ => EdgeKey::FIRST,
        };
        let mut bundle = Bundle::default();
        bundle.records.insert(key.clone(), attrs);
        let slot = self.bundles.insert(bundle);
        if let Some(row) = self.pred.get_mut(&v) {
            row.insert(u.clone(), slot);
        }
        if let Some(row) = self.succ.get_mut(&u) {
            row.insert(v, slot);
        }
        (key, true)
    }

    /// Removes one record of `(u, v)`: the named key, or the most recently added one.
    /// The pair entry goes away with its last record.
    pub(crate) fn remove_edge(
        &mut self,
        u: &N,
        v: &N,
        key: Option<&EdgeKey>,
    ) -> Option<(EdgeKey, Attrs)> {
        let (a, b, slot) = self.locate(u, v)?;
        let bundle = self.bundles.get_mut(slot)?;
        let removed = match key {
            Some(key) => bundle.records.shift_remove_entry(key)?,
            None => bundle.records.pop()?,
        };
        if bundle.records.is_empty() {
            self.unlink(&a, &b, slot);
        }
        tracing::trace!(u = ?a, v = ?b, key = %removed.0, "removed edge record");
        Some(removed)
    }

    fn unlink(&mut self, u: &N, v: &N, slot: SlotId) {
        if let Some(row) = self.succ.get_mut(u) {
            row.shift_remove(v);
        }
        if let Some(row) = self.pred.get_mut(v) {
            row.shift_remove(u);
        }
        self.bundles.remove(slot);
    }

    /// Removes every edge, keeping nodes and their (now empty) adjacency rows.
    pub(crate) fn clear_edges(&mut self) {
        for row in self.succ.values_mut().chain(self.pred.values_mut()) {
            row.clear();
        }
        self.bundles.clear();
    }

    pub(crate) fn clear(&mut self) {
        self.nodes.clear();
        self.succ.clear();
        self.pred.clear();
        self.bundles.clear();
    }

    /// Number of adjacent pairs.
    pub(crate) fn pair_count(&self) -> usize {
        self.bundles.len()
    }

    /// Number of edge records; equals [`Self::pair_count`] on simple graphs.
    pub(crate) fn edge_count(&self) -> usize {
        self.bundles
            .iter()
            .map(|(_, bundle)| bundle.records.len())
            .sum()
    }

    pub(crate) fn validate(&self) -> Result<()> {
        let result = self.check_tables();
        if let Err(err) = &result {
            tracing::error!(error = %err, "graph tables are inconsistent");
        }
        result
    }

    fn check_tables(&self) -> Result<()> {
        let violation = |message: String| GraphError::InvariantViolation { message };

        if self.succ.len() != self.nodes.len() || self.pred.len() != self.nodes.len() {
            return Err(violation(format!(
                "table sizes differ: nodes={} succ={} pred={}",
                self.nodes.len(),
                self.succ.len(),
                self.pred.len()
            )));
        }
        for node in self.nodes.keys() {
            if !self.succ.contains_key(node) || !self.pred.contains_key(node) {
                return Err(violation(format!("node {node:?} is missing an adjacency row")));
            }
        }

        let mut seen: HashSet<SlotId, FxBuildHasher> = HashSet::default();
        for (u, row) in &self.succ {
            for (v, slot) in row {
                if self.pred.get(v).and_then(|r| r.get(u)) != Some(slot) {
                    return Err(violation(format!("succ[{u:?}][{v:?}] has no matching pred entry")));
                }
                let Some(bundle) = self.bundles.get(*slot) else {
                    return Err(violation(format!("succ[{u:?}][{v:?}] points at a freed record")));
                };
                if bundle.records.is_empty() {
                    return Err(violation(format!("pair ({u:?}, {v:?}) has no records")));
                }
                if !self.options.multigraph && bundle.records.len() != 1 {
                    return Err(violation(format!(
                        "simple pair ({u:?}, {v:?}) holds {} records",
                        bundle.records.len()
                    )));
                }
                if !self.is_directed() && u != v && self.succ.get(v).is_some_and(|r| r.contains_key(u)) {
                    return Err(violation(format!(
                        "undirected pair ({u:?}, {v:?}) is stored in both orientations"
                    )));
                }
                if !seen.insert(*slot) {
                    return Err(violation(format!("record of ({u:?}, {v:?}) is shared by two pairs")));
                }
            }
        }
        for (v, row) in &self.pred {
            for (u, slot) in row {
                if self.succ.get(u).and_then(|r| r.get(v)) != Some(slot) {
                    return Err(violation(format!("pred[{v:?}][{u:?}] has no matching succ entry")));
                }
            }
        }
        if seen.len() != self.bundles.len() {
            return Err(violation(format!(
                "{} live records but {} adjacent pairs",
                self.bundles.len(),
                seen.len()
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn multi() -> Store<&'static str> {
        Store::new(GraphOptions::directed().with_multigraph(true))
    }

    #[test]
    fn auto_keys_fill_the_smallest_gap() {
        let mut store = multi();
        assert_eq!(store.add_edge("a", "b", None, Attrs::default()), (EdgeKey::Index(0), true));
        assert_eq!(store.add_edge("a", "b", None, Attrs::default()), (EdgeKey::Index(1), true));
        assert_eq!(store.add_edge("a", "b", None, Attrs::default()), (EdgeKey::Index(2), true));
        assert!(store.remove_edge(&"a", &"b", Some(&EdgeKey::Index(1))).is_some());
        assert_eq!(store.add_edge("a", "b", None, Attrs::default()), (EdgeKey::Index(1), true));
        assert!(store.validate().is_ok());
    }

    #[test]
    fn removing_a_node_frees_every_incident_record() {
        let mut store = multi();
        store.add_edge("a", "b", None, Attrs::default());
        store.add_edge("a", "b", None, Attrs::default());
        store.add_edge("b", "c", None, Attrs::default());
        store.add_edge("b", "b", None, Attrs::default());
        store.add_edge("c", "a", None, Attrs::default());
        assert_eq!(store.pair_count(), 4);

        store.remove_node(&"b");
        assert_eq!(store.pair_count(), 1);
        assert_eq!(store.edge_count(), 1);
        assert!(store.validate().is_ok());
    }

    #[test]
    fn undirected_pairs_resolve_from_both_sides() {
        let mut store: Store<u32> = Store::new(GraphOptions::undirected());
        store.add_edge(1, 2, None, Attrs::default());
        assert_eq!(store.locate(&2, &1).map(|(a, b, _)| (a, b)), Some((1, 2)));
        assert_eq!(store.pair_slot(&1, &2), store.pair_slot(&2, &1));
        let (_, created) = store.add_edge(2, 1, None, Attrs::default());
        assert!(!created);
        assert_eq!(store.pair_count(), 1);
    }

    #[test]
    fn validate_reports_a_broken_mirror() {
        let mut store: Store<u32> = Store::new(GraphOptions::directed());
        store.add_edge(1, 2, None, Attrs::default());
        store.pred.get_mut(&2).unwrap().clear();
        let err = store.validate().unwrap_err();
        assert!(matches!(err, GraphError::InvariantViolation { .. }));
    }
}
