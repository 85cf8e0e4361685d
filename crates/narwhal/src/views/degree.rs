//! Degree views.
//!
//! Degree counts edge records in a node's adjacency rows: `|succ[n]| + |pred[n]|` for the
//! total, one side for in/out degree on directed graphs. Each record counts once per row it
//! sits in, so a self-loop adds two and parallel multigraph edges count individually.
//! Undirected graphs report the same value for degree, in-degree and out-degree.

use super::Scope;
use super::data::{DataSource, DataView};
use crate::NodeId;
use crate::attrs::{Attrs, weight_of};
use crate::cache::Side;
use crate::store::Row;

/// A node's adjacency rows, read live.
pub struct Incident<'g, N> {
    scope: Scope<'g, N>,
    rows: [Option<&'g Row<N>>; 2],
}

impl<'g, N: NodeId> Incident<'g, N> {
    fn records(&self) -> impl Iterator<Item = &'g Attrs> + use<'g, N> {
        let scope = self.scope;
        self.rows
            .into_iter()
            .flatten()
            .flat_map(move |row| {
                row.iter()
                    .filter(move |(nbr, _)| scope.admits(nbr))
                    .filter_map(move |(_, slot)| scope.store.bundles.get(*slot))
            })
            .flat_map(|bundle| bundle.records.values())
    }

    pub fn count(&self) -> usize {
        self.records().count()
    }

    /// Sum of the numeric `weight` attribute over incident records; missing weights count 1.
    pub fn weight_sum(&self, weight: &str) -> f64 {
        self.records().map(|attrs| weight_of(attrs, weight)).sum()
    }
}

/// The nodes of a scope paired with their incident rows for one direction.
pub struct DegreeSource<'g, N> {
    scope: Scope<'g, N>,
    side: Side,
}

impl<N> Clone for DegreeSource<'_, N> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<N> Copy for DegreeSource<'_, N> {}

impl<'g, N: NodeId> DegreeSource<'g, N> {
    pub(crate) fn new(scope: Scope<'g, N>, side: Side) -> Self {
        Self { scope, side }
    }

    fn incident(&self, node: &N) -> Incident<'g, N> {
        Incident {
            scope: self.scope,
            rows: self.scope.incident_rows(node, self.side),
        }
    }
}

impl<'g, N: NodeId> DataSource<'g> for DegreeSource<'g, N> {
    type Key = N;
    type Item = Incident<'g, N>;

    fn entries(&self) -> Box<dyn Iterator<Item = (N, Incident<'g, N>)> + 'g> {
        let source = *self;
        Box::new(
            self.scope
                .node_ids()
                .map(move |node| (node.clone(), source.incident(node))),
        )
    }

    fn entry(&self, key: &N) -> Option<Incident<'g, N>> {
        self.scope
            .contains_node(key)
            .then(|| self.incident(key))
    }
}

/// Node to edge-count view.
pub type DegreeView<'g, N> = DataView<'g, DegreeSource<'g, N>, usize>;

/// Node to summed edge weight view.
pub type WeightedDegreeView<'g, N> = DataView<'g, DegreeSource<'g, N>, f64>;

pub(crate) fn degree_view<'g, N: NodeId>(scope: Scope<'g, N>, side: Side) -> DegreeView<'g, N> {
    DataView::new(DegreeSource::new(scope, side), |incident: Incident<'g, N>| {
        Some(incident.count())
    })
}

impl<'g, N: NodeId> DataView<'g, DegreeSource<'g, N>, usize> {
    /// The same nodes and direction, summing the `weight` attribute instead of counting.
    pub fn weighted(&self, weight: &str) -> WeightedDegreeView<'g, N> {
        let weight = weight.to_string();
        DataView::new(*self.source(), move |incident: Incident<'g, N>| {
            Some(incident.weight_sum(&weight))
        })
    }

    /// Degree of `node`, or 0 when it is not in the view.
    pub fn of(&self, node: &N) -> usize {
        self.get(node).unwrap_or(0)
    }

    pub fn total(&self) -> usize {
        self.iter().map(|(_, degree)| degree).sum()
    }
}

impl<'g, N: NodeId> DataView<'g, DegreeSource<'g, N>, f64> {
    /// Weighted degree of `node`, or 0 when it is not in the view.
    pub fn of(&self, node: &N) -> f64 {
        self.get(node).unwrap_or(0.0)
    }

    pub fn total(&self) -> f64 {
        self.iter().map(|(_, degree)| degree).sum()
    }
}
