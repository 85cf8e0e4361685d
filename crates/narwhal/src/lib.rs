#![forbid(unsafe_code)]

//! In-memory graphs built on two mirrored adjacency tables.
//!
//! A [`Graph`] keeps a node table plus `succ` / `pred` tables that describe the same edge set
//! from both directions. Each adjacent pair owns one bundle of edge records in an arena, and
//! both tables point at it, so an edge's attributes are shared by the two orientations.
//!
//! Reads go through views ([`NodeView`], [`EdgeView`], [`MultiEdgeView`], [`AdjacencyView`],
//! [`DataView`], [`DegreeView`]) that borrow the graph and can be bound to a [`Subgraph`]
//! projection without copying records.
//!
//! ```
//! use narwhal::{Attrs, Graph, attrs};
//! use serde_json::json;
//!
//! let mut g: Graph<u32> = Graph::undirected();
//! g.edges_mut().add(1, 2, attrs([("weight", json!(3))]));
//! g.edges_mut().add(2, 3, Attrs::default());
//!
//! assert!(g.edges().contains(&2, &1));
//! assert_eq!(g.degree().get(&2), Some(2));
//! ```

pub mod attrs;
mod cache;
pub mod error;
mod graph;
pub mod key;
pub mod options;
mod store;
mod subgraph;
pub mod views;

use rustc_hash::FxBuildHasher;
use std::fmt::Debug;
use std::hash::Hash;

pub type FxIndexMap<K, V> = indexmap::IndexMap<K, V, FxBuildHasher>;
pub type FxIndexSet<T> = indexmap::IndexSet<T, FxBuildHasher>;

/// Anything usable as a node identifier.
pub trait NodeId: Clone + Eq + Hash + Debug {}

impl<T: Clone + Eq + Hash + Debug> NodeId for T {}

pub use attrs::{Attrs, attrs, attrs_from_json, attrs_to_json};
pub use error::{GraphError, Result};
pub use graph::Graph;
pub use key::{EdgeKey, EdgeSpec, NodeSpec};
pub use options::GraphOptions;
pub use subgraph::{Subgraph, SubgraphMut};
pub use views::adjacency::{AdjacencyView, NeighborMap};
pub use views::data::{DataSource, DataView};
pub use views::degree::{DegreeSource, DegreeView, Incident, WeightedDegreeView};
pub use views::edges::{EdgeView, EdgeViewMut, MultiEdgeView};
pub use views::nodes::{NodeView, NodeViewMut};
pub use views::set_ops::{KeyedCollection, SetAlgebra};
