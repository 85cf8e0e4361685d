//! Edge keys and tagged node/edge inputs.
//!
//! Simple graphs keep a single record per adjacent pair under [`EdgeKey::FIRST`]; multigraphs
//! distinguish parallel edges by key.

use crate::attrs::Attrs;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EdgeKey {
    Index(u64),
    Name(String),
}

impl EdgeKey {
    /// The implicit key of every simple-graph edge, and the first auto-allocated multigraph key.
    pub const FIRST: EdgeKey = EdgeKey::Index(0);

    pub fn as_index(&self) -> Option<u64> {
        match self {
            Self::Index(ix) => Some(*ix),
            Self::Name(_) => None,
        }
    }
}

impl fmt::Display for EdgeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Index(ix) => write!(f, "{ix}"),
            Self::Name(name) => write!(f, "{name:?}"),
        }
    }
}

impl From<u64> for EdgeKey {
    fn from(value: u64) -> Self {
        Self::Index(value)
    }
}

impl From<&str> for EdgeKey {
    fn from(value: &str) -> Self {
        Self::Name(value.to_string())
    }
}

impl From<String> for EdgeKey {
    fn from(value: String) -> Self {
        Self::Name(value)
    }
}

/// A node to insert, with or without attributes.
#[derive(Debug, Clone, PartialEq)]
pub enum NodeSpec<N> {
    Bare(N),
    WithAttrs(N, Attrs),
}

impl<N> NodeSpec<N> {
    pub fn bare(node: N) -> Self {
        Self::Bare(node)
    }

    pub fn with_attrs(node: N, attrs: Attrs) -> Self {
        Self::WithAttrs(node, attrs)
    }

    pub fn node(&self) -> &N {
        match self {
            Self::Bare(n) | Self::WithAttrs(n, _) => n,
        }
    }

    pub(crate) fn into_parts(self) -> (N, Attrs) {
        match self {
            Self::Bare(n) => (n, Attrs::default()),
            Self::WithAttrs(n, attrs) => (n, attrs),
        }
    }
}

/// An edge to insert.
///
/// `MultiKeyed` carries an optional explicit key; an explicit key is only accepted by
/// multigraphs.
#[derive(Debug, Clone, PartialEq)]
pub enum EdgeSpec<N> {
    Pair(N, N),
    PairWithAttrs(N, N, Attrs),
    MultiKeyed(N, N, Option<EdgeKey>, Attrs),
}

impl<N> EdgeSpec<N> {
    pub fn pair(u: N, v: N) -> Self {
        Self::Pair(u, v)
    }

    pub fn with_attrs(u: N, v: N, attrs: Attrs) -> Self {
        Self::PairWithAttrs(u, v, attrs)
    }

    pub fn keyed(u: N, v: N, key: impl Into<EdgeKey>, attrs: Attrs) -> Self {
        Self::MultiKeyed(u, v, Some(key.into()), attrs)
    }

    pub fn endpoints(&self) -> (&N, &N) {
        match self {
            Self::Pair(u, v) | Self::PairWithAttrs(u, v, _) | Self::MultiKeyed(u, v, _, _) => {
                (u, v)
            }
        }
    }

    pub fn explicit_key(&self) -> Option<&EdgeKey> {
        match self {
            Self::MultiKeyed(_, _, key, _) => key.as_ref(),
            _ => None,
        }
    }

    pub(crate) fn into_parts(self) -> (N, N, Option<EdgeKey>, Attrs) {
        match self {
            Self::Pair(u, v) => (u, v, None, Attrs::default()),
            Self::PairWithAttrs(u, v, attrs) => (u, v, None, attrs),
            Self::MultiKeyed(u, v, key, attrs) => (u, v, key, attrs),
        }
    }
}
