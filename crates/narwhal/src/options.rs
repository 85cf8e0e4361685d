//! Graph configuration options.

use crate::error::{GraphError, Result};
use serde::{Deserialize, Serialize};

/// Shape of a [`Graph`](crate::Graph): edge direction and whether parallel edges are kept.
///
/// Options can be loaded from JSON (`{"directed": true, "multigraph": false}`); missing fields
/// fall back to [`GraphOptions::default`], which is an undirected simple graph.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphOptions {
    pub directed: bool,
    pub multigraph: bool,
}

impl GraphOptions {
    pub fn directed() -> Self {
        Self {
            directed: true,
            multigraph: false,
        }
    }

    pub fn undirected() -> Self {
        Self::default()
    }

    pub fn with_multigraph(mut self, multigraph: bool) -> Self {
        self.multigraph = multigraph;
        self
    }

    pub fn from_value(value: &serde_json::Value) -> Result<Self> {
        if !value.is_object() {
            return Err(GraphError::invalid(format!(
                "graph options must be a JSON object, got {value}"
            )));
        }
        serde_json::from_value(value.clone())
            .map_err(|err| GraphError::invalid(format!("graph options: {err}")))
    }
}
