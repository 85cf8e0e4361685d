use crate::key::EdgeKey;
use std::fmt::Debug;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GraphError {
    #[error("node {node} is not in the graph")]
    NodeNotFound { node: String },

    #[error("edge {edge} is not in the graph")]
    EdgeNotFound { edge: String },

    #[error("invalid argument: {message}")]
    InvalidArgument { message: String },

    #[error("graph invariant violated: {message}")]
    InvariantViolation { message: String },
}

pub type Result<T> = std::result::Result<T, GraphError>;

impl GraphError {
    pub(crate) fn node_not_found(node: &impl Debug) -> Self {
        Self::NodeNotFound {
            node: format!("{node:?}"),
        }
    }

    pub(crate) fn edge_not_found(u: &impl Debug, v: &impl Debug, key: Option<&EdgeKey>) -> Self {
        let edge = match key {
            Some(key) => format!("({u:?}, {v:?}, {key})"),
            None => format!("({u:?}, {v:?})"),
        };
        Self::EdgeNotFound { edge }
    }

    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NodeNotFound { .. } | Self::EdgeNotFound { .. })
    }
}
