//! Error types for cost evaluation

use thiserror::Error;

/// Cost evaluation errors.
///
/// A failed evaluation never yields a partial sum; a silent zero would
/// corrupt any downstream minimization.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CostError {
    /// A configuration references a node missing from the registry
    #[error("Node not found in registry: {node_id}")]
    NodeNotFound {
        /// Missing node identity
        node_id: String,
    },

    /// A node has no communication cost entry for the requested neighbor
    #[error("No communication cost from {from} to {to}")]
    LinkNotFound {
        /// Sending node
        from: String,
        /// Receiving node
        to: String,
    },

    /// The same node identity was supplied twice when building a registry
    #[error("Duplicate node in registry: {node_id}")]
    DuplicateNode {
        /// Repeated node identity
        node_id: String,
    },

    /// Model size must be finite and strictly positive
    #[error("Invalid model size: {0}")]
    InvalidModelSize(f64),
}

/// Result type for cost operations
pub type CostResult<T> = Result<T, CostError>;
