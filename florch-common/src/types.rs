//! Topology types for hierarchical federated learning
//!
//! A deployment has one global aggregator, a set of local aggregators and a
//! set of clients. Every role is hosted on a [`Node`] whose cost figures are
//! supplied by the caller for each evaluation.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Role a node plays in the FL hierarchy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlRole {
    /// Leaf node performing local training
    Client,
    /// Mid-tier aggregator combining client updates
    LocalAggregator,
    /// Top-level aggregator combining local aggregator updates
    GlobalAggregator,
}

impl FlRole {
    /// Returns the wire name of the role
    pub fn as_str(&self) -> &'static str {
        match self {
            FlRole::Client => "client",
            FlRole::LocalAggregator => "local_aggregator",
            FlRole::GlobalAggregator => "global_aggregator",
        }
    }
}

impl fmt::Display for FlRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Failure to parse a client identity of the form `n<integer>`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClientIdError {
    /// Identity does not start with `n`
    #[error("bad client id {0:?}: expected a form like n30")]
    MissingPrefix(String),

    /// Characters after the prefix are not a decimal index
    #[error("bad client id {0:?}: index is not a decimal integer")]
    InvalidIndex(String),
}

/// Normalizes a client identity such as `"n30"` or `" N007 "` to its
/// decimal index digits (`"30"`, `"7"`).
///
/// Matching is case-insensitive and ignores surrounding whitespace. Only
/// ASCII digits are accepted after the prefix, so signs and inner spaces
/// are rejected. Leading zeros are stripped, keeping `"0"` for an all-zero
/// index. The index may have any number of digits.
///
/// # Example
///
/// ```
/// use florch_common::normalize_client_index;
///
/// assert_eq!(normalize_client_index(" N030 ").unwrap(), "30");
/// assert_eq!(normalize_client_index("n000").unwrap(), "0");
/// assert!(normalize_client_index("client-1").is_err());
/// ```
pub fn normalize_client_index(id: &str) -> Result<String, ClientIdError> {
    let trimmed = id.trim();
    let digits = trimmed
        .strip_prefix('n')
        .or_else(|| trimmed.strip_prefix('N'))
        .ok_or_else(|| ClientIdError::MissingPrefix(trimmed.to_string()))?;

    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ClientIdError::InvalidIndex(trimmed.to_string()));
    }

    match digits.trim_start_matches('0') {
        "" => Ok("0".to_string()),
        significant => Ok(significant.to_string()),
    }
}

/// Parses a client identity such as `"n30"` into a numeric index.
///
/// Accepts the same forms as [`normalize_client_index`] but fails with
/// [`ClientIdError::InvalidIndex`] when the index does not fit a `u64`.
///
/// # Example
///
/// ```
/// use florch_common::parse_client_index;
///
/// assert_eq!(parse_client_index(" N30 ").unwrap(), 30);
/// assert!(parse_client_index("client-1").is_err());
/// ```
pub fn parse_client_index(id: &str) -> Result<u64, ClientIdError> {
    normalize_client_index(id)?
        .parse()
        .map_err(|_| ClientIdError::InvalidIndex(id.trim().to_string()))
}

/// An execution node and its cost figures.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    /// Node identity, unique within a registry
    pub id: String,
    /// Cost of sending one unit of payload to a neighbor, keyed by neighbor id.
    /// Costs are directional; a missing entry is not a zero.
    #[serde(default)]
    pub communication_costs: HashMap<String, f64>,
    /// Cost of one unit of local compute work on this node
    pub energy_cost: f64,
}

impl Node {
    /// Creates a node with no known links
    pub fn new(id: impl Into<String>, energy_cost: f64) -> Self {
        Self {
            id: id.into(),
            communication_costs: HashMap::new(),
            energy_cost,
        }
    }

    /// Adds a directional link cost to `neighbor`
    pub fn with_link(mut self, neighbor: impl Into<String>, cost: f64) -> Self {
        self.communication_costs.insert(neighbor.into(), cost);
        self
    }

    /// Returns the communication cost towards `neighbor`, if known
    pub fn communication_cost(&self, neighbor: &str) -> Option<f64> {
        self.communication_costs.get(neighbor).copied()
    }
}

fn default_epochs() -> u32 {
    1
}

fn default_batch_size() -> u32 {
    32
}

fn default_learning_rate() -> f64 {
    0.01
}

fn default_num_partitions() -> u32 {
    1
}

/// A training client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Client {
    /// Client identity, conventionally `n<integer>`
    pub id: String,
    /// Hosting node. When absent the client is hosted on the node named by `id`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub node_id: Option<String>,
    /// Node of the local aggregator this client reports to
    pub parent_node_id: String,
    /// Local training epochs
    #[serde(default = "default_epochs")]
    pub epochs: u32,
    /// Training batch size
    #[serde(default = "default_batch_size")]
    pub batch_size: u32,
    /// Optimizer learning rate
    #[serde(default = "default_learning_rate")]
    pub learning_rate: f64,
    /// Dataset partition assigned to this client
    #[serde(default)]
    pub partition_id: u32,
    /// Total number of dataset partitions
    #[serde(default = "default_num_partitions")]
    pub num_partitions: u32,
}

impl Client {
    /// Creates a client hosted on the node named by its own identity
    pub fn new(id: impl Into<String>, parent_node_id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            node_id: None,
            parent_node_id: parent_node_id.into(),
            epochs: default_epochs(),
            batch_size: default_batch_size(),
            learning_rate: default_learning_rate(),
            partition_id: 0,
            num_partitions: default_num_partitions(),
        }
    }

    /// Places the client on an explicit hosting node
    pub fn on_node(mut self, node_id: impl Into<String>) -> Self {
        self.node_id = Some(node_id.into());
        self
    }

    /// Sets the per-client training hyperparameters
    pub fn with_hyperparameters(mut self, epochs: u32, batch_size: u32, learning_rate: f64) -> Self {
        self.epochs = epochs;
        self.batch_size = batch_size;
        self.learning_rate = learning_rate;
        self
    }

    /// Sets the dataset partition
    pub fn with_partition(mut self, partition_id: u32, num_partitions: u32) -> Self {
        self.partition_id = partition_id;
        self.num_partitions = num_partitions;
        self
    }

    /// Identity of the node hosting this client
    pub fn host_node_id(&self) -> &str {
        self.node_id.as_deref().unwrap_or(&self.id)
    }

    /// Parses the client's `n<integer>` identity
    pub fn index(&self) -> Result<u64, ClientIdError> {
        parse_client_index(&self.id)
    }
}

/// A local aggregator, identified by its hosting node.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LocalAggregator {
    /// Hosting node identity
    pub id: String,
}

impl LocalAggregator {
    /// Creates a local aggregator on the given node
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}

/// The global aggregator, identified by its hosting node.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GlobalAggregator {
    /// Hosting node identity
    pub id: String,
}

impl GlobalAggregator {
    /// Creates a global aggregator on the given node
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}
