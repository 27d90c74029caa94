//! Node registry
//!
//! Read-only lookup of per-node cost figures, keyed by node identity. The
//! registry is an immutable snapshot owned by the caller for the duration of
//! an evaluation; it performs no computation and no caching.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use florch_common::{Error, Node};
use serde::{Deserialize, Serialize};

use crate::error::{CostError, CostResult};

/// Registry of execution nodes.
///
/// Serialized as a plain list of nodes. Deserializing a list that repeats an
/// identity fails.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Node>", into = "Vec<Node>")]
pub struct NodeRegistry {
    nodes: HashMap<String, Node>,
}

impl NodeRegistry {
    /// Creates an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a registry from nodes, rejecting repeated identities
    pub fn from_nodes(nodes: impl IntoIterator<Item = Node>) -> CostResult<Self> {
        let mut registry = Self::new();
        for node in nodes {
            if registry.nodes.contains_key(&node.id) {
                return Err(CostError::DuplicateNode { node_id: node.id });
            }
            registry.insert(node);
        }
        Ok(registry)
    }

    /// Inserts a node, returning the previous entry with the same identity
    pub fn insert(&mut self, node: Node) -> Option<Node> {
        self.nodes.insert(node.id.clone(), node)
    }

    /// Adds a node (builder form)
    pub fn with_node(mut self, node: Node) -> Self {
        self.insert(node);
        self
    }

    /// Looks up a node by identity
    pub fn lookup(&self, id: &str) -> CostResult<&Node> {
        self.nodes.get(id).ok_or_else(|| CostError::NodeNotFound {
            node_id: id.to_string(),
        })
    }

    /// Communication cost from node `from` to node `to`.
    ///
    /// Both endpoints must be registered, and `from` must carry an explicit
    /// cost entry for `to`.
    pub fn link_cost(&self, from: &str, to: &str) -> CostResult<f64> {
        let node = self.lookup(from)?;
        self.lookup(to)?;
        node.communication_cost(to)
            .ok_or_else(|| CostError::LinkNotFound {
                from: from.to_string(),
                to: to.to_string(),
            })
    }

    /// Flat energy cost of node `id`
    pub fn energy_cost(&self, id: &str) -> CostResult<f64> {
        Ok(self.lookup(id)?.energy_cost)
    }

    /// Returns true if a node with this identity is registered
    pub fn contains(&self, id: &str) -> bool {
        self.nodes.contains_key(id)
    }

    /// Number of registered nodes
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns true if no nodes are registered
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Iterates over registered nodes in unspecified order
    pub fn iter(&self) -> impl Iterator<Item = &Node> {
        self.nodes.values()
    }

    /// Parses a registry from a YAML list of nodes.
    ///
    /// # Example
    /// ```
    /// use florch_cost::NodeRegistry;
    ///
    /// let yaml = r#"
    /// - id: g
    ///   energy_cost: 1.0
    /// - id: l
    ///   energy_cost: 2.0
    ///   communication_costs: { g: 0.1 }
    /// "#;
    ///
    /// let registry = NodeRegistry::from_yaml(yaml).unwrap();
    /// assert_eq!(registry.link_cost("l", "g").unwrap(), 0.1);
    /// ```
    pub fn from_yaml(yaml: &str) -> Result<Self, Error> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Loads a registry from a YAML file
    pub fn from_yaml_file<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        let contents = fs::read_to_string(path)?;
        Self::from_yaml(&contents)
    }
}

impl TryFrom<Vec<Node>> for NodeRegistry {
    type Error = CostError;

    fn try_from(nodes: Vec<Node>) -> Result<Self, Self::Error> {
        Self::from_nodes(nodes)
    }
}

impl From<NodeRegistry> for Vec<Node> {
    fn from(registry: NodeRegistry) -> Self {
        let mut nodes: Vec<Node> = registry.nodes.into_values().collect();
        nodes.sort_by(|a, b| a.id.cmp(&b.id));
        nodes
    }
}
