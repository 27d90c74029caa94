//! FL topology configuration
//!
//! A [`FlConfiguration`] is a value snapshot of one candidate topology: which
//! node hosts the global aggregator, which nodes host local aggregators, and
//! which local aggregator each client reports to. A new topology is a new
//! value; configurations are never edited in place by the cost engine.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::types::{Client, FlRole, GlobalAggregator, LocalAggregator};

/// One candidate hierarchical FL topology.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlConfiguration {
    /// Global aggregator
    pub global_aggregator: GlobalAggregator,
    /// Local aggregators (order is irrelevant)
    #[serde(default)]
    pub local_aggregators: Vec<LocalAggregator>,
    /// Clients (order is irrelevant)
    #[serde(default)]
    pub clients: Vec<Client>,
    /// Local aggregation rounds per global round
    #[serde(default)]
    pub local_rounds: u32,
    /// Training epochs per local round, applied to every client
    #[serde(default)]
    pub epochs: u32,
}

impl FlConfiguration {
    /// Creates a configuration with only a global aggregator.
    ///
    /// # Arguments
    /// * `global_aggregator` - Node hosting the global aggregator
    pub fn new(global_aggregator: impl Into<String>) -> Self {
        Self {
            global_aggregator: GlobalAggregator::new(global_aggregator),
            local_aggregators: Vec::new(),
            clients: Vec::new(),
            local_rounds: 0,
            epochs: 0,
        }
    }

    /// Adds a local aggregator hosted on `node_id`
    pub fn with_local_aggregator(mut self, node_id: impl Into<String>) -> Self {
        self.local_aggregators.push(LocalAggregator::new(node_id));
        self
    }

    /// Adds a client
    pub fn with_client(mut self, client: Client) -> Self {
        self.clients.push(client);
        self
    }

    /// Sets the number of local rounds
    pub fn with_local_rounds(mut self, local_rounds: u32) -> Self {
        self.local_rounds = local_rounds;
        self
    }

    /// Sets the number of epochs per local round
    pub fn with_epochs(mut self, epochs: u32) -> Self {
        self.epochs = epochs;
        self
    }

    /// Finds the client with the given identity.
    ///
    /// Returns `None` when no client in this configuration carries `id`.
    pub fn find_client(&self, id: &str) -> Option<&Client> {
        self.clients.iter().find(|c| c.id == id)
    }

    /// Checks structural invariants.
    ///
    /// Every identity must be non-empty, and unique within its own role set
    /// (a node may still host more than one role).
    pub fn validate(&self) -> Result<(), Error> {
        if self.global_aggregator.id.trim().is_empty() {
            return Err(Error::Config(
                "global aggregator identity must not be empty".to_string(),
            ));
        }

        check_unique(
            FlRole::LocalAggregator,
            self.local_aggregators.iter().map(|la| la.id.as_str()),
        )?;
        check_unique(FlRole::Client, self.clients.iter().map(|c| c.id.as_str()))?;

        for client in &self.clients {
            if client.parent_node_id.trim().is_empty() {
                return Err(Error::Config(format!(
                    "client {} has no parent node",
                    client.id
                )));
            }
        }

        Ok(())
    }

    /// Parses a configuration from a YAML string.
    ///
    /// Parsing does not validate; call [`FlConfiguration::validate`] afterwards.
    ///
    /// # Example
    /// ```
    /// use florch_common::FlConfiguration;
    ///
    /// let yaml = r#"
    /// global_aggregator: { id: g }
    /// local_aggregators: [{ id: l }]
    /// clients:
    ///   - id: n1
    ///     parent_node_id: l
    /// local_rounds: 2
    /// epochs: 3
    /// "#;
    ///
    /// let config = FlConfiguration::from_yaml(yaml).unwrap();
    /// assert_eq!(config.clients.len(), 1);
    /// ```
    pub fn from_yaml(yaml: &str) -> Result<Self, Error> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Loads a configuration from a YAML file.
    pub fn from_yaml_file<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        let contents = fs::read_to_string(path)?;
        Self::from_yaml(&contents)
    }

    /// Serializes the configuration to a YAML string.
    pub fn to_yaml(&self) -> Result<String, Error> {
        Ok(serde_yaml::to_string(self)?)
    }
}

fn check_unique<'a>(role: FlRole, ids: impl Iterator<Item = &'a str>) -> Result<(), Error> {
    let mut seen = HashSet::new();
    for id in ids {
        if id.trim().is_empty() {
            return Err(Error::Config(format!("{role} identity must not be empty")));
        }
        if !seen.insert(id) {
            return Err(Error::DuplicateIdentity {
                role,
                id: id.to_string(),
            });
        }
    }
    Ok(())
}
