//! Test fixtures and topology builders
//!
//! Provides the small reference deployment used throughout the scenario
//! tests, plus uniform star topologies whose costs have closed forms.

use florch_common::{Client, FlConfiguration, Node};
use florch_cost::NodeRegistry;

/// Energy cost of the global aggregator node in star topologies
pub const GA_ENERGY: f64 = 1.0;
/// Energy cost of each local aggregator node in star topologies
pub const LA_ENERGY: f64 = 2.0;
/// Energy cost of each client node in star topologies
pub const CLIENT_ENERGY: f64 = 0.5;
/// Link cost from each local aggregator to the global aggregator
pub const LA_LINK: f64 = 0.1;
/// Link cost from each client to any local aggregator
pub const CLIENT_LINK: f64 = 0.2;

/// Registry for the reference deployment.
///
/// - `g`: global aggregator node, energy 1.0
/// - `l`: local aggregator node, energy 2.0, link to `g` 0.1
/// - `l2`: second local aggregator node, energy 2.0, link to `g` 0.1
/// - `c`: client node, energy 0.5, link to `l` 0.2 and to `l2` 0.3
pub fn reference_registry() -> NodeRegistry {
    NodeRegistry::new()
        .with_node(Node::new("g", 1.0))
        .with_node(Node::new("l", 2.0).with_link("g", 0.1))
        .with_node(Node::new("l2", 2.0).with_link("g", 0.1))
        .with_node(Node::new("c", 0.5).with_link("l", 0.2).with_link("l2", 0.3))
}

/// Reference topology: client `n1` on node `c` reporting to `l`,
/// 2 local rounds, 3 epochs.
pub fn reference_topology() -> FlConfiguration {
    FlConfiguration::new("g")
        .with_local_aggregator("l")
        .with_client(Client::new("n1", "l").on_node("c"))
        .with_local_rounds(2)
        .with_epochs(3)
}

/// Reference topology after moving `n1` to a new local aggregator `l2`.
pub fn reassigned_topology() -> FlConfiguration {
    FlConfiguration::new("g")
        .with_local_aggregator("l2")
        .with_client(Client::new("n1", "l2").on_node("c"))
        .with_local_rounds(2)
        .with_epochs(3)
}

/// Shape of a uniform two-level star topology
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StarShape {
    pub local_aggregators: usize,
    pub clients_per_aggregator: usize,
    pub local_rounds: u32,
    pub epochs: u32,
}

impl StarShape {
    /// Total number of clients
    pub fn clients(&self) -> usize {
        self.local_aggregators * self.clients_per_aggregator
    }
}

fn la_id(index: usize) -> String {
    format!("la{index}")
}

fn client_id(index: usize) -> String {
    format!("n{index}")
}

/// Registry covering every node of [`star_topology`] for `shape`.
///
/// Every client node has a link to every local aggregator so that any
/// reassignment can be evaluated.
pub fn star_registry(shape: StarShape) -> NodeRegistry {
    let mut registry = NodeRegistry::new().with_node(Node::new("ga", GA_ENERGY));

    for la in 0..shape.local_aggregators {
        registry.insert(Node::new(la_id(la), LA_ENERGY).with_link("ga", LA_LINK));
    }

    for client in 0..shape.clients() {
        let node = (0..shape.local_aggregators).fold(
            Node::new(client_id(client), CLIENT_ENERGY),
            |node, la| node.with_link(la_id(la), CLIENT_LINK),
        );
        registry.insert(node);
    }

    registry
}

/// Star topology where client `n<k>` reports to local aggregator
/// `la<k / clients_per_aggregator>`, shifted by `rotation` aggregators.
pub fn star_topology(shape: StarShape, rotation: usize) -> FlConfiguration {
    let mut config = FlConfiguration::new("ga")
        .with_local_rounds(shape.local_rounds)
        .with_epochs(shape.epochs);

    for la in 0..shape.local_aggregators {
        config = config.with_local_aggregator(la_id(la));
    }

    for client in 0..shape.clients() {
        let parent = (client / shape.clients_per_aggregator.max(1) + rotation)
            % shape.local_aggregators.max(1);
        config = config.with_client(Client::new(client_id(client), la_id(parent)));
    }

    config
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_star_topology_is_valid() {
        let shape = StarShape {
            local_aggregators: 3,
            clients_per_aggregator: 4,
            local_rounds: 2,
            epochs: 1,
        };
        let config = star_topology(shape, 0);
        assert!(config.validate().is_ok());
        assert_eq!(config.clients.len(), 12);
        assert_eq!(config.clients[5].parent_node_id, "la1");

        let registry = star_registry(shape);
        assert_eq!(registry.len(), 1 + 3 + 12);
    }

    #[test]
    fn test_star_rotation() {
        let shape = StarShape {
            local_aggregators: 2,
            clients_per_aggregator: 1,
            local_rounds: 1,
            epochs: 1,
        };
        let config = star_topology(shape, 1);
        assert_eq!(config.clients[0].parent_node_id, "la1");
        assert_eq!(config.clients[1].parent_node_id, "la0");
    }
}
