//! Placement Cost Engine for Hierarchical Federated Learning
//!
//! Evaluates candidate FL topologies for an external placement optimizer:
//! - Cost of one federated round on a topology
//! - Cost of migrating from one topology to another
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          Placement Cost Engine                          │
//! │  ┌───────────────────────────┐   ┌───────────────────────────────────┐  │
//! │  │ FlConfiguration (old/new) │   │ NodeRegistry                      │  │
//! │  │  • Global aggregator      │   │  • Link cost to neighbor          │  │
//! │  │  • Local aggregators      │   │  • Flat energy cost               │  │
//! │  │  • Clients → parent LA    │   │                                   │  │
//! │  └─────────────┬─────────────┘   └─────────────────┬─────────────────┘  │
//! │                └───────────────┬───────────────────┘                    │
//! │                ┌───────────────┴───────────────┐                        │
//! │                │ round_cost / reconfiguration_ │ ◄── CostModel          │
//! │                │ cost                          │     (Communication |   │
//! │                └───────────────┬───────────────┘      Energy)           │
//! │                                ▼                                        │
//! │                          scalar cost                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Both functions are pure: they borrow their inputs, hold no state between
//! calls and perform no I/O, so they can be called concurrently on shared
//! snapshots.
//!
//! # Example
//!
//! ```
//! use florch_common::{Client, FlConfiguration, Node};
//! use florch_cost::{round_cost, ClientExclusions, CostModel, NodeRegistry};
//!
//! let nodes = NodeRegistry::new()
//!     .with_node(Node::new("g", 1.0))
//!     .with_node(Node::new("l", 2.0).with_link("g", 0.1))
//!     .with_node(Node::new("c", 0.5).with_link("l", 0.2));
//!
//! let config = FlConfiguration::new("g")
//!     .with_local_aggregator("l")
//!     .with_client(Client::new("n1", "l").on_node("c"))
//!     .with_local_rounds(2)
//!     .with_epochs(3);
//!
//! let energy = round_cost(&config, &nodes, 10.0, CostModel::Energy, &ClientExclusions::new())?;
//! assert!((energy - 8.0).abs() < 1e-9);
//! # Ok::<(), florch_cost::CostError>(())
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

pub mod error;
pub mod exclusion;
pub mod reconfig;
pub mod registry;
pub mod round;

pub use error::{CostError, CostResult};
pub use exclusion::ClientExclusions;
pub use reconfig::{client_handoffs, reconfiguration_cost, ClientHandoff, HandoffReason};
pub use registry::NodeRegistry;
pub use round::{round_cost, round_cost_breakdown, RoundCostBreakdown};

/// Cost dimension to evaluate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CostModel {
    /// Model payload transferred over links, weighted by link cost
    Communication,
    /// Compute work, weighted by each node's energy cost
    Energy,
}

impl CostModel {
    /// All cost models
    pub fn all() -> &'static [CostModel] {
        &[CostModel::Communication, CostModel::Energy]
    }
}

impl fmt::Display for CostModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CostModel::Communication => write!(f, "communication"),
            CostModel::Energy => write!(f, "energy"),
        }
    }
}

impl FromStr for CostModel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "communication" | "comm" => Ok(CostModel::Communication),
            "energy" => Ok(CostModel::Energy),
            _ => Err(format!("unknown cost model: {s}")),
        }
    }
}

pub(crate) fn check_model_size(model_size: f64) -> CostResult<()> {
    if model_size.is_finite() && model_size > 0.0 {
        Ok(())
    } else {
        Err(CostError::InvalidModelSize(model_size))
    }
}
