//! Cost of migrating between two topologies
//!
//! Only client handoffs are charged. A client that joins, or that reports to
//! a different local aggregator than before, sends the model once in one
//! direction to its new parent, weighted at half a full upload. Under the
//! energy model migration is free: energy depends only on the steady-state
//! topology, which [`round_cost`](crate::round_cost) already covers.

use florch_common::FlConfiguration;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::error::CostResult;
use crate::registry::NodeRegistry;
use crate::{check_model_size, CostModel};

/// Weight of a one-directional handoff relative to a full upload
const HANDOFF_WEIGHT: f64 = 0.5;

/// Why a client incurs a reconfiguration charge
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum HandoffReason {
    /// Client is absent from the old configuration
    Joined,
    /// Client moved to a different local aggregator
    Reassigned {
        /// Parent node in the old configuration
        from: String,
    },
}

/// A client that changes parent between two configurations
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientHandoff {
    /// Client identity
    pub client_id: String,
    /// Node hosting the client in the new configuration
    pub host_node_id: String,
    /// Parent node in the new configuration
    pub parent_node_id: String,
    /// Reason for the handoff
    pub reason: HandoffReason,
}

/// Lists the clients of `new` that join or change parent relative to `old`.
///
/// Clients present only in `old` are not listed: leaving costs nothing.
pub fn client_handoffs(old: &FlConfiguration, new: &FlConfiguration) -> Vec<ClientHandoff> {
    new.clients
        .iter()
        .filter_map(|client| {
            let reason = match old.find_client(&client.id) {
                None => HandoffReason::Joined,
                Some(previous) if previous.parent_node_id != client.parent_node_id => {
                    HandoffReason::Reassigned {
                        from: previous.parent_node_id.clone(),
                    }
                }
                Some(_) => return None,
            };
            Some(ClientHandoff {
                client_id: client.id.clone(),
                host_node_id: client.host_node_id().to_string(),
                parent_node_id: client.parent_node_id.clone(),
                reason,
            })
        })
        .collect()
}

/// Computes the cost of moving from `old` to `new`.
///
/// # Errors
/// Under the communication model, fails with `NodeNotFound` (or
/// `LinkNotFound`) if a handed-off client's node, its new parent, or the
/// link between them is missing from `nodes`.
pub fn reconfiguration_cost(
    old: &FlConfiguration,
    new: &FlConfiguration,
    nodes: &NodeRegistry,
    model_size: f64,
    cost_model: CostModel,
) -> CostResult<f64> {
    match cost_model {
        CostModel::Energy => Ok(0.0),
        CostModel::Communication => communication_reconfiguration(old, new, nodes, model_size),
    }
}

fn communication_reconfiguration(
    old: &FlConfiguration,
    new: &FlConfiguration,
    nodes: &NodeRegistry,
    model_size: f64,
) -> CostResult<f64> {
    check_model_size(model_size)?;

    let handoffs = client_handoffs(old, new);

    let mut cost = 0.0;
    for handoff in &handoffs {
        let link = nodes.link_cost(&handoff.host_node_id, &handoff.parent_node_id)?;
        trace!(client = %handoff.client_id, reason = ?handoff.reason, link, "client handoff");
        cost += link * HANDOFF_WEIGHT * model_size;
        // TODO: charge the container image pull on the new node once image sizes are in the registry.
    }

    debug!(
        "communication reconfiguration cost: {} handoff(s), total={}",
        handoffs.len(),
        cost
    );

    Ok(cost)
}
