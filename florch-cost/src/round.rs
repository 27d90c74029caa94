//! Cost of one federated round
//!
//! Communication model: every local aggregator uploads the model to the
//! global aggregator once, and every client uploads to its local aggregator
//! once per local round (at least once, even when `local_rounds` is 0).
//!
//! Energy model: the global aggregator pays its flat energy cost once, each
//! local aggregator once per local round, and each client that is not
//! excluded pays for `epochs × local_rounds` units of training.

use florch_common::FlConfiguration;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::error::CostResult;
use crate::exclusion::ClientExclusions;
use crate::registry::NodeRegistry;
use crate::{check_model_size, CostModel};

/// Round cost split by the role that incurs it.
///
/// Under the communication model the global aggregator term is always zero;
/// local aggregator uploads and client uploads are the two non-zero terms.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct RoundCostBreakdown {
    /// Global aggregator contribution
    pub global_aggregator: f64,
    /// Local aggregator contribution
    pub local_aggregators: f64,
    /// Client contribution
    pub clients: f64,
}

impl RoundCostBreakdown {
    /// Sum of all contributions
    pub fn total(&self) -> f64 {
        self.global_aggregator + self.local_aggregators + self.clients
    }
}

/// Computes the cost of one federated round.
///
/// # Arguments
/// * `configuration` - Topology to evaluate
/// * `nodes` - Cost figures for every node the topology references
/// * `model_size` - Size of the transmitted model; must be finite and > 0
///   under the communication model
/// * `cost_model` - Cost dimension to evaluate
/// * `excluded` - Clients left out of energy accounting
///
/// # Errors
/// Fails with `NodeNotFound` (or `LinkNotFound`) if any referenced node or
/// link is missing. No partial sum is returned.
pub fn round_cost(
    configuration: &FlConfiguration,
    nodes: &NodeRegistry,
    model_size: f64,
    cost_model: CostModel,
    excluded: &ClientExclusions,
) -> CostResult<f64> {
    round_cost_breakdown(configuration, nodes, model_size, cost_model, excluded)
        .map(|breakdown| breakdown.total())
}

/// Computes the per-role cost of one federated round.
///
/// See [`round_cost`] for arguments and errors.
pub fn round_cost_breakdown(
    configuration: &FlConfiguration,
    nodes: &NodeRegistry,
    model_size: f64,
    cost_model: CostModel,
    excluded: &ClientExclusions,
) -> CostResult<RoundCostBreakdown> {
    let breakdown = match cost_model {
        CostModel::Communication => communication_round(configuration, nodes, model_size)?,
        CostModel::Energy => energy_round(configuration, nodes, excluded)?,
    };

    debug!(
        "{} round cost: ga={} la={} clients={} total={}",
        cost_model,
        breakdown.global_aggregator,
        breakdown.local_aggregators,
        breakdown.clients,
        breakdown.total()
    );

    Ok(breakdown)
}

fn communication_round(
    configuration: &FlConfiguration,
    nodes: &NodeRegistry,
    model_size: f64,
) -> CostResult<RoundCostBreakdown> {
    check_model_size(model_size)?;

    let global_id = configuration.global_aggregator.id.as_str();

    let mut la_cost = 0.0;
    for local_aggregator in &configuration.local_aggregators {
        let link = nodes.link_cost(&local_aggregator.id, global_id)?;
        trace!(la = %local_aggregator.id, link, "local aggregator upload");
        la_cost += link * model_size;
    }

    // Zero local rounds still means one upload per client.
    let uploads = f64::from(configuration.local_rounds.max(1));

    let mut client_cost = 0.0;
    for client in &configuration.clients {
        let link = nodes.link_cost(client.host_node_id(), &client.parent_node_id)?;
        trace!(client = %client.id, link, uploads, "client upload");
        client_cost += uploads * link * model_size;
    }

    Ok(RoundCostBreakdown {
        global_aggregator: 0.0,
        local_aggregators: la_cost,
        clients: client_cost,
    })
}

fn energy_round(
    configuration: &FlConfiguration,
    nodes: &NodeRegistry,
    excluded: &ClientExclusions,
) -> CostResult<RoundCostBreakdown> {
    let local_rounds = f64::from(configuration.local_rounds);
    let epochs = f64::from(configuration.epochs);

    let ga_cost = nodes.energy_cost(&configuration.global_aggregator.id)?;

    let mut la_cost = 0.0;
    for local_aggregator in &configuration.local_aggregators {
        la_cost += nodes.energy_cost(&local_aggregator.id)? * local_rounds;
    }

    let mut client_cost = 0.0;
    for client in &configuration.clients {
        if excluded.contains_client(&client.id) {
            trace!(client = %client.id, "excluded from energy accounting");
            continue;
        }
        let energy = nodes.energy_cost(client.host_node_id())?;
        trace!(client = %client.id, energy, "client training");
        client_cost += energy * epochs * local_rounds;
    }

    Ok(RoundCostBreakdown {
        global_aggregator: ga_cost,
        local_aggregators: la_cost,
        clients: client_cost,
    })
}
