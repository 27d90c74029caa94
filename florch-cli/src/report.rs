//! Evaluation reports printed by `flcost`

use std::fmt::Write as _;

use florch_cost::{ClientHandoff, CostModel, HandoffReason, RoundCostBreakdown};
use serde::Serialize;

/// Result of a round cost evaluation
#[derive(Debug, Clone, Serialize)]
pub(crate) struct RoundReport {
    /// Cost model the round was evaluated under
    pub cost_model: CostModel,
    /// Transmitted model size
    pub model_size: f64,
    /// Round cost
    pub total: f64,
    /// Per-role terms, when requested
    #[serde(skip_serializing_if = "Option::is_none")]
    pub breakdown: Option<RoundCostBreakdown>,
}

/// Result of a reconfiguration cost evaluation
#[derive(Debug, Clone, Serialize)]
pub(crate) struct ReconfigReport {
    /// Cost model the migration was evaluated under
    pub cost_model: CostModel,
    /// Transmitted model size
    pub model_size: f64,
    /// Reconfiguration cost
    pub total: f64,
    /// Charged client handoffs (communication model only)
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub handoffs: Vec<ClientHandoff>,
}

impl RoundReport {
    /// Plain-text rendering
    pub fn render(&self) -> String {
        let mut out = format!("{} round cost: {}\n", self.cost_model, self.total);
        if let Some(b) = &self.breakdown {
            let _ = writeln!(out, "  global aggregator:  {}", b.global_aggregator);
            let _ = writeln!(out, "  local aggregators:  {}", b.local_aggregators);
            let _ = writeln!(out, "  clients:            {}", b.clients);
        }
        out
    }
}

impl ReconfigReport {
    /// Plain-text rendering
    pub fn render(&self) -> String {
        let mut out = format!("{} reconfiguration cost: {}\n", self.cost_model, self.total);
        for handoff in &self.handoffs {
            let reason = match &handoff.reason {
                HandoffReason::Joined => "joined".to_string(),
                HandoffReason::Reassigned { from } => format!("reassigned from {from}"),
            };
            let _ = writeln!(
                out,
                "  {} ({}) -> {}: {}",
                handoff.client_id, handoff.host_node_id, handoff.parent_node_id, reason
            );
        }
        out
    }
}
