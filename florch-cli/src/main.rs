//! flcost - hierarchical FL topology cost evaluation
//!
//! Reads a node registry and one or two topology files (YAML) and prints the
//! round or reconfiguration cost under the selected cost model.
//!
//! # Usage
//!
//! ```bash
//! flcost round -n nodes.yaml -c topology.yaml -m energy --exclude n3,n4
//! flcost reconfig -n nodes.yaml --old current.yaml --new candidate.yaml -s 2.5e6
//! ```

mod report;

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Args as ClapArgs, Parser, Subcommand};
use tracing::{debug, warn};

use florch_common::{init_logging, FlConfiguration, LogLevel};
use florch_cost::{
    client_handoffs, reconfiguration_cost, round_cost_breakdown, ClientExclusions, CostModel,
    NodeRegistry,
};

use report::{ReconfigReport, RoundReport};

#[derive(Parser, Debug)]
#[command(name = "flcost")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Log level (overridden by RUST_LOG)
    #[arg(long = "log-level", value_name = "LEVEL", default_value = "warn", global = true)]
    log_level: LogLevel,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Cost of one federated round on a topology
    Round {
        #[command(flatten)]
        common: EvalArgs,

        /// Topology file (YAML)
        #[arg(short = 'c', long = "config", value_name = "FILE")]
        config: PathBuf,

        /// Client ids excluded from energy accounting (e.g. n3,n4)
        #[arg(short = 'x', long = "exclude", value_delimiter = ',', value_name = "IDS")]
        exclude: Vec<String>,

        /// Print the per-role breakdown
        #[arg(short = 'b', long = "breakdown")]
        breakdown: bool,
    },
    /// Cost of migrating from one topology to another
    Reconfig {
        #[command(flatten)]
        common: EvalArgs,

        /// Current topology file (YAML)
        #[arg(long = "old", value_name = "FILE")]
        old: PathBuf,

        /// Candidate topology file (YAML)
        #[arg(long = "new", value_name = "FILE")]
        new: PathBuf,
    },
}

#[derive(ClapArgs, Debug)]
struct EvalArgs {
    /// Node registry file (YAML list of nodes)
    #[arg(short = 'n', long = "nodes", value_name = "FILE")]
    nodes: PathBuf,

    /// Cost model: communication or energy
    #[arg(short = 'm', long = "cost-model", value_name = "MODEL", default_value = "communication")]
    cost_model: CostModel,

    /// Size of the transmitted model
    #[arg(short = 's', long = "model-size", value_name = "SIZE", default_value_t = 1.0)]
    model_size: f64,

    /// Print the report as JSON
    #[arg(long = "json")]
    json: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.log_level);

    match run(args) {
        Ok(output) => {
            print!("{output}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("ERROR: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<String> {
    match args.command {
        Command::Round {
            common,
            config,
            exclude,
            breakdown,
        } => {
            let nodes = load_nodes(&common.nodes)?;
            let configuration = load_configuration(&config)?;
            let excluded = load_exclusions(&exclude);

            let costs = round_cost_breakdown(
                &configuration,
                &nodes,
                common.model_size,
                common.cost_model,
                &excluded,
            )
            .context("Round cost evaluation failed")?;

            let report = RoundReport {
                cost_model: common.cost_model,
                model_size: common.model_size,
                total: costs.total(),
                breakdown: breakdown.then_some(costs),
            };
            render(&report, common.json, RoundReport::render)
        }
        Command::Reconfig { common, old, new } => {
            let nodes = load_nodes(&common.nodes)?;
            let old = load_configuration(&old)?;
            let new = load_configuration(&new)?;

            let total =
                reconfiguration_cost(&old, &new, &nodes, common.model_size, common.cost_model)
                    .context("Reconfiguration cost evaluation failed")?;

            let handoffs = match common.cost_model {
                CostModel::Communication => client_handoffs(&old, &new),
                CostModel::Energy => Vec::new(),
            };

            let report = ReconfigReport {
                cost_model: common.cost_model,
                model_size: common.model_size,
                total,
                handoffs,
            };
            render(&report, common.json, ReconfigReport::render)
        }
    }
}

fn render<T: serde::Serialize>(report: &T, json: bool, text: fn(&T) -> String) -> Result<String> {
    if json {
        let mut out = serde_json::to_string_pretty(report).context("Failed to encode report")?;
        out.push('\n');
        Ok(out)
    } else {
        Ok(text(report))
    }
}

/// Builds the exclusion set, warning about entries that are not `n<integer>`.
fn load_exclusions(ids: &[String]) -> ClientExclusions {
    let mut excluded = ClientExclusions::new();
    let rejected: Vec<&str> = ids
        .iter()
        .map(String::as_str)
        .filter(|id| !excluded.insert(id))
        .collect();
    if !rejected.is_empty() {
        warn!(
            "Ignoring {} malformed exclusion id(s): {}",
            rejected.len(),
            rejected.join(", ")
        );
    }
    excluded
}

fn load_nodes(path: &Path) -> Result<NodeRegistry> {
    let nodes = NodeRegistry::from_yaml_file(path)
        .with_context(|| format!("Failed to load node registry from {}", path.display()))?;
    debug!("Loaded {} node(s) from {}", nodes.len(), path.display());
    Ok(nodes)
}

fn load_configuration(path: &Path) -> Result<FlConfiguration> {
    let config = FlConfiguration::from_yaml_file(path)
        .with_context(|| format!("Failed to load topology from {}", path.display()))?;
    config
        .validate()
        .with_context(|| format!("Invalid topology in {}", path.display()))?;
    debug!(
        "Loaded topology from {}: ga={}, {} local aggregator(s), {} client(s)",
        path.display(),
        config.global_aggregator.id,
        config.local_aggregators.len(),
        config.clients.len()
    );
    Ok(config)
}
