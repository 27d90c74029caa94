//! Common types and utilities for florch
//!
//! This crate provides the hierarchical federated-learning topology model
//! (nodes, clients, aggregators and configurations), YAML configuration
//! loading, and logging setup shared by all florch crates.

pub mod config;
pub mod error;
pub mod logging;
pub mod types;

pub use config::FlConfiguration;
pub use error::Error;
pub use logging::{init_logging, init_logging_with_filter, LogLevel};
pub use types::{
    normalize_client_index, parse_client_index, Client, ClientIdError, FlRole, GlobalAggregator,
    LocalAggregator, Node,
};
