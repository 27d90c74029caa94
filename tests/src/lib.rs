//! Integration test framework for florch
#![allow(missing_docs)]
//!
//! Shared fixtures and helpers for scenario tests that drive the cost engine
//! through the common topology model.
//!
//! # Components
//!
//! - [`test_fixtures`] - Reference registries and topologies
//! - [`test_utils`] - Logging setup and float assertions
//!
//! # Test Categories
//!
//! 1. **Cost scenarios** - Worked examples, YAML-loaded topologies, errors
//! 2. **Topology properties** - Property tests over generated star topologies

pub mod test_fixtures;
pub mod test_utils;

pub use test_fixtures::{
    reassigned_topology, reference_registry, reference_topology, star_registry, star_topology,
    StarShape,
};
pub use test_utils::{assert_cost_eq, init_test_logging, COST_TOLERANCE};
