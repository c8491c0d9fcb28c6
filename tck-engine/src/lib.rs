// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! TCK engine - query execution for graph database acceptance tests
//!
//! Runs openCypher TCK style scenarios against a graph database through a
//! pluggable driver, and keeps a running tally of the graph changes each
//! query reports so scenarios can assert on their side effects.
//!
//! # Usage
//!
//! ```ignore
//! use tck_engine::{steps, TckConfig, TestContext};
//!
//! let mut context = TestContext::new(Box::new(my_driver), TckConfig::from_env()?);
//!
//! steps::empty_graph(&mut context)?;
//! steps::executing_query(&mut context, "CREATE (:Person {name: 'Alice'})");
//! steps::side_effects_should_be(&context, [("+nodes", "1"), ("+labels", "1"), ("+properties", "1")])?;
//! ```
//!
//! # Module Organization
//!
//! - [`driver`] - Driver traits, scoped session/transaction guards, result types
//! - [`executor`] - Query execution, side-effect forwarding, failure recovery
//! - [`graph_properties`] - Running graph change tracker
//! - [`side_effects`] - Expected side-effect tables
//! - [`steps`] - Scenario step functions
//! - [`context`] - State shared by the steps of a run
//! - [`config`] - Run configuration
//! - [`error`] - Error types

pub mod config;
pub mod context;
pub mod driver;
pub mod error;
pub mod executor;
pub mod graph_properties;
pub mod side_effects;
pub mod steps;

pub use config::{DatabaseKind, TckConfig};
pub use context::TestContext;
pub use driver::{
    Counters, Driver, Params, QueryResult, Record, ResultSummary, Session, Transaction,
};
pub use error::{DriverError, Error, QueryExecutionError, Result};
pub use executor::{execute, execute_query, CLEANUP_QUERY};
pub use graph_properties::GraphPropertyTracker;
pub use side_effects::SideEffects;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
