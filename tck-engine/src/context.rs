// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! State threaded through every step of a test run

use crate::config::TckConfig;
use crate::driver::{Driver, Params, Record};
use crate::error::QueryExecutionError;
use crate::graph_properties::GraphPropertyTracker;

/// Test context, built once per run and passed to each step by `&mut`
///
/// Not synchronized: steps sharing one context must run sequentially.
pub struct TestContext {
    /// Driver for the database under test
    pub driver: Box<dyn Driver>,
    /// Run configuration
    pub config: TckConfig,
    /// Net graph changes observed so far
    pub graph_properties: GraphPropertyTracker,
    /// Last query failure swallowed by the executor
    pub exception: Option<QueryExecutionError>,
    /// Parameters declared by the current scenario
    pub parameters: Params,
    /// Rows returned by the last executed query step
    pub results: Vec<Record>,
}

impl TestContext {
    /// Create a context with a fresh tracker and empty scenario state
    pub fn new(driver: Box<dyn Driver>, config: TckConfig) -> Self {
        Self {
            driver,
            config,
            graph_properties: GraphPropertyTracker::new(),
            exception: None,
            parameters: Params::new(),
            results: Vec::new(),
        }
    }

    /// Record a failure, replacing any earlier one
    pub fn set_exception(&mut self, error: QueryExecutionError) {
        self.exception = Some(error);
    }

    /// Last recorded failure, if any
    pub fn exception(&self) -> Option<&QueryExecutionError> {
        self.exception.as_ref()
    }

    /// Take the last recorded failure, leaving the slot empty
    pub fn take_exception(&mut self) -> Option<QueryExecutionError> {
        self.exception.take()
    }

    /// Clear everything a previous scenario left behind
    pub fn reset_scenario(&mut self) {
        self.exception = None;
        self.parameters.clear();
        self.results.clear();
        self.graph_properties.reset();
    }
}

impl std::fmt::Debug for TestContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TestContext")
            .field("config", &self.config)
            .field("graph_properties", &self.graph_properties)
            .field("exception", &self.exception)
            .field("parameters", &self.parameters)
            .field("results", &self.results.len())
            .finish_non_exhaustive()
    }
}
