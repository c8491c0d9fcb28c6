//! Test utilities for TCK engine integration tests
//!
//! - FakeGraph: in-memory driver with scripted results and failures
//! - fixture helpers: build a TestContext wired to a FakeGraph

#![allow(dead_code)]

pub mod fake_driver;

use fake_driver::FakeGraph;
use tck_engine::{TckConfig, TestContext};

/// Route engine logs to the test output (safe to call from every test)
pub fn init_logging() {
    let _ = env_logger::builder()
        .is_test(true)
        .filter_level(log::LevelFilter::Debug)
        .try_init();
}

/// Context over a fresh fake graph with default configuration
pub fn fixture() -> (FakeGraph, TestContext) {
    fixture_with_config(TckConfig::default())
}

/// Context over a fresh fake graph with the given configuration
pub fn fixture_with_config(config: TckConfig) -> (FakeGraph, TestContext) {
    init_logging();
    let graph = FakeGraph::new();
    let context = TestContext::new(Box::new(graph.clone()), config);
    (graph, context)
}
