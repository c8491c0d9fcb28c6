// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Query execution with side-effect tracking
//!
//! Every query runs in its own session and explicit transaction. Failures
//! never reach the caller: they are logged, stored on the
//! [`TestContext`], and followed by a wipe of the whole graph so the next
//! step starts from a known state.

use crate::context::TestContext;
use crate::driver::{Driver, ManagedSession, Params, Record};
use crate::error::{DriverError, QueryExecutionError};
use crate::graph_properties::GraphPropertyTracker;

/// Query that removes every node and relationship
pub const CLEANUP_QUERY: &str = "MATCH (n) DETACH DELETE n";

/// Run `query` against the configured database and return its rows
///
/// Returns an empty list without touching the database when the configured
/// database kind is not supported. On failure the error is stored in
/// `context.exception`, [`CLEANUP_QUERY`] is run, and an empty list is
/// returned.
pub fn execute(query: &str, context: &mut TestContext, params: &Params) -> Vec<Record> {
    if !context.config.database.is_supported() {
        log::debug!(
            "Skipping query for unsupported database '{}'",
            context.config.database
        );
        return Vec::new();
    }

    log::debug!("Executing query: {}", query);
    match run_tracked(context, query, params) {
        Ok(records) => {
            log::debug!("Query returned {} row(s)", records.len());
            records
        }
        Err(error) => {
            log::info!("{}", error);
            context.set_exception(error);
            recover(context);
            Vec::new()
        }
    }
}

/// Run `query` with no parameters
pub fn execute_query(query: &str, context: &mut TestContext) -> Vec<Record> {
    execute(query, context, &Params::new())
}

/// Wipe the graph after a failed query
///
/// A failing wipe is logged and leaves the original failure in place.
fn recover(context: &mut TestContext) {
    log::debug!("Clearing graph after failed query");
    if let Err(error) = run_tracked(context, CLEANUP_QUERY, &Params::new()) {
        log::error!("Graph cleanup failed: {}", error);
    }
}

fn run_tracked(
    context: &mut TestContext,
    query: &str,
    params: &Params,
) -> Result<Vec<Record>, QueryExecutionError> {
    let tracker = if context.config.tracks_side_effects() {
        Some(&mut context.graph_properties)
    } else {
        None
    };

    run_in_transaction(context.driver.as_ref(), tracker, query, params)
        .map_err(|source| QueryExecutionError::new(query, source))
}

fn run_in_transaction(
    driver: &dyn Driver,
    tracker: Option<&mut GraphPropertyTracker>,
    query: &str,
    params: &Params,
) -> Result<Vec<Record>, DriverError> {
    let mut session = ManagedSession::open(driver)?;
    let mut tx = session.begin_transaction()?;

    let result = tx.run(query, params)?;
    if let Some(tracker) = tracker {
        tracker.apply_counters(&result.summary().counters);
    }
    let records = result.into_records();

    tx.commit()?;
    Ok(records)
}
