// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Error types for the TCK engine

use thiserror::Error;

/// Result type alias for engine operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors reported by a database driver implementation
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DriverError {
    /// The driver could not reach the database
    #[error("Connection error: {0}")]
    Connection(String),

    /// A session could not be opened
    #[error("Session error: {0}")]
    Session(String),

    /// A transaction could not be started or was left in a broken state
    #[error("Transaction error: {0}")]
    Transaction(String),

    /// The database rejected or failed the query
    #[error("Query error: {0}")]
    Query(String),

    /// The transaction failed to commit
    #[error("Commit error: {0}")]
    Commit(String),
}

/// Failure of a single query run through the executor
///
/// This is the only error the executor produces. It never propagates to the
/// caller of [`crate::executor::execute`]; it is stored on the
/// [`crate::context::TestContext`] instead.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Query execution failed for `{query}`: {source}")]
pub struct QueryExecutionError {
    /// Query text that failed
    pub query: String,
    /// Driver failure that caused it
    #[source]
    pub source: DriverError,
}

impl QueryExecutionError {
    pub fn new(query: impl Into<String>, source: DriverError) -> Self {
        Self {
            query: query.into(),
            source,
        }
    }
}

/// Main error type for configuration and step operations
#[derive(Error, Debug)]
pub enum Error {
    /// Invalid configuration value
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// Malformed side-effect table entry
    #[error("Invalid side effect: {0}")]
    InvalidSideEffect(String),

    /// A step expectation did not hold
    #[error("Assertion failed: {0}")]
    Assertion(String),

    /// A setup query failed
    #[error("Setup failed: {0}")]
    Setup(#[source] QueryExecutionError),
}
