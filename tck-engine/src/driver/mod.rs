// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Database driver seam
//!
//! The engine does not speak any wire protocol itself. A driver for the
//! database under test implements the three traits below, layered the same
//! way a client SDK is: a driver hands out sessions, a session hands out
//! transactions, and queries run inside a transaction.
//!
//! ```text
//! Driver ──session()──▶ Session ──begin_transaction()──▶ Transaction
//!                          │                                 │
//!                       close()                  run() / commit() / rollback()
//! ```
//!
//! [`ManagedSession`] and [`ManagedTransaction`] wrap the trait objects so
//! that sessions are always closed and uncommitted transactions are always
//! rolled back, whichever way the caller leaves the scope.

pub mod session;
pub mod types;

pub use session::{ManagedSession, ManagedTransaction};
pub use types::{Counters, Params, QueryResult, Record, ResultSummary, Value};

use crate::error::DriverError;

/// Entry point of a database driver
pub trait Driver {
    /// Open a new session against the database
    fn session(&self) -> Result<Box<dyn Session + '_>, DriverError>;
}

/// A logical connection that can run transactions
pub trait Session {
    /// Start a new explicit transaction
    fn begin_transaction(&mut self) -> Result<Box<dyn Transaction + '_>, DriverError>;

    /// Release the session and any resources it holds
    fn close(&mut self);
}

/// An open transaction
pub trait Transaction {
    /// Run a query with parameters and buffer its rows and summary
    fn run(&mut self, query: &str, params: &Params) -> Result<QueryResult, DriverError>;

    /// Make the transaction's changes durable
    fn commit(&mut self) -> Result<(), DriverError>;

    /// Discard the transaction's changes
    fn rollback(&mut self) -> Result<(), DriverError>;
}
