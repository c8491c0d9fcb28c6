// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Scoped session and transaction guards
//!
//! Sessions are closed when the guard is dropped. Transactions follow the
//! rusqlite pattern:
//! - Transactions automatically roll back when dropped (unless committed)
//! - Explicit `commit()` is required to persist changes

use super::{Driver, Params, QueryResult, Session, Transaction};
use crate::error::DriverError;

/// Session that is closed exactly once when it goes out of scope
pub struct ManagedSession<'d> {
    inner: Box<dyn Session + 'd>,
    closed: bool,
}

impl<'d> ManagedSession<'d> {
    /// Open a session on the given driver
    pub fn open(driver: &'d dyn Driver) -> Result<Self, DriverError> {
        let inner = driver.session()?;
        log::debug!("Session opened");
        Ok(Self {
            inner,
            closed: false,
        })
    }

    /// Begin a transaction that rolls back on drop unless committed
    pub fn begin_transaction(&mut self) -> Result<ManagedTransaction<'_>, DriverError> {
        if self.closed {
            return Err(DriverError::Session("Session already closed".to_string()));
        }
        let inner = self.inner.begin_transaction()?;
        Ok(ManagedTransaction {
            inner,
            finished: false,
        })
    }

    /// Close the session now instead of at the end of the scope
    pub fn close(mut self) {
        self.close_internal();
    }

    fn close_internal(&mut self) {
        if !self.closed {
            self.inner.close();
            self.closed = true;
            log::debug!("Session closed");
        }
    }
}

impl Drop for ManagedSession<'_> {
    fn drop(&mut self) {
        self.close_internal();
    }
}

/// Transaction guard over a driver transaction
pub struct ManagedTransaction<'s> {
    inner: Box<dyn Transaction + 's>,
    finished: bool,
}

impl ManagedTransaction<'_> {
    /// Run a query inside this transaction
    pub fn run(&mut self, query: &str, params: &Params) -> Result<QueryResult, DriverError> {
        if self.finished {
            return Err(DriverError::Transaction(
                "Transaction already finished".to_string(),
            ));
        }
        self.inner.run(query, params)
    }

    /// Commit the transaction, consuming the guard
    pub fn commit(mut self) -> Result<(), DriverError> {
        self.commit_internal()
    }

    /// Roll back explicitly (also happens automatically on drop)
    pub fn rollback(mut self) -> Result<(), DriverError> {
        self.rollback_internal()
    }

    fn commit_internal(&mut self) -> Result<(), DriverError> {
        if self.finished {
            return Err(DriverError::Transaction(
                "Transaction already finished".to_string(),
            ));
        }
        // A failed commit leaves nothing to roll back on drop.
        self.finished = true;
        self.inner.commit()
    }

    fn rollback_internal(&mut self) -> Result<(), DriverError> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.inner.rollback()
    }
}

impl Drop for ManagedTransaction<'_> {
    fn drop(&mut self) {
        if let Err(e) = self.rollback_internal() {
            log::warn!("Failed to rollback transaction on drop: {}", e);
        }
    }
}
