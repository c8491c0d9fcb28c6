// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Values exchanged with a database driver

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub use serde_json::Value;

/// Query parameters, keyed by parameter name (without the `$` prefix)
pub type Params = BTreeMap<String, Value>;

/// Single result row returned by a query
///
/// Keys keep the order of the RETURN clause.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Record {
    keys: Vec<String>,
    values: Vec<Value>,
}

impl Record {
    /// Create an empty record
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a record from `(key, value)` pairs in column order
    pub fn from_pairs<K, I>(pairs: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, Value)>,
    {
        let mut record = Self::new();
        for (key, value) in pairs {
            record.push(key, value);
        }
        record
    }

    /// Append a column; a repeated key replaces the earlier value in place
    pub fn push(&mut self, key: impl Into<String>, value: Value) {
        let key = key.into();
        match self.keys.iter().position(|k| *k == key) {
            Some(index) => self.values[index] = value,
            None => {
                self.keys.push(key);
                self.values.push(value);
            }
        }
    }

    /// Column names in RETURN order
    pub fn keys(&self) -> &[String] {
        &self.keys
    }

    /// Column values in RETURN order
    pub fn values(&self) -> &[Value] {
        &self.values
    }

    /// Look up a value by column name
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.keys
            .iter()
            .position(|k| k == key)
            .map(|index| &self.values[index])
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Convert to a JSON object keyed by column name
    pub fn to_json(&self) -> Value {
        let map = self
            .keys
            .iter()
            .cloned()
            .zip(self.values.iter().cloned())
            .collect::<serde_json::Map<_, _>>();
        Value::Object(map)
    }

    /// Deserialize the row into a typed struct, matching fields by column name
    pub fn deserialize<T: DeserializeOwned>(&self) -> crate::error::Result<T> {
        Ok(serde_json::from_value(self.to_json())?)
    }
}

/// Graph mutation counters reported in a result summary
///
/// Signed so that a misreporting driver is passed through unchanged.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Counters {
    pub nodes_created: i64,
    pub nodes_deleted: i64,
    pub relationships_created: i64,
    pub relationships_deleted: i64,
    pub labels_added: i64,
    pub labels_removed: i64,
    pub properties_set: i64,
}

impl Counters {
    /// True when the query reported no graph mutation at all
    pub fn is_empty(&self) -> bool {
        *self == Counters::default()
    }
}

/// Metadata the driver reports once a query has run
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResultSummary {
    pub counters: Counters,
}

/// Buffered outcome of a single query
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QueryResult {
    pub records: Vec<Record>,
    pub summary: ResultSummary,
}

impl QueryResult {
    /// Create an empty result
    pub fn new() -> Self {
        Self::default()
    }

    /// Result with the given rows and no side effects
    pub fn with_records(records: Vec<Record>) -> Self {
        Self {
            records,
            summary: ResultSummary::default(),
        }
    }

    /// Set the reported counters
    pub fn with_counters(mut self, counters: Counters) -> Self {
        self.summary.counters = counters;
        self
    }

    /// Summary of the query
    pub fn summary(&self) -> &ResultSummary {
        &self.summary
    }

    /// Consume the result, keeping only its rows
    pub fn into_records(self) -> Vec<Record> {
        self.records
    }
}
