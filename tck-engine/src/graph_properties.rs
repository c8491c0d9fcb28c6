// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Running aggregate of graph shape across test steps

use crate::driver::Counters;
use serde::{Deserialize, Serialize};

/// Net number of nodes, relationships, labels and properties changed by the
/// queries of a test run
///
/// Counts are plain signed integers. Nothing clamps them at zero, so a driver
/// that over-reports deletions will drive them negative. Changes wrap on
/// `i64` overflow.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphPropertyTracker {
    nodes: i64,
    relationships: i64,
    labels: i64,
    properties: i64,
}

impl GraphPropertyTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn nodes(&self) -> i64 {
        self.nodes
    }

    pub fn relationships(&self) -> i64 {
        self.relationships
    }

    pub fn labels(&self) -> i64 {
        self.labels
    }

    pub fn properties(&self) -> i64 {
        self.properties
    }

    pub fn change_nodes(&mut self, delta: i64) {
        self.nodes = self.nodes.wrapping_add(delta);
    }

    pub fn change_relationships(&mut self, delta: i64) {
        self.relationships = self.relationships.wrapping_add(delta);
    }

    pub fn change_labels(&mut self, delta: i64) {
        self.labels = self.labels.wrapping_add(delta);
    }

    pub fn change_properties(&mut self, delta: i64) {
        self.properties = self.properties.wrapping_add(delta);
    }

    /// Fold a query's change counters into the running totals
    ///
    /// Creation and deletion of the same category are checked independently;
    /// only positive counters contribute. Properties only ever grow since the
    /// driver reports no removal counter for them.
    pub fn apply_counters(&mut self, counters: &Counters) {
        if counters.nodes_created > 0 {
            self.change_nodes(counters.nodes_created);
        }
        if counters.nodes_deleted > 0 {
            self.change_nodes(-counters.nodes_deleted);
        }

        if counters.relationships_created > 0 {
            self.change_relationships(counters.relationships_created);
        }
        if counters.relationships_deleted > 0 {
            self.change_relationships(-counters.relationships_deleted);
        }

        if counters.labels_added > 0 {
            self.change_labels(counters.labels_added);
        }
        if counters.labels_removed > 0 {
            self.change_labels(-counters.labels_removed);
        }

        if counters.properties_set > 0 {
            self.change_properties(counters.properties_set);
        }
    }

    /// Zero every count
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// True when no change has been recorded since the last reset
    pub fn is_unchanged(&self) -> bool {
        *self == Self::default()
    }
}
