// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Test run configuration

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// Environment variable selecting the database kind
pub const DATABASE_ENV: &str = "TCK_DATABASE";

/// Environment variable disabling side-effect tracking
pub const NO_SIDE_EFFECTS_ENV: &str = "TCK_NO_SIDE_EFFECTS";

/// Database under test
///
/// Only [`DatabaseKind::Neo4j`] (any Bolt-compatible graph database) is
/// driven by the executor; every other kind turns query steps into no-ops.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum DatabaseKind {
    #[default]
    Neo4j,
    Other(String),
}

impl DatabaseKind {
    /// Whether the executor can run queries against this kind
    pub fn is_supported(&self) -> bool {
        matches!(self, DatabaseKind::Neo4j)
    }

    pub fn as_str(&self) -> &str {
        match self {
            DatabaseKind::Neo4j => "neo4j",
            DatabaseKind::Other(name) => name,
        }
    }
}

impl fmt::Display for DatabaseKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DatabaseKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let name = s.trim();
        if name.is_empty() {
            return Err(Error::Config("database name must not be empty".to_string()));
        }
        if name.eq_ignore_ascii_case("neo4j") {
            Ok(DatabaseKind::Neo4j)
        } else {
            Ok(DatabaseKind::Other(name.to_ascii_lowercase()))
        }
    }
}

impl TryFrom<String> for DatabaseKind {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<DatabaseKind> for String {
    fn from(kind: DatabaseKind) -> Self {
        kind.as_str().to_string()
    }
}

/// Configuration shared by every step of a test run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TckConfig {
    /// Database under test
    pub database: DatabaseKind,

    /// Skip forwarding query counters to the graph property tracker
    pub no_side_effects: bool,
}

impl TckConfig {
    /// Parse a JSON configuration document; missing fields take defaults
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a JSON configuration file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = std::fs::read_to_string(path.as_ref())?;
        log::debug!("Loaded TCK config from {}", path.as_ref().display());
        Self::from_json_str(&contents)
    }

    /// Defaults overridden by `TCK_DATABASE` and `TCK_NO_SIDE_EFFECTS`
    pub fn from_env() -> Result<Self> {
        Self::default().with_env_overrides()
    }

    /// Apply environment overrides on top of this configuration
    pub fn with_env_overrides(mut self) -> Result<Self> {
        if let Ok(database) = std::env::var(DATABASE_ENV) {
            self.database = database.parse()?;
        }
        if let Ok(flag) = std::env::var(NO_SIDE_EFFECTS_ENV) {
            self.no_side_effects = parse_flag(&flag).ok_or_else(|| {
                Error::Config(format!(
                    "{} must be a boolean, got '{}'",
                    NO_SIDE_EFFECTS_ENV, flag
                ))
            })?;
        }
        Ok(self)
    }

    pub fn with_database(mut self, database: DatabaseKind) -> Self {
        self.database = database;
        self
    }

    pub fn with_no_side_effects(mut self, no_side_effects: bool) -> Self {
        self.no_side_effects = no_side_effects;
        self
    }

    /// Whether query counters are forwarded to the tracker
    pub fn tracks_side_effects(&self) -> bool {
        !self.no_side_effects
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" | "" => Some(false),
        _ => None,
    }
}
