// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Expected side effects of a scenario
//!
//! Scenarios state their expectations as a two-column table:
//!
//! ```text
//! | +nodes         | 3 |
//! | +relationships | 1 |
//! | +properties    | 2 |
//! ```
//!
//! Categories not listed are expected to be unchanged.

use crate::error::{Error, Result};
use crate::graph_properties::GraphPropertyTracker;
use std::fmt;
use std::str::FromStr;

/// Graph element category a side effect applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Nodes,
    Relationships,
    Labels,
    Properties,
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Category::Nodes => "nodes",
            Category::Relationships => "relationships",
            Category::Labels => "labels",
            Category::Properties => "properties",
        };
        f.write_str(name)
    }
}

impl FromStr for Category {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "nodes" => Ok(Category::Nodes),
            "relationships" => Ok(Category::Relationships),
            "labels" => Ok(Category::Labels),
            "properties" => Ok(Category::Properties),
            other => Err(Error::InvalidSideEffect(format!(
                "unknown category '{}'",
                other
            ))),
        }
    }
}

/// Added and removed amounts expected for one category
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Change {
    pub added: i64,
    pub removed: i64,
}

impl Change {
    /// `added - removed`, or `None` when it does not fit in an `i64`
    pub fn net(&self) -> Option<i64> {
        self.added.checked_sub(self.removed)
    }
}

/// Parsed side-effect expectation table
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SideEffects {
    pub nodes: Change,
    pub relationships: Change,
    pub labels: Change,
    pub properties: Change,
}

impl SideEffects {
    /// Expectation that nothing changes
    pub fn none() -> Self {
        Self::default()
    }

    /// Parse `(key, amount)` rows such as `("+nodes", "3")`
    ///
    /// Repeated keys accumulate.
    pub fn parse<K, V, I>(rows: I) -> Result<Self>
    where
        K: AsRef<str>,
        V: AsRef<str>,
        I: IntoIterator<Item = (K, V)>,
    {
        let mut effects = Self::none();
        for (key, amount) in rows {
            let key = key.as_ref().trim();
            let amount = amount.as_ref().trim();

            let (added, category) = if let Some(rest) = key.strip_prefix('+') {
                (true, rest.parse::<Category>()?)
            } else if let Some(rest) = key.strip_prefix('-') {
                (false, rest.parse::<Category>()?)
            } else {
                return Err(Error::InvalidSideEffect(format!(
                    "key '{}' must start with '+' or '-'",
                    key
                )));
            };
            let amount: i64 = amount.parse().map_err(|_| {
                Error::InvalidSideEffect(format!(
                    "amount '{}' for '{}' is not an integer",
                    amount, key
                ))
            })?;

            let change = effects.change_mut(category);
            let total = if added {
                &mut change.added
            } else {
                &mut change.removed
            };
            *total = total.checked_add(amount).ok_or_else(|| overflow(category))?;
            if change.net().is_none() {
                return Err(overflow(category));
            }
        }
        Ok(effects)
    }

    pub fn change(&self, category: Category) -> Change {
        match category {
            Category::Nodes => self.nodes,
            Category::Relationships => self.relationships,
            Category::Labels => self.labels,
            Category::Properties => self.properties,
        }
    }

    fn change_mut(&mut self, category: Category) -> &mut Change {
        match category {
            Category::Nodes => &mut self.nodes,
            Category::Relationships => &mut self.relationships,
            Category::Labels => &mut self.labels,
            Category::Properties => &mut self.properties,
        }
    }

    /// Value the tracker must hold for `category` to satisfy this expectation
    ///
    /// Property removals are not tracked, so only `+properties` is compared.
    pub fn expected(&self, category: Category) -> Result<i64> {
        match category {
            Category::Properties => Ok(self.properties.added),
            other => self.change(other).net().ok_or_else(|| overflow(other)),
        }
    }

    /// Compare against the tracker, listing every mismatching category
    pub fn verify(&self, tracker: &GraphPropertyTracker) -> Result<()> {
        let actual = [
            (Category::Nodes, tracker.nodes()),
            (Category::Relationships, tracker.relationships()),
            (Category::Labels, tracker.labels()),
            (Category::Properties, tracker.properties()),
        ];

        let mut mismatches = Vec::new();
        for (category, value) in actual {
            let expected = self.expected(category)?;
            if expected != value {
                mismatches.push(format!(
                    "{}: expected {}, got {}",
                    category, expected, value
                ));
            }
        }

        if mismatches.is_empty() {
            Ok(())
        } else {
            Err(Error::Assertion(format!(
                "side effects differ ({})",
                mismatches.join(", ")
            )))
        }
    }
}

fn overflow(category: Category) -> Error {
    Error::InvalidSideEffect(format!("{} amounts overflow", category))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_table() {
        let effects =
            SideEffects::parse([("+nodes", "3"), ("+relationships", "1"), ("-labels", " 2 ")])
                .unwrap();
        assert_eq!(effects.nodes, Change { added: 3, removed: 0 });
        assert_eq!(effects.relationships.added, 1);
        assert_eq!(effects.labels.removed, 2);
        assert_eq!(effects.properties, Change::default());
    }

    #[test]
    fn test_parse_rejects_bad_rows() {
        assert!(matches!(
            SideEffects::parse([("nodes", "1")]),
            Err(Error::InvalidSideEffect(_))
        ));
        assert!(matches!(
            SideEffects::parse([("+edges", "1")]),
            Err(Error::InvalidSideEffect(_))
        ));
        assert!(matches!(
            SideEffects::parse([("+nodes", "many")]),
            Err(Error::InvalidSideEffect(_))
        ));
        assert!(matches!(
            SideEffects::parse([("", "1")]),
            Err(Error::InvalidSideEffect(_))
        ));
    }

    #[test]
    fn test_parse_rejects_overflowing_amounts() {
        let err = SideEffects::parse([("-nodes", "-9223372036854775808"), ("+nodes", "1")])
            .unwrap_err();
        assert!(matches!(err, Error::InvalidSideEffect(_)));

        assert!(matches!(
            SideEffects::parse([("+labels", "9223372036854775807"), ("+labels", "1")]),
            Err(Error::InvalidSideEffect(_))
        ));
    }

    #[test]
    fn test_verify_reports_overflowing_net() {
        let effects = SideEffects {
            relationships: Change {
                added: i64::MIN,
                removed: 1,
            },
            ..Default::default()
        };
        assert!(matches!(
            effects.verify(&GraphPropertyTracker::new()),
            Err(Error::InvalidSideEffect(_))
        ));
    }

    #[test]
    fn test_verify_compares_net_values() {
        let mut tracker = GraphPropertyTracker::new();
        tracker.change_nodes(2);
        tracker.change_properties(1);

        let effects = SideEffects::parse([
            ("+nodes", "3"),
            ("-nodes", "1"),
            ("+properties", "1"),
            ("-properties", "1"),
        ])
        .unwrap();
        assert!(effects.verify(&tracker).is_ok());
    }

    #[test]
    fn test_verify_reports_all_mismatches() {
        let mut tracker = GraphPropertyTracker::new();
        tracker.change_nodes(1);
        tracker.change_labels(1);

        let err = SideEffects::none().verify(&tracker).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("nodes: expected 0, got 1"));
        assert!(message.contains("labels: expected 0, got 1"));
        assert!(!message.contains("relationships"));
    }
}
