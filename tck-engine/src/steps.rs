// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Scenario steps
//!
//! Plain functions a BDD runner binds to its step phrases. Steps that set up
//! or run queries go through [`crate::executor::execute`]; assertion steps
//! return [`Error::Assertion`] when the expectation does not hold.
//!
//! | Phrase                              | Function                      |
//! |-------------------------------------|-------------------------------|
//! | `Given an empty graph`              | [`empty_graph`]               |
//! | `And parameters are:`               | [`parameters_are`]            |
//! | `And having executed:`              | [`having_executed`]           |
//! | `When executing query:`             | [`executing_query`]           |
//! | `Then the result should be:`        | [`result_should_be`]          |
//! | `Then the result should be empty`   | [`result_should_be_empty`]    |
//! | `And the side effects should be:`   | [`side_effects_should_be`]    |
//! | `And no side effects`               | [`no_side_effects`]           |
//! | `Then an error should be raised`    | [`error_should_be_raised`]    |
//! | `Then no error should be raised`    | [`no_error_should_be_raised`] |

use crate::context::TestContext;
use crate::driver::{Params, Record, Value};
use crate::error::{Error, Result};
use crate::executor::{self, CLEANUP_QUERY};
use crate::side_effects::SideEffects;

/// Row order a result comparison must respect
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowOrder {
    /// Rows may appear in any order
    Any,
    /// Rows must appear in the given order
    Exact,
}

/// Remove all graph data and start counting side effects from zero
pub fn empty_graph(context: &mut TestContext) -> Result<()> {
    having_executed(context, CLEANUP_QUERY)
}

/// Declare scenario parameters from `(name, literal)` rows
///
/// Literals are JSON, except that single-quoted strings are accepted as
/// strings. Parameters accumulate until the scenario is reset.
pub fn parameters_are<K, V, I>(context: &mut TestContext, rows: I) -> Result<()>
where
    K: Into<String>,
    V: AsRef<str>,
    I: IntoIterator<Item = (K, V)>,
{
    for (name, literal) in rows {
        let value = parse_literal(literal.as_ref())?;
        context.parameters.insert(name.into(), value);
    }
    Ok(())
}

/// Run a setup query whose side effects are not part of the scenario
pub fn having_executed(context: &mut TestContext, query: &str) -> Result<()> {
    context.exception = None;
    executor::execute(query, context, &Params::new());
    context.graph_properties.reset();

    match context.take_exception() {
        Some(error) => Err(Error::Setup(error)),
        None => Ok(()),
    }
}

/// Run the query under test with the scenario parameters
pub fn executing_query(context: &mut TestContext, query: &str) {
    context.exception = None;
    let params = context.parameters.clone();
    context.results = executor::execute(query, context, &params);
}

/// Compare the rows of the last query with the expected ones
///
/// Rows are compared column by column, ignoring column order.
pub fn result_should_be(
    context: &TestContext,
    expected: &[Record],
    order: RowOrder,
) -> Result<()> {
    let actual: Vec<Value> = context.results.iter().map(Record::to_json).collect();
    let expected: Vec<Value> = expected.iter().map(Record::to_json).collect();

    if actual.len() != expected.len() {
        return Err(Error::Assertion(format!(
            "expected {} row(s), got {}",
            expected.len(),
            actual.len()
        )));
    }

    match order {
        RowOrder::Exact => {
            for (index, (want, got)) in expected.iter().zip(actual.iter()).enumerate() {
                if want != got {
                    return Err(Error::Assertion(format!(
                        "row {} differs: expected {}, got {}",
                        index, want, got
                    )));
                }
            }
        }
        RowOrder::Any => {
            let mut unmatched = actual;
            for want in &expected {
                let position = unmatched.iter().position(|got| got == want);
                match position {
                    Some(index) => {
                        unmatched.swap_remove(index);
                    }
                    None => {
                        return Err(Error::Assertion(format!(
                            "expected row {} not found in result",
                            want
                        )))
                    }
                }
            }
        }
    }
    Ok(())
}

/// Assert that the last query returned no rows
pub fn result_should_be_empty(context: &TestContext) -> Result<()> {
    result_should_be(context, &[], RowOrder::Any)
}

/// Assert the scenario's side effects against an expectation table
///
/// Always passes when side-effect tracking is disabled.
pub fn side_effects_should_be<K, V, I>(context: &TestContext, rows: I) -> Result<()>
where
    K: AsRef<str>,
    V: AsRef<str>,
    I: IntoIterator<Item = (K, V)>,
{
    let expected = SideEffects::parse(rows)?;
    verify_side_effects(context, &expected)
}

/// Assert that the scenario changed nothing
pub fn no_side_effects(context: &TestContext) -> Result<()> {
    verify_side_effects(context, &SideEffects::none())
}

fn verify_side_effects(context: &TestContext, expected: &SideEffects) -> Result<()> {
    if !context.config.tracks_side_effects() {
        log::debug!("Side-effect tracking disabled, skipping check");
        return Ok(());
    }
    expected.verify(&context.graph_properties)
}

/// Assert that the last query failed
pub fn error_should_be_raised(context: &TestContext) -> Result<()> {
    match context.exception() {
        Some(_) => Ok(()),
        None => Err(Error::Assertion(
            "expected an error, but the query succeeded".to_string(),
        )),
    }
}

/// Assert that the last query succeeded
pub fn no_error_should_be_raised(context: &TestContext) -> Result<()> {
    match context.exception() {
        Some(error) => Err(Error::Assertion(format!("unexpected error: {}", error))),
        None => Ok(()),
    }
}

fn parse_literal(literal: &str) -> Result<Value> {
    let literal = literal.trim();
    if literal.len() >= 2 && literal.starts_with('\'') && literal.ends_with('\'') {
        return Ok(Value::String(literal[1..literal.len() - 1].to_string()));
    }
    Ok(serde_json::from_str(literal)?)
}
