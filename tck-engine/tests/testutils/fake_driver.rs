//! In-memory fake driver
//!
//! Keeps node/relationship/label/property totals, applies a query's counters
//! on commit, and discards them on rollback. Queries answer from a script;
//! unscripted queries succeed with no rows. The cleanup query deletes
//! whatever the graph currently holds.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;
use tck_engine::driver::{Counters, Driver, Params, QueryResult, Session, Transaction};
use tck_engine::{DriverError, CLEANUP_QUERY};

/// Scripted outcome of a query
#[derive(Debug, Clone)]
pub enum Script {
    /// Return these rows and counters
    Respond(QueryResult),
    /// Fail while running
    Fail(DriverError),
    /// Run successfully but refuse to commit
    FailCommit(QueryResult, DriverError),
}

#[derive(Debug, Default)]
struct GraphState {
    nodes: i64,
    relationships: i64,
    labels: i64,
    properties: i64,
    scripts: HashMap<String, Script>,
    session_error: Option<DriverError>,
    events: Vec<String>,
    params_seen: Vec<Params>,
    open_sessions: i64,
}

impl GraphState {
    fn apply(&mut self, counters: &Counters) {
        self.nodes += counters.nodes_created - counters.nodes_deleted;
        self.relationships += counters.relationships_created - counters.relationships_deleted;
        self.labels += counters.labels_added - counters.labels_removed;
        self.properties += counters.properties_set;
    }
}

/// Shared handle to the fake database
#[derive(Debug, Clone, Default)]
pub struct FakeGraph {
    state: Rc<RefCell<GraphState>>,
}

impl FakeGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer `query` with `script` from now on
    pub fn script(&self, query: &str, script: Script) {
        self.state
            .borrow_mut()
            .scripts
            .insert(query.to_string(), script);
    }

    /// Answer `query` with the given result
    pub fn respond(&self, query: &str, result: QueryResult) {
        self.script(query, Script::Respond(result));
    }

    /// Make `query` fail with a query error
    pub fn fail(&self, query: &str, message: &str) {
        self.script(query, Script::Fail(DriverError::Query(message.to_string())));
    }

    /// Make every session request fail
    pub fn refuse_sessions(&self, error: DriverError) {
        self.state.borrow_mut().session_error = Some(error);
    }

    pub fn nodes(&self) -> i64 {
        self.state.borrow().nodes
    }

    pub fn relationships(&self) -> i64 {
        self.state.borrow().relationships
    }

    pub fn labels(&self) -> i64 {
        self.state.borrow().labels
    }

    /// Everything the driver was asked to do, in order
    pub fn events(&self) -> Vec<String> {
        self.state.borrow().events.clone()
    }

    /// Parameters passed to each run, in order
    pub fn params_seen(&self) -> Vec<Params> {
        self.state.borrow().params_seen.clone()
    }

    /// Queries run so far, in order
    pub fn queries(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|event| event.strip_prefix("run: ").map(str::to_string))
            .collect()
    }

    /// Sessions opened but not yet closed
    pub fn open_sessions(&self) -> i64 {
        self.state.borrow().open_sessions
    }

    fn record(&self, event: impl Into<String>) {
        self.state.borrow_mut().events.push(event.into());
    }
}

impl Driver for FakeGraph {
    fn session(&self) -> Result<Box<dyn Session + '_>, DriverError> {
        if let Some(error) = self.state.borrow().session_error.clone() {
            return Err(error);
        }
        self.record("session");
        self.state.borrow_mut().open_sessions += 1;
        Ok(Box::new(FakeSession { graph: self }))
    }
}

struct FakeSession<'g> {
    graph: &'g FakeGraph,
}

impl Session for FakeSession<'_> {
    fn begin_transaction(&mut self) -> Result<Box<dyn Transaction + '_>, DriverError> {
        self.graph.record("begin");
        Ok(Box::new(FakeTransaction {
            graph: self.graph,
            pending: Vec::new(),
            commit_error: None,
        }))
    }

    fn close(&mut self) {
        self.graph.record("close");
        self.graph.state.borrow_mut().open_sessions -= 1;
    }
}

struct FakeTransaction<'g> {
    graph: &'g FakeGraph,
    pending: Vec<Counters>,
    commit_error: Option<DriverError>,
}

impl Transaction for FakeTransaction<'_> {
    fn run(&mut self, query: &str, params: &Params) -> Result<QueryResult, DriverError> {
        self.graph.record(format!("run: {}", query));
        self.graph
            .state
            .borrow_mut()
            .params_seen
            .push(params.clone());

        let script = self.graph.state.borrow().scripts.get(query).cloned();
        let result = match script {
            Some(Script::Fail(error)) => return Err(error),
            Some(Script::Respond(result)) => result,
            Some(Script::FailCommit(result, error)) => {
                self.commit_error = Some(error);
                result
            }
            None if query == CLEANUP_QUERY => {
                let state = self.graph.state.borrow();
                QueryResult::new().with_counters(Counters {
                    nodes_deleted: state.nodes,
                    relationships_deleted: state.relationships,
                    labels_removed: state.labels,
                    ..Default::default()
                })
            }
            None => QueryResult::new(),
        };

        self.pending.push(result.summary().counters);
        Ok(result)
    }

    fn commit(&mut self) -> Result<(), DriverError> {
        self.graph.record("commit");
        if let Some(error) = self.commit_error.take() {
            self.pending.clear();
            return Err(error);
        }
        let mut state = self.graph.state.borrow_mut();
        for counters in self.pending.drain(..) {
            state.apply(&counters);
        }
        Ok(())
    }

    fn rollback(&mut self) -> Result<(), DriverError> {
        self.graph.record("rollback");
        self.pending.clear();
        Ok(())
    }
}
