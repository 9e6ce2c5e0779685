#![allow(dead_code)]

use cartographer::{AccessMode, GraphDriver, GraphSession, Params, Record, TransportError, Value};
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

/// Statements a fake session has been asked to run.
pub type Log = Arc<Mutex<Vec<(AccessMode, String, Params)>>>;

/// Driver answering every statement with the same scripted response.
#[derive(Debug, Clone)]
pub struct FakeDriver {
    pub session_error: Option<TransportError>,
    pub response: Result<Vec<Record>, TransportError>,
    pub log: Log,
}

impl FakeDriver {
    pub fn returning(records: Vec<Record>) -> Self {
        Self {
            session_error: None,
            response: Ok(records),
            log: Log::default(),
        }
    }

    pub fn failing_run(err: TransportError) -> Self {
        Self {
            session_error: None,
            response: Err(err),
            log: Log::default(),
        }
    }

    pub fn failing_session(err: TransportError) -> Self {
        Self {
            session_error: Some(err),
            response: Ok(Vec::new()),
            log: Log::default(),
        }
    }

    pub fn statements(&self) -> Vec<(AccessMode, String, Params)> {
        self.log.lock().unwrap().clone()
    }
}

#[derive(Debug)]
pub struct FakeSession {
    mode: AccessMode,
    response: Result<Vec<Record>, TransportError>,
    log: Log,
}

impl GraphDriver for FakeDriver {
    type Session = FakeSession;

    fn session(&self, mode: AccessMode) -> Result<Self::Session, TransportError> {
        if let Some(err) = &self.session_error {
            return Err(err.clone());
        }
        Ok(FakeSession {
            mode,
            response: self.response.clone(),
            log: Arc::clone(&self.log),
        })
    }
}

impl GraphSession for FakeSession {
    fn run(&mut self, statement: &str, params: &Params) -> Result<Vec<Record>, TransportError> {
        self.log
            .lock()
            .unwrap()
            .push((self.mode, statement.to_string(), params.clone()));
        self.response.clone()
    }
}

pub fn tree(pairs: Vec<(&str, Value)>) -> Value {
    Value::Map(
        pairs
            .into_iter()
            .map(|(k, v)| (k.to_string(), v))
            .collect::<BTreeMap<_, _>>(),
    )
}

/// Rows shaped like a point lookup: `RETURN value, node`.
pub fn point_rows(values: Vec<Value>) -> Vec<Record> {
    values
        .into_iter()
        .map(|v| Record::new().with("value", v).with("node", Value::Null))
        .collect()
}

/// The single row a collection lookup returns: `RETURN COLLECT(value) AS value`.
pub fn collection_row(items: Vec<Value>) -> Vec<Record> {
    vec![Record::new().with("value", Value::List(items))]
}
