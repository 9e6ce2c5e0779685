//! Store boundary for Cartographer.
//!
//! Everything above this crate talks to the graph store through
//! [`GraphDriver`] and [`GraphSession`]; the concrete driver (connection
//! pooling, wire protocol, the tree-materialization procedure) lives behind
//! these traits.

mod error;
mod value;

pub use error::TransportError;
pub use value::{Params, Value};

/// Consistency mode a session is bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AccessMode {
    Read,
    Write,
}

/// One row returned by the store.
///
/// Columns keep the order the statement's `RETURN` produced them in.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record {
    columns: Vec<(String, Value)>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a record whose columns are named by position (`"0"`, `"1"`, ...).
    pub fn from_values(values: impl IntoIterator<Item = Value>) -> Self {
        Self {
            columns: values
                .into_iter()
                .enumerate()
                .map(|(i, v)| (i.to_string(), v))
                .collect(),
        }
    }

    pub fn with(mut self, name: impl Into<String>, value: Value) -> Self {
        self.columns.push((name.into(), value));
        self
    }

    /// Returns the value at `index`, in `RETURN` order.
    pub fn get(&self, index: usize) -> Option<&Value> {
        self.columns.get(index).map(|(_, v)| v)
    }

    pub fn get_by_name(&self, name: &str) -> Option<&Value> {
        self.columns
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v)
    }

    pub fn columns(&self) -> &[(String, Value)] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Consumes the record and returns the value at `index`.
    pub fn into_value(self, index: usize) -> Option<Value> {
        self.columns.into_iter().nth(index).map(|(_, v)| v)
    }
}

/// An owned handle to a graph store.
///
/// Constructed explicitly by the process and passed to whoever needs it;
/// there is no global driver.
pub trait GraphDriver {
    type Session: GraphSession;

    /// Opens a session bound to `mode`.
    ///
    /// The session is closed when dropped.
    fn session(&self, mode: AccessMode) -> Result<Self::Session, TransportError>;
}

/// A session able to run one statement at a time.
pub trait GraphSession {
    /// Runs `statement` with `params` bound and collects every returned row.
    fn run(&mut self, statement: &str, params: &Params) -> Result<Vec<Record>, TransportError>;
}

impl<D: GraphDriver + ?Sized> GraphDriver for &D {
    type Session = D::Session;

    fn session(&self, mode: AccessMode) -> Result<Self::Session, TransportError> {
        (**self).session(mode)
    }
}
