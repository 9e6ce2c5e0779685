//! The query model: one root node selector plus filters, one-hop relations,
//! orderings and pagination.

use cartographer_api::Value;
use serde::{Deserialize, Serialize};

/// How a filter compares a node property with its value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Condition {
    Equal,
    In,
}

impl Condition {
    /// Parses a condition name. Unknown names compare by equality.
    pub fn parse(name: &str) -> Self {
        match name {
            "In" => Condition::In,
            _ => Condition::Equal,
        }
    }
}

impl From<&str> for Condition {
    fn from(name: &str) -> Self {
        Condition::parse(name)
    }
}

/// Sort direction of an [`Ordering`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Ascending,
    Descending,
}

impl Direction {
    /// Fallback for unrecognized direction names.
    pub const DEFAULT: Direction = Direction::Descending;

    /// Parses a direction name, normalizing anything unrecognized to
    /// [`Direction::DEFAULT`].
    pub fn parse(name: &str) -> Self {
        match name {
            "Ascending" => Direction::Ascending,
            "Descending" => Direction::Descending,
            _ => Self::DEFAULT,
        }
    }

    pub fn keyword(self) -> &'static str {
        match self {
            Direction::Ascending => "ASC",
            Direction::Descending => "DESC",
        }
    }
}

impl From<&str> for Direction {
    fn from(name: &str) -> Self {
        Direction::parse(name)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Filter {
    pub field: String,
    pub condition: Condition,
    pub value: Value,
}

impl Filter {
    pub fn new(field: impl Into<String>, condition: Condition, value: impl Into<Value>) -> Self {
        Self {
            field: field.into(),
            condition,
            value: value.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ordering {
    pub field: String,
    pub direction: Direction,
}

impl Ordering {
    pub fn new(field: impl Into<String>, direction: impl Into<Direction>) -> Self {
        Self {
            field: field.into(),
            direction: direction.into(),
        }
    }
}

/// A declarative description of what to fetch.
///
/// Mutators accumulate: each call appends, except [`Query::slice`] which
/// overwrites both pagination fields. They return `&mut Self` for chaining.
///
/// Relations are one hop from the root. Nested queries carry their own
/// filters; relations attached to a nested query are not compiled.
///
/// # Example
///
/// ```
/// use cartographer_query::{Condition, Direction, Query};
///
/// let mut currency = Query::new("Currency");
/// currency.filter("id", Condition::In, "e81f");
///
/// let mut query = Query::new("Country");
/// query
///     .filter("dialCode", Condition::Equal, "1")
///     .outgoing(currency)
///     .ordering("name", Direction::Ascending)
///     .slice(0, 25);
/// assert_eq!(query.alias(), "country");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Query {
    node: String,
    filters: Vec<Filter>,
    incomings: Vec<Query>,
    outgoings: Vec<Query>,
    orderings: Vec<Ordering>,
    offset: u64,
    limit: u64,
}

impl Query {
    pub fn new(node: impl Into<String>) -> Self {
        Self {
            node: node.into(),
            filters: Vec::new(),
            incomings: Vec::new(),
            outgoings: Vec::new(),
            orderings: Vec::new(),
            offset: 0,
            limit: 0,
        }
    }

    /// Appends a filter on this query's own node.
    ///
    /// `field` is not checked against any schema.
    pub fn filter(
        &mut self,
        field: impl Into<String>,
        condition: Condition,
        value: impl Into<Value>,
    ) -> &mut Self {
        self.filters.push(Filter::new(field, condition, value));
        self
    }

    /// Attaches a node reached by an edge pointing *into* the root.
    pub fn incoming(&mut self, related: Query) -> &mut Self {
        self.incomings.push(related);
        self
    }

    /// Attaches a node reached by an edge pointing *out of* the root.
    pub fn outgoing(&mut self, related: Query) -> &mut Self {
        self.outgoings.push(related);
        self
    }

    pub fn ordering(&mut self, field: impl Into<String>, direction: impl Into<Direction>) -> &mut Self {
        self.orderings.push(Ordering::new(field, direction));
        self
    }

    /// Sets pagination. Zero means "no clause".
    pub fn slice(&mut self, offset: u64, limit: u64) -> &mut Self {
        self.offset = offset;
        self.limit = limit;
        self
    }

    pub fn node(&self) -> &str {
        &self.node
    }

    /// Variable name bound to this query's node in a compiled statement.
    pub fn alias(&self) -> String {
        self.node.to_lowercase()
    }

    pub fn filters(&self) -> &[Filter] {
        &self.filters
    }

    pub fn incomings(&self) -> &[Query] {
        &self.incomings
    }

    pub fn outgoings(&self) -> &[Query] {
        &self.outgoings
    }

    pub fn orderings(&self) -> &[Ordering] {
        &self.orderings
    }

    pub fn offset(&self) -> u64 {
        self.offset
    }

    pub fn limit(&self) -> u64 {
        self.limit
    }
}
