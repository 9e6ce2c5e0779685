//! Query model and Cypher compiler for Cartographer.
//!
//! A [`Query`] describes a root node, its filters, one-hop relations,
//! orderings and pagination. [`compile`] turns it into clause fragments and
//! bound [`Params`]; [`Statement::render`] wraps those into the full
//! statement for a point or collection lookup.

pub mod compiler;
pub mod model;
pub mod statement;

pub use cartographer_api::{Params, Value};
pub use compiler::{CompiledQuery, compile};
pub use model::{Condition, Direction, Filter, Ordering, Query};
pub use statement::{Lookup, Statement, TREE_PROCEDURE};
