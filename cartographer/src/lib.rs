//! # Cartographer
//!
//! Hierarchical lookups over a graph store: a country with its currencies
//! and provinces, or every city under a province, ordered and paginated.
//!
//! ```rust,ignore
//! use cartographer::{Args, Repository, Resolver};
//!
//! let resolver = Resolver::new(Repository::new(driver));
//! let mut args = Args::new();
//! args.insert("ISO3166Alpha2".into(), "ID".into());
//! let country = resolver.country(&args)?;
//! ```
//!
//! ## Layers
//!
//! - **[`query`]**: the query model and its Cypher compiler (re-exported
//!   from `cartographer-query`).
//! - **[`Repository`]**: renders a statement, runs it in a read session on
//!   the [`GraphDriver`], and hydrates the rows.
//! - **[`hydrate`]**: payload-to-type conversion with the point/collection
//!   multiplicity rules.
//! - **[`resolve`]**: caller arguments to queries, and field dispatch.

pub mod config;
pub mod domain;
mod error;
pub mod hydrate;
mod repository;
pub mod resolve;

pub use cartographer_api::{
    AccessMode, GraphDriver, GraphSession, Params, Record, TransportError, Value,
};
pub use cartographer_query as query;
pub use config::Config;
pub use domain::{Country, Currency, Flag, Identified, Region, Regions, Size};
pub use error::{ERROR_RECORD_MORE_THAN_ONE, ERROR_RECORD_NOT_FOUND, Error, ErrorKind, Result};
pub use repository::Repository;
pub use resolve::{Args, Field, Relations, Resolver};
