use crate::domain::Identified;
use crate::error::Result;
use crate::hydrate;
use cartographer_api::{AccessMode, GraphDriver, GraphSession, Record};
use cartographer_query::{Lookup, Query, Statement};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

/// Read-only access to the graph store.
///
/// Owns the driver handle; every call opens its own read session and drops
/// it before returning. Failures are logged below `error`; callers decide
/// whether a failure is worth reporting.
#[derive(Debug)]
pub struct Repository<D> {
    driver: D,
}

impl<D: GraphDriver> Repository<D> {
    pub fn new(driver: D) -> Self {
        Self { driver }
    }

    pub fn driver(&self) -> &D {
        &self.driver
    }

    /// Point lookup: exactly one root must match.
    pub fn find<T: DeserializeOwned>(&self, query: &Query) -> Result<T> {
        let records = self.run(Lookup::Point, query)?;
        hydrate::single(records).inspect_err(|err| {
            debug!(node = query.node(), error = %err, "point lookup did not resolve");
        })
    }

    /// Collection lookup: zero or more roots, ordered and paginated.
    pub fn find_all<T: DeserializeOwned + Identified>(&self, query: &Query) -> Result<Vec<T>> {
        let records = self.run(Lookup::Collection, query)?;
        hydrate::collection(records).inspect_err(|err| {
            debug!(node = query.node(), error = %err, "failed parse result to struct");
        })
    }

    fn run(&self, lookup: Lookup, query: &Query) -> Result<Vec<Record>> {
        let mut session = self.driver.session(AccessMode::Read).inspect_err(|err| {
            warn!(node = query.node(), error = %err, "failed create new session");
        })?;

        let statement = Statement::render(lookup, query);
        debug!(
            node = query.node(),
            ?lookup,
            statement = %statement,
            params = statement.params.len(),
            "running statement"
        );

        let records = session
            .run(&statement.text, &statement.params)
            .inspect_err(|err| {
                warn!(node = query.node(), error = %err, "failed run action to storage");
            })?;
        Ok(records)
    }
}
