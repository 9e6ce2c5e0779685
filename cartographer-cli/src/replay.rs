//! A driver that answers every statement with rows loaded from a file.

use anyhow::{Context, bail};
use cartographer::{AccessMode, GraphDriver, GraphSession, Params, Record, TransportError, Value};
use std::path::Path;
use tracing::debug;

/// Replays a fixed result set, regardless of the statement.
#[derive(Debug, Clone, Default)]
pub struct ReplayDriver {
    rows: Vec<Record>,
}

impl ReplayDriver {
    pub fn new(rows: Vec<Record>) -> Self {
        Self { rows }
    }

    /// Loads rows from a JSON array. Each row is an array of column values;
    /// any other value is a single-column row.
    pub fn from_path(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read records file {}", path.display()))?;
        Self::from_json(&raw).with_context(|| format!("invalid records file {}", path.display()))
    }

    pub fn from_json(raw: &str) -> anyhow::Result<Self> {
        let Value::List(rows) = serde_json::from_str::<Value>(raw)? else {
            bail!("records must be a JSON array of rows");
        };
        let rows = rows
            .into_iter()
            .map(|row| match row {
                Value::List(columns) => Record::from_values(columns),
                other => Record::from_values([other]),
            })
            .collect();
        Ok(Self::new(rows))
    }

    pub fn rows(&self) -> &[Record] {
        &self.rows
    }
}

#[derive(Debug)]
pub struct ReplaySession {
    rows: Vec<Record>,
}

impl GraphDriver for ReplayDriver {
    type Session = ReplaySession;

    fn session(&self, mode: AccessMode) -> Result<Self::Session, TransportError> {
        if mode != AccessMode::Read {
            return Err(TransportError::Session("replay sessions are read-only".into()));
        }
        Ok(ReplaySession {
            rows: self.rows.clone(),
        })
    }
}

impl GraphSession for ReplaySession {
    fn run(&mut self, statement: &str, params: &Params) -> Result<Vec<Record>, TransportError> {
        debug!(statement, params = params.len(), rows = self.rows.len(), "replaying");
        Ok(std::mem::take(&mut self.rows))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn rows_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"[[{{"id": "a", "name": "Aceh"}}, null], "bare"]"#).unwrap();

        let driver = ReplayDriver::from_path(file.path()).unwrap();
        assert_eq!(driver.rows().len(), 2);
        assert_eq!(driver.rows()[0].len(), 2);
        assert_eq!(driver.rows()[1].get(0), Some(&Value::from("bare")));
    }

    #[test]
    fn object_is_not_a_row_list() {
        assert!(ReplayDriver::from_json(r#"{"value": 1}"#).is_err());
    }

    #[test]
    fn missing_file_names_the_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.json");
        let err = ReplayDriver::from_path(&path).unwrap_err();
        assert!(err.to_string().contains("absent.json"));
    }

    #[test]
    fn write_sessions_are_refused() {
        let driver = ReplayDriver::default();
        assert!(driver.session(AccessMode::Write).is_err());
        let mut session = driver.session(AccessMode::Read).unwrap();
        assert!(session.run("RETURN 1", &Params::new()).unwrap().is_empty());
    }
}
