//! Turns raw store payloads into typed result trees.
//!
//! The payload is an untyped nested tree whose shape mirrors the domain
//! types field for field. It is serialized to JSON and deserialized into
//! the target type, so no per-entity mapper is needed.

use crate::domain::Identified;
use crate::error::{Error, Result};
use cartographer_api::{Record, Value};
use serde::de::DeserializeOwned;

/// Converts one raw value into `T`.
pub fn hydrate<T: DeserializeOwned>(raw: &Value) -> Result<T> {
    let json = serde_json::to_value(raw)?;
    Ok(serde_json::from_value(json)?)
}

/// Hydrates the first column of the only record.
///
/// Zero records is [`Error::NotFound`]; more than one is [`Error::Ambiguous`].
pub fn single<T: DeserializeOwned>(records: Vec<Record>) -> Result<T> {
    let mut records = records.into_iter();
    let record = records.next().ok_or(Error::NotFound)?;
    if records.next().is_some() {
        return Err(Error::Ambiguous);
    }
    hydrate(record.get(0).unwrap_or(&Value::Null))
}

/// Hydrates the list held in the first column of the first record.
///
/// The store answers "no match" with one empty placeholder tree, so a
/// single element with an empty id is returned as an empty list.
pub fn collection<T: DeserializeOwned + Identified>(records: Vec<Record>) -> Result<Vec<T>> {
    let Some(raw) = records.into_iter().next().and_then(|r| r.into_value(0)) else {
        return Ok(Vec::new());
    };
    if raw.is_null() {
        return Ok(Vec::new());
    }

    let items: Vec<T> = hydrate(&raw)?;
    if let [only] = items.as_slice()
        && only.id().is_empty()
    {
        return Ok(Vec::new());
    }
    Ok(items)
}
