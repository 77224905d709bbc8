//! Translate raw list-endpoint query parameters into typed filters.
//!
//! [`build_filter`] strips the reserved paging/shaping keys and every blank
//! value; [`FilterParams`] then hands out typed values one key at a time and
//! rejects whatever is left over, so an unsupported filter is an error rather
//! than a silently ignored typo.

use std::collections::{BTreeMap, HashMap};
use std::str::FromStr;

use crate::error::CoreError;
use crate::types::DocId;

/// Keys that steer paging or projection and are never store filters.
pub const RESERVED_KEYS: &[&str] = &["page", "limit", "sort", "select", "populate"];

/// Drop reserved keys and empty values.
pub fn build_filter(params: &HashMap<String, String>) -> BTreeMap<String, String> {
    params
        .iter()
        .filter(|(key, _)| !RESERVED_KEYS.contains(&key.as_str()))
        .filter(|(_, value)| !value.trim().is_empty())
        .map(|(key, value)| (key.clone(), value.trim().to_string()))
        .collect()
}

/// Remaining filter values, consumed key by key.
#[derive(Debug, Default)]
pub struct FilterParams {
    values: BTreeMap<String, String>,
}

impl FilterParams {
    pub fn from_query(params: &HashMap<String, String>) -> Self {
        Self {
            values: build_filter(params),
        }
    }

    /// Take a free-text value.
    pub fn text(&mut self, key: &str) -> Option<String> {
        self.values.remove(key)
    }

    /// Take and parse a value (enums, numbers).
    pub fn parse<T>(&mut self, key: &str) -> Result<Option<T>, CoreError>
    where
        T: FromStr,
        T::Err: std::fmt::Display,
    {
        self.values
            .remove(key)
            .map(|raw| {
                raw.parse::<T>().map_err(|e| {
                    CoreError::Validation(format!("Invalid value for filter '{key}': {e}"))
                })
            })
            .transpose()
    }

    /// Take an id-valued filter.
    pub fn id(&mut self, key: &str) -> Result<Option<DocId>, CoreError> {
        self.parse::<DocId>(key)
    }

    /// Fail if any key was not consumed.
    pub fn finish(self) -> Result<(), CoreError> {
        match self.values.keys().next() {
            Some(key) => Err(CoreError::Validation(format!("Unknown filter '{key}'"))),
            None => Ok(()),
        }
    }
}
