//! Per-call failure accumulation and the report handed back to callers.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::ValidationFailure;

/// Field key to failure message. Empty means the record is valid.
pub type ValidationReport = BTreeMap<String, String>;

/// Accumulates at most one failure per field key.
///
/// Recording a failure for a key replaces only that key's entry, so the
/// last failing rule of a field wins while other fields are untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorMap {
    failures: BTreeMap<String, ValidationFailure>,
}

impl ErrorMap {
    /// Create an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set or replace the failure for `key`.
    pub fn record(&mut self, key: impl Into<String>, failure: ValidationFailure) {
        self.failures.insert(key.into(), failure);
    }

    /// Failure recorded for `key`, if any.
    pub fn get(&self, key: &str) -> Option<&ValidationFailure> {
        self.failures.get(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.failures.contains_key(key)
    }

    /// Number of failing fields.
    pub fn len(&self) -> usize {
        self.failures.len()
    }

    /// Check if no field failed.
    pub fn is_empty(&self) -> bool {
        self.failures.is_empty()
    }

    /// Iterate over failing fields in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ValidationFailure)> {
        self.failures.iter().map(|(key, failure)| (key.as_str(), failure))
    }

    /// String view: field key to failure message.
    pub fn to_report(&self) -> ValidationReport {
        self.failures
            .iter()
            .map(|(key, failure)| (key.clone(), failure.to_string()))
            .collect()
    }

    pub fn into_failures(self) -> BTreeMap<String, ValidationFailure> {
        self.failures
    }
}

impl From<ErrorMap> for ValidationReport {
    fn from(map: ErrorMap) -> Self {
        map.to_report()
    }
}
