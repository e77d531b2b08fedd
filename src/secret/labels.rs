//! # Labels
//!
//! Parsing of caller labels and the ownership marker every managed Secret carries.

use crate::constants::{MANAGED_BY_LABEL, MANAGED_BY_VALUE};
use crate::secret::declaration::ParseError;
use crate::secret::validation::{validate_label_key, validate_label_value};
use std::collections::BTreeMap;

/// Parse `key=value,key=value`; an empty string yields no labels
pub fn parse_labels(value: &str) -> Result<BTreeMap<String, String>, ParseError> {
    let mut labels = BTreeMap::new();
    if value.is_empty() {
        return Ok(labels);
    }
    for label in value.split(',') {
        let (key, value) = label
            .split_once('=')
            .ok_or_else(|| ParseError::InvalidLabel(label.to_string()))?;
        validate_label_key(key)?;
        validate_label_value(value)?;
        labels.insert(key.to_string(), value.to_string());
    }
    Ok(labels)
}

/// Whether a label set carries this tool's ownership marker with the exact value
#[must_use]
pub fn is_managed(labels: &BTreeMap<String, String>) -> bool {
    labels.get(MANAGED_BY_LABEL).map(String::as_str) == Some(MANAGED_BY_VALUE)
}

/// Label set applied to every managed Secret
///
/// Always contains `app.kubernetes.io/managed-by=matrix-tools-init-secrets`;
/// the marker overrides whatever the caller supplied for that key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManagedLabels(BTreeMap<String, String>);

impl ManagedLabels {
    #[must_use]
    pub fn new(mut labels: BTreeMap<String, String>) -> Self {
        labels.insert(MANAGED_BY_LABEL.to_string(), MANAGED_BY_VALUE.to_string());
        Self(labels)
    }

    #[must_use]
    pub fn as_map(&self) -> &BTreeMap<String, String> {
        &self.0
    }
}
