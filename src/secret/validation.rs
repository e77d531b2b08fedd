//! # Kubernetes Validation
//!
//! Validates Secret names, data keys, namespaces and labels before any
//! cluster access, so malformed input never reaches the API server.

use crate::constants::{
    MAX_DATA_KEY_LENGTH, MAX_LABEL_SEGMENT_LENGTH, MAX_NAMESPACE_LENGTH, MAX_RESOURCE_NAME_LENGTH,
};
use crate::secret::declaration::ParseError;
use regex::Regex;

const SUBDOMAIN_PATTERN: &str = r"^[a-z0-9]([-a-z0-9]*[a-z0-9])?(\.[a-z0-9]([-a-z0-9]*[a-z0-9])?)*$";
const DNS_LABEL_PATTERN: &str = r"^[a-z0-9]([-a-z0-9]*[a-z0-9])?$";
const DATA_KEY_PATTERN: &str = r"^[-._a-zA-Z0-9]+$";
const LABEL_SEGMENT_PATTERN: &str = r"^[A-Za-z0-9]([-A-Za-z0-9_.]*[A-Za-z0-9])?$";

fn invalid(field: &'static str, value: &str, reason: impl Into<String>) -> ParseError {
    ParseError::InvalidField {
        field,
        value: value.to_string(),
        reason: reason.into(),
    }
}

fn check_length(field: &'static str, value: &str, max: usize) -> Result<(), ParseError> {
    if value.is_empty() {
        return Err(invalid(field, value, "cannot be empty"));
    }
    if value.len() > max {
        return Err(invalid(
            field,
            value,
            format!("exceeds maximum length of {max} characters (got {})", value.len()),
        ));
    }
    Ok(())
}

fn check_pattern(
    field: &'static str,
    value: &str,
    pattern: &str,
    reason: &str,
) -> Result<(), ParseError> {
    if Regex::new(pattern)?.is_match(value) {
        Ok(())
    } else {
        Err(invalid(field, value, reason))
    }
}

/// Validate a Secret name (RFC 1123 subdomain)
/// Lowercase alphanumeric, hyphens, dots; cannot start/end with hyphen or dot
pub fn validate_resource_name(name: &str) -> Result<(), ParseError> {
    check_length("secret name", name, MAX_RESOURCE_NAME_LENGTH)?;
    check_pattern(
        "secret name",
        name,
        SUBDOMAIN_PATTERN,
        "must be a valid Kubernetes name (lowercase alphanumeric, hyphens, dots; cannot start/end with hyphen or dot)",
    )
}

/// Validate a key of a Secret's `data` map
pub fn validate_data_key(key: &str) -> Result<(), ParseError> {
    check_length("secret key", key, MAX_DATA_KEY_LENGTH)?;
    check_pattern(
        "secret key",
        key,
        DATA_KEY_PATTERN,
        "must contain only alphanumeric characters, '-', '_' or '.'",
    )
}

/// Validate a namespace (RFC 1123 label)
pub fn validate_namespace(namespace: &str) -> Result<(), ParseError> {
    check_length("namespace", namespace, MAX_NAMESPACE_LENGTH)?;
    check_pattern(
        "namespace",
        namespace,
        DNS_LABEL_PATTERN,
        "must be a valid Kubernetes namespace (lowercase alphanumeric, hyphens; cannot start/end with hyphen)",
    )
}

/// Validate a label key: optional `prefix/` (RFC 1123 subdomain) plus a name segment
pub fn validate_label_key(key: &str) -> Result<(), ParseError> {
    let name = match key.split_once('/') {
        Some((prefix, name)) => {
            check_length("label key prefix", prefix, MAX_RESOURCE_NAME_LENGTH)?;
            check_pattern(
                "label key prefix",
                prefix,
                SUBDOMAIN_PATTERN,
                "must be a valid DNS subdomain",
            )?;
            name
        }
        None => key,
    };
    check_length("label key", name, MAX_LABEL_SEGMENT_LENGTH)?;
    check_pattern(
        "label key",
        name,
        LABEL_SEGMENT_PATTERN,
        "must be alphanumeric with '-', '_' or '.' inside",
    )
}

/// Validate a label value; empty values are allowed by Kubernetes
pub fn validate_label_value(value: &str) -> Result<(), ParseError> {
    if value.is_empty() {
        return Ok(());
    }
    check_length("label value", value, MAX_LABEL_SEGMENT_LENGTH)?;
    check_pattern(
        "label value",
        value,
        LABEL_SEGMENT_PATTERN,
        "must be alphanumeric with '-', '_' or '.' inside",
    )
}
