//! # Secret Declarations
//!
//! Parsing of `name:key:type` declarations into validated [`SecretDeclaration`]s.
//! Everything here runs before the Kubernetes client is created.

use crate::secret::types::SecretType;
use crate::secret::validation::{validate_data_key, validate_resource_name};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Malformed declaration or label input
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("invalid generated secret format, expect <name:key:type:...>: {0}")]
    InvalidDeclaration(String),
    #[error("unknown secret type: {0}")]
    UnknownSecretType(String),
    #[error("invalid secret type in {argument}: unknown secret type: {tag}")]
    InvalidSecretType { argument: String, tag: String },
    #[error("invalid label format, expect <key=value>: {0}")]
    InvalidLabel(String),
    #[error("{field} '{value}' {reason}")]
    InvalidField {
        field: &'static str,
        value: String,
        reason: String,
    },
    #[error("failed to compile validation pattern: {0}")]
    Pattern(#[from] regex::Error),
}

/// One `(Secret name, data key, secret type)` request
///
/// Construction validates the name and key, so a declaration that exists is
/// always safe to send to the API server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SecretDeclaration {
    resource_name: String,
    data_key: String,
    secret_type: SecretType,
}

impl SecretDeclaration {
    pub fn new(
        resource_name: impl Into<String>,
        data_key: impl Into<String>,
        secret_type: SecretType,
    ) -> Result<Self, ParseError> {
        let resource_name = resource_name.into();
        let data_key = data_key.into();
        validate_resource_name(&resource_name)?;
        validate_data_key(&data_key)?;
        Ok(Self {
            resource_name,
            data_key,
            secret_type,
        })
    }

    #[must_use]
    pub fn resource_name(&self) -> &str {
        &self.resource_name
    }

    #[must_use]
    pub fn data_key(&self) -> &str {
        &self.data_key
    }

    #[must_use]
    pub fn secret_type(&self) -> SecretType {
        self.secret_type
    }
}

impl fmt::Display for SecretDeclaration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}:{}",
            self.resource_name, self.data_key, self.secret_type
        )
    }
}

impl FromStr for SecretDeclaration {
    type Err = ParseError;

    /// Parse `name:key:type`; any fields after the type are ignored
    fn from_str(argument: &str) -> Result<Self, Self::Err> {
        let fields: Vec<&str> = argument.split(':').collect();
        let [name, key, tag, ..] = fields.as_slice() else {
            return Err(ParseError::InvalidDeclaration(argument.to_string()));
        };
        let secret_type = tag
            .parse::<SecretType>()
            .map_err(|_unknown| ParseError::InvalidSecretType {
                argument: argument.to_string(),
                tag: (*tag).to_string(),
            })?;
        SecretDeclaration::new(*name, *key, secret_type)
    }
}

/// Parse a comma-separated list of declarations, preserving order
///
/// An empty list is rejected: it splits into a single empty declaration.
pub fn parse_declarations(value: &str) -> Result<Vec<SecretDeclaration>, ParseError> {
    value.split(',').map(str::parse::<SecretDeclaration>).collect()
}
