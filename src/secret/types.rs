//! # Secret Types
//!
//! The closed set of material shapes a declaration can ask for.

use crate::secret::declaration::ParseError;
use std::fmt;
use std::str::FromStr;

/// Which generation algorithm produces a data entry's bytes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SecretType {
    /// 32 characters from `[a-zA-Z0-9]`
    Rand32,
    /// Synapse-style Ed25519 signing key line
    SigningKey,
    /// 32 random bytes, lowercase hex encoded (64 characters)
    Hex32,
    /// PKCS#8 DER of a 4096-bit RSA private key
    Rsa4096,
    /// PKCS#8 DER of a NIST P-256 private key
    EcdsaPrime256v1,
}

impl SecretType {
    /// Every variant, in the order they are documented to users
    pub const ALL: [SecretType; 5] = [
        SecretType::Rand32,
        SecretType::SigningKey,
        SecretType::Hex32,
        SecretType::Rsa4096,
        SecretType::EcdsaPrime256v1,
    ];

    /// Tag used on the command line
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            SecretType::Rand32 => "rand32",
            SecretType::SigningKey => "signingkey",
            SecretType::Hex32 => "hex32",
            SecretType::Rsa4096 => "rsa4096",
            SecretType::EcdsaPrime256v1 => "ecdsaprime256v1",
        }
    }
}

impl fmt::Display for SecretType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SecretType {
    type Err = ParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        SecretType::ALL
            .into_iter()
            .find(|secret_type| secret_type.as_str() == value)
            .ok_or_else(|| ParseError::UnknownSecretType(value.to_string()))
    }
}
