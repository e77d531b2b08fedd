//! # Secret Material Generator
//!
//! Produces fresh key material for a [`SecretType`]. Every function here only
//! consumes entropy from the operating system; nothing touches the cluster.
//!
//! | Type | Output |
//! |---|---|
//! | `rand32` | 32 characters from `[a-zA-Z0-9]` |
//! | `hex32` | 64 lowercase hex characters (32 random bytes) |
//! | `signingkey` | `ed25519 a_XXXX <unpadded base64 seed>` |
//! | `rsa4096` | PKCS#8 DER, 4096-bit RSA |
//! | `ecdsaprime256v1` | PKCS#8 DER, NIST P-256 |

use crate::constants::{
    ALPHANUMERIC_CHARSET, HEX32_RAW_BYTES, RAND32_LENGTH, RSA_KEY_BITS, SIGNING_KEY_ALGORITHM,
    SIGNING_KEY_ID_PREFIX, SIGNING_KEY_ID_RANDOM_LENGTH,
};
use crate::secret::private_keys::{generate_ecdsa_prime256v1_der, generate_rsa_der};
use crate::secret::types::SecretType;
use base64::engine::general_purpose::STANDARD_NO_PAD;
use base64::Engine as _;
use ed25519_dalek::{SigningKey, SECRET_KEY_LENGTH};
use rand::rngs::OsRng;
use rand::RngCore;
use thiserror::Error;
use zeroize::Zeroizing;

/// Material for a secret type could not be produced; no partial output exists
#[derive(Debug, Error)]
#[error("failed to generate {secret_type} secret: {cause}")]
pub struct GenerationError {
    pub secret_type: SecretType,
    #[source]
    pub cause: GenerationCause,
}

/// Underlying reason a generation attempt failed
#[derive(Debug, Error)]
pub enum GenerationCause {
    #[error("secure random source failed: {0}")]
    Entropy(#[from] rand::Error),
    #[error("RSA key generation failed: {0}")]
    Rsa(#[from] rsa::Error),
    #[error("PKCS#8 encoding failed: {0}")]
    Pkcs8(#[from] rsa::pkcs8::Error),
    #[error("generation task did not complete: {0}")]
    Aborted(String),
}

/// Source of secret material, one call per missing data key
///
/// The reconciler is generic over this so tests can observe and control generation.
pub trait MaterialGenerator: Send + Sync {
    fn generate(&self, secret_type: SecretType) -> Result<Vec<u8>, GenerationError>;
}

/// Generator backed by the operating system CSPRNG
#[derive(Debug, Default, Clone, Copy)]
pub struct SecretGenerator;

impl MaterialGenerator for SecretGenerator {
    fn generate(&self, secret_type: SecretType) -> Result<Vec<u8>, GenerationError> {
        generate(secret_type)
    }
}

/// Produce material of the shape `secret_type` requires
pub fn generate(secret_type: SecretType) -> Result<Vec<u8>, GenerationError> {
    let material = match secret_type {
        SecretType::Rand32 => random_alphanumeric(RAND32_LENGTH),
        SecretType::Hex32 => random_hex(HEX32_RAW_BYTES),
        SecretType::SigningKey => signing_key().map(String::into_bytes),
        SecretType::Rsa4096 => generate_rsa_der(RSA_KEY_BITS),
        SecretType::EcdsaPrime256v1 => generate_ecdsa_prime256v1_der(),
    };
    material.map_err(|cause| GenerationError { secret_type, cause })
}

/// `len` characters drawn uniformly from [`ALPHANUMERIC_CHARSET`]
///
/// Random bytes at or above the largest multiple of the alphabet size are
/// discarded, so the modulo never favours the first symbols.
pub fn random_alphanumeric(len: usize) -> Result<Vec<u8>, GenerationCause> {
    let alphabet = ALPHANUMERIC_CHARSET.len();
    let limit = 256 - (256 % alphabet);

    let mut output = Vec::with_capacity(len);
    let mut buffer = Zeroizing::new([0u8; 64]);
    while output.len() < len {
        OsRng.try_fill_bytes(buffer.as_mut_slice())?;
        for &byte in buffer.iter() {
            let value = usize::from(byte);
            if value >= limit {
                continue;
            }
            output.push(ALPHANUMERIC_CHARSET[value % alphabet]);
            if output.len() == len {
                break;
            }
        }
    }
    Ok(output)
}

/// `raw_len` random bytes, lowercase hex encoded
pub fn random_hex(raw_len: usize) -> Result<Vec<u8>, GenerationCause> {
    let mut raw = Zeroizing::new(vec![0u8; raw_len]);
    OsRng.try_fill_bytes(raw.as_mut_slice())?;
    Ok(hex::encode(raw.as_slice()).into_bytes())
}

/// Ed25519 signing key in the homeserver's on-disk format
pub fn signing_key() -> Result<String, GenerationCause> {
    let mut seed = Zeroizing::new([0u8; SECRET_KEY_LENGTH]);
    OsRng.try_fill_bytes(seed.as_mut_slice())?;
    let key = SigningKey::from_bytes(&seed);

    let key_id: String = random_alphanumeric(SIGNING_KEY_ID_RANDOM_LENGTH)?
        .into_iter()
        .map(char::from)
        .collect();

    Ok(format!(
        "{SIGNING_KEY_ALGORITHM} {SIGNING_KEY_ID_PREFIX}{key_id} {}",
        STANDARD_NO_PAD.encode(key.as_bytes())
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rand32_shape() {
        let value = generate(SecretType::Rand32).unwrap();
        assert_eq!(value.len(), 32);
        assert!(value.iter().all(u8::is_ascii_alphanumeric));
    }

    #[test]
    fn test_random_alphanumeric_covers_alphabet_classes() {
        let sample = random_alphanumeric(4096).unwrap();
        assert!(sample.iter().any(u8::is_ascii_lowercase));
        assert!(sample.iter().any(u8::is_ascii_uppercase));
        assert!(sample.iter().any(u8::is_ascii_digit));
    }

    #[test]
    fn test_random_alphanumeric_zero_length() {
        assert!(random_alphanumeric(0).unwrap().is_empty());
    }

    #[test]
    fn test_hex32_shape() {
        let value = generate(SecretType::Hex32).unwrap();
        assert_eq!(value.len(), 64);
        assert!(value
            .iter()
            .all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(b)));
        assert_eq!(hex::decode(&value).unwrap().len(), 32);
    }

    #[test]
    fn test_signing_key_format() {
        let line = signing_key().unwrap();
        let parts: Vec<&str> = line.split(' ').collect();
        assert_eq!(parts.len(), 3);
        assert_eq!(parts[0], "ed25519");
        assert!(parts[1].starts_with("a_"));
        assert_eq!(parts[1].len(), 6);
        assert!(!parts[2].ends_with('='));
        let seed = STANDARD_NO_PAD.decode(parts[2]).unwrap();
        assert_eq!(seed.len(), SECRET_KEY_LENGTH);
    }

    #[test]
    fn test_consecutive_values_differ() {
        assert_ne!(
            generate(SecretType::Rand32).unwrap(),
            generate(SecretType::Rand32).unwrap()
        );
        assert_ne!(
            generate(SecretType::Hex32).unwrap(),
            generate(SecretType::Hex32).unwrap()
        );
    }

    #[test]
    fn test_generation_error_names_type() {
        let err = GenerationError {
            secret_type: SecretType::Rsa4096,
            cause: GenerationCause::Aborted("cancelled".to_string()),
        };
        assert_eq!(
            err.to_string(),
            "failed to generate rsa4096 secret: generation task did not complete: cancelled"
        );
    }
}
