//! # Private Keys
//!
//! Asymmetric key generation, marshalled as PKCS#8 DER documents.

use crate::secret::generator::GenerationCause;
use p256::SecretKey;
use rand::rngs::OsRng;
use rsa::pkcs8::EncodePrivateKey;
use rsa::RsaPrivateKey;

/// Generate an RSA key pair with a `bits`-sized modulus as PKCS#8 DER
pub fn generate_rsa_der(bits: usize) -> Result<Vec<u8>, GenerationCause> {
    let key = RsaPrivateKey::new(&mut OsRng, bits)?;
    let document = key.to_pkcs8_der()?;
    Ok(document.as_bytes().to_vec())
}

/// Generate a NIST P-256 (prime256v1) key pair as PKCS#8 DER
pub fn generate_ecdsa_prime256v1_der() -> Result<Vec<u8>, GenerationCause> {
    let key = SecretKey::random(&mut OsRng);
    let document = key.to_pkcs8_der()?;
    Ok(document.as_bytes().to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rsa::pkcs8::DecodePrivateKey;
    use rsa::traits::PublicKeyParts;

    #[test]
    fn test_rsa_der_is_pkcs8_rsa_key() {
        // Small modulus keeps this fast; the 4096-bit path is covered in tests/
        let der = generate_rsa_der(1024).unwrap();
        let key = RsaPrivateKey::from_pkcs8_der(&der).unwrap();
        assert_eq!(key.size() * 8, 1024);
    }

    #[test]
    fn test_ecdsa_der_is_pkcs8_p256_key() {
        let der = generate_ecdsa_prime256v1_der().unwrap();
        let key = SecretKey::from_pkcs8_der(&der).unwrap();
        assert_eq!(key.to_bytes().len(), 32);
    }

    #[test]
    fn test_ecdsa_keys_are_fresh() {
        let first = generate_ecdsa_prime256v1_der().unwrap();
        let second = generate_ecdsa_prime256v1_der().unwrap();
        assert_ne!(first, second);
    }
}
