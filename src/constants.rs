//! # Constants
//!
//! Shared constants used throughout the secret initialiser.
//!
//! Defaults here can be overridden via environment variables or CLI flags
//! where applicable (see [`crate::config`]).

/// Label key asserting which tool manages a Secret
pub const MANAGED_BY_LABEL: &str = "app.kubernetes.io/managed-by";

/// Value of [`MANAGED_BY_LABEL`] on every Secret this tool owns
pub const MANAGED_BY_VALUE: &str = "matrix-tools-init-secrets";

/// Namespace used when neither the CLI nor the environment provides one
pub const DEFAULT_NAMESPACE: &str = "default";

/// Length of a `rand32` secret (alphanumeric characters)
pub const RAND32_LENGTH: usize = 32;

/// Alphabet for `rand32` secrets and signing key identifiers
pub const ALPHANUMERIC_CHARSET: &[u8] =
    b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Number of raw random bytes hex-encoded into a `hex32` secret
pub const HEX32_RAW_BYTES: usize = 32;

/// RSA modulus size for `rsa4096` secrets
pub const RSA_KEY_BITS: usize = 4096;

/// Algorithm tag written at the start of a signing key line
pub const SIGNING_KEY_ALGORITHM: &str = "ed25519";

/// Prefix of the generated signing key identifier (`a_XXXX`)
pub const SIGNING_KEY_ID_PREFIX: &str = "a_";

/// Number of random alphanumeric characters after [`SIGNING_KEY_ID_PREFIX`]
pub const SIGNING_KEY_ID_RANDOM_LENGTH: usize = 4;

/// Maximum length of a Kubernetes resource name (RFC 1123 subdomain)
pub const MAX_RESOURCE_NAME_LENGTH: usize = 253;

/// Maximum length of a key in a Secret's `data` map
pub const MAX_DATA_KEY_LENGTH: usize = 253;

/// Maximum length of a namespace (RFC 1123 label)
pub const MAX_NAMESPACE_LENGTH: usize = 63;

/// Maximum length of a label value, and of the name part of a label key
pub const MAX_LABEL_SEGMENT_LENGTH: usize = 63;

/// Environment variable holding the target namespace
pub const ENV_NAMESPACE: &str = "NAMESPACE";

/// Fallback environment variable for the target namespace (downward API)
pub const ENV_POD_NAMESPACE: &str = "POD_NAMESPACE";

/// Default log level when `RUST_LOG` is not set
pub const DEFAULT_LOG_LEVEL: &str = "INFO";

/// Default log format (`text` or `json`)
pub const DEFAULT_LOG_FORMAT: &str = "text";
