//! # Configuration
//!
//! Process-level settings for the secret initialiser.
//!
//! - `init_secrets`: settings loaded from environment variables

pub mod init_secrets;

pub use init_secrets::InitSecretsConfig;
