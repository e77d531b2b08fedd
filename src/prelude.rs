//! # Prelude
//!
//! Re-exports commonly used types and traits for convenience.
//!
//! ```rust
//! use init_secrets::prelude::*;
//! ```

// Declarations and generation
pub use crate::secret::{
    parse_declarations, parse_labels, GenerationError, ManagedLabels, MaterialGenerator,
    ParseError, SecretDeclaration, SecretGenerator, SecretType,
};

// Store contract
pub use crate::store::{KubeSecretStore, ManagedResource, SecretStore, StoreError};

// Reconciler types
pub use crate::controller::reconciler::{
    FailurePolicy, ReconcileError, ReconcileOutcome, Reconciler, RunReport,
};

// Config
pub use crate::config::InitSecretsConfig;
