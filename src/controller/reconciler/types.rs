//! # Types
//!
//! Core types for the reconciler.

use crate::constants::MANAGED_BY_VALUE;
use crate::secret::{GenerationError, MaterialGenerator, SecretDeclaration, SecretGenerator, SecretType};
use crate::store::{SecretStore, StoreError};
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

/// Why a single declaration could not be reconciled
///
/// Each variant names the Secret and key so the failure is actionable on its own.
#[derive(Debug, Error)]
pub enum ReconcileError {
    /// The Secret exists but another tool owns it; nothing was written
    #[error(
        "secret {namespace}/{name} is not managed by {expected} (managed-by: {found})",
        expected = MANAGED_BY_VALUE,
        found = .managed_by.as_deref().unwrap_or("<unset>")
    )]
    Ownership {
        namespace: String,
        name: String,
        managed_by: Option<String>,
    },
    /// Material for the missing key could not be generated; nothing was written
    #[error("failed to generate {secret_type} for {name}:{key}: {source}")]
    Generation {
        name: String,
        key: String,
        secret_type: SecretType,
        #[source]
        source: GenerationError,
    },
    /// Fetching or creating the Secret failed
    #[error("failed to load secret for {name}:{key} ({secret_type}): {source}")]
    Store {
        name: String,
        key: String,
        secret_type: SecretType,
        #[source]
        source: StoreError,
    },
    /// Writing the merged Secret back failed
    #[error("failed to persist {name}:{key} ({secret_type}): {source}")]
    Persistence {
        name: String,
        key: String,
        secret_type: SecretType,
        #[source]
        source: StoreError,
    },
}

impl ReconcileError {
    /// Short machine-friendly name of the failure class, used in log fields
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            ReconcileError::Ownership { .. } => "ownership",
            ReconcileError::Generation { .. } => "generation",
            ReconcileError::Store { .. } => "store",
            ReconcileError::Persistence { .. } => "persistence",
        }
    }
}

/// Result of a successful reconcile
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReconcileOutcome {
    pub resource_name: String,
    pub data_key: String,
    pub secret_type: SecretType,
    /// The Secret did not exist and was created by this reconcile
    pub resource_created: bool,
    /// The key was absent and fresh material was stored
    pub generated: bool,
}

/// What a run does after a declaration fails
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FailurePolicy {
    /// Stop at the first failure; remaining declarations are skipped
    #[default]
    Halt,
    /// Process every declaration regardless of earlier failures
    Continue,
}

/// A declaration that failed, with its error
#[derive(Debug)]
pub struct ReconcileFailure {
    pub declaration: SecretDeclaration,
    pub error: ReconcileError,
}

/// Summary of reconciling a list of declarations
#[derive(Debug, Default)]
pub struct RunReport {
    pub succeeded: Vec<ReconcileOutcome>,
    pub failed: Vec<ReconcileFailure>,
    /// Declarations not attempted because the run halted
    pub skipped: usize,
}

impl RunReport {
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.failed.is_empty() && self.skipped == 0
    }

    #[must_use]
    pub fn generated_count(&self) -> usize {
        self.succeeded.iter().filter(|outcome| outcome.generated).count()
    }
}

impl fmt::Display for RunReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} succeeded ({} generated), {} failed, {} skipped",
            self.succeeded.len(),
            self.generated_count(),
            self.failed.len(),
            self.skipped
        )
    }
}

/// Reconciles secret declarations into a namespace of a [`SecretStore`]
pub struct Reconciler<S, G = SecretGenerator> {
    pub(crate) store: S,
    pub(crate) generator: Arc<G>,
    pub(crate) namespace: String,
}

impl<S, G> fmt::Debug for Reconciler<S, G> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Reconciler")
            .field("namespace", &self.namespace)
            .finish_non_exhaustive()
    }
}

impl<S: SecretStore> Reconciler<S> {
    /// Reconciler generating material from the OS CSPRNG
    pub fn new(store: S, namespace: impl Into<String>) -> Self {
        Self::with_generator(store, SecretGenerator, namespace)
    }
}

impl<S: SecretStore, G: MaterialGenerator + 'static> Reconciler<S, G> {
    pub fn with_generator(store: S, generator: G, namespace: impl Into<String>) -> Self {
        Self {
            store,
            generator: Arc::new(generator),
            namespace: namespace.into(),
        }
    }

    /// Namespace every declaration is reconciled in
    #[must_use]
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }
}
