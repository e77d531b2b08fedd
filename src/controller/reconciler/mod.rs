//! # Reconciler
//!
//! Core reconciliation logic for secret declarations.
//!
//! The reconciler:
//! - Fetches the named Secret, creating it empty (with the managed labels) if absent
//! - Refuses to touch Secrets lacking the `app.kubernetes.io/managed-by` marker
//! - Resynchronises labels on every run
//! - Generates material only for keys that are missing
//! - Persists the Secret with a single update
//!
//! ## Reconciliation Flow
//!
//! 1. Fetch Secret (or create it)
//! 2. Verify ownership
//! 3. Lazy-fill the requested key
//! 4. Update Secret
//! 5. Log `Successfully updated secret: name:key`

pub mod reconcile;
pub mod types;

pub use types::{
    FailurePolicy, ReconcileError, ReconcileFailure, ReconcileOutcome, Reconciler, RunReport,
};
