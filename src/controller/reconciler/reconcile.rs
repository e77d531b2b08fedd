//! # Reconciliation Logic
//!
//! Per declaration: fetch or create the Secret, check ownership, fill the key
//! if it is missing, and write the Secret back in one update.
//!
//! ```text
//! Start → Fetched{exists|absent} → OwnershipChecked{ok|rejected} → DataMerged → Persisted|Failed
//! ```
//!
//! A key that is already present is never regenerated or inspected. There is
//! no retry at this layer; a Secret created but not yet filled is picked up
//! again by the next run.

use crate::controller::reconciler::types::{
    FailurePolicy, ReconcileError, ReconcileFailure, ReconcileOutcome, Reconciler, RunReport,
};
use crate::secret::{
    GenerationCause, GenerationError, ManagedLabels, MaterialGenerator, SecretDeclaration,
    SecretType,
};
use crate::store::{ManagedResource, SecretStore};
use std::sync::Arc;
use tracing::{debug, error, info, warn, Instrument};

impl<S: SecretStore, G: MaterialGenerator + 'static> Reconciler<S, G> {
    /// Ensure `declaration`'s key exists in its Secret, generating it only if absent
    pub async fn reconcile(
        &self,
        declaration: &SecretDeclaration,
        labels: &ManagedLabels,
    ) -> Result<ReconcileOutcome, ReconcileError> {
        let span = tracing::info_span!(
            "reconcile",
            resource.name = declaration.resource_name(),
            resource.namespace = %self.namespace,
            secret.key = declaration.data_key(),
            secret_type = %declaration.secret_type(),
        );
        self.reconcile_internal(declaration, labels)
            .instrument(span)
            .await
    }

    async fn reconcile_internal(
        &self,
        declaration: &SecretDeclaration,
        labels: &ManagedLabels,
    ) -> Result<ReconcileOutcome, ReconcileError> {
        let name = declaration.resource_name();
        let key = declaration.data_key();
        let secret_type = declaration.secret_type();
        let store_error = |source| ReconcileError::Store {
            name: name.to_string(),
            key: key.to_string(),
            secret_type,
            source,
        };

        let fetched = self
            .store
            .get(&self.namespace, name)
            .await
            .map_err(store_error)?;

        let (mut working, resource_created) = match fetched {
            None => {
                info!("Secret {}/{} not found, creating it", self.namespace, name);
                let empty = ManagedResource::new(name, &self.namespace, labels.as_map().clone());
                let created = self.store.create(&empty).await.map_err(store_error)?;
                (created, true)
            }
            Some(mut existing) => {
                if !existing.is_managed() {
                    warn!(
                        "Refusing to modify secret {}/{}: managed-by is {:?}",
                        self.namespace,
                        name,
                        existing.managed_by()
                    );
                    return Err(ReconcileError::Ownership {
                        namespace: self.namespace.clone(),
                        name: name.to_string(),
                        managed_by: existing.managed_by().map(str::to_string),
                    });
                }
                existing.labels = labels.as_map().clone();
                (existing, false)
            }
        };

        let generated = if working.data.contains_key(key) {
            debug!("Key {} already present in secret {}, keeping it", key, name);
            false
        } else {
            let material =
                self.generate(secret_type)
                    .await
                    .map_err(|source| ReconcileError::Generation {
                        name: name.to_string(),
                        key: key.to_string(),
                        secret_type,
                        source,
                    })?;
            working.data.insert(key.to_string(), material);
            true
        };

        self.store
            .update(&working)
            .await
            .map_err(|source| ReconcileError::Persistence {
                name: name.to_string(),
                key: key.to_string(),
                secret_type,
                source,
            })?;

        info!(generated, "Successfully updated secret: {}:{}", name, key);

        Ok(ReconcileOutcome {
            resource_name: name.to_string(),
            data_key: key.to_string(),
            secret_type,
            resource_created,
            generated,
        })
    }

    /// Key generation can take seconds (RSA-4096), so it runs off the async workers
    async fn generate(&self, secret_type: SecretType) -> Result<Vec<u8>, GenerationError> {
        let generator = Arc::clone(&self.generator);
        tokio::task::spawn_blocking(move || generator.generate(secret_type))
            .await
            .map_err(|e| GenerationError {
                secret_type,
                cause: GenerationCause::Aborted(e.to_string()),
            })?
    }

    /// Reconcile declarations in order, stopping at the first failure under [`FailurePolicy::Halt`]
    pub async fn reconcile_all(
        &self,
        declarations: &[SecretDeclaration],
        labels: &ManagedLabels,
        policy: FailurePolicy,
    ) -> RunReport {
        let mut report = RunReport::default();
        for (index, declaration) in declarations.iter().enumerate() {
            match self.reconcile(declaration, labels).await {
                Ok(outcome) => report.succeeded.push(outcome),
                Err(error) => {
                    error!(
                        error.kind = error.kind(),
                        "Failed to reconcile {}: {}", declaration, error
                    );
                    report.failed.push(ReconcileFailure {
                        declaration: declaration.clone(),
                        error,
                    });
                    if policy == FailurePolicy::Halt {
                        report.skipped = declarations.len() - index - 1;
                        break;
                    }
                }
            }
        }
        report
    }
}
