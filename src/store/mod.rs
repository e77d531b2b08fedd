//! # Secret Store
//!
//! The narrow Get/Create/Update contract the reconciler needs from the cluster.
//!
//! [`kubernetes::KubeSecretStore`] is the production implementation; tests
//! substitute an in-memory store.

use crate::secret::labels::is_managed;
use async_trait::async_trait;
use k8s_openapi::api::core::v1::Secret;
use std::collections::BTreeMap;
use thiserror::Error;

pub mod kubernetes;

pub use kubernetes::KubeSecretStore;

/// Boxed cause of a store failure
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// A named Secret with its labels and opaque data entries
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ManagedResource {
    pub name: String,
    pub namespace: String,
    pub labels: BTreeMap<String, String>,
    pub annotations: BTreeMap<String, String>,
    pub data: BTreeMap<String, Vec<u8>>,
    /// Version the store last reported; sent back on update so concurrent writes are rejected
    pub resource_version: Option<String>,
    /// The Secret as last returned by the API server, `None` until persisted.
    /// Writes start from it, so `type`, `immutable`, owner references and
    /// finalizers are sent back unchanged.
    pub stored: Option<Secret>,
}

impl ManagedResource {
    /// Empty resource carrying `labels`, not yet persisted
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        namespace: impl Into<String>,
        labels: BTreeMap<String, String>,
    ) -> Self {
        Self {
            name: name.into(),
            namespace: namespace.into(),
            labels,
            ..Self::default()
        }
    }

    /// Whether this resource carries the exact ownership marker
    #[must_use]
    pub fn is_managed(&self) -> bool {
        is_managed(&self.labels)
    }

    /// Current value of the managed-by label, if any
    #[must_use]
    pub fn managed_by(&self) -> Option<&str> {
        self.labels
            .get(crate::constants::MANAGED_BY_LABEL)
            .map(String::as_str)
    }
}

/// Failure talking to the secret store
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to fetch secret {namespace}/{name}: {source}")]
    Fetch {
        namespace: String,
        name: String,
        #[source]
        source: BoxError,
    },
    #[error("failed to initialize secret {namespace}/{name}: {source}")]
    Create {
        namespace: String,
        name: String,
        #[source]
        source: BoxError,
    },
    #[error("failed to update secret {namespace}/{name}: {source}")]
    Update {
        namespace: String,
        name: String,
        #[source]
        source: BoxError,
    },
    #[error("secret {namespace}/{name} was modified concurrently (resource version {resource_version:?} is stale)")]
    Conflict {
        namespace: String,
        name: String,
        resource_version: Option<String>,
    },
}

/// Cluster-state store holding managed Secrets
#[async_trait]
pub trait SecretStore: Send + Sync {
    /// Fetch a Secret; `Ok(None)` when it does not exist
    async fn get(&self, namespace: &str, name: &str) -> Result<Option<ManagedResource>, StoreError>;

    /// Create a Secret and return it as stored
    async fn create(&self, resource: &ManagedResource) -> Result<ManagedResource, StoreError>;

    /// Replace a Secret's labels and data in a single write and return it as stored
    async fn update(&self, resource: &ManagedResource) -> Result<ManagedResource, StoreError>;
}
