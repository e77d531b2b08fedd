//! # Kubernetes Secret Store
//!
//! [`SecretStore`] over core/v1 `Secret` resources via kube-rs.

use crate::store::{ManagedResource, SecretStore, StoreError};
use async_trait::async_trait;
use k8s_openapi::api::core::v1::Secret;
use k8s_openapi::ByteString;
use kube::api::PostParams;
use kube::{Api, Client};
use tracing::debug;

/// Secret store backed by the Kubernetes API server
#[derive(Clone)]
pub struct KubeSecretStore {
    client: Client,
}

impl std::fmt::Debug for KubeSecretStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KubeSecretStore").finish_non_exhaustive()
    }
}

impl KubeSecretStore {
    #[must_use]
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    fn api(&self, namespace: &str) -> Api<Secret> {
        Api::namespaced(self.client.clone(), namespace)
    }
}

#[async_trait]
impl SecretStore for KubeSecretStore {
    async fn get(&self, namespace: &str, name: &str) -> Result<Option<ManagedResource>, StoreError> {
        match self.api(namespace).get(name).await {
            Ok(secret) => Ok(Some(from_secret(secret, namespace))),
            Err(kube::Error::Api(api_err)) if api_err.code == 404 => {
                debug!("Secret {}/{} not found", namespace, name);
                Ok(None)
            }
            Err(e) => Err(StoreError::Fetch {
                namespace: namespace.to_string(),
                name: name.to_string(),
                source: Box::new(e),
            }),
        }
    }

    async fn create(&self, resource: &ManagedResource) -> Result<ManagedResource, StoreError> {
        let secret = to_secret(resource);
        self.api(&resource.namespace)
            .create(&PostParams::default(), &secret)
            .await
            .map(|created| from_secret(created, &resource.namespace))
            .map_err(|e| StoreError::Create {
                namespace: resource.namespace.clone(),
                name: resource.name.clone(),
                source: Box::new(e),
            })
    }

    async fn update(&self, resource: &ManagedResource) -> Result<ManagedResource, StoreError> {
        let secret = to_secret(resource);
        match self
            .api(&resource.namespace)
            .replace(&resource.name, &PostParams::default(), &secret)
            .await
        {
            Ok(updated) => Ok(from_secret(updated, &resource.namespace)),
            Err(kube::Error::Api(api_err)) if api_err.code == 409 => Err(StoreError::Conflict {
                namespace: resource.namespace.clone(),
                name: resource.name.clone(),
                resource_version: resource.resource_version.clone(),
            }),
            Err(e) => Err(StoreError::Update {
                namespace: resource.namespace.clone(),
                name: resource.name.clone(),
                source: Box::new(e),
            }),
        }
    }
}

/// Convert a fetched Secret; `stringData` is write-only so only `data` is read
fn from_secret(secret: Secret, namespace: &str) -> ManagedResource {
    let stored = secret.clone();
    let metadata = secret.metadata;
    ManagedResource {
        name: metadata.name.unwrap_or_default(),
        namespace: metadata
            .namespace
            .unwrap_or_else(|| namespace.to_string()),
        labels: metadata.labels.unwrap_or_default(),
        annotations: metadata.annotations.unwrap_or_default(),
        data: secret
            .data
            .unwrap_or_default()
            .into_iter()
            .map(|(key, ByteString(value))| (key, value))
            .collect(),
        resource_version: metadata.resource_version,
        stored: Some(stored),
    }
}

/// Build the Secret to send, starting from the fetched one when there is one
fn to_secret(resource: &ManagedResource) -> Secret {
    let mut secret = resource.stored.clone().unwrap_or_default();

    let metadata = &mut secret.metadata;
    metadata.name = Some(resource.name.clone());
    metadata.namespace = Some(resource.namespace.clone());
    metadata.labels = Some(resource.labels.clone());
    metadata.annotations = (!resource.annotations.is_empty()).then(|| resource.annotations.clone());
    metadata.resource_version = resource.resource_version.clone();

    secret.data = (!resource.data.is_empty()).then(|| {
        resource
            .data
            .iter()
            .map(|(key, value)| (key.clone(), ByteString(value.clone())))
            .collect()
    });
    secret.string_data = None;
    secret
}
