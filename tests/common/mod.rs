//! Common test utilities for reconciler integration tests
//!
//! Provides an in-memory [`SecretStore`] that records calls and can be told to
//! fail, a [`MaterialGenerator`] that counts invocations, and a log capture.

#![allow(dead_code, reason = "not every test binary uses every helper")]

use async_trait::async_trait;
use init_secrets::constants::{MANAGED_BY_LABEL, MANAGED_BY_VALUE};
use init_secrets::secret::{GenerationCause, GenerationError, MaterialGenerator, SecretType};
use init_secrets::store::{ManagedResource, SecretStore, StoreError};
use std::collections::BTreeMap;
use std::io::{self, Write};
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tracing::subscriber::DefaultGuard;
use tracing_subscriber::fmt::MakeWriter;

pub const NAMESPACE: &str = "ess";

/// Store operation to fail on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Failure {
    Get,
    Create,
    Update,
    /// Another writer bumps the stored version just before our update lands
    ConcurrentWrite,
}

/// Secret store held in memory, keyed by `(namespace, name)`
#[derive(Debug, Default)]
pub struct InMemorySecretStore {
    resources: Mutex<BTreeMap<(String, String), ManagedResource>>,
    version: AtomicU64,
    failure: Mutex<Option<Failure>>,
    gets: AtomicUsize,
    creates: AtomicUsize,
    updates: AtomicUsize,
}

impl InMemorySecretStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store with `resources` already present
    pub fn with_resources(resources: impl IntoIterator<Item = ManagedResource>) -> Self {
        let store = Self::new();
        for resource in resources {
            store.insert(resource);
        }
        store
    }

    pub fn insert(&self, mut resource: ManagedResource) {
        resource.resource_version = Some(self.next_version());
        self.resources.lock().unwrap().insert(
            (resource.namespace.clone(), resource.name.clone()),
            resource,
        );
    }

    pub fn fail_on(&self, failure: Failure) {
        *self.failure.lock().unwrap() = Some(failure);
    }

    /// Snapshot of a stored resource
    pub fn resource(&self, name: &str) -> Option<ManagedResource> {
        self.resources
            .lock()
            .unwrap()
            .get(&(NAMESPACE.to_string(), name.to_string()))
            .cloned()
    }

    pub fn data(&self, name: &str, key: &str) -> Option<Vec<u8>> {
        self.resource(name)
            .and_then(|resource| resource.data.get(key).cloned())
    }

    pub fn gets(&self) -> usize {
        self.gets.load(Ordering::SeqCst)
    }

    pub fn creates(&self) -> usize {
        self.creates.load(Ordering::SeqCst)
    }

    pub fn updates(&self) -> usize {
        self.updates.load(Ordering::SeqCst)
    }

    fn next_version(&self) -> String {
        (self.version.fetch_add(1, Ordering::SeqCst) + 1).to_string()
    }

    fn failing(&self, failure: Failure) -> bool {
        *self.failure.lock().unwrap() == Some(failure)
    }
}

#[async_trait]
impl SecretStore for InMemorySecretStore {
    async fn get(&self, namespace: &str, name: &str) -> Result<Option<ManagedResource>, StoreError> {
        self.gets.fetch_add(1, Ordering::SeqCst);
        if self.failing(Failure::Get) {
            return Err(StoreError::Fetch {
                namespace: namespace.to_string(),
                name: name.to_string(),
                source: "connection refused".into(),
            });
        }
        Ok(self
            .resources
            .lock()
            .unwrap()
            .get(&(namespace.to_string(), name.to_string()))
            .cloned())
    }

    async fn create(&self, resource: &ManagedResource) -> Result<ManagedResource, StoreError> {
        self.creates.fetch_add(1, Ordering::SeqCst);
        if self.failing(Failure::Create) {
            return Err(StoreError::Create {
                namespace: resource.namespace.clone(),
                name: resource.name.clone(),
                source: "forbidden".into(),
            });
        }
        let mut created = resource.clone();
        created.resource_version = Some(self.next_version());
        self.resources.lock().unwrap().insert(
            (created.namespace.clone(), created.name.clone()),
            created.clone(),
        );
        Ok(created)
    }

    async fn update(&self, resource: &ManagedResource) -> Result<ManagedResource, StoreError> {
        self.updates.fetch_add(1, Ordering::SeqCst);
        if self.failing(Failure::Update) {
            return Err(StoreError::Update {
                namespace: resource.namespace.clone(),
                name: resource.name.clone(),
                source: "etcd timeout".into(),
            });
        }
        let concurrent_version = self
            .failing(Failure::ConcurrentWrite)
            .then(|| self.next_version());

        let mut resources = self.resources.lock().unwrap();
        let key = (resource.namespace.clone(), resource.name.clone());
        let Some(stored) = resources.get_mut(&key) else {
            return Err(StoreError::Update {
                namespace: resource.namespace.clone(),
                name: resource.name.clone(),
                source: "not found".into(),
            });
        };
        if let Some(version) = concurrent_version {
            stored.resource_version = Some(version);
        }
        if stored.resource_version != resource.resource_version {
            return Err(StoreError::Conflict {
                namespace: resource.namespace.clone(),
                name: resource.name.clone(),
                resource_version: resource.resource_version.clone(),
            });
        }
        let mut updated = resource.clone();
        updated.resource_version = Some(self.next_version());
        *stored = updated.clone();
        Ok(updated)
    }
}

/// Generator producing distinct, recognisable material and counting calls
#[derive(Debug, Default)]
pub struct CountingGenerator {
    calls: Arc<AtomicUsize>,
    fail: bool,
}

impl CountingGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    /// Handle to the call count that survives moving the generator into a reconciler
    pub fn calls(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.calls)
    }
}

impl MaterialGenerator for CountingGenerator {
    fn generate(&self, secret_type: SecretType) -> Result<Vec<u8>, GenerationError> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
        if self.fail {
            return Err(GenerationError {
                secret_type,
                cause: GenerationCause::Aborted("entropy source unavailable".to_string()),
            });
        }
        Ok(format!("{secret_type}-{call}").into_bytes())
    }
}

/// Labels carrying the ownership marker plus `extra`
pub fn managed_labels(extra: &[(&str, &str)]) -> BTreeMap<String, String> {
    let mut map = labels(extra);
    map.insert(MANAGED_BY_LABEL.to_string(), MANAGED_BY_VALUE.to_string());
    map
}

pub fn labels(entries: &[(&str, &str)]) -> BTreeMap<String, String> {
    entries
        .iter()
        .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
        .collect()
}

/// Resource in [`NAMESPACE`] with the given labels and data
pub fn resource(
    name: &str,
    labels: BTreeMap<String, String>,
    data: &[(&str, &[u8])],
) -> ManagedResource {
    let mut resource = ManagedResource::new(name, NAMESPACE, labels);
    resource.data = data
        .iter()
        .map(|(k, v)| ((*k).to_string(), v.to_vec()))
        .collect();
    resource
}

/// Collects formatted tracing output written by the current thread's subscriber
#[derive(Debug, Clone, Default)]
pub struct LogCapture {
    output: Arc<Mutex<Vec<u8>>>,
}

impl LogCapture {
    /// Install a plain-text subscriber writing into a new capture for the
    /// lifetime of the returned guard
    pub fn install() -> (Self, DefaultGuard) {
        let capture = Self::default();
        let subscriber = tracing_subscriber::fmt()
            .with_ansi(false)
            .with_max_level(tracing::Level::INFO)
            .with_writer(capture.clone())
            .finish();
        let guard = tracing::subscriber::set_default(subscriber);
        (capture, guard)
    }

    pub fn contents(&self) -> String {
        String::from_utf8(self.output.lock().unwrap().clone()).unwrap()
    }

    /// Number of captured lines containing `needle`
    pub fn count(&self, needle: &str) -> usize {
        self.contents()
            .lines()
            .filter(|line| line.contains(needle))
            .count()
    }
}

impl Write for LogCapture {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.output.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for LogCapture {
    type Writer = LogCapture;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}
