//! # init-secrets
//!
//! One-shot job that fills missing keys in managed Kubernetes Secrets.
//!
//! Exits non-zero if any declaration could not be reconciled; re-running is
//! always safe because present keys are never regenerated.

use anyhow::{bail, Context, Result};
use clap::Parser;
use init_secrets::cli::{Cli, Commands, GenerateSecretsOptions};
use init_secrets::config::InitSecretsConfig;
use init_secrets::controller::reconciler::Reconciler;
use init_secrets::observability::init_tracing;
use init_secrets::store::KubeSecretStore;
use kube::Client;
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<()> {
    // Must happen before any rustls use by the kube client
    rustls::crypto::ring::default_provider()
        .install_default()
        .unwrap_or_else(|_| panic!("Failed to install rustls crypto provider"));

    let cli = Cli::parse();
    let config = InitSecretsConfig::from_env();
    init_tracing(&config)?;

    info!(
        "Build info: timestamp={}, datetime={}, git_hash={}",
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_DATETIME"),
        env!("BUILD_GIT_HASH")
    );

    match cli.command {
        Commands::GenerateSecrets(args) => {
            let options = args
                .into_options(&config)
                .context("Invalid generate-secrets arguments")?;
            generate_secrets(options).await
        }
    }
}

async fn generate_secrets(options: GenerateSecretsOptions) -> Result<()> {
    let client = Client::try_default()
        .await
        .context("Failed to create Kubernetes client. Ensure in-cluster or kubeconfig credentials are available.")?;

    let reconciler = Reconciler::new(KubeSecretStore::new(client), options.namespace);
    info!(
        "Reconciling {} secret declaration(s) in namespace {}",
        options.declarations.len(),
        reconciler.namespace()
    );

    let report = reconciler
        .reconcile_all(&options.declarations, &options.labels, options.policy)
        .await;

    if report.is_success() {
        info!("Secret generation complete: {}", report);
        return Ok(());
    }

    error!("Secret generation failed: {}", report);
    bail!("Secret generation failed: {report}")
}
