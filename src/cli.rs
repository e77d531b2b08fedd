//! # CLI
//!
//! Command-line interface of the `init-secrets` job.
//!
//! ## Usage
//!
//! ```bash
//! # Ensure two keys exist in the `synapse-secrets` Secret
//! init-secrets generate-secrets \
//!     --secrets synapse-secrets:registrationSecret:rand32,synapse-secrets:signing.key:signingkey \
//!     --labels app.kubernetes.io/part-of=matrix-stack \
//!     --namespace ess
//! ```
//!
//! Everything is parsed and validated here, before any cluster access.

use crate::config::InitSecretsConfig;
use crate::controller::reconciler::FailurePolicy;
use crate::secret::validation::validate_namespace;
use crate::secret::{parse_declarations, parse_labels, ManagedLabels, ParseError, SecretDeclaration};
use clap::{Args, Parser, Subcommand};

/// Generate missing secrets into labeled Kubernetes Secrets
#[derive(Debug, Parser)]
#[command(name = "init-secrets", version)]
#[command(about = "Idempotently generate secrets into labeled Kubernetes Secrets", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Generate every declared key that is missing from its Secret
    GenerateSecrets(GenerateSecretsArgs),
}

#[derive(Debug, Args)]
pub struct GenerateSecretsArgs {
    /// Comma-separated list of `name:key:type`
    ///
    /// Types: rand32, signingkey, hex32, rsa4096, ecdsaprime256v1
    #[arg(short, long, value_name = "NAME:KEY:TYPE,...")]
    pub secrets: String,

    /// Comma-separated `key=value` labels applied to every managed Secret
    #[arg(short, long, value_name = "KEY=VALUE,...", default_value = "")]
    pub labels: String,

    /// Target namespace (defaults to NAMESPACE, then POD_NAMESPACE, then `default`)
    #[arg(short, long)]
    pub namespace: Option<String>,

    /// Keep processing remaining declarations after one fails
    #[arg(long)]
    pub keep_going: bool,
}

/// Validated input for a `generate-secrets` run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateSecretsOptions {
    pub declarations: Vec<SecretDeclaration>,
    pub labels: ManagedLabels,
    pub namespace: String,
    pub policy: FailurePolicy,
}

impl GenerateSecretsArgs {
    /// Parse and validate the arguments, falling back to `config` for unset flags
    ///
    /// # Errors
    ///
    /// Returns the first [`ParseError`] found in the declarations, labels or namespace.
    pub fn into_options(
        self,
        config: &InitSecretsConfig,
    ) -> Result<GenerateSecretsOptions, ParseError> {
        let declarations = parse_declarations(&self.secrets)?;
        let labels = ManagedLabels::new(parse_labels(&self.labels)?);
        let namespace = self
            .namespace
            .unwrap_or_else(|| config.namespace.clone());
        validate_namespace(&namespace)?;
        let policy = if self.keep_going {
            FailurePolicy::Continue
        } else {
            config.failure_policy()
        };

        Ok(GenerateSecretsOptions {
            declarations,
            labels,
            namespace,
            policy,
        })
    }
}
