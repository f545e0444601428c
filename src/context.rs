//! Execution context seams
//!
//! The create pipeline never talks to a cluster directly. It asks a [`Factory`]
//! for a secrets client, the active namespace, and a dry-run verifier, so it can
//! run against a real cluster (see [`crate::kube::KubeFactory`]) or a fake.

use crate::create::ValidationDirective;
use async_trait::async_trait;
use k8s_openapi::api::core::v1::Secret;
use kube::core::GroupVersionKind;
use std::sync::Arc;

/// Query options attached to a create request
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CreateOptions {
    /// Send `dryRun=All` so the server validates without persisting
    pub dry_run: bool,
    pub field_manager: Option<String>,
    pub field_validation: ValidationDirective,
}

/// Typed client for the secrets collection
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SecretClient: Send + Sync {
    /// Create `secret` in `namespace` and return the object the server stored
    async fn create(
        &self,
        namespace: &str,
        secret: &Secret,
        options: &CreateOptions,
    ) -> anyhow::Result<Secret>;
}

/// Confirms that the server accepts dry-run requests for a kind
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DryRunVerifier: Send + Sync {
    /// Returns an error describing why dry-run is unavailable for `gvk`
    async fn has_support(&self, gvk: &GroupVersionKind) -> anyhow::Result<()>;
}

/// Provider of everything the resolver takes from the environment
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Factory: Send + Sync {
    /// Construct the secrets client
    async fn secret_client(&self) -> anyhow::Result<Arc<dyn SecretClient>>;

    /// Construct the verifier used for server-side dry-run
    async fn dry_run_verifier(&self) -> anyhow::Result<Arc<dyn DryRunVerifier>>;

    /// Active namespace and whether it was set explicitly
    async fn namespace(&self) -> anyhow::Result<(String, bool)>;
}
