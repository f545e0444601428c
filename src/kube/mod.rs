//! Kubernetes client module
//!
//! Handles connection to the Kubernetes API server and provides the
//! [`Factory`] used by the create pipeline.

mod dry_run;
mod secrets;

pub use dry_run::DiscoveryVerifier;
pub use secrets::{KubeSecretClient, secrets_uri};

use crate::cli::ConnectionArgs;
use crate::context::{DryRunVerifier, Factory, SecretClient};
use anyhow::{Context, Result};
use async_trait::async_trait;
use kube::config::{KubeConfigOptions, Kubeconfig};
use kube::{Client, Config};
use std::sync::Arc;
use tokio::sync::OnceCell;

/// Load client configuration
///
/// Uses the default kubeconfig loading strategy unless `--kubeconfig` or
/// `--context` narrow it:
/// 1. In-cluster config (if running in a pod)
/// 2. KUBECONFIG environment variable
/// 3. ~/.kube/config
pub async fn load_config(connection: &ConnectionArgs) -> Result<Config> {
    let options = KubeConfigOptions {
        context: connection.context.clone(),
        ..Default::default()
    };

    let config = match &connection.kubeconfig {
        Some(path) => {
            let kubeconfig = Kubeconfig::read_from(path)
                .with_context(|| format!("Failed to read kubeconfig: {}", path.display()))?;
            Config::from_custom_kubeconfig(kubeconfig, &options)
                .await
                .context("Failed to load kubeconfig")?
        }
        None if connection.context.is_some() => Config::from_kubeconfig(&options)
            .await
            .context("Failed to load kubeconfig")?,
        None => Config::infer()
            .await
            .context("Failed to infer Kubernetes configuration")?,
    };

    tracing::debug!(
        "Loaded client configuration for {} (default namespace {})",
        config.cluster_url,
        config.default_namespace
    );
    Ok(config)
}

/// [`Factory`] backed by a real cluster connection
pub struct KubeFactory {
    connection: ConnectionArgs,
    config: OnceCell<Config>,
}

impl KubeFactory {
    pub fn new(connection: ConnectionArgs) -> Self {
        Self {
            connection,
            config: OnceCell::new(),
        }
    }

    async fn config(&self) -> Result<&Config> {
        self.config
            .get_or_try_init(|| load_config(&self.connection))
            .await
    }

    async fn client(&self) -> Result<Client> {
        let config = self.config().await?.clone();
        Client::try_from(config).context("Failed to build Kubernetes client")
    }
}

#[async_trait]
impl Factory for KubeFactory {
    async fn secret_client(&self) -> Result<Arc<dyn SecretClient>> {
        Ok(Arc::new(KubeSecretClient::new(self.client().await?)))
    }

    async fn dry_run_verifier(&self) -> Result<Arc<dyn DryRunVerifier>> {
        Ok(Arc::new(DiscoveryVerifier::new(self.client().await?)))
    }

    async fn namespace(&self) -> Result<(String, bool)> {
        if let Some(namespace) = &self.connection.namespace {
            return Ok((namespace.clone(), true));
        }
        let config = self.config().await?;
        Ok((config.default_namespace.clone(), false))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_explicit_namespace_is_enforced() {
        let factory = KubeFactory::new(ConnectionArgs {
            namespace: Some("team-a".to_string()),
            ..Default::default()
        });

        let (namespace, enforce) = factory.namespace().await.unwrap();
        assert_eq!(namespace, "team-a");
        assert!(enforce);
    }

    #[tokio::test]
    async fn test_missing_kubeconfig_fails() {
        let tmp = tempfile::tempdir().unwrap();
        let factory = KubeFactory::new(ConnectionArgs {
            kubeconfig: Some(tmp.path().join("absent")),
            ..Default::default()
        });

        let err = match factory.secret_client().await {
            Ok(_) => panic!("client construction should fail"),
            Err(e) => e,
        };
        assert!(err.to_string().contains("Failed to read kubeconfig"));
    }
}
