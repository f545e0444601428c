//! Secrets API client

use crate::context::{CreateOptions, SecretClient};
use anyhow::{Context, Result};
use async_trait::async_trait;
use k8s_openapi::api::core::v1::Secret;
use url::form_urlencoded;

/// Build the create URI for the secrets collection in `namespace`
pub fn secrets_uri(namespace: &str, options: &CreateOptions) -> String {
    let mut query = form_urlencoded::Serializer::new(String::new());
    if options.dry_run {
        query.append_pair("dryRun", "All");
    }
    if let Some(field_manager) = &options.field_manager {
        query.append_pair("fieldManager", field_manager);
    }
    query.append_pair("fieldValidation", options.field_validation.as_query_value());

    format!(
        "/api/v1/namespaces/{}/secrets?{}",
        namespace,
        query.finish()
    )
}

/// [`SecretClient`] talking to the API server
pub struct KubeSecretClient {
    client: kube::Client,
}

impl KubeSecretClient {
    pub fn new(client: kube::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl SecretClient for KubeSecretClient {
    async fn create(
        &self,
        namespace: &str,
        secret: &Secret,
        options: &CreateOptions,
    ) -> Result<Secret> {
        let body = serde_json::to_vec(secret).context("Failed to serialize secret")?;
        let request = http::Request::post(secrets_uri(namespace, options))
            .header(http::header::CONTENT_TYPE, "application/json")
            .body(body)
            .context("Failed to build create request")?;

        let created = self.client.request::<Secret>(request).await?;
        Ok(created)
    }
}
