//! Server-side dry-run capability check

use crate::context::DryRunVerifier;
use anyhow::{Context, Result};
use async_trait::async_trait;
use kube::core::GroupVersionKind;
use kube::discovery;
use serde_json::Value;

const DRY_RUN_PARAM: &str = "dryRun";

/// Verifies dry-run support from the server's OpenAPI document
///
/// The kind must be served (checked through discovery) and the POST operation
/// for it must declare a `dryRun` query parameter. OpenAPI v3 is tried first,
/// then v2.
pub struct DiscoveryVerifier {
    client: kube::Client,
}

impl DiscoveryVerifier {
    pub fn new(client: kube::Client) -> Self {
        Self { client }
    }

    async fn fetch_json(&self, path: &str) -> Result<Value> {
        let request = http::Request::get(path)
            .header(http::header::ACCEPT, "application/json")
            .body(Vec::new())
            .context("Failed to build OpenAPI request")?;
        let doc = self
            .client
            .request::<Value>(request)
            .await
            .with_context(|| format!("Failed to fetch {}", path))?;
        Ok(doc)
    }

    async fn openapi_document(&self, gvk: &GroupVersionKind) -> Result<Value> {
        let v3_path = openapi_v3_path(gvk);
        match self.fetch_json(&v3_path).await {
            Ok(doc) => Ok(doc),
            Err(e) => {
                tracing::debug!("OpenAPI v3 unavailable ({:#}), falling back to v2", e);
                self.fetch_json("/openapi/v2").await
            }
        }
    }
}

#[async_trait]
impl DryRunVerifier for DiscoveryVerifier {
    async fn has_support(&self, gvk: &GroupVersionKind) -> Result<()> {
        discovery::pinned_kind(&self.client, gvk)
            .await
            .with_context(|| format!("{} is not served by the API server", gvk.kind))?;

        let doc = self.openapi_document(gvk).await?;
        if !post_declares_dry_run(&doc, gvk) {
            anyhow::bail!(
                "the create operation for {} declares no {} parameter",
                gvk.kind,
                DRY_RUN_PARAM
            );
        }

        tracing::debug!("Server supports dry-run create for {}", gvk.kind);
        Ok(())
    }
}

/// OpenAPI v3 document path for the group/version of `gvk`
pub fn openapi_v3_path(gvk: &GroupVersionKind) -> String {
    if gvk.group.is_empty() {
        format!("/openapi/v3/api/{}", gvk.version)
    } else {
        format!("/openapi/v3/apis/{}/{}", gvk.group, gvk.version)
    }
}

/// Whether any POST operation tagged with `gvk` declares a `dryRun` parameter.
///
/// Works for both v2 and v3 documents; `$ref` parameters are resolved
/// against the document.
pub fn post_declares_dry_run(doc: &Value, gvk: &GroupVersionKind) -> bool {
    let Some(paths) = doc.get("paths").and_then(Value::as_object) else {
        return false;
    };

    paths.values().any(|path_item| {
        let Some(post) = path_item.get("post") else {
            return false;
        };
        if !operation_matches(post, gvk) {
            return false;
        }

        [post.get("parameters"), path_item.get("parameters")]
            .into_iter()
            .flatten()
            .filter_map(Value::as_array)
            .flatten()
            .any(|param| parameter_name(doc, param) == Some(DRY_RUN_PARAM))
    })
}

fn operation_matches(operation: &Value, gvk: &GroupVersionKind) -> bool {
    let Some(tagged) = operation.get("x-kubernetes-group-version-kind") else {
        return false;
    };
    let field = |key: &str| tagged.get(key).and_then(Value::as_str).unwrap_or_default();
    field("group") == gvk.group && field("version") == gvk.version && field("kind") == gvk.kind
}

fn parameter_name<'a>(doc: &'a Value, param: &'a Value) -> Option<&'a str> {
    let param = match param.get("$ref").and_then(Value::as_str) {
        Some(reference) => doc.pointer(reference.strip_prefix('#')?)?,
        None => param,
    };
    param.get("name").and_then(Value::as_str)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::create::secret_gvk;
    use serde_json::json;

    fn secrets_post(parameters: Value) -> Value {
        json!({
            "paths": {
                "/api/v1/namespaces/{namespace}/secrets": {
                    "parameters": [
                        { "name": "namespace", "in": "path", "required": true }
                    ],
                    "post": {
                        "operationId": "createCoreV1NamespacedSecret",
                        "parameters": parameters,
                        "x-kubernetes-action": "post",
                        "x-kubernetes-group-version-kind": {
                            "group": "",
                            "kind": "Secret",
                            "version": "v1"
                        }
                    }
                }
            }
        })
    }

    #[test]
    fn test_openapi_v3_path() {
        assert_eq!(openapi_v3_path(&secret_gvk()), "/openapi/v3/api/v1");
        assert_eq!(
            openapi_v3_path(&GroupVersionKind::gvk("apps", "v1", "Deployment")),
            "/openapi/v3/apis/apps/v1"
        );
    }

    #[test]
    fn test_inline_dry_run_parameter() {
        let doc = secrets_post(json!([
            { "name": "dryRun", "in": "query", "schema": { "type": "string" } },
            { "name": "fieldManager", "in": "query", "schema": { "type": "string" } }
        ]));
        assert!(post_declares_dry_run(&doc, &secret_gvk()));
    }

    #[test]
    fn test_missing_dry_run_parameter() {
        let doc = secrets_post(json!([
            { "name": "fieldManager", "in": "query", "schema": { "type": "string" } }
        ]));
        assert!(!post_declares_dry_run(&doc, &secret_gvk()));
    }

    #[test]
    fn test_referenced_dry_run_parameter() {
        let mut doc = secrets_post(json!([
            { "$ref": "#/parameters/dryRun-gyBQSB7P" }
        ]));
        doc["parameters"] = json!({
            "dryRun-gyBQSB7P": { "name": "dryRun", "in": "query", "type": "string" }
        });
        assert!(post_declares_dry_run(&doc, &secret_gvk()));
    }

    #[test]
    fn test_other_kind_does_not_count() {
        let doc = secrets_post(json!([{ "name": "dryRun", "in": "query" }]));
        let config_map = GroupVersionKind::gvk("", "v1", "ConfigMap");
        assert!(!post_declares_dry_run(&doc, &config_map));
    }

    #[test]
    fn test_document_without_paths() {
        assert!(!post_declares_dry_run(&json!({}), &secret_gvk()));
    }
}
