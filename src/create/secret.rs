//! Secret object construction
//!
//! Builds the `kubernetes.io/service-account-token` Secret sent to the API server
//! and maintains the last-applied-configuration annotation.

use k8s_openapi::Resource;
use k8s_openapi::api::core::v1::Secret;
use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;
use kube::core::GroupVersionKind;
use std::collections::BTreeMap;

/// Secret type populated by the token controller
pub const SERVICE_ACCOUNT_TOKEN_TYPE: &str = "kubernetes.io/service-account-token";

/// Annotation naming the service account the token is issued for
pub const SERVICE_ACCOUNT_NAME_ANNOTATION: &str = "kubernetes.io/service-account.name";

/// Annotation recording the configuration last submitted by this tool
pub const LAST_APPLIED_CONFIG_ANNOTATION: &str = "kubectl.kubernetes.io/last-applied-configuration";

/// Group/version/kind of the created object, used for dry-run verification
pub fn secret_gvk() -> GroupVersionKind {
    GroupVersionKind::gvk(Secret::GROUP, Secret::VERSION, Secret::KIND)
}

/// Build the token secret. `namespace` is only set when the caller enforces it.
pub fn build_secret(name: &str, namespace: Option<&str>, service_account: &str) -> Secret {
    Secret {
        metadata: ObjectMeta {
            name: Some(name.to_string()),
            namespace: namespace.map(str::to_string),
            annotations: Some(build_annotations(service_account)),
            ..Default::default()
        },
        type_: Some(SERVICE_ACCOUNT_TOKEN_TYPE.to_string()),
        ..Default::default()
    }
}

fn build_annotations(service_account: &str) -> BTreeMap<String, String> {
    BTreeMap::from([(
        SERVICE_ACCOUNT_NAME_ANNOTATION.to_string(),
        service_account.to_string(),
    )])
}

/// Record the object's own JSON encoding in the last-applied-configuration annotation.
///
/// Any previous value of the annotation is excluded from the encoding, so applying
/// this twice yields the same object.
pub fn apply_last_applied_annotation(secret: &mut Secret) -> Result<(), serde_json::Error> {
    let mut annotations = secret.metadata.annotations.take().unwrap_or_default();
    annotations.remove(LAST_APPLIED_CONFIG_ANNOTATION);
    secret.metadata.annotations = (!annotations.is_empty()).then_some(annotations);

    let mut encoded = serde_json::to_string(&*secret)?;
    encoded.push('\n');

    secret
        .metadata
        .annotations
        .get_or_insert_with(BTreeMap::new)
        .insert(LAST_APPLIED_CONFIG_ANNOTATION.to_string(), encoded);
    Ok(())
}
