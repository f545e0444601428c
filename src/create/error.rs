//! Error taxonomy for the create-secret pipeline

/// Errors produced while resolving, validating, or executing a token secret creation.
///
/// Every variant is terminal; nothing is retried.
#[derive(Debug, thiserror::Error)]
pub enum CreateSecretError {
    #[error("exactly one NAME is required, got {0}")]
    MissingArgument(usize),

    #[error("failed to construct client: {0:#}")]
    ClientConstruction(anyhow::Error),

    #[error("name must be specified")]
    EmptyName,

    #[error("--serviceaccount is required")]
    EmptyOwningReference,

    #[error("failed to encode last-applied-configuration annotation: {0}")]
    AnnotationEncoding(#[from] serde_json::Error),

    #[error("{kind} doesn't support dry-run: {reason:#}")]
    DryRunUnsupported { kind: String, reason: anyhow::Error },

    #[error("failed to create secret: {0:#}")]
    CreateFailed(anyhow::Error),

    #[error("{0:#}")]
    Emit(anyhow::Error),
}

/// Result type for the create-secret pipeline
pub type CreateResult<T> = Result<T, CreateSecretError>;
