//! Create a service-account token secret
//!
//! The command runs in three phases, each consuming the previous phase's output:
//!
//! 1. [`complete`] resolves arguments, flags, and the execution context into
//!    [`CreateSecretTokenOptions`]
//! 2. [`CreateSecretTokenOptions::validate`] checks required fields and yields
//!    [`ValidatedOptions`]
//! 3. [`ValidatedOptions::run`] builds the Secret, submits or simulates it, and
//!    emits the result

mod error;
mod mode;
mod secret;

pub use error::{CreateResult, CreateSecretError};
pub use mode::{DryRunFlag, ExecutionMode, ValidationDirective};
pub use secret::{
    LAST_APPLIED_CONFIG_ANNOTATION, SERVICE_ACCOUNT_NAME_ANNOTATION, SERVICE_ACCOUNT_TOKEN_TYPE,
    apply_last_applied_annotation, build_secret, secret_gvk,
};

use crate::cli::CreateSecretTokenArgs;
use crate::context::{CreateOptions, Factory, SecretClient};
use crate::printer::{self, Emitter, Printer};
use k8s_openapi::api::core::v1::Secret;
use std::fmt;
use std::io::Write;
use std::sync::Arc;

/// Everything needed to create one token secret
pub struct CreateSecretTokenOptions {
    /// Name of the secret (required)
    pub name: String,
    /// Service account the token is issued for (required)
    pub service_account: String,
    pub namespace: String,
    /// Attach `namespace` to the object itself
    pub enforce_namespace: bool,
    pub field_manager: Option<String>,
    /// Record the last-applied-configuration annotation
    pub create_annotation: bool,
    pub mode: ExecutionMode,
    pub validation_directive: ValidationDirective,
    pub client: Arc<dyn SecretClient>,
    pub emit: Emitter,
}

impl fmt::Debug for CreateSecretTokenOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CreateSecretTokenOptions")
            .field("name", &self.name)
            .field("service_account", &self.service_account)
            .field("namespace", &self.namespace)
            .field("enforce_namespace", &self.enforce_namespace)
            .field("field_manager", &self.field_manager)
            .field("create_annotation", &self.create_annotation)
            .field("mode", &self.mode)
            .field("validation_directive", &self.validation_directive)
            .finish_non_exhaustive()
    }
}

/// Resolve command-line input and the execution context into options.
///
/// Only client construction touches the environment; no requests are sent.
pub async fn complete(
    args: &CreateSecretTokenArgs,
    factory: &dyn Factory,
    out: Box<dyn Write + Send>,
) -> CreateResult<CreateSecretTokenOptions> {
    let name = name_from_args(&args.names)?;

    let client = factory
        .secret_client()
        .await
        .map_err(CreateSecretError::ClientConstruction)?;

    let mode = match args.dry_run {
        DryRunFlag::None => ExecutionMode::Normal,
        DryRunFlag::Client => ExecutionMode::ClientDryRun,
        DryRunFlag::Server => {
            let verifier = factory
                .dry_run_verifier()
                .await
                .map_err(CreateSecretError::ClientConstruction)?;
            ExecutionMode::ServerDryRun(verifier)
        }
    };

    let (namespace, enforce_namespace) = factory
        .namespace()
        .await
        .map_err(CreateSecretError::ClientConstruction)?;

    let printer = Printer::new(args.output, mode.operation());

    let options = CreateSecretTokenOptions {
        name,
        service_account: args.service_account.clone().unwrap_or_default(),
        namespace,
        enforce_namespace,
        field_manager: args.field_manager.clone().filter(|m| !m.is_empty()),
        create_annotation: args.save_config.unwrap_or(false),
        mode,
        validation_directive: args.validate.unwrap_or_default(),
        client,
        emit: printer::emitter(printer, out),
    };

    tracing::debug!("Resolved options: {:?}", options);
    Ok(options)
}

fn name_from_args(names: &[String]) -> CreateResult<String> {
    match names {
        [name] => Ok(name.clone()),
        _ => Err(CreateSecretError::MissingArgument(names.len())),
    }
}

impl CreateSecretTokenOptions {
    /// Check that the required fields are present
    pub fn validate(self) -> CreateResult<ValidatedOptions> {
        let empty_name = self.name.is_empty();
        let empty_service_account = self.service_account.is_empty();

        if empty_name && empty_service_account {
            tracing::debug!("Both the secret name and the service account are empty");
        }
        if empty_name {
            return Err(CreateSecretError::EmptyName);
        }
        if empty_service_account {
            return Err(CreateSecretError::EmptyOwningReference);
        }

        Ok(ValidatedOptions(self))
    }
}

/// Options that passed [`CreateSecretTokenOptions::validate`]
#[derive(Debug)]
pub struct ValidatedOptions(CreateSecretTokenOptions);

impl ValidatedOptions {
    pub fn options(&self) -> &CreateSecretTokenOptions {
        &self.0
    }

    /// Build the Secret and create it, or simulate creation, then emit the result.
    ///
    /// Returns the emitted object: the server's response, or the local object in
    /// client dry-run.
    pub async fn run(self) -> CreateResult<Secret> {
        let CreateSecretTokenOptions {
            name,
            service_account,
            namespace,
            enforce_namespace,
            field_manager,
            create_annotation,
            mode,
            validation_directive,
            client,
            mut emit,
        } = self.0;

        let object_namespace = enforce_namespace.then_some(namespace.as_str());
        let mut secret = build_secret(&name, object_namespace, &service_account);
        if create_annotation {
            apply_last_applied_annotation(&mut secret)?;
        }

        let mut create_options = CreateOptions {
            dry_run: false,
            field_manager,
            field_validation: validation_directive,
        };

        let secret = match mode {
            ExecutionMode::ClientDryRun => {
                tracing::debug!("Client dry-run, not sending secret/{}", name);
                secret
            }
            ExecutionMode::ServerDryRun(verifier) => {
                let gvk = secret_gvk();
                verifier
                    .has_support(&gvk)
                    .await
                    .map_err(|reason| CreateSecretError::DryRunUnsupported {
                        kind: gvk.kind.clone(),
                        reason,
                    })?;
                create_options.dry_run = true;
                create_secret(client.as_ref(), &namespace, &secret, &create_options).await?
            }
            ExecutionMode::Normal => {
                create_secret(client.as_ref(), &namespace, &secret, &create_options).await?
            }
        };

        emit(&secret).map_err(CreateSecretError::Emit)?;
        Ok(secret)
    }
}

async fn create_secret(
    client: &dyn SecretClient,
    namespace: &str,
    secret: &Secret,
    options: &CreateOptions,
) -> CreateResult<Secret> {
    tracing::debug!(
        "Creating secret/{} in namespace {} (dry_run={})",
        secret.metadata.name.as_deref().unwrap_or_default(),
        namespace,
        options.dry_run
    );

    let created = client
        .create(namespace, secret, options)
        .await
        .map_err(CreateSecretError::CreateFailed)?;

    tracing::info!(
        "Created secret/{} in namespace {}",
        created.metadata.name.as_deref().unwrap_or_default(),
        namespace
    );
    Ok(created)
}
