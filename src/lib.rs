//! tokensecret library
//!
//! Creates `kubernetes.io/service-account-token` Secrets. The binary wires the
//! command line to [`create`]; the library is also used directly by tests.

pub mod cli;
pub mod config;
pub mod context;
pub mod create;
pub mod kube;
pub mod printer;

// Re-export commonly used types for convenience
pub use context::{CreateOptions, DryRunVerifier, Factory, SecretClient};
pub use create::{
    CreateSecretError, CreateSecretTokenOptions, ExecutionMode, ValidatedOptions,
    ValidationDirective, build_secret, complete,
};
pub use printer::{Emitter, OutputFormat, Printer};
