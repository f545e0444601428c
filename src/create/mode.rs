//! Execution mode and server-side validation directive

use crate::context::DryRunVerifier;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

/// Value of the `--dry-run` flag
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum DryRunFlag {
    /// Persist the object
    #[default]
    None,
    /// Only print the object that would be sent, without sending it
    Client,
    /// Submit the request without persisting the resource
    Server,
}

/// How the create request is carried out. Chosen once during resolution.
#[derive(Clone)]
pub enum ExecutionMode {
    Normal,
    ClientDryRun,
    /// Holds the handle used to confirm server support before submission
    ServerDryRun(Arc<dyn DryRunVerifier>),
}

impl ExecutionMode {
    /// Operation text reported by the printer for this mode
    pub fn operation(&self) -> &'static str {
        match self {
            ExecutionMode::Normal => "created",
            ExecutionMode::ClientDryRun => "created (dry run)",
            ExecutionMode::ServerDryRun(_) => "created (server dry run)",
        }
    }
}

impl fmt::Debug for ExecutionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExecutionMode::Normal => f.write_str("Normal"),
            ExecutionMode::ClientDryRun => f.write_str("ClientDryRun"),
            ExecutionMode::ServerDryRun(_) => f.write_str("ServerDryRun"),
        }
    }
}

/// Server-side field validation directive sent as `fieldValidation`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValidationDirective {
    /// Fail the request on unknown or duplicate fields
    #[default]
    #[serde(alias = "true")]
    Strict,
    /// Accept the request but return warnings
    Warn,
    /// Drop unknown fields silently
    #[serde(alias = "false")]
    Ignore,
}

impl ValidationDirective {
    /// Query parameter value understood by the API server
    pub fn as_query_value(&self) -> &'static str {
        match self {
            ValidationDirective::Strict => "Strict",
            ValidationDirective::Warn => "Warn",
            ValidationDirective::Ignore => "Ignore",
        }
    }
}

impl FromStr for ValidationDirective {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "strict" | "true" => Ok(ValidationDirective::Strict),
            "warn" => Ok(ValidationDirective::Warn),
            "ignore" | "false" => Ok(ValidationDirective::Ignore),
            other => Err(format!(
                "invalid - validate option {:?}; must be one of: strict (or true), warn, ignore (or false)",
                other
            )),
        }
    }
}

impl fmt::Display for ValidationDirective {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = match self {
            ValidationDirective::Strict => "strict",
            ValidationDirective::Warn => "warn",
            ValidationDirective::Ignore => "ignore",
        };
        f.write_str(value)
    }
}
