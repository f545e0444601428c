//! Configuration schema definitions
//!
//! Defines the structure of configuration files using serde for serialization.

use crate::create::ValidationDirective;
use crate::printer::OutputFormat;
use serde::{Deserialize, Serialize};

/// Field manager recorded when none is configured
pub const DEFAULT_FIELD_MANAGER: &str = "kubectl-create";

/// Root configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Field manager sent with create requests
    #[serde(default = "default_field_manager")]
    pub field_manager: String,

    /// Server-side field validation directive
    #[serde(default)]
    pub validate: ValidationDirective,

    /// Output format used when `-o` is not given
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output: Option<OutputFormat>,

    /// Always record the last-applied-configuration annotation
    #[serde(default)]
    pub save_config: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            field_manager: default_field_manager(),
            validate: ValidationDirective::default(),
            output: None,
            save_config: false,
        }
    }
}

fn default_field_manager() -> String {
    DEFAULT_FIELD_MANAGER.to_string()
}
