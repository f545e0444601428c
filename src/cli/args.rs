//! Command-line arguments

use crate::config::Config;
use crate::create::{DryRunFlag, ValidationDirective};
use crate::printer::OutputFormat;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use super::ConfigSubcommand;

/// tokensecret - create service-account token secrets
#[derive(Parser, Debug)]
#[command(name = "tokensecret")]
#[command(about = "Create service-account token secrets on a Kubernetes cluster", long_about = None)]
pub struct Args {
    /// Enable debug logging
    #[arg(long, short = 'd', global = true)]
    pub debug: bool,

    #[command(flatten)]
    pub connection: ConnectionArgs,

    #[command(subcommand)]
    pub command: Command,
}

/// Main commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create a secret token for a service account
    #[command(
        after_help = "Examples:\n  # Create a token secret for the builder service account\n  tokensecret create my-secret --serviceaccount=builder"
    )]
    Create(CreateSecretTokenArgs),
    /// Configuration management
    Config {
        #[command(subcommand)]
        subcommand: ConfigSubcommand,
    },
    /// Display version information
    Version,
}

/// Cluster connection flags
#[derive(clap::Args, Debug, Clone, Default)]
pub struct ConnectionArgs {
    /// Namespace for the request; also recorded on the created object
    #[arg(long, short = 'n', global = true)]
    pub namespace: Option<String>,

    /// Kubeconfig context to use
    #[arg(long, global = true)]
    pub context: Option<String>,

    /// Path to the kubeconfig file
    #[arg(long, global = true)]
    pub kubeconfig: Option<PathBuf>,
}

/// Flags for `create`
#[derive(clap::Args, Debug, Clone, Default)]
pub struct CreateSecretTokenArgs {
    /// Name of the secret
    #[arg(value_name = "NAME")]
    pub names: Vec<String>,

    /// ServiceAccount that the token is issued for
    #[arg(long = "serviceaccount")]
    pub service_account: Option<String>,

    /// Name of the manager used to track field ownership
    #[arg(long)]
    pub field_manager: Option<String>,

    /// Save the configuration of the object in its last-applied-configuration annotation
    #[arg(
        long,
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "true"
    )]
    pub save_config: Option<bool>,

    /// Simulate the request instead of persisting it
    #[arg(
        long,
        value_enum,
        default_value_t = DryRunFlag::None,
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "client"
    )]
    pub dry_run: DryRunFlag,

    /// Server-side field validation: strict (or true), warn, ignore (or false)
    #[arg(
        long,
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "strict"
    )]
    pub validate: Option<ValidationDirective>,

    /// Output format
    #[arg(long, short = 'o', value_enum)]
    pub output: Option<OutputFormat>,
}

impl CreateSecretTokenArgs {
    /// Fill unset flags from configuration. Flags always win.
    pub fn apply_config(mut self, config: &Config) -> Self {
        if self.field_manager.is_none() {
            self.field_manager = Some(config.field_manager.clone());
        }
        self.validate = self.validate.or(Some(config.validate));
        self.output = self.output.or(config.output);
        self.save_config = self.save_config.or(Some(config.save_config));
        self
    }
}
