//! tokensecret - create service-account token secrets
//!
//! Resolves the command line and kubeconfig, validates the request, and creates
//! (or simulates creating) a token Secret for a service account.

use anyhow::{Context, Result};
use clap::Parser;
use std::process::ExitCode;
use tokensecret::cli::{self, Args, Command};
use tokensecret::config::ConfigLoader;
use tokensecret::create;
use tokensecret::kube::KubeFactory;

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::debug!("Command failed: {:?}", e);
            eprintln!("{}", cli::format_error(&e));
            ExitCode::FAILURE
        }
    }
}

async fn run(args: Args) -> Result<()> {
    let log_file = cli::init_logging(args.debug)?;
    if let Some(ref log_path) = log_file {
        eprintln!(
            "Debug logging enabled. Logs written to: {}",
            log_path.display()
        );
    }

    match args.command {
        Command::Create(create_args) => {
            let config = ConfigLoader::load().context("Failed to load configuration")?;
            let create_args = create_args.apply_config(&config);
            let factory = KubeFactory::new(args.connection);

            let options =
                create::complete(&create_args, &factory, Box::new(std::io::stdout())).await?;
            options.validate()?.run().await?;
        }
        Command::Config { subcommand } => cli::handle_config_command(subcommand)?,
        Command::Version => cli::display_version(),
    }

    Ok(())
}
