//! Output printing for created objects

use anyhow::{Context, Result};
use k8s_openapi::api::core::v1::Secret;
use serde::{Deserialize, Serialize};
use std::io::Write;

/// Output format selected with `-o/--output`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Json,
    Yaml,
    Name,
}

/// Emits a created object. Composed from a [`Printer`] and an output stream.
pub type Emitter = Box<dyn FnMut(&Secret) -> Result<()> + Send>;

/// Renders a Secret in the selected format
#[derive(Debug, Clone)]
pub struct Printer {
    format: Option<OutputFormat>,
    operation: String,
}

impl Printer {
    /// Without a format, prints `secret/NAME <operation>`
    pub fn new(format: Option<OutputFormat>, operation: impl Into<String>) -> Self {
        Self {
            format,
            operation: operation.into(),
        }
    }

    pub fn print(&self, secret: &Secret, out: &mut dyn Write) -> Result<()> {
        match self.format {
            Some(OutputFormat::Json) => {
                let json = serde_json::to_string_pretty(secret)
                    .context("Failed to serialize secret to JSON")?;
                writeln!(out, "{}", json)?;
            }
            Some(OutputFormat::Yaml) => {
                let yaml =
                    serde_yaml::to_string(secret).context("Failed to serialize secret to YAML")?;
                write!(out, "{}", yaml)?;
            }
            Some(OutputFormat::Name) => writeln!(out, "{}", resource_name(secret))?,
            None => writeln!(out, "{} {}", resource_name(secret), self.operation)?,
        }
        out.flush()?;
        Ok(())
    }
}

fn resource_name(secret: &Secret) -> String {
    format!("secret/{}", secret.metadata.name.as_deref().unwrap_or_default())
}

/// Bind a printer to an output stream
pub fn emitter(printer: Printer, mut out: Box<dyn Write + Send>) -> Emitter {
    Box::new(move |secret: &Secret| {
        printer
            .print(secret, &mut out)
            .context("Failed to print secret")
    })
}
