//! `sitenav export` command implementation.

use std::path::{Path, PathBuf};

use clap::Args;
use sitenav_config::{Format, LoadedSite, render};

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the export command.
#[derive(Args)]
pub(crate) struct ExportArgs {
    /// Path to configuration file (default: auto-discover sitenav.toml).
    #[arg(short, long, env = "SITENAV_CONFIG")]
    config: Option<PathBuf>,

    /// Output format: toml, json or yaml (default: format of the config file).
    #[arg(short, long)]
    format: Option<Format>,

    /// Write to this file instead of stdout.
    #[arg(short, long)]
    output: Option<PathBuf>,
}

impl ExportArgs {
    /// Execute the export command.
    pub(crate) fn execute(self, output: &Output) -> Result<(), CliError> {
        let loaded = LoadedSite::load(self.config.as_deref())?;
        let format = self.format.unwrap_or(loaded.format);
        let rendered = render(&loaded.site, format)?;
        tracing::debug!(%format, bytes = rendered.len(), "Rendered site configuration");

        match &self.output {
            Some(path) => {
                write_export(path, &rendered)?;
                output.success(&format!("Exported {format} to {}", path.display()));
            }
            None => output.data(rendered.trim_end()),
        }

        Ok(())
    }
}

/// Write rendered output, creating parent directories as needed.
fn write_export(path: &Path, rendered: &str) -> Result<(), CliError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, rendered)?;
    Ok(())
}
