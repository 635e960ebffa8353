//! `sitenav check` command implementation.

use std::path::PathBuf;

use clap::Args;
use sitenav_config::LoadedSite;

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the check command.
#[derive(Args)]
pub(crate) struct CheckArgs {
    /// Path to configuration file (default: auto-discover sitenav.toml).
    #[arg(short, long, env = "SITENAV_CONFIG")]
    config: Option<PathBuf>,
}

impl CheckArgs {
    /// Execute the check command.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration can't be loaded or is invalid.
    pub(crate) fn execute(self, output: &Output) -> Result<(), CliError> {
        let loaded = LoadedSite::load(self.config.as_deref())?;

        output.highlight(loaded.site.title());
        for line in summary(&loaded) {
            output.info(&line);
        }
        output.success("Configuration is valid");

        Ok(())
    }
}

/// Summary lines describing a loaded configuration.
fn summary(loaded: &LoadedSite) -> Vec<String> {
    let site = &loaded.site;
    let groups = site
        .walk()
        .filter(|(_, node)| node.is_group())
        .count();

    vec![
        format!(
            "Config: {} ({})",
            loaded.config_path.display(),
            loaded.format
        ),
        format!("Nav links: {}", site.theme().nav_items().len()),
        format!(
            "Sidebar entries: {} ({groups} groups)",
            site.theme().sidebar().len()
        ),
        format!("Pages: {}", site.page_paths().count()),
    ]
}
