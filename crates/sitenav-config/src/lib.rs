//! Configuration loading for sitenav.
//!
//! Reads a site configuration from TOML, JSON or YAML (chosen by file
//! extension) and provides auto-discovery of config files in parent
//! directories.
//!
//! Every format is parsed into [`RawSiteConfig`] first and then validated
//! into a [`SiteConfig`], so the same declaration yields the same model
//! regardless of the file format.
//!
//! ## Discovery
//!
//! Without an explicit path, [`LoadedSite::load`] looks in the current
//! directory and each parent for, in order:
//!
//! - `sitenav.toml`
//! - `sitenav.json`
//! - `sitenav.yaml`

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use sitenav_model::{ModelError, RawSiteConfig, SiteConfig};

/// Configuration filenames to search for, in priority order.
pub const CONFIG_FILENAMES: [&str; 3] = ["sitenav.toml", "sitenav.json", "sitenav.yaml"];

/// Configuration file format.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Format {
    /// TOML document.
    Toml,
    /// JSON document.
    Json,
    /// YAML document.
    Yaml,
}

impl Format {
    /// Detect the format of a file from its extension.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::UnsupportedFormat` for unknown or missing extensions.
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let ext = path
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or_default();
        ext.parse()
    }

    /// Canonical file extension.
    #[must_use]
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Toml => "toml",
            Self::Json => "json",
            Self::Yaml => "yaml",
        }
    }
}

impl FromStr for Format {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "toml" => Ok(Self::Toml),
            "json" => Ok(Self::Json),
            "yaml" | "yml" => Ok(Self::Yaml),
            _ => Err(ConfigError::UnsupportedFormat(s.to_owned())),
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Explicit file not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// Discovery found no configuration file.
    #[error("No site configuration found (looked for {})", CONFIG_FILENAMES.join(", "))]
    NotDiscovered,
    /// Unknown file format.
    #[error("Unsupported configuration format: {0:?} (expected toml, json or yaml)")]
    UnsupportedFormat(String),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    /// TOML serialization error.
    #[error("TOML serialization error: {0}")]
    TomlSer(#[from] toml::ser::Error),
    /// JSON parsing or serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    /// YAML parsing or serialization error.
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    /// Declaration parsed but failed validation.
    #[error("Configuration error: {0}")]
    Model(#[from] ModelError),
}

/// Parse and validate a configuration document.
///
/// # Errors
///
/// Returns a format error if the document does not parse, or
/// `ConfigError::Model` if the declaration is invalid.
pub fn parse_str(content: &str, format: Format) -> Result<SiteConfig, ConfigError> {
    let raw: RawSiteConfig = match format {
        Format::Toml => toml::from_str(content)?,
        Format::Json => serde_json::from_str(content)?,
        Format::Yaml => serde_yaml::from_str(content)?,
    };
    tracing::debug!(
        %format,
        nav_items = raw.theme_config.nav.len(),
        sidebar_entries = raw.theme_config.sidebar.len(),
        "Parsed site configuration"
    );
    Ok(SiteConfig::try_from(raw)?)
}

/// Render a configuration in the given format.
///
/// The output parses back into an equal [`SiteConfig`].
pub fn render(site: &SiteConfig, format: Format) -> Result<String, ConfigError> {
    Ok(match format {
        Format::Toml => toml::to_string(site)?,
        Format::Json => serde_json::to_string_pretty(site)?,
        Format::Yaml => serde_yaml::to_string(site)?,
    })
}

/// Search for a config file in `start` and its parents.
///
/// Within one directory the first existing name of [`CONFIG_FILENAMES`] wins.
#[must_use]
pub fn discover_config(start: &Path) -> Option<PathBuf> {
    let mut current = start.to_path_buf();
    loop {
        let found = CONFIG_FILENAMES
            .iter()
            .map(|name| current.join(name))
            .find(|candidate| candidate.is_file());
        if found.is_some() {
            return found;
        }
        if !current.pop() {
            return None;
        }
    }
}

/// Site configuration together with where it was loaded from.
#[derive(Debug)]
pub struct LoadedSite {
    /// Validated site configuration.
    pub site: SiteConfig,
    /// Path to the config file.
    pub config_path: PathBuf,
    /// Format the file was parsed as.
    pub format: Format,
}

impl LoadedSite {
    /// Load the site configuration.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches the current directory and its parents.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, nothing is
    /// discovered, or parsing and validation fail.
    pub fn load(config_path: Option<&Path>) -> Result<Self, ConfigError> {
        let path = match config_path {
            Some(path) if !path.exists() => {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Some(path) => path.to_path_buf(),
            None => {
                let cwd = std::env::current_dir()?;
                discover_config(&cwd).ok_or(ConfigError::NotDiscovered)?
            }
        };

        Self::load_from_file(&path)
    }

    /// Load configuration from a specific file.
    ///
    /// # Errors
    ///
    /// Returns error if the extension is unknown, the file can't be read,
    /// or parsing and validation fail.
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let format = Format::from_path(path)?;
        let content = std::fs::read_to_string(path)?;
        let site = parse_str(&content, format)?;

        tracing::info!(
            path = %path.display(),
            %format,
            nav_items = site.theme().nav_items().len(),
            pages = site.page_paths().count(),
            "Loaded site configuration"
        );

        Ok(Self {
            site,
            config_path: path.to_path_buf(),
            format,
        })
    }
}
