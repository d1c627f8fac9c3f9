//! Project configuration management for `fragkit.toml`.
//!
//! # Sections
//!
//! | Section | Purpose                                        |
//! |---------|------------------------------------------------|
//! | `[zip]` | Fragment archiving (source, output, fragments) |
//! | `[fix]` | Placeholder namespacing (pattern, variables)   |
//!
//! The file is optional; every field has a default.
//!
//! # Example
//!
//! ```toml
//! [zip]
//! source = "collection/fragments"
//! output = "fragment-zips"
//! fragments = ["sp-header", "sp-footer"]
//!
//! [fix]
//! pattern = "collection/fragments/*/index.html"
//! variables = ["displayStyle", "showRatings"]
//! ```

pub mod defaults;
mod error;
mod fix;
mod zip;

pub use error::ConfigError;

use self::{fix::FixConfig, zip::ZipConfig};

use crate::cli::{Cli, Commands};
use crate::placeholder::is_identifier;
use anyhow::{Result, bail};
use educe::Educe;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

// ============================================================================
// Root Configuration
// ============================================================================

/// Root configuration structure representing fragkit.toml
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct FragkitConfig {
    /// Path to the config file (set after loading, may not exist)
    #[serde(skip)]
    pub config_path: PathBuf,

    /// Fragment archiving settings
    #[serde(default)]
    pub zip: ZipConfig,

    /// Placeholder rewriting settings
    #[serde(default)]
    pub fix: FixConfig,
}

impl FragkitConfig {
    /// Parse configuration from TOML string
    pub fn from_str(content: &str) -> Result<Self, ConfigError> {
        let config: FragkitConfig = toml::from_str(content)?;
        Ok(config)
    }

    /// Load configuration from file path
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;
        Self::from_str(&content)
    }

    /// Load `fragkit.toml` for the given CLI, falling back to defaults when
    /// the file is absent, then apply CLI overrides.
    pub fn load(cli: &Cli) -> Result<Self> {
        let root = cli.root.as_deref().unwrap_or(Path::new("./"));
        let config_path = root.join(&cli.config);

        let mut config = if config_path.exists() {
            Self::from_path(&config_path)?
        } else {
            Self::default()
        };
        config.config_path = config_path;
        config.update_with_cli(cli, root);
        Ok(config)
    }

    /// Update configuration with CLI arguments
    pub fn update_with_cli(&mut self, cli: &Cli, root: &Path) {
        match &cli.command {
            Commands::Zip {
                source,
                output,
                fragments,
            } => {
                Self::update_option(&mut self.zip.source, source.as_ref());
                Self::update_option(&mut self.zip.output, output.as_ref());
                if !fragments.is_empty() {
                    self.zip.fragments = fragments.clone();
                }
            }
            Commands::Fix { pattern, .. } => {
                Self::update_option(&mut self.fix.pattern, pattern.as_ref());
            }
        }

        self.update_path_with_root(root);
    }

    /// Update config option if CLI value is provided
    fn update_option<T: Clone>(config_option: &mut T, cli_option: Option<&T>) {
        if let Some(option) = cli_option {
            *config_option = option.clone();
        }
    }

    /// Resolve all relative paths against the project root
    fn update_path_with_root(&mut self, root: &Path) {
        self.zip.source = root.join(&self.zip.source);
        self.zip.output = root.join(&self.zip.output);

        // The root is taken literally, only the configured part is a pattern
        if Path::new(&self.fix.pattern).is_relative() {
            let root = glob::Pattern::escape(&root.to_string_lossy());
            self.fix.pattern = Path::new(&root)
                .join(&self.fix.pattern)
                .to_string_lossy()
                .into_owned();
        }
    }

    /// Validate configuration for the current command
    pub fn validate(&self, cli: &Cli) -> Result<()> {
        match &cli.command {
            Commands::Zip { .. } => {
                if self.zip.fragments.is_empty() {
                    bail!(ConfigError::Validation(
                        "[zip.fragments] must not be empty".into()
                    ));
                }
                if let Some(name) = self.zip.fragments.iter().find(|n| !is_fragment_name(n)) {
                    bail!(ConfigError::Validation(format!(
                        "[zip.fragments] `{name}` is not a plain directory name"
                    )));
                }
            }
            Commands::Fix { .. } => {
                if self.fix.variables.is_empty() {
                    bail!(ConfigError::Validation(
                        "[fix.variables] must not be empty".into()
                    ));
                }
                if let Some(name) = self.fix.variables.iter().find(|v| !is_identifier(v)) {
                    bail!(ConfigError::Validation(format!(
                        "[fix.variables] `{name}` is not an identifier"
                    )));
                }
                if let Err(err) = glob::Pattern::new(&self.fix.pattern) {
                    bail!(ConfigError::Validation(format!(
                        "[fix.pattern] is not a valid glob: {err}"
                    )));
                }
            }
        }
        Ok(())
    }
}

/// A fragment name must stay inside the source directory.
fn is_fragment_name(name: &str) -> bool {
    !name.is_empty() && name != "." && name != ".." && !name.contains(['/', '\\'])
}
