//! wake configuration.
//!
//! Loaded from `~/.wake/config.toml`. Every key is optional and the file
//! itself may be absent; command-line flags override whatever it sets.

use std::path::{Path, PathBuf};
use std::{fs, io};

use clap::ValueEnum;
use serde::Deserialize;

/// wake configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct Config {
    /// Default `--since` value.
    pub since: Option<String>,

    /// Events requested per page (1 to 100).
    pub page_size: Option<u32>,

    /// GitHub login whose activity is reported.
    /// When unset, the login `gh` is authenticated as is used.
    pub user: Option<String>,

    /// `gh` identity: selects `~/.wake/gh-config/<identity>/` for auth.
    pub identity: Option<String>,

    pub color: Option<ColorChoice>,

    pub hyperlinks: Option<bool>,
}

/// When to color output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum ColorChoice {
    /// Color when stdout is a terminal.
    #[default]
    Auto,
    Always,
    Never,
}

impl Config {
    /// Load config from `~/.wake/config.toml`, or defaults if there is none.
    pub fn load() -> Result<Self, String> {
        match Self::path() {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    /// Load config from `path`. A missing file yields defaults.
    pub fn load_from(path: &Path) -> Result<Self, String> {
        let contents = match fs::read_to_string(path) {
            Ok(s) => s,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(e) => return Err(format!("failed to read {}: {e}", path.display())),
        };

        let config: Self = toml::from_str(&contents)
            .map_err(|e| format!("invalid config at {}: {e}", path.display()))?;

        if let Some(n) = config.page_size
            && !(1..=crate::feed::MAX_PAGE_SIZE).contains(&n)
        {
            return Err(format!(
                "page-size must be between 1 and {} in {}",
                crate::feed::MAX_PAGE_SIZE,
                path.display()
            ));
        }

        Ok(config)
    }

    /// The config file path: `~/.wake/config.toml`.
    pub fn path() -> Option<PathBuf> {
        dirs::home_dir().map(|h| h.join(".wake").join("config.toml"))
    }
}
