//! GitHub feed: the user's public events via the `gh` CLI.
//!
//! Requests go through `gh api`, so authentication is whatever `gh` is
//! logged in as. An identity selects a separate `gh` config directory
//! under `~/.wake/gh-config/<identity>/`.

use std::path::{Path, PathBuf};
use std::process::Command;

use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use super::{EventFeed, TransportError};
use crate::model::RawEnvelope;

/// Events feed for one GitHub user, fetched with `gh api`.
#[derive(Debug, Clone)]
pub struct GhFeed {
    login: String,
    gh_config: Option<PathBuf>,
}

impl GhFeed {
    pub fn new(login: impl Into<String>, gh_config: Option<PathBuf>) -> Self {
        Self {
            login: login.into(),
            gh_config,
        }
    }

    /// The login `gh` is authenticated as.
    pub fn authenticated_login(gh_config: Option<&Path>) -> Result<String, TransportError> {
        #[derive(Deserialize)]
        struct GhUser {
            login: String,
        }

        let user: GhUser = gh_json("user", gh_config)?;
        Ok(user.login)
    }
}

impl EventFeed for GhFeed {
    fn fetch_page(&mut self, page: u32, per_page: u32) -> Result<Vec<RawEnvelope>, TransportError> {
        let endpoint = events_endpoint(&self.login, page, per_page);
        gh_json(&endpoint, self.gh_config.as_deref())
    }
}

fn events_endpoint(login: &str, page: u32, per_page: u32) -> String {
    format!("users/{login}/events?per_page={per_page}&page={page}")
}

/// An identity's `gh` config directory could not be located.
#[derive(Debug, thiserror::Error)]
pub enum IdentityError {
    #[error("could not determine home directory")]
    NoHome,

    #[error(
        "no GitHub config for identity '{identity}': expected directory at {}\n\
         Set up with: GH_CONFIG_DIR={} gh auth login",
        .dir.display(),
        .dir.display()
    )]
    Missing { identity: String, dir: PathBuf },
}

/// Resolve the `GH_CONFIG_DIR` for a given identity.
///
/// Each identity has its own config directory under `~/.wake/gh-config/<identity>/`.
/// The directory must exist and contain valid `gh` auth.
pub fn gh_config_dir(identity: &str) -> Result<PathBuf, IdentityError> {
    let home = dirs::home_dir().ok_or(IdentityError::NoHome)?;
    gh_config_dir_in(&home, identity)
}

fn gh_config_dir_in(home: &Path, identity: &str) -> Result<PathBuf, IdentityError> {
    let dir = home.join(".wake").join("gh-config").join(identity);
    if !dir.is_dir() {
        return Err(IdentityError::Missing {
            identity: identity.to_string(),
            dir,
        });
    }
    Ok(dir)
}

// ── gh CLI helpers ──

/// `gh api <endpoint>`, parsed as JSON.
fn gh_json<T: DeserializeOwned>(
    endpoint: &str,
    gh_config: Option<&Path>,
) -> Result<T, TransportError> {
    let stdout = run_gh(&["api", endpoint], gh_config)?;
    serde_json::from_str(&stdout).map_err(|source| TransportError::Response {
        endpoint: endpoint.to_string(),
        source,
    })
}

/// Run a gh command and return its stdout on success.
fn run_gh(args: &[&str], gh_config: Option<&Path>) -> Result<String, TransportError> {
    debug!(args = ?args, "running gh");

    let mut command = Command::new("gh");
    command.args(args);
    if let Some(dir) = gh_config {
        command.env("GH_CONFIG_DIR", dir);
    }

    let output = command.output()?;

    if !output.status.success() {
        return Err(TransportError::Command {
            command: args.join(" "),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        });
    }

    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}
