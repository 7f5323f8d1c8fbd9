//! Login resolution: whose activity to report.
//!
//! Rather than requiring `--user` on every invocation, the login is resolved
//! through a chain:
//!
//! 1. `--user <login>`: explicit per-command override
//! 2. `WAKE_USER` env var
//! 3. `user` in `~/.wake/config.toml`
//! 4. the login `gh` is authenticated as

use std::env;

use crate::config::Config;

/// Resolve the login from the tiered resolution chain.
///
/// `lookup` asks GitHub who is authenticated and is only called when
/// nothing earlier in the chain yields a value.
pub fn resolve_login<E>(
    explicit: Option<&str>,
    config: &Config,
    lookup: impl FnOnce() -> Result<String, E>,
) -> Result<String, E> {
    resolve_login_with(explicit, env::var("WAKE_USER").ok(), config, lookup)
}

fn resolve_login_with<E>(
    explicit: Option<&str>,
    from_env: Option<String>,
    config: &Config,
    lookup: impl FnOnce() -> Result<String, E>,
) -> Result<String, E> {
    // 1. Explicit --user flag.
    if let Some(login) = explicit.filter(|s| !s.is_empty()) {
        return Ok(login.to_string());
    }

    // 2. WAKE_USER environment variable.
    if let Some(login) = from_env.filter(|s| !s.is_empty()) {
        return Ok(login);
    }

    // 3. ~/.wake/config.toml.
    if let Some(login) = config.user.as_deref().filter(|s| !s.is_empty()) {
        return Ok(login.to_string());
    }

    // 4. Whoever gh is logged in as.
    lookup()
}
