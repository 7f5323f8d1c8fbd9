//! CLI interface for wake.
//!
//! One command: fetch the user's recent GitHub activity and print it
//! grouped by day and repository. Flags override `~/.wake/config.toml`.

use std::io::{self, BufWriter, IsTerminal, Write};
use std::num::NonZeroU32;

use clap::Parser;
use jiff::Zoned;
use jiff::tz::TimeZone;
use tracing::info;

use crate::config::{ColorChoice, Config};
use crate::cutoff::{DEFAULT_SINCE, resolve_since};
use crate::feed::{GhFeed, MAX_PAGE_SIZE, TraversalEnd, collect_since, gh_config_dir};
use crate::identity::resolve_login;
use crate::render::Style;
use crate::report::write_report;

/// wake: what you did on GitHub, day by day.
#[derive(Debug, Parser)]
#[command(name = "wake", after_long_help = EXAMPLES_HELP)]
pub struct Cli {
    /// Show activity since this time: a date, a timestamp, `today`,
    /// `yesterday`, or a span like `3 days ago`. Defaults to `7 days ago`.
    #[arg(long)]
    since: Option<String>,

    /// GitHub login to report on. Defaults to the authenticated user.
    #[arg(long)]
    user: Option<String>,

    /// Authenticate as this identity, using `~/.wake/gh-config/<identity>/`.
    #[arg(long = "as")]
    identity: Option<String>,

    /// Events fetched per request.
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..=i64::from(MAX_PAGE_SIZE)))]
    page_size: Option<u32>,

    /// When to color headers.
    #[arg(long, value_enum)]
    color: Option<ColorChoice>,

    /// Make issue and PR titles clickable links.
    #[arg(long, overrides_with = "no_hyperlinks")]
    hyperlinks: bool,

    /// Never emit terminal hyperlinks.
    #[arg(long, overrides_with = "hyperlinks")]
    no_hyperlinks: bool,

    /// More diagnostics on stderr (-v info, -vv debug).
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

const EXAMPLES_HELP: &str = r#"Examples:
  wake                          the last 7 days, for whoever gh is logged in as
  wake --since yesterday        since midnight yesterday
  wake --since 2024-05-01       since the start of that day
  wake --since '3 hours ago'    an exact point in time
  wake --user octocat           someone else's public activity

Config (~/.wake/config.toml, all keys optional):
  since = "2 weeks ago"
  page-size = 100
  user = "octocat"
  identity = "work"
  color = "auto"
  hyperlinks = true"#;

impl Cli {
    fn hyperlinks(&self) -> Option<bool> {
        if self.hyperlinks {
            Some(true)
        } else if self.no_hyperlinks {
            Some(false)
        } else {
            None
        }
    }
}

/// Run the report, returning an error message on failure.
pub fn run(cli: &Cli, config: &Config) -> Result<(), String> {
    let since = cli
        .since
        .as_deref()
        .or(config.since.as_deref())
        .unwrap_or(DEFAULT_SINCE);
    let cutoff = resolve_since(since, &Zoned::now()).map_err(|e| e.to_string())?;

    let gh_config = cli
        .identity
        .as_deref()
        .or(config.identity.as_deref())
        .map(gh_config_dir)
        .transpose()
        .map_err(|e| e.to_string())?;

    let login = resolve_login(cli.user.as_deref(), config, || {
        GhFeed::authenticated_login(gh_config.as_deref())
    })
    .map_err(|e| format!("failed to look up the authenticated user: {e}"))?;

    info!(%login, %cutoff, "collecting activity");

    let per_page = NonZeroU32::new(cli.page_size.or(config.page_size).unwrap_or(MAX_PAGE_SIZE))
        .ok_or("page size must be at least 1")?;
    let mut feed = GhFeed::new(login, gh_config);
    let traversal = collect_since(&mut feed, per_page, cutoff).map_err(|e| e.to_string())?;

    match traversal.end {
        TraversalEnd::ReachedCutoff => {
            info!(events = traversal.events.len(), "reached cutoff");
        }
        TraversalEnd::Exhausted { oldest } => {
            info!(events = traversal.events.len(), ?oldest, "feed exhausted");
        }
    }

    let stdout = io::stdout();
    let terminal = stdout.is_terminal();
    let style = Style {
        color: match cli.color.or(config.color).unwrap_or_default() {
            ColorChoice::Auto => terminal,
            ColorChoice::Always => true,
            ColorChoice::Never => false,
        },
        hyperlinks: cli.hyperlinks().or(config.hyperlinks).unwrap_or(terminal),
    };
    colored::control::set_override(style.color);

    // The feed is newest-first; the report reads oldest-first.
    let mut out = BufWriter::new(stdout.lock());
    write_report(
        &mut out,
        traversal.events.iter().rev(),
        TimeZone::system(),
        style,
    )
    .map_err(|e| e.to_string())?;
    out.flush()
        .map_err(|e| format!("failed to write report: {e}"))?;

    Ok(())
}
