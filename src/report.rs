//! Report printing: events grouped by local day, then by repository.
//!
//! Input must be oldest-first. A day header starts each new local
//! calendar day, a repository header starts each run of events in the
//! same repository within a day, and every event gets one line.
//!
//! ```text
//! Wednesday, May 1
//! ------------------------------------------------
//! octocat/wake
//!   09:05  pushed 2 commits to refs/heads/main
//!
//! octocat/hello-world
//!   13:00  created branch fix-widget
//! ```

use std::io::{self, Write};

use colored::Colorize;
use jiff::Zoned;
use jiff::civil::Date;
use jiff::tz::TimeZone;

use crate::model::Envelope;
use crate::render::{DecodeError, Style, format_event};

const DAY_FORMAT: &str = "%A, %B %-d";
const TIME_FORMAT: &str = "%H:%M";
const RULE_WIDTH: usize = 48;

#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error("failed to write report: {0}")]
    Io(#[from] io::Error),
}

/// Which headers an event opens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Change {
    pub day: bool,
    pub project: bool,
    /// A blank line goes before the headers.
    pub separated: bool,
}

/// The last day and repository a header was printed for.
///
/// Fresh per report. Changing day forgets the repository, so each day
/// restates it.
#[derive(Debug, Default)]
pub struct Grouping {
    last_day: Option<Date>,
    last_project: Option<String>,
}

impl Grouping {
    /// Advance past an event on `day` in `project`.
    pub fn advance(&mut self, day: Date, project: &str) -> Change {
        let started = self.last_day.is_some();

        let new_day = self.last_day != Some(day);
        if new_day {
            self.last_day = Some(day);
            self.last_project = None;
        }

        let new_project = self.last_project.as_deref() != Some(project);
        if new_project {
            self.last_project = Some(project.to_string());
        }

        Change {
            day: new_day,
            project: new_project,
            separated: started && (new_day || new_project),
        }
    }
}

/// Writes a grouped report one event at a time.
pub struct Printer<W> {
    out: W,
    zone: TimeZone,
    style: Style,
    grouping: Grouping,
}

impl<W: Write> Printer<W> {
    pub fn new(out: W, zone: TimeZone, style: Style) -> Self {
        Self {
            out,
            zone,
            style,
            grouping: Grouping::default(),
        }
    }

    /// Print one event, preceded by whatever headers it opens.
    ///
    /// The payload is decoded before anything is written, so a malformed
    /// event leaves no partial output behind.
    pub fn print(&mut self, event: &Envelope) -> Result<(), ReportError> {
        let message = format_event(&event.kind, &event.payload, self.style)?;
        let local = event.created_at.to_zoned(self.zone.clone());

        let change = self.grouping.advance(local.date(), &event.project);
        if change.separated {
            writeln!(self.out)?;
        }
        if change.day {
            self.day_header(&local)?;
        }
        if change.project {
            self.project_header(&event.project)?;
        }

        writeln!(self.out, "  {}  {message}", local.strftime(TIME_FORMAT))?;
        Ok(())
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn day_header(&mut self, local: &Zoned) -> io::Result<()> {
        let title = local.strftime(DAY_FORMAT).to_string();
        if self.style.color {
            writeln!(self.out, "{}", title.bold())?;
        } else {
            writeln!(self.out, "{title}")?;
        }
        writeln!(self.out, "{}", "-".repeat(RULE_WIDTH))
    }

    fn project_header(&mut self, project: &str) -> io::Result<()> {
        if self.style.color {
            writeln!(self.out, "{}", project.cyan().bold())
        } else {
            writeln!(self.out, "{project}")
        }
    }
}

/// Print `events`, oldest-first, as a grouped report.
pub fn write_report<'a, W: Write>(
    out: W,
    events: impl IntoIterator<Item = &'a Envelope>,
    zone: TimeZone,
    style: Style,
) -> Result<W, ReportError> {
    let mut printer = Printer::new(out, zone, style);
    for event in events {
        printer.print(event)?;
    }
    Ok(printer.into_inner())
}
