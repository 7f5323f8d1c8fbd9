//! Activity feed: fetch pages of events until the cutoff.
//!
//! The feed is paginated newest-first. [`collect_since`] walks it page by
//! page and stops at the first event older than the cutoff, or when the
//! feed runs out. Nothing here decodes payloads.

mod github;

pub use github::{GhFeed, gh_config_dir};

use std::io;
use std::num::NonZeroU32;

use jiff::Timestamp;
use tracing::{debug, warn};

use crate::model::{Envelope, RawEnvelope, TimestampError};

/// The largest page the events API serves.
pub const MAX_PAGE_SIZE: u32 = 100;

/// A source of event pages, newest-first.
///
/// Consecutive pages continue the same ordering. Page numbers start at 1.
pub trait EventFeed {
    fn fetch_page(&mut self, page: u32, per_page: u32) -> Result<Vec<RawEnvelope>, TransportError>;
}

/// Talking to GitHub failed.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("failed to run gh: {0}")]
    Spawn(#[from] io::Error),

    #[error("gh {command} failed: {stderr}")]
    Command { command: String, stderr: String },

    #[error("unexpected response from {endpoint}: {source}")]
    Response {
        endpoint: String,
        #[source]
        source: serde_json::Error,
    },
}

/// The traversal was aborted. No partial result survives.
#[derive(Debug, thiserror::Error)]
pub enum TraversalError {
    #[error("failed to fetch events page {page}: {source}")]
    Fetch {
        page: u32,
        #[source]
        source: TransportError,
    },

    #[error(transparent)]
    Timestamp(#[from] TimestampError),
}

/// Events at or after the cutoff, newest-first, and why fetching stopped.
#[derive(Debug)]
pub struct Traversal {
    pub events: Vec<Envelope>,
    pub end: TraversalEnd,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TraversalEnd {
    /// An event older than the cutoff was seen; everything newer is here.
    ReachedCutoff,

    /// The feed ran out first. The report covers less than was asked for.
    Exhausted {
        /// The oldest event retrieved, if any were.
        oldest: Option<Timestamp>,
    },
}

/// Fetch pages until an event falls before `cutoff` or the feed runs out.
///
/// Events exactly at the cutoff are included. A page shorter than
/// `per_page` means there are no further pages.
pub fn collect_since(
    feed: &mut impl EventFeed,
    per_page: NonZeroU32,
    cutoff: Timestamp,
) -> Result<Traversal, TraversalError> {
    let per_page = per_page.get();
    let mut events = Vec::new();
    let mut page = 1;

    loop {
        let batch = feed
            .fetch_page(page, per_page)
            .map_err(|source| TraversalError::Fetch { page, source })?;
        let fetched = batch.len();
        debug!(page, fetched, "fetched events page");

        for raw in batch {
            let envelope = Envelope::ingest(raw)?;
            if envelope.created_at < cutoff {
                return Ok(Traversal {
                    events,
                    end: TraversalEnd::ReachedCutoff,
                });
            }
            events.push(envelope);
        }

        // Newest-first: once a page ends exactly on the cutoff, nothing
        // later can fall inside the window, short page or not.
        if events.last().is_some_and(|e| e.created_at == cutoff) {
            return Ok(Traversal {
                events,
                end: TraversalEnd::ReachedCutoff,
            });
        }

        if fetched < per_page as usize {
            let oldest = events.last().map(|e| e.created_at);
            match oldest {
                Some(ts) => warn!(
                    "ran out of events before reaching the cutoff; oldest event retrieved is from {ts}"
                ),
                None => warn!("no events found"),
            }
            return Ok(Traversal {
                events,
                end: TraversalEnd::Exhausted { oldest },
            });
        }

        page += 1;
    }
}
