//! Envelope: one record from the activity feed.

use jiff::Timestamp;
use serde::Deserialize;

/// JSON shape of one element of `GET users/{login}/events`.
///
/// Only the fields the report needs. The payload stays opaque until the
/// formatter decodes it against the type tag.
#[derive(Debug, Clone, Deserialize)]
pub struct RawEnvelope {
    #[serde(rename = "type")]
    pub kind: String,
    pub created_at: String,
    pub repo: RawRepository,
    #[serde(default)]
    pub payload: serde_json::Value,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawRepository {
    pub name: String,
}

/// A feed record with its timestamp parsed into an absolute instant.
#[derive(Debug, Clone, PartialEq)]
pub struct Envelope {
    /// Type tag, e.g. `PushEvent`.
    pub kind: String,
    pub created_at: Timestamp,
    /// Owning repository, `owner/name`.
    pub project: String,
    pub payload: serde_json::Value,
}

/// An envelope's `created_at` was not a valid RFC 3339 instant.
#[derive(Debug, thiserror::Error)]
#[error("invalid timestamp {raw:?} on {kind} in {project}: {source}")]
pub struct TimestampError {
    pub kind: String,
    pub project: String,
    pub raw: String,
    #[source]
    pub source: jiff::Error,
}

impl Envelope {
    /// Parse the wire timestamp once. Offsets are normalized here so later
    /// comparisons are between instants, never strings.
    pub fn ingest(raw: RawEnvelope) -> Result<Self, TimestampError> {
        let created_at = match raw.created_at.parse::<Timestamp>() {
            Ok(ts) => ts,
            Err(source) => {
                return Err(TimestampError {
                    kind: raw.kind,
                    project: raw.repo.name,
                    raw: raw.created_at,
                    source,
                });
            }
        };

        Ok(Self {
            kind: raw.kind,
            created_at,
            project: raw.repo.name,
            payload: raw.payload,
        })
    }
}
