//! Core data model for wake.
//!
//! Envelopes as they arrive from the activity feed, and the activities
//! their payloads decode into.

mod activity;
mod envelope;

pub use activity::{Activity, Issue, PullRequest};
pub use envelope::{Envelope, RawEnvelope, TimestampError};
#[cfg(test)]
pub use envelope::RawRepository;
