//! Activity: what an envelope's payload says happened.
//!
//! One variant per event type the report knows how to describe. Field names
//! follow the GitHub events API so each payload struct deserializes directly.

use serde::Deserialize;

/// A decoded event payload.
///
/// Large variants are boxed to keep the enum small.
#[derive(Debug, Clone, PartialEq)]
pub enum Activity {
    Push(PushPayload),
    Create(RefPayload),
    Delete(RefPayload),
    Fork(ForkPayload),
    Issue(Box<IssuePayload>),
    IssueComment(Box<IssueCommentPayload>),
    PullRequest(Box<PullRequestPayload>),
    PullRequestReview(Box<PullRequestReviewPayload>),
    PullRequestReviewComment(Box<PullRequestReviewCommentPayload>),
    Release(ReleasePayload),
    /// Repository made public. No payload.
    Public,
    /// Repository starred. No payload.
    Watch,
    /// An event type the report doesn't model. Carries the type tag.
    Other(String),
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PushPayload {
    #[serde(rename = "ref")]
    pub git_ref: String,
    pub distinct_size: u64,
}

/// Shared by `CreateEvent` and `DeleteEvent`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RefPayload {
    /// `None` when the whole repository was created.
    #[serde(rename = "ref")]
    pub git_ref: Option<String>,
    pub ref_type: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ForkPayload {
    pub forkee: Forkee,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Forkee {
    pub full_name: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct IssuePayload {
    pub action: String,
    pub issue: Issue,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct IssueCommentPayload {
    pub action: String,
    pub issue: Issue,
}

/// An issue as it appears in issue and issue-comment payloads.
///
/// The API models pull requests as issues too; those carry a non-null
/// `pull_request` link object.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Issue {
    pub number: u64,
    pub title: String,
    #[serde(default)]
    pub pull_request: Option<serde_json::Value>,
    #[serde(default)]
    pub html_url: Option<String>,
}

impl Issue {
    pub fn is_pull_request(&self) -> bool {
        self.pull_request.is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PullRequestPayload {
    pub action: String,
    pub pull_request: PullRequest,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PullRequest {
    pub number: u64,
    pub title: String,
    #[serde(default)]
    pub html_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PullRequestReviewPayload {
    pub pull_request: PullRequest,
    pub review: Review,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Review {
    /// e.g. `approved`, `changes_requested`, `commented`.
    pub state: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PullRequestReviewCommentPayload {
    pub pull_request: PullRequest,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ReleasePayload {
    pub release: Release,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Release {
    #[serde(default)]
    pub name: Option<String>,
    pub tag_name: String,
}

impl Release {
    /// The release name, or its tag when the release is unnamed.
    pub fn display_name(&self) -> &str {
        match self.name.as_deref() {
            Some(name) if !name.is_empty() => name,
            _ => &self.tag_name,
        }
    }
}
