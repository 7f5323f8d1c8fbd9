//! Event formatting: decode a payload by type tag and describe it in one line.
//!
//! Every event type the report understands is a variant of [`Activity`];
//! anything else is shown by its type tag alone. Rendering never writes
//! output and never appends a line terminator.

use serde::de::DeserializeOwned;

use crate::model::{Activity, Issue, PullRequest};

/// A payload didn't have the shape its type tag promises.
#[derive(Debug, thiserror::Error)]
#[error("malformed {kind} payload: {source}")]
pub struct DecodeError {
    pub kind: String,
    #[source]
    pub source: serde_json::Error,
}

/// Presentation options layered on top of the plain text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Style {
    /// Color section headers.
    pub color: bool,
    /// Wrap issue and PR references in terminal hyperlinks.
    pub hyperlinks: bool,
}

/// Decode and render an event in one step.
pub fn format_event(
    kind: &str,
    payload: &serde_json::Value,
    style: Style,
) -> Result<String, DecodeError> {
    Ok(Activity::decode(kind, payload)?.render(style))
}

impl Activity {
    /// Decode a payload according to its type tag.
    ///
    /// Unknown tags decode to [`Activity::Other`]; that is not an error.
    pub fn decode(kind: &str, payload: &serde_json::Value) -> Result<Self, DecodeError> {
        let activity = match kind {
            "PushEvent" => Self::Push(decode_payload(kind, payload)?),
            "CreateEvent" => Self::Create(decode_payload(kind, payload)?),
            "DeleteEvent" => Self::Delete(decode_payload(kind, payload)?),
            "ForkEvent" => Self::Fork(decode_payload(kind, payload)?),
            "IssuesEvent" => Self::Issue(decode_payload(kind, payload)?),
            "IssueCommentEvent" => Self::IssueComment(decode_payload(kind, payload)?),
            "PullRequestEvent" => Self::PullRequest(decode_payload(kind, payload)?),
            "PullRequestReviewEvent" => Self::PullRequestReview(decode_payload(kind, payload)?),
            "PullRequestReviewCommentEvent" => {
                Self::PullRequestReviewComment(decode_payload(kind, payload)?)
            }
            "ReleaseEvent" => Self::Release(decode_payload(kind, payload)?),
            "PublicEvent" => Self::Public,
            "WatchEvent" => Self::Watch,
            other => Self::Other(other.to_string()),
        };
        Ok(activity)
    }

    /// Describe the activity in a single line.
    pub fn render(&self, style: Style) -> String {
        match self {
            Self::Push(p) => format!("pushed {} commits to {}", p.distinct_size, p.git_ref),
            Self::Create(p) => describe_ref("created", &p.ref_type, p.git_ref.as_deref()),
            Self::Delete(p) => describe_ref("deleted", &p.ref_type, p.git_ref.as_deref()),
            Self::Fork(p) => format!("forked repository (creating {})", p.forkee.full_name),
            Self::Issue(p) => {
                format!("{} issue {}", p.action, issue_reference(&p.issue, style))
            }
            Self::IssueComment(p) => {
                let noun = if p.issue.is_pull_request() {
                    "PR"
                } else {
                    "issue"
                };
                format!("commented on {noun} {}", issue_reference(&p.issue, style))
            }
            Self::PullRequest(p) => format!(
                "{} PR {}",
                p.action,
                pull_request_reference(&p.pull_request, style)
            ),
            Self::PullRequestReview(p) => format!(
                "reviewed PR {} ({})",
                pull_request_reference(&p.pull_request, style),
                p.review.state
            ),
            Self::PullRequestReviewComment(p) => format!(
                "left review comment on PR {}",
                pull_request_reference(&p.pull_request, style)
            ),
            Self::Release(p) => format!("released {}", p.release.display_name()),
            Self::Public => "made repository public".to_string(),
            Self::Watch => "starred repository".to_string(),
            Self::Other(kind) => kind.clone(),
        }
    }
}

fn decode_payload<T: DeserializeOwned>(
    kind: &str,
    payload: &serde_json::Value,
) -> Result<T, DecodeError> {
    T::deserialize(payload).map_err(|source| DecodeError {
        kind: kind.to_string(),
        source,
    })
}

fn describe_ref(verb: &str, ref_type: &str, git_ref: Option<&str>) -> String {
    match git_ref {
        Some(r) => format!("{verb} {ref_type} {r}"),
        None => format!("{verb} {ref_type}"),
    }
}

fn issue_reference(issue: &Issue, style: Style) -> String {
    reference(&issue.title, issue.number, issue.html_url.as_deref(), style)
}

fn pull_request_reference(pr: &PullRequest, style: Style) -> String {
    reference(&pr.title, pr.number, pr.html_url.as_deref(), style)
}

/// `"<title>" (#<number>)`, hyperlinked as a whole when enabled.
fn reference(title: &str, number: u64, url: Option<&str>, style: Style) -> String {
    let text = format!("\"{title}\" (#{number})");
    match url {
        Some(url) if style.hyperlinks => hyperlink(&text, url),
        _ => text,
    }
}

/// Wrap `text` in an OSC 8 terminal hyperlink to `url`.
pub fn hyperlink(text: &str, url: &str) -> String {
    format!("\x1b]8;;{url}\x1b\\{text}\x1b]8;;\x1b\\")
}

#[cfg(test)]
mod tests {
    use super::*;

    use serde_json::json;

    fn plain(kind: &str, payload: &serde_json::Value) -> String {
        format_event(kind, payload, Style::default()).unwrap()
    }

    // ── Per-type rendering ──

    #[test]
    fn push() {
        let payload = json!({"ref": "refs/heads/main", "size": 4, "distinct_size": 3});
        assert_eq!(
            plain("PushEvent", &payload),
            "pushed 3 commits to refs/heads/main"
        );
    }

    #[test]
    fn create_and_delete_refs() {
        let branch = json!({"ref": "fix-widget", "ref_type": "branch"});
        assert_eq!(plain("CreateEvent", &branch), "created branch fix-widget");
        assert_eq!(plain("DeleteEvent", &branch), "deleted branch fix-widget");

        let tag = json!({"ref": "v1.0.0", "ref_type": "tag"});
        assert_eq!(plain("CreateEvent", &tag), "created tag v1.0.0");
    }

    #[test]
    fn create_repository_has_no_ref() {
        let payload = json!({"ref": null, "ref_type": "repository"});
        assert_eq!(plain("CreateEvent", &payload), "created repository");
    }

    #[test]
    fn fork() {
        let payload = json!({"forkee": {"full_name": "octocat/hello-world"}});
        assert_eq!(
            plain("ForkEvent", &payload),
            "forked repository (creating octocat/hello-world)"
        );
    }

    #[test]
    fn issue() {
        let payload = json!({
            "action": "opened",
            "issue": {"number": 42, "title": "Widget crashes"}
        });
        assert_eq!(
            plain("IssuesEvent", &payload),
            r#"opened issue "Widget crashes" (#42)"#
        );
    }

    #[test]
    fn issue_comment_on_pull_request() {
        let payload = json!({
            "action": "created",
            "issue": {
                "number": 7,
                "title": "Add fork support",
                "pull_request": {"url": "https://api.github.com/repos/o/r/pulls/7"}
            }
        });
        assert_eq!(
            plain("IssueCommentEvent", &payload),
            r#"commented on PR "Add fork support" (#7)"#
        );
    }

    #[test]
    fn issue_comment_on_issue() {
        let payload = json!({
            "action": "created",
            "issue": {"number": 7, "title": "Add fork support", "pull_request": null}
        });
        assert_eq!(
            plain("IssueCommentEvent", &payload),
            r#"commented on issue "Add fork support" (#7)"#
        );

        let absent = json!({
            "action": "created",
            "issue": {"number": 7, "title": "Add fork support"}
        });
        assert_eq!(
            plain("IssueCommentEvent", &absent),
            r#"commented on issue "Add fork support" (#7)"#
        );
    }

    #[test]
    fn pull_request() {
        let payload = json!({
            "action": "closed",
            "number": 12,
            "pull_request": {"number": 12, "title": "Trim dead code"}
        });
        assert_eq!(
            plain("PullRequestEvent", &payload),
            r#"closed PR "Trim dead code" (#12)"#
        );
    }

    #[test]
    fn pull_request_review() {
        let payload = json!({
            "action": "created",
            "pull_request": {"number": 12, "title": "Trim dead code"},
            "review": {"state": "approved"}
        });
        assert_eq!(
            plain("PullRequestReviewEvent", &payload),
            r#"reviewed PR "Trim dead code" (#12) (approved)"#
        );
    }

    #[test]
    fn pull_request_review_comment() {
        let payload = json!({
            "action": "created",
            "pull_request": {"number": 12, "title": "Trim dead code"},
            "comment": {"body": "nit"}
        });
        assert_eq!(
            plain("PullRequestReviewCommentEvent", &payload),
            r#"left review comment on PR "Trim dead code" (#12)"#
        );
    }

    #[test]
    fn release_prefers_name_then_tag() {
        let named = json!({"release": {"name": "Spring", "tag_name": "v2.0.0"}});
        assert_eq!(plain("ReleaseEvent", &named), "released Spring");

        let unnamed = json!({"release": {"name": null, "tag_name": "v2.0.0"}});
        assert_eq!(plain("ReleaseEvent", &unnamed), "released v2.0.0");
    }

    #[test]
    fn fixed_text_events_ignore_payload() {
        let junk = json!("not an object");
        assert_eq!(plain("PublicEvent", &junk), "made repository public");
        assert_eq!(plain("WatchEvent", &junk), "starred repository");
    }

    #[test]
    fn unknown_type_renders_its_tag() {
        let payload = json!({"anything": true});
        assert_eq!(plain("SponsorshipEvent", &payload), "SponsorshipEvent");
    }

    // ── Decode failures ──

    #[test]
    fn missing_required_field_is_decode_error() {
        let payload = json!({"ref": "refs/heads/main"});
        let err = format_event("PushEvent", &payload, Style::default()).unwrap_err();
        assert_eq!(err.kind, "PushEvent");
        assert!(err.to_string().contains("distinct_size"));
    }

    #[test]
    fn mistyped_field_is_decode_error() {
        let payload = json!({
            "action": "opened",
            "issue": {"number": "forty-two", "title": "Widget crashes"}
        });
        let err = format_event("IssuesEvent", &payload, Style::default()).unwrap_err();
        assert_eq!(err.kind, "IssuesEvent");
    }

    // ── Hyperlinks ──

    #[test]
    fn hyperlink_wraps_whole_reference() {
        let payload = json!({
            "action": "opened",
            "pull_request": {
                "number": 3,
                "title": "Fix",
                "html_url": "https://github.com/o/r/pull/3"
            }
        });
        let style = Style {
            hyperlinks: true,
            ..Style::default()
        };
        let line = format_event("PullRequestEvent", &payload, style).unwrap();
        assert_eq!(
            line,
            "opened PR \x1b]8;;https://github.com/o/r/pull/3\x1b\\\"Fix\" (#3)\x1b]8;;\x1b\\"
        );
    }

    #[test]
    fn hyperlink_skipped_without_url() {
        let payload = json!({
            "action": "opened",
            "issue": {"number": 3, "title": "Fix"}
        });
        let style = Style {
            hyperlinks: true,
            ..Style::default()
        };
        let line = format_event("IssuesEvent", &payload, style).unwrap();
        assert_eq!(line, r#"opened issue "Fix" (#3)"#);
    }
}
