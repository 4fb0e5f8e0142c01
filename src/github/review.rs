//! Request payloads for the pull-request review API.
//!
//! Shapes mirror the GitHub REST `POST /repos/{owner}/{repo}/pulls/{n}/reviews`
//! endpoint; optional fields are dropped from the serialized JSON so the
//! payload stays within the API's oneOf schema for single-line comments.

use serde::Serialize;

/// Which side of the split diff a comment anchors to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Side {
    Left,
    Right,
}

/// Review disposition. Suggestion reviews are always submitted as
/// [`ReviewAction::Comment`]; the other variants exist for completeness of
/// the API surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReviewAction {
    Approve,
    RequestChanges,
    Comment,
}

/// One inline comment of a pending review.
///
/// `line` is the comment anchor; `start_line`/`start_side` are present only
/// for multi-line comments (`start_line < line`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DraftComment {
    pub body: String,
    pub path: String,
    pub side: Side,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_side: Option<Side>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_line: Option<u32>,
    pub line: u32,
}

/// The single outbound artifact: one review carrying every suggestion
/// comment, anchored at `commit_id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReviewRequest {
    pub owner: String,
    pub repo: String,
    pub pull_number: u32,
    pub body: String,
    pub commit_id: String,
    pub event: ReviewAction,
    pub comments: Vec<DraftComment>,
}

impl ReviewRequest {
    /// Media type preview required for multi-line suggestion rendering.
    pub const fn accept_header() -> &'static str {
        "application/vnd.github.comfort-fade-preview+json"
    }

    /// API path for this review, relative to the host root.
    pub fn endpoint(&self) -> String {
        format!(
            "repos/{}/{}/pulls/{}/reviews",
            self.owner, self.repo, self.pull_number
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_multiline_comment_serialization() {
        let comment = DraftComment {
            body: "b".to_string(),
            path: "src/a.rs".to_string(),
            side: Side::Right,
            start_side: Some(Side::Right),
            start_line: Some(195),
            line: 200,
        };
        assert_eq!(
            serde_json::to_value(&comment).unwrap(),
            json!({
                "body": "b",
                "path": "src/a.rs",
                "side": "RIGHT",
                "start_side": "RIGHT",
                "start_line": 195,
                "line": 200,
            })
        );
    }

    #[test]
    fn test_single_line_comment_omits_start_fields() {
        let comment = DraftComment {
            body: "b".to_string(),
            path: "src/a.rs".to_string(),
            side: Side::Right,
            start_side: None,
            start_line: None,
            line: 12,
        };
        let value = serde_json::to_value(&comment).unwrap();
        let object = value.as_object().unwrap();
        assert!(!object.contains_key("start_line"));
        assert!(!object.contains_key("start_side"));
        assert_eq!(object["line"], json!(12));
    }

    #[test]
    fn test_review_action_wire_values() {
        assert_eq!(
            serde_json::to_value(ReviewAction::Comment).unwrap(),
            json!("COMMENT")
        );
        assert_eq!(
            serde_json::to_value(ReviewAction::RequestChanges).unwrap(),
            json!("REQUEST_CHANGES")
        );
        assert_eq!(
            serde_json::to_value(ReviewAction::Approve).unwrap(),
            json!("APPROVE")
        );
    }

    #[test]
    fn test_endpoint() {
        let request = ReviewRequest {
            owner: "getsentry".to_string(),
            repo: "sentry".to_string(),
            pull_number: 1337,
            body: String::new(),
            commit_id: "123".to_string(),
            event: ReviewAction::Comment,
            comments: vec![],
        };
        assert_eq!(request.endpoint(), "repos/getsentry/sentry/pulls/1337/reviews");
    }
}
