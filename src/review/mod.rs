//! Projection of parsed diff edits into a suggestion review.
//!
//! [`build_review_request`] is the pure half: one suggestion comment per
//! edit, anchored per the host API's line-range convention.
//! [`post_suggestions`] is the orchestration: parse, clear stale bot
//! comments, submit exactly one review. An empty diff short-circuits
//! before any client call.

use anyhow::Result;
use tracing::{debug, error};

use crate::diff::{parse_git_patch, Edit};
use crate::github::{DraftComment, ReviewAction, ReviewClient, ReviewRequest, Side};

/// Review coordinates plus the shared annotation text. The annotation is
/// appended to every suggestion comment and doubles as the marker used to
/// find the bot's own comments from a previous run.
#[derive(Debug, Clone)]
pub struct ReviewMeta {
    pub owner: String,
    pub repo: String,
    pub pull_number: u32,
    pub commit_id: String,
    pub comment_body: String,
}

/// Render one edit as a suggested-change comment body: the replacement
/// lines in a `suggestion` fence, followed by the shared annotation.
fn suggestion_body(edit: &Edit, annotation: &str) -> String {
    format!(
        "```suggestion\n{}\n```\n{}",
        edit.replacement_lines.join("\n"),
        annotation
    )
}

/// Project edits into a single review request, or `None` when there is
/// nothing to comment on.
///
/// Comment order preserves edit order (file, then hunk, then segment).
/// The anchor `line` is `original_range.end`; `start_line`/`start_side`
/// are set only when the edit spans more than a pure insertion point
/// (`start != end`). Sides are always RIGHT and the disposition is always
/// COMMENT.
pub fn build_review_request(edits: &[Edit], meta: &ReviewMeta) -> Option<ReviewRequest> {
    if edits.is_empty() {
        return None;
    }

    let comments = edits
        .iter()
        .map(|edit| {
            let range = edit.original_range;
            let multiline = range.start != range.end;
            DraftComment {
                body: suggestion_body(edit, &meta.comment_body),
                path: edit.file.clone(),
                side: Side::Right,
                start_side: multiline.then_some(Side::Right),
                start_line: multiline.then_some(range.start),
                line: range.end,
            }
        })
        .collect();

    Some(ReviewRequest {
        owner: meta.owner.clone(),
        repo: meta.repo.clone(),
        pull_number: meta.pull_number,
        body: meta.comment_body.clone(),
        commit_id: meta.commit_id.clone(),
        event: ReviewAction::Comment,
        comments,
    })
}

/// Parse `diff_text` and post its edits as one suggestion review.
///
/// Does nothing (no cleanup, no review) when the diff yields no edits.
/// Otherwise stale bot comments are deleted first, then the review is
/// submitted; a submission failure is logged and propagated unchanged.
/// No retries, no rollback of the cleanup.
pub async fn post_suggestions<C: ReviewClient + ?Sized>(
    client: &C,
    meta: &ReviewMeta,
    diff_text: &str,
) -> Result<()> {
    let edits = parse_git_patch(diff_text);
    let Some(request) = build_review_request(&edits, meta) else {
        debug!("diff yielded no edits, skipping review");
        return Ok(());
    };

    client
        .delete_stale_review_comments(&meta.owner, &meta.repo, meta.pull_number, &meta.comment_body)
        .await?;

    debug!(comments = request.comments.len(), "submitting suggestion review");
    client.create_review(&request).await.map_err(|err| {
        error!(%err, "failed to submit suggestion review");
        err
    })
}
