//! diff-suggest: turns a unified git diff into GitHub suggested-change
//! review comments.
//!
//! Built for automation that proposes textual fixes (typically an
//! auto-formatter running against a pull request): the diff is parsed into
//! discrete line-range edits, each edit becomes one inline suggestion
//! comment, and all comments are posted as a single COMMENT review.
//! Stale comments from a previous run are cleared before posting.
//!
//! The host API is reached through the [`ReviewClient`] capability;
//! [`GhClient`] is the bundled implementation backed by the `gh` CLI.

pub mod diff;
pub mod github;
pub mod review;

// Explicit re-exports - only export what is actually used
pub use diff::{classify_line, parse_git_patch, Edit, LineRange, LineType};
pub use github::{DraftComment, GhClient, ReviewAction, ReviewClient, ReviewRequest, Side};
pub use review::{build_review_request, post_suggestions, ReviewMeta};
