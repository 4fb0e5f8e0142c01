//! Unified diff parsing: extracting contiguous replacement edits from
//! `git diff` output.
//!
//! This module provides:
//! - Line type classification (Added, Removed, Context, Header, Meta)
//! - A total parser turning a multi-file unified diff into ordered [`Edit`]s,
//!   each anchored to an exact line range of the original file
//!
//! The parser never fails: text that does not look like a unified diff
//! simply contributes no edits. There is no "invalid diff" error.

use tracing::warn;

/// Represents the type of a line in a diff patch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineType {
    /// Line added in the new version (starts with +)
    Added,
    /// Line removed from the old version (starts with -)
    Removed,
    /// Context line, unchanged (starts with space)
    Context,
    /// Hunk header (@@ ... @@)
    Header,
    /// Metadata lines (diff --, +++, index, etc.)
    Meta,
}

/// 1-based line range in the *original* (pre-change) file.
///
/// `end` is one past the last replaced line: `end = start + removed_count`.
/// `start == end` marks a pure insertion anchored at `start` with nothing
/// to delete. This arithmetic is the anchor convention the review
/// projector relies on; it is deliberately not an inclusive range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineRange {
    pub start: u32,
    pub end: u32,
}

/// One contiguous replacement extracted from a diff hunk: replace
/// `original_range` of `file` with `replacement_lines`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edit {
    /// Post-change path, taken from the `+++ b/` header of the file section.
    pub file: String,
    /// Lines of the original file consumed by this edit.
    pub original_range: LineRange,
    /// Added lines with the leading `+` stripped, whitespace preserved.
    pub replacement_lines: Vec<String>,
}

/// Classify a line and extract its content without the prefix.
///
/// Position-independent: `---`/`+++` are always treated as [`LineType::Meta`],
/// which is only correct outside hunk bodies. Inside a hunk, a removed line
/// whose content begins with `-- ` also reads `---…`, so [`parse_git_patch`]
/// classifies hunk-body lines itself with the cursor context in hand; this
/// helper is for callers (and benches) looking at one line in isolation.
pub fn classify_line(line: &str) -> (LineType, &str) {
    if line.starts_with("@@") {
        (LineType::Header, line)
    } else if line.starts_with("+++")
        || line.starts_with("---")
        || line.starts_with("diff ")
        || line.starts_with("index ")
    {
        (LineType::Meta, line)
    } else if let Some(content) = line.strip_prefix('+') {
        (LineType::Added, content)
    } else if let Some(content) = line.strip_prefix('-') {
        (LineType::Removed, content)
    } else if let Some(content) = line.strip_prefix(' ') {
        (LineType::Context, content)
    } else {
        // Lines without prefix (shouldn't happen in valid patches, but handle gracefully)
        (LineType::Context, line)
    }
}

/// Parse a hunk header to extract the starting line number in the old file.
/// Format: @@ -old_start,old_count +new_start,new_count @@
/// The count is optional and defaults to 1 when absent.
fn parse_hunk_header(line: &str) -> Option<u32> {
    let after_minus = line.strip_prefix("@@ -")?;

    // Extract the number (stop at comma or space)
    let end_pos = after_minus.find([',', ' ']).unwrap_or(after_minus.len());
    after_minus[..end_pos].parse().ok()
}

/// Strip the single-char diff prefix (a/, b/, w/, etc.) from a --- or +++ path.
fn strip_diff_prefix(path: &str) -> &str {
    if path.len() >= 2 && path.as_bytes()[1] == b'/' {
        &path[2..]
    } else {
        path
    }
}

/// Accumulator for one contiguous run of `-` lines followed by `+` lines.
///
/// `start` is the old-file cursor at the first line of the run; the run is
/// flushed into an [`Edit`] when a context line, hunk boundary, or end of
/// section is reached.
#[derive(Debug, Default)]
struct PendingRun {
    start: Option<u32>,
    removed_count: u32,
    added: Vec<String>,
}

impl PendingRun {
    fn flush_into(&mut self, file: &str, edits: &mut Vec<Edit>) {
        let Some(start) = self.start.take() else {
            return;
        };
        edits.push(Edit {
            file: file.to_string(),
            original_range: LineRange {
                start,
                // Saturate so a hunk header claiming a start near u32::MAX
                // cannot overflow; the parser stays total.
                end: start.saturating_add(self.removed_count),
            },
            replacement_lines: std::mem::take(&mut self.added),
        });
        self.removed_count = 0;
    }
}

/// Parse a unified diff into an ordered list of [`Edit`]s.
///
/// File sections are split at `diff --git` lines, the post-change path is
/// taken from the `+++ ` header (falling back to the `--- ` path for
/// deleted files where `+++` is `/dev/null`), and each hunk body is walked
/// with a running old-file line cursor. Maximal runs of removed lines
/// immediately followed by added lines become one edit each; a context
/// line flushes the pending run and advances the cursor.
///
/// Edits are emitted in source order: file, then hunk, then segment.
/// Unrecognized input yields an empty list, never an error.
pub fn parse_git_patch(diff: &str) -> Vec<Edit> {
    let mut edits = Vec::new();

    let mut in_section = false;
    let mut file: Option<String> = None;
    let mut pending_minus_file: Option<String> = None;
    // Old-file cursor, Some only while inside a hunk body.
    let mut old_cursor: Option<u32> = None;
    let mut run = PendingRun::default();

    for line in diff.lines() {
        if line.starts_with("diff --git ") {
            if let (Some(f), Some(_)) = (&file, old_cursor) {
                run.flush_into(f, &mut edits);
            }
            in_section = true;
            file = None;
            pending_minus_file = None;
            old_cursor = None;
            continue;
        }

        if !in_section {
            continue;
        }

        if line.starts_with("@@") {
            if let Some(f) = &file {
                run.flush_into(f, &mut edits);
            }
            match parse_hunk_header(line) {
                Some(old_start) if file.is_some() => old_cursor = Some(old_start),
                _ => {
                    warn!(line, "unrecognized hunk header, skipping");
                    old_cursor = None;
                }
            }
            continue;
        }

        let Some(cursor) = old_cursor else {
            // Between the section marker and the first hunk: file headers.
            if let Some(rest) = line.strip_prefix("+++ ") {
                if rest != "/dev/null" {
                    file = Some(strip_diff_prefix(rest).to_string());
                } else if let Some(pending) = pending_minus_file.take() {
                    // Deleted file: +++ is /dev/null, use the old path.
                    file = Some(pending);
                }
            } else if let Some(rest) = line.strip_prefix("--- ") {
                if rest != "/dev/null" {
                    pending_minus_file = Some(strip_diff_prefix(rest).to_string());
                }
            }
            continue;
        };
        let f = file.as_deref().unwrap_or_default();

        if let Some(added) = line.strip_prefix('+') {
            if run.start.is_none() {
                run.start = Some(cursor);
            }
            run.added.push(added.to_string());
        } else if line.starts_with('-') {
            // A `-` after `+` lines starts a new run.
            if !run.added.is_empty() {
                run.flush_into(f, &mut edits);
            }
            if run.start.is_none() {
                run.start = Some(cursor);
            }
            run.removed_count += 1;
            old_cursor = Some(cursor.saturating_add(1));
        } else if line.is_empty() || line.starts_with(' ') {
            run.flush_into(f, &mut edits);
            old_cursor = Some(cursor.saturating_add(1));
        } else if line.starts_with('\\') {
            // "\ No newline at end of file": present in neither version, and
            // must not split a removed/added pair into two edits.
        } else {
            // Anything else ends the hunk body.
            run.flush_into(f, &mut edits);
            old_cursor = None;
        }
    }

    if let (Some(f), Some(_)) = (&file, old_cursor) {
        run.flush_into(f, &mut edits);
    }

    edits
}
