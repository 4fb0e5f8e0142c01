use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::Deserialize;
use std::io::Write;
use std::process::{Command, Stdio};
use tracing::debug;

use super::review::ReviewRequest;

/// Capability the review projector needs from the host code-review API.
///
/// Both calls are performed at most once per processed diff: stale-comment
/// cleanup always completes before the review is created.
#[async_trait]
pub trait ReviewClient: Send + Sync {
    /// Remove review comments left by a previous run on this pull request.
    /// `marker` is the annotation text identifying the bot's own comments;
    /// the matching policy is up to the implementation.
    async fn delete_stale_review_comments(
        &self,
        owner: &str,
        repo: &str,
        pull_number: u32,
        marker: &str,
    ) -> Result<()>;

    /// Submit one review carrying all suggestion comments.
    async fn create_review(&self, request: &ReviewRequest) -> Result<()>;
}

/// Default [`ReviewClient`] backed by the `gh` CLI, which handles
/// authentication and host selection.
#[derive(Debug, Clone, Copy, Default)]
pub struct GhClient;

/// Execute gh CLI command and return stdout, optionally piping a JSON body
/// to stdin. Uses spawn_blocking to avoid blocking the tokio runtime.
async fn gh_command(args: &[&str], stdin_body: Option<String>) -> Result<String> {
    let args: Vec<String> = args.iter().map(|s| s.to_string()).collect();

    tokio::task::spawn_blocking(move || {
        let output = match stdin_body {
            Some(body) => {
                let mut child = Command::new("gh")
                    .args(&args)
                    .stdin(Stdio::piped())
                    .stdout(Stdio::piped())
                    .stderr(Stdio::piped())
                    .spawn()
                    .context("Failed to execute gh CLI - is it installed?")?;
                child
                    .stdin
                    .take()
                    .context("gh stdin unavailable")?
                    .write_all(body.as_bytes())
                    .context("Failed to write request body to gh stdin")?;
                child.wait_with_output().context("Failed to wait for gh CLI")?
            }
            None => Command::new("gh")
                .args(&args)
                .output()
                .context("Failed to execute gh CLI - is it installed?")?,
        };

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            anyhow::bail!("gh command failed: {}", stderr);
        }

        String::from_utf8(output.stdout).context("gh output contains invalid UTF-8")
    })
    .await
    .context("spawn_blocking task panicked")?
}

/// Execute gh api GET with JSON output
async fn gh_api(endpoint: &str) -> Result<serde_json::Value> {
    let output = gh_command(&["api", endpoint], None).await?;
    serde_json::from_str(&output).context("Failed to parse gh api response as JSON")
}

/// Review comment fields needed for stale-comment matching.
#[derive(Debug, Clone, Deserialize)]
struct ReviewComment {
    id: u64,
    body: String,
}

impl GhClient {
    async fn fetch_review_comments(
        owner: &str,
        repo: &str,
        pull_number: u32,
    ) -> Result<Vec<ReviewComment>> {
        let json = gh_api(&format!(
            "repos/{}/{}/pulls/{}/comments?per_page=100",
            owner, repo, pull_number
        ))
        .await?;
        serde_json::from_value(json).context("Failed to parse review comments response")
    }
}

#[async_trait]
impl ReviewClient for GhClient {
    async fn delete_stale_review_comments(
        &self,
        owner: &str,
        repo: &str,
        pull_number: u32,
        marker: &str,
    ) -> Result<()> {
        let comments = Self::fetch_review_comments(owner, repo, pull_number).await?;
        let stale: Vec<u64> = comments
            .iter()
            .filter(|c| c.body.contains(marker))
            .map(|c| c.id)
            .collect();
        debug!(total = comments.len(), stale = stale.len(), "stale comment scan");

        for id in stale {
            gh_command(
                &[
                    "api",
                    "--method",
                    "DELETE",
                    &format!("repos/{}/{}/pulls/comments/{}", owner, repo, id),
                ],
                None,
            )
            .await?;
        }
        Ok(())
    }

    async fn create_review(&self, request: &ReviewRequest) -> Result<()> {
        let body = serde_json::to_string(request)
            .context("Failed to serialize review request")?;
        debug!(
            endpoint = %request.endpoint(),
            comments = request.comments.len(),
            "creating review"
        );
        gh_command(
            &[
                "api",
                "--method",
                "POST",
                "-H",
                &format!("Accept: {}", ReviewRequest::accept_header()),
                &request.endpoint(),
                "--input",
                "-",
            ],
            Some(body),
        )
        .await?;
        Ok(())
    }
}
