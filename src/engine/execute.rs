//! Per-PR pipeline and merge execution

use crate::engine::Engine;
use crate::error::{Error, Result};
use crate::policy;
use crate::types::{PullRequestSnapshot, Verdict};

impl Engine<'_> {
    /// Run one pull request through evaluation and, if approved, the merge
    ///
    /// Denials are diagnostics, not errors; processing continues with the
    /// next pull request.
    pub async fn process(&mut self, pr: &PullRequestSnapshot) -> Result<()> {
        match policy::evaluate(pr, self.policy, self.service, &mut self.cache).await? {
            Verdict::Approved => self.merge(pr).await,
            Verdict::Denied(reason) => {
                self.progress
                    .on_message(&format!("PR #{}: skipped ({reason})", pr.number))
                    .await;
                Ok(())
            }
        }
    }

    /// Issue the merge for an approved pull request
    ///
    /// The snapshot's head commit is the expected-head guard: the remote
    /// rejects the merge if the head has moved since evaluation. In dry-run
    /// mode the attempt is still announced but the mutating call is
    /// suppressed.
    async fn merge(&self, pr: &PullRequestSnapshot) -> Result<()> {
        if self.policy.dry_run {
            self.progress
                .on_message(&format!(
                    "PR #{}: merging {} (dry run)",
                    pr.number, pr.head_sha
                ))
                .await;
            return Ok(());
        }

        self.progress
            .on_message(&format!("PR #{}: merging {}", pr.number, pr.head_sha))
            .await;

        let outcome = self
            .service
            .merge_pull_request(pr.number, &pr.head_sha, self.policy.merge_method)
            .await?;

        if !outcome.merged {
            return Err(Error::MergeRejected {
                number: pr.number,
                message: outcome
                    .message
                    .unwrap_or_else(|| "head moved or pull request is not mergeable".to_string()),
            });
        }

        let sha = outcome.sha.as_deref().unwrap_or("(no sha)");
        self.progress
            .on_message(&format!("PR #{}: merged as {sha}", pr.number))
            .await;
        Ok(())
    }
}
