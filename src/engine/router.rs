//! Event routing - decides which pull requests an incoming event touches

use tracing::debug;

use crate::engine::Engine;
use crate::error::Result;
use crate::event::Event;

impl Engine<'_> {
    /// Dispatch one incoming event
    ///
    /// Re-scan triggers run the bulk sweep. A passing check run re-evaluates
    /// only its associated pull requests, unless it is this run's own check.
    /// Everything else is a no-op with a diagnostic.
    pub async fn handle_event(&mut self, event: &Event) -> Result<()> {
        match event {
            Event::BranchProtectionRule
            | Event::Push
            | Event::Schedule
            | Event::WorkflowDispatch => self.sweep().await,
            Event::CheckRun(check) => {
                if self.own_check_id == Some(check.id) {
                    self.progress
                        .on_message("ignoring our own check run")
                        .await;
                    return Ok(());
                }
                if !check.is_completed() {
                    self.progress
                        .on_message(&format!(
                            "check run {} has not completed; nothing to do",
                            check.id
                        ))
                        .await;
                    return Ok(());
                }
                if !check.has_passing_conclusion() {
                    let conclusion = check.conclusion.as_deref().unwrap_or("none");
                    self.progress
                        .on_message(&format!(
                            "check run {} concluded \"{conclusion}\"; nothing to do",
                            check.id
                        ))
                        .await;
                    return Ok(());
                }

                debug!(
                    check_id = check.id,
                    prs = ?check.pull_requests,
                    "re-evaluating PRs for passing check run"
                );
                for number in &check.pull_requests {
                    let pr = self.service.get_pull_request(*number).await?;
                    self.process(&pr).await?;
                }
                Ok(())
            }
            Event::DeploymentStatus(status) => {
                if status.is_successful() {
                    self.sweep().await
                } else {
                    self.progress
                        .on_message(&format!(
                            "deployment status is \"{}\"; nothing to do",
                            status.state
                        ))
                        .await;
                    Ok(())
                }
            }
            Event::Unsupported { name } => {
                self.progress
                    .on_message(&format!(
                        "event \"{name}\" does not trigger auto-merge; nothing to do"
                    ))
                    .await;
                Ok(())
            }
        }
    }
}
