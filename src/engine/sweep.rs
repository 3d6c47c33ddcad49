//! Bulk sweep over every open pull request

use tracing::debug;

use crate::engine::Engine;
use crate::error::Result;

impl Engine<'_> {
    /// Evaluate (and merge where approved) every open pull request
    ///
    /// Pages are fetched lazily and each pull request is fully handled before
    /// the next one, bounding mutating calls to one at a time. Ordering is
    /// whatever the remote returns.
    pub async fn sweep(&mut self) -> Result<()> {
        self.progress.on_message("scanning open pull requests").await;

        let mut page = 1;
        let mut seen = 0_usize;
        loop {
            let prs = self.service.list_open_pull_requests(page).await?;
            if prs.is_empty() {
                break;
            }
            seen += prs.len();
            for pr in &prs {
                self.process(pr).await?;
            }
            page += 1;
        }

        debug!(count = seen, "sweep complete");
        Ok(())
    }
}
