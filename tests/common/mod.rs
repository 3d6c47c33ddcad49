//! Shared test fixtures
//!
//! Compiled into each test binary; not every helper is used by every binary.

#![allow(dead_code)]

pub mod mock_platform;

use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use pr_autopilot::engine::Progress;
use pr_autopilot::types::PullRequestSnapshot;

/// Repository full name used throughout the tests
pub const REPO_FULL_NAME: &str = "octo/widgets";

/// A fully eligible pull request snapshot on `main`
///
/// Tests customize fields via struct update syntax.
pub fn make_pr(number: u64) -> PullRequestSnapshot {
    PullRequestSnapshot {
        number,
        base_ref: "main".to_string(),
        base_repo: REPO_FULL_NAME.to_string(),
        head_repo: Some(REPO_FULL_NAME.to_string()),
        head_sha: format!("sha-{number}"),
        merged_at: None,
        auto_merge_enabled: false,
        is_draft: false,
        labels: vec![],
        author: "octocat".to_string(),
        mergeable: Some(true),
    }
}

/// A fixed merge timestamp for already-merged fixtures
pub fn merged_timestamp() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap()
}

/// Progress sink that records every message for assertions
#[derive(Default)]
pub struct RecordingProgress {
    messages: Mutex<Vec<String>>,
}

impl RecordingProgress {
    pub fn new() -> Self {
        Self::default()
    }

    /// All messages reported so far
    pub fn messages(&self) -> Vec<String> {
        self.messages.lock().unwrap().clone()
    }

    /// Whether any reported message contains `needle`
    pub fn saw(&self, needle: &str) -> bool {
        self.messages
            .lock()
            .unwrap()
            .iter()
            .any(|m| m.contains(needle))
    }
}

#[async_trait]
impl Progress for RecordingProgress {
    async fn on_message(&self, message: &str) {
        self.messages.lock().unwrap().push(message.to_string());
    }
}
