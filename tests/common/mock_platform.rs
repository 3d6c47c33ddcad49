//! Mock repository service for testing
//!
//! These are test utilities - not all may be used in current tests but are
//! available for future test development.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use pr_autopilot::error::{Error, Result};
use pr_autopilot::platform::RepoService;
use pr_autopilot::types::{
    BranchProtection, MergeMethod, MergeOutcome, PullRequestSnapshot, RepoId,
};

/// Call record for `merge_pull_request`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeCall {
    pub number: u64,
    pub expected_head_sha: String,
    pub method: Option<MergeMethod>,
}

/// Simple mock repository service for testing
///
/// Manually implements `RepoService` with response maps, call tracking for
/// verification and error injection for failure path testing. Unconfigured
/// branches read as unprotected; unconfigured merges succeed.
pub struct MockRepoService {
    repo: RepoId,
    // Response maps
    pages: Mutex<Vec<Vec<PullRequestSnapshot>>>,
    pr_responses: Mutex<HashMap<u64, PullRequestSnapshot>>,
    branch_responses: Mutex<HashMap<String, BranchProtection>>,
    merge_responses: Mutex<HashMap<u64, MergeOutcome>>,
    // Call tracking
    list_calls: Mutex<Vec<u32>>,
    get_pr_calls: Mutex<Vec<u64>>,
    branch_calls: Mutex<Vec<String>>,
    merge_calls: Mutex<Vec<MergeCall>>,
    // Error injection
    error_on_branch: Mutex<Option<String>>,
    error_on_merge: Mutex<Option<String>>,
}

impl Default for MockRepoService {
    fn default() -> Self {
        Self::new()
    }
}

impl MockRepoService {
    /// Create a mock for the test repository
    pub fn new() -> Self {
        Self {
            repo: RepoId {
                owner: "octo".to_string(),
                name: "widgets".to_string(),
            },
            pages: Mutex::new(Vec::new()),
            pr_responses: Mutex::new(HashMap::new()),
            branch_responses: Mutex::new(HashMap::new()),
            merge_responses: Mutex::new(HashMap::new()),
            list_calls: Mutex::new(Vec::new()),
            get_pr_calls: Mutex::new(Vec::new()),
            branch_calls: Mutex::new(Vec::new()),
            merge_calls: Mutex::new(Vec::new()),
            error_on_branch: Mutex::new(None),
            error_on_merge: Mutex::new(None),
        }
    }

    // === Response setup ===

    /// Append one page of open pull requests
    pub fn push_page(&self, prs: Vec<PullRequestSnapshot>) {
        self.pages.lock().unwrap().push(prs);
    }

    /// Set the full-shape snapshot returned by `get_pull_request`
    pub fn set_pull_request(&self, pr: PullRequestSnapshot) {
        self.pr_responses.lock().unwrap().insert(pr.number, pr);
    }

    /// Protect a branch with the given required status checks
    pub fn protect_branch(&self, branch: &str, contexts: &[&str]) {
        self.branch_responses.lock().unwrap().insert(
            branch.to_string(),
            BranchProtection {
                enabled: true,
                required_checks: contexts.iter().map(ToString::to_string).collect(),
            },
        );
    }

    /// Set an explicit branch protection response
    pub fn set_branch_protection(&self, branch: &str, protection: BranchProtection) {
        self.branch_responses
            .lock()
            .unwrap()
            .insert(branch.to_string(), protection);
    }

    /// Set the outcome returned by `merge_pull_request`
    pub fn set_merge_response(&self, number: u64, outcome: MergeOutcome) {
        self.merge_responses.lock().unwrap().insert(number, outcome);
    }

    // === Error injection ===

    /// Make `get_branch_protection` return an error
    pub fn fail_branch_lookup(&self, msg: &str) {
        *self.error_on_branch.lock().unwrap() = Some(msg.to_string());
    }

    /// Make `merge_pull_request` return an error
    pub fn fail_merge(&self, msg: &str) {
        *self.error_on_merge.lock().unwrap() = Some(msg.to_string());
    }

    // === Call verification ===

    /// Pages requested from `list_open_pull_requests`
    pub fn list_calls(&self) -> Vec<u32> {
        self.list_calls.lock().unwrap().clone()
    }

    /// Numbers requested from `get_pull_request`
    pub fn get_pr_calls(&self) -> Vec<u64> {
        self.get_pr_calls.lock().unwrap().clone()
    }

    /// Branches requested from `get_branch_protection`
    pub fn branch_calls(&self) -> Vec<String> {
        self.branch_calls.lock().unwrap().clone()
    }

    /// How many times `get_branch_protection` was called for `branch`
    pub fn branch_lookup_count(&self, branch: &str) -> usize {
        self.branch_calls
            .lock()
            .unwrap()
            .iter()
            .filter(|b| *b == branch)
            .count()
    }

    /// All `merge_pull_request` calls
    pub fn merge_calls(&self) -> Vec<MergeCall> {
        self.merge_calls.lock().unwrap().clone()
    }

    /// Count of `merge_pull_request` calls
    pub fn merge_call_count(&self) -> usize {
        self.merge_calls.lock().unwrap().len()
    }

    /// Assert that `merge_pull_request` was called for a specific PR
    pub fn assert_merge_called(&self, number: u64) {
        let calls = self.merge_calls();
        assert!(
            calls.iter().any(|c| c.number == number),
            "Expected merge_pull_request({number}) but got: {calls:?}"
        );
    }

    /// Assert that `merge_pull_request` was NOT called for a specific PR
    pub fn assert_merge_not_called(&self, number: u64) {
        let calls = self.merge_calls();
        assert!(
            !calls.iter().any(|c| c.number == number),
            "Expected merge_pull_request({number}) NOT to be called but it was: {calls:?}"
        );
    }
}

#[async_trait]
impl RepoService for MockRepoService {
    async fn list_open_pull_requests(&self, page: u32) -> Result<Vec<PullRequestSnapshot>> {
        self.list_calls.lock().unwrap().push(page);

        let pages = self.pages.lock().unwrap();
        Ok(pages
            .get((page as usize).saturating_sub(1))
            .cloned()
            .unwrap_or_default())
    }

    async fn get_pull_request(&self, number: u64) -> Result<PullRequestSnapshot> {
        self.get_pr_calls.lock().unwrap().push(number);

        let responses = self.pr_responses.lock().unwrap();
        responses.get(&number).cloned().ok_or_else(|| {
            Error::Platform(format!(
                "get_pull_request: no response configured for PR #{number}"
            ))
        })
    }

    async fn get_branch_protection(&self, branch: &str) -> Result<BranchProtection> {
        self.branch_calls.lock().unwrap().push(branch.to_string());

        // Check for injected error
        if let Some(msg) = self.error_on_branch.lock().unwrap().as_ref() {
            return Err(Error::Platform(msg.clone()));
        }

        let responses = self.branch_responses.lock().unwrap();
        Ok(responses.get(branch).cloned().unwrap_or_default())
    }

    async fn merge_pull_request(
        &self,
        number: u64,
        expected_head_sha: &str,
        method: Option<MergeMethod>,
    ) -> Result<MergeOutcome> {
        self.merge_calls.lock().unwrap().push(MergeCall {
            number,
            expected_head_sha: expected_head_sha.to_string(),
            method,
        });

        // Check for injected error
        if let Some(msg) = self.error_on_merge.lock().unwrap().as_ref() {
            return Err(Error::Platform(msg.clone()));
        }

        let responses = self.merge_responses.lock().unwrap();
        Ok(responses.get(&number).cloned().unwrap_or(MergeOutcome {
            merged: true,
            sha: Some(format!("merged-{number}")),
            message: None,
        }))
    }

    fn repo(&self) -> &RepoId {
        &self.repo
    }
}
