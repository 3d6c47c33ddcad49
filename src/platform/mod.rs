//! Platform services for GitHub
//!
//! Provides the repository-operations interface the auto-merge engine drives.

mod github;

pub use github::GitHubService;

use async_trait::async_trait;

use crate::config::RunConfig;
use crate::error::Result;
use crate::types::{BranchProtection, MergeMethod, MergeOutcome, PullRequestSnapshot, RepoId};

/// Page size used when listing open pull requests
pub const PAGE_SIZE: u8 = 50;

/// Repository operations consumed by the auto-merge engine
///
/// This trait abstracts the remote so the engine can be driven against a mock
/// in tests, and leaves the door open for other hosts.
#[async_trait]
pub trait RepoService: Send + Sync {
    /// List one page of open pull requests
    ///
    /// Pages are 1-indexed; an empty page terminates the sequence. Snapshots
    /// from this operation are list-shape: their mergeability is unknown.
    async fn list_open_pull_requests(&self, page: u32) -> Result<Vec<PullRequestSnapshot>>;

    /// Fetch a single pull request as a full-shape snapshot
    async fn get_pull_request(&self, number: u64) -> Result<PullRequestSnapshot>;

    /// Fetch branch protection metadata for `branch`
    async fn get_branch_protection(&self, branch: &str) -> Result<BranchProtection>;

    /// Merge a pull request
    ///
    /// `expected_head_sha` is the concurrency guard: the remote rejects the
    /// merge if the head has moved since evaluation. `method` of `None` lets
    /// the remote pick its default.
    async fn merge_pull_request(
        &self,
        number: u64,
        expected_head_sha: &str,
        method: Option<MergeMethod>,
    ) -> Result<MergeOutcome>;

    /// The repository this service operates on
    fn repo(&self) -> &RepoId;
}

/// Create the platform service for this run's configuration
pub fn create_repo_service(config: &RunConfig) -> Result<Box<dyn RepoService>> {
    let service = GitHubService::new(&config.token, config.repo.clone(), config.api_base.clone())?;
    Ok(Box::new(service))
}
