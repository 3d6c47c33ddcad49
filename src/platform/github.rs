//! GitHub platform service implementation

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use octocrab::Octocrab;
use reqwest::Client;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::error::{Error, Result};
use crate::platform::{PAGE_SIZE, RepoService};
use crate::types::{BranchProtection, MergeMethod, MergeOutcome, PullRequestSnapshot, RepoId};

/// GitHub service using octocrab
///
/// The merge mutation goes through octocrab. Reads go through raw REST
/// requests with locally declared wire shapes, so the snapshot fields this
/// system depends on (auto-merge activation, head/base repository identity)
/// are under our control.
pub struct GitHubService {
    client: Octocrab,
    repo: RepoId,
    /// Token for raw HTTP requests
    token: String,
    /// HTTP client for raw requests
    http_client: Client,
    /// API base for raw requests
    api_base: String,
}

impl GitHubService {
    /// Create a new GitHub service
    ///
    /// `api_base` overrides the default `https://api.github.com` (enterprise
    /// hosts, test servers).
    pub fn new(token: &str, repo: RepoId, api_base: Option<String>) -> Result<Self> {
        let mut builder = Octocrab::builder().personal_token(token.to_string());

        let api_base = if let Some(base) = api_base {
            let base = base.trim_end_matches('/').to_string();
            builder = builder
                .base_uri(&base)
                .map_err(|e| Error::GitHubApi(e.to_string()))?;
            base
        } else {
            "https://api.github.com".to_string()
        };

        let client = builder
            .build()
            .map_err(|e| Error::GitHubApi(e.to_string()))?;

        let http_client = Client::builder()
            .user_agent("pr-autopilot")
            .build()
            .map_err(|e| Error::GitHubApi(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            repo,
            token: token.to_string(),
            http_client,
            api_base,
        })
    }

    /// Perform an authenticated GET against the REST API
    async fn get_json<T: DeserializeOwned>(&self, url: &str, what: &str) -> Result<T> {
        let response = self
            .http_client
            .get(url)
            .header("Authorization", format!("Bearer {}", self.token))
            .header("Accept", "application/vnd.github+json")
            .header("X-GitHub-Api-Version", "2022-11-28")
            .send()
            .await
            .map_err(|e| Error::GitHubApi(format!("Failed to fetch {what}: {e}")))?;

        if !response.status().is_success() {
            return Err(Error::GitHubApi(format!(
                "{what} request returned {}",
                response.status()
            )));
        }

        response
            .json()
            .await
            .map_err(|e| Error::GitHubApi(format!("Failed to parse {what}: {e}")))
    }
}

// Wire shapes for the REST responses we read

#[derive(Deserialize)]
struct WirePullRequest {
    number: u64,
    draft: Option<bool>,
    merged_at: Option<DateTime<Utc>>,
    /// Object when the platform's auto-merge is enabled, null otherwise
    auto_merge: Option<serde_json::Value>,
    #[serde(default)]
    labels: Vec<WireLabel>,
    user: Option<WireUser>,
    /// Absent in list responses, possibly null in single fetches
    #[serde(default)]
    mergeable: Option<bool>,
    head: WireRef,
    base: WireRef,
}

#[derive(Deserialize)]
struct WireLabel {
    name: String,
}

#[derive(Deserialize)]
struct WireUser {
    login: String,
}

#[derive(Deserialize)]
struct WireRef {
    sha: String,
    #[serde(rename = "ref")]
    ref_field: String,
    repo: Option<WireRepo>,
}

#[derive(Deserialize)]
struct WireRepo {
    full_name: String,
}

#[derive(Deserialize)]
struct WireBranch {
    #[serde(default)]
    protected: bool,
    protection: Option<WireProtection>,
}

#[derive(Deserialize)]
struct WireProtection {
    #[serde(default)]
    enabled: bool,
    required_status_checks: Option<WireRequiredChecks>,
}

#[derive(Deserialize)]
struct WireRequiredChecks {
    #[serde(default)]
    contexts: Vec<String>,
}

impl From<WirePullRequest> for PullRequestSnapshot {
    fn from(pr: WirePullRequest) -> Self {
        Self {
            number: pr.number,
            base_ref: pr.base.ref_field,
            base_repo: pr
                .base
                .repo
                .map(|r| r.full_name)
                .unwrap_or_default(),
            head_repo: pr.head.repo.map(|r| r.full_name),
            head_sha: pr.head.sha,
            merged_at: pr.merged_at,
            auto_merge_enabled: pr.auto_merge.is_some(),
            is_draft: pr.draft.unwrap_or(false),
            labels: pr.labels.into_iter().map(|l| l.name).collect(),
            author: pr.user.map(|u| u.login).unwrap_or_default(),
            mergeable: pr.mergeable,
        }
    }
}

const fn to_octocrab_method(method: MergeMethod) -> octocrab::params::pulls::MergeMethod {
    match method {
        MergeMethod::Merge => octocrab::params::pulls::MergeMethod::Merge,
        MergeMethod::Squash => octocrab::params::pulls::MergeMethod::Squash,
        MergeMethod::Rebase => octocrab::params::pulls::MergeMethod::Rebase,
    }
}

#[async_trait]
impl RepoService for GitHubService {
    async fn list_open_pull_requests(&self, page: u32) -> Result<Vec<PullRequestSnapshot>> {
        debug!(page, "listing open PRs");
        let url = format!(
            "{}/repos/{}/{}/pulls?state=open&per_page={PAGE_SIZE}&page={page}",
            self.api_base, self.repo.owner, self.repo.name
        );

        let prs: Vec<WirePullRequest> = self.get_json(&url, "open pull requests").await?;
        let result: Vec<PullRequestSnapshot> =
            prs.into_iter().map(PullRequestSnapshot::from).collect();
        debug!(page, count = result.len(), "listed open PRs");
        Ok(result)
    }

    async fn get_pull_request(&self, number: u64) -> Result<PullRequestSnapshot> {
        debug!(number, "fetching PR");
        let url = format!(
            "{}/repos/{}/{}/pulls/{number}",
            self.api_base, self.repo.owner, self.repo.name
        );

        let pr: WirePullRequest = self.get_json(&url, "pull request").await?;
        debug!(number, "fetched PR");
        Ok(pr.into())
    }

    async fn get_branch_protection(&self, branch: &str) -> Result<BranchProtection> {
        debug!(branch, "fetching branch protection");
        let url = format!(
            "{}/repos/{}/{}/branches/{branch}",
            self.api_base, self.repo.owner, self.repo.name
        );

        let wire: WireBranch = self.get_json(&url, "branch").await?;
        let enabled = wire
            .protection
            .as_ref()
            .map_or(wire.protected, |p| p.enabled);
        let required_checks = wire
            .protection
            .and_then(|p| p.required_status_checks)
            .map(|c| c.contexts)
            .unwrap_or_default();

        debug!(
            branch,
            enabled,
            checks = required_checks.len(),
            "fetched branch protection"
        );
        Ok(BranchProtection {
            enabled,
            required_checks,
        })
    }

    async fn merge_pull_request(
        &self,
        number: u64,
        expected_head_sha: &str,
        method: Option<MergeMethod>,
    ) -> Result<MergeOutcome> {
        debug!(number, expected_head_sha, "merging PR");

        let pulls = self.client.pulls(&self.repo.owner, &self.repo.name);
        let mut builder = pulls.merge(number).sha(expected_head_sha.to_string());
        if let Some(method) = method {
            builder = builder.method(to_octocrab_method(method));
        }

        let result = builder
            .send()
            .await
            .map_err(|e| Error::GitHubApi(format!("Merge failed: {e}")))?;

        let outcome = MergeOutcome {
            merged: result.merged,
            sha: result.sha,
            message: result.message,
        };

        debug!(number, merged = outcome.merged, sha = ?outcome.sha, "merge complete");
        Ok(outcome)
    }

    fn repo(&self) -> &RepoId {
        &self.repo
    }
}
