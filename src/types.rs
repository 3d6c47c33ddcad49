//! Core types for pr-autopilot

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::Error;

/// A repository identity (owner + name)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepoId {
    /// Repository owner (user or organization)
    pub owner: String,
    /// Repository name
    pub name: String,
}

impl RepoId {
    /// Full `owner/name` form
    pub fn full_name(&self) -> String {
        format!("{}/{}", self.owner, self.name)
    }
}

impl std::str::FromStr for RepoId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once('/') {
            Some((owner, name)) if !owner.is_empty() && !name.is_empty() => Ok(Self {
                owner: owner.to_string(),
                name: name.to_string(),
            }),
            _ => Err(Error::Config(format!(
                "repository must be in owner/name form, got \"{s}\""
            ))),
        }
    }
}

impl std::fmt::Display for RepoId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

/// A point-in-time read of a pull request's merge-relevant fields
///
/// Snapshots come in two shapes: list-derived snapshots never carry a
/// mergeability answer (`mergeable` is `None`), while single-PR fetches carry
/// whatever the remote reports (which may still be `None` while the remote is
/// computing it).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PullRequestSnapshot {
    /// Pull request number
    pub number: u64,
    /// Base branch name
    pub base_ref: String,
    /// Full name of the base repository
    pub base_repo: String,
    /// Full name of the head repository (`None` if it was deleted)
    pub head_repo: Option<String>,
    /// Head commit id, used as the expected-head guard when merging
    pub head_sha: String,
    /// When the PR was merged (`None` if unmerged)
    pub merged_at: Option<DateTime<Utc>>,
    /// Whether the platform's own auto-merge is already activated
    pub auto_merge_enabled: bool,
    /// Whether the PR is a draft
    pub is_draft: bool,
    /// Label names applied to the PR
    pub labels: Vec<String>,
    /// Author login
    pub author: String,
    /// Whether the PR can be merged (`None` = unknown)
    pub mergeable: Option<bool>,
}

/// Outcome of eligibility evaluation for one pull request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    /// All predicates passed; the PR may be merged
    Approved,
    /// A predicate failed; the reason names it and the offending value
    Denied(String),
}

impl Verdict {
    /// Whether this verdict allows a merge
    #[must_use]
    pub const fn is_approved(&self) -> bool {
        matches!(self, Self::Approved)
    }
}

impl std::fmt::Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Approved => write!(f, "approved"),
            Self::Denied(reason) => write!(f, "denied: {reason}"),
        }
    }
}

/// Branch protection metadata, as returned by the branch lookup
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BranchProtection {
    /// Whether protection is enabled on the branch
    pub enabled: bool,
    /// Names of the required status checks
    pub required_checks: Vec<String>,
}

impl BranchProtection {
    /// Whether the branch enforces at least one required status check
    #[must_use]
    pub fn has_required_checks(&self) -> bool {
        self.enabled && !self.required_checks.is_empty()
    }
}

/// Result of a merge operation
#[derive(Debug, Clone)]
pub struct MergeOutcome {
    /// Whether the merge was successful
    pub merged: bool,
    /// The SHA of the merge commit (if successful)
    pub sha: Option<String>,
    /// Message from the merge operation (especially on failure)
    pub message: Option<String>,
}

/// Merge strategy/method
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeMethod {
    /// Create a merge commit
    Merge,
    /// Squash all commits into one
    Squash,
    /// Rebase commits onto the base branch
    Rebase,
}

impl std::str::FromStr for MergeMethod {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "merge" => Ok(Self::Merge),
            "squash" => Ok(Self::Squash),
            "rebase" => Ok(Self::Rebase),
            other => Err(Error::Config(format!(
                "unknown merge method \"{other}\" (expected merge, squash or rebase)"
            ))),
        }
    }
}

impl std::fmt::Display for MergeMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Merge => write!(f, "merge"),
            Self::Squash => write!(f, "squash"),
            Self::Rebase => write!(f, "rebase"),
        }
    }
}

/// Admission policy for the run
///
/// Built once at startup and read-only thereafter. Label and author entries
/// are normalized to lowercase so matching is case-insensitive.
#[derive(Debug, Clone, Default)]
pub struct MergePolicy {
    /// Labels every PR must carry (empty = no requirement)
    pub required_labels: Vec<String>,
    /// Author logins allowed to auto-merge (empty = no requirement)
    pub allowed_authors: Vec<String>,
    /// Preferred merge method (`None` = remote default)
    pub merge_method: Option<MergeMethod>,
    /// Evaluate and report without issuing the mutating merge call
    pub dry_run: bool,
}
