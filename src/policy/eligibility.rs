//! Eligibility evaluation - ordered admission predicates
//!
//! Screens are applied in a fixed priority order and short-circuit at the
//! first failure, so a pull request violating several predicates reports the
//! highest-priority reason. Screens 1-7 are pure; the final predicate
//! (required status checks on the base branch) goes through the cache.

use crate::error::Result;
use crate::platform::RepoService;
use crate::policy::ProtectionCache;
use crate::types::{MergePolicy, PullRequestSnapshot, Verdict};

type Screen = fn(&PullRequestSnapshot, &MergePolicy) -> Option<String>;

/// Pure admission screens, in priority order
const SCREENS: [Screen; 7] = [
    deny_fork,
    deny_already_merged,
    deny_auto_merge_active,
    deny_draft,
    deny_missing_label,
    deny_author,
    deny_unmergeable,
];

/// Apply the pure screens, returning the first denial reason
#[must_use]
pub fn screen(pr: &PullRequestSnapshot, policy: &MergePolicy) -> Option<String> {
    SCREENS.iter().find_map(|check| check(pr, policy))
}

/// Evaluate a pull request against the full admission policy
pub async fn evaluate(
    pr: &PullRequestSnapshot,
    policy: &MergePolicy,
    service: &dyn RepoService,
    cache: &mut ProtectionCache,
) -> Result<Verdict> {
    if let Some(reason) = screen(pr, policy) {
        return Ok(Verdict::Denied(reason));
    }

    // Only branches gated by status checks are trusted for auto-merge.
    if !cache.has_required_checks(service, &pr.base_ref).await? {
        return Ok(Verdict::Denied(format!(
            "base branch \"{}\" has no required status checks",
            pr.base_ref
        )));
    }

    Ok(Verdict::Approved)
}

/// Cross-fork merging is unsupported; an absent head repository counts as a
/// fork as well.
fn deny_fork(pr: &PullRequestSnapshot, _policy: &MergePolicy) -> Option<String> {
    match pr.head_repo.as_deref() {
        Some(head) if head == pr.base_repo => None,
        Some(head) => Some(format!(
            "head repository {head} does not match base repository {}",
            pr.base_repo
        )),
        None => Some("head repository no longer exists".to_string()),
    }
}

fn deny_already_merged(pr: &PullRequestSnapshot, _policy: &MergePolicy) -> Option<String> {
    pr.merged_at
        .map(|at| format!("already merged at {at}"))
}

fn deny_auto_merge_active(pr: &PullRequestSnapshot, _policy: &MergePolicy) -> Option<String> {
    pr.auto_merge_enabled
        .then(|| "auto-merge is already enabled".to_string())
}

fn deny_draft(pr: &PullRequestSnapshot, _policy: &MergePolicy) -> Option<String> {
    pr.is_draft.then(|| "pull request is a draft".to_string())
}

fn deny_missing_label(pr: &PullRequestSnapshot, policy: &MergePolicy) -> Option<String> {
    policy
        .required_labels
        .iter()
        .find(|required| {
            !pr.labels
                .iter()
                .any(|label| label.to_lowercase() == **required)
        })
        .map(|missing| format!("missing required label \"{missing}\""))
}

fn deny_author(pr: &PullRequestSnapshot, policy: &MergePolicy) -> Option<String> {
    if policy.allowed_authors.is_empty()
        || policy.allowed_authors.contains(&pr.author.to_lowercase())
    {
        return None;
    }
    Some(format!("author \"{}\" is not an allowed author", pr.author))
}

/// Unknown mergeability passes through: the merge attempt itself surfaces
/// true unmergeability.
fn deny_unmergeable(pr: &PullRequestSnapshot, _policy: &MergePolicy) -> Option<String> {
    (pr.mergeable == Some(false)).then(|| "pull request is not mergeable".to_string())
}
