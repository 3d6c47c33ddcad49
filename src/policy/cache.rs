//! Run-scoped branch protection fact cache

use std::collections::HashMap;

use tracing::debug;

use crate::error::Result;
use crate::platform::RepoService;

/// Memoized branch-protection facts for one run
///
/// Keyed by branch name; a fact is `true` iff the branch has protection
/// enabled with a non-empty required-status-checks list. Entries live exactly
/// as long as the run. No TTL, no invalidation: a branch's protection is
/// assumed stable for the run's duration.
#[derive(Debug, Default)]
pub struct ProtectionCache {
    facts: HashMap<String, bool>,
}

impl ProtectionCache {
    /// Create an empty cache
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `branch` enforces at least one required status check
    ///
    /// The first query per branch performs a branch lookup and stores the
    /// answer; later queries return the stored fact with no remote call.
    pub async fn has_required_checks(
        &mut self,
        service: &dyn RepoService,
        branch: &str,
    ) -> Result<bool> {
        if let Some(&fact) = self.facts.get(branch) {
            debug!(branch, fact, "protection cache hit");
            return Ok(fact);
        }

        let protection = service.get_branch_protection(branch).await?;
        let fact = protection.has_required_checks();
        debug!(branch, fact, "protection cache miss");
        self.facts.insert(branch.to_string(), fact);
        Ok(fact)
    }

    /// Number of branches with a cached fact
    #[must_use]
    pub fn len(&self) -> usize {
        self.facts.len()
    }

    /// Whether no facts have been cached yet
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.facts.is_empty()
    }
}
