//! Auto-merge engine
//!
//! Control flow: event router -> {bulk sweep | single-PR dispatch} ->
//! eligibility evaluation (consulting the protection cache) -> merge
//! execution. One logical task per run; remote calls are the only suspend
//! points and at most one mutating call is ever in flight.

mod execute;
mod router;
mod sweep;

use async_trait::async_trait;

use crate::platform::RepoService;
use crate::policy::ProtectionCache;
use crate::types::MergePolicy;

/// Callback for user-visible progress and diagnostics
#[async_trait]
pub trait Progress: Send + Sync {
    /// Report a message
    async fn on_message(&self, message: &str);
}

/// One run of the auto-merge pipeline
///
/// Bundles the collaborators of a single invocation: the platform service,
/// the immutable policy, the progress sink, this run's own check identity and
/// the run-scoped protection cache.
pub struct Engine<'a> {
    service: &'a dyn RepoService,
    policy: &'a MergePolicy,
    progress: &'a dyn Progress,
    own_check_id: Option<u64>,
    cache: ProtectionCache,
}

impl<'a> Engine<'a> {
    /// Create an engine for one run
    #[must_use]
    pub fn new(
        service: &'a dyn RepoService,
        policy: &'a MergePolicy,
        progress: &'a dyn Progress,
        own_check_id: Option<u64>,
    ) -> Self {
        Self {
            service,
            policy,
            progress,
            own_check_id,
            cache: ProtectionCache::new(),
        }
    }
}
