//! Admission policy for auto-merge
//!
//! Split in two: pure, ordered screens over a pull request snapshot
//! (independently testable, no I/O) and the run-scoped branch protection
//! cache consulted by the final predicate.

mod cache;
mod eligibility;

pub use cache::ProtectionCache;
pub use eligibility::{evaluate, screen};
