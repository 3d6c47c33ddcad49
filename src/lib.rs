//! Event-driven auto-merge for GitHub pull requests
//!
//! Reacts to repository events (branch-protection changes, check-run
//! completions, deployment-status updates, push/scheduled/manual triggers),
//! decides which open pull requests each signal touches, applies an ordered
//! admission policy per pull request and merges the approved ones, memoizing
//! branch-protection lookups for the duration of the run.

pub mod config;
pub mod engine;
pub mod error;
pub mod event;
pub mod platform;
pub mod policy;
pub mod types;
