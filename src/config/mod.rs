//! Run configuration
//!
//! Configuration is read exactly once at startup, from environment variables
//! with optional CLI overrides, and is immutable for the rest of the run.

use std::env;
use std::path::PathBuf;
use std::str::FromStr;

use crate::error::{Error, Result};
use crate::types::{MergeMethod, MergePolicy, RepoId};

/// Environment variable holding the API token
pub const TOKEN_VAR: &str = "GITHUB_TOKEN";
/// Environment variable holding the `owner/name` repository identity
pub const REPOSITORY_VAR: &str = "GITHUB_REPOSITORY";
/// Environment variable holding the triggering event name
pub const EVENT_NAME_VAR: &str = "GITHUB_EVENT_NAME";
/// Environment variable holding the path to the event payload document
pub const EVENT_PATH_VAR: &str = "GITHUB_EVENT_PATH";
/// Environment variable holding the required-label list
pub const REQUIRED_LABELS_VAR: &str = "AUTOPILOT_REQUIRED_LABELS";
/// Environment variable holding the allowed-author list
pub const ALLOWED_AUTHORS_VAR: &str = "AUTOPILOT_ALLOWED_AUTHORS";
/// Environment variable holding the preferred merge method
pub const MERGE_METHOD_VAR: &str = "AUTOPILOT_MERGE_METHOD";
/// Environment variable holding the dry-run switch
pub const DRY_RUN_VAR: &str = "AUTOPILOT_DRY_RUN";
/// Environment variable holding this run's own check id
pub const CHECK_ID_VAR: &str = "AUTOPILOT_CHECK_ID";
/// Environment variable holding an API base URL override
pub const API_BASE_VAR: &str = "AUTOPILOT_API_BASE";

/// Raw CLI-level overrides, applied on top of the environment
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    /// Repository in `owner/name` form
    pub repo: Option<String>,
    /// API token
    pub token: Option<String>,
    /// Triggering event name
    pub event_name: Option<String>,
    /// Path to the event payload document
    pub event_path: Option<String>,
    /// Required-label list
    pub required_labels: Option<String>,
    /// Allowed-author list
    pub allowed_authors: Option<String>,
    /// Preferred merge method
    pub merge_method: Option<String>,
    /// Dry-run switch
    pub dry_run: Option<String>,
    /// This run's own check id
    pub check_id: Option<String>,
    /// API base URL override
    pub api_base: Option<String>,
}

/// Fully parsed configuration for one run
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// Repository the run operates on
    pub repo: RepoId,
    /// API token
    pub token: String,
    /// Name of the triggering event
    pub event_name: String,
    /// Path to the event payload document, if one was delivered
    pub event_path: Option<PathBuf>,
    /// Admission policy
    pub policy: MergePolicy,
    /// Check id identifying this run's own check, if known
    pub own_check_id: Option<u64>,
    /// API base URL override (enterprise hosts, test servers)
    pub api_base: Option<String>,
}

impl RunConfig {
    /// Build the run configuration from the environment plus `overrides`
    pub fn load(overrides: &Overrides) -> Result<Self> {
        let repo = required(overrides.repo.as_deref(), REPOSITORY_VAR)?;
        let token = required(overrides.token.as_deref(), TOKEN_VAR)?;
        let event_name = required(overrides.event_name.as_deref(), EVENT_NAME_VAR)?;

        let policy = MergePolicy {
            required_labels: setting(overrides.required_labels.as_deref(), REQUIRED_LABELS_VAR)
                .as_deref()
                .map(parse_list)
                .unwrap_or_default(),
            allowed_authors: setting(overrides.allowed_authors.as_deref(), ALLOWED_AUTHORS_VAR)
                .as_deref()
                .map(parse_list)
                .unwrap_or_default(),
            merge_method: setting(overrides.merge_method.as_deref(), MERGE_METHOD_VAR)
                .as_deref()
                .map(MergeMethod::from_str)
                .transpose()?,
            dry_run: setting(overrides.dry_run.as_deref(), DRY_RUN_VAR)
                .as_deref()
                .map(parse_bool)
                .transpose()?
                .unwrap_or(false),
        };

        let own_check_id = setting(overrides.check_id.as_deref(), CHECK_ID_VAR)
            .map(|raw| {
                raw.trim().parse::<u64>().map_err(|_| {
                    Error::Config(format!("check id must be a number, got \"{raw}\""))
                })
            })
            .transpose()?;

        Ok(Self {
            repo: repo.parse()?,
            token,
            event_name,
            event_path: setting(overrides.event_path.as_deref(), EVENT_PATH_VAR).map(PathBuf::from),
            policy,
            own_check_id,
            api_base: setting(overrides.api_base.as_deref(), API_BASE_VAR),
        })
    }
}

/// Resolve one setting: CLI override first, then the environment
fn setting(override_value: Option<&str>, var: &str) -> Option<String> {
    override_value
        .map(ToString::to_string)
        .or_else(|| env::var(var).ok())
        .filter(|v| !v.trim().is_empty())
}

/// Resolve a setting that must be present
fn required(override_value: Option<&str>, var: &str) -> Result<String> {
    setting(override_value, var).ok_or_else(|| Error::Config(format!("{var} is not set")))
}

/// Parse a configured list value
///
/// Entries are separated by commas, semicolons or newlines, trimmed,
/// lowercased (matching is case-insensitive) and empty entries are dropped.
#[must_use]
pub fn parse_list(raw: &str) -> Vec<String> {
    raw.split([',', ';', '\n'])
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(str::to_lowercase)
        .collect()
}

/// Parse a boolean setting string
pub fn parse_bool(raw: &str) -> Result<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" => Ok(true),
        "" | "false" => Ok(false),
        other => Err(Error::Config(format!(
            "expected \"true\" or \"false\", got \"{other}\""
        ))),
    }
}
