//! Inbound repository events
//!
//! An event arrives as a kind name plus an optional JSON payload document.
//! Parsing produces a sum type the router can match on exhaustively;
//! unrecognized kinds are carried as `Unsupported` so dispatch stays total.

use serde::Deserialize;

use crate::error::{Error, Result};

/// A check-run event payload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckRunEvent {
    /// Check run id
    pub id: u64,
    /// Event action (`completed`, `created`, ...)
    pub action: String,
    /// Conclusion reported by the check run, once completed
    pub conclusion: Option<String>,
    /// Pull request numbers the check run is associated with
    pub pull_requests: Vec<u64>,
}

impl CheckRunEvent {
    /// Whether the check run has completed
    #[must_use]
    pub fn is_completed(&self) -> bool {
        self.action == "completed"
    }

    /// Whether the conclusion counts as passing (success or skipped)
    #[must_use]
    pub fn has_passing_conclusion(&self) -> bool {
        matches!(self.conclusion.as_deref(), Some("success" | "skipped"))
    }
}

/// A deployment-status event payload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeploymentStatusEvent {
    /// Event action (`created`, ...)
    pub action: String,
    /// Deployment state (`success`, `failure`, `in_progress`, ...)
    pub state: String,
}

impl DeploymentStatusEvent {
    /// Whether this is a newly created, successful deployment status
    #[must_use]
    pub fn is_successful(&self) -> bool {
        self.action == "created" && self.state == "success"
    }
}

/// A repository event, tagged by kind
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// A branch protection rule changed
    BranchProtectionRule,
    /// A check run changed state
    CheckRun(CheckRunEvent),
    /// A deployment status was reported
    DeploymentStatus(DeploymentStatusEvent),
    /// Commits were pushed
    Push,
    /// Scheduled trigger
    Schedule,
    /// Manual dispatch trigger
    WorkflowDispatch,
    /// Any event kind this system does not react to
    Unsupported {
        /// The raw event name
        name: String,
    },
}

impl Event {
    /// Parse an event from its kind name and optional payload document
    ///
    /// Only `check_run` and `deployment_status` need a payload; for every
    /// other kind the payload is ignored.
    pub fn parse(name: &str, payload: Option<&str>) -> Result<Self> {
        match name {
            "branch_protection_rule" => Ok(Self::BranchProtectionRule),
            "push" => Ok(Self::Push),
            "schedule" => Ok(Self::Schedule),
            "workflow_dispatch" => Ok(Self::WorkflowDispatch),
            "check_run" => {
                let parsed: CheckRunPayload = parse_payload(name, payload)?;
                Ok(Self::CheckRun(CheckRunEvent {
                    id: parsed.check_run.id,
                    action: parsed.action,
                    conclusion: parsed.check_run.conclusion,
                    pull_requests: parsed
                        .check_run
                        .pull_requests
                        .into_iter()
                        .map(|pr| pr.number)
                        .collect(),
                }))
            }
            "deployment_status" => {
                let parsed: DeploymentStatusPayload = parse_payload(name, payload)?;
                Ok(Self::DeploymentStatus(DeploymentStatusEvent {
                    action: parsed.action,
                    state: parsed.deployment_status.state,
                }))
            }
            other => Ok(Self::Unsupported {
                name: other.to_string(),
            }),
        }
    }
}

fn parse_payload<T: serde::de::DeserializeOwned>(name: &str, payload: Option<&str>) -> Result<T> {
    let raw = payload
        .ok_or_else(|| Error::Event(format!("{name} event delivered without a payload")))?;
    serde_json::from_str(raw)
        .map_err(|e| Error::Event(format!("malformed {name} payload: {e}")))
}

// Wire shapes for the payload documents we read

#[derive(Deserialize)]
struct CheckRunPayload {
    action: String,
    check_run: WireCheckRun,
}

#[derive(Deserialize)]
struct WireCheckRun {
    id: u64,
    conclusion: Option<String>,
    #[serde(default)]
    pull_requests: Vec<WirePrRef>,
}

#[derive(Deserialize)]
struct WirePrRef {
    number: u64,
}

#[derive(Deserialize)]
struct DeploymentStatusPayload {
    action: String,
    deployment_status: WireDeploymentStatus,
}

#[derive(Deserialize)]
struct WireDeploymentStatus {
    state: String,
}
