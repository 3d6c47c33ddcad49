//! CLI for the autopilot binary
//!
//! Every knob can come from the environment (the usual way when triggered by
//! a workflow) or be overridden by a flag for local runs.

use anstream::println;
use anyhow::Context;
use async_trait::async_trait;
use clap::Parser;
use owo_colors::OwoColorize;

use pr_autopilot::config::{Overrides, RunConfig};
use pr_autopilot::engine::{Engine, Progress};
use pr_autopilot::event::Event;
use pr_autopilot::platform::create_repo_service;

/// Automatically merge eligible pull requests in response to repository events
#[derive(Debug, Parser)]
#[command(name = "autopilot", version, about)]
pub struct Cli {
    /// Repository in owner/name form (default: $GITHUB_REPOSITORY)
    #[arg(long)]
    repo: Option<String>,

    /// API token (default: $GITHUB_TOKEN)
    #[arg(long)]
    token: Option<String>,

    /// Name of the triggering event (default: $GITHUB_EVENT_NAME)
    #[arg(long)]
    event_name: Option<String>,

    /// Path to the event payload document (default: $GITHUB_EVENT_PATH)
    #[arg(long)]
    event_path: Option<String>,

    /// Required labels, comma/semicolon/newline separated
    #[arg(long)]
    labels: Option<String>,

    /// Allowed author logins, comma/semicolon/newline separated
    #[arg(long)]
    authors: Option<String>,

    /// Preferred merge method (merge, squash or rebase)
    #[arg(long)]
    merge_method: Option<String>,

    /// Evaluate and report without merging
    #[arg(long)]
    dry_run: bool,

    /// This run's own check id; its check-run events are ignored
    #[arg(long)]
    check_id: Option<String>,

    /// API base URL override (enterprise hosts)
    #[arg(long)]
    api_base: Option<String>,
}

impl Cli {
    fn overrides(&self) -> Overrides {
        Overrides {
            repo: self.repo.clone(),
            token: self.token.clone(),
            event_name: self.event_name.clone(),
            event_path: self.event_path.clone(),
            required_labels: self.labels.clone(),
            allowed_authors: self.authors.clone(),
            merge_method: self.merge_method.clone(),
            dry_run: self.dry_run.then(|| "true".to_string()),
            check_id: self.check_id.clone(),
            api_base: self.api_base.clone(),
        }
    }
}

/// Progress sink that prints to stdout
struct CliProgress;

#[async_trait]
impl Progress for CliProgress {
    async fn on_message(&self, message: &str) {
        println!("{message}");
    }
}

/// Run the autopilot command
pub async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = RunConfig::load(&cli.overrides())?;

    let payload = match &config.event_path {
        Some(path) => Some(std::fs::read_to_string(path).with_context(|| {
            format!("failed to read event payload at {}", path.display())
        })?),
        None => None,
    };
    let event = Event::parse(&config.event_name, payload.as_deref())?;

    println!(
        "{} {} {}",
        "autopilot".bold(),
        config.repo,
        format!("({})", config.event_name).dimmed()
    );
    if config.policy.dry_run {
        println!("{}", "dry run: merges will not be performed".dimmed());
    }

    let service = create_repo_service(&config)?;
    let progress = CliProgress;
    let mut engine = Engine::new(
        service.as_ref(),
        &config.policy,
        &progress,
        config.own_check_id,
    );
    engine.handle_event(&event).await?;
    Ok(())
}
