//! autopilot binary entry point

mod cli;

use std::process::ExitCode;

use anstream::eprintln;
use owo_colors::OwoColorize;

#[tokio::main]
async fn main() -> ExitCode {
    match cli::run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{} {err:#}", "error:".red().bold());
            ExitCode::FAILURE
        }
    }
}
