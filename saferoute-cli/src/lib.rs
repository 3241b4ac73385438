//! Command-line interface for planning hazard-avoiding route requests.
//!
//! `saferoute plan` loads hazards from a saved feed or the reporting
//! backend, plans at most one avoidance waypoint and prints the resulting
//! directions request as JSON.
#![forbid(unsafe_code)]

use clap::{Parser, Subcommand};

mod error;
mod plan;

pub use error::CliError;

use plan::{PlanArgs, run_plan};

const ARG_HAZARDS: &str = "hazards";
const ARG_HAZARD_URL: &str = "hazard-url";
const ARG_ORIGIN: &str = "origin";
const ARG_DESTINATION: &str = "destination";
const ARG_MODE: &str = "mode";
const ARG_NO_AVOID: &str = "no-avoid";
const ARG_ALERT_RADIUS: &str = "alert-radius";
const ARG_DEFLECTION: &str = "deflection";
const ENV_HAZARDS: &str = "SAFEROUTE_CMDS_PLAN_HAZARDS";
const ENV_ORIGIN: &str = "SAFEROUTE_CMDS_PLAN_ORIGIN";
const ENV_DESTINATION: &str = "SAFEROUTE_CMDS_PLAN_DESTINATION";

/// Run the SafeRoute CLI with the current process arguments and environment.
///
/// # Errors
///
/// Returns [`CliError`] when arguments are invalid, the hazard feed cannot
/// be loaded or the request cannot be written to stdout.
pub fn run() -> Result<(), CliError> {
    let cli = Cli::try_parse().map_err(CliError::ArgumentParsing)?;
    match cli.command {
        Command::Plan(args) => run_plan(args),
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "saferoute",
    about = "Plan directions requests that steer around reported hazards",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Build a directions request, adding a waypoint around the nearest hazard.
    Plan(PlanArgs),
}

#[cfg(test)]
mod tests;
