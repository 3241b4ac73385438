//! Plan command implementation for the SafeRoute CLI.

use std::io::Write;

use camino::{Utf8Path, Utf8PathBuf};
use clap::Parser;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use saferoute_core::{
    DEFAULT_ALERT_RADIUS_M, DEFAULT_DEFLECTION_M, DetourPlanner, Endpoint, HazardSource,
    PlannerConfig, RouteRequest, TravelMode,
};
use saferoute_data::FileHazardSource;
use serde::{Deserialize, Serialize};

use crate::{
    ARG_ALERT_RADIUS, ARG_DEFLECTION, ARG_DESTINATION, ARG_HAZARD_URL, ARG_HAZARDS, ARG_MODE,
    ARG_NO_AVOID, ARG_ORIGIN, CliError, ENV_DESTINATION, ENV_HAZARDS, ENV_ORIGIN,
};

/// CLI arguments for the `plan` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    name = "plan",
    long_about = "Build a directions request between two endpoints. Hazards \
                 are read from a saved feed (--hazards) or fetched from the \
                 reporting backend (--hazard-url); when one lies near the \
                 straight line between coordinate endpoints, a single \
                 pass-through waypoint steers the route around it.",
    about = "Plan a hazard-avoiding directions request"
)]
#[ortho_config(prefix = "SAFEROUTE")]
pub(crate) struct PlanArgs {
    /// Path to a saved hazard feed (JSON). Wins over --hazard-url.
    #[arg(long = ARG_HAZARDS, value_name = "path")]
    #[serde(default)]
    pub(crate) hazards: Option<Utf8PathBuf>,
    /// Base URL of the hazard backend (e.g. "http://localhost:8000").
    #[arg(long = ARG_HAZARD_URL, value_name = "url")]
    #[serde(default)]
    pub(crate) hazard_url: Option<String>,
    /// Route start as `lat,lng` or a free-text address.
    #[arg(long = ARG_ORIGIN, value_name = "lat,lng|address")]
    #[serde(default)]
    pub(crate) origin: Option<String>,
    /// Route end as `lat,lng` or a free-text address.
    #[arg(long = ARG_DESTINATION, value_name = "lat,lng|address")]
    #[serde(default)]
    pub(crate) destination: Option<String>,
    /// Travel mode: walk, bicycle, drive or transit.
    #[arg(long = ARG_MODE, value_name = "mode")]
    #[serde(default)]
    pub(crate) mode: Option<String>,
    /// Skip hazard avoidance and emit a plain request.
    #[arg(long = ARG_NO_AVOID)]
    #[serde(default)]
    pub(crate) no_avoid: bool,
    /// Hazards nearer the route than this many metres are avoided.
    #[arg(long = ARG_ALERT_RADIUS, value_name = "metres")]
    #[serde(default)]
    pub(crate) alert_radius: Option<f64>,
    /// Distance in metres between the avoided hazard and the waypoint.
    #[arg(long = ARG_DEFLECTION, value_name = "metres")]
    #[serde(default)]
    pub(crate) deflection: Option<f64>,
}

impl PlanArgs {
    pub(crate) fn into_config(self) -> Result<PlanConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        PlanConfig::try_from(merged)
    }
}

/// Where hazards are read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum HazardSourceSpec {
    /// A saved feed on disk.
    File(Utf8PathBuf),
    /// The backend's live feed.
    Http(String),
}

/// Resolved `plan` command configuration.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct PlanConfig {
    pub(crate) origin: Endpoint,
    pub(crate) destination: Endpoint,
    pub(crate) travel_mode: TravelMode,
    /// `None` when avoidance is switched off.
    pub(crate) hazard_source: Option<HazardSourceSpec>,
    pub(crate) planner: DetourPlanner,
}

impl PlanConfig {
    pub(crate) fn validate_sources(&self) -> Result<(), CliError> {
        match &self.hazard_source {
            Some(HazardSourceSpec::File(path)) => Self::require_existing(path, ARG_HAZARDS),
            Some(HazardSourceSpec::Http(_)) | None => Ok(()),
        }
    }

    fn require_existing(path: &Utf8Path, field: &'static str) -> Result<(), CliError> {
        match saferoute_fs::file_is_file(path) {
            Ok(true) => Ok(()),
            Ok(false) => Err(CliError::SourcePathNotFile {
                field,
                path: path.to_path_buf(),
            }),
            Err(source) if source.kind() == std::io::ErrorKind::NotFound => {
                Err(CliError::MissingSourceFile {
                    field,
                    path: path.to_path_buf(),
                })
            }
            Err(source) => Err(CliError::InspectSourcePath {
                field,
                path: path.to_path_buf(),
                source,
            }),
        }
    }
}

impl TryFrom<PlanArgs> for PlanConfig {
    type Error = CliError;

    fn try_from(args: PlanArgs) -> Result<Self, Self::Error> {
        let origin = parse_endpoint(args.origin, ARG_ORIGIN, ENV_ORIGIN)?;
        let destination = parse_endpoint(args.destination, ARG_DESTINATION, ENV_DESTINATION)?;
        let travel_mode = args
            .mode
            .as_deref()
            .map(str::parse::<TravelMode>)
            .transpose()?
            .unwrap_or_default();
        let planner = DetourPlanner::new(PlannerConfig {
            alert_radius_m: args.alert_radius.unwrap_or(DEFAULT_ALERT_RADIUS_M),
            deflection_m: args.deflection.unwrap_or(DEFAULT_DEFLECTION_M),
        })?;

        let hazard_source = if args.no_avoid {
            None
        } else {
            let spec = match (args.hazards, args.hazard_url) {
                (Some(path), _) => HazardSourceSpec::File(path),
                (None, Some(url)) => HazardSourceSpec::Http(url),
                (None, None) => {
                    return Err(CliError::MissingArgument {
                        field: ARG_HAZARDS,
                        env: ENV_HAZARDS,
                    });
                }
            };
            Some(spec)
        };

        Ok(Self {
            origin,
            destination,
            travel_mode,
            hazard_source,
            planner,
        })
    }
}

fn parse_endpoint(
    value: Option<String>,
    field: &'static str,
    env: &'static str,
) -> Result<Endpoint, CliError> {
    value
        .ok_or(CliError::MissingArgument { field, env })?
        .parse()
        .map_err(|source| CliError::InvalidEndpoint { field, source })
}

/// Builds a hazard source for the current plan invocation.
pub(crate) trait HazardSourceBuilder {
    fn build(&self, spec: &HazardSourceSpec) -> Result<Box<dyn HazardSource>, CliError>;
}

pub(crate) struct DefaultHazardSourceBuilder;

impl HazardSourceBuilder for DefaultHazardSourceBuilder {
    fn build(&self, spec: &HazardSourceSpec) -> Result<Box<dyn HazardSource>, CliError> {
        match spec {
            HazardSourceSpec::File(path) => Ok(Box::new(FileHazardSource::new(path.clone()))),
            HazardSourceSpec::Http(base_url) => build_http_source(base_url),
        }
    }
}

#[cfg(feature = "http")]
fn build_http_source(base_url: &str) -> Result<Box<dyn HazardSource>, CliError> {
    let source = saferoute_data::HttpHazardSource::new(base_url).map_err(|source| {
        CliError::BuildHazardSource {
            base_url: base_url.to_owned(),
            source,
        }
    })?;
    Ok(Box::new(source))
}

#[cfg(not(feature = "http"))]
fn build_http_source(_base_url: &str) -> Result<Box<dyn HazardSource>, CliError> {
    Err(CliError::MissingFeature {
        feature: "http",
        action: "fetching hazards with --hazard-url",
    })
}

pub(crate) fn run_plan(args: PlanArgs) -> Result<(), CliError> {
    let mut stdout = std::io::stdout().lock();
    run_plan_with(args, &DefaultHazardSourceBuilder, &mut stdout)
}

pub(crate) fn run_plan_with(
    args: PlanArgs,
    builder: &dyn HazardSourceBuilder,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let request = execute_plan(args, builder)?;
    write_route_request(writer, &request)
}

fn execute_plan(
    args: PlanArgs,
    builder: &dyn HazardSourceBuilder,
) -> Result<RouteRequest, CliError> {
    let config = resolve_plan_config(args)?;
    let request = RouteRequest::new(config.origin, config.destination, config.travel_mode);
    let Some(spec) = config.hazard_source else {
        return Ok(request);
    };
    let source = builder.build(&spec)?;
    let hazards = source.list_hazards()?;
    Ok(request.avoiding(&config.planner, &hazards))
}

fn resolve_plan_config(args: PlanArgs) -> Result<PlanConfig, CliError> {
    let config = args.into_config()?;
    config.validate_sources()?;
    Ok(config)
}

fn write_route_request(writer: &mut dyn Write, request: &RouteRequest) -> Result<(), CliError> {
    let payload =
        serde_json::to_string_pretty(request).map_err(CliError::SerialiseRouteRequest)?;
    writer
        .write_all(payload.as_bytes())
        .map_err(CliError::WritePlanOutput)?;
    writer
        .write_all(b"\n")
        .map_err(CliError::WritePlanOutput)?;
    Ok(())
}
