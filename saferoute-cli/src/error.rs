//! Error type for the SafeRoute CLI.

use std::sync::Arc;

use camino::Utf8PathBuf;
use saferoute_core::{HazardSourceError, ParseTravelModeError, PlannerConfigError, RouteRequestError};
#[cfg(feature = "http")]
use saferoute_data::SourceBuildError;
use thiserror::Error;

/// Errors emitted by the SafeRoute CLI.
#[derive(Debug, Error)]
pub enum CliError {
    /// Provided arguments failed Clap validation.
    #[error(transparent)]
    ArgumentParsing(#[from] clap::Error),
    /// Configuration layering failed (files, env, CLI).
    #[error("failed to load configuration: {0}")]
    Configuration(#[from] Arc<ortho_config::OrthoError>),
    /// A required option is missing after configuration merging.
    #[error("missing {field} (set --{field} or {env})")]
    MissingArgument {
        /// Flag name without leading dashes.
        field: &'static str,
        /// Environment variable that can supply it.
        env: &'static str,
    },
    /// The requested operation requires a missing compile-time feature.
    #[error("{action} requires the `{feature}` feature to be enabled")]
    MissingFeature {
        /// Cargo feature name.
        feature: &'static str,
        /// What the user asked for.
        action: &'static str,
    },
    /// A referenced input path does not exist on disk.
    #[error("{field} path {path:?} does not exist")]
    MissingSourceFile {
        /// Flag name without leading dashes.
        field: &'static str,
        /// The missing path.
        path: Utf8PathBuf,
    },
    /// A referenced input path exists but is not a file.
    #[error("{field} path {path:?} exists but is not a file")]
    SourcePathNotFile {
        /// Flag name without leading dashes.
        field: &'static str,
        /// The offending path.
        path: Utf8PathBuf,
    },
    /// A referenced input path could not be inspected due to an IO error.
    #[error("failed to inspect {field} path {path:?}: {source}")]
    InspectSourcePath {
        /// Flag name without leading dashes.
        field: &'static str,
        /// The offending path.
        path: Utf8PathBuf,
        /// Underlying IO failure.
        #[source]
        source: std::io::Error,
    },
    /// An origin or destination could not be used.
    #[error("invalid {field}: {source}")]
    InvalidEndpoint {
        /// Flag name without leading dashes.
        field: &'static str,
        /// Why the endpoint was rejected.
        #[source]
        source: RouteRequestError,
    },
    /// The travel mode was not recognised.
    #[error(transparent)]
    InvalidTravelMode(#[from] ParseTravelModeError),
    /// The alert radius or deflection was not usable.
    #[error(transparent)]
    InvalidPlannerConfig(#[from] PlannerConfigError),
    /// Constructing the HTTP hazard source failed.
    #[cfg(feature = "http")]
    #[error("failed to build hazard source for {base_url:?}: {source}")]
    BuildHazardSource {
        /// Backend base URL.
        base_url: String,
        /// Construction failure.
        #[source]
        source: SourceBuildError,
    },
    /// Loading hazards from the configured source failed.
    #[error("failed to load hazards: {0}")]
    LoadHazards(#[from] HazardSourceError),
    /// Serializing the route request failed.
    #[error("failed to serialize route request: {0}")]
    SerialiseRouteRequest(#[source] serde_json::Error),
    /// Writing the plan output failed.
    #[error("failed to write plan output: {0}")]
    WritePlanOutput(#[source] std::io::Error),
}
