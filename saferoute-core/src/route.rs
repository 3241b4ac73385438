//! Route requests handed to a directions provider.
//!
//! A [`RouteRequest`] names an origin, a destination and a [`TravelMode`],
//! and optionally carries the single avoidance [`Waypoint`] produced by the
//! [`DetourPlanner`]. The JSON form mirrors the directions request the map
//! client issues, so it can be forwarded unchanged.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;

use crate::{DetourPlanner, GeoPoint, GeoPointError, HazardPoint, ParseGeoPointError, Waypoint};

/// How the route will be travelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TravelMode {
    /// On foot.
    #[default]
    #[cfg_attr(feature = "serde", serde(rename = "WALKING"))]
    Walk,
    /// By bicycle.
    #[cfg_attr(feature = "serde", serde(rename = "BICYCLING"))]
    Bicycle,
    /// By car.
    #[cfg_attr(feature = "serde", serde(rename = "DRIVING"))]
    Drive,
    /// By public transport.
    #[cfg_attr(feature = "serde", serde(rename = "TRANSIT"))]
    Transit,
}

impl TravelMode {
    /// Every supported mode.
    pub const ALL: [Self; 4] = [Self::Walk, Self::Bicycle, Self::Drive, Self::Transit];

    /// The name directions providers expect, e.g. `"WALKING"`.
    #[must_use]
    pub const fn provider_name(self) -> &'static str {
        match self {
            Self::Walk => "WALKING",
            Self::Bicycle => "BICYCLING",
            Self::Drive => "DRIVING",
            Self::Transit => "TRANSIT",
        }
    }

    const fn short_name(self) -> &'static str {
        match self {
            Self::Walk => "WALK",
            Self::Bicycle => "BICYCLE",
            Self::Drive => "DRIVE",
            Self::Transit => "TRANSIT",
        }
    }
}

impl fmt::Display for TravelMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.provider_name())
    }
}

/// Error returned when a travel mode name is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown travel mode {0:?} (expected WALK, BICYCLE, DRIVE or TRANSIT)")]
pub struct ParseTravelModeError(pub String);

impl FromStr for TravelMode {
    type Err = ParseTravelModeError;

    /// Accepts short (`walk`) and provider (`WALKING`) names in any case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|mode| {
                wanted.eq_ignore_ascii_case(mode.short_name())
                    || wanted.eq_ignore_ascii_case(mode.provider_name())
            })
            .ok_or_else(|| ParseTravelModeError(s.to_owned()))
    }
}

/// Either end of a route.
///
/// Addresses are resolved by the directions provider; only coordinate
/// endpoints can take part in hazard avoidance.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum Endpoint {
    /// A resolved position.
    Coordinates(GeoPoint),
    /// A free-text address.
    Address(String),
}

impl Endpoint {
    /// Build an address endpoint, rejecting blank input.
    ///
    /// # Errors
    ///
    /// Returns [`RouteRequestError::EmptyAddress`] when `address` is empty or
    /// only whitespace.
    pub fn address(address: impl Into<String>) -> Result<Self, RouteRequestError> {
        let address = address.into();
        if address.trim().is_empty() {
            return Err(RouteRequestError::EmptyAddress);
        }
        Ok(Self::Address(address))
    }

    /// The coordinates of this endpoint, if it has been resolved.
    #[must_use]
    pub const fn coordinates(&self) -> Option<GeoPoint> {
        match self {
            Self::Coordinates(point) => Some(*point),
            Self::Address(_) => None,
        }
    }
}

impl From<GeoPoint> for Endpoint {
    fn from(point: GeoPoint) -> Self {
        Self::Coordinates(point)
    }
}

impl FromStr for Endpoint {
    type Err = RouteRequestError;

    /// `"lat,lng"` becomes coordinates; anything else is an address.
    ///
    /// Input shaped like a coordinate pair but outside the valid ranges is
    /// rejected rather than treated as an address.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.parse::<GeoPoint>() {
            Ok(point) => Ok(Self::Coordinates(point)),
            Err(ParseGeoPointError::Format { .. }) => Self::address(s),
            Err(ParseGeoPointError::Invalid(source)) => {
                Err(RouteRequestError::InvalidCoordinates(source))
            }
        }
    }
}

/// Errors raised while assembling a [`RouteRequest`].
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum RouteRequestError {
    /// An address endpoint was blank.
    #[error("address must not be empty")]
    EmptyAddress,
    /// A `lat,lng` endpoint named an impossible position.
    #[error("invalid coordinates: {0}")]
    InvalidCoordinates(#[source] GeoPointError),
    /// A second avoidance waypoint was added.
    #[error("a route request carries at most one avoidance waypoint")]
    TooManyWaypoints,
}

/// A directions request, optionally biased away from a hazard.
///
/// # Examples
/// ```
/// use saferoute_core::{DetourPlanner, GeoPoint, HazardPoint, RouteRequest, TravelMode};
///
/// let hazards = [HazardPoint::unlabelled(GeoPoint::new(35.005, 136.001)?)];
/// let request = RouteRequest::new(
///     GeoPoint::new(35.0, 136.0)?.into(),
///     GeoPoint::new(35.01, 136.0)?.into(),
///     TravelMode::Walk,
/// )
/// .avoiding(&DetourPlanner::default(), &hazards);
///
/// assert!(request.avoid_hazards());
/// assert_eq!(request.waypoint_count(), 1);
/// # Ok::<(), saferoute_core::GeoPointError>(())
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct RouteRequest {
    origin: Endpoint,
    destination: Endpoint,
    travel_mode: TravelMode,
    provide_route_alternatives: bool,
    avoid_hazards: bool,
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Vec::is_empty"))]
    waypoints: Vec<Waypoint>,
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    optimize_waypoints: Option<bool>,
}

impl RouteRequest {
    /// A plain request with no hazard avoidance.
    #[must_use]
    pub const fn new(origin: Endpoint, destination: Endpoint, travel_mode: TravelMode) -> Self {
        Self {
            origin,
            destination,
            travel_mode,
            provide_route_alternatives: true,
            avoid_hazards: false,
            waypoints: Vec::new(),
            optimize_waypoints: None,
        }
    }

    /// Add a pass-through waypoint.
    ///
    /// Waypoint order is fixed once one is present.
    ///
    /// # Errors
    ///
    /// Returns [`RouteRequestError::TooManyWaypoints`] if the request already
    /// carries a waypoint.
    pub fn with_waypoint(mut self, waypoint: Waypoint) -> Result<Self, RouteRequestError> {
        if !self.waypoints.is_empty() {
            return Err(RouteRequestError::TooManyWaypoints);
        }
        self.waypoints.push(waypoint);
        self.optimize_waypoints = Some(false);
        Ok(self)
    }

    /// Turn on hazard avoidance and merge the planner's waypoint, if any.
    ///
    /// Any waypoint already on the request is replaced. Address endpoints
    /// count as missing coordinates, so they never gain a waypoint.
    #[must_use]
    pub fn avoiding(mut self, planner: &DetourPlanner, hazards: &[HazardPoint]) -> Self {
        self.avoid_hazards = true;
        self.waypoints = planner.plan(
            self.origin.coordinates(),
            self.destination.coordinates(),
            hazards,
        );
        self.optimize_waypoints = (!self.waypoints.is_empty()).then_some(false);
        self
    }

    /// Where the route starts.
    #[must_use]
    pub const fn origin(&self) -> &Endpoint {
        &self.origin
    }

    /// Where the route ends.
    #[must_use]
    pub const fn destination(&self) -> &Endpoint {
        &self.destination
    }

    /// How the route will be travelled.
    #[must_use]
    pub const fn travel_mode(&self) -> TravelMode {
        self.travel_mode
    }

    /// Whether hazard avoidance was requested.
    #[must_use]
    pub const fn avoid_hazards(&self) -> bool {
        self.avoid_hazards
    }

    /// The pass-through waypoints, at most one.
    #[must_use]
    pub fn waypoints(&self) -> &[Waypoint] {
        &self.waypoints
    }

    /// Number of waypoints on the request.
    #[must_use]
    pub fn waypoint_count(&self) -> usize {
        self.waypoints.len()
    }
}

/// One leg of a computed route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RouteLeg {
    /// Leg length in metres.
    pub distance_m: u64,
    /// Expected travel time.
    pub duration: Duration,
}

/// Totals over every leg of a computed route.
///
/// # Examples
/// ```
/// use std::time::Duration;
/// use saferoute_core::{RouteLeg, RouteSummary};
///
/// let legs = [
///     RouteLeg { distance_m: 1_200, duration: Duration::from_secs(900) },
///     RouteLeg { distance_m: 2_000, duration: Duration::from_secs(3_000) },
/// ];
/// let summary = RouteSummary::from_legs(&legs);
/// assert_eq!(summary.to_string(), "1 h 5 min, 3.2 km");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RouteSummary {
    /// Sum of leg distances in metres.
    pub total_distance_m: u64,
    /// Sum of leg durations.
    pub total_duration: Duration,
}

impl RouteSummary {
    /// Sum the legs of a route.
    #[must_use]
    pub fn from_legs(legs: &[RouteLeg]) -> Self {
        legs.iter().fold(Self::default(), |total, leg| Self {
            total_distance_m: total.total_distance_m.saturating_add(leg.distance_m),
            total_duration: total.total_duration.saturating_add(leg.duration),
        })
    }
}

impl fmt::Display for RouteSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let total_secs = self.total_duration.as_secs();
        let hours = total_secs / 3_600;
        let minutes = (total_secs % 3_600) / 60;
        let kilometres = self.total_distance_m as f64 / 1_000.0;
        if hours > 0 {
            write!(f, "{hours} h {minutes} min, {kilometres:.1} km")
        } else {
            write!(f, "{minutes} min, {kilometres:.1} km")
        }
    }
}
