//! Single-hazard avoidance waypoint planning.
//!
//! Given a start, an end and the hazards known to the caller, the planner
//! finds the hazard closest to the straight great-circle segment between the
//! endpoints. When that hazard lies inside the alert radius it proposes one
//! pass-through waypoint, offset perpendicular to the segment's heading, on
//! whichever side makes the total trip shorter.
//!
//! Only one waypoint is ever produced. Several nearby hazards are not
//! combined and the path is not smoothed.

use log::debug;
use thiserror::Error;

use crate::{GeoPoint, HazardPoint, geodesy};

/// Hazards nearer the segment than this many metres trigger a detour.
pub const DEFAULT_ALERT_RADIUS_M: f64 = 500.0;

/// Distance in metres between the avoided hazard and the waypoint.
pub const DEFAULT_DEFLECTION_M: f64 = 700.0;

/// A pass-through point inserted into a route request.
///
/// Waypoints never request a stop; they only bend the route.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(into = "PassThrough", from = "PassThrough"))]
pub struct Waypoint {
    /// Where the route should pass.
    pub location: GeoPoint,
}

impl Waypoint {
    /// Wrap a location as a waypoint.
    #[must_use]
    pub const fn new(location: GeoPoint) -> Self {
        Self { location }
    }
}

#[cfg(feature = "serde")]
#[derive(serde::Serialize, serde::Deserialize)]
struct PassThrough {
    location: GeoPoint,
    #[serde(default)]
    stopover: bool,
}

#[cfg(feature = "serde")]
impl From<Waypoint> for PassThrough {
    fn from(waypoint: Waypoint) -> Self {
        Self {
            location: waypoint.location,
            stopover: false,
        }
    }
}

#[cfg(feature = "serde")]
impl From<PassThrough> for Waypoint {
    fn from(value: PassThrough) -> Self {
        Self::new(value.location)
    }
}

/// Which side of the travel direction the waypoint sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Side {
    /// Heading plus 90 degrees.
    Right,
    /// Heading minus 90 degrees.
    Left,
}

/// The outcome of a planning decision, with the values that drove it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Detour {
    /// The waypoint to merge into the route request.
    pub waypoint: Waypoint,
    /// Index of the avoided hazard in the input slice.
    pub hazard_index: usize,
    /// Nearest distance from the avoided hazard to the segment, in metres.
    pub hazard_distance_m: f64,
    /// Side of the segment the waypoint was placed on.
    pub side: Side,
    /// Start → right candidate → end, in metres.
    pub right_detour_m: f64,
    /// Start → left candidate → end, in metres.
    pub left_detour_m: f64,
}

/// Errors returned by [`DetourPlanner::new`].
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum PlannerConfigError {
    /// The alert radius was zero, negative or not finite.
    #[error("alert radius must be a positive number of metres, got {0}")]
    NonPositiveAlertRadius(f64),
    /// The deflection distance was zero, negative or not finite.
    #[error("deflection must be a positive number of metres, got {0}")]
    NonPositiveDeflection(f64),
}

/// Tunable distances for [`DetourPlanner`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlannerConfig {
    /// Hazards strictly nearer than this (metres) are considered.
    pub alert_radius_m: f64,
    /// Offset (metres) from the hazard to the proposed waypoint.
    pub deflection_m: f64,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            alert_radius_m: DEFAULT_ALERT_RADIUS_M,
            deflection_m: DEFAULT_DEFLECTION_M,
        }
    }
}

impl PlannerConfig {
    fn validate(&self) -> Result<(), PlannerConfigError> {
        if !is_positive(self.alert_radius_m) {
            return Err(PlannerConfigError::NonPositiveAlertRadius(
                self.alert_radius_m,
            ));
        }
        if !is_positive(self.deflection_m) {
            return Err(PlannerConfigError::NonPositiveDeflection(self.deflection_m));
        }
        Ok(())
    }
}

fn is_positive(value: f64) -> bool {
    value.is_finite() && value > 0.0
}

/// Plans at most one avoidance waypoint for a start/end pair.
///
/// The planner holds no state besides its configuration and never mutates
/// the hazards it is given.
///
/// # Examples
/// ```
/// use saferoute_core::{DetourPlanner, GeoPoint, HazardPoint};
///
/// let start = GeoPoint::new(35.0, 136.0)?;
/// let end = GeoPoint::new(35.01, 136.0)?;
/// let hazards = [HazardPoint::unlabelled(GeoPoint::new(35.005, 136.001)?)];
///
/// let waypoints = DetourPlanner::default().plan(Some(start), Some(end), &hazards);
/// assert_eq!(waypoints.len(), 1);
/// assert!(waypoints[0].location.longitude() < 136.0);
/// # Ok::<(), saferoute_core::GeoPointError>(())
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DetourPlanner {
    config: PlannerConfig,
}

impl DetourPlanner {
    /// Create a planner with explicit distances.
    ///
    /// # Errors
    ///
    /// Returns [`PlannerConfigError`] when a distance is not a positive,
    /// finite number of metres.
    pub fn new(config: PlannerConfig) -> Result<Self, PlannerConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// The distances this planner uses.
    #[must_use]
    pub const fn config(&self) -> &PlannerConfig {
        &self.config
    }

    /// Return zero or one waypoints that steer the route around the hazard
    /// nearest the `start`–`end` segment.
    ///
    /// A missing endpoint or a zero-length segment yields an empty list.
    #[must_use]
    pub fn plan(
        &self,
        start: Option<GeoPoint>,
        end: Option<GeoPoint>,
        hazards: &[HazardPoint],
    ) -> Vec<Waypoint> {
        self.plan_detour(start, end, hazards)
            .map(|detour| detour.waypoint)
            .into_iter()
            .collect()
    }

    /// Like [`plan`](Self::plan), but report how the decision was reached.
    #[must_use]
    pub fn plan_detour(
        &self,
        start: Option<GeoPoint>,
        end: Option<GeoPoint>,
        hazards: &[HazardPoint],
    ) -> Option<Detour> {
        let (Some(start), Some(end)) = (start, end) else {
            debug!("skipping detour planning: start or end is missing");
            return None;
        };
        if geodesy::distance(start, end) <= 0.0 {
            debug!("skipping detour planning: start and end coincide");
            return None;
        }

        let (hazard_index, hazard, hazard_distance_m) = self.nearest_hazard(start, end, hazards)?;
        let heading = geodesy::heading(start, end);
        let right = geodesy::offset(hazard.position, heading + 90.0, self.config.deflection_m);
        let left = geodesy::offset(hazard.position, heading - 90.0, self.config.deflection_m);
        let right_detour_m = detour_length(start, right, end);
        let left_detour_m = detour_length(start, left, end);

        let side = choose_side(right_detour_m, left_detour_m);
        let location = match side {
            Side::Right => right,
            Side::Left => left,
        };
        debug!(
            "avoiding hazard #{hazard_index} ({:?}) at {hazard_distance_m:.1} m: \
             right detour {right_detour_m:.1} m, left detour {left_detour_m:.1} m, \
             waypoint {location} on the {side:?}",
            hazard.title
        );

        Some(Detour {
            waypoint: Waypoint::new(location),
            hazard_index,
            hazard_distance_m,
            side,
            right_detour_m,
            left_detour_m,
        })
    }

    /// The qualifying hazard nearest the segment; the earliest wins ties.
    fn nearest_hazard<'a>(
        &self,
        start: GeoPoint,
        end: GeoPoint,
        hazards: &'a [HazardPoint],
    ) -> Option<(usize, &'a HazardPoint, f64)> {
        let (qualifying, nearest) = hazards
            .iter()
            .enumerate()
            .map(|(index, hazard)| {
                let metres = geodesy::distance_to_segment(start, end, hazard.position);
                (index, hazard, metres)
            })
            .filter(|&(_, _, metres)| metres < self.config.alert_radius_m)
            .fold((0_usize, None), |(count, best), candidate| {
                let keep_best = matches!(best, Some((_, _, best_m)) if best_m <= candidate.2);
                (count + 1, if keep_best { best } else { Some(candidate) })
            });
        debug!(
            "{qualifying} of {} hazards within {} m of the route",
            hazards.len(),
            self.config.alert_radius_m
        );
        nearest
    }
}

/// Plan with the default 500 m alert radius and 700 m deflection.
///
/// # Examples
/// ```
/// use saferoute_core::{GeoPoint, plan};
///
/// let start = GeoPoint::new(35.0, 136.0)?;
/// assert!(plan(Some(start), None, &[]).is_empty());
/// # Ok::<(), saferoute_core::GeoPointError>(())
/// ```
#[must_use]
pub fn plan(start: Option<GeoPoint>, end: Option<GeoPoint>, hazards: &[HazardPoint]) -> Vec<Waypoint> {
    DetourPlanner::default().plan(start, end, hazards)
}

/// The shorter detour wins; the right-hand candidate takes exact ties.
fn choose_side(right_detour_m: f64, left_detour_m: f64) -> Side {
    if right_detour_m <= left_detour_m {
        Side::Right
    } else {
        Side::Left
    }
}

fn detour_length(start: GeoPoint, via: GeoPoint, end: GeoPoint) -> f64 {
    geodesy::distance(start, via) + geodesy::distance(via, end)
}
