//! Great-circle helpers over [`GeoPoint`].
//!
//! Thin wrappers around the `geo` crate's haversine measure so callers can
//! stay in [`GeoPoint`] terms. Distances are metres on a sphere of the mean
//! Earth radius; bearings are degrees clockwise from true north.

use geo::{Bearing, Destination, Distance, Haversine, Point};

use crate::GeoPoint;

/// Great-circle distance between two points in metres.
///
/// # Examples
/// ```
/// use saferoute_core::{GeoPoint, geodesy};
///
/// let a = GeoPoint::new(35.0, 136.0)?;
/// let b = GeoPoint::new(35.01, 136.0)?;
/// let metres = geodesy::distance(a, b);
/// assert!((metres - 1_112.0).abs() < 1.0);
/// # Ok::<(), saferoute_core::GeoPointError>(())
/// ```
#[must_use]
pub fn distance(a: GeoPoint, b: GeoPoint) -> f64 {
    Haversine.distance(Point::from(a), Point::from(b))
}

/// Initial great-circle bearing from `from` towards `to`, in `[0, 360)`.
///
/// Coincident points yield `0.0`.
#[must_use]
pub fn heading(from: GeoPoint, to: GeoPoint) -> f64 {
    normalise_bearing(Haversine.bearing(Point::from(from), Point::from(to)))
}

/// The point reached by travelling `metres` from `origin` along `bearing`.
///
/// `bearing` may be any finite angle in degrees; it is folded into
/// `[0, 360)` first.
#[must_use]
pub fn offset(origin: GeoPoint, bearing: f64, metres: f64) -> GeoPoint {
    let destination =
        Haversine.destination(Point::from(origin), normalise_bearing(bearing), metres);
    GeoPoint::normalised(destination.y(), destination.x())
}

/// Shortest distance in metres from `point` to the segment `[start, end]`.
///
/// The point is projected onto the segment's initial great-circle bearing.
/// Projections falling before `start` or beyond `end` clamp to the direct
/// distance from that endpoint; otherwise the cross-track distance is used.
///
/// # Examples
/// ```
/// use saferoute_core::{GeoPoint, geodesy};
///
/// let start = GeoPoint::new(35.0, 136.0)?;
/// let end = GeoPoint::new(35.01, 136.0)?;
/// let beside = GeoPoint::new(35.005, 136.001)?;
/// let metres = geodesy::distance_to_segment(start, end, beside);
/// assert!((80.0..100.0).contains(&metres));
/// # Ok::<(), saferoute_core::GeoPointError>(())
/// ```
#[must_use]
pub fn distance_to_segment(start: GeoPoint, end: GeoPoint, point: GeoPoint) -> f64 {
    let segment_length = distance(start, end);
    let to_point = distance(start, point);
    let angle = (heading(start, end) - heading(start, point)).to_radians();

    let along_track = to_point * angle.cos();
    if along_track < 0.0 {
        return to_point;
    }
    if along_track > segment_length {
        return distance(end, point);
    }
    (to_point * angle.sin()).abs()
}

fn normalise_bearing(bearing: f64) -> f64 {
    bearing.rem_euclid(360.0)
}
