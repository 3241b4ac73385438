//! Validated WGS84 coordinates.
//!
//! [`GeoPoint`] is the value type every other module speaks. Construction
//! checks that both components are finite and inside their ranges, so code
//! holding a `GeoPoint` never has to re-validate it.

use std::fmt;
use std::str::FromStr;

use geo::Point;
use thiserror::Error;

/// Errors returned by [`GeoPoint::new`].
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum GeoPointError {
    /// Latitude was NaN or infinite.
    #[error("latitude must be a finite number")]
    NonFiniteLatitude,
    /// Longitude was NaN or infinite.
    #[error("longitude must be a finite number")]
    NonFiniteLongitude,
    /// Latitude fell outside `[-90, 90]`.
    #[error("latitude {0} is outside [-90, 90]")]
    LatitudeOutOfRange(f64),
    /// Longitude fell outside `[-180, 180]`.
    #[error("longitude {0} is outside [-180, 180]")]
    LongitudeOutOfRange(f64),
}

/// Errors returned when parsing a `"lat,lng"` pair.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseGeoPointError {
    /// The input was not two comma-separated numbers.
    #[error("expected `lat,lng`, found {input:?}")]
    Format {
        /// The rejected input.
        input: String,
    },
    /// The numbers parsed but do not form a valid coordinate.
    #[error(transparent)]
    Invalid(#[from] GeoPointError),
}

/// A position on the Earth's surface in decimal degrees.
///
/// # Examples
/// ```
/// use saferoute_core::GeoPoint;
///
/// let nagoya = GeoPoint::new(35.18, 136.90)?;
/// assert_eq!(nagoya.latitude(), 35.18);
/// assert!(GeoPoint::new(91.0, 0.0).is_err());
/// # Ok::<(), saferoute_core::GeoPointError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "LatLng", into = "LatLng"))]
pub struct GeoPoint {
    latitude: f64,
    longitude: f64,
}

impl GeoPoint {
    /// Validate and construct a point from latitude and longitude.
    ///
    /// # Errors
    ///
    /// Returns [`GeoPointError`] when either component is not finite or lies
    /// outside its range.
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, GeoPointError> {
        if !latitude.is_finite() {
            return Err(GeoPointError::NonFiniteLatitude);
        }
        if !longitude.is_finite() {
            return Err(GeoPointError::NonFiniteLongitude);
        }
        if !(-90.0..=90.0).contains(&latitude) {
            return Err(GeoPointError::LatitudeOutOfRange(latitude));
        }
        if !(-180.0..=180.0).contains(&longitude) {
            return Err(GeoPointError::LongitudeOutOfRange(longitude));
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }

    /// Build a point from computed coordinates, folding them back into range.
    ///
    /// Great-circle destination formulas can land a hair past a pole or on
    /// the far side of the antimeridian.
    pub(crate) fn normalised(latitude: f64, longitude: f64) -> Self {
        let wrapped = (longitude + 180.0).rem_euclid(360.0) - 180.0;
        Self {
            latitude: latitude.clamp(-90.0, 90.0),
            longitude: wrapped,
        }
    }

    /// Latitude in degrees.
    #[must_use]
    pub const fn latitude(&self) -> f64 {
        self.latitude
    }

    /// Longitude in degrees.
    #[must_use]
    pub const fn longitude(&self) -> f64 {
        self.longitude
    }
}

impl From<GeoPoint> for Point<f64> {
    fn from(point: GeoPoint) -> Self {
        Self::new(point.longitude, point.latitude)
    }
}

impl fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.latitude, self.longitude)
    }
}

impl FromStr for GeoPoint {
    type Err = ParseGeoPointError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let format_error = || ParseGeoPointError::Format {
            input: s.to_owned(),
        };
        let (lat, lng) = s.split_once(',').ok_or_else(format_error)?;
        let latitude: f64 = lat.trim().parse().map_err(|_| format_error())?;
        let longitude: f64 = lng.trim().parse().map_err(|_| format_error())?;
        Ok(Self::new(latitude, longitude)?)
    }
}

/// Wire shape shared with the hazard backend: `{"lat": .., "lng": ..}`.
#[cfg(feature = "serde")]
#[derive(serde::Serialize, serde::Deserialize)]
struct LatLng {
    lat: f64,
    lng: f64,
}

#[cfg(feature = "serde")]
impl TryFrom<LatLng> for GeoPoint {
    type Error = GeoPointError;

    fn try_from(value: LatLng) -> Result<Self, Self::Error> {
        Self::new(value.lat, value.lng)
    }
}

#[cfg(feature = "serde")]
impl From<GeoPoint> for LatLng {
    fn from(point: GeoPoint) -> Self {
        Self {
            lat: point.latitude,
            lng: point.longitude,
        }
    }
}
