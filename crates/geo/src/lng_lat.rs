//! [`LatLng`] definition, plus the error returned when a coordinate fails validation.

use std::fmt;

use serde::ser::SerializeSeq;
use serde::{Deserialize, Serialize, de, ser};

use crate::ang::Degrees;

/// The minimum valid latitude, in degrees.
pub const MIN_LAT: f64 = -90.0;
/// The maximum valid latitude, in degrees.
pub const MAX_LAT: f64 = 90.0;

/// A geographic coordinate, in degrees.
///
/// Latitude is validated to be within `[-90, 90]`. Longitude only needs to be finite, since
/// layer coordinates can legitimately sit on a world copy east or west of the antimeridian.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct LatLng {
    lat: f64,
    lng: f64,
}

impl LatLng {
    /// Assembles a [`LatLng`] with no validation. Used internally for derived helper points
    /// (i.e. a center offset by a radius), which are only ever fed to a transform.
    #[inline]
    pub const fn new_unchecked(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Assembles a [`LatLng`], validating that neither value is NaN or infinite, and that the
    /// latitude is within the valid range.
    pub fn new_checked(lat: f64, lng: f64) -> Result<Self, InvalidCoordinate> {
        check_finite(CoordinateType::Latitude, lat)?;
        check_finite(CoordinateType::Longitude, lng)?;

        if lat > MAX_LAT {
            return Err(InvalidCoordinate::new(
                CoordinateType::Latitude,
                InvalidCoordinateReason::AboveMaximum {
                    max: MAX_LAT,
                    value: lat,
                },
            ));
        }

        if lat < MIN_LAT {
            return Err(InvalidCoordinate::new(
                CoordinateType::Latitude,
                InvalidCoordinateReason::BelowMinimum {
                    min: MIN_LAT,
                    value: lat,
                },
            ));
        }

        Ok(Self { lat, lng })
    }

    #[inline]
    pub const fn lat(&self) -> f64 {
        self.lat
    }

    #[inline]
    pub const fn lng(&self) -> f64 {
        self.lng
    }

    /// Returns a new point shifted by the given latitude/longitude deltas.
    #[inline]
    pub fn offset(&self, d_lat: Degrees, d_lng: Degrees) -> Self {
        Self::new_unchecked(self.lat + d_lat.get(), self.lng + d_lng.get())
    }

    #[inline]
    pub const fn as_lat_lng(&self) -> (f64, f64) {
        (self.lat, self.lng)
    }
}

fn check_finite(coordinate: CoordinateType, value: f64) -> Result<(), InvalidCoordinate> {
    if value.is_nan() {
        Err(InvalidCoordinate::new(coordinate, InvalidCoordinateReason::IsNaN))
    } else if value.is_infinite() {
        Err(InvalidCoordinate::new(coordinate, InvalidCoordinateReason::IsInf))
    } else {
        Ok(())
    }
}

impl TryFrom<(f64, f64)> for LatLng {
    type Error = InvalidCoordinate;

    #[inline]
    fn try_from((lat, lng): (f64, f64)) -> Result<Self, Self::Error> {
        Self::new_checked(lat, lng)
    }
}

impl TryFrom<[f64; 2]> for LatLng {
    type Error = InvalidCoordinate;

    #[inline]
    fn try_from([lat, lng]: [f64; 2]) -> Result<Self, Self::Error> {
        Self::new_checked(lat, lng)
    }
}

impl fmt::Display for LatLng {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "LatLng({}, {})", self.lat, self.lng)
    }
}

impl Serialize for LatLng {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: ser::Serializer,
    {
        let mut seq = serializer.serialize_seq(Some(2))?;
        seq.serialize_element(&self.lat)?;
        seq.serialize_element(&self.lng)?;
        seq.end()
    }
}

impl<'de> Deserialize<'de> for LatLng {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: de::Deserializer<'de>,
    {
        deserializer.deserialize_seq(LatLngVisitor)
    }
}

struct LatLngVisitor;

impl<'de> de::Visitor<'de> for LatLngVisitor {
    type Value = LatLng;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a 2 element [latitude, longitude] array")
    }

    fn visit_seq<S>(self, mut seq_access: S) -> Result<Self::Value, S::Error>
    where
        S: de::SeqAccess<'de>,
    {
        let lat: f64 = seq_access
            .next_element()?
            .ok_or_else(|| de::Error::invalid_length(0, &self))?;

        let lng: f64 = seq_access
            .next_element()?
            .ok_or_else(|| de::Error::invalid_length(1, &self))?;

        if seq_access.next_element::<de::IgnoredAny>()?.is_some() {
            return Err(de::Error::invalid_length(3, &self));
        }

        LatLng::new_checked(lat, lng).map_err(de::Error::custom)
    }
}

/// The coordinate axis that failed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CoordinateType {
    Latitude,
    Longitude,
}

impl CoordinateType {
    /// Returns the name of the variant as an lowercase `&'static str`.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Latitude => "latitude",
            Self::Longitude => "longitude",
        }
    }
}

/// Returned by [`LatLng::new_checked`] if either value is NaN, infinite, or (for latitude)
/// out of range.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InvalidCoordinate {
    coordinate: CoordinateType,
    reason: InvalidCoordinateReason,
}

impl InvalidCoordinate {
    pub(crate) const fn new(coordinate: CoordinateType, reason: InvalidCoordinateReason) -> Self {
        Self { coordinate, reason }
    }

    /// Returns the coordinate type that caused the error.
    pub const fn coordinate(&self) -> CoordinateType {
        self.coordinate
    }

    /// Returns the reason the coordinate is invalid.
    pub const fn reason(&self) -> &InvalidCoordinateReason {
        &self.reason
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum InvalidCoordinateReason {
    IsNaN,
    IsInf,
    BelowMinimum { min: f64, value: f64 },
    AboveMaximum { max: f64, value: f64 },
}

impl fmt::Display for InvalidCoordinateReason {
    fn fmt(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::IsNaN => write!(formatter, "'NaN'"),
            Self::IsInf => write!(formatter, "infinite"),
            Self::BelowMinimum { min, value } => {
                write!(
                    formatter,
                    "below the minimum valid value {min} (received {value})"
                )
            }
            Self::AboveMaximum { max, value } => {
                write!(
                    formatter,
                    "above the maximum valid value {max} (received {value})"
                )
            }
        }
    }
}

impl std::error::Error for InvalidCoordinate {}

impl fmt::Display for InvalidCoordinate {
    fn fmt(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        write!(
            formatter,
            "{} invalid: cannot be {}",
            self.coordinate.as_str(),
            self.reason
        )
    }
}
