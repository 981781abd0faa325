//! Conversion from radii in meters to angular (degree) radii.
//!
//! The longitude radius is corrected by the cosine of the latitude it is evaluated at, since
//! a degree of longitude shrinks toward the poles. The correction is only evaluated at a single
//! latitude (the center of whatever shape is being sized), which is a fine approximation for
//! shapes that are small relative to the globe. As the latitude approaches +/- 90 degrees, the
//! longitude radius diverges.

use serde::{Deserialize, Serialize};

use crate::ang::Degrees;

/// Mean equatorial circumference approximation, in meters.
pub const EARTH_CIRCUMFERENCE_M: f64 = 40_075_017.0;

/// A pair of radii along the x (east/west) and y (north/south) axes, in meters.
#[derive(Debug, Default, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Radii {
    pub x_m: f64,
    pub y_m: f64,
}

impl Radii {
    #[inline]
    pub const fn new(x_m: f64, y_m: f64) -> Self {
        Self { x_m, y_m }
    }
}

impl From<[f64; 2]> for Radii {
    #[inline]
    fn from([x_m, y_m]: [f64; 2]) -> Self {
        Self { x_m, y_m }
    }
}

impl From<(f64, f64)> for Radii {
    #[inline]
    fn from((x_m, y_m): (f64, f64)) -> Self {
        Self { x_m, y_m }
    }
}

/// Angular radii, the output of [`RadiusProjector::project`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AngularRadius {
    pub lat: Degrees,
    pub lng: Degrees,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RadiusError {
    #[error("{axis} radius of {radius_m}m is not finite at latitude {lat}")]
    NonFinite {
        axis: &'static str,
        radius_m: f64,
        lat: f64,
    },
}

/// Stateless converter from meters to degrees.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RadiusProjector;

impl RadiusProjector {
    /// Latitude radius, in degrees. Independent of where on the globe it's evaluated.
    #[inline]
    pub fn lat_radius(radius_m: f64) -> Degrees {
        Degrees::new((radius_m / EARTH_CIRCUMFERENCE_M) * 360.0)
    }

    /// Longitude radius, in degrees, evaluated at `lat` (in degrees).
    #[inline]
    pub fn lng_radius(radius_m: f64, lat: f64) -> Degrees {
        Degrees::new(((radius_m / EARTH_CIRCUMFERENCE_M) * 360.0) / lat.to_radians().cos())
    }

    /// Converts both radii, erroring out instead of returning a NaN or infinite value.
    pub fn project(radii: Radii, lat: f64) -> Result<AngularRadius, RadiusError> {
        let lat_radius = Self::lat_radius(radii.y_m);
        if !lat_radius.is_finite() {
            return Err(RadiusError::NonFinite {
                axis: "latitude",
                radius_m: radii.y_m,
                lat,
            });
        }

        let lng_radius = Self::lng_radius(radii.x_m, lat);
        if !lng_radius.is_finite() {
            return Err(RadiusError::NonFinite {
                axis: "longitude",
                radius_m: radii.x_m,
                lat,
            });
        }

        Ok(AngularRadius {
            lat: lat_radius,
            lng: lng_radius,
        })
    }
}

#[cfg(test)]
mod tests {
    use rand::{Rng, SeedableRng};

    use super::*;

    #[test]
    fn test_radius_at_equator() {
        let radius = RadiusProjector::project(Radii::new(1000.0, 2000.0), 0.0).unwrap();

        assert!((radius.lat.get() - 0.017963).abs() < 1e-5);
        assert!((radius.lng.get() - 0.008981).abs() < 1e-5);
    }

    #[test]
    fn test_lng_radius_grows_toward_poles() {
        let mut rng = rand::rngs::StdRng::seed_from_u64(0x5EED);

        for _ in 0..64 {
            let radius_m = rng.random_range(1.0..500_000.0);

            let mut previous = RadiusProjector::lng_radius(radius_m, 0.0);
            assert!(previous.is_finite());

            let mut lat = 0.5;
            while lat < 89.0 {
                let north = RadiusProjector::lng_radius(radius_m, lat);
                let south = RadiusProjector::lng_radius(radius_m, -lat);

                assert!(north.is_finite());
                assert!(north > previous, "{north} <= {previous} at {lat}");
                assert!((north.get() - south.get()).abs() <= north.get() * 1e-12);

                previous = north;
                lat += 0.5;
            }
        }
    }

    #[test]
    fn test_non_finite_radius_is_an_error() {
        let err = RadiusProjector::project(Radii::new(f64::INFINITY, 10.0), 0.0).unwrap_err();
        assert!(matches!(
            err,
            RadiusError::NonFinite {
                axis: "longitude",
                ..
            }
        ));

        let err = RadiusProjector::project(Radii::new(10.0, f64::NAN), 0.0).unwrap_err();
        assert!(matches!(
            err,
            RadiusError::NonFinite {
                axis: "latitude",
                ..
            }
        ));
    }
}
