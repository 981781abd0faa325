//! A geographic [`GeoEllipse`], sized in meters.

use crate::ang::Degrees;
use crate::bounds::GeoBounds;
use crate::radius::{AngularRadius, Radii, RadiusError, RadiusProjector};
use crate::LatLng;

/// Default start of the drawn arc.
pub const DEFAULT_START_ANGLE: Degrees = Degrees::new(0.0);

/// Default angular extent of the drawn arc. Stops just short of a full turn, since some vector
/// renderers collapse an arc whose start and end points coincide exactly.
pub const DEFAULT_END_ANGLE: Degrees = Degrees::new(359.9);

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EllipseError {
    #[error("ellipse radii were never set")]
    MissingRadius,
    #[error(transparent)]
    Radius(#[from] RadiusError),
}

/// An ellipse defined by a geographic center, radii in meters, a tilt and an angular extent.
///
/// `end_angle` is the angular extent measured from `start_angle`, not an absolute angle. A
/// negative extent sweeps the other way around.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoEllipse {
    center: LatLng,
    radii: Option<Radii>,
    tilt: Degrees,
    start_angle: Degrees,
    end_angle: Degrees,
}

impl GeoEllipse {
    pub fn new(center: LatLng, radii: Option<Radii>, tilt: Option<Degrees>) -> Self {
        Self {
            center,
            radii,
            tilt: tilt.unwrap_or(Degrees::ZERO),
            start_angle: DEFAULT_START_ANGLE,
            end_angle: DEFAULT_END_ANGLE,
        }
    }

    pub fn with_extent(mut self, start_angle: Degrees, end_angle: Degrees) -> Self {
        self.set_extent(start_angle, end_angle);
        self
    }

    #[inline]
    pub const fn center(&self) -> LatLng {
        self.center
    }

    #[inline]
    pub const fn radii(&self) -> Option<Radii> {
        self.radii
    }

    #[inline]
    pub const fn tilt(&self) -> Degrees {
        self.tilt
    }

    #[inline]
    pub const fn start_angle(&self) -> Degrees {
        self.start_angle
    }

    #[inline]
    pub const fn end_angle(&self) -> Degrees {
        self.end_angle
    }

    #[inline]
    pub fn set_center(&mut self, center: LatLng) {
        self.center = center;
    }

    #[inline]
    pub fn set_radii(&mut self, radii: Radii) {
        self.radii = Some(radii);
    }

    #[inline]
    pub fn set_tilt(&mut self, tilt: Degrees) {
        self.tilt = tilt;
    }

    #[inline]
    pub fn set_extent(&mut self, start_angle: Degrees, end_angle: Degrees) {
        self.start_angle = start_angle;
        self.end_angle = end_angle;
    }

    /// Whether the extent covers a (near) full turn, in either direction.
    pub fn is_full_turn(&self) -> bool {
        self.end_angle.abs() >= DEFAULT_END_ANGLE
    }

    /// The radii converted to degrees at the center latitude.
    pub fn angular_radius(&self) -> Result<AngularRadius, EllipseError> {
        let radii = self.radii.ok_or(EllipseError::MissingRadius)?;
        Ok(RadiusProjector::project(radii, self.center.lat())?)
    }

    /// The axis-aligned lat/lng bounds of the (untilted) ellipse.
    pub fn bounds(&self) -> Result<GeoBounds, EllipseError> {
        let radius = self.angular_radius()?;
        Ok(GeoBounds::from_center(self.center, radius.lat, radius.lng))
    }
}
