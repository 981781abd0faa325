//! Geographic → pixel projection for overlay geometry.
use geo::{AngularRadius, GeoBounds, LatLng};

use crate::Result;
use crate::coords::{PixelBounds, PixelPoint};
use crate::error::ensure_finite;
use crate::transform::Transform;

/// Smallest pixel radius an ellipse is ever drawn with.
pub const MIN_PIXEL_RADIUS: f64 = 1.0;

/// An ellipse center and radii in pixel space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PixelEllipse {
    pub center: PixelPoint,
    pub rx: f64,
    pub ry: f64,
}

impl PixelEllipse {
    /// The larger semi-axis. Bounds the ellipse regardless of tilt.
    #[inline]
    pub fn max_radius(&self) -> f64 {
        self.rx.max(self.ry)
    }
}

/// Projects geographic geometry through the host [`Transform`].
#[derive(Clone, Copy)]
pub struct ScreenProjector<'a> {
    transform: &'a dyn Transform,
}

impl<'a> ScreenProjector<'a> {
    #[inline]
    pub fn new(transform: &'a dyn Transform) -> Self {
        Self { transform }
    }

    pub fn project_point(&self, what: &'static str, point: LatLng) -> Result<PixelPoint> {
        ensure_finite(what, self.transform.project(point))
    }

    /// Projects the center, then measures each pixel radius by projecting a helper point
    /// offset by the angular radius (west for x, south for y).
    ///
    /// Measuring instead of scaling analytically keeps this correct for any transform, at
    /// the cost of two extra projections.
    pub fn project_ellipse(&self, center: LatLng, radius: AngularRadius) -> Result<PixelEllipse> {
        let pixel_center = self.project_point("ellipse center", center)?;

        let left = self.project_point(
            "ellipse x radius",
            LatLng::new_unchecked(center.lat(), center.lng() - radius.lng.get()),
        )?;
        let below = self.project_point(
            "ellipse y radius",
            LatLng::new_unchecked(center.lat() - radius.lat.get(), center.lng()),
        )?;

        Ok(PixelEllipse {
            center: pixel_center,
            rx: (pixel_center.x - left.x).max(MIN_PIXEL_RADIUS),
            ry: (below.y - pixel_center.y).max(MIN_PIXEL_RADIUS),
        })
    }

    /// Projects the south-west and north-east corners of `bounds`, then pads the result by
    /// `tolerance` pixels.
    pub fn project_bounds(&self, bounds: &GeoBounds, tolerance: f64) -> Result<PixelBounds> {
        let south_west = self.project_point("south-west bound", bounds.south_west())?;
        let north_east = self.project_point("north-east bound", bounds.north_east())?;

        Ok(PixelBounds::new(south_west, north_east).pad(tolerance))
    }
}

#[cfg(test)]
mod tests {
    use geo::{Degrees, Radii, RadiusProjector};

    use super::*;
    use crate::transform::WebMercator;

    fn linear(pt: LatLng) -> PixelPoint {
        PixelPoint::new(pt.lng() * 100.0, -pt.lat() * 100.0)
    }

    #[test]
    fn test_linear_transform_radii() {
        let projector = ScreenProjector::new(&linear);
        let radius = AngularRadius {
            lat: Degrees::new(0.5),
            lng: Degrees::new(0.25),
        };

        let center = LatLng::new_checked(1.0, 2.0).unwrap();
        let ellipse = projector.project_ellipse(center, radius).unwrap();

        assert_eq!(ellipse.center, PixelPoint::new(200.0, -100.0));
        assert!((ellipse.rx - 25.0).abs() < 1e-9);
        assert!((ellipse.ry - 50.0).abs() < 1e-9);
        assert_eq!(ellipse.max_radius(), ellipse.ry);
    }

    #[test]
    fn test_tiny_radii_are_clamped() {
        let projector = ScreenProjector::new(&linear);
        let radius = RadiusProjector::project(Radii::new(0.001, 0.0), 0.0).unwrap();

        let ellipse = projector
            .project_ellipse(LatLng::new_checked(0.0, 0.0).unwrap(), radius)
            .unwrap();

        assert_eq!(ellipse.rx, MIN_PIXEL_RADIUS);
        assert_eq!(ellipse.ry, MIN_PIXEL_RADIUS);
    }

    #[test]
    fn test_mercator_radii_stretch_with_latitude() {
        let merc = WebMercator::new(10.0);
        let projector = ScreenProjector::new(&merc);
        let radii = Radii::new(5000.0, 5000.0);

        let at = |lat: f64| {
            let center = LatLng::new_checked(lat, 0.0).unwrap();
            let radius = RadiusProjector::project(radii, lat).unwrap();
            projector.project_ellipse(center, radius).unwrap()
        };

        let equator = at(0.0);
        let north = at(60.0);

        // a circle in meters stays (roughly) a circle on a conformal projection
        assert!((north.rx / north.ry - 1.0).abs() < 0.02);
        // but gets twice as large at 60 degrees
        assert!((north.rx / equator.rx - 2.0).abs() < 0.02);
    }

    #[test]
    fn test_non_finite_projection_is_an_error() {
        let broken = |_: LatLng| PixelPoint::new(f64::NAN, 0.0);
        let projector = ScreenProjector::new(&broken);

        let err = projector
            .project_point("test point", LatLng::new_checked(0.0, 0.0).unwrap())
            .unwrap_err();

        assert!(matches!(
            err,
            crate::Error::NonFinitePixel {
                what: "test point",
                ..
            }
        ));
    }

    #[test]
    fn test_project_bounds_is_padded() {
        let projector = ScreenProjector::new(&linear);
        let bounds = GeoBounds::new(
            LatLng::new_checked(-1.0, -1.0).unwrap(),
            LatLng::new_checked(1.0, 1.0).unwrap(),
        );

        let pixel = projector.project_bounds(&bounds, 2.0).unwrap();
        assert_eq!(pixel.min, PixelPoint::new(-102.0, -102.0));
        assert_eq!(pixel.max, PixelPoint::new(102.0, 102.0));
    }
}
