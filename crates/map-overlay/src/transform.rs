//! The host coordinate transform seam.
//!
//! Nothing downstream of [`Transform`] assumes the projection is linear. Pixel radii are
//! measured by projecting offset points, so any implementation works.
use std::f64::consts;

use geo::LatLng;

use crate::coords::{PixelPoint, Size};

/// Maps a geographic coordinate to a point in the map's layer (pixel) space.
pub trait Transform {
    fn project(&self, point: LatLng) -> PixelPoint;
}

impl<F> Transform for F
where
    F: Fn(LatLng) -> PixelPoint,
{
    #[inline]
    fn project(&self, point: LatLng) -> PixelPoint {
        self(point)
    }
}

/// Maximum viewable latitude due to the mercator projection.
///
/// Derived from: `arctan(sinh(pi))`
pub const MAX_LAT: f64 = 85.051_128_779_806_59;

/// Standard web map tile size, in pixels.
pub const TILE_SIZE: f64 = 256.0;

/// Spherical Web Mercator, scaled by zoom level and shifted so `pixel_origin` lands on (0, 0).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WebMercator {
    zoom: f64,
    tile_size: f64,
    pixel_origin: PixelPoint,
}

impl WebMercator {
    pub const fn new(zoom: f64) -> Self {
        Self {
            zoom,
            tile_size: TILE_SIZE,
            pixel_origin: PixelPoint::ZERO,
        }
    }

    /// A transform where `center` ends up in the middle of a viewport of `size`.
    pub fn centered_on(center: LatLng, zoom: f64, size: Size<f64>) -> Self {
        let mut transform = Self::new(zoom);
        let half_size = PixelPoint::new(size.width / 2.0, size.height / 2.0);
        transform.pixel_origin = (transform.world_point(center) - half_size).round();
        transform
    }

    #[inline]
    pub const fn zoom(&self) -> f64 {
        self.zoom
    }

    #[inline]
    pub const fn pixel_origin(&self) -> PixelPoint {
        self.pixel_origin
    }

    /// Width (and height) of the whole world in pixels at the current zoom.
    #[inline]
    pub fn world_size(&self) -> f64 {
        self.tile_size * self.zoom.exp2()
    }

    /// Projects into world pixel space, before the pixel origin is subtracted.
    pub fn world_point(&self, point: LatLng) -> PixelPoint {
        let scale = self.world_size();

        let lon_rad = point.lng().to_radians();
        // scale to 0-1 and shift origin
        let x = (1.0 + (lon_rad / consts::PI)) / 2.0;

        let lat_rad = point.lat().clamp(-MAX_LAT, MAX_LAT).to_radians();
        // reproject to spherical mercator, then scale to 0-1 and shift origin
        let y = (1.0 - (lat_rad.tan().asinh() / consts::PI)) / 2.0;

        PixelPoint::new(x * scale, y * scale)
    }
}

impl Transform for WebMercator {
    #[inline]
    fn project(&self, point: LatLng) -> PixelPoint {
        self.world_point(point) - self.pixel_origin
    }
}
