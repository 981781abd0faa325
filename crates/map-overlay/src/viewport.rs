use crate::coords::{PixelBounds, PixelPoint, Size};

/// The visible area of the map in layer pixel space, padded on every side so shapes just off
/// screen are still drawn while panning.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    bounds: PixelBounds,
}

impl Viewport {
    /// Builds the padded viewport for a map of `size`, whose pane has been panned by
    /// `pane_offset`. `padding` is a fraction of the size, added on each side.
    pub fn new(size: Size<f64>, pane_offset: PixelPoint, padding: f64) -> Self {
        let min = -pane_offset - size.scale_round(padding);
        let max = min + size.scale_round(1.0 + 2.0 * padding);

        Self {
            bounds: PixelBounds { min, max },
        }
    }

    #[inline]
    pub const fn from_bounds(bounds: PixelBounds) -> Self {
        Self { bounds }
    }

    #[inline]
    pub const fn bounds(&self) -> &PixelBounds {
        &self.bounds
    }

    /// True if a circle of radius `r` around `center` is entirely outside the viewport.
    ///
    /// Conservative: shapes that only touch an edge, or that would be outside once tilt is
    /// accounted for, are still kept.
    pub fn is_circle_outside(&self, center: PixelPoint, r: f64) -> bool {
        let PixelBounds { min, max } = self.bounds;

        center.x - r > max.x || center.y - r > max.y || center.x + r < min.x || center.y + r < min.y
    }

    #[inline]
    pub fn intersects(&self, bounds: &PixelBounds) -> bool {
        self.bounds.intersects(bounds)
    }
}
