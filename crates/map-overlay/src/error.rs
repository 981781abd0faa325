use std::fmt;

use crate::coords::{PixelPoint, Size};
use crate::feature::GeometryKind;
use crate::layer::LayerId;
use crate::render::DrawError;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Ellipse(#[from] geo::EllipseError),
    #[error("transform produced a non-finite pixel position for the {what}: {point:?}")]
    NonFinitePixel {
        what: &'static str,
        point: PixelPoint,
    },
    #[error(transparent)]
    InvalidSize(#[from] InvalidSize),
    #[error(transparent)]
    DrawError(#[from] DrawError),
    #[error("no layer with id {0}")]
    UnknownLayer(LayerId),
    #[error("{0:?} geometry has no points")]
    EmptyGeometry(GeometryKind),
    #[error("failed to encode png: {0}")]
    PngEncode(#[from] png::EncodingError),
}

impl Error {
    /// True if this error came from trying to project/draw an ellipse that has no radii.
    pub fn is_missing_radius(&self) -> bool {
        matches!(self, Self::Ellipse(geo::EllipseError::MissingRadius))
    }
}

/// Checks that a projected point is usable, so NaN/Inf never make it into a path string.
pub(crate) fn ensure_finite(what: &'static str, point: PixelPoint) -> Result<PixelPoint, Error> {
    if point.is_finite() {
        Ok(point)
    } else {
        Err(Error::NonFinitePixel { what, point })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidSize {
    size: Size<u32>,
}

impl std::error::Error for InvalidSize {}

impl From<Size<u32>> for InvalidSize {
    fn from(size: Size<u32>) -> Self {
        Self { size }
    }
}

impl InvalidSize {
    pub fn new(size: Size<u32>) -> Self {
        Self { size }
    }

    pub fn get(&self) -> Size<u32> {
        self.size
    }
}

impl fmt::Display for InvalidSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        const MAX_SIZE: u32 = (i32::MAX / 4) as u32;

        if self.size.height == 0 && self.size.width == 0 {
            f.write_str("surface must be at least 1x1 pixels")
        } else if self.size.height == 0 {
            f.write_str("surface height must be at least 1 pixel")
        } else if self.size.width == 0 {
            f.write_str("surface width must be at least 1 pixel")
        } else if self.size.height >= MAX_SIZE {
            write!(
                f,
                "maximum surface height exceeded: {} (max is {MAX_SIZE})",
                self.size.height
            )
        } else if self.size.width >= MAX_SIZE {
            write!(
                f,
                "maximum surface width exceeded: {} (max is {MAX_SIZE})",
                self.size.width
            )
        } else {
            write!(
                f,
                "invalid surface size: {}x{}",
                self.size.width, self.size.height
            )
        }
    }
}

#[test]
fn test_invalid_size_messages() {
    assert_eq!(
        InvalidSize::new(Size::new(0, 0)).to_string(),
        "surface must be at least 1x1 pixels"
    );
    assert_eq!(
        InvalidSize::new(Size::new(10, 0)).to_string(),
        "surface height must be at least 1 pixel"
    );
    assert_eq!(
        InvalidSize::new(Size::new(u32::MAX, 10)).to_string(),
        format!("maximum surface width exceeded: {} (max is {})", u32::MAX, i32::MAX / 4)
    );
}
