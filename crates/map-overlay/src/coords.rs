use std::ops::{Add, Mul, Neg, Sub};

use tiny_skia::Pixmap;

use crate::error::InvalidSize;

/// A point in the map's layer (pixel) space. (0, 0) is the pixel origin of the map, and y grows
/// downwards.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct PixelPoint {
    pub x: f64,
    pub y: f64,
}

impl PixelPoint {
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    #[inline]
    pub fn round(self) -> Self {
        Self {
            x: self.x.round(),
            y: self.y.round(),
        }
    }

    #[inline]
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    #[inline]
    pub fn distance_to(&self, other: &Self) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

impl Add for PixelPoint {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self::Output {
        Self {
            x: self.x + rhs.x,
            y: self.y + rhs.y,
        }
    }
}

impl Sub for PixelPoint {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: Self) -> Self::Output {
        Self {
            x: self.x - rhs.x,
            y: self.y - rhs.y,
        }
    }
}

impl Neg for PixelPoint {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self::Output {
        Self {
            x: -self.x,
            y: -self.y,
        }
    }
}

impl Mul<f64> for PixelPoint {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: f64) -> Self::Output {
        Self {
            x: self.x * rhs,
            y: self.y * rhs,
        }
    }
}

impl From<(f64, f64)> for PixelPoint {
    #[inline]
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}

/// An axis-aligned rectangle in pixel space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PixelBounds {
    pub min: PixelPoint,
    pub max: PixelPoint,
}

impl PixelBounds {
    /// Builds bounds from any two opposing corners.
    pub fn new(a: PixelPoint, b: PixelPoint) -> Self {
        Self {
            min: PixelPoint::new(a.x.min(b.x), a.y.min(b.y)),
            max: PixelPoint::new(a.x.max(b.x), a.y.max(b.y)),
        }
    }

    pub fn try_from_iter<I>(iter: I) -> Option<Self>
    where
        I: IntoIterator<Item = PixelPoint>,
    {
        let mut iter = iter.into_iter();
        let first = iter.next()?;

        Some(iter.fold(Self::new(first, first), |mut bounds, pt| {
            bounds.extend(pt);
            bounds
        }))
    }

    pub fn extend(&mut self, pt: PixelPoint) {
        self.min = PixelPoint::new(self.min.x.min(pt.x), self.min.y.min(pt.y));
        self.max = PixelPoint::new(self.max.x.max(pt.x), self.max.y.max(pt.y));
    }

    /// Grows every edge outwards by `margin` pixels.
    pub fn pad(self, margin: f64) -> Self {
        let margin = PixelPoint::new(margin, margin);
        Self {
            min: self.min - margin,
            max: self.max + margin,
        }
    }

    pub fn contains(&self, pt: PixelPoint) -> bool {
        (self.min.x..=self.max.x).contains(&pt.x) && (self.min.y..=self.max.y).contains(&pt.y)
    }

    /// True if the two bounds share any area, edges included.
    pub fn intersects(&self, other: &Self) -> bool {
        other.max.x >= self.min.x
            && other.min.x <= self.max.x
            && other.max.y >= self.min.y
            && other.min.y <= self.max.y
    }

    pub fn size(&self) -> Size<f64> {
        Size {
            width: self.max.x - self.min.x,
            height: self.max.y - self.min.y,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Size<T> {
    pub height: T,
    pub width: T,
}

impl<T> Size<T> {
    #[inline]
    pub const fn new(width: T, height: T) -> Self {
        Self { width, height }
    }
}

impl Size<u32> {
    #[inline]
    pub fn to_f64(self) -> Size<f64> {
        Size {
            width: self.width as f64,
            height: self.height as f64,
        }
    }

    pub fn build_empty_pixmap(self) -> Result<Pixmap, InvalidSize> {
        Pixmap::new(self.width, self.height).ok_or_else(|| InvalidSize::new(self))
    }
}

impl Size<f64> {
    /// Rounds each dimension after scaling, same as rounding a scaled [`PixelPoint`].
    #[inline]
    pub fn scale_round(self, by: f64) -> PixelPoint {
        PixelPoint::new(self.width * by, self.height * by).round()
    }
}
