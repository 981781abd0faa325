use serde::{Deserialize, Serialize};

use crate::LatLng;
use crate::ang::Degrees;

/// An axis-aligned rectangle in lat/lng space, bounded by 2 latitude + 2 longitude lines.
///
/// Serializes as `{ "south_west": [lat, lng], "north_east": [lat, lng] }`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoBounds {
    south_west: LatLng,
    north_east: LatLng,
}

impl GeoBounds {
    /// Builds bounds from any two opposing corners.
    pub fn new(a: LatLng, b: LatLng) -> Self {
        let mut bounds = Self::from_point(a);
        bounds.extend(b);
        bounds
    }

    /// Creates bounds from a single point. The resulting bounds will have 0 area.
    #[inline]
    pub const fn from_point(pt: LatLng) -> Self {
        Self {
            south_west: pt,
            north_east: pt,
        }
    }

    /// Bounds centered on `center`, spanning `lat_radius` north/south and `lng_radius`
    /// east/west.
    pub fn from_center(center: LatLng, lat_radius: Degrees, lng_radius: Degrees) -> Self {
        Self::new(
            center.offset(-lat_radius, -lng_radius),
            center.offset(lat_radius, lng_radius),
        )
    }

    /// Builds the smallest bounds covering every point. Returns [`None`] if empty.
    pub fn try_from_iter<I>(iter: I) -> Option<Self>
    where
        I: IntoIterator<Item = LatLng>,
    {
        let mut iter = iter.into_iter();
        let mut bounds = iter.next().map(Self::from_point)?;
        iter.for_each(|pt| bounds.extend(pt));
        Some(bounds)
    }

    #[inline]
    pub const fn south_west(&self) -> LatLng {
        self.south_west
    }

    #[inline]
    pub const fn north_east(&self) -> LatLng {
        self.north_east
    }

    #[inline]
    pub fn south(&self) -> f64 {
        self.south_west.lat()
    }

    #[inline]
    pub fn west(&self) -> f64 {
        self.south_west.lng()
    }

    #[inline]
    pub fn north(&self) -> f64 {
        self.north_east.lat()
    }

    #[inline]
    pub fn east(&self) -> f64 {
        self.north_east.lng()
    }

    pub fn center(&self) -> LatLng {
        LatLng::new_unchecked(
            (self.south() + self.north()) / 2.0,
            (self.west() + self.east()) / 2.0,
        )
    }

    pub fn delta_lat(&self) -> Degrees {
        Degrees::new(self.north() - self.south())
    }

    pub fn delta_lng(&self) -> Degrees {
        Degrees::new(self.east() - self.west())
    }

    /// Grows the bounds to include `pt`.
    pub fn extend(&mut self, pt: LatLng) {
        self.south_west = LatLng::new_unchecked(
            self.south().min(pt.lat()),
            self.west().min(pt.lng()),
        );
        self.north_east = LatLng::new_unchecked(
            self.north().max(pt.lat()),
            self.east().max(pt.lng()),
        );
    }

    pub fn merge(&mut self, other: &Self) {
        self.extend(other.south_west);
        self.extend(other.north_east);
    }

    pub fn contains(&self, pt: LatLng) -> bool {
        (self.south()..=self.north()).contains(&pt.lat())
            && (self.west()..=self.east()).contains(&pt.lng())
    }

    /// True if the two bounds share any area, edges included.
    pub fn intersects(&self, other: &Self) -> bool {
        other.north() >= self.south()
            && other.south() <= self.north()
            && other.east() >= self.west()
            && other.west() <= self.east()
    }

    /// True if every corner is a finite number.
    pub fn is_valid(&self) -> bool {
        [self.south(), self.west(), self.north(), self.east()]
            .iter()
            .all(|v| v.is_finite())
    }
}

impl Extend<LatLng> for GeoBounds {
    fn extend<T: IntoIterator<Item = LatLng>>(&mut self, iter: T) {
        for pt in iter {
            GeoBounds::extend(self, pt);
        }
    }
}
