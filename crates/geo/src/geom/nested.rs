//! Geometry types that contain nested [`LatLng`]s ([`Line`]s, [`Polygon`]s).
use serde::{Deserialize, Serialize};

use crate::LatLng;
use crate::bounds::GeoBounds;

macro_rules! impl_nested_geometries {
    ($(
        ($name:ident, $inner:ty)
    ),* $(,)?) => {
        $(
            #[doc = "Thin wrapper around `[`Vec`]<[`"]
            #[doc = stringify!($inner)]
            #[doc = "`]>`."]
            #[repr(transparent)]
            #[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
            #[serde(transparent)]
            pub struct $name(Vec<$inner>);

            impl $name {
                #[inline]
                pub fn new() -> Self {
                    Self(Vec::new())
                }

                #[inline]
                pub fn with_capacity(capacity: usize) -> Self {
                    Self(Vec::with_capacity(capacity))
                }

                #[inline]
                pub fn push(&mut self, inner: $inner) {
                    self.0.push(inner);
                }

                #[inline]
                pub fn len(&self) -> usize {
                    self.0.len()
                }

                #[inline]
                pub fn is_empty(&self) -> bool {
                    self.0.is_empty()
                }

                #[inline]
                pub fn iter(&self) -> std::slice::Iter<'_, $inner> {
                    self.0.iter()
                }

                #[inline]
                pub fn as_slice(&self) -> &[$inner] {
                    self.0.as_slice()
                }
            }

            impl From<Vec<$inner>> for $name {
                #[inline]
                fn from(vec: Vec<$inner>) -> Self {
                    Self(vec)
                }
            }

            impl FromIterator<$inner> for $name {
                fn from_iter<I: IntoIterator<Item = $inner>>(iter: I) -> Self {
                    Self(iter.into_iter().collect())
                }
            }

            impl<'a> IntoIterator for &'a $name {
                type Item = &'a $inner;
                type IntoIter = std::slice::Iter<'a, $inner>;

                #[inline]
                fn into_iter(self) -> Self::IntoIter {
                    self.0.iter()
                }
            }
        )*
    };
}

impl_nested_geometries! {
    (Line, LatLng),
    (Polygon, Line),
}

impl Line {
    pub fn bounds(&self) -> Option<GeoBounds> {
        GeoBounds::try_from_iter(self.iter().copied())
    }
}

impl Polygon {
    /// Bounds of every ring. Holes never extend past the outer ring, but they're included
    /// anyways since rings aren't validated.
    pub fn bounds(&self) -> Option<GeoBounds> {
        GeoBounds::try_from_iter(self.iter().flatten().copied())
    }
}

impl From<Line> for Polygon {
    #[inline]
    fn from(ring: Line) -> Self {
        Self(vec![ring])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nested_bounds() {
        let ring: Line = [(0.0, 0.0), (2.0, 1.0), (-1.0, 3.0)]
            .into_iter()
            .map(|pair| LatLng::try_from(pair).unwrap())
            .collect();

        let bounds = ring.bounds().unwrap();
        assert_eq!(bounds.south_west().as_lat_lng(), (-1.0, 0.0));
        assert_eq!(bounds.north_east().as_lat_lng(), (2.0, 3.0));

        let polygon = Polygon::from(ring);
        assert_eq!(polygon.bounds(), Some(bounds));

        assert!(Line::new().bounds().is_none());
        assert!(Polygon::new().bounds().is_none());
    }

    #[test]
    fn test_nested_serde() {
        let json = "[[[0.0,1.0],[2.0,3.0]]]";
        let polygon: Polygon = serde_json::from_str(json).unwrap();

        assert_eq!(polygon.len(), 1);
        assert_eq!(polygon.as_slice()[0].len(), 2);
        assert_eq!(serde_json::to_string(&polygon).unwrap(), "[[[0.0,1.0],[2.0,3.0]]]");
    }
}
