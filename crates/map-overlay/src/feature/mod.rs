use geo::{GeoBounds, Line, Polygon};

use crate::map_geometry::MapGeometry;
use crate::path::Backend;
use crate::{Error, Result};

pub mod ellipse;
pub mod poly;

pub use ellipse::{Ellipse, ProjectedState, ellipse};
pub use poly::PolyPath;

/// Discriminant of [`Geometry`], used to look up draw handlers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum GeometryKind {
    Polygon,
    Polyline,
    Ellipse,
}

/// Where a layer is in the projection/draw cycle.
///
/// `Idle -> Dirty` on any mutation (or view change), `Dirty -> Projected` during a projection
/// pass, `Projected -> Culled | Drawn` once handed to a renderer, then back to `Idle`.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LayerState {
    Idle,
    #[default]
    Dirty,
    Projected,
    Culled,
    Drawn,
}

impl LayerState {
    #[inline]
    pub fn needs_projection(self) -> bool {
        matches!(self, Self::Dirty)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Geometry {
    Polygon(PolyPath),
    Polyline(PolyPath),
    Ellipse(Ellipse),
}

impl Geometry {
    pub fn polygon<P: Into<Polygon>>(rings: P) -> Self {
        Self::Polygon(PolyPath::new(rings, true))
    }

    pub fn polyline(line: Line) -> Self {
        Self::Polyline(PolyPath::new(line, false))
    }

    pub fn kind(&self) -> GeometryKind {
        match self {
            Self::Polygon(_) => GeometryKind::Polygon,
            Self::Polyline(_) => GeometryKind::Polyline,
            Self::Ellipse(_) => GeometryKind::Ellipse,
        }
    }

    pub fn project(&mut self, map: Option<&MapGeometry<'_>>) -> Result<()> {
        match self {
            Self::Polygon(poly) | Self::Polyline(poly) => poly.project(map),
            Self::Ellipse(ellipse) => ellipse.project(map),
        }
    }

    pub fn path_string(&self) -> String {
        match self {
            Self::Polygon(poly) => poly.path_string(true),
            Self::Polyline(poly) => poly.path_string(false),
            Self::Ellipse(ellipse) => ellipse.get_path_string(),
        }
    }

    pub fn bounds(&self) -> Result<GeoBounds> {
        match self {
            Self::Polygon(poly) | Self::Polyline(poly) => {
                poly.bounds().ok_or(Error::EmptyGeometry(self.kind()))
            }
            Self::Ellipse(ellipse) => ellipse.get_bounds(),
        }
    }

    /// The backend this geometry was last projected for, if it has been projected at all.
    pub fn backend(&self) -> Option<Backend> {
        match self {
            Self::Polygon(poly) | Self::Polyline(poly) => poly.backend(),
            Self::Ellipse(ellipse) => ellipse.projected().map(|state| state.backend),
        }
    }

    pub fn state(&self) -> LayerState {
        match self {
            Self::Polygon(poly) | Self::Polyline(poly) => poly.state(),
            Self::Ellipse(ellipse) => ellipse.state(),
        }
    }

    pub(crate) fn set_state(&mut self, state: LayerState) {
        match self {
            Self::Polygon(poly) | Self::Polyline(poly) => poly.set_state(state),
            Self::Ellipse(ellipse) => ellipse.set_state(state),
        }
    }

    #[inline]
    pub(crate) fn mark_dirty(&mut self) {
        self.set_state(LayerState::Dirty);
    }

    pub fn is_culled(&self) -> bool {
        match self {
            Self::Polygon(poly) | Self::Polyline(poly) => poly.is_culled(),
            Self::Ellipse(ellipse) => ellipse.is_culled(),
        }
    }

    /// Whether the geometry should be filled. Polylines never are.
    pub fn fill(&self) -> bool {
        match self {
            Self::Polygon(poly) => poly.fill(),
            Self::Polyline(_) => false,
            Self::Ellipse(ellipse) => ellipse.options().fill,
        }
    }

    pub fn detach(&mut self) {
        match self {
            Self::Polygon(poly) | Self::Polyline(poly) => poly.detach(),
            Self::Ellipse(ellipse) => ellipse.detach(),
        }
    }

    pub fn as_ellipse(&self) -> Option<&Ellipse> {
        match self {
            Self::Ellipse(ellipse) => Some(ellipse),
            _ => None,
        }
    }

    pub fn as_ellipse_mut(&mut self) -> Option<&mut Ellipse> {
        match self {
            Self::Ellipse(ellipse) => Some(ellipse),
            _ => None,
        }
    }

    pub fn as_poly(&self) -> Option<&PolyPath> {
        match self {
            Self::Polygon(poly) | Self::Polyline(poly) => Some(poly),
            Self::Ellipse(_) => None,
        }
    }

    pub fn as_poly_mut(&mut self) -> Option<&mut PolyPath> {
        match self {
            Self::Polygon(poly) | Self::Polyline(poly) => Some(poly),
            Self::Ellipse(_) => None,
        }
    }
}

impl From<Ellipse> for Geometry {
    #[inline]
    fn from(ellipse: Ellipse) -> Self {
        Self::Ellipse(ellipse)
    }
}

#[cfg(test)]
mod tests {
    use geo::LatLng;

    use super::*;
    use crate::config::EllipseOptions;

    #[test]
    fn test_geometry_dispatch() {
        let center = LatLng::new_checked(1.0, 2.0).unwrap();
        let ellipse: Geometry = ellipse(center, None, None, EllipseOptions::default()).into();

        assert_eq!(ellipse.kind(), GeometryKind::Ellipse);
        assert_eq!(ellipse.state(), LayerState::Dirty);
        assert!(ellipse.fill());
        assert!(ellipse.bounds().unwrap_err().is_missing_radius());
        assert!(ellipse.as_poly().is_none());

        let line = Geometry::polyline(Line::from(vec![center]));
        assert_eq!(line.kind(), GeometryKind::Polyline);
        assert!(!line.fill());
        assert!(line.bounds().is_ok());

        let empty = Geometry::polygon(Polygon::new());
        assert!(matches!(
            empty.bounds(),
            Err(Error::EmptyGeometry(GeometryKind::Polygon))
        ));
    }
}
