use geo::{GeoBounds, Line, Polygon};

use super::LayerState;
use crate::Result;
use crate::coords::{PixelBounds, PixelPoint};
use crate::map_geometry::MapGeometry;
use crate::path::{Backend, poly_path};

/// Rings of geographic points, drawn either as a polygon or a polyline.
#[derive(Debug, Clone, PartialEq)]
pub struct PolyPath {
    rings: Polygon,
    fill: bool,
    projected: Vec<Vec<PixelPoint>>,
    pixel_bounds: Option<PixelBounds>,
    backend: Option<Backend>,
    culled: bool,
    state: LayerState,
}

impl PolyPath {
    pub fn new<P: Into<Polygon>>(rings: P, fill: bool) -> Self {
        Self {
            rings: rings.into(),
            fill,
            projected: Vec::new(),
            pixel_bounds: None,
            backend: None,
            culled: false,
            state: LayerState::Dirty,
        }
    }

    #[inline]
    pub fn rings(&self) -> &Polygon {
        &self.rings
    }

    pub fn set_rings<P: Into<Polygon>>(&mut self, rings: P) -> &mut Self {
        self.rings = rings.into();
        self.state = LayerState::Dirty;
        self
    }

    pub fn add_ring(&mut self, ring: Line) -> &mut Self {
        self.rings.push(ring);
        self.state = LayerState::Dirty;
        self
    }

    #[inline]
    pub fn fill(&self) -> bool {
        self.fill
    }

    #[inline]
    pub fn bounds(&self) -> Option<GeoBounds> {
        self.rings.bounds()
    }

    #[inline]
    pub fn projected(&self) -> &[Vec<PixelPoint>] {
        &self.projected
    }

    #[inline]
    pub fn pixel_bounds(&self) -> Option<&PixelBounds> {
        self.pixel_bounds.as_ref()
    }

    #[inline]
    pub fn backend(&self) -> Option<Backend> {
        self.backend
    }

    #[inline]
    pub fn is_culled(&self) -> bool {
        self.culled
    }

    #[inline]
    pub fn state(&self) -> LayerState {
        self.state
    }

    #[inline]
    pub(crate) fn set_state(&mut self, state: LayerState) {
        self.state = state;
    }

    pub fn project(&mut self, map: Option<&MapGeometry<'_>>) -> Result<()> {
        let Some(map) = map else {
            return Ok(());
        };

        self.projected.clear();
        self.pixel_bounds = None;
        self.backend = None;
        self.culled = false;

        let projector = map.projector();
        let mut projected = Vec::with_capacity(self.rings.len());

        for ring in self.rings.iter() {
            let pixels = ring
                .iter()
                .map(|pt| projector.project_point("poly vertex", *pt))
                .collect::<Result<Vec<_>>>()?;

            projected.push(pixels);
        }

        let pixel_bounds = PixelBounds::try_from_iter(projected.iter().flatten().copied())
            .map(|bounds| bounds.pad(map.config.click_tolerance));

        // nothing to draw counts as outside of the view
        self.culled = !pixel_bounds.is_some_and(|bounds| map.viewport().intersects(&bounds));

        if self.culled {
            debug!(message = "poly path outside of the viewport", rings = projected.len());
        }

        self.projected = projected;
        self.pixel_bounds = pixel_bounds;
        self.backend = Some(map.backend);
        self.state = LayerState::Projected;
        Ok(())
    }

    pub fn path_string(&self, closed: bool) -> String {
        match self.backend {
            Some(backend) if !self.culled => poly_path(backend, &self.projected, closed),
            _ => String::new(),
        }
    }

    pub fn contains_pixel(&self, pt: PixelPoint) -> bool {
        self.pixel_bounds.is_some_and(|bounds| bounds.contains(pt))
    }

    pub fn detach(&mut self) {
        self.projected.clear();
        self.pixel_bounds = None;
        self.backend = None;
        self.culled = false;
        self.state = LayerState::Dirty;
    }
}

#[cfg(test)]
mod tests {
    use geo::LatLng;

    use super::*;
    use crate::config::RenderConfig;
    use crate::coords::Size;

    fn ring(points: &[(f64, f64)]) -> Line {
        points
            .iter()
            .map(|pair| LatLng::try_from(*pair).unwrap())
            .collect()
    }

    fn linear(pt: LatLng) -> PixelPoint {
        PixelPoint::new(pt.lng() * 10.0, -pt.lat() * 10.0)
    }

    #[test]
    fn test_poly_project_and_cull() {
        let map = MapGeometry {
            transform: &linear,
            size: Size::new(100.0, 100.0),
            pane_offset: PixelPoint::ZERO,
            backend: Backend::Vector,
            config: RenderConfig::builder().clip_padding(0.0).build(),
        };

        let mut visible = PolyPath::new(ring(&[(-1.0, 1.0), (-2.0, 3.0), (-4.0, 2.0)]), true);
        visible.project(Some(&map)).unwrap();

        assert!(!visible.is_culled());
        assert_eq!(visible.path_string(true), "M10,10L30,20L20,40z");
        assert_eq!(visible.path_string(false), "M10,10L30,20L20,40");
        assert!(visible.contains_pixel(PixelPoint::new(11.0, 11.0)));
        assert_eq!(visible.state(), LayerState::Projected);

        let mut hidden = PolyPath::new(ring(&[(20.0, 20.0), (21.0, 21.0)]), false);
        hidden.project(Some(&map)).unwrap();
        assert!(hidden.is_culled());
        assert_eq!(hidden.path_string(false), "");

        let mut empty = PolyPath::new(Polygon::new(), true);
        empty.project(Some(&map)).unwrap();
        assert!(empty.is_culled());
        assert_eq!(empty.path_string(true), "");

        visible.detach();
        assert!(visible.projected().is_empty());
        assert_eq!(visible.path_string(true), "");
    }
}
