//! The ellipse overlay: a [`GeoEllipse`] plus everything derived from it for the current view.
use geo::{Degrees, EllipseError, GeoBounds, GeoEllipse, LatLng, Radii};

use super::LayerState;
use crate::Result;
use crate::arc::{EndpointArc, center_to_endpoint};
use crate::config::EllipseOptions;
use crate::coords::{PixelBounds, PixelPoint};
use crate::map_geometry::MapGeometry;
use crate::path::{Backend, ellipse_path};

/// Pixel space geometry for one projection pass. Rebuilt from scratch on every pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectedState {
    pub center: PixelPoint,
    /// Always at least 1.
    pub rx: f64,
    /// Always at least 1.
    pub ry: f64,
    pub tilt: Degrees,
    pub arc: EndpointArc,
    /// The backend the path will be emitted for.
    pub backend: Backend,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Ellipse {
    geo: GeoEllipse,
    options: EllipseOptions,
    /// Recomputed on every mutation, so reads never need a map.
    geo_bounds: core::result::Result<GeoBounds, EllipseError>,
    pixel_bounds: Option<PixelBounds>,
    projected: Option<ProjectedState>,
    hit_tolerance: f64,
    culled: bool,
    state: LayerState,
}

/// Shorthand for [`Ellipse::new`].
pub fn ellipse(
    center: LatLng,
    radii: Option<Radii>,
    tilt: Option<f64>,
    options: EllipseOptions,
) -> Ellipse {
    Ellipse::new(center, radii, tilt, options)
}

impl Ellipse {
    pub fn new(
        center: LatLng,
        radii: Option<Radii>,
        tilt: Option<f64>,
        options: EllipseOptions,
    ) -> Self {
        let (start_angle, end_angle) = options.extent();
        let geo =
            GeoEllipse::new(center, radii, tilt.map(Degrees::new)).with_extent(start_angle, end_angle);

        Self {
            geo_bounds: geo.bounds(),
            geo,
            options,
            pixel_bounds: None,
            projected: None,
            hit_tolerance: 0.0,
            culled: false,
            state: LayerState::Dirty,
        }
    }

    pub fn set_lat_lng(&mut self, center: LatLng) -> &mut Self {
        self.geo.set_center(center);
        self.invalidate();
        self
    }

    pub fn set_radius<R: Into<Radii>>(&mut self, radii: R) -> &mut Self {
        self.geo.set_radii(radii.into());
        self.invalidate();
        self
    }

    pub fn set_tilt<D: Into<Degrees>>(&mut self, tilt: D) -> &mut Self {
        self.geo.set_tilt(tilt.into());
        self.invalidate();
        self
    }

    fn invalidate(&mut self) {
        self.geo_bounds = self.geo.bounds();
        self.state = LayerState::Dirty;
    }

    pub fn get_bounds(&self) -> Result<GeoBounds> {
        self.geo_bounds.clone().map_err(crate::Error::from)
    }

    #[inline]
    pub fn get_lat_lng(&self) -> LatLng {
        self.geo.center()
    }

    #[inline]
    pub fn get_radius(&self) -> Option<Radii> {
        self.geo.radii()
    }

    #[inline]
    pub fn get_tilt(&self) -> Degrees {
        self.geo.tilt()
    }

    #[inline]
    pub fn geo(&self) -> &GeoEllipse {
        &self.geo
    }

    #[inline]
    pub fn options(&self) -> &EllipseOptions {
        &self.options
    }

    #[inline]
    pub fn projected(&self) -> Option<&ProjectedState> {
        self.projected.as_ref()
    }

    /// Projected bounds of the untilted ellipse, padded by the click tolerance.
    #[inline]
    pub fn pixel_bounds(&self) -> Option<&PixelBounds> {
        self.pixel_bounds.as_ref()
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

    /// Recomputes pixel geometry and the culling decision for the view in `map`.
    ///
    /// A detached ellipse (`None`) is left untouched. Any previous projection is discarded
    /// before anything else, so a failed pass never leaves stale geometry behind.
    pub fn project(&mut self, map: Option<&MapGeometry<'_>>) -> Result<()> {
        let Some(map) = map else {
            return Ok(());
        };

        self.projected = None;
        self.pixel_bounds = None;
        self.culled = false;

        let radius = self.geo.angular_radius()?;
        let projector = map.projector();

        let pixel = projector.project_ellipse(self.geo.center(), radius)?;
        let bounds = self.get_bounds()?;
        let pixel_bounds = projector.project_bounds(&bounds, map.config.click_tolerance)?;

        let arc = center_to_endpoint(
            pixel.center,
            pixel.rx,
            pixel.ry,
            self.geo.tilt(),
            self.geo.start_angle(),
            self.geo.end_angle(),
        );

        let culled = map
            .viewport()
            .is_circle_outside(pixel.center, pixel.max_radius());

        trace!(
            message = "projected ellipse",
            center = ?pixel.center,
            rx = pixel.rx,
            ry = pixel.ry,
            backend = ?map.backend,
        );

        if culled {
            debug!(message = "ellipse outside of the viewport", center = ?pixel.center);
        }

        self.projected = Some(ProjectedState {
            center: pixel.center,
            rx: pixel.rx,
            ry: pixel.ry,
            tilt: self.geo.tilt(),
            arc,
            backend: map.backend,
        });
        self.pixel_bounds = Some(pixel_bounds);
        self.hit_tolerance = map.config.click_tolerance;
        self.culled = culled;
        self.state = LayerState::Projected;

        Ok(())
    }

    /// The path string for the last projection pass. Empty if culled, or if never projected.
    pub fn get_path_string(&self) -> String {
        match self.projected {
            Some(ref state) if !self.culled => ellipse_path(state),
            _ => String::new(),
        }
    }

    /// Pointer hit test against the projected, tilted ellipse, grown by the click tolerance.
    /// Ignores the arc extent.
    pub fn contains_pixel(&self, pt: PixelPoint) -> bool {
        let Some(state) = self.projected else {
            return false;
        };

        let (sin_phi, cos_phi) = state.tilt.to_radians().sin_cos();
        let delta = pt - state.center;

        // rotate into the ellipse's own frame
        let x = cos_phi * delta.x + sin_phi * delta.y;
        let y = -sin_phi * delta.x + cos_phi * delta.y;

        let rx = state.rx + self.hit_tolerance;
        let ry = state.ry + self.hit_tolerance;

        (x * x) / (rx * rx) + (y * y) / (ry * ry) <= 1.0
    }

    /// Drops everything derived from a map. The geographic definition is kept, so the ellipse
    /// can be added to another map later.
    pub fn detach(&mut self) {
        self.projected = None;
        self.pixel_bounds = None;
        self.culled = false;
        self.state = LayerState::Dirty;
    }
}
