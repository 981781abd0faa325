//! Projects geographic overlays (ellipses sized in meters, polygons, polylines) into pixel
//! space for a 2D map, culls them against the view and draws them on vector or raster
//! surfaces.
#[macro_use]
extern crate tracing;

pub mod arc;
pub mod config;
pub mod coords;
mod error;
pub mod feature;
pub mod layer;
pub mod map_geometry;
pub mod path;
pub mod projector;
pub mod render;
pub mod transform;
pub mod viewport;

pub use config::{EllipseOptions, RenderConfig};
pub use coords::{PixelBounds, PixelPoint, Size};
pub use error::{Error, InvalidSize};
pub use feature::{Ellipse, Geometry, GeometryKind, LayerState, PolyPath, ellipse};
pub use layer::{LayerId, Layers};
pub use map_geometry::MapGeometry;
pub use path::Backend;
pub use render::{DrawOutcome, RasterSurface, Renderer, Surface, SvgSurface};
pub use transform::{Transform, WebMercator};

pub type Result<T> = core::result::Result<T, Error>;

/// What a single [`Map::render`] call did.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct RenderReport {
    /// Number of layers that were (re)projected.
    pub projected: usize,
    /// Layers handed to the surface, in draw order.
    pub outcomes: Vec<(LayerId, DrawOutcome)>,
}

impl RenderReport {
    pub fn outcome(&self, layer: LayerId) -> Option<DrawOutcome> {
        self.outcomes
            .iter()
            .find_map(|(id, outcome)| (*id == layer).then_some(*outcome))
    }
}

/// Host side of the overlay: owns the transform, the view, the layers and the renderer, and
/// runs projection passes.
#[derive(Debug)]
pub struct Map<T> {
    transform: T,
    size: Size<f64>,
    pane_offset: PixelPoint,
    config: RenderConfig,
    layers: Layers,
    renderer: Renderer,
    last_backend: Option<Backend>,
    /// Layers removed since the last render, still to be cleared from the surface.
    removed: Vec<LayerId>,
}

impl<T: Transform> Map<T> {
    pub fn new(transform: T, size: Size<f64>) -> Self {
        Self::with_config(transform, size, RenderConfig::default())
    }

    pub fn with_config(transform: T, size: Size<f64>, config: RenderConfig) -> Self {
        Self {
            transform,
            size,
            pane_offset: PixelPoint::ZERO,
            config,
            layers: Layers::default(),
            renderer: Renderer::default(),
            last_backend: None,
            removed: Vec::new(),
        }
    }

    #[inline]
    pub fn transform(&self) -> &T {
        &self.transform
    }

    /// Swaps the transform (i.e on zoom), which invalidates every layer.
    pub fn set_transform(&mut self, transform: T) {
        self.transform = transform;
        self.layers.mark_all_dirty();
    }

    #[inline]
    pub fn size(&self) -> Size<f64> {
        self.size
    }

    #[inline]
    pub fn pane_offset(&self) -> PixelPoint {
        self.pane_offset
    }

    #[inline]
    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    pub fn pan_by(&mut self, offset: PixelPoint) {
        self.pane_offset = self.pane_offset + offset;
        self.layers.mark_all_dirty();
    }

    pub fn resize(&mut self, size: Size<f64>) {
        self.size = size;
        self.layers.mark_all_dirty();
    }

    pub fn add_layer<G: Into<Geometry>>(&mut self, geometry: G) -> LayerId {
        self.layers.add(geometry)
    }

    /// Removes a layer. Its drawing is cleared from the surface on the next render.
    pub fn remove_layer(&mut self, id: LayerId) -> Result<Geometry> {
        let geometry = self.layers.remove(id).ok_or(Error::UnknownLayer(id))?;
        self.removed.push(id);
        Ok(geometry)
    }

    #[inline]
    pub fn layer(&self, id: LayerId) -> Option<&Geometry> {
        self.layers.get(id)
    }

    /// Mutable access to a layer. Setters on the geometry mark it dirty themselves.
    #[inline]
    pub fn layer_mut(&mut self, id: LayerId) -> Option<&mut Geometry> {
        self.layers.get_mut(id)
    }

    #[inline]
    pub fn layers(&self) -> &Layers {
        &self.layers
    }

    #[inline]
    pub fn renderer_mut(&mut self) -> &mut Renderer {
        &mut self.renderer
    }

    /// The projection context for `backend` at the current view.
    pub fn geometry(&self, backend: Backend) -> MapGeometry<'_> {
        MapGeometry {
            transform: &self.transform,
            size: self.size,
            pane_offset: self.pane_offset,
            backend,
            config: self.config,
        }
    }

    /// Reprojects every dirty layer and hands layers to `surface`.
    ///
    /// Retained surfaces only receive the layers that were reprojected, everything else is
    /// drawn every frame. Stops at the first error, after clearing the failed layer from
    /// the surface.
    pub fn render<S>(&mut self, surface: &mut S) -> Result<RenderReport>
    where
        S: Surface + ?Sized,
    {
        let backend = surface.backend();
        if self.last_backend != Some(backend) {
            self.layers.mark_all_dirty();
            self.last_backend = Some(backend);
        }

        let geometry = MapGeometry {
            transform: &self.transform,
            size: self.size,
            pane_offset: self.pane_offset,
            backend,
            config: self.config,
        };

        let retained = surface.is_retained();
        surface.begin_frame(-self.pane_offset);

        for id in self.removed.drain(..) {
            surface.clear_path(id);
        }

        let mut report = RenderReport::default();

        for (id, layer) in self.layers.iter_mut() {
            let dirty = layer.state().needs_projection();

            if dirty {
                if let Err(err) = layer.project(Some(&geometry)) {
                    surface.clear_path(id);
                    return Err(err);
                }
                report.projected += 1;
            } else if retained {
                continue;
            }

            let outcome = self.renderer.draw(surface, id, layer)?;
            layer.set_state(match outcome {
                DrawOutcome::Culled => LayerState::Culled,
                DrawOutcome::Drawn | DrawOutcome::ArcExtentIgnored => LayerState::Drawn,
            });

            report.outcomes.push((id, outcome));
        }

        for (_, layer) in self.layers.iter_mut() {
            layer.set_state(LayerState::Idle);
        }

        trace!(
            message = "rendered frame",
            ?backend,
            projected = report.projected,
            drawn = report.outcomes.len(),
        );

        Ok(report)
    }
}
