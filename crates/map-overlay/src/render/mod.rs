//! Draw dispatch. Every `(Backend, GeometryKind)` pair maps to a plain function pointer, so
//! callers can swap out how any one kind of geometry is drawn on any one surface.
use std::collections::HashMap;

use crate::coords::PixelPoint;
use crate::feature::{Geometry, GeometryKind};
use crate::layer::LayerId;
use crate::path::Backend;

pub mod raster;
pub mod vector;

pub use raster::RasterSurface;
pub use vector::{SvgPath, SvgSurface};

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DrawError {
    #[error("tiny_skia error")]
    TinySkiaError,
    #[error("no draw handler registered for {kind:?} geometry on the {backend:?} backend")]
    NoHandler {
        backend: Backend,
        kind: GeometryKind,
    },
    #[error("geometry projected for the {projected:?} backend can't be drawn on a {surface:?} surface")]
    BackendMismatch { projected: Backend, surface: Backend },
    #[error("handler for {expected:?} geometry was given {found:?} geometry")]
    KindMismatch {
        expected: GeometryKind,
        found: GeometryKind,
    },
}

/// What happened to a layer when it was handed to a surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DrawOutcome {
    Drawn,
    /// Nothing was drawn: the geometry is outside of the viewport, or was never projected.
    Culled,
    /// Drawn, but as a closed full ellipse, since the surface can't draw partial arcs.
    ArcExtentIgnored,
}

/// Mutable access to one of the concrete surfaces, handed to draw handlers.
pub enum SurfaceMut<'a> {
    Vector(&'a mut SvgSurface),
    Raster(&'a mut RasterSurface),
}

impl SurfaceMut<'_> {
    pub fn backend(&self) -> Backend {
        match self {
            Self::Vector(_) => Backend::Vector,
            Self::Raster(_) => Backend::Raster,
        }
    }
}

pub trait Surface {
    fn backend(&self) -> Backend;

    /// Whether paths drawn in previous frames persist until replaced. Retained surfaces only
    /// need to be handed layers that changed.
    fn is_retained(&self) -> bool;

    /// Called once before a frame is drawn, with the layer space position of the top left
    /// corner of the visible area.
    fn begin_frame(&mut self, origin: PixelPoint);

    /// Removes anything previously drawn for `layer`.
    fn clear_path(&mut self, layer: LayerId);

    fn as_surface_mut(&mut self) -> SurfaceMut<'_>;
}

pub type DrawHandler =
    fn(&mut SurfaceMut<'_>, LayerId, &Geometry) -> Result<DrawOutcome, DrawError>;

/// Routes each geometry to the handler registered for its kind and the surface's backend.
#[derive(Debug, Clone)]
pub struct Renderer {
    handlers: HashMap<(Backend, GeometryKind), DrawHandler>,
}

impl Default for Renderer {
    fn default() -> Self {
        let mut renderer = Self::empty();

        for kind in [GeometryKind::Polygon, GeometryKind::Polyline] {
            renderer.register(Backend::Vector, kind, vector::draw_path);
            renderer.register(Backend::Raster, kind, raster::draw_poly);
        }

        renderer.register(Backend::Vector, GeometryKind::Ellipse, vector::draw_path);
        renderer.register(Backend::Raster, GeometryKind::Ellipse, raster::draw_ellipse);

        renderer
    }
}

impl Renderer {
    /// A renderer with no handlers at all.
    pub fn empty() -> Self {
        Self {
            handlers: HashMap::with_capacity(6),
        }
    }

    /// Registers `handler`, returning the handler it replaced (if any).
    pub fn register(
        &mut self,
        backend: Backend,
        kind: GeometryKind,
        handler: DrawHandler,
    ) -> Option<DrawHandler> {
        self.handlers.insert((backend, kind), handler)
    }

    pub fn handler(&self, backend: Backend, kind: GeometryKind) -> Option<DrawHandler> {
        self.handlers.get(&(backend, kind)).copied()
    }

    /// Draws a projected geometry on `surface`. Culled or unprojected geometry has any
    /// previous drawing cleared, and never reaches a handler.
    pub fn draw<S>(
        &self,
        surface: &mut S,
        layer: LayerId,
        geometry: &Geometry,
    ) -> Result<DrawOutcome, DrawError>
    where
        S: Surface + ?Sized,
    {
        let backend = surface.backend();

        let projected = match geometry.backend() {
            Some(projected) if !geometry.is_culled() => projected,
            _ => {
                surface.clear_path(layer);
                return Ok(DrawOutcome::Culled);
            }
        };

        if projected != backend {
            return Err(DrawError::BackendMismatch {
                projected,
                surface: backend,
            });
        }

        let kind = geometry.kind();
        let handler = self
            .handler(backend, kind)
            .ok_or(DrawError::NoHandler { backend, kind })?;

        handler(&mut surface.as_surface_mut(), layer, geometry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_handlers_cover_every_pair() {
        let renderer = Renderer::default();

        for backend in [Backend::Vector, Backend::Raster] {
            for kind in [
                GeometryKind::Polygon,
                GeometryKind::Polyline,
                GeometryKind::Ellipse,
            ] {
                assert!(renderer.handler(backend, kind).is_some(), "{backend:?} {kind:?}");
            }
        }

        assert!(
            Renderer::empty()
                .handler(Backend::Vector, GeometryKind::Ellipse)
                .is_none()
        );
    }

    #[test]
    fn test_register_replaces() {
        fn noop(_: &mut SurfaceMut<'_>, _: LayerId, _: &Geometry) -> Result<DrawOutcome, DrawError> {
            Ok(DrawOutcome::Drawn)
        }

        let mut renderer = Renderer::empty();
        assert!(
            renderer
                .register(Backend::Raster, GeometryKind::Ellipse, noop)
                .is_none()
        );
        assert!(
            renderer
                .register(Backend::Raster, GeometryKind::Ellipse, raster::draw_ellipse)
                .is_some()
        );
        assert!(renderer.handler(Backend::Vector, GeometryKind::Ellipse).is_none());
    }
}
