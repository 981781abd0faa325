use crate::config::RenderConfig;
use crate::coords::{PixelPoint, Size};
use crate::path::Backend;
use crate::projector::ScreenProjector;
use crate::transform::Transform;
use crate::viewport::Viewport;

/// Everything a layer needs from the map during a projection pass.
///
/// Borrowed from the [`Map`](crate::Map) for the length of one pass, so layers never keep a
/// handle to the map itself.
#[derive(Clone, Copy)]
pub struct MapGeometry<'a> {
    pub transform: &'a dyn Transform,
    /// The size of the visible area, in pixels.
    pub size: Size<f64>,
    /// How far the map pane has been panned, in pixels.
    pub pane_offset: PixelPoint,
    pub backend: Backend,
    pub config: RenderConfig,
}

impl<'a> MapGeometry<'a> {
    #[inline]
    pub fn projector(&self) -> ScreenProjector<'a> {
        ScreenProjector::new(self.transform)
    }

    #[inline]
    pub fn viewport(&self) -> Viewport {
        Viewport::new(self.size, self.pane_offset, self.config.clip_padding)
    }
}

impl std::fmt::Debug for MapGeometry<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MapGeometry")
            .field("size", &self.size)
            .field("pane_offset", &self.pane_offset)
            .field("backend", &self.backend)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
