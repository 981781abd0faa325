use std::collections::BTreeMap;

use super::{DrawError, DrawOutcome, Surface, SurfaceMut};
use crate::coords::{PixelPoint, Size};
use crate::feature::Geometry;
use crate::layer::LayerId;
use crate::path::Backend;

const STROKE_COLOR: &str = "#3388ff";
const STROKE_WIDTH: f64 = 3.0;
const FILL_OPACITY: f64 = 0.2;

/// A path element on an [`SvgSurface`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SvgPath {
    pub d: String,
    pub fill: bool,
}

/// Retained vector surface: one path element per layer, replaced whenever that layer is
/// redrawn.
#[derive(Debug, Clone, PartialEq)]
pub struct SvgSurface {
    size: Size<f64>,
    origin: PixelPoint,
    paths: BTreeMap<LayerId, SvgPath>,
}

impl SvgSurface {
    pub fn new(size: Size<f64>) -> Self {
        Self {
            size,
            origin: PixelPoint::ZERO,
            paths: BTreeMap::new(),
        }
    }

    /// Sets the path data for `layer`. An empty path removes the element.
    pub fn update_path(&mut self, layer: LayerId, d: &str, fill: bool) {
        if d.is_empty() {
            self.paths.remove(&layer);
            return;
        }

        match self.paths.get_mut(&layer) {
            Some(path) => {
                path.d.clear();
                path.d.push_str(d);
                path.fill = fill;
            }
            None => {
                self.paths.insert(
                    layer,
                    SvgPath {
                        d: d.to_owned(),
                        fill,
                    },
                );
            }
        }
    }

    #[inline]
    pub fn path(&self, layer: LayerId) -> Option<&SvgPath> {
        self.paths.get(&layer)
    }

    #[inline]
    pub fn paths(&self) -> impl Iterator<Item = (LayerId, &SvgPath)> + '_ {
        self.paths.iter().map(|(id, path)| (*id, path))
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.paths.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// Serializes the surface as a standalone svg document, with the view box over the
    /// visible area.
    pub fn to_svg_string(&self) -> String {
        let mut dst = String::with_capacity(128 + self.paths.len() * 96);

        dst.push_str(&format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{}" height="{}" viewBox="{} {} {} {}">"#,
            self.size.width,
            self.size.height,
            self.origin.x,
            self.origin.y,
            self.size.width,
            self.size.height,
        ));

        for path in self.paths.values() {
            dst.push_str(&format!(
                r#"<path d="{}" stroke="{STROKE_COLOR}" stroke-width="{STROKE_WIDTH}" stroke-linecap="round" stroke-linejoin="round" "#,
                path.d,
            ));

            if path.fill {
                dst.push_str(&format!(
                    r#"fill="{STROKE_COLOR}" fill-opacity="{FILL_OPACITY}" fill-rule="evenodd"/>"#
                ));
            } else {
                dst.push_str(r#"fill="none"/>"#);
            }
        }

        dst.push_str("</svg>");
        dst
    }
}

impl Surface for SvgSurface {
    #[inline]
    fn backend(&self) -> Backend {
        Backend::Vector
    }

    #[inline]
    fn is_retained(&self) -> bool {
        true
    }

    fn begin_frame(&mut self, origin: PixelPoint) {
        self.origin = origin;
    }

    fn clear_path(&mut self, layer: LayerId) {
        self.paths.remove(&layer);
    }

    fn as_surface_mut(&mut self) -> SurfaceMut<'_> {
        SurfaceMut::Vector(self)
    }
}

/// Default vector handler for every geometry kind: the path string already has the right
/// syntax, so it just gets stored.
pub fn draw_path(
    surface: &mut SurfaceMut<'_>,
    layer: LayerId,
    geometry: &Geometry,
) -> Result<DrawOutcome, DrawError> {
    let SurfaceMut::Vector(svg) = surface else {
        return Err(DrawError::BackendMismatch {
            projected: Backend::Vector,
            surface: surface.backend(),
        });
    };

    let path = geometry.path_string();
    if path.is_empty() {
        svg.clear_path(layer);
        return Ok(DrawOutcome::Culled);
    }

    svg.update_path(layer, &path, geometry.fill());
    Ok(DrawOutcome::Drawn)
}
