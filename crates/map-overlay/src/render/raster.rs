use tiny_skia::{
    Color, FillRule, LineCap, LineJoin, Paint, PathBuilder, Pixmap, Rect, Stroke, Transform,
};

use super::{DrawError, DrawOutcome, Surface, SurfaceMut};
use crate::coords::{PixelPoint, Size};
use crate::error::InvalidSize;
use crate::feature::{Geometry, GeometryKind, ProjectedState};
use crate::layer::LayerId;
use crate::path::{Backend, round_px};

/// Leaflet blue.
const STROKE_RGB: (u8, u8, u8) = (0x33, 0x88, 0xff);
/// 20% opacity.
const FILL_ALPHA: u8 = 51;
const STROKE_WIDTH: f32 = 3.0;

/// Immediate mode surface backed by a [`Pixmap`]. Cleared at the start of every frame, so
/// every visible layer has to be drawn again.
#[derive(Debug, Clone, PartialEq)]
pub struct RasterSurface {
    pixmap: Pixmap,
    origin: PixelPoint,
}

impl RasterSurface {
    pub fn new(size: Size<u32>) -> Result<Self, InvalidSize> {
        Ok(Self {
            pixmap: size.build_empty_pixmap()?,
            origin: PixelPoint::ZERO,
        })
    }

    #[inline]
    pub fn pixmap(&self) -> &Pixmap {
        &self.pixmap
    }

    pub fn size(&self) -> Size<u32> {
        Size::new(self.pixmap.width(), self.pixmap.height())
    }

    /// Alpha of the pixel at (`x`, `y`), in surface coordinates.
    pub fn alpha_at(&self, x: u32, y: u32) -> Option<u8> {
        self.pixmap.pixel(x, y).map(|px| px.alpha())
    }

    pub fn encode_png(&self) -> crate::Result<Vec<u8>> {
        self.pixmap.encode_png().map_err(crate::Error::from)
    }

    #[inline]
    fn to_surface(&self) -> Transform {
        Transform::from_translate(-self.origin.x as f32, -self.origin.y as f32)
    }

    fn paints() -> (Paint<'static>, Paint<'static>, Stroke) {
        let (r, g, b) = STROKE_RGB;

        let mut stroke_paint = Paint::default();
        stroke_paint.set_color_rgba8(r, g, b, u8::MAX);
        stroke_paint.anti_alias = true;

        let mut fill_paint = stroke_paint.clone();
        fill_paint.set_color_rgba8(r, g, b, FILL_ALPHA);

        let stroke = Stroke {
            width: STROKE_WIDTH,
            line_cap: LineCap::Round,
            line_join: LineJoin::Round,
            ..Stroke::default()
        };

        (stroke_paint, fill_paint, stroke)
    }

    /// Draws each ring as its own subpath. Rings with no points are skipped.
    pub fn draw_poly(
        &mut self,
        rings: &[Vec<PixelPoint>],
        closed: bool,
        fill: bool,
    ) -> Result<(), DrawError> {
        let mut pb = PathBuilder::new();

        for ring in rings {
            let mut points = ring.iter();
            let Some(first) = points.next() else {
                continue;
            };

            pb.move_to(first.x as f32, first.y as f32);
            for pt in points {
                pb.line_to(pt.x as f32, pt.y as f32);
            }

            if closed {
                pb.close();
            }
        }

        // an empty builder (or a lone move_to) has nothing to draw
        let Some(path) = pb.finish() else {
            return Ok(());
        };

        let (stroke_paint, fill_paint, stroke) = Self::paints();
        let transform = self.to_surface();

        if fill && closed {
            self.pixmap
                .fill_path(&path, &fill_paint, FillRule::EvenOdd, transform, None);
        }

        self.pixmap
            .stroke_path(&path, &stroke_paint, &stroke, transform, None);

        Ok(())
    }

    /// Draws the full ellipse described by `state`, snapped to whole pixels. The arc extent
    /// isn't looked at.
    pub fn draw_ellipse(&mut self, state: &ProjectedState, fill: bool) -> Result<(), DrawError> {
        let (cx, cy, rect) = snap_oval(state)?;
        let path = PathBuilder::from_oval(rect).ok_or(DrawError::TinySkiaError)?;

        let transform = Transform::from_rotate_at(state.tilt.get() as f32, cx, cy)
            .post_translate(-self.origin.x as f32, -self.origin.y as f32);

        let (stroke_paint, fill_paint, stroke) = Self::paints();

        if fill {
            self.pixmap
                .fill_path(&path, &fill_paint, FillRule::Winding, transform, None);
        }

        self.pixmap
            .stroke_path(&path, &stroke_paint, &stroke, transform, None);

        Ok(())
    }
}

/// Snaps the ellipse to the same whole pixels its `AL` path string uses. Returns the snapped
/// center and the untilted bounding box of the oval.
fn snap_oval(state: &ProjectedState) -> Result<(f32, f32, Rect), DrawError> {
    let cx = round_px(state.center.x) as f32;
    let cy = round_px(state.center.y) as f32;
    let rx = round_px(state.rx).max(1) as f32;
    let ry = round_px(state.ry).max(1) as f32;

    let rect = Rect::from_xywh(cx - rx, cy - ry, rx * 2.0, ry * 2.0)
        .ok_or(DrawError::TinySkiaError)?;
    Ok((cx, cy, rect))
}

impl Surface for RasterSurface {
    #[inline]
    fn backend(&self) -> Backend {
        Backend::Raster
    }

    #[inline]
    fn is_retained(&self) -> bool {
        false
    }

    fn begin_frame(&mut self, origin: PixelPoint) {
        self.origin = origin;
        self.pixmap.fill(Color::TRANSPARENT);
    }

    /// Nothing to remove, the whole pixmap is cleared every frame.
    fn clear_path(&mut self, _layer: LayerId) {}

    fn as_surface_mut(&mut self) -> SurfaceMut<'_> {
        SurfaceMut::Raster(self)
    }
}

fn raster_surface<'s>(
    surface: &'s mut SurfaceMut<'_>,
) -> Result<&'s mut RasterSurface, DrawError> {
    match surface {
        SurfaceMut::Raster(raster) => Ok(&mut **raster),
        SurfaceMut::Vector(_) => Err(DrawError::BackendMismatch {
            projected: Backend::Raster,
            surface: Backend::Vector,
        }),
    }
}

/// Default raster handler for polygons and polylines.
pub fn draw_poly(
    surface: &mut SurfaceMut<'_>,
    _layer: LayerId,
    geometry: &Geometry,
) -> Result<DrawOutcome, DrawError> {
    let raster = raster_surface(surface)?;

    let (poly, closed) = match geometry {
        Geometry::Polygon(poly) => (poly, true),
        Geometry::Polyline(poly) => (poly, false),
        Geometry::Ellipse(_) => {
            return Err(DrawError::KindMismatch {
                expected: GeometryKind::Polygon,
                found: GeometryKind::Ellipse,
            });
        }
    };

    raster.draw_poly(poly.projected(), closed, geometry.fill())?;
    Ok(DrawOutcome::Drawn)
}

/// Default raster handler for ellipses. Always draws the closed, full ellipse, and reports
/// when that drops a requested partial extent.
pub fn draw_ellipse(
    surface: &mut SurfaceMut<'_>,
    layer: LayerId,
    geometry: &Geometry,
) -> Result<DrawOutcome, DrawError> {
    let raster = raster_surface(surface)?;

    let Some(ellipse) = geometry.as_ellipse() else {
        return Err(DrawError::KindMismatch {
            expected: GeometryKind::Ellipse,
            found: geometry.kind(),
        });
    };

    let Some(state) = ellipse.projected() else {
        return Ok(DrawOutcome::Culled);
    };

    raster.draw_ellipse(state, ellipse.options().fill)?;

    if ellipse.geo().is_full_turn() {
        Ok(DrawOutcome::Drawn)
    } else {
        warn!(
            message = "raster surfaces only draw full ellipses, ignoring the arc extent",
            %layer,
            start_angle = %ellipse.geo().start_angle(),
            end_angle = %ellipse.geo().end_angle(),
        );
        Ok(DrawOutcome::ArcExtentIgnored)
    }
}

#[cfg(test)]
mod tests {
    use geo::Degrees;

    use super::*;
    use crate::arc::center_to_endpoint;

    // anti-aliasing can be off by a bit, even with full coverage
    fn is_fill(alpha: Option<u8>) -> bool {
        alpha.is_some_and(|a| a.abs_diff(FILL_ALPHA) <= 2)
    }

    fn is_stroke(alpha: Option<u8>) -> bool {
        alpha.is_some_and(|a| a >= 250)
    }

    fn state(center: PixelPoint, rx: f64, ry: f64, tilt: f64) -> ProjectedState {
        let tilt = Degrees::new(tilt);
        ProjectedState {
            center,
            rx,
            ry,
            tilt,
            arc: center_to_endpoint(center, rx, ry, tilt, Degrees::ZERO, Degrees::new(359.9)),
            backend: Backend::Raster,
        }
    }

    #[test]
    fn test_draw_ellipse() {
        let mut surface = RasterSurface::new(Size::new(64, 64)).unwrap();
        surface.begin_frame(PixelPoint::new(-32.0, -32.0));

        // centered on the surface once the origin is taken out
        surface
            .draw_ellipse(&state(PixelPoint::ZERO, 20.0, 8.0, 0.0), true)
            .unwrap();

        assert!(is_fill(surface.alpha_at(32, 32)));
        // on the stroke at the end of the long axis
        assert!(is_stroke(surface.alpha_at(52, 32)));
        // inside the long axis, but outside the short one
        assert_eq!(surface.alpha_at(32, 50), Some(0));

        surface.begin_frame(PixelPoint::new(-32.0, -32.0));
        assert_eq!(surface.alpha_at(32, 32), Some(0));

        // rotated a quarter turn, the long axis runs vertically
        surface
            .draw_ellipse(&state(PixelPoint::ZERO, 20.0, 8.0, 90.0), false)
            .unwrap();
        assert!(is_stroke(surface.alpha_at(32, 52)));
        assert_eq!(surface.alpha_at(52, 32), Some(0));
        assert_eq!(surface.alpha_at(32, 32), Some(0));
    }

    #[test]
    fn test_oval_snaps_like_the_path_string() {
        let state = state(PixelPoint::new(-10.5, -10.5), 4.0, 2.0, 0.0);

        let (cx, cy, rect) = snap_oval(&state).unwrap();
        assert_eq!((cx, cy), (-10.0, -10.0));
        assert_eq!(rect, Rect::from_xywh(-14.0, -12.0, 8.0, 4.0).unwrap());

        let path = crate::path::ellipse_path(&state);
        assert!(path.starts_with("AL -10,-10 4,2 "), "{path}");
    }

    #[test]
    fn test_draw_poly() {
        let mut surface = RasterSurface::new(Size::new(32, 32)).unwrap();
        surface.begin_frame(PixelPoint::ZERO);

        let ring = vec![
            PixelPoint::new(4.0, 4.0),
            PixelPoint::new(28.0, 4.0),
            PixelPoint::new(28.0, 28.0),
            PixelPoint::new(4.0, 28.0),
        ];

        surface.draw_poly(&[ring], true, true).unwrap();
        assert!(is_fill(surface.alpha_at(16, 16)));
        assert!(is_stroke(surface.alpha_at(4, 16)));
        assert_eq!(surface.alpha_at(1, 1), Some(0));

        surface.draw_poly(&[Vec::new()], true, true).unwrap();

        let png = surface.encode_png().unwrap();
        assert_eq!(&png[1..4], b"PNG");
    }
}
