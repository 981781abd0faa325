//! Path command strings handed to the drawing surfaces.
use crate::coords::PixelPoint;
use crate::feature::ellipse::ProjectedState;

/// Which drawing surface path strings are emitted for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Backend {
    /// Vector path syntax, with elliptical arc (`A`) commands.
    Vector,
    /// Legacy raster arc syntax. Can only describe closed, full ellipses.
    Raster,
}

/// Sweep angle the raster `AL` command uses for a full turn, in 1/65535ths of a degree.
pub const RASTER_FULL_SWEEP: u32 = 65535 * 360;

/// Rounds half-way cases up, same as the host's pixel rounding.
#[inline]
pub(crate) fn round_px(value: f64) -> i64 {
    (value + 0.5).floor() as i64
}

/// Emits the path string for a projected ellipse, in the syntax of the backend it was
/// projected for.
pub fn ellipse_path(state: &ProjectedState) -> String {
    match state.backend {
        Backend::Vector => {
            let arc = &state.arc;
            format!(
                "M{},{}A{},{},{},{},{},{},{} z",
                arc.start.x,
                arc.start.y,
                state.rx,
                state.ry,
                state.tilt.get(),
                arc.large_arc_flag(),
                arc.sweep_flag(),
                arc.end.x,
                arc.end.y,
            )
        }
        Backend::Raster => {
            let mut buf = itoa::Buffer::new();
            let mut dst = String::with_capacity(48);

            dst.push_str("AL ");
            dst.push_str(buf.format(round_px(state.center.x)));
            dst.push(',');
            dst.push_str(buf.format(round_px(state.center.y)));
            dst.push(' ');
            dst.push_str(buf.format(round_px(state.rx)));
            dst.push(',');
            dst.push_str(buf.format(round_px(state.ry)));
            dst.push(' ');
            // tilt goes out as-is, only positions are snapped to the pixel grid
            dst.push_str(&state.tilt.get().to_string());
            dst.push(',');
            dst.push_str(buf.format(RASTER_FULL_SWEEP));

            dst
        }
    }
}

/// Emits a multi-ring polygon/polyline path. Each ring becomes its own subpath, closed with
/// `z` if `closed` is set. Empty rings are skipped, and no points at all yields `""`.
pub fn poly_path<R>(backend: Backend, rings: &[R], closed: bool) -> String
where
    R: AsRef<[PixelPoint]>,
{
    let mut buf = itoa::Buffer::new();
    let mut dst = String::new();

    for ring in rings.iter().map(AsRef::as_ref) {
        for (idx, pt) in ring.iter().enumerate() {
            dst.push(if idx == 0 { 'M' } else { 'L' });

            match backend {
                Backend::Vector => {
                    dst.push_str(&pt.x.to_string());
                    dst.push(',');
                    dst.push_str(&pt.y.to_string());
                }
                Backend::Raster => {
                    dst.push_str(buf.format(round_px(pt.x)));
                    dst.push(',');
                    dst.push_str(buf.format(round_px(pt.y)));
                }
            }
        }

        if closed && !ring.is_empty() {
            dst.push('z');
        }
    }

    dst
}

#[cfg(test)]
mod tests {
    use geo::Degrees;

    use super::*;
    use crate::arc::center_to_endpoint;

    fn state(backend: Backend, extent: f64) -> ProjectedState {
        let center = PixelPoint::new(100.4, 50.5);
        let tilt = Degrees::new(15.0);

        ProjectedState {
            center,
            rx: 20.0,
            ry: 10.6,
            tilt,
            arc: center_to_endpoint(
                center,
                20.0,
                10.6,
                tilt,
                Degrees::ZERO,
                Degrees::new(extent),
            ),
            backend,
        }
    }

    #[test]
    fn test_vector_ellipse_path() {
        let state = state(Backend::Vector, 90.0);
        let path = ellipse_path(&state);

        let expected = format!(
            "M{},{}A20,10.6,15,0,1,{},{} z",
            state.arc.start.x, state.arc.start.y, state.arc.end.x, state.arc.end.y
        );
        assert_eq!(path, expected);
        assert!(!path.contains("NaN"));
    }

    #[test]
    fn test_raster_ellipse_path_ignores_extent() {
        let full = ellipse_path(&state(Backend::Raster, 359.9));
        let partial = ellipse_path(&state(Backend::Raster, 45.0));

        assert_eq!(full, "AL 100,51 20,11 15,23592600");
        assert_eq!(full, partial);
    }

    #[test]
    fn test_poly_paths() {
        let ring = vec![
            PixelPoint::new(0.0, 0.0),
            PixelPoint::new(10.5, 0.0),
            PixelPoint::new(10.0, -2.25),
        ];

        assert_eq!(
            poly_path(Backend::Vector, &[ring.clone()], true),
            "M0,0L10.5,0L10,-2.25z"
        );
        assert_eq!(
            poly_path(Backend::Vector, &[ring.clone()], false),
            "M0,0L10.5,0L10,-2.25"
        );
        assert_eq!(
            poly_path(Backend::Raster, &[ring.clone(), Vec::new(), ring], true),
            "M0,0L11,0L10,-2zM0,0L11,0L10,-2z"
        );

        let empty: [Vec<PixelPoint>; 0] = [];
        assert_eq!(poly_path(Backend::Vector, &empty, true), "");
    }

    #[test]
    fn test_round_px_rounds_half_up() {
        assert_eq!(round_px(2.5), 3);
        assert_eq!(round_px(-2.5), -2);
        assert_eq!(round_px(-2.6), -3);
    }
}
