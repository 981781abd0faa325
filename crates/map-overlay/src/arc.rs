//! Conversion between the center parameterization of an elliptical arc (center, radii, start
//! angle, angular extent) and the endpoint parameterization used by vector path syntax
//! (start point, end point, large-arc flag, sweep flag).
//!
//! Both directions follow the SVG implementation notes (appendix F.6).
use std::f64::consts::TAU;

use geo::{Degrees, Radians};

use crate::coords::PixelPoint;

/// Endpoint parameterization of an elliptical arc.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EndpointArc {
    pub start: PixelPoint,
    pub end: PixelPoint,
    pub large_arc: bool,
    pub sweep: bool,
    pub tilt: Radians,
}

impl EndpointArc {
    #[inline]
    pub fn large_arc_flag(&self) -> u8 {
        u8::from(self.large_arc)
    }

    #[inline]
    pub fn sweep_flag(&self) -> u8 {
        u8::from(self.sweep)
    }
}

/// Center parameterization of an elliptical arc.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CenterArc {
    pub center: PixelPoint,
    pub rx: f64,
    pub ry: f64,
    pub tilt: Radians,
    pub start_angle: Radians,
    /// Signed angular extent. Positive sweeps toward increasing angles.
    pub extent: Radians,
}

/// Point on the ellipse at parametric angle `theta`.
#[inline]
fn point_at(
    center: PixelPoint,
    rx: f64,
    ry: f64,
    (sin_phi, cos_phi): (f64, f64),
    theta: f64,
) -> PixelPoint {
    let (sin_theta, cos_theta) = theta.sin_cos();

    PixelPoint {
        x: center.x + cos_phi * rx * cos_theta + (-sin_phi) * ry * sin_theta,
        y: center.y + sin_phi * rx * cos_theta + cos_phi * ry * sin_theta,
    }
}

/// Converts a center parameterized arc into endpoint parameters.
///
/// `extent` is measured from `start_angle`. The large-arc flag uses the magnitude of the
/// extent, and the sweep flag its sign, so negative extents trace the same arc backwards
/// instead of erroring out.
pub fn center_to_endpoint(
    center: PixelPoint,
    rx: f64,
    ry: f64,
    tilt: Degrees,
    start_angle: Degrees,
    extent: Degrees,
) -> EndpointArc {
    let theta1 = start_angle.to_radians().get();
    let theta2 = (start_angle + extent).to_radians().get();
    let phi = tilt.to_radians();
    let sin_cos_phi = phi.sin_cos();

    EndpointArc {
        start: point_at(center, rx, ry, sin_cos_phi, theta1),
        end: point_at(center, rx, ry, sin_cos_phi, theta2),
        large_arc: extent.abs() > Degrees::HALF_TURN,
        sweep: extent > Degrees::ZERO,
        tilt: phi,
    }
}

/// Recovers the center parameterization from endpoint parameters.
///
/// Radii too small to span the endpoints are scaled up uniformly, same as a vector renderer
/// would. Returns [`None`] for degenerate arcs (coincident endpoints, or a zero radius), which
/// renderers skip entirely.
pub fn endpoint_to_center(arc: &EndpointArc, rx: f64, ry: f64) -> Option<CenterArc> {
    let (mut rx, mut ry) = (rx.abs(), ry.abs());
    if rx == 0.0 || ry == 0.0 || arc.start == arc.end {
        return None;
    }

    let (sin_phi, cos_phi) = arc.tilt.sin_cos();

    // step 1: move the midpoint to the origin, undo the rotation
    let half_dx = (arc.start.x - arc.end.x) / 2.0;
    let half_dy = (arc.start.y - arc.end.y) / 2.0;
    let x1p = cos_phi * half_dx + sin_phi * half_dy;
    let y1p = -sin_phi * half_dx + cos_phi * half_dy;

    // make sure the radii are large enough to reach both points
    let lambda = (x1p * x1p) / (rx * rx) + (y1p * y1p) / (ry * ry);
    if lambda > 1.0 {
        let scale = lambda.sqrt();
        rx *= scale;
        ry *= scale;
    }

    // step 2: the transformed center
    let rx_sq = rx * rx;
    let ry_sq = ry * ry;
    let denominator = rx_sq * y1p * y1p + ry_sq * x1p * x1p;
    let numerator = (rx_sq * ry_sq - denominator).max(0.0);

    let mut coef = (numerator / denominator).sqrt();
    if arc.large_arc == arc.sweep {
        coef = -coef;
    }

    let cxp = coef * rx * y1p / ry;
    let cyp = -coef * ry * x1p / rx;

    // step 3: rotate + translate back
    let center = PixelPoint {
        x: cos_phi * cxp - sin_phi * cyp + (arc.start.x + arc.end.x) / 2.0,
        y: sin_phi * cxp + cos_phi * cyp + (arc.start.y + arc.end.y) / 2.0,
    };

    // step 4: start angle + extent
    let start_angle = ((y1p - cyp) / ry).atan2((x1p - cxp) / rx);
    let end_angle = ((-y1p - cyp) / ry).atan2((-x1p - cxp) / rx);

    let mut extent = end_angle - start_angle;
    if arc.sweep && extent < 0.0 {
        extent += TAU;
    } else if !arc.sweep && extent > 0.0 {
        extent -= TAU;
    }

    Some(CenterArc {
        center,
        rx,
        ry,
        tilt: arc.tilt,
        start_angle: Radians::new(start_angle),
        extent: Radians::new(extent),
    })
}

#[cfg(test)]
mod tests {
    use rand::{Rng, SeedableRng};

    use super::*;

    const EPSILON: f64 = 1e-6;

    fn assert_close(a: f64, b: f64, what: &str) {
        assert!((a - b).abs() < EPSILON, "{what}: {a} != {b}");
    }

    #[test]
    fn test_default_extent_flags() {
        let arc = center_to_endpoint(
            PixelPoint::new(50.0, 50.0),
            20.0,
            10.0,
            Degrees::ZERO,
            Degrees::new(0.0),
            Degrees::new(359.9),
        );

        assert_eq!(arc.large_arc_flag(), 1);
        assert_eq!(arc.sweep_flag(), 1);
    }

    #[test]
    fn test_near_closure_is_not_degenerate() {
        let arc = center_to_endpoint(
            PixelPoint::new(0.0, 0.0),
            100.0,
            60.0,
            Degrees::new(25.0),
            Degrees::new(0.0),
            Degrees::new(359.9),
        );

        let gap = arc.start.distance_to(&arc.end);
        assert!(gap > 0.0);
        assert!(gap < 0.5, "gap of {gap}px");
        assert_ne!(arc.start, arc.end);
    }

    #[test]
    fn test_flags_for_partial_and_negative_extents() {
        let flags = |extent: f64| {
            let arc = center_to_endpoint(
                PixelPoint::ZERO,
                10.0,
                10.0,
                Degrees::ZERO,
                Degrees::new(30.0),
                Degrees::new(extent),
            );
            (arc.large_arc_flag(), arc.sweep_flag())
        };

        assert_eq!(flags(90.0), (0, 1));
        assert_eq!(flags(180.0), (0, 1));
        assert_eq!(flags(181.0), (1, 1));
        assert_eq!(flags(0.0), (0, 0));
        assert_eq!(flags(-90.0), (0, 0));
        assert_eq!(flags(-270.0), (1, 0));
    }

    #[test]
    fn test_untilted_endpoints() {
        let arc = center_to_endpoint(
            PixelPoint::new(10.0, 20.0),
            4.0,
            2.0,
            Degrees::ZERO,
            Degrees::new(0.0),
            Degrees::new(90.0),
        );

        assert_close(arc.start.x, 14.0, "x0");
        assert_close(arc.start.y, 20.0, "y0");
        assert_close(arc.end.x, 10.0, "x1");
        assert_close(arc.end.y, 22.0, "y1");
    }

    #[test]
    fn test_round_trip_recovers_center_and_radii() {
        let mut rng = rand::rngs::StdRng::seed_from_u64(0xE111_95E);

        for _ in 0..500 {
            let center = PixelPoint::new(
                rng.random_range(-1000.0..1000.0),
                rng.random_range(-1000.0..1000.0),
            );
            let rx = rng.random_range(1.0..400.0);
            let ry = rng.random_range(1.0..400.0);
            let tilt = Degrees::new(rng.random_range(-180.0..180.0));
            let extent = Degrees::new(rng.random_range(1.0..359.0));

            let arc = center_to_endpoint(center, rx, ry, tilt, Degrees::ZERO, extent);
            let recovered = endpoint_to_center(&arc, rx, ry).expect("non-degenerate arc");

            let tolerance = EPSILON * rx.max(ry);
            assert!(
                recovered.center.distance_to(&center) < tolerance,
                "{recovered:?} vs {center:?} (extent {extent})"
            );
            assert!((recovered.rx - rx).abs() < tolerance, "rx {} vs {rx}", recovered.rx);
            assert!((recovered.ry - ry).abs() < tolerance, "ry {} vs {ry}", recovered.ry);
            assert!((recovered.extent.to_degrees().get() - extent.get()).abs() < 1e-4);
        }
    }

    #[test]
    fn test_round_trip_negative_extent() {
        let center = PixelPoint::new(5.0, -3.0);
        let arc = center_to_endpoint(
            center,
            30.0,
            12.0,
            Degrees::new(10.0),
            Degrees::new(45.0),
            Degrees::new(-200.0),
        );

        let recovered = endpoint_to_center(&arc, 30.0, 12.0).unwrap();
        assert!(recovered.center.distance_to(&center) < EPSILON);
        assert_close(recovered.extent.to_degrees().get(), -200.0, "extent");
        assert_close(recovered.start_angle.to_degrees().get(), 45.0, "start");
    }

    #[test]
    fn test_degenerate_arcs() {
        let arc = center_to_endpoint(
            PixelPoint::ZERO,
            10.0,
            10.0,
            Degrees::ZERO,
            Degrees::ZERO,
            Degrees::ZERO,
        );

        assert_eq!(arc.start, arc.end);
        assert!(endpoint_to_center(&arc, 10.0, 10.0).is_none());

        let arc = center_to_endpoint(
            PixelPoint::ZERO,
            10.0,
            10.0,
            Degrees::ZERO,
            Degrees::ZERO,
            Degrees::new(90.0),
        );
        assert!(endpoint_to_center(&arc, 0.0, 10.0).is_none());
    }
}
