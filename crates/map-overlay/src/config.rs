use geo::Degrees;
use geo::geom::ellipse::{DEFAULT_END_ANGLE, DEFAULT_START_ANGLE};
use serde::Deserialize;
use typed_builder::TypedBuilder;

/// Fraction of the view size added on each side of the viewport before culling.
pub const DEFAULT_CLIP_PADDING: f64 = 0.1;

/// Half of the default stroke weight (3px), in pixels.
pub const DEFAULT_CLICK_TOLERANCE: f64 = 1.5;

/// Renderer-wide settings, shared by every layer on a map.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, TypedBuilder)]
#[serde(default)]
pub struct RenderConfig {
    /// Padding applied to both the width and height of the visible area before culling, as a
    /// fraction of the view size. Keeps shapes from popping in while panning.
    #[builder(default = DEFAULT_CLIP_PADDING)]
    pub clip_padding: f64,
    /// Margin, in pixels, added around projected bounds for pointer hit testing.
    #[builder(default = DEFAULT_CLICK_TOLERANCE)]
    pub click_tolerance: f64,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            clip_padding: DEFAULT_CLIP_PADDING,
            click_tolerance: DEFAULT_CLICK_TOLERANCE,
        }
    }
}

/// Per-ellipse options.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, TypedBuilder)]
#[serde(default, rename_all = "camelCase")]
pub struct EllipseOptions {
    /// Request filled rendering.
    #[builder(default = true)]
    pub fill: bool,
    /// Start of the drawn arc, in degrees.
    #[builder(default = DEFAULT_START_ANGLE.get())]
    pub start_angle: f64,
    /// Angular extent of the drawn arc from `start_angle`, in degrees. May be negative.
    #[builder(default = DEFAULT_END_ANGLE.get())]
    pub end_angle: f64,
}

impl EllipseOptions {
    pub(crate) fn extent(&self) -> (Degrees, Degrees) {
        (Degrees::new(self.start_angle), Degrees::new(self.end_angle))
    }
}

impl Default for EllipseOptions {
    fn default() -> Self {
        Self {
            fill: true,
            start_angle: DEFAULT_START_ANGLE.get(),
            end_angle: DEFAULT_END_ANGLE.get(),
        }
    }
}
