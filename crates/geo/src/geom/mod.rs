pub mod ellipse;
pub mod nested;

pub use ellipse::{EllipseError, GeoEllipse};
pub use nested::{Line, Polygon};
