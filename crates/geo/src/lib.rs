pub mod ang;
pub mod bounds;
pub mod geom;
pub mod lng_lat;
pub mod radius;

pub use ang::{Degrees, Radians};
pub use bounds::GeoBounds;
pub use geom::{EllipseError, GeoEllipse, Line, Polygon};
pub use lng_lat::{InvalidCoordinate, LatLng};
pub use radius::{AngularRadius, EARTH_CIRCUMFERENCE_M, Radii, RadiusError, RadiusProjector};
