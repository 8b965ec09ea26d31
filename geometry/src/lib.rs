//! Planar geometry kernel.
//!
//! Shared by the line alert (price interpolation along a trend line) and by
//! host hit-testing (distance from a cursor to a drawn segment). Everything
//! here is pure `f64` math: degenerate inputs produce NaN rather than panics.

pub mod angle;
pub mod point;
pub mod segment;

pub use angle::normalize_degrees;
pub use point::Point;
pub use segment::Segment;
