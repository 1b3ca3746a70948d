pub mod distance_2d;
pub mod rect;

pub use rect::Rect;

/// 2D point type.
pub type Point2 = nalgebra::Point2<f64>;

/// 2D vector type.
pub type Vector2 = nalgebra::Vector2<f64>;

/// Global geometric tolerance for floating-point comparisons.
pub const TOLERANCE: f64 = 1e-10;

/// Distance (1 cm in model units) under which two wall endpoints are
/// considered the same junction.
pub const CONNECT_TOLERANCE: f64 = 0.01;
