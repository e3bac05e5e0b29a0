pub mod predicates;

/// 2D point type (local plane coordinates).
pub type Point2 = nalgebra::Point2<f64>;

/// 3D point type.
pub type Point3 = nalgebra::Point3<f64>;

/// 2D vector type.
pub type Vector2 = nalgebra::Vector2<f64>;

/// 3D vector type.
pub type Vector3 = nalgebra::Vector3<f64>;

/// Global geometric tolerance for floating-point comparisons.
///
/// Coordinates pass through projections and local-frame transforms that
/// introduce rounding noise, so every geometric predicate routes through
/// this threshold instead of exact equality.
pub const TOLERANCE: f64 = 1e-6;
