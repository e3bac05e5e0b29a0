//! Minimal textual encodings for persistence and debugging.
//!
//! A point serializes as `"(x, y, z)"`; a point list (polygon vertices or a
//! bounding pair) as `"{v0;v1;...;vn}"`.

use crate::error::{OperationError, Result};
use crate::geometry::Polygon;
use crate::math::Point3;

/// Formats a point as `"(x, y, z)"`.
#[must_use]
pub fn format_point(point: &Point3) -> String {
    format!("({}, {}, {})", point.x, point.y, point.z)
}

/// Parses a point from `"(x, y, z)"` form.
///
/// Splits on parentheses, commas and spaces and collects the numbers found.
///
/// # Errors
///
/// Returns [`OperationError::InvalidEncoding`] if fewer than three numbers
/// are present.
pub fn parse_point(text: &str) -> Result<Point3> {
    let mut numbers = Vec::with_capacity(3);
    for token in text.split(['(', ',', ' ', ')']) {
        if let Ok(value) = token.parse::<f64>() {
            numbers.push(value);
        }
    }
    if numbers.len() < 3 {
        return Err(OperationError::InvalidEncoding(format!(
            "expected 3 coordinates in {text:?}"
        ))
        .into());
    }
    Ok(Point3::new(numbers[0], numbers[1], numbers[2]))
}

/// Formats a point list as `"{v0;v1;...;vn}"`.
#[must_use]
pub fn format_point_list(points: &[Point3]) -> String {
    let body: Vec<String> = points.iter().map(format_point).collect();
    format!("{{{}}}", body.join(";"))
}

/// Parses a `"{v0;v1;...;vn}"` point list.
///
/// # Errors
///
/// Returns [`OperationError::InvalidEncoding`] for missing braces or
/// malformed points.
pub fn parse_point_list(text: &str) -> Result<Vec<Point3>> {
    let inner = text
        .trim()
        .strip_prefix('{')
        .and_then(|s| s.strip_suffix('}'))
        .ok_or_else(|| {
            OperationError::InvalidEncoding(format!("missing enclosing braces in {text:?}"))
        })?;
    inner.split(';').map(parse_point).collect()
}

/// Formats a polygon's vertex list.
#[must_use]
pub fn format_polygon(polygon: &Polygon) -> String {
    format_point_list(polygon.vertices())
}

/// Parses a polygon from its vertex-list encoding.
///
/// # Errors
///
/// Returns encoding errors as in [`parse_point_list`] and construction
/// errors as in [`Polygon::from_points`].
pub fn parse_polygon(text: &str) -> Result<Polygon> {
    Polygon::from_points(&parse_point_list(text)?)
}

/// Formats a min/max bounding pair.
#[must_use]
pub fn format_bounding_pair(min: &Point3, max: &Point3) -> String {
    format_point_list(&[*min, *max])
}

/// Parses a min/max bounding pair.
///
/// # Errors
///
/// Returns [`OperationError::InvalidEncoding`] unless exactly two points
/// are present.
pub fn parse_bounding_pair(text: &str) -> Result<(Point3, Point3)> {
    let points = parse_point_list(text)?;
    if points.len() != 2 {
        return Err(OperationError::InvalidEncoding(format!(
            "expected exactly 2 points in {text:?}"
        ))
        .into());
    }
    Ok((points[0], points[1]))
}
