use crate::error::{OperationError, Result};
use crate::geometry::{Polygon, Segment};

use super::classify::polygon::{compare_polygons, PolygonIntersection};
use super::classify::segment::{compare_segments, SegmentRelation};
use super::classify::segment_polygon::{compare_segment_polygon, SegmentPolygonRelation};

/// Cuts the secondary polygon out of the main polygon.
///
/// Restricted difference: the secondary must lie inside the main polygon
/// and share part of its boundary (tangential containment). The result is
/// the single polygon enclosing the remaining area.
///
/// # Errors
///
/// See [`cut_boundary`]; additionally fails if the resulting boundary does
/// not close into a polygon.
pub fn polygon_cut(main: &Polygon, secondary: &Polygon) -> Result<Polygon> {
    let boundary = cut_boundary(main, secondary)?;
    Polygon::from_segments(&boundary)
}

/// Computes the boundary segments of the main polygon with the secondary
/// polygon removed.
///
/// The boundary is the union of the secondary's edges strictly inside the
/// main polygon (excluding stretches collinear with main edges), the main
/// edges fully outside the secondary, and the non-overlapping remainders of
/// main edges that collinearly overlap secondary edges.
///
/// # Errors
///
/// Returns [`OperationError::InvalidPrecondition`] when the secondary is
/// not recognized as an inner overlap polygon of the main, or when it has
/// no collinear boundary contact with the main (strict interior).
pub fn cut_boundary(main: &Polygon, secondary: &Polygon) -> Result<Vec<Segment>> {
    let comparison = compare_polygons(main, secondary)?;
    let PolygonIntersection::AreaOverlap { polygons } = comparison.intersection else {
        return Err(OperationError::InvalidPrecondition(
            "secondary polygon must lie inside the main polygon".into(),
        )
        .into());
    };
    if !polygons[0].same_vertex_set(secondary) {
        return Err(OperationError::InvalidPrecondition(
            "secondary polygon must lie inside the main polygon".into(),
        )
        .into());
    }

    let mut touched = false;
    let mut boundary: Vec<Segment> = Vec::new();

    // Secondary edges strictly inside the main polygon, minus those riding
    // along a main edge.
    for edge in secondary.segments() {
        if !matches!(
            compare_segment_polygon(main, edge)?,
            SegmentPolygonRelation::Inside { .. }
        ) {
            continue;
        }
        let mut rides_main_edge = false;
        for main_edge in main.segments() {
            if matches!(
                compare_segments(edge, main_edge)?,
                SegmentRelation::SameDirectionLineOverlap { .. }
            ) {
                rides_main_edge = true;
                break;
            }
        }
        if rides_main_edge {
            touched = true;
        } else {
            boundary.push(edge.clone());
        }
    }

    // Main edges outside the secondary survive whole; overlapping ones
    // contribute their remainder portions.
    for edge in main.segments() {
        if matches!(
            compare_segment_polygon(secondary, edge)?,
            SegmentPolygonRelation::Outside
        ) {
            boundary.push(edge.clone());
            continue;
        }
        for secondary_edge in secondary.segments() {
            if let SegmentRelation::SameDirectionLineOverlap { outer, .. } =
                compare_segments(edge, secondary_edge)?
            {
                touched = true;
                for remainder in outer {
                    if !matches!(
                        compare_segment_polygon(secondary, &remainder)?,
                        SegmentPolygonRelation::Inside { .. }
                    ) {
                        boundary.push(remainder);
                    }
                }
                break;
            }
        }
    }

    if !touched {
        return Err(OperationError::InvalidPrecondition(
            "secondary polygon must be tangential to the main polygon".into(),
        )
        .into());
    }
    Ok(boundary)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::PlanekitError;
    use crate::math::Point3;
    use approx::assert_relative_eq;

    fn p(x: f64, y: f64, z: f64) -> Point3 {
        Point3::new(x, y, z)
    }

    fn main_square() -> Polygon {
        Polygon::from_points(&[
            p(0.0, 0.0, 0.0),
            p(10.0, 0.0, 0.0),
            p(10.0, 10.0, 0.0),
            p(0.0, 10.0, 0.0),
        ])
        .unwrap()
    }

    #[test]
    fn tangential_cut_removes_shared_notch() {
        let main = main_square();
        let secondary = Polygon::from_points(&[
            p(3.0, 0.0, 0.0),
            p(7.0, 0.0, 0.0),
            p(7.0, 4.0, 0.0),
            p(3.0, 4.0, 0.0),
        ])
        .unwrap();

        let result = polygon_cut(&main, &secondary).unwrap();
        assert_relative_eq!(result.area(), 84.0, epsilon = 1e-9);
        assert_eq!(result.vertices().len(), 8);

        // The shared stretch is gone; the secondary's free edges and the
        // bottom remainders are part of the boundary.
        let boundary = cut_boundary(&main, &secondary).unwrap();
        assert_eq!(boundary.len(), 8);
        let has = |a: Point3, b: Point3| {
            boundary.iter().any(|s| {
                (crate::math::predicates::points_equal(s.start(), &a)
                    && crate::math::predicates::points_equal(s.end(), &b))
                    || (crate::math::predicates::points_equal(s.start(), &b)
                        && crate::math::predicates::points_equal(s.end(), &a))
            })
        };
        assert!(!has(p(3.0, 0.0, 0.0), p(7.0, 0.0, 0.0)), "shared edge kept");
        assert!(has(p(7.0, 0.0, 0.0), p(7.0, 4.0, 0.0)));
        assert!(has(p(7.0, 4.0, 0.0), p(3.0, 4.0, 0.0)));
        assert!(has(p(3.0, 4.0, 0.0), p(3.0, 0.0, 0.0)));
        assert!(has(p(0.0, 0.0, 0.0), p(3.0, 0.0, 0.0)));
        assert!(has(p(7.0, 0.0, 0.0), p(10.0, 0.0, 0.0)));
    }

    #[test]
    fn corner_secondary_cut() {
        let main = main_square();
        let secondary = Polygon::from_points(&[
            p(0.0, 0.0, 0.0),
            p(4.0, 0.0, 0.0),
            p(4.0, 4.0, 0.0),
            p(0.0, 4.0, 0.0),
        ])
        .unwrap();
        let result = polygon_cut(&main, &secondary).unwrap();
        assert_relative_eq!(result.area(), 84.0, epsilon = 1e-9);
    }

    #[test]
    fn strictly_interior_secondary_is_rejected() {
        let main = main_square();
        let secondary = Polygon::from_points(&[
            p(3.0, 3.0, 0.0),
            p(7.0, 3.0, 0.0),
            p(7.0, 7.0, 0.0),
            p(3.0, 7.0, 0.0),
        ])
        .unwrap();
        let result = polygon_cut(&main, &secondary);
        assert!(matches!(
            result,
            Err(PlanekitError::Operation(
                OperationError::InvalidPrecondition(_)
            ))
        ));
    }

    #[test]
    fn outside_secondary_is_rejected() {
        let main = main_square();
        let secondary = Polygon::from_points(&[
            p(20.0, 0.0, 0.0),
            p(24.0, 0.0, 0.0),
            p(24.0, 4.0, 0.0),
            p(20.0, 4.0, 0.0),
        ])
        .unwrap();
        assert!(polygon_cut(&main, &secondary).is_err());
    }
}
