use crate::error::{OperationError, Result};
use crate::geometry::{Polygon, Segment, DEFAULT_MAX_CHAIN_STEPS};

/// Reassembles closed polygons from an unordered segment bag with the
/// default iteration budget.
///
/// # Errors
///
/// See [`assemble_polygons_bounded`].
pub fn assemble_polygons(segments: &[Segment]) -> Result<Vec<Polygon>> {
    assemble_polygons_bounded(segments, DEFAULT_MAX_CHAIN_STEPS)
}

/// Reassembles closed polygons from an unordered segment bag.
///
/// Every segment seeds a chain walk; chains that fail to close within the
/// iteration budget are discarded, and closed loops are deduplicated by
/// vertex-set equality.
///
/// # Errors
///
/// Returns [`OperationError::NonClosableLoop`] when no seed closes into a
/// polygon.
pub fn assemble_polygons_bounded(
    segments: &[Segment],
    max_iterations: usize,
) -> Result<Vec<Polygon>> {
    let mut polygons: Vec<Polygon> = Vec::new();
    for seed in 0..segments.len() {
        let mut pool = segments.to_vec();
        pool.swap(0, seed);
        let Ok(polygon) = Polygon::from_segments_bounded(&pool, max_iterations) else {
            continue;
        };
        if !polygons
            .iter()
            .any(|existing| existing.same_vertex_set(&polygon))
        {
            polygons.push(polygon);
        }
    }
    if polygons.is_empty() {
        return Err(OperationError::NonClosableLoop { max_iterations }.into());
    }
    Ok(polygons)
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

    fn seg(a: Point3, b: Point3) -> Segment {
        Segment::new(a, b).unwrap()
    }

    #[test]
    fn shuffled_flipped_square_round_trips() {
        let edges = vec![
            seg(p(10.0, 10.0, 0.0), p(10.0, 0.0, 0.0)), // flipped
            seg(p(0.0, 10.0, 0.0), p(0.0, 0.0, 0.0)),   // flipped
            seg(p(0.0, 0.0, 0.0), p(10.0, 0.0, 0.0)),
            seg(p(10.0, 10.0, 0.0), p(0.0, 10.0, 0.0)),
        ];
        let polygons = assemble_polygons(&edges).unwrap();
        assert_eq!(polygons.len(), 1);
        let expected = Polygon::from_points(&[
            p(0.0, 0.0, 0.0),
            p(10.0, 0.0, 0.0),
            p(10.0, 10.0, 0.0),
            p(0.0, 10.0, 0.0),
        ])
        .unwrap();
        assert!(polygons[0].same_vertex_set(&expected));
        assert_relative_eq!(polygons[0].area(), 100.0, epsilon = 1e-9);
    }

    #[test]
    fn two_disjoint_triangles_are_both_recovered() {
        let edges = vec![
            seg(p(0.0, 0.0, 0.0), p(4.0, 0.0, 0.0)),
            seg(p(4.0, 0.0, 0.0), p(0.0, 3.0, 0.0)),
            seg(p(0.0, 3.0, 0.0), p(0.0, 0.0, 0.0)),
            seg(p(10.0, 0.0, 0.0), p(14.0, 0.0, 0.0)),
            seg(p(14.0, 0.0, 0.0), p(10.0, 3.0, 0.0)),
            seg(p(10.0, 3.0, 0.0), p(10.0, 0.0, 0.0)),
        ];
        let polygons = assemble_polygons(&edges).unwrap();
        assert_eq!(polygons.len(), 2);
    }

    #[test]
    fn open_chain_reports_failure() {
        let edges = vec![
            seg(p(0.0, 0.0, 0.0), p(4.0, 0.0, 0.0)),
            seg(p(4.0, 0.0, 0.0), p(4.0, 4.0, 0.0)),
        ];
        let result = assemble_polygons_bounded(&edges, 20);
        assert!(matches!(
            result,
            Err(PlanekitError::Operation(OperationError::NonClosableLoop {
                max_iterations: 20
            }))
        ));
    }

    #[test]
    fn closed_loop_with_stray_segment_still_assembles() {
        let edges = vec![
            seg(p(0.0, 0.0, 0.0), p(4.0, 0.0, 0.0)),
            seg(p(4.0, 0.0, 0.0), p(0.0, 3.0, 0.0)),
            seg(p(0.0, 3.0, 0.0), p(0.0, 0.0, 0.0)),
            seg(p(50.0, 50.0, 0.0), p(60.0, 50.0, 0.0)), // never closes
        ];
        let polygons = assemble_polygons(&edges).unwrap();
        assert_eq!(polygons.len(), 1);
    }
}
