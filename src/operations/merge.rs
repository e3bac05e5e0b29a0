use crate::error::Result;
use crate::geometry::{Polygon, Segment};
use crate::math::predicates::points_equal;
use crate::math::Point3;

use super::classify::segment::{compare_segments, SegmentRelation};
use super::classify::segment_polygon::segment_inside_polygon;

/// Drops every segment that a later segment in the list collinearly
/// overlaps, keeping the later occurrence.
///
/// # Errors
///
/// Propagates segment comparison failures.
pub fn dedupe_collinear(segments: &[Segment]) -> Result<Vec<Segment>> {
    let mut kept = Vec::with_capacity(segments.len());
    for (i, segment) in segments.iter().enumerate() {
        let mut keep = true;
        for later in &segments[i + 1..] {
            if matches!(
                compare_segments(segment, later)?,
                SegmentRelation::SameDirectionLineOverlap { .. }
            ) {
                keep = false;
                break;
            }
        }
        if keep {
            kept.push(segment.clone());
        }
    }
    Ok(kept)
}

/// Fuses collinear point-touching pairs into their merged span.
///
/// Single pass: each segment fuses with at most one partner per call.
///
/// # Errors
///
/// Propagates segment comparison failures.
pub fn fuse_point_touch(segments: &[Segment]) -> Result<Vec<Segment>> {
    let mut used = vec![false; segments.len()];
    let mut result = Vec::with_capacity(segments.len());
    for i in 0..segments.len() {
        if used[i] {
            continue;
        }
        let mut fused = None;
        for j in (i + 1)..segments.len() {
            if used[j] {
                continue;
            }
            if let SegmentRelation::SameDirectionPointOverlap { merged, .. } =
                compare_segments(&segments[i], &segments[j])?
            {
                used[i] = true;
                used[j] = true;
                fused = Some(merged);
                break;
            }
        }
        result.push(fused.unwrap_or_else(|| segments[i].clone()));
    }
    Ok(result)
}

/// Connects consecutive points into candidate segments, keeps those lying
/// fully inside the container polygon, and folds them into the accumulated
/// set: candidates collinearly overlapping an existing entry are dropped,
/// point-touching neighbours fuse into their merged span.
///
/// # Errors
///
/// Propagates classification failures.
pub fn weave_segments(
    merged: &mut Vec<Segment>,
    points: &[Point3],
    container: &Polygon,
) -> Result<()> {
    for window in points.windows(2) {
        if points_equal(&window[0], &window[1]) {
            continue;
        }
        let Ok(candidate) = Segment::new(window[0], window[1]) else {
            continue;
        };
        if !segment_inside_polygon(container, &candidate)? {
            continue;
        }
        let mut keep = true;
        let mut fused = false;
        for existing in merged.iter_mut() {
            match compare_segments(existing, &candidate)? {
                SegmentRelation::SameDirectionLineOverlap { .. } => keep = false,
                SegmentRelation::SameDirectionPointOverlap { merged: span, .. } => {
                    *existing = span;
                    fused = true;
                    break;
                }
                _ => {}
            }
        }
        if fused {
            continue;
        }
        if keep {
            merged.push(candidate);
        }
    }
    Ok(())
}

/// Removes duplicate points under tolerance, keeping the last occurrence.
#[must_use]
pub fn dedupe_points(points: &[Point3]) -> Vec<Point3> {
    let mut kept = Vec::with_capacity(points.len());
    for (i, point) in points.iter().enumerate() {
        if !points[i + 1..].iter().any(|q| points_equal(point, q)) {
            kept.push(*point);
        }
    }
    kept
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::math::predicates::is_equal;

    fn p(x: f64, y: f64, z: f64) -> Point3 {
        Point3::new(x, y, z)
    }

    fn seg(ax: f64, ay: f64, bx: f64, by: f64) -> Segment {
        Segment::new(p(ax, ay, 0.0), p(bx, by, 0.0)).unwrap()
    }

    #[test]
    fn dedupe_drops_collinear_duplicates() {
        let segments = vec![seg(0.0, 0.0, 4.0, 0.0), seg(0.0, 0.0, 4.0, 0.0)];
        let kept = dedupe_collinear(&segments).unwrap();
        assert_eq!(kept.len(), 1);
    }

    #[test]
    fn dedupe_keeps_distinct_segments() {
        let segments = vec![seg(0.0, 0.0, 4.0, 0.0), seg(0.0, 1.0, 4.0, 1.0)];
        assert_eq!(dedupe_collinear(&segments).unwrap().len(), 2);
    }

    #[test]
    fn fuse_merges_point_touching_pair() {
        let segments = vec![seg(0.0, 0.0, 3.0, 0.0), seg(3.0, 0.0, 8.0, 0.0)];
        let fused = fuse_point_touch(&segments).unwrap();
        assert_eq!(fused.len(), 1);
        assert!(is_equal(fused[0].length(), 8.0));
    }

    #[test]
    fn fuse_leaves_perpendicular_neighbours_alone() {
        let segments = vec![seg(0.0, 0.0, 3.0, 0.0), seg(3.0, 0.0, 3.0, 5.0)];
        assert_eq!(fuse_point_touch(&segments).unwrap().len(), 2);
    }

    #[test]
    fn dedupe_points_keeps_last_occurrence() {
        let points = vec![p(1.0, 0.0, 0.0), p(2.0, 0.0, 0.0), p(1.0, 0.0, 0.0)];
        let kept = dedupe_points(&points);
        assert_eq!(kept.len(), 2);
    }
}
