use crate::error::{OperationError, Result};
use crate::geometry::{Polygon, Segment};
use crate::math::predicates::{
    is_zero, offset_point, points_equal, same_direction, zyx_order,
};
use crate::math::Point3;
use crate::operations::merge::{dedupe_points, weave_segments};

use super::point::{classify_point, PointPolygonRelation};
use super::segment::{compare_segments, SegmentRelation};

/// Number of sampling steps for segment containment tests.
const SAMPLE_STEPS: usize = 100;

/// Relation between a bounded segment and a polygon.
#[derive(Debug, Clone)]
pub enum SegmentPolygonRelation {
    /// Coplanar and fully inside (boundary contact allowed).
    Inside { segments: Vec<Segment> },
    /// Coplanar and fully outside, up to grazing contact.
    Outside,
    /// Coplanar and straddling: carries the merged sub-segments lying
    /// inside the polygon and the ordered crossing points.
    OverlapOrIntersect {
        segments: Vec<Segment>,
        points: Vec<Point3>,
    },
    /// Off-plane but parallel to it; carries the projected segment.
    NonPlanarParallel { projection: Segment },
    /// Pierces the plane inside the polygon face.
    NonPlanarIntersectFace { point: Point3 },
    /// Pierces the plane outside the polygon face.
    NonPlanarIntersectPlane { point: Point3 },
    /// Slants across without reaching the plane.
    NonPlanarNonIntersect,
    /// Perpendicular to the plane, piercing inside the face.
    PerpendicularIntersectFace { point: Point3 },
    /// Perpendicular to the plane, piercing outside the face.
    PerpendicularIntersectPlane { point: Point3 },
    /// Perpendicular to the plane without reaching it.
    PerpendicularNonIntersect { point: Point3 },
}

/// Checks whether a coplanar segment lies fully inside the polygon by
/// sampling along its length; boundary contact counts as inside.
///
/// # Errors
///
/// Propagates point classification failures.
#[allow(clippy::cast_precision_loss)]
pub fn segment_inside_polygon(polygon: &Polygon, segment: &Segment) -> Result<bool> {
    if classify_point(polygon, segment.start())? == PointPolygonRelation::NonPlanar
        || classify_point(polygon, segment.end())? == PointPolygonRelation::NonPlanar
    {
        return Ok(false);
    }
    let dir = segment.direction();
    let length = segment.length();
    for i in 0..=SAMPLE_STEPS {
        let sample = offset_point(segment.start(), &dir, length * i as f64 / SAMPLE_STEPS as f64);
        if classify_point(polygon, &sample)? == PointPolygonRelation::Outside {
            return Ok(false);
        }
    }
    Ok(true)
}

/// Checks whether a coplanar segment lies fully outside the polygon,
/// tolerating at most two grazing boundary contacts.
///
/// # Errors
///
/// Propagates point classification failures.
#[allow(clippy::cast_precision_loss)]
pub fn segment_outside_polygon(polygon: &Polygon, segment: &Segment) -> Result<bool> {
    if classify_point(polygon, segment.start())? == PointPolygonRelation::NonPlanar
        || classify_point(polygon, segment.end())? == PointPolygonRelation::NonPlanar
    {
        return Ok(false);
    }
    let dir = segment.direction();
    let length = segment.length();
    let mut touches = 0;
    for i in 0..=SAMPLE_STEPS {
        let sample = offset_point(segment.start(), &dir, length * i as f64 / SAMPLE_STEPS as f64);
        match classify_point(polygon, &sample)? {
            PointPolygonRelation::Outside => {}
            PointPolygonRelation::Inside => return Ok(false),
            _ => touches += 1,
        }
    }
    Ok(touches <= 2)
}

/// Classifies a bounded segment against a polygon.
///
/// # Errors
///
/// Returns [`OperationError::AmbiguousGeometry`] when a coplanar segment is
/// neither inside nor outside yet produces no edge crossing; propagates
/// lower-level classification failures.
pub fn compare_segment_polygon(
    polygon: &Polygon,
    segment: &Segment,
) -> Result<SegmentPolygonRelation> {
    let plane = polygon.plane();

    if is_zero(segment.direction().dot(polygon.normal())) {
        // The segment runs parallel to the plane; off-plane means the whole
        // segment floats beside the face.
        if classify_point(polygon, segment.start())? == PointPolygonRelation::NonPlanar {
            let projection = plane.project_segment(segment)?;
            return Ok(SegmentPolygonRelation::NonPlanarParallel { projection });
        }
        if segment_outside_polygon(polygon, segment)? {
            return Ok(SegmentPolygonRelation::Outside);
        }
        if segment_inside_polygon(polygon, segment)? {
            return Ok(SegmentPolygonRelation::Inside {
                segments: vec![segment.clone()],
            });
        }

        let mut segments = Vec::new();
        let mut points = Vec::new();
        for edge in polygon.segments() {
            match compare_segments(edge, segment)? {
                SegmentRelation::SameDirectionLineOverlap { overlap, .. } => {
                    segments.push(overlap);
                }
                SegmentRelation::Intersect { point } => points.push(point),
                _ => {}
            }
        }
        if points.is_empty() {
            return Err(OperationError::AmbiguousGeometry(
                "coplanar segment is neither inside nor outside yet crosses no edge".into(),
            )
            .into());
        }
        points.sort_by(|p, q| zyx_order(p, q));
        let mut points = dedupe_points(&points);
        order_points_along(&mut points, segment);
        weave_segments(&mut segments, &points, polygon)?;
        return Ok(SegmentPolygonRelation::OverlapOrIntersect { segments, points });
    }

    let pp1 = plane.project_point(segment.start());
    let pp2 = plane.project_point(segment.end());
    if points_equal(&pp1, &pp2) {
        // Both endpoints project to one spot: the segment is perpendicular
        // to the plane.
        if segment.contains(&pp1) {
            if classify_point(polygon, &pp1)? != PointPolygonRelation::Outside {
                return Ok(SegmentPolygonRelation::PerpendicularIntersectFace { point: pp1 });
            }
            return Ok(SegmentPolygonRelation::PerpendicularIntersectPlane { point: pp1 });
        }
        return Ok(SegmentPolygonRelation::PerpendicularNonIntersect { point: pp1 });
    }

    let projection = Segment::new(pp1, pp2)?;
    match compare_segments(segment, &projection)? {
        SegmentRelation::Intersect { point } => {
            if classify_point(polygon, &point)? == PointPolygonRelation::Outside {
                Ok(SegmentPolygonRelation::NonPlanarIntersectPlane { point })
            } else {
                Ok(SegmentPolygonRelation::NonPlanarIntersectFace { point })
            }
        }
        _ => Ok(SegmentPolygonRelation::NonPlanarNonIntersect),
    }
}

/// Frames the sorted crossing points with the segment endpoints so that
/// consecutive pairs walk the segment end to end.
fn order_points_along(points: &mut Vec<Point3>, segment: &Segment) {
    let start = *segment.start();
    let end = *segment.end();
    if points.len() == 1 {
        points.insert(0, start);
        points.push(end);
        return;
    }
    let first = points[0];
    let last = points[points.len() - 1];
    if points_equal(&first, &start) {
        if !points_equal(&last, &end) {
            points.push(end);
        }
    } else if points_equal(&first, &end) {
        if !points_equal(&last, &start) {
            points.push(start);
        }
    } else if points_equal(&last, &start) {
        points.insert(0, end);
    } else if points_equal(&last, &end) {
        points.insert(0, start);
    } else if same_direction(&(last - first), &(end - start)) {
        points.insert(0, start);
        points.push(end);
    } else {
        points.insert(0, end);
        points.push(start);
    }
}
