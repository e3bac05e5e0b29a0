use crate::error::{OperationError, Result};
use crate::geometry::Segment;
use crate::math::predicates::{
    is_zero, offset_point, opposite_direction, points_equal, same_direction,
    same_or_opposite_direction,
};
use crate::math::Point3;

/// Relation between two bounded segments.
#[derive(Debug, Clone)]
pub enum SegmentRelation {
    /// Collinear, sharing exactly one endpoint and pointing apart; carries
    /// the shared point and the merged span between the far endpoints.
    SameDirectionPointOverlap { point: Point3, merged: Segment },
    /// Collinear and disjoint with a gap.
    SameDirectionNonOverlap,
    /// Collinear with a shared stretch; carries the overlap and up to two
    /// outer remainder segments.
    SameDirectionLineOverlap {
        overlap: Segment,
        outer: Vec<Segment>,
    },
    /// Parallel carrier lines with a nonzero offset.
    Parallel,
    /// Crossing point within both bounds.
    Intersect { point: Point3 },
    /// Coplanar; the carrier lines cross outside at least one bound.
    NonIntersectPlanar { point: Point3 },
    /// Skew (non-coplanar).
    NonIntersectNonPlanar,
}

/// Classifies the relation between two bounded segments.
///
/// Collinearity is settled first, then endpoint-on-line shortcuts, then
/// coplanarity via the scalar triple product, and finally the crossing
/// point solved from the ratio of perpendicular carrier-line distances.
///
/// # Errors
///
/// Returns [`OperationError::AmbiguousGeometry`] when tolerance decisions
/// contradict each other (the crossing solve cannot place its candidate on
/// either carrier line).
pub fn compare_segments(a: &Segment, b: &Segment) -> Result<SegmentRelation> {
    if same_or_opposite_direction(&a.direction(), &b.direction()) {
        if is_zero(a.distance_to(b.start())) {
            return collinear_relation(a, b);
        }
        return Ok(SegmentRelation::Parallel);
    }

    // An endpoint of one segment on the other's carrier line settles the
    // crossing without solving.
    for (host, point) in [
        (b, a.start()),
        (b, a.end()),
        (a, b.start()),
        (a, b.end()),
    ] {
        if host.on_line(point) {
            if host.contains(point) {
                return Ok(SegmentRelation::Intersect { point: *point });
            }
            return Ok(SegmentRelation::NonIntersectPlanar { point: *point });
        }
    }

    let triple = (a.start() - b.start()).dot(&a.direction().cross(&b.direction()));
    if !is_zero(triple) {
        return Ok(SegmentRelation::NonIntersectNonPlanar);
    }
    crossing_relation(a, b)
}

/// Relation between two segments already known to be collinear.
fn collinear_relation(a: &Segment, b: &Segment) -> Result<SegmentRelation> {
    let a0 = *a.start();
    let a1 = *a.end();
    let b0 = *b.start();
    let b1 = *b.end();

    // Shared-endpoint cases first.
    if points_equal(&a0, &b0) {
        return shared_endpoint_relation(a, b, a0, a1, b1);
    }
    if points_equal(&a1, &b0) {
        return shared_endpoint_relation(a, b, a1, a0, b1);
    }
    if points_equal(&a1, &b1) {
        return shared_endpoint_relation(a, b, a1, a0, b0);
    }
    if points_equal(&a0, &b1) {
        return shared_endpoint_relation(a, b, a0, a1, b0);
    }

    // No shared endpoints: containment decides the overlap stretch and the
    // remainders pair up so that neither crosses the overlap.
    if b.contains(&a0) {
        if b.contains(&a1) {
            let outer = if Segment::new(b0, a1)?.contains(&a0) {
                remainders(&b0, &a0, &b1, &a1)
            } else {
                remainders(&b1, &a0, &b0, &a1)
            };
            return Ok(SegmentRelation::SameDirectionLineOverlap {
                overlap: a.clone(),
                outer,
            });
        }
        if a.contains(&b0) {
            return Ok(SegmentRelation::SameDirectionLineOverlap {
                overlap: Segment::new(a0, b0)?,
                outer: remainders(&b0, &a1, &b1, &a0),
            });
        }
        return Ok(SegmentRelation::SameDirectionLineOverlap {
            overlap: Segment::new(a0, b1)?,
            outer: remainders(&b0, &a0, &b1, &a1),
        });
    }
    if b.contains(&a1) {
        if a.contains(&b0) {
            return Ok(SegmentRelation::SameDirectionLineOverlap {
                overlap: Segment::new(a1, b0)?,
                outer: remainders(&b0, &a0, &b1, &a1),
            });
        }
        return Ok(SegmentRelation::SameDirectionLineOverlap {
            overlap: Segment::new(a1, b1)?,
            outer: remainders(&b0, &a1, &b1, &a0),
        });
    }
    if a.contains(&b0) {
        let outer = if Segment::new(a0, b1)?.contains(&b0) {
            remainders(&b0, &a0, &b1, &a1)
        } else {
            remainders(&b1, &a0, &b0, &a1)
        };
        return Ok(SegmentRelation::SameDirectionLineOverlap {
            overlap: b.clone(),
            outer,
        });
    }
    Ok(SegmentRelation::SameDirectionNonOverlap)
}

/// Collinear segments sharing one endpoint: either they point apart and
/// merely touch, or one end runs into the other's stretch.
fn shared_endpoint_relation(
    a: &Segment,
    b: &Segment,
    shared: Point3,
    a_far: Point3,
    b_far: Point3,
) -> Result<SegmentRelation> {
    if opposite_direction(&(a_far - shared), &(b_far - shared)) {
        return Ok(SegmentRelation::SameDirectionPointOverlap {
            point: shared,
            merged: Segment::new(a_far, b_far)?,
        });
    }
    let overlap = if b.contains(&a_far) {
        a.clone()
    } else {
        b.clone()
    };
    let outer = Segment::new(a_far, b_far).map_or_else(|_| Vec::new(), |s| vec![s]);
    Ok(SegmentRelation::SameDirectionLineOverlap { overlap, outer })
}

/// Builds the two outer remainder segments, dropping degenerate ones.
fn remainders(s0: &Point3, e0: &Point3, s1: &Point3, e1: &Point3) -> Vec<Segment> {
    let mut outer = Vec::with_capacity(2);
    if let Ok(first) = Segment::new(*s0, *e0) {
        outer.push(first);
    }
    if let Ok(second) = Segment::new(*s1, *e1) {
        outer.push(second);
    }
    outer
}

/// Solves the crossing of two coplanar, non-collinear segments from the
/// ratio of their endpoints' perpendicular distances to the other carrier
/// line.
fn crossing_relation(a: &Segment, b: &Segment) -> Result<SegmentRelation> {
    let p1 = *a.start();
    let p2 = *a.end();
    let h1 = b.distance_to(&p1);
    let h2 = b.distance_to(&p2);
    let towards1 = b.project_point(&p1) - p1;
    let towards2 = b.project_point(&p2) - p2;

    // Same side of b's carrier line: the crossing lies beyond a's bounds.
    let same_side = same_direction(&towards1, &towards2);
    let delta = if same_side { (h1 - h2).abs() } else { h1 + h2 };
    if is_zero(delta) {
        return Err(OperationError::AmbiguousGeometry(
            "coplanar segments at equal carrier-line offsets cannot cross".into(),
        )
        .into());
    }

    let reach = a.length() * h1 / delta;
    let dir = a.direction();
    let forward = offset_point(&p1, &dir, reach);
    let backward = offset_point(&p1, &dir, -reach);
    let point = if b.on_line(&forward) {
        forward
    } else if b.on_line(&backward) {
        backward
    } else {
        return Err(OperationError::AmbiguousGeometry(
            "crossing candidate lies on neither carrier-line extension".into(),
        )
        .into());
    };

    if !same_side && b.contains(&point) && a.contains(&point) {
        return Ok(SegmentRelation::Intersect { point });
    }
    Ok(SegmentRelation::NonIntersectPlanar { point })
}
