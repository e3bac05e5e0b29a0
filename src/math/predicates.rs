use std::cmp::Ordering;

use crate::error::{GeometryError, Result};

use super::{Point2, Point3, Vector2, Vector3, TOLERANCE};

/// Checks whether a scalar is zero within tolerance.
#[must_use]
pub fn is_zero(a: f64) -> bool {
    a.abs() < TOLERANCE
}

/// Checks whether two scalars are equal within tolerance.
#[must_use]
pub fn is_equal(a: f64, b: f64) -> bool {
    (a - b).abs() < TOLERANCE
}

/// Checks whether `a > b` by more than the tolerance.
#[must_use]
pub fn is_bigger(a: f64, b: f64) -> bool {
    a - b > TOLERANCE
}

/// Checks whether `a < b` by more than the tolerance.
#[must_use]
pub fn is_smaller(a: f64, b: f64) -> bool {
    b - a > TOLERANCE
}

/// Componentwise point equality within tolerance.
#[must_use]
pub fn points_equal(a: &Point3, b: &Point3) -> bool {
    is_equal(a.x, b.x) && is_equal(a.y, b.y) && is_equal(a.z, b.z)
}

/// Componentwise equality of local plane coordinates within tolerance.
#[must_use]
pub fn local_points_equal(a: &Point2, b: &Point2) -> bool {
    is_equal(a.x, b.x) && is_equal(a.y, b.y)
}

/// Componentwise vector equality within tolerance.
#[must_use]
pub fn vectors_equal(a: &Vector3, b: &Vector3) -> bool {
    is_equal(a.x, b.x) && is_equal(a.y, b.y) && is_equal(a.z, b.z)
}

/// Normalizes a vector to unit length.
///
/// # Errors
///
/// Returns [`GeometryError::ZeroVector`] if the vector's norm is within
/// tolerance of zero.
pub fn unit_vector(v: &Vector3) -> Result<Vector3> {
    let len = v.norm();
    if len < TOLERANCE {
        return Err(GeometryError::ZeroVector.into());
    }
    Ok(v / len)
}

/// Normalizes a 2D vector to unit length.
///
/// # Errors
///
/// Returns [`GeometryError::ZeroVector`] if the vector's norm is within
/// tolerance of zero.
pub fn unit_vector_2d(v: &Vector2) -> Result<Vector2> {
    let len = v.norm();
    if len < TOLERANCE {
        return Err(GeometryError::ZeroVector.into());
    }
    Ok(v / len)
}

/// Collinearity test: the cross product of the unitized vectors has a
/// magnitude within tolerance of zero.
///
/// Every direction predicate in the kernel refines this single test, so a
/// pair judged collinear here can never be judged skew elsewhere.
/// Zero-length input is never collinear with anything.
#[must_use]
pub fn same_or_opposite_direction(a: &Vector3, b: &Vector3) -> bool {
    let (Ok(ua), Ok(ub)) = (unit_vector(a), unit_vector(b)) else {
        return false;
    };
    ua.cross(&ub).norm() < TOLERANCE
}

/// Collinear and pointing the same way (positive dot product).
#[must_use]
pub fn same_direction(a: &Vector3, b: &Vector3) -> bool {
    same_or_opposite_direction(a, b) && a.dot(b) > 0.0
}

/// Collinear and pointing opposite ways (negative dot product).
#[must_use]
pub fn opposite_direction(a: &Vector3, b: &Vector3) -> bool {
    same_or_opposite_direction(a, b) && a.dot(b) < 0.0
}

/// 2D collinearity test on local plane coordinates.
#[must_use]
pub fn same_or_opposite_direction_2d(a: &Vector2, b: &Vector2) -> bool {
    let (Ok(ua), Ok(ub)) = (unit_vector_2d(a), unit_vector_2d(b)) else {
        return false;
    };
    (ua.x * ub.y - ua.y * ub.x).abs() < TOLERANCE
}

/// 2D vectors collinear and pointing opposite ways.
#[must_use]
pub fn opposite_direction_2d(a: &Vector2, b: &Vector2) -> bool {
    same_or_opposite_direction_2d(a, b) && a.dot(b) < 0.0
}

/// Offsets a point along a direction by a distance.
///
/// The direction is expected to be unit length; the caller derives it from
/// a normalized axis or a segment direction.
#[must_use]
pub fn offset_point(point: &Point3, direction: &Vector3, distance: f64) -> Point3 {
    point + direction * distance
}

/// Euclidean distance between two points.
#[must_use]
pub fn distance(a: &Point3, b: &Point3) -> f64 {
    (b - a).norm()
}

/// Canonical coordinate ordering: compares by z, then y, then x, treating
/// components equal within tolerance. Used for deterministic sorts and
/// vertex-set comparison.
#[must_use]
pub fn zyx_order(a: &Point3, b: &Point3) -> Ordering {
    for (ca, cb) in [(a.z, b.z), (a.y, b.y), (a.x, b.x)] {
        if is_equal(ca, cb) {
            continue;
        }
        if ca < cb {
            return Ordering::Less;
        }
        return Ordering::Greater;
    }
    Ordering::Equal
}

/// Returns whichever of `v` / `-v` is greater in canonical coordinate
/// order, giving every axis a deterministic orientation.
#[must_use]
pub fn canonical_direction(v: &Vector3) -> Vector3 {
    let flipped = -v;
    match zyx_order(&Point3::from(*v), &Point3::from(flipped)) {
        Ordering::Greater | Ordering::Equal => *v,
        Ordering::Less => flipped,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn v(x: f64, y: f64, z: f64) -> Vector3 {
        Vector3::new(x, y, z)
    }

    #[test]
    fn scalar_comparisons_respect_tolerance() {
        assert!(is_equal(1.0, 1.0 + TOLERANCE / 2.0));
        assert!(!is_equal(1.0, 1.0 + TOLERANCE * 2.0));
        assert!(is_bigger(2.0, 1.0));
        assert!(!is_bigger(1.0 + TOLERANCE / 2.0, 1.0));
        assert!(is_smaller(1.0, 2.0));
    }

    #[test]
    fn unit_vector_rejects_zero() {
        assert!(unit_vector(&v(0.0, 0.0, 0.0)).is_err());
        let u = unit_vector(&v(3.0, 4.0, 0.0)).unwrap();
        assert!(is_equal(u.norm(), 1.0));
    }

    #[test]
    fn direction_tests_are_mutually_consistent() {
        let a = v(2.0, 0.0, 0.0);
        let b = v(5.0, 0.0, 0.0);
        let c = v(-1.0, 0.0, 0.0);
        let d = v(0.0, 1.0, 0.0);

        assert!(same_direction(&a, &b));
        assert!(opposite_direction(&a, &c));
        assert!(same_or_opposite_direction(&a, &b));
        assert!(same_or_opposite_direction(&a, &c));
        assert!(!same_or_opposite_direction(&a, &d));
        // Refinements never contradict the collinearity test.
        assert!(!same_direction(&a, &d));
        assert!(!opposite_direction(&a, &d));
    }

    #[test]
    fn opposite_direction_2d_basic() {
        let a = Vector2::new(3.0, 0.0);
        let b = Vector2::new(-1.0, 0.0);
        let c = Vector2::new(0.0, 2.0);
        assert!(opposite_direction_2d(&a, &b));
        assert!(!opposite_direction_2d(&a, &c));
        assert!(!opposite_direction_2d(&a, &a));
    }

    #[test]
    fn offset_point_moves_along_direction() {
        let p = Point3::new(1.0, 2.0, 3.0);
        let q = offset_point(&p, &v(0.0, 0.0, 1.0), 2.5);
        assert!(points_equal(&q, &Point3::new(1.0, 2.0, 5.5)));
    }

    #[test]
    fn zyx_order_compares_z_first() {
        let a = Point3::new(9.0, 9.0, 0.0);
        let b = Point3::new(0.0, 0.0, 1.0);
        assert_eq!(zyx_order(&a, &b), Ordering::Less);
        let c = Point3::new(0.0, 1.0, 1.0);
        assert_eq!(zyx_order(&b, &c), Ordering::Less);
        assert_eq!(zyx_order(&c, &c), Ordering::Equal);
    }

    #[test]
    fn canonical_direction_is_stable_under_flip() {
        let d = v(0.0, 0.0, -1.0);
        let canon = canonical_direction(&d);
        assert!(vectors_equal(&canon, &v(0.0, 0.0, 1.0)));
        assert!(vectors_equal(&canonical_direction(&canon), &canon));
    }
}
