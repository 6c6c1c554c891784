//! Projection and orthonormal frame helpers.

use crate::DVec3;

/// Vector projection of `v` onto `n`. `n` need not be unit length.
#[inline]
pub fn project(v: DVec3, n: DVec3) -> DVec3 {
    v.dot(n) / n.dot(n) * n
}

/// A vector perpendicular to `v`.
///
/// Zeroes whichever of the x/y components has the larger magnitude and
/// swaps the remaining pair, so the result never degenerates for non-zero `v`.
#[inline]
pub fn perpendicular(v: DVec3) -> DVec3 {
    if v.y.abs() <= v.x.abs() {
        DVec3::new(v.z, 0.0, -v.x)
    } else {
        DVec3::new(0.0, v.z, -v.y)
    }
}

/// Build `(x, y)` such that `{x, y, n}` is a right-handed orthonormal frame.
///
/// `n` is expected to be unit length.
#[inline]
pub fn orthonormal_basis(n: DVec3) -> (DVec3, DVec3) {
    let x = perpendicular(n).normalize();
    let y = n.cross(x);
    (x, y)
}
