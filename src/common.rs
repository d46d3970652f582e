//! Common mathematical operations.

use arrayvec::ArrayVec;

/// Distance below which two points are considered coincident.
///
/// Geometry at this scale (zero-length cubics, degenerate sides) is not an
/// error; it is detected with this epsilon and handled by fallback paths.
pub const DISTANCE_EPSILON: f64 = 1e-4;

/// Tolerance for near-parallel directions and progress comparisons.
pub const ANGLE_EPSILON: f64 = 1e-6;

/// A looser distance tolerance, for comparisons across accumulated
/// floating point drift (e.g. outline seam checks).
pub const RELAXED_DISTANCE_EPSILON: f64 = 5e-3;

/// Linearly interpolate between `start` and `stop`.
#[inline]
pub(crate) fn interpolate(start: f64, stop: f64, fraction: f64) -> f64 {
    (1.0 - fraction) * start + fraction * stop
}

/// `x mod m`, with the result always in `[0, m)`.
///
/// The `%` operator keeps the sign of the dividend; outline progress values
/// need the non-negative representative.
#[inline]
pub(crate) fn positive_modulo(x: f64, m: f64) -> f64 {
    (x % m + m) % m
}

/// Find real roots of the quadratic equation `c0 + c1·x + c2·x² = 0`.
///
/// If the equation is nearly linear the quadratic term is ignored and the
/// single linear root returned. Roots are in ascending order.
pub(crate) fn solve_quadratic(c0: f64, c1: f64, c2: f64) -> ArrayVec<f64, 2> {
    let mut result = ArrayVec::new();
    let sc0 = c0 / c2;
    let sc1 = c1 / c2;
    if !sc0.is_finite() || !sc1.is_finite() {
        // c2 is zero or very small, treat as linear
        let root = -c0 / c1;
        if root.is_finite() {
            result.push(root);
        }
        return result;
    }
    let arg = sc1 * sc1 - 4. * sc0;
    if arg < 0.0 {
        return result;
    } else if arg == 0.0 {
        result.push(-0.5 * sc1);
        return result;
    }
    // Computing the larger-magnitude root first avoids cancellation.
    // See https://math.stackexchange.com/questions/866331
    let root1 = -0.5 * (sc1 + arg.sqrt().copysign(sc1));
    let root2 = sc0 / root1;
    if root2.is_finite() {
        if root2 > root1 {
            result.push(root1);
            result.push(root2);
        } else {
            result.push(root2);
            result.push(root1);
        }
    } else {
        result.push(root1);
    }
    result
}
