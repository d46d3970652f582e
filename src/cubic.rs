//! A single cubic Bézier segment, stored as a flat numeric record.

use std::fmt;
use std::ops::{Add, Mul};

use arrayvec::ArrayVec;

use crate::common::{solve_quadratic, DISTANCE_EPSILON};
use crate::{Point, Rect};

/// A single cubic Bézier segment.
///
/// The control points are stored as a flat array of eight coordinates,
/// `[a0x, a0y, c0x, c0y, c1x, c1y, a1x, a1y]`: the on-curve anchors at the
/// ends, the off-curve controls between them. The flat layout makes
/// componentwise interpolation (the heart of morphing) a plain loop, and
/// the named accessors are views onto it.
#[derive(Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cubic(pub(crate) [f64; 8]);

impl Cubic {
    /// Create a new cubic Bézier segment from its four points.
    #[inline]
    pub fn new<P: Into<Point>>(anchor0: P, control0: P, control1: P, anchor1: P) -> Cubic {
        let (a0, c0, c1, a1) = (
            anchor0.into(),
            control0.into(),
            control1.into(),
            anchor1.into(),
        );
        Cubic([a0.x, a0.y, c0.x, c0.y, c1.x, c1.y, a1.x, a1.y])
    }

    /// Create a cubic from its raw coordinate array.
    #[inline]
    pub const fn from_coords(coords: [f64; 8]) -> Cubic {
        Cubic(coords)
    }

    /// The first anchor point.
    #[inline]
    pub fn anchor0(&self) -> Point {
        Point::new(self.0[0], self.0[1])
    }

    /// The first control point.
    #[inline]
    pub fn control0(&self) -> Point {
        Point::new(self.0[2], self.0[3])
    }

    /// The second control point.
    #[inline]
    pub fn control1(&self) -> Point {
        Point::new(self.0[4], self.0[5])
    }

    /// The second anchor point.
    #[inline]
    pub fn anchor1(&self) -> Point {
        Point::new(self.0[6], self.0[7])
    }

    /// The raw coordinate array.
    #[inline]
    pub fn coords(&self) -> &[f64; 8] {
        &self.0
    }

    /// A line between `p0` and `p1`, as a cubic.
    ///
    /// The controls sit at the 1/3 and 2/3 interpolants, so the segment is
    /// uniformly parameterized like the line it replaces.
    pub fn straight_line(p0: Point, p1: Point) -> Cubic {
        Cubic::new(p0, p0.lerp(p1, 1.0 / 3.0), p0.lerp(p1, 2.0 / 3.0), p1)
    }

    /// A zero-length cubic collapsed onto the point `p`.
    #[inline]
    pub fn empty(p: Point) -> Cubic {
        Cubic::new(p, p, p, p)
    }

    /// A single-cubic approximation of the minor arc from `p0` to `p1`
    /// around `center`.
    ///
    /// The sweep direction follows from whether the 90°-rotated tangent at
    /// `p0` points toward `p1`. Nearly colinear endpoints degrade to a
    /// straight line.
    pub fn circular_arc(center: Point, p0: Point, p1: Point) -> Cubic {
        let p0d = (p0 - center).direction();
        let p1d = (p1 - center).direction();
        let rotated_p0 = p0d.turn_90();
        let rotated_p1 = p1d.turn_90();
        let clockwise = rotated_p0.dot(p1 - center) >= 0.0;
        let cosa = p0d.dot(p1d);
        if cosa > 0.999 {
            // p0 ~= p1
            return Cubic::straight_line(p0, p1);
        }
        let k = (p0 - center).hypot() * 4.0 / 3.0
            * ((2.0 * (1.0 - cosa)).sqrt() - (1.0 - cosa * cosa).sqrt())
            / (1.0 - cosa)
            * if clockwise { 1.0 } else { -1.0 };
        Cubic::new(p0, p0 + rotated_p0 * k, p1 - rotated_p1 * k, p1)
    }

    /// Evaluate the curve at parameter `t`, in Bernstein form.
    pub fn eval(&self, t: f64) -> Point {
        let u = 1.0 - t;
        let c = &self.0;
        Point::new(
            c[0] * (u * u * u)
                + c[2] * (3.0 * u * u * t)
                + c[4] * (3.0 * u * t * t)
                + c[6] * (t * t * t),
            c[1] * (u * u * u)
                + c[3] * (3.0 * u * u * t)
                + c[5] * (3.0 * u * t * t)
                + c[7] * (t * t * t),
        )
    }

    /// Subdivide at parameter `t`, using de Casteljau.
    ///
    /// The split point is shared exactly: `left.anchor1() == right.anchor0()
    /// == eval(t)`.
    pub fn split(&self, t: f64) -> (Cubic, Cubic) {
        let a0 = self.anchor0();
        let c0 = self.control0();
        let c1 = self.control1();
        let a1 = self.anchor1();
        let p01 = a0.lerp(c0, t);
        let p12 = c0.lerp(c1, t);
        let p23 = c1.lerp(a1, t);
        let p012 = p01.lerp(p12, t);
        let p123 = p12.lerp(p23, t);
        let split_point = p012.lerp(p123, t);
        (
            Cubic::new(a0, p01, p012, split_point),
            Cubic::new(split_point, p123, p23, a1),
        )
    }

    /// The same curve traversed in the opposite direction.
    #[inline]
    pub fn reverse(&self) -> Cubic {
        Cubic::new(self.anchor1(), self.control1(), self.control0(), self.anchor0())
    }

    /// Whether the anchors coincide to within [`DISTANCE_EPSILON`].
    ///
    /// Zero-length cubics arise from fully degenerate corners; downstream
    /// stages drop them while stitching anchor continuity.
    #[inline]
    pub fn zero_length(&self) -> bool {
        (self.0[0] - self.0[6]).abs() < DISTANCE_EPSILON
            && (self.0[1] - self.0[7]).abs() < DISTANCE_EPSILON
    }

    /// This cubic with all four points passed through `f`.
    pub fn transformed<F: FnMut(Point) -> Point>(&self, f: &mut F) -> Cubic {
        Cubic::new(
            f(self.anchor0()),
            f(self.control0()),
            f(self.control1()),
            f(self.anchor1()),
        )
    }

    /// The axis-aligned bounding box of the curve.
    ///
    /// With `approximate`, this is the (slightly loose) box of all four
    /// points. Otherwise the extrema of each coordinate are found by
    /// solving the quadratic derivative, giving a tight box.
    pub fn calculate_bounds(&self, approximate: bool) -> Rect {
        // A zero-length cubic is a point.
        if self.zero_length() {
            return Rect::from_point(self.anchor0());
        }
        let mut bounds = Rect::from_point(self.anchor0()).union_pt(self.anchor1());
        if approximate {
            return bounds.union_pt(self.control0()).union_pt(self.control1());
        }
        for t in self.extrema() {
            bounds = bounds.union_pt(self.eval(t));
        }
        bounds
    }

    /// Interior parameter values where dx/dt or dy/dt vanishes.
    fn extrema(&self) -> ArrayVec<f64, 4> {
        fn one_coord(result: &mut ArrayVec<f64, 4>, d0: f64, d1: f64, d2: f64) {
            // Derivative control values d0, d1, d2 give the quadratic
            // d0 + 2(d1-d0)t + (d0-2d1+d2)t².
            let a = d0 - 2.0 * d1 + d2;
            let b = 2.0 * (d1 - d0);
            let c = d0;
            for t in solve_quadratic(c, b, a) {
                if t > 0.0 && t < 1.0 {
                    result.push(t);
                }
            }
        }
        let mut result = ArrayVec::new();
        let c = &self.0;
        one_coord(&mut result, c[2] - c[0], c[4] - c[2], c[6] - c[4]);
        one_coord(&mut result, c[3] - c[1], c[5] - c[3], c[7] - c[5]);
        result
    }

    /// Componentwise interpolation of `from` toward `to`, written into
    /// `self`.
    ///
    /// Equivalent to `*self = *from * (1 - t) + *to * t` without the
    /// temporaries; used on the morph sampling hot path.
    pub(crate) fn interpolate_between(&mut self, from: &Cubic, to: &Cubic, t: f64) {
        for i in 0..8 {
            self.0[i] = crate::common::interpolate(from.0[i], to.0[i], t);
        }
    }
}

impl Add for Cubic {
    type Output = Cubic;

    fn add(self, other: Cubic) -> Cubic {
        let mut coords = [0.0; 8];
        for (i, c) in coords.iter_mut().enumerate() {
            *c = self.0[i] + other.0[i];
        }
        Cubic(coords)
    }
}

impl Mul<f64> for Cubic {
    type Output = Cubic;

    fn mul(self, other: f64) -> Cubic {
        let mut coords = self.0;
        for c in coords.iter_mut() {
            *c *= other;
        }
        Cubic(coords)
    }
}

impl Mul<Cubic> for f64 {
    type Output = Cubic;

    #[inline]
    fn mul(self, other: Cubic) -> Cubic {
        other * self
    }
}

impl fmt::Debug for Cubic {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "Cubic({:?}, {:?}, {:?}, {:?})",
            self.anchor0(),
            self.control0(),
            self.control1(),
            self.anchor1()
        )
    }
}
