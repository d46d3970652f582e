//! Geometry of a single rounded polygon corner.

use arrayvec::ArrayVec;

use crate::common::{ANGLE_EPSILON, DISTANCE_EPSILON};
use crate::{CornerRounding, Cubic, Point, Vec2};

/// The rounding geometry of one corner: the vertex `p1`, its neighbors, and
/// the cut/smoothing quantities derived from the rounding request.
///
/// The corner itself only knows how much side length it *wants*
/// ([`expected_round_cut`](Self::expected_round_cut) for the bare arc,
/// [`expected_cut`](Self::expected_cut) with smoothing); the polygon builder
/// arbitrates what it actually *gets* on each side and passes that to
/// [`cubics`](Self::cubics).
pub(crate) struct RoundedCorner {
    p0: Point,
    p1: Point,
    p2: Point,
    /// Unit direction from `p1` toward `p0`; zero if that side is degenerate.
    d1: Vec2,
    /// Unit direction from `p1` toward `p2`; zero if that side is degenerate.
    d2: Vec2,
    corner_radius: f64,
    smoothing: f64,
    /// Side length needed to fit an arc of the requested radius tangent to
    /// both sides.
    pub expected_round_cut: f64,
}

impl RoundedCorner {
    pub fn new(p0: Point, p1: Point, p2: Point, rounding: CornerRounding) -> RoundedCorner {
        let v01 = p0 - p1;
        let v21 = p2 - p1;
        let d01 = v01.hypot();
        let d21 = v21.hypot();
        if d01 > 0.0 && d21 > 0.0 {
            let d1 = v01 / d01;
            let d2 = v21 / d21;
            let cos_angle = d1.dot(d2);
            let sin_angle = (1.0 - cos_angle * cos_angle).sqrt();
            // The length of the cut needed on each side to fit a circle of
            // the requested radius tangent to both sides. Nearly-straight
            // corners (tiny sine) get no rounding at all.
            let expected_round_cut = if sin_angle > 1e-3 {
                rounding.radius * (cos_angle + 1.0) / sin_angle
            } else {
                0.0
            };
            RoundedCorner {
                p0,
                p1,
                p2,
                d1,
                d2,
                corner_radius: rounding.radius,
                smoothing: rounding.smoothing,
                expected_round_cut,
            }
        } else {
            // One (or both) of the sides is degenerate; nothing to round.
            RoundedCorner {
                p0,
                p1,
                p2,
                d1: Vec2::ZERO,
                d2: Vec2::ZERO,
                corner_radius: 0.0,
                smoothing: 0.0,
                expected_round_cut: 0.0,
            }
        }
    }

    /// Side length wanted for the arc plus its smoothing curves.
    #[inline]
    pub fn expected_cut(&self) -> f64 {
        (1.0 + self.smoothing) * self.expected_round_cut
    }

    /// The cubics tracing this corner, given the side length the builder
    /// actually granted on each incident side.
    ///
    /// Emits a flanking transition curve, the central circular arc, and the
    /// second flanking curve reversed, so the sequence flows in outline
    /// order. Degenerate corners collapse to a single zero-length cubic at
    /// the vertex.
    pub fn cubics(&self, allowed_cut0: f64, allowed_cut1: f64) -> ArrayVec<Cubic, 3> {
        let mut result = ArrayVec::new();
        let allowed_cut = allowed_cut0.min(allowed_cut1);
        if self.expected_round_cut < DISTANCE_EPSILON
            || allowed_cut < DISTANCE_EPSILON
            || self.corner_radius < DISTANCE_EPSILON
        {
            result.push(Cubic::empty(self.p1));
            return result;
        }
        let actual_round_cut = allowed_cut.min(self.expected_round_cut);
        let actual_smoothing0 = self.actual_smoothing(allowed_cut0);
        let actual_smoothing1 = self.actual_smoothing(allowed_cut1);
        // When the side budget shrank the cut, the radius shrinks with it.
        let actual_r = self.corner_radius * actual_round_cut / self.expected_round_cut;
        let center_distance = (actual_r * actual_r + actual_round_cut * actual_round_cut).sqrt();
        let center = self.p1 + (self.d1 + self.d2).direction() * center_distance;
        let circle_intersection0 = self.p1 + self.d1 * actual_round_cut;
        let circle_intersection2 = self.p1 + self.d2 * actual_round_cut;
        let flanking0 = self.compute_flanking_curve(
            actual_round_cut,
            actual_smoothing0,
            self.p0,
            circle_intersection0,
            circle_intersection2,
            center,
            actual_r,
        );
        let flanking2 = self
            .compute_flanking_curve(
                actual_round_cut,
                actual_smoothing1,
                self.p2,
                circle_intersection2,
                circle_intersection0,
                center,
                actual_r,
            )
            .reverse();
        result.push(flanking0);
        result.push(Cubic::circular_arc(
            center,
            flanking0.anchor1(),
            flanking2.anchor0(),
        ));
        result.push(flanking2);
        result
    }

    /// Per-side smoothing, ramped down when the side could not grant the
    /// full smoothing budget:
    /// - the side granted everything: the requested smoothing;
    /// - the side granted the arc but only part of the smoothing: the
    ///   proportional fraction;
    /// - the side could not even fit the full arc: no smoothing.
    fn actual_smoothing(&self, allowed_cut: f64) -> f64 {
        if allowed_cut > self.expected_cut() {
            self.smoothing
        } else if allowed_cut > self.expected_round_cut {
            self.smoothing * (allowed_cut - self.expected_round_cut)
                / (self.expected_cut() - self.expected_round_cut)
        } else {
            0.0
        }
    }

    /// One transition curve from a side onto the rounding circle.
    ///
    /// * `side_start` - the vertex at the far end of the side (`p0` or `p2`)
    /// * `circle_segment_intersection` - where the rounding circle touches
    ///   this side
    /// * `other_circle_segment_intersection` - where it touches the other
    ///   side
    #[allow(clippy::too_many_arguments)]
    fn compute_flanking_curve(
        &self,
        actual_round_cut: f64,
        actual_smoothing: f64,
        side_start: Point,
        circle_segment_intersection: Point,
        other_circle_segment_intersection: Point,
        circle_center: Point,
        actual_r: f64,
    ) -> Cubic {
        // The smoothing parameter pushes the curve start back along the
        // side, past the point where the circle touches it.
        let side_direction = (side_start - self.p1).direction();
        let curve_start =
            self.p1 + side_direction * actual_round_cut * (1.0 + actual_smoothing);
        // curve_end slides on the circle from the side tangent point toward
        // the arc midpoint as smoothing grows, keeping the arc centered
        // between its two flanks.
        let p = circle_segment_intersection.lerp(
            circle_segment_intersection.midpoint(other_circle_segment_intersection),
            actual_smoothing,
        );
        let curve_end = circle_center + (p - circle_center).direction() * actual_r;
        // The anchor on the side lies where the circle tangent at curve_end
        // meets the side, keeping the transition G1 at both ends. With no
        // intersection (parallel directions) fall back to the touch point.
        let circle_tangent = (curve_end - circle_center).turn_90();
        let anchor_end = line_intersection(side_start, side_direction, curve_end, circle_tangent)
            .unwrap_or(circle_segment_intersection);
        // From the curve start to the anchor on the side, the first control
        // point splits the difference at two thirds.
        let anchor_start = curve_start.lerp(anchor_end, 2.0 / 3.0);
        Cubic::new(curve_start, anchor_start, anchor_end, curve_end)
    }
}

/// Intersection of the lines `p0 + k·d0` and `p1 + k·d1`, or `None` when
/// they are (numerically) parallel.
fn line_intersection(p0: Point, d0: Vec2, p1: Point, d1: Vec2) -> Option<Point> {
    let rotated_d1 = d1.turn_90();
    let den = d0.dot(rotated_d1);
    if den.abs() < ANGLE_EPSILON {
        return None;
    }
    let num = (p1 - p0).dot(rotated_d1);
    // A huge k would put the intersection far outside the segment and only
    // amplify noise.
    if den.abs() < ANGLE_EPSILON * num.abs() {
        return None;
    }
    let k = num / den;
    Some(p0 + d0 * k)
}
