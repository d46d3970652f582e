//! Morphing between two rounded polygons.

use crate::common::{positive_modulo, ANGLE_EPSILON};
use crate::feature_mapping::feature_mapper;
use crate::measure::{LengthMeasurer, MeasuredPolygon};
use crate::{Cubic, Point, RoundedPolygon};

/// A precomputed alignment between two shapes' outlines, from which any
/// intermediate shape can be sampled.
///
/// Construction does all the heavy lifting: both outlines are measured,
/// their corners matched, and the outlines cut into two cubic lists of
/// equal length whose entries cover matching stretches of progress. Sampling
/// an intermediate shape is then a componentwise lerp per cubic pair.
///
/// The input polygons are not retained; a `Morph` owns only its match list
/// and is immutable, so sampling from several threads is safe.
pub struct Morph {
    morph_match: Vec<(Cubic, Cubic)>,
}

impl Morph {
    /// Precompute the alignment between `start` and `end`.
    pub fn new(start: &RoundedPolygon, end: &RoundedPolygon) -> Morph {
        Morph {
            morph_match: Morph::match_shapes(start, end),
        }
    }

    /// Cut both outlines into lists of equal length, pairwise covering
    /// matching progress ranges.
    fn match_shapes(p1: &RoundedPolygon, p2: &RoundedPolygon) -> Vec<(Cubic, Cubic)> {
        let measured_polygon1 = MeasuredPolygon::measure(LengthMeasurer, p1);
        let measured_polygon2 = MeasuredPolygon::measure(LengthMeasurer, p2);

        // Map the corners of shape 1 onto the corners of shape 2. The
        // mapper relates progress on the two outlines in both directions.
        let double_mapper =
            feature_mapper(measured_polygon1.features(), measured_polygon2.features());

        // The progress on shape 2 matching progress 0 on shape 1. Cutting
        // shape 2 there aligns the two parameterizations at the origin.
        let polygon2_cut_point = double_mapper.map(0.0);
        let bs1 = measured_polygon1;
        let bs2 = measured_polygon2.cut_and_shift(polygon2_cut_point);

        // Walk both cubic lists with two cursors. At every step, whichever
        // current cubic ends first (in shape 1's progress terms) determines
        // a boundary; the other cubic is split there unless it ends at
        // (essentially) the same progress. Each step emits one pair.
        let mut ret = Vec::new();
        let mut i1 = 0;
        let mut i2 = 0;
        let mut b1 = bs1.cubics().first().cloned();
        i1 += 1;
        let mut b2 = bs2.cubics().first().cloned();
        i2 += 1;
        loop {
            let (cb1, cb2) = match (&b1, &b2) {
                (Some(cb1), Some(cb2)) => (cb1.clone(), cb2.clone()),
                _ => break,
            };
            // End progress of each current cubic, in shape 1's terms. The
            // final cubic of either list always ends at exactly 1.
            let b1a = if i1 == bs1.cubics().len() {
                1.0
            } else {
                cb1.end_outline_progress
            };
            let b2a = if i2 == bs2.cubics().len() {
                1.0
            } else {
                double_mapper.map_back(positive_modulo(
                    cb2.end_outline_progress + polygon2_cut_point,
                    1.0,
                ))
            };
            let minb = b1a.min(b2a);

            let (seg1, newb1) = if b1a > minb + ANGLE_EPSILON {
                let (head, tail) = cb1.cut_at_progress(&LengthMeasurer, minb);
                (head, Some(tail))
            } else {
                let next = bs1.cubics().get(i1).cloned();
                i1 += 1;
                (cb1, next)
            };
            let (seg2, newb2) = if b2a > minb + ANGLE_EPSILON {
                // The same boundary, translated into shape 2's shifted
                // progress.
                let (head, tail) = cb2.cut_at_progress(
                    &LengthMeasurer,
                    positive_modulo(double_mapper.map(minb) - polygon2_cut_point, 1.0),
                );
                (head, Some(tail))
            } else {
                let next = bs2.cubics().get(i2).cloned();
                i2 += 1;
                (cb2, next)
            };
            ret.push((seg1.cubic, seg2.cubic));
            b1 = newb1;
            b2 = newb2;
        }
        assert!(
            b1.is_none() && b2.is_none(),
            "expected both shapes' cubics to be fully matched"
        );
        ret
    }

    /// The outline at the given progress, as a closed cubic list.
    ///
    /// `progress` 0 renders the start shape, 1 the end shape, values
    /// between a blend. The list length is the same for every progress,
    /// and the final cubic's end anchor is snapped onto the first cubic's
    /// start anchor: interpolated endpoints drift by rounding otherwise,
    /// and an outline open by even a fraction of a pixel can render with
    /// seam artifacts.
    pub fn as_cubics(&self, progress: f64) -> Vec<Cubic> {
        let mut ret = Vec::with_capacity(self.morph_match.len());
        let mut first_cubic: Option<Cubic> = None;
        let mut last_cubic: Option<Cubic> = None;
        for (a, b) in &self.morph_match {
            let cubic = *a * (1.0 - progress) + *b * progress;
            if first_cubic.is_none() {
                first_cubic = Some(cubic);
            }
            if let Some(last) = last_cubic {
                ret.push(last);
            }
            last_cubic = Some(cubic);
        }
        if let (Some(last), Some(first)) = (last_cubic, first_cubic) {
            ret.push(Cubic::new(
                last.anchor0(),
                last.control0(),
                last.control1(),
                first.anchor0(),
            ));
        }
        ret
    }

    /// Visit the outline at the given progress one cubic at a time,
    /// without allocating.
    ///
    /// The callback's argument is a scratch cubic overwritten on each call;
    /// copy it out if it needs to outlive the call. Unlike
    /// [`as_cubics`](Self::as_cubics) no seam snapping is applied, as no
    /// list is retained; rasterizers close the path themselves after the
    /// last `curve_to`.
    pub fn for_each_cubic<F: FnMut(&Cubic)>(&self, progress: f64, mut callback: F) {
        let mut scratch = Cubic::empty(Point::ZERO);
        for (a, b) in &self.morph_match {
            scratch.interpolate_between(a, b, progress);
            callback(&scratch);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::DISTANCE_EPSILON;
    use crate::CornerRounding;

    fn hexagon() -> RoundedPolygon {
        RoundedPolygon::from_num_vertices(
            6,
            250.0,
            Point::new(400., 400.),
            CornerRounding::new(20.0),
            None,
        )
    }

    fn assert_closed_and_continuous(cubics: &[Cubic]) {
        assert!(!cubics.is_empty());
        assert_eq!(cubics[cubics.len() - 1].anchor1(), cubics[0].anchor0());
        for pair in cubics.windows(2) {
            assert!(
                pair[0].anchor1().distance(pair[1].anchor0()) < DISTANCE_EPSILON,
                "gap between {:?} and {:?}",
                pair[0],
                pair[1]
            );
        }
    }

    #[test]
    fn identity_morph_is_constant() {
        let hexagon = hexagon();
        let morph = Morph::new(&hexagon, &hexagon);
        let polygon_anchors: Vec<Point> = hexagon
            .cubics()
            .iter()
            .flat_map(|c| [c.anchor0(), c.anchor1()])
            .collect();
        for progress in [0.0, 0.25, 0.5, 0.75, 1.0] {
            let cubics = morph.as_cubics(progress);
            assert_closed_and_continuous(&cubics);
            // Every emitted anchor coincides with an anchor of the source
            // shape, at every progress.
            for cubic in &cubics {
                for anchor in [cubic.anchor0(), cubic.anchor1()] {
                    let nearest = polygon_anchors
                        .iter()
                        .map(|p| p.distance(anchor))
                        .fold(f64::MAX, f64::min);
                    assert!(nearest < 1e-6, "anchor {:?} off by {}", anchor, nearest);
                }
            }
        }
    }

    #[test]
    fn hexagon_to_star() {
        let start = hexagon();
        let end = RoundedPolygon::star(
            6,
            250.,
            125.,
            CornerRounding::new(20.0),
            None,
            None,
            Point::new(400., 400.),
        );
        let morph = Morph::new(&start, &end);
        let count = morph.as_cubics(0.0).len();
        for progress in [0.0, 0.2, 0.5, 0.8, 1.0] {
            let cubics = morph.as_cubics(progress);
            assert_eq!(cubics.len(), count, "cubic count must not vary");
            assert_closed_and_continuous(&cubics);
        }
        // At the endpoints the outline lies on the respective shape: spot
        // check by radius from the center.
        let center = Point::new(400., 400.);
        for cubic in morph.as_cubics(0.0) {
            let r = cubic.anchor0().distance(center);
            assert!(r < 250.0 + 1e-6 && r > 250.0 * (3f64.sqrt() / 2.0) - 1.0);
        }
        let mut min_r = f64::MAX;
        for cubic in morph.as_cubics(1.0) {
            min_r = min_r.min(cubic.anchor0().distance(center));
        }
        // The star's inner corners pull the outline down toward the inner
        // radius.
        assert!(min_r < 135.0, "no anchor near the inner radius: {}", min_r);
    }

    #[test]
    fn square_to_rounded_square_half_progress() {
        let start = RoundedPolygon::rectangle(
            200.,
            200.,
            CornerRounding::UNROUNDED,
            None,
            Point::ZERO,
        );
        let end = RoundedPolygon::rectangle(
            200.,
            200.,
            CornerRounding::new(50.0),
            None,
            Point::ZERO,
        );
        let morph = Morph::new(&start, &end);
        let cubics = morph.as_cubics(0.5);
        assert_closed_and_continuous(&cubics);
        // All four corners are rounded the same amount: the distance from
        // each sharp corner to the nearest outline anchor is equal, and
        // strictly between the unrounded (0) and fully rounded values.
        let corner_gaps: Vec<f64> = [
            Point::new(100., 100.),
            Point::new(-100., 100.),
            Point::new(-100., -100.),
            Point::new(100., -100.),
        ]
        .iter()
        .map(|corner| {
            cubics
                .iter()
                .flat_map(|c| [c.anchor0(), c.anchor1()])
                .map(|p| p.distance(*corner))
                .fold(f64::MAX, f64::min)
        })
        .collect();
        for gap in &corner_gaps {
            assert!((gap - corner_gaps[0]).abs() < 1e-6, "{:?}", corner_gaps);
            assert!(*gap > 1.0 && *gap < 50.0, "{:?}", corner_gaps);
        }
    }

    #[test]
    fn for_each_cubic_matches_as_cubics() {
        let start = hexagon();
        let end = RoundedPolygon::circle(8, 250.0, Point::new(400., 400.));
        let morph = Morph::new(&start, &end);
        let collected = {
            let mut v = Vec::new();
            morph.for_each_cubic(0.3, |c| v.push(*c));
            v
        };
        let listed = morph.as_cubics(0.3);
        assert_eq!(collected.len(), listed.len());
        // Identical up to the final cubic, which as_cubics seam-snaps.
        for (a, b) in collected.iter().zip(&listed).take(collected.len() - 1) {
            assert_eq!(a, b);
        }
        assert_eq!(
            collected[collected.len() - 1].anchor0(),
            listed[listed.len() - 1].anchor0()
        );
    }

    #[test]
    fn morph_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Morph>();
    }
}
