//! Arc-length measurement and progress parameterization of an outline.

use crate::common::{positive_modulo, DISTANCE_EPSILON};
use crate::{Cubic, Feature, RoundedPolygon};

/// A way to measure "how much outline" a cubic covers.
///
/// `measure_cubic` must be non-negative, and `find_cubic_cut_point` must be
/// monotone in `m`: larger measures cut later in the curve. Arc length is
/// the default notion, but any measure with these properties (e.g. swept
/// angle) parameterizes the pipeline just as well.
pub(crate) trait Measurer {
    /// The measure of the full cubic.
    fn measure_cubic(&self, c: &Cubic) -> f64;

    /// The parameter `t` at which the cubic's measure from its start
    /// reaches `m`.
    fn find_cubic_cut_point(&self, c: &Cubic, m: f64) -> f64;
}

/// Approximates arc length by subdividing the cubic into equal-parameter
/// chords and summing their lengths.
///
/// Morphing only needs lengths that are stable and comparable between the
/// two shapes, not tight absolute accuracy, so a coarse fixed subdivision
/// is enough.
#[derive(Clone, Copy, Default)]
pub(crate) struct LengthMeasurer;

impl LengthMeasurer {
    const SEGMENTS: usize = 3;

    /// Walks the chords, accumulating length, until `threshold` is reached.
    ///
    /// Returns `(progress, measure)`: with an unreachable threshold this
    /// measures the whole cubic (`(1.0, total)`); otherwise it stops at the
    /// threshold and reports the progress there, interpolated linearly
    /// within the chord.
    fn closest_progress_to(&self, cubic: &Cubic, threshold: f64) -> (f64, f64) {
        let mut total = 0.0;
        let mut remainder = threshold;
        let mut prev = cubic.anchor0();
        for i in 1..=Self::SEGMENTS {
            let progress = i as f64 / Self::SEGMENTS as f64;
            let point = cubic.eval(progress);
            let segment = point.distance(prev);
            if segment >= remainder {
                return (
                    progress - (1.0 - remainder / segment) / Self::SEGMENTS as f64,
                    threshold,
                );
            }
            remainder -= segment;
            total += segment;
            prev = point;
        }
        (1.0, total)
    }
}

impl Measurer for LengthMeasurer {
    fn measure_cubic(&self, c: &Cubic) -> f64 {
        self.closest_progress_to(c, f64::MAX).1
    }

    fn find_cubic_cut_point(&self, c: &Cubic, m: f64) -> f64 {
        self.closest_progress_to(c, m).0
    }
}

/// A [`Feature`] pinned to its position on the outline, as the midpoint
/// outline progress of its cubics.
#[derive(Clone)]
pub(crate) struct ProgressableFeature {
    pub progress: f64,
    pub feature: Feature,
}

/// A cubic annotated with the stretch of outline progress it covers.
#[derive(Clone)]
pub(crate) struct MeasuredCubic {
    pub cubic: Cubic,
    pub start_outline_progress: f64,
    pub end_outline_progress: f64,
    measured_size: f64,
}

impl MeasuredCubic {
    fn new<M: Measurer>(
        measurer: &M,
        cubic: Cubic,
        start_outline_progress: f64,
        end_outline_progress: f64,
    ) -> MeasuredCubic {
        assert!(
            end_outline_progress >= start_outline_progress,
            "progress range must not be reversed"
        );
        let measured_size = measurer.measure_cubic(&cubic);
        assert!(measured_size >= 0.0, "measurer returned a negative measure");
        MeasuredCubic {
            cubic,
            start_outline_progress,
            end_outline_progress,
            measured_size,
        }
    }

    /// Split into two measured halves at the given outline progress.
    ///
    /// The cut progress is clamped into this cubic's range first; upstream
    /// arithmetic can land it just barely outside.
    pub fn cut_at_progress<M: Measurer>(
        &self,
        measurer: &M,
        cut_outline_progress: f64,
    ) -> (MeasuredCubic, MeasuredCubic) {
        let bounded =
            cut_outline_progress.clamp(self.start_outline_progress, self.end_outline_progress);
        let outline_progress_size = self.end_outline_progress - self.start_outline_progress;
        let progress_from_start = bounded - self.start_outline_progress;
        // Note: empty-progress cubics are filtered out when the polygon is
        // measured, so the division is safe here.
        let relative_progress = progress_from_start / outline_progress_size;
        let t = measurer.find_cubic_cut_point(&self.cubic, relative_progress * self.measured_size);
        assert!((0.0..=1.0).contains(&t), "cut point outside the cubic");
        let (c1, c2) = self.cubic.split(t);
        (
            MeasuredCubic::new(measurer, c1, self.start_outline_progress, bounded),
            MeasuredCubic::new(measurer, c2, bounded, self.end_outline_progress),
        )
    }
}

/// A polygon outline parameterized by progress in `[0, 1]`.
///
/// Consecutive measured cubics share progress endpoints; the first starts
/// at exactly 0 and the last ends at exactly 1.
#[derive(Clone)]
pub(crate) struct MeasuredPolygon<M: Measurer> {
    measurer: M,
    features: Vec<ProgressableFeature>,
    cubics: Vec<MeasuredCubic>,
}

impl<M: Measurer + Clone> MeasuredPolygon<M> {
    fn new(
        measurer: M,
        features: Vec<ProgressableFeature>,
        cubics: Vec<Cubic>,
        outline_progress: Vec<f64>,
    ) -> MeasuredPolygon<M> {
        assert!(
            outline_progress.len() == cubics.len() + 1,
            "progress boundaries must bracket every cubic"
        );
        assert!(outline_progress[0] == 0.0, "progress must start at 0");
        assert!(
            outline_progress[outline_progress.len() - 1] == 1.0,
            "progress must end at 1"
        );
        let mut measured_cubics = Vec::with_capacity(cubics.len());
        let mut start_outline_progress = 0.0;
        for (index, cubic) in cubics.into_iter().enumerate() {
            // Drop cubics that cover no progress (typically zero-length
            // corner remnants); the next real cubic absorbs their range by
            // starting where the previous real one ended.
            if outline_progress[index + 1] - outline_progress[index] > DISTANCE_EPSILON {
                measured_cubics.push(MeasuredCubic::new(
                    &measurer,
                    cubic,
                    start_outline_progress,
                    outline_progress[index + 1],
                ));
                start_outline_progress = outline_progress[index + 1];
            }
        }
        // Dropped trailing cubics would otherwise leave the outline short
        // of 1.
        measured_cubics
            .last_mut()
            .expect("outline has at least one measurable cubic")
            .end_outline_progress = 1.0;
        MeasuredPolygon {
            measurer,
            features,
            cubics: measured_cubics,
        }
    }

    /// Measure a polygon's outline, pinning its corner features to their
    /// midpoint progress.
    pub fn measure(measurer: M, polygon: &RoundedPolygon) -> MeasuredPolygon<M> {
        // Flatten the feature cubics in order, remembering which flat index
        // holds each corner's middle cubic; that cubic's progress midpoint
        // becomes the corner's position on the outline.
        let mut cubics = Vec::new();
        let mut feature_to_cubic: Vec<(&Feature, usize)> = Vec::new();
        for feature in polygon.features() {
            for (cubic_index, cubic) in feature.cubics().iter().enumerate() {
                if feature.is_corner() && cubic_index == feature.cubics().len() / 2 {
                    feature_to_cubic.push((feature, cubics.len()));
                }
                cubics.push(*cubic);
            }
        }
        let mut measures = Vec::with_capacity(cubics.len() + 1);
        let mut measure = 0.0;
        measures.push(0.0);
        for cubic in &cubics {
            let result = measurer.measure_cubic(cubic);
            assert!(result >= 0.0, "measurer returned a negative measure");
            measure += result;
            measures.push(measure);
        }
        let total_measure = measure;
        let outline_progress: Vec<f64> = measures.iter().map(|m| m / total_measure).collect();

        let features = feature_to_cubic
            .iter()
            .map(|&(feature, ix)| ProgressableFeature {
                progress: positive_modulo(
                    (outline_progress[ix] + outline_progress[ix + 1]) / 2.0,
                    1.0,
                ),
                feature: (*feature).clone(),
            })
            .collect();
        MeasuredPolygon::new(measurer, features, cubics, outline_progress)
    }

    /// Rotate the outline so that progress 0 lands at `cutting_point`.
    ///
    /// The cubic containing the cut is split; the result runs from its back
    /// half, around the outline, to its front half, with all progress
    /// values (features included) shifted by `-cutting_point` mod 1.
    pub fn cut_and_shift(&self, cutting_point: f64) -> MeasuredPolygon<M> {
        assert!(
            (0.0..=1.0).contains(&cutting_point),
            "invalid cutting point"
        );
        if cutting_point < DISTANCE_EPSILON {
            return self.clone();
        }
        let n = self.cubics.len();
        let target_index = self
            .cubics
            .iter()
            .position(|c| {
                (c.start_outline_progress..=c.end_outline_progress).contains(&cutting_point)
            })
            .expect("cutting point lies on the outline");
        let target = &self.cubics[target_index];
        let (b1, b2) = target.cut_at_progress(&self.measurer, cutting_point);

        let mut ret_cubics = Vec::with_capacity(n + 1);
        ret_cubics.push(b2.cubic);
        for i in 1..n {
            ret_cubics.push(self.cubics[(i + target_index) % n].cubic);
        }
        ret_cubics.push(b1.cubic);

        let mut ret_outline_progress = Vec::with_capacity(n + 2);
        for index in 0..n + 2 {
            ret_outline_progress.push(if index == 0 {
                0.0
            } else if index == n + 1 {
                1.0
            } else {
                let cubic_index = (target_index + index - 1) % n;
                positive_modulo(
                    self.cubics[cubic_index].end_outline_progress - cutting_point,
                    1.0,
                )
            });
        }

        let new_features = self
            .features
            .iter()
            .map(|f| ProgressableFeature {
                progress: positive_modulo(f.progress - cutting_point, 1.0),
                feature: f.feature.clone(),
            })
            .collect();
        MeasuredPolygon::new(
            self.measurer.clone(),
            new_features,
            ret_cubics,
            ret_outline_progress,
        )
    }

    /// The measured cubics, covering `[0, 1]` without gaps.
    #[inline]
    pub fn cubics(&self) -> &[MeasuredCubic] {
        &self.cubics
    }

    /// The corner features with their outline progress.
    #[inline]
    pub fn features(&self) -> &[ProgressableFeature] {
        &self.features
    }
}
