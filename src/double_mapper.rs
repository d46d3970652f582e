//! A piecewise-linear, cyclic, order-preserving bijection of `[0, 1)`.

use crate::common::{positive_modulo, DISTANCE_EPSILON};

/// Maps outline progress on one closed shape to outline progress on
/// another, both ways.
///
/// Defined by anchor pairs `(a, b)`: `a` maps to `b`, and progress between
/// two anchors maps linearly between their images, wrapping around 1. The
/// anchors must be cyclically order-preserving on both axes, which makes
/// the map a bijection of the circle.
pub(crate) struct DoubleMapper {
    source_values: Vec<f64>,
    target_values: Vec<f64>,
}

impl DoubleMapper {
    /// A mapper from anchor pairs.
    ///
    /// # Panics
    ///
    /// If either axis has values outside `[0, 1]`, repeats (closer than
    /// [`DISTANCE_EPSILON`] on the circle), or wraps around more than once
    /// (i.e. is not in cyclic order).
    pub fn new(mappings: &[(f64, f64)]) -> DoubleMapper {
        let source_values: Vec<f64> = mappings.iter().map(|m| m.0).collect();
        let target_values: Vec<f64> = mappings.iter().map(|m| m.1).collect();
        validate_progress(&source_values);
        validate_progress(&target_values);
        DoubleMapper {
            source_values,
            target_values,
        }
    }

    /// The identity mapping (two anchors, so segment lookup always works).
    pub fn identity() -> DoubleMapper {
        DoubleMapper::new(&[(0.0, 0.0), (0.5, 0.5)])
    }

    /// Map progress on the source shape to progress on the target shape.
    pub fn map(&self, x: f64) -> f64 {
        linear_map(&self.source_values, &self.target_values, x)
    }

    /// Map progress on the target shape back to the source shape.
    pub fn map_back(&self, x: f64) -> f64 {
        linear_map(&self.target_values, &self.source_values, x)
    }
}

/// Whether `progress` lies in the cyclic interval from `from` to `to`.
///
/// When `to < from` the interval wraps through 1.
#[inline]
pub(crate) fn progress_in_range(progress: f64, from: f64, to: f64) -> bool {
    if to >= from {
        (from..=to).contains(&progress)
    } else {
        progress >= from || progress <= to
    }
}

/// Distance between two progress values on the circle of circumference 1.
#[inline]
pub(crate) fn progress_distance(p1: f64, p2: f64) -> f64 {
    let d = (p1 - p2).abs();
    d.min(1.0 - d)
}

fn validate_progress(p: &[f64]) {
    assert!(!p.is_empty(), "mapper needs at least one anchor");
    let mut prev = p[p.len() - 1];
    let mut wraps = 0;
    for &curr in p {
        assert!(
            (0.0..=1.0).contains(&curr),
            "progress outside the unit interval: {curr}"
        );
        assert!(
            progress_distance(curr, prev) > DISTANCE_EPSILON,
            "progress repeats a value: {curr}"
        );
        if curr < prev {
            wraps += 1;
            assert!(wraps <= 1, "progress wraps more than once");
        }
        prev = curr;
    }
}

/// Map `x` through the piecewise-linear function given by corresponding
/// cyclic anchor lists.
fn linear_map(x_values: &[f64], y_values: &[f64], x: f64) -> f64 {
    assert!((0.0..=1.0).contains(&x), "invalid progress: {x}");
    let segment_start_index = (0..x_values.len())
        .find(|&i| progress_in_range(x, x_values[i], x_values[(i + 1) % x_values.len()]))
        .expect("progress lies in no mapping segment");
    let segment_end_index = (segment_start_index + 1) % x_values.len();
    let segment_size_x = positive_modulo(
        x_values[segment_end_index] - x_values[segment_start_index],
        1.0,
    );
    let segment_size_y = positive_modulo(
        y_values[segment_end_index] - y_values[segment_start_index],
        1.0,
    );
    let position_in_segment = if segment_size_x < 0.001 {
        // Collapsed segment; everything in it maps to the middle of the
        // image segment.
        0.5
    } else {
        positive_modulo(x - x_values[segment_start_index], 1.0) / segment_size_x
    };
    positive_modulo(
        y_values[segment_start_index] + segment_size_y * position_in_segment,
        1.0,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_maps_to_self() {
        let mapper = DoubleMapper::identity();
        for i in 0..20 {
            let x = i as f64 / 20.0;
            assert!((mapper.map(x) - x).abs() < 1e-12);
            assert!((mapper.map_back(x) - x).abs() < 1e-12);
        }
    }

    #[test]
    fn two_anchor_mapping() {
        let mapper = DoubleMapper::new(&[(0.1, 0.4), (0.6, 0.9)]);
        assert!((mapper.map(0.35) - 0.65).abs() < 1e-12);
        assert!((mapper.map_back(0.65) - 0.35).abs() < 1e-12);
        // The wrap segment runs from 0.6 to 0.1+1, mapping onto 0.9 to
        // 0.4+1.
        assert!((mapper.map(0.95) - 0.25).abs() < 1e-12);
        assert!((mapper.map_back(0.25) - 0.95).abs() < 1e-12);
    }

    #[test]
    fn map_and_back_roundtrip() {
        let mapper = DoubleMapper::new(&[(0.0, 0.3), (0.2, 0.4), (0.7, 0.9)]);
        for i in 0..100 {
            let x = i as f64 / 100.0;
            let roundtrip = mapper.map_back(mapper.map(x));
            assert!(
                progress_distance(roundtrip, x) < 1e-9,
                "roundtrip {} -> {}",
                x,
                roundtrip
            );
        }
    }

    #[test]
    #[should_panic(expected = "wraps more than once")]
    fn non_monotone_anchors_rejected() {
        let _ = DoubleMapper::new(&[(0.0, 0.0), (0.5, 0.8), (0.7, 0.4)]);
    }

    #[test]
    #[should_panic(expected = "repeats a value")]
    fn repeated_anchor_rejected() {
        let _ = DoubleMapper::new(&[(0.0, 0.0), (0.5, 0.5), (0.5, 0.7)]);
    }

    #[test]
    fn progress_helpers() {
        assert!(progress_in_range(0.5, 0.2, 0.8));
        assert!(!progress_in_range(0.1, 0.2, 0.8));
        // Wrapping interval.
        assert!(progress_in_range(0.9, 0.8, 0.2));
        assert!(progress_in_range(0.1, 0.8, 0.2));
        assert!(!progress_in_range(0.5, 0.8, 0.2));

        assert!((progress_distance(0.1, 0.9) - 0.2).abs() < 1e-12);
        assert!((progress_distance(0.4, 0.6) - 0.2).abs() < 1e-12);
    }
}
