//! Matching corners of one shape to corners of another.

use crate::common::DISTANCE_EPSILON;
use crate::double_mapper::{progress_distance, progress_in_range, DoubleMapper};
use crate::measure::ProgressableFeature;
use crate::{Feature, Point};

/// Build the progress mapping between two outlines from their corner
/// features.
///
/// Corners are paired greedily by proximity, nearest pairs first, subject
/// to the mapping staying a cyclic bijection; edges are ignored and simply
/// follow the corners around them.
pub(crate) fn feature_mapper(
    features1: &[ProgressableFeature],
    features2: &[ProgressableFeature],
) -> DoubleMapper {
    let filtered1: Vec<&ProgressableFeature> =
        features1.iter().filter(|f| f.feature.is_corner()).collect();
    let filtered2: Vec<&ProgressableFeature> =
        features2.iter().filter(|f| f.feature.is_corner()).collect();
    DoubleMapper::new(&do_mapping(&filtered1, &filtered2))
}

/// The anchor pairs of the mapping, in source-progress order.
fn do_mapping(
    features1: &[&ProgressableFeature],
    features2: &[&ProgressableFeature],
) -> Vec<(f64, f64)> {
    let mut distance_vertex_list: Vec<(f64, usize, usize)> = Vec::new();
    for (i, f1) in features1.iter().enumerate() {
        for (j, f2) in features2.iter().enumerate() {
            if let Some(distance) = feature_dist_squared(&f1.feature, &f2.feature) {
                distance_vertex_list.push((distance, i, j));
            }
        }
    }
    distance_vertex_list.sort_by(|a, b| a.0.partial_cmp(&b.0).expect("finite distances"));

    // No pairs at all (e.g. one shape has no corners): identity.
    if distance_vertex_list.is_empty() {
        return vec![(0.0, 0.0), (0.5, 0.5)];
    }
    // A single pair can't define a bijection; add its antipode on both
    // axes so the rest of both outlines rotates along.
    if distance_vertex_list.len() == 1 {
        let (_, i, j) = distance_vertex_list[0];
        let f1 = features1[i].progress;
        let f2 = features2[j].progress;
        return vec![(f1, f2), ((f1 + 0.5) % 1.0, (f2 + 0.5) % 1.0)];
    }

    let mut helper = MappingHelper {
        mapping: Vec::new(),
        used_f1: vec![false; features1.len()],
        used_f2: vec![false; features2.len()],
    };
    for &(_, i, j) in &distance_vertex_list {
        helper.add_mapping(i, features1[i], j, features2[j]);
    }
    helper.mapping
}

/// Squared distance between the features' representative points, or `None`
/// when the features must not match (differing convexity).
fn feature_dist_squared(f1: &Feature, f2: &Feature) -> Option<f64> {
    if let (Feature::Corner { convex: c1, .. }, Feature::Corner { convex: c2, .. }) = (f1, f2) {
        // Never map convex onto concave; a morph through that pairing
        // turns the outline inside out locally.
        if c1 != c2 {
            return None;
        }
    }
    Some(feature_representative_point(f1).distance_squared(feature_representative_point(f2)))
}

/// A stand-in position for a feature: the midpoint of its outer anchors.
fn feature_representative_point(feature: &Feature) -> Point {
    let cubics = feature.cubics();
    cubics[0]
        .anchor0()
        .midpoint(cubics[cubics.len() - 1].anchor1())
}

struct MappingHelper {
    /// Accepted `(source, target)` progress pairs, sorted by source.
    mapping: Vec<(f64, f64)>,
    used_f1: Vec<bool>,
    used_f2: Vec<bool>,
}

impl MappingHelper {
    fn add_mapping(
        &mut self,
        i: usize,
        f1: &ProgressableFeature,
        j: usize,
        f2: &ProgressableFeature,
    ) {
        // Each feature maps at most once.
        if self.used_f1[i] || self.used_f2[j] {
            return;
        }
        let insertion_index = match self
            .mapping
            .binary_search_by(|probe| probe.0.partial_cmp(&f1.progress).expect("finite progress"))
        {
            // Two features can't share a progress value.
            Ok(_) => return,
            Err(index) => index,
        };
        let n = self.mapping.len();
        if n >= 1 {
            let (before1, before2) = self.mapping[(insertion_index + n - 1) % n];
            let (after1, after2) = self.mapping[insertion_index % n];
            // Mapped features too close to an existing mapping pinch the
            // interpolation between them.
            if progress_distance(f1.progress, before1) < DISTANCE_EPSILON
                || progress_distance(f1.progress, after1) < DISTANCE_EPSILON
                || progress_distance(f2.progress, before2) < DISTANCE_EPSILON
                || progress_distance(f2.progress, after2) < DISTANCE_EPSILON
            {
                return;
            }
            // With two or more mappings, the new target progress must land
            // between its cyclic neighbors' targets, or the bijection would
            // cross itself.
            if n > 1 && !progress_in_range(f2.progress, before2, after2) {
                return;
            }
        }
        self.mapping.insert(insertion_index, (f1.progress, f2.progress));
        self.used_f1[i] = true;
        self.used_f2[j] = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Cubic;

    fn corner_at(progress: f64, x: f64, y: f64, convex: bool) -> ProgressableFeature {
        ProgressableFeature {
            progress,
            feature: Feature::Corner {
                cubics: vec![Cubic::empty(Point::new(x, y))],
                convex,
            },
        }
    }

    #[test]
    fn matched_corners_map_exactly() {
        // Same four corners at the same progresses: every pair at distance
        // zero maps to itself.
        let features: Vec<ProgressableFeature> = (0..4)
            .map(|i| {
                let th = std::f64::consts::PI / 2.0 * i as f64;
                corner_at(i as f64 * 0.25, th.cos(), th.sin(), true)
            })
            .collect();
        let refs1: Vec<&ProgressableFeature> = features.iter().collect();
        let mapping = do_mapping(&refs1, &refs1);
        assert_eq!(mapping.len(), 4);
        for &(a, b) in &mapping {
            assert!((a - b).abs() < 1e-12);
        }
    }

    #[test]
    fn single_pair_gets_antipode() {
        let f1 = [corner_at(0.25, 1.0, 0.0, true)];
        let f2 = [corner_at(0.5, 0.0, 1.0, true)];
        let refs1: Vec<&ProgressableFeature> = f1.iter().collect();
        let refs2: Vec<&ProgressableFeature> = f2.iter().collect();
        let mapping = do_mapping(&refs1, &refs2);
        assert_eq!(mapping.len(), 2);
        assert_eq!(mapping[0], (0.25, 0.5));
        assert_eq!(mapping[1], (0.75, 0.0));
    }

    #[test]
    fn no_corners_yields_identity() {
        let mapping = do_mapping(&[], &[]);
        assert_eq!(mapping, vec![(0.0, 0.0), (0.5, 0.5)]);
    }

    #[test]
    fn convexity_gate() {
        // The concave corner of shape 2 sits exactly on shape 1's convex
        // corner, but may not match it.
        let f1 = [
            corner_at(0.0, 1.0, 0.0, true),
            corner_at(0.5, -1.0, 0.0, true),
        ];
        let f2 = [
            corner_at(0.1, 1.0, 0.0, false),
            corner_at(0.3, 1.0, 0.1, true),
            corner_at(0.6, -1.0, 0.0, true),
        ];
        let refs1: Vec<&ProgressableFeature> = f1.iter().collect();
        let refs2: Vec<&ProgressableFeature> = f2.iter().collect();
        let mapping = do_mapping(&refs1, &refs2);
        // Convex corners matched convex corners; the concave one was left
        // out.
        assert_eq!(mapping, vec![(0.0, 0.3), (0.5, 0.6)]);
    }

    #[test]
    fn mapping_stays_cyclically_monotone() {
        // Shape 2's corners are rotated an eighth turn; greedy matching
        // must still produce a cyclically increasing mapping.
        let f1: Vec<ProgressableFeature> = (0..4)
            .map(|i| {
                let th = std::f64::consts::PI / 2.0 * i as f64;
                corner_at(i as f64 * 0.25, th.cos(), th.sin(), true)
            })
            .collect();
        let f2: Vec<ProgressableFeature> = (0..4)
            .map(|i| {
                let th = std::f64::consts::PI / 2.0 * i as f64 + std::f64::consts::PI / 4.0;
                corner_at(
                    (i as f64 * 0.25 + 0.125) % 1.0,
                    th.cos(),
                    th.sin(),
                    true,
                )
            })
            .collect();
        let refs1: Vec<&ProgressableFeature> = f1.iter().collect();
        let refs2: Vec<&ProgressableFeature> = f2.iter().collect();
        let mapping = do_mapping(&refs1, &refs2);
        assert!(mapping.len() >= 2);
        // Sorted by source; targets must wrap at most once.
        let mut wraps = 0;
        for k in 0..mapping.len() {
            assert!(mapping[k].0 < mapping[(k + 1) % mapping.len()].0 || k == mapping.len() - 1);
            if mapping[(k + 1) % mapping.len()].1 < mapping[k].1 {
                wraps += 1;
            }
        }
        assert!(wraps <= 1, "targets wrapped {} times", wraps);
        // The full mapper accepts it (validated on construction).
        let _ = feature_mapper(&f1, &f2);
    }
}
