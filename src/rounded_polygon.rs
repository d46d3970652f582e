//! A closed shape built from polygon vertices with rounded corners.

use crate::rounded_corner::RoundedCorner;
use crate::{CornerRounding, Cubic, Feature, Point, Rect};

/// A closed shape: polygon vertices, per-corner rounding, and the cubic
/// Bézier outline derived from them.
///
/// The outline is a list of [`Cubic`]s forming an exactly closed loop, plus
/// the [`Feature`] list that labels which stretches of it are corners and
/// which are edges. Features drive morphing; the flat cubic list is what a
/// rasterizer consumes.
///
/// Instances are immutable; all methods that "change" a polygon return a
/// new one.
#[derive(Clone, Debug)]
pub struct RoundedPolygon {
    features: Vec<Feature>,
    center: Point,
    cubics: Vec<Cubic>,
}

impl RoundedPolygon {
    /// A polygon from a flat coordinate list `[x0, y0, x1, y1, …]` with the
    /// same rounding at every vertex.
    ///
    /// Vertices must describe a simple (non self-intersecting) closed
    /// polygon, in order.
    ///
    /// # Panics
    ///
    /// If fewer than three vertices are given or the coordinate count is
    /// odd.
    pub fn from_vertices(vertices: &[f64], rounding: CornerRounding) -> RoundedPolygon {
        Self::from_vertices_full(vertices, rounding, None, None)
    }

    /// A polygon from a flat coordinate list, with every option spelled
    /// out.
    ///
    /// `per_vertex_rounding`, when given, must have one entry per vertex
    /// and overrides `rounding` wholesale. `center` overrides the centroid
    /// (useful when the visual center of an asymmetric shape is known).
    ///
    /// # Panics
    ///
    /// If fewer than three vertices are given, the coordinate count is odd,
    /// or `per_vertex_rounding` has the wrong length.
    pub fn from_vertices_full(
        vertices: &[f64],
        rounding: CornerRounding,
        per_vertex_rounding: Option<&[CornerRounding]>,
        center: Option<Point>,
    ) -> RoundedPolygon {
        assert!(
            vertices.len() >= 6,
            "polygons must have at least 3 vertices"
        );
        assert!(
            vertices.len() % 2 == 0,
            "vertex coordinates must come in (x, y) pairs"
        );
        let n = vertices.len() / 2;
        if let Some(pvr) = per_vertex_rounding {
            assert!(
                pvr.len() == n,
                "per-vertex rounding must have one entry per vertex"
            );
        }
        let vertex = |i: usize| Point::new(vertices[i * 2], vertices[i * 2 + 1]);

        let rounded_corners: Vec<RoundedCorner> = (0..n)
            .map(|i| {
                RoundedCorner::new(
                    vertex((i + n - 1) % n),
                    vertex(i),
                    vertex((i + 1) % n),
                    per_vertex_rounding.map_or(rounding, |pvr| pvr[i]),
                )
            })
            .collect();

        // Budget arbitration per side: the two corners on side i together
        // want `expected_cut`, but the side may be shorter. The round cut
        // (the arc itself) has priority; smoothing only gets what is left.
        // Each entry is (round cut ratio, smoothing ratio), both in [0, 1].
        let cut_adjusts: Vec<(f64, f64)> = (0..n)
            .map(|i| {
                let j = (i + 1) % n;
                let expected_round_cut =
                    rounded_corners[i].expected_round_cut + rounded_corners[j].expected_round_cut;
                let expected_cut =
                    rounded_corners[i].expected_cut() + rounded_corners[j].expected_cut();
                let side_size = vertex(i).distance(vertex(j));
                if expected_round_cut > side_size {
                    (side_size / expected_round_cut, 0.0)
                } else if expected_cut > side_size {
                    (
                        1.0,
                        (side_size - expected_round_cut) / (expected_cut - expected_round_cut),
                    )
                } else {
                    (1.0, 1.0)
                }
            })
            .collect();

        // Each corner gets an allowed cut per incident side, scaled by that
        // side's ratios, and produces its cubics within the allowance.
        let corners: Vec<Vec<Cubic>> = (0..n)
            .map(|i| {
                let mut allowed_cuts = [0.0; 2];
                for (delta, allowed) in allowed_cuts.iter_mut().enumerate() {
                    let (round_ratio, smooth_ratio) = cut_adjusts[(i + n - 1 + delta) % n];
                    *allowed = rounded_corners[i].expected_round_cut * round_ratio
                        + (rounded_corners[i].expected_cut()
                            - rounded_corners[i].expected_round_cut)
                            * smooth_ratio;
                }
                rounded_corners[i]
                    .cubics(allowed_cuts[0], allowed_cuts[1])
                    .to_vec()
            })
            .collect();

        let mut features = Vec::with_capacity(n * 2);
        for i in 0..n {
            let prev = vertex((i + n - 1) % n);
            let curr = vertex(i);
            let next = vertex((i + 1) % n);
            let convex = (curr - prev).clockwise(next - curr);
            features.push(Feature::Corner {
                cubics: corners[i].clone(),
                convex,
            });
            let edge_start = corners[i].last().expect("corner cubics nonempty").anchor1();
            let edge_end = corners[(i + 1) % n][0].anchor0();
            features.push(Feature::Edge {
                cubics: vec![Cubic::straight_line(edge_start, edge_end)],
            });
        }

        let center = center.unwrap_or_else(|| calculate_center(vertices));
        RoundedPolygon::from_features(features, center)
    }

    /// Flatten a feature list into the closed outline and wrap it all up.
    ///
    /// The feature list is expected to start with a corner (the vertex
    /// builder guarantees this).
    pub(crate) fn from_features(features: Vec<Feature>, center: Point) -> RoundedPolygon {
        // Start the outline in the middle of the first corner rather than
        // at its edge: the cyclic seam then falls inside a flat stretch,
        // where later cut-and-align steps do the least visual damage.
        let mut first_feature_split_start: Option<[Cubic; 2]> = None;
        let mut first_feature_split_end: Option<[Cubic; 2]> = None;
        if let Some(first) = features.first() {
            if first.cubics().len() == 3 {
                let center_cubic = first.cubics()[1];
                let (start, end) = center_cubic.split(0.5);
                first_feature_split_start = Some([first.cubics()[0], start]);
                first_feature_split_end = Some([end, first.cubics()[2]]);
            }
        }

        // The buffered first/last pair below lets the loop patch anchors of
        // already-seen cubics and lets the tail be rewritten to land
        // exactly on the outline start.
        let mut cubics = Vec::new();
        let mut first_cubic: Option<Cubic> = None;
        let mut last_cubic: Option<Cubic> = None;
        for i in 0..=features.len() {
            let feature_cubics: &[Cubic] = if i == 0 && first_feature_split_end.is_some() {
                first_feature_split_end.as_ref().unwrap()
            } else if i == features.len() {
                match first_feature_split_start.as_ref() {
                    Some(split_start) => split_start,
                    None => break,
                }
            } else {
                features[i].cubics()
            };
            for &cubic in feature_cubics {
                if !cubic.zero_length() {
                    if let Some(last) = last_cubic {
                        cubics.push(last);
                    }
                    last_cubic = Some(cubic);
                    if first_cubic.is_none() {
                        first_cubic = Some(cubic);
                    }
                } else if let Some(last) = last_cubic.as_mut() {
                    // A dropped zero-length cubic still moves the anchor a
                    // hair; fold that into the previous cubic so the
                    // outline never drifts open.
                    last.0[6] = cubic.0[6];
                    last.0[7] = cubic.0[7];
                }
            }
        }
        match (last_cubic, first_cubic) {
            (Some(last), Some(first)) => {
                // Closing cubic: the last curve, with its end snapped onto
                // the exact outline start.
                cubics.push(Cubic::new(
                    last.anchor0(),
                    last.control0(),
                    last.control1(),
                    first.anchor0(),
                ));
            }
            // Degenerate shape (everything zero-length): a point at the
            // center.
            _ => cubics.push(Cubic::empty(center)),
        }

        RoundedPolygon {
            features,
            center,
            cubics,
        }
    }

    /// The feature list labeling the outline.
    #[inline]
    pub fn features(&self) -> &[Feature] {
        &self.features
    }

    /// The closed outline, ready for rasterization.
    ///
    /// The last cubic's end anchor equals the first cubic's start anchor
    /// exactly.
    #[inline]
    pub fn cubics(&self) -> &[Cubic] {
        &self.cubics
    }

    /// The center of the shape.
    #[inline]
    pub fn center(&self) -> Point {
        self.center
    }

    /// This polygon with every point passed through `f`.
    pub fn transformed<F: FnMut(Point) -> Point>(&self, mut f: F) -> RoundedPolygon {
        let center = f(self.center);
        RoundedPolygon {
            features: self
                .features
                .iter()
                .map(|feature| feature.transformed(&mut f))
                .collect(),
            center,
            cubics: self.cubics.iter().map(|c| c.transformed(&mut f)).collect(),
        }
    }

    /// This polygon scaled and translated into the `[0, 1] × [0, 1]`
    /// square, preserving aspect ratio and centering the short dimension.
    pub fn normalized(&self) -> RoundedPolygon {
        let bounds = self.calculate_bounds(true);
        let width = bounds.width();
        let height = bounds.height();
        let side = width.max(height);
        // Center the shape in the box along its smaller dimension.
        let offset_x = (side - width) / 2.0 - bounds.x0;
        let offset_y = (side - height) / 2.0 - bounds.y0;
        self.transformed(|p| Point::new((p.x + offset_x) / side, (p.y + offset_y) / side))
    }

    /// The bounding box of the outline.
    ///
    /// With `approximate` (the cheap default for animation), control points
    /// count as if on-curve, giving a box that may be slightly loose but
    /// never too small.
    pub fn calculate_bounds(&self, approximate: bool) -> Rect {
        let mut iter = self.cubics.iter();
        let first = iter.next().expect("outline is never empty");
        let mut bounds = first.calculate_bounds(approximate);
        for cubic in iter {
            bounds = bounds.union(cubic.calculate_bounds(approximate));
        }
        bounds
    }

    /// The square around [`center`](Self::center) whose half-side is the
    /// maximum distance from the center to the outline.
    ///
    /// Unlike [`calculate_bounds`](Self::calculate_bounds), this is stable
    /// under rotation of the shape about its center, which makes it the
    /// right box to size rotating-shape containers with.
    pub fn calculate_max_bounds(&self) -> Rect {
        let mut max_dist_squared: f64 = 0.0;
        for cubic in &self.cubics {
            let anchor_distance = cubic.anchor0().distance_squared(self.center);
            let middle_distance = cubic.eval(0.5).distance_squared(self.center);
            max_dist_squared = max_dist_squared.max(anchor_distance.max(middle_distance));
        }
        let distance = max_dist_squared.sqrt();
        Rect::new(
            self.center.x - distance,
            self.center.y - distance,
            self.center.x + distance,
            self.center.y + distance,
        )
    }
}

/// The centroid of a flat vertex coordinate list.
fn calculate_center(vertices: &[f64]) -> Point {
    let mut cumulative_x = 0.0;
    let mut cumulative_y = 0.0;
    let mut index = 0;
    while index < vertices.len() {
        cumulative_x += vertices[index];
        cumulative_y += vertices[index + 1];
        index += 2;
    }
    let n = (vertices.len() / 2) as f64;
    Point::new(cumulative_x / n, cumulative_y / n)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::DISTANCE_EPSILON;

    fn assert_closed_and_continuous(polygon: &RoundedPolygon) {
        let cubics = polygon.cubics();
        assert!(!cubics.is_empty());
        assert_eq!(
            cubics[cubics.len() - 1].anchor1(),
            cubics[0].anchor0(),
            "outline must close exactly"
        );
        for pair in cubics.windows(2) {
            assert!(
                pair[0].anchor1().distance(pair[1].anchor0()) < DISTANCE_EPSILON,
                "consecutive cubics must share endpoints"
            );
        }
    }

    #[test]
    #[should_panic(expected = "at least 3 vertices")]
    fn too_few_vertices() {
        let _ = RoundedPolygon::from_vertices(&[0., 0., 1., 0.], CornerRounding::UNROUNDED);
    }

    #[test]
    fn unrounded_triangle() {
        let polygon = RoundedPolygon::from_vertices(
            &[0., 0., 10., 0., 5., 10.],
            CornerRounding::UNROUNDED,
        );
        assert_closed_and_continuous(&polygon);
        // Three corner features and three edges, in alternation.
        assert_eq!(polygon.features().len(), 6);
        assert!(polygon.features()[0].is_corner());
        assert!(polygon.features()[1].is_ignorable());
        // The centroid.
        assert!(polygon.center().distance(Point::new(5., 10. / 3.)) < 1e-9);
    }

    #[test]
    fn rounded_square_bounds() {
        let polygon = RoundedPolygon::from_vertices(
            &[1., 1., -1., 1., -1., -1., 1., -1.],
            CornerRounding::new(0.2),
        );
        assert_closed_and_continuous(&polygon);
        let bounds = polygon.calculate_bounds(false);
        assert!((bounds.x0 + 1.0).abs() < 1e-6);
        assert!((bounds.y0 + 1.0).abs() < 1e-6);
        assert!((bounds.x1 - 1.0).abs() < 1e-6);
        assert!((bounds.y1 - 1.0).abs() < 1e-6);
        let max_bounds = polygon.calculate_max_bounds();
        // Max bounds are center +/- corner distance, which exceeds the
        // regular bounds of the rounded shape.
        assert!(max_bounds.width() > bounds.width());
        assert!((max_bounds.center().x - polygon.center().x).abs() < 1e-12);
    }

    #[test]
    fn tight_side_budget_splits_sides_evenly() {
        // Rounding radius far larger than the sides can fit: each corner
        // gets exactly half of each side, and everything stays finite.
        let side = 10.0;
        let h = side * 3f64.sqrt() / 2.0;
        let polygon = RoundedPolygon::from_vertices(
            &[0., 0., side, 0., side / 2.0, h],
            CornerRounding::new(100.0),
        );
        assert_closed_and_continuous(&polygon);
        for cubic in polygon.cubics() {
            for c in cubic.coords() {
                assert!(c.is_finite());
            }
        }
        // The arc of the corner at the origin starts where the cut ends:
        // halfway up the left side and halfway along the bottom side.
        let corner = &polygon.features()[0];
        assert_eq!(corner.cubics().len(), 3);
        let arc = corner.cubics()[1];
        let on_side = |p: Point| {
            p.distance(Point::new(side / 4.0, h / 2.0)) < 1e-6
                || p.distance(Point::new(side / 2.0, 0.)) < 1e-6
        };
        assert!(on_side(arc.anchor0()), "{:?}", arc.anchor0());
        assert!(on_side(arc.anchor1()), "{:?}", arc.anchor1());
    }

    #[test]
    fn zero_length_cubics_are_elided_but_kept_in_features() {
        let polygon = RoundedPolygon::from_vertices(
            &[0., 0., 10., 0., 5., 10.],
            CornerRounding::UNROUNDED,
        );
        // Unrounded corners keep their zero-length cubic in the feature...
        assert!(polygon.features()[0].cubics()[0].zero_length());
        // ...but the flattened outline has none.
        for cubic in polygon.cubics() {
            assert!(!cubic.zero_length());
        }
    }

    #[test]
    fn per_vertex_rounding_applies_per_corner() {
        let rounded = CornerRounding::new(0.5);
        let polygon = RoundedPolygon::from_vertices_full(
            &[1., 1., -1., 1., -1., -1., 1., -1.],
            CornerRounding::UNROUNDED,
            Some(&[rounded, CornerRounding::UNROUNDED, rounded, CornerRounding::UNROUNDED]),
            None,
        );
        assert_closed_and_continuous(&polygon);
        let corners: Vec<_> = polygon.features().iter().filter(|f| f.is_corner()).collect();
        assert_eq!(corners[0].cubics().len(), 3);
        assert_eq!(corners[1].cubics().len(), 1);
        assert_eq!(corners[2].cubics().len(), 3);
        assert_eq!(corners[3].cubics().len(), 1);
    }

    #[test]
    fn transformed_moves_everything() {
        let polygon = RoundedPolygon::from_vertices(
            &[0., 0., 10., 0., 5., 10.],
            CornerRounding::new(1.0),
        );
        let moved = polygon.transformed(|p| Point::new(p.x + 100.0, p.y - 3.0));
        assert_closed_and_continuous(&moved);
        assert_eq!(
            moved.center(),
            Point::new(polygon.center().x + 100.0, polygon.center().y - 3.0)
        );
        for (a, b) in polygon.cubics().iter().zip(moved.cubics()) {
            assert!((a.anchor0().x + 100.0 - b.anchor0().x).abs() < 1e-12);
            assert!((a.anchor0().y - 3.0 - b.anchor0().y).abs() < 1e-12);
        }
    }

    #[test]
    fn normalized_fits_unit_square() {
        let polygon = RoundedPolygon::from_vertices(
            &[0., 0., 400., 0., 200., 100.],
            CornerRounding::new(20.0),
        );
        let normalized = polygon.normalized();
        let bounds = normalized.calculate_bounds(true);
        assert!(bounds.x0 >= -1e-9 && bounds.y0 >= -1e-9);
        assert!(bounds.x1 <= 1.0 + 1e-9 && bounds.y1 <= 1.0 + 1e-9);
        assert!((bounds.width().max(bounds.height()) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn convexity_flags() {
        // A dart: three convex corners and one concave one at (2, 0).
        let polygon = RoundedPolygon::from_vertices(
            &[0., 0., 10., -5., 2., 0., 10., 5.],
            CornerRounding::UNROUNDED,
        );
        let flags: Vec<bool> = polygon
            .features()
            .iter()
            .filter_map(|f| match f {
                Feature::Corner { convex, .. } => Some(*convex),
                _ => None,
            })
            .collect();
        assert_eq!(flags.iter().filter(|c| !**c).count(), 1);
    }
}
