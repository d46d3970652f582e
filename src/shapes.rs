//! Canned [`RoundedPolygon`] constructors.

use std::f64::consts::PI;

use crate::{CornerRounding, Point, RoundedPolygon, Vec2};

impl RoundedPolygon {
    /// A regular polygon with `num_vertices` vertices on a circle of
    /// `radius` around `center`, the first vertex on the positive x axis.
    ///
    /// # Panics
    ///
    /// If `num_vertices < 3`.
    pub fn from_num_vertices(
        num_vertices: usize,
        radius: f64,
        center: Point,
        rounding: CornerRounding,
        per_vertex_rounding: Option<&[CornerRounding]>,
    ) -> RoundedPolygon {
        RoundedPolygon::from_vertices_full(
            &vertices_from_num_verts(num_vertices, radius, center),
            rounding,
            per_vertex_rounding,
            Some(center),
        )
    }

    /// A shape approximating a circle of the given radius.
    ///
    /// The underlying polygon's vertices sit at `radius / cos(π/n)` so that
    /// corner rounding by `radius` brings the outline onto the circle: the
    /// rounding arcs of adjacent corners meet at the side midpoints.
    ///
    /// More vertices give a closer approximation; the default of eight in
    /// [`Morph`](crate::Morph)-heavy code keeps a circle morphable against
    /// typical polygons without extra cutting.
    ///
    /// # Panics
    ///
    /// If `num_vertices < 3` or `radius <= 0`.
    pub fn circle(num_vertices: usize, radius: f64, center: Point) -> RoundedPolygon {
        assert!(radius > 0.0, "radius must be positive");
        // Half the angle between adjacent vertices.
        let theta = PI / num_vertices as f64;
        let polygon_radius = radius / theta.cos();
        RoundedPolygon::from_num_vertices(
            num_vertices,
            polygon_radius,
            center,
            CornerRounding::new(radius),
            None,
        )
    }

    /// An axis-aligned rectangle of the given size around `center`.
    pub fn rectangle(
        width: f64,
        height: f64,
        rounding: CornerRounding,
        per_vertex_rounding: Option<&[CornerRounding]>,
        center: Point,
    ) -> RoundedPolygon {
        let left = center.x - width / 2.0;
        let top = center.y - height / 2.0;
        let right = center.x + width / 2.0;
        let bottom = center.y + height / 2.0;
        RoundedPolygon::from_vertices_full(
            &[right, bottom, left, bottom, left, top, right, top],
            rounding,
            per_vertex_rounding,
            Some(center),
        )
    }

    /// A star with `num_vertices_per_radius` points, alternating between
    /// `radius` and `inner_radius`.
    ///
    /// `inner_rounding`, when given without `per_vertex_rounding`, applies
    /// to the inner (concave) corners while `rounding` applies to the outer
    /// points.
    ///
    /// # Panics
    ///
    /// If `radius <= 0` or `inner_radius` is not in `(0, radius)`.
    pub fn star(
        num_vertices_per_radius: usize,
        radius: f64,
        inner_radius: f64,
        rounding: CornerRounding,
        inner_rounding: Option<CornerRounding>,
        per_vertex_rounding: Option<&[CornerRounding]>,
        center: Point,
    ) -> RoundedPolygon {
        assert!(radius > 0.0, "radius must be positive");
        assert!(
            inner_radius > 0.0 && inner_radius < radius,
            "inner radius must be in (0, radius)"
        );
        // With no explicit per-vertex list, an inner rounding request turns
        // into an alternating outer/inner list matching the vertices.
        let alternating: Option<Vec<CornerRounding>> = match (per_vertex_rounding, inner_rounding) {
            (None, Some(inner)) => Some(
                (0..num_vertices_per_radius)
                    .flat_map(|_| [rounding, inner])
                    .collect(),
            ),
            _ => None,
        };
        let per_vertex = per_vertex_rounding.or(alternating.as_deref());
        RoundedPolygon::from_vertices_full(
            &star_vertices_from_num_verts(num_vertices_per_radius, radius, inner_radius, center),
            rounding,
            per_vertex,
            Some(center),
        )
    }

    /// A pill: a rectangle whose shorter dimension is fully rounded.
    pub fn pill(width: f64, height: f64, smoothing: f64, center: Point) -> RoundedPolygon {
        assert!(
            width > 0.0 && height > 0.0,
            "pill dimensions must be positive"
        );
        let w_half = width / 2.0;
        let h_half = height / 2.0;
        RoundedPolygon::from_vertices_full(
            &[
                w_half + center.x,
                h_half + center.y,
                -w_half + center.x,
                h_half + center.y,
                -w_half + center.x,
                -h_half + center.y,
                w_half + center.x,
                -h_half + center.y,
            ],
            CornerRounding::smoothed(w_half.min(h_half), smoothing),
            None,
            Some(center),
        )
    }
}

fn vertices_from_num_verts(num_vertices: usize, radius: f64, center: Point) -> Vec<f64> {
    let mut result = Vec::with_capacity(num_vertices * 2);
    for i in 0..num_vertices {
        let vertex = center + Vec2::from_angle(PI / num_vertices as f64 * 2.0 * i as f64) * radius;
        result.push(vertex.x);
        result.push(vertex.y);
    }
    result
}

fn star_vertices_from_num_verts(
    num_vertices_per_radius: usize,
    radius: f64,
    inner_radius: f64,
    center: Point,
) -> Vec<f64> {
    let per_outer = PI / num_vertices_per_radius as f64;
    let mut result = Vec::with_capacity(num_vertices_per_radius * 4);
    for i in 0..num_vertices_per_radius {
        let vertex = center + Vec2::from_angle(per_outer * 2.0 * i as f64) * radius;
        result.push(vertex.x);
        result.push(vertex.y);
        let vertex = center + Vec2::from_angle(per_outer * (2.0 * i as f64 + 1.0)) * inner_radius;
        result.push(vertex.x);
        result.push(vertex.y);
    }
    result
}
