//! A corner rounding request.

/// How much to round, and optionally smooth, a polygon corner.
///
/// `radius` is the requested radius of the circular fillet arc placed
/// tangent to both sides of the corner. `smoothing`, in `[0, 1]`, is the
/// fraction of *additional* side length consumed past the pure arc cut to
/// blend the arc into the sides: at `0.0` the outline goes straight side,
/// circular arc, straight side; at `1.0` the transition curves stretch as
/// far as the side budget allows.
///
/// The requested radius is an upper bound. When the adjacent sides are too
/// short to fit the arcs of both corners, the corners share the side
/// proportionally and the effective radius shrinks.
#[derive(Clone, Copy, Default, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CornerRounding {
    /// Radius of the fillet arc, `>= 0`.
    pub radius: f64,
    /// Fraction of extra side length used for blending, in `[0, 1]`.
    pub smoothing: f64,
}

impl CornerRounding {
    /// No rounding: the corner stays a sharp vertex.
    pub const UNROUNDED: CornerRounding = CornerRounding {
        radius: 0.0,
        smoothing: 0.0,
    };

    /// Rounding by a plain circular arc of the given radius.
    #[inline]
    pub const fn new(radius: f64) -> CornerRounding {
        CornerRounding {
            radius,
            smoothing: 0.0,
        }
    }

    /// Rounding with both an arc radius and a smoothing fraction.
    #[inline]
    pub const fn smoothed(radius: f64, smoothing: f64) -> CornerRounding {
        CornerRounding { radius, smoothing }
    }
}
