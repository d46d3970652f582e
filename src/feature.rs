//! Labeled slices of a shape outline.

use crate::{Cubic, Point};

/// A labeled, contiguous slice of a shape's outline.
///
/// Features drive morph matching: corners of one shape are paired with
/// corners of the other, and the outline in between follows along. Only two
/// kinds exist, so this is a plain tagged sum rather than anything more
/// elaborate.
#[derive(Clone, Debug)]
pub enum Feature {
    /// A straight or curved stretch between corners. Edges are ignored by
    /// the matcher; they merely connect the features around them.
    Edge {
        /// The cubics tracing this stretch of outline.
        cubics: Vec<Cubic>,
    },
    /// A corner of the source polygon, rounded or not.
    Corner {
        /// The cubics tracing the corner (flank, arc, flank when rounded;
        /// a single zero-length cubic when not).
        cubics: Vec<Cubic>,
        /// Whether the outline turns outward here. Corners only match
        /// corners of the same convexity.
        convex: bool,
    },
}

impl Feature {
    /// The cubics tracing this feature, in outline order.
    #[inline]
    pub fn cubics(&self) -> &[Cubic] {
        match self {
            Feature::Edge { cubics } => cubics,
            Feature::Corner { cubics, .. } => cubics,
        }
    }

    /// Whether this is a corner.
    #[inline]
    pub fn is_corner(&self) -> bool {
        matches!(self, Feature::Corner { .. })
    }

    /// Whether this is a convex corner.
    #[inline]
    pub fn is_convex_corner(&self) -> bool {
        matches!(self, Feature::Corner { convex: true, .. })
    }

    /// Whether the matcher skips over this feature.
    #[inline]
    pub fn is_ignorable(&self) -> bool {
        matches!(self, Feature::Edge { .. })
    }

    /// This feature with every cubic passed through `f`.
    pub fn transformed<F: FnMut(Point) -> Point>(&self, f: &mut F) -> Feature {
        match self {
            Feature::Edge { cubics } => Feature::Edge {
                cubics: cubics.iter().map(|c| c.transformed(f)).collect(),
            },
            Feature::Corner { cubics, convex } => Feature::Corner {
                cubics: cubics.iter().map(|c| c.transformed(f)).collect(),
                convex: *convex,
            },
        }
    }
}
