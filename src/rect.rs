//! An axis-aligned rectangle.

use std::fmt;

use crate::Point;

/// An axis-aligned rectangle, used for shape bounds.
#[derive(Clone, Copy, Default, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rect {
    /// The minimum x coordinate (left edge).
    pub x0: f64,
    /// The minimum y coordinate (top edge in y-down spaces).
    pub y0: f64,
    /// The maximum x coordinate (right edge).
    pub x1: f64,
    /// The maximum y coordinate (bottom edge in y-down spaces).
    pub y1: f64,
}

impl Rect {
    /// A new rectangle from minimum and maximum coordinates.
    #[inline]
    pub const fn new(x0: f64, y0: f64, x1: f64, y1: f64) -> Rect {
        Rect { x0, y0, x1, y1 }
    }

    /// The rectangle covering the single point `p`.
    #[inline]
    pub fn from_point(p: Point) -> Rect {
        Rect::new(p.x, p.y, p.x, p.y)
    }

    /// The width of the rectangle.
    #[inline]
    pub fn width(&self) -> f64 {
        self.x1 - self.x0
    }

    /// The height of the rectangle.
    #[inline]
    pub fn height(&self) -> f64 {
        self.y1 - self.y0
    }

    /// The center point of the rectangle.
    #[inline]
    pub fn center(&self) -> Point {
        Point::new(0.5 * (self.x0 + self.x1), 0.5 * (self.y0 + self.y1))
    }

    /// The smallest rectangle enclosing both rectangles.
    #[inline]
    pub fn union(&self, other: Rect) -> Rect {
        Rect {
            x0: self.x0.min(other.x0),
            y0: self.y0.min(other.y0),
            x1: self.x1.max(other.x1),
            y1: self.y1.max(other.y1),
        }
    }

    /// Expand the rectangle to contain the point `p`.
    #[inline]
    pub fn union_pt(&self, p: Point) -> Rect {
        Rect {
            x0: self.x0.min(p.x),
            y0: self.y0.min(p.y),
            x1: self.x1.max(p.x),
            y1: self.y1.max(p.y),
        }
    }
}

impl fmt::Display for Rect {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "Rect {{ ({}, {}), ({}, {}) }}",
            self.x0, self.y0, self.x1, self.y1
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn union() {
        let a = Rect::new(0., 0., 1., 1.);
        let b = Rect::new(-1., 2., 0.5, 3.);
        assert_eq!(a.union(b), Rect::new(-1., 0., 1., 3.));
    }

    #[test]
    fn union_pt() {
        let r = Rect::from_point(Point::new(1., 1.));
        let r = r.union_pt(Point::new(-2., 0.));
        let r = r.union_pt(Point::new(0., 4.));
        assert_eq!(r, Rect::new(-2., 0., 1., 4.));
    }
}
