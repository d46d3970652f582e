//! Construction and morphing of rounded polygons.
//!
//! This crate builds closed 2D shapes out of polygon vertices with
//! optionally rounded (and smoothed) corners, and morphs between two such
//! shapes: [`Morph`] produces, for any `progress` in `[0, 1]`, an
//! intermediate shape that starts as the first shape and ends as the
//! second. Shapes are emitted as lists of cubic Bézier segments
//! ([`Cubic`]), ready to be handed to whatever rasterizer is at hand.
//!
//! # Examples
//!
//! ```
//! use shapemorph::{CornerRounding, Morph, Point, RoundedPolygon};
//!
//! let hexagon = RoundedPolygon::from_num_vertices(
//!     6,
//!     1.0,
//!     Point::ZERO,
//!     CornerRounding::new(0.2),
//!     None,
//! );
//! let star = RoundedPolygon::star(
//!     6,
//!     1.0,
//!     0.5,
//!     CornerRounding::new(0.1),
//!     None,
//!     None,
//!     Point::ZERO,
//! );
//! let morph = Morph::new(&hexagon, &star);
//!
//! // Sample the outline halfway through the animation. Rendering is the
//! // caller's side of the boundary: move_to the first anchor, then one
//! // curve_to per cubic.
//! let outline = morph.as_cubics(0.5);
//! assert_eq!(outline.last().unwrap().anchor1(), outline[0].anchor0());
//! ```
//!
//! All types are plain immutable values; construction does the work and
//! sampling is pure arithmetic, safe to run concurrently.

#![allow(
    clippy::unreadable_literal,
    clippy::many_single_char_names,
    clippy::excessive_precision
)]

pub mod common;
mod corner_rounding;
mod cubic;
mod double_mapper;
mod feature;
mod feature_mapping;
mod measure;
mod morph;
mod point;
mod rect;
mod rounded_corner;
mod rounded_polygon;
mod shapes;
mod vec2;

pub use crate::corner_rounding::CornerRounding;
pub use crate::cubic::Cubic;
pub use crate::feature::Feature;
pub use crate::morph::Morph;
pub use crate::point::Point;
pub use crate::rect::Rect;
pub use crate::rounded_polygon::RoundedPolygon;
pub use crate::vec2::Vec2;
