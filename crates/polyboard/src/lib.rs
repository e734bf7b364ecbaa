//! Polygon transforms and board coverage for a piece-packing puzzle.
//!
//! Layout
//! - `geom`: quadrant-one `Polygon` (rotate, flip, centroid, shoelace area)
//!   and `Placed` instances (board/piece = shape + integer position).
//! - `clip`: the `Intersector` seam over the external clipping engine.
//! - `coverage`: `Level::completion_percentage`, pairwise overlap correction.
//! - `random`: reproducible convex polygons for tests, benches and the CLI.
//!
//! All operations are synchronous and pure apart from in-place `rotate`/`flip`
//! and `Placed::move_by`.

pub mod clip;
pub mod coverage;
pub mod geom;
pub mod random;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use clip::{Contour, Intersector, OverlayIntersector};
pub use coverage::Level;
pub use geom::{Board, GeometryError, Piece, Placed, Polygon, Shape};
pub use nalgebra::Vector2 as Vec2;

/// Common exports for quick imports in callers.
pub mod prelude {
    pub use crate::clip::{ClipError, Contour, Intersector, OverlayIntersector};
    pub use crate::coverage::Level;
    pub use crate::geom::{shoelace_area, Board, GeometryError, Piece, Placed, Polygon, Shape};
    pub use crate::random::{draw_convex_polygon, ReplayToken, ValtrCfg, VertexCount};
    pub use nalgebra::Vector2 as Vec2;
}
