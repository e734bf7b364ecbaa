//! Polygon primitives for the piece-packing board.
//!
//! Purpose
//! - `Polygon`: a vertex list that always lives in quadrant one (all
//!   coordinates >= 0) and supports rotation about its centroid, mirroring,
//!   and shoelace area.
//! - `Placed`: a shape plus an integer offset on the (unbounded) plane. Boards
//!   and pieces are both placed instances.
//!
//! Conventions
//! - Points are `nalgebra::Vector2<f64>`; positions are `Vector2<i64>`.
//! - Rotations follow screen coordinates (y axis pointing down), so a
//!   positive angle turns clockwise on screen.
//! - Code cross-refs: `clip::Intersector`, `coverage::Level`

mod placed;
mod polygon;

pub use placed::{Board, Piece, Placed};
pub use polygon::{shoelace_area, GeometryError, Polygon, Shape};
