use nalgebra::Vector2;

use super::polygon::{Polygon, Shape};

/// A shape translated by an integer offset on the plane.
///
/// The offset is applied only when deriving plane-space data; the shape's own
/// points are never modified here. `S` defaults to an owned `Polygon`, but
/// `&Polygon` or `Arc<Polygon>` let several instances share one vertex list.
#[derive(Clone, Debug, PartialEq)]
pub struct Placed<S = Polygon> {
    shape: S,
    position: Vector2<i64>,
}

/// The reference instance whose area coverage is measured.
pub type Board<S = Polygon> = Placed<S>;
/// An instance placed on a board.
pub type Piece<S = Polygon> = Placed<S>;

impl<S: Shape> Placed<S> {
    #[inline]
    pub fn new(shape: S, position: Vector2<i64>) -> Self {
        Self { shape, position }
    }

    #[inline]
    pub fn shape(&self) -> &S {
        &self.shape
    }

    #[inline]
    pub fn into_shape(self) -> S {
        self.shape
    }

    #[inline]
    pub fn position(&self) -> Vector2<i64> {
        self.position
    }

    #[inline]
    fn offset(&self) -> Vector2<f64> {
        self.position.map(|c| c as f64)
    }

    /// Shape vertices translated by the current position (recomputed each call).
    pub fn points_in_plane(&self) -> Vec<Vector2<f64>> {
        let offset = self.offset();
        self.shape.points().iter().map(|p| p + offset).collect()
    }

    /// Position plus the shape's centroid.
    #[inline]
    pub fn center_in_plane(&self) -> Vector2<f64> {
        self.offset() + self.shape.centroid()
    }

    /// Relative move; the plane is unbounded, so no clamping.
    #[inline]
    pub fn move_by(&mut self, dx: i64, dy: i64) {
        self.position += Vector2::new(dx, dy);
    }

    /// Per-axis absolute distance between `(x, y)` and the plane-space centroid.
    pub fn center_distance_from(&self, x: f64, y: f64) -> Vector2<f64> {
        (Vector2::new(x, y) - self.center_in_plane()).abs()
    }
}
