//! Quadrant-one polygon with in-place rotation and mirroring.
//!
//! - `Polygon`: owned vertex list, normalized to non-negative coordinates after
//!   construction and after every `rotate`/`flip`.
//! - `Shape`: read-only view (points, centroid, area) shared by polygons,
//!   plane-space contours, and anything a placed instance can carry.
//! - `shoelace_area`: unsigned area of a closed vertex list.

use std::fmt;
use std::sync::Arc;

use nalgebra::{Matrix2, Vector2};

/// Errors raised when a polygon cannot be built from the given points.
#[derive(Clone, Debug, PartialEq)]
pub enum GeometryError {
    /// A closed contour needs at least three vertices.
    TooFewPoints { count: usize },
    /// Vertex `index` has a NaN or infinite coordinate.
    NonFinite { index: usize },
}

impl fmt::Display for GeometryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GeometryError::TooFewPoints { count } => write!(
                f,
                "invalid geometry: polygon needs at least {} points, got {}",
                Polygon::MIN_POINTS,
                count
            ),
            GeometryError::NonFinite { index } => {
                write!(f, "invalid geometry: point {index} has a non-finite coordinate")
            }
        }
    }
}

impl std::error::Error for GeometryError {}

/// Read-only view of a closed 2D contour.
///
/// `centroid` and `area` have default implementations computed from `points`;
/// implementors only override them when they carry a different notion of center.
pub trait Shape {
    fn points(&self) -> &[Vector2<f64>];

    /// Arithmetic mean of the vertices.
    fn centroid(&self) -> Vector2<f64> {
        mean_point(self.points())
    }

    fn area(&self) -> f64 {
        shoelace_area(self.points())
    }
}

impl<S: Shape + ?Sized> Shape for &S {
    fn points(&self) -> &[Vector2<f64>] {
        (**self).points()
    }
    fn centroid(&self) -> Vector2<f64> {
        (**self).centroid()
    }
    fn area(&self) -> f64 {
        (**self).area()
    }
}

impl<S: Shape + ?Sized> Shape for Arc<S> {
    fn points(&self) -> &[Vector2<f64>] {
        (**self).points()
    }
    fn centroid(&self) -> Vector2<f64> {
        (**self).centroid()
    }
    fn area(&self) -> f64 {
        (**self).area()
    }
}

/// Unsigned shoelace area: `0.5 * |Σ x_i·y_{i-1} − Σ y_i·x_{i-1}|` with wrap-around.
///
/// Returns 0 for fewer than three points. Orientation-independent.
pub fn shoelace_area(points: &[Vector2<f64>]) -> f64 {
    let n = points.len();
    if n < 3 {
        return 0.0;
    }
    let mut xy = 0.0;
    let mut yx = 0.0;
    for (i, p) in points.iter().enumerate() {
        let prev = points[(i + n - 1) % n];
        xy += p.x * prev.y;
        yx += p.y * prev.x;
    }
    (0.5 * (xy - yx)).abs()
}

#[inline]
pub(crate) fn mean_point(points: &[Vector2<f64>]) -> Vector2<f64> {
    if points.is_empty() {
        return Vector2::zeros();
    }
    let sum = points.iter().fold(Vector2::zeros(), |acc, p| acc + p);
    sum / points.len() as f64
}

/// Simple closed polygon kept in quadrant one.
///
/// Invariants:
/// - At least `MIN_POINTS` vertices, all finite.
/// - Every coordinate is `>= 0` (re-established after each mutation).
/// - Vertex order is significant (orientation, clipping input).
#[derive(Clone, Debug, PartialEq)]
pub struct Polygon {
    points: Vec<Vector2<f64>>,
}

impl Polygon {
    pub const MIN_POINTS: usize = 3;

    /// Validate and normalize into quadrant one.
    pub fn new(points: Vec<Vector2<f64>>) -> Result<Self, GeometryError> {
        if points.len() < Self::MIN_POINTS {
            return Err(GeometryError::TooFewPoints {
                count: points.len(),
            });
        }
        if let Some(index) = points
            .iter()
            .position(|p| !(p.x.is_finite() && p.y.is_finite()))
        {
            return Err(GeometryError::NonFinite { index });
        }
        let mut poly = Self { points };
        poly.move_to_quadrant_one();
        Ok(poly)
    }

    /// Convenience constructor from `[x, y]` pairs.
    pub fn from_coords(coords: &[[f64; 2]]) -> Result<Self, GeometryError> {
        Self::new(coords.iter().map(|&[x, y]| Vector2::new(x, y)).collect())
    }

    #[inline]
    pub fn points(&self) -> &[Vector2<f64>] {
        &self.points
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Always false for a constructed polygon; present for API symmetry with `len`.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Mean vertex (not the area centroid).
    #[inline]
    pub fn centroid(&self) -> Vector2<f64> {
        mean_point(&self.points)
    }

    #[inline]
    pub fn area(&self) -> f64 {
        shoelace_area(&self.points)
    }

    /// Rotate clockwise (screen coordinates) by `degrees` about the centroid.
    ///
    /// Whole turns and non-finite angles leave the points untouched.
    pub fn rotate(&mut self, degrees: f64) {
        if !degrees.is_finite() || is_whole_turn(degrees) {
            return;
        }
        let center = self.centroid();
        let rot = clockwise_rotation(degrees);
        // Points are row vectors multiplied on the left: p' = p·R = Rᵀ·p.
        for p in &mut self.points {
            *p = rot.tr_mul(&(*p - center)) + center;
        }
        self.move_to_quadrant_one();
    }

    /// Mirror the polygon.
    ///
    /// Pre-rotates by −90°, then reverses the point matrix along both axes
    /// (vertex order reversed, x/y swapped), recenters on the origin and
    /// normalizes back into quadrant one.
    pub fn flip(&mut self) {
        self.rotate(-90.0);
        self.points.reverse();
        for p in &mut self.points {
            *p = Vector2::new(p.y, p.x);
        }
        let center = self.centroid();
        for p in &mut self.points {
            *p -= center;
        }
        self.move_to_quadrant_one();
    }

    /// Shift each axis with a negative minimum so that the minimum becomes 0.
    fn move_to_quadrant_one(&mut self) {
        let min = self
            .points
            .iter()
            .fold(Vector2::repeat(f64::INFINITY), |acc, p| acc.inf(p));
        let shift = min.map(|m| if m < 0.0 { -m } else { 0.0 });
        if shift == Vector2::zeros() {
            return;
        }
        for p in &mut self.points {
            *p += shift;
        }
    }
}

impl Shape for Polygon {
    fn points(&self) -> &[Vector2<f64>] {
        &self.points
    }
    fn centroid(&self) -> Vector2<f64> {
        Polygon::centroid(self)
    }
    fn area(&self) -> f64 {
        Polygon::area(self)
    }
}

#[inline]
fn is_whole_turn(degrees: f64) -> bool {
    degrees % 360.0 == 0.0
}

/// `[[cos θ, sin θ], [−sin θ, cos θ]]`, applied to row vectors.
#[inline]
fn clockwise_rotation(degrees: f64) -> Matrix2<f64> {
    let (sin, cos) = degrees.to_radians().sin_cos();
    Matrix2::new(cos, sin, -sin, cos)
}
