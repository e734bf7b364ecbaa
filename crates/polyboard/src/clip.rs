//! Polygon intersection behind a narrow trait.
//!
//! Purpose
//! - `Intersector`: the single seam through which the coverage engine (and
//!   direct two-shape queries) obtain `subject ∩ clip` as plane-space contours.
//! - `OverlayIntersector`: default implementation backed by `i_overlay`
//!   (even-odd fill for both operands, intersection only).
//!
//! Input cleanup
//! - Consecutive repeated vertices are merged and an explicit closing vertex
//!   (last == first) is dropped before clipping; the engine otherwise loses
//!   the corner next to the repeat.
//!
//! Failure policy
//! - Inputs the clipper cannot use (fewer than 3 distinct points, non-finite
//!   or out-of-range coordinates, zero area) yield an empty result. The rejection is logged at
//!   debug level and never reaches the caller.
//!
//! Code cross-refs: `geom::{Shape, shoelace_area}`, `coverage::Level`

use std::fmt;

use i_overlay::core::fill_rule::FillRule;
use i_overlay::core::overlay_rule::OverlayRule;
use i_overlay::float::single::SingleFloatOverlay;
use nalgebra::Vector2;

use crate::geom::{shoelace_area, Shape};

/// Closed contour in plane space, as produced by an intersection.
///
/// Unlike `Polygon`, a contour is not normalized into quadrant one: its points
/// are where the intersection actually lies, so it can be clipped again.
#[derive(Clone, Debug, PartialEq)]
pub struct Contour {
    points: Vec<Vector2<f64>>,
}

impl Contour {
    /// `None` for fewer than three points.
    pub fn new(points: Vec<Vector2<f64>>) -> Option<Self> {
        (points.len() >= 3).then_some(Self { points })
    }

    #[inline]
    pub fn points(&self) -> &[Vector2<f64>] {
        &self.points
    }

    #[inline]
    pub fn area(&self) -> f64 {
        shoelace_area(&self.points)
    }
}

impl Shape for Contour {
    fn points(&self) -> &[Vector2<f64>] {
        &self.points
    }
}

/// Which side of the clipping call an error refers to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operand {
    Subject,
    Clip,
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operand::Subject => f.write_str("subject"),
            Operand::Clip => f.write_str("clip"),
        }
    }
}

/// Reasons the clipper refuses an operand.
#[derive(Clone, Debug, PartialEq)]
pub enum ClipError {
    TooFewPoints { operand: Operand, count: usize },
    NonFinite { operand: Operand, index: usize },
    /// Coordinate magnitude above `OverlayIntersector::MAX_COORD`.
    OutOfRange { operand: Operand, index: usize },
    /// Collinear or fully coincident points.
    ZeroArea { operand: Operand },
}

impl fmt::Display for ClipError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClipError::TooFewPoints { operand, count } => {
                write!(f, "clipping failure: {operand} has {count} points (need 3)")
            }
            ClipError::NonFinite { operand, index } => write!(
                f,
                "clipping failure: {operand} point {index} has a non-finite coordinate"
            ),
            ClipError::OutOfRange { operand, index } => write!(
                f,
                "clipping failure: {operand} point {index} exceeds {:e} in magnitude",
                OverlayIntersector::MAX_COORD
            ),
            ClipError::ZeroArea { operand } => {
                write!(f, "clipping failure: {operand} encloses no area")
            }
        }
    }
}

impl std::error::Error for ClipError {}

/// Intersection of two closed plane-space contours.
pub trait Intersector {
    /// Contours of `subject ∩ clip`; empty when the shapes are disjoint or
    /// either input is malformed. Order among contours carries no meaning.
    fn intersection_contours(&self, subject: &[Vector2<f64>], clip: &[Vector2<f64>])
        -> Vec<Contour>;

    /// Summed shoelace area of `intersection_contours(subject, clip)`.
    fn intersection_area(&self, subject: &[Vector2<f64>], clip: &[Vector2<f64>]) -> f64 {
        self.intersection_contours(subject, clip)
            .iter()
            .map(Contour::area)
            .sum()
    }
}

impl<I: Intersector + ?Sized> Intersector for &I {
    fn intersection_contours(
        &self,
        subject: &[Vector2<f64>],
        clip: &[Vector2<f64>],
    ) -> Vec<Contour> {
        (**self).intersection_contours(subject, clip)
    }
}

/// `i_overlay`-backed intersector (even-odd fill rule on both operands).
///
/// Every outer and hole contour of the result is returned flat, so the summed
/// area of an intersection with holes counts the holes too.
///
/// `i_overlay` snaps both operands onto one 32-bit integer grid spanning their
/// joint bounding box, so detail finer than about `extent / 2^30` is lost.
/// Coordinates beyond `MAX_COORD` are rejected outright.
#[derive(Clone, Copy, Debug, Default)]
pub struct OverlayIntersector;

impl OverlayIntersector {
    /// Largest accepted coordinate magnitude.
    pub const MAX_COORD: f64 = 1.0e9;

    #[inline]
    pub fn new() -> Self {
        Self
    }

    /// Same as `intersection_contours`, but surfaces the rejection reason.
    pub fn try_intersection(
        &self,
        subject: &[Vector2<f64>],
        clip: &[Vector2<f64>],
    ) -> Result<Vec<Contour>, ClipError> {
        let subject = to_path(subject, Operand::Subject)?;
        let clip = to_path(clip, Operand::Clip)?;
        let shapes = subject.overlay(&[clip], OverlayRule::Intersect, FillRule::EvenOdd);
        let contours = shapes
            .into_iter()
            .flatten()
            .filter_map(|path| {
                Contour::new(path.into_iter().map(|[x, y]| Vector2::new(x, y)).collect())
            })
            .collect();
        Ok(contours)
    }
}

impl Intersector for OverlayIntersector {
    fn intersection_contours(
        &self,
        subject: &[Vector2<f64>],
        clip: &[Vector2<f64>],
    ) -> Vec<Contour> {
        match self.try_intersection(subject, clip) {
            Ok(contours) => contours,
            Err(err) => {
                tracing::debug!(%err, "intersection treated as empty");
                Vec::new()
            }
        }
    }
}

fn to_path(points: &[Vector2<f64>], operand: Operand) -> Result<Vec<[f64; 2]>, ClipError> {
    if let Some(index) = points
        .iter()
        .position(|p| !(p.x.is_finite() && p.y.is_finite()))
    {
        return Err(ClipError::NonFinite { operand, index });
    }
    if let Some(index) = points
        .iter()
        .position(|p| p.x.abs().max(p.y.abs()) > OverlayIntersector::MAX_COORD)
    {
        return Err(ClipError::OutOfRange { operand, index });
    }
    let ring = distinct_ring(points);
    if ring.len() < 3 {
        return Err(ClipError::TooFewPoints {
            operand,
            count: ring.len(),
        });
    }
    if shoelace_area(&ring) == 0.0 {
        return Err(ClipError::ZeroArea { operand });
    }
    Ok(ring.iter().map(|p| [p.x, p.y]).collect())
}

/// Vertices with consecutive repeats merged and no closing duplicate.
fn distinct_ring(points: &[Vector2<f64>]) -> Vec<Vector2<f64>> {
    let mut ring: Vec<Vector2<f64>> = Vec::with_capacity(points.len());
    for p in points {
        if ring.last() != Some(p) {
            ring.push(*p);
        }
    }
    while ring.len() > 1 && ring.first() == ring.last() {
        ring.pop();
    }
    ring
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geom::{Board, Piece, Polygon};
    use nalgebra::vector;

    fn poly(coords: &[[f64; 2]]) -> Polygon {
        Polygon::from_coords(coords).unwrap()
    }

    fn big_square_board() -> Board {
        Board::new(
            poly(&[[0.0, 0.0], [0.0, 1000.0], [1000.0, 1000.0], [1000.0, 0.0]]),
            vector![0, 0],
        )
    }

    fn small_triangle_at(x: i64, y: i64) -> Piece {
        Piece::new(poly(&[[0.0, 0.0], [100.0, 100.0], [100.0, 0.0]]), vector![x, y])
    }

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() <= 1e-6 * b.abs().max(1.0)
    }

    #[test]
    fn fully_submerged_piece_keeps_its_area() {
        let board = big_square_board();
        let piece = small_triangle_at(50, 50);
        let area = OverlayIntersector
            .intersection_area(&board.points_in_plane(), &piece.points_in_plane());
        assert!(close(area, piece.shape().area()), "area={area}");
    }

    #[test]
    fn far_apart_shapes_do_not_intersect() {
        let board = big_square_board();
        let piece = small_triangle_at(5000, 5000);
        let contours = OverlayIntersector
            .intersection_contours(&board.points_in_plane(), &piece.points_in_plane());
        assert!(contours.is_empty());
        assert_eq!(
            OverlayIntersector
                .intersection_area(&board.points_in_plane(), &piece.points_in_plane()),
            0.0
        );
    }

    #[test]
    fn identical_shapes_intersect_fully() {
        let board = small_triangle_at(0, 0);
        let piece = small_triangle_at(0, 0);
        let area = OverlayIntersector
            .intersection_area(&board.points_in_plane(), &piece.points_in_plane());
        assert!(close(area, piece.shape().area()), "area={area}");
    }

    #[test]
    fn triangle_takes_half_of_square() {
        let board = small_triangle_at(0, 0);
        let square = Piece::new(
            poly(&[[0.0, 0.0], [0.0, 100.0], [100.0, 100.0], [100.0, 0.0]]),
            vector![0, 0],
        );
        let area = OverlayIntersector
            .intersection_area(&board.points_in_plane(), &square.points_in_plane());
        assert!(close(area, square.shape().area() / 2.0), "area={area}");
    }

    #[test]
    fn contours_stay_in_plane_space() {
        // Overlap of two unit-10 squares offset into negative coordinates.
        let a = Piece::new(
            poly(&[[0.0, 0.0], [10.0, 0.0], [10.0, 10.0], [0.0, 10.0]]),
            vector![-20, -20],
        );
        let b = Piece::new(
            poly(&[[0.0, 0.0], [10.0, 0.0], [10.0, 10.0], [0.0, 10.0]]),
            vector![-15, -15],
        );
        let contours =
            OverlayIntersector.intersection_contours(&a.points_in_plane(), &b.points_in_plane());
        assert_eq!(contours.len(), 1);
        let c = &contours[0];
        assert!(close(c.area(), 25.0));
        for p in c.points() {
            assert!(p.x >= -15.0 - 1e-9 && p.x <= -10.0 + 1e-9, "{p:?}");
            assert!(p.y >= -15.0 - 1e-9 && p.y <= -10.0 + 1e-9, "{p:?}");
        }
    }

    #[test]
    fn disconnected_overlap_yields_several_contours() {
        // A "U" clipped by a horizontal bar through both prongs.
        let u = [
            vector![0.0, 0.0],
            vector![30.0, 0.0],
            vector![30.0, 30.0],
            vector![20.0, 30.0],
            vector![20.0, 10.0],
            vector![10.0, 10.0],
            vector![10.0, 30.0],
            vector![0.0, 30.0],
        ];
        let bar = [
            vector![-5.0, 20.0],
            vector![35.0, 20.0],
            vector![35.0, 25.0],
            vector![-5.0, 25.0],
        ];
        let contours = OverlayIntersector.intersection_contours(&u, &bar);
        assert_eq!(contours.len(), 2);
        let total: f64 = contours.iter().map(Contour::area).sum();
        assert!(close(total, 100.0), "total={total}");
    }

    #[test]
    fn malformed_input_is_reported_and_swallowed() {
        let square = [
            vector![0.0, 0.0],
            vector![1.0, 0.0],
            vector![1.0, 1.0],
            vector![0.0, 1.0],
        ];
        let line = [vector![0.0, 0.0], vector![1.0, 1.0], vector![2.0, 2.0]];
        let two = [vector![0.0, 0.0], vector![1.0, 1.0]];
        let nan = [vector![0.0, 0.0], vector![f64::NAN, 1.0], vector![1.0, 0.0]];

        let ix = OverlayIntersector::new();
        assert_eq!(
            ix.try_intersection(&square, &line),
            Err(ClipError::ZeroArea {
                operand: Operand::Clip
            })
        );
        assert_eq!(
            ix.try_intersection(&two, &square),
            Err(ClipError::TooFewPoints {
                operand: Operand::Subject,
                count: 2
            })
        );
        assert_eq!(
            ix.try_intersection(&square, &nan),
            Err(ClipError::NonFinite {
                operand: Operand::Clip,
                index: 1
            })
        );
        assert!(ix.intersection_contours(&square, &line).is_empty());
        assert!(ix.intersection_contours(&two, &square).is_empty());
        assert_eq!(ix.intersection_area(&square, &nan), 0.0);
    }

    #[test]
    fn closed_ring_input_keeps_every_corner() {
        let open = [
            vector![0.0, 0.0],
            vector![10.0, 0.0],
            vector![10.0, 10.0],
            vector![0.0, 10.0],
        ];
        let closed = [
            vector![0.0, 0.0],
            vector![10.0, 0.0],
            vector![10.0, 10.0],
            vector![0.0, 10.0],
            vector![0.0, 0.0],
        ];
        let ix = OverlayIntersector;
        let pairs = [
            (&closed[..], &open[..]),
            (&open[..], &closed[..]),
            (&closed[..], &closed[..]),
        ];
        for (subject, clip) in pairs {
            let area = ix.intersection_area(subject, clip);
            assert!(close(area, 100.0), "area={area}");
        }
    }

    #[test]
    fn repeated_vertices_are_merged() {
        let ring = distinct_ring(&[
            vector![0.0, 0.0],
            vector![0.0, 0.0],
            vector![4.0, 0.0],
            vector![4.0, 0.0],
            vector![0.0, 4.0],
            vector![0.0, 0.0],
        ]);
        assert_eq!(ring, vec![vector![0.0, 0.0], vector![4.0, 0.0], vector![0.0, 4.0]]);

        // A triangle written as a closed ring of three points is only a segment.
        let short = [vector![0.0, 0.0], vector![1.0, 1.0], vector![0.0, 0.0]];
        assert_eq!(
            OverlayIntersector.try_intersection(&short, &short),
            Err(ClipError::TooFewPoints {
                operand: Operand::Subject,
                count: 2
            })
        );
    }

    #[test]
    fn huge_coordinates_are_rejected() {
        let huge = 1e200;
        let board = [
            vector![0.0, 0.0],
            vector![huge, 0.0],
            vector![huge, huge],
            vector![0.0, huge],
        ];
        let small = [
            vector![0.0, 0.0],
            vector![10.0, 0.0],
            vector![10.0, 10.0],
            vector![0.0, 10.0],
        ];
        let ix = OverlayIntersector;
        assert_eq!(
            ix.try_intersection(&board, &small),
            Err(ClipError::OutOfRange {
                operand: Operand::Subject,
                index: 1
            })
        );
        assert_eq!(ix.intersection_area(&board, &small), 0.0);

        let edge = OverlayIntersector::MAX_COORD;
        let wide = [
            vector![0.0, 0.0],
            vector![edge, 0.0],
            vector![edge, edge],
            vector![0.0, edge],
        ];
        assert!(ix.try_intersection(&wide, &wide).is_ok());
    }

    #[test]
    fn contour_requires_three_points() {
        assert!(Contour::new(vec![vector![0.0, 0.0], vector![1.0, 0.0]]).is_none());
        let c = Contour::new(vec![vector![0.0, 0.0], vector![2.0, 0.0], vector![0.0, 2.0]])
            .unwrap();
        assert_eq!(c.area(), 2.0);
        assert_eq!(Shape::centroid(&c), vector![2.0 / 3.0, 2.0 / 3.0]);
    }
}
