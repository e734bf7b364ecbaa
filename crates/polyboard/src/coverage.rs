//! Board coverage with pairwise overlap correction.
//!
//! Purpose
//! - `Level`: a board, an ordered list of pieces, and the `Intersector` used to
//!   clip them. `completion_percentage` reports how much of the board the
//!   pieces cover, recomputed from current positions on every call.
//!
//! Algorithm (first-order inclusion–exclusion)
//! - For each piece `i` in order: add the area of `board ∩ piece_i`, then for
//!   every later piece `j > i` subtract the area of `(board ∩ piece_i) ∩ piece_j`.
//! - Triple and higher overlaps are not added back. Whenever three or more
//!   pieces share a board region the result under-counts (and is clamped at 0).
//!   Callers rely on this exact pair enumeration, so keep it.
//!
//! Complexity: O(n²) clipping calls per evaluation (times contours per hit).

use nalgebra::Vector2;

use crate::clip::{Intersector, OverlayIntersector};
use crate::geom::{Board, Piece, Polygon, Shape};

/// Board plus pieces plus the clipping collaborator.
#[derive(Clone, Debug)]
pub struct Level<I = OverlayIntersector, S = Polygon> {
    board: Board<S>,
    pieces: Vec<Piece<S>>,
    intersector: I,
}

impl<S: Shape> Level<OverlayIntersector, S> {
    /// Level using the default `i_overlay` intersector.
    pub fn with_overlay(board: Board<S>, pieces: Vec<Piece<S>>) -> Self {
        Self::new(board, pieces, OverlayIntersector)
    }
}

impl<I: Intersector, S: Shape> Level<I, S> {
    pub fn new(board: Board<S>, pieces: Vec<Piece<S>>, intersector: I) -> Self {
        Self {
            board,
            pieces,
            intersector,
        }
    }

    #[inline]
    pub fn board(&self) -> &Board<S> {
        &self.board
    }

    #[inline]
    pub fn pieces(&self) -> &[Piece<S>] {
        &self.pieces
    }

    /// Mutable access to one piece (e.g. to move it between evaluations).
    #[inline]
    pub fn piece_mut(&mut self, index: usize) -> Option<&mut Piece<S>> {
        self.pieces.get_mut(index)
    }

    #[inline]
    pub fn intersector(&self) -> &I {
        &self.intersector
    }

    /// Percentage of the board area covered by the pieces, in `[0, 100]` for
    /// non-degenerate inputs.
    ///
    /// Zero pieces, or a net covered area `<= 0`, yield exactly 0 without
    /// touching the board area. A zero-area board is a caller error and
    /// propagates as a non-finite result.
    pub fn completion_percentage(&self) -> f64 {
        let board_points = self.board.points_in_plane();
        let piece_points: Vec<Vec<Vector2<f64>>> =
            self.pieces.iter().map(|p| p.points_in_plane()).collect();

        let mut covered = 0.0;
        for (i, piece_i) in piece_points.iter().enumerate() {
            let board_hits = self
                .intersector
                .intersection_contours(&board_points, piece_i);
            covered += board_hits.iter().map(|hit| hit.area()).sum::<f64>();

            for (j, piece_j) in piece_points.iter().enumerate().skip(i + 1) {
                for hit in &board_hits {
                    let overlap = self.intersector.intersection_area(hit.points(), piece_j);
                    if overlap > 0.0 {
                        tracing::trace!(i, j, overlap, "pairwise overlap");
                    }
                    covered -= overlap;
                }
            }
        }

        if covered > 0.0 {
            let board_area = self.board.shape().area();
            let percentage = covered / board_area * 100.0;
            tracing::debug!(
                pieces = self.pieces.len(),
                covered,
                board_area,
                percentage,
                "coverage"
            );
            percentage
        } else {
            tracing::debug!(pieces = self.pieces.len(), covered, "coverage clamped to 0");
            0.0
        }
    }
}
