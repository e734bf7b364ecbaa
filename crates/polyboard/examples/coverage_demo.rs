//! Place a few pieces on a triangular board and print the coverage after each step.
//!
//! Usage:
//!   cargo run -p polyboard --example coverage_demo

use nalgebra::Vector2;
use polyboard::{Board, Level, Piece, Polygon};

fn main() -> Result<(), polyboard::GeometryError> {
    let board = Board::new(
        Polygon::from_coords(&[[0.0, 0.0], [100.0, 100.0], [100.0, 0.0]])?,
        Vector2::new(0, 0),
    );

    let mut square = Polygon::from_coords(&[[0.0, 0.0], [0.0, 50.0], [50.0, 50.0], [50.0, 0.0]])?;
    let mut wedge = Polygon::from_coords(&[[0.0, 0.0], [50.0, 50.0], [50.0, 0.0]])?;
    wedge.flip();
    square.rotate(45.0);

    let steps = [
        ("square at (50, 0)", Piece::new(square.clone(), Vector2::new(50, 0))),
        ("flipped wedge at (0, 0)", Piece::new(wedge, Vector2::new(0, 0))),
        ("rotated square at (60, 10)", Piece::new(square, Vector2::new(60, 10))),
    ];

    let mut pieces = Vec::new();
    for (label, piece) in steps {
        pieces.push(piece);
        let level = Level::with_overlay(board.clone(), pieces.clone());
        println!("{label:>28}: {:6.2}%", level.completion_percentage());
    }
    Ok(())
}
