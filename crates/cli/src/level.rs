//! JSON level files: a board plus pieces, each with optional flip/rotation.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use polyboard::random::{draw_convex_polygon, random_position, ReplayToken, ValtrCfg};
use polyboard::{Board, Level, Piece, Placed, Polygon, Vec2};
use serde::{Deserialize, Serialize};

/// One placed polygon as written in a level file.
///
/// `flip` is applied before `rotation` (degrees, clockwise on screen).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlacedSpec {
    pub points: Vec<[f64; 2]>,
    #[serde(default)]
    pub position: [i64; 2],
    #[serde(default, skip_serializing_if = "is_zero")]
    pub rotation: f64,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub flip: bool,
}

fn is_zero(x: &f64) -> bool {
    *x == 0.0
}

impl PlacedSpec {
    pub fn to_placed(&self) -> Result<Placed> {
        let mut poly = Polygon::from_coords(&self.points)?;
        if self.flip {
            poly.flip();
        }
        poly.rotate(self.rotation);
        Ok(Placed::new(
            poly,
            Vec2::new(self.position[0], self.position[1]),
        ))
    }

    fn from_placed(placed: &Placed) -> Self {
        let p = placed.position();
        Self {
            points: placed.shape().points().iter().map(|v| [v.x, v.y]).collect(),
            position: [p.x, p.y],
            rotation: 0.0,
            flip: false,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LevelFile {
    pub board: PlacedSpec,
    #[serde(default)]
    pub pieces: Vec<PlacedSpec>,
}

impl LevelFile {
    pub fn read(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("reading level {}", path.display()))?;
        serde_json::from_str(&text).with_context(|| format!("parsing level {}", path.display()))
    }

    pub fn board(&self) -> Result<Board> {
        self.board.to_placed().context("invalid board")
    }

    pub fn pieces(&self) -> Result<Vec<Piece>> {
        self.pieces
            .iter()
            .enumerate()
            .map(|(i, spec)| spec.to_placed().with_context(|| format!("invalid piece {i}")))
            .collect()
    }

    pub fn build(&self) -> Result<Level> {
        Ok(Level::with_overlay(self.board()?, self.pieces()?))
    }

    /// Random level: a 500×500 square board and `pieces` convex pieces placed
    /// within `spread` of the origin (positions may hang off the board).
    pub fn sample(seed: u64, pieces: usize, spread: i64) -> Result<Self> {
        let board = Board::new(
            Polygon::from_coords(&[[0.0, 0.0], [0.0, 500.0], [500.0, 500.0], [500.0, 0.0]])?,
            Vec2::new(0, 0),
        );
        let mut rng = ReplayToken {
            seed,
            index: u64::MAX,
        }
        .rng();
        let mut specs = Vec::with_capacity(pieces);
        for index in 0..pieces as u64 {
            let poly = draw_convex_polygon(ValtrCfg::default(), ReplayToken { seed, index })?;
            let piece = Piece::new(poly, random_position(&mut rng, spread));
            specs.push(PlacedSpec::from_placed(&piece));
        }
        Ok(Self {
            board: PlacedSpec::from_placed(&board),
            pieces: specs,
        })
    }
}
