mod level;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use polyboard::{Intersector, OverlayIntersector, Shape};
use tracing_subscriber::{fmt::SubscriberBuilder, EnvFilter};

use crate::level::LevelFile;

#[derive(Parser)]
#[command(name = "polyboard-cli")]
#[command(about = "Board coverage for polygon piece puzzles")]
struct Cmd {
    #[command(subcommand)]
    action: Action,
}

#[derive(Subcommand)]
enum Action {
    /// Print the completion percentage of a level file as JSON
    Coverage {
        #[arg(long)]
        level: PathBuf,
    },
    /// Print the board ∩ piece contours and area for one piece
    Intersect {
        #[arg(long)]
        level: PathBuf,
        #[arg(long)]
        piece: usize,
    },
    /// Print a random level file
    Sample {
        #[arg(long, default_value_t = 0)]
        seed: u64,
        #[arg(long, default_value_t = 3)]
        pieces: usize,
        /// Positions are drawn from [-spread, spread) on both axes
        #[arg(long, default_value_t = 300)]
        spread: i64,
    },
    /// Print version information
    Report,
}

fn main() -> Result<()> {
    SubscriberBuilder::default()
        .with_target(false)
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();
    let cmd = Cmd::parse();
    match cmd.action {
        Action::Coverage { level } => coverage(level),
        Action::Intersect { level, piece } => intersect(level, piece),
        Action::Sample {
            seed,
            pieces,
            spread,
        } => sample(seed, pieces, spread),
        Action::Report => report(),
    }
}

fn coverage(path: PathBuf) -> Result<()> {
    tracing::info!(level = %path.display(), "coverage");
    let level = LevelFile::read(&path)?.build()?;
    let percentage = level.completion_percentage();
    let obj = serde_json::json!({
        "coverage": percentage,
        "board_area": level.board().shape().area(),
        "pieces": level.pieces().len(),
        "piece_areas": level
            .pieces()
            .iter()
            .map(|p| p.shape().area())
            .collect::<Vec<_>>(),
    });
    println!("{}", serde_json::to_string_pretty(&obj)?);
    Ok(())
}

fn intersect(path: PathBuf, index: usize) -> Result<()> {
    tracing::info!(level = %path.display(), piece = index, "intersect");
    let file = LevelFile::read(&path)?;
    let board = file.board()?;
    let pieces = file.pieces()?;
    let piece = pieces.get(index).with_context(|| {
        format!("piece {index} out of range (level has {})", pieces.len())
    })?;
    let contours =
        OverlayIntersector.intersection_contours(&board.points_in_plane(), &piece.points_in_plane());
    let area: f64 = contours.iter().map(|c| c.area()).sum();
    let obj = serde_json::json!({
        "piece": index,
        "area": area,
        "contours": contours
            .iter()
            .map(|c| c.points().iter().map(|p| [p.x, p.y]).collect::<Vec<_>>())
            .collect::<Vec<_>>(),
    });
    println!("{}", serde_json::to_string_pretty(&obj)?);
    Ok(())
}

fn sample(seed: u64, pieces: usize, spread: i64) -> Result<()> {
    tracing::info!(seed, pieces, spread, "sample");
    let level = LevelFile::sample(seed, pieces, spread)?;
    println!("{}", serde_json::to_string_pretty(&level)?);
    Ok(())
}

fn report() -> Result<()> {
    let obj = serde_json::json!({
        "name": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
        "polyboard": polyboard::VERSION,
        "code_rev": option_env!("GIT_COMMIT").unwrap_or("unknown"),
    });
    println!("{}", serde_json::to_string_pretty(&obj)?);
    Ok(())
}
