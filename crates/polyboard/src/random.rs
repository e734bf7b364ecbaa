//! Random convex polygons on an integer grid (Valtr's algorithm) plus replay tokens.
//!
//! Purpose
//! - Feed property tests, benchmarks and the CLI `sample` command with
//!   reproducible convex pieces.
//!
//! Model
//! - Sample `n` x and `n` y coordinates, sort each, split every axis into two
//!   monotone chains of signed steps, shuffle the y steps, pair them with the
//!   x steps, sort the pairs by angle and lay them end to end. The resulting
//!   closed path is convex and spans the sampled range.
//! - Determinism: a `(seed, index)` replay token is mixed into a single `StdRng`.
//!
//! Reference: Pavel Valtr, "Probability that n random points are in convex
//! position" (1995); construction after Sander Verdonschot's write-up.

use nalgebra::Vector2;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use crate::geom::{GeometryError, Polygon};

/// Vertex count distribution.
#[derive(Clone, Copy, Debug)]
pub enum VertexCount {
    Fixed(usize),
    Uniform { min: usize, max: usize },
}

impl VertexCount {
    fn sample<R: Rng>(&self, rng: &mut R) -> usize {
        match *self {
            VertexCount::Fixed(n) => n.max(3),
            VertexCount::Uniform { min, max } => {
                let lo = min.max(3);
                let hi = max.max(lo);
                rng.gen_range(lo..=hi)
            }
        }
    }
}

/// Generator configuration. Coordinates are drawn from `coord_min..=coord_max`.
#[derive(Clone, Copy, Debug)]
pub struct ValtrCfg {
    pub vertex_count: VertexCount,
    pub coord_min: i64,
    pub coord_max: i64,
}

impl Default for ValtrCfg {
    fn default() -> Self {
        Self {
            vertex_count: VertexCount::Uniform { min: 3, max: 12 },
            coord_min: 1,
            coord_max: 500,
        }
    }
}

/// Replay token to make draws reproducible and indexable.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReplayToken {
    pub seed: u64,
    pub index: u64,
}

impl ReplayToken {
    #[inline]
    pub fn rng(self) -> StdRng {
        // SplitMix64-style mixing.
        fn mix(mut x: u64) -> u64 {
            x ^= x >> 30;
            x = x.wrapping_mul(0xbf58476d1ce4e5b9);
            x ^= x >> 27;
            x = x.wrapping_mul(0x94d049bb133111eb);
            x ^ (x >> 31)
        }
        let k = mix(self.seed ^ mix(self.index.wrapping_add(0x9e3779b97f4a7c15)));
        StdRng::seed_from_u64(k)
    }
}

/// Vertices of a random convex polygon as `[x, y]` pairs with integral values.
pub fn convex_points<R: Rng>(cfg: &ValtrCfg, rng: &mut R) -> Vec<[f64; 2]> {
    let n = cfg.vertex_count.sample(rng);
    let lo = cfg.coord_min.min(cfg.coord_max);
    let hi = cfg.coord_min.max(cfg.coord_max);

    let mut xs: Vec<i64> = (0..n).map(|_| rng.gen_range(lo..=hi)).collect();
    let mut ys: Vec<i64> = (0..n).map(|_| rng.gen_range(lo..=hi)).collect();
    xs.sort_unstable();
    ys.sort_unstable();

    let x_steps = split_into_chains(&xs, rng);
    let mut y_steps = split_into_chains(&ys, rng);
    y_steps.shuffle(rng);

    let mut steps: Vec<(i64, i64)> = x_steps.into_iter().zip(y_steps).collect();
    steps.sort_by(|a, b| step_angle(*a).total_cmp(&step_angle(*b)));

    let mut cursor = (0i64, 0i64);
    let mut min = (0i64, 0i64);
    let mut path = Vec::with_capacity(n);
    for (dx, dy) in steps {
        path.push(cursor);
        cursor = (cursor.0 + dx, cursor.1 + dy);
        min = (min.0.min(cursor.0), min.1.min(cursor.1));
    }
    let shift = (xs[0] - min.0, ys[0] - min.1);
    path.into_iter()
        .map(|(x, y)| [(x + shift.0) as f64, (y + shift.1) as f64])
        .collect()
}

/// Draw one polygon for `tok`.
pub fn draw_convex_polygon(cfg: ValtrCfg, tok: ReplayToken) -> Result<Polygon, GeometryError> {
    let mut rng = tok.rng();
    Polygon::from_coords(&convex_points(&cfg, &mut rng))
}

/// Uniform integer position in `[-range, range)` on both axes.
pub fn random_position<R: Rng>(rng: &mut R, range: i64) -> Vector2<i64> {
    let r = range.saturating_abs().max(1);
    Vector2::new(rng.gen_range(-r..r), rng.gen_range(-r..r))
}

/// Signed steps of two chains from min to max; they sum to zero.
fn split_into_chains<R: Rng>(sorted: &[i64], rng: &mut R) -> Vec<i64> {
    let (min, max) = (sorted[0], sorted[sorted.len() - 1]);
    let mut last_low = min;
    let mut last_high = min;
    let mut steps = Vec::with_capacity(sorted.len());
    for &c in &sorted[1..sorted.len() - 1] {
        if rng.gen::<bool>() {
            steps.push(c - last_low);
            last_low = c;
        } else {
            steps.push(last_high - c);
            last_high = c;
        }
    }
    steps.push(max - last_low);
    steps.push(last_high - max);
    steps
}

#[inline]
fn step_angle((dx, dy): (i64, i64)) -> f64 {
    (dx as f64).atan2(dy as f64)
}
