use rayon::prelude::*;
use tracing::debug;

use crate::config::TerrainConfig;
use crate::error::GenerateError;
use crate::grid::Grid;
use crate::noise::{Fractal, fbm};
use crate::rng::seed_u32;

/// Largest accepted grid side, in cells.
pub const MAX_SIDE: i32 = 4096;
/// Octave counts above this are clamped.
pub const MAX_OCTAVES: i32 = 32;
/// `scale` values at or below zero are clamped to this.
pub const MIN_SCALE: f32 = 0.0001;

const SALT_HEIGHT: u64 = 0x4E16_47A1_5CA1_E000;

/// A generated heightmap and its color rendering.
#[derive(Clone, Debug)]
pub struct Terrain {
    pub config: TerrainConfig,
    pub heights: Grid<f32>,
    pub rgba: Vec<u8>,
}

impl Terrain {
    pub fn width(&self) -> usize {
        self.heights.w
    }

    pub fn height(&self) -> usize {
        self.heights.h
    }
}

/// The single regeneration entry point the panel drives.
pub trait Generator {
    /// Synchronously recomputes and redisplays the terrain for `config`.
    fn regenerate(&mut self, config: &TerrainConfig) -> Result<(), GenerateError>;
}

/// Grid dimensions for `config`, rejecting empty or oversized grids.
pub fn grid_dims(config: &TerrainConfig) -> Result<(usize, usize), GenerateError> {
    let ok = |side: i32| (1..=MAX_SIDE).contains(&side);
    if !ok(config.size_x) || !ok(config.size_y) {
        return Err(GenerateError::InvalidSize {
            size_x: config.size_x,
            size_y: config.size_y,
            max: MAX_SIDE,
        });
    }
    Ok((config.size_x as usize, config.size_y as usize))
}

/// Build the heightmap.
///
/// Each cell samples fractal noise at `(cell + offset) / scale`, remaps it to
/// [0, 1], raises it to the `dampening` power (values above 1 flatten lowlands,
/// below 1 lift them) and multiplies by `height_scale`.
pub fn build_heightmap(config: &TerrainConfig) -> Result<Grid<f32>, GenerateError> {
    let (w, h) = grid_dims(config)?;

    let scale = if config.scale <= 0.0 { MIN_SCALE } else { config.scale };
    let fractal = Fractal {
        octaves: config.octaves.clamp(0, MAX_OCTAVES) as u32,
        persistence: config.persistence,
        lacunarity: config.lacunarity,
    };
    let dampening = config.dampening.max(0.0);
    let noise_seed = seed_u32(config.seed as u64, SALT_HEIGHT);
    let offset = config.offset;

    let mut data = vec![0.0f32; w * h];
    data.par_chunks_mut(w).enumerate().for_each(|(y, row)| {
        for (x, cell) in row.iter_mut().enumerate() {
            let sx = (x as f32 + offset.x) / scale;
            let sy = (y as f32 + offset.y) / scale;
            let n = fbm(sx, sy, noise_seed, fractal);
            let n01 = (n * 0.5 + 0.5).clamp(0.0, 1.0);
            *cell = n01.powf(dampening) * config.height_scale;
        }
    });

    Ok(Grid::from_vec(w, h, data))
}

/// Reference generator: keeps the latest terrain in memory.
#[derive(Debug, Default)]
pub struct TerrainGenerator {
    terrain: Option<Terrain>,
    generations: u64,
}

impl TerrainGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Most recent successfully generated terrain.
    pub fn terrain(&self) -> Option<&Terrain> {
        self.terrain.as_ref()
    }

    /// Number of successful regenerations.
    pub fn generations(&self) -> u64 {
        self.generations
    }
}

impl Generator for TerrainGenerator {
    fn regenerate(&mut self, config: &TerrainConfig) -> Result<(), GenerateError> {
        let (terrain, timings) = crate::generate(config)?;
        for t in &timings {
            debug!(stage = t.name, ms = t.ms, "terrain timing");
        }
        self.terrain = Some(terrain);
        self.generations += 1;
        Ok(())
    }
}
