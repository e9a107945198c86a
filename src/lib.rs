pub mod config;
pub mod error;
pub mod grid;
pub mod noise;
pub mod panel;
pub mod presets;
pub mod render;
pub mod rng;
pub mod terrain;

use std::time::Instant;

use config::TerrainConfig;
use error::GenerateError;
use terrain::Terrain;

pub use panel::ParameterPanelController;

pub struct Timing {
    pub name: &'static str,
    pub ms: f64,
}

/// Generate the heightmap and its color map for `config`.
///
/// Deterministic: the same config (seed included) always yields the same terrain.
pub fn generate(config: &TerrainConfig) -> Result<(Terrain, Vec<Timing>), GenerateError> {
    let mut timings = Vec::new();
    let total_start = Instant::now();

    // 1. Heightmap
    let t = Instant::now();
    let heights = terrain::build_heightmap(config)?;
    timings.push(Timing {
        name: "heightmap",
        ms: t.elapsed().as_secs_f64() * 1000.0,
    });

    // 2. Render
    let t = Instant::now();
    let rgba = render::render_map(&heights, config.color_setting, config.height_scale);
    timings.push(Timing {
        name: "render",
        ms: t.elapsed().as_secs_f64() * 1000.0,
    });

    let total_ms = total_start.elapsed().as_secs_f64() * 1000.0;
    timings.push(Timing {
        name: "TOTAL",
        ms: total_ms,
    });

    let terrain = Terrain {
        config: *config,
        heights,
        rgba,
    };

    Ok((terrain, timings))
}
