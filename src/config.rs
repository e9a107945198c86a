use std::path::Path;

use serde::{Deserialize, Serialize};

/// Noise sampling origin. Plain value type, so snapshots never alias the live config.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Offset {
    pub x: f32,
    pub y: f32,
}

impl Offset {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Coloring mode used when rendering the heightmap.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColorSetting {
    #[default]
    Terrain,
    Grayscale,
    Heat,
}

impl ColorSetting {
    pub const ALL: [ColorSetting; 3] = [Self::Terrain, Self::Grayscale, Self::Heat];

    /// Dropdown index of this mode.
    pub fn index(self) -> i32 {
        match self {
            Self::Terrain => 0,
            Self::Grayscale => 1,
            Self::Heat => 2,
        }
    }

    pub fn from_index(index: i32) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.index() == index)
    }
}

/// All tunable generator parameters. Every field except `seed` is bound to a panel control.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TerrainConfig {
    // Grid
    pub size_x: i32,
    pub size_y: i32,

    // Shape
    pub height_scale: f32,
    pub scale: f32,
    pub dampening: f32,

    // Fractal noise
    pub octaves: i32,
    pub persistence: f32,
    pub lacunarity: f32,
    pub offset: Offset,

    pub color_setting: ColorSetting,
    pub seed: i32,
}

impl Default for TerrainConfig {
    fn default() -> Self {
        Self {
            size_x: 128,
            size_y: 128,
            height_scale: 20.0,
            scale: 25.0,
            dampening: 1.0,
            octaves: 4,
            persistence: 0.5,
            lacunarity: 2.0,
            offset: Offset::default(),
            color_setting: ColorSetting::Terrain,
            seed: 0,
        }
    }
}

impl TerrainConfig {
    /// Overwrites every field from `snapshot`. The seed is kept.
    pub fn restore(&mut self, snapshot: &OriginalSnapshot) {
        *self = snapshot.apply_to(self.seed);
    }
}

/// Immutable copy of a [`TerrainConfig`] minus its seed, taken when the panel initializes.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OriginalSnapshot {
    size_x: i32,
    size_y: i32,
    height_scale: f32,
    scale: f32,
    dampening: f32,
    octaves: i32,
    persistence: f32,
    lacunarity: f32,
    offset: Offset,
    color_setting: ColorSetting,
}

impl OriginalSnapshot {
    pub fn capture(config: &TerrainConfig) -> Self {
        Self {
            size_x: config.size_x,
            size_y: config.size_y,
            height_scale: config.height_scale,
            scale: config.scale,
            dampening: config.dampening,
            octaves: config.octaves,
            persistence: config.persistence,
            lacunarity: config.lacunarity,
            offset: config.offset,
            color_setting: config.color_setting,
        }
    }

    /// Rebuilds a full config from the snapshot with the given seed.
    pub fn apply_to(&self, seed: i32) -> TerrainConfig {
        TerrainConfig {
            size_x: self.size_x,
            size_y: self.size_y,
            height_scale: self.height_scale,
            scale: self.scale,
            dampening: self.dampening,
            octaves: self.octaves,
            persistence: self.persistence,
            lacunarity: self.lacunarity,
            offset: self.offset,
            color_setting: self.color_setting,
            seed,
        }
    }

    /// True when every snapshotted field of `config` equals the snapshot.
    pub fn matches(&self, config: &TerrainConfig) -> bool {
        *self == Self::capture(config)
    }
}

/// Reads a JSON config file. Fields left out fall back to [`TerrainConfig::default`].
pub fn load_from_file(path: impl AsRef<Path>) -> anyhow::Result<TerrainConfig> {
    let s = std::fs::read_to_string(path)?;
    let config: TerrainConfig = serde_json::from_str(&s)?;
    Ok(config)
}
