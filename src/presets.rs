//! Built-in preset terrains shown by the preset buttons.

use tracing::info;

use crate::config::{ColorSetting, Offset, TerrainConfig};
use crate::error::GenerateError;
use crate::panel::{DisplayObjects, DisplayState, Preset, VisibilityFlags};
use crate::terrain::Terrain;

/// Config baked into each preset.
pub fn preset_config(preset: Preset) -> TerrainConfig {
    match preset {
        // Islands: low, wide features; most cells under sea level
        Preset::One => TerrainConfig {
            size_x: 160,
            size_y: 160,
            height_scale: 12.0,
            scale: 40.0,
            dampening: 1.8,
            octaves: 5,
            persistence: 0.45,
            lacunarity: 2.1,
            offset: Offset::new(0.0, 0.0),
            color_setting: ColorSetting::Terrain,
            seed: 1337,
        },
        // Highlands: rough, high-amplitude relief
        Preset::Two => TerrainConfig {
            size_x: 160,
            size_y: 160,
            height_scale: 45.0,
            scale: 18.0,
            dampening: 0.7,
            octaves: 7,
            persistence: 0.6,
            lacunarity: 2.3,
            offset: Offset::new(250.0, -120.0),
            color_setting: ColorSetting::Terrain,
            seed: 90210,
        },
        // Dunes: smooth single-band relief in heat colors
        Preset::Three => TerrainConfig {
            size_x: 160,
            size_y: 160,
            height_scale: 8.0,
            scale: 12.0,
            dampening: 1.0,
            octaves: 2,
            persistence: 0.3,
            lacunarity: 1.8,
            offset: Offset::new(-75.0, 40.0),
            color_setting: ColorSetting::Heat,
            seed: 4242,
        },
    }
}

/// Default terrain slot plus the three pre-generated preset terrains, as display objects.
pub struct PresetGallery {
    presets: Vec<(Preset, Terrain)>,
    flags: VisibilityFlags,
}

impl PresetGallery {
    /// Generates every preset terrain once.
    pub fn build() -> Result<Self, GenerateError> {
        let presets = Preset::ALL
            .into_iter()
            .map(|p| -> Result<(Preset, Terrain), GenerateError> {
                let (terrain, _) = crate::generate(&preset_config(p))?;
                info!(preset = p.number(), w = terrain.width(), h = terrain.height(), "preset generated");
                Ok((p, terrain))
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            presets,
            flags: VisibilityFlags::default(),
        })
    }

    pub fn preset(&self, preset: Preset) -> Option<&Terrain> {
        self.presets.iter().find(|(p, _)| *p == preset).map(|(_, t)| t)
    }

    /// The visible object, if exactly one is visible.
    pub fn shown(&self) -> Option<DisplayState> {
        self.flags.shown()
    }
}

impl DisplayObjects for PresetGallery {
    fn is_bound(&self, target: DisplayState) -> bool {
        match target.preset() {
            None => true,
            Some(p) => self.preset(p).is_some(),
        }
    }

    fn set_visible(&mut self, target: DisplayState, visible: bool) {
        self.flags.set_visible(target, visible);
    }

    fn is_visible(&self, target: DisplayState) -> bool {
        self.flags.is_visible(target)
    }
}
