use rayon::prelude::*;

use crate::config::ColorSetting;
use crate::grid::Grid;

// Terrain palette, indexed by height relative to height_scale
const WATER_DEEP: [u8; 4] = [18, 36, 70, 255];
const WATER_MID: [u8; 4] = [32, 55, 92, 255];
const COAST_SHALLOW: [u8; 4] = [52, 100, 145, 255];
const BEACH_SAND: [u8; 4] = [210, 200, 160, 255];
const LAND_LOW: [u8; 4] = [70, 130, 62, 255];
const LAND_MID: [u8; 4] = [140, 180, 100, 255];
const LAND_HIGH: [u8; 4] = [190, 170, 120, 255];
const MOUNTAIN_LOW: [u8; 4] = [140, 120, 100, 255];
const MOUNTAIN_HIGH: [u8; 4] = [220, 220, 215, 255];
const SNOW: [u8; 4] = [245, 248, 250, 255];

const SEA_LEVEL: f32 = 0.35;
const BEACH_TOP: f32 = 0.37;

// Heat stops, low to high
const HEAT_COLD: [u8; 4] = [220, 230, 255, 255];
const HEAT_COOL: [u8; 4] = [80, 180, 220, 255];
const HEAT_MILD: [u8; 4] = [60, 160, 80, 255];
const HEAT_WARM: [u8; 4] = [220, 200, 60, 255];
const HEAT_HOT: [u8; 4] = [200, 50, 30, 255];

#[inline]
fn lerp_color(a: [u8; 4], b: [u8; 4], t: f32) -> [u8; 4] {
    let t = t.clamp(0.0, 1.0);
    [
        (a[0] as f32 + (b[0] as f32 - a[0] as f32) * t).round() as u8,
        (a[1] as f32 + (b[1] as f32 - a[1] as f32) * t).round() as u8,
        (a[2] as f32 + (b[2] as f32 - a[2] as f32) * t).round() as u8,
        255,
    ]
}

fn terrain_color(t: f32) -> [u8; 4] {
    if t < SEA_LEVEL {
        let depth = (SEA_LEVEL - t) / SEA_LEVEL;
        if depth < 0.5 {
            lerp_color(COAST_SHALLOW, WATER_MID, depth / 0.5)
        } else {
            lerp_color(WATER_MID, WATER_DEEP, (depth - 0.5) / 0.5)
        }
    } else if t < BEACH_TOP {
        BEACH_SAND
    } else if t < 0.6 {
        lerp_color(LAND_LOW, LAND_MID, (t - BEACH_TOP) / (0.6 - BEACH_TOP))
    } else if t < 0.75 {
        lerp_color(LAND_MID, LAND_HIGH, (t - 0.6) / 0.15)
    } else if t < 0.88 {
        lerp_color(MOUNTAIN_LOW, MOUNTAIN_HIGH, (t - 0.75) / 0.13)
    } else {
        lerp_color(MOUNTAIN_HIGH, SNOW, (t - 0.88) / 0.12)
    }
}

fn heat_color(t: f32) -> [u8; 4] {
    if t < 0.25 {
        lerp_color(HEAT_COLD, HEAT_COOL, t / 0.25)
    } else if t < 0.5 {
        lerp_color(HEAT_COOL, HEAT_MILD, (t - 0.25) / 0.25)
    } else if t < 0.75 {
        lerp_color(HEAT_MILD, HEAT_WARM, (t - 0.5) / 0.25)
    } else {
        lerp_color(HEAT_WARM, HEAT_HOT, (t - 0.75) / 0.25)
    }
}

/// Render the color map for `setting`.
///
/// Heights are read relative to `height_scale`, so the palette tracks
/// dampening. A zero `height_scale` falls back to the grid's own range.
pub fn render_map(height: &Grid<f32>, setting: ColorSetting, height_scale: f32) -> Vec<u8> {
    let w = height.w;
    let h = height.h;
    let mut rgba = vec![0u8; w * h * 4];
    if w == 0 {
        return rgba;
    }

    let (lo, range) = if height_scale.abs() > f32::EPSILON {
        (0.0, height_scale)
    } else {
        let (min_h, max_h) = height.min_max();
        (min_h, (max_h - min_h).max(f32::EPSILON))
    };

    rgba.par_chunks_mut(w * 4).enumerate().for_each(|(y, row)| {
        for x in 0..w {
            let t = ((height.get(x, y) - lo) / range).clamp(0.0, 1.0);
            let color = match setting {
                ColorSetting::Terrain => terrain_color(t),
                ColorSetting::Grayscale => {
                    let v = (t * 255.0).round() as u8;
                    [v, v, v, 255]
                }
                ColorSetting::Heat => heat_color(t),
            };
            row[x * 4..x * 4 + 4].copy_from_slice(&color);
        }
    });

    rgba
}

/// Diagnostic: grayscale heightmap stretched over the grid's own range.
pub fn render_heightmap(height: &Grid<f32>) -> Vec<u8> {
    let (min_h, max_h) = height.min_max();
    let range = (max_h - min_h).max(f32::EPSILON);
    let mut rgba = vec![0u8; height.w * height.h * 4];
    for (i, px) in rgba.chunks_exact_mut(4).enumerate() {
        let t = (height.data[i] - min_h) / range;
        let v = (t * 255.0).clamp(0.0, 255.0) as u8;
        px.copy_from_slice(&[v, v, v, 255]);
    }
    rgba
}
