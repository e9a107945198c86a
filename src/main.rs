use std::path::{Path, PathBuf};

use anyhow::{Context, anyhow, bail};
use clap::Parser;
use tracing::info;

use terrain_panel::config::{self, ColorSetting, TerrainConfig};
use terrain_panel::panel::{ControlId, ControlValue, ControlValues, DisplayState, PanelEvent, Preset};
use terrain_panel::presets::PresetGallery;
use terrain_panel::render;
use terrain_panel::rng::EntropySeeds;
use terrain_panel::terrain::{Terrain, TerrainGenerator};
use terrain_panel::ParameterPanelController;

#[derive(Parser, Debug)]
#[command(about = "Drive the terrain parameter panel and save the visible terrain as PNGs")]
struct Args {
    /// JSON terrain config; missing fields use defaults
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Seed override for the initial config
    #[arg(short, long)]
    seed: Option<i32>,

    #[arg(short, long, default_value = "artifacts")]
    out: PathBuf,

    /// Control change, applied in order, e.g. `--set size-x=200 --set color-setting=heat`
    #[arg(long = "set", value_parser = parse_assignment)]
    sets: Vec<(ControlId, ControlValue)>,

    /// Press "generate" after the control changes
    #[arg(long)]
    new_seed: bool,

    /// Press "reset" after the control changes
    #[arg(long)]
    reset: bool,

    /// Show a preset (1-3) instead of the default terrain
    #[arg(long, value_parser = clap::value_parser!(u8).range(1..=3))]
    preset: Option<u8>,
}

fn parse_assignment(s: &str) -> Result<(ControlId, ControlValue), String> {
    let (name, raw) = s
        .split_once('=')
        .ok_or_else(|| format!("expected <control>=<value>, got `{s}`"))?;
    let id = ControlId::from_name(name.trim()).ok_or_else(|| {
        let names: Vec<_> = ControlId::ALL.iter().map(|c| c.name()).collect();
        format!("unknown control `{name}` (expected one of {})", names.join(", "))
    })?;
    let raw = raw.trim();

    if id == ControlId::ColorSetting {
        if let Some(c) = ColorSetting::ALL
            .into_iter()
            .find(|c| format!("{c:?}").eq_ignore_ascii_case(raw))
        {
            return Ok((id, ControlValue::Choice(c.index())));
        }
        let index = raw.parse::<i32>().map_err(|e| format!("{name}: {e}"))?;
        return Ok((id, ControlValue::Choice(index)));
    }

    let v = raw.parse::<f32>().map_err(|e| format!("{name}: {e}"))?;
    Ok((id, ControlValue::Slider(v)))
}

fn save_png(dir: &Path, name: &str, rgba: &[u8], w: usize, h: usize) -> anyhow::Result<()> {
    let path = dir.join(name);
    image::save_buffer(&path, rgba, w as u32, h as u32, image::ColorType::Rgba8)
        .with_context(|| format!("failed to save {}", path.display()))?;
    info!("Saved {}", path.display());
    Ok(())
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    let mut initial = match &args.config {
        Some(path) => config::load_from_file(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => TerrainConfig::default(),
    };
    if let Some(seed) = args.seed {
        initial.seed = seed;
    }

    std::fs::create_dir_all(&args.out).context("failed to create output directory")?;

    info!(
        "Terrain {}x{} seed={} octaves={}",
        initial.size_x, initial.size_y, initial.seed, initial.octaves
    );

    let mut panel = ParameterPanelController::new(
        initial,
        TerrainGenerator::new(),
        ControlValues::full(),
        PresetGallery::build()?,
        EntropySeeds,
    )?;
    panel.regenerate()?;

    for &(id, value) in &args.sets {
        panel.handle(PanelEvent::ControlChanged(id, value))?;
    }
    if args.new_seed {
        panel.generate_new_terrain()?;
    }
    if args.reset {
        panel.reset_to_original()?;
    }
    if let Some(n) = args.preset {
        let preset = Preset::from_number(n).ok_or_else(|| anyhow!("no preset {n}"))?;
        panel.activate_preset(preset);
    }

    let shown = panel.displays().shown().unwrap_or(DisplayState::Default);
    let terrain: &Terrain = match shown.preset() {
        Some(p) => panel
            .displays()
            .preset(p)
            .ok_or_else(|| anyhow!("preset {} missing", p.number()))?,
        None => match panel.generator().terrain() {
            Some(t) => t,
            None => bail!("no terrain generated"),
        },
    };

    let c = panel.config();
    info!(
        "Showing {} | live config: {}x{} seed={} color={:?}",
        shown, c.size_x, c.size_y, c.seed, c.color_setting
    );

    let (w, h) = (terrain.width(), terrain.height());
    save_png(&args.out, "map.png", &terrain.rgba, w, h)?;
    save_png(&args.out, "heightmap.png", &render::render_heightmap(&terrain.heights), w, h)?;

    info!("Done.");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_slider_assignment() {
        assert_eq!(
            parse_assignment("size-x=20").unwrap(),
            (ControlId::SizeX, ControlValue::Slider(20.0))
        );
        assert_eq!(
            parse_assignment("offset-y = -2.5").unwrap(),
            (ControlId::OffsetY, ControlValue::Slider(-2.5))
        );
    }

    #[test]
    fn parses_color_by_name_or_index() {
        assert_eq!(
            parse_assignment("color-setting=heat").unwrap(),
            (ControlId::ColorSetting, ControlValue::Choice(2))
        );
        assert_eq!(
            parse_assignment("color-setting=1").unwrap(),
            (ControlId::ColorSetting, ControlValue::Choice(1))
        );
    }

    #[test]
    fn rejects_bad_assignments() {
        assert!(parse_assignment("size-x").is_err());
        assert!(parse_assignment("seed=4").is_err());
        assert!(parse_assignment("scale=big").is_err());
    }
}
