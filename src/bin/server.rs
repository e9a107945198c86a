use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use base64::Engine;
use clap::Parser;
use image::ImageEncoder;
use image::codecs::png::PngEncoder;
use serde::{Deserialize, Serialize};
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tracing::{info, warn};

use terrain_panel::ParameterPanelController;
use terrain_panel::config::{self, TerrainConfig};
use terrain_panel::error::PanelError;
use terrain_panel::panel::{ButtonId, ControlId, ControlValue, ControlValues, DisplayState, PanelEvent};
use terrain_panel::presets::PresetGallery;
use terrain_panel::render;
use terrain_panel::rng::EntropySeeds;
use terrain_panel::terrain::{Terrain, TerrainGenerator};

type Panel = ParameterPanelController<TerrainGenerator, ControlValues, PresetGallery, EntropySeeds>;
type SharedPanel = Arc<Mutex<Panel>>;

#[derive(Parser, Debug)]
#[command(about = "Serve the terrain parameter panel over HTTP")]
struct Args {
    #[arg(short, long, default_value = "127.0.0.1:3000")]
    bind: SocketAddr,

    /// JSON terrain config for the initial (and reset) values
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Static frontend served for non-API paths
    #[arg(long, default_value = "frontend")]
    frontend: PathBuf,
}

#[derive(Deserialize)]
struct ControlRequest {
    control: ControlId,
    value: ControlValue,
}

#[derive(Deserialize)]
struct DisplayRequest {
    target: DisplayState,
}

#[derive(Serialize)]
struct PanelState {
    config: TerrainConfig,
    /// Values "reset" restores; the seed is the live one.
    original: TerrainConfig,
    display: DisplayState,
    layers: Vec<Layer>,
    width: usize,
    height: usize,
}

#[derive(Serialize)]
struct Layer {
    name: String,
    data_url: String,
}

struct ApiError(StatusCode, String);

impl From<PanelError> for ApiError {
    fn from(e: PanelError) -> Self {
        let status = match e {
            PanelError::Regenerate(_) | PanelError::UnknownColorSetting(_) => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        ApiError(status, e.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        warn!(status = %self.0, "{}", self.1);
        (self.0, self.1).into_response()
    }
}

fn encode_png(rgba: &[u8], w: usize, h: usize) -> Result<String, ApiError> {
    let mut buf = Vec::new();
    let encoder = PngEncoder::new(&mut buf);
    encoder
        .write_image(rgba, w as u32, h as u32, image::ExtendedColorType::Rgba8)
        .map_err(|e| ApiError(StatusCode::INTERNAL_SERVER_ERROR, format!("PNG encode failed: {e}")))?;
    let b64 = base64::engine::general_purpose::STANDARD.encode(&buf);
    Ok(format!("data:image/png;base64,{}", b64))
}

fn snapshot(panel: &Panel) -> Result<PanelState, ApiError> {
    let display = panel.display_state();
    let terrain: Option<&Terrain> = match display.preset() {
        Some(p) => panel.displays().preset(p),
        None => panel.generator().terrain(),
    };

    let (layers, width, height) = match terrain {
        Some(t) => {
            let (w, h) = (t.width(), t.height());
            let layers = vec![
                Layer {
                    name: "map".into(),
                    data_url: encode_png(&t.rgba, w, h)?,
                },
                Layer {
                    name: "heightmap".into(),
                    data_url: encode_png(&render::render_heightmap(&t.heights), w, h)?,
                },
            ];
            (layers, w, h)
        }
        None => (Vec::new(), 0, 0),
    };

    let config = *panel.config();
    Ok(PanelState {
        config,
        original: panel.original().apply_to(config.seed),
        display,
        layers,
        width,
        height,
    })
}

/// Locks the panel, recovering it if an earlier event panicked mid-regeneration.
/// The config keeps the written field and the generator keeps its last terrain.
fn lock_panel<T>(panel: &Mutex<T>) -> MutexGuard<'_, T> {
    panel.lock().unwrap_or_else(|poisoned| {
        warn!("panel lock poisoned by an earlier event; recovering");
        PoisonError::into_inner(poisoned)
    })
}

/// Runs one panel event on the blocking pool. The mutex serializes events.
async fn run_event<F>(panel: SharedPanel, f: F) -> Result<Json<PanelState>, ApiError>
where
    F: FnOnce(&mut Panel) -> Result<(), PanelError> + Send + 'static,
{
    tokio::task::spawn_blocking(move || -> Result<Json<PanelState>, ApiError> {
        let mut panel = lock_panel(&panel);
        f(&mut *panel)?;
        snapshot(&panel).map(Json)
    })
    .await
    .map_err(|e| ApiError(StatusCode::INTERNAL_SERVER_ERROR, format!("panel task failed: {e}")))?
}

async fn state_handler(State(panel): State<SharedPanel>) -> Result<Json<PanelState>, ApiError> {
    run_event(panel, |_| Ok(())).await
}

async fn control_handler(
    State(panel): State<SharedPanel>,
    Json(req): Json<ControlRequest>,
) -> Result<Json<PanelState>, ApiError> {
    run_event(panel, move |p| {
        p.handle(PanelEvent::ControlChanged(req.control, req.value))
    })
    .await
}

async fn generate_handler(State(panel): State<SharedPanel>) -> Result<Json<PanelState>, ApiError> {
    run_event(panel, |p| p.handle(PanelEvent::ButtonPressed(ButtonId::Generate))).await
}

async fn reset_handler(State(panel): State<SharedPanel>) -> Result<Json<PanelState>, ApiError> {
    run_event(panel, |p| p.handle(PanelEvent::ButtonPressed(ButtonId::Reset))).await
}

async fn display_handler(
    State(panel): State<SharedPanel>,
    Json(req): Json<DisplayRequest>,
) -> Result<Json<PanelState>, ApiError> {
    let button = match req.target {
        DisplayState::Default => ButtonId::DefaultTerrain,
        DisplayState::Preset1 => ButtonId::Preset1,
        DisplayState::Preset2 => ButtonId::Preset2,
        DisplayState::Preset3 => ButtonId::Preset3,
    };
    run_event(panel, move |p| p.handle(PanelEvent::ButtonPressed(button))).await
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    let initial = match &args.config {
        Some(path) => config::load_from_file(path)?,
        None => TerrainConfig::default(),
    };

    let panel = tokio::task::spawn_blocking(move || -> anyhow::Result<Panel> {
        let mut panel = ParameterPanelController::new(
            initial,
            TerrainGenerator::new(),
            ControlValues::full(),
            PresetGallery::build()?,
            EntropySeeds,
        )?;
        panel.regenerate()?;
        Ok(panel)
    })
    .await??;
    let shared: SharedPanel = Arc::new(Mutex::new(panel));

    let app = Router::new()
        .route("/api/state", get(state_handler))
        .route("/api/control", post(control_handler))
        .route("/api/generate", post(generate_handler))
        .route("/api/reset", post(reset_handler))
        .route("/api/display", post(display_handler))
        .fallback_service(ServeDir::new(&args.frontend))
        .layer(CorsLayer::permissive())
        .with_state(shared);

    info!("terrain panel at http://{}", args.bind);

    let listener = tokio::net::TcpListener::bind(args.bind).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
