use thiserror::Error;

use crate::panel::{ButtonId, ControlId, DisplayState, EventSource};

/// Failures of the terrain generator's regeneration entry point.
#[derive(Debug, Error)]
pub enum GenerateError {
    #[error("invalid grid size {size_x}x{size_y} (each side must be in 1..={max})")]
    InvalidSize { size_x: i32, size_y: i32, max: i32 },
    #[error("generator failed: {0}")]
    Other(String),
}

#[derive(Debug, Error)]
pub enum PanelError {
    #[error("control {0} is not bound")]
    UnboundControl(ControlId),
    #[error("button {0} is not bound")]
    UnboundButton(ButtonId),
    #[error("display object {0} is not bound")]
    UnboundDisplay(DisplayState),
    #[error("no handler subscribed for {0}")]
    Unsubscribed(EventSource),
    #[error("unknown color setting index {0}")]
    UnknownColorSetting(i32),
    #[error("regeneration failed: {0}")]
    Regenerate(#[from] GenerateError),
}
