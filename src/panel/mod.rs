pub mod binding;
pub mod controller;
pub mod controls;
pub mod display;

pub use binding::{Coerced, Coercion, ControlId, ControlValue, FieldMutation};
pub use controller::ParameterPanelController;
pub use controls::{ButtonId, ControlSurface, ControlValues, EventSource, Handler, PanelEvent, Subscriptions};
pub use display::{DisplayObjects, DisplayState, Preset, VisibilityFlags, render_display, visible_count};
