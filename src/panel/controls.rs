use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use serde::{Deserialize, Serialize};

use super::binding::{ControlId, ControlValue};
use super::display::Preset;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ButtonId {
    Generate,
    Reset,
    DefaultTerrain,
    Preset1,
    Preset2,
    Preset3,
}

impl ButtonId {
    pub const ALL: [ButtonId; 6] = [
        Self::Generate,
        Self::Reset,
        Self::DefaultTerrain,
        Self::Preset1,
        Self::Preset2,
        Self::Preset3,
    ];
}

impl fmt::Display for ButtonId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Generate => "generate",
            Self::Reset => "reset",
            Self::DefaultTerrain => "default_terrain",
            Self::Preset1 => "preset1",
            Self::Preset2 => "preset2",
            Self::Preset3 => "preset3",
        })
    }
}

/// Widget host seen by the panel. User interaction is delivered back as a [`PanelEvent`].
pub trait ControlSurface {
    fn is_bound(&self, id: ControlId) -> bool;
    fn has_button(&self, button: ButtonId) -> bool;
    fn value(&self, id: ControlId) -> Option<ControlValue>;
    /// Updates the displayed value. Must not emit a change event.
    fn set_value(&mut self, id: ControlId, value: ControlValue);
}

/// A user interaction on the panel.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PanelEvent {
    ControlChanged(ControlId, ControlValue),
    ButtonPressed(ButtonId),
}

impl PanelEvent {
    pub fn source(&self) -> EventSource {
        match *self {
            Self::ControlChanged(id, _) => EventSource::Control(id),
            Self::ButtonPressed(b) => EventSource::Button(b),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum EventSource {
    Control(ControlId),
    Button(ButtonId),
}

impl fmt::Display for EventSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Control(id) => write!(f, "control {id}"),
            Self::Button(b) => write!(f, "button {b}"),
        }
    }
}

/// What the panel does when a subscribed source fires.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Handler {
    /// Write the control's field, then regenerate.
    Field(ControlId),
    GenerateNewTerrain,
    ResetToOriginal,
    ActivatePreset(Preset),
    ActivateDefault,
}

/// One handler per event source. Subscribing again replaces, so registration is idempotent.
#[derive(Clone, Debug, Default)]
pub struct Subscriptions {
    table: BTreeMap<EventSource, Handler>,
}

impl Subscriptions {
    pub fn clear(&mut self) {
        self.table.clear();
    }

    pub fn subscribe(&mut self, source: EventSource, handler: Handler) {
        self.table.insert(source, handler);
    }

    pub fn handler(&self, source: EventSource) -> Option<Handler> {
        self.table.get(&source).copied()
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}

/// In-memory widget values, used by the CLI, the server and tests.
#[derive(Clone, Debug, Default)]
pub struct ControlValues {
    values: BTreeMap<ControlId, ControlValue>,
    bound: BTreeSet<ControlId>,
    buttons: BTreeSet<ButtonId>,
}

impl ControlValues {
    /// Every control and every button bound.
    pub fn full() -> Self {
        Self {
            values: BTreeMap::new(),
            bound: ControlId::ALL.into_iter().collect(),
            buttons: ButtonId::ALL.into_iter().collect(),
        }
    }

    pub fn without_control(mut self, id: ControlId) -> Self {
        self.bound.remove(&id);
        self
    }

    pub fn without_button(mut self, button: ButtonId) -> Self {
        self.buttons.remove(&button);
        self
    }
}

impl ControlSurface for ControlValues {
    fn is_bound(&self, id: ControlId) -> bool {
        self.bound.contains(&id)
    }

    fn has_button(&self, button: ButtonId) -> bool {
        self.buttons.contains(&button)
    }

    fn value(&self, id: ControlId) -> Option<ControlValue> {
        self.values.get(&id).copied()
    }

    fn set_value(&mut self, id: ControlId, value: ControlValue) {
        if self.bound.contains(&id) {
            self.values.insert(id, value);
        }
    }
}
