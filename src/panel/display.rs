use std::fmt;

use serde::{Deserialize, Serialize};

/// Which terrain object is on screen. Exactly one at a time.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DisplayState {
    #[default]
    Default,
    Preset1,
    Preset2,
    Preset3,
}

impl DisplayState {
    pub const ALL: [DisplayState; 4] = [Self::Default, Self::Preset1, Self::Preset2, Self::Preset3];

    pub fn preset(self) -> Option<Preset> {
        match self {
            Self::Default => None,
            Self::Preset1 => Some(Preset::One),
            Self::Preset2 => Some(Preset::Two),
            Self::Preset3 => Some(Preset::Three),
        }
    }
}

impl fmt::Display for DisplayState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Default => "default",
            Self::Preset1 => "preset1",
            Self::Preset2 => "preset2",
            Self::Preset3 => "preset3",
        })
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Preset {
    One,
    Two,
    Three,
}

impl Preset {
    pub const ALL: [Preset; 3] = [Self::One, Self::Two, Self::Three];

    /// 1-based number shown on the preset button.
    pub fn number(self) -> u8 {
        match self {
            Self::One => 1,
            Self::Two => 2,
            Self::Three => 3,
        }
    }

    pub fn from_number(n: u8) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.number() == n)
    }
}

impl From<Preset> for DisplayState {
    fn from(p: Preset) -> Self {
        match p {
            Preset::One => Self::Preset1,
            Preset::Two => Self::Preset2,
            Preset::Three => Self::Preset3,
        }
    }
}

/// The four visual objects the panel switches between.
pub trait DisplayObjects {
    fn is_bound(&self, target: DisplayState) -> bool;
    fn set_visible(&mut self, target: DisplayState, visible: bool);
    fn is_visible(&self, target: DisplayState) -> bool;
}

/// Hides every object, then shows the one matching `state`.
pub fn render_display<D: DisplayObjects + ?Sized>(objects: &mut D, state: DisplayState) {
    for target in DisplayState::ALL {
        objects.set_visible(target, false);
    }
    objects.set_visible(state, true);
}

/// Number of objects currently reporting visible.
pub fn visible_count<D: DisplayObjects + ?Sized>(objects: &D) -> usize {
    DisplayState::ALL
        .into_iter()
        .filter(|&t| objects.is_visible(t))
        .count()
}

/// Plain visibility flags, one per display object.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct VisibilityFlags {
    flags: [bool; 4],
}

impl VisibilityFlags {
    fn slot(target: DisplayState) -> usize {
        match target {
            DisplayState::Default => 0,
            DisplayState::Preset1 => 1,
            DisplayState::Preset2 => 2,
            DisplayState::Preset3 => 3,
        }
    }

    /// The single visible object, if exactly one is visible.
    pub fn shown(&self) -> Option<DisplayState> {
        let mut visible = DisplayState::ALL.into_iter().filter(|&t| self.is_visible(t));
        match (visible.next(), visible.next()) {
            (Some(t), None) => Some(t),
            _ => None,
        }
    }
}

impl DisplayObjects for VisibilityFlags {
    fn is_bound(&self, _target: DisplayState) -> bool {
        true
    }

    fn set_visible(&mut self, target: DisplayState, visible: bool) {
        self.flags[Self::slot(target)] = visible;
    }

    fn is_visible(&self, target: DisplayState) -> bool {
        self.flags[Self::slot(target)]
    }
}
