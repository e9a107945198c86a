//! Control-to-field bindings.
//!
//! Every control maps to exactly one [`TerrainConfig`] field through a fixed
//! [`Coercion`]. Turning a raw control value into a [`FieldMutation`] is pure,
//! so the rules can be checked without any widget toolkit.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::config::{ColorSetting, TerrainConfig};
use crate::error::PanelError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ControlId {
    SizeX,
    SizeY,
    HeightScale,
    Scale,
    Dampening,
    Octaves,
    Persistence,
    Lacunarity,
    ColorSetting,
    OffsetX,
    OffsetY,
}

impl ControlId {
    pub const ALL: [ControlId; 11] = [
        Self::SizeX,
        Self::SizeY,
        Self::HeightScale,
        Self::Scale,
        Self::Dampening,
        Self::Octaves,
        Self::Persistence,
        Self::Lacunarity,
        Self::ColorSetting,
        Self::OffsetX,
        Self::OffsetY,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::SizeX => "size-x",
            Self::SizeY => "size-y",
            Self::HeightScale => "height-scale",
            Self::Scale => "scale",
            Self::Dampening => "dampening",
            Self::Octaves => "octaves",
            Self::Persistence => "persistence",
            Self::Lacunarity => "lacunarity",
            Self::ColorSetting => "color-setting",
            Self::OffsetX => "offset-x",
            Self::OffsetY => "offset-y",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|id| id.name() == name)
    }

    pub fn coercion(self) -> Coercion {
        match self {
            Self::SizeX | Self::SizeY | Self::Octaves => Coercion::RoundToInt,
            Self::ColorSetting => Coercion::EnumIndex,
            _ => Coercion::Identity,
        }
    }

    /// Coerces a raw control value into the mutation of this control's field.
    ///
    /// The value conversion is the one named by [`ControlId::coercion`].
    pub fn mutation(self, raw: ControlValue) -> Result<FieldMutation, PanelError> {
        let coerced = self.coercion().coerce(raw)?;
        let m = match (self, coerced) {
            (Self::SizeX, Coerced::Int(v)) => FieldMutation::SizeX(v),
            (Self::SizeY, Coerced::Int(v)) => FieldMutation::SizeY(v),
            (Self::Octaves, Coerced::Int(v)) => FieldMutation::Octaves(v),
            (Self::HeightScale, Coerced::Float(v)) => FieldMutation::HeightScale(v),
            (Self::Scale, Coerced::Float(v)) => FieldMutation::Scale(v),
            (Self::Dampening, Coerced::Float(v)) => FieldMutation::Dampening(v),
            (Self::Persistence, Coerced::Float(v)) => FieldMutation::Persistence(v),
            (Self::Lacunarity, Coerced::Float(v)) => FieldMutation::Lacunarity(v),
            (Self::OffsetX, Coerced::Float(v)) => FieldMutation::OffsetX(v),
            (Self::OffsetY, Coerced::Float(v)) => FieldMutation::OffsetY(v),
            (Self::ColorSetting, Coerced::Color(v)) => FieldMutation::ColorSetting(v),
            (id, coerced) => unreachable!("{id} has no field for {coerced:?}"),
        };
        Ok(m)
    }

    /// Value this control should display for `config`.
    pub fn read(self, config: &TerrainConfig) -> ControlValue {
        match self {
            Self::SizeX => ControlValue::Slider(config.size_x as f32),
            Self::SizeY => ControlValue::Slider(config.size_y as f32),
            Self::HeightScale => ControlValue::Slider(config.height_scale),
            Self::Scale => ControlValue::Slider(config.scale),
            Self::Dampening => ControlValue::Slider(config.dampening),
            Self::Octaves => ControlValue::Slider(config.octaves as f32),
            Self::Persistence => ControlValue::Slider(config.persistence),
            Self::Lacunarity => ControlValue::Slider(config.lacunarity),
            Self::ColorSetting => ControlValue::Choice(config.color_setting.index()),
            Self::OffsetX => ControlValue::Slider(config.offset.x),
            Self::OffsetY => ControlValue::Slider(config.offset.y),
        }
    }
}

impl fmt::Display for ControlId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// How a raw control value is converted before it is written to its field.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Coercion {
    /// Nearest integer, saturating at the `i32` bounds.
    RoundToInt,
    Identity,
    /// Index into [`ColorSetting::ALL`].
    EnumIndex,
}

impl Coercion {
    pub fn coerce(self, raw: ControlValue) -> Result<Coerced, PanelError> {
        Ok(match self {
            Self::RoundToInt => Coerced::Int(raw.rounded()),
            Self::Identity => Coerced::Float(raw.as_f32()),
            Self::EnumIndex => {
                let index = raw.rounded();
                let setting =
                    ColorSetting::from_index(index).ok_or(PanelError::UnknownColorSetting(index))?;
                Coerced::Color(setting)
            }
        })
    }
}

/// A control value after its [`Coercion`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Coerced {
    Int(i32),
    Float(f32),
    Color(ColorSetting),
}

/// Raw value delivered by a control: a slider position or a dropdown index.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ControlValue {
    Choice(i32),
    Slider(f32),
}

impl ControlValue {
    pub fn as_f32(self) -> f32 {
        match self {
            Self::Slider(v) => v,
            Self::Choice(i) => i as f32,
        }
    }

    /// Nearest integer. Values beyond `i32` saturate.
    pub fn rounded(self) -> i32 {
        match self {
            Self::Slider(v) => v.round() as i32,
            Self::Choice(i) => i,
        }
    }
}

/// A single-field write produced by a control change.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum FieldMutation {
    SizeX(i32),
    SizeY(i32),
    HeightScale(f32),
    Scale(f32),
    Dampening(f32),
    Octaves(i32),
    Persistence(f32),
    Lacunarity(f32),
    ColorSetting(ColorSetting),
    OffsetX(f32),
    OffsetY(f32),
}

impl FieldMutation {
    pub fn apply(self, config: &mut TerrainConfig) {
        match self {
            Self::SizeX(v) => config.size_x = v,
            Self::SizeY(v) => config.size_y = v,
            Self::HeightScale(v) => config.height_scale = v,
            Self::Scale(v) => config.scale = v,
            Self::Dampening(v) => config.dampening = v,
            Self::Octaves(v) => config.octaves = v,
            Self::Persistence(v) => config.persistence = v,
            Self::Lacunarity(v) => config.lacunarity = v,
            Self::ColorSetting(v) => config.color_setting = v,
            // Only one axis is touched; the other keeps its current value.
            Self::OffsetX(v) => config.offset.x = v,
            Self::OffsetY(v) => config.offset.y = v,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Offset;

    #[test]
    fn names_round_trip() {
        for id in ControlId::ALL {
            assert_eq!(ControlId::from_name(id.name()), Some(id));
        }
        assert_eq!(ControlId::from_name("seed"), None);
    }

    #[test]
    fn coercion_table() {
        assert_eq!(ControlId::SizeX.coercion(), Coercion::RoundToInt);
        assert_eq!(ControlId::SizeY.coercion(), Coercion::RoundToInt);
        assert_eq!(ControlId::Octaves.coercion(), Coercion::RoundToInt);
        assert_eq!(ControlId::ColorSetting.coercion(), Coercion::EnumIndex);
        for id in [
            ControlId::HeightScale,
            ControlId::Scale,
            ControlId::Dampening,
            ControlId::Persistence,
            ControlId::Lacunarity,
            ControlId::OffsetX,
            ControlId::OffsetY,
        ] {
            assert_eq!(id.coercion(), Coercion::Identity, "{id}");
        }
    }

    #[test]
    fn mutation_follows_coercion_table() {
        let raw = ControlValue::Slider(2.4);
        for id in ControlId::ALL {
            let m = id.mutation(raw).unwrap();
            let mut config = TerrainConfig::default();
            m.apply(&mut config);
            let expected = match id.coercion() {
                Coercion::RoundToInt => ControlValue::Slider(2.0),
                Coercion::Identity => ControlValue::Slider(2.4),
                Coercion::EnumIndex => ControlValue::Choice(2),
            };
            assert_eq!(id.read(&config), expected, "{id}");
        }
        assert!(matches!(
            Coercion::EnumIndex.coerce(ControlValue::Slider(-1.0)),
            Err(PanelError::UnknownColorSetting(-1))
        ));
    }

    #[test]
    fn integer_fields_round() {
        let m = ControlId::SizeX.mutation(ControlValue::Slider(19.6)).unwrap();
        assert_eq!(m, FieldMutation::SizeX(20));
        let m = ControlId::Octaves.mutation(ControlValue::Slider(3.4)).unwrap();
        assert_eq!(m, FieldMutation::Octaves(3));
    }

    #[test]
    fn out_of_range_floats_pass_through() {
        let m = ControlId::Persistence.mutation(ControlValue::Slider(-7.5)).unwrap();
        assert_eq!(m, FieldMutation::Persistence(-7.5));
        let m = ControlId::SizeY.mutation(ControlValue::Slider(-3.0)).unwrap();
        assert_eq!(m, FieldMutation::SizeY(-3));
    }

    #[test]
    fn color_index_maps_to_enum() {
        let m = ControlId::ColorSetting.mutation(ControlValue::Choice(2)).unwrap();
        assert_eq!(m, FieldMutation::ColorSetting(ColorSetting::Heat));
        assert!(matches!(
            ControlId::ColorSetting.mutation(ControlValue::Choice(9)),
            Err(PanelError::UnknownColorSetting(9))
        ));
    }

    #[test]
    fn offset_axes_are_independent() {
        let mut config = TerrainConfig {
            offset: Offset::new(1.0, 2.0),
            ..TerrainConfig::default()
        };
        FieldMutation::OffsetX(5.0).apply(&mut config);
        assert_eq!(config.offset, Offset::new(5.0, 2.0));
        FieldMutation::OffsetY(-1.0).apply(&mut config);
        assert_eq!(config.offset, Offset::new(5.0, -1.0));
    }

    #[test]
    fn read_then_mutate_is_identity() {
        let config = TerrainConfig {
            size_x: 33,
            height_scale: 4.25,
            color_setting: ColorSetting::Grayscale,
            offset: Offset::new(-2.0, 8.0),
            ..TerrainConfig::default()
        };
        let mut copy = TerrainConfig::default();
        for id in ControlId::ALL {
            id.mutation(id.read(&config)).unwrap().apply(&mut copy);
        }
        assert_eq!(copy, config);
    }

    #[test]
    fn control_value_json_shapes() {
        let v: ControlValue = serde_json::from_str("2").unwrap();
        assert_eq!(v, ControlValue::Choice(2));
        let v: ControlValue = serde_json::from_str("2.5").unwrap();
        assert_eq!(v, ControlValue::Slider(2.5));
    }
}
