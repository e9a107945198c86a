//! End-to-end panel behavior against the real terrain generator.

use proptest::prelude::*;

use terrain_panel::ParameterPanelController;
use terrain_panel::config::{ColorSetting, Offset, TerrainConfig};
use terrain_panel::error::{GenerateError, PanelError};
use terrain_panel::panel::{
    ButtonId, ControlId, ControlSurface, ControlValue, ControlValues, DisplayObjects, DisplayState, PanelEvent,
    Preset, VisibilityFlags, visible_count,
};
use terrain_panel::rng::{SEED_RANGE, SplitMixSeeds};
use terrain_panel::terrain::{Generator, TerrainGenerator};

/// Wraps the real generator and counts regeneration calls.
#[derive(Default)]
struct Counting {
    inner: TerrainGenerator,
    calls: usize,
}

impl Generator for Counting {
    fn regenerate(&mut self, config: &TerrainConfig) -> Result<(), GenerateError> {
        self.calls += 1;
        self.inner.regenerate(config)
    }
}

type Panel = ParameterPanelController<Counting, ControlValues, VisibilityFlags, SplitMixSeeds>;

fn scenario_config() -> TerrainConfig {
    TerrainConfig {
        size_x: 10,
        size_y: 10,
        height_scale: 5.0,
        seed: 42,
        ..TerrainConfig::default()
    }
}

fn panel_with(config: TerrainConfig) -> Panel {
    ParameterPanelController::new(
        config,
        Counting::default(),
        ControlValues::full(),
        VisibilityFlags::default(),
        SplitMixSeeds::new(0xC0FFEE),
    )
    .expect("fully bound panel")
}

fn heights(panel: &Panel) -> Vec<f32> {
    panel
        .generator()
        .inner
        .terrain()
        .expect("terrain generated")
        .heights
        .data
        .clone()
}

#[test]
fn test_resize_reset_reseed_scenario() {
    let mut panel = panel_with(scenario_config());

    panel
        .handle(PanelEvent::ControlChanged(ControlId::SizeX, ControlValue::Slider(20.0)))
        .unwrap();
    assert_eq!(panel.config().size_x, 20);
    assert_eq!(panel.generator().calls, 1);
    assert_eq!(panel.generator().inner.terrain().unwrap().width(), 20);

    panel.handle(PanelEvent::ButtonPressed(ButtonId::Reset)).unwrap();
    assert_eq!(panel.config().size_x, 10);
    assert_eq!(panel.config().seed, 42);
    assert_eq!(panel.generator().calls, 2);

    let before = *panel.config();
    panel.handle(PanelEvent::ButtonPressed(ButtonId::Generate)).unwrap();
    let after = *panel.config();
    assert!((0..SEED_RANGE).contains(&after.seed));
    assert_eq!(TerrainConfig { seed: 42, ..after }, before);
    assert_eq!(panel.generator().calls, 3);
}

#[test]
fn test_preset_then_default_scenario() {
    let mut panel = panel_with(scenario_config());

    panel.activate_preset(Preset::Two);
    assert_eq!(panel.display_state(), DisplayState::Preset2);
    assert_eq!(visible_count(panel.displays()), 1);

    panel.activate_default();
    assert_eq!(panel.display_state(), DisplayState::Default);
    assert!(panel.displays().is_visible(DisplayState::Default));
    for p in Preset::ALL {
        assert!(!panel.displays().is_visible(p.into()));
    }
}

#[test]
fn test_reset_matches_initial_terrain() {
    let mut panel = panel_with(scenario_config());
    panel.regenerate().unwrap();
    let initial = heights(&panel);

    let changes = [
        (ControlId::Scale, ControlValue::Slider(3.0)),
        (ControlId::Octaves, ControlValue::Slider(7.0)),
        (ControlId::Dampening, ControlValue::Slider(2.5)),
        (ControlId::OffsetX, ControlValue::Slider(40.0)),
        (ControlId::ColorSetting, ControlValue::Choice(2)),
    ];
    for (id, v) in changes {
        panel.handle(PanelEvent::ControlChanged(id, v)).unwrap();
    }
    assert_ne!(heights(&panel), initial);

    let calls = panel.generator().calls;
    panel.reset_to_original().unwrap();
    assert_eq!(panel.generator().calls, calls + 1);
    assert_eq!(heights(&panel), initial);
}

#[test]
fn test_regeneration_failure_is_propagated() {
    let mut panel = panel_with(scenario_config());
    let r = panel.handle(PanelEvent::ControlChanged(ControlId::SizeY, ControlValue::Slider(0.0)));
    assert!(matches!(
        r,
        Err(PanelError::Regenerate(GenerateError::InvalidSize { .. }))
    ));
    // No rollback: the field keeps the rejected value.
    assert_eq!(panel.config().size_y, 0);
    assert!(panel.generator().inner.terrain().is_none());

    panel.reset_to_original().unwrap();
    assert_eq!(panel.generator().inner.terrain().unwrap().height(), 10);
}

#[test]
fn test_extreme_noise_controls_regenerate() {
    let mut panel = panel_with(scenario_config());
    let changes = [
        (ControlId::Octaves, ControlValue::Slider(40.0)),
        (ControlId::Lacunarity, ControlValue::Slider(1.0e6)),
        (ControlId::Scale, ControlValue::Slider(0.0001)),
        (ControlId::OffsetX, ControlValue::Slider(1.0e12)),
        (ControlId::Octaves, ControlValue::Slider(1.0e9)),
    ];
    for (id, v) in changes {
        panel.handle(PanelEvent::ControlChanged(id, v)).unwrap();
    }
    assert_eq!(panel.generator().calls, changes.len());
    assert_eq!(panel.generator().inner.generations(), changes.len() as u64);
    assert!(heights(&panel).iter().all(|h| h.is_finite()));
}

#[test]
fn test_control_shows_coerced_value() {
    let mut panel = panel_with(scenario_config());
    panel
        .handle(PanelEvent::ControlChanged(ControlId::SizeX, ControlValue::Slider(19.6)))
        .unwrap();
    assert_eq!(panel.config().size_x, 20);
    assert_eq!(
        panel.controls().value(ControlId::SizeX),
        Some(ControlValue::Slider(20.0))
    );
}

#[test]
fn test_offset_controls_are_independent() {
    let mut panel = panel_with(TerrainConfig {
        offset: Offset::new(4.0, 6.0),
        ..scenario_config()
    });
    panel
        .handle(PanelEvent::ControlChanged(ControlId::OffsetX, ControlValue::Slider(-1.0)))
        .unwrap();
    assert_eq!(panel.config().offset, Offset::new(-1.0, 6.0));
    panel
        .handle(PanelEvent::ControlChanged(ControlId::OffsetY, ControlValue::Slider(2.0)))
        .unwrap();
    assert_eq!(panel.config().offset, Offset::new(-1.0, 2.0));
}

#[test]
fn test_same_seed_same_terrain() {
    let mut a = panel_with(scenario_config());
    let mut b = panel_with(scenario_config());
    a.regenerate().unwrap();
    b.regenerate().unwrap();
    assert_eq!(heights(&a), heights(&b));
}

#[test]
fn test_unbound_display_fails_initialization() {
    struct NoPreset3(VisibilityFlags);

    impl DisplayObjects for NoPreset3 {
        fn is_bound(&self, target: DisplayState) -> bool {
            target != DisplayState::Preset3
        }
        fn set_visible(&mut self, target: DisplayState, visible: bool) {
            self.0.set_visible(target, visible);
        }
        fn is_visible(&self, target: DisplayState) -> bool {
            self.0.is_visible(target)
        }
    }

    let r = ParameterPanelController::new(
        scenario_config(),
        Counting::default(),
        ControlValues::full(),
        NoPreset3(VisibilityFlags::default()),
        SplitMixSeeds::new(1),
    );
    assert!(matches!(r, Err(PanelError::UnboundDisplay(DisplayState::Preset3))));
}

fn control_change() -> impl Strategy<Value = (ControlId, ControlValue)> {
    let wide = prop_oneof![3 => -5.0f32..40.0, 1 => -1.0e9f32..1.0e9];
    (
        0..ControlId::ALL.len(),
        -5.0f32..40.0,
        wide,
        0..ColorSetting::ALL.len() as i32,
    )
        .prop_map(|(i, small, wide, c)| {
            let id = ControlId::ALL[i];
            let value = match id {
                ControlId::ColorSetting => ControlValue::Choice(c),
                // Keeps accepted grids small enough to regenerate quickly.
                ControlId::SizeX | ControlId::SizeY => ControlValue::Slider(small),
                _ => ControlValue::Slider(wide),
            };
            (id, value)
        })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn reset_restores_snapshot_after_any_changes(
        changes in proptest::collection::vec(control_change(), 0..12),
        presses in 0usize..3,
    ) {
        let mut panel = panel_with(TerrainConfig {
            offset: Offset::new(12.0, -8.0),
            color_setting: ColorSetting::Grayscale,
            ..scenario_config()
        });
        let original = *panel.config();

        for (id, value) in changes {
            // Out-of-range sizes make the generator fail; the controller still keeps the value.
            let _ = panel.handle(PanelEvent::ControlChanged(id, value));
        }
        for _ in 0..presses {
            let _ = panel.generate_new_terrain();
        }
        let seed = panel.config().seed;
        let calls = panel.generator().calls;

        panel.reset_to_original().unwrap();

        prop_assert_eq!(*panel.config(), TerrainConfig { seed, ..original });
        prop_assert_eq!(panel.generator().calls, calls + 1);
        for id in ControlId::ALL {
            prop_assert_eq!(panel.controls().value(id), Some(id.read(&original)));
        }
    }

    #[test]
    fn display_is_always_exclusive(targets in proptest::collection::vec(0usize..4, 1..20)) {
        let mut panel = panel_with(scenario_config());
        for t in targets {
            match DisplayState::ALL[t].preset() {
                Some(p) => panel.activate_preset(p),
                None => panel.activate_default(),
            }
            prop_assert_eq!(visible_count(panel.displays()), 1);
            prop_assert!(panel.displays().is_visible(panel.display_state()));
        }
    }
}
