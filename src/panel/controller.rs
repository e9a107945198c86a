use tracing::{debug, info};

use crate::config::{OriginalSnapshot, TerrainConfig};
use crate::error::PanelError;
use crate::rng::SeedSource;
use crate::terrain::Generator;

use super::binding::{ControlId, ControlValue};
use super::controls::{ButtonId, ControlSurface, EventSource, Handler, PanelEvent, Subscriptions};
use super::display::{DisplayObjects, DisplayState, Preset, render_display};

/// Coordinates the panel's controls, the terrain generator and the display objects.
///
/// Owns the live [`TerrainConfig`]; the generator only ever sees it through
/// [`Generator::regenerate`]. All operations run to completion synchronously.
pub struct ParameterPanelController<G, C, D, S> {
    generator: G,
    controls: C,
    displays: D,
    seeds: S,
    config: TerrainConfig,
    original: OriginalSnapshot,
    display: DisplayState,
    subscriptions: Subscriptions,
}

impl<G, C, D, S> ParameterPanelController<G, C, D, S>
where
    G: Generator,
    C: ControlSurface,
    D: DisplayObjects,
    S: SeedSource,
{
    /// Binds the panel and runs [`initialize`](Self::initialize). Does not regenerate.
    pub fn new(
        config: TerrainConfig,
        generator: G,
        controls: C,
        displays: D,
        seeds: S,
    ) -> Result<Self, PanelError> {
        let mut panel = Self {
            generator,
            controls,
            displays,
            seeds,
            config,
            original: OriginalSnapshot::capture(&config),
            display: DisplayState::Default,
            subscriptions: Subscriptions::default(),
        };
        panel.initialize()?;
        Ok(panel)
    }

    /// Checks every binding, snapshots the current config, syncs the controls,
    /// registers handlers and shows the default terrain.
    ///
    /// Safe to call again: handlers are cleared before being re-added.
    pub fn initialize(&mut self) -> Result<(), PanelError> {
        self.check_bindings()?;

        self.original = OriginalSnapshot::capture(&self.config);
        self.sync_controls();

        self.subscriptions.clear();
        for id in ControlId::ALL {
            self.subscriptions
                .subscribe(EventSource::Control(id), Handler::Field(id));
        }
        let buttons = [
            (ButtonId::Generate, Handler::GenerateNewTerrain),
            (ButtonId::Reset, Handler::ResetToOriginal),
            (ButtonId::DefaultTerrain, Handler::ActivateDefault),
            (ButtonId::Preset1, Handler::ActivatePreset(Preset::One)),
            (ButtonId::Preset2, Handler::ActivatePreset(Preset::Two)),
            (ButtonId::Preset3, Handler::ActivatePreset(Preset::Three)),
        ];
        for (button, handler) in buttons {
            self.subscriptions.subscribe(EventSource::Button(button), handler);
        }

        self.show(DisplayState::Default);
        debug!(handlers = self.subscriptions.len(), "panel initialized");
        Ok(())
    }

    fn check_bindings(&self) -> Result<(), PanelError> {
        if let Some(id) = ControlId::ALL.into_iter().find(|&id| !self.controls.is_bound(id)) {
            return Err(PanelError::UnboundControl(id));
        }
        if let Some(b) = ButtonId::ALL.into_iter().find(|&b| !self.controls.has_button(b)) {
            return Err(PanelError::UnboundButton(b));
        }
        if let Some(t) = DisplayState::ALL.into_iter().find(|&t| !self.displays.is_bound(t)) {
            return Err(PanelError::UnboundDisplay(t));
        }
        Ok(())
    }

    /// Pushes every field into its control. Never triggers handlers.
    fn sync_controls(&mut self) {
        for id in ControlId::ALL {
            self.controls.set_value(id, id.read(&self.config));
        }
    }

    /// Routes a user interaction through the subscription table.
    pub fn handle(&mut self, event: PanelEvent) -> Result<(), PanelError> {
        let source = event.source();
        let handler = self
            .subscriptions
            .handler(source)
            .ok_or(PanelError::Unsubscribed(source))?;

        match (handler, event) {
            (Handler::Field(id), PanelEvent::ControlChanged(_, value)) => {
                self.on_control_changed(id, value)
            }
            (Handler::GenerateNewTerrain, _) => self.generate_new_terrain(),
            (Handler::ResetToOriginal, _) => self.reset_to_original(),
            (Handler::ActivatePreset(p), _) => {
                self.activate_preset(p);
                Ok(())
            }
            (Handler::ActivateDefault, _) => {
                self.activate_default();
                Ok(())
            }
            (Handler::Field(_), PanelEvent::ButtonPressed(_)) => {
                Err(PanelError::Unsubscribed(source))
            }
        }
    }

    /// Writes one control's field and regenerates.
    ///
    /// The field stays written even if regeneration fails.
    pub fn on_control_changed(&mut self, id: ControlId, value: ControlValue) -> Result<(), PanelError> {
        let mutation = id.mutation(value)?;
        mutation.apply(&mut self.config);
        self.controls.set_value(id, id.read(&self.config));
        debug!(control = %id, ?mutation, "control changed");
        self.regenerate()
    }

    pub fn regenerate(&mut self) -> Result<(), PanelError> {
        self.generator.regenerate(&self.config)?;
        Ok(())
    }

    /// Draws a new seed and regenerates. No other field changes.
    pub fn generate_new_terrain(&mut self) -> Result<(), PanelError> {
        self.config.seed = self.seeds.next_seed();
        info!(seed = self.config.seed, "new terrain seed");
        self.regenerate()
    }

    /// Restores every snapshotted field (not the seed), resyncs the controls
    /// and regenerates once.
    pub fn reset_to_original(&mut self) -> Result<(), PanelError> {
        self.config.restore(&self.original);
        self.sync_controls();
        info!(seed = self.config.seed, "reset to original values");
        self.regenerate()
    }

    pub fn activate_preset(&mut self, preset: Preset) {
        self.show(preset.into());
    }

    pub fn activate_default(&mut self) {
        self.show(DisplayState::Default);
    }

    fn show(&mut self, state: DisplayState) {
        render_display(&mut self.displays, state);
        if self.display != state {
            info!(from = %self.display, to = %state, "display changed");
        }
        self.display = state;
    }

    pub fn config(&self) -> &TerrainConfig {
        &self.config
    }

    pub fn original(&self) -> &OriginalSnapshot {
        &self.original
    }

    pub fn display_state(&self) -> DisplayState {
        self.display
    }

    pub fn generator(&self) -> &G {
        &self.generator
    }

    pub fn controls(&self) -> &C {
        &self.controls
    }

    pub fn displays(&self) -> &D {
        &self.displays
    }

    pub fn subscriptions(&self) -> &Subscriptions {
        &self.subscriptions
    }
}
