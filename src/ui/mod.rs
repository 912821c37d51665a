// src/ui/mod.rs

mod controls;
mod help_panel;
mod hud;
mod timing_panel;

use crate::animation::AnimationSet;
use crate::config::ConfigError;
use crate::resources::AtomSketch;
use bevy::prelude::*;
use bevy_egui::EguiContexts;

use controls::ControlsPlugin;
use help_panel::HelpPanelPlugin;
use hud::HudPlugin;
use timing_panel::TimingPanelPlugin;

// Model edits land before the next tick reads them.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub struct UiSet;

pub struct UIPlugin;

impl Plugin for UIPlugin {
    fn build(&self, app: &mut App) {
        app.configure_sets(Update, UiSet.before(AnimationSet))
            .add_plugins((ControlsPlugin, HudPlugin, HelpPanelPlugin, TimingPanelPlugin))
            .add_systems(Update, handle_shortcuts.in_set(UiSet));
    }
}

/// Logs a rejected edit; the model keeps its previous value.
fn report(result: Result<(), ConfigError>, what: &str) {
    if let Err(err) = result {
        warn!("Rejected {} change: {}", what, err);
    }
}

fn handle_shortcuts(
    keys: Res<ButtonInput<KeyCode>>,
    mut contexts: EguiContexts,
    mut sketch: ResMut<AtomSketch>,
) {
    if contexts
        .ctx_mut()
        .is_ok_and(|ctx| ctx.wants_keyboard_input())
    {
        return;
    }

    let features = sketch.features();
    let toggles = sketch.toggles_mut();
    if keys.just_pressed(KeyCode::KeyO) {
        toggles.show_orbits = !toggles.show_orbits;
    }
    if keys.just_pressed(KeyCode::KeyV) {
        toggles.nucleus_vibrate = !toggles.nucleus_vibrate;
    }
    if keys.just_pressed(KeyCode::KeyE) {
        toggles.electron_vibrate = !toggles.electron_vibrate;
    }
    if features.nucleus_noise && keys.just_pressed(KeyCode::KeyN) {
        toggles.nucleus_noise = !toggles.nucleus_noise;
    }
    if keys.just_pressed(KeyCode::KeyX) {
        toggles.spin.x = !toggles.spin.x;
    }
    if keys.just_pressed(KeyCode::KeyY) {
        toggles.spin.y = !toggles.spin.y;
    }
    if keys.just_pressed(KeyCode::KeyZ) {
        toggles.spin.z = !toggles.spin.z;
    }
}
