// src/ui/hud.rs

use crate::resources::AtomSketch;
use bevy::prelude::*;
use bevy::window::PrimaryWindow;
use bevy_egui::{EguiContexts, EguiPrimaryContextPass, egui};

pub struct HudPlugin;

impl Plugin for HudPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(EguiPrimaryContextPass, hud_egui_system)
            .add_systems(Update, update_window_title);
    }
}

pub fn atom_title(name: Option<&str>, electron_count: usize) -> String {
    match name {
        Some(name) => format!("Aesthetic Atoms: {}", name),
        None => format!("Aesthetic Atoms: {} electrons", electron_count),
    }
}

fn hud_egui_system(mut contexts: EguiContexts, sketch: Res<AtomSketch>) {
    let Ok(ctx) = contexts.ctx_mut() else { return };

    egui::Area::new(egui::Id::new("hud_title_area"))
        .anchor(egui::Align2::CENTER_TOP, egui::vec2(0.0, 10.0))
        .show(ctx, |ui| {
            let text = egui::RichText::new(atom_title(sketch.name(), sketch.electron_count()))
                .font(egui::FontId::proportional(28.0))
                .color(egui::Color32::from_gray(40))
                .strong();
            ui.label(text);
        });
}

/// Mirrors the element name into the window (or browser tab) title.
fn update_window_title(
    sketch: Res<AtomSketch>,
    mut last_count: Local<Option<usize>>,
    mut windows: Query<&mut Window, With<PrimaryWindow>>,
) {
    let count = sketch.electron_count();
    if *last_count == Some(count) {
        return;
    }
    let Ok(mut window) = windows.single_mut() else {
        return;
    };
    window.title = atom_title(sketch.name(), count);
    info!("{}", window.title);
    *last_count = Some(count);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn title_names_the_element() {
        assert_eq!(atom_title(Some("Carbon"), 6), "Aesthetic Atoms: Carbon");
        assert_eq!(atom_title(None, 14), "Aesthetic Atoms: 14 electrons");
    }
}
