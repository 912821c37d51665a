// src/ui/controls.rs

use super::report;
use crate::color::{ColorCycle, HUE_WRAP};
use crate::resources::AtomSketch;
use bevy::prelude::*;
use bevy_egui::{EguiContexts, EguiPrimaryContextPass, egui};

pub struct ControlsPlugin;

impl Plugin for ControlsPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(EguiPrimaryContextPass, controls_egui_system);
    }
}

fn to_rgb(color: Color) -> [u8; 3] {
    let [r, g, b, _] = color.to_srgba().to_u8_array();
    [r, g, b]
}

fn color_row(ui: &mut egui::Ui, label: &str, color: Color) -> Option<Color> {
    let mut rgb = to_rgb(color);
    let changed = ui
        .horizontal(|ui| {
            ui.label(label);
            ui.color_edit_button_srgb(&mut rgb).changed()
        })
        .inner;
    changed.then(|| Color::srgb_u8(rgb[0], rgb[1], rgb[2]))
}

fn cycle_controls(ui: &mut egui::Ui, cycle: &mut ColorCycle, what: &str) {
    ui.horizontal(|ui| {
        ui.checkbox(&mut cycle.enabled, "Color cycle");
        if cycle.enabled {
            let mut hue = cycle.hue();
            let drag = egui::DragValue::new(&mut hue)
                .range(0.0..=HUE_WRAP)
                .suffix("°");
            if ui.add(drag).changed() {
                cycle.set_hue(hue);
            }
        }
    });
    let mut rate = cycle.rate();
    let slider = egui::Slider::new(&mut rate, 0.0..=60.0).text("Cycle rate (°/frame)");
    if ui.add_enabled(cycle.enabled, slider).changed() {
        report(cycle.set_rate(rate), what);
    }
}

/// The control surface: every property of the atom bound to a widget.
fn controls_egui_system(mut contexts: EguiContexts, mut sketch: ResMut<AtomSketch>) {
    let Ok(ctx) = contexts.ctx_mut() else { return };
    let features = sketch.features();

    egui::Window::new("Controls")
        .anchor(egui::Align2::RIGHT_TOP, egui::vec2(-10.0, 10.0))
        .resizable(false)
        .show(ctx, |ui| {
            ui.label(egui::RichText::new("Nucleus").strong());
            let mut radius = sketch.nucleus_radius();
            if ui
                .add(egui::Slider::new(&mut radius, 1.0..=40.0).text("Radius"))
                .changed()
            {
                report(sketch.set_nucleus_radius(radius), "nucleus radius");
            }
            if let Some(color) = color_row(ui, "Color", sketch.nucleus_color()) {
                sketch.set_nucleus_color(color);
            }
            ui.checkbox(&mut sketch.toggles_mut().nucleus_vibrate, "Vibrate");
            if features.nucleus_noise {
                ui.checkbox(&mut sketch.toggles_mut().nucleus_noise, "Noise");
            }
            if features.color_cycling {
                cycle_controls(ui, sketch.nucleus_cycle_mut(), "nucleus cycle rate");
            }

            ui.separator();
            ui.label(egui::RichText::new("Electrons").strong());
            let mut count = sketch.electron_count();
            let max = sketch.max_electrons();
            if ui
                .add(egui::Slider::new(&mut count, 1..=max).text("Count"))
                .changed()
            {
                report(sketch.set_electron_count(count), "electron count");
            }
            let mut speed = sketch.electron_speed();
            if ui
                .add(egui::Slider::new(&mut speed, -3.0..=3.0).text("Rotations / s"))
                .changed()
            {
                report(sketch.set_electron_speed(speed), "electron speed");
            }
            if let Some(color) = color_row(ui, "Color", sketch.electron_color()) {
                sketch.set_electron_color(color);
            }
            ui.checkbox(&mut sketch.toggles_mut().electron_vibrate, "Vibrate");
            if features.color_cycling {
                cycle_controls(ui, sketch.electron_cycle_mut(), "electron cycle rate");
            }

            ui.separator();
            ui.label(egui::RichText::new("Scene").strong());
            let mut position = sketch.position();
            let moved = ui
                .horizontal(|ui| {
                    ui.label("Position");
                    let x = ui.add(egui::DragValue::new(&mut position.x).prefix("x "));
                    let y = ui.add(egui::DragValue::new(&mut position.y).prefix("y "));
                    x.changed() || y.changed()
                })
                .inner;
            if moved {
                sketch.set_position(position);
            }
            if let Some(color) = color_row(ui, "Orbit color", sketch.orbit_color()) {
                sketch.set_orbit_color(color);
            }
            let toggles = sketch.toggles_mut();
            ui.checkbox(&mut toggles.show_orbits, "Orbits");
            ui.horizontal(|ui| {
                ui.label("Spin");
                ui.checkbox(&mut toggles.spin.x, "X");
                ui.checkbox(&mut toggles.spin.y, "Y");
                ui.checkbox(&mut toggles.spin.z, "Z");
            });
            if features.antialiasing {
                ui.checkbox(&mut toggles.antialiasing, "Smoothing");
            }

            egui::CollapsingHeader::new("Inspector").show(ui, |ui| {
                ui.label(format!("Orbit radius: {:.1}", sketch.orbit_radius()));
                ui.label(format!("Angular offset: {:.3} rad", sketch.delta_angle()));
                ui.label(format!("Phase: {:.2} rad", sketch.rotation()));
                ui.label(format!("Tail spheres: {}", sketch.tail_spheres()));
                let spin = sketch.spin_counters();
                ui.label(format!(
                    "Spin counters: {:.2} / {:.2} / {:.2}",
                    spin.x, spin.y, spin.z
                ));
            });
        });
}
