// src/ui/timing_panel.rs

use crate::resources::FrameHistory;
use bevy::prelude::*;
use bevy_egui::{EguiContexts, EguiPrimaryContextPass, egui};
use egui_plot::{Legend, Line, Plot, PlotPoints};
use std::f64::consts::TAU;

pub struct TimingPanelPlugin;

impl Plugin for TimingPanelPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(EguiPrimaryContextPass, timing_panel_egui_system);
    }
}

fn timing_panel_egui_system(mut contexts: EguiContexts, history: Res<FrameHistory>) {
    let Ok(ctx) = contexts.ctx_mut() else {
        return;
    };

    egui::Window::new("Frame Timing")
        .anchor(egui::Align2::LEFT_BOTTOM, egui::vec2(10.0, -10.0))
        .default_open(false)
        .default_width(350.0)
        .default_height(200.0)
        .show(ctx, |ui| {
            if let Some(mean) = history.mean_delta_ms() {
                ui.label(format!("Mean frame time: {:.2} ms", mean));
            }

            let delta_line = Line::new(
                "Frame delta (ms)",
                PlotPoints::from_iter(history.samples.iter().map(|s| [s.frame, s.delta_ms])),
            );
            // Wrapped so the line stays on the same scale as the deltas.
            let phase_line = Line::new(
                "Phase (rad, mod 2π)",
                PlotPoints::from_iter(
                    history
                        .samples
                        .iter()
                        .map(|s| [s.frame, s.phase.rem_euclid(TAU)]),
                ),
            );

            Plot::new("timing_plot")
                .legend(Legend::default())
                .x_axis_label("Frame")
                .show(ui, |plot_ui| {
                    plot_ui.line(delta_line);
                    plot_ui.line(phase_line);
                });
        });
}
