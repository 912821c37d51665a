mod animation;
mod atom;
mod color;
mod config;
mod renderer;
mod resources;
mod scene_frame;
mod setup;
mod ui;
mod visualization;
use animation::AnimationPlugin;
use atom::AtomModel;
#[cfg(target_arch = "wasm32")]
use bevy::audio::AudioPlugin;
use bevy::prelude::*;
use bevy_egui::EguiPlugin;
use bevy_panorbit_camera::PanOrbitCameraPlugin;
use clap::Parser;
use config::{AtomConfig, ConfigError, Edition};
use renderer::{CommandLog, DrawCommand};
use resources::AtomSketch;
use setup::SetupPlugin;
use std::path::PathBuf;
use std::time::Duration;
use ui::UIPlugin;
use visualization::VisualizationPlugin;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct CliArgs {
    /// JSON file with atom settings. Flags below override it.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Radius of the nucleus in pixels.
    #[arg(long)]
    nucleus_radius: Option<f32>,

    /// Electron orbit speed in rotations per second.
    #[arg(long)]
    speed: Option<f32>,

    /// Number of electrons.
    #[arg(short, long)]
    electrons: Option<usize>,

    /// Number of spheres in each electron's tail.
    #[arg(long)]
    tail_spheres: Option<usize>,

    /// Start with smoothing (MSAA) enabled.
    #[arg(long, default_value_t = false)]
    smoothing: bool,

    /// Which set of optional features to enable.
    #[arg(long, value_enum)]
    edition: Option<Edition>,

    /// Print the draw commands of a single frame and exit without opening a window.
    #[arg(long, default_value_t = false)]
    dump_frame: bool,
}

impl CliArgs {
    fn atom_config(&self) -> Result<AtomConfig, ConfigError> {
        let mut config = match &self.config {
            Some(path) => AtomConfig::from_json_file(path)?,
            None => AtomConfig::default(),
        };
        if let Some(radius) = self.nucleus_radius {
            config.nucleus_radius = radius;
        }
        if let Some(speed) = self.speed {
            config.rotations_per_sec = speed;
        }
        if let Some(electrons) = self.electrons {
            config.electron_count = electrons;
        }
        if let Some(tail_spheres) = self.tail_spheres {
            config.tail_spheres = tail_spheres;
        }
        if self.smoothing {
            config.antialiasing = true;
        }
        if let Some(edition) = self.edition {
            config.features = edition.features();
            config.spin_increment = edition.spin_increment();
        }
        config.validate()?;
        Ok(config)
    }
}

fn dump_frame(atom: &mut AtomModel) {
    let mut log = CommandLog::default();
    atom.tick(Duration::ZERO, &mut log);
    for command in &log.commands {
        println!("{:?}", command);
    }
    println!(
        "-- {} commands: {} spheres, {} ellipsoids, {} tori, {} lines; phase seeds {:?}",
        log.commands.len(),
        log.count(|c| matches!(c, DrawCommand::Sphere(_))),
        log.count(|c| matches!(c, DrawCommand::Ellipsoid { .. })),
        log.count(|c| matches!(c, DrawCommand::Torus { .. })),
        log.count(|c| matches!(c, DrawCommand::Line { .. })),
        atom.phase_seeds()
    );
}

fn main() -> Result<(), ConfigError> {
    let args = CliArgs::parse();
    let config = args.atom_config()?;
    let mut atom = AtomModel::new(&config)?;

    if args.dump_frame {
        dump_frame(&mut atom);
        return Ok(());
    }

    let mut app = App::new();

    let default_plugins = DefaultPlugins.set(WindowPlugin {
        primary_window: Some(Window {
            title: "Aesthetic Atoms".into(),
            canvas: Some("#bevy".to_string()),
            fit_canvas_to_parent: true,
            prevent_default_event_handling: false,
            ..default()
        }),
        ..default()
    });

    #[cfg(target_arch = "wasm32")]
    let default_plugins = default_plugins.build().disable::<AudioPlugin>();

    app.add_plugins(default_plugins)
        .insert_resource(AtomSketch(atom))
        .add_plugins((
            PanOrbitCameraPlugin,
            EguiPlugin::default(),
            SetupPlugin,
            AnimationPlugin,
            VisualizationPlugin,
            UIPlugin,
        ));

    info!(
        "Atom ready: {} electrons, nucleus radius {}, {} rotations/s",
        config.electron_count, config.nucleus_radius, config.rotations_per_sec
    );
    app.run();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_override_defaults() {
        let args = CliArgs::parse_from([
            "aesthetic_atoms",
            "--nucleus-radius",
            "20",
            "--speed",
            "0.75",
            "-e",
            "6",
            "--edition",
            "basic",
        ]);
        let config = args.atom_config().unwrap();

        assert_eq!(config.nucleus_radius, 20.0);
        assert_eq!(config.rotations_per_sec, 0.75);
        assert_eq!(config.electron_count, 6);
        assert_eq!(config.features, Edition::Basic.features());
        assert_eq!(config.spin_increment, 0.1);
        assert_eq!(config.tail_spheres, 15);
    }

    #[test]
    fn full_edition_spins_at_the_default_rate() {
        let args = CliArgs::parse_from(["aesthetic_atoms", "--edition", "full"]);
        let config = args.atom_config().unwrap();
        assert_eq!(config.spin_increment, AtomConfig::default().spin_increment);
    }

    #[test]
    fn invalid_flags_fail_before_startup() {
        let args = CliArgs::parse_from(["aesthetic_atoms", "--electrons", "0"]);
        assert!(matches!(
            args.atom_config(),
            Err(ConfigError::ElectronCount { count: 0, .. })
        ));
    }

    #[test]
    fn missing_config_file_is_an_io_error() {
        let args = CliArgs::parse_from([
            "aesthetic_atoms",
            "--config",
            "/nonexistent/aesthetic_atoms.json",
        ]);
        assert!(matches!(args.atom_config(), Err(ConfigError::Io(_))));
    }
}
