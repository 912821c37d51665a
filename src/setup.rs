use bevy::prelude::*;
use bevy_panorbit_camera::PanOrbitCamera;

/// Distance from the camera to the nucleus at startup.
const CAMERA_DISTANCE: f32 = 400.0;

pub struct SetupPlugin;

impl Plugin for SetupPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(ClearColor(Color::WHITE))
            .add_systems(Startup, setup_scene);
    }
}

fn setup_scene(mut commands: Commands) {
    info!("Setting up scene: Camera");
    commands.spawn((
        PanOrbitCamera {
            radius: Some(CAMERA_DISTANCE),
            ..default()
        },
        Msaa::Off,
        Transform::from_xyz(0.0, 0.0, CAMERA_DISTANCE).looking_at(Vec3::ZERO, Vec3::Y),
    ));
}
