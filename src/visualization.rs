use crate::animation::AnimationSet;
use crate::scene_frame::{SceneFrame, Shape};
use bevy::prelude::*;
use std::collections::HashMap;

#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub struct VisualizationSet;

pub struct VisualizationPlugin;

impl Plugin for VisualizationPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<PrimitivePool>()
            .configure_sets(Update, VisualizationSet.after(AnimationSet))
            .add_systems(Startup, setup_primitive_meshes)
            .add_systems(
                Update,
                (sync_primitives, draw_frame_lines, apply_antialiasing).in_set(VisualizationSet),
            );
    }
}

/// Marks an entity that displays one slot of the current frame.
#[derive(Component)]
pub struct FramePrimitive;

#[derive(Resource, Default)]
pub struct PrimitivePool {
    pub entities: Vec<Entity>,
}

#[derive(Resource)]
struct PrimitiveMeshes {
    sphere: Handle<Mesh>,
    tori: HashMap<TorusKey, Handle<Mesh>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct TorusKey {
    major_radius: u32,
    minor_radius: u32,
    segments: u32,
}

impl TorusKey {
    fn new(major_radius: f32, minor_radius: f32, segments: u32) -> Self {
        Self {
            major_radius: major_radius.to_bits(),
            minor_radius: minor_radius.to_bits(),
            segments,
        }
    }
}

impl PrimitiveMeshes {
    fn mesh_for(&mut self, shape: Shape, meshes: &mut Assets<Mesh>) -> Handle<Mesh> {
        match shape {
            Shape::Sphere => self.sphere.clone(),
            Shape::Torus {
                major_radius,
                minor_radius,
                segments,
            } => {
                let key = TorusKey::new(major_radius, minor_radius, segments);
                // Rings share one geometry per frame; drop meshes for old radii.
                if !self.tori.contains_key(&key) {
                    self.tori.clear();
                }
                self.tori
                    .entry(key)
                    .or_insert_with(|| {
                        debug!(
                            "Building torus mesh: major {}, minor {}",
                            major_radius, minor_radius
                        );
                        let resolution = segments.max(3) as usize;
                        meshes.add(
                            Torus {
                                minor_radius,
                                major_radius,
                            }
                            .mesh()
                            .minor_resolution(resolution)
                            .major_resolution(resolution),
                        )
                    })
                    .clone()
            }
        }
    }
}

fn setup_primitive_meshes(mut commands: Commands, mut meshes: ResMut<Assets<Mesh>>) {
    commands.insert_resource(PrimitiveMeshes {
        sphere: meshes.add(Sphere::new(1.0).mesh().uv(24, 16)),
        tori: HashMap::new(),
    });
}

fn flat_material(color: Color) -> StandardMaterial {
    // Fills are drawn without lighting.
    StandardMaterial {
        base_color: color,
        unlit: true,
        alpha_mode: if color.alpha() < 1.0 {
            AlphaMode::Blend
        } else {
            AlphaMode::Opaque
        },
        ..default()
    }
}

fn sync_primitives(
    mut commands: Commands,
    frame: Res<SceneFrame>,
    mut pool: ResMut<PrimitivePool>,
    mut primitive_meshes: ResMut<PrimitiveMeshes>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut query: Query<
        (
            &mut Transform,
            &mut Visibility,
            &mut Mesh3d,
            &MeshMaterial3d<StandardMaterial>,
        ),
        With<FramePrimitive>,
    >,
) {
    for (slot, primitive) in frame.primitives.iter().enumerate() {
        let mesh = primitive_meshes.mesh_for(primitive.shape, &mut meshes);

        let Some(&entity) = pool.entities.get(slot) else {
            let entity = commands
                .spawn((
                    FramePrimitive,
                    Mesh3d(mesh),
                    MeshMaterial3d(materials.add(flat_material(primitive.color))),
                    primitive.transform,
                ))
                .id();
            pool.entities.push(entity);
            continue;
        };

        // Entities spawned this frame are not queryable until commands apply.
        let Ok((mut transform, mut visibility, mut mesh3d, material)) = query.get_mut(entity) else {
            continue;
        };
        *transform = primitive.transform;
        visibility.set_if_neq(Visibility::Inherited);
        if mesh3d.0 != mesh {
            mesh3d.0 = mesh;
        }
        let needs_update = materials
            .get(&material.0)
            .is_some_and(|current| current.base_color != primitive.color);
        if needs_update {
            if let Some(current) = materials.get_mut(&material.0) {
                *current = flat_material(primitive.color);
            }
        }
    }

    for &entity in pool.entities.iter().skip(frame.primitives.len()) {
        if let Ok((_, mut visibility, _, _)) = query.get_mut(entity) {
            visibility.set_if_neq(Visibility::Hidden);
        }
    }
}

fn draw_frame_lines(frame: Res<SceneFrame>, mut gizmos: Gizmos) {
    for line in &frame.lines {
        gizmos.line(line.from, line.to, line.color);
    }
}

fn apply_antialiasing(frame: Res<SceneFrame>, mut cameras: Query<&mut Msaa, With<Camera3d>>) {
    let wanted = if frame.antialiasing {
        Msaa::Sample4
    } else {
        Msaa::Off
    };
    for mut msaa in &mut cameras {
        if *msaa != wanted {
            info!("Switching camera MSAA to {:?}", wanted);
            *msaa = wanted;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn torus_keys_distinguish_geometry() {
        assert_eq!(TorusKey::new(120.0, 0.75, 50), TorusKey::new(120.0, 0.75, 50));
        assert_ne!(TorusKey::new(120.0, 0.75, 50), TorusKey::new(160.0, 0.75, 50));
        assert_ne!(TorusKey::new(120.0, 0.75, 50), TorusKey::new(120.0, 0.75, 24));
    }

    #[test]
    fn translucent_fills_blend() {
        assert_eq!(flat_material(Color::BLACK).alpha_mode, AlphaMode::Opaque);
        assert_eq!(
            flat_material(Color::WHITE.with_alpha(0.5)).alpha_mode,
            AlphaMode::Blend
        );
        assert!(flat_material(Color::BLACK).unlit);
    }
}
