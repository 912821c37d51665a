use crate::resources::{AtomSketch, FrameHistory};
use crate::scene_frame::SceneFrame;
use bevy::prelude::*;

#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub struct AnimationSet;

pub struct AnimationPlugin;

impl Plugin for AnimationPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SceneFrame>()
            .init_resource::<FrameHistory>()
            .add_systems(Update, (tick_atom, record_frame).chain().in_set(AnimationSet));
    }
}

/// Wall-clock time drives the phase; the virtual clock clamps long frames.
fn tick_atom(
    time: Res<Time<Real>>,
    mut sketch: ResMut<AtomSketch>,
    mut frame: ResMut<SceneFrame>,
) {
    sketch.tick(time.elapsed(), &mut *frame);
}

fn record_frame(sketch: Res<AtomSketch>, mut history: ResMut<FrameHistory>) {
    history.record(sketch.last_delta_ms(), sketch.rotation());
}
