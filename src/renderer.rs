// src/renderer.rs

use bevy::prelude::*;

/// Immediate-mode 3D drawing surface the atom model draws into.
///
/// Transforms accumulate on the current matrix until `pop` restores the state
/// saved by the matching `push`. Colors carry their own alpha.
pub trait Renderer {
    fn push(&mut self);
    fn pop(&mut self);
    fn translate(&mut self, offset: Vec3);
    fn rotate_x(&mut self, angle: f32);
    fn rotate_y(&mut self, angle: f32);
    fn rotate_z(&mut self, angle: f32);
    fn fill(&mut self, color: Color);
    fn stroke(&mut self, color: Color);
    fn no_stroke(&mut self);
    fn sphere(&mut self, radius: f32);
    /// The depth radius follows `radius_y`.
    fn ellipsoid(&mut self, radius_x: f32, radius_y: f32);
    /// A ring lying in the local XY plane.
    fn torus(&mut self, major_radius: f32, minor_radius: f32, segments: u32);
    fn line(&mut self, from: Vec3, to: Vec3);
    fn clear(&mut self);
    fn set_antialiasing(&mut self, enabled: bool);
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DrawCommand {
    Push,
    Pop,
    Translate(Vec3),
    RotateX(f32),
    RotateY(f32),
    RotateZ(f32),
    Fill(Color),
    Stroke(Color),
    NoStroke,
    Sphere(f32),
    Ellipsoid { radius_x: f32, radius_y: f32 },
    Torus { major_radius: f32, minor_radius: f32, segments: u32 },
    Line { from: Vec3, to: Vec3 },
    Clear,
    Antialiasing(bool),
}

/// A renderer that only remembers what it was asked to draw.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct CommandLog {
    pub commands: Vec<DrawCommand>,
}

impl CommandLog {
    pub fn count(&self, predicate: impl Fn(&DrawCommand) -> bool) -> usize {
        self.commands.iter().filter(|command| predicate(command)).count()
    }
}

impl Renderer for CommandLog {
    fn push(&mut self) {
        self.commands.push(DrawCommand::Push);
    }

    fn pop(&mut self) {
        self.commands.push(DrawCommand::Pop);
    }

    fn translate(&mut self, offset: Vec3) {
        self.commands.push(DrawCommand::Translate(offset));
    }

    fn rotate_x(&mut self, angle: f32) {
        self.commands.push(DrawCommand::RotateX(angle));
    }

    fn rotate_y(&mut self, angle: f32) {
        self.commands.push(DrawCommand::RotateY(angle));
    }

    fn rotate_z(&mut self, angle: f32) {
        self.commands.push(DrawCommand::RotateZ(angle));
    }

    fn fill(&mut self, color: Color) {
        self.commands.push(DrawCommand::Fill(color));
    }

    fn stroke(&mut self, color: Color) {
        self.commands.push(DrawCommand::Stroke(color));
    }

    fn no_stroke(&mut self) {
        self.commands.push(DrawCommand::NoStroke);
    }

    fn sphere(&mut self, radius: f32) {
        self.commands.push(DrawCommand::Sphere(radius));
    }

    fn ellipsoid(&mut self, radius_x: f32, radius_y: f32) {
        self.commands
            .push(DrawCommand::Ellipsoid { radius_x, radius_y });
    }

    fn torus(&mut self, major_radius: f32, minor_radius: f32, segments: u32) {
        self.commands.push(DrawCommand::Torus {
            major_radius,
            minor_radius,
            segments,
        });
    }

    fn line(&mut self, from: Vec3, to: Vec3) {
        self.commands.push(DrawCommand::Line { from, to });
    }

    fn clear(&mut self) {
        self.commands.clear();
        self.commands.push(DrawCommand::Clear);
    }

    fn set_antialiasing(&mut self, enabled: bool) {
        self.commands.push(DrawCommand::Antialiasing(enabled));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clear_drops_everything_recorded_before_it() {
        let mut log = CommandLog::default();
        log.push();
        log.sphere(2.0);
        log.pop();
        log.clear();
        log.sphere(3.0);

        assert_eq!(
            log.commands,
            vec![DrawCommand::Clear, DrawCommand::Sphere(3.0)]
        );
    }

    #[test]
    fn count_filters_by_command_kind() {
        let mut log = CommandLog::default();
        log.ellipsoid(1.5, 1.0);
        log.ellipsoid(3.0, 2.0);
        log.torus(120.0, 0.75, 50);

        assert_eq!(
            log.count(|c| matches!(c, DrawCommand::Ellipsoid { .. })),
            2
        );
        assert_eq!(log.count(|c| matches!(c, DrawCommand::Torus { .. })), 1);
    }
}
