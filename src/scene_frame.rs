// src/scene_frame.rs

use crate::renderer::Renderer;
use bevy::prelude::*;
use std::f32::consts::FRAC_PI_2;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Shape {
    /// Unit sphere scaled by the primitive's transform.
    Sphere,
    Torus {
        major_radius: f32,
        minor_radius: f32,
        segments: u32,
    },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Primitive {
    pub shape: Shape,
    pub transform: Transform,
    pub color: Color,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameLine {
    pub from: Vec3,
    pub to: Vec3,
    pub color: Color,
}

/// Collects one frame of drawing into world-space primitives for the
/// visualization systems to display.
#[derive(Resource, Debug)]
pub struct SceneFrame {
    pub primitives: Vec<Primitive>,
    pub lines: Vec<FrameLine>,
    pub antialiasing: bool,
    matrix: Mat4,
    stack: Vec<Mat4>,
    fill: Color,
    stroke: Option<Color>,
}

impl Default for SceneFrame {
    fn default() -> Self {
        Self {
            primitives: Vec::new(),
            lines: Vec::new(),
            antialiasing: false,
            matrix: Mat4::IDENTITY,
            stack: Vec::new(),
            fill: Color::WHITE,
            stroke: None,
        }
    }
}

impl SceneFrame {
    /// The matrix stack only ever holds rotations and translations, so the
    /// primitive's own scale can be applied after decomposing it.
    fn emit(&mut self, shape: Shape, rotation: Quat, scale: Vec3) {
        let mut transform = Transform::from_matrix(self.matrix);
        transform.rotation *= rotation;
        transform.scale = scale;
        self.primitives.push(Primitive {
            shape,
            transform,
            color: self.fill,
        });
    }
}

impl Renderer for SceneFrame {
    fn push(&mut self) {
        self.stack.push(self.matrix);
    }

    fn pop(&mut self) {
        match self.stack.pop() {
            Some(matrix) => self.matrix = matrix,
            None => warn!("Ignoring pop without a matching push"),
        }
    }

    fn translate(&mut self, offset: Vec3) {
        self.matrix *= Mat4::from_translation(offset);
    }

    fn rotate_x(&mut self, angle: f32) {
        self.matrix *= Mat4::from_rotation_x(angle);
    }

    fn rotate_y(&mut self, angle: f32) {
        self.matrix *= Mat4::from_rotation_y(angle);
    }

    fn rotate_z(&mut self, angle: f32) {
        self.matrix *= Mat4::from_rotation_z(angle);
    }

    fn fill(&mut self, color: Color) {
        self.fill = color;
    }

    fn stroke(&mut self, color: Color) {
        self.stroke = Some(color);
    }

    fn no_stroke(&mut self) {
        self.stroke = None;
    }

    fn sphere(&mut self, radius: f32) {
        self.emit(Shape::Sphere, Quat::IDENTITY, Vec3::splat(radius));
    }

    fn ellipsoid(&mut self, radius_x: f32, radius_y: f32) {
        self.emit(
            Shape::Sphere,
            Quat::IDENTITY,
            Vec3::new(radius_x, radius_y, radius_y),
        );
    }

    fn torus(&mut self, major_radius: f32, minor_radius: f32, segments: u32) {
        // Bevy's torus lies in the XZ plane.
        self.emit(
            Shape::Torus {
                major_radius,
                minor_radius,
                segments,
            },
            Quat::from_rotation_x(FRAC_PI_2),
            Vec3::ONE,
        );
    }

    fn line(&mut self, from: Vec3, to: Vec3) {
        let Some(color) = self.stroke else { return };
        self.lines.push(FrameLine {
            from: self.matrix.transform_point3(from),
            to: self.matrix.transform_point3(to),
            color,
        });
    }

    fn clear(&mut self) {
        self.primitives.clear();
        self.lines.clear();
        self.stack.clear();
        self.matrix = Mat4::IDENTITY;
        self.stroke = None;
    }

    fn set_antialiasing(&mut self, enabled: bool) {
        self.antialiasing = enabled;
    }
}
