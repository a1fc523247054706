//! Position, Euler rotation and uniform scale for objects placed in the scene.
//!
//! [`Object`] is the transform shared by the viewed model and every point
//! light. Its state is four plain fields (position, yaw/pitch/roll in
//! degrees, scale) and the model matrix is always rebuilt from them in a
//! fixed order:
//!
//! ```text
//! model = translate(position) * rotateY(yaw) * rotateX(pitch) * rotateZ(roll) * scale(scale)
//! ```
//!
//! Rebuilding instead of multiplying onto the previous matrix means repeated
//! updates never accumulate floating-point drift.
//!
//! # Example
//!
//! ```
//! use lumen::{Object, Vec3};
//!
//! let mut object = Object::new();
//! object.translate(Vec3::new(0.0, 1.0, 0.0));
//! object.rotate(90.0, Vec3::Y);
//! object.scale(2.0);
//!
//! assert_eq!(object.yaw(), 90.0);
//! object.reset_model();
//! assert_eq!(object.model_matrix(), lumen::Mat4::IDENTITY);
//! ```

use glam::{Mat3, Mat4, Vec3};

use crate::config::ObjectConfig;
use crate::uniforms::UniformSet;

/// How the viewed model is rotated each frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RotationMode {
    /// Rotation only changes in response to user drags.
    #[default]
    Input,
    /// The model spins continuously around the configured axis.
    Natural,
}

/// A transform with independently accumulated yaw, pitch and roll.
#[derive(Clone, Debug)]
pub struct Object {
    position: Vec3,
    /// Rotation around world Y, in degrees.
    yaw: f32,
    /// Rotation around world X, in degrees.
    pitch: f32,
    /// Rotation around world Z, in degrees.
    roll: f32,
    scale: f32,
    rotation_mode: RotationMode,
    model: Mat4,
    normal_matrix: Mat3,
}

impl Default for Object {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            yaw: 0.0,
            pitch: 0.0,
            roll: 0.0,
            scale: 1.0,
            rotation_mode: RotationMode::Input,
            model: Mat4::IDENTITY,
            normal_matrix: Mat3::IDENTITY,
        }
    }
}

impl Object {
    /// Creates an object at the origin with no rotation and unit scale.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an object at `position`.
    pub fn at(position: Vec3) -> Self {
        let mut object = Self {
            position,
            ..Default::default()
        };
        object.update_model_matrix();
        object
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    pub fn roll(&self) -> f32 {
        self.roll
    }

    pub fn scale_factor(&self) -> f32 {
        self.scale
    }

    pub fn rotation_mode(&self) -> RotationMode {
        self.rotation_mode
    }

    pub fn set_rotation_mode(&mut self, mode: RotationMode) {
        self.rotation_mode = mode;
    }

    pub fn model_matrix(&self) -> Mat4 {
        self.model
    }

    /// The normal matrix from the last [`update_normal_matrix`](Self::update_normal_matrix) call.
    pub fn normal_matrix(&self) -> Mat3 {
        self.normal_matrix
    }

    /// Move the object to an absolute position.
    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
        self.update_model_matrix();
    }

    /// Move the object by `delta`.
    pub fn translate(&mut self, delta: Vec3) {
        self.position += delta;
        self.update_model_matrix();
    }

    /// Rotate by `angle` degrees around `axis`.
    ///
    /// The axis-angle rotation is split into Euler increments: the angle is
    /// scaled by each component of the normalized axis and added to
    /// pitch (X), yaw (Y) and roll (Z). This is exact for the principal axes
    /// only. For oblique axes it approximates the true rotation, and repeated
    /// calls drift away from proper axis-angle composition.
    pub fn rotate(&mut self, angle: f32, axis: Vec3) {
        let axis = axis.normalize_or_zero();
        self.pitch += angle * axis.x;
        self.yaw += angle * axis.y;
        self.roll += angle * axis.z;
        self.update_model_matrix();
    }

    pub fn rotate_x(&mut self, angle: f32) {
        self.rotate(angle, Vec3::X);
    }

    pub fn rotate_y(&mut self, angle: f32) {
        self.rotate(angle, Vec3::Y);
    }

    pub fn rotate_z(&mut self, angle: f32) {
        self.rotate(angle, Vec3::Z);
    }

    /// Replace the uniform scale factor.
    pub fn scale(&mut self, factor: f32) {
        self.scale = factor;
        self.update_model_matrix();
    }

    /// Apply a mouse drag in input rotation mode.
    ///
    /// Horizontal motion turns the model around Y, vertical motion around X.
    pub fn drag_rotate(&mut self, dx: f32, dy: f32, config: &ObjectConfig) {
        self.yaw += dx * config.rotation_sensitivity;
        self.pitch += dy * config.rotation_sensitivity;
        self.update_model_matrix();
    }

    /// Advance time-driven rotation by `dt` seconds.
    ///
    /// Only has an effect in [`RotationMode::Natural`].
    pub fn advance(&mut self, dt: f32, config: &ObjectConfig) {
        if self.rotation_mode == RotationMode::Natural {
            self.rotate(
                config.natural_rotation_speed * dt,
                config.natural_rotation_axis,
            );
        }
    }

    /// Return position, rotation and scale to their defaults.
    pub fn reset_model(&mut self) {
        self.position = Vec3::ZERO;
        self.yaw = 0.0;
        self.pitch = 0.0;
        self.roll = 0.0;
        self.scale = 1.0;
        self.update_model_matrix();
    }

    /// Rebuild the model matrix from position, rotation and scale.
    pub fn update_model_matrix(&mut self) {
        self.model = Mat4::from_translation(self.position)
            * Mat4::from_rotation_y(self.yaw.to_radians())
            * Mat4::from_rotation_x(self.pitch.to_radians())
            * Mat4::from_rotation_z(self.roll.to_radians())
            * Mat4::from_scale(Vec3::splat(self.scale));
    }

    /// Recompute the view-space normal matrix. Call once per frame after the
    /// view matrix is known.
    pub fn update_normal_matrix(&mut self, view: Mat4) {
        // A zero scale collapses the matrix; keep the last usable value.
        if self.scale == 0.0 {
            return;
        }
        let inverse = (view * self.model).inverse();
        if !inverse.is_finite() {
            return;
        }
        self.normal_matrix = Mat3::from_mat4(inverse.transpose());
    }

    /// `model` and `normalMatrix` uniforms for this object.
    pub fn uniforms(&self) -> UniformSet {
        let mut set = UniformSet::new();
        set.push("model", self.model);
        set.push("normalMatrix", self.normal_matrix);
        set
    }
}
