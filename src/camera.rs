//! The viewer camera: look-around rotation, free movement and model framing.
//!
//! [`Camera`] stores its orientation as yaw/pitch angles in degrees and
//! derives the unit `front` vector from them on every rotation. It has two
//! motion modes that can be switched on and off independently:
//!
//! - **Rotation**: mouse deltas turn the camera in place (yaw/pitch)
//! - **Free camera**: WASD-style moves along `front` and the right axis
//!
//! A camera built with [`Camera::from_model`] is pulled back along +Z until
//! the model's bounding sphere exactly fills the vertical field of view.
//! [`Camera::reset`] returns to that framed view at any time.
//!
//! # Example
//!
//! ```
//! use lumen::{Camera, MoveDirection, Vec3};
//!
//! let mut camera = Camera::from_model(5.0, Vec3::ZERO);
//! assert!((camera.position().z - 13.0656).abs() < 1e-3);
//!
//! camera.set_free_camera_enabled(true);
//! camera.update_speed(1.0 / 60.0);
//! camera.move_in(MoveDirection::Forward);
//! assert!(camera.position().z < 13.0656);
//!
//! camera.reset();
//! assert!((camera.position().z - 13.0656).abs() < 1e-3);
//! ```

use glam::{Mat4, Vec3};

use crate::config::CameraConfig;
use crate::error::SceneError;
use crate::geometry::ModelInfo;
use crate::uniforms::UniformSet;

/// Smallest `sin(fov / 2)` used when computing the framing distance.
const MIN_HALF_FOV_SIN: f32 = 1e-3;

/// A free-camera movement step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MoveDirection {
    Forward,
    Backward,
    Left,
    Right,
}

impl MoveDirection {
    /// Map a WASD key to a direction.
    pub fn from_key_char(key: char) -> Option<Self> {
        match key.to_ascii_lowercase() {
            'w' => Some(Self::Forward),
            's' => Some(Self::Backward),
            'a' => Some(Self::Left),
            'd' => Some(Self::Right),
            _ => None,
        }
    }
}

#[derive(Clone, Debug)]
pub struct Camera {
    position: Vec3,
    /// Unit view direction, derived from yaw and pitch.
    front: Vec3,
    global_up: Vec3,
    /// Degrees. -90 looks down -Z.
    yaw: f32,
    /// Degrees, clamped to the configured pitch limit.
    pitch: f32,
    /// Vertical field of view in degrees.
    fov: f32,
    /// Distance covered by one movement step this frame.
    speed: f32,
    model_radius: f32,
    model_center: Vec3,
    rotation_enabled: bool,
    free_camera_enabled: bool,
    config: CameraConfig,
}

impl Default for Camera {
    fn default() -> Self {
        Self::build(CameraConfig::default())
    }
}

impl Camera {
    /// A camera five units up the +Z axis, looking at the origin.
    pub fn new() -> Self {
        Self::default()
    }

    /// A default-placed camera with custom constants.
    pub fn with_config(config: CameraConfig) -> Result<Self, SceneError> {
        config.validate()?;
        Ok(Self::build(config))
    }

    /// A camera framing a sphere of `radius` around `center`.
    pub fn from_model(radius: f32, center: Vec3) -> Self {
        let mut camera = Self::default();
        camera.frame(radius, center);
        camera
    }

    /// Like [`from_model`](Self::from_model) with custom constants.
    pub fn from_model_with_config(
        radius: f32,
        center: Vec3,
        config: CameraConfig,
    ) -> Result<Self, SceneError> {
        let mut camera = Self::with_config(config)?;
        camera.frame(radius, center);
        Ok(camera)
    }

    fn build(config: CameraConfig) -> Self {
        let default_radius =
            config.default_distance * half_fov_sin(config.default_fov);
        let mut camera = Self {
            position: Vec3::ZERO,
            front: Vec3::NEG_Z,
            global_up: Vec3::Y,
            yaw: config.default_yaw,
            pitch: config.default_pitch,
            fov: config.default_fov,
            speed: 0.0,
            model_radius: default_radius,
            model_center: Vec3::ZERO,
            rotation_enabled: true,
            free_camera_enabled: false,
            config,
        };
        camera.reset();
        camera
    }

    /// Re-target the camera at a new model and return to the framed view.
    ///
    /// Call this whenever the viewed model is replaced.
    pub fn frame(&mut self, radius: f32, center: Vec3) {
        let radius = if radius.is_finite() && radius >= 0.0 {
            radius
        } else {
            log::warn!("Cannot frame model with radius {radius}, using 0");
            0.0
        };
        self.model_radius = radius;
        self.model_center = center;
        self.reset();
    }

    /// [`frame`](Self::frame) using a model's bounding sphere.
    pub fn frame_model(&mut self, model: &dyn ModelInfo) {
        self.frame(model.model_radius(), model.model_center());
    }

    /// Restore default orientation and fov, and move back to the framed position.
    pub fn reset(&mut self) {
        self.yaw = self.config.default_yaw;
        self.pitch = self.config.default_pitch;
        self.fov = self.config.default_fov;
        self.update_front();

        let distance = self.model_radius / half_fov_sin(self.fov);
        self.position = self.model_center + Vec3::new(0.0, 0.0, distance);
    }

    /// Narrow (positive delta) or widen the field of view.
    pub fn apply_zoom(&mut self, scroll_delta: f32) {
        self.fov = (self.fov - scroll_delta).clamp(self.config.min_fov, self.config.max_fov);
    }

    /// Turn the camera by a mouse delta. Ignored unless rotation is enabled.
    pub fn apply_rotation(&mut self, dx: f32, dy: f32) {
        if !self.rotation_enabled {
            return;
        }

        self.yaw += dx * self.config.sensitivity;
        self.pitch += dy * self.config.sensitivity;
        self.pitch = self
            .pitch
            .clamp(-self.config.pitch_limit, self.config.pitch_limit);

        self.update_front();
    }

    fn update_front(&mut self) {
        let yaw = self.yaw.to_radians();
        let pitch = self.pitch.to_radians();
        self.front = Vec3::new(
            yaw.cos() * pitch.cos(),
            pitch.sin(),
            yaw.sin() * pitch.cos(),
        )
        .normalize_or(Vec3::NEG_Z);
    }

    /// Derive this frame's movement step from the elapsed time and model size.
    pub fn update_speed(&mut self, dt: f32) {
        self.speed = dt * (self.model_radius / self.config.speed_scaling);
    }

    /// Take one eased step. Ignored unless free camera mode is enabled.
    pub fn move_in(&mut self, direction: MoveDirection) {
        if !self.free_camera_enabled {
            return;
        }

        match direction {
            MoveDirection::Forward => self.move_forward(),
            MoveDirection::Backward => self.move_backward(),
            MoveDirection::Left => self.move_left(),
            MoveDirection::Right => self.move_right(),
        }
    }

    fn move_forward(&mut self) {
        self.ease_toward(self.position + self.speed * self.front);
    }

    fn move_backward(&mut self) {
        self.ease_toward(self.position - self.speed * self.front);
    }

    fn move_right(&mut self) {
        self.ease_toward(self.position + self.right() * self.speed);
    }

    fn move_left(&mut self) {
        self.ease_toward(self.position - self.right() * self.speed);
    }

    fn ease_toward(&mut self, target: Vec3) {
        self.position += (target - self.position) * self.config.movement_smoothing;
    }

    /// Unit vector to the camera's right, perpendicular to `front` and world up.
    pub fn right(&self) -> Vec3 {
        self.front.cross(self.global_up).normalize_or(Vec3::X)
    }

    /// Teleport the camera without changing its orientation.
    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
    }

    pub fn set_rotation_enabled(&mut self, enabled: bool) {
        self.rotation_enabled = enabled;
    }

    pub fn set_free_camera_enabled(&mut self, enabled: bool) {
        self.free_camera_enabled = enabled;
    }

    pub fn rotation_enabled(&self) -> bool {
        self.rotation_enabled
    }

    pub fn free_camera_enabled(&self) -> bool {
        self.free_camera_enabled
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn front(&self) -> Vec3 {
        self.front
    }

    pub fn global_up(&self) -> Vec3 {
        self.global_up
    }

    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    /// Vertical field of view in degrees.
    pub fn fov(&self) -> f32 {
        self.fov
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    pub fn aspect_ratio(&self) -> f32 {
        self.config.aspect_ratio
    }

    pub fn config(&self) -> &CameraConfig {
        &self.config
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.position + self.front, self.global_up)
    }

    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh_gl(
            self.fov.to_radians(),
            self.config.aspect_ratio,
            self.config.near,
            self.config.far,
        )
    }

    /// `view` and `projection` uniforms.
    pub fn uniforms(&self) -> UniformSet {
        let mut set = UniformSet::new();
        set.push("view", self.view_matrix());
        set.push("projection", self.projection_matrix());
        set
    }
}

fn half_fov_sin(fov_degrees: f32) -> f32 {
    (fov_degrees.to_radians() / 2.0).sin().max(MIN_HALF_FOV_SIN)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    #[test]
    fn default_camera_looks_down_negative_z() {
        let camera = Camera::new();
        assert!(camera.position().abs_diff_eq(Vec3::new(0.0, 0.0, 5.0), 1e-5));
        assert!(camera.front().abs_diff_eq(Vec3::NEG_Z, 1e-6));
        assert_eq!(camera.fov(), 45.0);
    }

    #[test]
    fn framing_fits_bounding_sphere() {
        let camera = Camera::from_model(5.0, Vec3::ZERO);
        let expected = 5.0 / 22.5f32.to_radians().sin();

        assert!((expected - 13.0656).abs() < 1e-3);
        assert!(camera.position().abs_diff_eq(Vec3::new(0.0, 0.0, expected), 1e-4));

        // The model center lands straight ahead in view space
        let center_in_view = camera.view_matrix().transform_point3(Vec3::ZERO);
        assert!(center_in_view.abs_diff_eq(Vec3::new(0.0, 0.0, -expected), 1e-3));
    }

    #[test]
    fn framing_offsets_from_model_center() {
        let center = Vec3::new(2.0, -1.0, 4.0);
        let camera = Camera::from_model(1.0, center);
        let offset = camera.position() - center;
        assert!(offset.x.abs() < 1e-6 && offset.y.abs() < 1e-6);
        assert!(offset.z > 0.0);
    }

    #[test]
    fn zero_radius_model_does_not_divide_by_zero() {
        let camera = Camera::from_model(0.0, Vec3::new(1.0, 1.0, 1.0));
        assert!(camera.position().is_finite());
        assert_eq!(camera.position(), Vec3::new(1.0, 1.0, 1.0));
    }

    #[test]
    fn negative_radius_is_treated_as_zero() {
        let camera = Camera::from_model(-3.0, Vec3::ZERO);
        assert_eq!(camera.position(), Vec3::ZERO);
    }

    #[test]
    fn zoom_is_clamped() {
        let mut camera = Camera::new();
        camera.apply_zoom(10.0);
        assert_eq!(camera.fov(), 35.0);
        camera.apply_zoom(100.0);
        assert_eq!(camera.fov(), 1.0);
        camera.apply_zoom(-100.0);
        assert_eq!(camera.fov(), 45.0);
    }

    #[test]
    fn pitch_never_leaves_limits() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut camera = Camera::new();

        for _ in 0..10_000 {
            let dx = rng.gen_range(-5000.0..5000.0);
            let dy = rng.gen_range(-5000.0..5000.0);
            camera.apply_rotation(dx, dy);

            assert!((-89.0..=89.0).contains(&camera.pitch()));
            assert!((camera.front().length() - 1.0).abs() < 1e-4);
        }
    }

    #[test]
    fn rotation_updates_front_from_angles() {
        let mut camera = Camera::new();
        // 0.05 sensitivity: 1800 units of dx turns yaw by 90 degrees
        camera.apply_rotation(1800.0, 0.0);
        assert!((camera.yaw() - 0.0).abs() < 1e-3);
        assert!(camera.front().abs_diff_eq(Vec3::X, 1e-4));
    }

    #[test]
    fn rotation_disabled_is_a_no_op() {
        let mut camera = Camera::new();
        camera.set_rotation_enabled(false);
        camera.apply_rotation(500.0, 500.0);
        assert_eq!(camera.yaw(), -90.0);
        assert_eq!(camera.pitch(), 0.0);
    }

    #[test]
    fn movement_requires_free_camera() {
        let mut camera = Camera::from_model(200.0, Vec3::ZERO);
        camera.update_speed(1.0);
        camera.set_position(Vec3::ZERO);
        let start = camera.position();

        camera.move_in(MoveDirection::Forward);
        assert_eq!(camera.position(), start);

        camera.set_free_camera_enabled(true);
        camera.move_in(MoveDirection::Forward);
        // speed = 1.0 * 200 / 200, eased by half
        assert!(camera.position().abs_diff_eq(start + Vec3::NEG_Z * 0.5, 1e-4));
    }

    #[test]
    fn strafing_uses_right_axis() {
        let mut camera = Camera::from_model(200.0, Vec3::ZERO);
        camera.set_free_camera_enabled(true);
        camera.update_speed(1.0);
        camera.set_position(Vec3::ZERO);
        let start = camera.position();

        camera.move_in(MoveDirection::Right);
        assert!(camera.position().abs_diff_eq(start + Vec3::X * 0.5, 1e-4));

        camera.move_in(MoveDirection::Left);
        camera.move_in(MoveDirection::Backward);
        assert!(camera.position().abs_diff_eq(start + Vec3::Z * 0.5, 1e-4));
    }

    #[test]
    fn speed_scales_with_model_radius() {
        let mut small = Camera::from_model(1.0, Vec3::ZERO);
        let mut large = Camera::from_model(100.0, Vec3::ZERO);
        small.update_speed(0.5);
        large.update_speed(0.5);

        assert!((small.speed() - 0.5 / 200.0).abs() < 1e-7);
        assert!((large.speed() - 100.0 * small.speed()).abs() < 1e-5);
    }

    #[test]
    fn reset_restores_framed_view() {
        let mut camera = Camera::from_model(5.0, Vec3::new(0.0, 1.0, 0.0));
        let framed = camera.position();

        camera.set_free_camera_enabled(true);
        camera.update_speed(3.0);
        camera.apply_rotation(300.0, -250.0);
        camera.apply_zoom(12.0);
        camera.move_in(MoveDirection::Left);

        camera.reset();

        assert!(camera.position().abs_diff_eq(framed, 1e-5));
        assert_eq!(camera.yaw(), -90.0);
        assert_eq!(camera.pitch(), 0.0);
        assert_eq!(camera.fov(), 45.0);
    }

    #[test]
    fn key_chars_map_to_directions() {
        assert_eq!(MoveDirection::from_key_char('W'), Some(MoveDirection::Forward));
        assert_eq!(MoveDirection::from_key_char('a'), Some(MoveDirection::Left));
        assert_eq!(MoveDirection::from_key_char('q'), None);
    }

    #[test]
    fn invalid_config_is_rejected() {
        let config = CameraConfig::default().clip_planes(1.0, 0.5);
        assert!(Camera::with_config(config).is_err());
    }

    #[test]
    fn uniforms_carry_view_and_projection() {
        let camera = Camera::new();
        let set = camera.uniforms();
        assert_eq!(set.len(), 2);
        assert!(set.get("view").is_some());
        assert!(set.get("projection").is_some());
    }
}
