//! Tunable constants for the camera, model transform and lights.
//!
//! Every value the viewer used to hard-code lives here, grouped by the
//! component that reads it. The [`Default`] impls carry the stock values;
//! builder-style setters allow per-scene overrides:
//!
//! ```
//! use lumen::{CameraConfig, LightingConfig, ViewerConfig};
//!
//! let config = ViewerConfig::default()
//!     .camera(CameraConfig::default().sensitivity(0.1))
//!     .lighting(LightingConfig::default().max_point_lights(2));
//!
//! assert!(config.validate().is_ok());
//! ```

use glam::Vec3;

use crate::error::SceneError;

/// Camera constants: projection, mouse sensitivity and navigation speed.
#[derive(Clone, Debug, PartialEq)]
pub struct CameraConfig {
    /// Field of view the camera starts with, in degrees.
    pub default_fov: f32,
    /// Smallest field of view reachable by zooming, in degrees.
    pub min_fov: f32,
    /// Largest field of view reachable by zooming, in degrees.
    pub max_fov: f32,
    /// Degrees of yaw/pitch per unit of mouse motion.
    pub sensitivity: f32,
    /// Initial yaw in degrees. -90 faces down the negative Z axis.
    pub default_yaw: f32,
    /// Initial pitch in degrees.
    pub default_pitch: f32,
    /// Pitch is clamped to `[-pitch_limit, pitch_limit]` degrees.
    pub pitch_limit: f32,
    /// Divides the model radius when deriving per-frame speed.
    pub speed_scaling: f32,
    /// Width over height of the viewport.
    pub aspect_ratio: f32,
    /// Near clipping plane of the projection.
    pub near: f32,
    /// Far clipping plane of the projection.
    pub far: f32,
    /// Fraction of the remaining distance covered per movement step.
    pub movement_smoothing: f32,
    /// Distance from the origin of a camera with no model to frame.
    pub default_distance: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            default_fov: 45.0,
            min_fov: 1.0,
            max_fov: 45.0,
            sensitivity: 0.05,
            default_yaw: -90.0,
            default_pitch: 0.0,
            pitch_limit: 89.0,
            speed_scaling: 200.0,
            aspect_ratio: 800.0 / 600.0,
            near: 0.1,
            far: 500.0,
            movement_smoothing: 0.5,
            default_distance: 5.0,
        }
    }
}

impl CameraConfig {
    /// Set the zoom range in degrees. The default fov is clamped into it.
    pub fn fov_range(mut self, min: f32, max: f32) -> Self {
        self.min_fov = min;
        self.max_fov = max;
        self.default_fov = self.default_fov.clamp(min, max);
        self
    }

    /// Set the starting field of view in degrees.
    pub fn default_fov(mut self, fov: f32) -> Self {
        self.default_fov = fov;
        self
    }

    /// Set mouse sensitivity for look-around rotation.
    pub fn sensitivity(mut self, sensitivity: f32) -> Self {
        self.sensitivity = sensitivity;
        self
    }

    /// Set the viewport aspect ratio.
    pub fn aspect_ratio(mut self, aspect_ratio: f32) -> Self {
        self.aspect_ratio = aspect_ratio;
        self
    }

    /// Set near and far clipping planes.
    pub fn clip_planes(mut self, near: f32, far: f32) -> Self {
        self.near = near;
        self.far = far;
        self
    }

    /// Set the movement smoothing factor (1.0 snaps straight to the target).
    pub fn movement_smoothing(mut self, factor: f32) -> Self {
        self.movement_smoothing = factor;
        self
    }

    /// Set the divisor applied to the model radius when deriving speed.
    pub fn speed_scaling(mut self, scaling: f32) -> Self {
        self.speed_scaling = scaling;
        self
    }

    pub fn validate(&self) -> Result<(), SceneError> {
        // sin(fov / 2) must stay away from zero for the framing distance
        if !(self.min_fov > 0.0 && self.min_fov <= self.max_fov && self.max_fov < 180.0) {
            return Err(SceneError::InvalidConfig(format!(
                "fov range [{}, {}] must satisfy 0 < min <= max < 180",
                self.min_fov, self.max_fov
            )));
        }
        if !(self.min_fov..=self.max_fov).contains(&self.default_fov) {
            return Err(SceneError::InvalidConfig(format!(
                "default fov {} outside [{}, {}]",
                self.default_fov, self.min_fov, self.max_fov
            )));
        }
        if !(self.pitch_limit > 0.0 && self.pitch_limit < 90.0) {
            return Err(SceneError::InvalidConfig(format!(
                "pitch limit {} must be in (0, 90)",
                self.pitch_limit
            )));
        }
        if self.aspect_ratio <= 0.0 {
            return Err(SceneError::InvalidConfig(format!(
                "aspect ratio {} must be positive",
                self.aspect_ratio
            )));
        }
        if !(self.near > 0.0 && self.far > self.near) {
            return Err(SceneError::InvalidConfig(format!(
                "clip planes near={} far={} must satisfy 0 < near < far",
                self.near, self.far
            )));
        }
        if self.speed_scaling <= 0.0 {
            return Err(SceneError::InvalidConfig(
                "speed scaling must be positive".to_string(),
            ));
        }
        if !(self.movement_smoothing > 0.0 && self.movement_smoothing <= 1.0) {
            return Err(SceneError::InvalidConfig(format!(
                "movement smoothing {} must be in (0, 1]",
                self.movement_smoothing
            )));
        }
        Ok(())
    }
}

/// Model transform constants.
#[derive(Clone, Debug, PartialEq)]
pub struct ObjectConfig {
    /// Degrees of model rotation per unit of mouse drag.
    pub rotation_sensitivity: f32,
    /// Axis the model spins around in natural rotation mode.
    pub natural_rotation_axis: Vec3,
    /// Spin rate in natural rotation mode, in degrees per second.
    pub natural_rotation_speed: f32,
}

impl Default for ObjectConfig {
    fn default() -> Self {
        Self {
            rotation_sensitivity: 0.1,
            natural_rotation_axis: Vec3::new(0.5, 1.0, 0.5),
            // One radian per second
            natural_rotation_speed: 1.0_f32.to_degrees(),
        }
    }
}

impl ObjectConfig {
    /// Set the drag rotation sensitivity.
    pub fn rotation_sensitivity(mut self, sensitivity: f32) -> Self {
        self.rotation_sensitivity = sensitivity;
        self
    }

    /// Set axis and speed (degrees per second) for natural rotation.
    pub fn natural_rotation(mut self, axis: Vec3, speed: f32) -> Self {
        self.natural_rotation_axis = axis;
        self.natural_rotation_speed = speed;
        self
    }

    pub fn validate(&self) -> Result<(), SceneError> {
        if self.natural_rotation_axis.length_squared() <= f32::EPSILON {
            return Err(SceneError::DegenerateDirection(self.natural_rotation_axis));
        }
        Ok(())
    }
}

/// Light colour factors, attenuation defaults and point-light placement.
#[derive(Clone, Debug, PartialEq)]
pub struct LightingConfig {
    /// Ambient term as a fraction of `colour * intensity`.
    pub ambient_factor: f32,
    /// Diffuse term as a fraction of `colour * intensity`.
    pub diffuse_factor: f32,
    /// Specular term as a fraction of `colour * intensity`.
    pub specular_factor: f32,
    /// How far point-light specular is pulled toward white.
    pub specular_white_blend: f32,
    /// Constant attenuation coefficient.
    pub constant: f32,
    /// Linear attenuation coefficient.
    pub linear: f32,
    /// Quadratic attenuation coefficient.
    pub quadratic: f32,
    /// Colour every light starts with.
    pub default_colour: Vec3,
    /// Intensity every light starts with.
    pub default_intensity: f32,
    /// Direction of the sun light, from the light toward the scene.
    pub default_caster_direction: Vec3,
    /// Point lights kept before the oldest is evicted.
    pub max_point_lights: usize,
    /// Size of the `pointLights[]` array declared by the lighting shader.
    pub shader_point_light_slots: usize,
    /// Edge length of the cube drawn at each point light.
    pub point_light_size: f32,
    /// Nearest depth at which new point lights are placed.
    pub placement_near: f32,
    /// Farthest placement depth as a multiple of the model radius.
    pub placement_far_multiplier: f32,
}

impl Default for LightingConfig {
    fn default() -> Self {
        Self {
            ambient_factor: 0.3,
            diffuse_factor: 0.7,
            specular_factor: 0.5,
            specular_white_blend: 0.5,
            constant: 1.0,
            linear: 0.09,
            quadratic: 0.032,
            default_colour: Vec3::ONE,
            default_intensity: 1.0,
            default_caster_direction: Vec3::new(-0.2, -1.0, -0.3),
            max_point_lights: 4,
            shader_point_light_slots: 4,
            point_light_size: 0.5,
            placement_near: 1.0,
            placement_far_multiplier: 3.0,
        }
    }
}

impl LightingConfig {
    /// Set the point-light capacity.
    pub fn max_point_lights(mut self, max: usize) -> Self {
        self.max_point_lights = max;
        self
    }

    /// Set the size of the shader's point-light array.
    pub fn shader_point_light_slots(mut self, slots: usize) -> Self {
        self.shader_point_light_slots = slots;
        self
    }

    /// Set the attenuation coefficients given to new point lights.
    pub fn attenuation(mut self, constant: f32, linear: f32, quadratic: f32) -> Self {
        self.constant = constant;
        self.linear = linear;
        self.quadratic = quadratic;
        self
    }

    /// Set the ambient, diffuse and specular factors.
    pub fn factors(mut self, ambient: f32, diffuse: f32, specular: f32) -> Self {
        self.ambient_factor = ambient;
        self.diffuse_factor = diffuse;
        self.specular_factor = specular;
        self
    }

    /// Set the initial sun direction.
    pub fn caster_direction(mut self, direction: Vec3) -> Self {
        self.default_caster_direction = direction;
        self
    }

    pub fn validate(&self) -> Result<(), SceneError> {
        if self.max_point_lights == 0 {
            return Err(SceneError::InvalidConfig(
                "max point lights must be at least 1".to_string(),
            ));
        }
        if self.max_point_lights > self.shader_point_light_slots {
            return Err(SceneError::InvalidConfig(format!(
                "max point lights {} exceeds the shader's {} slots",
                self.max_point_lights, self.shader_point_light_slots
            )));
        }
        let placement = [self.placement_near, self.placement_far_multiplier];
        if placement.iter().any(|v| !(v.is_finite() && *v > 0.0)) {
            return Err(SceneError::InvalidConfig(
                "placement near plane and far multiplier must be finite and positive".to_string(),
            ));
        }
        if self.default_caster_direction.length_squared() <= f32::EPSILON {
            return Err(SceneError::DegenerateDirection(
                self.default_caster_direction,
            ));
        }
        Ok(())
    }
}

/// Configuration for a whole [`Viewer`](crate::Viewer).
#[derive(Clone, Debug, PartialEq)]
pub struct ViewerConfig {
    pub camera: CameraConfig,
    pub object: ObjectConfig,
    pub lighting: LightingConfig,
    /// Material shininess sent alongside the model uniforms.
    pub shininess: f32,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            camera: CameraConfig::default(),
            object: ObjectConfig::default(),
            lighting: LightingConfig::default(),
            shininess: 30.0,
        }
    }
}

impl ViewerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn camera(mut self, camera: CameraConfig) -> Self {
        self.camera = camera;
        self
    }

    pub fn object(mut self, object: ObjectConfig) -> Self {
        self.object = object;
        self
    }

    pub fn lighting(mut self, lighting: LightingConfig) -> Self {
        self.lighting = lighting;
        self
    }

    pub fn shininess(mut self, shininess: f32) -> Self {
        self.shininess = shininess;
        self
    }

    pub fn validate(&self) -> Result<(), SceneError> {
        self.camera.validate()?;
        self.object.validate()?;
        self.lighting.validate()
    }
}
