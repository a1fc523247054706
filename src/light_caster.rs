//! The directional "sun" light.
//!
//! A [`LightCaster`] stores its orientation twice: as a unit direction vector
//! (what the shader consumes) and as azimuth/elevation angles in degrees
//! (what a UI slider edits). Every setter recomputes the other form so the
//! two never disagree.
//!
//! The conversion is the usual spherical mapping with azimuth measured from
//! +Z toward +X:
//!
//! ```text
//! x = cos(elevation) * sin(azimuth)
//! y = sin(elevation)
//! z = cos(elevation) * cos(azimuth)
//! ```
//!
//! At the poles (elevation ±90°) the azimuth is undefined and
//! [`direction_to_angles`] reports 0.

use glam::Vec3;

use crate::config::LightingConfig;
use crate::error::SceneError;
use crate::uniforms::{ShaderProgram, UniformSet, dir_light_uniform};

/// Convert azimuth/elevation in degrees to a unit direction.
pub fn angles_to_direction(azimuth: f32, elevation: f32) -> Vec3 {
    let az = azimuth.to_radians();
    let el = elevation.to_radians();
    Vec3::new(el.cos() * az.sin(), el.sin(), el.cos() * az.cos())
}

/// Convert a direction to `(azimuth, elevation)` in degrees.
///
/// Azimuth is normalized to `[0, 360)`. The input need not be unit length.
pub fn direction_to_angles(direction: Vec3) -> (f32, f32) {
    let d = direction.normalize_or_zero();
    let azimuth = wrap_degrees(d.x.atan2(d.z).to_degrees());
    let elevation = d.y.clamp(-1.0, 1.0).asin().to_degrees();
    (azimuth, elevation)
}

fn wrap_degrees(angle: f32) -> f32 {
    let wrapped = angle.rem_euclid(360.0);
    // rem_euclid rounds tiny negative angles up to exactly 360
    if wrapped >= 360.0 { 0.0 } else { wrapped }
}

/// A light infinitely far away, producing parallel rays.
#[derive(Clone, Debug, PartialEq)]
pub struct LightCaster {
    /// Unit vector from the light toward the scene.
    direction: Vec3,
    azimuth: f32,
    elevation: f32,
    intensity: f32,
    colour: Vec3,
}

impl LightCaster {
    /// A light using the configured default direction, colour and intensity.
    pub fn new(config: &LightingConfig) -> Result<Self, SceneError> {
        let mut caster = Self::from_angles(0.0, 0.0);
        caster.set_direction(config.default_caster_direction)?;
        caster.colour = config.default_colour;
        caster.intensity = config.default_intensity;
        Ok(caster)
    }

    /// A white light of unit intensity pointing along `direction`.
    pub fn from_direction(direction: Vec3) -> Result<Self, SceneError> {
        let mut caster = Self::from_angles(0.0, 0.0);
        caster.set_direction(direction)?;
        Ok(caster)
    }

    /// A white light of unit intensity at the given angles in degrees.
    pub fn from_angles(azimuth: f32, elevation: f32) -> Self {
        let mut caster = Self {
            direction: Vec3::Z,
            azimuth: 0.0,
            elevation: 0.0,
            intensity: 1.0,
            colour: Vec3::ONE,
        };
        caster.set_angles(azimuth, elevation);
        caster
    }

    /// Point the light along `direction`, updating the angles to match.
    ///
    /// A zero-length direction is rejected and leaves the light unchanged.
    pub fn set_direction(&mut self, direction: Vec3) -> Result<(), SceneError> {
        let Some(unit) = direction.try_normalize() else {
            log::warn!("Ignoring degenerate light direction {direction:?}");
            return Err(SceneError::DegenerateDirection(direction));
        };
        self.direction = unit;
        (self.azimuth, self.elevation) = direction_to_angles(unit);
        Ok(())
    }

    /// Orient the light by angles in degrees, updating the direction to match.
    pub fn set_angles(&mut self, azimuth: f32, elevation: f32) {
        self.azimuth = wrap_degrees(azimuth);
        self.elevation = elevation.clamp(-90.0, 90.0);
        self.direction = angles_to_direction(self.azimuth, self.elevation);
    }

    pub fn set_colour(&mut self, colour: Vec3) {
        self.colour = colour;
    }

    pub fn set_intensity(&mut self, intensity: f32) {
        self.intensity = intensity;
    }

    pub fn direction(&self) -> Vec3 {
        self.direction
    }

    pub fn azimuth(&self) -> f32 {
        self.azimuth
    }

    pub fn elevation(&self) -> f32 {
        self.elevation
    }

    pub fn colour(&self) -> Vec3 {
        self.colour
    }

    pub fn intensity(&self) -> f32 {
        self.intensity
    }

    /// `dirLight.*` uniforms: direction plus the three colour terms.
    pub fn uniforms(&self, config: &LightingConfig) -> UniformSet {
        let base = self.colour * self.intensity;

        let mut set = UniformSet::new();
        set.push(dir_light_uniform("direction"), self.direction);
        set.push(dir_light_uniform("ambient"), base * config.ambient_factor);
        set.push(dir_light_uniform("diffuse"), base * config.diffuse_factor);
        set.push(dir_light_uniform("specular"), base * config.specular_factor);
        set
    }

    pub fn set_uniforms_for_shader_program<S: ShaderProgram + ?Sized>(
        &self,
        shader: &mut S,
        config: &LightingConfig,
    ) {
        self.uniforms(config).apply_to(shader);
    }
}
