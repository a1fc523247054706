//! Point lights: a positioned light with distance attenuation and a small
//! cube drawn at its location.

use glam::{Mat4, Vec3};

use crate::config::LightingConfig;
use crate::mesh::Geometry;
use crate::object::Object;
use crate::uniforms::{ShaderProgram, UniformSet, point_light_uniform};

/// A light radiating in all directions from a point.
///
/// The transform is a plain [`Object`], so a point light can be moved,
/// rotated and scaled like any other scene object. Only its position
/// affects shading; rotation and scale only change how the cube is drawn.
#[derive(Clone, Debug)]
pub struct PointLight {
    pub object: Object,
    colour: Vec3,
    intensity: f32,
    constant: f32,
    linear: f32,
    quadratic: f32,
    /// Creation order within the owning [`Lighting`](crate::Lighting).
    pub(crate) serial: u64,
    mesh: Geometry,
}

impl PointLight {
    /// A light at `position` with colour, intensity, attenuation and cube
    /// size taken from `config`.
    pub fn new(position: Vec3, config: &LightingConfig) -> Self {
        Self::with_size(position, config.point_light_size, config)
    }

    /// Like [`new`](Self::new) with an explicit cube edge length.
    pub fn with_size(position: Vec3, size: f32, config: &LightingConfig) -> Self {
        Self {
            object: Object::at(position),
            colour: config.default_colour,
            intensity: config.default_intensity,
            constant: config.constant,
            linear: config.linear,
            quadratic: config.quadratic,
            serial: 0,
            mesh: Geometry::cube(size),
        }
    }

    pub fn position(&self) -> Vec3 {
        self.object.position()
    }

    pub fn model_matrix(&self) -> Mat4 {
        self.object.model_matrix()
    }

    pub fn colour(&self) -> Vec3 {
        self.colour
    }

    pub fn set_colour(&mut self, colour: Vec3) {
        self.colour = colour;
    }

    pub fn intensity(&self) -> f32 {
        self.intensity
    }

    pub fn set_intensity(&mut self, intensity: f32) {
        self.intensity = intensity;
    }

    /// `(constant, linear, quadratic)` attenuation coefficients.
    pub fn attenuation(&self) -> (f32, f32, f32) {
        (self.constant, self.linear, self.quadratic)
    }

    /// Evaluate `1 / (c + l*d + q*d^2)` at distance `d`.
    pub fn attenuation_at(&self, distance: f32) -> f32 {
        1.0 / (self.constant + self.linear * distance + self.quadratic * distance * distance)
    }

    /// Creation sequence number, increasing with every light added.
    pub fn serial(&self) -> u64 {
        self.serial
    }

    /// The cube drawn to show where the light is.
    pub fn mesh(&self) -> &Geometry {
        &self.mesh
    }

    /// Colour and attenuation uniforms for slot `index` of the shader's
    /// point-light array. The position is written separately by
    /// [`Lighting`](crate::Lighting) because it must be in view space.
    pub fn uniforms(&self, index: usize, config: &LightingConfig) -> UniformSet {
        let base = self.colour * self.intensity;
        // Pull the highlight toward white
        let specular = self.colour.lerp(Vec3::ONE, config.specular_white_blend)
            * self.intensity
            * config.specular_factor;

        let mut set = UniformSet::new();
        set.push(point_light_uniform(index, "ambient"), base * config.ambient_factor);
        set.push(point_light_uniform(index, "diffuse"), base * config.diffuse_factor);
        set.push(point_light_uniform(index, "specular"), specular);
        set.push(point_light_uniform(index, "constant"), self.constant);
        set.push(point_light_uniform(index, "linear"), self.linear);
        set.push(point_light_uniform(index, "quadratic"), self.quadratic);
        set
    }

    pub fn set_uniforms_for_shader_program<S: ShaderProgram + ?Sized>(
        &self,
        shader: &mut S,
        index: usize,
        config: &LightingConfig,
    ) {
        self.uniforms(index, config).apply_to(shader);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::uniforms::UniformValue;

    fn vec3(set: &UniformSet, name: &str) -> Vec3 {
        match set.get(name) {
            Some(UniformValue::Vec3(v)) => *v,
            other => panic!("{name}: expected vec3, got {other:?}"),
        }
    }

    #[test]
    fn defaults_come_from_config() {
        let config = LightingConfig::default().attenuation(1.0, 0.2, 0.05);
        let light = PointLight::new(Vec3::new(1.0, 2.0, 3.0), &config);

        assert_eq!(light.position(), Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(light.attenuation(), (1.0, 0.2, 0.05));
        assert_eq!(light.colour(), Vec3::ONE);
        assert_eq!(light.mesh().vertices.len(), 24);
    }

    #[test]
    fn specular_is_blended_toward_white() {
        let config = LightingConfig::default();
        let mut light = PointLight::new(Vec3::ZERO, &config);
        light.set_colour(Vec3::new(1.0, 0.0, 0.0));
        light.set_intensity(2.0);

        let set = light.uniforms(2, &config);

        // mix(red, white, 0.5) * 2 * 0.5
        assert!(vec3(&set, "pointLights[2].specular").abs_diff_eq(Vec3::new(1.0, 0.5, 0.5), 1e-6));
        assert!(vec3(&set, "pointLights[2].diffuse").abs_diff_eq(Vec3::new(1.4, 0.0, 0.0), 1e-6));
        assert!(vec3(&set, "pointLights[2].ambient").abs_diff_eq(Vec3::new(0.6, 0.0, 0.0), 1e-6));
        assert_eq!(set.get("pointLights[2].linear"), Some(&UniformValue::Float(0.09)));
    }

    #[test]
    fn uniforms_only_touch_their_slot() {
        let config = LightingConfig::default();
        let light = PointLight::new(Vec3::ZERO, &config);
        let set = light.uniforms(1, &config);

        assert_eq!(set.len(), 6);
        assert!(set.iter().all(|(name, _)| name.starts_with("pointLights[1].")));
    }

    #[test]
    fn attenuation_falls_off_with_distance() {
        let light = PointLight::new(Vec3::ZERO, &LightingConfig::default());
        assert_eq!(light.attenuation_at(0.0), 1.0);
        assert!(light.attenuation_at(10.0) < light.attenuation_at(5.0));
    }
}
