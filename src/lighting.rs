//! The scene's light sources and the per-frame uniform push.
//!
//! [`Lighting`] owns exactly one directional [`LightCaster`] and a bounded
//! queue of [`PointLight`]s. The queue is FIFO: once it holds
//! `max_point_lights` lights, adding another evicts the oldest one.
//!
//! # Frame Order
//!
//! Each frame the caller must, in this order:
//!
//! 1. finish mutating the camera and the model
//! 2. call [`set_view`](Lighting::set_view) and
//!    [`set_projection`](Lighting::set_projection) with this frame's matrices
//! 3. call [`set_uniforms_for_shader_program`](Lighting::set_uniforms_for_shader_program)
//!
//! Point-light positions are written in view space using the cached view
//! matrix, so skipping step 2 lights the model from last frame's camera.
//! Each matrix is tracked separately; pushing uniforms while either one
//! has not been refreshed since the previous push logs a warning rather
//! than failing.
//!
//! # Placement
//!
//! New point lights are scattered inside the camera's view frustum. Camera
//! and model are not stored; they are passed in as a [`SceneContext`] each
//! time a light is added.
//!
//! ```
//! use lumen::{Camera, Lighting, LightingConfig, ModelBounds, SceneContext, Vec3};
//!
//! let bounds = ModelBounds::from_sphere(Vec3::ZERO, 2.0);
//! let camera = Camera::from_model(2.0, Vec3::ZERO);
//! let mut lighting = Lighting::with_seed(LightingConfig::default(), 1)?;
//!
//! let scene = SceneContext::new(&camera, &bounds);
//! for _ in 0..6 {
//!     lighting.add_point_light(&scene);
//! }
//! assert_eq!(lighting.point_light_count(), 4);
//! # Ok::<(), lumen::SceneError>(())
//! ```

use std::collections::VecDeque;

use glam::{Mat4, Vec3};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::camera::Camera;
use crate::config::LightingConfig;
use crate::error::SceneError;
use crate::geometry::ModelInfo;
use crate::light_caster::LightCaster;
use crate::point_light::PointLight;
use crate::uniforms::{ShaderProgram, UniformSet, point_light_uniform};

/// Deepest placement, leaving headroom so offset positions stay finite.
const MAX_PLACEMENT_DEPTH: f32 = f32::MAX / 4.0;

/// The camera and model a light placement is computed against.
#[derive(Clone, Copy)]
pub struct SceneContext<'a> {
    pub camera: &'a Camera,
    pub model: &'a dyn ModelInfo,
}

impl<'a> SceneContext<'a> {
    pub fn new(camera: &'a Camera, model: &'a dyn ModelInfo) -> Self {
        Self { camera, model }
    }
}

pub struct Lighting {
    config: LightingConfig,
    light_caster: LightCaster,
    /// Oldest light at the front.
    point_lights: VecDeque<PointLight>,
    next_serial: u64,
    view: Mat4,
    projection: Mat4,
    /// Set by `set_view`, cleared by each uniform push.
    view_fresh: bool,
    /// Set by `set_projection`, cleared by each uniform push.
    projection_fresh: bool,
    show_point_lights: bool,
    rng: StdRng,
}

impl Lighting {
    /// Lighting with the default sun and no point lights, seeded from OS entropy.
    pub fn new(config: LightingConfig) -> Result<Self, SceneError> {
        Self::with_rng(config, StdRng::from_entropy())
    }

    /// Like [`new`](Self::new) with reproducible point-light placement.
    pub fn with_seed(config: LightingConfig, seed: u64) -> Result<Self, SceneError> {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }

    fn with_rng(config: LightingConfig, rng: StdRng) -> Result<Self, SceneError> {
        config.validate()?;
        let light_caster = LightCaster::new(&config)?;
        Ok(Self {
            point_lights: VecDeque::with_capacity(config.max_point_lights),
            config,
            light_caster,
            next_serial: 0,
            view: Mat4::IDENTITY,
            projection: Mat4::IDENTITY,
            view_fresh: false,
            projection_fresh: false,
            show_point_lights: true,
            rng,
        })
    }

    pub fn config(&self) -> &LightingConfig {
        &self.config
    }

    /// Cache this frame's view matrix.
    pub fn set_view(&mut self, view: Mat4) {
        self.view = view;
        self.view_fresh = true;
    }

    /// Cache this frame's projection matrix.
    pub fn set_projection(&mut self, projection: Mat4) {
        self.projection = projection;
        self.projection_fresh = true;
    }

    pub fn view(&self) -> Mat4 {
        self.view
    }

    pub fn projection(&self) -> Mat4 {
        self.projection
    }

    /// True if uniforms were pushed since the last [`set_view`](Self::set_view).
    pub fn is_view_stale(&self) -> bool {
        !self.view_fresh
    }

    /// True if uniforms were pushed since the last
    /// [`set_projection`](Self::set_projection).
    pub fn is_projection_stale(&self) -> bool {
        !self.projection_fresh
    }

    pub fn light_caster(&self) -> &LightCaster {
        &self.light_caster
    }

    pub fn light_caster_mut(&mut self) -> &mut LightCaster {
        &mut self.light_caster
    }

    /// Point lights from oldest to newest.
    pub fn point_lights(&self) -> impl Iterator<Item = &PointLight> {
        self.point_lights.iter()
    }

    pub fn point_light_mut(&mut self, index: usize) -> Option<&mut PointLight> {
        self.point_lights.get_mut(index)
    }

    pub fn point_light_count(&self) -> usize {
        self.point_lights.len()
    }

    pub fn show_point_lights(&self) -> bool {
        self.show_point_lights
    }

    pub fn set_show_point_lights(&mut self, show: bool) {
        self.show_point_lights = show;
    }

    /// Add a light at a random point inside the camera's view frustum.
    ///
    /// Evicts the oldest light first when at capacity. Returns the new
    /// light's serial number.
    pub fn add_point_light(&mut self, scene: &SceneContext<'_>) -> u64 {
        if self.point_lights.len() >= self.config.max_point_lights {
            if let Some(evicted) = self.point_lights.pop_front() {
                log::debug!("Evicting point light #{}", evicted.serial);
            }
        }

        let position = self.sample_frustum_point(scene);
        let mut light = PointLight::new(position, &self.config);
        light.serial = self.next_serial;
        self.next_serial += 1;

        log::debug!("Added point light #{} at {position:?}", light.serial);
        let serial = light.serial;
        self.point_lights.push_back(light);
        serial
    }

    /// A point on a camera-facing frustum slice at a uniformly random depth.
    ///
    /// Depth is uniform rather than volume-weighted, so lights cluster
    /// toward the camera.
    fn sample_frustum_point(&mut self, scene: &SceneContext<'_>) -> Vec3 {
        let camera = scene.camera;
        let front = camera.front();
        let up = camera.global_up();
        let right = camera.right();

        let radius = scene.model.model_radius();
        let radius = if radius.is_finite() && radius >= 0.0 {
            radius
        } else {
            log::warn!("Cannot place light around model with radius {radius}, using 0");
            0.0
        };

        let near = self.config.placement_near;
        let far = (self.config.placement_far_multiplier * radius)
            .min(MAX_PLACEMENT_DEPTH)
            .max(near);
        let depth = self.rng.gen_range(near..=far);

        let half_height = depth * (camera.fov().to_radians() / 2.0).tan();
        let half_width = half_height * camera.aspect_ratio();

        let rand_x: f32 = self.rng.gen_range(-1.0..=1.0);
        let rand_y: f32 = self.rng.gen_range(-1.0..=1.0);

        camera.position()
            + front * depth
            + right * (rand_x * half_width)
            + up * (rand_y * half_height)
    }

    /// Remove and return the most recently added light.
    pub fn remove_point_light(&mut self) -> Option<PointLight> {
        self.point_lights.pop_back()
    }

    /// Add or remove lights until there are `count`, capped at capacity.
    ///
    /// Removal takes the newest lights first.
    pub fn set_point_light_count(&mut self, count: usize, scene: &SceneContext<'_>) {
        let count = count.min(self.config.max_point_lights);
        while self.point_lights.len() < count {
            self.add_point_light(scene);
        }
        self.point_lights.truncate(count);
    }

    /// Every lighting uniform: `nr_point_lights`, each `pointLights[i].*`
    /// with a view-space position, then `dirLight.*`.
    pub fn uniforms(&self) -> UniformSet {
        // `validate` keeps capacity within the shader's declared slots.
        let count = self.point_lights.len();

        let mut set = UniformSet::new();
        set.push("nr_point_lights", count as i32);

        for (i, light) in self.point_lights.iter().enumerate() {
            let view_space = (self.view * light.position().extend(1.0)).truncate();
            set.push(point_light_uniform(i, "position"), view_space);
            set.extend(light.uniforms(i, &self.config));
        }

        set.extend(self.light_caster.uniforms(&self.config));
        set
    }

    /// Write [`uniforms`](Self::uniforms) to the lighting shader.
    pub fn set_uniforms_for_shader_program<S: ShaderProgram + ?Sized>(&mut self, shader: &mut S) {
        if !self.view_fresh {
            log::warn!("Pushing lighting uniforms without a view update this frame");
        }
        if !self.projection_fresh {
            log::warn!("Pushing lighting uniforms without a projection update this frame");
        }
        self.uniforms().apply_to(shader);
        self.view_fresh = false;
        self.projection_fresh = false;
    }

    /// Draw a cube at every point light, unless hidden.
    ///
    /// Activates `shader`, sets `view` and `projection` once, then sets
    /// `model` and `lightColour` for each light before calling `draw`.
    pub fn draw_point_lights<S, F>(&self, shader: &mut S, mut draw: F)
    where
        S: ShaderProgram + ?Sized,
        F: FnMut(&mut S, &PointLight),
    {
        if !self.show_point_lights {
            return;
        }

        shader.activate();
        shader.set_uniform("view", self.view.into());
        shader.set_uniform("projection", self.projection.into());

        for light in &self.point_lights {
            shader.set_uniform("model", light.model_matrix().into());
            shader.set_uniform("lightColour", light.colour().into());
            draw(shader, light);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CameraConfig;
    use crate::uniforms::UniformValue;
    use crate::uniforms::tests::RecordingShader;

    struct Sphere(f32);

    impl ModelInfo for Sphere {
        fn model_radius(&self) -> f32 {
            self.0
        }

        fn model_center(&self) -> Vec3 {
            Vec3::ZERO
        }
    }

    fn init_logging() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    fn lighting() -> Lighting {
        Lighting::with_seed(LightingConfig::default(), 0xC0FFEE).unwrap()
    }

    fn camera_at_origin() -> Camera {
        let config = CameraConfig::default().aspect_ratio(4.0 / 3.0);
        let mut camera = Camera::with_config(config).unwrap();
        camera.set_position(Vec3::ZERO);
        camera
    }

    #[test]
    fn eviction_keeps_newest_lights() {
        init_logging();
        let camera = camera_at_origin();
        let model = Sphere(10.0);
        let scene = SceneContext::new(&camera, &model);
        let mut lighting = lighting();

        for expected in 0..10 {
            assert_eq!(lighting.add_point_light(&scene), expected);
            assert!(lighting.point_light_count() <= 4);
        }

        let serials: Vec<u64> = lighting.point_lights().map(PointLight::serial).collect();
        assert_eq!(serials, [6, 7, 8, 9]);
    }

    #[test]
    fn placement_stays_inside_frustum() {
        let camera = camera_at_origin();
        assert!(camera.front().abs_diff_eq(Vec3::NEG_Z, 1e-6));

        let model = Sphere(10.0);
        let scene = SceneContext::new(&camera, &model);
        let mut lighting = lighting();
        let tan_half = 22.5f32.to_radians().tan();

        for _ in 0..1000 {
            lighting.add_point_light(&scene);
            let Some(light) = lighting.point_lights().last() else {
                panic!("no light added");
            };
            let p = light.position();

            let depth = -p.z;
            assert!((1.0 - 1e-4..=30.0 + 1e-4).contains(&depth), "depth {depth}");

            let half_height = depth * tan_half;
            let half_width = half_height * 4.0 / 3.0;
            assert!(p.y.abs() <= half_height + 1e-4, "{p:?}");
            assert!(p.x.abs() <= half_width + 1e-4, "{p:?}");
        }
    }

    #[test]
    fn tiny_models_still_place_lights() {
        let camera = camera_at_origin();
        let model = Sphere(0.0);
        let mut lighting = lighting();

        lighting.add_point_light(&SceneContext::new(&camera, &model));

        let Some(light) = lighting.point_lights().next() else {
            panic!("no light added");
        };
        assert!((light.position().z + 1.0).abs() < 1e-5);
    }

    #[test]
    fn overflowing_model_radius_places_lights_at_near_plane() {
        init_logging();
        let camera = camera_at_origin();
        let bounds = crate::geometry::ModelBounds::from_sphere(Vec3::ZERO, 2.0e38);
        assert!(!bounds.radius().is_finite());
        let mut lighting = lighting();

        lighting.add_point_light(&SceneContext::new(&camera, &bounds));

        let Some(light) = lighting.point_lights().next() else {
            panic!("no light added");
        };
        assert!(light.position().is_finite());
        assert!((light.position().z + 1.0).abs() < 1e-5);
    }

    #[test]
    fn huge_finite_radius_keeps_positions_finite() {
        let camera = camera_at_origin();
        let model = Sphere(1.0e38);
        let scene = SceneContext::new(&camera, &model);
        let mut lighting = lighting();

        for _ in 0..100 {
            lighting.add_point_light(&scene);
        }

        assert!(lighting.point_lights().all(|l| l.position().is_finite()));
    }

    #[test]
    fn same_seed_places_lights_identically() {
        let camera = camera_at_origin();
        let model = Sphere(3.0);
        let scene = SceneContext::new(&camera, &model);

        let mut a = lighting();
        let mut b = lighting();
        a.set_point_light_count(3, &scene);
        b.set_point_light_count(3, &scene);

        let pa: Vec<Vec3> = a.point_lights().map(PointLight::position).collect();
        let pb: Vec<Vec3> = b.point_lights().map(PointLight::position).collect();
        assert_eq!(pa, pb);
    }

    #[test]
    fn remove_pops_the_newest() {
        let camera = camera_at_origin();
        let model = Sphere(1.0);
        let scene = SceneContext::new(&camera, &model);
        let mut lighting = lighting();

        lighting.set_point_light_count(3, &scene);
        let removed = lighting.remove_point_light().map(|l| l.serial());

        assert_eq!(removed, Some(2));
        assert_eq!(lighting.point_light_count(), 2);

        lighting.set_point_light_count(0, &scene);
        assert!(lighting.remove_point_light().is_none());
    }

    #[test]
    fn count_is_clamped_to_capacity() {
        let camera = camera_at_origin();
        let model = Sphere(1.0);
        let scene = SceneContext::new(&camera, &model);
        let mut lighting = lighting();

        lighting.set_point_light_count(99, &scene);
        assert_eq!(lighting.point_light_count(), 4);

        lighting.set_point_light_count(1, &scene);
        let serials: Vec<u64> = lighting.point_lights().map(PointLight::serial).collect();
        assert_eq!(serials, [0]);
    }

    #[test]
    fn uniforms_use_view_space_positions() {
        let camera = camera_at_origin();
        let model = Sphere(5.0);
        let scene = SceneContext::new(&camera, &model);
        let mut lighting = lighting();
        lighting.set_point_light_count(2, &scene);

        let view = Mat4::from_translation(Vec3::new(0.0, 0.0, -5.0));
        lighting.set_view(view);
        lighting.set_projection(camera.projection_matrix());

        let mut shader = RecordingShader::default();
        lighting.set_uniforms_for_shader_program(&mut shader);

        assert_eq!(shader.last("nr_point_lights"), Some(UniformValue::Int(2)));
        for (i, light) in lighting.point_lights().enumerate() {
            let expected = light.position() + Vec3::new(0.0, 0.0, -5.0);
            let Some(UniformValue::Vec3(actual)) =
                shader.last(&format!("pointLights[{i}].position"))
            else {
                panic!("missing position for light {i}");
            };
            assert!(actual.abs_diff_eq(expected, 1e-5));
        }
        assert!(shader.last("dirLight.direction").is_some());
        assert!(shader.last("pointLights[2].position").is_none());
    }

    #[test]
    fn pushing_uniforms_marks_view_stale() {
        init_logging();
        let mut lighting = lighting();
        let mut shader = RecordingShader::default();
        assert!(lighting.is_view_stale());

        lighting.set_view(Mat4::IDENTITY);
        assert!(!lighting.is_view_stale());

        lighting.set_uniforms_for_shader_program(&mut shader);
        assert!(lighting.is_view_stale());

        // A second push without a view update still writes everything
        let writes = shader.writes.len();
        lighting.set_uniforms_for_shader_program(&mut shader);
        assert_eq!(shader.writes.len(), writes * 2);
    }

    #[test]
    fn view_and_projection_go_stale_independently() {
        init_logging();
        let mut lighting = lighting();
        let mut shader = RecordingShader::default();
        assert!(lighting.is_projection_stale());

        lighting.set_view(Mat4::IDENTITY);
        assert!(!lighting.is_view_stale());
        assert!(lighting.is_projection_stale());

        lighting.set_projection(Mat4::perspective_rh(1.0, 1.0, 0.1, 10.0));
        assert!(!lighting.is_projection_stale());
        lighting.set_uniforms_for_shader_program(&mut shader);
        assert!(lighting.is_view_stale());
        assert!(lighting.is_projection_stale());

        lighting.set_projection(Mat4::IDENTITY);
        assert!(lighting.is_view_stale());
        assert!(!lighting.is_projection_stale());
    }

    #[test]
    fn full_queue_fills_every_shader_slot() {
        let camera = camera_at_origin();
        let model = Sphere(2.0);
        let scene = SceneContext::new(&camera, &model);
        let config = LightingConfig::default()
            .max_point_lights(3)
            .shader_point_light_slots(3);
        let mut lighting = Lighting::with_seed(config, 9).unwrap();

        for _ in 0..5 {
            lighting.add_point_light(&scene);
        }

        let uniforms = lighting.uniforms();
        assert_eq!(uniforms.get("nr_point_lights"), Some(&UniformValue::Int(3)));
        assert!(uniforms.get("pointLights[2].position").is_some());
        assert!(uniforms.get("pointLights[3].position").is_none());
    }

    #[test]
    fn drawing_respects_show_flag() {
        let camera = camera_at_origin();
        let model = Sphere(2.0);
        let scene = SceneContext::new(&camera, &model);
        let mut lighting = lighting();
        lighting.set_point_light_count(3, &scene);

        let mut shader = RecordingShader::default();
        let mut drawn = Vec::new();

        lighting.set_show_point_lights(false);
        lighting.draw_point_lights(&mut shader, |_, light| drawn.push(light.serial()));
        assert_eq!(shader.activations, 0);
        assert!(drawn.is_empty());

        lighting.set_show_point_lights(true);
        lighting.draw_point_lights(&mut shader, |_, light| drawn.push(light.serial()));
        assert_eq!(shader.activations, 1);
        assert_eq!(drawn, [0, 1, 2]);

        let views = shader.writes.iter().filter(|(n, _)| n == "view").count();
        let colours = shader.writes.iter().filter(|(n, _)| n == "lightColour").count();
        assert_eq!(views, 1);
        assert_eq!(colours, 3);
    }

    #[test]
    fn invalid_config_is_rejected() {
        let config = LightingConfig::default().max_point_lights(0);
        assert!(Lighting::new(config).is_err());
    }
}
