//! Top-level viewer state tying the camera, model transform and lights together.
//!
//! [`Viewer`] holds everything that persists across frames and enforces the
//! per-frame ordering: input first, then [`begin_frame`](Viewer::begin_frame)
//! to derive matrices, then the uniform pushes.
//!
//! ```
//! use lumen::{ModelBounds, Vec3, Viewer, ViewerConfig};
//!
//! let bounds = ModelBounds::from_sphere(Vec3::ZERO, 5.0);
//! let mut viewer = Viewer::with_seed(bounds, ViewerConfig::default(), 7)?;
//!
//! viewer.add_point_light();
//! viewer.begin_frame(1.0 / 60.0);
//!
//! let uniforms = viewer.model_uniforms();
//! assert!(uniforms.get("normalMatrix").is_some());
//! # Ok::<(), lumen::SceneError>(())
//! ```

use crate::camera::Camera;
use crate::config::ViewerConfig;
use crate::controls::Controls;
use crate::error::SceneError;
use crate::geometry::{Model, ModelBounds};
use crate::input::Input;
use crate::lighting::{Lighting, SceneContext};
use crate::object::{Object, RotationMode};
use crate::point_light::PointLight;
use crate::shading::ShadingStyle;
use crate::uniforms::{ShaderProgram, UniformSet};

pub struct Viewer {
    config: ViewerConfig,
    camera: Camera,
    /// Transform of the viewed model.
    object: Object,
    lighting: Lighting,
    controls: Controls,
    style: ShadingStyle,
    bounds: ModelBounds,
}

impl Viewer {
    /// A viewer framing a model with the given bounds.
    pub fn new(bounds: ModelBounds, config: ViewerConfig) -> Result<Self, SceneError> {
        let lighting = Lighting::new(config.lighting.clone())?;
        Self::build(bounds, config, lighting)
    }

    /// Like [`new`](Self::new) with reproducible point-light placement.
    pub fn with_seed(bounds: ModelBounds, config: ViewerConfig, seed: u64) -> Result<Self, SceneError> {
        let lighting = Lighting::with_seed(config.lighting.clone(), seed)?;
        Self::build(bounds, config, lighting)
    }

    /// A viewer for a loaded model.
    pub fn for_model(model: &Model, config: ViewerConfig) -> Result<Self, SceneError> {
        Self::new(model.bounds(), config)
    }

    fn build(bounds: ModelBounds, config: ViewerConfig, lighting: Lighting) -> Result<Self, SceneError> {
        config.validate()?;
        let mut camera = Camera::with_config(config.camera.clone())?;
        camera.frame_model(&bounds);

        Ok(Self {
            controls: Controls::new(config.object.clone()),
            config,
            camera,
            object: Object::new(),
            lighting,
            style: ShadingStyle::default(),
            bounds,
        })
    }

    /// Feed this frame's input. Returns `Some(captured)` when mouse capture changed.
    pub fn handle_input(&mut self, input: &Input) -> Option<bool> {
        self.controls
            .apply(input, &mut self.camera, &mut self.object)
    }

    /// Derive this frame's state once input has been applied.
    ///
    /// Updates camera speed, advances natural rotation, hands the fresh
    /// view and projection to the lighting and recomputes the model's
    /// normal matrix, in that order.
    pub fn begin_frame(&mut self, dt: f32) {
        self.camera.update_speed(dt);
        self.object.advance(dt, &self.config.object);

        let view = self.camera.view_matrix();
        self.lighting.set_view(view);
        self.lighting.set_projection(self.camera.projection_matrix());
        self.object.update_normal_matrix(view);
    }

    /// `model`, `view`, `projection`, `normalMatrix` and `shininess`.
    pub fn model_uniforms(&self) -> UniformSet {
        let mut set = UniformSet::new();
        set.push("model", self.object.model_matrix());
        set.push("view", self.lighting.view());
        set.push("projection", self.lighting.projection());
        set.push("normalMatrix", self.object.normal_matrix());
        set.push("shininess", self.config.shininess);
        set
    }

    /// Activate the model shader and write the model and lighting uniforms.
    pub fn set_model_shader_uniforms<S: ShaderProgram + ?Sized>(&mut self, shader: &mut S) {
        shader.activate();
        self.model_uniforms().apply_to(shader);
        self.set_lighting_uniforms(shader);
    }

    pub fn set_lighting_uniforms<S: ShaderProgram + ?Sized>(&mut self, shader: &mut S) {
        self.lighting.set_uniforms_for_shader_program(shader);
    }

    pub fn draw_point_lights<S, F>(&self, shader: &mut S, draw: F)
    where
        S: ShaderProgram + ?Sized,
        F: FnMut(&mut S, &PointLight),
    {
        self.lighting.draw_point_lights(shader, draw);
    }

    /// Scatter a new point light in front of the camera.
    pub fn add_point_light(&mut self) -> u64 {
        let scene = SceneContext::new(&self.camera, &self.bounds);
        self.lighting.add_point_light(&scene)
    }

    pub fn remove_point_light(&mut self) -> Option<PointLight> {
        self.lighting.remove_point_light()
    }

    pub fn set_point_light_count(&mut self, count: usize) {
        let scene = SceneContext::new(&self.camera, &self.bounds);
        self.lighting.set_point_light_count(count, &scene);
    }

    /// Swap in a new model: reframe the camera and reset the model transform.
    pub fn replace_model(&mut self, bounds: ModelBounds) {
        log::info!(
            "Replacing model: radius {:.3} at {:?}",
            bounds.radius(),
            bounds.center()
        );
        self.bounds = bounds;
        self.camera.frame_model(&self.bounds);
        self.object.reset_model();
    }

    pub fn shading_style(&self) -> ShadingStyle {
        self.style
    }

    pub fn set_shading_style(&mut self, style: ShadingStyle) {
        self.style = style;
    }

    /// Switch to the next shading style and return it.
    pub fn cycle_shading_style(&mut self) -> ShadingStyle {
        self.style = self.style.next();
        self.style
    }

    pub fn set_rotation_mode(&mut self, mode: RotationMode) {
        self.object.set_rotation_mode(mode);
    }

    pub fn set_ui_wants_mouse(&mut self, wants: bool) {
        self.controls.set_ui_wants_mouse(wants);
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn camera_mut(&mut self) -> &mut Camera {
        &mut self.camera
    }

    pub fn object(&self) -> &Object {
        &self.object
    }

    pub fn object_mut(&mut self) -> &mut Object {
        &mut self.object
    }

    pub fn lighting(&self) -> &Lighting {
        &self.lighting
    }

    pub fn lighting_mut(&mut self) -> &mut Lighting {
        &mut self.lighting
    }

    pub fn bounds(&self) -> ModelBounds {
        self.bounds
    }

    pub fn config(&self) -> &ViewerConfig {
        &self.config
    }
}
