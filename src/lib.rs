//! # Lumen
//!
//! **Camera, transform and lighting core for an interactive 3D model viewer.**
//!
//! Lumen owns the state behind a model viewer: where the camera is, how the
//! model is oriented, which lights are in the scene. Each frame it turns that
//! state into named shader uniforms. Windowing, shader compilation and draw
//! calls stay with the host renderer, which plugs in through the
//! [`ShaderProgram`] trait.
//!
//! ## Quick Start
//!
//! ```
//! use lumen::*;
//!
//! # struct Gl;
//! # impl ShaderProgram for Gl {
//! #     fn activate(&mut self) {}
//! #     fn set_uniform(&mut self, _: &str, _: UniformValue) {}
//! # }
//! # let mut model_shader = Gl;
//! let bounds = ModelBounds::from_sphere(Vec3::ZERO, 2.0);
//! let mut viewer = Viewer::new(bounds, ViewerConfig::default())?;
//! let mut input = Input::new();
//!
//! viewer.set_point_light_count(2);
//!
//! // Once per frame, after feeding window events into `input`:
//! viewer.handle_input(&input);
//! viewer.begin_frame(1.0 / 60.0);
//! viewer.set_model_shader_uniforms(&mut model_shader);
//! input.begin_frame();
//! # Ok::<(), SceneError>(())
//! ```
//!
//! ## Pieces
//!
//! - [`Object`]: position, yaw/pitch/roll and scale, rebuilt into a model matrix
//! - [`Camera`]: look-around rotation, eased free movement, model framing
//! - [`LightCaster`]: the directional sun light, editable as angles or a vector
//! - [`PointLight`]: an attenuated light with a cube drawn at its position
//! - [`Lighting`]: the sun plus a FIFO-bounded set of point lights
//! - [`Viewer`]: all of the above plus input mapping and frame ordering
//!
//! ## Uniform Names
//!
//! The names written to shaders are fixed: `model`, `view`, `projection`,
//! `normalMatrix`, `shininess`, `nr_point_lights`, `dirLight.*` and
//! `pointLights[i].*`. Point-light indices always match their position in
//! [`Lighting`]'s queue.

mod camera;
mod config;
mod controls;
mod error;
mod geometry;
mod input;
mod light_caster;
mod lighting;
mod mesh;
mod object;
mod point_light;
mod shading;
mod uniforms;
mod viewer;

pub use camera::{Camera, MoveDirection};
pub use config::{CameraConfig, LightingConfig, ObjectConfig, ViewerConfig};
pub use controls::Controls;
pub use error::{GeometryError, SceneError};
pub use geometry::{Model, ModelBounds, ModelInfo};
pub use input::Input;
pub use light_caster::{LightCaster, angles_to_direction, direction_to_angles};
pub use lighting::{Lighting, SceneContext};
pub use mesh::{Geometry, Vertex3d};
pub use object::{Object, RotationMode};
pub use point_light::PointLight;
pub use shading::ShadingStyle;
pub use uniforms::{
    ShaderProgram, UniformSet, UniformValue, dir_light_uniform, point_light_uniform,
};
pub use viewer::Viewer;

// Re-export glam math types for convenience
pub use glam::{Mat3, Mat4, Quat, Vec2, Vec3, Vec4};

// Re-export commonly used winit types for convenience
pub use winit::event::MouseButton;
pub use winit::keyboard::KeyCode;
