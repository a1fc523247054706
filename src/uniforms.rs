//! Named shader uniform values and the shader-program seam.
//!
//! The lighting shaders declare a fixed set of uniforms (`dirLight.*`,
//! `pointLights[i].*`, `nr_point_lights`, `model`, `view`, `projection`,
//! `normalMatrix`). Components in this crate never talk to a graphics API
//! directly. Instead they describe their state as a [`UniformSet`], an
//! ordered list of name/value pairs, which is then written through the
//! [`ShaderProgram`] trait implemented by whatever renderer hosts the viewer.
//!
//! # Example
//!
//! ```
//! use lumen::{UniformSet, UniformValue, Vec3};
//!
//! let mut set = UniformSet::new();
//! set.push("dirLight.direction", Vec3::NEG_Y);
//! set.push("nr_point_lights", 2);
//!
//! assert_eq!(set.get("nr_point_lights"), Some(&UniformValue::Int(2)));
//! ```

use glam::{Mat3, Mat4, Vec3};

/// A single value a shader uniform can hold.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum UniformValue {
    Int(i32),
    Float(f32),
    Vec3(Vec3),
    Mat3(Mat3),
    Mat4(Mat4),
}

impl From<i32> for UniformValue {
    fn from(value: i32) -> Self {
        Self::Int(value)
    }
}

impl From<f32> for UniformValue {
    fn from(value: f32) -> Self {
        Self::Float(value)
    }
}

impl From<Vec3> for UniformValue {
    fn from(value: Vec3) -> Self {
        Self::Vec3(value)
    }
}

impl From<Mat3> for UniformValue {
    fn from(value: Mat3) -> Self {
        Self::Mat3(value)
    }
}

impl From<Mat4> for UniformValue {
    fn from(value: Mat4) -> Self {
        Self::Mat4(value)
    }
}

/// A shader program that accepts uniform writes.
///
/// Implemented by the rendering backend. Writes to names the program does
/// not declare are expected to be ignored, matching how GL drivers treat
/// a `-1` uniform location.
pub trait ShaderProgram {
    /// Make this program current for subsequent uniform writes and draws.
    fn activate(&mut self);

    /// Write one uniform by name.
    fn set_uniform(&mut self, name: &str, value: UniformValue);
}

/// An ordered collection of named uniform values.
///
/// Insertion order is preserved so that the write sequence seen by a
/// [`ShaderProgram`] is deterministic.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct UniformSet {
    entries: Vec<(String, UniformValue)>,
}

impl UniformSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a uniform. A later value for the same name wins on [`get`](Self::get).
    pub fn push(&mut self, name: impl Into<String>, value: impl Into<UniformValue>) {
        self.entries.push((name.into(), value.into()));
    }

    /// Append every entry from another set.
    pub fn extend(&mut self, other: UniformSet) {
        self.entries.extend(other.entries);
    }

    /// Look up the most recent value written under `name`.
    pub fn get(&self, name: &str) -> Option<&UniformValue> {
        self.entries
            .iter()
            .rev()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &UniformValue)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), v))
    }

    /// Write every entry, in order, to `shader`.
    pub fn apply_to<S: ShaderProgram + ?Sized>(&self, shader: &mut S) {
        for (name, value) in &self.entries {
            shader.set_uniform(name, *value);
        }
    }
}

/// Name of a field of the `i`-th element of the shader's point-light array.
pub fn point_light_uniform(index: usize, field: &str) -> String {
    format!("pointLights[{index}].{field}")
}

/// Name of a field of the directional light struct.
pub fn dir_light_uniform(field: &str) -> String {
    format!("dirLight.{field}")
}
