//! Error types for scene setup and model loading.
//!
//! Most per-frame operations in this crate cannot fail: they are pure
//! computations over explicit state. Errors only surface when a scene is
//! configured with values that would break an invariant, or when a model
//! file cannot be read.

use thiserror::Error;

/// Errors raised while configuring or mutating scene state.
#[derive(Debug, Error, PartialEq)]
pub enum SceneError {
    /// A configuration value is outside the range the scene can work with.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// A direction vector had (near) zero length and cannot be normalized.
    #[error("Degenerate direction vector: {0:?}")]
    DegenerateDirection(glam::Vec3),

    /// Bounds were requested for a geometry without any vertices.
    #[error("Cannot compute bounds of empty geometry")]
    EmptyGeometry,
}

/// Errors that can occur when loading model geometry from disk.
#[derive(Debug, Error)]
pub enum GeometryError {
    /// File could not be read.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// File format could not be determined from extension.
    #[error("Unknown geometry format: '{0}'")]
    UnknownFormat(String),

    /// The geometry data was invalid or corrupt.
    #[error("Parse error: {0}")]
    ParseError(String),

    /// The geometry parsed but cannot be framed by a camera.
    #[error(transparent)]
    Scene(#[from] SceneError),
}
