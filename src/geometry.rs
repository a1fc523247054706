//! Model bounds and STL model loading.
//!
//! The camera and the lighting system only need two facts about the model
//! being viewed: the center and radius of its bounding sphere. Those are
//! exposed through the [`ModelInfo`] trait so that anything with bounds
//! (a loaded [`Model`], a bare [`ModelBounds`], a test stub) can drive
//! camera framing and point-light placement.
//!
//! # Loading
//!
//! ```no_run
//! use lumen::{Model, ModelInfo};
//!
//! let model = Model::from_file("assets/models/bunny.stl")?;
//! println!("radius {} at {:?}", model.model_radius(), model.model_center());
//! # Ok::<(), lumen::GeometryError>(())
//! ```
//!
//! # Supported Formats
//!
//! | Format | Extensions | Notes |
//! |--------|------------|-------|
//! | STL    | `.stl`     | Binary and ASCII, no UV coordinates |

use std::path::Path;

use glam::Vec3;

use crate::error::{GeometryError, SceneError};
use crate::mesh::{Geometry, Vertex3d};

/// Bounding-sphere queries the camera and lighting need from a model.
pub trait ModelInfo {
    /// Radius of the sphere enclosing the model.
    fn model_radius(&self) -> f32;

    /// Center of the model's bounding box.
    fn model_center(&self) -> Vec3;
}

/// Axis-aligned bounds of a model.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ModelBounds {
    pub min: Vec3,
    pub max: Vec3,
}

impl ModelBounds {
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self {
            min: min.min(max),
            max: min.max(max),
        }
    }

    /// Bounds of a sphere, handy for framing a model whose extent is known.
    pub fn from_sphere(center: Vec3, radius: f32) -> Self {
        // A box whose half-diagonal equals `radius`
        let half = Vec3::splat(radius.abs() / 3f32.sqrt());
        Self::new(center - half, center + half)
    }

    /// Tightest bounds around a set of points.
    pub fn from_points(points: impl IntoIterator<Item = Vec3>) -> Result<Self, SceneError> {
        let mut points = points.into_iter();
        let first = points.next().ok_or(SceneError::EmptyGeometry)?;
        let (min, max) = points.fold((first, first), |(min, max), p| (min.min(p), max.max(p)));
        Ok(Self { min, max })
    }

    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }

    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    /// Half the length of the box diagonal.
    pub fn radius(&self) -> f32 {
        self.size().length() * 0.5
    }
}

impl ModelInfo for ModelBounds {
    fn model_radius(&self) -> f32 {
        self.radius()
    }

    fn model_center(&self) -> Vec3 {
        self.center()
    }
}

/// A model read once from disk: its geometry and bounds.
///
/// The transform lives on the [`Viewer`](crate::Viewer) that frames it.
#[derive(Clone, Debug)]
pub struct Model {
    geometry: Geometry,
    bounds: ModelBounds,
}

impl Model {
    /// Wrap already-loaded geometry.
    pub fn from_geometry(geometry: Geometry) -> Result<Self, SceneError> {
        let bounds = ModelBounds::from_points(geometry.positions())?;
        Ok(Self {
            geometry,
            bounds,
        })
    }

    /// Load a model, detecting the format from the file extension.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, GeometryError> {
        let path = path.as_ref();
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|s| s.to_lowercase())
            .unwrap_or_default();

        match ext.as_str() {
            "stl" => Self::from_stl_file(path),
            _ => Err(GeometryError::UnknownFormat(ext)),
        }
    }

    /// Load an STL file (binary or ASCII).
    pub fn from_stl_file(path: impl AsRef<Path>) -> Result<Self, GeometryError> {
        let file = std::fs::File::open(path.as_ref())?;
        let mut reader = std::io::BufReader::new(file);
        let model = Self::from_geometry(parse_stl(&mut reader)?)?;
        log::info!(
            "Loaded model {:?}: {} triangles, radius {:.3}",
            path.as_ref(),
            model.geometry.triangle_count(),
            model.bounds.radius()
        );
        Ok(model)
    }

    /// Parse STL data held in memory.
    pub fn from_stl_bytes(bytes: &[u8]) -> Result<Self, GeometryError> {
        let mut cursor = std::io::Cursor::new(bytes);
        Ok(Self::from_geometry(parse_stl(&mut cursor)?)?)
    }

    pub fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    pub fn bounds(&self) -> ModelBounds {
        self.bounds
    }
}

impl ModelInfo for Model {
    fn model_radius(&self) -> f32 {
        self.bounds.radius()
    }

    fn model_center(&self) -> Vec3 {
        self.bounds.center()
    }
}

fn parse_stl<R: std::io::Read + std::io::Seek>(reader: &mut R) -> Result<Geometry, GeometryError> {
    let stl = stl_io::read_stl(reader)
        .map_err(|e| GeometryError::ParseError(format!("STL parse error: {e}")))?;

    let mut vertices = Vec::with_capacity(stl.faces.len() * 3);
    let mut indices = Vec::with_capacity(stl.faces.len() * 3);

    // Faces are unrolled so each triangle keeps its own flat normal
    for (i, face) in stl.faces.iter().enumerate() {
        let normal: [f32; 3] = face.normal.into();
        for &vertex_idx in &face.vertices {
            let position: [f32; 3] = stl.vertices[vertex_idx].into();
            vertices.push(Vertex3d::new(position, normal, [0.0, 0.0]));
        }

        let base = (i * 3) as u32;
        indices.extend_from_slice(&[base, base + 1, base + 2]);
    }

    Ok(Geometry::new(vertices, indices))
}
