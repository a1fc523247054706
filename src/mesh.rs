//! CPU-side mesh data: the vertex format and the small built-in shapes.
//!
//! - [`Vertex3d`]: position, normal and UV, laid out for direct GPU upload
//! - [`Geometry`]: a vertex list plus triangle indices
//!
//! Uploading geometry is the renderer's job; this module only produces the
//! data. Two shapes are built in: the cube drawn at every point light and
//! the flat quad the world grid shader is drawn onto.
//!
//! # Vertex Layout
//!
//! | Attribute | Format    | Offset | Shader Location |
//! |-----------|-----------|--------|-----------------|
//! | position  | Float32x3 | 0      | 0               |
//! | normal    | Float32x3 | 12     | 1               |
//! | uv        | Float32x2 | 24     | 2               |

use glam::Vec3;

/// A vertex with position, normal, and texture coordinates.
///
/// `#[repr(C)]` with [`bytemuck::Pod`] so a slice of vertices can be cast
/// straight to bytes for a vertex buffer.
///
/// # Example
///
/// ```
/// use lumen::Vertex3d;
///
/// let vertex = Vertex3d::new([0.0, 1.0, 0.0], [0.0, 1.0, 0.0], [0.5, 0.5]);
/// let bytes: &[u8] = bytemuck::bytes_of(&vertex);
/// assert_eq!(bytes.len(), 32);
/// ```
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex3d {
    /// Position in model space.
    pub position: [f32; 3],
    /// Surface normal (should be normalized for correct lighting).
    pub normal: [f32; 3],
    /// Texture coordinates, typically in the range [0, 1].
    pub uv: [f32; 2],
}

impl Vertex3d {
    pub fn new(position: [f32; 3], normal: [f32; 3], uv: [f32; 2]) -> Self {
        Self {
            position,
            normal,
            uv,
        }
    }

    pub fn position(&self) -> Vec3 {
        Vec3::from(self.position)
    }
}

/// Indexed triangle geometry.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Geometry {
    pub vertices: Vec<Vertex3d>,
    /// Three indices per triangle.
    pub indices: Vec<u32>,
}

impl Geometry {
    pub fn new(vertices: Vec<Vertex3d>, indices: Vec<u32>) -> Self {
        Self { vertices, indices }
    }

    /// An axis-aligned cube with edge length `size`, centered at the origin.
    ///
    /// Each face has its own four vertices so normals stay flat, giving
    /// 24 vertices and 36 indices.
    pub fn cube(size: f32) -> Self {
        let h = size / 2.0;

        #[rustfmt::skip]
        let vertices = vec![
            // Front face (Z+)
            Vertex3d::new([-h, -h,  h], [ 0.0,  0.0,  1.0], [0.0, 0.0]),
            Vertex3d::new([ h, -h,  h], [ 0.0,  0.0,  1.0], [1.0, 0.0]),
            Vertex3d::new([ h,  h,  h], [ 0.0,  0.0,  1.0], [1.0, 1.0]),
            Vertex3d::new([-h,  h,  h], [ 0.0,  0.0,  1.0], [0.0, 1.0]),
            // Back face (Z-)
            Vertex3d::new([-h, -h, -h], [ 0.0,  0.0, -1.0], [1.0, 0.0]),
            Vertex3d::new([-h,  h, -h], [ 0.0,  0.0, -1.0], [1.0, 1.0]),
            Vertex3d::new([ h,  h, -h], [ 0.0,  0.0, -1.0], [0.0, 1.0]),
            Vertex3d::new([ h, -h, -h], [ 0.0,  0.0, -1.0], [0.0, 0.0]),
            // Top face (Y+)
            Vertex3d::new([-h,  h, -h], [ 0.0,  1.0,  0.0], [0.0, 0.0]),
            Vertex3d::new([-h,  h,  h], [ 0.0,  1.0,  0.0], [0.0, 1.0]),
            Vertex3d::new([ h,  h,  h], [ 0.0,  1.0,  0.0], [1.0, 1.0]),
            Vertex3d::new([ h,  h, -h], [ 0.0,  1.0,  0.0], [1.0, 0.0]),
            // Bottom face (Y-)
            Vertex3d::new([-h, -h, -h], [ 0.0, -1.0,  0.0], [0.0, 1.0]),
            Vertex3d::new([ h, -h, -h], [ 0.0, -1.0,  0.0], [1.0, 1.0]),
            Vertex3d::new([ h, -h,  h], [ 0.0, -1.0,  0.0], [1.0, 0.0]),
            Vertex3d::new([-h, -h,  h], [ 0.0, -1.0,  0.0], [0.0, 0.0]),
            // Right face (X+)
            Vertex3d::new([ h, -h, -h], [ 1.0,  0.0,  0.0], [0.0, 0.0]),
            Vertex3d::new([ h,  h, -h], [ 1.0,  0.0,  0.0], [0.0, 1.0]),
            Vertex3d::new([ h,  h,  h], [ 1.0,  0.0,  0.0], [1.0, 1.0]),
            Vertex3d::new([ h, -h,  h], [ 1.0,  0.0,  0.0], [1.0, 0.0]),
            // Left face (X-)
            Vertex3d::new([-h, -h, -h], [-1.0,  0.0,  0.0], [1.0, 0.0]),
            Vertex3d::new([-h, -h,  h], [-1.0,  0.0,  0.0], [0.0, 0.0]),
            Vertex3d::new([-h,  h,  h], [-1.0,  0.0,  0.0], [0.0, 1.0]),
            Vertex3d::new([-h,  h, -h], [-1.0,  0.0,  0.0], [1.0, 1.0]),
        ];

        #[rustfmt::skip]
        let indices: Vec<u32> = vec![
            0,  1,  2,  2,  3,  0,  // front
            4,  5,  6,  6,  7,  4,  // back
            8,  9,  10, 10, 11, 8,  // top
            12, 13, 14, 14, 15, 12, // bottom
            16, 17, 18, 18, 19, 16, // right
            20, 21, 22, 22, 23, 20, // left
        ];

        Self::new(vertices, indices)
    }

    /// The unit quad on the XZ plane used by the world grid shader.
    ///
    /// Spans -1..1 on X and Z; the shader extends it to the horizon.
    pub fn grid_plane() -> Self {
        let up = [0.0, 1.0, 0.0];
        let vertices = vec![
            Vertex3d::new([-1.0, 0.0, -1.0], up, [0.0, 0.0]),
            Vertex3d::new([1.0, 0.0, -1.0], up, [1.0, 0.0]),
            Vertex3d::new([1.0, 0.0, 1.0], up, [1.0, 1.0]),
            Vertex3d::new([-1.0, 0.0, 1.0], up, [0.0, 1.0]),
        ];
        Self::new(vertices, vec![0, 1, 2, 2, 3, 0])
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Iterate over vertex positions.
    pub fn positions(&self) -> impl Iterator<Item = Vec3> + '_ {
        self.vertices.iter().map(Vertex3d::position)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cube_has_flat_faces() {
        let cube = Geometry::cube(0.5);
        assert_eq!(cube.vertices.len(), 24);
        assert_eq!(cube.indices.len(), 36);
        assert_eq!(cube.triangle_count(), 12);
        assert!(cube.indices.iter().all(|&i| (i as usize) < cube.vertices.len()));

        for v in &cube.vertices {
            for c in v.position {
                assert_eq!(c.abs(), 0.25);
            }
        }
    }

    #[test]
    fn cube_normals_point_outward() {
        let cube = Geometry::cube(2.0);
        for v in &cube.vertices {
            let n = Vec3::from(v.normal);
            assert!((n.length() - 1.0).abs() < 1e-6);
            // The vertex lies on the face its normal points out of
            assert!((v.position().dot(n) - 1.0).abs() < 1e-6);
        }
    }

    #[test]
    fn grid_plane_is_flat() {
        let grid = Geometry::grid_plane();
        assert_eq!(grid.triangle_count(), 2);
        assert!(grid.positions().all(|p| p.y == 0.0));
    }
}
