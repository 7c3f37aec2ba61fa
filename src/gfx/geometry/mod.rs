//! # Procedural Geometry Generation
//!
//! This module provides functions to generate the primitive shapes the
//! exercises are built from, so no model files are needed for them.
//!
//! ## Supported Primitives
//!
//! - **Cube**: Unit cube centered at the origin
//! - **Sphere**: UV sphere with configurable resolution
//! - **Cone**: Closed cone standing on the XZ plane
//! - **Plane**: Flat XZ plane with configurable size and subdivisions
//!
//! ## Usage
//!
//! ```rust
//! use atelier::gfx::geometry::{generate_cone, generate_cube, generate_plane, generate_sphere};
//!
//! let cube_data = generate_cube();
//! let sphere_data = generate_sphere(32, 16);
//! let cone_data = generate_cone(8);
//! let plane_data = generate_plane(10.0, 10.0, 4, 4);
//! assert_eq!(cube_data.triangle_count(), 12);
//! ```

pub mod primitives;

pub use primitives::*;

use crate::gfx::scene::object::Shape;
use crate::gfx::scene::vertex::Vertex3D;

/// Represents generated geometry data ready for GPU upload
#[derive(Debug, Clone)]
pub struct GeometryData {
    /// Vertex positions (x, y, z)
    pub vertices: Vec<[f32; 3]>,
    /// Texture coordinates (u, v)
    pub tex_coords: Vec<[f32; 2]>,
    /// Normal vectors (x, y, z)
    pub normals: Vec<[f32; 3]>,
    /// Triangle indices (counter-clockwise winding)
    pub indices: Vec<u32>,
}

impl GeometryData {
    /// Create a new empty geometry data structure
    pub fn new() -> Self {
        Self {
            vertices: Vec::new(),
            tex_coords: Vec::new(),
            normals: Vec::new(),
            indices: Vec::new(),
        }
    }

    /// Procedural geometry for a shape; `None` for loaded meshes.
    pub fn for_shape(shape: &Shape) -> Option<Self> {
        match shape {
            Shape::Cube => Some(generate_cube()),
            Shape::Cone { segments } => Some(generate_cone(*segments)),
            Shape::Sphere { segments } => Some(generate_sphere(*segments, *segments)),
            Shape::Plane => Some(generate_plane(1.0, 1.0, 1, 1)),
            Shape::Mesh(_) => None,
        }
    }

    /// Get the number of vertices in this geometry
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Get the number of triangles in this geometry
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Interleave into the renderer's vertex format
    pub fn to_vertices(&self) -> Vec<Vertex3D> {
        self.vertices
            .iter()
            .enumerate()
            .map(|(i, &position)| Vertex3D {
                position,
                normal: self.normals.get(i).copied().unwrap_or([0.0, 1.0, 0.0]),
                tex_coord: self.tex_coords.get(i).copied().unwrap_or([0.0, 0.0]),
            })
            .collect()
    }
}

impl Default for GeometryData {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_vertices_fills_missing_attributes() {
        let mut data = GeometryData::new();
        data.vertices.push([1.0, 2.0, 3.0]);
        let verts = data.to_vertices();
        assert_eq!(verts.len(), 1);
        assert_eq!(verts[0].normal, [0.0, 1.0, 0.0]);
        assert_eq!(verts[0].tex_coord, [0.0, 0.0]);
    }

    #[test]
    fn test_for_shape() {
        assert_eq!(GeometryData::for_shape(&Shape::Cube).map(|g| g.vertex_count()), Some(24));
        assert!(GeometryData::for_shape(&Shape::Mesh("teapot".into())).is_none());
        let plane = GeometryData::for_shape(&Shape::Plane).unwrap();
        assert_eq!(plane.triangle_count(), 2);
    }
}
