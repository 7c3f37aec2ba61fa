use cgmath::{Matrix4, SquareMatrix, Vector3};

use super::vertex::Vertex3D;
use crate::gfx::geometry::GeometryData;
use crate::math;

/// CPU-side triangle mesh ready to hand to a renderer.
#[derive(Debug, Clone, Default)]
pub struct Mesh {
    pub vertices: Vec<Vertex3D>,
    pub indices: Vec<u32>,
}

impl Mesh {
    /// Builds a mesh from flat position/normal arrays (three floats per vertex).
    ///
    /// Missing or mismatched normals are recomputed from the faces.
    pub fn new(positions: Vec<f32>, normals: Vec<f32>, indices: Vec<u32>) -> Self {
        let normals = if normals.len() == positions.len() {
            normals
        } else {
            Self::calculate_face_normals(&positions, &indices)
        };

        let vertices = positions
            .chunks_exact(3)
            .zip(normals.chunks_exact(3))
            .map(|(p, n)| Vertex3D {
                position: [p[0], p[1], p[2]],
                normal: [n[0], n[1], n[2]],
                tex_coord: [0.0, 0.0],
            })
            .collect();

        Self { vertices, indices }
    }

    pub fn from_geometry(data: &GeometryData) -> Self {
        Self {
            vertices: data.to_vertices(),
            indices: data.indices.clone(),
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Raw vertex bytes for a vertex buffer upload.
    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    pub fn index_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.indices)
    }

    /// Averages each triangle's face normal into its vertices.
    pub fn calculate_face_normals(positions: &[f32], indices: &[u32]) -> Vec<f32> {
        let vertex_count = positions.len() / 3;
        let mut sums = vec![Vector3::new(0.0_f32, 0.0, 0.0); vertex_count];

        let position = |i: usize| {
            Vector3::new(positions[i * 3], positions[i * 3 + 1], positions[i * 3 + 2])
        };

        for triangle in indices.chunks_exact(3) {
            let [i0, i1, i2] = [triangle[0], triangle[1], triangle[2]].map(|i| i as usize);
            if i0.max(i1).max(i2) >= vertex_count {
                continue;
            }
            let (v0, v1, v2) = (position(i0), position(i1), position(i2));
            let face_normal = (v1 - v0).cross(v2 - v0);
            for i in [i0, i1, i2] {
                sums[i] += face_normal;
            }
        }

        sums.into_iter()
            .flat_map(|n| {
                let n = math::try_normalize(n).unwrap_or(n);
                [n.x, n.y, n.z]
            })
            .collect()
    }
}

/// Geometry an [`Object`] is drawn with.
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    Cube,
    Cone { segments: u32 },
    Sphere { segments: u32 },
    /// Unit square in the XZ plane
    Plane,
    /// A loaded mesh, referenced by name
    Mesh(String),
}

/// How an [`Object`]'s surface is coloured.
#[derive(Debug, Clone, PartialEq)]
pub enum Surface {
    Color([f32; 4]),
    Texture(String),
}

impl Default for Surface {
    fn default() -> Self {
        Surface::Color([1.0, 1.0, 1.0, 1.0])
    }
}

/// One entry of a frame's draw list.
#[derive(Debug, Clone, PartialEq)]
pub struct Object {
    pub name: String,
    pub shape: Shape,
    pub surface: Surface,
    pub transform: Matrix4<f32>, // cgmath 4x4 model matrix
    /// Cleared for backgrounds such as the sky box
    pub depth_write: bool,
}

impl Object {
    /// Create a new Object with identity transformation
    pub fn new(name: impl Into<String>, shape: Shape) -> Self {
        Self {
            name: name.into(),
            shape,
            surface: Surface::default(),
            transform: Matrix4::identity(),
            depth_write: true,
        }
    }

    pub fn with_surface(mut self, surface: Surface) -> Self {
        self.surface = surface;
        self
    }

    pub fn with_transform(mut self, transform: Matrix4<f32>) -> Self {
        self.transform = transform;
        self
    }

    pub fn without_depth_write(mut self) -> Self {
        self.depth_write = false;
        self
    }

    /// Inverse-transpose of the model matrix for lighting normals
    pub fn normal_matrix(&self) -> Matrix4<f32> {
        math::normal_matrix(&self.transform).unwrap_or_else(Matrix4::identity)
    }

    /// Translation part of the model matrix.
    pub fn position(&self) -> Vector3<f32> {
        math::translation_of(&self.transform)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gfx::geometry::generate_cube;

    #[test]
    fn test_face_normals_of_flat_triangle() {
        let positions = vec![0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0];
        let normals = Mesh::calculate_face_normals(&positions, &[0, 1, 2]);
        assert_eq!(normals.len(), 9);
        for n in normals.chunks(3) {
            assert!((n[2] - 1.0).abs() < 1e-6);
        }
    }

    #[test]
    fn test_mesh_new_recomputes_missing_normals() {
        let positions = vec![0.0, 0.0, 0.0, 0.0, 0.0, 1.0, 1.0, 0.0, 0.0];
        let mesh = Mesh::new(positions, Vec::new(), vec![0, 1, 2]);
        assert_eq!(mesh.vertex_count(), 3);
        assert!((mesh.vertices[0].normal[1] - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_mesh_bytes() {
        let mesh = Mesh::from_geometry(&generate_cube());
        assert_eq!(mesh.vertex_bytes().len(), 24 * std::mem::size_of::<Vertex3D>());
        assert_eq!(mesh.index_bytes().len(), 36 * 4);
        assert_eq!(mesh.triangle_count(), 12);
    }

    #[test]
    fn test_position_reads_translation() {
        let obj = Object::new("wall", Shape::Cube).with_transform(
            Matrix4::from_translation(Vector3::new(1.0, 2.0, 3.0)) * Matrix4::from_scale(2.0),
        );
        assert_eq!(obj.position(), Vector3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn test_normal_matrix_falls_back_to_identity() {
        let obj = Object::new("flat", Shape::Cube)
            .with_transform(Matrix4::from_nonuniform_scale(1.0, 0.0, 1.0));
        assert_eq!(obj.normal_matrix(), Matrix4::identity());
    }
}
