//! # Vertex Data Structures
//!
//! GPU-compatible vertex layouts. Both types are `#[repr(C)]` and
//! [`bytemuck::Pod`], so vertex arrays cast straight to byte slices for a
//! buffer upload.

/// A 3D vertex with position, normal and texture coordinate.
///
/// # Memory Layout
///
/// 32 bytes: position at offset 0, normal at 12, texture coordinate at 24.
///
/// # Examples
///
/// ```
/// use atelier::gfx::scene::vertex::Vertex3D;
///
/// let vertex = Vertex3D {
///     position: [0.0, 1.0, 0.0],
///     normal: [0.0, 1.0, 0.0],
///     tex_coord: [0.5, 0.5],
/// };
/// assert_eq!(bytemuck::bytes_of(&vertex).len(), 32);
/// ```
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex3D {
    /// 3D position coordinates [x, y, z]
    pub position: [f32; 3],
    /// 3D normal vector [nx, ny, nz] for lighting calculations
    pub normal: [f32; 3],
    /// Texture coordinate [u, v]
    pub tex_coord: [f32; 2],
}

/// Clip-space vertex for the 2D brush exercises.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex2D {
    pub position: [f32; 2],
}

impl Vertex2D {
    pub fn new(x: f32, y: f32) -> Self {
        Self { position: [x, y] }
    }
}

/// Byte offsets of each [`Vertex3D`] attribute, in shader location order.
pub const VERTEX3D_ATTRIBUTE_OFFSETS: [usize; 3] = [0, 12, 24];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vertex_layout() {
        assert_eq!(std::mem::size_of::<Vertex3D>(), 32);
        assert_eq!(std::mem::size_of::<Vertex2D>(), 8);
        assert_eq!(std::mem::offset_of!(Vertex3D, normal), VERTEX3D_ATTRIBUTE_OFFSETS[1]);
        assert_eq!(std::mem::offset_of!(Vertex3D, tex_coord), VERTEX3D_ATTRIBUTE_OFFSETS[2]);
    }

    #[test]
    fn test_cast_slice() {
        let verts = [Vertex2D::new(0.5, -0.5), Vertex2D::new(1.0, 0.0)];
        let floats: &[f32] = bytemuck::cast_slice(&verts);
        assert_eq!(floats, &[0.5, -0.5, 1.0, 0.0]);
    }
}
