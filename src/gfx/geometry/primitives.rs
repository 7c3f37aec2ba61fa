//! # Primitive Shape Generation
//!
//! This module contains functions to generate the primitive shapes the
//! exercises draw with. All shapes are Y-up and carry normals and texture
//! coordinates.

use super::GeometryData;
use std::f32::consts::PI;

/// Generate a unit cube centered at the origin
///
/// Returns a cube with vertices from -0.5 to 0.5 on all axes.
/// Each face has proper normals pointing outward and UV coordinates from 0 to 1.
pub fn generate_cube() -> GeometryData {
    let mut data = GeometryData::new();

    // (normal, tangent u, tangent v) per face; corners walk counter-clockwise
    let faces: [([f32; 3], [f32; 3], [f32; 3]); 6] = [
        ([0.0, 0.0, 1.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]),   // front
        ([0.0, 0.0, -1.0], [-1.0, 0.0, 0.0], [0.0, 1.0, 0.0]), // back
        ([-1.0, 0.0, 0.0], [0.0, 0.0, 1.0], [0.0, 1.0, 0.0]),  // left
        ([1.0, 0.0, 0.0], [0.0, 0.0, -1.0], [0.0, 1.0, 0.0]),  // right
        ([0.0, 1.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, -1.0]),  // top
        ([0.0, -1.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, 1.0]),  // bottom
    ];
    let corners = [(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)];

    for (normal, u, v) in faces {
        let base = data.vertices.len() as u32;
        for (s, t) in corners {
            let position = [0, 1, 2].map(|k| 0.5 * normal[k] + (s - 0.5) * u[k] + (t - 0.5) * v[k]);
            data.vertices.push(position);
            data.normals.push(normal);
            data.tex_coords.push([s, t]);
        }
        data.indices
            .extend_from_slice(&[base, base + 1, base + 2, base + 2, base + 3, base]);
    }

    data
}

/// Generate a UV sphere with specified resolution
///
/// # Arguments
/// * `longitude_segments` - Number of vertical segments (longitude lines)
/// * `latitude_segments` - Number of horizontal segments (latitude lines)
///
/// Returns a sphere of radius 1.0 centered at the origin.
pub fn generate_sphere(longitude_segments: u32, latitude_segments: u32) -> GeometryData {
    let mut data = GeometryData::new();

    let long_segs = longitude_segments.max(3);
    let lat_segs = latitude_segments.max(2);

    for lat in 0..=lat_segs {
        let theta = lat as f32 * PI / lat_segs as f32; // 0 to PI
        let (sin_theta, cos_theta) = theta.sin_cos();

        for long in 0..=long_segs {
            let phi = long as f32 * 2.0 * PI / long_segs as f32; // 0 to 2*PI
            let (sin_phi, cos_phi) = phi.sin_cos();

            let x = sin_theta * cos_phi;
            let y = cos_theta;
            let z = sin_theta * sin_phi;

            data.vertices.push([x, y, z]);
            data.normals.push([x, y, z]); // Normal is same as position for unit sphere
            data.tex_coords
                .push([long as f32 / long_segs as f32, lat as f32 / lat_segs as f32]);
        }
    }

    for lat in 0..lat_segs {
        for long in 0..long_segs {
            let first = lat * (long_segs + 1) + long;
            let second = first + long_segs + 1;

            data.indices.extend_from_slice(&[first, first + 1, second]);
            data.indices.extend_from_slice(&[second, first + 1, second + 1]);
        }
    }

    data
}

/// Generate a cone with its base disc on y = 0 and apex at (0, 1, 0)
///
/// The base has radius 0.5. Side normals lean outward along the slant.
pub fn generate_cone(segments: u32) -> GeometryData {
    let mut data = GeometryData::new();

    let segs = segments.max(3);
    let radius: f32 = 0.5;
    let height: f32 = 1.0;
    // Slant normal: (h * dir, r) normalized
    let slant = (height * height + radius * radius).sqrt();
    let (ny, nr) = (radius / slant, height / slant);

    for i in 0..segs {
        let a1 = i as f32 / segs as f32 * 2.0 * PI;
        let a2 = (i + 1) as f32 / segs as f32 * 2.0 * PI;
        let p1 = [a1.cos() * radius, 0.0, a1.sin() * radius];
        let p2 = [a2.cos() * radius, 0.0, a2.sin() * radius];

        // Base triangle, facing down
        let base = data.vertices.len() as u32;
        for p in [[0.0, 0.0, 0.0], p1, p2] {
            data.vertices.push(p);
            data.normals.push([0.0, -1.0, 0.0]);
            data.tex_coords.push([0.5 + p[0], 0.5 + p[2]]);
        }
        data.indices.extend_from_slice(&[base, base + 1, base + 2]);

        // Side triangle up to the apex
        let side = data.vertices.len() as u32;
        let mid = (a1 + a2) * 0.5;
        let apex_normal = [mid.cos() * nr, ny, mid.sin() * nr];
        for (p, n, u) in [
            (p1, [a1.cos() * nr, ny, a1.sin() * nr], i as f32 / segs as f32),
            ([0.0, height, 0.0], apex_normal, (i as f32 + 0.5) / segs as f32),
            (p2, [a2.cos() * nr, ny, a2.sin() * nr], (i + 1) as f32 / segs as f32),
        ] {
            data.vertices.push(p);
            data.normals.push(n);
            data.tex_coords.push([u, p[1]]);
        }
        data.indices.extend_from_slice(&[side, side + 1, side + 2]);
    }

    data
}

/// Generate a plane in the XZ plane (horizontal, Y-up)
///
/// # Arguments
/// * `width` - Size along X
/// * `depth` - Size along Z
/// * `width_segments` - Number of subdivisions along X
/// * `depth_segments` - Number of subdivisions along Z
///
/// Returns a plane centered at the origin with normal pointing up (positive Y).
pub fn generate_plane(width: f32, depth: f32, width_segments: u32, depth_segments: u32) -> GeometryData {
    let mut data = GeometryData::new();

    let w_segs = width_segments.max(1);
    let d_segs = depth_segments.max(1);

    for z in 0..=d_segs {
        let v = z as f32 / d_segs as f32;
        for x in 0..=w_segs {
            let u = x as f32 / w_segs as f32;
            data.vertices.push([(u - 0.5) * width, 0.0, (v - 0.5) * depth]);
            data.normals.push([0.0, 1.0, 0.0]);
            data.tex_coords.push([u, v]);
        }
    }

    // Counter-clockwise when viewed from above
    for z in 0..d_segs {
        for x in 0..w_segs {
            let i = z * (w_segs + 1) + x;
            let next_row = i + w_segs + 1;
            data.indices.extend_from_slice(&[i, next_row, i + 1]);
            data.indices.extend_from_slice(&[next_row, next_row + 1, i + 1]);
        }
    }

    data
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgmath::{InnerSpace, Vector3};

    /// Every triangle's winding must agree with its vertices' normals.
    fn assert_outward_winding(data: &GeometryData) {
        for tri in data.indices.chunks(3) {
            let [a, b, c] = [tri[0], tri[1], tri[2]].map(|i| Vector3::from(data.vertices[i as usize]));
            let face = (b - a).cross(c - a);
            if face.magnitude2() < 1e-12 {
                continue; // degenerate sphere pole triangle
            }
            let n = Vector3::from(data.normals[tri[0] as usize])
                + Vector3::from(data.normals[tri[1] as usize])
                + Vector3::from(data.normals[tri[2] as usize]);
            assert!(face.dot(n) > 0.0, "triangle {:?} winds inward", tri);
        }
    }

    #[test]
    fn test_cube_generation() {
        let cube = generate_cube();
        assert_eq!(cube.vertices.len(), 24); // 6 faces * 4 vertices
        assert_eq!(cube.indices.len(), 36); // 6 faces * 2 triangles * 3 indices
        assert_eq!(cube.vertex_count(), 24);
        assert_eq!(cube.triangle_count(), 12);
        assert!(cube
            .vertices
            .iter()
            .all(|p| p.iter().all(|c| (c.abs() - 0.5).abs() < 1e-6)));
        assert_outward_winding(&cube);
    }

    #[test]
    fn test_sphere_generation() {
        let sphere = generate_sphere(8, 6);
        assert_eq!(sphere.vertices.len(), 9 * 7);
        assert_eq!(sphere.indices.len(), 8 * 6 * 6);
        assert_eq!(sphere.vertices.len(), sphere.normals.len());
        assert_eq!(sphere.vertices.len(), sphere.tex_coords.len());
        assert_outward_winding(&sphere);
    }

    #[test]
    fn test_cone_generation() {
        let cone = generate_cone(8);
        assert_eq!(cone.triangle_count(), 16);
        assert!(cone.vertices.iter().any(|p| *p == [0.0, 1.0, 0.0]));
        assert_outward_winding(&cone);
    }

    #[test]
    fn test_plane_generation() {
        let plane = generate_plane(2.0, 2.0, 2, 2);
        assert_eq!(plane.vertices.len(), 9); // 3x3 grid
        assert_eq!(plane.indices.len(), 24); // 4 quads * 2 triangles * 3 indices
        assert_outward_winding(&plane);
    }
}
