//! # Vector and Matrix Helpers
//!
//! Thin layer over [`cgmath`] holding every vector/matrix operation the
//! exercises need. The interface is fixed here once; nothing extends the
//! math types at runtime.
//!
//! - [`transform`] - chainable model-matrix builder used by every scene
//! - free functions for angles, areas, normal matrices and easing curves

pub mod transform;

pub use transform::Transform;

use cgmath::{InnerSpace, Matrix, Matrix4, Point3, SquareMatrix, Vector3};

/// Angle in radians between two vectors.
///
/// Returns `None` when either vector has zero length, since the angle is
/// undefined there.
pub fn angle_between(a: Vector3<f32>, b: Vector3<f32>) -> Option<f32> {
    let mags = a.magnitude() * b.magnitude();
    if mags <= f32::EPSILON {
        return None;
    }
    // Rounding can push the cosine just outside [-1, 1]
    let cos = (a.dot(b) / mags).clamp(-1.0, 1.0);
    Some(cos.acos())
}

/// Area of the triangle spanned by two vectors from a shared origin.
pub fn triangle_area(a: Vector3<f32>, b: Vector3<f32>) -> f32 {
    a.cross(b).magnitude() / 2.0
}

/// Normalizes `v`, or returns `None` for a zero vector.
pub fn try_normalize(v: Vector3<f32>) -> Option<Vector3<f32>> {
    let len = v.magnitude();
    if len <= f32::EPSILON {
        None
    } else {
        Some(v / len)
    }
}

/// Inverse-transpose of a model matrix, used to carry normals into world space.
pub fn normal_matrix(model: &Matrix4<f32>) -> Option<Matrix4<f32>> {
    model.invert().map(|inv| inv.transpose())
}

/// Quadratic ease-out on `p` in `[0, 1]`.
pub fn ease_out(p: f32) -> f32 {
    let p = p.clamp(0.0, 1.0);
    p * (2.0 - p)
}

/// Reflects incident direction `i` about normal `n` (GLSL `reflect`).
pub fn reflect(i: Vector3<f32>, n: Vector3<f32>) -> Vector3<f32> {
    i - n * (2.0 * n.dot(i))
}

/// Applies an affine matrix to a point.
pub fn transform_point(m: &Matrix4<f32>, p: Point3<f32>) -> Point3<f32> {
    let h = m * p.to_homogeneous();
    Point3::new(h.x, h.y, h.z)
}

/// Translation column of an affine matrix.
pub fn translation_of(m: &Matrix4<f32>) -> Vector3<f32> {
    m.w.truncate()
}

/// Horizontal (XZ) distance between two points.
pub fn distance_xz(a: Point3<f32>, b: Point3<f32>) -> f32 {
    let dx = a.x - b.x;
    let dz = a.z - b.z;
    (dx * dx + dz * dz).sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgmath::{Deg, Vector3};

    fn close(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-5
    }

    #[test]
    fn test_angle_between_perpendicular() {
        let a = Vector3::new(1.0, 0.0, 0.0);
        let b = Vector3::new(0.0, 3.0, 0.0);
        let angle = angle_between(a, b).unwrap();
        assert!(close(angle, std::f32::consts::FRAC_PI_2));
    }

    #[test]
    fn test_angle_between_parallel_is_zero() {
        let a = Vector3::new(2.0, 2.0, 0.0);
        let angle = angle_between(a, a * 3.0).unwrap();
        assert!(angle.abs() < 1e-3);
    }

    #[test]
    fn test_angle_between_zero_vector() {
        let a = Vector3::new(0.0, 0.0, 0.0);
        let b = Vector3::new(1.0, 0.0, 0.0);
        assert!(angle_between(a, b).is_none());
    }

    #[test]
    fn test_triangle_area() {
        let a = Vector3::new(2.0, 0.0, 0.0);
        let b = Vector3::new(0.0, 3.0, 0.0);
        assert!(close(triangle_area(a, b), 3.0));
    }

    #[test]
    fn test_normal_matrix_of_uniform_scale() {
        let model = Matrix4::from_scale(2.0);
        let n = normal_matrix(&model).unwrap();
        assert!(close(n.x.x, 0.5));
        assert!(close(n.y.y, 0.5));
        assert!(close(n.z.z, 0.5));
    }

    #[test]
    fn test_normal_matrix_singular() {
        let model = Matrix4::from_nonuniform_scale(1.0, 0.0, 1.0);
        assert!(normal_matrix(&model).is_none());
    }

    #[test]
    fn test_ease_out_endpoints() {
        assert!(close(ease_out(0.0), 0.0));
        assert!(close(ease_out(1.0), 1.0));
        assert!(close(ease_out(0.5), 0.75));
        assert!(close(ease_out(4.0), 1.0));
    }

    #[test]
    fn test_reflect() {
        let i = Vector3::new(1.0, -1.0, 0.0);
        let n = Vector3::new(0.0, 1.0, 0.0);
        let r = reflect(i, n);
        assert!(close(r.x, 1.0) && close(r.y, 1.0) && close(r.z, 0.0));
    }

    #[test]
    fn test_transform_point_rotation() {
        let m = Matrix4::from_angle_y(Deg(90.0));
        let p = transform_point(&m, Point3::new(1.0, 0.0, 0.0));
        assert!(close(p.x, 0.0) && close(p.z, -1.0));
    }
}
