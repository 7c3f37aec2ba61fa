//! Chainable model-matrix builder.
//!
//! Each call post-multiplies the current matrix, so operations read in the
//! order they apply to a part's parent frame:
//!
//! ```
//! use atelier::math::Transform;
//!
//! let leg = Transform::identity()
//!     .rotate(45.0, [0.0, 0.0, 1.0])
//!     .translate([-0.3, 0.0, 0.15])
//!     .scale([0.3, 0.08, 0.08]);
//! # let _ = leg.matrix();
//! ```

use cgmath::{Deg, InnerSpace, Matrix4, Point3, SquareMatrix, Vector3};

/// A single step of a local transform.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TransformOp {
    Translate(Vector3<f32>),
    /// Angle in degrees about an arbitrary (not necessarily unit) axis
    Rotate { degrees: f32, axis: Vector3<f32> },
    Scale(Vector3<f32>),
}

impl TransformOp {
    /// Matrix for this single step.
    ///
    /// A zero rotation axis yields the identity rather than NaNs.
    pub fn matrix(&self) -> Matrix4<f32> {
        match *self {
            TransformOp::Translate(v) => Matrix4::from_translation(v),
            TransformOp::Rotate { degrees, axis } => {
                if axis.magnitude2() <= f32::EPSILON {
                    Matrix4::identity()
                } else {
                    Matrix4::from_axis_angle(axis.normalize(), Deg(degrees))
                }
            }
            TransformOp::Scale(s) => Matrix4::from_nonuniform_scale(s.x, s.y, s.z),
        }
    }
}

/// Accumulated 4x4 transform built from [`TransformOp`]s.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    matrix: Matrix4<f32>,
}

impl Transform {
    pub fn identity() -> Self {
        Self {
            matrix: Matrix4::identity(),
        }
    }

    /// Starts from an existing matrix (e.g. a parent's coordinate frame).
    pub fn from_matrix(matrix: Matrix4<f32>) -> Self {
        Self { matrix }
    }

    pub fn translate(self, v: impl Into<Vector3<f32>>) -> Self {
        self.apply(TransformOp::Translate(v.into()))
    }

    pub fn rotate(self, degrees: f32, axis: impl Into<Vector3<f32>>) -> Self {
        self.apply(TransformOp::Rotate {
            degrees,
            axis: axis.into(),
        })
    }

    pub fn scale(self, s: impl Into<Vector3<f32>>) -> Self {
        self.apply(TransformOp::Scale(s.into()))
    }

    pub fn uniform_scale(self, s: f32) -> Self {
        self.scale([s, s, s])
    }

    pub fn apply(self, op: TransformOp) -> Self {
        Self {
            matrix: self.matrix * op.matrix(),
        }
    }

    /// Post-multiplies another transform: `self * other`.
    pub fn then(self, other: Transform) -> Self {
        Self {
            matrix: self.matrix * other.matrix,
        }
    }

    pub fn from_ops<'a>(ops: impl IntoIterator<Item = &'a TransformOp>) -> Self {
        ops.into_iter()
            .fold(Self::identity(), |acc, op| acc.apply(*op))
    }

    pub fn matrix(&self) -> Matrix4<f32> {
        self.matrix
    }

    pub fn transform_point(&self, p: Point3<f32>) -> Point3<f32> {
        super::transform_point(&self.matrix, p)
    }

    /// Origin of this frame expressed in the parent frame.
    pub fn origin(&self) -> Point3<f32> {
        self.transform_point(Point3::new(0.0, 0.0, 0.0))
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}

impl From<Matrix4<f32>> for Transform {
    fn from(matrix: Matrix4<f32>) -> Self {
        Self::from_matrix(matrix)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_point_eq(a: Point3<f32>, b: Point3<f32>) {
        assert!(
            (a.x - b.x).abs() < 1e-4 && (a.y - b.y).abs() < 1e-4 && (a.z - b.z).abs() < 1e-4,
            "{:?} != {:?}",
            a,
            b
        );
    }

    #[test]
    fn test_translate_then_scale_order() {
        // Scale applies first to the point, then the translation
        let t = Transform::identity()
            .translate([1.0, 0.0, 0.0])
            .scale([2.0, 2.0, 2.0]);
        assert_point_eq(t.transform_point(Point3::new(1.0, 0.0, 0.0)), Point3::new(3.0, 0.0, 0.0));
    }

    #[test]
    fn test_rotate_about_unnormalized_axis() {
        let a = Transform::identity().rotate(30.0, [2.0, 0.0, 1.0]);
        let b = Transform::identity().rotate(30.0, [0.8944272, 0.0, 0.4472136]);
        let p = Point3::new(0.3, 0.7, -0.2);
        assert_point_eq(a.transform_point(p), b.transform_point(p));
    }

    #[test]
    fn test_zero_axis_rotation_is_identity() {
        let t = Transform::identity().rotate(90.0, [0.0, 0.0, 0.0]);
        assert_eq!(t.matrix(), Matrix4::identity());
    }

    #[test]
    fn test_composition_is_associative() {
        let a = Transform::identity().translate([0.5, -1.0, 2.0]);
        let b = Transform::identity().rotate(37.0, [0.0, 1.0, 0.0]);
        let c = Transform::identity().scale([1.5, 0.5, 2.0]).rotate(-12.0, [1.0, 1.0, 0.0]);
        let p = Point3::new(0.25, 0.5, -0.75);
        let left = a.then(b).then(c).transform_point(p);
        let right = a.then(b.then(c)).transform_point(p);
        assert_point_eq(left, right);
    }

    #[test]
    fn test_from_ops_matches_chain() {
        let ops = [
            TransformOp::Translate(Vector3::new(0.05, 0.0, 0.3)),
            TransformOp::Rotate {
                degrees: -30.0,
                axis: Vector3::new(1.0, 0.0, 0.0),
            },
            TransformOp::Rotate {
                degrees: -70.0,
                axis: Vector3::new(0.0, 1.0, 0.0),
            },
        ];
        let chained = Transform::identity()
            .translate([0.05, 0.0, 0.3])
            .rotate(-30.0, [1.0, 0.0, 0.0])
            .rotate(-70.0, [0.0, 1.0, 0.0]);
        assert_point_eq(
            Transform::from_ops(&ops).transform_point(Point3::new(1.0, 2.0, 3.0)),
            chained.transform_point(Point3::new(1.0, 2.0, 3.0)),
        );
    }

    #[test]
    fn test_origin() {
        let t = Transform::identity().translate([1.0, 2.0, 3.0]).rotate(45.0, [0.0, 0.0, 1.0]);
        assert_point_eq(t.origin(), Point3::new(1.0, 2.0, 3.0));
    }
}
