use cgmath::{Deg, EuclideanSpace, Matrix4, Point3, SquareMatrix, Vector3, Vector4};

/// Anything that can produce view and projection matrices.
pub trait Camera {
    fn view_matrix(&self) -> Matrix4<f32>;
    fn projection_matrix(&self) -> Matrix4<f32>;
    fn eye_position(&self) -> Point3<f32>;

    fn build_view_projection_matrix(&self) -> Matrix4<f32> {
        self.projection_matrix() * self.view_matrix()
    }

    /// World-space ray through a point in normalized device coordinates.
    ///
    /// Returns `None` when the view-projection matrix is singular.
    fn ray_from_ndc(&self, ndc_x: f32, ndc_y: f32) -> Option<Ray> {
        let inverse = self.build_view_projection_matrix().invert()?;
        let unproject = |z: f32| {
            let h = inverse * Vector4::new(ndc_x, ndc_y, z, 1.0);
            if h.w.abs() <= f32::EPSILON {
                None
            } else {
                Some(Point3::new(h.x / h.w, h.y / h.w, h.z / h.w))
            }
        };
        let near = unproject(-1.0)?;
        let far = unproject(1.0)?;
        Ray::new(near, far - near)
    }
}

/// Projection used by a camera.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Projection {
    Perspective {
        fovy: Deg<f32>,
        aspect: f32,
        znear: f32,
        zfar: f32,
    },
    /// Symmetric box `height` world units tall, widened by `aspect`
    Orthographic {
        height: f32,
        aspect: f32,
        znear: f32,
        zfar: f32,
    },
}

impl Projection {
    pub fn matrix(&self) -> Matrix4<f32> {
        match *self {
            Projection::Perspective {
                fovy,
                aspect,
                znear,
                zfar,
            } => cgmath::perspective(fovy, aspect, znear, zfar),
            Projection::Orthographic {
                height,
                aspect,
                znear,
                zfar,
            } => {
                let half_h = height / 2.0;
                let half_w = half_h * aspect;
                cgmath::ortho(-half_w, half_w, -half_h, half_h, znear, zfar)
            }
        }
    }

    pub fn set_aspect(&mut self, width: u32, height: u32) {
        let new_aspect = width as f32 / height.max(1) as f32;
        match self {
            Projection::Perspective { aspect, .. } | Projection::Orthographic { aspect, .. } => {
                *aspect = new_aspect
            }
        }
    }
}

/// Half-line used for picking.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: Point3<f32>,
    /// Unit length
    pub direction: Vector3<f32>,
}

impl Ray {
    /// `None` for a zero-length direction.
    pub fn new(origin: Point3<f32>, direction: Vector3<f32>) -> Option<Self> {
        crate::math::try_normalize(direction).map(|direction| Self { origin, direction })
    }

    pub fn at(&self, t: f32) -> Point3<f32> {
        self.origin + self.direction * t
    }

    /// Hit point with the horizontal plane `y = height`, if it lies ahead.
    pub fn intersect_plane_y(&self, height: f32) -> Option<Point3<f32>> {
        if self.direction.y.abs() <= 1e-6 {
            return None;
        }
        let t = (height - self.origin.y) / self.direction.y;
        (t >= 0.0).then(|| self.at(t))
    }
}

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable, Debug)]
pub struct CameraUniform {
    /// The eye position of the camera in homogenous coordinates.
    ///
    /// Homogenous coordinates are used to fullfill the 16 byte alignment requirement.
    pub view_position: [f32; 4],

    /// Contains the view projection matrix.
    pub view_proj: [[f32; 4]; 4],
}

impl CameraUniform {
    pub fn from_camera(camera: &impl Camera) -> Self {
        let eye = camera.eye_position().to_vec();
        Self {
            view_position: [eye.x, eye.y, eye.z, 1.0],
            view_proj: convert_matrix4_to_array(camera.build_view_projection_matrix()),
        }
    }
}

impl Default for CameraUniform {
    /// Creates a default [CameraUniform].
    fn default() -> Self {
        Self {
            view_position: [0.0; 4],
            view_proj: convert_matrix4_to_array(Matrix4::identity()),
        }
    }
}

pub fn convert_matrix4_to_array(matrix4: Matrix4<f32>) -> [[f32; 4]; 4] {
    matrix4.into()
}

/// Viewport pixel position to normalized device coordinates (y up).
pub fn pixel_to_ndc(x: f32, y: f32, width: f32, height: f32) -> (f32, f32) {
    (x / width * 2.0 - 1.0, -(y / height) * 2.0 + 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ray_plane_intersection() {
        let ray = Ray::new(Point3::new(0.0, 10.0, 0.0), Vector3::new(1.0, -1.0, 0.0)).unwrap();
        let hit = ray.intersect_plane_y(0.0).unwrap();
        assert!((hit.x - 10.0).abs() < 1e-4 && hit.y.abs() < 1e-4);
    }

    #[test]
    fn test_ray_parallel_or_behind() {
        let flat = Ray::new(Point3::new(0.0, 1.0, 0.0), Vector3::new(1.0, 0.0, 0.0)).unwrap();
        assert!(flat.intersect_plane_y(0.0).is_none());
        let up = Ray::new(Point3::new(0.0, 1.0, 0.0), Vector3::new(0.0, 1.0, 0.0)).unwrap();
        assert!(up.intersect_plane_y(0.0).is_none());
        assert!(Ray::new(Point3::new(0.0, 0.0, 0.0), Vector3::new(0.0, 0.0, 0.0)).is_none());
    }

    #[test]
    fn test_pixel_to_ndc() {
        assert_eq!(pixel_to_ndc(0.0, 0.0, 400.0, 200.0), (-1.0, 1.0));
        assert_eq!(pixel_to_ndc(200.0, 100.0, 400.0, 200.0), (0.0, 0.0));
        assert_eq!(pixel_to_ndc(400.0, 200.0, 400.0, 200.0), (1.0, -1.0));
    }

    #[test]
    fn test_convert_matrix_is_column_major() {
        let m = Matrix4::from_translation(Vector3::new(1.0, 2.0, 3.0));
        let a = convert_matrix4_to_array(m);
        assert_eq!(a[3], [1.0, 2.0, 3.0, 1.0]);
    }
}
