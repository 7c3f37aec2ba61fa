//! Phong lighting
//!
//! CPU evaluation of the per-fragment lighting model (ambient, one point
//! light, one spotlight) plus the uniform block a shader would receive.
//! Colours are linear RGB in `[0, 1]`.

use cgmath::{InnerSpace, Point3, Vector3};

use crate::math::{reflect, try_normalize};

pub const AMBIENT: f32 = 0.15;
pub const SPECULAR_STRENGTH: f32 = 0.5;
pub const SHININESS: f32 = 32.0;
pub const SPOT_CUTOFF_DEGREES: f32 = 25.0;

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PointLight {
    pub position: Point3<f32>,
    pub color: Vector3<f32>,
    pub enabled: bool,
}

impl Default for PointLight {
    fn default() -> Self {
        Self {
            position: Point3::new(0.0, 2.0, 5.0),
            color: Vector3::new(1.0, 1.0, 1.0),
            enabled: true,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Spotlight {
    pub position: Point3<f32>,
    /// Unit direction the cone points along
    pub direction: Vector3<f32>,
    /// Cosine of the half-angle of the cone
    pub cutoff_cos: f32,
    pub enabled: bool,
}

impl Default for Spotlight {
    fn default() -> Self {
        Self {
            position: Point3::new(0.0, 0.0, 0.0),
            direction: -Vector3::unit_z(),
            cutoff_cos: SPOT_CUTOFF_DEGREES.to_radians().cos(),
            enabled: true,
        }
    }
}

/// A surface sample to be lit.
#[derive(Copy, Clone, Debug)]
pub struct Fragment {
    pub position: Point3<f32>,
    pub normal: Vector3<f32>,
    pub base_color: Vector3<f32>,
}

#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Lights {
    pub point: PointLight,
    pub spot: Spotlight,
    /// Show normals as colours instead of lighting
    pub show_normals: bool,
}

impl Lights {
    /// Colour of `frag` seen from `eye`.
    pub fn shade(&self, frag: &Fragment, eye: Point3<f32>) -> Vector3<f32> {
        let n = try_normalize(frag.normal).unwrap_or(Vector3::unit_y());
        if self.show_normals {
            return n * 0.5 + Vector3::new(0.5, 0.5, 0.5);
        }

        let base = frag.base_color;
        let mut color = base * AMBIENT;
        let view_dir = try_normalize(eye - frag.position).unwrap_or(n);

        if self.point.enabled {
            if let Some(l) = try_normalize(self.point.position - frag.position) {
                let diffuse = n.dot(l).max(0.0);
                color += mul(self.point.color, base) * diffuse;
                color += self.point.color * (SPECULAR_STRENGTH * specular(l, n, view_dir));
            }
        }

        if self.spot.enabled {
            if let Some(l) = try_normalize(self.spot.position - frag.position) {
                let angle = l.dot(-self.spot.direction);
                if angle > self.spot.cutoff_cos {
                    let falloff = angle * angle;
                    let diffuse = n.dot(l).max(0.0);
                    color += base * (diffuse * falloff);
                    // The spotlight borrows the point light's colour for its highlight
                    color += self.point.color * (SPECULAR_STRENGTH * specular(l, n, view_dir) * falloff);
                }
            }
        }

        color
    }

    pub fn to_uniform(&self, eye: Point3<f32>) -> LightingUniform {
        LightingUniform {
            camera_position: [eye.x, eye.y, eye.z],
            normals_on: self.show_normals as u32,
            point_position: self.point.position.into(),
            point_on: self.point.enabled as u32,
            point_color: self.point.color.into(),
            spot_on: self.spot.enabled as u32,
            spot_position: self.spot.position.into(),
            spot_cutoff: self.spot.cutoff_cos,
            spot_direction: self.spot.direction.into(),
            _padding: 0.0,
        }
    }
}

fn specular(l: Vector3<f32>, n: Vector3<f32>, view_dir: Vector3<f32>) -> f32 {
    view_dir.dot(reflect(-l, n)).max(0.0).powf(SHININESS)
}

fn mul(a: Vector3<f32>, b: Vector3<f32>) -> Vector3<f32> {
    Vector3::new(a.x * b.x, a.y * b.y, a.z * b.z)
}

/// Lighting uniform block, std140 compatible (vec3 + scalar per row).
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct LightingUniform {
    pub camera_position: [f32; 3],
    pub normals_on: u32,
    pub point_position: [f32; 3],
    pub point_on: u32,
    pub point_color: [f32; 3],
    pub spot_on: u32,
    pub spot_position: [f32; 3],
    pub spot_cutoff: f32,
    pub spot_direction: [f32; 3],
    _padding: f32,
}
// Total: 5 rows * 16 = 80 bytes

#[cfg(test)]
mod tests {
    use super::*;

    fn frag() -> Fragment {
        Fragment {
            position: Point3::new(0.0, 0.0, 0.0),
            normal: Vector3::new(0.0, 1.0, 0.0),
            base_color: Vector3::new(1.0, 0.5, 0.25),
        }
    }

    fn dark() -> Lights {
        let mut lights = Lights::default();
        lights.point.enabled = false;
        lights.spot.enabled = false;
        lights
    }

    fn close(a: Vector3<f32>, b: Vector3<f32>) -> bool {
        (a - b).magnitude() < 1e-4
    }

    #[test]
    fn test_ambient_only() {
        let c = dark().shade(&frag(), Point3::new(0.0, 1.0, 0.0));
        assert!(close(c, Vector3::new(0.15, 0.075, 0.0375)));
    }

    #[test]
    fn test_point_light_overhead() {
        let mut lights = dark();
        lights.point.enabled = true;
        lights.point.position = Point3::new(0.0, 5.0, 0.0);
        // Eye on the reflection: full diffuse plus full specular
        let c = lights.shade(&frag(), Point3::new(0.0, 3.0, 0.0));
        let expected = Vector3::new(1.0, 0.5, 0.25) * 1.15 + Vector3::new(0.5, 0.5, 0.5);
        assert!(close(c, expected), "{:?}", c);
    }

    #[test]
    fn test_point_light_below_surface_adds_nothing_diffuse() {
        let mut lights = dark();
        lights.point.enabled = true;
        lights.point.position = Point3::new(0.0, -5.0, 0.0);
        let c = lights.shade(&frag(), Point3::new(3.0, 3.0, 0.0));
        assert!(close(c, Vector3::new(0.15, 0.075, 0.0375)));
    }

    #[test]
    fn test_spotlight_cone() {
        let mut lights = dark();
        lights.spot.enabled = true;
        lights.spot.position = Point3::new(0.0, 4.0, 0.0);
        lights.spot.direction = Vector3::new(0.0, -1.0, 0.0);
        let eye = Point3::new(10.0, 1.0, 0.0);

        let lit = lights.shade(&frag(), eye);
        assert!(lit.x > 0.9);

        // 45 degrees off axis is outside the 25 degree cone
        let mut off_axis = frag();
        off_axis.position = Point3::new(4.0, 0.0, 0.0);
        let unlit = lights.shade(&off_axis, eye);
        assert!(close(unlit, Vector3::new(0.15, 0.075, 0.0375)));
    }

    #[test]
    fn test_normals_mode() {
        let mut lights = Lights::default();
        lights.show_normals = true;
        let c = lights.shade(&frag(), Point3::new(0.0, 1.0, 0.0));
        assert!(close(c, Vector3::new(0.5, 1.0, 0.5)));
    }

    #[test]
    fn test_uniform_layout() {
        assert_eq!(std::mem::size_of::<LightingUniform>(), 80);
        let u = Lights::default().to_uniform(Point3::new(1.0, 2.0, 3.0));
        assert_eq!(u.camera_position, [1.0, 2.0, 3.0]);
        assert_eq!(u.point_position, [0.0, 2.0, 5.0]);
        assert_eq!(u.point_on, 1);
        assert_eq!(bytemuck::bytes_of(&u).len(), 80);
    }
}
