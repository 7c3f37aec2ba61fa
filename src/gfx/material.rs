use cgmath::{Point3, Vector3};

use super::lighting::Fragment;

#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct MaterialUniform {
    pub base_color: [f32; 4],
}

/// Surface colour fed to the Phong model.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Material {
    pub base_color: [f32; 4],
}

impl Default for Material {
    fn default() -> Self {
        Self::new([1.0, 1.0, 1.0, 1.0])
    }
}

impl Material {
    pub fn new(base_color: [f32; 4]) -> Self {
        Self { base_color }
    }

    /// Opaque grey of the given brightness.
    pub fn grey(value: f32) -> Self {
        Self::new([value, value, value, 1.0])
    }

    pub fn rgb(&self) -> Vector3<f32> {
        let [r, g, b, _] = self.base_color;
        Vector3::new(r, g, b)
    }

    /// A sample of this material at a surface point, ready for [`Lights::shade`].
    ///
    /// [`Lights::shade`]: super::lighting::Lights::shade
    pub fn fragment(&self, position: Point3<f32>, normal: Vector3<f32>) -> Fragment {
        Fragment {
            position,
            normal,
            base_color: self.rgb(),
        }
    }

    pub fn to_uniform(&self) -> MaterialUniform {
        MaterialUniform {
            base_color: self.base_color,
        }
    }
}
