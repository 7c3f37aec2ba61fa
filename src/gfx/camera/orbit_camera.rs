use cgmath::*;

use super::camera_utils::{Camera, Projection};

/// Camera that looks at a fixed target and can orbit around it.
///
/// Pitch and yaw are in radians; the eye is recomputed from them and the
/// distance every time one changes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitCamera {
    pub distance: f32,
    pub pitch: f32,
    pub yaw: f32,
    pub eye: Point3<f32>,
    pub target: Point3<f32>,
    pub up: Vector3<f32>,
    pub bounds: OrbitCameraBounds,
    pub projection: Projection,
}

impl OrbitCamera {
    /// Places the eye at `eye`, looking at `target`.
    pub fn looking_at(eye: Point3<f32>, target: Point3<f32>, projection: Projection) -> Self {
        let offset = eye - target;
        let distance = offset.magnitude();
        let (pitch, yaw) = if distance > f32::EPSILON {
            ((offset.y / distance).clamp(-1.0, 1.0).asin(), offset.x.atan2(offset.z))
        } else {
            (0.0, 0.0)
        };
        Self {
            distance,
            pitch,
            yaw,
            eye,
            target,
            up: Vector3::unit_y(),
            bounds: OrbitCameraBounds::default(),
            projection,
        }
    }

    pub fn set_distance(&mut self, distance: f32) {
        self.distance = distance.clamp(
            self.bounds.min_distance.unwrap_or(f32::EPSILON),
            self.bounds.max_distance.unwrap_or(f32::MAX),
        );
        self.update();
    }

    pub fn add_distance(&mut self, delta: f32) {
        self.set_distance(self.distance + delta);
    }

    pub fn set_pitch(&mut self, pitch: f32) {
        self.pitch = pitch.clamp(self.bounds.min_pitch, self.bounds.max_pitch);
        self.update();
    }

    pub fn add_pitch(&mut self, delta: f32) {
        self.set_pitch(self.pitch + delta);
    }

    pub fn set_yaw(&mut self, yaw: f32) {
        self.yaw = yaw;
        self.update();
    }

    pub fn add_yaw(&mut self, delta: f32) {
        self.set_yaw(self.yaw + delta);
    }

    /// Updates the camera after changing `distance`, `pitch` or `yaw`.
    fn update(&mut self) {
        self.eye =
            calculate_cartesian_eye_position(self.pitch, self.yaw, self.distance, self.target);
    }

    pub fn resize_projection(&mut self, width: u32, height: u32) {
        self.projection.set_aspect(width, height);
    }
}

impl Camera for OrbitCamera {
    fn view_matrix(&self) -> Matrix4<f32> {
        // Straight down: swap the up vector so look_at stays well defined
        let up = if (self.eye - self.target).normalize().dot(self.up).abs() > 0.999 {
            -Vector3::unit_z()
        } else {
            self.up
        };
        Matrix4::look_at_rh(self.eye, self.target, up)
    }

    fn projection_matrix(&self) -> Matrix4<f32> {
        self.projection.matrix()
    }

    fn eye_position(&self) -> Point3<f32> {
        self.eye
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitCameraBounds {
    pub min_distance: Option<f32>,
    pub max_distance: Option<f32>,
    pub min_pitch: f32,
    pub max_pitch: f32,
}

impl Default for OrbitCameraBounds {
    fn default() -> Self {
        Self {
            min_distance: Some(1.0),
            max_distance: None,
            min_pitch: -std::f32::consts::PI / 2.0 + f32::EPSILON,
            max_pitch: std::f32::consts::PI / 2.0 - f32::EPSILON,
        }
    }
}

fn calculate_cartesian_eye_position(
    pitch: f32,
    yaw: f32,
    distance: f32,
    target: Point3<f32>,
) -> Point3<f32> {
    target
        + Vector3::new(
            distance * yaw.sin() * pitch.cos(),
            distance * pitch.sin(),
            distance * yaw.cos() * pitch.cos(),
        )
}
