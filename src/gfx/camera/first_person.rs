use cgmath::{Deg, InnerSpace, Matrix4, Point3, Vector3};

use super::camera_utils::{Camera, Projection};
use crate::math::try_normalize;

/// Distance covered by one movement step.
pub const STEP: f32 = 0.5;
/// Degrees of yaw/pitch per pixel of mouse motion.
pub const MOUSE_SENSITIVITY: f32 = 0.2;
const PITCH_LIMIT: f32 = 89.0;

/// Walking camera: an eye, a look-at point one unit (or more) ahead, and
/// yaw/pitch angles in degrees that describe the look direction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FirstPersonCamera {
    pub eye: Point3<f32>,
    pub at: Point3<f32>,
    pub up: Vector3<f32>,
    pub yaw: f32,
    pub pitch: f32,
    pub projection: Projection,
}

impl Default for FirstPersonCamera {
    fn default() -> Self {
        Self::new(Point3::new(0.0, 0.5, 14.0), Point3::new(0.0, 0.5, 0.0))
    }
}

impl FirstPersonCamera {
    /// Camera looking from `eye` to `at`; yaw and pitch are derived from that direction.
    pub fn new(eye: Point3<f32>, at: Point3<f32>) -> Self {
        let mut camera = Self {
            eye,
            at,
            up: Vector3::unit_y(),
            yaw: -90.0,
            pitch: 0.0,
            projection: Projection::Perspective {
                fovy: Deg(60.0),
                aspect: 1.0,
                znear: 0.1,
                zfar: 1000.0,
            },
        };
        if let Some(dir) = try_normalize(at - eye) {
            camera.sync_angles(dir);
        }
        camera
    }

    /// Unit look direction, or `None` when eye and target coincide.
    pub fn direction(&self) -> Option<Vector3<f32>> {
        try_normalize(self.at - self.eye)
    }

    fn translate(&mut self, offset: Vector3<f32>) {
        self.eye += offset;
        self.at += offset;
    }

    pub fn move_forward(&mut self) {
        if let Some(f) = self.direction() {
            self.translate(f * STEP);
        }
    }

    pub fn move_backward(&mut self) {
        if let Some(f) = self.direction() {
            self.translate(-f * STEP);
        }
    }

    /// Sideways unit vector in the ground plane, pointing to the viewer's left.
    fn strafe_dir(&self) -> Option<Vector3<f32>> {
        let mut f = self.direction()?;
        f.y = 0.0;
        try_normalize(self.up.cross(f))
    }

    pub fn move_left(&mut self) {
        if let Some(s) = self.strafe_dir() {
            self.translate(s * STEP);
        }
    }

    pub fn move_right(&mut self) {
        if let Some(s) = self.strafe_dir() {
            self.translate(-s * STEP);
        }
    }

    /// Turns the view by `degrees` about the up axis; positive turns left.
    pub fn pan(&mut self, degrees: f32) {
        let Some(axis) = try_normalize(self.up) else {
            return;
        };
        let f = self.at - self.eye;
        let rotated = (Matrix4::from_axis_angle(axis, Deg(degrees)) * f.extend(0.0)).truncate();
        self.at = self.eye + rotated;
        if let Some(dir) = try_normalize(rotated) {
            self.sync_angles(dir);
        }
    }

    pub fn pan_left(&mut self, degrees: f32) {
        self.pan(degrees);
    }

    pub fn pan_right(&mut self, degrees: f32) {
        self.pan(-degrees);
    }

    /// Mouse look: `dx`/`dy` are pixel deltas. Pitch stays within ±89°.
    pub fn rotate(&mut self, dx: f32, dy: f32) {
        self.yaw += dx * MOUSE_SENSITIVITY;
        self.pitch = (self.pitch - dy * MOUSE_SENSITIVITY).clamp(-PITCH_LIMIT, PITCH_LIMIT);
        let (ry, rp) = (self.yaw.to_radians(), self.pitch.to_radians());
        let dir = Vector3::new(rp.cos() * ry.cos(), rp.sin(), rp.cos() * ry.sin());
        self.at = self.eye + dir.normalize();
    }

    fn sync_angles(&mut self, dir: Vector3<f32>) {
        self.yaw = dir.z.atan2(dir.x).to_degrees();
        self.pitch = dir.y.clamp(-1.0, 1.0).asin().to_degrees();
    }

    pub fn resize_projection(&mut self, width: u32, height: u32) {
        self.projection.set_aspect(width, height);
    }
}

impl Camera for FirstPersonCamera {
    fn view_matrix(&self) -> Matrix4<f32> {
        Matrix4::look_at_rh(self.eye, self.at, self.up)
    }

    fn projection_matrix(&self) -> Matrix4<f32> {
        self.projection.matrix()
    }

    fn eye_position(&self) -> Point3<f32> {
        self.eye
    }
}
