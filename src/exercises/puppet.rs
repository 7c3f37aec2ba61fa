//! # Crab Puppet
//!
//! A blocky crab built as a [`Skeleton`]: a body with two eyes, four pairs
//! of two-segment legs and two claws with pincer tips. Legs and claws can
//! be posed directly or driven by a walk cycle, and a poke blows the parts
//! apart for a moment before they snap back.
//!
//! All cubes are drawn from a corner (the unit cube shifted to `0..1`), so
//! each part's scale grows it away from its joint.

use cgmath::{InnerSpace, Matrix4, Vector3};
use log::{info, warn};
use winit::{event::ElementState, keyboard::KeyCode};

use crate::gfx::scene::{Object, Part, PartId, Shape, Skeleton, SkeletonError, Surface};
use crate::math::Transform;
use crate::simulation::Simulation;

pub const CRAB_RED: [f32; 4] = [0.8, 0.1, 0.1, 1.0];
pub const CRAB_LEG: [f32; 4] = [0.9, 0.3, 0.3, 1.0];
pub const EYE_WHITE: [f32; 4] = [1.0, 1.0, 1.0, 1.0];

const LEG_OFFSETS: [f32; 4] = [-0.1, 0.0, 0.1, 0.2];
const EYE_SEGMENTS: u32 = 8;
const Z_AXIS: [f32; 3] = [0.0, 0.0, 1.0];
const Y_AXIS: [f32; 3] = [0.0, 1.0, 0.0];
const X_AXIS: [f32; 3] = [1.0, 0.0, 0.0];

/// Joint angles in degrees plus the walk's body offsets.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CrabPose {
    pub left_leg: f32,
    pub right_leg: f32,
    pub left_leg2: f32,
    pub right_leg2: f32,
    pub pincer: f32,
    pub body_bob: f32,
    pub claw_sway: f32,
}

impl CrabPose {
    /// Resting stance; also used while the crab is blown apart.
    pub const REST: CrabPose = CrabPose {
        left_leg: -70.0,
        right_leg: 70.0,
        left_leg2: 90.0,
        right_leg2: -90.0,
        pincer: 0.0,
        body_bob: 0.0,
        claw_sway: 0.0,
    };
}

impl Default for CrabPose {
    fn default() -> Self {
        Self::REST
    }
}

/// Animation constants for the crab.
#[derive(Debug, Clone, PartialEq)]
pub struct CrabSettings {
    /// Walk cycle angular speed (rad/s)
    pub speed: f32,
    /// Upper leg swing in degrees
    pub swing: f32,
    /// Lower leg swing in degrees
    pub swing2: f32,
    pub bob_height: f32,
    pub sway_degrees: f32,
    pub claw_open_degrees: f32,
    pub claw_open_speed: f32,
    /// Seconds the poke explosion lasts
    pub poke_duration: f32,
    /// Explosion distance is `explode_rate * elapsed^2`
    pub explode_rate: f32,
    /// Degrees of view rotation per dragged pixel
    pub drag_sensitivity: f32,
}

impl Default for CrabSettings {
    fn default() -> Self {
        Self {
            speed: 10.0,
            swing: 10.0,
            swing2: 5.0,
            bob_height: 0.03,
            sway_degrees: 5.0,
            claw_open_degrees: 15.0,
            claw_open_speed: 5.0,
            poke_duration: 1.5,
            explode_rate: 4.0,
            drag_sensitivity: 0.5,
        }
    }
}

impl CrabSettings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_speed(mut self, speed: f32) -> Self {
        self.speed = speed;
        self
    }

    pub fn with_swing(mut self, swing: f32, swing2: f32) -> Self {
        self.swing = swing;
        self.swing2 = swing2;
        self
    }

    pub fn with_poke_duration(mut self, seconds: f32) -> Self {
        self.poke_duration = seconds.max(0.0);
        self
    }

    pub fn with_drag_sensitivity(mut self, degrees_per_pixel: f32) -> Self {
        self.drag_sensitivity = degrees_per_pixel;
        self
    }
}

/// A `sx * sy * sz` box with its corner at the part's origin.
fn block(sx: f32, sy: f32, sz: f32) -> Transform {
    Transform::identity()
        .scale([sx, sy, sz])
        .translate([0.5, 0.5, 0.5])
}

/// Directions each part flies along during a poke.
struct ExplodeDirs;

impl ExplodeDirs {
    fn body() -> Vector3<f32> {
        Vector3::new(0.0, 0.2, -0.8).normalize()
    }
    fn eye(left: bool) -> Vector3<f32> {
        Vector3::new(if left { -0.7 } else { 0.7 }, 0.7, 0.0).normalize()
    }
    /// Legs fan out: each pair tilts a little further up or down.
    fn leg(left: bool, index: usize) -> Vector3<f32> {
        let fan = (index as f32 - 1.5) * 0.1;
        Vector3::new(if left { -0.8 } else { 0.8 }, -0.2 + fan, 0.0).normalize()
    }
    fn claw(left: bool) -> Vector3<f32> {
        Vector3::new(if left { -0.5 } else { 0.5 }, 0.0, 0.8).normalize()
    }
}

/// The crab puppet exercise.
#[derive(Debug, Clone)]
pub struct Crab {
    pub settings: CrabSettings,
    pose: CrabPose,
    walking: bool,
    time: f32,
    /// Seconds since the current poke started
    poke: Option<f32>,
    camera_x: f32,
    camera_y: f32,
    slider_y: f32,
    last_mouse: Option<(f32, f32)>,
    running: bool,
}

impl Default for Crab {
    fn default() -> Self {
        Self::new()
    }
}

impl Crab {
    pub fn new() -> Self {
        Self {
            settings: CrabSettings::default(),
            pose: CrabPose::REST,
            walking: false,
            time: 0.0,
            poke: None,
            camera_x: 0.0,
            camera_y: 0.0,
            slider_y: 0.0,
            last_mouse: None,
            running: true,
        }
    }

    pub fn with_settings(mut self, settings: CrabSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn pose(&self) -> &CrabPose {
        &self.pose
    }

    pub fn is_walking(&self) -> bool {
        self.walking
    }

    pub fn set_walking(&mut self, walking: bool) {
        self.walking = walking;
    }

    /// Upper leg spread; left and right mirror each other.
    pub fn set_leg_angle(&mut self, degrees: f32) {
        self.pose.left_leg = -degrees;
        self.pose.right_leg = degrees;
    }

    /// Lower leg bend; left and right mirror each other.
    pub fn set_leg2_angle(&mut self, degrees: f32) {
        self.pose.left_leg2 = degrees;
        self.pose.right_leg2 = -degrees;
    }

    pub fn set_pincer_angle(&mut self, degrees: f32) {
        self.pose.pincer = degrees;
    }

    /// Extra yaw on top of the dragged view.
    pub fn set_view_yaw(&mut self, degrees: f32) {
        self.slider_y = degrees;
    }

    pub fn set_view_pitch(&mut self, degrees: f32) {
        self.camera_x = degrees.clamp(-90.0, 90.0);
    }

    /// Starts the explosion unless one is already playing. Cancels walking.
    pub fn poke(&mut self) {
        if self.poke.is_some() {
            return;
        }
        self.poke = Some(0.0);
        self.walking = false;
        info!("crab poked");
    }

    pub fn is_poking(&self) -> bool {
        self.poke.is_some()
    }

    /// Distance every part has travelled along its explode direction.
    pub fn explosion_offset(&self) -> f32 {
        self.poke
            .map_or(0.0, |elapsed| self.settings.explode_rate * elapsed * elapsed)
    }

    pub fn mouse_down(&mut self, x: f32, y: f32) {
        self.last_mouse = Some((x, y));
    }

    pub fn mouse_up(&mut self) {
        self.last_mouse = None;
    }

    /// Drag rotation; pitch is held within ±90°.
    pub fn mouse_move(&mut self, x: f32, y: f32) {
        let Some((last_x, last_y)) = self.last_mouse else {
            return;
        };
        let k = self.settings.drag_sensitivity;
        self.camera_y += (x - last_x) * k;
        self.camera_x = (self.camera_x + (y - last_y) * k).clamp(-90.0, 90.0);
        self.last_mouse = Some((x, y));
    }

    /// Claw opening angle; held shut while poking.
    pub fn claw_open(&self) -> f32 {
        if self.is_poking() {
            0.0
        } else {
            (self.time * self.settings.claw_open_speed).sin() * self.settings.claw_open_degrees
        }
    }

    /// View rotation applied on top of every part.
    pub fn global_rotation(&self) -> Matrix4<f32> {
        Transform::identity()
            .rotate(self.camera_y + self.slider_y + 45.0, Y_AXIS)
            .rotate(self.camera_x, X_AXIS)
            .matrix()
    }

    fn advance_poke(&mut self, dt: f32) {
        let Some(elapsed) = self.poke.as_mut() else {
            return;
        };
        *elapsed += dt;
        if *elapsed >= self.settings.poke_duration {
            self.poke = None;
            info!("crab reassembled");
        }
    }

    fn advance_walk(&mut self) {
        if self.is_poking() {
            return;
        }
        if !self.walking {
            self.pose.body_bob = 0.0;
            self.pose.claw_sway = 0.0;
            return;
        }

        let s = &self.settings;
        let phase = s.speed * self.time;
        let rest = CrabPose::REST;
        self.pose.left_leg = rest.left_leg + s.swing * phase.sin();
        self.pose.right_leg = rest.right_leg + s.swing * (phase + std::f32::consts::PI).sin();
        self.pose.left_leg2 = rest.left_leg2 + s.swing2 * phase.sin();
        self.pose.right_leg2 = rest.right_leg2 + s.swing2 * (phase + std::f32::consts::PI).sin();
        self.pose.body_bob = phase.sin() * s.bob_height;
        self.pose.claw_sway = (phase * 0.5).cos() * s.sway_degrees;
    }

    /// Translation along `dir` by the current explosion offset.
    fn explode(&self, t: Transform, dir: Vector3<f32>) -> Transform {
        if self.is_poking() {
            t.translate(dir * self.explosion_offset())
        } else {
            t
        }
    }

    /// The crab in its current pose, 23 parts rooted at the body.
    pub fn build_skeleton(&self) -> Result<Skeleton, SkeletonError> {
        let poking = self.is_poking();
        let pose = if poking {
            CrabPose {
                pincer: self.pose.pincer,
                ..CrabPose::REST
            }
        } else {
            self.pose
        };
        let claw_open = self.claw_open();

        let mut s = Skeleton::new();

        let body = s.add_root(
            Part::new(
                "body",
                self.explode(
                    Transform::identity().translate([-0.4, -0.3 + pose.body_bob, -0.05]),
                    ExplodeDirs::body(),
                ),
            )
            .with_shape_transform(block(0.8, 0.12, 0.3))
            .with_surface(Surface::Color(CRAB_RED)),
        );

        for (name, x, left) in [("eye_left", 0.2, true), ("eye_right", 0.55, false)] {
            s.add_child(
                body,
                Part::new(
                    name,
                    self.explode(
                        Transform::identity().translate([x, 0.12, 0.15]),
                        ExplodeDirs::eye(left),
                    ),
                )
                .with_shape(Shape::Cone {
                    segments: EYE_SEGMENTS,
                })
                .with_shape_transform(Transform::identity().uniform_scale(0.15))
                .with_surface(Surface::Color(EYE_WHITE)),
            )?;
        }

        for (i, &offset) in LEG_OFFSETS.iter().enumerate() {
            let spread = i as f32 * 10.0;

            let upper = Transform::identity()
                .rotate(45.0 - spread + pose.left_leg * 0.3, Z_AXIS)
                .translate([-0.3, offset, 0.15]);
            let lower = Transform::identity()
                .translate([-0.01, 0.05, 0.0])
                .rotate(180.0 + pose.left_leg2 * 0.5, Z_AXIS);
            let upper = self.explode(upper, ExplodeDirs::leg(true, i));
            Self::add_leg(&mut s, body, "left", i, upper, lower)?;

            // The right legs swing about a tilted axis
            let upper = Transform::identity()
                .rotate(-45.0 + spread + pose.right_leg * 0.3, [2.0, 0.0, 1.0])
                .translate([0.8, offset, 0.15]);
            let lower = Transform::identity()
                .translate([0.25, 0.04, 0.0])
                .rotate(pose.right_leg2 * 0.5, Z_AXIS);
            let upper = self.explode(upper, ExplodeDirs::leg(false, i));
            Self::add_leg(&mut s, body, "right", i, upper, lower)?;
        }

        let claw_left = Transform::identity()
            .translate([0.05, 0.0, 0.3])
            .rotate(-30.0 + claw_open, X_AXIS)
            .rotate(-70.0, Y_AXIS)
            .rotate(pose.claw_sway, Y_AXIS);
        let claw_right = Transform::identity()
            .translate([0.8, 0.0, 0.3])
            .rotate(-30.0 - claw_open, X_AXIS)
            .rotate(-120.0, Y_AXIS)
            .rotate(-pose.claw_sway, Y_AXIS);

        for (side, arm, tip_angle, left) in [
            ("left", claw_left, 20.0 + pose.pincer, true),
            ("right", claw_right, -20.0 - pose.pincer, false),
        ] {
            let claw = s.add_child(
                body,
                Part::new(format!("claw_{side}"), self.explode(arm, ExplodeDirs::claw(left)))
                    .with_shape_transform(block(0.25, 0.08, 0.08))
                    .with_surface(Surface::Color(CRAB_LEG)),
            )?;
            s.add_child(
                claw,
                Part::new(
                    format!("claw_{side}_tip"),
                    Transform::identity()
                        .translate([0.25, 0.0, 0.0])
                        .rotate(tip_angle, Z_AXIS),
                )
                .with_shape_transform(block(0.1, 0.1, 0.1))
                .with_surface(Surface::Color(CRAB_LEG)),
            )?;
        }

        Ok(s)
    }

    fn add_leg(
        s: &mut Skeleton,
        body: PartId,
        side: &str,
        index: usize,
        upper: Transform,
        lower: Transform,
    ) -> Result<(), SkeletonError> {
        let upper = s.add_child(
            body,
            Part::new(format!("leg_{side}_{index}_upper"), upper)
                .with_shape_transform(block(0.3, 0.08, 0.08))
                .with_surface(Surface::Color(CRAB_LEG)),
        )?;
        s.add_child(
            upper,
            Part::new(format!("leg_{side}_{index}_lower"), lower)
                .with_shape_transform(block(0.18, 0.06, 0.06))
                .with_surface(Surface::Color(CRAB_LEG)),
        )?;
        Ok(())
    }
}

impl Simulation for Crab {
    fn update(&mut self, delta_time: f32) {
        if !self.running {
            return;
        }
        self.time += delta_time;
        self.advance_poke(delta_time);
        self.advance_walk();
    }

    fn draw_list(&self) -> Vec<Object> {
        let global = self.global_rotation();
        match self.build_skeleton() {
            Ok(skeleton) => skeleton
                .to_objects()
                .into_iter()
                .map(|mut obj| {
                    obj.transform = global * obj.transform;
                    obj
                })
                .collect(),
            Err(err) => {
                warn!("crab skeleton invalid: {}", err);
                Vec::new()
            }
        }
    }

    fn process_key(&mut self, key: KeyCode, state: ElementState) {
        if state != ElementState::Pressed {
            return;
        }
        match key {
            KeyCode::Space => self.set_walking(!self.walking),
            KeyCode::KeyP => self.poke(),
            KeyCode::KeyR => self.reset(),
            _ => {}
        }
    }

    fn name(&self) -> &str {
        "Crab"
    }

    fn is_running(&self) -> bool {
        self.running
    }

    fn set_running(&mut self, running: bool) {
        self.running = running;
    }

    /// Restores the rest pose and view; the walk clock keeps running.
    fn reset(&mut self) {
        self.poke = None;
        self.walking = false;
        self.pose = CrabPose::REST;
        self.camera_x = 0.0;
        self.camera_y = 0.0;
        self.slider_y = 0.0;
        self.last_mouse = None;
        info!("crab reset");
    }
}
