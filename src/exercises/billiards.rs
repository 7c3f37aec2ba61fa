//! # Billiard Collector
//!
//! Shoot a ball around a walled table to knock over every target cube
//! before the clock runs out. The ball loses a life when it rolls into a
//! corner pocket.
//!
//! Physics advances one step per [`Simulation::update`] call; the timer uses
//! the real `delta_time`. Drive the game through a fixed timestep to make
//! ball motion frame-rate independent.

use cgmath::{Deg, InnerSpace, MetricSpace, Point3, Vector3};
use log::{debug, info};
use rand::{rngs::StdRng, Rng, SeedableRng};
use winit::{event::ElementState, keyboard::KeyCode};

use crate::gfx::camera::{camera_utils::pixel_to_ndc, Camera, OrbitCamera, Projection};
use crate::gfx::scene::{Object, Shape, Surface};
use crate::math::Transform;
use crate::simulation::Simulation;

/// Velocity kept per step.
pub const FRICTION: f32 = 0.98;
/// Velocity factor when bouncing off a rail.
pub const RESTITUTION: f32 = -0.8;
/// Below this speed the ball counts as stopped.
pub const STOP_SPEED: f32 = 0.01;
const SPIN_STEP: f32 = 0.02;
const ORBIT_SENSITIVITY: f32 = 0.01;
const DECOR_PER_RAIL: usize = 6;

/// `0xRRGGBB` to an opaque colour.
fn hex(rgb: u32) -> [f32; 4] {
    let channel = |shift: u32| ((rgb >> shift) & 0xff) as f32 / 255.0;
    [channel(16), channel(8), channel(0), 1.0]
}

/// Game configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct BilliardSettings {
    /// Table extent along x
    pub table_length: f32,
    /// Table extent along z
    pub table_width: f32,
    pub ball_radius: f32,
    pub cube_size: f32,
    pub target_count: usize,
    pub lives: u32,
    /// Seconds
    pub time_limit: f32,
    pub max_strength: f32,
    pub seed: Option<u64>,
}

impl Default for BilliardSettings {
    fn default() -> Self {
        Self {
            table_length: 20.0,
            table_width: 10.0,
            ball_radius: 0.5,
            cube_size: 1.0,
            target_count: 8,
            lives: 3,
            time_limit: 120.0,
            max_strength: 6.0,
            seed: None,
        }
    }
}

impl BilliardSettings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_table(mut self, length: f32, width: f32) -> Self {
        self.table_length = length;
        self.table_width = width;
        self
    }

    pub fn with_targets(mut self, count: usize) -> Self {
        self.target_count = count;
        self
    }

    pub fn with_lives(mut self, lives: u32) -> Self {
        self.lives = lives;
        self
    }

    pub fn with_time_limit(mut self, seconds: f32) -> Self {
        self.time_limit = seconds;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    fn ball_start(&self) -> Point3<f32> {
        Point3::new(0.0, self.ball_radius, self.table_width / 4.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameState {
    /// Waiting for the start key
    Ready,
    Playing,
    Won,
    Lost,
}

impl GameState {
    pub fn is_over(self) -> bool {
        matches!(self, GameState::Won | GameState::Lost)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Perspective,
    TopDown,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ball {
    pub position: Point3<f32>,
    /// Horizontal velocity in units per step; `y` stays zero
    pub velocity: Vector3<f32>,
    /// Cosmetic roll angle in radians
    pub spin: f32,
}

impl Ball {
    fn at(position: Point3<f32>) -> Self {
        Self {
            position,
            velocity: Vector3::new(0.0, 0.0, 0.0),
            spin: 0.0,
        }
    }

    pub fn is_stationary(&self) -> bool {
        self.velocity.magnitude() < STOP_SPEED
    }
}

#[derive(Debug)]
pub struct BilliardGame {
    pub settings: BilliardSettings,
    ball: Ball,
    targets: Vec<Point3<f32>>,
    score: usize,
    lives: u32,
    time_left: f32,
    state: GameState,
    /// Felt point the shot is aimed at while the pointer is held
    aim: Option<Point3<f32>>,
    view: View,
    perspective: OrbitCamera,
    top_down: OrbitCamera,
    viewport: (f32, f32),
    orbit_enabled: bool,
    rng: StdRng,
    running: bool,
}

impl BilliardGame {
    pub fn new(settings: BilliardSettings) -> Self {
        let rng = match settings.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_rng(&mut rand::rng()),
        };
        let origin = Point3::new(0.0, 0.0, 0.0);
        let perspective = OrbitCamera::looking_at(
            Point3::new(0.0, 15.0, 25.0),
            origin,
            Projection::Perspective {
                fovy: Deg(75.0),
                aspect: 1.0,
                znear: 0.1,
                zfar: 1000.0,
            },
        );
        let top_down = OrbitCamera::looking_at(
            Point3::new(0.0, 20.0, 0.0),
            origin,
            Projection::Orthographic {
                height: 30.0,
                aspect: 1.0,
                znear: 0.1,
                zfar: 1000.0,
            },
        );

        let mut game = Self {
            ball: Ball::at(settings.ball_start()),
            targets: Vec::new(),
            score: 0,
            lives: settings.lives,
            time_left: settings.time_limit,
            state: GameState::Ready,
            aim: None,
            view: View::Perspective,
            perspective,
            top_down,
            viewport: (1.0, 1.0),
            orbit_enabled: false,
            rng,
            running: true,
            settings,
        };
        game.spawn_targets();
        game
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn ball(&self) -> &Ball {
        &self.ball
    }

    pub fn targets(&self) -> &[Point3<f32>] {
        &self.targets
    }

    pub fn score(&self) -> usize {
        self.score
    }

    pub fn lives(&self) -> u32 {
        self.lives
    }

    pub fn time_left(&self) -> f32 {
        self.time_left
    }

    pub fn view(&self) -> View {
        self.view
    }

    pub fn is_aiming(&self) -> bool {
        self.aim.is_some()
    }

    /// Ball to aim point, for drawing the aim line.
    pub fn aim_line(&self) -> Option<(Point3<f32>, Point3<f32>)> {
        self.aim.map(|target| (self.ball.position, target))
    }

    /// Position of the point light hovering above the ball.
    pub fn ball_light_position(&self) -> Point3<f32> {
        self.ball.position + Vector3::new(0.0, 3.0, 0.0)
    }

    fn spawn_targets(&mut self) {
        let s = &self.settings;
        let margin = s.cube_size * 2.0;
        let half_l = (s.table_length / 2.0 - margin).max(0.0);
        let half_w = (s.table_width / 2.0 - margin).max(0.0);
        let y = s.cube_size / 2.0;
        let count = s.target_count;

        self.targets = (0..count)
            .map(|_| {
                let x = self.rng.random_range(-half_l..=half_l);
                let z = self.rng.random_range(-half_w..=half_w);
                Point3::new(x, y, z)
            })
            .collect();
        debug!("spawned {} targets", self.targets.len());
    }

    /// Leaves the start screen.
    pub fn start(&mut self) {
        if self.state == GameState::Ready {
            self.state = GameState::Playing;
            info!("billiards started");
        }
    }

    /// New round after a win or loss; waits for [`start`](Self::start) again.
    pub fn restart(&mut self) {
        if !self.state.is_over() {
            return;
        }
        self.score = 0;
        self.lives = self.settings.lives;
        self.time_left = self.settings.time_limit;
        self.state = GameState::Ready;
        self.ball = Ball::at(self.settings.ball_start());
        self.aim = None;
        self.spawn_targets();
        info!("billiards restarted");
    }

    /// Moves the ball one step, bouncing it off the rails.
    fn roll(&mut self) {
        let ball = &mut self.ball;
        ball.position += ball.velocity;
        ball.velocity *= FRICTION;

        let half_l = self.settings.table_length / 2.0 - self.settings.ball_radius;
        let half_w = self.settings.table_width / 2.0 - self.settings.ball_radius;
        if ball.position.x.abs() >= half_l {
            ball.position.x = ball.position.x.clamp(-half_l, half_l);
            ball.velocity.x *= RESTITUTION;
        }
        if ball.position.z.abs() >= half_w {
            ball.position.z = ball.position.z.clamp(-half_w, half_w);
            ball.velocity.z *= RESTITUTION;
        }
    }

    /// Whether the ball is within two radii of a table corner.
    pub fn is_pocketed(&self) -> bool {
        let (hl, hw) = (self.settings.table_length / 2.0, self.settings.table_width / 2.0);
        let reach = self.settings.ball_radius * 2.0;
        let p = self.ball.position;
        [(hl, hw), (hl, -hw), (-hl, hw), (-hl, -hw)]
            .iter()
            .any(|&(cx, cz)| {
                let (dx, dz) = (p.x - cx, p.z - cz);
                dx * dx + dz * dz <= reach * reach
            })
    }

    fn lose_life(&mut self) {
        self.lives = self.lives.saturating_sub(1);
        info!("life lost, {} left", self.lives);
        if self.lives == 0 {
            self.state = GameState::Lost;
            info!("game over with score {}", self.score);
        } else {
            self.ball = Ball::at(self.settings.ball_start());
        }
    }

    fn collect_targets(&mut self) {
        let reach = self.settings.ball_radius + self.settings.cube_size / 2.0;
        let p = self.ball.position;
        let before = self.targets.len();
        self.targets.retain(|t| {
            let (dx, dz) = (t.x - p.x, t.z - p.z);
            dx * dx + dz * dz > reach * reach
        });
        let collected = before - self.targets.len();
        if collected > 0 {
            self.score += collected;
            debug!("score {}", self.score);
        }
        if self.score >= self.settings.target_count {
            self.state = GameState::Won;
            info!("all targets collected with {:.1}s left", self.time_left);
        }
    }

    fn tick_timer(&mut self, delta_time: f32) {
        self.time_left -= delta_time;
        if self.time_left <= 0.0 {
            self.time_left = 0.0;
            self.state = GameState::Lost;
            info!("time up with score {}", self.score);
        }
    }

    pub fn active_camera(&self) -> &OrbitCamera {
        match self.view {
            View::Perspective => &self.perspective,
            View::TopDown => &self.top_down,
        }
    }

    fn active_camera_mut(&mut self) -> &mut OrbitCamera {
        match self.view {
            View::Perspective => &mut self.perspective,
            View::TopDown => &mut self.top_down,
        }
    }

    pub fn toggle_view(&mut self) {
        self.view = match self.view {
            View::Perspective => View::TopDown,
            View::TopDown => View::Perspective,
        };
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.viewport = (width.max(1) as f32, height.max(1) as f32);
        self.perspective.resize_projection(width, height);
        self.top_down.resize_projection(width, height);
    }

    /// Orbits the active camera by a pointer drag; only while Ctrl is held.
    pub fn orbit_drag(&mut self, dx: f32, dy: f32) -> bool {
        if !self.orbit_enabled {
            return false;
        }
        let camera = self.active_camera_mut();
        camera.add_yaw(-dx * ORBIT_SENSITIVITY);
        camera.add_pitch(dy * ORBIT_SENSITIVITY);
        true
    }

    /// Felt point under a viewport pixel.
    pub fn pick(&self, px: f32, py: f32) -> Option<Point3<f32>> {
        let (w, h) = self.viewport;
        let (nx, ny) = pixel_to_ndc(px, py, w, h);
        let hit = self
            .active_camera()
            .ray_from_ndc(nx, ny)?
            .intersect_plane_y(0.0)?;
        let on_felt = hit.x.abs() <= self.settings.table_length / 2.0
            && hit.z.abs() <= self.settings.table_width / 2.0;
        on_felt.then_some(hit)
    }

    fn can_shoot(&self) -> bool {
        self.state == GameState::Playing && self.ball.is_stationary()
    }

    /// Starts aiming when the press lands near the resting ball.
    pub fn pointer_down(&mut self, px: f32, py: f32) -> bool {
        if !self.can_shoot() {
            return false;
        }
        let Some(hit) = self.pick(px, py) else {
            return false;
        };
        if hit.distance(self.ball.position) < self.settings.ball_radius * 2.0 {
            self.aim = Some(self.ball.position);
            return true;
        }
        false
    }

    pub fn pointer_move(&mut self, px: f32, py: f32) {
        if self.aim.is_none() {
            return;
        }
        if let Some(hit) = self.pick(px, py) {
            self.aim = Some(hit);
        }
    }

    /// Releases the shot toward the pointer. Returns whether the ball was hit.
    pub fn pointer_up(&mut self, px: f32, py: f32) -> bool {
        if self.aim.take().is_none() || self.state != GameState::Playing {
            return false;
        }
        let Some(hit) = self.pick(px, py) else {
            return false;
        };
        let mut dir = hit - self.ball.position;
        dir.y = 0.0;
        if dir.magnitude2() < 1e-4 {
            return false;
        }
        let strength = hit
            .distance(self.ball.position)
            .clamp(0.0, self.settings.max_strength);
        self.ball.velocity = dir.normalize() * strength;
        debug!("shot with strength {:.2}", strength);
        true
    }

    fn rails(&self) -> [(Point3<f32>, [f32; 3]); 4] {
        let (l, w) = (self.settings.table_length, self.settings.table_width);
        let (thickness, height) = (1.0, 1.0);
        let side_x = l / 2.0 + thickness / 2.0;
        let side_z = w / 2.0 + thickness / 2.0;
        let y = height / 2.0;
        [
            (Point3::new(-side_x, y, 0.0), [thickness, height, w + thickness * 2.0]),
            (Point3::new(side_x, y, 0.0), [thickness, height, w + thickness * 2.0]),
            (Point3::new(0.0, y, -side_z), [l + thickness * 2.0, height, thickness]),
            (Point3::new(0.0, y, side_z), [l + thickness * 2.0, height, thickness]),
        ]
    }

    /// Yellow spheres lined up just outside each rail.
    fn decor_positions(&self) -> Vec<Point3<f32>> {
        let (hl, hw) = (self.settings.table_length / 2.0, self.settings.table_width / 2.0);
        let (offset, y) = (0.8, 0.3);
        let lines = [
            ((-hl, -hw - offset), (hl, -hw - offset)),
            ((-hl, hw + offset), (hl, hw + offset)),
            ((-hl - offset, -hw), (-hl - offset, hw)),
            ((hl + offset, -hw), (hl + offset, hw)),
        ];
        lines
            .iter()
            .flat_map(|&((x0, z0), (x1, z1))| {
                (0..DECOR_PER_RAIL).map(move |i| {
                    let t = i as f32 / (DECOR_PER_RAIL - 1) as f32;
                    Point3::new(x0 + (x1 - x0) * t, y, z0 + (z1 - z0) * t)
                })
            })
            .collect()
    }
}

impl Default for BilliardGame {
    fn default() -> Self {
        Self::new(BilliardSettings::default())
    }
}

impl Simulation for BilliardGame {
    fn update(&mut self, delta_time: f32) {
        if !self.running {
            return;
        }
        self.ball.spin += SPIN_STEP;
        if self.state != GameState::Playing {
            return;
        }

        self.roll();
        if self.is_pocketed() {
            self.lose_life();
            if self.state != GameState::Playing {
                return;
            }
        }
        self.collect_targets();
        if self.state == GameState::Playing {
            self.tick_timer(delta_time);
        }
    }

    fn draw_list(&self) -> Vec<Object> {
        let s = &self.settings;
        let mut objects = vec![Object::new("felt", Shape::Plane)
            .with_surface(Surface::Color(hex(0x0a4d0a)))
            .with_transform(
                Transform::identity()
                    .scale([s.table_length, 1.0, s.table_width])
                    .matrix(),
            )];

        objects.extend(self.rails().into_iter().map(|(p, size)| {
            Object::new("rail", Shape::Cube)
                .with_surface(Surface::Texture("wood".into()))
                .with_transform(
                    Transform::identity()
                        .translate([p.x, p.y, p.z])
                        .scale(size)
                        .matrix(),
                )
        }));

        objects.push(
            Object::new("lamp_post", Shape::Cube)
                .with_surface(Surface::Color(hex(0xcccccc)))
                .with_transform(
                    Transform::identity()
                        .translate([s.table_length / 2.0 + 1.0, 1.5, s.table_width / 2.0 + 1.0])
                        .scale([0.4, 3.0, 0.4])
                        .matrix(),
                ),
        );

        let b = self.ball.position;
        let spin = self.ball.spin.to_degrees();
        objects.push(
            Object::new("ball", Shape::Sphere { segments: 32 })
                .with_surface(Surface::Color(hex(0x00aa00)))
                .with_transform(
                    Transform::identity()
                        .translate([b.x, b.y, b.z])
                        .rotate(spin, [1.0, 0.0, 0.0])
                        .rotate(spin, [0.0, 0.0, 1.0])
                        .uniform_scale(s.ball_radius)
                        .matrix(),
                ),
        );

        objects.extend(self.targets.iter().map(|t| {
            Object::new("target", Shape::Cube)
                .with_surface(Surface::Color(hex(0xff3333)))
                .with_transform(
                    Transform::identity()
                        .translate([t.x, t.y, t.z])
                        .uniform_scale(s.cube_size)
                        .matrix(),
                )
        }));

        objects.extend(self.decor_positions().into_iter().map(|p| {
            Object::new("decor", Shape::Sphere { segments: 16 })
                .with_surface(Surface::Color(hex(0xffff00)))
                .with_transform(
                    Transform::identity()
                        .translate([p.x, p.y, p.z])
                        .uniform_scale(0.3)
                        .matrix(),
                )
        }));

        objects
    }

    /// Space starts, R restarts after the game ends, C swaps cameras and
    /// Ctrl enables orbiting.
    fn process_key(&mut self, key: KeyCode, state: ElementState) {
        let pressed = state == ElementState::Pressed;
        match key {
            KeyCode::ControlLeft | KeyCode::ControlRight => self.orbit_enabled = pressed,
            KeyCode::Space if pressed => self.start(),
            KeyCode::KeyR if pressed => self.restart(),
            KeyCode::KeyC if pressed => self.toggle_view(),
            _ => {}
        }
    }

    fn name(&self) -> &str {
        "Billiards"
    }

    fn is_running(&self) -> bool {
        self.running
    }

    fn set_running(&mut self, running: bool) {
        self.running = running;
    }

    /// Fresh round on the start screen, regardless of the current state.
    fn reset(&mut self) {
        self.state = GameState::Lost;
        self.restart();
    }
}
