//! # Maze Walkthrough
//!
//! A first-person walk through a generated maze. Every wall cell is drawn
//! as a cube, the exit holds a treasure chest that plays a short animation
//! when the player reaches it, and blocks can be placed or removed one cell
//! ahead of the eye.
//!
//! Maze cell `(x, z)` (row, column) is centred at
//! `((x - rows/2) * c, c/2, (z - cols/2) * c)` for cell size `c`. Ground
//! outside the grid is open.

use cgmath::{EuclideanSpace, Matrix4, Point3};
use log::{debug, info};
use rand::{rngs::StdRng, SeedableRng};
use winit::{event::ElementState, keyboard::KeyCode};

use crate::gfx::camera::{CameraController, FirstPersonCamera, WalkCommand};
use crate::gfx::scene::{Object, Shape, Surface};
use crate::math::{distance_xz, ease_out, translation_of, Transform};
use crate::maze::{Cell, CellPos, Maze};
use crate::simulation::Simulation;

pub const SKY_COLOR: [f32; 4] = [0.5, 0.7, 1.0, 1.0];
const SKY_SCALE: f32 = 50.0;

/// Seconds the found animation plays.
pub const TREASURE_DURATION: f32 = 2.0;
/// Rise and spin of the found animation, in the chest's own units.
pub const TREASURE_RISE: f32 = 3.0;
pub const TREASURE_SPIN: f32 = 720.0;

const Y_AXIS: [f32; 3] = [0.0, 1.0, 0.0];
const DIAGONAL: f32 = std::f32::consts::FRAC_1_SQRT_2;

/// Maze walkthrough configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct WalkthroughSettings {
    pub maze_size: usize,
    pub cell_size: f32,
    /// Keep the eye out of wall cells
    pub collision: bool,
    pub player_radius: f32,
    /// Fixed maze seed; `None` draws from the thread RNG
    pub seed: Option<u64>,
}

impl Default for WalkthroughSettings {
    fn default() -> Self {
        Self {
            maze_size: 25,
            cell_size: 0.5,
            collision: true,
            player_radius: 0.15,
            seed: None,
        }
    }
}

impl WalkthroughSettings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_maze_size(mut self, size: usize) -> Self {
        self.maze_size = size;
        self
    }

    pub fn with_cell_size(mut self, cell_size: f32) -> Self {
        self.cell_size = cell_size;
        self
    }

    pub fn with_collision(mut self, collision: bool) -> Self {
        self.collision = collision;
        self
    }

    pub fn with_player_radius(mut self, radius: f32) -> Self {
        self.player_radius = radius.max(0.0);
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    fn build_maze(&self) -> Maze {
        match self.seed {
            Some(seed) => {
                let mut rng = StdRng::seed_from_u64(seed);
                Maze::generate_with_rng(self.maze_size, self.maze_size, &mut rng)
            }
            None => Maze::generate(self.maze_size, self.maze_size),
        }
    }
}

/// The walkthrough exercise.
#[derive(Debug, Clone)]
pub struct MazeWorld {
    pub settings: WalkthroughSettings,
    maze: Maze,
    camera: FirstPersonCamera,
    controller: CameraController,
    time: f32,
    /// Time the treasure was reached
    found_at: Option<f32>,
    running: bool,
}

impl MazeWorld {
    pub fn new(settings: WalkthroughSettings) -> Self {
        let maze = settings.build_maze();
        Self::with_maze(maze, settings)
    }

    /// Walkthrough over an existing layout.
    pub fn with_maze(maze: Maze, settings: WalkthroughSettings) -> Self {
        debug!(
            "maze world {}x{} with cell size {}",
            maze.rows(),
            maze.cols(),
            settings.cell_size
        );
        Self {
            settings,
            maze,
            camera: FirstPersonCamera::default(),
            controller: CameraController::new(),
            time: 0.0,
            found_at: None,
            running: true,
        }
    }

    pub fn maze(&self) -> &Maze {
        &self.maze
    }

    pub fn camera(&self) -> &FirstPersonCamera {
        &self.camera
    }

    pub fn camera_mut(&mut self) -> &mut FirstPersonCamera {
        &mut self.camera
    }

    fn half_extent(&self) -> (f32, f32) {
        (self.maze.rows() as f32 / 2.0, self.maze.cols() as f32 / 2.0)
    }

    /// World-space centre of a cell's cube.
    pub fn cell_center(&self, (x, z): CellPos) -> Point3<f32> {
        let c = self.settings.cell_size;
        let (hx, hz) = self.half_extent();
        Point3::new((x as f32 - hx) * c, c / 2.0, (z as f32 - hz) * c)
    }

    /// The cell containing a world position, if it lies on the grid.
    pub fn cell_at(&self, wx: f32, wz: f32) -> Option<CellPos> {
        let c = self.settings.cell_size;
        let (hx, hz) = self.half_extent();
        let x = (wx / c + hx + 0.5).floor();
        let z = (wz / c + hz + 0.5).floor();
        if x < 0.0 || z < 0.0 {
            return None;
        }
        let (x, z) = (x as usize, z as usize);
        (x < self.maze.rows() && z < self.maze.cols()).then_some((x, z))
    }

    fn is_wall_at(&self, wx: f32, wz: f32) -> bool {
        self.cell_at(wx, wz)
            .is_some_and(|(x, z)| !self.maze.is_open(x, z))
    }

    /// Whether a circle of the player radius around `p` stays clear of walls.
    pub fn is_free(&self, p: Point3<f32>) -> bool {
        let r = self.settings.player_radius;
        let d = r * DIAGONAL;
        let samples = [
            (0.0, 0.0),
            (r, 0.0),
            (-r, 0.0),
            (0.0, r),
            (0.0, -r),
            (d, d),
            (-d, d),
            (d, -d),
            (-d, -d),
        ];
        samples
            .iter()
            .all(|&(dx, dz)| !self.is_wall_at(p.x + dx, p.z + dz))
    }

    /// Applies a movement command, refusing steps that would enter a wall.
    pub fn walk(&mut self, command: WalkCommand) {
        let mut next = self.camera;
        command.apply(&mut next);
        if self.settings.collision && next.eye != self.camera.eye && !self.is_free(next.eye) {
            debug!("step blocked at {:?}", next.eye);
            return;
        }
        self.camera = next;
    }

    /// Places (`true`) or removes a wall one cell ahead of the eye.
    ///
    /// Returns whether a cell changed. A block is never placed in the cell
    /// the eye stands in.
    pub fn toggle_block(&mut self, place: bool) -> bool {
        let c = self.settings.cell_size;
        let (yaw, pitch) = (self.camera.yaw.to_radians(), self.camera.pitch.to_radians());
        let eye = self.camera.eye;
        let tx = eye.x + pitch.cos() * yaw.cos() * c;
        let tz = eye.z + pitch.cos() * yaw.sin() * c;

        let Some((x, z)) = self.cell_at(tx, tz) else {
            return false;
        };
        if place && self.cell_at(eye.x, eye.z) == Some((x, z)) {
            return false;
        }
        let cell = if place { Cell::Wall } else { Cell::Open };
        if self.maze.cell(x, z) == Some(cell) {
            return false;
        }
        self.maze.set_cell(x, z, cell).is_ok()
    }

    pub fn mouse_motion(&mut self, dx: f32, dy: f32) -> bool {
        self.controller
            .process_mouse_motion(dx, dy, &mut self.camera)
    }

    pub fn set_pointer_locked(&mut self, locked: bool) {
        self.controller.set_pointer_locked(locked);
    }

    /// Chest transform at rest, above the exit cell.
    pub fn treasure_base(&self) -> Matrix4<f32> {
        let c = self.settings.cell_size;
        let mut center = self.cell_center(self.maze.exit());
        center.y = 1.5 * c;
        Transform::identity()
            .translate([center.x, center.y, center.z])
            .uniform_scale(c)
            .matrix()
    }

    pub fn treasure_found(&self) -> bool {
        self.found_at.is_some()
    }

    /// `true` while the found animation is playing.
    pub fn treasure_animating(&self) -> bool {
        self.found_at
            .is_some_and(|t0| self.time - t0 < TREASURE_DURATION)
    }

    fn check_treasure(&mut self) {
        if self.found_at.is_some() {
            return;
        }
        let chest = Point3::from_vec(translation_of(&self.treasure_base()));
        let dist = distance_xz(self.camera.eye, chest);
        if dist < 1.5 * self.settings.cell_size {
            self.found_at = Some(self.time);
            info!("treasure found after {:.1}s", self.time);
        }
    }

    /// Current chest transform: the found animation, or an idle bob and spin.
    pub fn treasure_matrix(&self) -> Matrix4<f32> {
        let base = Transform::from_matrix(self.treasure_base());
        match self.found_at {
            Some(t0) if self.time - t0 < TREASURE_DURATION => {
                let p = ((self.time - t0) / TREASURE_DURATION).min(1.0);
                let e = ease_out(p);
                base.translate([0.0, e * TREASURE_RISE, 0.0])
                    .rotate(e * TREASURE_SPIN, Y_AXIS)
                    .uniform_scale(1.0 + 2.0 * p)
                    .matrix()
            }
            _ => {
                let t = self.time * 2.0;
                base.translate([0.0, t.sin() * self.settings.cell_size * 0.5, 0.0])
                    .rotate(t * 30.0, Y_AXIS)
                    .matrix()
            }
        }
    }

    fn wall_objects(&self) -> impl Iterator<Item = Object> + '_ {
        let c = self.settings.cell_size;
        self.maze
            .iter()
            .filter(|(_, cell)| !cell.is_open())
            .map(move |(pos, _)| {
                let center = self.cell_center(pos);
                Object::new("wall", Shape::Cube)
                    .with_surface(Surface::Texture("wall".into()))
                    .with_transform(
                        Transform::identity()
                            .translate([center.x, center.y, center.z])
                            .uniform_scale(c)
                            .matrix(),
                    )
            })
    }
}

impl Default for MazeWorld {
    fn default() -> Self {
        Self::new(WalkthroughSettings::default())
    }
}

impl Simulation for MazeWorld {
    fn update(&mut self, delta_time: f32) {
        if !self.running {
            return;
        }
        self.time += delta_time;
        self.check_treasure();
    }

    /// Ground, walls, treasure and finally the sky box.
    fn draw_list(&self) -> Vec<Object> {
        let c = self.settings.cell_size;
        let (w, d) = (self.maze.rows() as f32 * c, self.maze.cols() as f32 * c);
        let eye = self.camera.eye;

        let mut objects = vec![Object::new("ground", Shape::Cube)
            .with_surface(Surface::Texture("ground".into()))
            .with_transform(
                Transform::identity()
                    .translate([-c / 2.0, -0.01, -c / 2.0])
                    .scale([w, 0.02, d])
                    .matrix(),
            )];
        objects.extend(self.wall_objects());
        objects.push(
            Object::new("treasure", Shape::Cube)
                .with_surface(Surface::Texture("chest".into()))
                .with_transform(self.treasure_matrix()),
        );
        objects.push(
            Object::new("sky", Shape::Cube)
                .with_surface(Surface::Color(SKY_COLOR))
                .with_transform(
                    Transform::identity()
                        .translate([eye.x, eye.y, eye.z])
                        .uniform_scale(SKY_SCALE)
                        .matrix(),
                )
                .without_depth_write(),
        );
        objects
    }

    fn process_key(&mut self, key: KeyCode, state: ElementState) {
        match self.controller.process_key(key, state) {
            Some(WalkCommand::PlaceBlock) => {
                self.toggle_block(true);
            }
            Some(WalkCommand::RemoveBlock) => {
                self.toggle_block(false);
            }
            Some(command) => self.walk(command),
            None => {}
        }
    }

    fn name(&self) -> &str {
        "Maze Walkthrough"
    }

    fn is_running(&self) -> bool {
        self.running
    }

    fn set_running(&mut self, running: bool) {
        self.running = running;
    }

    /// New maze (the same one when seeded), camera back at the start.
    fn reset(&mut self) {
        self.maze = self.settings.build_maze();
        self.camera = FirstPersonCamera::default();
        self.time = 0.0;
        self.found_at = None;
    }
}
