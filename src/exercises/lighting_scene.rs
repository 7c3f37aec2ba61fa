//! # Phong-Lit Maze
//!
//! A walkable maze lit by an orbiting point light and a spotlight held at
//! the eye like a torch. A sphere and an optional OBJ model sit in front of
//! the maze to show off the highlights.
//!
//! Lighting itself lives in [`Lights`]; this module places the lights each
//! frame and builds the draw list.

use std::path::PathBuf;

use cgmath::{Point3, Vector3};
use log::{info, warn};
use rand::{rngs::StdRng, SeedableRng};
use winit::{event::ElementState, keyboard::KeyCode};

use crate::gfx::camera::{CameraController, FirstPersonCamera, WalkCommand};
use crate::gfx::lighting::{LightingUniform, Lights};
use crate::gfx::material::Material;
use crate::gfx::scene::{Model, Object, Shape, Surface};
use crate::math::Transform;
use crate::maze::Maze;
use crate::simulation::Simulation;

const SPHERE_SEGMENTS: u32 = 40;
const SKY_SCALE: f32 = 100.0;
const MARKER_SCALE: f32 = 0.2;

/// Lighting scene configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct LightingSettings {
    pub maze_size: usize,
    pub cell_size: f32,
    /// Orbit the point light around the origin
    pub animate_light: bool,
    pub orbit_radius: f32,
    /// OBJ file shown next to the sphere
    pub model_path: Option<PathBuf>,
    pub seed: Option<u64>,
}

impl Default for LightingSettings {
    fn default() -> Self {
        Self {
            maze_size: 15,
            cell_size: 2.0,
            animate_light: true,
            orbit_radius: 10.0,
            model_path: None,
            seed: None,
        }
    }
}

impl LightingSettings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_maze_size(mut self, size: usize) -> Self {
        self.maze_size = size;
        self
    }

    pub fn with_animation(mut self, animate: bool) -> Self {
        self.animate_light = animate;
        self
    }

    pub fn with_model(mut self, path: impl Into<PathBuf>) -> Self {
        self.model_path = Some(path.into());
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

#[derive(Debug)]
pub struct LightingScene {
    pub settings: LightingSettings,
    pub lights: Lights,
    maze: Maze,
    camera: FirstPersonCamera,
    controller: CameraController,
    model: Option<Model>,
    time: f32,
    running: bool,
}

impl LightingScene {
    pub fn new(settings: LightingSettings) -> Self {
        let maze = match settings.seed {
            Some(seed) => Maze::generate_with_rng(
                settings.maze_size,
                settings.maze_size,
                &mut StdRng::seed_from_u64(seed),
            ),
            None => Maze::generate(settings.maze_size, settings.maze_size),
        };

        // A missing model only removes it from the scene
        let model = settings
            .model_path
            .as_ref()
            .and_then(|path| match Model::load(path) {
                Ok(model) => {
                    info!("lighting scene model {} loaded", model.name);
                    Some(model)
                }
                Err(err) => {
                    warn!("continuing without model: {}", err);
                    None
                }
            });

        let mut scene = Self {
            settings,
            lights: Lights::default(),
            maze,
            camera: FirstPersonCamera::default(),
            controller: CameraController::new(),
            model,
            time: 0.0,
            running: true,
        };
        scene.follow_camera();
        scene
    }

    pub fn camera(&self) -> &FirstPersonCamera {
        &self.camera
    }

    pub fn model(&self) -> Option<&Model> {
        self.model.as_ref()
    }

    pub fn maze(&self) -> &Maze {
        &self.maze
    }

    /// Points the spotlight from the eye along the view direction.
    fn follow_camera(&mut self) {
        self.lights.spot.position = self.camera.eye;
        if let Some(dir) = self.camera.direction() {
            self.lights.spot.direction = dir;
        }
    }

    fn orbit_light(&mut self) {
        let r = self.settings.orbit_radius;
        self.lights.point.position.x = self.time.cos() * r;
        self.lights.point.position.z = self.time.sin() * r;
    }

    pub fn mouse_motion(&mut self, dx: f32, dy: f32) -> bool {
        let moved = self
            .controller
            .process_mouse_motion(dx, dy, &mut self.camera);
        self.follow_camera();
        moved
    }

    pub fn set_pointer_locked(&mut self, locked: bool) {
        self.controller.set_pointer_locked(locked);
    }

    /// Lit colour of `material` at a surface point, seen from the eye.
    pub fn shade(&self, material: &Material, position: Point3<f32>, normal: Vector3<f32>) -> Vector3<f32> {
        self.lights
            .shade(&material.fragment(position, normal), self.camera.eye)
    }

    pub fn lighting_uniform(&self) -> LightingUniform {
        self.lights.to_uniform(self.camera.eye)
    }

    fn cube(name: &str, surface: Surface, transform: Transform) -> Object {
        Object::new(name, Shape::Cube)
            .with_surface(surface)
            .with_transform(transform.matrix())
    }
}

impl Simulation for LightingScene {
    fn update(&mut self, delta_time: f32) {
        if !self.running {
            return;
        }
        self.time += delta_time;
        if self.settings.animate_light {
            self.orbit_light();
        }
        self.follow_camera();
    }

    fn draw_list(&self) -> Vec<Object> {
        let c = self.settings.cell_size;
        let n = self.maze.rows() as f32;
        let m = self.maze.cols() as f32;
        let (er, ec) = self.maze.exit();

        let mut objects = vec![Self::cube(
            "ground",
            Surface::Texture("ground".into()),
            Transform::identity()
                .translate([0.0, -0.5, 0.0])
                .scale([n * c, 0.1, m * c]),
        )];

        objects.extend(
            self.maze
                .iter()
                .filter(|(_, cell)| !cell.is_open())
                .map(|((x, z), _)| {
                    Self::cube(
                        "wall",
                        Surface::Texture("wall".into()),
                        Transform::identity()
                            .translate([(x as f32 - n / 2.0) * c, 0.0, (z as f32 - m / 2.0) * c])
                            .uniform_scale(c),
                    )
                }),
        );

        objects.push(Self::cube(
            "treasure",
            Surface::Texture("chest".into()),
            Transform::identity()
                .translate([(er as f32 - n / 2.0) * c, 0.0, (ec as f32 - m / 2.0) * c])
                .uniform_scale(c * 0.5),
        ));

        objects.push(
            Object::new("sphere", Shape::Sphere { segments: SPHERE_SEGMENTS })
                .with_surface(Surface::Texture("wall".into()))
                .with_transform(
                    Transform::identity()
                        .translate([3.0, 1.0, 3.0])
                        .uniform_scale(0.8)
                        .matrix(),
                ),
        );

        if let Some(model) = &self.model {
            let color = model
                .base_color
                .unwrap_or(Material::grey(0.8).base_color);
            objects.push(
                Object::new("model", Shape::Mesh(model.name.clone()))
                    .with_surface(Surface::Color(color))
                    .with_transform(Transform::identity().translate([-3.0, 1.0, 3.0]).matrix()),
            );
        }

        if self.lights.point.enabled {
            let p = self.lights.point.position;
            let [r, g, b]: [f32; 3] = self.lights.point.color.into();
            objects.push(Self::cube(
                "light",
                Surface::Color([r, g, b, 1.0]),
                Transform::identity()
                    .translate([p.x, p.y, p.z])
                    .uniform_scale(MARKER_SCALE),
            ));
        }

        let eye = self.camera.eye;
        objects.push(
            Self::cube(
                "sky",
                Surface::Texture("sky".into()),
                Transform::identity()
                    .translate([eye.x, eye.y, eye.z])
                    .uniform_scale(SKY_SCALE),
            )
            .without_depth_write(),
        );
        objects
    }

    /// W/S/A/D/Q/E walk; L, K and N toggle the point light, spotlight and
    /// normal view; T toggles the light orbit.
    fn process_key(&mut self, key: KeyCode, state: ElementState) {
        if let Some(command) = self.controller.process_key(key, state) {
            if !matches!(command, WalkCommand::PlaceBlock | WalkCommand::RemoveBlock) {
                command.apply(&mut self.camera);
                self.follow_camera();
            }
            return;
        }
        if state != ElementState::Pressed {
            return;
        }
        match key {
            KeyCode::KeyL => self.lights.point.enabled = !self.lights.point.enabled,
            KeyCode::KeyK => self.lights.spot.enabled = !self.lights.spot.enabled,
            KeyCode::KeyN => self.lights.show_normals = !self.lights.show_normals,
            KeyCode::KeyT => self.settings.animate_light = !self.settings.animate_light,
            _ => {}
        }
    }

    fn name(&self) -> &str {
        "Lighting"
    }

    fn is_running(&self) -> bool {
        self.running
    }

    fn set_running(&mut self, running: bool) {
        self.running = running;
    }

    /// Camera and lights back to their defaults; the maze and model stay.
    fn reset(&mut self) {
        self.camera = FirstPersonCamera::default();
        self.lights = Lights::default();
        self.time = 0.0;
        self.follow_camera();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::translation_of;
    use cgmath::InnerSpace;

    fn scene() -> LightingScene {
        LightingScene::new(LightingSettings::new().with_seed(3))
    }

    #[test]
    fn test_light_orbits() {
        let mut s = scene();
        s.update(std::f32::consts::FRAC_PI_2);
        let p = s.lights.point.position;
        assert!(p.x.abs() < 1e-4);
        assert!((p.z - 10.0).abs() < 1e-4);
        assert_eq!(p.y, 2.0);

        s.settings.animate_light = false;
        s.update(1.0);
        assert_eq!(s.lights.point.position, p);
    }

    #[test]
    fn test_spotlight_follows_camera() {
        let mut s = scene();
        assert_eq!(s.lights.spot.position, s.camera().eye);
        s.process_key(KeyCode::KeyW, ElementState::Pressed);
        assert_eq!(s.lights.spot.position, s.camera().eye);

        s.process_key(KeyCode::KeyQ, ElementState::Pressed);
        let dir = s.camera().direction().unwrap();
        assert!((s.lights.spot.direction - dir).magnitude() < 1e-6);
    }

    #[test]
    fn test_toggles() {
        let mut s = scene();
        s.process_key(KeyCode::KeyL, ElementState::Pressed);
        assert!(!s.lights.point.enabled);
        assert!(s.draw_list().iter().all(|o| o.name != "light"));
        s.process_key(KeyCode::KeyN, ElementState::Pressed);
        assert!(s.lights.show_normals);
        s.process_key(KeyCode::KeyK, ElementState::Released);
        assert!(s.lights.spot.enabled);
        s.reset();
        assert!(s.lights.point.enabled && !s.lights.show_normals);
    }

    #[test]
    fn test_draw_list_layout() {
        let s = scene();
        let objects = s.draw_list();
        let walls = s.maze().rows() * s.maze().cols() - s.maze().open_cell_count();
        // ground, walls, treasure, sphere, light marker, sky
        assert_eq!(objects.len(), walls + 5);
        let sphere = objects.iter().find(|o| o.name == "sphere").unwrap();
        assert_eq!(translation_of(&sphere.transform), Vector3::new(3.0, 1.0, 3.0));
        let light = objects.iter().find(|o| o.name == "light").unwrap();
        assert_eq!(translation_of(&light.transform), Vector3::new(0.0, 2.0, 5.0));
        assert!(!objects.last().unwrap().depth_write);
    }

    #[test]
    fn test_missing_model_is_skipped() {
        let s = LightingScene::new(
            LightingSettings::new()
                .with_seed(1)
                .with_model("/nonexistent/atelier/benchy.obj"),
        );
        assert!(s.model().is_none());
        assert!(s.draw_list().iter().all(|o| o.name != "model"));
    }

    #[test]
    fn test_shade_uses_eye() {
        let mut s = scene();
        s.lights.spot.enabled = false;
        s.lights.point.enabled = false;
        let c = s.shade(&Material::grey(1.0), Point3::new(0.0, 0.0, 0.0), Vector3::unit_y());
        assert!((c - Vector3::new(0.15, 0.15, 0.15)).magnitude() < 1e-6);
        assert_eq!(s.lighting_uniform().camera_position, [0.0, 0.5, 14.0]);
    }
}
