//! # Atelier Prelude
//!
//! Commonly used types in one import.
//!
//! ```rust
//! use atelier::prelude::*;
//!
//! let mut manager = SimulationManager::new();
//! manager.attach_simulation(Box::new(Crab::new()));
//! manager.update(1.0 / 60.0);
//! assert!(!manager.draw_list().is_empty());
//! ```

// Exercises
pub use crate::exercises::{
    BilliardGame, BilliardSettings, Canvas, Crab, LightingScene, LightingSettings, MazeWorld,
    WalkthroughSettings,
};

// Graphics and scene types
pub use crate::gfx::camera::{Camera, CameraController, FirstPersonCamera, OrbitCamera, Projection};
pub use crate::gfx::geometry::{
    generate_cone, generate_cube, generate_plane, generate_sphere, GeometryData,
};
pub use crate::gfx::lighting::Lights;
pub use crate::gfx::material::Material;
pub use crate::gfx::scene::{Object, Part, PartId, Shape, Skeleton, Surface};

// Math and mazes
pub use crate::math::Transform;
pub use crate::maze::{Cell, Maze};

// Simulation framework
pub use crate::simulation::{Simulation, SimulationManager};

// Common external dependencies
pub use cgmath::{Deg, InnerSpace, Matrix4, Point3, Vector3, Zero};
pub use winit::{event::ElementState, keyboard::KeyCode};
