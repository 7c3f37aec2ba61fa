//! # Exercises
//!
//! Each exercise is a self-contained [`Simulation`](crate::simulation::Simulation)
//! or, for the vector plot, a set of pure functions.
//!
//! - [`vector_plot`] - 2D vector arithmetic on a canvas
//! - [`paint`] - click-to-stamp brush canvas
//! - [`puppet`] - articulated crab driven by a pose skeleton
//! - [`walkthrough`] - first-person maze with block editing and a treasure
//! - [`lighting_scene`] - Phong-lit maze with point and spot lights
//! - [`billiards`] - ball and target collecting minigame

pub mod billiards;
pub mod lighting_scene;
pub mod paint;
pub mod puppet;
pub mod vector_plot;
pub mod walkthrough;

pub use billiards::{BilliardGame, BilliardSettings, GameState};
pub use lighting_scene::{LightingScene, LightingSettings};
pub use paint::{BrushSettings, Canvas};
pub use puppet::{Crab, CrabPose, CrabSettings};
pub use walkthrough::{MazeWorld, WalkthroughSettings};
