//! Atelier
//!
//! Graphics coursework exercises as a renderer-agnostic library. Every
//! exercise keeps its own state, advances on frame deltas and hands a draw
//! list of [`gfx::scene::Object`]s to whatever host renders it.

pub mod exercises;
pub mod gfx;
pub mod math;
pub mod maze;
pub mod prelude;
pub mod simulation;

pub use maze::Maze;
pub use simulation::{Simulation, SimulationManager};
