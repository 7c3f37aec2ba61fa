//! Simulation system
//!
//! Every exercise is a [`Simulation`]: a state struct advanced by frame
//! deltas and driven by a [`SimulationManager`].

pub mod manager;
pub mod traits;

pub use manager::SimulationManager;
pub use traits::Simulation;
