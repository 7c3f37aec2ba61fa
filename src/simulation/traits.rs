//! Core simulation trait
//!
//! Defines the interface every exercise implements so one manager can
//! drive it frame by frame.

use winit::{event::ElementState, keyboard::KeyCode};

use crate::gfx::scene::Object;

/// Core trait for frame-driven exercises
///
/// All state lives in the implementing struct and only changes through
/// these methods; time only advances through `update`.
pub trait Simulation {
    /// Update simulation state
    ///
    /// # Arguments
    /// * `delta_time` - Time elapsed since last update in seconds
    fn update(&mut self, delta_time: f32);

    /// Objects to draw this frame, with their model matrices
    fn draw_list(&self) -> Vec<Object> {
        Vec::new()
    }

    /// Keyboard input
    fn process_key(&mut self, _key: KeyCode, _state: ElementState) {}

    /// Get simulation name for display
    fn name(&self) -> &str;

    /// Whether simulation is currently running
    fn is_running(&self) -> bool;

    /// Start/pause simulation
    fn set_running(&mut self, running: bool);

    /// Reset simulation to initial state
    fn reset(&mut self);
}
