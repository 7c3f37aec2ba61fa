//! Simulation manager
//!
//! Owns the attached exercise and turns raw frame deltas into simulation
//! steps, applying pause, time scale and an optional fixed timestep.

use log::{debug, info};
use winit::{event::ElementState, keyboard::KeyCode};

use super::traits::Simulation;
use crate::gfx::scene::Object;

/// Most fixed steps taken in one `update`; time beyond that is dropped.
pub const MAX_SUBSTEPS: usize = 12;

/// Drives one attached simulation
pub struct SimulationManager {
    simulation: Option<Box<dyn Simulation>>,
    is_paused: bool,
    time_scale: f32,
    accumulated_time: f32,
    fixed_timestep: Option<f32>, // For deterministic simulations
}

impl Default for SimulationManager {
    fn default() -> Self {
        Self::new()
    }
}

impl SimulationManager {
    /// Create a new simulation manager
    pub fn new() -> Self {
        Self {
            simulation: None,
            is_paused: false,
            time_scale: 1.0,
            accumulated_time: 0.0,
            fixed_timestep: None,
        }
    }

    /// Attach a simulation, replacing any previous one
    pub fn attach_simulation(&mut self, simulation: Box<dyn Simulation>) {
        if let Some(old_sim) = self.simulation.take() {
            debug!("replacing simulation '{}'", old_sim.name());
        }

        info!("attached simulation '{}'", simulation.name());
        self.simulation = Some(simulation);
        self.is_paused = false;
        self.accumulated_time = 0.0;
    }

    /// Remove the current simulation, returning it
    pub fn detach_simulation(&mut self) -> Option<Box<dyn Simulation>> {
        let sim = self.simulation.take()?;
        debug!("detached simulation '{}'", sim.name());
        Some(sim)
    }

    /// Update simulation (called every frame)
    ///
    /// Returns the number of simulation steps taken.
    pub fn update(&mut self, delta_time: f32) -> usize {
        if self.is_paused {
            return 0;
        }

        let Some(simulation) = &mut self.simulation else {
            return 0;
        };
        let scaled_delta = delta_time.max(0.0) * self.time_scale;

        if let Some(fixed_dt) = self.fixed_timestep {
            // Fixed timestep simulation for deterministic results
            self.accumulated_time += scaled_delta;

            let mut steps = 0;
            while self.accumulated_time >= fixed_dt && steps < MAX_SUBSTEPS {
                simulation.update(fixed_dt);
                self.accumulated_time -= fixed_dt;
                steps += 1;
            }
            if self.accumulated_time >= fixed_dt {
                debug!(
                    "dropping {:.3}s of simulation time after {} steps",
                    self.accumulated_time, steps
                );
                self.accumulated_time = 0.0;
            }
            steps
        } else {
            simulation.update(scaled_delta);
            1
        }
    }

    /// Forward a key event to the attached simulation
    pub fn process_key(&mut self, key: KeyCode, state: ElementState) {
        if let Some(simulation) = &mut self.simulation {
            simulation.process_key(key, state);
        }
    }

    /// Reset the attached simulation
    pub fn reset(&mut self) {
        if let Some(simulation) = &mut self.simulation {
            debug!("resetting '{}'", simulation.name());
            simulation.reset();
        }
        self.accumulated_time = 0.0;
    }

    /// Draw list of the attached simulation
    pub fn draw_list(&self) -> Vec<Object> {
        self.simulation
            .as_ref()
            .map(|s| s.draw_list())
            .unwrap_or_default()
    }

    /// Get current simulation name
    pub fn current_simulation_name(&self) -> Option<&str> {
        self.simulation.as_ref().map(|s| s.name())
    }

    /// `true` if a simulation exists and is not paused
    pub fn is_running(&self) -> bool {
        !self.is_paused && self.simulation.is_some()
    }

    pub fn is_paused(&self) -> bool {
        self.is_paused
    }

    /// Set pause state
    pub fn set_paused(&mut self, paused: bool) {
        self.is_paused = paused;
        if let Some(simulation) = &mut self.simulation {
            simulation.set_running(!paused);
        }
    }

    /// Enable fixed timestep mode
    ///
    /// # Arguments
    /// * `timestep` - Fixed timestep in seconds, or None for variable timestep
    pub fn set_fixed_timestep(&mut self, timestep: Option<f32>) {
        self.fixed_timestep = timestep.filter(|dt| *dt > 0.0);
        self.accumulated_time = 0.0; // Reset accumulator
    }

    pub fn time_scale(&self) -> f32 {
        self.time_scale
    }

    /// Set time scale
    ///
    /// # Arguments
    /// * `scale` - Time scale multiplier (1.0 = normal speed)
    pub fn set_time_scale(&mut self, scale: f32) {
        self.time_scale = scale.max(0.0); // Prevent negative time
    }

    pub fn has_simulation(&self) -> bool {
        self.simulation.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    #[derive(Default)]
    struct Counter {
        steps: Rc<Cell<usize>>,
        elapsed: f32,
        running: bool,
    }

    impl Simulation for Counter {
        fn update(&mut self, delta_time: f32) {
            self.steps.set(self.steps.get() + 1);
            self.elapsed += delta_time;
        }
        fn name(&self) -> &str {
            "counter"
        }
        fn is_running(&self) -> bool {
            self.running
        }
        fn set_running(&mut self, running: bool) {
            self.running = running;
        }
        fn reset(&mut self) {
            self.elapsed = 0.0;
        }
    }

    fn manager_with_counter() -> (SimulationManager, Rc<Cell<usize>>) {
        let steps = Rc::new(Cell::new(0));
        let mut manager = SimulationManager::new();
        manager.attach_simulation(Box::new(Counter {
            steps: steps.clone(),
            ..Default::default()
        }));
        (manager, steps)
    }

    #[test]
    fn test_variable_timestep() {
        let (mut manager, steps) = manager_with_counter();
        assert_eq!(manager.update(0.016), 1);
        assert_eq!(steps.get(), 1);
        assert_eq!(manager.current_simulation_name(), Some("counter"));
    }

    #[test]
    fn test_fixed_timestep_accumulates() {
        let (mut manager, steps) = manager_with_counter();
        manager.set_fixed_timestep(Some(0.1));
        assert_eq!(manager.update(0.05), 0);
        assert_eq!(manager.update(0.06), 1);
        assert_eq!(manager.update(0.25), 2);
        assert_eq!(steps.get(), 3);
    }

    #[test]
    fn test_fixed_timestep_caps_substeps() {
        let (mut manager, steps) = manager_with_counter();
        manager.set_fixed_timestep(Some(1.0 / 60.0));
        manager.set_time_scale(1e6);
        assert_eq!(manager.update(1.0), MAX_SUBSTEPS);
        assert_eq!(steps.get(), MAX_SUBSTEPS);

        // The backlog is dropped rather than carried into the next frame
        manager.set_time_scale(1.0);
        assert_eq!(manager.update(0.0), 0);
        assert_eq!(manager.update(1.0 / 60.0 + 1e-4), 1);
    }

    #[test]
    fn test_pause_and_time_scale() {
        let (mut manager, steps) = manager_with_counter();
        manager.set_paused(true);
        assert_eq!(manager.update(1.0), 0);
        assert!(!manager.is_running());
        manager.set_paused(false);

        manager.set_time_scale(-3.0);
        assert_eq!(manager.time_scale(), 0.0);
        manager.set_time_scale(2.0);
        manager.set_fixed_timestep(Some(0.5));
        assert_eq!(manager.update(0.5), 2);
        assert_eq!(steps.get(), 2);
    }

    #[test]
    fn test_detach() {
        let (mut manager, _) = manager_with_counter();
        assert!(manager.detach_simulation().is_some());
        assert!(!manager.has_simulation());
        assert_eq!(manager.update(1.0), 0);
        assert!(manager.draw_list().is_empty());
    }
}
