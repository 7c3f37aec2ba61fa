use winit::{event::ElementState, keyboard::KeyCode};

use super::first_person::FirstPersonCamera;

/// Degrees turned per Q/E press.
pub const PAN_STEP: f32 = 5.0;

/// One discrete action produced by a key press.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WalkCommand {
    Forward,
    Back,
    Left,
    Right,
    /// Degrees; positive turns left
    Pan(f32),
    PlaceBlock,
    RemoveBlock,
}

impl WalkCommand {
    /// Applies camera movement; block edits are left to the caller.
    pub fn apply(self, camera: &mut FirstPersonCamera) {
        match self {
            WalkCommand::Forward => camera.move_forward(),
            WalkCommand::Back => camera.move_backward(),
            WalkCommand::Left => camera.move_left(),
            WalkCommand::Right => camera.move_right(),
            WalkCommand::Pan(degrees) => camera.pan(degrees),
            WalkCommand::PlaceBlock | WalkCommand::RemoveBlock => {}
        }
    }
}

/// Turns keyboard and mouse input into first-person camera motion.
#[derive(Debug, Clone, Default)]
pub struct CameraController {
    pointer_locked: bool,
}

impl CameraController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Maps a key press to a command. Releases and unbound keys map to nothing.
    pub fn process_key(&self, key: KeyCode, state: ElementState) -> Option<WalkCommand> {
        if state != ElementState::Pressed {
            return None;
        }
        match key {
            KeyCode::KeyW => Some(WalkCommand::Forward),
            KeyCode::KeyS => Some(WalkCommand::Back),
            KeyCode::KeyA => Some(WalkCommand::Left),
            KeyCode::KeyD => Some(WalkCommand::Right),
            KeyCode::KeyQ => Some(WalkCommand::Pan(PAN_STEP)),
            KeyCode::KeyE => Some(WalkCommand::Pan(-PAN_STEP)),
            KeyCode::KeyZ => Some(WalkCommand::PlaceBlock),
            KeyCode::KeyC => Some(WalkCommand::RemoveBlock),
            _ => None,
        }
    }

    /// Mouse look; ignored unless the pointer is locked to the view.
    pub fn process_mouse_motion(&self, dx: f32, dy: f32, camera: &mut FirstPersonCamera) -> bool {
        if !self.pointer_locked {
            return false;
        }
        camera.rotate(dx, dy);
        true
    }

    pub fn set_pointer_locked(&mut self, locked: bool) {
        self.pointer_locked = locked;
    }

    pub fn is_pointer_locked(&self) -> bool {
        self.pointer_locked
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_mapping() {
        let c = CameraController::new();
        assert_eq!(c.process_key(KeyCode::KeyW, ElementState::Pressed), Some(WalkCommand::Forward));
        assert_eq!(c.process_key(KeyCode::KeyQ, ElementState::Pressed), Some(WalkCommand::Pan(5.0)));
        assert_eq!(c.process_key(KeyCode::KeyZ, ElementState::Pressed), Some(WalkCommand::PlaceBlock));
        assert_eq!(c.process_key(KeyCode::KeyW, ElementState::Released), None);
        assert_eq!(c.process_key(KeyCode::KeyX, ElementState::Pressed), None);
    }

    #[test]
    fn test_mouse_look_requires_pointer_lock() {
        let mut c = CameraController::new();
        let mut cam = FirstPersonCamera::default();
        let before = cam;
        assert!(!c.process_mouse_motion(50.0, 0.0, &mut cam));
        assert_eq!(cam, before);

        c.set_pointer_locked(true);
        assert!(c.process_mouse_motion(50.0, 0.0, &mut cam));
        assert!((cam.yaw - (-80.0)).abs() < 1e-4);
    }

    #[test]
    fn test_apply_moves_camera() {
        let mut cam = FirstPersonCamera::default();
        WalkCommand::Forward.apply(&mut cam);
        assert!((cam.eye.z - 13.5).abs() < 1e-5);
        WalkCommand::PlaceBlock.apply(&mut cam);
        assert!((cam.eye.z - 13.5).abs() < 1e-5);
    }
}
