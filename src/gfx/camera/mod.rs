pub mod camera_controller;
pub mod camera_utils;
pub mod first_person;
pub mod orbit_camera;

// Re-export main types
pub use camera_controller::{CameraController, WalkCommand};
pub use camera_utils::{Camera, CameraUniform, Projection, Ray};
pub use first_person::FirstPersonCamera;
pub use orbit_camera::OrbitCamera;
