//! # Graphics Module
//!
//! Renderer-independent graphics state shared by the exercises.
//!
//! ## Architecture Overview
//!
//! - **Camera System** ([`camera`]) - orbit and first-person cameras, picking rays
//! - **Geometry** ([`geometry`]) - procedural cube, sphere, cone and plane meshes
//! - **Lighting** ([`lighting`]) - Phong point light and spotlight
//! - **Materials** ([`material`]) - base colours and their uniform layout
//! - **Scene** ([`scene`]) - draw-list objects, skeletons and OBJ models
//!
//! Nothing here talks to a GPU. Uniform structs are `bytemuck::Pod` so a host
//! renderer can upload them as-is.
//!
//! ```
//! use atelier::gfx::camera::{Camera, FirstPersonCamera};
//!
//! let camera = FirstPersonCamera::default();
//! let _view_proj = camera.build_view_projection_matrix();
//! ```

pub mod camera;
pub mod geometry;
pub mod lighting;
pub mod material;
pub mod scene;

// Re-export commonly used types
pub use camera::{Camera, FirstPersonCamera, OrbitCamera};
pub use lighting::Lights;
pub use material::Material;
