//! # Scene Module
//!
//! Scene data produced by the exercises and consumed by a host renderer.
//!
//! ## Key Components
//!
//! - [`Skeleton`] - articulated part hierarchy resolving world matrices
//! - [`Object`] - one draw-list entry: shape, surface and model matrix
//! - [`Mesh`] / [`Model`] - CPU triangle meshes, including OBJ loading
//! - [`Vertex3D`] - `bytemuck`-castable vertex layout
//!
//! ## Usage
//!
//! ```
//! use atelier::gfx::scene::{Part, Skeleton};
//! use atelier::math::Transform;
//!
//! let mut skeleton = Skeleton::new();
//! let body = skeleton.add_root(Part::new("body", Transform::identity()));
//! let arm = skeleton
//!     .add_child(body, Part::new("arm", Transform::identity().translate([1.0, 0.0, 0.0])))
//!     .unwrap();
//! assert_eq!(skeleton.world_transforms().len(), 2);
//! # let _ = arm;
//! ```

pub mod model;
pub mod object;
pub mod skeleton;
pub mod vertex;

// Re-export main types
pub use model::{Model, ModelError};
pub use object::{Mesh, Object, Shape, Surface};
pub use skeleton::{Part, PartId, Skeleton, SkeletonError};
pub use vertex::{Vertex2D, Vertex3D};
