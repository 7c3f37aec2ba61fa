//! # Articulated Part Hierarchy
//!
//! A [`Skeleton`] is a flat arena of named [`Part`]s. Each part stores a
//! transform relative to its parent's coordinate frame plus a *shape*
//! transform that only affects its own drawn geometry:
//!
//! ```text
//! world(part) = world(parent) * local(part)
//! model(part) = world(part) * shape(part)
//! ```
//!
//! Children can only be added once their parent exists, so parents always
//! precede children in the arena and a single forward pass resolves every
//! world matrix against its parent's already-updated value.

use cgmath::{Matrix4, Point3, SquareMatrix};
use thiserror::Error;

use super::object::{Object, Shape, Surface};
use crate::math::{transform_point, Transform};

/// Index of a part inside its [`Skeleton`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PartId(usize);

impl PartId {
    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SkeletonError {
    #[error("part {0} does not exist")]
    UnknownPart(usize),
}

#[derive(Debug, Clone)]
pub struct Part {
    pub name: String,
    /// Set once by the owning [`Skeleton`]; always an earlier part
    parent: Option<PartId>,
    /// Transform relative to the parent's frame; inherited by children
    pub local: Transform,
    /// Applied to this part's geometry only
    pub shape_transform: Transform,
    pub shape: Shape,
    pub surface: Surface,
}

impl Part {
    pub fn new(name: impl Into<String>, local: Transform) -> Self {
        Self {
            name: name.into(),
            parent: None,
            local,
            shape_transform: Transform::identity(),
            shape: Shape::Cube,
            surface: Surface::default(),
        }
    }

    pub fn parent(&self) -> Option<PartId> {
        self.parent
    }

    pub fn with_shape_transform(mut self, shape_transform: Transform) -> Self {
        self.shape_transform = shape_transform;
        self
    }

    pub fn with_shape(mut self, shape: Shape) -> Self {
        self.shape = shape;
        self
    }

    pub fn with_surface(mut self, surface: Surface) -> Self {
        self.surface = surface;
        self
    }
}

#[derive(Debug, Clone, Default)]
pub struct Skeleton {
    parts: Vec<Part>,
}

impl Skeleton {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.parts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    /// Adds a part with no parent; its world transform is its local transform.
    pub fn add_root(&mut self, part: Part) -> PartId {
        self.push(part, None)
    }

    pub fn add_child(&mut self, parent: PartId, part: Part) -> Result<PartId, SkeletonError> {
        if parent.0 >= self.parts.len() {
            return Err(SkeletonError::UnknownPart(parent.0));
        }
        Ok(self.push(part, Some(parent)))
    }

    fn push(&mut self, mut part: Part, parent: Option<PartId>) -> PartId {
        part.parent = parent;
        self.parts.push(part);
        PartId(self.parts.len() - 1)
    }

    pub fn part(&self, id: PartId) -> Option<&Part> {
        self.parts.get(id.0)
    }

    pub fn find(&self, name: &str) -> Option<PartId> {
        self.parts.iter().position(|p| p.name == name).map(PartId)
    }

    pub fn parts(&self) -> impl Iterator<Item = (PartId, &Part)> {
        self.parts.iter().enumerate().map(|(i, p)| (PartId(i), p))
    }

    pub fn children(&self, id: PartId) -> impl Iterator<Item = PartId> + '_ {
        self.parts
            .iter()
            .enumerate()
            .filter(move |(_, p)| p.parent == Some(id))
            .map(|(i, _)| PartId(i))
    }

    /// World matrix of every part, indexed like the arena.
    pub fn world_transforms(&self) -> Vec<Matrix4<f32>> {
        let mut world: Vec<Matrix4<f32>> = Vec::with_capacity(self.parts.len());
        for part in &self.parts {
            let parent = part
                .parent
                .map_or_else(Matrix4::identity, |p| world[p.0]);
            world.push(parent * part.local.matrix());
        }
        world
    }

    /// World matrix of one part, walking up its ancestor chain.
    pub fn world_matrix(&self, id: PartId) -> Result<Matrix4<f32>, SkeletonError> {
        let mut part = self.part(id).ok_or(SkeletonError::UnknownPart(id.0))?;
        let mut m = part.local.matrix();
        while let Some(parent) = part.parent {
            part = &self.parts[parent.0];
            m = part.local.matrix() * m;
        }
        Ok(m)
    }

    pub fn model_matrix(&self, id: PartId) -> Result<Matrix4<f32>, SkeletonError> {
        let world = self.world_matrix(id)?;
        Ok(world * self.parts[id.0].shape_transform.matrix())
    }

    /// World-space origin of a part's frame.
    pub fn world_position(&self, id: PartId) -> Result<Point3<f32>, SkeletonError> {
        let m = self.world_matrix(id)?;
        Ok(transform_point(&m, Point3::new(0.0, 0.0, 0.0)))
    }

    /// Draw list for the whole hierarchy, one object per part.
    pub fn to_objects(&self) -> Vec<Object> {
        self.world_transforms()
            .into_iter()
            .zip(&self.parts)
            .map(|(world, part)| {
                Object::new(part.name.clone(), part.shape.clone())
                    .with_surface(part.surface.clone())
                    .with_transform(world * part.shape_transform.matrix())
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_point_eq(a: Point3<f32>, b: Point3<f32>) {
        assert!(
            (a.x - b.x).abs() < 1e-4 && (a.y - b.y).abs() < 1e-4 && (a.z - b.z).abs() < 1e-4,
            "{:?} != {:?}",
            a,
            b
        );
    }

    fn arm(angle: f32) -> (Skeleton, PartId, PartId, PartId) {
        let mut s = Skeleton::new();
        let base = s.add_root(Part::new(
            "base",
            Transform::identity().translate([1.0, 0.0, 0.0]),
        ));
        let upper = s
            .add_child(
                base,
                Part::new("upper", Transform::identity().rotate(angle, [0.0, 0.0, 1.0]))
                    .with_shape_transform(Transform::identity().scale([2.0, 0.2, 0.2])),
            )
            .unwrap();
        let lower = s
            .add_child(
                upper,
                Part::new("lower", Transform::identity().translate([2.0, 0.0, 0.0])),
            )
            .unwrap();
        (s, base, upper, lower)
    }

    #[test]
    fn test_unknown_parent() {
        let mut s = Skeleton::new();
        let err = s
            .add_child(PartId(3), Part::new("orphan", Transform::identity()))
            .unwrap_err();
        assert_eq!(err, SkeletonError::UnknownPart(3));
        assert!(s.is_empty());
    }

    #[test]
    fn test_parents_precede_children() {
        let (mut s, base, upper, lower) = arm(30.0);
        // A parent set before insertion is replaced by the real one
        let mut stray = Part::new("stray", Transform::identity());
        stray.parent = Some(PartId(7));
        let stray = s.add_child(lower, stray).unwrap();
        assert_eq!(s.part(stray).unwrap().parent(), Some(lower));
        assert_eq!(s.part(base).unwrap().parent(), None);
        assert_eq!(s.part(upper).unwrap().parent(), Some(base));

        for (id, part) in s.parts() {
            assert!(part.parent().map_or(true, |p| p < id));
        }
        assert_eq!(s.world_transforms().len(), 4);
        assert!(s.world_matrix(stray).is_ok());
    }

    #[test]
    fn test_child_follows_parent_rotation() {
        let (s, _, _, lower) = arm(90.0);
        // Upper arm points up after a 90 degree turn; the elbow sits 2 units above the base
        assert_point_eq(s.world_position(lower).unwrap(), Point3::new(1.0, 2.0, 0.0));
    }

    #[test]
    fn test_child_world_equals_parent_world_applied_to_offset() {
        for angle in [-135.0_f32, -45.0, 0.0, 12.5, 90.0, 270.0] {
            let (s, _, upper, lower) = arm(angle);
            let world = s.world_transforms();
            let offset = s.part(lower).unwrap().local.origin();
            let expected = transform_point(&world[upper.index()], offset);
            assert_point_eq(s.world_position(lower).unwrap(), expected);
        }
    }

    #[test]
    fn test_forward_pass_matches_ancestor_walk() {
        let (s, ..) = arm(33.0);
        let world = s.world_transforms();
        for (id, _) in s.parts() {
            let walked = s.world_matrix(id).unwrap();
            let p = Point3::new(0.3, -0.4, 0.5);
            assert_point_eq(transform_point(&walked, p), transform_point(&world[id.index()], p));
        }
    }

    #[test]
    fn test_shape_transform_not_inherited() {
        let (s, _, upper, lower) = arm(0.0);
        let model = s.model_matrix(upper).unwrap();
        // Unit cube corner stretched by the upper arm's shape scale
        assert_point_eq(
            transform_point(&model, Point3::new(1.0, 1.0, 1.0)),
            Point3::new(3.0, 0.2, 0.2),
        );
        // The child's frame is unaffected by that scale
        assert_point_eq(s.world_position(lower).unwrap(), Point3::new(3.0, 0.0, 0.0));
    }

    #[test]
    fn test_find_and_children() {
        let (s, base, upper, lower) = arm(0.0);
        assert_eq!(s.find("upper"), Some(upper));
        assert_eq!(s.find("missing"), None);
        assert_eq!(s.children(base).collect::<Vec<_>>(), vec![upper]);
        assert_eq!(s.children(upper).collect::<Vec<_>>(), vec![lower]);
        assert_eq!(s.children(lower).count(), 0);
    }

    #[test]
    fn test_to_objects_uses_model_matrices() {
        let (s, _, upper, _) = arm(45.0);
        let objects = s.to_objects();
        assert_eq!(objects.len(), 3);
        assert_eq!(objects[upper.index()].name, "upper");
        assert_eq!(objects[upper.index()].transform, s.model_matrix(upper).unwrap());
    }
}
