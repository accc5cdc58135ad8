//! Scene graph: objects, their pick shapes and material descriptions.
//!
//! Object positions are written only by the placement synchronizer (and at
//! insertion time); everything else reads them.

use crate::geometry::ElementKey;
use glam::{Mat4, Vec2, Vec3};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId(pub u32);

/// Surface used for ray picking, in object-local space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PickShape {
    /// Double-sided rectangle in the local XY plane.
    Quad { width: f32, height: f32 },
    /// Double-sided disc in the local XY plane.
    Disc { radius: f32 },
    Sphere { radius: f32 },
    Box { half_extents: Vec3 },
}

impl PickShape {
    /// Size of the quad drawn for this shape.
    pub fn footprint(&self) -> Vec2 {
        match *self {
            PickShape::Quad { width, height } => Vec2::new(width, height),
            PickShape::Disc { radius } | PickShape::Sphere { radius } => Vec2::splat(radius * 2.0),
            PickShape::Box { half_extents } => half_extents.truncate() * 2.0,
        }
    }

    /// Flat shapes lie in their local plane; volumes are drawn camera-facing.
    pub fn is_planar(&self) -> bool {
        matches!(self, PickShape::Quad { .. } | PickShape::Disc { .. })
    }

    pub fn is_round(&self) -> bool {
        matches!(self, PickShape::Disc { .. } | PickShape::Sphere { .. })
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Material {
    pub base_color: [f32; 4],
    /// Blended in by the hover state; alpha 0 disables the tint.
    pub highlight_color: [f32; 4],
    /// Page element whose pixels texture the surface.
    pub texture: Option<ElementKey>,
}

impl Material {
    pub fn textured(element: ElementKey) -> Self {
        Self {
            base_color: [1.0, 1.0, 1.0, 1.0],
            highlight_color: [0.0, 0.0, 0.0, 0.0],
            texture: Some(element),
        }
    }

    pub fn flat(base_color: [f32; 4], highlight_color: [f32; 4]) -> Self {
        Self {
            base_color,
            highlight_color,
            texture: None,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ObjectSpec {
    pub label: String,
    pub position: Vec3,
    pub shape: PickShape,
    pub material: Material,
    pub interactive: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub struct SceneObject {
    id: ObjectId,
    position: Vec3,
    pub label: String,
    pub shape: PickShape,
    pub material: Material,
    pub interactive: bool,
}

impl SceneObject {
    pub fn id(&self) -> ObjectId {
        self.id
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }
}

#[derive(Clone, Debug, Default)]
pub struct SceneGraph {
    objects: Vec<SceneObject>,
    spin_y: f32,
    next_id: u32,
}

impl SceneGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, spec: ObjectSpec) -> ObjectId {
        let id = ObjectId(self.next_id);
        self.next_id += 1;
        self.objects.push(SceneObject {
            id,
            position: spec.position,
            label: spec.label,
            shape: spec.shape,
            material: spec.material,
            interactive: spec.interactive,
        });
        id
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    pub fn get(&self, id: ObjectId) -> Option<&SceneObject> {
        self.objects.iter().find(|o| o.id == id)
    }

    /// Objects in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &SceneObject> {
        self.objects.iter()
    }

    pub(crate) fn set_position(&mut self, id: ObjectId, position: Vec3) -> bool {
        match self.objects.iter_mut().find(|o| o.id == id) {
            Some(o) => {
                o.position = position;
                true
            }
            None => false,
        }
    }

    /// Rotation of the whole scene about +Y, in radians.
    pub fn spin(&self) -> f32 {
        self.spin_y
    }

    pub fn advance_spin(&mut self, delta: f32) {
        if delta.is_finite() {
            self.spin_y = (self.spin_y + delta) % std::f32::consts::TAU;
        }
    }

    /// Rigid world transform (rotation + translation, no scale).
    pub fn world_transform(&self, object: &SceneObject) -> Mat4 {
        Mat4::from_rotation_y(self.spin_y) * Mat4::from_translation(object.position)
    }
}
