//! Pointer picking and hover tracking.
//!
//! Each frame the latest pointer coordinate is turned into a camera ray and
//! tested against every interactive object. The nearest hit becomes the single
//! active object; changes are reported as exit-then-enter transitions.

use crate::camera::{Camera, Ray};
use crate::scene::{ObjectId, PickShape, SceneGraph};
use glam::{Vec2, Vec3};
use smallvec::SmallVec;
use std::f32::consts::{PI, TAU};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Hit {
    pub object: ObjectId,
    /// Ray parameter of the intersection.
    pub t: f32,
    /// Surface coordinate, `(0, 0)` bottom-left.
    pub uv: Option<Vec2>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HoverTransition {
    Exit(ObjectId),
    Enter(ObjectId),
}

pub type Transitions = SmallVec<[HoverTransition; 2]>;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct HoverState {
    pub active: Option<ObjectId>,
    pub surface_uv: Option<Vec2>,
}

#[inline]
pub fn ray_sphere(ray_origin: Vec3, ray_dir: Vec3, center: Vec3, radius: f32) -> Option<f32> {
    let oc = ray_origin - center;
    let b = oc.dot(ray_dir);
    let c = oc.dot(oc) - radius * radius;
    let disc = b * b - c;
    if disc < 0.0 {
        return None;
    }
    let t = -b - disc.sqrt();
    (t >= 0.0).then_some(t)
}

// Slab-method ray–AABB intersection.
pub fn ray_aabb(ray_origin: Vec3, ray_dir: Vec3, min: Vec3, max: Vec3) -> Option<f32> {
    let inv = Vec3::new(
        if ray_dir.x != 0.0 { 1.0 / ray_dir.x } else { f32::INFINITY },
        if ray_dir.y != 0.0 { 1.0 / ray_dir.y } else { f32::INFINITY },
        if ray_dir.z != 0.0 { 1.0 / ray_dir.z } else { f32::INFINITY },
    );
    let t1 = (min - ray_origin) * inv;
    let t2 = (max - ray_origin) * inv;
    let tmin = t1.min(t2).max_element();
    let tmax = t1.max(t2).min_element();
    if tmax < tmin.max(0.0) {
        return None;
    }
    Some(if tmin >= 0.0 { tmin } else { tmax })
}

/// Intersection with the local `z = 0` plane, from either side.
#[inline]
pub fn ray_plane_z0(ray_origin: Vec3, ray_dir: Vec3) -> Option<f32> {
    if ray_dir.z.abs() <= 1e-6 {
        return None;
    }
    let t = -ray_origin.z / ray_dir.z;
    (t >= 0.0).then_some(t)
}

/// Intersect a ray given in object-local space with `shape`.
pub fn intersect_local(shape: &PickShape, origin: Vec3, dir: Vec3) -> Option<(f32, Vec2)> {
    match *shape {
        PickShape::Quad { width, height } => {
            let t = ray_plane_z0(origin, dir)?;
            let p = origin + dir * t;
            let u = p.x / width + 0.5;
            let v = p.y / height + 0.5;
            ((0.0..=1.0).contains(&u) && (0.0..=1.0).contains(&v)).then(|| (t, Vec2::new(u, v)))
        }
        PickShape::Disc { radius } => {
            let t = ray_plane_z0(origin, dir)?;
            let p = origin + dir * t;
            (p.truncate().length() <= radius)
                .then(|| (t, Vec2::new(p.x / radius, p.y / radius) * 0.5 + 0.5))
        }
        PickShape::Sphere { radius } => {
            let t = ray_sphere(origin, dir, Vec3::ZERO, radius)?;
            let n = (origin + dir * t) / radius;
            let mut u = n.z.atan2(-n.x) / TAU;
            if u < 0.0 {
                u += 1.0;
            }
            let v = 1.0 - n.y.clamp(-1.0, 1.0).acos() / PI;
            Some((t, Vec2::new(u, v)))
        }
        PickShape::Box { half_extents } => {
            let t = ray_aabb(origin, dir, -half_extents, half_extents)?;
            let p = (origin + dir * t) / half_extents;
            // Face uv from the two axes not pinned to the hit face.
            let a = p.abs();
            let face = if a.x >= a.y && a.x >= a.z {
                Vec2::new(p.z, p.y)
            } else if a.y >= a.z {
                Vec2::new(p.x, p.z)
            } else {
                Vec2::new(p.x, p.y)
            };
            Some((t, face * 0.5 + 0.5))
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct PointerPicker {
    hover: HoverState,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct PickResult {
    pub hit: Option<Hit>,
    pub transitions: Transitions,
}

impl PointerPicker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn hover(&self) -> HoverState {
        self.hover
    }

    /// Nearest interactive hit along `ray`. Equal distances keep the object
    /// inserted first.
    pub fn cast(ray: &Ray, scene: &SceneGraph) -> Option<Hit> {
        let mut best: Option<Hit> = None;
        for obj in scene.iter().filter(|o| o.interactive) {
            let inv = scene.world_transform(obj).inverse();
            let origin = inv.transform_point3(ray.origin);
            let dir = inv.transform_vector3(ray.dir);
            if let Some((t, uv)) = intersect_local(&obj.shape, origin, dir) {
                match best {
                    Some(b) if t >= b.t => {}
                    _ => {
                        best = Some(Hit {
                            object: obj.id(),
                            t,
                            uv: Some(uv),
                        })
                    }
                }
            }
        }
        best
    }

    /// Resolve this frame's pointer. `None` means the pointer is outside the
    /// canvas (or never entered it) and clears any active object.
    pub fn resolve(&mut self, pointer_ndc: Option<Vec2>, camera: &Camera, scene: &SceneGraph) -> PickResult {
        let hit = pointer_ndc
            .filter(|p| p.is_finite())
            .and_then(|ndc| Self::cast(&camera.ray_from_ndc(ndc), scene));
        let next = hit.map(|h| h.object);

        let mut transitions = Transitions::new();
        if next != self.hover.active {
            if let Some(prev) = self.hover.active {
                transitions.push(HoverTransition::Exit(prev));
            }
            if let Some(id) = next {
                transitions.push(HoverTransition::Enter(id));
            }
        }
        self.hover = HoverState {
            active: next,
            surface_uv: hit.and_then(|h| h.uv),
        };
        PickResult { hit, transitions }
    }
}
