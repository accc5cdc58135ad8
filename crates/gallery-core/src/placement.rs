//! Maps page element boxes onto scene object positions.
//!
//! The scene origin sits at the viewport centre with +Y up, so a box at
//! document offset `top` appears at `scroll - top + vh/2 - h/2`.

use crate::geometry::{BoundingBox, ElementKey, GeometrySource, Viewport};
use crate::scene::{ObjectId, SceneGraph};
use glam::{Vec2, Vec3};

#[derive(Clone, Debug, PartialEq)]
pub struct TrackedElement {
    pub element: ElementKey,
    pub bounds: BoundingBox,
    pub object: ObjectId,
}

/// Centre of `bounds` in scene units for the given virtual scroll.
#[inline]
pub fn place(bounds: &BoundingBox, viewport: Viewport, rendered_scroll: f32) -> Vec2 {
    let x = bounds.left - viewport.width / 2.0 + bounds.width / 2.0;
    let y = rendered_scroll - bounds.top + viewport.height / 2.0 - bounds.height / 2.0;
    Vec2::new(x, y)
}

#[derive(Clone, Debug, Default)]
pub struct PlacementSynchronizer {
    tracked: Vec<TrackedElement>,
}

impl PlacementSynchronizer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn track(&mut self, element: ElementKey, bounds: BoundingBox, object: ObjectId) {
        self.tracked.push(TrackedElement {
            element,
            bounds,
            object,
        });
    }

    pub fn tracked(&self) -> &[TrackedElement] {
        &self.tracked
    }

    /// Re-read every box after a resize. Detached or degenerate elements keep
    /// their last good box. Returns how many boxes were refreshed.
    pub fn resample<G: GeometrySource + ?Sized>(&mut self, geometry: &G) -> usize {
        let mut refreshed = 0;
        for t in &mut self.tracked {
            match geometry.bounding_box(t.element) {
                Some(b) if !b.is_degenerate() => {
                    t.bounds = b;
                    refreshed += 1;
                }
                Some(_) => log::warn!("[placement] element {} collapsed; keeping previous box", t.element.0),
                None => log::warn!("[placement] element {} detached; keeping stale box", t.element.0),
            }
        }
        refreshed
    }

    /// Write every tracked object's position for this frame.
    pub fn sync(&self, rendered_scroll: f32, viewport: Viewport, scene: &mut SceneGraph) {
        for t in &self.tracked {
            let p = place(&t.bounds, viewport, rendered_scroll);
            if !scene.set_position(t.object, Vec3::new(p.x, p.y, 0.0)) {
                log::debug!("[placement] object {:?} no longer in scene", t.object);
            }
        }
    }
}
