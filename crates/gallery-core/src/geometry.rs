//! On-screen geometry of tracked page elements.

/// Index of a tracked element in the host's element list.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementKey(pub usize);

/// Axis-aligned box in CSS pixels, top-left origin, y growing downwards.
///
/// `top` is measured from the top of the document, not of the viewport, so a
/// box sampled while the page is scrolled still lines up with the virtual
/// scroll offset applied at placement time.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct BoundingBox {
    pub top: f32,
    pub left: f32,
    pub width: f32,
    pub height: f32,
}

impl BoundingBox {
    pub fn new(top: f32, left: f32, width: f32, height: f32) -> Self {
        Self {
            top,
            left,
            width,
            height,
        }
    }

    /// Detached or collapsed elements report boxes that would place a
    /// zero-area or NaN plane.
    pub fn is_degenerate(&self) -> bool {
        let finite = self.top.is_finite()
            && self.left.is_finite()
            && self.width.is_finite()
            && self.height.is_finite();
        !finite || self.width <= 0.0 || self.height <= 0.0
    }
}

/// Visible area of the host container, in CSS pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Zero or non-finite sizes collapse to 1×1 so projection maths stays finite.
    pub fn sanitized(self) -> Self {
        let fix = |v: f32| if v.is_finite() && v >= 1.0 { v } else { 1.0 };
        Self {
            width: fix(self.width),
            height: fix(self.height),
        }
    }

    pub fn aspect(&self) -> f32 {
        let v = self.sanitized();
        v.width / v.height
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(1.0, 1.0)
    }
}

/// Layout-engine seam: the host samples element boxes on demand.
pub trait GeometrySource {
    fn viewport(&self) -> Viewport;
    fn element_count(&self) -> usize;
    /// `None` when the element is gone from the document.
    fn bounding_box(&self, element: ElementKey) -> Option<BoundingBox>;
}

/// Fixed geometry, used for the playground (no elements) and in tests.
#[derive(Clone, Debug, Default)]
pub struct StaticGeometry {
    pub viewport: Viewport,
    pub boxes: Vec<Option<BoundingBox>>,
}

impl StaticGeometry {
    pub fn new(viewport: Viewport, boxes: Vec<BoundingBox>) -> Self {
        Self {
            viewport,
            boxes: boxes.into_iter().map(Some).collect(),
        }
    }
}

impl GeometrySource for StaticGeometry {
    fn viewport(&self) -> Viewport {
        self.viewport
    }

    fn element_count(&self) -> usize {
        self.boxes.len()
    }

    fn bounding_box(&self, element: ElementKey) -> Option<BoundingBox> {
        self.boxes.get(element.0).copied().flatten()
    }
}
