//! Fixed layout of the shape playground.
//!
//! Thirteen shapes of size [`SHAPE_SIZE`] on a grid [`SHAPE_DISTANCE`] apart.
//! Solid shapes pick against a bounding sphere or box; flat ones against
//! their plane.

use crate::constants::{SHAPE_BASE_COLOR, SHAPE_DISTANCE, SHAPE_HIGHLIGHT_COLOR, SHAPE_SIZE};
use crate::scene::{Material, ObjectSpec, PickShape};
use glam::Vec3;

fn shape(label: &str, position: Vec3, shape: PickShape) -> ObjectSpec {
    ObjectSpec {
        label: label.to_string(),
        position,
        shape,
        material: Material::flat(SHAPE_BASE_COLOR, SHAPE_HIGHLIGHT_COLOR),
        interactive: true,
    }
}

pub fn shapes() -> Vec<ObjectSpec> {
    let s = SHAPE_SIZE;
    let d = SHAPE_DISTANCE;
    let round = PickShape::Sphere { radius: s };
    // radius s, height 3s
    let column = PickShape::Box {
        half_extents: Vec3::new(s, s * 1.5, s),
    };

    vec![
        shape("sphere", Vec3::ZERO, round),
        // capsule: radius s plus a length-s body
        shape("capsule", Vec3::new(-d, 0.0, 0.0), column),
        // torus: ring radius s, tube 5
        shape("torus", Vec3::new(d, 0.0, 0.0), PickShape::Sphere { radius: s + 5.0 }),
        shape("cone", Vec3::new(0.0, 0.0, -d), column),
        shape("circle", Vec3::new(-d, 0.0, -d), PickShape::Disc { radius: s }),
        shape("cylinder", Vec3::new(d, 0.0, -d), column),
        shape(
            "plane",
            Vec3::new(-d, 0.0, d),
            PickShape::Quad { width: s, height: s },
        ),
        shape("dodecahedron", Vec3::new(0.0, 0.0, d), round),
        shape("icosahedron", Vec3::new(d, 0.0, d), round),
        shape("octahedron", Vec3::new(0.0, d, 0.0), round),
        shape("ring", Vec3::new(d, d, 0.0), PickShape::Disc { radius: s }),
        shape("tetrahedron", Vec3::new(-d, d, 0.0), round),
        shape(
            "torus-knot",
            Vec3::new(0.0, -d, 0.0),
            PickShape::Sphere { radius: s * 1.2 },
        ),
    ]
}
