// Host-side tests for DOM box → scene position mapping.

use gallery_core::*;
use glam::{Vec2, Vec3};

fn quad(label: &str, w: f32, h: f32) -> ObjectSpec {
    ObjectSpec {
        label: label.to_string(),
        position: Vec3::ZERO,
        shape: PickShape::Quad { width: w, height: h },
        material: Material::textured(ElementKey(0)),
        interactive: true,
    }
}

#[test]
fn place_matches_reference_scenario() {
    let viewport = Viewport::new(1000.0, 800.0);
    let bounds = BoundingBox::new(200.0, 100.0, 300.0, 150.0);
    let p = place(&bounds, viewport, 50.0);
    assert_eq!(p, Vec2::new(-250.0, 175.0));
}

#[test]
fn scroll_offset_moves_only_y() {
    let viewport = Viewport::new(1280.0, 720.0);
    let bounds = BoundingBox::new(900.0, 40.0, 200.0, 100.0);
    let a = place(&bounds, viewport, 0.0);
    let b = place(&bounds, viewport, 333.0);
    assert_eq!(a.x, b.x);
    assert_eq!(b.y - a.y, 333.0);
}

#[test]
fn centred_box_lands_on_origin() {
    let viewport = Viewport::new(1000.0, 800.0);
    // left + w/2 == vw/2 and top + h/2 == vh/2
    let bounds = BoundingBox::new(325.0, 350.0, 300.0, 150.0);
    assert_eq!(place(&bounds, viewport, 0.0), Vec2::ZERO);
}

#[test]
fn sync_writes_every_tracked_object() {
    let mut scene = SceneGraph::new();
    let a = scene.insert(quad("a", 300.0, 150.0));
    let b = scene.insert(quad("b", 100.0, 100.0));

    let mut sync = PlacementSynchronizer::new();
    sync.track(ElementKey(0), BoundingBox::new(200.0, 100.0, 300.0, 150.0), a);
    sync.track(ElementKey(1), BoundingBox::new(1000.0, 0.0, 100.0, 100.0), b);

    let viewport = Viewport::new(1000.0, 800.0);
    sync.sync(50.0, viewport, &mut scene);

    assert_eq!(scene.get(a).unwrap().position(), Vec3::new(-250.0, 175.0, 0.0));
    // 0 - 500 + 50, 50 - 1000 + 400 - 50
    assert_eq!(scene.get(b).unwrap().position(), Vec3::new(-450.0, -600.0, 0.0));
}

#[test]
fn resample_refreshes_live_boxes() {
    let mut scene = SceneGraph::new();
    let id = scene.insert(quad("a", 10.0, 10.0));
    let mut sync = PlacementSynchronizer::new();
    sync.track(ElementKey(0), BoundingBox::new(0.0, 0.0, 10.0, 10.0), id);

    let moved = BoundingBox::new(50.0, 60.0, 20.0, 30.0);
    let geometry = StaticGeometry::new(Viewport::new(500.0, 500.0), vec![moved]);
    assert_eq!(sync.resample(&geometry), 1);
    assert_eq!(sync.tracked()[0].bounds, moved);
}

#[test]
fn detached_element_keeps_stale_box() {
    let mut scene = SceneGraph::new();
    let id = scene.insert(quad("a", 10.0, 10.0));
    let good = BoundingBox::new(5.0, 5.0, 10.0, 10.0);
    let mut sync = PlacementSynchronizer::new();
    sync.track(ElementKey(0), good, id);

    let geometry = StaticGeometry {
        viewport: Viewport::new(500.0, 500.0),
        boxes: vec![None],
    };
    assert_eq!(sync.resample(&geometry), 0);
    assert_eq!(sync.tracked()[0].bounds, good);
}

#[test]
fn collapsed_box_never_overwrites_a_good_one() {
    let mut scene = SceneGraph::new();
    let id = scene.insert(quad("a", 10.0, 10.0));
    let good = BoundingBox::new(5.0, 5.0, 10.0, 10.0);
    let mut sync = PlacementSynchronizer::new();
    sync.track(ElementKey(0), good, id);

    for bad in [
        BoundingBox::new(5.0, 5.0, 0.0, 10.0),
        BoundingBox::new(5.0, 5.0, 10.0, -1.0),
        BoundingBox::new(f32::NAN, 5.0, 10.0, 10.0),
    ] {
        let geometry = StaticGeometry::new(Viewport::new(500.0, 500.0), vec![bad]);
        sync.resample(&geometry);
        assert_eq!(sync.tracked()[0].bounds, good);
    }
}

#[test]
fn degenerate_box_detection() {
    assert!(!BoundingBox::new(0.0, 0.0, 1.0, 1.0).is_degenerate());
    assert!(BoundingBox::new(0.0, 0.0, 0.0, 1.0).is_degenerate());
    assert!(BoundingBox::new(0.0, f32::INFINITY, 1.0, 1.0).is_degenerate());
}
