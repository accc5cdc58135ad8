// Host-side tests for ray picking and hover transitions.

use gallery_core::*;
use glam::{Vec2, Vec3};

fn gallery_camera() -> Camera {
    Camera::new(&CameraConfig::gallery(), Viewport::new(1000.0, 800.0))
}

fn quad_at(label: &str, position: Vec3, size: f32) -> ObjectSpec {
    ObjectSpec {
        label: label.to_string(),
        position,
        shape: PickShape::Quad {
            width: size,
            height: size,
        },
        material: Material::flat([1.0; 4], [0.0; 4]),
        interactive: true,
    }
}

fn approx(a: f32, b: f32, eps: f32) -> bool {
    (a - b).abs() <= eps
}

#[test]
fn centre_ray_hits_centre_of_plane() {
    let cam = gallery_camera();
    let mut scene = SceneGraph::new();
    let id = scene.insert(quad_at("a", Vec3::ZERO, 300.0));

    let hit = PointerPicker::cast(&cam.ray_from_ndc(Vec2::ZERO), &scene).expect("hit");
    assert_eq!(hit.object, id);
    assert!(approx(hit.t, 600.0, 0.5));
    let uv = hit.uv.unwrap();
    assert!(approx(uv.x, 0.5, 1e-3));
    assert!(approx(uv.y, 0.5, 1e-3));
}

#[test]
fn resolution_is_deterministic() {
    let cam = gallery_camera();
    let mut scene = SceneGraph::new();
    scene.insert(quad_at("a", Vec3::new(-200.0, 0.0, 0.0), 100.0));
    scene.insert(quad_at("b", Vec3::new(200.0, 0.0, 0.0), 100.0));

    let ray = cam.ray_from_ndc(Vec2::new(0.41, 0.05));
    let first = PointerPicker::cast(&ray, &scene);
    for _ in 0..10 {
        assert_eq!(PointerPicker::cast(&ray, &scene), first);
    }
    assert!(first.is_some());
}

#[test]
fn nearest_hit_wins_regardless_of_insertion_order() {
    let cam = gallery_camera();
    let mut scene = SceneGraph::new();
    let _far = scene.insert(quad_at("far", Vec3::ZERO, 200.0));
    let near = scene.insert(quad_at("near", Vec3::new(0.0, 0.0, 100.0), 200.0));

    let hit = PointerPicker::cast(&cam.ray_from_ndc(Vec2::ZERO), &scene).unwrap();
    assert_eq!(hit.object, near);
}

#[test]
fn equal_distance_keeps_first_inserted() {
    let cam = gallery_camera();
    let mut scene = SceneGraph::new();
    let first = scene.insert(quad_at("first", Vec3::ZERO, 200.0));
    scene.insert(quad_at("second", Vec3::ZERO, 200.0));

    let hit = PointerPicker::cast(&cam.ray_from_ndc(Vec2::ZERO), &scene).unwrap();
    assert_eq!(hit.object, first);
}

#[test]
fn non_interactive_objects_are_ignored() {
    let cam = gallery_camera();
    let mut scene = SceneGraph::new();
    let mut spec = quad_at("decor", Vec3::ZERO, 200.0);
    spec.interactive = false;
    scene.insert(spec);

    assert!(PointerPicker::cast(&cam.ray_from_ndc(Vec2::ZERO), &scene).is_none());
}

#[test]
fn switching_objects_exits_before_entering() {
    let cam = gallery_camera();
    let mut scene = SceneGraph::new();
    let a = scene.insert(quad_at("a", Vec3::new(-200.0, 0.0, 0.0), 100.0));
    let b = scene.insert(quad_at("b", Vec3::new(200.0, 0.0, 0.0), 100.0));
    let mut picker = PointerPicker::new();

    // One world unit per pixel at z=0: x=±200 is ndc ±0.4 across 1000px.
    let r = picker.resolve(Some(Vec2::new(-0.4, 0.0)), &cam, &scene);
    assert_eq!(r.transitions.as_slice(), &[HoverTransition::Enter(a)]);

    let r = picker.resolve(Some(Vec2::new(-0.4, 0.0)), &cam, &scene);
    assert!(r.transitions.is_empty());
    assert_eq!(picker.hover().active, Some(a));

    let r = picker.resolve(Some(Vec2::new(0.4, 0.0)), &cam, &scene);
    assert_eq!(
        r.transitions.as_slice(),
        &[HoverTransition::Exit(a), HoverTransition::Enter(b)]
    );

    let r = picker.resolve(None, &cam, &scene);
    assert_eq!(r.transitions.as_slice(), &[HoverTransition::Exit(b)]);
    assert_eq!(picker.hover().active, None);
    assert_eq!(picker.hover().surface_uv, None);
}

#[test]
fn empty_scene_yields_no_hit() {
    let cam = gallery_camera();
    let scene = SceneGraph::new();
    let mut picker = PointerPicker::new();
    let r = picker.resolve(Some(Vec2::ZERO), &cam, &scene);
    assert!(r.hit.is_none());
    assert!(r.transitions.is_empty());
}

#[test]
fn non_finite_pointer_clears_hover() {
    let cam = gallery_camera();
    let mut scene = SceneGraph::new();
    let a = scene.insert(quad_at("a", Vec3::ZERO, 200.0));
    let mut picker = PointerPicker::new();
    picker.resolve(Some(Vec2::ZERO), &cam, &scene);
    let r = picker.resolve(Some(Vec2::new(f32::NAN, 0.0)), &cam, &scene);
    assert_eq!(r.transitions.as_slice(), &[HoverTransition::Exit(a)]);
}

#[test]
fn sphere_front_hit_uv() {
    let (t, uv) = intersect_local(
        &PickShape::Sphere { radius: 20.0 },
        Vec3::new(0.0, 0.0, 100.0),
        Vec3::new(0.0, 0.0, -1.0),
    )
    .unwrap();
    assert!(approx(t, 80.0, 1e-4));
    assert!(approx(uv.x, 0.25, 1e-4));
    assert!(approx(uv.y, 0.5, 1e-4));
}

#[test]
fn disc_misses_outside_radius() {
    let shape = PickShape::Disc { radius: 10.0 };
    let dir = Vec3::new(0.0, 0.0, -1.0);
    assert!(intersect_local(&shape, Vec3::new(9.0, 0.0, 50.0), dir).is_some());
    assert!(intersect_local(&shape, Vec3::new(8.0, 8.0, 50.0), dir).is_none());
}

#[test]
fn box_hit_from_outside_and_inside() {
    let half = Vec3::splat(10.0);
    let dir = Vec3::new(0.0, 0.0, -1.0);
    let (t, _) = intersect_local(&PickShape::Box { half_extents: half }, Vec3::new(0.0, 0.0, 50.0), dir).unwrap();
    assert!(approx(t, 40.0, 1e-4));
    // Origin inside the box reports the exit face.
    assert_eq!(ray_aabb(Vec3::ZERO, dir, -half, half), Some(10.0));
    assert_eq!(ray_aabb(Vec3::new(50.0, 0.0, 50.0), dir, -half, half), None);
}

#[test]
fn quads_are_double_sided() {
    let shape = PickShape::Quad {
        width: 10.0,
        height: 10.0,
    };
    let from_front = intersect_local(&shape, Vec3::new(0.0, 0.0, 5.0), Vec3::new(0.0, 0.0, -1.0));
    let from_back = intersect_local(&shape, Vec3::new(0.0, 0.0, -5.0), Vec3::new(0.0, 0.0, 1.0));
    assert!(from_front.is_some());
    assert!(from_back.is_some());
    // Pointing away never hits.
    assert!(intersect_local(&shape, Vec3::new(0.0, 0.0, 5.0), Vec3::new(0.0, 0.0, 1.0)).is_none());
}

#[test]
fn spinning_scene_moves_pick_targets() {
    let cam = Camera::new(&CameraConfig::gallery(), Viewport::new(1000.0, 800.0));
    let mut scene = SceneGraph::new();
    let id = scene.insert(ObjectSpec {
        label: "ball".into(),
        position: Vec3::new(200.0, 0.0, 0.0),
        shape: PickShape::Sphere { radius: 40.0 },
        material: Material::flat([0.0, 0.0, 0.0, 1.0], [0.0; 4]),
        interactive: true,
    });
    let ray = cam.ray_from_ndc(Vec2::new(0.4, 0.0));
    assert_eq!(PointerPicker::cast(&ray, &scene).map(|h| h.object), Some(id));

    // Half a turn about Y puts the ball at x=-200.
    scene.advance_spin(std::f32::consts::PI);
    assert!(PointerPicker::cast(&ray, &scene).is_none());
    let mirrored = cam.ray_from_ndc(Vec2::new(-0.4, 0.0));
    assert_eq!(PointerPicker::cast(&mirrored, &scene).map(|h| h.object), Some(id));
}
