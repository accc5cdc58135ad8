// Host-side tests for the pixel-perfect perspective camera.

use gallery_core::*;
use glam::{Vec2, Vec3};

fn approx(a: f32, b: f32, eps: f32) -> bool {
    (a - b).abs() <= eps
}

#[test]
fn viewport_corner_projects_to_ndc_corner() {
    let cam = Camera::new(&CameraConfig::gallery(), Viewport::new(1000.0, 800.0));
    let clip = cam.view_projection() * Vec3::new(500.0, 400.0, 0.0).extend(1.0);
    let ndc = clip.truncate() / clip.w;
    assert!(approx(ndc.x, 1.0, 1e-4));
    assert!(approx(ndc.y, 1.0, 1e-4));
}

#[test]
fn fov_follows_viewport_height() {
    assert!(approx(pixel_perfect_fov(800.0, 600.0), 2.0 * (400.0f32 / 600.0).atan(), 1e-6));
    let cam = Camera::new(&CameraConfig::gallery(), Viewport::new(1000.0, 800.0));
    assert!(approx(cam.fovy_radians, pixel_perfect_fov(800.0, 600.0), 1e-6));
    assert_eq!(cam.aspect, 1.25);
}

#[test]
fn refit_after_resize() {
    let mut cam = Camera::new(&CameraConfig::gallery(), Viewport::new(1000.0, 800.0));
    cam.fit_viewport(Viewport::new(400.0, 800.0));
    assert_eq!(cam.aspect, 0.5);

    // Still one unit per pixel on the z=0 plane.
    let clip = cam.view_projection() * Vec3::new(200.0, -400.0, 0.0).extend(1.0);
    let ndc = clip.truncate() / clip.w;
    assert!(approx(ndc.x, 1.0, 1e-4));
    assert!(approx(ndc.y, -1.0, 1e-4));
}

#[test]
fn zero_viewport_stays_finite() {
    let cam = Camera::new(&CameraConfig::gallery(), Viewport::new(0.0, 0.0));
    assert!(cam.aspect.is_finite() && cam.aspect > 0.0);
    assert!(cam.fovy_radians.is_finite());
    let ray = cam.ray_from_ndc(Vec2::new(0.5, -0.5));
    assert!(ray.origin.is_finite() && ray.dir.is_finite());
}

#[test]
fn centre_ray_points_at_target() {
    let cam = Camera::new(&CameraConfig::playground(), Viewport::new(1000.0, 800.0));
    let ray = cam.ray_from_ndc(Vec2::ZERO);
    let expected = (Vec3::ZERO - cam.eye).normalize();
    assert!(ray.dir.abs_diff_eq(expected, 1e-4));
    assert_eq!(ray.origin, cam.eye);
}
