use crate::config::CameraConfig;
use crate::geometry::Viewport;
use glam::{Mat4, Vec2, Vec3, Vec4};

/// Right-handed perspective camera.
#[derive(Clone, Debug)]
pub struct Camera {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub aspect: f32,
    pub fovy_radians: f32,
    pub znear: f32,
    pub zfar: f32,
    pixel_distance: f32,
}

/// Half-line `origin + t * dir`, `dir` normalised.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub dir: Vec3,
}

impl Ray {
    pub fn new(origin: Vec3, dir: Vec3) -> Self {
        Self {
            origin,
            dir: dir.normalize_or_zero(),
        }
    }

    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.dir * t
    }
}

/// Vertical FOV at which a plane `distance` away spans `viewport_height`
/// world units, i.e. one unit per CSS pixel.
#[inline]
pub fn pixel_perfect_fov(viewport_height: f32, distance: f32) -> f32 {
    2.0 * (viewport_height / 2.0 / distance).atan()
}

impl Camera {
    pub fn new(config: &CameraConfig, viewport: Viewport) -> Self {
        let mut cam = Self {
            eye: config.eye,
            target: config.target,
            up: Vec3::Y,
            aspect: 1.0,
            fovy_radians: std::f32::consts::FRAC_PI_4,
            znear: config.znear,
            zfar: config.zfar,
            pixel_distance: config.pixel_distance,
        };
        cam.fit_viewport(viewport);
        cam
    }

    /// Refit aspect and field of view after the viewport changed.
    pub fn fit_viewport(&mut self, viewport: Viewport) {
        let v = viewport.sanitized();
        self.aspect = v.width / v.height;
        self.fovy_radians = pixel_perfect_fov(v.height, self.pixel_distance);
    }

    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fovy_radians, self.aspect, self.znear, self.zfar)
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    /// Camera orientation without translation; turns quads to face the eye.
    pub fn billboard_rotation(&self) -> Mat4 {
        let view = self.view_matrix();
        let mut inv = view.inverse();
        inv.w_axis = Vec4::new(0.0, 0.0, 0.0, 1.0);
        inv
    }

    /// World-space ray through a normalised device coordinate
    /// (x right, y up, both in `[-1, 1]`).
    pub fn ray_from_ndc(&self, ndc: Vec2) -> Ray {
        let inv = self.view_projection().inverse();
        let p_far = inv * Vec4::new(ndc.x, ndc.y, 1.0, 1.0);
        let far: Vec3 = p_far.truncate() / p_far.w;
        Ray::new(self.eye, far - self.eye)
    }
}
