//! Tunable defaults for both scene variants.
//!
//! The easing constant and the distortion thresholds have no load-bearing
//! meaning; they are defaults that a host page can override.

use crate::constants::*;
use crate::error::ConfigError;
use glam::Vec3;
use std::time::Duration;

/// Perspective camera placement.
///
/// `pixel_distance` is the eye distance at which one world unit spans one
/// CSS pixel; the vertical field of view is derived from it on every resize.
#[derive(Clone, Debug, PartialEq)]
pub struct CameraConfig {
    pub eye: Vec3,
    pub target: Vec3,
    pub pixel_distance: f32,
    pub znear: f32,
    pub zfar: f32,
}

impl CameraConfig {
    pub fn gallery() -> Self {
        Self {
            eye: Vec3::new(0.0, 0.0, GALLERY_CAMERA_Z),
            target: Vec3::ZERO,
            pixel_distance: GALLERY_CAMERA_Z,
            znear: GALLERY_ZNEAR,
            zfar: GALLERY_ZFAR,
        }
    }

    pub fn playground() -> Self {
        Self {
            eye: PLAYGROUND_EYE,
            target: Vec3::ZERO,
            pixel_distance: PLAYGROUND_PIXEL_DISTANCE,
            znear: PLAYGROUND_ZNEAR,
            zfar: PLAYGROUND_ZFAR,
        }
    }
}

/// Parameters of the scroll-driven post-processing distortion.
#[derive(Clone, Debug, PartialEq)]
pub struct DistortionParams {
    pub enabled: bool,
    /// Vertical falloff `smoothstep(mask_start, mask_end, uv.y)`.
    pub mask_start: f32,
    pub mask_end: f32,
    /// Blend `smoothstep(blend_low, blend_high, noise + mask)`.
    pub blend_low: f32,
    pub blend_high: f32,
    pub noise_scale: f32,
    pub warp_strength: f32,
    pub flat_color: [f32; 4],
}

impl Default for DistortionParams {
    fn default() -> Self {
        Self {
            enabled: true,
            mask_start: MASK_EDGE_START,
            mask_end: MASK_EDGE_END,
            blend_low: BLEND_EDGE_LOW,
            blend_high: BLEND_EDGE_HIGH,
            noise_scale: NOISE_UV_SCALE,
            warp_strength: WARP_STRENGTH,
            flat_color: FLAT_COLOR,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct SceneConfig {
    pub scroll_ease: f32,
    pub time_step: f32,
    pub hover_duration_sec: f32,
    pub speed_uniform_scale: f32,
    pub spin_per_frame: f32,
    /// `None` waits on the readiness barrier forever.
    pub readiness_timeout: Option<Duration>,
    pub camera: CameraConfig,
    pub distortion: DistortionParams,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self::gallery()
    }
}

impl SceneConfig {
    pub fn gallery() -> Self {
        Self {
            scroll_ease: SCROLL_EASE,
            time_step: TIME_STEP_PER_FRAME,
            hover_duration_sec: HOVER_TWEEN_SEC,
            speed_uniform_scale: SPEED_UNIFORM_SCALE,
            spin_per_frame: 0.0,
            readiness_timeout: Some(Duration::from_millis(READINESS_TIMEOUT_MS)),
            camera: CameraConfig::gallery(),
            distortion: DistortionParams::default(),
        }
    }

    /// Shape playground: no DOM tracking, spinning scene, plain render.
    pub fn playground() -> Self {
        Self {
            spin_per_frame: PLAYGROUND_SPIN_PER_FRAME,
            camera: CameraConfig::playground(),
            distortion: DistortionParams {
                enabled: false,
                ..DistortionParams::default()
            },
            ..Self::gallery()
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let finite = [
            ("scroll_ease", self.scroll_ease),
            ("time_step", self.time_step),
            ("hover_duration_sec", self.hover_duration_sec),
            ("speed_uniform_scale", self.speed_uniform_scale),
            ("spin_per_frame", self.spin_per_frame),
            ("camera.pixel_distance", self.camera.pixel_distance),
            ("camera.znear", self.camera.znear),
            ("camera.zfar", self.camera.zfar),
            ("distortion.mask_start", self.distortion.mask_start),
            ("distortion.mask_end", self.distortion.mask_end),
            ("distortion.blend_low", self.distortion.blend_low),
            ("distortion.blend_high", self.distortion.blend_high),
            ("distortion.noise_scale", self.distortion.noise_scale),
            ("distortion.warp_strength", self.distortion.warp_strength),
        ];
        for (field, value) in finite {
            if !value.is_finite() {
                return Err(ConfigError::NonFinite { field });
            }
        }
        if !self.camera.eye.is_finite() || !self.camera.target.is_finite() {
            return Err(ConfigError::NonFinite { field: "camera.eye" });
        }
        if !(self.scroll_ease > 0.0 && self.scroll_ease <= 1.0) {
            return Err(ConfigError::ScrollEase(self.scroll_ease));
        }
        for (field, value) in [
            ("time_step", self.time_step),
            ("hover_duration_sec", self.hover_duration_sec),
            ("camera.pixel_distance", self.camera.pixel_distance),
            ("camera.znear", self.camera.znear),
        ] {
            if value <= 0.0 {
                return Err(ConfigError::NonPositive { field, value });
            }
        }
        if self.camera.znear >= self.camera.zfar {
            return Err(ConfigError::DepthRange {
                near: self.camera.znear,
                far: self.camera.zfar,
            });
        }
        if self.distortion.mask_start == self.distortion.mask_end {
            return Err(ConfigError::DegenerateEdges { field: "distortion.mask" });
        }
        if self.distortion.blend_low == self.distortion.blend_high {
            return Err(ConfigError::DegenerateEdges { field: "distortion.blend" });
        }
        Ok(())
    }
}
