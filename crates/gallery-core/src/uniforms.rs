//! Per-frame shader inputs.
//!
//! The pipeline is the only writer of object and post-pass uniforms. Each
//! frame it folds in the latched inputs: hover transitions, the surface
//! coordinate under the pointer, the shader clock and the scroll speed.

use crate::constants::HOVER_UV_DEFAULT;
use crate::error::UniformError;
use crate::picking::{HoverState, HoverTransition};
use crate::scene::ObjectId;
use fnv::FnvHashMap;
use glam::Vec2;

#[inline]
pub fn ease_out_quad(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    1.0 - (1.0 - t) * (1.0 - t)
}

/// Eased interpolation of the hover state toward 0 or 1.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HoverTween {
    from: f32,
    to: f32,
    elapsed: f32,
    duration: f32,
    value: f32,
}

impl HoverTween {
    pub fn new(duration: f32) -> Self {
        Self {
            from: 0.0,
            to: 0.0,
            elapsed: 0.0,
            duration: duration.max(f32::EPSILON),
            value: 0.0,
        }
    }

    pub fn value(&self) -> f32 {
        self.value
    }

    pub fn target(&self) -> f32 {
        self.to
    }

    /// Restart toward `to` from wherever the tween currently is.
    pub fn retarget(&mut self, to: f32) {
        self.from = self.value;
        self.to = to;
        self.elapsed = 0.0;
    }

    pub fn advance(&mut self, dt: f32) -> f32 {
        if dt.is_finite() && dt > 0.0 {
            self.elapsed = (self.elapsed + dt).min(self.duration);
        }
        let k = ease_out_quad(self.elapsed / self.duration);
        self.value = self.from + (self.to - self.from) * k;
        self.value
    }

    pub fn is_settled(&self) -> bool {
        self.elapsed >= self.duration
    }
}

/// Uniform record owned for one scene object.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ObjectUniforms {
    pub time: f32,
    pub hover_uv: Vec2,
    pub hover_state: f32,
    tween: HoverTween,
}

impl ObjectUniforms {
    fn new(hover_duration: f32) -> Self {
        Self {
            time: 0.0,
            hover_uv: Vec2::from(HOVER_UV_DEFAULT),
            hover_state: 0.0,
            tween: HoverTween::new(hover_duration),
        }
    }

    pub fn hover_target(&self) -> f32 {
        self.tween.target()
    }
}

/// Post-pass uniforms; one instance per frame.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct DistortionUniforms {
    pub time: f32,
    pub scroll_speed: f32,
}

/// Inputs folded into the uniforms for one frame.
#[derive(Clone, Copy, Debug)]
pub struct UniformFrame<'a> {
    /// Accumulated shader clock.
    pub elapsed: f32,
    /// Wall seconds since the previous frame, drives hover tweens.
    pub dt: f32,
    pub scroll_speed: f32,
    pub transitions: &'a [HoverTransition],
    pub hover: HoverState,
}

#[derive(Clone, Debug)]
pub struct UniformPipeline {
    objects: FnvHashMap<ObjectId, ObjectUniforms>,
    distortion: DistortionUniforms,
    hover_duration: f32,
    speed_scale: f32,
}

impl UniformPipeline {
    pub fn new(hover_duration: f32, speed_scale: f32) -> Self {
        Self {
            objects: FnvHashMap::default(),
            distortion: DistortionUniforms::default(),
            hover_duration,
            speed_scale,
        }
    }

    pub fn register(&mut self, id: ObjectId) {
        let duration = self.hover_duration;
        self.objects
            .entry(id)
            .or_insert_with(|| ObjectUniforms::new(duration));
    }

    pub fn object(&self, id: ObjectId) -> Option<&ObjectUniforms> {
        self.objects.get(&id)
    }

    pub fn distortion(&self) -> DistortionUniforms {
        self.distortion
    }

    /// Fold one frame of inputs. Every value that can be written is written;
    /// a non-finite one is skipped, keeps its previous value and is reported.
    pub fn push(&mut self, frame: &UniformFrame<'_>) -> Result<(), UniformError> {
        let mut fault = None;

        for tr in frame.transitions {
            let (id, to) = match *tr {
                HoverTransition::Exit(id) => (id, 0.0),
                HoverTransition::Enter(id) => (id, 1.0),
            };
            if let Some(u) = self.objects.get_mut(&id) {
                u.tween.retarget(to);
            }
        }

        if let (Some(id), Some(uv)) = (frame.hover.active, frame.hover.surface_uv) {
            if let Some(u) = self.objects.get_mut(&id) {
                if uv.is_finite() {
                    u.hover_uv = uv;
                } else {
                    fault = Some(UniformError::NonFinite("hover_uv"));
                }
            }
        }

        let elapsed_ok = frame.elapsed.is_finite();
        for u in self.objects.values_mut() {
            u.hover_state = u.tween.advance(frame.dt);
            if elapsed_ok {
                u.time = frame.elapsed;
            }
        }
        if elapsed_ok {
            self.distortion.time = frame.elapsed;
        } else {
            fault = Some(UniformError::NonFinite("time"));
        }

        let speed = frame.scroll_speed * self.speed_scale;
        if speed.is_finite() {
            self.distortion.scroll_speed = speed;
        } else {
            fault = Some(UniformError::NonFinite("scroll_speed"));
        }

        match fault {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}
