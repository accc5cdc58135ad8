//! Virtual (eased) scroll.
//!
//! The raw page scroll is noisy and jumps per event; the virtualizer chases it
//! with a fixed per-frame lerp and exposes the resulting one-frame delta as the
//! scroll speed.

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ScrollState {
    /// Latest raw page scroll offset.
    pub raw_target: f32,
    /// Eased offset used for placement.
    pub rendered: f32,
    /// `rendered` delta produced by the most recent tick.
    pub speed: f32,
}

#[derive(Clone, Debug)]
pub struct ScrollVirtualizer {
    state: ScrollState,
    ease: f32,
}

impl ScrollVirtualizer {
    /// `ease` is clamped into `(0, 1]`; at 1 the virtual scroll follows the
    /// raw scroll with no smoothing.
    pub fn new(ease: f32) -> Self {
        let ease = if ease.is_finite() {
            ease.clamp(f32::EPSILON, 1.0)
        } else {
            1.0
        };
        Self {
            state: ScrollState::default(),
            ease,
        }
    }

    pub fn ease(&self) -> f32 {
        self.ease
    }

    pub fn state(&self) -> ScrollState {
        self.state
    }

    /// Non-finite targets are ignored so `rendered` always stays finite.
    pub fn set_target(&mut self, raw: f32) {
        if raw.is_finite() {
            self.state.raw_target = raw;
        }
    }

    /// Jump straight to `raw` with zero speed.
    pub fn snap_to(&mut self, raw: f32) {
        self.set_target(raw);
        self.state.rendered = self.state.raw_target;
        self.state.speed = 0.0;
    }

    /// Advance one frame.
    pub fn tick(&mut self) -> ScrollState {
        let previous = self.state.rendered;
        let next = previous + (self.state.raw_target - previous) * self.ease;
        self.state.rendered = next;
        self.state.speed = next - previous;
        self.state
    }
}

impl Default for ScrollVirtualizer {
    fn default() -> Self {
        Self::new(crate::constants::SCROLL_EASE)
    }
}
