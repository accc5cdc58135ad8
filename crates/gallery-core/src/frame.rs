//! Frame timing and the input latches shared with event handlers.
//!
//! Event handlers only ever write the latest value into a [`Latches`]; the
//! frame loop takes one snapshot per tick. Handlers and frames run on the same
//! thread, so a handler always completes before the next frame reads.

use crate::barrier::SignalOutcome;
use crate::geometry::Viewport;
use glam::Vec2;
use instant::Instant;
use std::time::Duration;

/// Frame timing snapshot.
#[derive(Debug, Copy, Clone)]
pub struct FrameTime {
    /// Seconds since the previous tick.
    pub dt: f32,
    pub now: Instant,
    pub frame_index: u64,
}

pub trait FrameClock {
    fn tick(&mut self) -> FrameTime;
}

/// Wall clock with clamped delta time, so a backgrounded tab does not
/// resume with a multi-second step.
#[derive(Debug, Clone)]
pub struct InstantClock {
    last: Instant,
    frame_index: u64,
    dt_max: Duration,
}

impl InstantClock {
    pub fn new() -> Self {
        Self {
            last: Instant::now(),
            frame_index: 0,
            dt_max: Duration::from_millis(250),
        }
    }
}

impl Default for InstantClock {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameClock for InstantClock {
    fn tick(&mut self) -> FrameTime {
        let now = Instant::now();
        let dt = if now > self.last {
            now.duration_since(self.last).min(self.dt_max)
        } else {
            Duration::ZERO
        };
        self.last = now;
        let ft = FrameTime {
            dt: dt.as_secs_f32(),
            now,
            frame_index: self.frame_index,
        };
        self.frame_index = self.frame_index.wrapping_add(1);
        ft
    }
}

/// Deterministic clock advancing a fixed step per tick.
#[derive(Debug, Clone)]
pub struct FixedStepClock {
    now: Instant,
    step: Duration,
    frame_index: u64,
}

impl FixedStepClock {
    pub fn new(start: Instant, step: Duration) -> Self {
        Self {
            now: start,
            step,
            frame_index: 0,
        }
    }

    /// 60 Hz starting now.
    pub fn sixty_hz() -> Self {
        Self::new(Instant::now(), Duration::from_micros(16_667))
    }
}

impl FrameClock for FixedStepClock {
    fn tick(&mut self) -> FrameTime {
        let ft = FrameTime {
            dt: self.step.as_secs_f32(),
            now: self.now,
            frame_index: self.frame_index,
        };
        self.now += self.step;
        self.frame_index = self.frame_index.wrapping_add(1);
        ft
    }
}

/// Latest values written by asynchronous event handlers.
#[derive(Debug, Default, Clone)]
pub struct Latches {
    pointer_ndc: Option<Vec2>,
    scroll_target: f32,
    resize: Option<Viewport>,
    readiness: Vec<(String, SignalOutcome)>,
}

/// What one frame reads from the latches.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct FrameInputs {
    pub pointer_ndc: Option<Vec2>,
    pub scroll_target: f32,
    /// Viewport reported since the previous frame, if any.
    pub resized: Option<Viewport>,
    pub readiness: Vec<(String, SignalOutcome)>,
}

impl Latches {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_pointer(&mut self, ndc: Vec2) {
        if ndc.is_finite() {
            self.pointer_ndc = Some(ndc);
        }
    }

    /// Pointer left the page.
    pub fn clear_pointer(&mut self) {
        self.pointer_ndc = None;
    }

    pub fn record_scroll(&mut self, raw_offset: f32) {
        if raw_offset.is_finite() {
            self.scroll_target = raw_offset;
        }
    }

    pub fn record_resize(&mut self, viewport: Viewport) {
        self.resize = Some(viewport);
    }

    pub fn record_readiness(&mut self, signal: impl Into<String>, outcome: SignalOutcome) {
        self.readiness.push((signal.into(), outcome));
    }

    /// Snapshot for one frame. Pointer and scroll persist; resize and
    /// readiness reports are consumed.
    pub fn take(&mut self) -> FrameInputs {
        FrameInputs {
            pointer_ndc: self.pointer_ndc,
            scroll_target: self.scroll_target,
            resized: self.resize.take(),
            readiness: std::mem::take(&mut self.readiness),
        }
    }
}

/// Everything one tick is allowed to read.
#[derive(Debug, Clone)]
pub struct FrameContext {
    pub time: FrameTime,
    pub inputs: FrameInputs,
}
