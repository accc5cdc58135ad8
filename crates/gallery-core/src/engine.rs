//! Scene engine and frame loop.
//!
//! The engine starts in `Priming`, waiting on the readiness barrier, and
//! moves to `Running` exactly once. A running tick always executes:
//!
//! 1. apply a latched resize (camera refit, bounding box re-sample)
//! 2. scroll virtualizer tick
//! 3. placement sync (after the scene spin is advanced)
//! 4. pointer picking
//! 5. uniform push
//! 6. one composite call
//!
//! Stage failures are logged and reported in the [`FrameReport`]; they never
//! stop later stages or later frames.

use crate::barrier::{BarrierStatus, ReadinessBarrier, ReadinessReport};
use crate::camera::Camera;
use crate::config::{DistortionParams, SceneConfig};
use crate::error::{ConfigError, RenderError, StageFault};
use crate::frame::{FrameClock, FrameContext, FrameInputs, Latches};
use crate::geometry::{ElementKey, GeometrySource, Viewport};
use crate::picking::{HoverState, PointerPicker, Transitions};
use crate::placement::{place, PlacementSynchronizer};
use crate::scene::{Material, ObjectSpec, PickShape, SceneGraph};
use crate::scroll::{ScrollState, ScrollVirtualizer};
use crate::uniforms::{UniformFrame, UniformPipeline};
use glam::Vec3;
use smallvec::SmallVec;
use std::cell::Cell;
use std::rc::Rc;

/// Everything the renderer may read for one composite call.
pub struct FrameOutput<'a> {
    pub camera: &'a Camera,
    pub scene: &'a SceneGraph,
    pub uniforms: &'a UniformPipeline,
    pub viewport: Viewport,
    pub distortion: &'a DistortionParams,
}

/// Rendering backend seam.
pub trait Compositor {
    /// Called once when the engine enters `Running`, after every object exists.
    fn prepare(&mut self, scene: &SceneGraph) -> Result<(), RenderError>;
    /// The single draw/composite call of a frame.
    fn composite(&mut self, frame: &FrameOutput<'_>) -> Result<(), RenderError>;
}

/// Compositor that draws nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullCompositor;

impl Compositor for NullCompositor {
    fn prepare(&mut self, _scene: &SceneGraph) -> Result<(), RenderError> {
        Ok(())
    }

    fn composite(&mut self, _frame: &FrameOutput<'_>) -> Result<(), RenderError> {
        Ok(())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Stage {
    Resize,
    Scroll,
    Placement,
    Picking,
    Uniforms,
    Composite,
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct FrameReport {
    pub frame_index: u64,
    pub running: bool,
    /// This tick performed the priming → running transition.
    pub entered_running: bool,
    pub stages: SmallVec<[Stage; 6]>,
    pub transitions: Transitions,
    pub faults: SmallVec<[StageFault; 2]>,
    pub composited: bool,
}

#[derive(Debug)]
enum LoopState {
    Priming(ReadinessBarrier),
    Running,
}

pub struct SceneEngine {
    config: SceneConfig,
    state: LoopState,
    scroll: ScrollVirtualizer,
    placement: PlacementSynchronizer,
    scene: SceneGraph,
    camera: Camera,
    picker: PointerPicker,
    uniforms: UniformPipeline,
    viewport: Viewport,
    elapsed: f32,
    static_objects: Vec<ObjectSpec>,
    readiness: Option<ReadinessReport>,
}

impl SceneEngine {
    pub fn new(config: SceneConfig, barrier: ReadinessBarrier) -> Result<Self, ConfigError> {
        config.validate()?;
        let viewport = Viewport::default();
        Ok(Self {
            scroll: ScrollVirtualizer::new(config.scroll_ease),
            placement: PlacementSynchronizer::new(),
            scene: SceneGraph::new(),
            camera: Camera::new(&config.camera, viewport),
            picker: PointerPicker::new(),
            uniforms: UniformPipeline::new(config.hover_duration_sec, config.speed_uniform_scale),
            viewport,
            elapsed: 0.0,
            static_objects: Vec::new(),
            readiness: None,
            state: LoopState::Priming(barrier),
            config,
        })
    }

    /// Objects inserted on entering `Running`, after the tracked elements.
    pub fn with_static_objects(mut self, objects: Vec<ObjectSpec>) -> Self {
        self.static_objects = objects;
        self
    }

    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    pub fn is_running(&self) -> bool {
        matches!(self.state, LoopState::Running)
    }

    pub fn scroll(&self) -> ScrollState {
        self.scroll.state()
    }

    pub fn scene(&self) -> &SceneGraph {
        &self.scene
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn uniforms(&self) -> &UniformPipeline {
        &self.uniforms
    }

    pub fn hover(&self) -> HoverState {
        self.picker.hover()
    }

    pub fn placement(&self) -> &PlacementSynchronizer {
        &self.placement
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Shader clock.
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    /// Outcome of the readiness barrier, once it has resolved.
    pub fn readiness(&self) -> Option<&ReadinessReport> {
        self.readiness.as_ref()
    }

    pub fn tick<G, C>(&mut self, ctx: &FrameContext, geometry: &G, compositor: &mut C) -> FrameReport
    where
        G: GeometrySource + ?Sized,
        C: Compositor + ?Sized,
    {
        let mut report = FrameReport {
            frame_index: ctx.time.frame_index,
            ..FrameReport::default()
        };

        if let LoopState::Priming(barrier) = &mut self.state {
            for (name, outcome) in &ctx.inputs.readiness {
                if let Err(e) = barrier.record(name, outcome.clone()) {
                    log::warn!("[engine] {}", e);
                    report.faults.push(e.into());
                }
            }
            match barrier.poll(ctx.time.now) {
                BarrierStatus::Pending { .. } => return report,
                BarrierStatus::Ready(ready) => {
                    self.enter_running(ready, &ctx.inputs, geometry, compositor, &mut report);
                }
            }
        } else if !ctx.inputs.readiness.is_empty() {
            log::debug!(
                "[engine] ignoring {} readiness reports after start",
                ctx.inputs.readiness.len()
            );
        }

        self.run_frame(ctx, geometry, compositor, &mut report);
        report
    }

    fn enter_running<G, C>(
        &mut self,
        ready: ReadinessReport,
        inputs: &FrameInputs,
        geometry: &G,
        compositor: &mut C,
        report: &mut FrameReport,
    ) where
        G: GeometrySource + ?Sized,
        C: Compositor + ?Sized,
    {
        self.scroll.snap_to(inputs.scroll_target);
        self.viewport = geometry.viewport();
        self.camera.fit_viewport(self.viewport);

        let mut skipped = 0usize;
        for i in 0..geometry.element_count() {
            let key = ElementKey(i);
            let bounds = match geometry.bounding_box(key) {
                Some(b) if !b.is_degenerate() => b,
                _ => {
                    log::warn!("[engine] element {} has no usable box; not tracked", i);
                    skipped += 1;
                    continue;
                }
            };
            let p = place(&bounds, self.viewport, self.scroll.state().rendered);
            let id = self.scene.insert(ObjectSpec {
                label: format!("element-{}", i),
                position: Vec3::new(p.x, p.y, 0.0),
                shape: PickShape::Quad {
                    width: bounds.width,
                    height: bounds.height,
                },
                material: Material::textured(key),
                interactive: true,
            });
            self.placement.track(key, bounds, id);
            self.uniforms.register(id);
        }

        for spec in std::mem::take(&mut self.static_objects) {
            let id = self.scene.insert(spec);
            self.uniforms.register(id);
        }

        if let Err(e) = compositor.prepare(&self.scene) {
            log::error!("[engine] prepare failed: {}", e);
            report.faults.push(StageFault::Prepare(e));
        }

        log::info!(
            "[engine] running: {} objects, {} elements tracked, {} skipped, {} readiness signals skipped{}",
            self.scene.len(),
            self.placement.tracked().len(),
            skipped,
            ready.skipped.len(),
            if ready.timed_out { " (timed out)" } else { "" }
        );
        self.readiness = Some(ready);
        self.state = LoopState::Running;
        report.entered_running = true;
    }

    fn run_frame<G, C>(&mut self, ctx: &FrameContext, geometry: &G, compositor: &mut C, report: &mut FrameReport)
    where
        G: GeometrySource + ?Sized,
        C: Compositor + ?Sized,
    {
        report.running = true;
        let inputs = &ctx.inputs;

        if let Some(vp) = inputs.resized {
            self.viewport = vp;
            self.camera.fit_viewport(vp);
            let refreshed = self.placement.resample(geometry);
            log::debug!(
                "[engine] resize {}x{}: {} of {} boxes re-sampled",
                vp.width,
                vp.height,
                refreshed,
                self.placement.tracked().len()
            );
            report.stages.push(Stage::Resize);
        }

        self.scroll.set_target(inputs.scroll_target);
        let scroll = self.scroll.tick();
        report.stages.push(Stage::Scroll);

        self.scene.advance_spin(self.config.spin_per_frame);
        self.placement.sync(scroll.rendered, self.viewport, &mut self.scene);
        report.stages.push(Stage::Placement);

        let pick = self.picker.resolve(inputs.pointer_ndc, &self.camera, &self.scene);
        report.stages.push(Stage::Picking);

        self.elapsed += self.config.time_step;
        let pushed = self.uniforms.push(&UniformFrame {
            elapsed: self.elapsed,
            dt: ctx.time.dt,
            scroll_speed: scroll.speed,
            transitions: &pick.transitions,
            hover: self.picker.hover(),
        });
        if let Err(e) = pushed {
            log::warn!("[engine] {}", e);
            report.faults.push(e.into());
        }
        report.stages.push(Stage::Uniforms);
        report.transitions = pick.transitions;

        let output = FrameOutput {
            camera: &self.camera,
            scene: &self.scene,
            uniforms: &self.uniforms,
            viewport: self.viewport,
            distortion: &self.config.distortion,
        };
        match compositor.composite(&output) {
            Ok(()) => report.composited = true,
            Err(e) => {
                log::warn!("[engine] composite failed: {}", e);
                report.faults.push(StageFault::Composite(e));
            }
        }
        report.stages.push(Stage::Composite);
    }
}

/// Cancels a [`FrameLoop`] from outside the frame callback.
#[derive(Debug, Default, Clone)]
pub struct StopHandle(Rc<Cell<bool>>);

impl StopHandle {
    pub fn stop(&self) {
        self.0.set(true);
    }

    pub fn is_stopped(&self) -> bool {
        self.0.get()
    }
}

/// Explicit scheduler over a [`SceneEngine`] with an injected clock.
pub struct FrameLoop<K: FrameClock> {
    engine: SceneEngine,
    clock: K,
    stop: StopHandle,
}

impl<K: FrameClock> FrameLoop<K> {
    pub fn new(engine: SceneEngine, clock: K) -> Self {
        Self {
            engine,
            clock,
            stop: StopHandle::default(),
        }
    }

    pub fn stop_handle(&self) -> StopHandle {
        self.stop.clone()
    }

    pub fn engine(&self) -> &SceneEngine {
        &self.engine
    }

    /// Run one frame unless stopped.
    pub fn step<G, C>(&mut self, latches: &mut Latches, geometry: &G, compositor: &mut C) -> Option<FrameReport>
    where
        G: GeometrySource + ?Sized,
        C: Compositor + ?Sized,
    {
        if self.stop.is_stopped() {
            return None;
        }
        let ctx = FrameContext {
            time: self.clock.tick(),
            inputs: latches.take(),
        };
        Some(self.engine.tick(&ctx, geometry, compositor))
    }

    /// Up to `frames` frames; stops early once the handle is triggered.
    pub fn run_for<G, C>(
        &mut self,
        frames: usize,
        latches: &mut Latches,
        geometry: &G,
        compositor: &mut C,
    ) -> Vec<FrameReport>
    where
        G: GeometrySource + ?Sized,
        C: Compositor + ?Sized,
    {
        let mut reports = Vec::with_capacity(frames);
        for _ in 0..frames {
            match self.step(latches, geometry, compositor) {
                Some(r) => reports.push(r),
                None => break,
            }
        }
        reports
    }
}
