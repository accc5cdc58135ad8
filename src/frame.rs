use crate::dom::DomGeometry;
use crate::render::GpuState;
use gallery_core::{FrameLoop, FrameReport, InstantClock, Latches, NullCompositor};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Owns everything a `requestAnimationFrame` callback touches.
pub struct FrameDriver {
    frame_loop: FrameLoop<InstantClock>,
    latches: Rc<RefCell<Latches>>,
    geometry: DomGeometry,
    gpu: Option<GpuState>,
    faulted_frames: u64,
}

impl FrameDriver {
    pub fn new(
        frame_loop: FrameLoop<InstantClock>,
        latches: Rc<RefCell<Latches>>,
        geometry: DomGeometry,
        gpu: Option<GpuState>,
    ) -> Self {
        Self {
            frame_loop,
            latches,
            geometry,
            gpu,
            faulted_frames: 0,
        }
    }

    /// Run one frame. `false` once the loop has been stopped.
    pub fn frame(&mut self) -> bool {
        // Handlers run between frames, never during one, so this borrow is
        // never contended.
        let mut latches = self.latches.borrow_mut();
        let report = match self.gpu.as_mut() {
            Some(gpu) => self.frame_loop.step(&mut latches, &self.geometry, gpu),
            None => self.frame_loop.step(&mut latches, &self.geometry, &mut NullCompositor),
        };
        drop(latches);
        match report {
            Some(r) => {
                self.note(&r);
                true
            }
            None => false,
        }
    }

    fn note(&mut self, report: &FrameReport) {
        if report.faults.is_empty() {
            return;
        }
        self.faulted_frames += 1;
        // Engine already logs each fault; summarise sparsely.
        if self.faulted_frames.is_power_of_two() {
            log::warn!(
                "[frame] {} frames with stage faults so far (latest frame {})",
                self.faulted_frames,
                report.frame_index
            );
        }
    }
}

pub fn start_loop(driver: Rc<RefCell<FrameDriver>>) {
    let tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let tick_clone = tick.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        if !driver.borrow_mut().frame() {
            log::info!("[frame] loop stopped");
            return;
        }
        if let Some(w) = web::window() {
            if let Some(cb) = tick_clone.borrow().as_ref() {
                let _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
            }
        }
    }) as Box<dyn FnMut()>));
    if let Some(w) = web::window() {
        if let Some(cb) = tick.borrow().as_ref() {
            let _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
        }
    }
}
