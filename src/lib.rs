#![cfg(target_arch = "wasm32")]
use gallery_core::{FrameLoop, InstantClock, Latches, ReadinessBarrier, SceneEngine, StopHandle};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;

mod constants;
mod dom;
mod events;
mod frame;
mod input;
mod readiness;
mod render;
mod settings;

use settings::SceneMode;

thread_local! {
    static STOP: RefCell<Option<StopHandle>> = const { RefCell::new(None) };
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("gallery-web starting");

    spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("init error: {:?}", e);
        }
    });
    Ok(())
}

/// Halt the render loop after the current frame.
#[wasm_bindgen]
pub fn stop() {
    STOP.with(|s| {
        if let Some(handle) = s.borrow().as_ref() {
            handle.stop();
        }
    });
}

async fn init() -> anyhow::Result<()> {
    let (window, document) = dom::window_document().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let container = dom::container(&document)?;
    let page = settings::read_settings(|name| container.get_attribute(name));
    log::info!("[init] {:?} scene, {} fonts awaited", page.mode, page.fonts.len());

    let images = match page.mode {
        SceneMode::Gallery => dom::collect_images(&document),
        SceneMode::Playground => Vec::new(),
    };

    let canvas = dom::create_canvas(&document, &container)?;
    dom::sync_canvas_backing_size(&canvas);

    let latches = Rc::new(RefCell::new(Latches::new()));
    if let Ok(y) = window.scroll_y() {
        latches.borrow_mut().record_scroll(y as f32);
    }

    let barrier = ReadinessBarrier::new(
        readiness::signal_names(&page.fonts, images.len()),
        page.config.readiness_timeout,
    );
    readiness::spawn_font_loads(&document, &page.fonts, &latches);
    readiness::spawn_image_decodes(&images, &latches);

    let mut engine = SceneEngine::new(page.config, barrier)?;
    if page.mode == SceneMode::Playground {
        engine = engine.with_static_objects(gallery_core::playground::shapes());
    }

    let gpu = match render::GpuState::new(canvas.clone(), images.clone()).await {
        Ok(g) => Some(g),
        Err(e) => {
            log::error!("WebGPU init error: {:?}", e);
            None
        }
    };

    events::wire_scroll(&window, latches.clone());
    events::wire_pointer(&window, container.clone(), latches.clone());
    events::wire_resize(&window, container.clone(), canvas, latches.clone());

    let frame_loop = FrameLoop::new(engine, InstantClock::new());
    let handle = frame_loop.stop_handle();
    STOP.with(|s| *s.borrow_mut() = Some(handle));

    let driver = frame::FrameDriver::new(frame_loop, latches, dom::DomGeometry::new(container, images), gpu);
    frame::start_loop(Rc::new(RefCell::new(driver)));
    Ok(())
}
