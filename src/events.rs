use crate::dom;
use crate::input;
use gallery_core::Latches;
use glam::Vec2;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

// Handlers only write latches; the frame loop reads them once per tick.

pub fn wire_scroll(window: &web::Window, latches: Rc<RefCell<Latches>>) {
    let w = window.clone();
    let closure = Closure::wrap(Box::new(move || {
        if let Ok(y) = w.scroll_y() {
            latches.borrow_mut().record_scroll(y as f32);
        }
    }) as Box<dyn FnMut()>);
    let _ = window.add_event_listener_with_callback("scroll", closure.as_ref().unchecked_ref());
    closure.forget();
}

pub fn wire_pointer(window: &web::Window, container: web::HtmlElement, latches: Rc<RefCell<Latches>>) {
    {
        let latches = latches.clone();
        let closure = Closure::wrap(Box::new(move |ev: web::PointerEvent| {
            let rect = container.get_bounding_client_rect();
            let ndc = input::client_to_ndc(
                Vec2::new(ev.client_x() as f32, ev.client_y() as f32),
                Vec2::new(rect.left() as f32, rect.top() as f32),
                Vec2::new(rect.width() as f32, rect.height() as f32),
            );
            let mut l = latches.borrow_mut();
            match ndc.filter(|p| input::ndc_inside(*p)) {
                Some(p) => l.record_pointer(p),
                None => l.clear_pointer(),
            }
        }) as Box<dyn FnMut(_)>);
        let _ = window.add_event_listener_with_callback("pointermove", closure.as_ref().unchecked_ref());
        closure.forget();
    }
    // Leaving the page entirely: no related target.
    {
        let closure = Closure::wrap(Box::new(move |ev: web::PointerEvent| {
            if ev.related_target().is_none() {
                latches.borrow_mut().clear_pointer();
            }
        }) as Box<dyn FnMut(_)>);
        let _ = window.add_event_listener_with_callback("pointerout", closure.as_ref().unchecked_ref());
        closure.forget();
    }
}

pub fn wire_resize(
    window: &web::Window,
    container: web::HtmlElement,
    canvas: web::HtmlCanvasElement,
    latches: Rc<RefCell<Latches>>,
) {
    let closure = Closure::wrap(Box::new(move || {
        dom::sync_canvas_backing_size(&canvas);
        latches.borrow_mut().record_resize(dom::container_viewport(&container));
    }) as Box<dyn FnMut()>);
    let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
    closure.forget();
}
