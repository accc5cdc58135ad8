//! Web sources for the readiness barrier: font loads and image decodes.
//!
//! Each completion lands in the shared latches; the engine folds them into
//! its barrier on the next frame.

use crate::constants::{FONT_SIGNAL_PREFIX, IMAGE_SIGNAL_PREFIX};
use gallery_core::{Latches, SignalOutcome};
use js_sys::{Function, Promise, Reflect};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys as web;

pub fn font_signal(family: &str) -> String {
    format!("{}{}", FONT_SIGNAL_PREFIX, family)
}

pub fn image_signal(index: usize) -> String {
    format!("{}{}", IMAGE_SIGNAL_PREFIX, index)
}

/// Every signal the barrier waits on, fonts first.
pub fn signal_names(fonts: &[String], image_count: usize) -> Vec<String> {
    fonts
        .iter()
        .map(|f| font_signal(f))
        .chain((0..image_count).map(image_signal))
        .collect()
}

fn describe(err: &JsValue) -> String {
    err.as_string().unwrap_or_else(|| format!("{:?}", err))
}

// document.fonts.load(`1em "<family>"`)
fn font_load_promise(document: &web::Document, family: &str) -> Result<Promise, JsValue> {
    let fonts = Reflect::get(document, &"fonts".into())?;
    if fonts.is_undefined() {
        return Err("document.fonts unavailable".into());
    }
    let load = Reflect::get(&fonts, &"load".into())?.dyn_into::<Function>()?;
    let spec = format!("1em \"{}\"", family);
    load.call1(&fonts, &spec.into())?.dyn_into::<Promise>()
}

fn settle(latches: Rc<RefCell<Latches>>, signal: String, promise: Result<Promise, JsValue>) {
    spawn_local(async move {
        let outcome = match promise {
            Ok(p) => match JsFuture::from(p).await {
                Ok(_) => SignalOutcome::Resolved,
                Err(e) => SignalOutcome::Failed(describe(&e)),
            },
            Err(e) => SignalOutcome::Failed(describe(&e)),
        };
        log::debug!("[ready] {} -> {:?}", signal, outcome);
        latches.borrow_mut().record_readiness(signal, outcome);
    });
}

pub fn spawn_font_loads(document: &web::Document, fonts: &[String], latches: &Rc<RefCell<Latches>>) {
    for family in fonts {
        settle(latches.clone(), font_signal(family), font_load_promise(document, family));
    }
}

pub fn spawn_image_decodes(images: &[web::HtmlImageElement], latches: &Rc<RefCell<Latches>>) {
    for (i, img) in images.iter().enumerate() {
        settle(latches.clone(), image_signal(i), Ok(img.decode()));
    }
}
