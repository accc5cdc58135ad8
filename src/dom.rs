use crate::constants::{CANVAS_ID, CANVAS_STYLE, CONTAINER_ID, IMAGE_SELECTOR};
use crate::input;
use gallery_core::{BoundingBox, ElementKey, GeometrySource, Viewport};
use wasm_bindgen::JsCast;
use web_sys as web;

#[inline]
pub fn window_document() -> Option<(web::Window, web::Document)> {
    let window = web::window()?;
    let document = window.document()?;
    Some((window, document))
}

pub fn container(document: &web::Document) -> anyhow::Result<web::HtmlElement> {
    document
        .get_element_by_id(CONTAINER_ID)
        .ok_or_else(|| anyhow::anyhow!("missing #{}", CONTAINER_ID))?
        .dyn_into::<web::HtmlElement>()
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))
}

/// Create the render canvas and append it to the container.
pub fn create_canvas(
    document: &web::Document,
    container: &web::HtmlElement,
) -> anyhow::Result<web::HtmlCanvasElement> {
    let canvas: web::HtmlCanvasElement = document
        .create_element("canvas")
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?
        .dyn_into::<web::HtmlCanvasElement>()
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;
    canvas.set_id(CANVAS_ID);
    canvas
        .set_attribute("style", CANVAS_STYLE)
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;
    container
        .append_child(&canvas)
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;
    Ok(canvas)
}

pub fn sync_canvas_backing_size(canvas: &web::HtmlCanvasElement) {
    if let Some(w) = web::window() {
        let rect = canvas.get_bounding_client_rect();
        let (w_px, h_px) = input::backing_size(rect.width(), rect.height(), w.device_pixel_ratio());
        if canvas.width() != w_px || canvas.height() != h_px {
            canvas.set_width(w_px);
            canvas.set_height(h_px);
        }
    }
}

pub fn container_viewport(container: &web::HtmlElement) -> Viewport {
    Viewport::new(container.offset_width() as f32, container.offset_height() as f32)
}

/// Every image on the page, in document order.
pub fn collect_images(document: &web::Document) -> Vec<web::HtmlImageElement> {
    let list = match document.query_selector_all(IMAGE_SELECTOR) {
        Ok(l) => l,
        Err(e) => {
            log::warn!("[dom] image query failed: {:?}", e);
            return Vec::new();
        }
    };
    (0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|n| n.dyn_into::<web::HtmlImageElement>().ok())
        .collect()
}

/// Live layout of the page images. Boxes are document-relative.
pub struct DomGeometry {
    container: web::HtmlElement,
    images: Vec<web::HtmlImageElement>,
}

impl DomGeometry {
    pub fn new(container: web::HtmlElement, images: Vec<web::HtmlImageElement>) -> Self {
        Self { container, images }
    }
}

impl GeometrySource for DomGeometry {
    fn viewport(&self) -> Viewport {
        container_viewport(&self.container)
    }

    fn element_count(&self) -> usize {
        self.images.len()
    }

    fn bounding_box(&self, element: ElementKey) -> Option<BoundingBox> {
        let img = self.images.get(element.0)?;
        if !img.is_connected() {
            return None;
        }
        let scroll_y = web::window().and_then(|w| w.scroll_y().ok()).unwrap_or(0.0);
        let rect = img.get_bounding_client_rect();
        Some(BoundingBox::new(
            (rect.top() + scroll_y) as f32,
            rect.left() as f32,
            rect.width() as f32,
            rect.height() as f32,
        ))
    }
}
