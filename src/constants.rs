// Page hooks and renderer defaults for the web front-end.
// Kept free of web and GPU types so host tests can include it.

// Element that hosts the canvas and carries the `data-*` settings
pub const CONTAINER_ID: &str = "container";
pub const CANVAS_ID: &str = "gallery-canvas";

// Elements lifted into the gallery scene
pub const IMAGE_SELECTOR: &str = "img";

// Web fonts awaited before element boxes are sampled (text reflows on load)
pub const DEFAULT_FONTS: &[&str] = &["Open Sans", "Playfair Display"];

// Readiness signal name prefixes
pub const FONT_SIGNAL_PREFIX: &str = "font:";
pub const IMAGE_SIGNAL_PREFIX: &str = "image:";

// Canvas overlay style; the page keeps scrolling underneath
pub const CANVAS_STYLE: &str =
    "position:fixed;top:0;left:0;width:100%;height:100%;pointer-events:none;";

// Offscreen scene clear colour (RGBA, premultiplied transparent)
pub const SCENE_CLEAR_RGBA: [f64; 4] = [0.0, 0.0, 0.0, 0.0];
