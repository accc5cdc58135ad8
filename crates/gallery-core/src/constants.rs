use glam::Vec3;

// Default tuning shared by the gallery and playground scenes.

// Scroll easing
pub const SCROLL_EASE: f32 = 0.1; // fraction of the remaining distance covered per frame

// Shader clock
pub const TIME_STEP_PER_FRAME: f32 = 0.05; // accumulator step, independent of wall time

// Hover
pub const HOVER_TWEEN_SEC: f32 = 1.0;
pub const HOVER_UV_DEFAULT: [f32; 2] = [0.5, 0.5];

// Scroll speed is forwarded to the post pass unscaled by default
pub const SPEED_UNIFORM_SCALE: f32 = 1.0;

// Readiness
pub const READINESS_TIMEOUT_MS: u64 = 5_000;

// Distortion pass
pub const MASK_EDGE_START: f32 = 1.0; // vertical falloff starts at the top edge
pub const MASK_EDGE_END: f32 = 0.6;
pub const BLEND_EDGE_LOW: f32 = 0.5;
pub const BLEND_EDGE_HIGH: f32 = 0.51;
pub const NOISE_UV_SCALE: f32 = 10.0;
pub const WARP_STRENGTH: f32 = 0.1;
pub const FLAT_COLOR: [f32; 4] = [1.0, 1.0, 1.0, 1.0];

// Gallery camera: planes at z=0 measure one world unit per CSS pixel
pub const GALLERY_CAMERA_Z: f32 = 600.0;
pub const GALLERY_ZNEAR: f32 = 100.0;
pub const GALLERY_ZFAR: f32 = 2000.0;

// Playground camera and layout
pub const PLAYGROUND_EYE: Vec3 = Vec3::new(0.0, 100.0, 100.0);
pub const PLAYGROUND_PIXEL_DISTANCE: f32 = 500.0;
pub const PLAYGROUND_ZNEAR: f32 = 10.0;
pub const PLAYGROUND_ZFAR: f32 = 1000.0;
pub const PLAYGROUND_SPIN_PER_FRAME: f32 = 0.0005;
pub const SHAPE_DISTANCE: f32 = 200.0;
pub const SHAPE_SIZE: f32 = 20.0;

// Playground palette
pub const SHAPE_BASE_COLOR: [f32; 4] = [0.0, 0.0, 0.0, 1.0];
pub const SHAPE_HIGHLIGHT_COLOR: [f32; 4] = [0.0, 0.6, 1.0, 1.0]; // #0099ff
