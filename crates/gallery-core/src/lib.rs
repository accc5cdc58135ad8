pub mod barrier;
pub mod camera;
pub mod config;
pub mod constants;
pub mod distortion;
pub mod engine;
pub mod error;
pub mod frame;
pub mod geometry;
pub mod picking;
pub mod placement;
pub mod playground;
pub mod scene;
pub mod scroll;
pub mod uniforms;

pub static PLANE_WGSL: &str = include_str!("../shaders/plane.wgsl");
pub static DISTORTION_WGSL: &str = include_str!("../shaders/distortion.wgsl");

pub use barrier::*;
pub use camera::*;
pub use config::*;
pub use engine::*;
pub use error::*;
pub use frame::*;
pub use geometry::*;
pub use picking::*;
pub use placement::*;
pub use scene::*;
pub use scroll::*;
pub use uniforms::*;
