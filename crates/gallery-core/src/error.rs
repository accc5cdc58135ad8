use thiserror::Error;

/// Rejected tunables in a [`crate::SceneConfig`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("{field} must be finite")]
    NonFinite { field: &'static str },
    #[error("scroll ease must be in (0, 1], got {0}")]
    ScrollEase(f32),
    #[error("{field} must be positive, got {value}")]
    NonPositive { field: &'static str, value: f32 },
    #[error("smoothstep edges for {field} must differ")]
    DegenerateEdges { field: &'static str },
    #[error("camera near plane {near} must be below far plane {far}")]
    DepthRange { near: f32, far: f32 },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BarrierError {
    #[error("unknown readiness signal `{0}`")]
    UnknownSignal(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UniformError {
    #[error("non-finite {0} uniform skipped")]
    NonFinite(&'static str),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RenderError {
    #[error("surface lost or outdated")]
    SurfaceLost,
    #[error("render backend: {0}")]
    Backend(String),
}

/// A per-frame stage that failed without stopping the loop.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StageFault {
    #[error("readiness: {0}")]
    Readiness(#[from] BarrierError),
    #[error("uniform push: {0}")]
    Uniforms(#[from] UniformError),
    #[error("prepare: {0}")]
    Prepare(RenderError),
    #[error("composite: {0}")]
    Composite(RenderError),
}
