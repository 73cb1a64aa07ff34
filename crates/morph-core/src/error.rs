use thiserror::Error;

/// Failures surfaced at the engine boundary. Nothing inside the per-frame
/// path produces these.
#[derive(Error, Debug)]
pub enum EngineError {
    /// The host could not hand over a drawing context.
    #[error("drawing surface unavailable; frame loop not started")]
    SurfaceUnavailable,

    /// Configuration could not be parsed.
    #[error("invalid engine configuration: {0}")]
    Config(#[from] serde_json::Error),
}
