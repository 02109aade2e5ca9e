//! Error types for the environment adapter.

use thiserror::Error;

use crate::codec::ActionCode;
use crate::core::EngineError;

/// Errors surfaced by [`crate::TetrisEnv`] and its parts.
#[derive(Debug, Error)]
pub enum EnvError {
    /// Action code outside `[0, size)`. Never clamped.
    #[error("action code {code} out of range for a {size}-action space")]
    ActionOutOfRange { code: ActionCode, size: usize },

    /// Declared observation shape disagrees with what the engine reports.
    #[error("{field} shape mismatch: declared {expected:?}, engine reports {actual:?}")]
    ShapeMismatch {
        field: &'static str,
        expected: Vec<usize>,
        actual: Vec<usize>,
    },

    /// Failure raised by the engine, passed through untouched.
    #[error(transparent)]
    Engine(#[from] EngineError),

    /// Asked to render with no sink attached.
    #[error("no render sink attached")]
    NoRenderSink,

    /// Render sink failed to write.
    #[error("render failed")]
    Render(#[source] std::io::Error),
}

/// Unrecognised name for a configuration value
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {kind}: {value:?}")]
pub struct ParseNameError {
    pub kind: &'static str,
    pub value: String,
}
