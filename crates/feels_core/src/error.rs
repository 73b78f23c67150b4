//! Error types for the feels engine

use thiserror::Error;

use crate::scheduler::WidgetId;

/// Errors surfaced by widget handlers
#[derive(Error, Debug)]
pub enum EngineError {
    /// A consumer callback failed; the original error is carried unchanged
    #[error(transparent)]
    Callback(#[from] anyhow::Error),

    /// The event targeted a widget that is not (or no longer) mounted
    #[error("widget {0:?} is not mounted")]
    NotMounted(WidgetId),
}

impl EngineError {
    /// The consumer's original error, if this came from a callback
    pub fn callback_error(&self) -> Option<&anyhow::Error> {
        match self {
            EngineError::Callback(err) => Some(err),
            EngineError::NotMounted(_) => None,
        }
    }
}

/// Result type for engine operations
pub type Result<T> = std::result::Result<T, EngineError>;
