//! Error types for vitrine_scroll

use thiserror::Error;

/// Errors that can occur when setting up scrolling
///
/// Nothing here is fatal to the host: callers are expected to degrade to
/// native (unsmoothed) scrolling and continue.
#[derive(Error, Debug)]
pub enum ScrollError {
    /// The smooth-scroll engine cannot be used (disabled by the host, or
    /// misconfigured)
    #[error("smooth-scroll engine unavailable: {0}")]
    EngineUnavailable(String),

    /// A pinned registration referenced an unknown identifier
    #[error("unknown pin: {0}")]
    UnknownPin(String),
}

/// Result type for vitrine_scroll operations
pub type Result<T> = std::result::Result<T, ScrollError>;
