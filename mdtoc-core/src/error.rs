//! Typed errors for the core pipeline

use thiserror::Error;

/// Errors raised while turning config values into typed settings.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Unknown TOC style '{0}' (expected 'horizontal' or 'vertical')")]
    UnknownStyle(String),

    #[error("Unknown log level '{0}' (expected 'error', 'warn', 'info' or 'debug')")]
    UnknownLogLevel(String),

    #[error("Marker must not be empty")]
    EmptyMarker,
}

/// Failure while rendering the TOC body.
///
/// Recovered at the document boundary as an empty TOC.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Failed to format TOC entry: {0}")]
    Format(#[from] std::fmt::Error),
}
