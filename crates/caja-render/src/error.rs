//! # Render Error Types

use thiserror::Error;

/// A failed document rendering.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RenderError {
    /// The PDF backend failed; message passed through.
    #[error("pdf generation failed: {0}")]
    Pdf(String),
}

/// Convenience alias for render results.
pub type RenderResult<T> = Result<T, RenderError>;
