/// Convenience result type used across eventkit.
pub type EventkitResult<T> = Result<T, EventkitError>;

/// Top-level error taxonomy used by the library APIs.
#[derive(thiserror::Error, Debug)]
pub enum EventkitError {
    /// Invalid or missing user-provided input.
    #[error("validation error: {0}")]
    Validation(String),

    /// No usable font could be resolved or loaded.
    #[error("font error: {0}")]
    Font(String),

    /// Errors while drawing or encoding pixels.
    #[error("render error: {0}")]
    Render(String),

    /// Failures of external processes (`ffprobe`, `ffmpeg`).
    #[error("external tool error: {0}")]
    External(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl EventkitError {
    /// Build a [`EventkitError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`EventkitError::Font`] value.
    pub fn font(msg: impl Into<String>) -> Self {
        Self::Font(msg.into())
    }

    /// Build a [`EventkitError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`EventkitError::External`] value.
    pub fn external(msg: impl Into<String>) -> Self {
        Self::External(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
