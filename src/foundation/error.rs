/// Convenience result type used across hemicycle.
pub type HemicycleResult<T> = Result<T, HemicycleError>;

/// Top-level error taxonomy used by engine APIs.
#[derive(thiserror::Error, Debug)]
pub enum HemicycleError {
    /// Invalid user-provided dataset (dates, colors, empty names).
    #[error("validation error: {0}")]
    Validation(String),

    /// Invalid layout parameters.
    #[error("layout error: {0}")]
    Layout(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl HemicycleError {
    /// Build a [`HemicycleError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`HemicycleError::Layout`] value.
    pub fn layout(msg: impl Into<String>) -> Self {
        Self::Layout(msg.into())
    }

    /// Build a [`HemicycleError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
