// Fatal configuration errors

use thiserror::Error;

/// Raised for mistakes in how rules or the host's conversion layer were set
/// up. These abort the build immediately; they are never aggregated into the
/// report the way validation failures are.
#[derive(Debug, Error)]
pub enum BuildError {
    /// A rule declared a configuration field whose name collides with one of
    /// the error record's fixed fields.
    #[error("`{0}` is a reserved name and cannot be used as a rule configuration field")]
    ReservedFieldName(String),

    /// A model-state entry carried zero or several underlying errors where
    /// exactly one conversion failure was expected.
    #[error("model state entry `{key}` must carry exactly one conversion error, found {count}")]
    ConversionErrorCount { key: String, count: usize },

    /// A conversion failure message did not follow
    /// `Could not convert <source> to <target>`.
    #[error("conversion error message has an unexpected format: {0}")]
    ConversionErrorFormat(String),
}
