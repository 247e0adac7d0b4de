//! Synthesis error types.

use stackguard_s3_props::PropsError;

/// Errors raised while building a stack or rendering its template.
#[derive(Debug, thiserror::Error)]
pub enum SynthError {
    /// Two constructs were registered under the same path.
    #[error("there is already a construct with id {path:?} in stack {stack:?}")]
    DuplicateConstruct {
        /// Stack the construct was added to.
        stack: String,
        /// Full construct path.
        path: String,
    },

    /// Two resources resolved to the same logical id.
    #[error("logical id {logical_id} is already used in stack {stack:?}")]
    DuplicateLogicalId {
        /// Stack the resource was added to.
        stack: String,
        /// The colliding logical id.
        logical_id: String,
    },

    /// A construct id was empty or contained a path separator.
    #[error("invalid construct id {id:?}: {reason}")]
    InvalidConstructId {
        /// The rejected id.
        id: String,
        /// Why it was rejected.
        reason: &'static str,
    },

    /// The bucket props failed validation.
    #[error(transparent)]
    InvalidProps(#[from] PropsError),

    /// Template could not be rendered as JSON.
    #[error("failed to render template: {0}")]
    Render(#[from] serde_json::Error),
}

/// Convenience result type for synthesis.
pub type SynthResult<T> = Result<T, SynthError>;
