//! Error types for the StackGuard core.

/// Core error type for StackGuard infrastructure.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StackGuardError {
    /// Invalid AWS account ID format.
    #[error("invalid AWS account ID: {0} (must be 12-digit numeric string)")]
    InvalidAccountId(String),

    /// A configuration value could not be interpreted.
    #[error("configuration error: {key}: {reason}")]
    Config {
        /// Environment variable or setting name.
        key: String,
        /// What was wrong with it.
        reason: String,
    },
}

/// Convenience result type for StackGuard operations.
pub type StackGuardResult<T> = Result<T, StackGuardError>;
