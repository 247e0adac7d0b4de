//! Errors produced when checking bucket props.
//!
//! Merging never fails; these only come out of [`crate::validation`] and
//! from parsing enum names.

/// Bucket props error type.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PropsError {
    /// The bucket name violates S3 naming rules.
    #[error("invalid bucket name {name:?}: {reason}")]
    InvalidBucketName {
        /// The offending bucket name.
        name: String,
        /// Which naming rule was violated.
        reason: String,
    },

    /// A customer key was supplied with an encryption mode that cannot use it.
    #[error("encryptionKey is specified, so encryption must be KMS (found {encryption})")]
    EncryptionKeyMismatch {
        /// The encryption mode that was set.
        encryption: String,
    },

    /// The access-log prefix cannot be used as an object key prefix.
    #[error("invalid serverAccessLogsPrefix {prefix:?}: {reason}")]
    InvalidAccessLogsPrefix {
        /// The offending prefix.
        prefix: String,
        /// Why it was rejected.
        reason: String,
    },

    /// Encryption name not recognized.
    #[error("unknown bucket encryption: {0}")]
    UnknownEncryption(String),
}
