//! The hardened baseline every bucket is merged against.

use crate::props::BucketProps;
use crate::types::{BlockPublicAccess, BucketEncryption};

/// Fixed security defaults for a bucket.
///
/// There is exactly one instance, [`DefaultPolicy::HARDENED`]. It is a
/// `const`, so it is never mutated and can be read from any thread.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DefaultPolicy {
    /// Encryption mode.
    pub encryption: BucketEncryption,
    /// Whether non-TLS requests are denied.
    pub enforce_ssl: bool,
    /// Public-access-block flags.
    pub block_public_access: BlockPublicAccess,
    /// Server access log key prefix.
    pub server_access_logs_prefix: &'static str,
}

impl DefaultPolicy {
    /// The baseline: KMS-managed encryption, TLS enforced, all public
    /// access blocked, access logs under `_accesslogs`.
    pub const HARDENED: Self = Self {
        encryption: BucketEncryption::KmsManaged,
        enforce_ssl: true,
        block_public_access: BlockPublicAccess::BLOCK_ALL,
        server_access_logs_prefix: "_accesslogs",
    };

    /// Serialized names of the fields the baseline sets.
    pub const KEYS: [&'static str; 4] = [
        "encryption",
        "enforceSSL",
        "blockPublicAccess",
        "serverAccessLogsPrefix",
    ];

    /// The baseline as a props record with exactly the four baseline fields set.
    #[must_use]
    pub fn to_props(&self) -> BucketProps {
        BucketProps::builder()
            .encryption(self.encryption)
            .enforce_ssl(self.enforce_ssl)
            .block_public_access(self.block_public_access)
            .server_access_logs_prefix(self.server_access_logs_prefix)
            .build()
    }
}

impl Default for DefaultPolicy {
    fn default() -> Self {
        Self::HARDENED
    }
}
