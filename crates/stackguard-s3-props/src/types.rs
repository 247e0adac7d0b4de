//! Enumerations and flag sets used by [`BucketProps`](crate::BucketProps).

use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Server-side encryption mode for a bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BucketEncryption {
    /// No server-side encryption.
    #[serde(rename = "UNENCRYPTED")]
    Unencrypted,
    /// Encryption with a provider-managed KMS key (`aws/s3`).
    #[serde(rename = "KMS_MANAGED")]
    KmsManaged,
    /// Encryption with S3-managed keys (`AES256`).
    #[serde(rename = "S3_MANAGED")]
    S3Managed,
    /// Encryption with a customer-managed KMS key.
    #[serde(rename = "KMS")]
    Kms,
}

impl BucketEncryption {
    /// Returns the string value of this enum variant.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Unencrypted => "UNENCRYPTED",
            Self::KmsManaged => "KMS_MANAGED",
            Self::S3Managed => "S3_MANAGED",
            Self::Kms => "KMS",
        }
    }

    /// `SSEAlgorithm` value written into the bucket's encryption rule, if any.
    #[must_use]
    pub fn sse_algorithm(&self) -> Option<&'static str> {
        match self {
            Self::Unencrypted => None,
            Self::KmsManaged | Self::Kms => Some("aws:kms"),
            Self::S3Managed => Some("AES256"),
        }
    }
}

impl std::fmt::Display for BucketEncryption {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BucketEncryption {
    type Err = crate::PropsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "UNENCRYPTED" => Ok(Self::Unencrypted),
            "KMS_MANAGED" => Ok(Self::KmsManaged),
            "S3_MANAGED" => Ok(Self::S3Managed),
            "KMS" => Ok(Self::Kms),
            other => Err(crate::PropsError::UnknownEncryption(other.to_owned())),
        }
    }
}

/// Public-access-block flags for a bucket.
///
/// On input a bare boolean is accepted as shorthand: `true` is
/// [`BlockPublicAccess::BLOCK_ALL`], `false` is [`BlockPublicAccess::NONE`].
/// Output is always the four-flag object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "BlockPublicAccessInput")]
#[allow(clippy::struct_excessive_bools)]
pub struct BlockPublicAccess {
    /// Reject PUTs carrying public ACLs.
    pub block_public_acls: bool,
    /// Reject bucket policies granting public access.
    pub block_public_policy: bool,
    /// Ignore public ACLs on the bucket and its objects.
    pub ignore_public_acls: bool,
    /// Restrict access to buckets with public policies.
    pub restrict_public_buckets: bool,
}

impl BlockPublicAccess {
    /// Every public-access path blocked.
    pub const BLOCK_ALL: Self = Self {
        block_public_acls: true,
        block_public_policy: true,
        ignore_public_acls: true,
        restrict_public_buckets: true,
    };

    /// Only ACL-based public access blocked.
    pub const BLOCK_ACLS: Self = Self {
        block_public_acls: true,
        block_public_policy: false,
        ignore_public_acls: true,
        restrict_public_buckets: false,
    };

    /// Nothing blocked.
    pub const NONE: Self = Self {
        block_public_acls: false,
        block_public_policy: false,
        ignore_public_acls: false,
        restrict_public_buckets: false,
    };

    /// Whether all four flags are set.
    #[must_use]
    pub fn is_block_all(&self) -> bool {
        *self == Self::BLOCK_ALL
    }
}

impl From<bool> for BlockPublicAccess {
    fn from(value: bool) -> Self {
        if value { Self::BLOCK_ALL } else { Self::NONE }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum BlockPublicAccessInput {
    Shorthand(bool),
    Flags(BlockPublicAccessFlags),
}

#[derive(Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
#[allow(clippy::struct_excessive_bools)]
struct BlockPublicAccessFlags {
    block_public_acls: bool,
    block_public_policy: bool,
    ignore_public_acls: bool,
    restrict_public_buckets: bool,
}

impl From<BlockPublicAccessInput> for BlockPublicAccess {
    fn from(input: BlockPublicAccessInput) -> Self {
        match input {
            BlockPublicAccessInput::Shorthand(all) => all.into(),
            BlockPublicAccessInput::Flags(f) => Self {
                block_public_acls: f.block_public_acls,
                block_public_policy: f.block_public_policy,
                ignore_public_acls: f.ignore_public_acls,
                restrict_public_buckets: f.restrict_public_buckets,
            },
        }
    }
}
