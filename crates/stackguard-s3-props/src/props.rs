//! The sparse bucket property record.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use typed_builder::TypedBuilder;

use crate::types::{BlockPublicAccess, BucketEncryption};

/// Desired properties of a storage bucket.
///
/// Every field is optional. Keys this type does not recognize are kept in
/// [`BucketProps::extra`] and written back out unchanged, so the record can
/// carry properties for the provisioning layer that the defaulter knows
/// nothing about.
///
/// A field set to JSON `null` is treated the same as an absent field.
///
/// # Examples
///
/// ```
/// use stackguard_s3_props::{BucketEncryption, BucketProps};
///
/// let props: BucketProps =
///     serde_json::from_str(r#"{"bucketName":"logs","encryption":"KMS","lifecycle":[]}"#).unwrap();
/// assert_eq!(props.bucket_name.as_deref(), Some("logs"));
/// assert_eq!(props.encryption, Some(BucketEncryption::Kms));
/// assert!(props.extra.contains_key("lifecycle"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TypedBuilder)]
#[serde(rename_all = "camelCase", default)]
pub struct BucketProps {
    /// Server-side encryption mode.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[builder(default, setter(strip_option))]
    pub encryption: Option<BucketEncryption>,

    /// ARN of a customer-managed key, used with [`BucketEncryption::Kms`].
    #[serde(skip_serializing_if = "Option::is_none")]
    #[builder(default, setter(strip_option, into))]
    pub encryption_key: Option<String>,

    /// Whether requests over plain HTTP are denied by bucket policy.
    #[serde(rename = "enforceSSL", skip_serializing_if = "Option::is_none")]
    #[builder(default, setter(strip_option))]
    pub enforce_ssl: Option<bool>,

    /// Public-access-block flags.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[builder(default, setter(strip_option))]
    pub block_public_access: Option<BlockPublicAccess>,

    /// Key prefix for server access logs.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[builder(default, setter(strip_option, into))]
    pub server_access_logs_prefix: Option<String>,

    /// Physical bucket name.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[builder(default, setter(strip_option, into))]
    pub bucket_name: Option<String>,

    /// Whether object versioning is enabled.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[builder(default, setter(strip_option))]
    pub versioned: Option<bool>,

    /// Unrecognized keys, passed through untouched.
    #[serde(flatten)]
    #[builder(default)]
    pub extra: Map<String, Value>,
}

impl BucketProps {
    /// Returns a copy of `self` with every field present in `top` overwritten
    /// by `top`'s value.
    ///
    /// Fields absent from `top` keep `self`'s value. Unrecognized keys are
    /// merged the same way, key by key.
    #[must_use]
    pub fn layered_with(&self, top: &BucketProps) -> BucketProps {
        let mut extra = self.extra.clone();
        for (key, value) in &top.extra {
            extra.insert(key.clone(), value.clone());
        }

        BucketProps {
            encryption: top.encryption.or(self.encryption),
            encryption_key: top
                .encryption_key
                .clone()
                .or_else(|| self.encryption_key.clone()),
            enforce_ssl: top.enforce_ssl.or(self.enforce_ssl),
            block_public_access: top.block_public_access.or(self.block_public_access),
            server_access_logs_prefix: top
                .server_access_logs_prefix
                .clone()
                .or_else(|| self.server_access_logs_prefix.clone()),
            bucket_name: top
                .bucket_name
                .clone()
                .or_else(|| self.bucket_name.clone()),
            versioned: top.versioned.or(self.versioned),
            extra,
        }
    }

    /// Whether no field at all is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}
