//! Optional checks on a completed bucket record.
//!
//! Merging never validates. Callers that want to reject a bad record before
//! synthesis run [`validate_bucket_props`] on the merged output. Naming
//! rules follow the
//! [Amazon S3 documentation](https://docs.aws.amazon.com/AmazonS3/latest/userguide/bucketnamingrules.html).

use std::net::Ipv4Addr;

use crate::error::PropsError;
use crate::props::BucketProps;
use crate::types::BucketEncryption;

/// Minimum bucket name length.
const MIN_BUCKET_NAME_LEN: usize = 3;

/// Maximum bucket name length.
const MAX_BUCKET_NAME_LEN: usize = 63;

/// Maximum object key length in bytes; log prefixes share the limit.
const MAX_PREFIX_BYTES: usize = 1024;

/// Validate every checkable field of `props`.
///
/// # Examples
///
/// ```
/// use stackguard_s3_props::{BucketProps, compute_effective_config, validate_bucket_props};
///
/// let props = compute_effective_config(&BucketProps::builder().bucket_name("logs-01").build(), false);
/// assert!(validate_bucket_props(&props).is_ok());
///
/// let bad = BucketProps::builder().bucket_name("Bad_Name").build();
/// assert!(validate_bucket_props(&bad).is_err());
/// ```
pub fn validate_bucket_props(props: &BucketProps) -> Result<(), PropsError> {
    if let Some(name) = &props.bucket_name {
        validate_bucket_name(name)?;
    }

    if props.encryption_key.is_some() {
        match props.encryption {
            None | Some(BucketEncryption::Kms) => {}
            Some(other) => {
                return Err(PropsError::EncryptionKeyMismatch {
                    encryption: other.to_string(),
                });
            }
        }
    }

    if let Some(prefix) = &props.server_access_logs_prefix {
        validate_access_logs_prefix(prefix)?;
    }

    Ok(())
}

/// Validate an S3 bucket name.
///
/// - 3-63 characters long
/// - Only lowercase letters, numbers, hyphens, and dots
/// - Must start and end with a letter or number
/// - No consecutive dots, not an IPv4 address
/// - Reserved `xn--` / `sthree-` prefixes and `-s3alias` suffix rejected
pub fn validate_bucket_name(name: &str) -> Result<(), PropsError> {
    let invalid = |reason: &str| PropsError::InvalidBucketName {
        name: name.to_owned(),
        reason: reason.to_owned(),
    };
    let len = name.len();

    if !(MIN_BUCKET_NAME_LEN..=MAX_BUCKET_NAME_LEN).contains(&len) {
        return Err(invalid(&format!(
            "must be between {MIN_BUCKET_NAME_LEN} and {MAX_BUCKET_NAME_LEN} characters long"
        )));
    }
    if !name
        .bytes()
        .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'-' || b == b'.')
    {
        return Err(invalid(
            "must only contain lowercase letters, numbers, hyphens, and dots",
        ));
    }

    let is_alnum = |b: u8| b.is_ascii_lowercase() || b.is_ascii_digit();
    if !is_alnum(name.as_bytes()[0]) || !is_alnum(name.as_bytes()[len - 1]) {
        return Err(invalid("must start and end with a letter or number"));
    }
    if name.contains("..") {
        return Err(invalid("must not contain consecutive dots"));
    }
    if name.parse::<Ipv4Addr>().is_ok() {
        return Err(invalid("must not be formatted as an IP address"));
    }
    if name.starts_with("xn--") || name.starts_with("sthree-") {
        return Err(invalid("uses a reserved prefix"));
    }
    if name.ends_with("-s3alias") {
        return Err(invalid("uses the reserved '-s3alias' suffix"));
    }

    Ok(())
}

/// Validate a server access log prefix.
fn validate_access_logs_prefix(prefix: &str) -> Result<(), PropsError> {
    if prefix.len() > MAX_PREFIX_BYTES {
        return Err(PropsError::InvalidAccessLogsPrefix {
            prefix: prefix.to_owned(),
            reason: format!("must be at most {MAX_PREFIX_BYTES} bytes"),
        });
    }
    if prefix.starts_with('/') {
        return Err(PropsError::InvalidAccessLogsPrefix {
            prefix: prefix.to_owned(),
            reason: "must not start with '/'".to_owned(),
        });
    }
    Ok(())
}
