//! Bucket property model and hardened-default merging for StackGuard.
//!
//! A caller describes the bucket it wants with a sparse [`BucketProps`]
//! record. [`compute_effective_config`] layers that record against the
//! fixed [`DefaultPolicy::HARDENED`] baseline and returns the record the
//! synthesis layer consumes.
//!
//! # Precedence
//!
//! ```text
//! override = false:  partial  <-  baseline   (baseline wins)
//! override = true:   baseline <-  partial    (caller wins)
//! ```
//!
//! Fields outside the baseline's key set (`bucketName`, `encryptionKey`,
//! `versioned`, unknown keys) pass through in both directions.
//!
//! # Examples
//!
//! ```
//! use stackguard_s3_props::{BucketProps, compute_effective_config};
//!
//! let partial = BucketProps::builder().enforce_ssl(false).build();
//!
//! let hardened = compute_effective_config(&partial, false);
//! assert_eq!(hardened.enforce_ssl, Some(true));
//!
//! let relaxed = compute_effective_config(&partial, true);
//! assert_eq!(relaxed.enforce_ssl, Some(false));
//! ```

pub mod defaulter;
pub mod error;
pub mod policy;
pub mod props;
pub mod types;
pub mod validation;

pub use defaulter::{Defaulter, MergeStrategy, compute_effective_config, explicit_tls_passthrough};
pub use error::PropsError;
pub use policy::DefaultPolicy;
pub use props::BucketProps;
pub use types::{BlockPublicAccess, BucketEncryption};
pub use validation::validate_bucket_props;
