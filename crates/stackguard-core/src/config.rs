//! Configuration management for StackGuard.
//!
//! Configuration is driven by environment variables. Every setting has a
//! default, so an empty environment yields a usable configuration.

use serde::{Deserialize, Serialize};
use typed_builder::TypedBuilder;

use crate::types::{AccountId, AwsRegion, StackEnv};
use crate::{StackGuardError, StackGuardResult};

/// Workspace-wide configuration.
///
/// # Examples
///
/// ```
/// use stackguard_core::StackGuardConfig;
///
/// let config = StackGuardConfig::default();
/// assert_eq!(config.output_dir, "stackguard.out");
/// assert!(!config.merge_trace);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, TypedBuilder)]
#[serde(rename_all = "camelCase")]
pub struct StackGuardConfig {
    /// Log level filter string (e.g. `"info"`, `"debug"`).
    #[builder(default = String::from("info"))]
    pub log_level: String,

    /// Account stacks are synthesized for.
    #[builder(default)]
    pub default_account: AccountId,

    /// Region stacks are synthesized for.
    #[builder(default)]
    pub default_region: AwsRegion,

    /// Directory synthesized templates are written to.
    #[builder(default = String::from("stackguard.out"))]
    pub output_dir: String,

    /// Whether the merged bucket props are traced before being returned.
    #[builder(default = false)]
    pub merge_trace: bool,
}

impl Default for StackGuardConfig {
    fn default() -> Self {
        Self {
            log_level: String::from("info"),
            default_account: AccountId::default(),
            default_region: AwsRegion::default(),
            output_dir: String::from("stackguard.out"),
            merge_trace: false,
        }
    }
}

impl StackGuardConfig {
    /// Load configuration from environment variables.
    ///
    /// | Variable | Default |
    /// |----------|---------|
    /// | `LOG_LEVEL` | `info` |
    /// | `DEFAULT_ACCOUNT` | `000000000000` |
    /// | `DEFAULT_REGION` | `us-east-1` |
    /// | `OUTPUT_DIR` | `stackguard.out` |
    /// | `MERGE_TRACE` | `false` |
    ///
    /// # Errors
    ///
    /// Returns [`StackGuardError::InvalidAccountId`] if `DEFAULT_ACCOUNT` is
    /// set but not a 12-digit account ID.
    pub fn from_env() -> StackGuardResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub(crate) fn from_lookup<F>(lookup: F) -> StackGuardResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(v) = lookup("LOG_LEVEL") {
            config.log_level = v;
        }
        if let Some(v) = lookup("DEFAULT_ACCOUNT") {
            config.default_account = AccountId::new(v)?;
        }
        if let Some(v) = lookup("DEFAULT_REGION") {
            if v.is_empty() {
                return Err(StackGuardError::Config {
                    key: "DEFAULT_REGION".to_owned(),
                    reason: "must not be empty".to_owned(),
                });
            }
            config.default_region = AwsRegion::new(v);
        }
        if let Some(v) = lookup("OUTPUT_DIR") {
            config.output_dir = v;
        }
        if let Some(v) = lookup("MERGE_TRACE") {
            config.merge_trace = parse_bool(&v);
        }

        tracing::debug!(?config, "loaded configuration");
        Ok(config)
    }

    /// Environment stacks are synthesized for.
    #[must_use]
    pub fn stack_env(&self) -> StackEnv {
        StackEnv::new(self.default_account.clone(), self.default_region.clone())
    }
}

/// Parse a string as a boolean, accepting `"1"` and `"true"` (case-insensitive).
fn parse_bool(value: &str) -> bool {
    value == "1" || value.eq_ignore_ascii_case("true")
}
