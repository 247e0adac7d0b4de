//! Merging a partial bucket record with the hardened baseline.

use std::fmt;
use std::str::FromStr;

use crate::policy::DefaultPolicy;
use crate::props::BucketProps;

/// How a partial record and the baseline are combined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MergeStrategy {
    /// Partial first, baseline on top. Baseline values win every conflict.
    #[default]
    DefaultsWin,
    /// Baseline first, partial on top. Caller values win every conflict.
    CallerWins,
    /// Return the partial untouched when it explicitly sets
    /// `enforceSSL: true`; otherwise return the bare baseline, dropping
    /// every caller field.
    ExplicitTlsPassthrough,
}

impl MergeStrategy {
    /// Map the `override` flag onto a layering strategy.
    #[must_use]
    pub fn from_override(override_defaults: bool) -> Self {
        if override_defaults {
            Self::CallerWins
        } else {
            Self::DefaultsWin
        }
    }

    /// Returns the kebab-case name of this strategy.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::DefaultsWin => "defaults-win",
            Self::CallerWins => "caller-wins",
            Self::ExplicitTlsPassthrough => "explicit-tls-passthrough",
        }
    }
}

impl fmt::Display for MergeStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MergeStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "defaults-win" => Ok(Self::DefaultsWin),
            "caller-wins" => Ok(Self::CallerWins),
            "explicit-tls-passthrough" => Ok(Self::ExplicitTlsPassthrough),
            other => Err(format!(
                "unknown merge strategy {other:?} (expected defaults-win, caller-wins or explicit-tls-passthrough)"
            )),
        }
    }
}

/// Applies a [`MergeStrategy`] against [`DefaultPolicy::HARDENED`].
///
/// # Examples
///
/// ```
/// use stackguard_s3_props::{BucketProps, Defaulter, MergeStrategy};
///
/// let defaulter = Defaulter::new(MergeStrategy::CallerWins).with_trace(true);
/// let props = defaulter.apply(&BucketProps::builder().versioned(true).build());
/// assert_eq!(props.versioned, Some(true));
/// assert_eq!(props.enforce_ssl, Some(true));
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Defaulter {
    strategy: MergeStrategy,
    trace: bool,
}

impl Defaulter {
    /// Create a defaulter for the given strategy with tracing off.
    #[must_use]
    pub fn new(strategy: MergeStrategy) -> Self {
        Self {
            strategy,
            trace: false,
        }
    }

    /// Emit the merged record at `debug` level before returning it.
    #[must_use]
    pub fn with_trace(mut self, trace: bool) -> Self {
        self.trace = trace;
        self
    }

    /// The strategy in use.
    #[must_use]
    pub fn strategy(&self) -> MergeStrategy {
        self.strategy
    }

    /// Compute the effective props for `partial`.
    #[must_use]
    pub fn apply(&self, partial: &BucketProps) -> BucketProps {
        let baseline = DefaultPolicy::HARDENED.to_props();

        let merged = match self.strategy {
            MergeStrategy::DefaultsWin => partial.layered_with(&baseline),
            MergeStrategy::CallerWins => baseline.layered_with(partial),
            MergeStrategy::ExplicitTlsPassthrough => {
                if partial.enforce_ssl == Some(true) {
                    partial.clone()
                } else {
                    baseline
                }
            }
        };

        if self.trace {
            tracing::debug!(
                strategy = %self.strategy,
                props = ?merged,
                "computed effective bucket props"
            );
        }

        merged
    }
}

/// Merge `partial` with the hardened baseline.
///
/// With `override_defaults == false` the baseline wins every overlapping
/// field; with `true` the caller does. Fields the baseline does not set are
/// kept either way.
#[must_use]
pub fn compute_effective_config(partial: &BucketProps, override_defaults: bool) -> BucketProps {
    Defaulter::new(MergeStrategy::from_override(override_defaults)).apply(partial)
}

/// Shorthand for [`MergeStrategy::ExplicitTlsPassthrough`].
#[must_use]
pub fn explicit_tls_passthrough(partial: &BucketProps) -> BucketProps {
    Defaulter::new(MergeStrategy::ExplicitTlsPassthrough).apply(partial)
}
