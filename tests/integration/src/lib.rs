//! End-to-end tests for StackGuard.
//!
//! Each test starts from a partial bucket props record, runs it through the
//! defaulter, synthesizes a stack, and asserts against the template, the
//! same way a deployment pipeline would check a stack before shipping it.
//!
//! Run them with:
//! ```text
//! cargo test -p stackguard-integration
//! ```

use std::sync::Once;

use stackguard_core::StackEnv;
use stackguard_s3_props::{BucketProps, Defaulter, MergeStrategy};
use stackguard_synth::{Bucket, Stack, Template};

static INIT: Once = Once::new();

/// Initialize tracing (once).
fn init_tracing() {
    INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
            )
            .with_test_writer()
            .init();
    });
}

/// Create an empty stack named `MyTestStack` in the default environment.
#[must_use]
pub fn test_stack() -> Stack {
    init_tracing();
    Stack::new("MyTestStack", StackEnv::default())
}

/// Merge `partial` with `strategy` (tracing on) and synthesize a one-bucket
/// stack from the result.
///
/// Returns the template and the bucket's logical id.
#[must_use]
pub fn synth_bucket(partial: &BucketProps, strategy: MergeStrategy) -> (Template, String) {
    let mut stack = test_stack();
    let props = Defaulter::new(strategy).with_trace(true).apply(partial);
    let bucket = Bucket::new(&mut stack, "S3Bucket", &props)
        .unwrap_or_else(|e| panic!("failed to add bucket: {e}"));
    (stack.synth(), bucket.logical_id().to_owned())
}

mod test_bucket_function;
mod test_default_bucket;
mod test_merge_strategies;
