//! Ready-made stack layouts.

use std::fmt;
use std::str::FromStr;

use stackguard_core::StackEnv;
use stackguard_s3_props::BucketProps;

use crate::bucket::Bucket;
use crate::error::SynthResult;
use crate::function::{BucketToFunction, FunctionProps, Runtime};
use crate::stack::Stack;

/// Construct id of the lone bucket in [`StackKind::Bucket`].
pub const BUCKET_ID: &str = "S3Bucket";

/// Construct id of the wiring construct in [`StackKind::BucketFunction`].
pub const BUCKET_FUNCTION_ID: &str = "ExampleS3Lambda";

/// Which resources a stack contains.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum StackKind {
    /// A single bucket.
    #[default]
    Bucket,
    /// A bucket that notifies a function on object creation.
    BucketFunction,
}

impl StackKind {
    /// Returns the kebab-case name of this layout.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Bucket => "bucket",
            Self::BucketFunction => "bucket-function",
        }
    }

    /// Build a stack of this layout from already-defaulted bucket props.
    pub fn build(&self, name: &str, env: StackEnv, props: &BucketProps) -> SynthResult<Stack> {
        let mut stack = Stack::new(name, env);
        match self {
            Self::Bucket => {
                Bucket::new(&mut stack, BUCKET_ID, props)?;
            }
            Self::BucketFunction => {
                BucketToFunction::new(&mut stack, BUCKET_FUNCTION_ID, &default_function(), props)?;
            }
        }
        Ok(stack)
    }
}

impl fmt::Display for StackKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StackKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "bucket" => Ok(Self::Bucket),
            "bucket-function" => Ok(Self::BucketFunction),
            other => Err(format!(
                "unknown stack kind {other:?} (expected bucket or bucket-function)"
            )),
        }
    }
}

/// The function used by [`StackKind::BucketFunction`].
fn default_function() -> FunctionProps {
    FunctionProps::builder()
        .code_path("src/lambda")
        .runtime(Runtime::Nodejs14x)
        .handler("index.handler")
        .build()
}
