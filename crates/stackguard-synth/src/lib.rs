//! Stack constructs, template synthesis, and template assertions.
//!
//! This crate is the provisioning side of StackGuard. It takes a finished
//! [`BucketProps`](stackguard_s3_props::BucketProps) record and turns it
//! into CloudFormation-shaped resources:
//!
//! ```text
//! BucketProps (already defaulted)
//!        |
//!        v
//! Bucket / BucketToFunction constructs
//!        |
//!        v
//!   Stack (logical id -> resource)
//!        |
//!        v
//!   Template (JSON, assertions)
//! ```
//!
//! Nothing here talks to a cloud API. Deploying the template is left to an
//! external toolchain.

pub mod assertions;
pub mod bucket;
pub mod error;
pub mod function;
pub mod logical_id;
pub mod stack;
pub mod stacks;
pub mod template;

pub use assertions::AssertionError;
pub use bucket::Bucket;
pub use error::SynthError;
pub use function::{BucketToFunction, FunctionProps, Runtime};
pub use stack::{ConstructPath, Stack};
pub use stacks::StackKind;
pub use template::{CfnResource, Template};
