//! Core types, configuration, and errors shared across StackGuard crates.
//!
//! This crate holds the pieces every other crate leans on: the deployment
//! environment a stack is synthesized for ([`StackEnv`]), workspace-wide
//! configuration loaded from the environment, and the core error type.

mod config;
mod error;
mod types;

pub use config::StackGuardConfig;
pub use error::{StackGuardError, StackGuardResult};
pub use types::{AccountId, AwsRegion, StackEnv};
