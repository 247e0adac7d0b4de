//! Command implementations, kept free of argument parsing and printing.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use stackguard_core::StackGuardConfig;
use stackguard_s3_props::{BucketProps, Defaulter, MergeStrategy, validate_bucket_props};
use stackguard_synth::{StackKind, Template};

use crate::MergeArgs;

/// Read the partial props record, or an empty one when no file is given.
pub(crate) fn load_props(path: Option<&Path>) -> Result<BucketProps> {
    let Some(path) = path else {
        return Ok(BucketProps::default());
    };

    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read props file {}", path.display()))?;
    serde_json::from_str(&raw)
        .with_context(|| format!("invalid bucket props in {}", path.display()))
}

/// Load, merge, and optionally validate the props described by `args`.
pub(crate) fn effective_props(config: &StackGuardConfig, args: &MergeArgs) -> Result<BucketProps> {
    let partial = load_props(args.props.as_deref())?;

    let strategy = args
        .strategy
        .unwrap_or_else(|| MergeStrategy::from_override(args.override_defaults));
    let props = Defaulter::new(strategy)
        .with_trace(config.merge_trace)
        .apply(&partial);

    if args.validate {
        validate_bucket_props(&props).context("effective bucket props are invalid")?;
    }

    tracing::info!(%strategy, validated = args.validate, "computed effective bucket props");
    Ok(props)
}

/// Synthesize a stack of `kind` for the configured environment.
pub(crate) fn synth(
    config: &StackGuardConfig,
    kind: StackKind,
    name: &str,
    props: &BucketProps,
) -> Result<Template> {
    let stack = kind
        .build(name, config.stack_env(), props)
        .with_context(|| format!("failed to build {kind} stack {name:?}"))?;
    Ok(stack.synth())
}

/// Maximum CloudFormation stack name length.
const MAX_STACK_NAME_LEN: usize = 128;

/// Check `name` against CloudFormation stack naming rules: a letter
/// followed by letters, digits, or hyphens. This also keeps the template
/// file inside the output directory.
fn validate_stack_name(name: &str) -> Result<()> {
    let mut chars = name.chars();
    let starts_with_letter = chars.next().is_some_and(|c| c.is_ascii_alphabetic());
    if !starts_with_letter
        || name.len() > MAX_STACK_NAME_LEN
        || !chars.all(|c| c.is_ascii_alphanumeric() || c == '-')
    {
        bail!(
            "invalid stack name {name:?}: must start with a letter, contain only letters, digits, and hyphens, and be at most {MAX_STACK_NAME_LEN} characters"
        );
    }
    Ok(())
}

/// Write `<name>.template.json` into `dir`, creating it if needed.
pub(crate) fn write_template(dir: &Path, name: &str, template: &Template) -> Result<PathBuf> {
    validate_stack_name(name)?;
    fs::create_dir_all(dir)
        .with_context(|| format!("failed to create output directory {}", dir.display()))?;

    let path = dir.join(format!("{name}.template.json"));
    fs::write(&path, template.to_json_pretty()?)
        .with_context(|| format!("failed to write {}", path.display()))?;
    Ok(path)
}
