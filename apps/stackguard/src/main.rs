//! StackGuard CLI - synthesize hardened bucket stacks.
//!
//! Reads a partial bucket props record (JSON), merges it with the hardened
//! defaults, and either prints the effective props or synthesizes a stack
//! template from them.
//!
//! # Usage
//!
//! ```text
//! stackguard defaults --props bucket.json --override
//! stackguard synth --stack bucket-function --props bucket.json --write
//! ```
//!
//! # Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `LOG_LEVEL` | `info` | Log level filter |
//! | `RUST_LOG` | *(unset)* | Fine-grained tracing filter (overrides `LOG_LEVEL`) |
//! | `DEFAULT_ACCOUNT` | `000000000000` | Account stacks are synthesized for |
//! | `DEFAULT_REGION` | `us-east-1` | Region stacks are synthesized for |
//! | `OUTPUT_DIR` | `stackguard.out` | Where `--write` puts templates |
//! | `MERGE_TRACE` | `false` | Trace the merged props at `debug` level |

mod commands;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use stackguard_core::StackGuardConfig;
use stackguard_s3_props::MergeStrategy;
use stackguard_synth::StackKind;
use tracing_subscriber::EnvFilter;

/// CLI version.
const VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Debug, Parser)]
#[command(name = "stackguard", version, about = "Synthesize hardened bucket stacks")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

/// Options shared by every command that merges props.
#[derive(Debug, clap::Args)]
struct MergeArgs {
    /// JSON file holding the partial bucket props (default: empty record)
    #[arg(long, short = 'p')]
    props: Option<PathBuf>,

    /// Let caller-supplied values win over the hardened defaults
    #[arg(long = "override", conflicts_with = "strategy")]
    override_defaults: bool,

    /// Merge strategy: defaults-win, caller-wins, explicit-tls-passthrough
    #[arg(long)]
    strategy: Option<MergeStrategy>,

    /// Reject props that break bucket naming or encryption rules
    #[arg(long)]
    validate: bool,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print the effective bucket props as JSON
    Defaults {
        #[command(flatten)]
        merge: MergeArgs,
    },

    /// Synthesize a stack template
    Synth {
        #[command(flatten)]
        merge: MergeArgs,

        /// Stack layout: bucket, bucket-function
        #[arg(long, default_value = "bucket")]
        stack: StackKind,

        /// Stack name
        #[arg(long, default_value = "S3ProjectStack")]
        name: String,

        /// Write `<name>.template.json` into this directory instead of stdout
        #[arg(long = "out")]
        out_dir: Option<PathBuf>,

        /// Write into `OUTPUT_DIR` instead of stdout
        #[arg(long, conflicts_with = "out_dir")]
        write: bool,
    },
}

/// Initialize the tracing subscriber.
///
/// Uses `RUST_LOG` if set, otherwise falls back to the `LOG_LEVEL` config value.
/// Logs go to stderr so stdout stays clean JSON.
fn init_tracing(log_level: &str) -> Result<()> {
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else {
        EnvFilter::try_new(log_level)
            .with_context(|| format!("invalid log level filter: {log_level}"))?
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = StackGuardConfig::from_env().context("failed to load configuration")?;

    init_tracing(&config.log_level)?;
    tracing::debug!(version = VERSION, ?config, "starting stackguard");

    match cli.command {
        Command::Defaults { merge } => {
            let props = commands::effective_props(&config, &merge)?;
            println!("{}", serde_json::to_string_pretty(&props)?);
        }
        Command::Synth {
            merge,
            stack,
            name,
            out_dir,
            write,
        } => {
            let props = commands::effective_props(&config, &merge)?;
            let template = commands::synth(&config, stack, &name, &props)?;

            let dir = out_dir.or_else(|| write.then(|| PathBuf::from(&config.output_dir)));
            match dir {
                Some(dir) => {
                    let path = commands::write_template(&dir, &name, &template)?;
                    tracing::info!(path = %path.display(), "wrote template");
                }
                None => println!("{}", template.to_json_pretty()?),
            }
        }
    }

    Ok(())
}
