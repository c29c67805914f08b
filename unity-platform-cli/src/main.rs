//! Unity Platform Converter CLI
//!
//! Command-line interface for converting Unity AssetBundles between
//! build target platforms.

mod logging;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};
use tracing::warn;
use unity_platform::{
    BatchOptions, Converter, DEFAULT_SOURCE_PLATFORM, DEFAULT_TARGET_PLATFORM, OutputPolicy,
    SUPPORTED_UNITY_VERSION, is_valid_identifier, load_registry,
};

#[derive(Parser)]
#[command(name = "unity-platform")]
#[command(about = "Convert Unity AssetBundles between build target platforms")]
#[command(version)]
struct Cli {
    /// YAML file with platform signatures (defaults to the built-in table)
    #[arg(long, global = true)]
    registry: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List known platforms and their signatures
    Platforms,

    /// Show the detected platform and bundle identifier of a file
    Inspect {
        /// Input AssetBundle file
        input: PathBuf,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Convert a single AssetBundle
    Convert {
        /// Input AssetBundle file
        input: PathBuf,

        /// Platform the bundle was built for
        #[arg(long, default_value = DEFAULT_SOURCE_PLATFORM)]
        from: String,

        /// Platform to convert to
        #[arg(long, default_value = DEFAULT_TARGET_PLATFORM)]
        to: String,

        #[command(flatten)]
        output: OutputArgs,

        /// Expected bundle identifier (CAB-...); a mismatch is reported as a warning
        #[arg(long)]
        bundle_id: Option<String>,
    },

    /// Convert a single AssetBundle, detecting its current platform
    DetectConvert {
        /// Input AssetBundle file
        input: PathBuf,

        /// Platform to convert to
        #[arg(long, default_value = DEFAULT_TARGET_PLATFORM)]
        to: String,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Convert every file in a directory in place
    Batch {
        /// Directory containing AssetBundles (not searched recursively)
        dir: PathBuf,

        /// Platform the bundles were built for
        #[arg(long, default_value = DEFAULT_SOURCE_PLATFORM)]
        from: String,

        /// Platform to convert to
        #[arg(long, default_value = DEFAULT_TARGET_PLATFORM)]
        to: String,

        /// Process files in sorted order
        #[arg(long)]
        sorted: bool,

        /// Only convert files with this extension (e.g. unity3d)
        #[arg(long)]
        extension: Option<String>,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
}

#[derive(clap::Args)]
struct OutputArgs {
    /// Overwrite the input file instead of writing <name>_modified.unity3d
    #[arg(long, conflicts_with = "copy_into")]
    in_place: bool,

    /// Write the converted file into this directory under the same name
    #[arg(long)]
    copy_into: Option<PathBuf>,
}

impl OutputArgs {
    fn policy(&self) -> OutputPolicy {
        match (&self.copy_into, self.in_place) {
            (Some(dir), _) => OutputPolicy::CopyInto(dir.clone()),
            (None, true) => OutputPolicy::OverwriteInPlace,
            (None, false) => OutputPolicy::DeriveNewPath,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init_tracing(cli.verbose);

    let registry = load_registry(cli.registry.as_deref()).context("Failed to load platform registry")?;
    let converter = Converter::new(&registry);

    match cli.command {
        Commands::Platforms => platforms_command(&converter),
        Commands::Inspect { input, format } => inspect_command(&converter, &input, format),
        Commands::Convert {
            input,
            from,
            to,
            output,
            bundle_id,
        } => convert_command(&converter, &input, &from, &to, &output.policy(), bundle_id),
        Commands::DetectConvert { input, to, output } => {
            detect_convert_command(&converter, &input, &to, &output.policy())
        }
        Commands::Batch {
            dir,
            from,
            to,
            sorted,
            extension,
            format,
        } => {
            let options = BatchOptions {
                sort: sorted,
                extension,
            };
            batch_command(&converter, &dir, &from, &to, &options, format)
        }
    }
}

fn platforms_command(converter: &Converter) -> Result<()> {
    for platform in converter.registry().iter() {
        println!("{:<24} {}", platform.name, platform.to_hex());
    }
    println!();
    println!(
        "Built-in signatures were taken from Unity {} AssetBundles.",
        SUPPORTED_UNITY_VERSION
    );
    Ok(())
}

fn inspect_command(converter: &Converter, input: &Path, format: OutputFormat) -> Result<()> {
    let inspection = converter
        .inspect(input)
        .with_context(|| format!("Failed to inspect {}", input.display()))?;

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&inspection)?);
        }
        OutputFormat::Text => {
            println!("File:      {}", inspection.path.display());
            println!("Size:      {} bytes", inspection.size);
            println!(
                "Platform:  {}",
                inspection.detected_platform.as_deref().unwrap_or("unknown")
            );
            if inspection.matching_platforms.len() > 1 {
                println!(
                    "           (signatures of {} all occur in the file)",
                    inspection.matching_platforms.join(", ")
                );
            }
            println!(
                "Bundle ID: {}",
                inspection.bundle_identifier.as_deref().unwrap_or("not found")
            );
        }
    }
    Ok(())
}

fn convert_command(
    converter: &Converter,
    input: &Path,
    from: &str,
    to: &str,
    policy: &OutputPolicy,
    bundle_id: Option<String>,
) -> Result<()> {
    if let Some(expected) = bundle_id.as_deref() {
        check_bundle_id(converter, input, expected);
    }

    let result = converter
        .convert_one(input, from, to, policy)
        .context("Invalid platform selection")?;

    if !result.is_success() {
        bail!("{}", result.message);
    }
    println!("{}", result.message);
    Ok(())
}

fn detect_convert_command(
    converter: &Converter,
    input: &Path,
    to: &str,
    policy: &OutputPolicy,
) -> Result<()> {
    let result = converter
        .convert_detected(input, to, policy)
        .context("Invalid platform selection")?;

    if !result.is_success() {
        bail!("{}", result.message);
    }
    println!("{}", result.message);
    Ok(())
}

fn batch_command(
    converter: &Converter,
    dir: &Path,
    from: &str,
    to: &str,
    options: &BatchOptions,
    format: OutputFormat,
) -> Result<()> {
    let summary = converter
        .convert_batch_with(dir, from, to, options)
        .with_context(|| format!("Failed to convert bundles in {}", dir.display()))?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&summary)?),
        OutputFormat::Text => println!("{}", summary),
    }
    Ok(())
}

/// Warn when the bundle identifier given on the command line does not match the file
fn check_bundle_id(converter: &Converter, input: &Path, expected: &str) {
    if !is_valid_identifier(expected) {
        warn!("'{}' is not a valid bundle identifier (CAB- followed by 32 hex characters)", expected);
    }

    // Read failures are reported by the conversion itself
    let Ok(inspection) = converter.inspect(input) else {
        return;
    };
    match inspection.bundle_identifier.as_deref() {
        Some(actual) if actual == expected => {}
        Some(actual) => warn!(
            "Bundle identifier mismatch: expected {}, file contains {}",
            expected, actual
        ),
        None => warn!("No bundle identifier found in {}", input.display()),
    }
}
