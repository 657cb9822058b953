//! Vlprep: data preparation utilities for vision-language model fine-tuning.
//!
//! Vlprep keeps spatial annotations consistent when training images are
//! resized: it rewrites `point_2d`/`bbox_2d` JSON fragments embedded in
//! conversation text, computes patch-aligned resize dimensions, resolves
//! symbolic dataset names to annotation paths, and converts pointing-format
//! datasets into the standardized conversation format.
//!
//! # Modules
//!
//! - [`coord`]: coordinate types, resize calculator, and text rewriting
//! - [`registry`]: static dataset name registry with sampling-rate suffixes
//! - [`convert`]: pointing-dataset batch conversion
//! - [`error`]: error types for vlprep operations

pub mod convert;
pub mod coord;
pub mod error;
pub mod registry;

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};

pub use error::VlprepError;

/// The vlprep CLI application.
#[derive(Parser)]
#[command(name = "vlprep")]
#[command(version, author, about)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Convert a pointing dataset to the standardized conversation format.
    ConvertPointing(ConvertPointingArgs),

    /// Resolve dataset names against the built-in registry.
    Resolve(ResolveArgs),
}

/// Arguments for the convert-pointing subcommand.
#[derive(clap::Args)]
struct ConvertPointingArgs {
    /// Input file (.json array or .jsonl newline-delimited).
    input: PathBuf,

    /// Output file (.json).
    output: PathBuf,

    /// Drop items whose assistant turn marks the object as absent.
    #[arg(long, default_value_t = true, action = ArgAction::Set)]
    skip_absent: bool,

    /// Write records that failed conversion to this file.
    #[arg(long)]
    save_malformed: Option<PathBuf>,
}

/// Arguments for the resolve subcommand.
#[derive(clap::Args)]
struct ResolveArgs {
    /// Dataset names, each optionally suffixed with %N (e.g. cambrian_737k%50).
    #[arg(required = true)]
    names: Vec<String>,
}

/// Run the vlprep CLI.
///
/// This is the main entry point for the CLI, called from `main.rs`.
pub fn run() -> Result<(), VlprepError> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::ConvertPointing(args)) => run_convert_pointing(args),
        Some(Commands::Resolve(args)) => run_resolve(args),
        None => {
            println!("vlprep {}", env!("CARGO_PKG_VERSION"));
            println!();
            println!("Data preparation utilities for vision-language model fine-tuning.");
            println!();
            println!("Run 'vlprep --help' for usage information.");
            Ok(())
        }
    }
}

/// Execute the convert-pointing subcommand.
fn run_convert_pointing(args: ConvertPointingArgs) -> Result<(), VlprepError> {
    let items = convert::read_records(&args.input)?;
    println!(
        "Loaded {} record(s) from {}",
        items.len(),
        args.input.display()
    );

    let options = convert::ConvertOptions {
        skip_absent: args.skip_absent,
    };
    let outcome = convert::convert_records(&items, &options);

    convert::write_records(&args.output, &outcome.converted)?;

    println!("Converted {} record(s)", outcome.converted.len());
    println!("Skipped {} record(s)", outcome.skipped);
    println!("Output written to {}", args.output.display());

    if let Some(malformed_path) = &args.save_malformed {
        if !outcome.malformed.is_empty() {
            convert::write_raw_records(malformed_path, &outcome.malformed)?;
            println!(
                "Saved {} malformed record(s) to {}",
                outcome.malformed.len(),
                malformed_path.display()
            );
        }
    }

    Ok(())
}

/// Execute the resolve subcommand.
fn run_resolve(args: ResolveArgs) -> Result<(), VlprepError> {
    let configs = registry::resolve(&args.names)?;

    for (name, config) in args.names.iter().zip(&configs) {
        println!("{name}:");
        println!("  annotation_path: {}", config.annotation_path);
        println!("  data_path: {}", config.data_path);
        println!("  sampling_rate: {}", config.sampling_rate);
    }

    Ok(())
}
