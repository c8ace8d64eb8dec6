//! Kiln CLI: incremental shader compilation.
//!
//! `kiln <INPUT_DIR> <OUTPUT_DIR> [INCLUDE_DIRS]...` walks a shader tree,
//! expands every shader into the variants its category needs, and compiles
//! the ones whose artifacts are stale into a mirrored output tree.

#![warn(missing_docs)]

mod build;
mod summary;
mod walk;

use std::path::PathBuf;
use std::process;

use clap::{Parser, ValueEnum};

/// Kiln: compiles a shader tree, rebuilding only what changed.
#[derive(Parser, Debug)]
#[command(name = "kiln", version, about = "Incremental shader compiler driver")]
pub struct Cli {
    /// Root of the shader source tree.
    pub input_dir: PathBuf,

    /// Root of the compiled output tree.
    pub output_dir: PathBuf,

    /// Additional include directories, searched after the input root and its parent.
    pub include_dirs: Vec<PathBuf>,

    /// Suppress all output except errors.
    #[arg(short, long)]
    pub quiet: bool,

    /// Enable verbose (debug-level) output.
    #[arg(short, long)]
    pub verbose: bool,

    /// Path to a `kiln.toml` configuration file (default: `<INPUT_DIR>/kiln.toml`).
    #[arg(long)]
    pub config: Option<String>,

    /// List stale artifacts without compiling anything.
    #[arg(long)]
    pub dry_run: bool,

    /// Output format for the build summary.
    #[arg(short, long, value_enum, default_value_t = ReportFormat::Text)]
    pub format: ReportFormat,
}

/// Build summary output format.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    /// Human-readable terminal output.
    Text,
    /// Machine-readable JSON on stdout.
    Json,
}

fn main() {
    let cli = Cli::parse();
    init_logging(&cli);

    match build::run(&cli) {
        Ok(code) => process::exit(code),
        Err(e) => {
            eprintln!("error: {e}");
            process::exit(1);
        }
    }
}

/// Installs the logger. `RUST_LOG` takes precedence over the CLI flags.
fn init_logging(cli: &Cli) {
    env_logger::Builder::new()
        .filter_level(log_level(cli))
        .format_timestamp(None)
        .parse_default_env()
        .init();
}

fn log_level(cli: &Cli) -> log::LevelFilter {
    if cli.quiet {
        log::LevelFilter::Error
    } else if cli.verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Warn
    }
}
