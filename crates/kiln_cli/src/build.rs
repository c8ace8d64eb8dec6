//! The build pipeline behind the `kiln` command.
//!
//! 1. Load `kiln.toml` (from `--config` or the input root), if any
//! 2. Locate the shader compilers
//! 3. Compute the include search path
//! 4. Walk the input tree, launching compiles for stale variants
//! 5. Join every launched compile
//! 6. Report the summary

use std::path::{Path, PathBuf};

use kiln_compiler::{CompileSettings, Dispatcher, TaskBarrier};
use kiln_config::{KilnConfig, Toolkit};

use crate::summary::BuildSummary;
use crate::walk::{include_dirs, walk, WalkContext};
use crate::{Cli, ReportFormat};

/// Runs a build. Returns exit code 0 if every compile succeeded, 1 otherwise.
pub fn run(cli: &Cli) -> Result<i32, Box<dyn std::error::Error>> {
    if !cli.input_dir.is_dir() {
        return Err(format!("input directory {} does not exist", cli.input_dir.display()).into());
    }
    let input_root = std::fs::canonicalize(&cli.input_dir)?;
    let output_root = resolve_output_root(&cli.output_dir, cli.dry_run)?;

    let (config, config_dir) = load_config(cli, &input_root)?;
    let toolkit = Toolkit::discover(&config.toolkit)?;

    let includes = include_dirs(
        &input_root,
        config.include_dirs(&config_dir),
        cli.include_dirs.clone(),
    );
    log::debug!("include search path: {includes:?}");

    let dispatcher = Dispatcher::new(toolkit, CompileSettings::new(&config.compile, includes))?
        .with_dry_run(cli.dry_run);

    if !cli.quiet {
        eprintln!(
            "   Building shaders from {} into {}",
            input_root.display(),
            output_root.display()
        );
    }

    let ctx = WalkContext {
        input_root: &input_root,
        output_root: &output_root,
        quiet: cli.quiet,
    };
    let mut barrier = TaskBarrier::new();
    let mut summary = BuildSummary::new();
    let walked = walk(&input_root, &ctx, &dispatcher, &mut barrier, &mut summary);

    // Compiles already launched are joined even if the walk was cut short.
    let report = barrier.join_all();
    summary.record_join(&report);
    walked?;

    match cli.format {
        ReportFormat::Text => {
            if !cli.quiet || !summary.is_success() {
                eprintln!("{}", summary.render_text());
            }
        }
        ReportFormat::Json => println!("{}", summary.to_json()?),
    }

    Ok(if summary.is_success() { 0 } else { 1 })
}

/// Resolves the output root to an absolute path, creating it unless this is
/// a dry run.
fn resolve_output_root(dir: &Path, dry_run: bool) -> std::io::Result<PathBuf> {
    if !dry_run {
        std::fs::create_dir_all(dir)?;
    }
    if dir.exists() {
        std::fs::canonicalize(dir)
    } else {
        Ok(std::env::current_dir()?.join(dir))
    }
}

/// Loads the configuration and returns it with the directory its relative
/// paths resolve against.
fn load_config(
    cli: &Cli,
    input_root: &Path,
) -> Result<(KilnConfig, PathBuf), Box<dyn std::error::Error>> {
    let path = match &cli.config {
        Some(path) => Some(PathBuf::from(path)),
        None => kiln_config::find_config(input_root),
    };
    match path {
        Some(path) => {
            let config = kiln_config::load_config(&path)?;
            let dir = path
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .map(Path::to_path_buf)
                .unwrap_or_else(|| PathBuf::from("."));
            Ok((config, dir))
        }
        None => Ok((KilnConfig::default(), input_root.to_path_buf())),
    }
}
