//! Recursive traversal of the input tree.

use std::path::{Path, PathBuf};

use kiln_compiler::{DispatchOutcome, Dispatcher, TaskBarrier};
use kiln_variant::{expand, SourceAsset};

use crate::summary::BuildSummary;

/// Everything the walk needs that does not change between files.
pub struct WalkContext<'a> {
    /// Root of the source tree.
    pub input_root: &'a Path,
    /// Root of the mirrored output tree.
    pub output_root: &'a Path,
    /// Suppress progress lines.
    pub quiet: bool,
}

/// The include search path of a run: the input root, its parent, then the
/// configured and command-line directories in order. Duplicates are dropped.
pub fn include_dirs(
    input_root: &Path,
    configured: Vec<PathBuf>,
    extra: Vec<PathBuf>,
) -> Vec<PathBuf> {
    let mut dirs = vec![input_root.to_path_buf()];
    if let Some(parent) = input_root.parent() {
        dirs.push(parent.to_path_buf());
    }
    for dir in configured.into_iter().chain(extra) {
        if !dirs.contains(&dir) {
            dirs.push(dir);
        }
    }
    dirs
}

/// Walks `dir` depth-first in name order, dispatching every variant of
/// every shader it finds.
///
/// Compiles are only launched here; the caller joins `barrier`.
pub fn walk(
    dir: &Path,
    ctx: &WalkContext<'_>,
    dispatcher: &Dispatcher,
    barrier: &mut TaskBarrier,
    summary: &mut BuildSummary,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut entries = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        entries.push(entry?.path());
    }
    entries.sort();

    for path in entries {
        if path.is_dir() {
            walk(&path, ctx, dispatcher, barrier, summary)?;
        } else {
            compile_file(&path, ctx, dispatcher, barrier, summary)?;
        }
    }
    Ok(())
}

fn compile_file(
    path: &Path,
    ctx: &WalkContext<'_>,
    dispatcher: &Dispatcher,
    barrier: &mut TaskBarrier,
    summary: &mut BuildSummary,
) -> Result<(), Box<dyn std::error::Error>> {
    let asset = SourceAsset::new(ctx.input_root, path)?;
    let category = asset.category();
    summary.record_source(category);
    if !category.is_shader() {
        log::debug!("ignoring {}", asset.relative().display());
        return Ok(());
    }

    let variants = expand(&asset, ctx.output_root);
    if !dispatcher.is_dry_run() {
        if let Some(dir) = variants.first().and_then(|v| v.artifact.dir()) {
            std::fs::create_dir_all(dir)?;
        }
    }

    for variant in &variants {
        let outcome = dispatcher.dispatch(asset.path(), variant, barrier)?;
        if !ctx.quiet {
            let artifact = variant
                .artifact
                .path()
                .strip_prefix(ctx.output_root)
                .unwrap_or(variant.artifact.path());
            match &outcome {
                DispatchOutcome::Skipped => {}
                DispatchOutcome::WouldCompile(reason) => {
                    eprintln!("       Stale {} ({reason})", artifact.display());
                }
                DispatchOutcome::Launched(_) => {
                    eprintln!(
                        "   Compiling {} -> {} [{category}]",
                        asset.relative().display(),
                        artifact.display()
                    );
                }
            }
        }
        summary.record_outcome(&outcome);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use kiln_compiler::CompileSettings;
    use kiln_config::{CompileConfig, Toolkit};

    fn dry_run_dispatcher() -> Dispatcher {
        let toolkit = Toolkit {
            slangc: PathBuf::from("/nonexistent/slangc"),
            glslang: PathBuf::from("/nonexistent/glslangValidator"),
        };
        Dispatcher::new(toolkit, CompileSettings::new(&CompileConfig::default(), vec![]))
            .unwrap()
            .with_dry_run(true)
    }

    fn touch(path: &Path) {
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, "").unwrap();
    }

    #[test]
    fn include_dirs_order_and_dedup() {
        let dirs = include_dirs(
            Path::new("/project/shaders"),
            vec![PathBuf::from("/project/third_party")],
            vec![PathBuf::from("/project"), PathBuf::from("/sdk/include")],
        );
        assert_eq!(
            dirs,
            vec![
                PathBuf::from("/project/shaders"),
                PathBuf::from("/project"),
                PathBuf::from("/project/third_party"),
                PathBuf::from("/sdk/include"),
            ]
        );
    }

    #[test]
    fn dry_run_walk_counts_variants_without_creating_directories() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("shaders");
        let output = dir.path().join("build");
        touch(&input.join("materials/brick.slang"));
        touch(&input.join("post/fog.vert"));
        touch(&input.join("post/README.md"));
        touch(&input.join("sky_unified.slang"));

        let ctx = WalkContext {
            input_root: &input,
            output_root: &output,
            quiet: true,
        };
        let mut barrier = TaskBarrier::new();
        let mut summary = BuildSummary::new();
        walk(&input, &ctx, &dry_run_dispatcher(), &mut barrier, &mut summary).unwrap();

        assert!(barrier.is_empty());
        assert_eq!(summary.source_count(), 3);
        assert_eq!(summary.ignored, 1);
        assert_eq!(summary.stale, 20 + 1 + 3);
        assert!(!output.exists());
    }

    #[test]
    fn walk_of_empty_tree_does_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("out");
        let ctx = WalkContext {
            input_root: dir.path(),
            output_root: &output,
            quiet: true,
        };
        let mut barrier = TaskBarrier::new();
        let mut summary = BuildSummary::new();
        walk(dir.path(), &ctx, &dry_run_dispatcher(), &mut barrier, &mut summary).unwrap();
        assert_eq!(summary.source_count(), 0);
        assert_eq!(summary.stale, 0);
    }
}
