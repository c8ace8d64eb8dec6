//! Per-variant compile dispatch.
//!
//! For each stale variant the dispatcher:
//!
//! 1. spawns the compiler without waiting and hands the process to the
//!    [`TaskBarrier`];
//! 2. re-runs the same command with [`INCLUDE_LISTING_FLAG`], waits for it,
//!    and scrapes its stderr;
//! 3. overwrites the artifact's dependency manifest with what it found.
//!
//! Step 2 blocks the caller, so the manifest always reflects the source tree
//! as it is now, whether or not the background compile later succeeds.

use std::path::{Path, PathBuf};
use std::process::Stdio;

use kiln_cache::{is_stale, StaleReason, Staleness};
use kiln_config::Toolkit;
use kiln_variant::{Backend, Variant};
use tempfile::TempDir;

use crate::barrier::{CompileTask, TaskBarrier};
use crate::command::{CompileCommand, CompileSettings, INCLUDE_LISTING_FLAG};
use crate::error::CompileError;
use crate::includes::scrape_includes;

/// File name the include-listing pass writes its throwaway binary to.
const SCRATCH_OUTPUT: &str = "include-listing.spv";

/// What happened to one variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// The artifact is fresh; nothing was run.
    Skipped,
    /// The artifact is stale but this is a dry run.
    WouldCompile(StaleReason),
    /// A compiler process was launched and handed to the barrier.
    Launched(StaleReason),
}

/// Launches compiles for stale variants.
pub struct Dispatcher {
    toolkit: Toolkit,
    settings: CompileSettings,
    dry_run: bool,
    scratch: TempDir,
}

impl Dispatcher {
    /// Creates a dispatcher. The include-listing pass writes into a private
    /// scratch directory so it never races the real compile for the artifact.
    pub fn new(toolkit: Toolkit, settings: CompileSettings) -> Result<Self, CompileError> {
        let scratch = tempfile::Builder::new()
            .prefix("kiln-")
            .tempdir()
            .map_err(CompileError::Scratch)?;
        Ok(Self {
            toolkit,
            settings,
            dry_run: false,
            scratch,
        })
    }

    /// Only evaluate staleness; never launch anything.
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Returns `true` if nothing is launched or written.
    pub fn is_dry_run(&self) -> bool {
        self.dry_run
    }

    /// Dispatches one variant of `source`.
    pub fn dispatch(
        &self,
        source: &Path,
        variant: &Variant,
        barrier: &mut TaskBarrier,
    ) -> Result<DispatchOutcome, CompileError> {
        let artifact = variant.artifact.path();
        let reason = match is_stale(source, artifact)? {
            Staleness::Fresh => {
                log::debug!("{} is up to date", artifact.display());
                return Ok(DispatchOutcome::Skipped);
            }
            Staleness::Stale(reason) => reason,
        };
        log::debug!("{} is stale: {reason}", artifact.display());

        if self.dry_run {
            return Ok(DispatchOutcome::WouldCompile(reason));
        }

        let command = self.command(source, variant, artifact);
        log::info!("{} {:?}", command.program().display(), command.args());
        let child = command
            .to_command()
            .spawn()
            .map_err(|e| spawn_error(&command, e))?;
        barrier.push(CompileTask::new(child, source, artifact));

        if variant.backend == Backend::Slang {
            self.refresh_manifest(source, variant, artifact)?;
        }

        Ok(DispatchOutcome::Launched(reason))
    }

    fn command(&self, source: &Path, variant: &Variant, output: &Path) -> CompileCommand {
        let descriptor = variant.descriptor;
        match variant.backend {
            Backend::Slang => CompileCommand::slang(
                &self.toolkit.slangc,
                &self.settings,
                source,
                output,
                descriptor.entry_point.unwrap_or("main"),
                descriptor.defines,
            ),
            Backend::Glsl => {
                CompileCommand::glsl(&self.toolkit.glslang, &self.settings, source, output)
            }
        }
    }

    /// Runs the include-listing pass and rewrites the manifest of `artifact`.
    ///
    /// The pass's exit status is irrelevant: a source that fails to compile
    /// still reports the files it reached.
    fn refresh_manifest(
        &self,
        source: &Path,
        variant: &Variant,
        artifact: &Path,
    ) -> Result<(), CompileError> {
        let scratch: PathBuf = self.scratch.path().join(SCRATCH_OUTPUT);
        let mut command = self.command(source, variant, &scratch);
        command.arg(INCLUDE_LISTING_FLAG);

        let output = command
            .to_command()
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .output()
            .map_err(|e| spawn_error(&command, e))?;

        let manifest = scrape_includes(&String::from_utf8_lossy(&output.stderr));
        log::debug!(
            "{} depends on {} file(s)",
            artifact.display(),
            manifest.len()
        );
        manifest.save(artifact)?;
        Ok(())
    }
}

fn spawn_error(command: &CompileCommand, source: std::io::Error) -> CompileError {
    CompileError::Spawn {
        program: command.program().to_path_buf(),
        source,
    }
}
