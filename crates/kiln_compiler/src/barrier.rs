//! Collecting and joining in-flight compiler processes.

use std::fmt;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::process::Child;

/// One compiler process launched for one artifact.
#[derive(Debug)]
pub struct CompileTask {
    child: Child,
    source: PathBuf,
    artifact: PathBuf,
}

impl CompileTask {
    /// Wraps a spawned compiler process.
    pub fn new(child: Child, source: &Path, artifact: &Path) -> Self {
        Self {
            child,
            source: source.to_path_buf(),
            artifact: artifact.to_path_buf(),
        }
    }
}

/// Why a compile did not produce its artifact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureReason {
    /// The compiler exited unsuccessfully; `None` if killed by a signal.
    Exit(Option<i32>),
    /// Waiting on the process failed.
    Wait(String),
}

impl fmt::Display for FailureReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureReason::Exit(Some(code)) => write!(f, "compiler exited with status {code}"),
            FailureReason::Exit(None) => f.write_str("compiler terminated by signal"),
            FailureReason::Wait(msg) => write!(f, "failed to wait for compiler: {msg}"),
        }
    }
}

/// A compile that failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailedCompile {
    /// Source file that was compiled.
    pub source: PathBuf,
    /// Artifact that was not produced.
    pub artifact: PathBuf,
    /// What went wrong.
    pub reason: FailureReason,
}

/// Outcome of joining every task.
#[derive(Debug, Default)]
pub struct JoinReport {
    /// Artifacts that compiled successfully, in launch order.
    pub succeeded: Vec<PathBuf>,
    /// Compiles that failed, in launch order.
    pub failed: Vec<FailedCompile>,
}

impl JoinReport {
    /// Returns `true` if no compile failed.
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Holds every compiler process launched during a walk.
///
/// The barrier is the only place compiles are waited on. It is passed by
/// reference through the walk and joined once at the end.
#[derive(Debug, Default)]
pub struct TaskBarrier {
    tasks: Vec<CompileTask>,
}

impl TaskBarrier {
    /// Creates an empty barrier.
    pub fn new() -> Self {
        Self::default()
    }

    /// Takes ownership of a launched task.
    pub fn push(&mut self, task: CompileTask) {
        self.tasks.push(task);
    }

    /// Number of tasks not yet joined.
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    /// Returns `true` if nothing has been launched.
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Waits for every task in launch order.
    ///
    /// There is no timeout: a hung compiler blocks here. A failed compile's
    /// artifact is removed so that a partially written binary is never
    /// mistaken for a fresh one on the next run.
    pub fn join_all(self) -> JoinReport {
        let mut report = JoinReport::default();
        for mut task in self.tasks {
            let reason = match task.child.wait() {
                Ok(status) if status.success() => {
                    report.succeeded.push(task.artifact);
                    continue;
                }
                Ok(status) => FailureReason::Exit(status.code()),
                Err(e) => FailureReason::Wait(e.to_string()),
            };
            log::warn!(
                "failed to compile {} ({reason})",
                task.artifact.display()
            );
            discard_artifact(&task.artifact);
            report.failed.push(FailedCompile {
                source: task.source,
                artifact: task.artifact,
                reason,
            });
        }
        report
    }
}

fn discard_artifact(artifact: &Path) {
    match std::fs::remove_file(artifact) {
        Ok(()) => log::debug!("removed {}", artifact.display()),
        Err(e) if e.kind() == ErrorKind::NotFound => {}
        Err(e) => log::warn!("could not remove {}: {e}", artifact.display()),
    }
}
