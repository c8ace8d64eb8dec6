//! Launching the external shader compilers.
//!
//! The [`Dispatcher`] turns one stale variant into an asynchronous compiler
//! process and, before returning, synchronously re-runs the compiler in
//! include-listing mode to refresh the artifact's dependency manifest. Every
//! launched process is handed to a [`TaskBarrier`], which the caller joins
//! once the whole tree has been walked.

#![warn(missing_docs)]

pub mod barrier;
pub mod command;
pub mod dispatch;
pub mod error;
pub mod includes;

pub use barrier::{CompileTask, FailedCompile, FailureReason, JoinReport, TaskBarrier};
pub use command::{CompileCommand, CompileSettings, INCLUDE_LISTING_FLAG};
pub use dispatch::{DispatchOutcome, Dispatcher};
pub use error::CompileError;
pub use includes::{parse_include_line, scrape_includes, INCLUDE_NOTE_PREFIX};
