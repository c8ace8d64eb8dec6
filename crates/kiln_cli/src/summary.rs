//! End-of-run build summary.

use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::path::PathBuf;

use kiln_compiler::{DispatchOutcome, JoinReport};
use kiln_variant::ShaderCategory;
use serde::Serialize;

/// A compile that did not produce its artifact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FailedArtifact {
    /// The source that was compiled.
    pub source: PathBuf,
    /// The missing artifact.
    pub artifact: PathBuf,
    /// Human-readable reason.
    pub reason: String,
}

/// Counters collected over one walk and the final join.
#[derive(Debug, Default, Serialize)]
pub struct BuildSummary {
    /// Source files seen, by category.
    pub sources: BTreeMap<ShaderCategory, usize>,
    /// Files that are not shaders.
    pub ignored: usize,
    /// Variants whose artifact was up to date.
    pub skipped: usize,
    /// Stale variants listed but not compiled (`--dry-run`).
    pub stale: usize,
    /// Compiler processes launched.
    pub launched: usize,
    /// Launched compiles that succeeded.
    pub succeeded: usize,
    /// Launched compiles that failed.
    pub failed: Vec<FailedArtifact>,
}

impl BuildSummary {
    /// Creates an empty summary.
    pub fn new() -> Self {
        Self::default()
    }

    /// Counts one source file of `category`.
    pub fn record_source(&mut self, category: ShaderCategory) {
        if category.is_shader() {
            *self.sources.entry(category).or_insert(0) += 1;
        } else {
            self.ignored += 1;
        }
    }

    /// Counts one dispatched variant.
    pub fn record_outcome(&mut self, outcome: &DispatchOutcome) {
        match outcome {
            DispatchOutcome::Skipped => self.skipped += 1,
            DispatchOutcome::WouldCompile(_) => self.stale += 1,
            DispatchOutcome::Launched(_) => self.launched += 1,
        }
    }

    /// Folds in the outcome of joining every launched compile.
    pub fn record_join(&mut self, report: &JoinReport) {
        self.succeeded += report.succeeded.len();
        self.failed.extend(report.failed.iter().map(|f| FailedArtifact {
            source: f.source.clone(),
            artifact: f.artifact.clone(),
            reason: f.reason.to_string(),
        }));
    }

    /// Total number of shader sources.
    pub fn source_count(&self) -> usize {
        self.sources.values().sum()
    }

    /// Returns `true` if no compile failed.
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }

    /// Renders the summary for the terminal.
    pub fn render_text(&self) -> String {
        let mut out = String::new();
        for artifact in &self.failed {
            let _ = writeln!(
                out,
                "error: failed to compile {} -> {} ({})",
                artifact.source.display(),
                artifact.artifact.display(),
                artifact.reason
            );
        }

        let categories: Vec<String> = self
            .sources
            .iter()
            .map(|(category, count)| format!("{count} {category}"))
            .collect();
        let breakdown = if categories.is_empty() {
            String::new()
        } else {
            format!(" ({})", categories.join(", "))
        };

        let _ = write!(
            out,
            "    Finished {} source(s){breakdown}: {} compiled, {} failed, {} up to date",
            self.source_count(),
            self.succeeded,
            self.failed.len(),
            self.skipped
        );
        if self.stale > 0 {
            let _ = write!(out, ", {} stale", self.stale);
        }
        out
    }

    /// Renders the summary as pretty-printed JSON.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
