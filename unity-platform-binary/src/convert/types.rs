//! Conversion results and batch summaries

use serde::Serialize;
use std::fmt;
use std::path::{Path, PathBuf};

/// Outcome of converting a single bundle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ConversionOutcome {
    /// The signature was replaced and the result written
    Success,
    /// The source platform's signature does not occur in the file
    SignatureNotFound,
    /// The file was not attempted
    Skipped,
    /// Reading or writing the file failed
    IoFailure,
}

impl ConversionOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, ConversionOutcome::Success)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ConversionOutcome::Success => "success",
            ConversionOutcome::SignatureNotFound => "signature not found",
            ConversionOutcome::Skipped => "skipped",
            ConversionOutcome::IoFailure => "I/O failure",
        }
    }
}

impl fmt::Display for ConversionOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of converting one file
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConversionResult {
    /// Source file
    pub path: PathBuf,
    pub outcome: ConversionOutcome,
    /// Human-readable description of the outcome
    pub message: String,
    /// Where the converted bundle was written, on success
    pub output_path: Option<PathBuf>,
}

impl ConversionResult {
    pub fn success<P: Into<PathBuf>>(path: P, output_path: PathBuf) -> Self {
        let message = format!(
            "Platform changed successfully! Modified file saved as: {}",
            output_path.display()
        );
        Self {
            path: path.into(),
            outcome: ConversionOutcome::Success,
            message,
            output_path: Some(output_path),
        }
    }

    pub fn signature_not_found<P: Into<PathBuf>, S: Into<String>>(path: P, message: S) -> Self {
        Self::failed(path, ConversionOutcome::SignatureNotFound, message)
    }

    pub fn skipped<P: Into<PathBuf>, S: Into<String>>(path: P, message: S) -> Self {
        Self::failed(path, ConversionOutcome::Skipped, message)
    }

    pub fn io_failure<P: Into<PathBuf>, S: Into<String>>(path: P, message: S) -> Self {
        Self::failed(path, ConversionOutcome::IoFailure, message)
    }

    fn failed<P: Into<PathBuf>, S: Into<String>>(
        path: P,
        outcome: ConversionOutcome,
        message: S,
    ) -> Self {
        Self {
            path: path.into(),
            outcome,
            message: message.into(),
            output_path: None,
        }
    }

    pub fn is_success(&self) -> bool {
        self.outcome.is_success()
    }

    /// One log line: `<file name>: <message>`
    pub fn log_line(&self) -> String {
        let name = self
            .path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string());
        format!("{}: {}", name, self.message)
    }
}

impl fmt::Display for ConversionResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Per-file results of a batch conversion, in processing order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BatchSummary {
    pub results: Vec<ConversionResult>,
    pub succeeded: usize,
}

impl BatchSummary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a result, counting it if it succeeded
    pub fn push(&mut self, result: ConversionResult) {
        if result.is_success() {
            self.succeeded += 1;
        }
        self.results.push(result);
    }

    /// Number of files enumerated, whatever their outcome
    pub fn processed(&self) -> usize {
        self.results.len()
    }

    /// Files passed over without a conversion attempt
    pub fn skipped(&self) -> usize {
        self.with_outcome(ConversionOutcome::Skipped).count()
    }

    /// Files a conversion was attempted on
    pub fn attempted(&self) -> usize {
        self.processed() - self.skipped()
    }

    pub fn failed(&self) -> usize {
        self.attempted() - self.succeeded
    }

    /// Results with the given outcome
    pub fn with_outcome(&self, outcome: ConversionOutcome) -> impl Iterator<Item = &ConversionResult> {
        self.results.iter().filter(move |r| r.outcome == outcome)
    }

    /// Result for a specific source path
    pub fn result_for(&self, path: &Path) -> Option<&ConversionResult> {
        self.results.iter().find(|r| r.path == path)
    }

    /// One line per processed file
    pub fn messages(&self) -> Vec<String> {
        self.results.iter().map(ConversionResult::log_line).collect()
    }

    /// Aggregate line shown after the per-file messages
    pub fn summary_line(&self) -> String {
        let mut line = format!(
            "Processed {} files, {} succeeded",
            self.processed(),
            self.succeeded
        );
        let skipped = self.skipped();
        if skipped > 0 {
            line.push_str(&format!(", {} skipped", skipped));
        }
        line
    }
}

impl fmt::Display for BatchSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in self.messages() {
            writeln!(f, "{}", line)?;
        }
        write!(f, "{}", self.summary_line())
    }
}
