//! Logging module for proto-linter
//!
//! Provides structured logging of lint runs to a file in JSON Lines format
//! for later analysis.

use crate::models::LintReport;
use serde::{Deserialize, Serialize};
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::Path;

/// A single log entry representing one lint run
#[derive(Debug, Serialize, Deserialize)]
pub struct LintLogEntry {
    /// Unix timestamp of when the lint was run
    pub timestamp: i64,
    /// ISO 8601 formatted date string
    pub datetime: String,
    /// Number of schema documents linted
    pub files_scanned: usize,
    /// Total number of failures reported
    pub total_failures: usize,
    /// Number of rules that aborted with an infrastructure error
    pub error_count: usize,
    /// Individual failures
    pub failures: Vec<FailureLogEntry>,
    /// Run mode (normal, json)
    pub run_mode: String,
    /// Enabled rules for this run
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled_rules: Option<Vec<String>>,
}

/// Log entry for a single failure
#[derive(Debug, Serialize, Deserialize)]
pub struct FailureLogEntry {
    pub lint_id: String,
    pub file_path: String,
    pub line: usize,
    pub column: usize,
    pub message: String,
}

impl LintLogEntry {
    /// Create a new log entry from a lint report
    pub fn from_report(
        report: &LintReport,
        run_mode: &str,
        enabled_rules: Option<Vec<String>>,
    ) -> Self {
        let now = chrono::Utc::now();

        let failures: Vec<FailureLogEntry> = report
            .failures()
            .into_iter()
            .map(|f| FailureLogEntry {
                lint_id: f.lint_id.clone(),
                file_path: f.position.filename.clone(),
                line: f.position.line,
                column: f.position.column,
                message: f.message.clone(),
            })
            .collect();

        Self {
            timestamp: now.timestamp(),
            datetime: now.format("%Y-%m-%dT%H:%M:%SZ").to_string(),
            files_scanned: report.files_scanned,
            total_failures: failures.len(),
            error_count: report.errors().len(),
            failures,
            run_mode: run_mode.to_string(),
            enabled_rules,
        }
    }
}

/// Logger that writes lint runs to a file
pub struct LintLogger {
    writer: BufWriter<File>,
    log_path: String,
}

impl LintLogger {
    /// Create a new logger that writes to the specified file
    /// If the file exists, it will be appended to; otherwise created
    pub fn new(log_path: &str) -> std::io::Result<Self> {
        let path = Path::new(log_path);

        // Create parent directories if they don't exist
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let file = OpenOptions::new().create(true).append(true).open(path)?;

        Ok(Self {
            writer: BufWriter::new(file),
            log_path: log_path.to_string(),
        })
    }

    /// Log a lint run to the file
    pub fn log(&mut self, entry: &LintLogEntry) -> std::io::Result<()> {
        let json = serde_json::to_string(entry)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        writeln!(self.writer, "{}", json)?;
        self.writer.flush()
    }

    /// Get the path of the log file
    pub fn log_path(&self) -> &str {
        &self.log_path
    }
}
