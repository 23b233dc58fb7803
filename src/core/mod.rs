pub mod errors;

use crate::ast::Range;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const ERROR_IGNORED_MESSAGE: &str = "The error is being ignored.";

pub const ERROR_IGNORED_DETAILS: &str = "Please check whether the error can't be used to improve the situation for the user. You can for instance display the error message to the user or re-attempt the operation.";

/// One diagnostic produced by a rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Finding {
    pub range: Range,
    pub message: String,
    pub details: Vec<String>,
}

impl Finding {
    /// A wildcard match on `Err` that drops the error value.
    pub fn error_ignored(range: Range) -> Self {
        Self {
            range,
            message: ERROR_IGNORED_MESSAGE.to_string(),
            details: vec![ERROR_IGNORED_DETAILS.to_string()],
        }
    }
}

/// A finding attached to the file it was reported in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileFinding {
    pub file: PathBuf,
    #[serde(flatten)]
    pub finding: Finding,
    /// The source line the finding starts on, for display.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_line: Option<String>,
}

impl FileFinding {
    pub fn line(&self) -> usize {
        self.finding.range.start.line
    }
}

/// A file that could not be analyzed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseFailure {
    pub file: PathBuf,
    pub message: String,
}

/// Per-file outcome of running the rules.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileReport {
    pub findings: Vec<FileFinding>,
    pub suppressed: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisResults {
    pub root: PathBuf,
    pub timestamp: DateTime<Utc>,
    pub files_analyzed: usize,
    pub findings: Vec<FileFinding>,
    pub suppressed: usize,
    pub parse_failures: Vec<ParseFailure>,
}

impl AnalysisResults {
    pub fn new(root: PathBuf) -> Self {
        Self {
            root,
            timestamp: Utc::now(),
            files_analyzed: 0,
            findings: Vec::new(),
            suppressed: 0,
            parse_failures: Vec::new(),
        }
    }

    /// Fold one file's report into the totals.
    pub fn record(&mut self, report: FileReport) {
        self.files_analyzed += 1;
        self.suppressed += report.suppressed;
        self.findings.extend(report.findings);
    }

    pub fn record_failure(&mut self, failure: ParseFailure) {
        self.parse_failures.push(failure);
    }

    /// Sort findings by file, then by position.
    pub fn sort(&mut self) {
        self.findings
            .sort_by(|a, b| (&a.file, a.finding.range).cmp(&(&b.file, b.finding.range)));
        self.parse_failures.sort_by(|a, b| a.file.cmp(&b.file));
    }

    pub fn has_findings(&self) -> bool {
        !self.findings.is_empty()
    }
}
