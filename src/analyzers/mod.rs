use crate::core::errors::Result;
use crate::core::{FileFinding, FileReport, Finding};
use crate::rules::parse_suppression_comments;
use std::path::Path;
use tracing::{debug, debug_span, warn};

pub mod rust;

pub use rust::RustAnalyzer;

pub trait Analyzer: Send + Sync {
    fn parse(&self, content: &str, path: &Path) -> Result<syn::File>;
    fn analyze(&self, file: &syn::File, path: &Path) -> Vec<Finding>;
}

/// Parse, run the rule, then drop findings silenced by `errdrop:allow` comments.
pub fn analyze_file(content: &str, path: &Path, analyzer: &dyn Analyzer) -> Result<FileReport> {
    let _span = debug_span!("analyze_file", file = %path.display()).entered();

    let file = analyzer.parse(content, path)?;
    let findings = analyzer.analyze(&file, path);
    Ok(apply_suppressions(content, path, findings))
}

fn apply_suppressions(content: &str, path: &Path, findings: Vec<Finding>) -> FileReport {
    let suppressions = parse_suppression_comments(content);
    for block in suppressions.unclosed_blocks() {
        warn!(
            "{}:{}: errdrop:allow-start without matching errdrop:allow-end",
            path.display(),
            block.start_line
        );
    }

    let lines: Vec<&str> = content.lines().collect();
    let (suppressed, kept): (Vec<_>, Vec<_>) = findings
        .into_iter()
        .partition(|finding| suppressions.is_suppressed(finding.range.start.line));

    debug!(
        "{} findings, {} suppressed",
        kept.len(),
        suppressed.len()
    );

    FileReport {
        findings: kept
            .into_iter()
            .map(|finding| FileFinding {
                file: path.to_path_buf(),
                source_line: source_line(&lines, finding.range.start.line),
                finding,
            })
            .collect(),
        suppressed: suppressed.len(),
    }
}

fn source_line(lines: &[&str], line: usize) -> Option<String> {
    line.checked_sub(1)
        .and_then(|index| lines.get(index))
        .map(|text| text.to_string())
}
