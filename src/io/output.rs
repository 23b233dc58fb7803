use crate::cli::OutputFormat;
use crate::core::{AnalysisResults, FileFinding};
use crate::formatting::FormattingConfig;
use colored::*;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

pub trait OutputWriter {
    fn write_results(&mut self, results: &AnalysisResults) -> anyhow::Result<()>;
}

pub struct JsonWriter<W: Write> {
    writer: W,
}

impl<W: Write> JsonWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write> OutputWriter for JsonWriter<W> {
    fn write_results(&mut self, results: &AnalysisResults) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(results)?;
        self.writer.write_all(json.as_bytes())?;
        writeln!(self.writer)?;
        self.writer.flush()?;
        Ok(())
    }
}

pub struct MarkdownWriter<W: Write> {
    writer: W,
}

impl<W: Write> MarkdownWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write> OutputWriter for MarkdownWriter<W> {
    fn write_results(&mut self, results: &AnalysisResults) -> anyhow::Result<()> {
        self.write_header(results)?;
        self.write_summary(results)?;
        self.write_findings(results)?;
        self.write_parse_failures(results)?;
        self.writer.flush()?;
        Ok(())
    }
}

impl<W: Write> MarkdownWriter<W> {
    fn write_header(&mut self, results: &AnalysisResults) -> anyhow::Result<()> {
        writeln!(self.writer, "# Ignored Error Report")?;
        writeln!(self.writer)?;
        writeln!(
            self.writer,
            "Generated: {}",
            results.timestamp.format("%Y-%m-%d %H:%M:%S UTC")
        )?;
        writeln!(self.writer, "Version: {}", env!("CARGO_PKG_VERSION"))?;
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_summary(&mut self, results: &AnalysisResults) -> anyhow::Result<()> {
        writeln!(self.writer, "## Summary")?;
        writeln!(self.writer)?;
        writeln!(self.writer, "| Metric | Value |")?;
        writeln!(self.writer, "|--------|-------|")?;
        writeln!(self.writer, "| Files Analyzed | {} |", results.files_analyzed)?;
        writeln!(self.writer, "| Ignored Errors | {} |", results.findings.len())?;
        writeln!(self.writer, "| Suppressed | {} |", results.suppressed)?;
        writeln!(
            self.writer,
            "| Parse Failures | {} |",
            results.parse_failures.len()
        )?;
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_findings(&mut self, results: &AnalysisResults) -> anyhow::Result<()> {
        if results.findings.is_empty() {
            return Ok(());
        }

        writeln!(self.writer, "## Findings")?;
        writeln!(self.writer)?;
        writeln!(self.writer, "| Location | Message |")?;
        writeln!(self.writer, "|----------|---------|")?;
        for item in &results.findings {
            writeln!(
                self.writer,
                "| `{}:{}` | {} |",
                item.file.display(),
                item.finding.range.start,
                item.finding.message
            )?;
        }
        writeln!(self.writer)?;

        // Every finding carries the same advice; print it once.
        if let Some(first) = results.findings.first() {
            for detail in &first.finding.details {
                writeln!(self.writer, "> {}", detail)?;
            }
            writeln!(self.writer)?;
        }
        Ok(())
    }

    fn write_parse_failures(&mut self, results: &AnalysisResults) -> anyhow::Result<()> {
        if results.parse_failures.is_empty() {
            return Ok(());
        }

        writeln!(self.writer, "## Files Not Analyzed")?;
        writeln!(self.writer)?;
        for failure in &results.parse_failures {
            writeln!(
                self.writer,
                "- `{}`: {}",
                failure.file.display(),
                failure.message
            )?;
        }
        writeln!(self.writer)?;
        Ok(())
    }
}

pub struct TerminalWriter<W: Write> {
    writer: W,
}

impl<W: Write> TerminalWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write> OutputWriter for TerminalWriter<W> {
    fn write_results(&mut self, results: &AnalysisResults) -> anyhow::Result<()> {
        for item in &results.findings {
            self.write_finding(item)?;
        }
        for failure in &results.parse_failures {
            writeln!(
                self.writer,
                "{}: skipped {}: {}",
                "warning".yellow().bold(),
                failure.file.display(),
                failure.message
            )?;
        }
        self.write_status(results)?;
        self.writer.flush()?;
        Ok(())
    }
}

impl<W: Write> TerminalWriter<W> {
    fn write_finding(&mut self, item: &FileFinding) -> anyhow::Result<()> {
        let start = item.finding.range.start;
        writeln!(
            self.writer,
            "{}: {}",
            "error".red().bold(),
            item.finding.message.bold()
        )?;
        writeln!(
            self.writer,
            "  {} {}:{}",
            "-->".blue().bold(),
            item.file.display(),
            start
        )?;

        if let Some(source) = &item.source_line {
            let gutter = start.line.to_string();
            let pad = " ".repeat(gutter.len());
            writeln!(self.writer, "{} {}", pad, "|".blue().bold())?;
            writeln!(
                self.writer,
                "{} {} {}",
                gutter.blue().bold(),
                "|".blue().bold(),
                source
            )?;
            writeln!(
                self.writer,
                "{} {} {}",
                pad,
                "|".blue().bold(),
                caret_line(item, source).red().bold()
            )?;
        }

        for detail in &item.finding.details {
            writeln!(self.writer, "  {} {}", "=".blue().bold(), detail)?;
        }
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_status(&mut self, results: &AnalysisResults) -> anyhow::Result<()> {
        let suppressed = match results.suppressed {
            0 => String::new(),
            n => format!(" ({} suppressed)", n),
        };

        if results.has_findings() {
            writeln!(
                self.writer,
                "{} {} ignored error{} in {} file{}{}",
                "Found".red().bold(),
                results.findings.len(),
                plural(results.findings.len()),
                results.files_analyzed,
                plural(results.files_analyzed),
                suppressed
            )?;
        } else {
            writeln!(
                self.writer,
                "{} no ignored errors in {} file{}{}",
                "OK:".green().bold(),
                results.files_analyzed,
                plural(results.files_analyzed),
                suppressed
            )?;
        }
        Ok(())
    }
}

fn plural(count: usize) -> &'static str {
    if count == 1 {
        ""
    } else {
        "s"
    }
}

/// Underline the finding's columns; multi-line ranges run to the end of the first line.
fn caret_line(item: &FileFinding, source: &str) -> String {
    let range = item.finding.range;
    let start = range.start.column.saturating_sub(1);
    let width = if range.end.line == range.start.line {
        range.end.column.saturating_sub(range.start.column)
    } else {
        source.chars().count().saturating_sub(start)
    };
    format!("{}{}", " ".repeat(start), "^".repeat(width.max(1)))
}

/// Writers go to `output` when given, stdout otherwise.
pub fn create_writer(
    format: OutputFormat,
    output: Option<&Path>,
    formatting: FormattingConfig,
) -> anyhow::Result<Box<dyn OutputWriter>> {
    let sink: Box<dyn Write> = match output {
        Some(path) => Box::new(BufWriter::new(File::create(path)?)),
        None => Box::new(std::io::stdout()),
    };

    // Colors only make sense on a terminal.
    if output.is_some() || format != OutputFormat::Terminal {
        FormattingConfig::plain().apply();
    } else {
        formatting.apply();
    }

    Ok(match format {
        OutputFormat::Json => Box::new(JsonWriter::new(sink)),
        OutputFormat::Markdown => Box::new(MarkdownWriter::new(sink)),
        OutputFormat::Terminal => Box::new(TerminalWriter::new(sink)),
    })
}
