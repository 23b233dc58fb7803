use crate::analyzers::{analyze_file, RustAnalyzer};
use crate::cli::{self, OutputFormat};
use crate::config::{load_config, load_config_from, ErrdropConfig, ResolutionMode};
use crate::core::{AnalysisResults, FileReport, ParseFailure};
use crate::formatting::FormattingConfig;
use crate::io::{self, walker::find_rust_files};
use anyhow::{Context, Result};
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

pub struct AnalyzeConfig {
    pub path: PathBuf,
    pub format: Option<OutputFormat>,
    pub output: Option<PathBuf>,
    pub config: Option<PathBuf>,
    pub name_only: bool,
    pub formatting_config: FormattingConfig,
    pub parallel: bool,
    pub jobs: usize,
}

/// Returns the results so the caller can decide the exit status.
pub fn handle_analyze(config: AnalyzeConfig) -> Result<AnalysisResults> {
    let mut settings = match &config.config {
        Some(path) => load_config_from(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => load_config(),
    };
    if config.name_only {
        settings.resolution.mode = ResolutionMode::NameOnly;
    }

    if config.parallel {
        cli::configure_thread_pool(config.jobs);
    }

    let results = analyze_project(&config.path, &settings, config.parallel)?;

    let format = config
        .format
        .or(settings.output.default_format)
        .unwrap_or(OutputFormat::Terminal);
    let mut writer =
        crate::io::create_writer(format, config.output.as_deref(), config.formatting_config)?;
    writer.write_results(&results)?;

    Ok(results)
}

/// Discover, parse and check every Rust file under `path`.
pub fn analyze_project(
    path: &Path,
    settings: &ErrdropConfig,
    parallel: bool,
) -> Result<AnalysisResults> {
    if !path.exists() {
        anyhow::bail!("Path does not exist: {}", path.display());
    }

    let files = find_rust_files(path, &settings.ignore.patterns)
        .with_context(|| format!("Failed to discover files under {}", path.display()))?;
    info!("Analyzing {} files", files.len());

    let analyzer = RustAnalyzer::new(settings.rule());
    let outcomes: Vec<(PathBuf, crate::core::errors::Result<FileReport>)> = if parallel {
        files
            .par_iter()
            .map(|file| (file.clone(), analyze_path(file, &analyzer)))
            .collect()
    } else {
        files
            .iter()
            .map(|file| (file.clone(), analyze_path(file, &analyzer)))
            .collect()
    };

    let mut results = AnalysisResults::new(path.to_path_buf());
    for (file, outcome) in outcomes {
        match outcome {
            Ok(report) => results.record(report),
            Err(e) => {
                warn!("Skipping {}: {}", file.display(), e);
                results.record_failure(ParseFailure {
                    file,
                    message: e.to_string(),
                });
            }
        }
    }
    results.sort();

    info!(
        "{} findings in {} files ({} suppressed, {} skipped)",
        results.findings.len(),
        results.files_analyzed,
        results.suppressed,
        results.parse_failures.len()
    );
    Ok(results)
}

fn analyze_path(path: &Path, analyzer: &RustAnalyzer) -> crate::core::errors::Result<FileReport> {
    let content = io::read_file(path)?;
    analyze_file(&content, path, analyzer)
}
