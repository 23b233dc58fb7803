use super::Analyzer;
use crate::core::errors::{Error, Result};
use crate::core::Finding;
use crate::resolve::ModuleName;
use crate::rules::IgnoredErrorRule;
use std::path::Path;
use tracing::trace;

/// Runs the ignored-error rule over `syn`-parsed Rust sources.
#[derive(Debug, Clone, Default)]
pub struct RustAnalyzer {
    rule: IgnoredErrorRule,
}

impl RustAnalyzer {
    pub fn new(rule: IgnoredErrorRule) -> Self {
        Self { rule }
    }
}

impl Analyzer for RustAnalyzer {
    fn parse(&self, content: &str, path: &Path) -> Result<syn::File> {
        syn::parse_file(content).map_err(|e| Error::parse(path, &e))
    }

    fn analyze(&self, file: &syn::File, path: &Path) -> Vec<Finding> {
        let module = ModuleName::for_file(path);
        trace!("Analyzing {} as module {}", path.display(), module);
        self.rule.check_file(module, file)
    }
}
