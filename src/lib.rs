//! Detect `match` arms that discard the error carried by `Err`.
//!
//! A pattern `Err(_)` is reported when `Err` resolves to the built-in
//! `Result` type. Constructors that merely share the name, such as a local
//! `enum Outcome { Err(()) }`, are left alone unless name-only resolution is
//! configured.

pub mod analyzers;
pub mod ast;
pub mod cli;
pub mod commands;
pub mod config;
pub mod core;
pub mod formatting;
pub mod io;
pub mod resolve;
pub mod rules;

// Re-export commonly used types
pub use crate::ast::{Location, Node, Range};
pub use crate::ast::pattern::Pattern;
pub use crate::core::{AnalysisResults, FileFinding, Finding};
pub use crate::core::{ERROR_IGNORED_DETAILS, ERROR_IGNORED_MESSAGE};
pub use crate::config::ErrdropConfig;
pub use crate::resolve::{ModuleName, ModuleNameLookup};
pub use crate::rules::{detect_ignored_errors, IgnoredErrorRule, OriginCheck};

pub use crate::io::output::{create_writer, OutputWriter};
pub use crate::cli::OutputFormat;

pub use crate::analyzers::{analyze_file, Analyzer, RustAnalyzer};
