//! Source-independent syntax model consumed by the rules.
//!
//! Frontends lower their own syntax trees into these types so that rule logic
//! only ever matches on a small closed set of shapes.

pub mod pattern;

pub use pattern::{Literal, Pattern};

use proc_macro2::Span;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A position in a source file. Lines and columns are 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Location {
    pub line: usize,
    pub column: usize,
}

impl Location {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// Half-open span `[start, end)` of a syntax node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Range {
    pub start: Location,
    pub end: Location,
}

impl Range {
    pub fn new(start: Location, end: Location) -> Self {
        Self { start, end }
    }

    /// Convert a `proc_macro2` span. Requires the `span-locations` feature,
    /// which reports 0-based columns.
    pub fn from_span(span: Span) -> Self {
        let start = span.start();
        let end = span.end();
        Self {
            start: Location::new(start.line, start.column + 1),
            end: Location::new(end.line, end.column + 1),
        }
    }

    pub fn contains_line(&self, line: usize) -> bool {
        self.start.line <= line && line <= self.end.line
    }
}

impl fmt::Display for Range {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}

/// A syntax value together with the range it was read from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node<T> {
    pub range: Range,
    pub value: T,
}

impl<T> Node<T> {
    pub fn new(range: Range, value: T) -> Self {
        Self { range, value }
    }
}
