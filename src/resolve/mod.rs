//! Name resolution for constructor references.
//!
//! Rules never inspect import tables themselves. They ask a
//! [`ModuleNameLookup`] which module a constructor node came from, and the
//! lookup is filled in by a [`ScopeChain`] while the syntax tree is lowered.

pub mod index;
pub mod manifest;
pub mod scope;

pub use index::DeclarationIndex;
pub use manifest::{DependencyManifest, ManifestModule};
pub use scope::{Scope, ScopeChain, TypeDecl};

use crate::ast::{Node, Pattern, Range};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::path::{Component, Path};

/// Fully qualified module path, e.g. `["Result"]` or `["crate", "errors"]`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ModuleName(Vec<String>);

impl ModuleName {
    pub fn new<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(segments.into_iter().map(Into::into).collect())
    }

    /// The built-in two-outcome result type.
    pub fn result() -> Self {
        Self::new(["Result"])
    }

    pub fn option() -> Self {
        Self::new(["Option"])
    }

    pub fn crate_root() -> Self {
        Self::new(["crate"])
    }

    /// Parse a `::`-separated path such as `std::result::Result`.
    pub fn parse(path: &str) -> Self {
        Self::new(
            path.split("::")
                .map(str::trim)
                .filter(|segment| !segment.is_empty()),
        )
    }

    /// Module path of a source file inside a crate: `src/a/b.rs` is
    /// `crate::a::b`, and `lib.rs`, `main.rs` and `mod.rs` name their directory.
    pub fn for_file(path: &Path) -> Self {
        let components: Vec<String> = path
            .components()
            .filter_map(|component| match component {
                Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
                _ => None,
            })
            .collect();

        let after_src = match components.iter().rposition(|part| part == "src") {
            Some(index) => &components[index + 1..],
            None => return Self::crate_root(),
        };

        let mut segments = vec!["crate".to_string()];
        for (i, part) in after_src.iter().enumerate() {
            let is_last = i + 1 == after_src.len();
            if !is_last {
                segments.push(part.clone());
                continue;
            }
            let stem = part.strip_suffix(".rs").unwrap_or(part.as_str());
            let names_directory = stem == "mod" || (i == 0 && (stem == "lib" || stem == "main"));
            if !names_directory {
                segments.push(stem.to_string());
            }
        }
        Self(segments)
    }

    pub fn segments(&self) -> &[String] {
        &self.0
    }

    pub fn join(&self, segment: impl Into<String>) -> Self {
        let mut segments = self.0.clone();
        segments.push(segment.into());
        Self(segments)
    }

    pub fn parent(&self) -> Option<Self> {
        (self.0.len() > 1).then(|| Self(self.0[..self.0.len() - 1].to_vec()))
    }
}

impl fmt::Display for ModuleName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.join("::"))
    }
}

/// Answers "which module does this constructor come from?" for pattern nodes.
pub trait ModuleNameLookup {
    fn module_name_for(&self, node: &Node<Pattern>) -> Option<&ModuleName>;
}

/// Lookup keyed by the source range of each resolved node.
#[derive(Debug, Clone, Default)]
pub struct LookupTable {
    entries: HashMap<Range, ModuleName>,
}

impl LookupTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, range: Range, module: ModuleName) {
        self.entries.insert(range, module);
    }
}

impl ModuleNameLookup for LookupTable {
    fn module_name_for(&self, node: &Node<Pattern>) -> Option<&ModuleName> {
        self.entries.get(&node.range)
    }
}
