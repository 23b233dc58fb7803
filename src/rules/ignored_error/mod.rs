//! `match` arms that discard the error carried by `Err`.
//!
//! ```
//! use errdrop::resolve::ModuleName;
//! use errdrop::rules::ignored_error::IgnoredErrorRule;
//!
//! let file: syn::File = syn::parse_str(
//!     "fn f(r: Result<u8, String>) -> u8 { match r { Ok(v) => v, Err(_) => 0 } }",
//! )
//! .unwrap();
//! let findings = IgnoredErrorRule::strict().check_file(ModuleName::crate_root(), &file);
//! assert_eq!(findings.len(), 1);
//! ```

pub mod classifier;
pub mod lowering;
pub mod visitor;

pub use classifier::{classify, classify_arms, OriginCheck};
pub use lowering::PatternLowering;
pub use visitor::{IgnoredErrorVisitor, ModuleContext};

use crate::core::Finding;
use crate::resolve::{DependencyManifest, ModuleName};
use syn::File;

/// The rule together with the resolution strategy it was configured with.
#[derive(Debug, Clone, Default)]
pub struct IgnoredErrorRule {
    check: OriginCheck,
    manifest: DependencyManifest,
}

impl IgnoredErrorRule {
    pub fn new(check: OriginCheck, manifest: DependencyManifest) -> Self {
        Self { check, manifest }
    }

    /// Only `Err` from the built-in `Result` is reported.
    pub fn strict() -> Self {
        Self::new(OriginCheck::strict(), DependencyManifest::builtin())
    }

    /// Every `Err(_)` is reported, whatever it resolves to.
    pub fn name_only() -> Self {
        Self::new(OriginCheck::NameOnly, DependencyManifest::builtin())
    }

    pub fn origin_check(&self) -> &OriginCheck {
        &self.check
    }

    pub fn check_file(&self, module: ModuleName, file: &File) -> Vec<Finding> {
        detect_ignored_errors(file, module, &self.check, &self.manifest)
    }
}

pub fn detect_ignored_errors(
    file: &File,
    module: ModuleName,
    check: &OriginCheck,
    manifest: &DependencyManifest,
) -> Vec<Finding> {
    IgnoredErrorVisitor::new(module, file, check, manifest).detect(file)
}
