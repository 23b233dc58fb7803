//! Decides which sub-patterns are `Err(_)` on the built-in result type.

use crate::ast::{Node, Pattern};
use crate::core::Finding;
use crate::resolve::{ModuleName, ModuleNameLookup};
use serde::{Deserialize, Serialize};

const FAILURE_CONSTRUCTOR: &str = "Err";

/// How a syntactic `Err(_)` match is confirmed to be the built-in one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum OriginCheck {
    /// Every `Err(_)` counts, whatever it resolves to.
    NameOnly,
    /// The constructor must resolve to exactly this module.
    ExactModule(ModuleName),
}

impl Default for OriginCheck {
    fn default() -> Self {
        Self::strict()
    }
}

impl OriginCheck {
    pub fn strict() -> Self {
        Self::ExactModule(ModuleName::result())
    }

    /// An unresolved constructor is never accepted in strict mode.
    fn accepts(&self, lookup: &dyn ModuleNameLookup, node: &Node<Pattern>) -> bool {
        match self {
            Self::NameOnly => true,
            Self::ExactModule(expected) => lookup.module_name_for(node) == Some(expected),
        }
    }
}

/// Findings for every arm of one `match`, in arm order.
pub fn classify_arms<'p>(
    check: &OriginCheck,
    lookup: &dyn ModuleNameLookup,
    arms: impl IntoIterator<Item = &'p Node<Pattern>>,
) -> Vec<Finding> {
    arms.into_iter()
        .flat_map(|arm| classify(check, lookup, arm))
        .collect()
}

/// Findings inside a single pattern, depth-first and left to right.
pub fn classify(
    check: &OriginCheck,
    lookup: &dyn ModuleNameLookup,
    node: &Node<Pattern>,
) -> Vec<Finding> {
    let all = |nodes: &[Node<Pattern>]| classify_arms(check, lookup, nodes);

    match &node.value {
        Pattern::Named { name, args } if is_discarded_failure(name, args) => {
            if check.accepts(lookup, node) {
                vec![Finding::error_ignored(node.range)]
            } else {
                // A same-named constructor from elsewhere; keep looking inside it.
                all(args)
            }
        }
        Pattern::Named { args, .. } => all(args),
        Pattern::Record { fields, .. } => all(fields),
        Pattern::Parenthesized(inner) | Pattern::Reference(inner) | Pattern::As(inner, _) => {
            classify(check, lookup, inner)
        }
        Pattern::UnCons(head, tail) => {
            let mut findings = classify(check, lookup, head);
            findings.extend(classify(check, lookup, tail));
            findings
        }
        Pattern::List(items) | Pattern::Tuple(items) | Pattern::Or(items) => all(items),
        Pattern::All | Pattern::Literal(_) | Pattern::Var(_) | Pattern::Other => Vec::new(),
    }
}

fn is_discarded_failure(name: &str, args: &[Node<Pattern>]) -> bool {
    name == FAILURE_CONSTRUCTOR && matches!(args, [only] if only.value.is_wildcard())
}
