use super::Node;
use serde::{Deserialize, Serialize};

/// Literal values that may appear in a pattern position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Literal {
    Char(char),
    Str(String),
    Int(String),
    Float(String),
    Bool(bool),
    /// Byte strings, C strings and other literal kinds.
    Other,
}

/// Pattern shapes the rules understand.
///
/// The set is closed on purpose: a new shape is added by extending this enum
/// and every exhaustive `match` over it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Pattern {
    /// `_`
    All,
    Literal(Literal),
    /// A plain binding such as `x` or `ref mut x`.
    Var(String),
    /// A constructor applied to positional sub-patterns, e.g. `Err(_)` or
    /// `Thing::Err(())`. Only the final path segment is kept; the qualifier is
    /// resolved separately through a `ModuleNameLookup`.
    Named {
        name: String,
        args: Vec<Node<Pattern>>,
    },
    /// A constructor with named fields, e.g. `Config { inner, .. }`.
    Record {
        name: String,
        fields: Vec<Node<Pattern>>,
    },
    Parenthesized(Box<Node<Pattern>>),
    /// `head :: tail`
    UnCons(Box<Node<Pattern>>, Box<Node<Pattern>>),
    List(Vec<Node<Pattern>>),
    Tuple(Vec<Node<Pattern>>),
    /// `alias @ pattern`
    As(Box<Node<Pattern>>, Node<String>),
    /// `&pattern` / `&mut pattern`
    Reference(Box<Node<Pattern>>),
    /// `a | b`
    Or(Vec<Node<Pattern>>),
    /// Ranges, `..`, macros and anything else no rule inspects.
    Other,
}

impl Pattern {
    pub fn named(name: impl Into<String>, args: Vec<Node<Pattern>>) -> Self {
        Self::Named {
            name: name.into(),
            args,
        }
    }

    pub fn is_wildcard(&self) -> bool {
        matches!(self, Self::All)
    }

    /// Direct children in source order.
    pub fn children(&self) -> Vec<&Node<Pattern>> {
        match self {
            Self::Named { args, .. } => args.iter().collect(),
            Self::Record { fields, .. } => fields.iter().collect(),
            Self::Parenthesized(inner) | Self::Reference(inner) | Self::As(inner, _) => {
                vec![inner.as_ref()]
            }
            Self::UnCons(head, tail) => vec![head.as_ref(), tail.as_ref()],
            Self::List(items) | Self::Tuple(items) | Self::Or(items) => items.iter().collect(),
            Self::All | Self::Literal(_) | Self::Var(_) | Self::Other => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{Location, Range};

    fn node(value: Pattern) -> Node<Pattern> {
        Node::new(Range::new(Location::new(1, 1), Location::new(1, 2)), value)
    }

    #[test]
    fn test_children_follow_source_order() {
        let cons = Pattern::UnCons(
            Box::new(node(Pattern::Var("head".into()))),
            Box::new(node(Pattern::Var("tail".into()))),
        );
        let names: Vec<_> = cons
            .children()
            .into_iter()
            .map(|child| match &child.value {
                Pattern::Var(name) => name.as_str(),
                _ => "",
            })
            .collect();
        assert_eq!(names, vec!["head", "tail"]);
    }

    #[test]
    fn test_leaves_have_no_children() {
        assert!(Pattern::All.children().is_empty());
        assert!(Pattern::Literal(Literal::Bool(true)).children().is_empty());
        assert!(Pattern::Var("x".into()).children().is_empty());
        assert!(Pattern::Other.children().is_empty());
    }

    #[test]
    fn test_is_wildcard() {
        assert!(Pattern::All.is_wildcard());
        assert!(!Pattern::Var("_e".into()).is_wildcard());
    }
}
