//! Lowering of `syn` patterns into the rule's pattern model.

use crate::ast::{Literal, Node, Pattern, Range};
use crate::resolve::{LookupTable, ScopeChain};
use syn::spanned::Spanned;
use syn::{Lit, Pat, Path};

/// Converts `syn::Pat` trees and records where every constructor comes from.
pub struct PatternLowering<'a, 's> {
    scopes: &'a ScopeChain<'s>,
    table: &'a mut LookupTable,
}

impl<'a, 's> PatternLowering<'a, 's> {
    pub fn new(scopes: &'a ScopeChain<'s>, table: &'a mut LookupTable) -> Self {
        Self { scopes, table }
    }

    pub fn lower(&mut self, pat: &Pat) -> Node<Pattern> {
        let range = Range::from_span(pat.span());
        let value = match pat {
            Pat::Wild(_) => Pattern::All,
            Pat::Lit(lit) => Pattern::Literal(lower_literal(&lit.lit)),
            Pat::Ident(binding) => match &binding.subpat {
                Some((_, subpat)) => Pattern::As(
                    Box::new(self.lower(subpat)),
                    Node::new(
                        Range::from_span(binding.ident.span()),
                        binding.ident.to_string(),
                    ),
                ),
                None => Pattern::Var(binding.ident.to_string()),
            },
            Pat::TupleStruct(tuple_struct) => {
                if tuple_struct.qself.is_none() {
                    self.record_origin(&tuple_struct.path, range);
                }
                Pattern::Named {
                    name: constructor_name(&tuple_struct.path),
                    args: self.lower_all(tuple_struct.elems.iter()),
                }
            }
            Pat::Path(path) => {
                if path.qself.is_none() {
                    self.record_origin(&path.path, range);
                }
                Pattern::Named {
                    name: constructor_name(&path.path),
                    args: Vec::new(),
                }
            }
            Pat::Struct(record) => {
                if record.qself.is_none() {
                    self.record_origin(&record.path, range);
                }
                Pattern::Record {
                    name: constructor_name(&record.path),
                    fields: self.lower_all(record.fields.iter().map(|field| field.pat.as_ref())),
                }
            }
            Pat::Paren(paren) => Pattern::Parenthesized(Box::new(self.lower(&paren.pat))),
            Pat::Reference(reference) => Pattern::Reference(Box::new(self.lower(&reference.pat))),
            Pat::Slice(slice) => Pattern::List(self.lower_all(slice.elems.iter())),
            Pat::Tuple(tuple) => Pattern::Tuple(self.lower_all(tuple.elems.iter())),
            Pat::Or(or) => Pattern::Or(self.lower_all(or.cases.iter())),
            Pat::Type(typed) => return self.lower(&typed.pat),
            _ => Pattern::Other,
        };
        Node::new(range, value)
    }

    fn lower_all<'p>(&mut self, pats: impl Iterator<Item = &'p Pat>) -> Vec<Node<Pattern>> {
        pats.map(|pat| self.lower(pat)).collect()
    }

    fn record_origin(&mut self, path: &Path, range: Range) {
        let segments: Vec<String> = path
            .segments
            .iter()
            .map(|segment| segment.ident.to_string())
            .collect();
        if let Some(origin) = self.scopes.origin_of(&segments) {
            self.table.insert(range, origin);
        }
    }
}

fn constructor_name(path: &Path) -> String {
    path.segments
        .last()
        .map(|segment| segment.ident.to_string())
        .unwrap_or_default()
}

fn lower_literal(lit: &Lit) -> Literal {
    match lit {
        Lit::Str(s) => Literal::Str(s.value()),
        Lit::Char(c) => Literal::Char(c.value()),
        Lit::Byte(b) => Literal::Int(b.value().to_string()),
        Lit::Int(i) => Literal::Int(i.base10_digits().to_string()),
        Lit::Float(f) => Literal::Float(f.base10_digits().to_string()),
        Lit::Bool(b) => Literal::Bool(b.value),
        _ => Literal::Other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::Location;
    use crate::resolve::{DeclarationIndex, DependencyManifest, ModuleName, ModuleNameLookup};
    use syn::parse::Parser;

    fn parse_pat(source: &str) -> Pat {
        Pat::parse_multi_with_leading_vert
            .parse_str(source)
            .expect("Failed to parse pattern")
    }

    fn lower_with(items: &str, pattern: &str) -> (Node<Pattern>, LookupTable) {
        let file: syn::File = syn::parse_str(items).expect("Failed to parse test code");
        let index = DeclarationIndex::build(ModuleName::crate_root(), &file);
        let manifest = DependencyManifest::builtin();
        let scope = index
            .module(&ModuleName::crate_root())
            .expect("root scope is indexed");
        let chain = ScopeChain::new(scope, &[], &index, &manifest);
        let mut table = LookupTable::new();
        let node = PatternLowering::new(&chain, &mut table).lower(&parse_pat(pattern));
        (node, table)
    }

    #[test]
    fn test_tuple_struct_becomes_named() {
        let (node, table) = lower_with("", "Err(_)");
        assert_eq!(
            node.range,
            Range::new(Location::new(1, 1), Location::new(1, 7))
        );
        match &node.value {
            Pattern::Named { name, args } => {
                assert_eq!(name, "Err");
                assert_eq!(args.len(), 1);
                assert_eq!(args[0].value, Pattern::All);
                assert_eq!(
                    args[0].range,
                    Range::new(Location::new(1, 5), Location::new(1, 6))
                );
            }
            other => panic!("expected a named pattern, got {:?}", other),
        }
        assert_eq!(table.module_name_for(&node), Some(&ModuleName::result()));
    }

    #[test]
    fn test_qualified_path_keeps_last_segment() {
        let (node, table) = lower_with("enum Thing { Err(()) }", "Thing::Err(_)");
        assert!(matches!(&node.value, Pattern::Named { name, .. } if name == "Err"));
        assert_eq!(
            table.module_name_for(&node),
            Some(&ModuleName::parse("crate::Thing"))
        );
    }

    #[test]
    fn test_binding_with_subpattern_becomes_as() {
        let (node, _) = lower_with("", "error @ Err(_)");
        match &node.value {
            Pattern::As(inner, alias) => {
                assert_eq!(alias.value, "error");
                assert!(matches!(inner.value, Pattern::Named { .. }));
            }
            other => panic!("expected an as-pattern, got {:?}", other),
        }
    }

    #[test]
    fn test_container_shapes() {
        let (node, _) = lower_with("", "(&(x, [Err(_), ..]), Some(1) | Option::None, Point { x: 0, .. })");
        let Pattern::Tuple(items) = &node.value else {
            panic!("expected a tuple, got {:?}", node.value);
        };
        assert_eq!(items.len(), 3);

        let Pattern::Reference(inner) = &items[0].value else {
            panic!("expected a reference, got {:?}", items[0].value);
        };
        let Pattern::Tuple(pair) = &inner.value else {
            panic!("expected a tuple, got {:?}", inner.value);
        };
        assert_eq!(pair[0].value, Pattern::Var("x".into()));
        let Pattern::List(slice) = &pair[1].value else {
            panic!("expected a slice, got {:?}", pair[1].value);
        };
        assert_eq!(slice[1].value, Pattern::Other);

        let Pattern::Or(cases) = &items[1].value else {
            panic!("expected an or-pattern, got {:?}", items[1].value);
        };
        assert_eq!(cases.len(), 2);
        assert_eq!(cases[1].value, Pattern::named("None", vec![]));

        let Pattern::Record { name, fields } = &items[2].value else {
            panic!("expected a record, got {:?}", items[2].value);
        };
        assert_eq!(name, "Point");
        assert_eq!(fields.len(), 1);
        assert_eq!(fields[0].value, Pattern::Literal(Literal::Int("0".into())));
    }

    #[test]
    fn test_parenthesized_keeps_own_range() {
        let (node, table) = lower_with("", "(Err(_))");
        let Pattern::Parenthesized(inner) = &node.value else {
            panic!("expected parentheses, got {:?}", node.value);
        };
        assert_ne!(node.range, inner.range);
        assert_eq!(table.module_name_for(&node), None);
        assert_eq!(table.module_name_for(inner), Some(&ModuleName::result()));
    }

    #[test]
    fn test_literals() {
        let (node, _) = lower_with("", "(\"a\", 'b', 1.5, true, b'c')");
        let Pattern::Tuple(items) = &node.value else {
            panic!("expected a tuple, got {:?}", node.value);
        };
        let literals: Vec<_> = items.iter().map(|item| item.value.clone()).collect();
        assert_eq!(
            literals,
            vec![
                Pattern::Literal(Literal::Str("a".into())),
                Pattern::Literal(Literal::Char('b')),
                Pattern::Literal(Literal::Float("1.5".into())),
                Pattern::Literal(Literal::Bool(true)),
                Pattern::Literal(Literal::Int("99".into())),
            ]
        );
    }
}
