use super::classifier::{classify_arms, OriginCheck};
use super::lowering::PatternLowering;
use crate::ast::{Node, Pattern};
use crate::core::Finding;
use crate::resolve::{DeclarationIndex, DependencyManifest, LookupTable, ModuleName, Scope, ScopeChain};
use syn::visit::Visit;
use syn::{Block, ExprMatch, File, Item, ItemMod, Stmt};
use tracing::trace;

/// State owned by the module currently being walked.
#[derive(Debug, Clone)]
pub struct ModuleContext {
    pub module: ModuleName,
    pub lookup: LookupTable,
}

impl ModuleContext {
    pub fn new(module: ModuleName) -> Self {
        Self {
            module,
            lookup: LookupTable::new(),
        }
    }
}

/// Walks a file and classifies the arms of every `match` expression.
pub struct IgnoredErrorVisitor<'a> {
    check: &'a OriginCheck,
    manifest: &'a DependencyManifest,
    index: DeclarationIndex,
    context: ModuleContext,
    /// Block scopes between the module and the current node, outermost first.
    blocks: Vec<Scope>,
    findings: Vec<Finding>,
}

impl<'a> IgnoredErrorVisitor<'a> {
    pub fn new(
        module: ModuleName,
        file: &File,
        check: &'a OriginCheck,
        manifest: &'a DependencyManifest,
    ) -> Self {
        Self {
            check,
            manifest,
            index: DeclarationIndex::build(module.clone(), file),
            context: ModuleContext::new(module),
            blocks: Vec::new(),
            findings: Vec::new(),
        }
    }

    pub fn detect(mut self, file: &File) -> Vec<Finding> {
        self.visit_file(file);
        self.findings
    }

    fn check_match_expr(&mut self, expr_match: &ExprMatch) {
        let Some(scope) = self.index.module(&self.context.module) else {
            return;
        };
        let chain = ScopeChain::new(scope, &self.blocks, &self.index, self.manifest);
        let mut lowering = PatternLowering::new(&chain, &mut self.context.lookup);
        let arms: Vec<Node<Pattern>> = expr_match
            .arms
            .iter()
            .map(|arm| lowering.lower(&arm.pat))
            .collect();

        let findings = classify_arms(self.check, &self.context.lookup, &arms);
        for finding in &findings {
            trace!(module = %self.context.module, range = %finding.range, "Err(_) arm");
        }
        self.findings.extend(findings);
    }
}

impl<'a, 'ast> Visit<'ast> for IgnoredErrorVisitor<'a> {
    fn visit_item_mod(&mut self, node: &'ast ItemMod) {
        let Some((_, items)) = &node.content else {
            return;
        };

        let module = self.context.module.join(node.ident.to_string());
        if self.index.module(&module).is_none() {
            // Modules declared inside function bodies are not reached when
            // the index is built.
            self.index.insert_module(module.clone(), items);
        }

        let outer_context = std::mem::replace(&mut self.context, ModuleContext::new(module));
        let outer_blocks = std::mem::take(&mut self.blocks);
        syn::visit::visit_item_mod(self, node);
        self.blocks = outer_blocks;
        self.context = outer_context;
    }

    fn visit_block(&mut self, node: &'ast Block) {
        let items: Vec<&Item> = node
            .stmts
            .iter()
            .filter_map(|stmt| match stmt {
                Stmt::Item(item) => Some(item),
                _ => None,
            })
            .collect();

        // Item order inside a block carries no meaning, so modules declared
        // after a `match` must already be visible to it.
        for item in &items {
            if let Item::Mod(ItemMod {
                ident,
                content: Some((_, content)),
                ..
            }) = item
            {
                let module = self.context.module.join(ident.to_string());
                if self.index.module(&module).is_none() {
                    self.index.insert_module(module, content);
                }
            }
        }

        let scope = Scope::from_items(self.context.module.clone(), items);

        if scope.is_empty() {
            syn::visit::visit_block(self, node);
        } else {
            self.blocks.push(scope);
            syn::visit::visit_block(self, node);
            self.blocks.pop();
        }
    }

    fn visit_expr_match(&mut self, node: &'ast ExprMatch) {
        self.check_match_expr(node);
        syn::visit::visit_expr_match(self, node);
    }
}
