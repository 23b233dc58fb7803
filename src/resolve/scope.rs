//! Per-module and per-block import tables, and resolution through them.

use super::{DeclarationIndex, DependencyManifest, ModuleName};
use std::collections::HashMap;
use syn::{Item, Type, UseTree};

/// Upper bound on alias and re-export chains followed during resolution.
const MAX_EXPANSION_DEPTH: usize = 8;

/// A name declared by an item in the scope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeDecl {
    Enum(Vec<String>),
    Struct,
    /// `type Name = path::to::Type;`
    Alias(Vec<String>),
    Module,
}

/// Names introduced by the items of one module or block.
///
/// A block scope carries the path of its enclosing module, since items
/// declared inside a function body are still owned by that module.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scope {
    module: ModuleName,
    types: HashMap<String, TypeDecl>,
    /// Local name to the imported path, last segment included.
    imports: HashMap<String, Vec<String>>,
    globs: Vec<Vec<String>>,
}

impl Scope {
    pub fn new(module: ModuleName) -> Self {
        Self {
            module,
            types: HashMap::new(),
            imports: HashMap::new(),
            globs: Vec::new(),
        }
    }

    pub fn from_items<'a>(module: ModuleName, items: impl IntoIterator<Item = &'a Item>) -> Self {
        let mut scope = Self::new(module);
        for item in items {
            scope.add_item(item);
        }
        scope
    }

    pub fn module(&self) -> &ModuleName {
        &self.module
    }

    /// True when the scope introduces no names at all.
    pub fn is_empty(&self) -> bool {
        self.types.is_empty() && self.imports.is_empty() && self.globs.is_empty()
    }

    pub fn declares(&self, name: &str) -> Option<&TypeDecl> {
        self.types.get(name)
    }

    pub fn imported(&self, name: &str) -> Option<&[String]> {
        self.imports.get(name).map(Vec::as_slice)
    }

    fn add_item(&mut self, item: &Item) {
        match item {
            Item::Enum(item) => {
                let variants = item
                    .variants
                    .iter()
                    .map(|variant| variant.ident.to_string())
                    .collect();
                self.types
                    .insert(item.ident.to_string(), TypeDecl::Enum(variants));
            }
            // A braced struct cannot be matched as `Name(..)` but still
            // shadows the name.
            Item::Struct(item) => {
                self.types.insert(item.ident.to_string(), TypeDecl::Struct);
            }
            Item::Union(item) => {
                self.types.insert(item.ident.to_string(), TypeDecl::Struct);
            }
            Item::Type(item) => {
                if let Type::Path(type_path) = item.ty.as_ref() {
                    let target = type_path
                        .path
                        .segments
                        .iter()
                        .map(|segment| segment.ident.to_string())
                        .collect();
                    self.types
                        .insert(item.ident.to_string(), TypeDecl::Alias(target));
                }
            }
            Item::Mod(item) => {
                self.types.insert(item.ident.to_string(), TypeDecl::Module);
            }
            Item::Use(item) => self.add_use_tree(&item.tree, Vec::new()),
            _ => {}
        }
    }

    fn add_use_tree(&mut self, tree: &UseTree, prefix: Vec<String>) {
        match tree {
            UseTree::Path(path) => {
                let mut next = prefix;
                next.push(path.ident.to_string());
                self.add_use_tree(&path.tree, next);
            }
            UseTree::Name(name) if name.ident == "self" => {
                if let Some(last) = prefix.last().cloned() {
                    self.imports.insert(last, prefix);
                }
            }
            UseTree::Name(name) => {
                let mut full = prefix;
                full.push(name.ident.to_string());
                self.imports.insert(name.ident.to_string(), full);
            }
            UseTree::Rename(rename) if rename.rename == "_" => {}
            UseTree::Rename(rename) => {
                let mut full = prefix;
                if rename.ident != "self" {
                    full.push(rename.ident.to_string());
                }
                self.imports.insert(rename.rename.to_string(), full);
            }
            UseTree::Glob(_) => self.globs.push(prefix),
            UseTree::Group(group) => {
                for tree in &group.items {
                    self.add_use_tree(tree, prefix.clone());
                }
            }
        }
    }
}

/// The scopes visible at one point of a module: the module itself plus the
/// enclosing blocks that declare items, innermost block last. Resolution never
/// looks past the module, matching how inline `mod` items start fresh.
pub struct ScopeChain<'a> {
    module: &'a Scope,
    blocks: &'a [Scope],
    index: &'a DeclarationIndex,
    manifest: &'a DependencyManifest,
}

impl<'a> ScopeChain<'a> {
    pub fn new(
        module: &'a Scope,
        blocks: &'a [Scope],
        index: &'a DeclarationIndex,
        manifest: &'a DependencyManifest,
    ) -> Self {
        Self {
            module,
            blocks,
            index,
            manifest,
        }
    }

    /// Scopes in lookup order: innermost block first, the module last.
    fn layers(&self) -> impl Iterator<Item = &'a Scope> + 'a {
        self.blocks
            .iter()
            .rev()
            .chain(std::iter::once(self.module))
    }

    /// Module that the constructor named by `path` was declared in.
    ///
    /// `path` is the constructor reference as written, e.g. `["Err"]` or
    /// `["std", "result", "Result", "Err"]`.
    pub fn origin_of(&self, path: &[String]) -> Option<ModuleName> {
        self.origin_at_depth(path, 0)
    }

    fn origin_at_depth(&self, path: &[String], depth: usize) -> Option<ModuleName> {
        match path.split_last()? {
            (name, []) => self.constructor_origin(name, depth),
            (_, qualifier) => self
                .expand(qualifier, depth)
                .map(|absolute| self.manifest.canonicalize(&absolute)),
        }
    }

    fn constructor_origin(&self, name: &str, depth: usize) -> Option<ModuleName> {
        if depth > MAX_EXPANSION_DEPTH {
            return None;
        }

        for layer in self.layers() {
            if let Some(TypeDecl::Struct) = layer.declares(name) {
                return Some(layer.module.clone());
            }
            if let Some(target) = layer.imported(name) {
                return self.origin_at_depth(target, depth + 1);
            }
            if let Some(origin) = layer
                .globs
                .iter()
                .find_map(|glob| self.glob_origin(glob, name, depth + 1))
            {
                return Some(origin);
            }
        }

        self.manifest.prelude_constructor(name).cloned()
    }

    fn glob_origin(&self, glob: &[String], name: &str, depth: usize) -> Option<ModuleName> {
        let target = self.expand(glob, depth)?;

        if let Some(module) = self.manifest.exports(&target, name) {
            return Some(module.clone());
        }
        if self
            .enum_variants(&target)
            .is_some_and(|variants| variants.iter().any(|variant| variant == name))
        {
            return Some(ModuleName::new(target));
        }

        let module_name = ModuleName::new(target);
        let scope = self.index.module(&module_name)?;
        if let Some(TypeDecl::Struct) = scope.declares(name) {
            return Some(module_name);
        }

        // Re-exports of the target module, explicit first, then its own globs.
        // The prelude is not consulted: it is not re-exported through a glob.
        let target_chain = ScopeChain::new(scope, &[], self.index, self.manifest);
        if let Some(reexport) = scope.imported(name) {
            return target_chain.origin_at_depth(reexport, depth + 1);
        }
        scope
            .globs
            .iter()
            .find_map(|glob| target_chain.glob_origin(glob, name, depth + 1))
    }

    /// Variants of the enum at the absolute path `target`, looking at the
    /// visible blocks before the file-wide index.
    fn enum_variants(&self, target: &[String]) -> Option<&'a [String]> {
        let (name, container) = target.split_last()?;
        let from_layers = self
            .layers()
            .filter(|layer| layer.module.segments() == container)
            .find_map(|layer| match layer.declares(name) {
                Some(TypeDecl::Enum(variants)) => Some(variants.as_slice()),
                _ => None,
            });
        from_layers.or_else(|| self.index.enum_variants(target))
    }

    /// Turn a path as written into an absolute one.
    fn expand(&self, path: &[String], depth: usize) -> Option<Vec<String>> {
        if depth > MAX_EXPANSION_DEPTH {
            return None;
        }
        let (first, mut rest) = path.split_first()?;

        let mut base: Vec<String> = match first.as_str() {
            "crate" => ModuleName::crate_root().segments().to_vec(),
            "self" => self.module.module.segments().to_vec(),
            "super" => self.module.module.parent()?.segments().to_vec(),
            "Self" => return None,
            _ => self.expand_leading_name(first, depth)?,
        };

        while let Some((next, tail)) = rest.split_first() {
            if next != "super" {
                break;
            }
            base.pop();
            if base.is_empty() {
                return None;
            }
            rest = tail;
        }

        base.extend(rest.iter().cloned());
        Some(base)
    }

    fn expand_leading_name(&self, name: &str, depth: usize) -> Option<Vec<String>> {
        for layer in self.layers() {
            match layer.declares(name) {
                Some(TypeDecl::Alias(target)) => return self.expand(target, depth + 1),
                Some(_) => return Some(layer.module.join(name).segments().to_vec()),
                None => {}
            }
            if let Some(target) = layer.imported(name) {
                return self.expand(target, depth + 1);
            }
        }

        match self.manifest.prelude_type(name) {
            Some(module) => Some(module.segments().to_vec()),
            // Anything else is taken to be an external crate.
            None => Some(vec![name.to_string()]),
        }
    }
}
