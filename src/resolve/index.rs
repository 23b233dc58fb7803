use super::{ModuleName, Scope, TypeDecl};
use std::collections::HashMap;
use syn::{File, Item};

/// Module scopes of one source file, including every inline `mod` item.
///
/// Glob imports and `super::` paths are resolved against this index, so only
/// modules that live in the same file are visible through it.
#[derive(Debug, Clone, Default)]
pub struct DeclarationIndex {
    modules: HashMap<ModuleName, Scope>,
}

impl DeclarationIndex {
    pub fn build(root: ModuleName, file: &File) -> Self {
        let mut index = Self::default();
        index.insert_module(root, &file.items);
        index
    }

    /// Index `items` as the module `module`, along with its inline submodules.
    pub fn insert_module(&mut self, module: ModuleName, items: &[Item]) {
        for item in items {
            if let Item::Mod(item_mod) = item {
                if let Some((_, content)) = &item_mod.content {
                    self.insert_module(module.join(item_mod.ident.to_string()), content);
                }
            }
        }
        self.modules
            .insert(module.clone(), Scope::from_items(module, items));
    }

    pub fn module(&self, name: &ModuleName) -> Option<&Scope> {
        self.modules.get(name)
    }

    /// Variants of the enum at the absolute path `path`, if it is declared in
    /// this file.
    pub fn enum_variants(&self, path: &[String]) -> Option<&[String]> {
        let (name, container) = path.split_last()?;
        let scope = self.modules.get(&ModuleName::new(container.iter().cloned()))?;
        match scope.declares(name) {
            Some(TypeDecl::Enum(variants)) => Some(variants.as_slice()),
            _ => None,
        }
    }

    pub fn len(&self) -> usize {
        self.modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }
}
