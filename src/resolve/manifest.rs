use super::ModuleName;

/// A module whose constructors are known without reading its source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestModule {
    /// Canonical name used for comparisons.
    pub path: ModuleName,
    /// Other absolute paths that name the same type.
    pub aliases: Vec<ModuleName>,
    pub constructors: Vec<String>,
    /// Whether the type and its constructors are in scope without imports.
    pub prelude: bool,
}

impl ManifestModule {
    fn answers_to(&self, path: &[String]) -> bool {
        self.path.segments() == path || self.aliases.iter().any(|alias| alias.segments() == path)
    }

    fn type_name(&self) -> Option<&str> {
        self.path.segments().last().map(String::as_str)
    }
}

/// Declared dependencies visible to every analyzed module.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DependencyManifest {
    modules: Vec<ManifestModule>,
}

impl Default for DependencyManifest {
    fn default() -> Self {
        Self::builtin()
    }
}

impl DependencyManifest {
    /// `Result` and `Option` as the standard prelude exposes them.
    pub fn builtin() -> Self {
        Self {
            modules: vec![
                ManifestModule {
                    path: ModuleName::result(),
                    aliases: vec![
                        ModuleName::parse("std::result::Result"),
                        ModuleName::parse("core::result::Result"),
                    ],
                    constructors: vec!["Ok".into(), "Err".into()],
                    prelude: true,
                },
                ManifestModule {
                    path: ModuleName::option(),
                    aliases: vec![
                        ModuleName::parse("std::option::Option"),
                        ModuleName::parse("core::option::Option"),
                    ],
                    constructors: vec!["Some".into(), "None".into()],
                    prelude: true,
                },
            ],
        }
    }

    pub fn with_module(mut self, module: ManifestModule) -> Self {
        self.modules.push(module);
        self
    }

    /// Register extra absolute paths that are aliases of the built-in result
    /// type, such as a crate-wide `type Result<T> = std::result::Result<T, E>`.
    pub fn with_result_aliases(mut self, aliases: impl IntoIterator<Item = ModuleName>) -> Self {
        let result = ModuleName::result();
        if let Some(module) = self.modules.iter_mut().find(|m| m.path == result) {
            module.aliases.extend(aliases);
        }
        self
    }

    /// Map an absolute path onto its canonical manifest name, or keep it.
    pub fn canonicalize(&self, path: &[String]) -> ModuleName {
        self.modules
            .iter()
            .find(|module| module.answers_to(path))
            .map(|module| module.path.clone())
            .unwrap_or_else(|| ModuleName::new(path.iter().cloned()))
    }

    /// Origin of a constructor that is in scope through the prelude.
    pub fn prelude_constructor(&self, name: &str) -> Option<&ModuleName> {
        self.modules
            .iter()
            .filter(|module| module.prelude)
            .find(|module| module.constructors.iter().any(|ctor| ctor == name))
            .map(|module| &module.path)
    }

    /// Canonical path of a type that is in scope through the prelude.
    pub fn prelude_type(&self, name: &str) -> Option<&ModuleName> {
        self.modules
            .iter()
            .filter(|module| module.prelude)
            .find(|module| module.type_name() == Some(name))
            .map(|module| &module.path)
    }

    /// Whether the module at `path` is known to export `constructor`.
    pub fn exports(&self, path: &[String], constructor: &str) -> Option<&ModuleName> {
        self.modules
            .iter()
            .find(|module| module.answers_to(path))
            .filter(|module| module.constructors.iter().any(|ctor| ctor == constructor))
            .map(|module| &module.path)
    }
}
