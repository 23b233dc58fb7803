//! `.errdrop.toml` configuration.

pub mod loader;

pub use loader::{load_config, load_config_from, parse_and_validate_config, CONFIG_FILE_NAME};

use crate::cli::OutputFormat;
use crate::resolve::{DependencyManifest, ModuleName};
use crate::rules::{IgnoredErrorRule, OriginCheck};
use serde::{Deserialize, Serialize};

/// How `Err` constructors are confirmed to be the built-in ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ResolutionMode {
    /// Resolve through imports and declarations; shadowed `Err` is skipped.
    #[default]
    Strict,
    /// Report every `Err(_)` regardless of where `Err` comes from.
    NameOnly,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolutionConfig {
    #[serde(default)]
    pub mode: ResolutionMode,

    /// Extra paths that name the built-in `Result`, e.g. `crate::error::Result`.
    #[serde(default)]
    pub result_aliases: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IgnoreConfig {
    #[serde(default)]
    pub patterns: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default)]
    pub default_format: Option<OutputFormat>,
}

/// Root configuration structure for errdrop
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrdropConfig {
    #[serde(default)]
    pub resolution: ResolutionConfig,

    #[serde(default)]
    pub ignore: IgnoreConfig,

    #[serde(default)]
    pub output: OutputConfig,
}

impl ErrdropConfig {
    pub fn validate(&self) -> Result<(), String> {
        for pattern in &self.ignore.patterns {
            glob::Pattern::new(pattern)
                .map_err(|e| format!("Invalid ignore pattern '{}': {}", pattern, e))?;
        }
        for alias in &self.resolution.result_aliases {
            if ModuleName::parse(alias).segments().is_empty() {
                return Err(format!("Invalid result alias '{}'", alias));
            }
        }
        Ok(())
    }

    pub fn manifest(&self) -> DependencyManifest {
        DependencyManifest::builtin().with_result_aliases(
            self.resolution
                .result_aliases
                .iter()
                .map(|alias| ModuleName::parse(alias)),
        )
    }

    pub fn origin_check(&self) -> OriginCheck {
        match self.resolution.mode {
            ResolutionMode::Strict => OriginCheck::strict(),
            ResolutionMode::NameOnly => OriginCheck::NameOnly,
        }
    }

    pub fn rule(&self) -> IgnoredErrorRule {
        IgnoredErrorRule::new(self.origin_check(), self.manifest())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;

    #[test]
    fn test_empty_config_is_strict() {
        let config: ErrdropConfig = toml::from_str("").expect("empty config parses");
        assert_eq!(config, ErrdropConfig::default());
        assert_eq!(config.origin_check(), OriginCheck::strict());
    }

    #[test]
    fn test_full_config() {
        let config: ErrdropConfig = toml::from_str(indoc! {r#"
            [resolution]
            mode = "name-only"
            result_aliases = ["crate::error::Result"]

            [ignore]
            patterns = ["target/**"]

            [output]
            default_format = "json"
        "#})
        .expect("config parses");

        assert_eq!(config.resolution.mode, ResolutionMode::NameOnly);
        assert_eq!(config.origin_check(), OriginCheck::NameOnly);
        assert_eq!(config.ignore.patterns, vec!["target/**".to_string()]);
        assert_eq!(config.output.default_format, Some(OutputFormat::Json));
        assert_eq!(
            config
                .manifest()
                .canonicalize(ModuleName::parse("crate::error::Result").segments()),
            ModuleName::result()
        );
    }

    #[test]
    fn test_validate_rejects_bad_glob() {
        let config = ErrdropConfig {
            ignore: IgnoreConfig {
                patterns: vec!["[".into()],
            },
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_empty_alias() {
        let config = ErrdropConfig {
            resolution: ResolutionConfig {
                result_aliases: vec!["::".into()],
                ..Default::default()
            },
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
