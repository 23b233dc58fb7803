use std::fs;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use super::ErrdropConfig;
use crate::core::errors::{Error, Result};

pub const CONFIG_FILE_NAME: &str = ".errdrop.toml";

const MAX_TRAVERSAL_DEPTH: usize = 10;

/// Pure function to read and parse config file contents
pub(crate) fn read_config_file(path: &Path) -> std::result::Result<String, std::io::Error> {
    let file = fs::File::open(path)?;
    let mut reader = BufReader::new(file);
    let mut contents = String::new();
    reader.read_to_string(&mut contents)?;
    Ok(contents)
}

/// Pure function to parse and validate config from TOML string
pub fn parse_and_validate_config(contents: &str) -> Result<ErrdropConfig> {
    let config = toml::from_str::<ErrdropConfig>(contents).map_err(|e| {
        Error::Configuration(format!("Failed to parse {}: {}", CONFIG_FILE_NAME, e))
    })?;
    config.validate().map_err(Error::Configuration)?;
    Ok(config)
}

/// Load an explicitly requested config file. Errors are returned, not defaulted.
pub fn load_config_from(path: &Path) -> Result<ErrdropConfig> {
    let contents = read_config_file(path)
        .map_err(|e| Error::file_system("Failed to read config file", path, e))?;
    let config = parse_and_validate_config(&contents)?;
    debug!("Loaded config from {}", path.display());
    Ok(config)
}

/// Pure function to try loading config from a specific path
pub(crate) fn try_load_config_from_path(config_path: &Path) -> Option<ErrdropConfig> {
    let contents = match read_config_file(config_path) {
        Ok(contents) => contents,
        Err(e) => {
            handle_read_error(config_path, &e);
            return None;
        }
    };

    match parse_and_validate_config(&contents) {
        Ok(config) => {
            debug!("Loaded config from {}", config_path.display());
            Some(config)
        }
        Err(e) => {
            warn!("{}. Using defaults.", e);
            None
        }
    }
}

/// Handle file read errors with appropriate logging
pub(crate) fn handle_read_error(config_path: &Path, error: &std::io::Error) {
    // Only log actual errors, not "file not found"
    if error.kind() != std::io::ErrorKind::NotFound {
        warn!(
            "Failed to read config file {}: {}",
            config_path.display(),
            error
        );
    }
}

/// Pure function to generate directory ancestors up to a depth limit
pub fn directory_ancestors(start: PathBuf, max_depth: usize) -> impl Iterator<Item = PathBuf> {
    std::iter::successors(Some(start), |dir| {
        let mut parent = dir.clone();
        if parent.pop() {
            Some(parent)
        } else {
            None
        }
    })
    .take(max_depth)
}

/// Search `start` and its ancestors for `.errdrop.toml`.
pub fn find_config(start: PathBuf) -> Option<ErrdropConfig> {
    directory_ancestors(start, MAX_TRAVERSAL_DEPTH)
        .map(|dir| dir.join(CONFIG_FILE_NAME))
        .find_map(|path| try_load_config_from_path(&path))
}

pub fn load_config() -> ErrdropConfig {
    // Get current directory or return default
    let current = match std::env::current_dir() {
        Ok(dir) => dir,
        Err(e) => {
            warn!(
                "Failed to get current directory: {}. Using default config.",
                e
            );
            return ErrdropConfig::default();
        }
    };

    find_config(current).unwrap_or_else(|| {
        debug!(
            "No config found after checking {} directories. Using default config.",
            MAX_TRAVERSAL_DEPTH
        );
        ErrdropConfig::default()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ResolutionMode;
    use tempfile::TempDir;

    #[test]
    fn test_directory_ancestors_stops_at_depth() {
        let dirs: Vec<_> = directory_ancestors(PathBuf::from("/a/b/c/d"), 3).collect();
        assert_eq!(
            dirs,
            vec![
                PathBuf::from("/a/b/c/d"),
                PathBuf::from("/a/b/c"),
                PathBuf::from("/a/b")
            ]
        );
    }

    #[test]
    fn test_find_config_in_ancestor() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let nested = temp_dir.path().join("crates").join("core");
        std::fs::create_dir_all(&nested).expect("Failed to create dirs");
        std::fs::write(
            temp_dir.path().join(CONFIG_FILE_NAME),
            "[resolution]\nmode = \"name-only\"\n",
        )
        .expect("Failed to write config");

        let config = find_config(nested).expect("config is found");
        assert_eq!(config.resolution.mode, ResolutionMode::NameOnly);
    }

    #[test]
    fn test_invalid_config_falls_back() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let path = temp_dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(&path, "[resolution]\nmode = \"sometimes\"\n").expect("write");

        assert!(try_load_config_from_path(&path).is_none());
        assert!(matches!(
            load_config_from(&path),
            Err(Error::Configuration(_))
        ));
    }

    #[test]
    fn test_missing_explicit_config_is_an_error() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let result = load_config_from(&temp_dir.path().join("absent.toml"));
        assert!(matches!(result, Err(Error::FileSystem { .. })));
    }
}
