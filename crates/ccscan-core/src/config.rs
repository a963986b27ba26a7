//! Configuration types

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::types::{default_fallbacks, CompilerCandidate};

/// Default number of times a compiler invocation is attempted
pub const DEFAULT_MAX_ATTEMPTS: u32 = 10;

/// Default name of the synthetic header written by `preprocess`
pub const DEFAULT_PSEUDO_HEADER: &str = "tmp_pseudoheader.h";

/// ccscan configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Compiler discovery configuration
    pub compiler: CompilerConfig,

    /// Preprocessing configuration
    pub preprocess: PreprocessConfig,
}

impl Config {
    /// Load configuration from a YAML (`.yaml`/`.yml`) or JSON file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let is_yaml = matches!(
            path.extension().and_then(|e| e.to_str()),
            Some("yaml") | Some("yml")
        );

        if is_yaml {
            serde_yaml::from_str(&content)
                .map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))
        } else {
            serde_json::from_str(&content)
                .map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))
        }
    }
}

/// Compiler discovery configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CompilerConfig {
    /// Environment variable overriding compiler selection
    pub env_var: String,

    /// Candidates probed after the override and platform default
    pub fallbacks: Vec<CompilerCandidate>,

    /// Require the version probe to exit successfully
    pub strict_probe: bool,

    /// Attempts per invocation before giving up
    pub max_attempts: u32,
}

impl Default for CompilerConfig {
    fn default() -> Self {
        Self {
            env_var: "CC".into(),
            fallbacks: default_fallbacks(),
            strict_probe: false,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }
}

/// Preprocessing configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PreprocessConfig {
    /// Directory receiving the pseudo-header
    pub work_dir: PathBuf,

    /// File name of the pseudo-header
    pub pseudo_header: String,

    /// Include directories added once the compiler is selected
    pub include_paths: Vec<PathBuf>,

    /// `NAME` or `NAME=VALUE` macros defined once the compiler is selected
    pub defines: Vec<String>,
}

impl Default for PreprocessConfig {
    fn default() -> Self {
        Self {
            work_dir: PathBuf::from("."),
            pseudo_header: DEFAULT_PSEUDO_HEADER.into(),
            include_paths: vec![],
            defines: vec![],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::CompilerKind;
    use pretty_assertions::assert_eq;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.compiler.env_var, "CC");
        assert_eq!(config.compiler.max_attempts, 10);
        assert!(!config.compiler.strict_probe);
        assert_eq!(config.preprocess.pseudo_header, "tmp_pseudoheader.h");
        assert_eq!(config.preprocess.work_dir, PathBuf::from("."));
    }

    #[test]
    fn test_load_yaml_partial() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("ccscan.yaml");
        fs::write(
            &path,
            r#"
compiler:
  env_var: MY_CC
  strict_probe: true
  fallbacks:
    - path: [clang-17]
      kind: clang
preprocess:
  include_paths: [src, build/include]
  defines: [NDEBUG, LEVEL=3]
"#,
        )
        .unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.compiler.env_var, "MY_CC");
        assert!(config.compiler.strict_probe);
        assert_eq!(config.compiler.max_attempts, 10);
        assert_eq!(
            config.compiler.fallbacks,
            vec![CompilerCandidate::new("clang-17", CompilerKind::Clang)]
        );
        assert_eq!(config.preprocess.pseudo_header, "tmp_pseudoheader.h");
        assert_eq!(config.preprocess.defines, vec!["NDEBUG", "LEVEL=3"]);
    }

    #[test]
    fn test_load_json() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("ccscan.json");
        fs::write(&path, r#"{"compiler": {"max_attempts": 3}}"#).unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.compiler.max_attempts, 3);
        assert_eq!(config.compiler.fallbacks.len(), 7);
    }

    #[test]
    fn test_load_invalid() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("broken.json");
        fs::write(&path, "{ not json").unwrap();

        match Config::load(&path) {
            Err(Error::Config(msg)) => assert!(msg.contains("broken.json")),
            other => panic!("expected config error, got {:?}", other),
        }
    }
}
