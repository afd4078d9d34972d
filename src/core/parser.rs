//! AP-002: Config loading and validation.
//!
//! Validates structural constraints on a `ProofConfig`:
//! - At least one watched document
//! - Watched entries non-empty and unique
//! - Proof file non-empty and not itself watched

use super::types::{ProofConfig, DEFAULT_CONFIG_FILE};
use std::collections::HashSet;
use std::path::{Component, Path, PathBuf};

/// Validation error.
#[derive(Debug, Clone)]
pub struct ValidationError {
    pub message: String,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

/// Parse a config file from disk.
pub fn parse_config_file(path: &Path) -> Result<ProofConfig, String> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| format!("failed to read {}: {}", path.display(), e))?;
    parse_config(&content)
}

/// Parse a config from a YAML string. An empty document yields defaults.
pub fn parse_config(yaml: &str) -> Result<ProofConfig, String> {
    if yaml.trim().is_empty() {
        return Ok(ProofConfig::default());
    }
    serde_yaml_ng::from_str(yaml).map_err(|e| format!("YAML parse error: {}", e))
}

/// Lexically normalize a root-relative entry: drop `.`, fold `..`.
/// `./README.md`, `docs/../README.md` and `README.md` all compare equal.
pub fn normalize_entry(entry: &str) -> PathBuf {
    let mut out = PathBuf::new();
    for component in Path::new(entry.trim()).components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                let popped = matches!(out.components().next_back(), Some(Component::Normal(_)))
                    && out.pop();
                if !popped {
                    out.push("..");
                }
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}

/// Validate a parsed config. Returns a list of errors (empty = valid).
pub fn validate_config(config: &ProofConfig) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    if config.watched.is_empty() {
        errors.push(ValidationError {
            message: "watched must list at least one document".to_string(),
        });
    }

    let mut seen = HashSet::new();
    for (i, name) in config.watched.iter().enumerate() {
        if name.trim().is_empty() {
            errors.push(ValidationError {
                message: format!("watched[{}] is empty", i),
            });
            continue;
        }
        if !seen.insert(normalize_entry(name)) {
            errors.push(ValidationError {
                message: format!("watched document '{}' listed more than once", name),
            });
        }
    }

    if config.proof_file.trim().is_empty() {
        errors.push(ValidationError {
            message: "proof_file must not be empty".to_string(),
        });
    } else if seen.contains(&normalize_entry(&config.proof_file)) {
        errors.push(ValidationError {
            message: format!(
                "proof_file '{}' cannot also be a watched document",
                config.proof_file
            ),
        });
    }

    errors
}

/// Resolve the effective config for a repository root.
///
/// An explicit `config_path` must exist. Otherwise `<root>/.agents-proof.yaml`
/// is used when present, and built-in defaults apply when it is not.
pub fn load_config(root: &Path, config_path: Option<&Path>) -> Result<ProofConfig, String> {
    let mut config = match config_path {
        Some(path) => parse_config_file(path)?,
        None => {
            let implicit = root.join(DEFAULT_CONFIG_FILE);
            if implicit.is_file() {
                parse_config_file(&implicit)?
            } else {
                ProofConfig::default()
            }
        }
    };
    config.root = root.to_path_buf();

    let errors = validate_config(&config);
    if !errors.is_empty() {
        let joined: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
        return Err(format!(
            "invalid config ({} error(s)): {}",
            errors.len(),
            joined.join("; ")
        ));
    }
    Ok(config)
}
