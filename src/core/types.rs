//! AP-001: Core types — proof configuration, check outcomes, audit events.
//!
//! `ProofConfig` is the explicit replacement for a hardcoded watched list:
//! callers inject the repository root and may override the list via YAML.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

// ============================================================================
// Configuration
// ============================================================================

/// Default proof record name, relative to the repository root.
pub const DEFAULT_PROOF_FILE: &str = ".agents-proof";

/// Default config file name, looked up under the repository root.
pub const DEFAULT_CONFIG_FILE: &str = ".agents-proof.yaml";

/// Default watched documents. Order is part of the digest.
pub const DEFAULT_WATCHED: [&str; 5] = [
    "AGENTS.md",
    "README.md",
    "ARCHITECTURE.md",
    "TODO.md",
    "IDEAS.md",
];

/// Proof engine configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProofConfig {
    /// Repository root (injected by the caller, never read from YAML)
    #[serde(skip)]
    pub root: PathBuf,

    /// Proof record path relative to root
    #[serde(default = "default_proof_file")]
    pub proof_file: String,

    /// Watched documents relative to root (order-sensitive)
    #[serde(default = "default_watched")]
    pub watched: Vec<String>,
}

fn default_proof_file() -> String {
    DEFAULT_PROOF_FILE.to_string()
}

fn default_watched() -> Vec<String> {
    DEFAULT_WATCHED.iter().map(|s| s.to_string()).collect()
}

impl Default for ProofConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            proof_file: default_proof_file(),
            watched: default_watched(),
        }
    }
}

impl ProofConfig {
    /// Default configuration rooted at `root`.
    pub fn with_root(root: &Path) -> Self {
        Self {
            root: root.to_path_buf(),
            ..Self::default()
        }
    }

    /// Absolute-or-root-relative path of the proof record.
    pub fn proof_path(&self) -> PathBuf {
        self.root.join(&self.proof_file)
    }

    /// Watched documents resolved against the root, in list order.
    pub fn watched_paths(&self) -> Vec<PathBuf> {
        self.watched.iter().map(|w| self.root.join(w)).collect()
    }
}

// ============================================================================
// Check outcome
// ============================================================================

/// Result of comparing the current digest to the proof record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProofOutcome {
    /// Record matches the current digest.
    Valid { digest: String },
    /// No record on disk.
    Missing { expected: String },
    /// Record exists but holds a different (trimmed) value.
    Mismatch { expected: String, current: String },
}

impl ProofOutcome {
    pub fn is_valid(&self) -> bool {
        matches!(self, ProofOutcome::Valid { .. })
    }

    /// Process exit code for this outcome.
    pub fn exit_code(&self) -> i32 {
        if self.is_valid() {
            0
        } else {
            1
        }
    }

    /// Digest computed from the watched documents.
    pub fn expected(&self) -> &str {
        match self {
            ProofOutcome::Valid { digest } => digest.as_str(),
            ProofOutcome::Missing { expected } | ProofOutcome::Mismatch { expected, .. } => {
                expected.as_str()
            }
        }
    }
}

impl fmt::Display for ProofOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProofOutcome::Valid { .. } => write!(f, "valid"),
            ProofOutcome::Missing { .. } => write!(f, "missing"),
            ProofOutcome::Mismatch { .. } => write!(f, "mismatch"),
        }
    }
}

// ============================================================================
// Audit events
// ============================================================================

/// Audit event for the JSONL event log.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum ProofEvent {
    ProofRefreshed {
        digest: String,
        proof_file: String,
        watched: usize,
        missing: Vec<String>,
    },
    ProofChecked {
        outcome: String,
        expected: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        current: Option<String>,
    },
}

/// Timestamped event wrapper.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimestampedEvent {
    pub ts: String,
    pub tool_version: String,
    #[serde(flatten)]
    pub event: ProofEvent,
}

// ============================================================================
// Tests
// ============================================================================
