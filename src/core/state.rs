//! AP-003: Proof record management — load, save (atomic).

use super::types::ProofConfig;
use crate::tripwire::hasher::{self, DigestReport};
use std::path::{Path, PathBuf};

/// Temp path used while writing a proof record.
pub fn tmp_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

/// Load the stored digest, trimmed. Returns None if the record doesn't exist.
pub fn load_proof(config: &ProofConfig) -> Result<Option<String>, String> {
    let path = config.proof_path();
    if !path.exists() {
        return Ok(None);
    }
    let content = std::fs::read_to_string(&path)
        .map_err(|e| format!("cannot read {}: {}", path.display(), e))?;
    Ok(Some(content.trim().to_string()))
}

/// Save `<digest>\n` atomically (write to temp, then rename).
pub fn save_proof(config: &ProofConfig, digest: &str) -> Result<PathBuf, String> {
    let path = config.proof_path();
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .map_err(|e| format!("cannot create dir {}: {}", parent.display(), e))?;
        }
    }

    let tmp = tmp_path(&path);
    std::fs::write(&tmp, format!("{}\n", digest))
        .map_err(|e| format!("cannot write {}: {}", tmp.display(), e))?;
    std::fs::rename(&tmp, &path).map_err(|e| {
        format!(
            "cannot rename {} → {}: {}",
            tmp.display(),
            path.display(),
            e
        )
    })?;

    Ok(path)
}

/// Recompute the digest and persist it as the new proof record.
pub fn refresh_proof(config: &ProofConfig) -> Result<DigestReport, String> {
    let report = hasher::digest_report(config)?;
    save_proof(config, &report.digest)?;
    Ok(report)
}
