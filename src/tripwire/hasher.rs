//! AP-004: SHA-256 document digest over the watched list.
//!
//! Each watched entry contributes its base name followed by its raw bytes.
//! An absent entry contributes `missing::{name}` instead, so deleting a file
//! changes the digest differently from emptying it.

use crate::core::types::ProofConfig;
use sha2::{Digest, Sha256};
use std::io::Read;
use std::path::Path;

const STREAM_BUF_SIZE: usize = 65536;

/// Hex characters kept from the full SHA-256 (80 bits).
pub const DIGEST_LEN: usize = 20;

/// Sentinel prefix fed for absent watched documents.
pub const MISSING_PREFIX: &str = "missing::";

/// Digest plus the watched entries that were absent while computing it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DigestReport {
    pub digest: String,
    pub missing: Vec<String>,
}

/// Final path component as used in the hash stream.
fn base_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default()
}

/// Stream a file's contents into the hasher.
fn update_with_file(hasher: &mut Sha256, path: &Path) -> Result<(), String> {
    let mut file =
        std::fs::File::open(path).map_err(|e| format!("cannot open {}: {}", path.display(), e))?;
    let mut buf = [0u8; STREAM_BUF_SIZE];
    loop {
        let n = file
            .read(&mut buf)
            .map_err(|e| format!("read error {}: {}", path.display(), e))?;
        if n == 0 {
            break;
        }
        hasher.update(&buf[..n]);
    }
    Ok(())
}

/// Truncated uppercase hex of a finalized hasher.
fn finalize_digest(hasher: Sha256) -> String {
    let hex = format!("{:X}", hasher.finalize());
    hex[..DIGEST_LEN].to_string()
}

/// Digest an ordered list of paths, recording which ones were absent.
pub fn digest_paths(paths: &[impl AsRef<Path>]) -> Result<DigestReport, String> {
    let mut hasher = Sha256::new();
    let mut missing = Vec::new();

    for path in paths {
        let path = path.as_ref();
        let name = base_name(path);
        if !path.exists() {
            hasher.update(format!("{}{}", MISSING_PREFIX, name).as_bytes());
            missing.push(name);
            continue;
        }
        hasher.update(name.as_bytes());
        update_with_file(&mut hasher, path)?;
    }

    Ok(DigestReport {
        digest: finalize_digest(hasher),
        missing,
    })
}

/// Digest the configured watched documents.
pub fn digest_report(config: &ProofConfig) -> Result<DigestReport, String> {
    digest_paths(&config.watched_paths())
}

/// Compute the digest string for the configured watched documents.
pub fn compute_digest(config: &ProofConfig) -> Result<String, String> {
    Ok(digest_report(config)?.digest)
}
