//! AP-005: Drift detection — compare the live digest to the proof record.

use crate::core::state;
use crate::core::types::{ProofConfig, ProofOutcome};
use crate::tripwire::hasher;

/// Compare a freshly computed digest against a stored (trimmed) value.
pub fn compare(expected: String, stored: Option<String>) -> ProofOutcome {
    match stored {
        None => ProofOutcome::Missing { expected },
        Some(current) if current == expected => ProofOutcome::Valid { digest: current },
        Some(current) => ProofOutcome::Mismatch { expected, current },
    }
}

/// Check the proof record against the watched documents. Never writes.
pub fn check_proof(config: &ProofConfig) -> Result<ProofOutcome, String> {
    let expected = hasher::compute_digest(config)?;
    let stored = state::load_proof(config)?;
    Ok(compare(expected, stored))
}
