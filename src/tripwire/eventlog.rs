//! AP-006: Optional append-only JSONL audit log of refresh/check runs.

use crate::core::types::{ProofEvent, ProofOutcome, TimestampedEvent};
use crate::tripwire::hasher::DigestReport;
use std::io::Write;
use std::path::Path;

/// Generate an ISO 8601 UTC timestamp.
pub fn now_iso8601() -> String {
    use std::time::{SystemTime, UNIX_EPOCH};
    let secs = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs();
    format_iso8601(secs)
}

/// Format seconds since the Unix epoch as `YYYY-MM-DDTHH:MM:SSZ`.
pub fn format_iso8601(secs: u64) -> String {
    let days = secs / 86400;
    let time_secs = secs % 86400;
    let hours = time_secs / 3600;
    let minutes = (time_secs % 3600) / 60;
    let seconds = time_secs % 60;

    let mut y = 1970i64;
    let mut remaining = days as i64;
    loop {
        let year_days = if is_leap(y) { 366 } else { 365 };
        if remaining < year_days {
            break;
        }
        remaining -= year_days;
        y += 1;
    }
    let feb = if is_leap(y) { 29 } else { 28 };
    let month_days = [31, feb, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];
    let mut m = 12;
    for (i, &md) in month_days.iter().enumerate() {
        if remaining < md {
            m = i + 1;
            break;
        }
        remaining -= md;
    }
    let d = remaining + 1;

    format!(
        "{:04}-{:02}-{:02}T{:02}:{:02}:{:02}Z",
        y, m, d, hours, minutes, seconds
    )
}

fn is_leap(y: i64) -> bool {
    (y % 4 == 0 && y % 100 != 0) || y % 400 == 0
}

/// Event describing a completed refresh.
pub fn refreshed_event(report: &DigestReport, proof_file: &str, watched: usize) -> ProofEvent {
    ProofEvent::ProofRefreshed {
        digest: report.digest.clone(),
        proof_file: proof_file.to_string(),
        watched,
        missing: report.missing.clone(),
    }
}

/// Event describing a completed check.
pub fn checked_event(outcome: &ProofOutcome) -> ProofEvent {
    let current = match outcome {
        ProofOutcome::Valid { digest } => Some(digest.clone()),
        ProofOutcome::Missing { .. } => None,
        ProofOutcome::Mismatch { current, .. } => Some(current.clone()),
    };
    ProofEvent::ProofChecked {
        outcome: outcome.to_string(),
        expected: outcome.expected().to_string(),
        current,
    }
}

/// Append an event to the log at `path`, creating it (and parents) if needed.
pub fn append_event(path: &Path, event: ProofEvent) -> Result<(), String> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .map_err(|e| format!("cannot create dir {}: {}", parent.display(), e))?;
        }
    }

    let te = TimestampedEvent {
        ts: now_iso8601(),
        tool_version: env!("CARGO_PKG_VERSION").to_string(),
        event,
    };
    let json = serde_json::to_string(&te).map_err(|e| format!("JSON serialize error: {}", e))?;

    let mut file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| format!("cannot open event log {}: {}", path.display(), e))?;

    writeln!(file, "{}", json).map_err(|e| format!("write error: {}", e))?;

    Ok(())
}
