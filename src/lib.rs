//! agents-proof — drift tripwire for human-maintained agent documentation.
//!
//! Hashes an ordered list of watched documents into a short SHA-256 digest,
//! persists it as a proof record, and verifies the record on demand.

pub mod cli;
pub mod core;
pub mod tripwire;
