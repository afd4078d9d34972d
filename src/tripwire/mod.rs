//! Tripwire — SHA-256 document digest, drift detection, audit log.

pub mod drift;
pub mod eventlog;
pub mod hasher;
