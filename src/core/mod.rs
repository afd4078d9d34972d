//! Core proof logic — types, config parsing, proof record state.

pub mod parser;
pub mod state;
pub mod types;
