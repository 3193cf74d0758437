//! CLI command implementations.

pub mod bpm;
pub mod convert;
pub mod detect;
pub mod parse;
