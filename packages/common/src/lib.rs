//! Common infrastructure shared by the hashbridge crates
//!
//! This crate provides:
//! - `env_logger` based logging initialization
//! - Structured log helpers for adapter entry points and library failures
//! - Hex buffer dumps for diagnostic output

pub mod logging;

pub use logging::{LoggingTransformer, hex_dump};
