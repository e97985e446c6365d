//! odonto-cli library root.
//!
//! Re-exports the config and rendering modules so that integration tests can
//! exercise them without going through the command-line layer.

pub mod config;
pub mod render;
