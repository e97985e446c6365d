//! odonto-core
//!
//! Pure domain types and REST path conventions for the dental clinic.
//! No HTTP dependency; this is the shared vocabulary of the odonto crates.

pub mod api_paths;
pub mod error;
pub mod models;
