//! odonto-client
//!
//! Blocking REST client for the clinic backend. Thin wrapper around ureq with
//! the backend's `{ success, data }` envelope and a bounded retry policy.

pub mod client;
pub mod error;
pub mod retry;
pub mod transport;
