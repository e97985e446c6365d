//! odonto-display
//!
//! Reconciles the CPO snapshot persisted by the backend with the one
//! calculated from the odontogram being edited, and exposes the result as a
//! single explicit display state.

pub mod error;
pub mod manager;
pub mod source;
pub mod state;
