//! The shared library for Rollcall, an in-memory activity-signup service.
//!
//! This library provides the pieces shared across the project: the activity
//! data structures, the error taxonomy, and logging setup.

pub mod data;
pub mod errors;
pub mod log;

pub use serde;
pub use serde_json;
pub use tracing;
