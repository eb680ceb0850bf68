//! Backend services for the activity store.
//!
//! This module provides the service layer abstraction and implementation
//! for the authoritative activity state. Currently includes an in-memory
//! implementation; nothing is persisted across restarts.

pub mod activities;

pub use activities::*;
