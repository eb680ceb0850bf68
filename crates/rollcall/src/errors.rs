//! Shared error types and utilities for the rollcall project.
pub use color_eyre::Report;

#[derive(Debug, thiserror::Error)]
pub enum LogError {
    #[error("Failed to install color_eyre")]
    ColorEyre(#[from] color_eyre::Report),
    #[error("Failed to install tracing-subscriber")]
    TracingSubscriber(#[from] Box<dyn std::error::Error + Send + Sync>),
}

/// Everything that can go wrong when reading or mutating the activity store.
///
/// Each variant maps to exactly one HTTP status in the handlers: `NotFound`
/// becomes 404, the rest become 400.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ActivityError {
    #[error("Activity {0} not found")]
    NotFound(String),
    #[error("{email} is already signed up for {activity}")]
    AlreadyRegistered { activity: String, email: String },
    #[error("{email} is not signed up for {activity}")]
    NotRegistered { activity: String, email: String },
    #[error("Activity {0} is already at capacity")]
    CapacityReached(String),
}
