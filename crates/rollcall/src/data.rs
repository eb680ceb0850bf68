//! Data structures shared between the activity store and the HTTP surface.

use serde::{Deserialize, Serialize};

/// A single extracurricular activity and its current roster.
///
/// Activities are keyed by name in the store, so the name does not appear
/// here. `participants` keeps signup order and never contains the same
/// email twice; the store enforces both at signup time.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Activity {
    pub description: String,
    pub schedule: String,
    pub max_participants: usize,
    pub participants: Vec<String>,
}

impl Activity {
    pub fn new(
        description: impl Into<String>,
        schedule: impl Into<String>,
        max_participants: usize,
    ) -> Self {
        Self {
            description: description.into(),
            schedule: schedule.into(),
            max_participants,
            participants: Vec::new(),
        }
    }

    /// Whether `email` is currently on this activity's roster.
    pub fn is_registered(&self, email: &str) -> bool {
        self.participants.iter().any(|p| p == email)
    }

    /// Whether the roster has reached `max_participants`.
    ///
    /// Informational unless the store was built with capacity enforcement.
    pub fn is_full(&self) -> bool {
        self.participants.len() >= self.max_participants
    }

    /// Appends `email` to the roster. Callers check for duplicates first.
    pub fn add_participant(&mut self, email: String) {
        self.participants.push(email);
    }

    /// Removes `email` from the roster, returning whether it was present.
    pub fn remove_participant(&mut self, email: &str) -> bool {
        let before = self.participants.len();
        self.participants.retain(|p| p != email);
        self.participants.len() < before
    }
}

/// Confirmation payload returned by the mutating endpoints.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Confirmation {
    pub message: String,
}

/// Query parameters carried by the signup and removal endpoints.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct ParticipantQuery {
    pub email: String,
}
