use std::collections::HashMap;

use async_trait::async_trait;
use dashmap::DashMap;

use rollcall::data::Activity;
use rollcall::errors::ActivityError;

/// A trait for the authoritative activity store.
///
/// The store holds every activity and its roster for the lifetime of the
/// process. Activities are created at seed time only; the exposed
/// operations never add or delete an activity, they only read the mapping
/// and mutate rosters. The trait is implementation-agnostic so tests can
/// swap in their own store if they need to.
#[async_trait]
pub trait ActivityService {
    /// The error type returned by operations on this service.
    type Error;

    /// Returns the full mapping of activity name to activity.
    ///
    /// No filtering, no pagination. Read-only.
    async fn list(&self) -> Result<HashMap<String, Activity>, Self::Error>;

    /// Appends `email` to the named activity's roster.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for an unknown activity, `AlreadyRegistered`
    /// when the email is already on the roster, and `CapacityReached`
    /// when the roster is full and the store enforces capacity.
    async fn signup(&self, name: &str, email: &str) -> Result<(), Self::Error>;

    /// Removes `email` from the named activity's roster.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for an unknown activity and `NotRegistered`
    /// when the email is not on the roster.
    async fn remove(&self, name: &str, email: &str) -> Result<(), Self::Error>;
}

/// An in-memory implementation of the [`ActivityService`] trait.
///
/// Backed by a `DashMap`, so each signup or removal holds the lock for a
/// single activity entry and is atomic with respect to other requests
/// touching the same activity. State lives only as long as the process.
pub struct ActivityServiceInMemory {
    activities: DashMap<String, Activity>,
    enforce_capacity: bool,
}

impl ActivityServiceInMemory {
    /// Creates an empty store.
    ///
    /// With `enforce_capacity` set, signup rejects a full roster; left
    /// unset, `max_participants` stays informational.
    pub fn new(enforce_capacity: bool) -> Self {
        Self {
            activities: DashMap::new(),
            enforce_capacity,
        }
    }

    /// Creates a store populated with the fixed activity seed.
    pub fn seeded(enforce_capacity: bool) -> Self {
        let service = Self::new(enforce_capacity);
        for (name, activity) in seed_activities() {
            service.activities.insert(name, activity);
        }
        service
    }
}

impl Default for ActivityServiceInMemory {
    fn default() -> Self {
        Self::new(false)
    }
}

/// The fixed set of activities the store starts with.
fn seed_activities() -> Vec<(String, Activity)> {
    vec![
        (
            "Chess Club".to_string(),
            Activity {
                description: "Learn strategies and compete in chess tournaments".to_string(),
                schedule: "Fridays, 3:30 PM - 5:00 PM".to_string(),
                max_participants: 12,
                participants: vec![
                    "michael@mergington.edu".to_string(),
                    "daniel@mergington.edu".to_string(),
                ],
            },
        ),
        (
            "Programming Class".to_string(),
            Activity {
                description: "Learn programming fundamentals and build software projects"
                    .to_string(),
                schedule: "Tuesdays and Thursdays, 3:30 PM - 4:30 PM".to_string(),
                max_participants: 20,
                participants: vec![
                    "emma@mergington.edu".to_string(),
                    "sophia@mergington.edu".to_string(),
                ],
            },
        ),
        (
            "Gym Class".to_string(),
            Activity {
                description: "Physical education and sports activities".to_string(),
                schedule: "Mondays, Wednesdays, Fridays, 2:00 PM - 3:00 PM".to_string(),
                max_participants: 30,
                participants: vec![
                    "john@mergington.edu".to_string(),
                    "olivia@mergington.edu".to_string(),
                ],
            },
        ),
    ]
}

#[async_trait]
impl ActivityService for ActivityServiceInMemory {
    type Error = ActivityError;

    async fn list(&self) -> Result<HashMap<String, Activity>, Self::Error> {
        Ok(self
            .activities
            .iter()
            .map(|entry| (entry.key().clone(), entry.value().clone()))
            .collect())
    }

    async fn signup(&self, name: &str, email: &str) -> Result<(), Self::Error> {
        let mut entry = self
            .activities
            .get_mut(name)
            .ok_or_else(|| ActivityError::NotFound(name.to_string()))?;

        if entry.is_registered(email) {
            return Err(ActivityError::AlreadyRegistered {
                activity: name.to_string(),
                email: email.to_string(),
            });
        }

        if self.enforce_capacity && entry.is_full() {
            return Err(ActivityError::CapacityReached(name.to_string()));
        }

        entry.add_participant(email.to_string());
        Ok(())
    }

    async fn remove(&self, name: &str, email: &str) -> Result<(), Self::Error> {
        let mut entry = self
            .activities
            .get_mut(name)
            .ok_or_else(|| ActivityError::NotFound(name.to_string()))?;

        if !entry.remove_participant(email) {
            return Err(ActivityError::NotRegistered {
                activity: name.to_string(),
                email: email.to_string(),
            });
        }

        Ok(())
    }
}
