use super::errors::DomainResult;
use super::event::{Event, EventPatch, LifecycleEvent};
use chrono::{DateTime, Utc};

/// Season aggregate root
///
/// Owns its matches and teams; deleting a season deletes them too.
/// The id is `None` until the store persists the season.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Season {
    id: Option<i64>,
    event: Event,
}

impl Season {
    /// Creates an unpersisted season from a validated event
    pub fn new(event: Event) -> Self {
        Self { id: None, event }
    }

    /// Starts the season
    pub fn start(&mut self, now: DateTime<Utc>) -> DomainResult<LifecycleEvent> {
        self.event.start(now)
    }

    /// Ends the season
    pub fn end(&mut self, now: DateTime<Utc>) -> DomainResult<LifecycleEvent> {
        self.event.end(now)
    }

    /// Applies a partial update
    pub fn apply(&mut self, patch: EventPatch) -> DomainResult<()> {
        self.event.apply(patch)
    }

    pub fn id(&self) -> Option<i64> {
        self.id
    }

    pub fn event(&self) -> &Event {
        &self.event
    }

    /// Reconstructs a Season from persistence layer data
    pub fn from_persistence(id: i64, event: Event) -> Self {
        Self {
            id: Some(id),
            event,
        }
    }
}
