use super::errors::DomainResult;
use super::event::{Event, EventPatch, LifecycleEvent};
use chrono::{DateTime, Utc};

/// A match, optionally assigned to a season
///
/// The season reference is used for lookup only; a match's lifecycle is
/// independent of its season's.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Match {
    id: Option<i64>,
    event: Event,
    season_id: Option<i64>,
}

/// Partial update of a [`Match`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatchPatch {
    pub event: EventPatch,
    pub season_id: Option<Option<i64>>,
}

impl Match {
    /// Creates an unpersisted match
    pub fn new(event: Event, season_id: Option<i64>) -> Self {
        Self {
            id: None,
            event,
            season_id,
        }
    }

    /// Starts the match
    pub fn start(&mut self, now: DateTime<Utc>) -> DomainResult<LifecycleEvent> {
        self.event.start(now)
    }

    /// Ends the match
    pub fn end(&mut self, now: DateTime<Utc>) -> DomainResult<LifecycleEvent> {
        self.event.end(now)
    }

    /// Applies a partial update; nothing changes when the event part is rejected
    pub fn apply(&mut self, patch: MatchPatch) -> DomainResult<()> {
        self.event.apply(patch.event)?;
        if let Some(season_id) = patch.season_id {
            self.season_id = season_id;
        }
        Ok(())
    }

    pub fn id(&self) -> Option<i64> {
        self.id
    }

    pub fn event(&self) -> &Event {
        &self.event
    }

    pub fn season_id(&self) -> Option<i64> {
        self.season_id
    }

    /// Reconstructs a Match from persistence layer data
    pub fn from_persistence(id: i64, event: Event, season_id: Option<i64>) -> Self {
        Self {
            id: Some(id),
            event,
            season_id,
        }
    }
}
