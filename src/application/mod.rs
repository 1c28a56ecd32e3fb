//! Application operations
//!
//! Each operation opens one unit of work, performs its reads, checks and
//! writes inside it and commits only on success. Any early return drops the
//! unit of work, which discards its changes.

pub mod matches;
pub mod seasons;
pub mod teams;

use chrono::{DateTime, Utc};

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::event::{Event, EventStatus};
use crate::domain::repositories::UnitOfWork;

/// Creation input shared by seasons and matches
#[derive(Debug, Clone, Default)]
pub struct EventDraft {
    pub id: Option<i64>,
    pub name: Option<String>,
    pub start: Option<DateTime<Utc>>,
    pub end: Option<DateTime<Utc>>,
    pub status: Option<EventStatus>,
}

impl EventDraft {
    /// Checks creation rules and builds the event
    ///
    /// # Errors
    /// - `InvalidArgument` when an id is supplied or the name is missing
    /// - `Validation` when start lies after end
    pub fn into_event(self) -> DomainResult<Event> {
        ensure_unpersisted(self.id)?;
        if self.name.is_none() {
            return Err(DomainError::invalid_argument("Name must be provided"));
        }
        Event::new(
            self.name,
            self.start,
            self.end,
            self.status.unwrap_or_default(),
        )
    }
}

/// Creation requests must not carry an id
pub(crate) fn ensure_unpersisted(id: Option<i64>) -> DomainResult<()> {
    match id {
        Some(_) => Err(DomainError::invalid_argument("ID must be None")),
        None => Ok(()),
    }
}

/// Fails with `NotFound` unless the referenced season exists
pub(crate) async fn ensure_season_exists(
    uow: &mut Box<dyn UnitOfWork>,
    season_id: i64,
) -> DomainResult<()> {
    match uow.find_season(season_id).await? {
        Some(_) => Ok(()),
        None => {
            tracing::debug!(season_id, "Rejected write: season does not exist");
            Err(DomainError::not_found("Season not found"))
        }
    }
}

/// An id in an update body must match the id in the path
pub(crate) fn ensure_same_id(path_id: i64, body_id: Option<i64>) -> DomainResult<()> {
    match body_id {
        Some(id) if id != path_id => Err(DomainError::invalid_argument(format!(
            "ID in body ({}) does not match ID in path ({})",
            id, path_id
        ))),
        _ => Ok(()),
    }
}
