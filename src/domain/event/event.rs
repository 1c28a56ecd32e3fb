use super::events::LifecycleEvent;
use super::value_objects::EventStatus;
use crate::domain::errors::{DomainError, DomainResult};
use chrono::{DateTime, Utc};

/// Shared name/schedule/status shape embedded in seasons and matches
///
/// Enforces the time-order rule and the lifecycle state machine.
///
/// # Invariants
/// - When both `start` and `end` are set, `start <= end`
/// - Status only moves `Pending -> Ongoing -> Completed`
/// - A rejected mutation leaves the event unchanged
///
/// # Example
/// ```
/// use chrono::Utc;
/// use tourney_api::domain::event::{Event, EventStatus};
///
/// let mut event = Event::new(Some("Spring".to_string()), None, None, EventStatus::Pending)
///     .expect("valid event");
///
/// event.start(Utc::now()).expect("pending events can start");
/// assert_eq!(event.status(), EventStatus::Ongoing);
/// assert!(event.start_time().is_some());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    name: Option<String>,
    start: Option<DateTime<Utc>>,
    end: Option<DateTime<Utc>>,
    status: EventStatus,
}

/// Partial update of an [`Event`]
///
/// The outer `Option` tells whether a field was supplied; for nullable fields
/// the inner `Option` carries the new value, `None` meaning "set to null".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventPatch {
    pub name: Option<Option<String>>,
    pub start: Option<Option<DateTime<Utc>>>,
    pub end: Option<Option<DateTime<Utc>>>,
    pub status: Option<EventStatus>,
}

impl EventPatch {
    /// True when no field was supplied
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.start.is_none() && self.end.is_none() && self.status.is_none()
    }
}

/// Rejects a schedule whose start lies after its end
pub fn validate_time_order(
    start: Option<DateTime<Utc>>,
    end: Option<DateTime<Utc>>,
) -> DomainResult<()> {
    match (start, end) {
        (Some(start), Some(end)) if start > end => Err(DomainError::Validation(format!(
            "Start ({}) must not be after end ({})",
            start.to_rfc3339(),
            end.to_rfc3339()
        ))),
        _ => Ok(()),
    }
}

impl Event {
    /// Creates a new Event
    ///
    /// # Returns
    /// * `Ok(Event)` - When the schedule is in order
    /// * `Err(DomainError::Validation)` - When `start > end`
    ///
    /// The name is deliberately not required here; create operations check it.
    pub fn new(
        name: Option<String>,
        start: Option<DateTime<Utc>>,
        end: Option<DateTime<Utc>>,
        status: EventStatus,
    ) -> DomainResult<Self> {
        validate_time_order(start, end)?;

        Ok(Self {
            name,
            start,
            end,
            status,
        })
    }

    /// Starts the event (transitions from Pending to Ongoing)
    ///
    /// # Business Rules
    /// - Event must be Pending
    /// - Stamps `start` with `now`
    /// - A planned end already in the past is cleared
    pub fn start(&mut self, now: DateTime<Utc>) -> DomainResult<LifecycleEvent> {
        let next_status = EventStatus::Ongoing;
        if !self.status.can_transition_to(next_status) {
            return Err(DomainError::InvalidTransition(format!(
                "Cannot start an event in {} status",
                self.status
            )));
        }

        self.status = next_status;
        self.start = Some(now);
        if matches!(self.end, Some(end) if end < now) {
            self.end = None;
        }

        Ok(LifecycleEvent::Started { at: now })
    }

    /// Ends the event (transitions from Ongoing to Completed)
    ///
    /// # Business Rules
    /// - Event must be Ongoing
    /// - Stamps `end` with `now`, never earlier than `start`
    /// - If the stored `start` lies after `now`, `end` is stamped with `start`
    ///   instead of `now` so the time order still holds
    pub fn end(&mut self, now: DateTime<Utc>) -> DomainResult<LifecycleEvent> {
        let next_status = EventStatus::Completed;
        if !self.status.can_transition_to(next_status) {
            return Err(DomainError::InvalidTransition(format!(
                "Cannot end an event in {} status",
                self.status
            )));
        }

        let end = match self.start {
            Some(start) if start > now => start,
            _ => now,
        };

        self.status = next_status;
        self.end = Some(end);

        Ok(LifecycleEvent::Completed { at: end })
    }

    /// Applies a partial update, overwriting only supplied fields
    ///
    /// Status is overwritten as given; the state machine only guards
    /// [`Event::start`] and [`Event::end`].
    pub fn apply(&mut self, patch: EventPatch) -> DomainResult<()> {
        let start = patch.start.unwrap_or(self.start);
        let end = patch.end.unwrap_or(self.end);
        validate_time_order(start, end)?;

        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
        self.start = start;
        self.end = end;

        Ok(())
    }

    // ===== Getters =====

    /// Returns the event name if set
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Returns the start timestamp if set
    pub fn start_time(&self) -> Option<DateTime<Utc>> {
        self.start
    }

    /// Returns the end timestamp if set
    pub fn end_time(&self) -> Option<DateTime<Utc>> {
        self.end
    }

    /// Returns the current status
    pub fn status(&self) -> EventStatus {
        self.status
    }

    /// Reconstructs an Event from persistence layer data
    ///
    /// Bypasses validation; stored rows were validated when written.
    pub fn from_persistence(
        name: Option<String>,
        start: Option<DateTime<Utc>>,
        end: Option<DateTime<Utc>>,
        status: EventStatus,
    ) -> Self {
        Self {
            name,
            start,
            end,
            status,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn pending(name: &str) -> Event {
        Event::new(Some(name.to_string()), None, None, EventStatus::Pending).unwrap()
    }

    #[test]
    fn create_event_without_schedule() {
        let event = pending("Spring");

        assert_eq!(event.name(), Some("Spring"));
        assert_eq!(event.status(), EventStatus::Pending);
        assert!(event.start_time().is_none());
        assert!(event.end_time().is_none());
    }

    #[test]
    fn create_event_with_ordered_schedule() {
        let start = Utc::now();
        let end = start + Duration::hours(2);

        let event = Event::new(None, Some(start), Some(end), EventStatus::Pending).unwrap();

        assert_eq!(event.start_time(), Some(start));
        assert_eq!(event.end_time(), Some(end));
        assert!(event.name().is_none());
    }

    #[test]
    fn create_event_with_equal_start_and_end() {
        let at = Utc::now();
        assert!(Event::new(None, Some(at), Some(at), EventStatus::Pending).is_ok());
    }

    #[test]
    fn create_event_with_start_after_end_fails() {
        let end = Utc::now();
        let start = end + Duration::seconds(1);

        let result = Event::new(None, Some(start), Some(end), EventStatus::Pending);

        assert!(matches!(result, Err(DomainError::Validation(_))));
    }

    #[test]
    fn create_event_with_only_one_bound() {
        let at = Utc::now();
        assert!(Event::new(None, Some(at), None, EventStatus::Pending).is_ok());
        assert!(Event::new(None, None, Some(at), EventStatus::Pending).is_ok());
    }

    #[test]
    fn start_pending_event() {
        let mut event = pending("Final");
        let now = Utc::now();

        let lifecycle = event.start(now).unwrap();

        assert_eq!(lifecycle, LifecycleEvent::Started { at: now });
        assert_eq!(event.status(), EventStatus::Ongoing);
        assert_eq!(event.start_time(), Some(now));
    }

    #[test]
    fn start_non_pending_event_fails_without_mutation() {
        let mut event = pending("Final");
        event.start(Utc::now()).unwrap();
        let before = event.clone();

        let result = event.start(Utc::now() + Duration::minutes(5));

        assert!(matches!(result, Err(DomainError::InvalidTransition(_))));
        assert_eq!(event, before);
    }

    #[test]
    fn start_clears_planned_end_in_the_past() {
        let now = Utc::now();
        let mut event = Event::new(
            None,
            Some(now - Duration::days(2)),
            Some(now - Duration::days(1)),
            EventStatus::Pending,
        )
        .unwrap();

        event.start(now).unwrap();

        assert_eq!(event.start_time(), Some(now));
        assert!(event.end_time().is_none());
    }

    #[test]
    fn start_keeps_planned_end_in_the_future() {
        let now = Utc::now();
        let planned_end = now + Duration::days(1);
        let mut event = Event::new(None, None, Some(planned_end), EventStatus::Pending).unwrap();

        event.start(now).unwrap();

        assert_eq!(event.end_time(), Some(planned_end));
    }

    #[test]
    fn end_ongoing_event() {
        let mut event = pending("Final");
        let started = Utc::now();
        event.start(started).unwrap();
        let ended = started + Duration::minutes(90);

        let lifecycle = event.end(ended).unwrap();

        assert_eq!(lifecycle, LifecycleEvent::Completed { at: ended });
        assert_eq!(event.status(), EventStatus::Completed);
        assert_eq!(event.end_time(), Some(ended));
        assert_eq!(event.start_time(), Some(started));
    }

    #[test]
    fn end_pending_event_fails_without_mutation() {
        let mut event = pending("Final");
        let before = event.clone();

        let result = event.end(Utc::now());

        assert!(matches!(result, Err(DomainError::InvalidTransition(_))));
        assert_eq!(event, before);
    }

    #[test]
    fn end_completed_event_fails() {
        let mut event = pending("Final");
        event.start(Utc::now()).unwrap();
        event.end(Utc::now()).unwrap();

        assert!(matches!(
            event.end(Utc::now()),
            Err(DomainError::InvalidTransition(_))
        ));
        assert!(matches!(
            event.start(Utc::now()),
            Err(DomainError::InvalidTransition(_))
        ));
    }

    #[test]
    fn end_never_precedes_start() {
        let now = Utc::now();
        let future_start = now + Duration::hours(1);
        let mut event =
            Event::from_persistence(None, Some(future_start), None, EventStatus::Ongoing);

        event.end(now).unwrap();

        assert_eq!(event.end_time(), Some(future_start));
    }

    #[test]
    fn apply_status_only_leaves_other_fields() {
        let start = Utc::now();
        let end = start + Duration::hours(1);
        let mut event =
            Event::new(Some("Cup".to_string()), Some(start), Some(end), EventStatus::Pending)
                .unwrap();

        event
            .apply(EventPatch {
                status: Some(EventStatus::Ongoing),
                ..EventPatch::default()
            })
            .unwrap();

        assert_eq!(event.status(), EventStatus::Ongoing);
        assert_eq!(event.name(), Some("Cup"));
        assert_eq!(event.start_time(), Some(start));
        assert_eq!(event.end_time(), Some(end));
    }

    #[test]
    fn apply_explicit_null_clears_field() {
        let mut event =
            Event::new(Some("Cup".to_string()), Some(Utc::now()), None, EventStatus::Pending)
                .unwrap();

        event
            .apply(EventPatch {
                start: Some(None),
                ..EventPatch::default()
            })
            .unwrap();

        assert!(event.start_time().is_none());
        assert_eq!(event.name(), Some("Cup"));
    }

    #[test]
    fn apply_out_of_order_schedule_fails_without_mutation() {
        let start = Utc::now();
        let mut event =
            Event::new(Some("Cup".to_string()), Some(start), None, EventStatus::Pending).unwrap();
        let before = event.clone();

        let result = event.apply(EventPatch {
            name: Some(Some("Renamed".to_string())),
            end: Some(Some(start - Duration::minutes(1))),
            ..EventPatch::default()
        });

        assert!(matches!(result, Err(DomainError::Validation(_))));
        assert_eq!(event, before);
    }

    #[test]
    fn empty_patch() {
        assert!(EventPatch::default().is_empty());
        assert!(!EventPatch {
            status: Some(EventStatus::Completed),
            ..EventPatch::default()
        }
        .is_empty());
    }
}
