use serde::{Deserialize, Serialize};

/// Represents the lifecycle status of a season or match
///
/// # Status Transitions
/// ```text
/// Pending -> Ongoing -> Completed
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "event_status", rename_all = "lowercase")]
pub enum EventStatus {
    /// Scheduled but not started
    #[default]
    Pending,
    /// Currently running
    Ongoing,
    /// Finished
    Completed,
}

impl EventStatus {
    /// Checks if a transition from current status to next status is valid
    ///
    /// # Valid Transitions
    /// - Pending -> Ongoing
    /// - Ongoing -> Completed
    ///
    /// # Example
    /// ```
    /// use tourney_api::domain::event::EventStatus;
    ///
    /// assert!(EventStatus::Pending.can_transition_to(EventStatus::Ongoing));
    /// assert!(!EventStatus::Pending.can_transition_to(EventStatus::Completed));
    /// ```
    pub fn can_transition_to(&self, next: EventStatus) -> bool {
        use EventStatus::*;
        matches!((self, next), (Pending, Ongoing) | (Ongoing, Completed))
    }
}

impl std::fmt::Display for EventStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EventStatus::Pending => write!(f, "pending"),
            EventStatus::Ongoing => write!(f, "ongoing"),
            EventStatus::Completed => write!(f, "completed"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_transition_pending_to_ongoing() {
        assert!(EventStatus::Pending.can_transition_to(EventStatus::Ongoing));
    }

    #[test]
    fn valid_transition_ongoing_to_completed() {
        assert!(EventStatus::Ongoing.can_transition_to(EventStatus::Completed));
    }

    #[test]
    fn invalid_transition_pending_to_completed() {
        assert!(!EventStatus::Pending.can_transition_to(EventStatus::Completed));
    }

    #[test]
    fn invalid_transition_backwards() {
        assert!(!EventStatus::Ongoing.can_transition_to(EventStatus::Pending));
        assert!(!EventStatus::Completed.can_transition_to(EventStatus::Ongoing));
        assert!(!EventStatus::Completed.can_transition_to(EventStatus::Pending));
    }

    #[test]
    fn invalid_transition_to_same_status() {
        assert!(!EventStatus::Pending.can_transition_to(EventStatus::Pending));
        assert!(!EventStatus::Ongoing.can_transition_to(EventStatus::Ongoing));
        assert!(!EventStatus::Completed.can_transition_to(EventStatus::Completed));
    }

    #[test]
    fn default_is_pending() {
        assert_eq!(EventStatus::default(), EventStatus::Pending);
    }

    #[test]
    fn status_display() {
        assert_eq!(EventStatus::Pending.to_string(), "pending");
        assert_eq!(EventStatus::Ongoing.to_string(), "ongoing");
        assert_eq!(EventStatus::Completed.to_string(), "completed");
    }

    #[test]
    fn status_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&EventStatus::Ongoing).unwrap(),
            "\"ongoing\""
        );
        let status: EventStatus = serde_json::from_str("\"completed\"").unwrap();
        assert_eq!(status, EventStatus::Completed);
    }
}
