use chrono::{DateTime, Utc};

/// Lifecycle moments emitted by a successful status transition
///
/// Operations log these after the transition has been committed.
///
/// # Example
/// ```
/// use chrono::Utc;
/// use tourney_api::domain::event::LifecycleEvent;
///
/// let now = Utc::now();
/// let event = LifecycleEvent::Started { at: now };
/// assert_eq!(event.at(), now);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleEvent {
    /// Fired when a pending event becomes ongoing
    Started {
        /// Stamped start time
        at: DateTime<Utc>,
    },
    /// Fired when an ongoing event completes
    Completed {
        /// Stamped end time
        at: DateTime<Utc>,
    },
}

impl LifecycleEvent {
    /// Returns the timestamp recorded by the transition
    pub fn at(&self) -> DateTime<Utc> {
        match self {
            LifecycleEvent::Started { at } | LifecycleEvent::Completed { at } => *at,
        }
    }

    /// Short verb used in log lines
    pub fn label(&self) -> &'static str {
        match self {
            LifecycleEvent::Started { .. } => "started",
            LifecycleEvent::Completed { .. } => "completed",
        }
    }
}
