// Event domain module
// Shared name/schedule/status shape, its lifecycle events and status value object

#![allow(clippy::module_inception)]

pub mod event;
pub mod events;
pub mod value_objects;

// Re-export main types for convenience
pub use event::{validate_time_order, Event, EventPatch};
pub use events::LifecycleEvent;
pub use value_objects::EventStatus;
