// Domain layer module exports
// Following Hexagonal Architecture and DDD principles
// Domain is independent of infrastructure concerns

pub mod errors;
pub mod event;
pub mod matches;
pub mod repositories;
pub mod season;
pub mod team;
