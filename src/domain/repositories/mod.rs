// Repository ports
// Implemented by the adapters in infrastructure::repositories

pub mod match_repository;
pub mod season_repository;
pub mod store;
pub mod team_repository;

pub use match_repository::MatchRepository;
pub use season_repository::SeasonRepository;
pub use store::{Store, UnitOfWork};
pub use team_repository::TeamRepository;
