use async_trait::async_trait;

use crate::domain::errors::DomainResult;
use crate::domain::matches::Match;

/// Repository trait for matches
#[async_trait]
pub trait MatchRepository: Send {
    /// Find a match by its ID
    async fn find_match(&mut self, id: i64) -> DomainResult<Option<Match>>;

    /// List matches, optionally filtered by season
    async fn list_matches(&mut self, season_id: Option<i64>) -> DomainResult<Vec<Match>>;

    /// Insert an unpersisted match and return it with its assigned id
    async fn insert_match(&mut self, game: &Match) -> DomainResult<Match>;

    /// Overwrite a persisted match
    async fn save_match(&mut self, game: &Match) -> DomainResult<()>;

    /// Delete a match, returning `false` when it did not exist
    async fn delete_match(&mut self, id: i64) -> DomainResult<bool>;
}
