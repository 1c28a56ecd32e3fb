use async_trait::async_trait;

use crate::domain::errors::DomainResult;
use crate::domain::team::Team;

/// Repository trait for teams
///
/// Implementations report a duplicate team name as `DomainError::Conflict`.
#[async_trait]
pub trait TeamRepository: Send {
    /// Find a team by its ID
    async fn find_team(&mut self, id: i64) -> DomainResult<Option<Team>>;

    /// List teams, optionally filtered by season
    async fn list_teams(&mut self, season_id: Option<i64>) -> DomainResult<Vec<Team>>;

    /// Insert an unpersisted team and return it with its assigned id
    async fn insert_team(&mut self, team: &Team) -> DomainResult<Team>;

    /// Overwrite a persisted team
    async fn save_team(&mut self, team: &Team) -> DomainResult<()>;

    /// Delete a team, returning `false` when it did not exist
    async fn delete_team(&mut self, id: i64) -> DomainResult<bool>;
}
