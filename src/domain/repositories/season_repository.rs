use async_trait::async_trait;

use crate::domain::errors::DomainResult;
use crate::domain::season::Season;

/// Repository trait for Season aggregate
///
/// Methods run inside the enclosing unit of work and become visible only
/// once it commits.
#[async_trait]
pub trait SeasonRepository: Send {
    /// Find a season by its ID
    async fn find_season(&mut self, id: i64) -> DomainResult<Option<Season>>;

    /// List seasons, optionally restricted to a single id
    async fn list_seasons(&mut self, id: Option<i64>) -> DomainResult<Vec<Season>>;

    /// Insert an unpersisted season and return it with its assigned id
    async fn insert_season(&mut self, season: &Season) -> DomainResult<Season>;

    /// Overwrite a persisted season
    async fn save_season(&mut self, season: &Season) -> DomainResult<()>;

    /// Delete a season with its matches and teams
    ///
    /// Returns `false` when no season had that id.
    async fn delete_season(&mut self, id: i64) -> DomainResult<bool>;
}
