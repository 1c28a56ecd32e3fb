use async_trait::async_trait;

use super::{MatchRepository, SeasonRepository, TeamRepository};
use crate::domain::errors::DomainResult;

/// A transaction-scoped session over every repository
///
/// Changes become visible on [`UnitOfWork::commit`]. Dropping a unit of work
/// without committing discards them, so every exit path releases it.
#[async_trait]
pub trait UnitOfWork: SeasonRepository + MatchRepository + TeamRepository + Send {
    /// Make every change of this unit of work visible atomically
    async fn commit(self: Box<Self>) -> DomainResult<()>;
}

/// Entry point of the persistence layer
#[async_trait]
pub trait Store: Send + Sync {
    /// Open a new unit of work
    async fn begin(&self) -> DomainResult<Box<dyn UnitOfWork>>;
}
