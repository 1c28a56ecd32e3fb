use chrono::Utc;

use super::{ensure_same_id, EventDraft};
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::event::EventPatch;
use crate::domain::matches::Match;
use crate::domain::repositories::{Store, UnitOfWork};
use crate::domain::season::Season;
use crate::domain::team::Team;

async fn load(uow: &mut Box<dyn UnitOfWork>, id: i64) -> DomainResult<Season> {
    uow.find_season(id)
        .await?
        .ok_or_else(|| DomainError::not_found("Season not found"))
}

/// Lists seasons, optionally restricted to one id
pub async fn list_seasons(store: &dyn Store, id: Option<i64>) -> DomainResult<Vec<Season>> {
    let mut uow = store.begin().await?;
    uow.list_seasons(id).await
}

/// Retrieves a season by its ID
pub async fn get_season(store: &dyn Store, id: i64) -> DomainResult<Season> {
    let mut uow = store.begin().await?;
    load(&mut uow, id).await
}

/// Creates a new season
pub async fn create_season(store: &dyn Store, draft: EventDraft) -> DomainResult<Season> {
    let season = Season::new(draft.into_event()?);

    let mut uow = store.begin().await?;
    let season = uow.insert_season(&season).await?;
    uow.commit().await?;

    tracing::info!(season_id = ?season.id(), "Season created");
    Ok(season)
}

/// Applies a partial update to a season
pub async fn update_season(
    store: &dyn Store,
    id: i64,
    body_id: Option<i64>,
    patch: EventPatch,
) -> DomainResult<Season> {
    ensure_same_id(id, body_id)?;

    let mut uow = store.begin().await?;
    let mut season = load(&mut uow, id).await?;
    season.apply(patch)?;
    uow.save_season(&season).await?;
    uow.commit().await?;

    Ok(season)
}

/// Deletes a season together with its matches and teams
pub async fn delete_season(store: &dyn Store, id: i64) -> DomainResult<()> {
    let mut uow = store.begin().await?;
    if !uow.delete_season(id).await? {
        return Err(DomainError::not_found("Season not found"));
    }
    uow.commit().await?;

    tracing::info!(season_id = id, "Season deleted");
    Ok(())
}

/// Moves a pending season to ongoing
pub async fn start_season(store: &dyn Store, id: i64) -> DomainResult<Season> {
    let mut uow = store.begin().await?;
    let mut season = load(&mut uow, id).await?;
    let event = season.start(Utc::now())?;
    uow.save_season(&season).await?;
    uow.commit().await?;

    tracing::info!(season_id = id, at = %event.at(), "Season {}", event.label());
    Ok(season)
}

/// Moves an ongoing season to completed
pub async fn end_season(store: &dyn Store, id: i64) -> DomainResult<Season> {
    let mut uow = store.begin().await?;
    let mut season = load(&mut uow, id).await?;
    let event = season.end(Utc::now())?;
    uow.save_season(&season).await?;
    uow.commit().await?;

    tracing::info!(season_id = id, at = %event.at(), "Season {}", event.label());
    Ok(season)
}

/// Lists the matches of an existing season
pub async fn list_season_matches(store: &dyn Store, id: i64) -> DomainResult<Vec<Match>> {
    let mut uow = store.begin().await?;
    load(&mut uow, id).await?;
    uow.list_matches(Some(id)).await
}

/// Lists the teams of an existing season
pub async fn list_season_teams(store: &dyn Store, id: i64) -> DomainResult<Vec<Team>> {
    let mut uow = store.begin().await?;
    load(&mut uow, id).await?;
    uow.list_teams(Some(id)).await
}
