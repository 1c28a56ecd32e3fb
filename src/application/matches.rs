use chrono::Utc;

use super::{ensure_same_id, ensure_season_exists, EventDraft};
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::matches::{Match, MatchPatch};
use crate::domain::repositories::{Store, UnitOfWork};

async fn load(uow: &mut Box<dyn UnitOfWork>, id: i64) -> DomainResult<Match> {
    uow.find_match(id)
        .await?
        .ok_or_else(|| DomainError::not_found("Match not found"))
}

/// Lists matches, optionally filtered by season
pub async fn list_matches(store: &dyn Store, season_id: Option<i64>) -> DomainResult<Vec<Match>> {
    let mut uow = store.begin().await?;
    uow.list_matches(season_id).await
}

/// Retrieves a match by its ID
pub async fn get_match(store: &dyn Store, id: i64) -> DomainResult<Match> {
    let mut uow = store.begin().await?;
    load(&mut uow, id).await
}

/// Creates a new match
///
/// Without a `season_id` the match is created unassigned.
pub async fn create_match(
    store: &dyn Store,
    draft: EventDraft,
    season_id: Option<i64>,
) -> DomainResult<Match> {
    let game = Match::new(draft.into_event()?, season_id);

    let mut uow = store.begin().await?;
    if let Some(season_id) = season_id {
        ensure_season_exists(&mut uow, season_id).await?;
    }
    let game = uow.insert_match(&game).await?;
    uow.commit().await?;

    tracing::info!(match_id = ?game.id(), season_id = ?game.season_id(), "Match created");
    Ok(game)
}

/// Applies a partial update to a match
pub async fn update_match(
    store: &dyn Store,
    id: i64,
    body_id: Option<i64>,
    patch: MatchPatch,
) -> DomainResult<Match> {
    ensure_same_id(id, body_id)?;

    let mut uow = store.begin().await?;
    let mut game = load(&mut uow, id).await?;
    if let Some(Some(season_id)) = patch.season_id {
        ensure_season_exists(&mut uow, season_id).await?;
    }
    game.apply(patch)?;
    uow.save_match(&game).await?;
    uow.commit().await?;

    Ok(game)
}

/// Deletes a match
pub async fn delete_match(store: &dyn Store, id: i64) -> DomainResult<()> {
    let mut uow = store.begin().await?;
    if !uow.delete_match(id).await? {
        return Err(DomainError::not_found("Match not found"));
    }
    uow.commit().await?;

    tracing::info!(match_id = id, "Match deleted");
    Ok(())
}

/// Moves a pending match to ongoing
pub async fn start_match(store: &dyn Store, id: i64) -> DomainResult<Match> {
    let mut uow = store.begin().await?;
    let mut game = load(&mut uow, id).await?;
    let event = game.start(Utc::now())?;
    uow.save_match(&game).await?;
    uow.commit().await?;

    tracing::info!(match_id = id, at = %event.at(), "Match {}", event.label());
    Ok(game)
}

/// Moves an ongoing match to completed
pub async fn end_match(store: &dyn Store, id: i64) -> DomainResult<Match> {
    let mut uow = store.begin().await?;
    let mut game = load(&mut uow, id).await?;
    let event = game.end(Utc::now())?;
    uow.save_match(&game).await?;
    uow.commit().await?;

    tracing::info!(match_id = id, at = %event.at(), "Match {}", event.label());
    Ok(game)
}
