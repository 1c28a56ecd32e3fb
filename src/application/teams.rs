use super::{ensure_season_exists, ensure_unpersisted};
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::repositories::{Store, UnitOfWork};
use crate::domain::team::{Team, TeamPatch};

/// Creation input for a team
#[derive(Debug, Clone, Default)]
pub struct TeamDraft {
    pub id: Option<i64>,
    pub name: Option<String>,
    pub color: Option<String>,
    pub season_id: Option<i64>,
}

async fn load(uow: &mut Box<dyn UnitOfWork>, id: i64) -> DomainResult<Team> {
    uow.find_team(id)
        .await?
        .ok_or_else(|| DomainError::not_found("Team not found"))
}

/// Lists teams, optionally filtered by season
pub async fn list_teams(store: &dyn Store, season_id: Option<i64>) -> DomainResult<Vec<Team>> {
    let mut uow = store.begin().await?;
    uow.list_teams(season_id).await
}

/// Retrieves a team by its ID
pub async fn get_team(store: &dyn Store, id: i64) -> DomainResult<Team> {
    let mut uow = store.begin().await?;
    load(&mut uow, id).await
}

/// Creates a new team in an existing season
pub async fn create_team(store: &dyn Store, draft: TeamDraft) -> DomainResult<Team> {
    ensure_unpersisted(draft.id)?;
    let name = draft
        .name
        .ok_or_else(|| DomainError::invalid_argument("Name must be provided"))?;
    let season_id = draft
        .season_id
        .ok_or_else(|| DomainError::invalid_argument("Season ID must be provided"))?;

    let mut uow = store.begin().await?;
    ensure_season_exists(&mut uow, season_id).await?;
    let team = uow
        .insert_team(&Team::new(name, draft.color, season_id))
        .await?;
    uow.commit().await?;

    tracing::info!(team_id = ?team.id(), season_id, "Team created");
    Ok(team)
}

/// Applies a partial update to a team
pub async fn update_team(
    store: &dyn Store,
    id: i64,
    body_id: Option<i64>,
    patch: TeamPatch,
) -> DomainResult<Team> {
    super::ensure_same_id(id, body_id)?;

    let mut uow = store.begin().await?;
    let mut team = load(&mut uow, id).await?;
    if let Some(season_id) = patch.season_id {
        ensure_season_exists(&mut uow, season_id).await?;
    }
    team.apply(patch);
    uow.save_team(&team).await?;
    uow.commit().await?;

    Ok(team)
}

/// Deletes a team
pub async fn delete_team(store: &dyn Store, id: i64) -> DomainResult<()> {
    let mut uow = store.begin().await?;
    if !uow.delete_team(id).await? {
        return Err(DomainError::not_found("Team not found"));
    }
    uow.commit().await?;

    tracing::info!(team_id = id, "Team deleted");
    Ok(())
}
