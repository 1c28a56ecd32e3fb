use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};

use super::{double_option, ListQuery, SharedStore};
use crate::api::errors::ApiError;
use crate::application::teams::{self, TeamDraft};
use crate::domain::errors::DomainError;
use crate::domain::team::{Team, TeamPatch};

/// Request body for creating a team
#[derive(Debug, Default, Deserialize)]
pub struct CreateTeamRequest {
    pub id: Option<i64>,
    pub name: Option<String>,
    pub color: Option<String>,
    pub season_id: Option<i64>,
}

impl From<CreateTeamRequest> for TeamDraft {
    fn from(req: CreateTeamRequest) -> Self {
        Self {
            id: req.id,
            name: req.name,
            color: req.color,
            season_id: req.season_id,
        }
    }
}

/// Request body for partially updating a team
#[derive(Debug, Default, Deserialize)]
pub struct UpdateTeamRequest {
    pub id: Option<i64>,
    #[serde(default, deserialize_with = "double_option")]
    pub name: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub color: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub season_id: Option<Option<i64>>,
}

impl TryFrom<UpdateTeamRequest> for TeamPatch {
    type Error = DomainError;

    fn try_from(req: UpdateTeamRequest) -> Result<Self, Self::Error> {
        let name = match req.name {
            Some(None) => return Err(DomainError::invalid_argument("Name cannot be null")),
            other => other.flatten(),
        };
        let season_id = match req.season_id {
            Some(None) => return Err(DomainError::invalid_argument("Season ID cannot be null")),
            other => other.flatten(),
        };

        Ok(Self {
            name,
            color: req.color,
            season_id,
        })
    }
}

/// Team as returned by the API
#[derive(Debug, Serialize)]
pub struct TeamResponse {
    pub id: Option<i64>,
    pub name: String,
    pub color: Option<String>,
    pub season_id: i64,
}

impl From<&Team> for TeamResponse {
    fn from(team: &Team) -> Self {
        Self {
            id: team.id(),
            name: team.name().to_string(),
            color: team.color().map(str::to_string),
            season_id: team.season_id(),
        }
    }
}

/// List teams, optionally filtered by season
///
/// GET /teams?season_id=
pub async fn list_teams(
    State(store): State<SharedStore>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<TeamResponse>>, ApiError> {
    let teams = teams::list_teams(store.as_ref(), query.season_id).await?;
    Ok(Json(teams.iter().map(TeamResponse::from).collect()))
}

/// Get a team by ID
///
/// GET /teams/:id
pub async fn get_team(
    State(store): State<SharedStore>,
    Path(id): Path<i64>,
) -> Result<Json<TeamResponse>, ApiError> {
    let team = teams::get_team(store.as_ref(), id).await?;
    Ok(Json(TeamResponse::from(&team)))
}

/// Create a new team
///
/// POST /teams
pub async fn create_team(
    State(store): State<SharedStore>,
    payload: Result<Json<CreateTeamRequest>, JsonRejection>,
) -> Result<Json<TeamResponse>, ApiError> {
    let Json(req) = payload?;
    let team = teams::create_team(store.as_ref(), req.into()).await?;
    Ok(Json(TeamResponse::from(&team)))
}

/// Partially update a team
///
/// PATCH /teams/:id
pub async fn update_team(
    State(store): State<SharedStore>,
    Path(id): Path<i64>,
    payload: Result<Json<UpdateTeamRequest>, JsonRejection>,
) -> Result<Json<TeamResponse>, ApiError> {
    let Json(req) = payload?;
    let body_id = req.id;
    let patch = TeamPatch::try_from(req)?;
    let team = teams::update_team(store.as_ref(), id, body_id, patch).await?;
    Ok(Json(TeamResponse::from(&team)))
}

/// Delete a team
///
/// DELETE /teams/:id
pub async fn delete_team(
    State(store): State<SharedStore>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    teams::delete_team(store.as_ref(), id).await?;
    Ok(StatusCode::OK)
}
