use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::matches::MatchResponse;
use super::teams::TeamResponse;
use super::{double_option, ListQuery, SharedStore};
use crate::api::errors::ApiError;
use crate::application::{seasons, EventDraft};
use crate::domain::event::{EventPatch, EventStatus};
use crate::domain::season::Season;

/// Request body for creating a season or a match
#[derive(Debug, Default, Deserialize)]
pub struct CreateEventRequest {
    pub id: Option<i64>,
    pub name: Option<String>,
    pub start: Option<DateTime<Utc>>,
    pub end: Option<DateTime<Utc>>,
    pub status: Option<EventStatus>,
}

impl From<CreateEventRequest> for EventDraft {
    fn from(req: CreateEventRequest) -> Self {
        Self {
            id: req.id,
            name: req.name,
            start: req.start,
            end: req.end,
            status: req.status,
        }
    }
}

/// Request body for partially updating a season
///
/// Omitted fields keep their stored value; explicit `null` clears nullable ones.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateEventRequest {
    pub id: Option<i64>,
    #[serde(default, deserialize_with = "double_option")]
    pub name: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub start: Option<Option<DateTime<Utc>>>,
    #[serde(default, deserialize_with = "double_option")]
    pub end: Option<Option<DateTime<Utc>>>,
    pub status: Option<EventStatus>,
}

impl UpdateEventRequest {
    pub fn patch(&self) -> EventPatch {
        EventPatch {
            name: self.name.clone(),
            start: self.start,
            end: self.end,
            status: self.status,
        }
    }
}

/// Season as returned by the API
#[derive(Debug, Serialize)]
pub struct SeasonResponse {
    pub id: Option<i64>,
    pub name: Option<String>,
    pub start: Option<DateTime<Utc>>,
    pub end: Option<DateTime<Utc>>,
    pub status: EventStatus,
}

impl From<&Season> for SeasonResponse {
    fn from(season: &Season) -> Self {
        let event = season.event();
        Self {
            id: season.id(),
            name: event.name().map(str::to_string),
            start: event.start_time(),
            end: event.end_time(),
            status: event.status(),
        }
    }
}

/// List seasons
///
/// GET /seasons
pub async fn list_seasons(
    State(store): State<SharedStore>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<SeasonResponse>>, ApiError> {
    let seasons = seasons::list_seasons(store.as_ref(), query.season_id).await?;
    Ok(Json(seasons.iter().map(SeasonResponse::from).collect()))
}

/// Get a season by ID
///
/// GET /seasons/:id
pub async fn get_season(
    State(store): State<SharedStore>,
    Path(id): Path<i64>,
) -> Result<Json<SeasonResponse>, ApiError> {
    let season = seasons::get_season(store.as_ref(), id).await?;
    Ok(Json(SeasonResponse::from(&season)))
}

/// Create a new season
///
/// POST /seasons
pub async fn create_season(
    State(store): State<SharedStore>,
    payload: Result<Json<CreateEventRequest>, JsonRejection>,
) -> Result<Json<SeasonResponse>, ApiError> {
    let Json(req) = payload?;
    let season = seasons::create_season(store.as_ref(), req.into()).await?;
    Ok(Json(SeasonResponse::from(&season)))
}

/// Partially update a season
///
/// PATCH /seasons/:id
pub async fn update_season(
    State(store): State<SharedStore>,
    Path(id): Path<i64>,
    payload: Result<Json<UpdateEventRequest>, JsonRejection>,
) -> Result<Json<SeasonResponse>, ApiError> {
    let Json(req) = payload?;
    let season = seasons::update_season(store.as_ref(), id, req.id, req.patch()).await?;
    Ok(Json(SeasonResponse::from(&season)))
}

/// Delete a season with its matches and teams
///
/// DELETE /seasons/:id
pub async fn delete_season(
    State(store): State<SharedStore>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    seasons::delete_season(store.as_ref(), id).await?;
    Ok(StatusCode::OK)
}

/// Start a pending season
///
/// POST /seasons/:id/start
pub async fn start_season(
    State(store): State<SharedStore>,
    Path(id): Path<i64>,
) -> Result<Json<SeasonResponse>, ApiError> {
    let season = seasons::start_season(store.as_ref(), id).await?;
    Ok(Json(SeasonResponse::from(&season)))
}

/// End an ongoing season
///
/// POST /seasons/:id/end
pub async fn end_season(
    State(store): State<SharedStore>,
    Path(id): Path<i64>,
) -> Result<Json<SeasonResponse>, ApiError> {
    let season = seasons::end_season(store.as_ref(), id).await?;
    Ok(Json(SeasonResponse::from(&season)))
}

/// List the matches of a season
///
/// GET /seasons/:id/matches
pub async fn list_season_matches(
    State(store): State<SharedStore>,
    Path(id): Path<i64>,
) -> Result<Json<Vec<MatchResponse>>, ApiError> {
    let matches = seasons::list_season_matches(store.as_ref(), id).await?;
    Ok(Json(matches.iter().map(MatchResponse::from).collect()))
}

/// List the teams of a season
///
/// GET /seasons/:id/teams
pub async fn list_season_teams(
    State(store): State<SharedStore>,
    Path(id): Path<i64>,
) -> Result<Json<Vec<TeamResponse>>, ApiError> {
    let teams = seasons::list_season_teams(store.as_ref(), id).await?;
    Ok(Json(teams.iter().map(TeamResponse::from).collect()))
}
