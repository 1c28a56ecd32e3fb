use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{double_option, ListQuery, SharedStore};
use crate::api::errors::ApiError;
use crate::application::{matches, EventDraft};
use crate::domain::event::{EventPatch, EventStatus};
use crate::domain::matches::{Match, MatchPatch};

/// Request body for creating a match
#[derive(Debug, Default, Deserialize)]
pub struct CreateMatchRequest {
    pub id: Option<i64>,
    pub name: Option<String>,
    pub start: Option<DateTime<Utc>>,
    pub end: Option<DateTime<Utc>>,
    pub status: Option<EventStatus>,
    pub season_id: Option<i64>,
}

/// Request body for partially updating a match
#[derive(Debug, Default, Deserialize)]
pub struct UpdateMatchRequest {
    pub id: Option<i64>,
    #[serde(default, deserialize_with = "double_option")]
    pub name: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub start: Option<Option<DateTime<Utc>>>,
    #[serde(default, deserialize_with = "double_option")]
    pub end: Option<Option<DateTime<Utc>>>,
    pub status: Option<EventStatus>,
    #[serde(default, deserialize_with = "double_option")]
    pub season_id: Option<Option<i64>>,
}

impl From<UpdateMatchRequest> for MatchPatch {
    fn from(req: UpdateMatchRequest) -> Self {
        Self {
            event: EventPatch {
                name: req.name,
                start: req.start,
                end: req.end,
                status: req.status,
            },
            season_id: req.season_id,
        }
    }
}

/// Match as returned by the API
#[derive(Debug, Serialize)]
pub struct MatchResponse {
    pub id: Option<i64>,
    pub name: Option<String>,
    pub start: Option<DateTime<Utc>>,
    pub end: Option<DateTime<Utc>>,
    pub status: EventStatus,
    pub season_id: Option<i64>,
}

impl From<&Match> for MatchResponse {
    fn from(game: &Match) -> Self {
        let event = game.event();
        Self {
            id: game.id(),
            name: event.name().map(str::to_string),
            start: event.start_time(),
            end: event.end_time(),
            status: event.status(),
            season_id: game.season_id(),
        }
    }
}

/// List matches, optionally filtered by season
///
/// GET /matches?season_id=
pub async fn list_matches(
    State(store): State<SharedStore>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<MatchResponse>>, ApiError> {
    let games = matches::list_matches(store.as_ref(), query.season_id).await?;
    Ok(Json(games.iter().map(MatchResponse::from).collect()))
}

/// Get a match by ID
///
/// GET /matches/:id
pub async fn get_match(
    State(store): State<SharedStore>,
    Path(id): Path<i64>,
) -> Result<Json<MatchResponse>, ApiError> {
    let game = matches::get_match(store.as_ref(), id).await?;
    Ok(Json(MatchResponse::from(&game)))
}

/// Create a new match
///
/// POST /matches
pub async fn create_match(
    State(store): State<SharedStore>,
    payload: Result<Json<CreateMatchRequest>, JsonRejection>,
) -> Result<Json<MatchResponse>, ApiError> {
    let Json(req) = payload?;
    let draft = EventDraft {
        id: req.id,
        name: req.name,
        start: req.start,
        end: req.end,
        status: req.status,
    };
    let game = matches::create_match(store.as_ref(), draft, req.season_id).await?;
    Ok(Json(MatchResponse::from(&game)))
}

/// Partially update a match
///
/// PATCH /matches/:id
pub async fn update_match(
    State(store): State<SharedStore>,
    Path(id): Path<i64>,
    payload: Result<Json<UpdateMatchRequest>, JsonRejection>,
) -> Result<Json<MatchResponse>, ApiError> {
    let Json(req) = payload?;
    let body_id = req.id;
    let game = matches::update_match(store.as_ref(), id, body_id, req.into()).await?;
    Ok(Json(MatchResponse::from(&game)))
}

/// Delete a match
///
/// DELETE /matches/:id
pub async fn delete_match(
    State(store): State<SharedStore>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    matches::delete_match(store.as_ref(), id).await?;
    Ok(StatusCode::OK)
}

/// Start a pending match
///
/// POST /matches/:id/start
pub async fn start_match(
    State(store): State<SharedStore>,
    Path(id): Path<i64>,
) -> Result<Json<MatchResponse>, ApiError> {
    let game = matches::start_match(store.as_ref(), id).await?;
    Ok(Json(MatchResponse::from(&game)))
}

/// End an ongoing match
///
/// POST /matches/:id/end
pub async fn end_match(
    State(store): State<SharedStore>,
    Path(id): Path<i64>,
) -> Result<Json<MatchResponse>, ApiError> {
    let game = matches::end_match(store.as_ref(), id).await?;
    Ok(Json(MatchResponse::from(&game)))
}
