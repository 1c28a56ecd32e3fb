use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use super::handlers::{health, matches, seasons, teams, SharedStore};

/// Builds the application router over the given store
pub fn router(store: SharedStore) -> Router {
    // Configure CORS
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Health check
        .route("/health", get(health::health_check))
        // Season routes
        .route(
            "/seasons",
            get(seasons::list_seasons).post(seasons::create_season),
        )
        .route(
            "/seasons/:id",
            get(seasons::get_season)
                .patch(seasons::update_season)
                .delete(seasons::delete_season),
        )
        .route("/seasons/:id/start", post(seasons::start_season))
        .route("/seasons/:id/end", post(seasons::end_season))
        .route("/seasons/:id/matches", get(seasons::list_season_matches))
        .route("/seasons/:id/teams", get(seasons::list_season_teams))
        // Match routes
        .route(
            "/matches",
            get(matches::list_matches).post(matches::create_match),
        )
        .route(
            "/matches/:id",
            get(matches::get_match)
                .patch(matches::update_match)
                .delete(matches::delete_match),
        )
        .route("/matches/:id/start", post(matches::start_match))
        .route("/matches/:id/end", post(matches::end_match))
        // Team routes
        .route("/teams", get(teams::list_teams).post(teams::create_team))
        .route(
            "/teams/:id",
            get(teams::get_team)
                .patch(teams::update_team)
                .delete(teams::delete_team),
        )
        // Middleware
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        // Shared state
        .with_state(store)
}
