use super::{
    handlers::{
        analyze_meal::{__path_analyze_meal, analyze_meal},
        relay_meal::{__path_relay_meal, relay_meal},
    },
    validators::MAX_SUBMISSION_SIZE,
};
use crate::application::http::server::app_state::AppState;
use axum::{Router, extract::DefaultBodyLimit, routing::post};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(paths(relay_meal, analyze_meal))]
pub struct MealAnalysisApiDoc;

pub fn meal_analysis_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route(
            &format!("{}/api/analyze-meal", state.args.server.root_path),
            post(relay_meal),
        )
        .route(
            &format!("{}/api/meals/analyze", state.args.server.root_path),
            post(analyze_meal),
        )
        .layer(DefaultBodyLimit::max(MAX_SUBMISSION_SIZE))
}
