use super::handlers::{
    get_history::{__path_get_history, get_history},
    get_preview::{__path_get_preview, get_preview},
    reset_history::{__path_reset_history, reset_history},
};
use crate::application::http::server::app_state::AppState;
use axum::{Router, routing::get};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(paths(get_history, reset_history, get_preview))]
pub struct HistoryApiDoc;

pub fn history_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route(
            &format!("{}/api/history", state.args.server.root_path),
            get(get_history).delete(reset_history),
        )
        .route(
            &format!("{}/api/previews/{{preview_id}}", state.args.server.root_path),
            get(get_preview),
        )
}
