use axum::extract::State;
use chrono::{DateTime, Utc};
use dietcoach_core::domain::{history::HistoryEntrySummary, meal_analysis::entities::MealType};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::application::http::server::{
    api_entities::{api_error::ApiError, response::Response},
    app_state::AppState,
};

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntryResponse {
    pub id: Uuid,
    pub timestamp: DateTime<Utc>,
    pub meal_type: MealType,
    pub calories: f64,
    pub main_item: String,
    pub preview_url: String,
}

impl HistoryEntryResponse {
    pub fn new(entry: HistoryEntrySummary, state: &AppState) -> Self {
        Self {
            id: entry.id,
            timestamp: entry.timestamp,
            meal_type: entry.meal_type,
            calories: entry.calories,
            main_item: entry.main_item,
            preview_url: state.preview_url(entry.preview_id),
        }
    }
}

#[utoipa::path(
    get,
    path = "/history",
    tag = "history",
    summary = "List analyzed meals",
    description = "Returns the most recent analyses of this session, newest first.",
    responses(
        (status = 200, body = Vec<HistoryEntryResponse>)
    ),
)]
pub async fn get_history(
    State(state): State<AppState>,
) -> Result<Response<Vec<HistoryEntryResponse>>, ApiError> {
    let summaries = state.history.lock().summaries();

    let entries = summaries
        .into_iter()
        .map(|summary| HistoryEntryResponse::new(summary, &state))
        .collect();

    Ok(Response::OK(entries))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::http::test::{test_server, test_state};

    #[tokio::test]
    async fn test_empty_history() {
        let server = test_server(test_state(None));

        let entries: Vec<HistoryEntryResponse> = server.get("/api/history").await.json();

        assert!(entries.is_empty());
    }

    #[test]
    fn test_preview_url_uses_root_path() {
        let state = test_state(None);
        let id = Uuid::nil();

        assert_eq!(
            state.preview_url(id),
            "/api/previews/00000000-0000-0000-0000-000000000000"
        );
    }
}
