use axum::extract::State;
use serde::{Deserialize, Serialize};
use tracing::info;
use utoipa::ToSchema;

use crate::application::http::server::{
    api_entities::{api_error::ApiError, response::Response},
    app_state::AppState,
};

#[derive(Debug, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct ResetHistoryResponse {
    pub released: usize,
}

#[utoipa::path(
    delete,
    path = "/history",
    tag = "history",
    summary = "Reset history",
    description = "Ends the current history session, releasing every stored preview.",
    responses(
        (status = 200, body = ResetHistoryResponse)
    ),
)]
pub async fn reset_history(
    State(state): State<AppState>,
) -> Result<Response<ResetHistoryResponse>, ApiError> {
    let released = state.reset_history();
    info!(released, "History reset");

    Ok(Response::OK(ResetHistoryResponse { released }))
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;

    use super::*;
    use crate::application::http::{
        meal_analysis::handlers::analyze_meal::AnalyzeMealResponse,
        test::{BIBIMBAP_BODY, FakeWebhook, meal_form, test_server, test_state},
    };

    #[tokio::test]
    async fn test_reset_releases_all_previews() {
        let webhook = FakeWebhook::spawn(StatusCode::OK, BIBIMBAP_BODY).await;
        let state = test_state(Some(&webhook.url));
        let server = test_server(state.clone());

        let mut preview_urls = Vec::new();
        for meal_type in ["breakfast", "lunch"] {
            let body: AnalyzeMealResponse = server
                .post("/api/meals/analyze")
                .multipart(meal_form(meal_type))
                .await
                .json();
            preview_urls.push(body.entry.preview_url);
        }

        let response = server.delete("/api/history").await;
        response.assert_status_ok();
        response.assert_json(&ResetHistoryResponse { released: 2 });

        assert!(state.history.lock().is_empty());
        assert!(state.previews.is_empty());
        for url in &preview_urls {
            server.get(url).await.assert_status(StatusCode::NOT_FOUND);
        }

        let again: ResetHistoryResponse = server.delete("/api/history").await.json();
        assert_eq!(again.released, 0);
    }
}
