use axum::extract::{Multipart, State, multipart::MultipartRejection};
use dietcoach_core::domain::meal_analysis::ports::MealAnalysisService;
use serde_json::{Value, json};

use crate::application::http::{
    meal_analysis::validators::{MealSubmissionForm, read_meal_submission},
    server::{
        api_entities::{
            api_error::{ApiError, ApiErrorResponse},
            response::Response,
        },
        app_state::AppState,
    },
};

#[utoipa::path(
    post,
    path = "/analyze-meal",
    tag = "meal-analysis",
    summary = "Relay a meal submission",
    description = "Forwards the meal photo, optional label photo, meal type and notes to the analysis webhook and returns its answer. JSON answers are passed through; any other answer is wrapped as `{\"raw\": \"...\"}`.",
    request_body(content = MealSubmissionForm, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Upstream answer", body = Value),
        (status = 400, description = "foodImage is missing or the form is unreadable", body = ApiErrorResponse),
        (status = 500, description = "Webhook is not configured", body = ApiErrorResponse),
        (status = 502, description = "Webhook unreachable or returned an error", body = ApiErrorResponse)
    ),
)]
pub async fn relay_meal(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Response<Value>, ApiError> {
    let submission = read_meal_submission(multipart?).await?;

    let raw_body = state
        .service
        .relay_meal(submission)
        .await
        .map_err(ApiError::from)?;

    let data =
        serde_json::from_str::<Value>(&raw_body).unwrap_or_else(|_| json!({ "raw": raw_body }));

    Ok(Response::OK(data))
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use axum_test::multipart::MultipartForm;
    use serde_json::json;
    use tokio::net::TcpListener;

    use crate::application::http::test::{FakeWebhook, meal_form, test_server, test_state};

    #[tokio::test]
    async fn test_missing_food_image_is_bad_request_without_upstream_call() {
        let webhook = FakeWebhook::spawn(StatusCode::OK, "{}").await;
        let server = test_server(test_state(Some(&webhook.url)));

        let form = MultipartForm::new()
            .add_text("mealType", "lunch")
            .add_text("notes", "")
            .add_text("foodImage", "not a file");
        let response = server.post("/api/analyze-meal").multipart(form).await;

        response.assert_status(StatusCode::BAD_REQUEST);
        response.assert_json(&json!({ "error": "foodImage is required." }));
        assert_eq!(webhook.calls(), 0);
    }

    #[tokio::test]
    async fn test_unset_webhook_is_internal_error() {
        let server = test_server(test_state(None));

        let response = server
            .post("/api/analyze-meal")
            .multipart(meal_form("lunch"))
            .await;

        response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
        let body: serde_json::Value = response.json();
        assert!(body["error"].is_string());
    }

    #[tokio::test]
    async fn test_upstream_error_is_bad_gateway_with_status_and_body() {
        let webhook = FakeWebhook::spawn(StatusCode::INTERNAL_SERVER_ERROR, "internal error").await;
        let server = test_server(test_state(Some(&webhook.url)));

        let response = server
            .post("/api/analyze-meal")
            .multipart(meal_form("dinner"))
            .await;

        response.assert_status(StatusCode::BAD_GATEWAY);
        let body: serde_json::Value = response.json();
        assert_eq!(body["error"], "Analysis webhook returned error.");
        assert_eq!(body["status"], 500);
        assert_eq!(body["body"], "internal error");
        assert_eq!(webhook.calls(), 1);
    }

    #[tokio::test]
    async fn test_json_answer_is_passed_through() {
        let webhook = FakeWebhook::spawn(StatusCode::OK, r#"{"output":"{}"}"#).await;
        let server = test_server(test_state(Some(&webhook.url)));

        let response = server
            .post("/api/analyze-meal")
            .multipart(meal_form("breakfast"))
            .await;

        response.assert_status_ok();
        response.assert_json(&json!({ "output": "{}" }));
    }

    #[tokio::test]
    async fn test_text_answer_is_wrapped() {
        let webhook = FakeWebhook::spawn(StatusCode::OK, "not json at all").await;
        let server = test_server(test_state(Some(&webhook.url)));

        let response = server
            .post("/api/analyze-meal")
            .multipart(meal_form("snack"))
            .await;

        response.assert_status_ok();
        response.assert_json(&json!({ "raw": "not json at all" }));
    }

    #[tokio::test]
    async fn test_non_multipart_body_is_bad_request() {
        let server = test_server(test_state(None));

        let response = server
            .post("/api/analyze-meal")
            .json(&json!({ "mealType": "lunch" }))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_unreachable_webhook_is_bad_gateway_without_cause() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        let webhook_url = format!("http://{addr}/webhook");
        let server = test_server(test_state(Some(&webhook_url)));

        let response = server
            .post("/api/analyze-meal")
            .multipart(meal_form("lunch"))
            .await;

        response.assert_status(StatusCode::BAD_GATEWAY);
        let body: serde_json::Value = response.json();
        assert_eq!(body["error"], "Failed to call analysis webhook.");
        assert_eq!(body["kind"], "upstream_unreachable");
        assert!(body.get("status").is_none());
        assert!(body.get("body").is_none());
        assert!(!response.text().contains(&addr.to_string()));
    }
}
