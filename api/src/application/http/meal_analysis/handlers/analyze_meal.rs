use axum::extract::{Multipart, State, multipart::MultipartRejection};
use dietcoach_core::domain::{
    common::entities::app_errors::CoreError,
    meal_analysis::{
        entities::{AnalysisRecord, MealType},
        ports::MealAnalysisService,
    },
};
use serde::{Deserialize, Serialize};
use tracing::info;
use utoipa::ToSchema;

use crate::application::http::{
    history::handlers::get_history::HistoryEntryResponse,
    meal_analysis::validators::{MealSubmissionForm, read_meal_submission},
    server::{
        api_entities::{
            api_error::{ApiError, ApiErrorResponse},
            response::Response,
        },
        app_state::AppState,
    },
};

#[derive(Debug, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct AnalyzeMealResponse {
    pub analysis: AnalysisRecord,
    pub entry: HistoryEntryResponse,
}

#[utoipa::path(
    post,
    path = "/meals/analyze",
    tag = "meal-analysis",
    summary = "Analyze a meal",
    description = "Relays the submission to the analysis webhook, normalizes the answer into a fixed record and records it in the session history together with a preview of the food photo.",
    request_body(content = MealSubmissionForm, content_type = "multipart/form-data"),
    responses(
        (status = 200, body = AnalyzeMealResponse),
        (status = 400, description = "foodImage is missing or mealType is unknown", body = ApiErrorResponse),
        (status = 500, description = "Webhook is not configured", body = ApiErrorResponse),
        (status = 502, description = "Webhook failed or answered with an unexpected shape", body = ApiErrorResponse)
    ),
)]
pub async fn analyze_meal(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Response<AnalyzeMealResponse>, ApiError> {
    let submission = read_meal_submission(multipart?).await?;

    let food_image = submission
        .food_image
        .clone()
        .ok_or_else(|| CoreError::MissingRequiredField("foodImage".to_string()))?;
    let meal_type: MealType = submission.meal_type.parse()?;

    let record = state
        .service
        .analyze_meal(submission)
        .await
        .map_err(ApiError::from)?;

    let preview = state
        .previews
        .allocate(food_image.data.clone(), food_image.content_type_or_default());
    let entry = state.history.lock().insert(&record, preview, meal_type);

    info!(
        entry_id = %entry.id,
        main_item = %entry.main_item,
        calories = entry.calories,
        "Meal analysis recorded"
    );

    let entry = HistoryEntryResponse::new(entry, &state);

    Ok(Response::OK(AnalyzeMealResponse {
        analysis: record,
        entry,
    }))
}
