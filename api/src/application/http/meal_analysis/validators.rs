use axum::extract::{Multipart, multipart::Field};
use dietcoach_core::domain::meal_analysis::entities::{ImageUpload, MealSubmission};
use serde::Deserialize;
use tracing::error;
use utoipa::ToSchema;

use crate::application::http::server::api_entities::api_error::ApiError;

pub const MAX_IMAGE_SIZE: usize = 10 * 1024 * 1024; // 10MB

/// Request body limit for a submission carrying both images.
pub const MAX_SUBMISSION_SIZE: usize = 2 * MAX_IMAGE_SIZE + 1024 * 1024;

/// Multipart form accepted by the meal endpoints (documentation only).
#[allow(dead_code)]
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MealSubmissionForm {
    #[schema(value_type = String, format = Binary)]
    pub food_image: Vec<u8>,
    #[schema(value_type = Option<String>, format = Binary)]
    pub label_image: Option<Vec<u8>>,
    /// One of `breakfast`, `lunch`, `dinner`, `snack`.
    pub meal_type: String,
    pub notes: String,
}

/// Reads the inbound form. Parts without a filename are not image payloads,
/// so a text field named `foodImage` leaves the image unset.
pub async fn read_meal_submission(mut multipart: Multipart) -> Result<MealSubmission, ApiError> {
    let mut submission = MealSubmission::default();

    while let Some(field) = multipart.next_field().await.map_err(|e| {
        error!("Failed to read multipart field: {}", e);
        ApiError::BadRequest(format!("Failed to read multipart field: {}", e))
    })? {
        let name = field.name().unwrap_or("").to_string();

        match name.as_str() {
            "mealType" => submission.meal_type = read_text(field, "mealType").await?,
            "notes" => submission.notes = read_text(field, "notes").await?,
            "foodImage" => submission.food_image = read_image(field, "foodImage").await?,
            "labelImage" => submission.label_image = read_image(field, "labelImage").await?,
            _ => {}
        }
    }

    Ok(submission)
}

async fn read_text(field: Field<'_>, name: &str) -> Result<String, ApiError> {
    field
        .text()
        .await
        .map_err(|e| ApiError::BadRequest(format!("Failed to read {}: {}", name, e)))
}

async fn read_image(field: Field<'_>, name: &str) -> Result<Option<ImageUpload>, ApiError> {
    let Some(file_name) = field.file_name().map(str::to_string) else {
        return Ok(None);
    };
    let content_type = field.content_type().map(str::to_string);

    let data = field
        .bytes()
        .await
        .map_err(|e| ApiError::BadRequest(format!("Failed to read {}: {}", name, e)))?;

    if data.len() > MAX_IMAGE_SIZE {
        return Err(ApiError::BadRequest(format!(
            "{} too large. Max size is {} bytes",
            name, MAX_IMAGE_SIZE
        )));
    }

    Ok(Some(ImageUpload::new(Some(file_name), content_type, data)))
}
