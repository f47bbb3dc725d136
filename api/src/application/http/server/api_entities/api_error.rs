use axum::{
    Json,
    extract::multipart::MultipartRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use dietcoach_core::domain::{
    common::entities::app_errors::CoreError, meal_analysis::entities::MealType,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::error;
use utoipa::ToSchema;

/// Error envelope returned to callers: `{ error, kind?, status?, body? }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ApiErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    /// Upstream status, only for rejected webhook calls.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
    /// Upstream body, only for rejected webhook calls.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    InternalServerError(String),

    #[error("{message}")]
    BadGateway {
        message: String,
        kind: Option<&'static str>,
        status: Option<u16>,
        body: Option<String>,
    },
}

impl ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::InternalServerError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::BadGateway { .. } => StatusCode::BAD_GATEWAY,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status_code = self.status_code();
        let payload = match self {
            ApiError::BadGateway {
                message,
                kind,
                status,
                body,
            } => ApiErrorResponse {
                error: message,
                kind: kind.map(str::to_string),
                status,
                body,
            },
            ApiError::BadRequest(message)
            | ApiError::NotFound(message)
            | ApiError::InternalServerError(message) => ApiErrorResponse {
                error: message,
                kind: None,
                status: None,
                body: None,
            },
        };

        (status_code, Json(payload)).into_response()
    }
}

impl From<CoreError> for ApiError {
    fn from(error: CoreError) -> Self {
        match error {
            CoreError::MissingRequiredField(field) => {
                ApiError::BadRequest(format!("{} is required.", field))
            }
            CoreError::InvalidMealType(value) => {
                let allowed = MealType::ALL.map(|meal_type| meal_type.as_str()).join(", ");
                ApiError::BadRequest(format!(
                    "mealType must be one of {}, got '{}'.",
                    allowed, value
                ))
            }
            CoreError::Misconfigured => ApiError::InternalServerError(
                "Analysis webhook is not configured.".to_string(),
            ),
            CoreError::UpstreamUnreachable(cause) => {
                error!(%cause, "Analysis webhook unreachable");
                ApiError::BadGateway {
                    message: "Failed to call analysis webhook.".to_string(),
                    kind: Some("upstream_unreachable"),
                    status: None,
                    body: None,
                }
            }
            CoreError::UpstreamRejected { status, body } => ApiError::BadGateway {
                message: "Analysis webhook returned error.".to_string(),
                kind: Some("upstream_rejected"),
                status: Some(status),
                body: Some(body),
            },
            CoreError::UnexpectedShape(reason) => {
                error!(%reason, "Analysis response could not be normalized");
                ApiError::BadGateway {
                    message: "Analysis response had an unexpected shape.".to_string(),
                    kind: Some("unexpected_shape"),
                    status: None,
                    body: None,
                }
            }
            CoreError::InternalServerError => {
                ApiError::InternalServerError("Internal server error.".to_string())
            }
        }
    }
}

impl From<MultipartRejection> for ApiError {
    fn from(rejection: MultipartRejection) -> Self {
        ApiError::BadRequest(format!("Expected a multipart form: {}", rejection.body_text()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejected_upstream_keeps_status_and_body() {
        let api_error = ApiError::from(CoreError::UpstreamRejected {
            status: 500,
            body: "internal error".to_string(),
        });

        assert_eq!(api_error.status_code(), StatusCode::BAD_GATEWAY);
        assert!(matches!(
            api_error,
            ApiError::BadGateway { status: Some(500), ref body, .. }
                if body.as_deref() == Some("internal error")
        ));
    }

    #[test]
    fn test_unreachable_cause_is_not_exposed() {
        let api_error = ApiError::from(CoreError::UpstreamUnreachable(
            "dns error: no such host n8n.internal".to_string(),
        ));

        assert!(!api_error.to_string().contains("n8n.internal"));
        assert_eq!(api_error.status_code(), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn test_status_codes_per_error_kind() {
        let cases = [
            (
                CoreError::MissingRequiredField("foodImage".to_string()),
                StatusCode::BAD_REQUEST,
            ),
            (
                CoreError::InvalidMealType("brunch".to_string()),
                StatusCode::BAD_REQUEST,
            ),
            (CoreError::Misconfigured, StatusCode::INTERNAL_SERVER_ERROR),
            (
                CoreError::UnexpectedShape("no totals".to_string()),
                StatusCode::BAD_GATEWAY,
            ),
            (
                CoreError::InternalServerError,
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (core_error, expected) in cases {
            assert_eq!(ApiError::from(core_error).status_code(), expected);
        }
    }

    #[test]
    fn test_missing_field_message() {
        let api_error = ApiError::from(CoreError::MissingRequiredField("foodImage".to_string()));
        assert_eq!(api_error.to_string(), "foodImage is required.");
    }
}
