use axum::{
    extract::{Path, State},
    http::header::CONTENT_TYPE,
    response::{IntoResponse, Response as AxumResponse},
};
use uuid::Uuid;

use crate::application::http::server::{
    api_entities::api_error::{ApiError, ApiErrorResponse},
    app_state::AppState,
};

#[utoipa::path(
    get,
    path = "/previews/{preview_id}",
    tag = "history",
    summary = "Get a meal photo preview",
    description = "Serves the stored food photo of a history entry while that entry is still in the history.",
    params(
        ("preview_id" = Uuid, Path, description = "Preview ID"),
    ),
    responses(
        (status = 200, description = "Image bytes", content_type = "application/octet-stream"),
        (status = 404, description = "Preview released or unknown", body = ApiErrorResponse)
    ),
)]
pub async fn get_preview(
    Path(preview_id): Path<Uuid>,
    State(state): State<AppState>,
) -> Result<AxumResponse, ApiError> {
    let preview = state
        .previews
        .get(preview_id)
        .ok_or_else(|| ApiError::NotFound(format!("Preview '{}' not found", preview_id)))?;

    Ok(([(CONTENT_TYPE, preview.content_type)], preview.data).into_response())
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use bytes::Bytes;
    use dietcoach_core::domain::history::PreviewHandle;

    use crate::application::http::test::{test_server, test_state};

    #[tokio::test]
    async fn test_serves_bytes_with_content_type() {
        let state = test_state(None);
        let handle = state
            .previews
            .allocate(Bytes::from_static(b"png-bytes"), "image/png");
        let server = test_server(state.clone());

        let response = server.get(&state.preview_url(handle.id())).await;

        response.assert_status_ok();
        response.assert_header("content-type", "image/png");
        assert_eq!(response.text(), "png-bytes");
    }

    #[tokio::test]
    async fn test_released_preview_is_not_found() {
        let state = test_state(None);
        let handle = state.previews.allocate(Bytes::from_static(b"x"), "image/jpeg");
        let url = state.preview_url(handle.id());
        handle.release();
        let server = test_server(state);

        server.get(&url).await.assert_status(StatusCode::NOT_FOUND);
    }
}
