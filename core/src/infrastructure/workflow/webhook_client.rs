use reqwest::{
    Client,
    multipart::{Form, Part},
};
use tracing::{debug, error, warn};
use url::Url;

use crate::domain::{
    common::{WebhookConfig, entities::app_errors::CoreError},
    meal_analysis::{
        entities::{
            DEFAULT_FOOD_IMAGE_NAME, DEFAULT_LABEL_IMAGE_NAME, ImageUpload, MealSubmission,
        },
        ports::AnalysisWorkflowClient,
    },
};

/// Relays meal submissions to a webhook-driven workflow engine (n8n).
#[derive(Debug, Clone)]
pub struct WebhookWorkflowClient {
    webhook_url: Option<Url>,
    client: Client,
}

impl WebhookWorkflowClient {
    pub fn new(config: WebhookConfig) -> Result<Self, CoreError> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }

        let client = builder.build().map_err(|e| {
            error!("Failed to build webhook HTTP client: {}", e);
            CoreError::InternalServerError
        })?;

        if config.url.is_none() {
            warn!("Analysis webhook URL is not set, relays will fail until it is configured");
        }

        Ok(Self {
            webhook_url: config.url,
            client,
        })
    }

    fn build_form(submission: &MealSubmission, food_image: &ImageUpload) -> Form {
        let mut form = Form::new()
            .text("mealType", submission.meal_type.clone())
            .text("notes", submission.notes.clone())
            .part("foodImage", file_part(food_image, DEFAULT_FOOD_IMAGE_NAME));

        if let Some(label_image) = &submission.label_image {
            form = form.part("labelImage", file_part(label_image, DEFAULT_LABEL_IMAGE_NAME));
        }

        form
    }
}

fn file_part(upload: &ImageUpload, default_name: &str) -> Part {
    let file_name = upload.file_name_or(default_name).to_string();
    let content_type = upload.content_type_or_default();

    match Part::bytes(upload.data.to_vec())
        .file_name(file_name.clone())
        .mime_str(content_type)
    {
        Ok(part) => part,
        Err(e) => {
            warn!(content_type = %content_type, "Dropping unparseable content type: {}", e);
            Part::bytes(upload.data.to_vec()).file_name(file_name)
        }
    }
}

impl AnalysisWorkflowClient for WebhookWorkflowClient {
    async fn submit(&self, submission: &MealSubmission) -> Result<String, CoreError> {
        let webhook_url = self.webhook_url.as_ref().ok_or_else(|| {
            error!("Analysis webhook URL is not set");
            CoreError::Misconfigured
        })?;

        let food_image = submission
            .food_image
            .as_ref()
            .ok_or_else(|| CoreError::MissingRequiredField("foodImage".to_string()))?;

        debug!(webhook_url = %webhook_url, "Relaying meal submission");

        let form = Self::build_form(submission, food_image);

        let response = self
            .client
            .post(webhook_url.clone())
            .multipart(form)
            .send()
            .await
            .map_err(|e| {
                error!("Analysis webhook request failed: {}", e);
                CoreError::UpstreamUnreachable(e.to_string())
            })?;

        let status = response.status();

        let body = response.text().await.map_err(|e| {
            error!(status = status.as_u16(), "Failed to read analysis webhook response: {}", e);
            CoreError::UpstreamUnreachable(e.to_string())
        })?;

        if !status.is_success() {
            error!(status = status.as_u16(), body = %body, "Analysis webhook returned error");
            return Err(CoreError::UpstreamRejected {
                status: status.as_u16(),
                body,
            });
        }

        debug!(status = status.as_u16(), body = %body, "Analysis webhook responded");

        Ok(body)
    }
}
