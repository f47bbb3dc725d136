use tracing::{error, instrument, warn};

use crate::domain::{
    common::{entities::app_errors::CoreError, services::Service},
    meal_analysis::{
        entities::{AnalysisRecord, MealSubmission},
        normalizer::normalize,
        ports::{AnalysisWorkflowClient, MealAnalysisService},
    },
};

impl<W> MealAnalysisService for Service<W>
where
    W: AnalysisWorkflowClient,
{
    #[instrument(skip(self, submission), fields(meal_type = %submission.meal_type))]
    async fn relay_meal(&self, submission: MealSubmission) -> Result<String, CoreError> {
        if submission.food_image.is_none() {
            warn!("Submission rejected: foodImage is missing");
            return Err(CoreError::MissingRequiredField("foodImage".to_string()));
        }

        self.workflow_client.submit(&submission).await
    }

    #[instrument(skip(self, submission), fields(meal_type = %submission.meal_type))]
    async fn analyze_meal(&self, submission: MealSubmission) -> Result<AnalysisRecord, CoreError> {
        let raw_body = self.relay_meal(submission).await?;

        normalize(&raw_body).map_err(|rejection| {
            error!(%rejection, raw_body = %raw_body, "Unexpected analysis response shape");
            CoreError::from(rejection)
        })
    }
}
