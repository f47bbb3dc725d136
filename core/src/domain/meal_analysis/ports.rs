use std::future::Future;

use crate::domain::{
    common::entities::app_errors::CoreError,
    meal_analysis::entities::{AnalysisRecord, MealSubmission},
};

/// Client for the external webhook-driven analysis workflow.
#[cfg_attr(test, mockall::automock)]
pub trait AnalysisWorkflowClient: Send + Sync {
    /// Posts the submission once and returns the raw response body on a
    /// success status. Callers check `food_image` before calling.
    fn submit(
        &self,
        submission: &MealSubmission,
    ) -> impl Future<Output = Result<String, CoreError>> + Send;
}

/// Service trait for meal analysis business logic
pub trait MealAnalysisService: Send + Sync {
    /// Forwards the submission and returns the upstream body unparsed.
    fn relay_meal(
        &self,
        submission: MealSubmission,
    ) -> impl Future<Output = Result<String, CoreError>> + Send;

    /// Relays the submission, then normalizes the upstream body.
    fn analyze_meal(
        &self,
        submission: MealSubmission,
    ) -> impl Future<Output = Result<AnalysisRecord, CoreError>> + Send;
}
