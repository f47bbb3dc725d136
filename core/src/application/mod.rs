use crate::{
    domain::common::{DietCoachConfig, entities::app_errors::CoreError, services::Service},
    infrastructure::workflow::WebhookWorkflowClient,
};

pub type DietCoachService = Service<WebhookWorkflowClient>;

pub fn create_service(config: DietCoachConfig) -> Result<DietCoachService, CoreError> {
    let workflow_client = WebhookWorkflowClient::new(config.webhook)?;

    Ok(Service::new(workflow_client))
}
