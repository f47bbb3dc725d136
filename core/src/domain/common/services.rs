use crate::domain::meal_analysis::ports::AnalysisWorkflowClient;

#[derive(Clone)]
pub struct Service<W>
where
    W: AnalysisWorkflowClient,
{
    pub(crate) workflow_client: W,
}

impl<W> Service<W>
where
    W: AnalysisWorkflowClient,
{
    pub fn new(workflow_client: W) -> Self {
        Self { workflow_client }
    }
}
