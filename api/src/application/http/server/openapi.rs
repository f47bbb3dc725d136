use crate::application::http::{
    history::router::HistoryApiDoc, meal_analysis::router::MealAnalysisApiDoc,
};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "DietCoach API"
    ),
    nest(
        (path = "/api", api = MealAnalysisApiDoc),
        (path = "/api", api = HistoryApiDoc),
    )
)]
pub struct ApiDoc;
