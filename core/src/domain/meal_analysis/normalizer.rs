use serde_json::Value;
use thiserror::Error;

use crate::domain::{
    common::entities::app_errors::CoreError, meal_analysis::entities::AnalysisRecord,
};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NormalizationRejection {
    #[error("response body is not JSON")]
    NotJson,

    #[error("`output` field is not a JSON document")]
    InvalidOutputString,

    #[error("analysis candidate is not an object")]
    NotAnObject,

    #[error("analysis candidate has no `totals` object")]
    MissingTotals,
}

impl From<NormalizationRejection> for CoreError {
    fn from(rejection: NormalizationRejection) -> Self {
        CoreError::UnexpectedShape(rejection.to_string())
    }
}

/// Response envelopes produced by the workflow engine, in matching order.
#[derive(Debug, Clone, PartialEq)]
enum Envelope {
    /// `{"output": "<json document>"}`, the engine stringified its result.
    OutputString(String),
    /// `{"data": {...}}`
    Data(Value),
    Bare(Value),
}

impl Envelope {
    fn classify(value: Value) -> Self {
        match value {
            Value::Object(mut object) => {
                if let Some(Value::String(output)) = object.get("output") {
                    return Envelope::OutputString(output.clone());
                }
                match object.remove("data") {
                    Some(data) => Envelope::Data(data),
                    None => Envelope::Bare(Value::Object(object)),
                }
            }
            other => Envelope::Bare(other),
        }
    }

    fn into_candidate(self) -> Result<Value, NormalizationRejection> {
        match self {
            Envelope::OutputString(output) => {
                serde_json::from_str(&output)
                    .map_err(|_| NormalizationRejection::InvalidOutputString)
            }
            Envelope::Data(value) | Envelope::Bare(value) => Ok(value),
        }
    }
}

/// Reconciles a raw workflow response body into an [`AnalysisRecord`].
///
/// Never panics: anything that is not a recognizable record comes back as a
/// [`NormalizationRejection`], and no partially-populated record is returned.
pub fn normalize(raw_body: &str) -> Result<AnalysisRecord, NormalizationRejection> {
    let parsed: Value =
        serde_json::from_str(raw_body).map_err(|_| NormalizationRejection::NotJson)?;

    let candidate = Envelope::classify(parsed).into_candidate()?;

    let candidate = candidate
        .as_object()
        .ok_or(NormalizationRejection::NotAnObject)?;

    let totals = candidate
        .get("totals")
        .and_then(Value::as_object)
        .ok_or(NormalizationRejection::MissingTotals)?;

    Ok(AnalysisRecord::from_candidate(candidate, totals))
}
