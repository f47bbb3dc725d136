use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use utoipa::ToSchema;

/// One recognized food component of a meal.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, ToSchema)]
pub struct AnalysisItem {
    pub name: String,
    #[serde(rename = "portion_g", skip_serializing_if = "Option::is_none")]
    pub portion_grams: Option<f64>,
    pub calories_kcal: f64,
    #[serde(rename = "protein_g")]
    pub protein_grams: f64,
    #[serde(rename = "carbs_g")]
    pub carbs_grams: f64,
    #[serde(rename = "fat_g")]
    pub fat_grams: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub method: Option<String>,
    #[serde(rename = "dietFit", skip_serializing_if = "Option::is_none")]
    pub diet_fit_tags: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tip: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize, ToSchema)]
pub struct AnalysisTotals {
    pub calories_kcal: f64,
    #[serde(rename = "protein_g")]
    pub protein_grams: f64,
    #[serde(rename = "carbs_g")]
    pub carbs_grams: f64,
    #[serde(rename = "fat_g")]
    pub fat_grams: f64,
}

/// Nutrition breakdown returned by the analysis workflow.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, ToSchema)]
pub struct AnalysisRecord {
    pub items: Vec<AnalysisItem>,
    pub totals: AnalysisTotals,
    pub summary: String,
    pub suggestion: String,
}

impl AnalysisRecord {
    /// Builds a record from a candidate object whose `totals` has already been
    /// checked to be an object. Every other field is read leniently.
    pub(crate) fn from_candidate(
        candidate: &Map<String, Value>,
        totals: &Map<String, Value>,
    ) -> Self {
        let items = candidate
            .get("items")
            .and_then(Value::as_array)
            .map(|items| {
                items
                    .iter()
                    .filter_map(Value::as_object)
                    .map(AnalysisItem::from_object)
                    .collect()
            })
            .unwrap_or_default();

        Self {
            items,
            totals: AnalysisTotals::from_object(totals),
            summary: string_field(candidate, "summary").unwrap_or_default(),
            suggestion: string_field(candidate, "suggestion").unwrap_or_default(),
        }
    }

    /// Name of the first recognized item, if it has a usable one.
    pub fn main_item_name(&self) -> Option<&str> {
        self.items
            .first()
            .map(|item| item.name.trim())
            .filter(|name| !name.is_empty())
    }
}

impl AnalysisItem {
    fn from_object(object: &Map<String, Value>) -> Self {
        let diet_fit_tags = object.get("dietFit").and_then(Value::as_array).map(|tags| {
            tags.iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect()
        });

        Self {
            name: string_field(object, "name").unwrap_or_default(),
            portion_grams: number_field(object, "portion_g"),
            calories_kcal: number_field(object, "calories_kcal").unwrap_or(0.0),
            protein_grams: number_field(object, "protein_g").unwrap_or(0.0),
            carbs_grams: number_field(object, "carbs_g").unwrap_or(0.0),
            fat_grams: number_field(object, "fat_g").unwrap_or(0.0),
            method: string_field(object, "method"),
            diet_fit_tags,
            note: string_field(object, "note"),
            tip: string_field(object, "tip"),
        }
    }
}

impl AnalysisTotals {
    fn from_object(object: &Map<String, Value>) -> Self {
        Self {
            calories_kcal: number_field(object, "calories_kcal").unwrap_or(0.0),
            protein_grams: number_field(object, "protein_g").unwrap_or(0.0),
            carbs_grams: number_field(object, "carbs_g").unwrap_or(0.0),
            fat_grams: number_field(object, "fat_g").unwrap_or(0.0),
        }
    }
}

fn number_field(object: &Map<String, Value>, key: &str) -> Option<f64> {
    object.get(key).and_then(Value::as_f64)
}

fn string_field(object: &Map<String, Value>, key: &str) -> Option<String> {
    object.get(key).and_then(Value::as_str).map(str::to_string)
}
