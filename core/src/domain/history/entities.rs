use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::{
    common::generate_timestamp,
    meal_analysis::entities::{AnalysisRecord, MealType},
};

use super::ports::PreviewHandle;

pub const MAIN_ITEM_PLACEHOLDER: &str = "Meal";

#[derive(Debug)]
pub struct HistoryEntry<H> {
    pub id: Uuid,
    pub timestamp: DateTime<Utc>,
    pub meal_type: MealType,
    pub calories: f64,
    pub main_item: String,
    pub(crate) preview_handle: H,
}

impl<H: PreviewHandle> HistoryEntry<H> {
    pub fn new(record: &AnalysisRecord, preview_handle: H, meal_type: MealType) -> Self {
        let (now, timestamp) = generate_timestamp();

        Self {
            id: Uuid::new_v7(timestamp),
            timestamp: now,
            meal_type,
            calories: record.totals.calories_kcal,
            main_item: record
                .main_item_name()
                .unwrap_or(MAIN_ITEM_PLACEHOLDER)
                .to_string(),
            preview_handle,
        }
    }

    pub fn preview_id(&self) -> Uuid {
        self.preview_handle.id()
    }

    pub fn summary(&self) -> HistoryEntrySummary {
        HistoryEntrySummary {
            id: self.id,
            timestamp: self.timestamp,
            meal_type: self.meal_type,
            calories: self.calories,
            main_item: self.main_item.clone(),
            preview_id: self.preview_id(),
        }
    }

    pub(crate) fn release(self) {
        self.preview_handle.release();
    }
}

/// Detached copy of an entry, safe to hand out while the cache keeps the handle.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntrySummary {
    pub id: Uuid,
    pub timestamp: DateTime<Utc>,
    pub meal_type: MealType,
    pub calories: f64,
    pub main_item: String,
    pub preview_id: Uuid,
}
