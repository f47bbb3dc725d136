use std::collections::VecDeque;

use tracing::debug;
use uuid::Uuid;

use crate::domain::meal_analysis::entities::{AnalysisRecord, MealType};

use super::{
    entities::{HistoryEntry, HistoryEntrySummary},
    ports::PreviewHandle,
};

pub const HISTORY_CAPACITY: usize = 5;

/// Most-recent-first record of past analyses.
///
/// The cache owns every entry's preview handle. A handle is released when its
/// entry is evicted, when the cache is torn down, or when the cache is dropped
/// with entries still present.
#[derive(Debug)]
pub struct HistoryCache<H: PreviewHandle> {
    entries: VecDeque<HistoryEntry<H>>,
    capacity: usize,
}

impl<H: PreviewHandle> Default for HistoryCache<H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H: PreviewHandle> HistoryCache<H> {
    pub fn new() -> Self {
        Self::with_capacity(HISTORY_CAPACITY)
    }

    /// A capacity of zero is raised to one.
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: VecDeque::with_capacity(capacity + 1),
            capacity,
        }
    }

    /// Records a normalized analysis at the head of the cache, evicting and
    /// releasing the oldest entry once capacity is exceeded.
    pub fn insert(
        &mut self,
        record: &AnalysisRecord,
        preview_handle: H,
        meal_type: MealType,
    ) -> HistoryEntrySummary {
        let entry = HistoryEntry::new(record, preview_handle, meal_type);
        let summary = entry.summary();
        self.entries.push_front(entry);

        while self.entries.len() > self.capacity {
            if let Some(evicted) = self.entries.pop_back() {
                debug!(
                    entry_id = %evicted.id,
                    preview_id = %evicted.preview_id(),
                    "Evicting history entry"
                );
                evicted.release();
            }
        }

        summary
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn entries(&self) -> impl Iterator<Item = &HistoryEntry<H>> {
        self.entries.iter()
    }

    pub fn summaries(&self) -> Vec<HistoryEntrySummary> {
        self.entries.iter().map(HistoryEntry::summary).collect()
    }

    pub fn get(&self, id: Uuid) -> Option<&HistoryEntry<H>> {
        self.entries.iter().find(|entry| entry.id == id)
    }

    /// Ends the cache's lifetime, releasing every held preview handle.
    /// Returns how many handles were released.
    pub fn teardown(mut self) -> usize {
        self.release_all()
    }

    fn release_all(&mut self) -> usize {
        let released = self.entries.len();
        for entry in self.entries.drain(..) {
            entry.release();
        }
        if released > 0 {
            debug!(released, "Released history previews");
        }
        released
    }
}

impl<H: PreviewHandle> Drop for HistoryCache<H> {
    fn drop(&mut self) {
        self.release_all();
    }
}
