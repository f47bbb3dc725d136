use std::sync::Arc;

use dietcoach_core::{
    application::DietCoachService,
    domain::history::HistoryCache,
    infrastructure::preview::{InMemoryPreviewStore, StoredPreviewHandle},
};
use parking_lot::Mutex;

use crate::args::Args;

pub type SharedHistory = Arc<Mutex<HistoryCache<StoredPreviewHandle>>>;

#[derive(Clone)]
pub struct AppState {
    pub args: Arc<Args>,
    pub service: DietCoachService,
    pub previews: InMemoryPreviewStore,
    pub history: SharedHistory,
}

impl AppState {
    pub fn new(args: Arc<Args>, service: DietCoachService) -> Self {
        Self {
            args,
            service,
            previews: InMemoryPreviewStore::new(),
            history: Arc::new(Mutex::new(HistoryCache::new())),
        }
    }

    /// Ends the current history session and starts an empty one.
    /// Returns how many previews were released.
    pub fn reset_history(&self) -> usize {
        let mut history = self.history.lock();
        std::mem::take(&mut *history).teardown()
    }

    pub fn preview_url(&self, preview_id: uuid::Uuid) -> String {
        format!("{}/api/previews/{}", self.args.server.root_path, preview_id)
    }
}
