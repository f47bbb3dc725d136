use std::{collections::HashMap, sync::Arc};

use bytes::Bytes;
use parking_lot::RwLock;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::domain::{common::generate_uuid_v7, history::ports::PreviewHandle};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredPreview {
    pub content_type: String,
    pub data: Bytes,
}

/// Process-local image previews, addressable by id until released.
#[derive(Debug, Clone, Default)]
pub struct InMemoryPreviewStore {
    previews: Arc<RwLock<HashMap<Uuid, StoredPreview>>>,
}

impl InMemoryPreviewStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn allocate(&self, data: Bytes, content_type: impl Into<String>) -> StoredPreviewHandle {
        let id = generate_uuid_v7();
        let preview = StoredPreview {
            content_type: content_type.into(),
            data,
        };

        debug!(preview_id = %id, size = preview.data.len(), "Allocated preview");
        self.previews.write().insert(id, preview);

        StoredPreviewHandle {
            id,
            previews: Arc::clone(&self.previews),
            released: false,
        }
    }

    pub fn get(&self, id: Uuid) -> Option<StoredPreview> {
        self.previews.read().get(&id).cloned()
    }

    pub fn len(&self) -> usize {
        self.previews.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.previews.read().is_empty()
    }
}

/// Owning reference to one stored preview.
///
/// The bytes are removed on [`PreviewHandle::release`] or, failing that, when
/// the handle is dropped.
#[derive(Debug)]
pub struct StoredPreviewHandle {
    id: Uuid,
    previews: Arc<RwLock<HashMap<Uuid, StoredPreview>>>,
    released: bool,
}

impl StoredPreviewHandle {
    fn free(&mut self) {
        if self.released {
            return;
        }
        self.released = true;

        if self.previews.write().remove(&self.id).is_none() {
            warn!(preview_id = %self.id, "Preview was already gone on release");
        } else {
            debug!(preview_id = %self.id, "Released preview");
        }
    }
}

impl PreviewHandle for StoredPreviewHandle {
    fn id(&self) -> Uuid {
        self.id
    }

    fn release(mut self) {
        self.free();
    }
}

impl Drop for StoredPreviewHandle {
    fn drop(&mut self) {
        self.free();
    }
}
