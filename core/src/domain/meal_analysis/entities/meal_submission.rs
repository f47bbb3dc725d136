use bytes::Bytes;

pub const DEFAULT_FOOD_IMAGE_NAME: &str = "food.jpg";
pub const DEFAULT_LABEL_IMAGE_NAME: &str = "label.jpg";
pub const DEFAULT_IMAGE_CONTENT_TYPE: &str = "application/octet-stream";

/// A binary part received from the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageUpload {
    pub file_name: Option<String>,
    pub content_type: Option<String>,
    pub data: Bytes,
}

impl ImageUpload {
    pub fn new(file_name: Option<String>, content_type: Option<String>, data: Bytes) -> Self {
        Self {
            file_name,
            content_type,
            data,
        }
    }

    /// Filename to send upstream, `default` when the caller sent none or an empty one.
    pub fn file_name_or<'a>(&'a self, default: &'a str) -> &'a str {
        self.file_name
            .as_deref()
            .filter(|name| !name.is_empty())
            .unwrap_or(default)
    }

    pub fn content_type_or_default(&self) -> &str {
        self.content_type
            .as_deref()
            .filter(|content_type| !content_type.is_empty())
            .unwrap_or(DEFAULT_IMAGE_CONTENT_TYPE)
    }
}

/// Inbound meal submission as relayed to the analysis workflow.
///
/// `meal_type` is forwarded verbatim; only the full analyze pipeline requires
/// it to be a known [`MealType`](super::MealType).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MealSubmission {
    pub food_image: Option<ImageUpload>,
    pub label_image: Option<ImageUpload>,
    pub meal_type: String,
    pub notes: String,
}
