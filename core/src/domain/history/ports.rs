use uuid::Uuid;

/// A locally allocated, displayable reference to an uploaded image.
///
/// Release consumes the handle, so a handle can be released at most once.
pub trait PreviewHandle: Send {
    fn id(&self) -> Uuid;

    fn release(self);
}
