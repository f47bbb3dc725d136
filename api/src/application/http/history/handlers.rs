pub mod get_history;
pub mod get_preview;
pub mod reset_history;
