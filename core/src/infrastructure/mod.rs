pub mod preview;
pub mod workflow;
