pub mod common;
pub mod history;
pub mod meal_analysis;
