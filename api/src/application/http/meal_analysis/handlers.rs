pub mod analyze_meal;
pub mod relay_meal;
