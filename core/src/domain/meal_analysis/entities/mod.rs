pub mod analysis_record;
pub mod meal_submission;
pub mod meal_type;

pub use analysis_record::*;
pub use meal_submission::*;
pub use meal_type::*;
