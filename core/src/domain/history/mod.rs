pub mod cache;
pub mod entities;
pub mod ports;

pub use cache::{HISTORY_CAPACITY, HistoryCache};
pub use entities::*;
pub use ports::*;
