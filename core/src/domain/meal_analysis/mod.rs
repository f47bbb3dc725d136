pub mod entities;
pub mod normalizer;
pub mod ports;
pub mod services;

pub use entities::*;
pub use normalizer::{NormalizationRejection, normalize};
pub use ports::*;
