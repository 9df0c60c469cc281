mod utils;
mod error;
pub mod data;
pub mod detection_processing;
pub mod common;

pub use error::GeometryError;

pub type Result<T, E = GeometryError> = std::result::Result<T, E>;
