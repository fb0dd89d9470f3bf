pub mod analysis;
pub mod detection;
pub mod errors;
pub mod image;
pub mod keywords;
pub mod model;
pub mod summary;
