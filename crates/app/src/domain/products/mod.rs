//! Products

pub mod errors;
pub mod images;
pub mod models;
mod repository;
pub mod service;

pub use errors::ProductsServiceError;
pub use images::ImageStore;
pub use service::*;
