//! Product Models

use std::path::PathBuf;

use jiff::Timestamp;
use uuid::Uuid;

/// Product Model
#[derive(Debug, Clone)]
pub struct Product {
    pub uuid: Uuid,
    pub name: String,
    pub description: String,
    pub price: u64,
    pub images: Vec<String>,
    pub category: String,
    pub count_in_stock: u32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// An image file staged for the catalog, still at its upload location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageUpload {
    pub source_path: PathBuf,
    pub file_name: String,
}

/// New Product Model
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewProduct {
    pub name: String,
    pub description: String,
    pub price: u64,
    pub category: String,
    pub count_in_stock: u32,
    pub images: Vec<ImageUpload>,
}

/// Product Update Model
///
/// Absent fields keep their current values. A non-empty `images` set
/// replaces the stored images wholesale.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ProductUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<u64>,
    pub category: Option<String>,
    pub count_in_stock: Option<u32>,
    pub images: Vec<ImageUpload>,
}
