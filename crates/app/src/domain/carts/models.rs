//! Cart Models

use jiff::Timestamp;
use uuid::Uuid;

/// Cart Model
///
/// One cart row exists per owner; it is created lazily on first add and
/// emptied, never deleted, by clearing or checkout.
#[derive(Debug, Clone)]
pub struct Cart {
    pub owner_uuid: Uuid,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A cart line joined with the referenced product's current details.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartLine {
    pub product_uuid: Uuid,
    pub name: String,
    pub image: String,
    pub unit_price: u64,
    pub quantity: u32,
}

/// New Cart Item Model
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCartItem {
    pub product_uuid: Uuid,
    pub quantity: u32,
}
