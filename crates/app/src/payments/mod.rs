//! Payments

pub mod errors;
pub mod service;
pub mod stripe;

pub use errors::PaymentsServiceError;
pub use service::*;
pub use stripe::{StripeClient, StripeConfig, StripeError};
