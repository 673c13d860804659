//! Payments service errors.

use thiserror::Error;

use crate::payments::stripe::StripeError;

#[derive(Debug, Error)]
pub enum PaymentsServiceError {
    #[error("amount must be a positive number")]
    InvalidAmount,

    #[error(transparent)]
    Upstream(#[from] StripeError),
}
