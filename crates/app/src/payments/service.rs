//! Payments service.

use async_trait::async_trait;
use mockall::automock;

use crate::payments::{errors::PaymentsServiceError, stripe::StripeClient};

const CURRENCY: &str = "usd";

/// A created payment intent, reduced to what the client needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentIntent {
    pub client_secret: String,
}

/// Convert a decimal currency amount into integer minor units, rounding to
/// nearest.
#[must_use]
pub fn to_minor_units(amount: f64) -> i64 {
    (amount * 100.0).round() as i64
}

#[derive(Debug, Clone)]
pub struct StripePaymentsService {
    client: StripeClient,
}

impl StripePaymentsService {
    #[must_use]
    pub fn new(client: StripeClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl PaymentsService for StripePaymentsService {
    async fn create_intent(&self, amount: f64) -> Result<PaymentIntent, PaymentsServiceError> {
        if !amount.is_finite() || amount <= 0.0 {
            return Err(PaymentsServiceError::InvalidAmount);
        }

        let client_secret = self
            .client
            .create_payment_intent(to_minor_units(amount), CURRENCY)
            .await?;

        Ok(PaymentIntent { client_secret })
    }
}

#[automock]
#[async_trait]
pub trait PaymentsService: Send + Sync {
    /// Ask the processor for a payment intent over `amount`, a decimal
    /// currency amount. The processor records the intent; nothing is
    /// persisted locally and no order is touched.
    async fn create_intent(&self, amount: f64) -> Result<PaymentIntent, PaymentsServiceError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::payments::stripe::StripeConfig;

    fn service() -> StripePaymentsService {
        StripePaymentsService::new(StripeClient::new(StripeConfig {
            api_base: "http://localhost:9".to_string(),
            secret_key: "sk_test_unused".to_string(),
        }))
    }

    #[test]
    fn converts_decimal_amounts_to_minor_units() {
        assert_eq!(to_minor_units(19.99), 1999);
        assert_eq!(to_minor_units(10.0), 1000);
        assert_eq!(to_minor_units(0.01), 1);
    }

    #[test]
    fn rounds_to_nearest_minor_unit() {
        assert_eq!(to_minor_units(10.456), 1046);
        assert_eq!(to_minor_units(10.454), 1045);
    }

    #[tokio::test]
    async fn zero_amount_is_rejected_before_any_request() {
        let result = service().create_intent(0.0).await;

        assert!(matches!(result, Err(PaymentsServiceError::InvalidAmount)));
    }

    #[tokio::test]
    async fn negative_amount_is_rejected_before_any_request() {
        let result = service().create_intent(-5.0).await;

        assert!(matches!(result, Err(PaymentsServiceError::InvalidAmount)));
    }

    #[tokio::test]
    async fn non_finite_amount_is_rejected_before_any_request() {
        let result = service().create_intent(f64::NAN).await;

        assert!(matches!(result, Err(PaymentsServiceError::InvalidAmount)));
    }
}
