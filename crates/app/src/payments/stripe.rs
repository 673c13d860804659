//! Stripe payment-intent client.

use reqwest::Client;
use serde::Deserialize;
use thiserror::Error;

/// Configuration for connecting to the payment processor.
#[derive(Debug, Clone)]
pub struct StripeConfig {
    /// API base, e.g. `"https://api.stripe.com"`.
    pub api_base: String,

    /// Secret API key used as the bearer token.
    pub secret_key: String,
}

/// HTTP client for creating payment intents.
///
/// Holds one connection pool for the life of the process; constructed at
/// startup and shared through the app context.
#[derive(Debug, Clone)]
pub struct StripeClient {
    config: StripeConfig,
    http: Client,
}

impl StripeClient {
    /// Create a new client from the given configuration.
    #[must_use]
    pub fn new(config: StripeConfig) -> Self {
        Self {
            config,
            http: Client::new(),
        }
    }

    /// Create a payment intent for `amount` minor currency units.
    ///
    /// Returns the intent's opaque client secret, which the storefront
    /// hands to the browser to complete the payment.
    ///
    /// # Errors
    ///
    /// Returns an error on HTTP failure or an unexpected response body.
    pub async fn create_payment_intent(
        &self,
        amount: i64,
        currency: &str,
    ) -> Result<String, StripeError> {
        let url = format!("{}/v1/payment_intents", self.config.api_base);

        let params = [
            ("amount", amount.to_string()),
            ("currency", currency.to_string()),
            ("automatic_payment_methods[enabled]", "true".to_string()),
        ];

        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.config.secret_key)
            .form(&params)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();

            return Err(StripeError::UnexpectedResponse(format!(
                "payment intent request failed with status {status}: {}",
                error_message(&text)
            )));
        }

        let parsed: PaymentIntentResponse = response.json().await?;

        Ok(parsed.client_secret)
    }
}

/// Pull the human-readable message out of a Stripe error body, falling back
/// to the raw text.
fn error_message(body: &str) -> String {
    serde_json::from_str::<ErrorResponse>(body)
        .map(|parsed| parsed.error.message)
        .unwrap_or_else(|_| body.to_string())
}

#[derive(Debug, Deserialize)]
struct PaymentIntentResponse {
    client_secret: String,
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: ErrorDetails,
}

#[derive(Debug, Deserialize)]
struct ErrorDetails {
    message: String,
}

/// Errors that can occur when communicating with the payment processor.
#[derive(Debug, Error)]
pub enum StripeError {
    /// An HTTP transport or serialization error occurred.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// The processor returned a non-2xx response or unexpected body.
    #[error("unexpected response from payment processor: {0}")]
    UnexpectedResponse(String),
}
