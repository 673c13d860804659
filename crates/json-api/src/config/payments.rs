//! Payments Config

use clap::Args;

/// Payment processor settings.
#[derive(Debug, Args)]
pub struct PaymentsConfig {
    /// Secret API key for the payment processor
    #[arg(long, env = "STRIPE_SECRET_KEY")]
    pub stripe_secret_key: String,

    /// Payment processor API base URL
    #[arg(long, env = "STRIPE_API_BASE", default_value = "https://api.stripe.com")]
    pub stripe_api_base: String,
}
