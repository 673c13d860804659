//! Payment Errors

use salvo::http::StatusError;
use tracing::error;

use storefront_app::payments::PaymentsServiceError;

pub(crate) fn into_status_error(error: PaymentsServiceError) -> StatusError {
    match error {
        PaymentsServiceError::InvalidAmount => {
            StatusError::bad_request().brief("Amount must be a positive number")
        }
        PaymentsServiceError::Upstream(source) => {
            error!("payment processor error: {source}");

            // The processor's message is passed through to the client.
            StatusError::internal_server_error().brief(source.to_string())
        }
    }
}
