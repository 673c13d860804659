//! Create Payment Intent Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use crate::{extensions::*, payments::errors::into_status_error, state::State};

/// Create Payment Intent Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CreateIntentRequest {
    /// Decimal currency amount to collect
    pub amount: f64,
}

/// Create Payment Intent Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CreateIntentResponse {
    /// Opaque secret the browser uses to complete the payment
    #[serde(rename = "clientSecret")]
    pub client_secret: String,
}

/// Create Payment Intent Handler
///
/// Asks the payment processor for an intent over the given amount and
/// returns its client secret. Nothing is persisted locally.
#[endpoint(
    tags("payments"),
    summary = "Create Payment Intent",
    responses(
        (status_code = StatusCode::OK, description = "Intent created"),
        (status_code = StatusCode::BAD_REQUEST, description = "Missing or non-positive amount"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Payment processor failure"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<CreateIntentRequest>,
    depot: &mut Depot,
) -> Result<Json<CreateIntentResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let intent = state
        .app
        .payments
        .create_intent(json.into_inner().amount)
        .await
        .map_err(into_status_error)?;

    Ok(Json(CreateIntentResponse {
        client_secret: intent.client_secret,
    }))
}
