//! Order Status Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::PathParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use storefront_app::domain::orders::models::OrderStatusSummary;

use crate::{auth::OwnerExt as _, extensions::*, orders::errors::into_status_error, state::State};

/// Order Status Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrderStatusResponse {
    /// The order's unique identifier
    #[serde(rename = "orderId")]
    pub order_id: Uuid,

    /// Fulfilment status
    #[serde(rename = "orderStatus")]
    pub order_status: String,

    /// Payment status
    #[serde(rename = "paymentStatus")]
    pub payment_status: String,
}

impl From<OrderStatusSummary> for OrderStatusResponse {
    fn from(summary: OrderStatusSummary) -> Self {
        OrderStatusResponse {
            order_id: summary.uuid,
            order_status: summary.order_status.to_string(),
            payment_status: summary.payment_status.to_string(),
        }
    }
}

/// Order Status Handler
///
/// Returns the status pair of one of the caller's orders.
#[endpoint(
    tags("orders"),
    summary = "Order Status",
    responses(
        (status_code = StatusCode::OK, description = "Order status"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::FORBIDDEN, description = "Not the order's owner"),
        (status_code = StatusCode::NOT_FOUND, description = "Order not found"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    order: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<OrderStatusResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let owner = depot.owner_uuid_or_400()?;

    let summary = state
        .app
        .orders
        .get_status(owner, order.into_inner())
        .await
        .map_err(into_status_error)?;

    Ok(Json(summary.into()))
}
