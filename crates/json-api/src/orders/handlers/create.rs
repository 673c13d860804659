//! Place Order Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use storefront_app::domain::orders::models::{NewOrder, Order, OrderItem, PaymentMethod};

use crate::{auth::OwnerExt as _, extensions::*, orders::errors::into_status_error, state::State};

/// Place Order Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct PlaceOrderRequest {
    /// How the order will be paid; defaults to cash on delivery
    #[serde(rename = "paymentMethod")]
    pub payment_method: Option<String>,
}

/// A captured order line.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrderItemResponse {
    /// The product this line was captured from
    pub product_uuid: Uuid,

    /// Product name at placement time
    pub name: String,

    /// Product image at placement time
    pub image: String,

    /// Unit price at placement time, in minor currency units
    pub unit_price: u64,

    /// Number of units purchased
    pub quantity: u32,
}

impl From<OrderItem> for OrderItemResponse {
    fn from(item: OrderItem) -> Self {
        OrderItemResponse {
            product_uuid: item.product_uuid,
            name: item.name,
            image: item.image,
            unit_price: item.unit_price,
            quantity: item.quantity,
        }
    }
}

/// Order Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrderResponse {
    /// The order's unique identifier
    pub uuid: Uuid,

    /// The captured lines
    pub items: Vec<OrderItemResponse>,

    /// Payment method
    pub payment_method: String,

    /// Payment status
    pub payment_status: String,

    /// Order status
    pub order_status: String,

    /// Total price in minor currency units, fixed at placement time
    pub total_price: u64,

    /// When the order was placed
    pub created_at: String,

    /// When the order last changed
    pub updated_at: String,
}

impl From<Order> for OrderResponse {
    fn from(order: Order) -> Self {
        OrderResponse {
            uuid: order.uuid,
            items: order.items.into_iter().map(Into::into).collect(),
            payment_method: order.payment_method.to_string(),
            payment_status: order.payment_status.to_string(),
            order_status: order.order_status.to_string(),
            total_price: order.total_price,
            created_at: order.created_at.to_string(),
            updated_at: order.updated_at.to_string(),
        }
    }
}

/// Place Order Handler
///
/// Captures the caller's cart into a new order and empties the cart.
#[endpoint(
    tags("orders"),
    summary = "Place Order",
    responses(
        (status_code = StatusCode::CREATED, description = "Order placed"),
        (status_code = StatusCode::BAD_REQUEST, description = "Cart is empty or payload invalid"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<PlaceOrderRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<OrderResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let owner = depot.owner_uuid_or_400()?;

    let payment_method = json
        .into_inner()
        .payment_method
        .map(|raw| raw.parse::<PaymentMethod>())
        .transpose()
        .or_400("Invalid payment method")?;

    let order = state
        .app
        .orders
        .place_order(owner, NewOrder { payment_method })
        .await
        .map_err(into_status_error)?;

    res.status_code(StatusCode::CREATED);

    Ok(Json(order.into()))
}
