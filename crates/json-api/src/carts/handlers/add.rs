//! Add To Cart Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use storefront_app::domain::carts::models::NewCartItem;

use crate::{
    auth::OwnerExt as _,
    carts::{errors::into_status_error, get::CartResponse},
    extensions::*,
    state::State,
};

/// Add To Cart Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct AddToCartRequest {
    /// The product to add
    #[serde(rename = "productId")]
    pub product_id: Uuid,

    /// How many units to add
    pub quantity: u32,
}

impl From<AddToCartRequest> for NewCartItem {
    fn from(request: AddToCartRequest) -> Self {
        NewCartItem {
            product_uuid: request.product_id,
            quantity: request.quantity,
        }
    }
}

/// Add To Cart Handler
///
/// Adds a product to the caller's cart, incrementing the quantity when the
/// product is already in it.
#[endpoint(
    tags("cart"),
    summary = "Add To Cart",
    responses(
        (status_code = StatusCode::CREATED, description = "Cart updated"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<AddToCartRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<CartResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let owner = depot.owner_uuid_or_400()?;

    let lines = state
        .app
        .carts
        .add_item(owner, json.into_inner().into())
        .await
        .map_err(into_status_error)?;

    res.status_code(StatusCode::CREATED);

    Ok(Json(CartResponse::from_lines(lines)))
}
