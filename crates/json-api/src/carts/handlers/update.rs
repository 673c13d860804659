//! Update Cart Line Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    auth::OwnerExt as _,
    carts::{errors::into_status_error, get::CartResponse},
    extensions::*,
    state::State,
};

/// Update Cart Line Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct UpdateCartLineRequest {
    /// The product whose line is updated
    #[serde(rename = "productId")]
    pub product_id: Uuid,

    /// The new quantity, replacing the current one
    pub quantity: u32,
}

/// Update Cart Line Handler
///
/// Overwrites the quantity of an existing line.
#[endpoint(
    tags("cart"),
    summary = "Update Cart Line",
    responses(
        (status_code = StatusCode::OK, description = "Cart updated"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::NOT_FOUND, description = "Cart or line not found"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<UpdateCartLineRequest>,
    depot: &mut Depot,
) -> Result<Json<CartResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let owner = depot.owner_uuid_or_400()?;
    let request = json.into_inner();

    let lines = state
        .app
        .carts
        .set_quantity(owner, request.product_id, request.quantity)
        .await
        .map_err(into_status_error)?;

    Ok(Json(CartResponse::from_lines(lines)))
}
