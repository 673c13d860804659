//! Get Cart Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use storefront_app::domain::carts::models::CartLine;

use crate::{auth::OwnerExt as _, carts::errors::into_status_error, extensions::*, state::State};

/// A single cart line with the referenced product's current details.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CartLineResponse {
    /// The product this line refers to
    pub product_uuid: Uuid,

    /// Product name
    pub name: String,

    /// Product image path, relative to the uploads directory
    pub image: String,

    /// Current unit price in minor currency units
    pub unit_price: u64,

    /// Number of units in the cart
    pub quantity: u32,
}

impl From<CartLine> for CartLineResponse {
    fn from(line: CartLine) -> Self {
        CartLineResponse {
            product_uuid: line.product_uuid,
            name: line.name,
            image: line.image,
            unit_price: line.unit_price,
            quantity: line.quantity,
        }
    }
}

/// Cart contents
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CartResponse {
    /// The cart's lines
    pub items: Vec<CartLineResponse>,
}

impl CartResponse {
    pub(crate) fn from_lines(lines: Vec<CartLine>) -> Self {
        Self {
            items: lines.into_iter().map(Into::into).collect(),
        }
    }
}

/// Get Cart Handler
///
/// Returns the caller's cart lines; a missing cart is an empty list.
#[endpoint(tags("cart"), summary = "Get Cart")]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<CartResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let owner = depot.owner_uuid_or_400()?;

    let lines = state
        .app
        .carts
        .get_cart(owner)
        .await
        .map_err(into_status_error)?;

    Ok(Json(CartResponse::from_lines(lines)))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use storefront_app::domain::carts::{CartsServiceError, MockCartsService};

    use crate::test_helpers::{TEST_OWNER_UUID, carts_service, make_cart_line};

    use super::*;

    fn make_service(carts: MockCartsService) -> Service {
        carts_service(carts, Router::with_path("cart").get(handler))
    }

    #[tokio::test]
    async fn test_get_cart_returns_lines() -> TestResult {
        let line = make_cart_line(Uuid::now_v7(), 10_00, 2);
        let expected = line.clone();

        let mut carts = MockCartsService::new();

        carts
            .expect_get_cart()
            .once()
            .withf(|owner| *owner == TEST_OWNER_UUID)
            .return_once(move |_| Ok(vec![line]));

        let response: CartResponse = TestClient::get("http://example.com/cart")
            .send(&make_service(carts))
            .await
            .take_json()
            .await?;

        assert_eq!(response.items.len(), 1);
        assert_eq!(response.items[0].product_uuid, expected.product_uuid);
        assert_eq!(response.items[0].unit_price, 10_00);
        assert_eq!(response.items[0].quantity, 2);

        Ok(())
    }

    #[tokio::test]
    async fn test_get_cart_without_cart_row_is_empty_list() -> TestResult {
        let mut carts = MockCartsService::new();

        carts
            .expect_get_cart()
            .once()
            .withf(|owner| *owner == TEST_OWNER_UUID)
            .return_once(|_| Ok(vec![]));

        let response: CartResponse = TestClient::get("http://example.com/cart")
            .send(&make_service(carts))
            .await
            .take_json()
            .await?;

        assert!(response.items.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn test_get_cart_storage_error_returns_500() -> TestResult {
        let mut carts = MockCartsService::new();

        carts
            .expect_get_cart()
            .once()
            .return_once(|_| Err(CartsServiceError::Sql(sqlx_row_not_found())));

        let res = TestClient::get("http://example.com/cart")
            .send(&make_service(carts))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::INTERNAL_SERVER_ERROR));

        Ok(())
    }

    fn sqlx_row_not_found() -> storefront_app::sqlx::Error {
        storefront_app::sqlx::Error::RowNotFound
    }
}
