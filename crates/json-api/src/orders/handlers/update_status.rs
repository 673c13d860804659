//! Update Order Status Handler

use std::sync::Arc;

use salvo::{
    oapi::{
        ToSchema,
        extract::{JsonBody, PathParam},
    },
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use storefront_app::domain::orders::models::OrderStatus;

use crate::{
    auth::OwnerExt as _,
    extensions::*,
    orders::{create::OrderResponse, errors::into_status_error},
    state::State,
};

/// Update Order Status Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct UpdateOrderStatusRequest {
    /// The status to move the order to
    pub status: String,
}

/// Update Order Status Handler
///
/// Moves one of the caller's orders forward through its status sequence.
#[endpoint(
    tags("orders"),
    summary = "Update Order Status",
    responses(
        (status_code = StatusCode::OK, description = "Order updated"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request or illegal transition"),
        (status_code = StatusCode::FORBIDDEN, description = "Not the order's owner"),
        (status_code = StatusCode::NOT_FOUND, description = "Order not found"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    order: PathParam<Uuid>,
    json: JsonBody<UpdateOrderStatusRequest>,
    depot: &mut Depot,
) -> Result<Json<OrderResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let owner = depot.owner_uuid_or_400()?;

    let status = json
        .into_inner()
        .status
        .parse::<OrderStatus>()
        .or_400("Invalid order status")?;

    let updated = state
        .app
        .orders
        .update_status(owner, order.into_inner(), status)
        .await
        .map_err(into_status_error)?;

    Ok(Json(updated.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use storefront_app::domain::orders::{MockOrdersService, OrdersServiceError};

    use crate::test_helpers::{TEST_OWNER_UUID, make_order, orders_service};

    use super::*;

    fn make_service(orders: MockOrdersService) -> Service {
        orders_service(orders, Router::with_path("orders/{order}/status").put(handler))
    }

    #[tokio::test]
    async fn test_update_status_returns_updated_order() -> TestResult {
        let mut order = make_order(TEST_OWNER_UUID);
        order.order_status = OrderStatus::Shipped;

        let order_uuid = order.uuid;

        let mut orders = MockOrdersService::new();

        orders
            .expect_update_status()
            .once()
            .withf(move |owner, o, status| {
                *owner == TEST_OWNER_UUID && *o == order_uuid && *status == OrderStatus::Shipped
            })
            .return_once(move |_, _, _| Ok(order));

        let response: OrderResponse =
            TestClient::put(format!("http://example.com/orders/{order_uuid}/status"))
                .json(&json!({ "status": "Shipped" }))
                .send(&make_service(orders))
                .await
                .take_json()
                .await?;

        assert_eq!(response.order_status, "Shipped");

        Ok(())
    }

    #[tokio::test]
    async fn test_update_status_illegal_transition_returns_400() -> TestResult {
        let mut orders = MockOrdersService::new();

        orders.expect_update_status().once().return_once(|_, _, _| {
            Err(OrdersServiceError::InvalidTransition {
                from: OrderStatus::Cancelled,
                to: OrderStatus::Pending,
            })
        });

        let res = TestClient::put(format!(
            "http://example.com/orders/{}/status",
            Uuid::now_v7()
        ))
        .json(&json!({ "status": "Pending" }))
        .send(&make_service(orders))
        .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }

    #[tokio::test]
    async fn test_update_status_of_foreign_order_returns_403() -> TestResult {
        let mut orders = MockOrdersService::new();

        orders
            .expect_update_status()
            .once()
            .return_once(|_, _, _| Err(OrdersServiceError::Forbidden));

        let res = TestClient::put(format!(
            "http://example.com/orders/{}/status",
            Uuid::now_v7()
        ))
        .json(&json!({ "status": "Shipped" }))
        .send(&make_service(orders))
        .await;

        assert_eq!(res.status_code, Some(StatusCode::FORBIDDEN));

        Ok(())
    }

    #[tokio::test]
    async fn test_update_status_with_unknown_status_returns_400() -> TestResult {
        let res = TestClient::put(format!(
            "http://example.com/orders/{}/status",
            Uuid::now_v7()
        ))
        .json(&json!({ "status": "Teleported" }))
        .send(&make_service(MockOrdersService::new()))
        .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }
}
