//! Test helpers.

use std::sync::Arc;

use jiff::Timestamp;
use salvo::{affix_state::inject, prelude::*};
use uuid::Uuid;

use storefront_app::{
    context::AppContext,
    domain::{
        carts::{MockCartsService, models::CartLine},
        orders::{
            MockOrdersService,
            models::{Order, OrderItem, OrderStatus, PaymentMethod, PaymentStatus, order_total},
        },
        products::{MockProductsService, models::Product},
    },
    payments::MockPaymentsService,
};

use crate::{auth::OwnerExt as _, state::State};

pub(crate) const TEST_OWNER_UUID: Uuid = Uuid::nil();

pub(crate) const MULTIPART_BOUNDARY: &str = "----------------------test-boundary";

#[salvo::handler]
pub(crate) async fn inject_owner(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    depot.insert_owner_uuid(TEST_OWNER_UUID);
    ctrl.call_next(req, depot, res).await;
}

fn strict_carts_mock() -> MockCartsService {
    let mut carts = MockCartsService::new();

    carts.expect_get_cart().never();
    carts.expect_add_item().never();
    carts.expect_set_quantity().never();
    carts.expect_remove_item().never();
    carts.expect_clear_cart().never();

    carts
}

fn strict_orders_mock() -> MockOrdersService {
    let mut orders = MockOrdersService::new();

    orders.expect_place_order().never();
    orders.expect_list_orders().never();
    orders.expect_get_status().never();
    orders.expect_update_status().never();

    orders
}

fn strict_products_mock() -> MockProductsService {
    let mut products = MockProductsService::new();

    products.expect_list_products().never();
    products.expect_get_product().never();
    products.expect_create_product().never();
    products.expect_update_product().never();
    products.expect_delete_product().never();

    products
}

fn strict_payments_mock() -> MockPaymentsService {
    let mut payments = MockPaymentsService::new();

    payments.expect_create_intent().never();

    payments
}

fn make_state(
    carts: MockCartsService,
    orders: MockOrdersService,
    products: MockProductsService,
    payments: MockPaymentsService,
) -> Arc<State> {
    Arc::new(State::new(AppContext {
        carts: Arc::new(carts),
        orders: Arc::new(orders),
        products: Arc::new(products),
        payments: Arc::new(payments),
    }))
}

fn make_service(state: Arc<State>, authenticated: bool, route: Router) -> Service {
    let mut router = Router::new().hoop(inject(state));

    if authenticated {
        router = router.hoop(inject_owner);
    }

    Service::new(router.push(route))
}

pub(crate) fn carts_service(carts: MockCartsService, route: Router) -> Service {
    let state = make_state(
        carts,
        strict_orders_mock(),
        strict_products_mock(),
        strict_payments_mock(),
    );

    make_service(state, true, route)
}

pub(crate) fn orders_service(orders: MockOrdersService, route: Router) -> Service {
    let state = make_state(
        strict_carts_mock(),
        orders,
        strict_products_mock(),
        strict_payments_mock(),
    );

    make_service(state, true, route)
}

pub(crate) fn products_service(products: MockProductsService, route: Router) -> Service {
    let state = make_state(
        strict_carts_mock(),
        strict_orders_mock(),
        products,
        strict_payments_mock(),
    );

    make_service(state, false, route)
}

pub(crate) fn payments_service(payments: MockPaymentsService, route: Router) -> Service {
    let state = make_state(
        strict_carts_mock(),
        strict_orders_mock(),
        strict_products_mock(),
        payments,
    );

    make_service(state, false, route)
}

pub(crate) fn make_cart_line(product: Uuid, unit_price: u64, quantity: u32) -> CartLine {
    CartLine {
        product_uuid: product,
        name: "Widget".to_string(),
        image: "uploads/widget.png".to_string(),
        unit_price,
        quantity,
    }
}

pub(crate) fn make_order(owner: Uuid) -> Order {
    let items = vec![
        OrderItem {
            product_uuid: Uuid::now_v7(),
            name: "Widget".to_string(),
            image: "uploads/widget.png".to_string(),
            unit_price: 12_50,
            quantity: 1,
        },
        OrderItem {
            product_uuid: Uuid::now_v7(),
            name: "Gizmo".to_string(),
            image: "uploads/gizmo.png".to_string(),
            unit_price: 3_25,
            quantity: 2,
        },
    ];

    let total_price = order_total(&items);

    Order {
        uuid: Uuid::now_v7(),
        owner_uuid: owner,
        items,
        payment_method: PaymentMethod::Cod,
        payment_status: PaymentStatus::Pending,
        order_status: OrderStatus::Pending,
        total_price,
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}

pub(crate) fn make_product() -> Product {
    Product {
        uuid: Uuid::now_v7(),
        name: "Widget".to_string(),
        description: "A widget".to_string(),
        price: 12_50,
        images: vec![
            "uploads/widget-front.png".to_string(),
            "uploads/widget-back.png".to_string(),
        ],
        category: "Gadgets".to_string(),
        count_in_stock: 4,
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}

pub(crate) fn multipart_content_type() -> String {
    format!("multipart/form-data; boundary={MULTIPART_BOUNDARY}")
}

pub(crate) fn multipart_body(fields: &[(&str, &str)], files: &[(&str, &str, &[u8])]) -> Vec<u8> {
    let mut body = Vec::new();

    for (name, value) in fields {
        body.extend_from_slice(
            format!(
                "--{MULTIPART_BOUNDARY}\r\nContent-Disposition: form-data; \
                 name=\"{name}\"\r\n\r\n{value}\r\n"
            )
            .as_bytes(),
        );
    }

    for (name, file_name, contents) in files {
        body.extend_from_slice(
            format!(
                "--{MULTIPART_BOUNDARY}\r\nContent-Disposition: form-data; \
                 name=\"{name}\"; filename=\"{file_name}\"\r\n\
                 Content-Type: application/octet-stream\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(contents);
        body.extend_from_slice(b"\r\n");
    }

    body.extend_from_slice(format!("--{MULTIPART_BOUNDARY}--\r\n").as_bytes());

    body
}
