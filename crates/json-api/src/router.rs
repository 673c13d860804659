//! App Router

use std::path::Path;

use salvo::{Router, serve_static::StaticDir};

use crate::{auth, carts, healthcheck, orders, payments, products};

pub(crate) fn app_router(uploads_dir: &Path) -> Router {
    Router::new()
        .push(Router::with_path("healthcheck").get(healthcheck::handler))
        .push(Router::with_path("uploads/{**rest}").get(StaticDir::new(uploads_dir.to_path_buf())))
        .push(
            Router::with_path("products")
                .get(products::index::handler)
                .post(products::create::handler)
                .push(
                    Router::with_path("{product}")
                        .get(products::get::handler)
                        .put(products::update::handler)
                        .delete(products::delete::handler),
                ),
        )
        .push(
            Router::with_path("payments/create-payment-intent")
                .post(payments::create_intent::handler),
        )
        .push(
            Router::new()
                .hoop(auth::middleware)
                .push(
                    Router::with_path("cart")
                        .get(carts::get::handler)
                        .post(carts::add::handler)
                        .put(carts::update::handler)
                        .push(Router::with_path("{product}").delete(carts::remove::handler)),
                )
                .push(
                    Router::with_path("orders")
                        .post(orders::create::handler)
                        .push(Router::with_path("myorders").get(orders::myorders::handler))
                        .push(
                            Router::with_path("{order}/status")
                                .get(orders::status::handler)
                                .put(orders::update_status::handler),
                        ),
                ),
        )
}
