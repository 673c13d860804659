//! Update Product Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use storefront_app::domain::products::models::ProductUpdate;

use crate::{
    extensions::*,
    products::{errors::into_status_error, get::ProductResponse, staged_images},
    state::State,
};

/// Update Product Handler
///
/// Partially updates a product from a multipart form; fields that are not
/// sent keep their current values. Sending `images` files replaces the
/// stored image set wholesale.
#[endpoint(
    tags("products"),
    summary = "Update Product",
    responses(
        (status_code = StatusCode::OK, description = "Product updated"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::NOT_FOUND, description = "Product not found"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    product: PathParam<Uuid>,
    req: &mut Request,
    depot: &mut Depot,
) -> Result<Json<ProductResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let form = req.form_data().await.or_400("Invalid multipart payload")?;

    let price = form
        .fields
        .get("price")
        .map(|raw| raw.parse::<u64>())
        .transpose()
        .or_400("Invalid price")?;

    let count_in_stock = form
        .fields
        .get("countInStock")
        .map(|raw| raw.parse::<u32>())
        .transpose()
        .or_400("Invalid countInStock")?;

    let update = ProductUpdate {
        name: form.fields.get("name").cloned(),
        description: form.fields.get("description").cloned(),
        price,
        category: form.fields.get("category").cloned(),
        count_in_stock,
        images: staged_images(form.files.get_vec("images")),
    };

    let updated = state
        .app
        .products
        .update_product(product.into_inner(), update)
        .await
        .map_err(into_status_error)?;

    Ok(Json(updated.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use storefront_app::domain::products::{MockProductsService, ProductsServiceError};

    use crate::test_helpers::{
        make_product, multipart_body, multipart_content_type, products_service,
    };

    use super::*;

    fn make_service(products: MockProductsService) -> Service {
        products_service(products, Router::with_path("products/{product}").put(handler))
    }

    #[tokio::test]
    async fn test_update_sends_only_present_fields() -> TestResult {
        let mut product = make_product();
        product.name = "Renamed".to_string();

        let uuid = product.uuid;

        let mut products = MockProductsService::new();

        products
            .expect_update_product()
            .once()
            .withf(move |p, update| {
                *p == uuid
                    && update.name.as_deref() == Some("Renamed")
                    && update.description.is_none()
                    && update.price.is_none()
                    && update.category.is_none()
                    && update.count_in_stock.is_none()
                    && update.images.is_empty()
            })
            .return_once(move |_, _| Ok(product));

        let body = multipart_body(&[("name", "Renamed")], &[]);

        let response: ProductResponse =
            TestClient::put(format!("http://example.com/products/{uuid}"))
                .add_header("content-type", multipart_content_type().as_str(), true)
                .bytes(body)
                .send(&make_service(products))
                .await
                .take_json()
                .await?;

        assert_eq!(response.name, "Renamed");

        Ok(())
    }

    #[tokio::test]
    async fn test_update_with_new_images_stages_them() -> TestResult {
        let product = make_product();
        let uuid = product.uuid;

        let mut products = MockProductsService::new();

        products
            .expect_update_product()
            .once()
            .withf(move |p, update| {
                *p == uuid
                    && update.images.len() == 2
                    && update.images[0].file_name == "a.png"
                    && update.images[1].file_name == "b.png"
            })
            .return_once(move |_, _| Ok(product));

        let body = multipart_body(
            &[],
            &[
                ("images", "a.png", b"a-bytes"),
                ("images", "b.png", b"b-bytes"),
            ],
        );

        let res = TestClient::put(format!("http://example.com/products/{uuid}"))
            .add_header("content-type", multipart_content_type().as_str(), true)
            .bytes(body)
            .send(&make_service(products))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        Ok(())
    }

    #[tokio::test]
    async fn test_update_missing_product_returns_404() -> TestResult {
        let mut products = MockProductsService::new();

        products
            .expect_update_product()
            .once()
            .return_once(|_, _| Err(ProductsServiceError::NotFound));

        let body = multipart_body(&[("name", "Renamed")], &[]);

        let res = TestClient::put(format!("http://example.com/products/{}", Uuid::now_v7()))
            .add_header("content-type", multipart_content_type().as_str(), true)
            .bytes(body)
            .send(&make_service(products))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }
}
