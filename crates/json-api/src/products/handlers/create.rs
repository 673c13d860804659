//! Create Product Handler

use std::sync::Arc;

use salvo::{http::header::LOCATION, prelude::*};

use storefront_app::domain::products::models::NewProduct;

use crate::{
    extensions::*,
    products::{errors::into_status_error, get::ProductResponse, staged_images},
    state::State,
};

/// Create Product Handler
///
/// Accepts a multipart form with the product fields and one or more
/// `images` files.
#[endpoint(
    tags("products"),
    summary = "Create Product",
    responses(
        (status_code = StatusCode::CREATED, description = "Product created"),
        (status_code = StatusCode::BAD_REQUEST, description = "Missing name or images"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
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

    let new_product = NewProduct {
        name: form.fields.get("name").cloned().unwrap_or_default(),
        description: form.fields.get("description").cloned().unwrap_or_default(),
        price: price.unwrap_or(0),
        category: form
            .fields
            .get("category")
            .cloned()
            .unwrap_or_else(|| "Uncategorized".to_string()),
        count_in_stock: count_in_stock.unwrap_or(0),
        images: staged_images(form.files.get_vec("images")),
    };

    let created = state
        .app
        .products
        .create_product(new_product)
        .await
        .map_err(into_status_error)?;

    res.add_header(LOCATION, format!("/products/{}", created.uuid), true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::CREATED);

    Ok(Json(created.into()))
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
        products_service(products, Router::with_path("products").post(handler))
    }

    #[tokio::test]
    async fn test_create_product_returns_201() -> TestResult {
        let product = make_product();
        let uuid = product.uuid;

        let mut products = MockProductsService::new();

        products
            .expect_create_product()
            .once()
            .withf(|new| {
                new.name == "Widget"
                    && new.price == 12_50
                    && new.category == "Gadgets"
                    && new.count_in_stock == 4
                    && new.images.len() == 1
                    && new.images[0].file_name == "widget.png"
            })
            .return_once(move |_| Ok(product));

        let body = multipart_body(
            &[
                ("name", "Widget"),
                ("price", "1250"),
                ("category", "Gadgets"),
                ("countInStock", "4"),
            ],
            &[("images", "widget.png", b"png-bytes")],
        );

        let mut res = TestClient::post("http://example.com/products")
            .add_header("content-type", multipart_content_type().as_str(), true)
            .bytes(body)
            .send(&make_service(products))
            .await;

        let response: ProductResponse = res.take_json().await?;
        let location = res.headers().get("location").and_then(|v| v.to_str().ok());

        assert_eq!(res.status_code, Some(StatusCode::CREATED));
        assert_eq!(location, Some(format!("/products/{uuid}").as_str()));
        assert_eq!(response.uuid, uuid);

        Ok(())
    }

    #[tokio::test]
    async fn test_create_product_without_images_returns_400() -> TestResult {
        let mut products = MockProductsService::new();

        products
            .expect_create_product()
            .once()
            .withf(|new| new.images.is_empty())
            .return_once(|_| Err(ProductsServiceError::MissingImages));

        let body = multipart_body(&[("name", "Widget")], &[]);

        let res = TestClient::post("http://example.com/products")
            .add_header("content-type", multipart_content_type().as_str(), true)
            .bytes(body)
            .send(&make_service(products))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }

    #[tokio::test]
    async fn test_create_product_with_bad_price_returns_400() -> TestResult {
        let body = multipart_body(
            &[("name", "Widget"), ("price", "cheap")],
            &[("images", "widget.png", b"png-bytes")],
        );

        let res = TestClient::post("http://example.com/products")
            .add_header("content-type", multipart_content_type().as_str(), true)
            .bytes(body)
            .send(&make_service(MockProductsService::new()))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }
}
