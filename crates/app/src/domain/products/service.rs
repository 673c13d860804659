//! Products service.

use async_trait::async_trait;
use mockall::automock;
use uuid::Uuid;

use crate::{
    database::Db,
    domain::products::{
        errors::ProductsServiceError,
        images::ImageStore,
        models::{NewProduct, Product, ProductUpdate},
        repository::{PgProductsRepository, ProductRow},
    },
};

#[derive(Debug, Clone)]
pub struct PgProductsService {
    db: Db,
    repository: PgProductsRepository,
    images: ImageStore,
}

impl PgProductsService {
    #[must_use]
    pub fn new(db: Db, images: ImageStore) -> Self {
        Self {
            db,
            repository: PgProductsRepository::new(),
            images,
        }
    }
}

#[async_trait]
impl ProductsService for PgProductsService {
    async fn list_products(&self) -> Result<Vec<Product>, ProductsServiceError> {
        let mut tx = self.db.begin().await?;

        let products = self.repository.list_products(&mut tx).await?;

        tx.commit().await?;

        Ok(products)
    }

    async fn get_product(&self, product: Uuid) -> Result<Product, ProductsServiceError> {
        let mut tx = self.db.begin().await?;

        let product = self.repository.get_product(&mut tx, product).await?;

        tx.commit().await?;

        Ok(product)
    }

    async fn create_product(&self, product: NewProduct) -> Result<Product, ProductsServiceError> {
        if product.name.trim().is_empty() {
            return Err(ProductsServiceError::MissingName);
        }

        if product.images.is_empty() {
            return Err(ProductsServiceError::MissingImages);
        }

        let saved = self
            .images
            .save_all(&product.images)
            .await
            .map_err(ProductsServiceError::Image)?;

        let row = ProductRow {
            name: product.name,
            description: product.description,
            price: product.price,
            images: saved.clone(),
            category: product.category,
            count_in_stock: product.count_in_stock,
        };

        let created = async {
            let mut tx = self.db.begin().await?;

            let created = self
                .repository
                .create_product(&mut tx, Uuid::now_v7(), row)
                .await?;

            tx.commit().await?;

            Ok(created)
        }
        .await;

        if created.is_err() {
            // The row never landed; do not leave the copied files behind.
            self.images.remove(&saved).await;
        }

        created
    }

    async fn update_product(
        &self,
        product: Uuid,
        update: ProductUpdate,
    ) -> Result<Product, ProductsServiceError> {
        let replacement_images = if update.images.is_empty() {
            None
        } else {
            Some(
                self.images
                    .save_all(&update.images)
                    .await
                    .map_err(ProductsServiceError::Image)?,
            )
        };

        let result = async {
            let mut tx = self.db.begin().await?;

            let current = self.repository.get_product(&mut tx, product).await?;

            let row = ProductRow {
                name: update.name.unwrap_or(current.name),
                description: update.description.unwrap_or(current.description),
                price: update.price.unwrap_or(current.price),
                images: replacement_images
                    .clone()
                    .unwrap_or_else(|| current.images.clone()),
                category: update.category.unwrap_or(current.category),
                count_in_stock: update.count_in_stock.unwrap_or(current.count_in_stock),
            };

            let updated = self.repository.update_product(&mut tx, product, row).await?;

            tx.commit().await?;

            Ok((updated, current.images))
        }
        .await;

        match result {
            Ok((updated, old_images)) => {
                if replacement_images.is_some() {
                    // Replaced wholesale; the old files are unreferenced now.
                    self.images.remove(&old_images).await;
                }

                Ok(updated)
            }
            Err(error) => {
                if let Some(saved) = replacement_images {
                    self.images.remove(&saved).await;
                }

                Err(error)
            }
        }
    }

    async fn delete_product(&self, product: Uuid) -> Result<(), ProductsServiceError> {
        let mut tx = self.db.begin().await?;

        let images = self.repository.delete_product(&mut tx, product).await?;

        let Some(images) = images else {
            return Err(ProductsServiceError::NotFound);
        };

        tx.commit().await?;

        self.images.remove(&images).await;

        Ok(())
    }
}

#[automock]
#[async_trait]
pub trait ProductsService: Send + Sync {
    /// Every catalog product.
    async fn list_products(&self) -> Result<Vec<Product>, ProductsServiceError>;

    /// A single product by id.
    async fn get_product(&self, product: Uuid) -> Result<Product, ProductsServiceError>;

    /// Create a product; at least one staged image is required.
    async fn create_product(&self, product: NewProduct) -> Result<Product, ProductsServiceError>;

    /// Partially update a product; supplying images replaces the stored set
    /// wholesale and deletes the previous files.
    async fn update_product(
        &self,
        product: Uuid,
        update: ProductUpdate,
    ) -> Result<Product, ProductsServiceError>;

    /// Remove a product and its image files. Historical orders keep their
    /// own copies of name, image and price.
    async fn delete_product(&self, product: Uuid) -> Result<(), ProductsServiceError>;
}
