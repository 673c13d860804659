//! Carts service.

use async_trait::async_trait;
use mockall::automock;
use uuid::Uuid;

use crate::{
    database::Db,
    domain::carts::{
        errors::CartsServiceError,
        models::{CartLine, NewCartItem},
        repository::PgCartsRepository,
    },
};

#[derive(Debug, Clone)]
pub struct PgCartsService {
    db: Db,
    repository: PgCartsRepository,
}

impl PgCartsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgCartsRepository::new(),
        }
    }
}

#[async_trait]
impl CartsService for PgCartsService {
    async fn get_cart(&self, owner: Uuid) -> Result<Vec<CartLine>, CartsServiceError> {
        let mut tx = self.db.begin().await?;

        // No cart row yet simply means no lines.
        let lines = self.repository.get_cart_lines(&mut tx, owner).await?;

        tx.commit().await?;

        Ok(lines)
    }

    async fn add_item(
        &self,
        owner: Uuid,
        item: NewCartItem,
    ) -> Result<Vec<CartLine>, CartsServiceError> {
        if item.quantity == 0 {
            return Err(CartsServiceError::InvalidQuantity);
        }

        let mut tx = self.db.begin().await?;

        self.repository.ensure_cart(&mut tx, owner).await?;

        self.repository
            .upsert_item(&mut tx, owner, item.product_uuid, item.quantity)
            .await?;

        let lines = self.repository.get_cart_lines(&mut tx, owner).await?;

        tx.commit().await?;

        Ok(lines)
    }

    async fn set_quantity(
        &self,
        owner: Uuid,
        product: Uuid,
        quantity: u32,
    ) -> Result<Vec<CartLine>, CartsServiceError> {
        if quantity == 0 {
            return Err(CartsServiceError::InvalidQuantity);
        }

        let mut tx = self.db.begin().await?;

        let rows_affected = self
            .repository
            .set_item_quantity(&mut tx, owner, product, quantity)
            .await?;

        if rows_affected == 0 {
            return Err(CartsServiceError::NotFound);
        }

        let lines = self.repository.get_cart_lines(&mut tx, owner).await?;

        tx.commit().await?;

        Ok(lines)
    }

    async fn remove_item(
        &self,
        owner: Uuid,
        product: Uuid,
    ) -> Result<Vec<CartLine>, CartsServiceError> {
        let mut tx = self.db.begin().await?;

        // Removing a line that is already absent is a no-op, but the cart
        // itself must exist.
        self.repository.get_cart(&mut tx, owner).await?;

        self.repository.delete_item(&mut tx, owner, product).await?;

        let lines = self.repository.get_cart_lines(&mut tx, owner).await?;

        tx.commit().await?;

        Ok(lines)
    }

    async fn clear_cart(&self, owner: Uuid) -> Result<(), CartsServiceError> {
        let mut tx = self.db.begin().await?;

        self.repository.clear_items(&mut tx, owner).await?;

        tx.commit().await?;

        Ok(())
    }
}

#[automock]
#[async_trait]
pub trait CartsService: Send + Sync {
    /// Retrieve the owner's cart lines; an owner with no cart has no lines.
    async fn get_cart(&self, owner: Uuid) -> Result<Vec<CartLine>, CartsServiceError>;

    /// Add a product to the cart, incrementing the quantity of an existing
    /// line for the same product. Creates the cart when absent.
    async fn add_item(
        &self,
        owner: Uuid,
        item: NewCartItem,
    ) -> Result<Vec<CartLine>, CartsServiceError>;

    /// Overwrite the quantity of an existing line.
    async fn set_quantity(
        &self,
        owner: Uuid,
        product: Uuid,
        quantity: u32,
    ) -> Result<Vec<CartLine>, CartsServiceError>;

    /// Remove a line if present; the cart itself must exist.
    async fn remove_item(
        &self,
        owner: Uuid,
        product: Uuid,
    ) -> Result<Vec<CartLine>, CartsServiceError>;

    /// Delete every line, keeping the cart row. Idempotent.
    async fn clear_cart(&self, owner: Uuid) -> Result<(), CartsServiceError>;
}
