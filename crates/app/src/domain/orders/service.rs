//! Orders service.

use async_trait::async_trait;
use mockall::automock;
use uuid::Uuid;

use crate::{
    database::Db,
    domain::orders::{
        errors::OrdersServiceError,
        models::{NewOrder, Order, OrderItem, OrderStatus, OrderStatusSummary},
        repository::PgOrdersRepository,
    },
};

#[derive(Debug, Clone)]
pub struct PgOrdersService {
    db: Db,
    repository: PgOrdersRepository,
}

impl PgOrdersService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgOrdersRepository::new(),
        }
    }
}

#[async_trait]
impl OrdersService for PgOrdersService {
    async fn place_order(
        &self,
        owner: Uuid,
        new_order: NewOrder,
    ) -> Result<Order, OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        let lines = self.repository.get_cart_snapshot(&mut tx, owner).await?;

        if lines.is_empty() {
            return Err(OrdersServiceError::EmptyCart);
        }

        let items: Vec<OrderItem> = lines
            .into_iter()
            .map(|line| OrderItem {
                product_uuid: line.product_uuid,
                name: line.name,
                image: line.image,
                unit_price: line.unit_price,
                quantity: line.quantity,
            })
            .collect();

        let order = self
            .repository
            .create_order(
                &mut tx,
                Uuid::now_v7(),
                owner,
                new_order.payment_method.unwrap_or_default(),
                items,
            )
            .await?;

        // Same transaction as the order insert: either the order exists and
        // the cart is empty, or neither happened.
        self.repository.clear_cart_items(&mut tx, owner).await?;

        tx.commit().await?;

        Ok(order)
    }

    async fn list_orders(&self, owner: Uuid) -> Result<Vec<Order>, OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        let mut orders = self.repository.list_orders(&mut tx, owner).await?;

        for order in &mut orders {
            order.items = self.repository.get_order_items(&mut tx, order.uuid).await?;
        }

        tx.commit().await?;

        Ok(orders)
    }

    async fn get_status(
        &self,
        owner: Uuid,
        order: Uuid,
    ) -> Result<OrderStatusSummary, OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        let order = self.repository.get_order(&mut tx, order).await?;

        tx.commit().await?;

        if order.owner_uuid != owner {
            return Err(OrdersServiceError::Forbidden);
        }

        Ok(OrderStatusSummary {
            uuid: order.uuid,
            order_status: order.order_status,
            payment_status: order.payment_status,
        })
    }

    async fn update_status(
        &self,
        owner: Uuid,
        order: Uuid,
        status: OrderStatus,
    ) -> Result<Order, OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        let current = self.repository.get_order(&mut tx, order).await?;

        if current.owner_uuid != owner {
            return Err(OrdersServiceError::Forbidden);
        }

        if !current.order_status.can_transition_to(status) {
            return Err(OrdersServiceError::InvalidTransition {
                from: current.order_status,
                to: status,
            });
        }

        let mut updated = self
            .repository
            .update_order_status(&mut tx, order, status.as_str())
            .await?;

        updated.items = self.repository.get_order_items(&mut tx, order).await?;

        tx.commit().await?;

        Ok(updated)
    }
}

#[automock]
#[async_trait]
pub trait OrdersService: Send + Sync {
    /// Snapshot the owner's cart into a new order and empty the cart, in a
    /// single transaction. Prices, names and images are captured as they
    /// are at placement time.
    async fn place_order(
        &self,
        owner: Uuid,
        new_order: NewOrder,
    ) -> Result<Order, OrdersServiceError>;

    /// The owner's orders with their items, newest first.
    async fn list_orders(&self, owner: Uuid) -> Result<Vec<Order>, OrdersServiceError>;

    /// The status pair of a single order; owners only.
    async fn get_status(
        &self,
        owner: Uuid,
        order: Uuid,
    ) -> Result<OrderStatusSummary, OrdersServiceError>;

    /// Move an order's status forward; owners only.
    async fn update_status(
        &self,
        owner: Uuid,
        order: Uuid,
        status: OrderStatus,
    ) -> Result<Order, OrdersServiceError>;
}
