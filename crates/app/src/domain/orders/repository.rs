//! Orders Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as};
use uuid::Uuid;

use crate::domain::{
    carts::{
        models::CartLine,
        repository::{try_get_amount, try_get_quantity},
    },
    orders::models::{Order, OrderItem, OrderStatus, PaymentMethod, PaymentStatus, order_total},
};

const CREATE_ORDER_SQL: &str = include_str!("sql/create_order.sql");
const CREATE_ORDER_ITEM_SQL: &str = include_str!("sql/create_order_item.sql");
const GET_ORDER_SQL: &str = include_str!("sql/get_order.sql");
const LIST_ORDERS_SQL: &str = include_str!("sql/list_orders.sql");
const GET_ORDER_ITEMS_SQL: &str = include_str!("sql/get_order_items.sql");
const UPDATE_ORDER_STATUS_SQL: &str = include_str!("sql/update_order_status.sql");
const GET_CART_SNAPSHOT_SQL: &str = include_str!("sql/get_cart_snapshot.sql");
const CLEAR_CART_ITEMS_SQL: &str = include_str!("sql/clear_cart_items.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgOrdersRepository;

impl PgOrdersRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    /// Read the owner's cart lines with current product name, image and
    /// price, ready to be captured into an order.
    pub(crate) async fn get_cart_snapshot(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        owner: Uuid,
    ) -> Result<Vec<CartLine>, sqlx::Error> {
        query_as::<Postgres, CartLine>(GET_CART_SNAPSHOT_SQL)
            .bind(owner)
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn create_order(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: Uuid,
        owner: Uuid,
        payment_method: PaymentMethod,
        items: Vec<OrderItem>,
    ) -> Result<Order, sqlx::Error> {
        let total = order_total(&items);

        let total_i64 = i64::try_from(total).map_err(|e| sqlx::Error::ColumnDecode {
            index: "total_price".to_string(),
            source: Box::new(e),
        })?;

        let mut created = query_as::<Postgres, Order>(CREATE_ORDER_SQL)
            .bind(order)
            .bind(owner)
            .bind(payment_method.as_str())
            .bind(PaymentStatus::default().as_str())
            .bind(OrderStatus::default().as_str())
            .bind(total_i64)
            .fetch_one(&mut **tx)
            .await?;

        for (index, item) in items.iter().enumerate() {
            let index_i32 = i32::try_from(index).map_err(|e| sqlx::Error::ColumnDecode {
                index: "line_index".to_string(),
                source: Box::new(e),
            })?;

            let price_i64 =
                i64::try_from(item.unit_price).map_err(|e| sqlx::Error::ColumnDecode {
                    index: "price".to_string(),
                    source: Box::new(e),
                })?;

            query(CREATE_ORDER_ITEM_SQL)
                .bind(order)
                .bind(index_i32)
                .bind(item.product_uuid)
                .bind(&item.name)
                .bind(&item.image)
                .bind(price_i64)
                .bind(i64::from(item.quantity))
                .execute(&mut **tx)
                .await?;
        }

        created.items = items;

        Ok(created)
    }

    pub(crate) async fn get_order(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: Uuid,
    ) -> Result<Order, sqlx::Error> {
        query_as::<Postgres, Order>(GET_ORDER_SQL)
            .bind(order)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn list_orders(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        owner: Uuid,
    ) -> Result<Vec<Order>, sqlx::Error> {
        query_as::<Postgres, Order>(LIST_ORDERS_SQL)
            .bind(owner)
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn get_order_items(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: Uuid,
    ) -> Result<Vec<OrderItem>, sqlx::Error> {
        query_as::<Postgres, OrderItem>(GET_ORDER_ITEMS_SQL)
            .bind(order)
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn update_order_status(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: Uuid,
        status: &str,
    ) -> Result<Order, sqlx::Error> {
        query_as::<Postgres, Order>(UPDATE_ORDER_STATUS_SQL)
            .bind(order)
            .bind(status)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn clear_cart_items(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        owner: Uuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(CLEAR_CART_ITEMS_SQL)
            .bind(owner)
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }
}

fn try_get_parsed<T>(row: &PgRow, col: &str) -> Result<T, sqlx::Error>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    let raw: String = row.try_get(col)?;

    raw.parse().map_err(|e| sqlx::Error::ColumnDecode {
        index: col.to_string(),
        source: Box::new(e),
    })
}

impl<'r> FromRow<'r, PgRow> for Order {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: row.try_get("uuid")?,
            owner_uuid: row.try_get("owner_uuid")?,
            items: Vec::new(),
            payment_method: try_get_parsed(row, "payment_method")?,
            payment_status: try_get_parsed(row, "payment_status")?,
            order_status: try_get_parsed(row, "order_status")?,
            total_price: try_get_amount(row, "total_price")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}

impl<'r> FromRow<'r, PgRow> for OrderItem {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            product_uuid: row.try_get("product_uuid")?,
            name: row.try_get("name")?,
            image: row.try_get("image")?,
            unit_price: try_get_amount(row, "unit_price")?,
            quantity: try_get_quantity(row, "quantity")?,
        })
    }
}
