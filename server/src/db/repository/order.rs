//! Order Repository
//!
//! Placement and cancellation are the two stock-moving workflows. Each runs
//! inside a single write transaction: stock decrements use a conditional
//! `UPDATE ... WHERE unit_in_stock >= ?` so an order either reserves every
//! line it asked for or leaves the database untouched.

use super::{RepoError, RepoResult};
use crate::db::models::{
    Order, OrderCreate, OrderDetail, OrderItemDetail, OrderStatus, Pagination, Product,
};
use crate::db::DbService;
use crate::pricing;
use shared::util::{now_millis, order_number, snowflake_id};
use shared::ErrorCode;
use sqlx::{Sqlite, Transaction};

#[derive(Clone)]
pub struct OrderRepository {
    db: DbService,
}

/// Order row joined with the buyer's name
#[derive(sqlx::FromRow)]
struct OrderRow {
    id: i64,
    order_number: String,
    user_id: i64,
    user_name: String,
    total_amount: f64,
    status: OrderStatus,
    shipping_address: String,
    billing_address: String,
    created_at: i64,
    updated_at: i64,
}

/// Order item joined with product display fields
#[derive(sqlx::FromRow)]
struct ItemRow {
    id: i64,
    product_id: i64,
    product_name: String,
    product_image_url: Option<String>,
    quantity: i64,
    unit_price: f64,
    discount: i64,
}

impl From<ItemRow> for OrderItemDetail {
    fn from(row: ItemRow) -> Self {
        let total = pricing::line_total(row.unit_price, row.discount, row.quantity);
        Self {
            id: row.id,
            product_id: row.product_id,
            product_name: row.product_name,
            product_image_url: row.product_image_url,
            quantity: row.quantity,
            unit_price: row.unit_price,
            discount: row.discount,
            total_price: pricing::to_f64(total),
        }
    }
}

const ORDER_SELECT: &str = "SELECT o.id, o.order_number, o.user_id, \
     u.first_name || ' ' || u.last_name AS user_name, o.total_amount, o.status, \
     o.shipping_address, o.billing_address, o.created_at, o.updated_at \
     FROM orders o JOIN users u ON u.id = o.user_id";

const ITEM_SELECT: &str = "SELECT i.id, i.product_id, p.product_name, \
     p.image_url AS product_image_url, i.quantity, i.unit_price, i.discount \
     FROM order_items i JOIN products p ON p.id = i.product_id \
     WHERE i.order_id = ? AND i.is_active = 1 ORDER BY i.id";

impl OrderRepository {
    pub fn new(db: DbService) -> Self {
        Self { db }
    }

    /// Place an order for `user_id`
    ///
    /// Validates every line, reserves stock with conditional decrements,
    /// snapshots unit prices and discounts into the order items, and writes
    /// an order notification. Any failure rolls the whole transaction back.
    pub async fn place(&self, user_id: i64, data: OrderCreate) -> RepoResult<OrderDetail> {
        if data.order_items.is_empty() {
            return Err(RepoError::InvalidState(
                ErrorCode::EmptyOrder,
                "Order must contain at least one item".into(),
            ));
        }
        for line in &data.order_items {
            if line.quantity <= 0 {
                return Err(RepoError::Validation(format!(
                    "Quantity must be positive for product {}",
                    line.product_id
                )));
            }
        }
        if data.shipping_address.trim().is_empty() {
            return Err(RepoError::Validation("Shipping address is required".into()));
        }
        if data.shipping_address.len() > 500 {
            return Err(RepoError::Validation(
                "Shipping address must not exceed 500 characters".into(),
            ));
        }

        let mut tx = self.db.write().begin().await?;
        let now = now_millis();

        let mut line_totals = Vec::with_capacity(data.order_items.len());
        let mut products: Vec<Product> = Vec::with_capacity(data.order_items.len());
        for line in &data.order_items {
            let product: Option<Product> = sqlx::query_as(
                "SELECT * FROM products WHERE id = ? AND is_active = 1",
            )
            .bind(line.product_id)
            .fetch_optional(&mut *tx)
            .await?;
            let product = product.ok_or(RepoError::NotFound(ErrorCode::ProductNotFound))?;

            let updated = sqlx::query(
                "UPDATE products SET unit_in_stock = unit_in_stock - ?, updated_at = ? \
                 WHERE id = ? AND unit_in_stock >= ?",
            )
            .bind(line.quantity)
            .bind(now)
            .bind(line.product_id)
            .bind(line.quantity)
            .execute(&mut *tx)
            .await?;
            if updated.rows_affected() == 0 {
                return Err(RepoError::InsufficientStock(
                    line.product_id,
                    product.product_name.clone(),
                ));
            }

            line_totals.push(pricing::line_total(
                product.unit_price,
                product.discount,
                line.quantity,
            ));
            products.push(product);
        }

        let total_amount = pricing::to_f64(pricing::order_total(line_totals.clone()));
        let order_id = snowflake_id();
        let number = order_number();
        let billing = data
            .billing_address
            .clone()
            .unwrap_or_else(|| data.shipping_address.clone());

        sqlx::query(
            "INSERT INTO orders (id, order_number, user_id, total_amount, status, \
             shipping_address, billing_address, is_active, created_at, updated_at) \
             VALUES (?, ?, ?, ?, ?, ?, ?, 1, ?, ?)",
        )
        .bind(order_id)
        .bind(&number)
        .bind(user_id)
        .bind(total_amount)
        .bind(OrderStatus::Pending)
        .bind(&data.shipping_address)
        .bind(&billing)
        .bind(now)
        .bind(now)
        .execute(&mut *tx)
        .await?;

        let mut item_details = Vec::with_capacity(products.len());
        for ((line, product), total) in data
            .order_items
            .iter()
            .zip(&products)
            .zip(&line_totals)
        {
            let item_id = snowflake_id();
            sqlx::query(
                "INSERT INTO order_items (id, order_id, product_id, quantity, unit_price, \
                 discount, is_active, created_at, updated_at) \
                 VALUES (?, ?, ?, ?, ?, ?, 1, ?, ?)",
            )
            .bind(item_id)
            .bind(order_id)
            .bind(line.product_id)
            .bind(line.quantity)
            .bind(product.unit_price)
            .bind(product.discount)
            .bind(now)
            .bind(now)
            .execute(&mut *tx)
            .await?;

            item_details.push(OrderItemDetail {
                id: item_id,
                product_id: product.id,
                product_name: product.product_name.clone(),
                product_image_url: product.image_url.clone(),
                quantity: line.quantity,
                unit_price: product.unit_price,
                discount: product.discount,
                total_price: pricing::to_f64(*total),
            });
        }

        let user_name = insert_order_notification(
            &mut tx,
            user_id,
            order_id,
            "Order received",
            &format!("Your order {number} has been received and is pending."),
            now,
        )
        .await?;

        tx.commit().await?;
        tracing::info!(order_id, order_number = %number, user_id, total_amount, "Order placed");

        Ok(OrderDetail {
            id: order_id,
            order_number: number,
            user_id,
            user_name,
            total_amount,
            status: OrderStatus::Pending,
            shipping_address: data.shipping_address,
            billing_address: billing,
            created_at: now,
            updated_at: now,
            order_items: item_details,
        })
    }

    /// Cancel an order owned by `user_id`
    ///
    /// Shipped and Delivered orders are rejected, as is a repeat cancel.
    /// Stock reserved by the order is returned in the same transaction.
    pub async fn cancel(&self, user_id: i64, order_id: i64) -> RepoResult<Order> {
        let mut tx = self.db.write().begin().await?;
        let now = now_millis();

        let order: Option<Order> = sqlx::query_as(
            "SELECT * FROM orders WHERE id = ? AND user_id = ? AND is_active = 1",
        )
        .bind(order_id)
        .bind(user_id)
        .fetch_optional(&mut *tx)
        .await?;
        let order = order.ok_or(RepoError::NotFound(ErrorCode::OrderNotFound))?;

        match order.status {
            OrderStatus::Cancelled => {
                return Err(RepoError::InvalidState(
                    ErrorCode::OrderAlreadyCancelled,
                    format!("Order {} is already cancelled", order.order_number),
                ));
            }
            OrderStatus::Shipped | OrderStatus::Delivered => {
                return Err(RepoError::InvalidState(
                    ErrorCode::OrderNotCancellable,
                    format!(
                        "Order {} cannot be cancelled in status {}",
                        order.order_number, order.status
                    ),
                ));
            }
            OrderStatus::Pending | OrderStatus::Processing => {}
        }

        sqlx::query("UPDATE orders SET status = ?, updated_at = ? WHERE id = ?")
            .bind(OrderStatus::Cancelled)
            .bind(now)
            .bind(order_id)
            .execute(&mut *tx)
            .await?;

        // Return every reserved unit to stock. SUM covers orders that list
        // the same product on more than one line.
        sqlx::query(
            "UPDATE products SET unit_in_stock = unit_in_stock + ( \
                 SELECT COALESCE(SUM(i.quantity), 0) FROM order_items i \
                 WHERE i.order_id = ? AND i.product_id = products.id AND i.is_active = 1 \
             ), updated_at = ? \
             WHERE id IN ( \
                 SELECT product_id FROM order_items WHERE order_id = ? AND is_active = 1 \
             )",
        )
        .bind(order_id)
        .bind(now)
        .bind(order_id)
        .execute(&mut *tx)
        .await?;

        insert_order_notification(
            &mut tx,
            user_id,
            order_id,
            "Order cancelled",
            &format!("Your order {} has been cancelled.", order.order_number),
            now,
        )
        .await?;

        tx.commit().await?;
        tracing::info!(order_id, user_id, "Order cancelled");

        Ok(Order {
            status: OrderStatus::Cancelled,
            updated_at: now,
            ..order
        })
    }

    /// Fetch one order with items, scoped to its owner
    pub async fn find_for_user(&self, user_id: i64, order_id: i64) -> RepoResult<OrderDetail> {
        let sql = format!("{ORDER_SELECT} WHERE o.id = ? AND o.user_id = ? AND o.is_active = 1");
        let row: Option<OrderRow> = sqlx::query_as(&sql)
            .bind(order_id)
            .bind(user_id)
            .fetch_optional(self.db.read())
            .await?;
        let row = row.ok_or(RepoError::NotFound(ErrorCode::OrderNotFound))?;
        self.into_detail(row).await
    }

    /// List a user's orders, newest first
    pub async fn find_by_user(
        &self,
        user_id: i64,
        page: Pagination,
    ) -> RepoResult<Vec<OrderDetail>> {
        let sql = format!(
            "{ORDER_SELECT} WHERE o.user_id = ? AND o.is_active = 1 \
             ORDER BY o.created_at DESC LIMIT ? OFFSET ?"
        );
        let rows: Vec<OrderRow> = sqlx::query_as(&sql)
            .bind(user_id)
            .bind(page.limit())
            .bind(page.offset())
            .fetch_all(self.db.read())
            .await?;
        self.into_details(rows).await
    }

    /// List all orders, newest first
    pub async fn find_all(&self, page: Pagination) -> RepoResult<Vec<OrderDetail>> {
        let sql = format!(
            "{ORDER_SELECT} WHERE o.is_active = 1 \
             ORDER BY o.created_at DESC LIMIT ? OFFSET ?"
        );
        let rows: Vec<OrderRow> = sqlx::query_as(&sql)
            .bind(page.limit())
            .bind(page.offset())
            .fetch_all(self.db.read())
            .await?;
        self.into_details(rows).await
    }

    /// Set an order's status. Stock is not touched here; cancellation has
    /// its own path so the restock logic cannot be bypassed.
    pub async fn update_status(&self, order_id: i64, status: OrderStatus) -> RepoResult<Order> {
        if status == OrderStatus::Cancelled {
            return Err(RepoError::InvalidState(
                ErrorCode::InvalidOrderStatus,
                "Use the cancellation endpoint to cancel an order".into(),
            ));
        }

        let mut tx = self.db.write().begin().await?;
        let now = now_millis();

        let order: Option<Order> =
            sqlx::query_as("SELECT * FROM orders WHERE id = ? AND is_active = 1")
                .bind(order_id)
                .fetch_optional(&mut *tx)
                .await?;
        let order = order.ok_or(RepoError::NotFound(ErrorCode::OrderNotFound))?;

        if order.status == OrderStatus::Cancelled {
            return Err(RepoError::InvalidState(
                ErrorCode::InvalidOrderStatus,
                "Cancelled orders cannot change status".into(),
            ));
        }

        sqlx::query("UPDATE orders SET status = ?, updated_at = ? WHERE id = ?")
            .bind(status)
            .bind(now)
            .bind(order_id)
            .execute(&mut *tx)
            .await?;

        insert_order_notification(
            &mut tx,
            order.user_id,
            order_id,
            "Order updated",
            &format!("Your order {} is now {}.", order.order_number, status),
            now,
        )
        .await?;

        tx.commit().await?;

        Ok(Order {
            status,
            updated_at: now,
            ..order
        })
    }

    async fn into_detail(&self, row: OrderRow) -> RepoResult<OrderDetail> {
        let items: Vec<ItemRow> = sqlx::query_as(ITEM_SELECT)
            .bind(row.id)
            .fetch_all(self.db.read())
            .await?;
        Ok(OrderDetail {
            id: row.id,
            order_number: row.order_number,
            user_id: row.user_id,
            user_name: row.user_name,
            total_amount: row.total_amount,
            status: row.status,
            shipping_address: row.shipping_address,
            billing_address: row.billing_address,
            created_at: row.created_at,
            updated_at: row.updated_at,
            order_items: items.into_iter().map(OrderItemDetail::from).collect(),
        })
    }

    async fn into_details(&self, rows: Vec<OrderRow>) -> RepoResult<Vec<OrderDetail>> {
        let mut details = Vec::with_capacity(rows.len());
        for row in rows {
            details.push(self.into_detail(row).await?);
        }
        Ok(details)
    }
}

/// Insert an order-related notification and return the recipient's name
async fn insert_order_notification(
    tx: &mut Transaction<'_, Sqlite>,
    user_id: i64,
    order_id: i64,
    title: &str,
    message: &str,
    now: i64,
) -> RepoResult<String> {
    sqlx::query(
        "INSERT INTO notifications (id, user_id, title, message, kind, action_url, \
         is_read, is_active, created_at, updated_at) \
         VALUES (?, ?, ?, ?, 'Order', ?, 0, 1, ?, ?)",
    )
    .bind(snowflake_id())
    .bind(user_id)
    .bind(title)
    .bind(message)
    .bind(format!("/orders/{order_id}"))
    .bind(now)
    .bind(now)
    .execute(&mut **tx)
    .await?;

    let name: (String,) =
        sqlx::query_as("SELECT first_name || ' ' || last_name FROM users WHERE id = ?")
            .bind(user_id)
            .fetch_one(&mut **tx)
            .await?;
    Ok(name.0)
}
