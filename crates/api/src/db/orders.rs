//! Order repository.
//!
//! Order totals on list queries are summed in SQL. The detail view loads the
//! item lines and totals them in Rust (see `models::order::OrderDetail`).

use chrono::{DateTime, Utc};
use sqlx::PgConnection;

use order_dashboard_core::{CreatedRange, OrderId, OrderStatus, Pagination, UserId};

use super::RepositoryError;
use crate::models::{Order, OrderItemLine, OrderOverview, OrderSummary};

/// Filter over one customer's orders. `$1` is the customer id; each optional
/// parameter disables its predicate when bound as `NULL`.
const CUSTOMER_ORDER_FILTER: &str = r"
    o.user_id = $1
    AND ($2::text IS NULL OR o.status = $2)
    AND ($3::timestamptz IS NULL OR o.created_at >= $3)
    AND ($4::timestamptz IS NULL OR o.created_at < $4)
";

/// Optional status and created-at constraints on a customer's orders.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderFilter {
    /// Exact, case-sensitive status match.
    pub status: Option<OrderStatus>,
    pub created: CreatedRange,
}

impl OrderFilter {
    fn status(&self) -> Option<&str> {
        self.status.as_ref().map(OrderStatus::as_str)
    }

    fn created_from(&self) -> Option<DateTime<Utc>> {
        self.created.lower_bound()
    }

    fn created_before(&self) -> Option<DateTime<Utc>> {
        self.created.upper_bound_exclusive()
    }
}

/// Read access to `orders` and `order_items`.
pub struct OrderRepository<'c> {
    conn: &'c mut PgConnection,
}

impl<'c> OrderRepository<'c> {
    /// Create a repository over a checked-out connection.
    #[must_use]
    pub fn new(conn: &'c mut PgConnection) -> Self {
        Self { conn }
    }

    /// Every order of a customer with its item count, by id ascending.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_for_customer(
        &mut self,
        user_id: UserId,
    ) -> Result<Vec<OrderOverview>, RepositoryError> {
        let orders = sqlx::query_as::<_, OrderOverview>(
            r"
            SELECT o.id AS order_id, o.status, o.created_at, o.updated_at,
                   COUNT(oi.id) AS items_count
            FROM orders o
            LEFT JOIN order_items oi ON oi.order_id = o.id
            WHERE o.user_id = $1
            GROUP BY o.id
            ORDER BY o.id
            ",
        )
        .bind(user_id)
        .fetch_all(&mut *self.conn)
        .await?;

        Ok(orders)
    }

    /// Number of a customer's orders matching `filter`, before pagination.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn count_filtered(
        &mut self,
        user_id: UserId,
        filter: &OrderFilter,
    ) -> Result<i64, RepositoryError> {
        let sql = format!("SELECT COUNT(*) FROM orders o WHERE {CUSTOMER_ORDER_FILTER}");

        let total: i64 = sqlx::query_scalar(&sql)
            .bind(user_id)
            .bind(filter.status())
            .bind(filter.created_from())
            .bind(filter.created_before())
            .fetch_one(&mut *self.conn)
            .await?;

        Ok(total)
    }

    /// One page of a customer's orders matching `filter`, with item counts and
    /// totals, by id ascending.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_filtered(
        &mut self,
        user_id: UserId,
        filter: &OrderFilter,
        page: Pagination,
    ) -> Result<Vec<OrderSummary>, RepositoryError> {
        let sql = format!(
            r"
            SELECT o.id AS order_id, o.status, o.created_at, o.updated_at,
                   COUNT(oi.id) AS items_count,
                   COALESCE(SUM(oi.price * oi.quantity), 0) AS total_amount
            FROM orders o
            LEFT JOIN order_items oi ON oi.order_id = o.id
            WHERE {CUSTOMER_ORDER_FILTER}
            GROUP BY o.id
            ORDER BY o.id
            LIMIT $5 OFFSET $6
            "
        );

        let orders = sqlx::query_as::<_, OrderSummary>(&sql)
            .bind(user_id)
            .bind(filter.status())
            .bind(filter.created_from())
            .bind(filter.created_before())
            .bind(page.limit())
            .bind(page.offset())
            .fetch_all(&mut *self.conn)
            .await?;

        Ok(orders)
    }

    /// Get an order by id.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get(&mut self, id: OrderId) -> Result<Option<Order>, RepositoryError> {
        let order = sqlx::query_as::<_, Order>(
            r"
            SELECT id, user_id, status, created_at, updated_at
            FROM orders
            WHERE id = $1
            ",
        )
        .bind(id)
        .fetch_optional(&mut *self.conn)
        .await?;

        Ok(order)
    }

    /// Item lines of an order, joined to product names where the product
    /// still exists, by item id ascending.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn items(&mut self, id: OrderId) -> Result<Vec<OrderItemLine>, RepositoryError> {
        let items = sqlx::query_as::<_, OrderItemLine>(
            r"
            SELECT oi.id AS item_id, oi.product_id, p.name AS product_name,
                   oi.quantity, oi.price AS unit_price
            FROM order_items oi
            LEFT JOIN products p ON p.id = oi.product_id
            WHERE oi.order_id = $1
            ORDER BY oi.id
            ",
        )
        .bind(id)
        .fetch_all(&mut *self.conn)
        .await?;

        Ok(items)
    }
}
