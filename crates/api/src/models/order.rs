//! Order rows and payloads.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use order_dashboard_core::{
    OrderId, OrderItemId, OrderStatus, ProductId, UserId, line_total, order_total,
};

use super::Customer;
use super::customer::UNKNOWN_CUSTOMER_NAME;

/// Name shown for an item whose product cannot be found.
pub const UNKNOWN_PRODUCT_NAME: &str = "Unknown Product";

/// An order row (`orders` table).
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct Order {
    pub id: OrderId,
    pub user_id: UserId,
    pub status: Option<OrderStatus>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// An order embedded in a customer's detail payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct OrderOverview {
    pub order_id: OrderId,
    pub status: Option<OrderStatus>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
    pub items_count: i64,
}

/// An entry in a customer's paged order list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct OrderSummary {
    pub order_id: OrderId,
    pub status: Option<OrderStatus>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
    pub items_count: i64,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_amount: Decimal,
}

/// An order item joined to its product, if the product still resolves.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct OrderItemLine {
    pub item_id: OrderItemId,
    pub product_id: ProductId,
    pub product_name: Option<String>,
    pub quantity: i32,
    pub unit_price: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CustomerRef {
    pub id: UserId,
    pub name: String,
    pub email: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderItemDetail {
    pub item_id: OrderItemId,
    pub product_id: ProductId,
    pub product_name: String,
    pub quantity: i32,
    #[serde(with = "rust_decimal::serde::float")]
    pub unit_price: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub line_total: Decimal,
}

impl From<OrderItemLine> for OrderItemDetail {
    fn from(line: OrderItemLine) -> Self {
        Self {
            item_id: line.item_id,
            product_id: line.product_id,
            product_name: line
                .product_name
                .unwrap_or_else(|| UNKNOWN_PRODUCT_NAME.to_string()),
            quantity: line.quantity,
            unit_price: line.unit_price,
            line_total: line_total(line.unit_price, line.quantity),
        }
    }
}

/// Full order view: order fields, owning customer, itemized lines and total.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderDetail {
    pub order_id: OrderId,
    pub status: Option<OrderStatus>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_amount: Decimal,
    pub customer: CustomerRef,
    pub items: Vec<OrderItemDetail>,
}

impl OrderDetail {
    /// Assemble the detail view. A missing customer degrades to a placeholder
    /// name rather than failing.
    #[must_use]
    pub fn new(order: Order, customer: Option<Customer>, lines: Vec<OrderItemLine>) -> Self {
        let total_amount = order_total(lines.iter().map(|line| (line.unit_price, line.quantity)));

        let customer = customer.map_or_else(
            || CustomerRef {
                id: order.user_id,
                name: UNKNOWN_CUSTOMER_NAME.to_string(),
                email: None,
            },
            |customer| CustomerRef {
                id: customer.id,
                name: customer.display_name(),
                email: Some(customer.email),
            },
        );

        Self {
            order_id: order.id,
            status: order.status,
            created_at: order.created_at,
            updated_at: order.updated_at,
            total_amount,
            customer,
            items: lines.into_iter().map(OrderItemDetail::from).collect(),
        }
    }
}
