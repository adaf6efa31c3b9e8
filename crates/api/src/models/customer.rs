//! Customer rows and payloads.

use chrono::{DateTime, Utc};
use serde::Serialize;

use order_dashboard_core::UserId;

use super::OrderOverview;

/// Name shown when a customer record has no usable name.
pub const UNKNOWN_CUSTOMER_NAME: &str = "Unknown";

/// A customer row (`users` table).
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct Customer {
    pub id: UserId,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: String,
    pub phone_number: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
}

impl Customer {
    /// `"first last"`, or [`UNKNOWN_CUSTOMER_NAME`] when both parts are blank.
    #[must_use]
    pub fn display_name(&self) -> String {
        let name = [self.first_name.as_deref(), self.last_name.as_deref()]
            .into_iter()
            .flatten()
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(" ");

        if name.is_empty() {
            UNKNOWN_CUSTOMER_NAME.to_string()
        } else {
            name
        }
    }
}

/// List entry: a customer with the number of orders they own.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct CustomerSummary {
    pub id: UserId,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: String,
    pub orders_count: i64,
}

/// A customer with every order they own embedded.
#[derive(Debug, Clone, Serialize)]
pub struct CustomerDetail {
    pub id: UserId,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: String,
    pub phone_number: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub orders_count: usize,
    pub orders: Vec<OrderOverview>,
}

impl CustomerDetail {
    #[must_use]
    pub fn new(customer: Customer, orders: Vec<OrderOverview>) -> Self {
        Self {
            id: customer.id,
            first_name: customer.first_name,
            last_name: customer.last_name,
            email: customer.email,
            phone_number: customer.phone_number,
            created_at: customer.created_at,
            orders_count: orders.len(),
            orders,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn customer(first: Option<&str>, last: Option<&str>) -> Customer {
        Customer {
            id: UserId::new(7),
            first_name: first.map(String::from),
            last_name: last.map(String::from),
            email: "ada@example.com".to_string(),
            phone_number: None,
            created_at: None,
        }
    }

    #[test]
    fn test_display_name() {
        assert_eq!(
            customer(Some("Ada"), Some("Lovelace")).display_name(),
            "Ada Lovelace"
        );
        assert_eq!(customer(Some(" Ada "), None).display_name(), "Ada");
        assert_eq!(customer(None, Some("Lovelace")).display_name(), "Lovelace");
    }

    #[test]
    fn test_display_name_blank_is_unknown() {
        assert_eq!(customer(None, None).display_name(), "Unknown");
        assert_eq!(customer(Some(" "), Some("")).display_name(), "Unknown");
    }

    #[test]
    fn test_detail_counts_embedded_orders() {
        let detail = CustomerDetail::new(customer(Some("Ada"), None), Vec::new());
        let json = serde_json::to_value(&detail).unwrap();

        assert_eq!(json["id"], 7);
        assert_eq!(json["orders_count"], 0);
        assert_eq!(json["orders"], serde_json::json!([]));
        assert!(json["phone_number"].is_null());
    }
}
