//! Row types read from the database and the JSON payloads built from them.

pub mod customer;
pub mod order;

use serde::Serialize;

pub use customer::{Customer, CustomerDetail, CustomerSummary};
pub use order::{
    CustomerRef, Order, OrderDetail, OrderItemDetail, OrderItemLine, OrderOverview, OrderSummary,
};

/// `status` value on every successful payload.
pub const STATUS_SUCCESS: &str = "success";

/// A single resource.
#[derive(Debug, Serialize)]
pub struct DataResponse<T> {
    pub status: &'static str,
    pub data: T,
}

impl<T> DataResponse<T> {
    pub const fn new(data: T) -> Self {
        Self {
            status: STATUS_SUCCESS,
            data,
        }
    }
}

/// One page of a list, with the page length.
#[derive(Debug, Serialize)]
pub struct ListResponse<T> {
    pub status: &'static str,
    pub count: usize,
    pub data: Vec<T>,
}

impl<T> ListResponse<T> {
    #[must_use]
    pub fn new(data: Vec<T>) -> Self {
        Self {
            status: STATUS_SUCCESS,
            count: data.len(),
            data,
        }
    }
}

/// One page of a customer's orders plus the pre-pagination match count.
#[derive(Debug, Serialize)]
pub struct OrderPageResponse {
    pub status: &'static str,
    pub total_orders: i64,
    pub skip: i64,
    pub limit: i64,
    pub count: usize,
    pub data: Vec<OrderSummary>,
}
