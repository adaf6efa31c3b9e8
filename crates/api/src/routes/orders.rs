//! Order route handlers.

use axum::Json;
use tracing::instrument;

use order_dashboard_core::OrderId;

use crate::db::{CustomerRepository, DbConn, OrderRepository};
use crate::error::{AppError, Result};
use crate::extract::ApiPath;
use crate::models::{DataResponse, OrderDetail};

/// Order detail: order fields, owning customer, item lines and computed total.
#[instrument(skip_all, fields(order_id = %id))]
pub async fn show(
    ApiPath(id): ApiPath<OrderId>,
    mut conn: DbConn,
) -> Result<Json<DataResponse<OrderDetail>>> {
    let mut orders = OrderRepository::new(&mut conn);
    let order = orders
        .get(id)
        .await?
        .ok_or_else(|| AppError::order_not_found(id))?;
    let items = orders.items(id).await?;

    let customer = CustomerRepository::new(&mut conn)
        .get_by_id(order.user_id)
        .await?;
    if customer.is_none() {
        tracing::warn!(order_id = %id, user_id = %order.user_id, "Order owner not found");
    }

    Ok(Json(DataResponse::new(OrderDetail::new(order, customer, items))))
}

