//! Customer route handlers.

use axum::{
    Json,
    extract::FromRequestParts,
    http::request::Parts,
};
use chrono::NaiveDate;
use serde::Deserialize;
use tracing::instrument;

use order_dashboard_core::{CreatedRange, OrderStatus, Pagination, UserId};

use crate::db::{CustomerRepository, DbConn, OrderFilter, OrderRepository};
use crate::error::{AppError, Result};
use crate::extract::{ApiPath, ApiQuery};
use crate::models::{
    CustomerDetail, CustomerSummary, DataResponse, ListResponse, OrderPageResponse, STATUS_SUCCESS,
};

/// `?skip=&limit=`
#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    pub skip: Option<i64>,
    pub limit: Option<i64>,
}

impl PageQuery {
    fn pagination(&self) -> Pagination {
        Pagination::new(self.skip, self.limit)
    }
}

/// `?skip=&limit=&status=&start_date=&end_date=`
#[derive(Debug, Default, Deserialize)]
pub struct OrderListQuery {
    pub skip: Option<i64>,
    pub limit: Option<i64>,
    pub status: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

impl OrderListQuery {
    fn pagination(&self) -> Pagination {
        Pagination::new(self.skip, self.limit)
    }

    /// Build the filter. A blank `status` means no status filter.
    fn filter(&self) -> Result<OrderFilter> {
        Ok(OrderFilter {
            status: self
                .status
                .as_deref()
                .filter(|status| !status.trim().is_empty())
                .map(OrderStatus::new),
            created: CreatedRange::new(self.start_date, self.end_date)?,
        })
    }
}

/// Validated filter and page window for a customer's order list.
///
/// Extracting this rejects a reversed date range with 400 before the handler
/// runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderListParams {
    pub filter: OrderFilter,
    pub page: Pagination,
}

impl<S> FromRequestParts<S> for OrderListParams
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self> {
        let ApiQuery(query) = ApiQuery::<OrderListQuery>::from_request_parts(parts, state).await?;
        Ok(Self {
            filter: query.filter()?,
            page: query.pagination(),
        })
    }
}

/// List customers with their order counts.
#[instrument(skip_all)]
pub async fn list(
    ApiQuery(query): ApiQuery<PageQuery>,
    mut conn: DbConn,
) -> Result<Json<ListResponse<CustomerSummary>>> {
    let page = query.pagination();

    let customers = CustomerRepository::new(&mut conn).list(page).await?;
    tracing::debug!(count = customers.len(), skip = page.skip, "Listed customers");

    Ok(Json(ListResponse::new(customers)))
}

/// Customer detail with every order embedded.
#[instrument(skip_all, fields(customer_id = %id))]
pub async fn show(
    ApiPath(id): ApiPath<UserId>,
    mut conn: DbConn,
) -> Result<Json<DataResponse<CustomerDetail>>> {
    let customer = CustomerRepository::new(&mut conn)
        .get_by_id(id)
        .await?
        .ok_or_else(|| AppError::customer_not_found(id))?;
    let orders = OrderRepository::new(&mut conn).list_for_customer(id).await?;

    Ok(Json(DataResponse::new(CustomerDetail::new(customer, orders))))
}

/// A customer's orders, filtered and paged, with the total match count.
///
/// The customer must exist; that is checked before any filter is applied.
#[instrument(skip_all, fields(customer_id = %id))]
pub async fn orders(
    ApiPath(id): ApiPath<UserId>,
    params: OrderListParams,
    mut conn: DbConn,
) -> Result<Json<OrderPageResponse>> {
    let OrderListParams { filter, page } = params;

    if !CustomerRepository::new(&mut conn).exists(id).await? {
        return Err(AppError::customer_not_found(id));
    }

    let mut repo = OrderRepository::new(&mut conn);
    let total_orders = repo.count_filtered(id, &filter).await?;
    let orders = repo.list_filtered(id, &filter, page).await?;

    Ok(Json(OrderPageResponse {
        status: STATUS_SUCCESS,
        total_orders,
        skip: page.skip,
        limit: page.limit,
        count: orders.len(),
        data: orders,
    }))
}
