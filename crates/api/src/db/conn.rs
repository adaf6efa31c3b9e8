//! Per-request database connection.

use std::ops::{Deref, DerefMut};

use axum::extract::{FromRef, FromRequestParts};
use axum::http::request::Parts;
use sqlx::pool::PoolConnection;
use sqlx::{PgConnection, Postgres};

use super::RepositoryError;
use crate::error::AppError;
use crate::state::AppState;

/// A pooled connection checked out for the lifetime of one handler.
///
/// The connection goes back to the pool when this value is dropped, whether
/// the handler returns a response, an error, or is cancelled.
///
/// # Example
///
/// ```rust,ignore
/// async fn handler(mut conn: DbConn) -> Result<Json<Value>, AppError> {
///     let customers = CustomerRepository::new(&mut conn).list(page).await?;
///     // ...
/// }
/// ```
pub struct DbConn(PoolConnection<Postgres>);

impl<S> FromRequestParts<S> for DbConn
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(_parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let state = AppState::from_ref(state);
        let conn = state
            .pool()
            .acquire()
            .await
            .map_err(RepositoryError::from)?;
        Ok(Self(conn))
    }
}

impl Deref for DbConn {
    type Target = PgConnection;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for DbConn {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}
