//! JSON API over a loaded database.
//!
//! Run with: `cargo test -p order-dashboard-integration-tests -- --ignored`

#![allow(clippy::unwrap_used, clippy::float_cmp)]

use axum::http::StatusCode;
use order_dashboard_integration_tests::{get_json, ids, router, seed};
use serde_json::json;
use sqlx::PgPool;

fn close_to(value: &serde_json::Value, expected: f64) -> bool {
    (value.as_f64().unwrap() - expected).abs() < 1e-9
}

#[sqlx::test(migrations = "../api/migrations")]
#[ignore = "Requires a running PostgreSQL database (DATABASE_URL)"]
async fn test_customer_list_counts_orders(pool: PgPool) {
    seed(&pool, 10).await;
    let app = router(pool);

    let (status, body) = get_json(&app, "/api/customers/").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "success");
    assert_eq!(body["count"], 3);
    assert_eq!(ids(&body["data"], "id"), vec![1, 2, 3]);

    let counts: Vec<i64> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["orders_count"].as_i64().unwrap())
        .collect();
    assert_eq!(counts, vec![4, 1, 0]);
}

#[sqlx::test(migrations = "../api/migrations")]
#[ignore = "Requires a running PostgreSQL database (DATABASE_URL)"]
async fn test_customer_list_pages_by_id(pool: PgPool) {
    seed(&pool, 10).await;
    let app = router(pool);

    let (_, body) = get_json(&app, "/api/customers?skip=1&limit=1").await;
    assert_eq!(ids(&body["data"], "id"), vec![2]);

    let (_, body) = get_json(&app, "/api/customers?skip=10").await;
    assert_eq!(body["count"], 0);
    assert_eq!(body["data"], json!([]));
}

#[sqlx::test(migrations = "../api/migrations")]
#[ignore = "Requires a running PostgreSQL database (DATABASE_URL)"]
async fn test_customer_detail_embeds_orders(pool: PgPool) {
    seed(&pool, 10).await;
    let app = router(pool);

    let (status, body) = get_json(&app, "/api/customers/1").await;
    assert_eq!(status, StatusCode::OK);

    let customer = &body["data"];
    assert_eq!(customer["first_name"], "Ada");
    assert_eq!(customer["email"], "ada@example.com");
    assert_eq!(customer["orders_count"], 4);
    assert_eq!(ids(&customer["orders"], "order_id"), vec![100, 101, 102, 104]);

    let items: Vec<i64> = customer["orders"]
        .as_array()
        .unwrap()
        .iter()
        .map(|o| o["items_count"].as_i64().unwrap())
        .collect();
    assert_eq!(items, vec![2, 1, 0, 0]);

    let (_, body) = get_json(&app, "/api/customers/3").await;
    assert_eq!(body["data"]["created_at"], json!(null));
    assert_eq!(body["data"]["orders_count"], 0);
    assert_eq!(body["data"]["orders"], json!([]));
}

#[sqlx::test(migrations = "../api/migrations")]
#[ignore = "Requires a running PostgreSQL database (DATABASE_URL)"]
async fn test_unknown_customer_is_not_found(pool: PgPool) {
    seed(&pool, 10).await;
    let app = router(pool);

    let (status, body) = get_json(&app, "/api/customers/999").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "detail": "Customer 999 not found" }));

    let (status, body) = get_json(&app, "/api/customers/999/orders?status=Shipped").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "detail": "Customer 999 not found" }));
}

#[sqlx::test(migrations = "../api/migrations")]
#[ignore = "Requires a running PostgreSQL database (DATABASE_URL)"]
async fn test_customer_orders_carry_totals(pool: PgPool) {
    seed(&pool, 10).await;
    let app = router(pool);

    let (status, body) = get_json(&app, "/api/customers/1/orders").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total_orders"], 4);
    assert_eq!(body["skip"], 0);
    assert_eq!(body["limit"], 10);
    assert_eq!(body["count"], 4);
    assert_eq!(ids(&body["data"], "order_id"), vec![100, 101, 102, 104]);

    let orders = body["data"].as_array().unwrap();
    assert!(close_to(&orders[0]["total_amount"], 52.48));
    assert!(close_to(&orders[1]["total_amount"], 24.0));
    assert!(close_to(&orders[2]["total_amount"], 0.0));
    assert_eq!(orders[2]["items_count"], 0);
}

#[sqlx::test(migrations = "../api/migrations")]
#[ignore = "Requires a running PostgreSQL database (DATABASE_URL)"]
async fn test_customer_orders_date_range_covers_whole_days(pool: PgPool) {
    seed(&pool, 10).await;
    let app = router(pool);

    let (_, body) = get_json(
        &app,
        "/api/customers/1/orders?start_date=2024-03-01&end_date=2024-03-01",
    )
    .await;
    assert_eq!(ids(&body["data"], "order_id"), vec![100, 101]);
    assert_eq!(body["total_orders"], 2);

    let (_, body) = get_json(&app, "/api/customers/1/orders?start_date=2024-03-02").await;
    assert_eq!(ids(&body["data"], "order_id"), vec![102]);

    let (_, body) = get_json(&app, "/api/customers/1/orders?end_date=2024-02-29").await;
    assert_eq!(ids(&body["data"], "order_id"), vec![104]);
}

#[sqlx::test(migrations = "../api/migrations")]
#[ignore = "Requires a running PostgreSQL database (DATABASE_URL)"]
async fn test_customer_orders_status_is_exact_match(pool: PgPool) {
    seed(&pool, 10).await;
    let app = router(pool);

    let (_, body) = get_json(&app, "/api/customers/1/orders?status=Shipped").await;
    assert_eq!(ids(&body["data"], "order_id"), vec![100, 102]);
    assert_eq!(body["total_orders"], 2);

    let (status, body) = get_json(&app, "/api/customers/1/orders?status=shipped").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total_orders"], 0);
    assert_eq!(body["data"], json!([]));

    let (_, body) = get_json(&app, "/api/customers/1/orders?status=").await;
    assert_eq!(body["total_orders"], 4);
}

#[sqlx::test(migrations = "../api/migrations")]
#[ignore = "Requires a running PostgreSQL database (DATABASE_URL)"]
async fn test_customer_orders_total_ignores_paging(pool: PgPool) {
    seed(&pool, 10).await;
    let app = router(pool);

    let (_, body) = get_json(&app, "/api/customers/1/orders?skip=1&limit=2").await;
    assert_eq!(body["total_orders"], 4);
    assert_eq!(body["skip"], 1);
    assert_eq!(body["limit"], 2);
    assert_eq!(body["count"], 2);
    assert_eq!(ids(&body["data"], "order_id"), vec![101, 102]);
}

#[sqlx::test(migrations = "../api/migrations")]
#[ignore = "Requires a running PostgreSQL database (DATABASE_URL)"]
async fn test_order_detail(pool: PgPool) {
    seed(&pool, 10).await;
    let app = router(pool);

    let (status, body) = get_json(&app, "/api/orders/100").await;
    assert_eq!(status, StatusCode::OK);

    let order = &body["data"];
    assert_eq!(order["order_id"], 100);
    assert_eq!(order["status"], "Shipped");
    assert!(close_to(&order["total_amount"], 52.48));
    assert_eq!(
        order["customer"],
        json!({ "id": 1, "name": "Ada Lovelace", "email": "ada@example.com" })
    );

    let items = order["items"].as_array().unwrap();
    assert_eq!(ids(&order["items"], "item_id"), vec![1000, 1001]);
    assert_eq!(items[0]["product_name"], "Tee");
    assert_eq!(items[0]["quantity"], 2);
    assert!(close_to(&items[0]["unit_price"], 19.99));
    assert!(close_to(&items[0]["line_total"], 39.98));
    assert_eq!(items[1]["product_name"], "Cap");
}

#[sqlx::test(migrations = "../api/migrations")]
#[ignore = "Requires a running PostgreSQL database (DATABASE_URL)"]
async fn test_order_detail_uses_purchase_price(pool: PgPool) {
    seed(&pool, 10).await;
    let app = router(pool);

    // Item 1003 was bought at 18.00 while the product lists at 19.99.
    let (_, body) = get_json(&app, "/api/orders/103").await;
    assert!(close_to(&body["data"]["total_amount"], 18.0));
    assert_eq!(body["data"]["customer"]["name"], "Alan Turing");
}

#[sqlx::test(migrations = "../api/migrations")]
#[ignore = "Requires a running PostgreSQL database (DATABASE_URL)"]
async fn test_order_without_items_totals_zero(pool: PgPool) {
    seed(&pool, 10).await;
    let app = router(pool);

    let (status, body) = get_json(&app, "/api/orders/102").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["items"], json!([]));
    assert!(close_to(&body["data"]["total_amount"], 0.0));
}

#[sqlx::test(migrations = "../api/migrations")]
#[ignore = "Requires a running PostgreSQL database (DATABASE_URL)"]
async fn test_unknown_order_is_not_found(pool: PgPool) {
    seed(&pool, 10).await;
    let app = router(pool);

    let (status, body) = get_json(&app, "/api/orders/999").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "detail": "Order 999 not found" }));
}

#[sqlx::test(migrations = "../api/migrations")]
#[ignore = "Requires a running PostgreSQL database (DATABASE_URL)"]
async fn test_readiness_with_database(pool: PgPool) {
    let app = router(pool);
    let (status, _) = get_json(&app, "/").await;
    assert_eq!(status, StatusCode::OK);

    let response = tower::ServiceExt::oneshot(
        app,
        axum::http::Request::get("/health/ready")
            .body(axum::body::Body::empty())
            .unwrap(),
    )
    .await
    .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}
