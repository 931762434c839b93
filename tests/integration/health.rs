use crate::common;

use axum::http::StatusCode;
use serial_test::serial;
use tower::ServiceExt;

#[tokio::test]
#[serial]
async fn test_health_endpoint() {
    let pool = setup_test_db_or_skip!();

    let response = common::create_test_app(pool.clone())
        .oneshot(common::get_request("/health", None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = common::body_json(response).await;
    assert_eq!(json["status"], "healthy");
    assert_eq!(json["database"], "connected");
}

#[tokio::test]
#[serial]
async fn test_openapi_document_is_served() {
    let pool = setup_test_db_or_skip!();

    let response = common::create_test_app(pool)
        .oneshot(common::get_request("/api-docs/openapi.json", None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = common::body_json(response).await;
    assert!(json["paths"]["/api/auth/login"].is_object());
}
