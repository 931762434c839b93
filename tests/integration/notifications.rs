use crate::common;

use axum::http::StatusCode;
use hrms::domain::users::UserRole;
use hrms::infrastructure::repositories::mock::MockPushProvider;
use serde_json::{Value, json};
use serial_test::serial;
use std::sync::Arc;
use tower::ServiceExt;

async fn call(
    app: &axum::Router,
    method: &str,
    uri: &str,
    token: &str,
    body: Value,
) -> (StatusCode, Value) {
    let request = if method == "GET" {
        common::get_request(uri, Some(token))
    } else {
        common::json_request(method, uri, Some(token), body)
    };
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    (status, common::body_json(response).await)
}

#[tokio::test]
#[serial]
async fn test_manual_send_reaches_inbox_and_device() {
    let pool = setup_test_db_or_skip!();
    common::cleanup_test_db(&pool).await;
    sqlx::query("DELETE FROM notification_templates WHERE event_code = 'PAYSLIP_READY'")
        .execute(&pool)
        .await
        .unwrap();

    let push = Arc::new(MockPushProvider::new());
    let app = hrms::presentation::router::app(common::create_test_app_state_with_push(
        pool.clone(),
        push.clone(),
    ))
    .unwrap();
    let admin = common::create_user(&pool, UserRole::Admin).await;
    let employee = common::create_user(&pool, UserRole::Employee).await;
    let admin_token = common::token_for(&admin);
    let employee_token = common::token_for(&employee);

    let (status, _) = call(
        &app,
        "POST",
        "/api/admin/notification-templates",
        &admin_token,
        json!({
            "event_code": "LEAVE_APPROVED",
            "title_template": "Dup",
            "body_template": "Dup"
        }),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, _) = call(
        &app,
        "POST",
        "/api/admin/notification-templates",
        &admin_token,
        json!({
            "event_code": "PAYSLIP_READY",
            "title_template": "Payslip {month}",
            "body_template": "Hi {name}, your payslip for {month} is ready"
        }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, _) = call(
        &app,
        "POST",
        "/api/mobile/devices",
        &employee_token,
        json!({ "push_token": "phone-1", "platform": "android" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, json) = call(
        &app,
        "POST",
        "/api/admin/notifications/send",
        &admin_token,
        json!({
            "event_code": "PAYSLIP_READY",
            "user_id": employee.id,
            "data": { "name": "Ani", "month": "March" }
        }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(json["data"]["title"], "Payslip March");
    assert_eq!(json["data"]["body"], "Hi Ani, your payslip for March is ready");

    let sent = push.sent().await;
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].tokens, vec!["phone-1".to_string()]);

    let (status, _) = call(
        &app,
        "POST",
        "/api/admin/notifications/send",
        &admin_token,
        json!({ "event_code": "NO_SUCH_EVENT", "user_id": employee.id }),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, json) = call(
        &app,
        "GET",
        "/api/notifications/unread-count",
        &employee_token,
        Value::Null,
    )
    .await;
    assert_eq!(json["data"]["unread"], 1);

    common::cleanup_test_db(&pool).await;
    sqlx::query("DELETE FROM notification_templates WHERE event_code = 'PAYSLIP_READY'")
        .execute(&pool)
        .await
        .unwrap();
}

#[tokio::test]
#[serial]
async fn test_inbox_lifecycle() {
    let pool = setup_test_db_or_skip!();
    common::cleanup_test_db(&pool).await;
    let app = common::create_test_app(pool.clone());
    let admin = common::create_user(&pool, UserRole::Admin).await;
    let employee = common::create_user(&pool, UserRole::Employee).await;
    let admin_token = common::token_for(&admin);
    let token = common::token_for(&employee);

    for _ in 0..3 {
        let (status, _) = call(
            &app,
            "POST",
            "/api/admin/notifications/send",
            &admin_token,
            json!({ "event_code": "LEAVE_APPROVED", "user_id": employee.id }),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (_, json) = call(&app, "GET", "/api/notifications/recent?limit=2", &token, Value::Null).await;
    let recent = json["data"].as_array().unwrap().clone();
    assert_eq!(recent.len(), 2);
    let first = recent[0]["id"].as_str().unwrap().to_string();
    let second = recent[1]["id"].as_str().unwrap().to_string();

    let (status, _) = call(
        &app,
        "POST",
        &format!("/api/notifications/{}/read", first),
        &token,
        json!({}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    // Another user's notification looks missing
    let (status, _) = call(
        &app,
        "POST",
        &format!("/api/notifications/{}/read", first),
        &admin_token,
        json!({}),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, json) = call(&app, "GET", "/api/notifications/unread-count", &token, Value::Null).await;
    assert_eq!(json["data"]["unread"], 2);

    let (status, _) = call(
        &app,
        "DELETE",
        &format!("/api/notifications/{}", second),
        &token,
        json!({}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = call(&app, "POST", "/api/notifications/read-all", &token, json!({})).await;
    assert_eq!(status, StatusCode::OK);

    let (_, json) = call(&app, "GET", "/api/notifications/unread-count", &token, Value::Null).await;
    assert_eq!(json["data"]["unread"], 0);

    let (_, json) = call(&app, "GET", "/api/notifications", &token, Value::Null).await;
    assert_eq!(json["meta"]["total"], 2);
    assert!(
        json["data"]
            .as_array()
            .unwrap()
            .iter()
            .all(|n| n["id"] != second.as_str() && n["is_read"] == true)
    );

    common::cleanup_test_db(&pool).await;
}
