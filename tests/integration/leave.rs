use crate::common;

use axum::http::StatusCode;
use hrms::domain::users::UserRole;
use serde_json::{Value, json};
use serial_test::serial;
use tower::ServiceExt;

async fn post(app: &axum::Router, uri: &str, token: &str, body: Value) -> (StatusCode, Value) {
    let response = app
        .clone()
        .oneshot(common::json_request("POST", uri, Some(token), body))
        .await
        .unwrap();
    let status = response.status();
    (status, common::body_json(response).await)
}

async fn get(app: &axum::Router, uri: &str, token: &str) -> Value {
    let response = app
        .clone()
        .oneshot(common::get_request(uri, Some(token)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK, "GET {}", uri);
    common::body_json(response).await
}

fn leave_body(start: &str, end: &str) -> Value {
    json!({
        "leave_type": "annual",
        "start_date": start,
        "end_date": end,
        "reason": "Family event"
    })
}

#[tokio::test]
#[serial]
async fn test_submit_and_approve_notifies_requester() {
    let pool = setup_test_db_or_skip!();
    common::cleanup_test_db(&pool).await;
    let app = common::create_test_app(pool.clone());
    let employee = common::create_user(&pool, UserRole::Employee).await;
    let manager = common::create_user(&pool, UserRole::Manager).await;
    let employee_token = common::token_for(&employee);
    let manager_token = common::token_for(&manager);

    let (status, json) = post(
        &app,
        "/api/leave",
        &employee_token,
        leave_body("2025-03-10", "2025-03-12"),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(json["data"]["status"], "pending");
    assert_eq!(json["data"]["days"], 3);
    let id = json["data"]["id"].as_str().unwrap().to_string();

    let (status, _) = post(
        &app,
        "/api/leave",
        &employee_token,
        leave_body("2025-03-12", "2025-03-14"),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);

    // Employees cannot review, not even their own request
    let (status, _) = post(
        &app,
        &format!("/api/admin/leave/{}/approve", id),
        &employee_token,
        json!({}),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, json) = post(
        &app,
        &format!("/api/admin/leave/{}/approve", id),
        &manager_token,
        json!({}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"]["status"], "approved");
    assert_eq!(json["data"]["reviewed_by"], manager.id.to_string());

    let (status, _) = post(
        &app,
        &format!("/api/admin/leave/{}/reject", id),
        &manager_token,
        json!({ "note": "Too late" }),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let inbox = get(&app, "/api/notifications/recent", &employee_token).await;
    let events: Vec<&str> = inbox["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|n| n["event_code"].as_str().unwrap())
        .collect();
    assert_eq!(events, vec!["LEAVE_APPROVED", "LEAVE_SUBMITTED"]);
    assert!(
        inbox["data"][0]["body"]
            .as_str()
            .unwrap()
            .contains("2025-03-10 to 2025-03-12")
    );

    common::cleanup_test_db(&pool).await;
}

#[tokio::test]
#[serial]
async fn test_cancel_and_listing() {
    let pool = setup_test_db_or_skip!();
    common::cleanup_test_db(&pool).await;
    let app = common::create_test_app(pool.clone());
    let employee = common::create_user(&pool, UserRole::Employee).await;
    let other = common::create_user(&pool, UserRole::Employee).await;
    let hr = common::create_user(&pool, UserRole::Hr).await;
    let employee_token = common::token_for(&employee);

    let (_, json) = post(
        &app,
        "/api/leave",
        &employee_token,
        leave_body("2025-04-01", "2025-04-02"),
    )
    .await;
    let id = json["data"]["id"].as_str().unwrap().to_string();
    post(
        &app,
        "/api/leave",
        &employee_token,
        leave_body("2025-05-01", "2025-05-01"),
    )
    .await;

    let (status, _) = post(
        &app,
        &format!("/api/leave/{}/cancel", id),
        &common::token_for(&other),
        json!({}),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, json) = post(
        &app,
        &format!("/api/leave/{}/cancel", id),
        &employee_token,
        json!({}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"]["status"], "cancelled");

    let own = get(&app, "/api/leave", &employee_token).await;
    assert_eq!(own["meta"]["total"], 2);

    let pending = get(
        &app,
        "/api/admin/leave?filter%5Bstatus%5D=pending",
        &common::token_for(&hr),
    )
    .await;
    assert_eq!(pending["meta"]["total"], 1);
    assert_eq!(pending["data"][0]["start_date"], "2025-05-01");

    common::cleanup_test_db(&pool).await;
}
