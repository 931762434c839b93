use crate::common;

use axum::http::StatusCode;
use hrms::domain::users::UserRole;
use serde_json::{Value, json};
use serial_test::serial;
use tower::ServiceExt;

async fn send(app: &axum::Router, method: &str, uri: &str, token: &str, body: Value) -> (StatusCode, Value) {
    let response = app
        .clone()
        .oneshot(common::json_request(method, uri, Some(token), body))
        .await
        .unwrap();
    let status = response.status();
    (status, common::body_json(response).await)
}

async fn get(app: &axum::Router, uri: &str, token: &str) -> (StatusCode, Value) {
    let response = app
        .clone()
        .oneshot(common::get_request(uri, Some(token)))
        .await
        .unwrap();
    let status = response.status();
    (status, common::body_json(response).await)
}

#[tokio::test]
#[serial]
async fn test_department_crud() {
    let pool = setup_test_db_or_skip!();
    common::cleanup_test_db(&pool).await;
    let app = common::create_test_app(pool.clone());
    let hr = common::create_user(&pool, UserRole::Hr).await;
    let token = common::token_for(&hr);

    let (status, json) = send(
        &app,
        "POST",
        "/api/departements",
        &token,
        json!({ "code": " eng ", "name": "Engineering" }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(json["data"]["code"], "ENG");
    let id = json["data"]["id"].as_str().unwrap().to_string();

    let (status, _) = send(
        &app,
        "POST",
        "/api/departements",
        &token,
        json!({ "code": "ENG", "name": "Duplicate" }),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);

    send(
        &app,
        "POST",
        "/api/departements",
        &token,
        json!({ "code": "FIN", "name": "Finance" }),
    )
    .await;

    let (status, json) = get(&app, "/api/departements?filter%5Bsearch%5D=engin", &token).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["meta"]["total"], 1);
    assert_eq!(json["data"][0]["id"], id.as_str());

    let (status, json) = get(
        &app,
        "/api/departements?page%5Bnumber%5D=9223372036854775807",
        &token,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["meta"]["total"], 2);
    assert!(json["data"].as_array().unwrap().is_empty());

    let (status, json) = send(
        &app,
        "PUT",
        &format!("/api/departements/{}", id),
        &token,
        json!({ "name": "Platform Engineering" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"]["name"], "Platform Engineering");
    assert_eq!(json["data"]["code"], "ENG");

    let uri = format!("/api/departements/{}", id);
    let (status, _) = send(&app, "DELETE", &uri, &token, json!({})).await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = get(&app, &uri, &token).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    common::cleanup_test_db(&pool).await;
}

#[tokio::test]
#[serial]
async fn test_positions_filter_by_department() {
    let pool = setup_test_db_or_skip!();
    common::cleanup_test_db(&pool).await;
    let app = common::create_test_app(pool.clone());
    let admin = common::create_user(&pool, UserRole::Admin).await;
    let token = common::token_for(&admin);

    let (_, json) = send(
        &app,
        "POST",
        "/api/departements",
        &token,
        json!({ "code": "OPS", "name": "Operations" }),
    )
    .await;
    let department_id = json["data"]["id"].as_str().unwrap().to_string();

    let (status, _) = send(
        &app,
        "POST",
        "/api/positions",
        &token,
        json!({ "name": "Supervisor", "department_id": department_id }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    send(
        &app,
        "POST",
        "/api/positions",
        &token,
        json!({ "name": "Intern" }),
    )
    .await;

    let (status, json) = get(
        &app,
        &format!("/api/positions?filter%5Bdepartment_id%5D={}", department_id),
        &token,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["meta"]["total"], 1);
    assert_eq!(json["data"][0]["name"], "Supervisor");

    common::cleanup_test_db(&pool).await;
}

#[tokio::test]
#[serial]
async fn test_location_and_shift_validation() {
    let pool = setup_test_db_or_skip!();
    common::cleanup_test_db(&pool).await;
    let app = common::create_test_app(pool.clone());
    let admin = common::create_user(&pool, UserRole::Admin).await;
    let token = common::token_for(&admin);

    let (status, _) = send(
        &app,
        "POST",
        "/api/locations",
        &token,
        json!({ "name": "HQ", "latitude": 95.0, "longitude": 106.8, "radius_meters": 100 }),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let (status, json) = send(
        &app,
        "POST",
        "/api/locations",
        &token,
        json!({ "name": "HQ", "latitude": -6.2088, "longitude": 106.8456, "radius_meters": 150 }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(json["data"]["radius_meters"], 150);

    let (status, _) = send(
        &app,
        "POST",
        "/api/shifts",
        &token,
        json!({ "name": "Broken", "start_time": "25:00", "end_time": "17:00" }),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let (status, json) = send(
        &app,
        "POST",
        "/api/shifts",
        &token,
        json!({ "name": "Morning", "start_time": "08:00", "end_time": "17:00", "late_tolerance_minutes": 15 }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(json["data"]["start_time"], "08:00");
    assert_eq!(json["data"]["late_tolerance_minutes"], 15);

    let (status, json) = get(&app, "/api/shifts?filter%5Bsearch%5D=morn", &token).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["meta"]["total"], 1);

    common::cleanup_test_db(&pool).await;
}

#[tokio::test]
#[serial]
async fn test_admin_manages_employees() {
    let pool = setup_test_db_or_skip!();
    common::cleanup_test_db(&pool).await;
    let app = common::create_test_app(pool.clone());
    let admin = common::create_user(&pool, UserRole::Admin).await;
    let token = common::token_for(&admin);

    let (status, json) = send(
        &app,
        "POST",
        "/api/admin/users",
        &token,
        json!({
            "name": "Putri Lestari",
            "email": "Putri@Example.com",
            "password": "password123"
        }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(json["data"]["email"], "putri@example.com");
    assert_eq!(json["data"]["role"], "employee");
    let id = json["data"]["id"].as_str().unwrap().to_string();

    let (status, _) = send(
        &app,
        "POST",
        "/api/admin/users",
        &token,
        json!({ "name": "Copy", "email": "putri@example.com", "password": "password123" }),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let (status, json) = get(&app, "/api/admin/users?filter%5Bsearch%5D=putri", &token).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["meta"]["total"], 1);

    let (status, json) = send(
        &app,
        "PUT",
        &format!("/api/admin/users/{}", id),
        &token,
        json!({ "role": "manager" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"]["role"], "manager");

    // Nobody can deactivate themselves
    let (status, _) = send(
        &app,
        "DELETE",
        &format!("/api/admin/users/{}", admin.id),
        &token,
        json!({}),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    common::cleanup_test_db(&pool).await;
}
