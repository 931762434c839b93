use crate::common;

use axum::http::StatusCode;
use hrms::domain::users::UserRole;
use serde_json::json;
use serial_test::serial;
use tower::ServiceExt;

#[tokio::test]
#[serial]
async fn test_check_in_check_out_and_history() {
    let pool = setup_test_db_or_skip!();
    common::cleanup_test_db(&pool).await;
    let app = common::create_test_app(pool.clone());
    let employee = common::create_user(&pool, UserRole::Employee).await;
    let manager = common::create_user(&pool, UserRole::Manager).await;
    let token = common::token_for(&employee);

    let check_in = || common::json_request("POST", "/api/attendance/check-in", Some(&token), json!({}));

    let response = app.clone().oneshot(check_in()).await.unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = common::body_json(response).await;
    assert_eq!(json["data"]["status"], "present");
    assert!(json["data"]["check_out_at"].is_null());

    let again = app.clone().oneshot(check_in()).await.unwrap();
    assert_eq!(again.status(), StatusCode::CONFLICT);

    let response = app
        .clone()
        .oneshot(common::json_request(
            "POST",
            "/api/attendance/check-out",
            Some(&token),
            json!({ "note": "Leaving on time" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = common::body_json(response).await;
    assert!(json["data"]["check_out_at"].is_string());

    let response = app
        .clone()
        .oneshot(common::get_request("/api/attendance/me", Some(&token)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = common::body_json(response).await;
    assert_eq!(json["meta"]["total"], 1);

    let response = app
        .oneshot(common::get_request(
            &format!("/api/admin/absensi?filter%5Buser_id%5D={}", employee.id),
            Some(&common::token_for(&manager)),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = common::body_json(response).await;
    assert_eq!(json["meta"]["total"], 1);
    assert_eq!(json["data"][0]["employee_name"], employee.name.as_str());

    common::cleanup_test_db(&pool).await;
}

#[tokio::test]
#[serial]
async fn test_geofence_applies_to_assigned_location() {
    let pool = setup_test_db_or_skip!();
    common::cleanup_test_db(&pool).await;
    let app = common::create_test_app(pool.clone());
    let admin = common::create_user(&pool, UserRole::Admin).await;
    let employee = common::create_user(&pool, UserRole::Employee).await;
    let admin_token = common::token_for(&admin);
    let token = common::token_for(&employee);

    let response = app
        .clone()
        .oneshot(common::json_request(
            "POST",
            "/api/locations",
            Some(&admin_token),
            json!({ "name": "HQ", "latitude": -6.2088, "longitude": 106.8456, "radius_meters": 100 }),
        ))
        .await
        .unwrap();
    let location_id = common::body_json(response).await["data"]["id"]
        .as_str()
        .unwrap()
        .to_string();

    let response = app
        .clone()
        .oneshot(common::json_request(
            "PUT",
            &format!("/api/admin/users/{}", employee.id),
            Some(&admin_token),
            json!({ "location_id": location_id }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let far = app
        .clone()
        .oneshot(common::json_request(
            "POST",
            "/api/attendance/check-in",
            Some(&token),
            json!({ "latitude": -6.1988, "longitude": 106.8456 }),
        ))
        .await
        .unwrap();
    assert_eq!(far.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let half = app
        .clone()
        .oneshot(common::json_request(
            "POST",
            "/api/attendance/check-in",
            Some(&token),
            json!({ "latitude": -6.2088 }),
        ))
        .await
        .unwrap();
    assert_eq!(half.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let near = app
        .oneshot(common::json_request(
            "POST",
            "/api/attendance/check-in",
            Some(&token),
            json!({ "latitude": -6.2089, "longitude": 106.8457 }),
        ))
        .await
        .unwrap();
    assert_eq!(near.status(), StatusCode::CREATED);

    common::cleanup_test_db(&pool).await;
}
