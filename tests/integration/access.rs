use crate::common;

use axum::http::StatusCode;
use hrms::domain::users::UserRole;
use serde_json::json;
use serial_test::serial;
use tower::ServiceExt;

#[tokio::test]
#[serial]
async fn test_employee_reads_but_cannot_write_organization() {
    let pool = setup_test_db_or_skip!();
    common::cleanup_test_db(&pool).await;
    let app = common::create_test_app(pool.clone());
    let employee = common::create_user(&pool, UserRole::Employee).await;
    let token = common::token_for(&employee);

    for uri in [
        "/api/departements",
        "/api/positions",
        "/api/locations",
        "/api/shifts",
    ] {
        let response = app
            .clone()
            .oneshot(common::get_request(uri, Some(&token)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK, "GET {}", uri);
    }

    let response = app
        .oneshot(common::json_request(
            "POST",
            "/api/departements",
            Some(&token),
            json!({ "code": "ENG", "name": "Engineering" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    common::cleanup_test_db(&pool).await;
}

#[tokio::test]
#[serial]
async fn test_admin_area_by_role() {
    let pool = setup_test_db_or_skip!();
    common::cleanup_test_db(&pool).await;
    let app = common::create_test_app(pool.clone());

    let cases = [
        (UserRole::Employee, "/api/admin/leave", StatusCode::FORBIDDEN),
        (UserRole::Employee, "/api/admin/users", StatusCode::FORBIDDEN),
        (UserRole::Manager, "/api/admin/leave", StatusCode::OK),
        (UserRole::Manager, "/api/admin/absensi", StatusCode::OK),
        (UserRole::Manager, "/api/admin/dashboard", StatusCode::OK),
        (UserRole::Manager, "/api/admin/users", StatusCode::FORBIDDEN),
        (UserRole::Manager, "/api/admin/notification-templates", StatusCode::FORBIDDEN),
        (UserRole::Hr, "/api/admin/users", StatusCode::OK),
        (UserRole::Admin, "/api/admin/notification-templates", StatusCode::OK),
    ];

    for (role, uri, expected) in cases {
        let user = common::create_user(&pool, role).await;
        let response = app
            .clone()
            .oneshot(common::get_request(uri, Some(&common::token_for(&user))))
            .await
            .unwrap();
        assert_eq!(response.status(), expected, "{} GET {}", role, uri);
    }

    common::cleanup_test_db(&pool).await;
}

#[tokio::test]
#[serial]
async fn test_guard_rejects_missing_and_deactivated_callers() {
    let pool = setup_test_db_or_skip!();
    common::cleanup_test_db(&pool).await;
    let app = common::create_test_app(pool.clone());

    let response = app
        .clone()
        .oneshot(common::get_request("/api/departements", None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let admin = common::create_user(&pool, UserRole::Admin).await;
    let admin_token = common::token_for(&admin);
    let target = common::create_user(&pool, UserRole::Hr).await;
    let target_token = common::token_for(&target);

    let response = app
        .clone()
        .oneshot(common::json_request(
            "DELETE",
            &format!("/api/admin/users/{}", target.id),
            Some(&admin_token),
            json!({}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    // The still-valid access token stops working once the account is off
    for uri in ["/api/admin/users", "/api/notifications", "/api/leave"] {
        let response = app
            .clone()
            .oneshot(common::get_request(uri, Some(&target_token)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::FORBIDDEN, "GET {}", uri);
    }

    let response = app
        .oneshot(common::json_request(
            "POST",
            "/api/leave",
            Some(&target_token),
            json!({
                "leave_type": "annual",
                "start_date": "2025-03-10",
                "end_date": "2025-03-12",
                "reason": "Family event"
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    common::cleanup_test_db(&pool).await;
}
