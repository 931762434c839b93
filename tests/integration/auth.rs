use crate::common;

use axum::{
    body::Body,
    http::{Request, StatusCode, header},
};
use hrms::domain::users::{UpdateUser, UserRepository, UserRole};
use hrms::infrastructure::repositories::users::PostgresUserRepository;
use serde_json::json;
use serial_test::serial;
use tower::ServiceExt;

async fn login(app: &axum::Router, email: &str, password: &str) -> axum::response::Response {
    app.clone()
        .oneshot(common::json_request(
            "POST",
            "/api/auth/login",
            None,
            json!({ "email": email, "password": password }),
        ))
        .await
        .unwrap()
}

#[tokio::test]
#[serial]
async fn test_login_sets_session_cookie() {
    let pool = setup_test_db_or_skip!();
    common::cleanup_test_db(&pool).await;
    let app = common::create_test_app(pool.clone());
    let user = common::create_user(&pool, UserRole::Employee).await;

    let response = login(&app, &user.email.to_uppercase(), common::TEST_PASSWORD).await;
    assert_eq!(response.status(), StatusCode::OK);

    let cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .unwrap()
        .to_str()
        .unwrap()
        .to_string();
    assert!(cookie.starts_with("session_token="));
    assert!(cookie.contains("HttpOnly"));

    let json = common::body_json(response).await;
    assert_eq!(json["data"]["token_type"], "Bearer");
    assert!(json["data"]["refresh_token"].is_string());
    assert_eq!(json["data"]["user"]["id"], user.id.to_string());
    assert!(json["data"]["user"].get("password_hash").is_none());

    // The cookie alone authenticates
    let session = cookie.split(';').next().unwrap().to_string();
    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/auth/me")
                .header(header::COOKIE, session)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = common::body_json(response).await;
    assert_eq!(json["data"]["email"], user.email);

    common::cleanup_test_db(&pool).await;
}

#[tokio::test]
#[serial]
async fn test_login_rejections() {
    let pool = setup_test_db_or_skip!();
    common::cleanup_test_db(&pool).await;
    let app = common::create_test_app(pool.clone());
    let user = common::create_user(&pool, UserRole::Employee).await;

    let wrong_password = login(&app, &user.email, "not-the-password").await;
    assert_eq!(wrong_password.status(), StatusCode::UNAUTHORIZED);

    let unknown = login(&app, "nobody@example.com", common::TEST_PASSWORD).await;
    assert_eq!(unknown.status(), StatusCode::UNAUTHORIZED);

    let invalid = login(&app, "not-an-email", common::TEST_PASSWORD).await;
    assert_eq!(invalid.status(), StatusCode::UNPROCESSABLE_ENTITY);

    PostgresUserRepository::new(pool.clone())
        .update(
            user.id,
            UpdateUser {
                is_active: Some(false),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    let inactive = login(&app, &user.email, common::TEST_PASSWORD).await;
    assert_eq!(inactive.status(), StatusCode::FORBIDDEN);

    common::cleanup_test_db(&pool).await;
}

#[tokio::test]
#[serial]
async fn test_refresh_rotates_and_detects_replay() {
    let pool = setup_test_db_or_skip!();
    common::cleanup_test_db(&pool).await;
    let app = common::create_test_app(pool.clone());
    let user = common::create_user(&pool, UserRole::Employee).await;

    let response = app
        .clone()
        .oneshot(common::json_request(
            "POST",
            "/api/mobile/auth/login",
            None,
            json!({ "email": user.email, "password": common::TEST_PASSWORD }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = common::body_json(response).await;
    let first = json["data"]["refresh_token"].as_str().unwrap().to_string();
    let session_id = json["data"]["session_id"].as_str().unwrap().to_string();

    let refresh = |token: String| {
        common::json_request(
            "POST",
            "/api/mobile/auth/refresh-token",
            None,
            json!({ "refresh_token": token, "session_id": session_id }),
        )
    };

    let response = app.clone().oneshot(refresh(first.clone())).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().get(header::SET_COOKIE).is_none());
    let json = common::body_json(response).await;
    let second = json["data"]["refresh_token"].as_str().unwrap().to_string();
    assert_ne!(first, second);
    assert_eq!(json["data"]["session_id"], session_id.as_str());

    // Replaying the rotated token revokes the whole session
    let replay = app.clone().oneshot(refresh(first)).await.unwrap();
    assert_eq!(replay.status(), StatusCode::UNAUTHORIZED);

    let revoked = app.oneshot(refresh(second)).await.unwrap();
    assert_eq!(revoked.status(), StatusCode::UNAUTHORIZED);

    common::cleanup_test_db(&pool).await;
}

#[tokio::test]
#[serial]
async fn test_web_refresh_renews_session_cookie() {
    let pool = setup_test_db_or_skip!();
    common::cleanup_test_db(&pool).await;
    let app = common::create_test_app(pool.clone());
    let user = common::create_user(&pool, UserRole::Employee).await;

    let json = common::body_json(login(&app, &user.email, common::TEST_PASSWORD).await).await;
    let refresh = json["data"]["refresh_token"].as_str().unwrap().to_string();
    let session_id = json["data"]["session_id"].as_str().unwrap().to_string();

    let response = app
        .clone()
        .oneshot(common::json_request(
            "POST",
            "/api/auth/refresh-token",
            None,
            json!({ "refresh_token": refresh, "session_id": session_id }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .unwrap()
        .to_str()
        .unwrap()
        .to_string();
    let json = common::body_json(response).await;
    let access = json["data"]["access_token"].as_str().unwrap();
    assert!(cookie.starts_with(&format!("session_token={};", access)));
    assert!(cookie.contains("HttpOnly"));

    let session = cookie.split(';').next().unwrap().to_string();
    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/auth/me")
                .header(header::COOKIE, session)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    common::cleanup_test_db(&pool).await;
}

#[tokio::test]
#[serial]
async fn test_logout_ends_session_and_clears_cookie() {
    let pool = setup_test_db_or_skip!();
    common::cleanup_test_db(&pool).await;
    let app = common::create_test_app(pool.clone());
    let user = common::create_user(&pool, UserRole::Employee).await;

    let json = common::body_json(login(&app, &user.email, common::TEST_PASSWORD).await).await;
    let access = json["data"]["access_token"].as_str().unwrap().to_string();
    let refresh = json["data"]["refresh_token"].as_str().unwrap().to_string();
    let session_id = json["data"]["session_id"].as_str().unwrap().to_string();

    let response = app
        .clone()
        .oneshot(common::json_request(
            "POST",
            "/api/auth/logout",
            Some(&access),
            json!({}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .unwrap()
        .to_str()
        .unwrap();
    assert!(cookie.contains("Max-Age=0"));

    let response = app
        .oneshot(common::json_request(
            "POST",
            "/api/auth/refresh-token",
            None,
            json!({ "refresh_token": refresh, "session_id": session_id }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    common::cleanup_test_db(&pool).await;
}

#[tokio::test]
#[serial]
async fn test_change_password() {
    let pool = setup_test_db_or_skip!();
    common::cleanup_test_db(&pool).await;
    let app = common::create_test_app(pool.clone());
    let user = common::create_user(&pool, UserRole::Employee).await;
    let token = common::token_for(&user);

    let wrong = app
        .clone()
        .oneshot(common::json_request(
            "POST",
            "/api/auth/change-password",
            Some(&token),
            json!({ "current_password": "incorrect", "new_password": "new-password-1" }),
        ))
        .await
        .unwrap();
    assert_eq!(wrong.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let response = app
        .clone()
        .oneshot(common::json_request(
            "POST",
            "/api/auth/change-password",
            Some(&token),
            json!({
                "current_password": common::TEST_PASSWORD,
                "new_password": "new-password-1"
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    assert_eq!(
        login(&app, &user.email, common::TEST_PASSWORD).await.status(),
        StatusCode::UNAUTHORIZED
    );
    assert_eq!(
        login(&app, &user.email, "new-password-1").await.status(),
        StatusCode::OK
    );

    common::cleanup_test_db(&pool).await;
}

#[tokio::test]
#[serial]
async fn test_me_requires_token() {
    let pool = setup_test_db_or_skip!();
    let app = common::create_test_app(pool.clone());

    let missing = app
        .clone()
        .oneshot(common::get_request("/api/auth/me", None))
        .await
        .unwrap();
    assert_eq!(missing.status(), StatusCode::UNAUTHORIZED);

    let garbage = app
        .oneshot(common::get_request("/api/auth/me", Some("not.a.jwt")))
        .await
        .unwrap();
    assert_eq!(garbage.status(), StatusCode::UNAUTHORIZED);
}
