mod common;

use axum::http::{Method, StatusCode};
use chrono::Utc;
use serde_json::json;
use sqlx::PgPool;

use common::{
    TEST_EXPIRY, admin_token, count_rows, create_course, login, register_student, send,
    setup_test_app, test_jwt_config,
};
use coursedesk_auth::Role;
use coursedesk_auth::jwt::create_access_token_at;

#[sqlx::test(migrations = "./migrations")]
async fn test_register_returns_token_and_user(pool: PgPool) {
    let course_id = create_course(&pool, "Algorithms", "CS201", 4).await;
    let app = setup_test_app(pool.clone());

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/auth/register",
        None,
        Some(json!({
            "name": "Ada Lovelace",
            "email": "Ada@Example.com",
            "username": "ada",
            "password": "password123",
            "course_id": course_id
        })),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "Registration successful");
    assert!(body["data"]["token"].as_str().is_some());
    assert_eq!(body["data"]["user"]["username"], "ada");
    assert_eq!(body["data"]["user"]["role"], "STUDENT");
    assert!(body["data"]["user"]["studentId"].as_i64().is_some());
    assert!(body["data"]["user"].get("password").is_none());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_register_accepts_course_id_as_string(pool: PgPool) {
    let course_id = create_course(&pool, "Algorithms", "CS201", 4).await;
    let app = setup_test_app(pool.clone());

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/auth/register",
        None,
        Some(json!({
            "name": "Ada Lovelace",
            "email": "ada@example.com",
            "username": "ada",
            "password": "password123",
            "course_id": course_id.to_string()
        })),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_duplicate_username_leaves_no_partial_rows(pool: PgPool) {
    let course_id = create_course(&pool, "Algorithms", "CS201", 4).await;
    let app = setup_test_app(pool.clone());
    register_student(&app, "Ada Lovelace", "ada@example.com", "ada", course_id).await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/auth/register",
        None,
        Some(json!({
            "name": "Another Ada",
            "email": "other@example.com",
            "username": "ada",
            "password": "password123",
            "course_id": course_id
        })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "Username already exists");
    assert_eq!(count_rows(&pool, "students").await, 1);
    assert_eq!(count_rows(&pool, "users").await, 1);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_register_unknown_course_is_rejected(pool: PgPool) {
    let app = setup_test_app(pool.clone());

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/auth/register",
        None,
        Some(json!({
            "name": "Ada Lovelace",
            "email": "ada@example.com",
            "username": "ada",
            "password": "password123",
            "course_id": 999
        })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Invalid course. Course does not exist.");
    assert_eq!(count_rows(&pool, "students").await, 0);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_register_validation_lists_messages(pool: PgPool) {
    let app = setup_test_app(pool);

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/auth/register",
        None,
        Some(json!({
            "name": "Ada",
            "email": "not-an-email",
            "username": "ad",
            "password": "123",
            "course_id": 1
        })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let message = body["message"].as_str().unwrap();
    assert!(message.contains("Please provide a valid email"));
    assert!(message.contains("Username must be at least 3 characters"));
    assert!(message.contains("Password must be at least 6 characters"));
}

#[sqlx::test(migrations = "./migrations")]
async fn test_wrong_password_matches_unknown_user(pool: PgPool) {
    let course_id = create_course(&pool, "Algorithms", "CS201", 4).await;
    let app = setup_test_app(pool.clone());
    register_student(&app, "Ada Lovelace", "ada@example.com", "ada", course_id).await;

    let wrong = send(
        &app,
        Method::POST,
        "/api/auth/login",
        None,
        Some(json!({"username": "ada", "password": "wrong-password"})),
    )
    .await;
    let unknown = send(
        &app,
        Method::POST,
        "/api/auth/login",
        None,
        Some(json!({"username": "nobody", "password": "wrong-password"})),
    )
    .await;

    assert_eq!(wrong.0, StatusCode::UNAUTHORIZED);
    assert_eq!(wrong, unknown);
    assert_eq!(wrong.1["message"], "Invalid username or password");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_register_login_then_read_own_profile(pool: PgPool) {
    let course_id = create_course(&pool, "Algorithms", "CS201", 4).await;
    let app = setup_test_app(pool.clone());
    register_student(&app, "Ada Lovelace", "ada@example.com", "ada", course_id).await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/auth/login",
        None,
        Some(json!({"username": " ada ", "password": "password123"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Login successful");
    assert_eq!(body["data"]["student"]["course_code"], "CS201");
    let token = body["data"]["token"].as_str().unwrap().to_string();

    let (status, body) = send(&app, Method::GET, "/api/students/me", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Your details retrieved successfully");
    assert_eq!(body["data"]["name"], "Ada Lovelace");
    assert_eq!(body["data"]["email"], "ada@example.com");
    assert_eq!(body["data"]["course_name"], "Algorithms");
    assert_eq!(body["data"]["course_code"], "CS201");
    assert_eq!(body["data"]["course_duration"], 4);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_admin_login_has_no_student_profile(pool: PgPool) {
    let app = setup_test_app(pool.clone());
    common::create_admin(&pool, "root", "root-pass").await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/auth/login",
        None,
        Some(json!({"username": "root", "password": "root-pass"})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["user"]["role"], "ADMIN");
    assert!(body["data"]["user"]["studentId"].is_null());
    assert!(body["data"].get("student").is_none());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_token_expiry_boundaries(pool: PgPool) {
    let app = setup_test_app(pool.clone());
    let admin_id = common::create_admin(&pool, "root", "root-pass").await;
    let config = test_jwt_config();
    let now = Utc::now().timestamp();

    // Issued so that it still has a minute left.
    let fresh = create_access_token_at(admin_id, Role::Admin, &config, now - TEST_EXPIRY + 60).unwrap();
    let (status, _) = send(&app, Method::GET, "/api/students", Some(&fresh), None).await;
    assert_eq!(status, StatusCode::OK);

    // Expired a second ago.
    let stale = create_access_token_at(admin_id, Role::Admin, &config, now - TEST_EXPIRY - 1).unwrap();
    let (status, body) = send(&app, Method::GET, "/api/students", Some(&stale), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Token expired.");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_malformed_and_foreign_tokens_are_invalid(pool: PgPool) {
    let app = setup_test_app(pool.clone());
    let admin_id = common::create_admin(&pool, "root", "root-pass").await;

    let (status, body) = send(&app, Method::GET, "/api/students", Some("not.a.token"), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Invalid token.");

    let mut other = test_jwt_config();
    other.secret = "some-other-secret".to_string();
    let forged = create_access_token_at(admin_id, Role::Admin, &other, Utc::now().timestamp()).unwrap();
    let (status, body) = send(&app, Method::GET, "/api/students", Some(&forged), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Invalid token.");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_token_of_deleted_user_is_rejected(pool: PgPool) {
    let course_id = create_course(&pool, "Algorithms", "CS201", 4).await;
    let app = setup_test_app(pool.clone());
    let data = register_student(&app, "Ada Lovelace", "ada@example.com", "ada", course_id).await;
    let student_token = data["token"].as_str().unwrap().to_string();
    let student_id = data["user"]["studentId"].as_i64().unwrap();

    let admin = admin_token(&app, &pool).await;
    let (status, _) = send(
        &app,
        Method::DELETE,
        &format!("/api/students/{}", student_id),
        Some(&admin),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) =
        send(&app, Method::GET, "/api/students/me", Some(&student_token), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Invalid token. User not found.");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_login_requires_both_fields(pool: PgPool) {
    let app = setup_test_app(pool);

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/auth/login",
        None,
        Some(json!({"username": "ada"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "password is required");

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/auth/login",
        None,
        Some(json!({"username": "   ", "password": ""})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Password is required, Username is required");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_registered_student_can_log_in(pool: PgPool) {
    let course_id = create_course(&pool, "Algorithms", "CS201", 4).await;
    let app = setup_test_app(pool.clone());
    register_student(&app, "Grace Hopper", "grace@example.com", "grace", course_id).await;

    let token = login(&app, "grace", "password123").await;
    assert!(!token.is_empty());
}
