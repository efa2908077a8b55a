#![allow(dead_code)]

use axum::Router;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode, header};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use sqlx::PgPool;
use tower::ServiceExt;

use coursedesk::router::init_router;
use coursedesk::state::AppState;
use coursedesk_auth::Role;
use coursedesk_config::{CorsConfig, Environment, JwtConfig, PasswordConfig};
use coursedesk_core::password::hash_password;

pub const TEST_SECRET: &str = "integration-test-secret";
pub const TEST_EXPIRY: i64 = 3600;

pub fn test_jwt_config() -> JwtConfig {
    JwtConfig {
        secret: TEST_SECRET.to_string(),
        expiry_seconds: TEST_EXPIRY,
    }
}

pub fn test_state(pool: PgPool) -> AppState {
    AppState {
        db: pool,
        jwt_config: test_jwt_config(),
        // Lowest cost bcrypt accepts; keeps the suite fast.
        password_config: PasswordConfig { bcrypt_cost: 4 },
        cors_config: CorsConfig {
            allowed_origins: vec!["*".to_string()],
        },
        environment: Environment::Test,
    }
}

pub fn setup_test_app(pool: PgPool) -> Router {
    init_router(test_state(pool))
}

/// Sends one request through the router and returns the status and JSON body.
pub async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

pub async fn create_course(pool: &PgPool, name: &str, code: &str, duration: i32) -> i64 {
    sqlx::query_scalar(
        r#"INSERT INTO courses (course_name, course_code, course_duration)
           VALUES ($1, $2, $3)
           RETURNING course_id"#,
    )
    .bind(name)
    .bind(code)
    .bind(duration)
    .fetch_one(pool)
    .await
    .unwrap()
}

pub async fn create_admin(pool: &PgPool, username: &str, password: &str) -> i64 {
    let hashed = hash_password(password, 4).unwrap();
    sqlx::query_scalar(
        r#"INSERT INTO users (username, password, role)
           VALUES ($1, $2, $3)
           RETURNING user_id"#,
    )
    .bind(username)
    .bind(hashed)
    .bind(Role::Admin.as_str())
    .fetch_one(pool)
    .await
    .unwrap()
}

/// Logs in and returns the token.
pub async fn login(app: &Router, username: &str, password: &str) -> String {
    let (status, body) = send(
        app,
        Method::POST,
        "/api/auth/login",
        None,
        Some(json!({"username": username, "password": password})),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "login failed: {body}");
    body["data"]["token"].as_str().unwrap().to_string()
}

pub async fn admin_token(app: &Router, pool: &PgPool) -> String {
    create_admin(pool, "admin", "admin-pass").await;
    login(app, "admin", "admin-pass").await
}

/// Registers a student through the API and returns the response data.
pub async fn register_student(
    app: &Router,
    name: &str,
    email: &str,
    username: &str,
    course_id: i64,
) -> Value {
    let (status, body) = send(
        app,
        Method::POST,
        "/api/auth/register",
        None,
        Some(json!({
            "name": name,
            "email": email,
            "username": username,
            "password": "password123",
            "course_id": course_id
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "registration failed: {body}");
    body["data"].clone()
}

pub async fn count_rows(pool: &PgPool, table: &str) -> i64 {
    sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {}", table))
        .fetch_one(pool)
        .await
        .unwrap()
}
