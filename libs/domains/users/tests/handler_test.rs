//! Handler tests for the Users domain
//!
//! These drive `handlers::router` with `oneshot` against the in-memory repository and
//! check status codes, bodies and error details. The full application (docs, health,
//! CORS) is not involved.

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum_helpers::ErrorResponse;
use domain_users::*;
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt; // For oneshot()

fn app() -> Router {
    handlers::router(UserService::new(InMemoryUserRepository::new()))
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Vec<u8>) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(value) => {
            builder = builder.header("content-type", "application/json");
            Body::from(serde_json::to_vec(&value).unwrap())
        }
        None => Body::empty(),
    };

    let response = app.clone().oneshot(builder.body(body).unwrap()).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, bytes.to_vec())
}

fn parse<T: serde::de::DeserializeOwned>(bytes: &[u8]) -> T {
    serde_json::from_slice(bytes).unwrap()
}

async fn create(app: &Router, email: &str, username: &str) -> User {
    let (status, bytes) = send(
        app,
        "POST",
        "/users/",
        Some(json!({"email": email, "username": username})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    parse(&bytes)
}

#[tokio::test]
async fn test_scenario_create_update_delete_read() {
    let app = app();

    let (status, bytes) = send(
        &app,
        "POST",
        "/users/",
        Some(json!({"email": "a@x.com", "username": "abc"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let created: Value = parse(&bytes);
    assert_eq!(created["is_active"], true);
    assert!(created["updated_at"].is_null());
    assert!(created["full_name"].is_null());
    let id = created["id"].as_i64().unwrap();

    let (status, bytes) = send(&app, "PUT", &format!("/users/{}", id), Some(json!({"full_name": "X"}))).await;
    assert_eq!(status, StatusCode::OK);
    let updated: User = parse(&bytes);
    assert_eq!(updated.full_name.as_deref(), Some("X"));
    assert_eq!(updated.email, "a@x.com");
    assert!(updated.updated_at.is_some());

    let (status, bytes) = send(&app, "DELETE", &format!("/users/{}", id), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert!(bytes.is_empty());

    let (status, bytes) = send(&app, "GET", &format!("/users/{}", id), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let error: ErrorResponse = parse(&bytes);
    assert_eq!(error.detail, format!("User with ID {} not found", id));
}

#[tokio::test]
async fn test_collection_served_with_and_without_trailing_slash() {
    let app = app();
    create(&app, "a@x.com", "abc").await;

    let (status, bytes) = send(&app, "GET", "/users", None).await;
    assert_eq!(status, StatusCode::OK);
    let users: Vec<User> = parse(&bytes);
    assert_eq!(users.len(), 1);

    let (status, _) = send(
        &app,
        "POST",
        "/users",
        Some(json!({"email": "b@x.com", "username": "bcd"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
}

#[tokio::test]
async fn test_round_trip_returns_supplied_fields() {
    let app = app();
    let (status, bytes) = send(
        &app,
        "POST",
        "/users/",
        Some(json!({"email": "a@x.com", "username": "abc", "full_name": "Ada", "is_active": false})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let created: User = parse(&bytes);

    let (status, bytes) = send(&app, "GET", &format!("/users/{}", created.id), None).await;
    assert_eq!(status, StatusCode::OK);
    let fetched: User = parse(&bytes);

    assert_eq!(fetched, created);
    assert_eq!(fetched.full_name.as_deref(), Some("Ada"));
    assert!(!fetched.is_active);
}

#[tokio::test]
async fn test_duplicate_email_is_400_naming_email() {
    let app = app();
    create(&app, "a@x.com", "abc").await;

    let (status, bytes) = send(
        &app,
        "POST",
        "/users/",
        Some(json!({"email": "a@x.com", "username": "other"})),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let error: ErrorResponse = parse(&bytes);
    assert_eq!(error.error, "CONFLICT");
    assert_eq!(error.detail, "Email 'a@x.com' already registered");
}

#[tokio::test]
async fn test_duplicate_username_is_400_naming_username() {
    let app = app();
    create(&app, "a@x.com", "abc").await;

    let (status, bytes) = send(
        &app,
        "POST",
        "/users/",
        Some(json!({"email": "b@x.com", "username": "abc"})),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let error: ErrorResponse = parse(&bytes);
    assert_eq!(error.detail, "Username 'abc' already taken");
}

#[tokio::test]
async fn test_username_boundaries() {
    let app = app();

    for (i, (len, expected)) in [
        (2, StatusCode::UNPROCESSABLE_ENTITY),
        (3, StatusCode::CREATED),
        (50, StatusCode::CREATED),
        (51, StatusCode::UNPROCESSABLE_ENTITY),
    ]
    .into_iter()
    .enumerate()
    {
        let username = format!("{}{}", i, "u".repeat(len - 1));
        let (status, bytes) = send(
            &app,
            "POST",
            "/users/",
            Some(json!({"email": format!("u{}@x.com", i), "username": username})),
        )
        .await;
        assert_eq!(status, expected, "username of {} chars", len);

        if expected == StatusCode::UNPROCESSABLE_ENTITY {
            let error: ErrorResponse = parse(&bytes);
            assert!(error.detail.contains("username"), "{}", error.detail);
        }
    }
}

#[tokio::test]
async fn test_full_name_boundaries() {
    let app = app();

    let (status, _) = send(
        &app,
        "POST",
        "/users/",
        Some(json!({"email": "a@x.com", "username": "abc", "full_name": "n".repeat(100)})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, bytes) = send(
        &app,
        "POST",
        "/users/",
        Some(json!({"email": "b@x.com", "username": "bcd", "full_name": "n".repeat(101)})),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    let error: ErrorResponse = parse(&bytes);
    assert!(error.detail.contains("full_name"));
}

#[tokio::test]
async fn test_structural_failures_are_422() {
    let app = app();

    for body in [
        json!({"username": "abc"}),
        json!({"email": "a@x.com"}),
        json!({"email": "not-an-email", "username": "abc"}),
        json!({"email": "", "username": "abc"}),
        json!({"email": "a@x.com", "username": 42}),
        json!({"email": "a@x.com", "username": "abc", "is_active": "yes"}),
    ] {
        let (status, _) = send(&app, "POST", "/users/", Some(body.clone())).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY, "{}", body);
    }
}

#[tokio::test]
async fn test_non_positive_id_is_400() {
    let app = app();

    for method in ["GET", "DELETE"] {
        for id in ["0", "-1"] {
            let (status, bytes) = send(&app, method, &format!("/users/{}", id), None).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "{} /users/{}", method, id);
            let error: ErrorResponse = parse(&bytes);
            assert_eq!(error.detail, "User ID must be a positive integer");
        }
    }
}

#[tokio::test]
async fn test_non_integer_id_is_422() {
    let app = app();

    let (status, bytes) = send(&app, "GET", "/users/abc", None).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    let error: ErrorResponse = parse(&bytes);
    assert_eq!(error.detail, "Invalid ID 'abc': must be an integer");
}

#[tokio::test]
async fn test_delete_twice_then_404() {
    let app = app();
    let user = create(&app, "a@x.com", "abc").await;
    let uri = format!("/users/{}", user.id);

    let (status, _) = send(&app, "DELETE", &uri, None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = send(&app, "DELETE", &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_pagination_bounds() {
    let app = app();
    for i in 0..5 {
        create(&app, &format!("u{}@x.com", i), &format!("user{}", i)).await;
    }

    let (status, bytes) = send(&app, "GET", "/users/?skip=0&limit=1", None).await;
    assert_eq!(status, StatusCode::OK);
    let users: Vec<User> = parse(&bytes);
    assert_eq!(users.len(), 1);

    let (status, bytes) = send(&app, "GET", "/users/?skip=1000&limit=100", None).await;
    assert_eq!(status, StatusCode::OK);
    let users: Vec<User> = parse(&bytes);
    assert!(users.is_empty());

    let (status, bytes) = send(&app, "GET", "/users/", None).await;
    assert_eq!(status, StatusCode::OK);
    let users: Vec<User> = parse(&bytes);
    let ids: Vec<i64> = users.iter().map(|u| u.id).collect();
    assert_eq!(ids, vec![1, 2, 3, 4, 5]);

    for (query, detail) in [
        ("skip=-1", "Parameter 'skip' must be >= 0"),
        ("limit=0", "Parameter 'limit' must be between 1 and 1000"),
        ("limit=1001", "Parameter 'limit' must be between 1 and 1000"),
    ] {
        let (status, bytes) = send(&app, "GET", &format!("/users/?{}", query), None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{}", query);
        let error: ErrorResponse = parse(&bytes);
        assert_eq!(error.error, "INVALID_ARGUMENT");
        assert_eq!(error.detail, detail);
    }

    let (status, _) = send(&app, "GET", "/users/?limit=many", None).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_update_empty_body_is_400() {
    let app = app();
    let user = create(&app, "a@x.com", "abc").await;

    let (status, bytes) = send(&app, "PUT", &format!("/users/{}", user.id), Some(json!({}))).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let error: ErrorResponse = parse(&bytes);
    assert_eq!(error.detail, "At least one field must be provided for update");
}

#[tokio::test]
async fn test_update_missing_user_is_404() {
    let app = app();

    let (status, bytes) = send(&app, "PUT", "/users/77", Some(json!({"is_active": false}))).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    let error: ErrorResponse = parse(&bytes);
    assert_eq!(error.detail, "User with ID 77 not found");
}

#[tokio::test]
async fn test_update_to_other_users_email_is_conflict() {
    let app = app();
    let a = create(&app, "a@x.com", "abc").await;
    create(&app, "b@x.com", "bcd").await;

    let (status, bytes) = send(
        &app,
        "PUT",
        &format!("/users/{}", a.id),
        Some(json!({"email": "b@x.com"})),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let error: ErrorResponse = parse(&bytes);
    assert_eq!(error.detail, "Email 'b@x.com' already registered");
}

#[tokio::test]
async fn test_self_update_is_200() {
    let app = app();
    let a = create(&app, "a@x.com", "abc").await;

    let (status, _) = send(
        &app,
        "PUT",
        &format!("/users/{}", a.id),
        Some(json!({"email": "a@x.com", "username": "abc"})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_update_null_semantics() {
    let app = app();
    let (_, bytes) = send(
        &app,
        "POST",
        "/users/",
        Some(json!({"email": "a@x.com", "username": "abc", "full_name": "Ada"})),
    )
    .await;
    let user: User = parse(&bytes);
    let uri = format!("/users/{}", user.id);

    // null clears the nullable field
    let (status, bytes) = send(&app, "PUT", &uri, Some(json!({"full_name": null}))).await;
    assert_eq!(status, StatusCode::OK);
    let updated: User = parse(&bytes);
    assert!(updated.full_name.is_none());

    // null on a required field is a decoding failure
    let (status, _) = send(&app, "PUT", &uri, Some(json!({"email": null}))).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    // invalid values are structural even when other fields are fine
    let (status, bytes) = send(
        &app,
        "PUT",
        &uri,
        Some(json!({"username": "ab", "is_active": false})),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    let error: ErrorResponse = parse(&bytes);
    assert!(error.detail.contains("username"));

    let (_, bytes) = send(&app, "GET", &uri, None).await;
    let current: User = parse(&bytes);
    assert!(current.is_active, "rejected update must not apply");
}

#[tokio::test]
async fn test_missing_content_type_is_unprocessable() {
    let app = app();
    let request = Request::builder()
        .method("POST")
        .uri("/users/")
        .body(Body::from(r#"{"email":"a@x.com","username":"abc"}"#))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}
