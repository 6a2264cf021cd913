//! Racing writers against one email or username.
//!
//! Every write goes through the HTTP router so the status codes are checked too.
//! Exactly one writer may win; which one is not specified.

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum_helpers::ErrorResponse;
use domain_users::*;
use futures::future::join_all;
use http_body_util::BodyExt;
use serde_json::{Value, json};
use test_utils::assertions::assert_single_winner;
use tower::ServiceExt;

const RACERS: usize = 16;

async fn send(app: Router, method: &'static str, uri: String, body: Value) -> (StatusCode, Vec<u8>) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_vec(&body).unwrap()))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, bytes.to_vec())
}

async fn race(app: &Router, requests: Vec<(&'static str, String, Value)>) -> Vec<(StatusCode, Vec<u8>)> {
    let handles: Vec<_> = requests
        .into_iter()
        .map(|(method, uri, body)| tokio::spawn(send(app.clone(), method, uri, body)))
        .collect();

    join_all(handles)
        .await
        .into_iter()
        .map(|joined| joined.unwrap())
        .collect()
}

fn outcome(status: StatusCode, expected: StatusCode) -> Result<(), StatusCode> {
    if status == expected { Ok(()) } else { Err(status) }
}

fn assert_losers_conflict(results: &[(StatusCode, Vec<u8>)]) {
    for (status, bytes) in results.iter().filter(|(s, _)| !s.is_success()) {
        assert_eq!(*status, StatusCode::BAD_REQUEST);
        let error: ErrorResponse = serde_json::from_slice(bytes).unwrap();
        assert_eq!(error.error, "CONFLICT");
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_creates_with_same_email_have_one_winner() {
    let repo = InMemoryUserRepository::new();
    let app = handlers::router(UserService::new(repo.clone()));

    let requests = (0..RACERS)
        .map(|i| {
            (
                "POST",
                "/users/".to_string(),
                json!({"email": "race@x.com", "username": format!("racer{}", i)}),
            )
        })
        .collect();
    let results = race(&app, requests).await;

    let outcomes: Vec<_> = results
        .iter()
        .map(|(status, _)| outcome(*status, StatusCode::CREATED))
        .collect();
    let losers = assert_single_winner(&outcomes, "shared email");
    assert_eq!(losers, RACERS - 1);
    assert_losers_conflict(&results);
    assert_eq!(repo.len().await, 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_creates_with_same_username_have_one_winner() {
    let repo = InMemoryUserRepository::new();
    let app = handlers::router(UserService::new(repo.clone()));

    let requests = (0..RACERS)
        .map(|i| {
            (
                "POST",
                "/users/".to_string(),
                json!({"email": format!("racer{}@x.com", i), "username": "contested"}),
            )
        })
        .collect();
    let results = race(&app, requests).await;

    let outcomes: Vec<_> = results
        .iter()
        .map(|(status, _)| outcome(*status, StatusCode::CREATED))
        .collect();
    assert_single_winner(&outcomes, "shared username");
    assert_losers_conflict(&results);
    assert_eq!(repo.len().await, 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_updates_to_same_email_have_one_winner() {
    let repo = InMemoryUserRepository::new();
    let service = UserService::new(repo.clone());

    let mut ids = Vec::new();
    for i in 0..RACERS {
        let user = service
            .create_user(CreateUser::new(format!("owner{}@x.com", i), format!("owner{}", i)))
            .await
            .unwrap();
        ids.push(user.id);
    }
    let app = handlers::router(service);

    let requests = ids
        .iter()
        .map(|id| ("PUT", format!("/users/{}", id), json!({"email": "target@x.com"})))
        .collect();
    let results = race(&app, requests).await;

    let outcomes: Vec<_> = results
        .iter()
        .map(|(status, _)| outcome(*status, StatusCode::OK))
        .collect();
    assert_single_winner(&outcomes, "retargeted email");
    assert_losers_conflict(&results);

    let holders = repo
        .list(0, 1000)
        .await
        .unwrap()
        .into_iter()
        .filter(|u| u.email == "target@x.com")
        .count();
    assert_eq!(holders, 1);
}
