//! HTTP registration flow against an in-memory store:
//! 1) Serve the router on a local port.
//! 2) Register patients and doctors over HTTP.
//! 3) Check wire responses and what ended up in the store.

use ehealth_registry::{
    transport, AccountKind, AccountStore, InMemoryAccountStore, PasswordHasher, Registrar,
};
use serde_json::{json, Value};
use std::sync::Arc;

struct TestServer {
    base_url: String,
    store: Arc<InMemoryAccountStore>,
    hasher: PasswordHasher,
    handle: tokio::task::JoinHandle<()>,
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

async fn spawn_server() -> TestServer {
    let store = Arc::new(InMemoryAccountStore::new());
    let hasher = PasswordHasher::new(1024, 1).expect("valid params");
    let state = transport::http::AppState {
        registrar: Registrar::new(store.clone(), hasher.clone()),
        store: store.clone(),
    };
    let router = transport::http::create_router(state);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let handle = tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    TestServer {
        base_url: format!("http://{}", addr),
        store,
        hasher,
        handle,
    }
}

async fn post_json(base_url: &str, path: &str, body: Value) -> (u16, Value) {
    let resp = reqwest::Client::new()
        .post(format!("{}{}", base_url, path))
        .json(&body)
        .send()
        .await
        .unwrap();
    let status = resp.status().as_u16();
    (status, resp.json::<Value>().await.unwrap())
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_patient_register_then_exist() {
    let server = spawn_server().await;
    let body = json!({"email": "a@x.com", "password": "secret1"});

    let (status, resp) = post_json(&server.base_url, "/patient/register", body.clone()).await;
    assert_eq!(status, 200);
    assert_eq!(resp, json!({"status": "done"}));

    let (status, resp) = post_json(&server.base_url, "/patient/register", body).await;
    assert_eq!(status, 200);
    assert_eq!(resp, json!({"status": "exist"}));

    assert_eq!(server.store.count(AccountKind::Patient).await.unwrap(), 1);
    let account = server
        .store
        .find_by_email(AccountKind::Patient, "a@x.com")
        .await
        .unwrap()
        .unwrap();
    assert_ne!(account.password_hash, "secret1");
    assert!(server.hasher.verify("secret1", &account.password_hash).unwrap());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_doctor_register_is_independent_of_patients() {
    let server = spawn_server().await;
    let body = json!({"email": "a@x.com", "password": "secret1"});

    post_json(&server.base_url, "/patient/register", body.clone()).await;
    let (status, resp) = post_json(&server.base_url, "/doctor/register", body.clone()).await;
    assert_eq!(status, 200);
    assert_eq!(resp["status"], "done");

    let (_, resp) = post_json(&server.base_url, "/doctor/register", body).await;
    assert_eq!(resp["status"], "exist");

    assert_eq!(server.store.count(AccountKind::Patient).await.unwrap(), 1);
    assert_eq!(server.store.count(AccountKind::Doctor).await.unwrap(), 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_http_registrations() {
    let server = spawn_server().await;

    let mut handles = Vec::new();
    for i in 0..8 {
        let base_url = server.base_url.clone();
        handles.push(tokio::spawn(async move {
            let body = json!({"email": "same@x.com", "password": format!("pw-{}", i)});
            post_json(&base_url, "/doctor/register", body).await
        }));
    }

    let mut statuses = Vec::new();
    for handle in handles {
        let (code, resp) = handle.await.unwrap();
        assert_eq!(code, 200);
        statuses.push(resp["status"].as_str().unwrap().to_string());
    }

    assert_eq!(statuses.iter().filter(|s| *s == "done").count(), 1);
    assert_eq!(statuses.iter().filter(|s| *s == "exist").count(), 7);
    assert_eq!(server.store.count(AccountKind::Doctor).await.unwrap(), 1);
}

#[tokio::test]
async fn test_empty_email_is_bad_request() {
    let server = spawn_server().await;

    let (status, resp) = post_json(
        &server.base_url,
        "/patient/register",
        json!({"email": "", "password": "secret1"}),
    )
    .await;
    assert_eq!(status, 400);
    assert!(resp["message"].as_str().unwrap().contains("email"));
    assert_eq!(server.store.count(AccountKind::Patient).await.unwrap(), 0);
}

#[tokio::test]
async fn test_padded_email_is_registered_verbatim() {
    let server = spawn_server().await;

    let (status, resp) = post_json(
        &server.base_url,
        "/patient/register",
        json!({"email": " a@x.com ", "password": "secret1"}),
    )
    .await;
    assert_eq!(status, 200);
    assert_eq!(resp, json!({"status": "done"}));

    let account = server
        .store
        .find_by_email(AccountKind::Patient, " a@x.com ")
        .await
        .unwrap();
    assert!(account.is_some());
}

#[tokio::test]
async fn test_missing_password_is_unprocessable() {
    let server = spawn_server().await;

    let (status, resp) = post_json(
        &server.base_url,
        "/doctor/register",
        json!({"email": "d@x.com"}),
    )
    .await;
    assert_eq!(status, 422);
    assert!(resp["message"].as_str().unwrap().starts_with("Invalid JSON body"));
}

#[tokio::test]
async fn test_store_failure_returns_generic_500() {
    let server = spawn_server().await;
    server.store.close().await;

    let (status, resp) = post_json(
        &server.base_url,
        "/patient/register",
        json!({"email": "a@x.com", "password": "secret1"}),
    )
    .await;
    assert_eq!(status, 500);
    assert_eq!(resp, json!({"message": "Internal server error."}));
}

#[tokio::test]
async fn test_health_reflects_store_state() {
    let server = spawn_server().await;
    let client = reqwest::Client::new();

    let resp = client
        .get(format!("{}/health", server.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status().as_u16(), 200);
    assert_eq!(resp.json::<Value>().await.unwrap(), json!({"status": "ok"}));

    server.store.close().await;
    let resp = client
        .get(format!("{}/health", server.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status().as_u16(), 503);
}
