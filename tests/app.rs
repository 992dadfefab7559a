use async_trait::async_trait;
use axum::Router;
use chrono::{Duration, Utc};
use prune_mail::{
    app::AppState,
    db::{self, EmailStore},
    error::TransportError,
    http,
    service::{EmailService, FailurePolicy},
    smtp::{Envelope, MailTransport, OfflineMailer},
};
use serde_json::json;
use sqlx::{sqlite::SqlitePoolOptions, SqlitePool};
use std::sync::Arc;
use tokio::task::JoinHandle;

const FROM: &str = "noreply@prune.test";
const ORIGIN: &str = "http://localhost:4200";

struct BrokenRelay;

#[async_trait]
impl MailTransport for BrokenRelay {
    async fn send(&self, _: &Envelope) -> Result<(), TransportError> {
        Err(TransportError::Build(lettre::error::Error::MissingTo))
    }

    fn is_configured(&self) -> bool {
        true
    }
}

async fn memory_pool() -> SqlitePool {
    let db_url = db::ensure_sqlite_path("sqlite://:memory:");
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect(&db_url)
        .await
        .expect("connect memory sqlite");
    db::run_migrations(&pool).await.expect("migrate");
    pool
}

async fn serve(
    pool: SqlitePool,
    transport: Arc<dyn MailTransport>,
    policy: FailurePolicy,
) -> (String, JoinHandle<()>) {
    let emails = EmailService::new(EmailStore::new(pool), transport, FROM, policy);
    let app: Router = http::build_router(AppState { emails }, ORIGIN).expect("router");

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let handle = tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    (format!("http://{}/api/emails", addr), handle)
}

async fn start_server_with(
    transport: Arc<dyn MailTransport>,
    policy: FailurePolicy,
) -> (String, EmailStore, JoinHandle<()>) {
    let pool = memory_pool().await;
    let store = EmailStore::new(pool.clone());
    let (base, handle) = serve(pool, transport, policy).await;
    (base, store, handle)
}

async fn start_server() -> (String, JoinHandle<()>) {
    let (base, _, handle) =
        start_server_with(Arc::new(OfflineMailer), FailurePolicy::default()).await;
    (base, handle)
}

#[tokio::test]
async fn send_offline_returns_sent_record() {
    let (base, _srv) = start_server().await;
    let client = reqwest::Client::new();

    let payload = json!({ "to": "a@b.com", "subject": "Hi", "body": "Hello", "isHtml": false });
    let res = client
        .post(format!("{}/send", base))
        .json(&payload)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), reqwest::StatusCode::OK);
    let v: serde_json::Value = res.json().await.unwrap();
    assert_eq!(v["status"], "SENT");
    assert_eq!(v["type"], "SENT");
    assert_eq!(v["toEmail"], "a@b.com");
    assert_eq!(v["fromEmail"], FROM);
    assert!(v["sentDate"].is_string());
    assert!(v["receivedDate"].is_null());
    let id = v["id"].as_i64().unwrap();

    let res = client.get(format!("{}/{}", base, id)).send().await.unwrap();
    assert!(res.status().is_success());
    let fetched: serde_json::Value = res.json().await.unwrap();
    assert_eq!(fetched["subject"], "Hi");
    assert_eq!(fetched["body"], "Hello");
}

#[tokio::test]
async fn two_drafts_are_listed() {
    let (base, _srv) = start_server().await;
    let client = reqwest::Client::new();

    for subj in ["First", "Second"] {
        let payload = json!({
            "to": "you@example.test",
            "cc": "boss@example.test",
            "subject": subj,
            "body": "",
        });
        let res = client
            .post(format!("{}/draft", base))
            .json(&payload)
            .send()
            .await
            .unwrap();
        assert!(res.status().is_success());
        let v: serde_json::Value = res.json().await.unwrap();
        assert_eq!(v["ccEmail"], "boss@example.test");
        assert!(v["sentDate"].is_null());
    }

    let res = client.get(format!("{}/drafts", base)).send().await.unwrap();
    assert!(res.status().is_success());
    let arr: serde_json::Value = res.json().await.unwrap();
    let arr = arr.as_array().unwrap();
    assert_eq!(arr.len(), 2);
    assert!(arr.iter().all(|d| d["status"] == "DRAFT" && d["type"] == "DRAFT"));

    let res = client.get(format!("{}/sent", base)).send().await.unwrap();
    let sent: serde_json::Value = res.json().await.unwrap();
    assert!(sent.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn listings_by_type_and_all() {
    let (base, _srv) = start_server().await;
    let client = reqwest::Client::new();

    for subj in ["One", "Two"] {
        let payload = json!({ "to": "you@example.test", "subject": subj, "body": "x" });
        let res = client
            .post(format!("{}/send", base))
            .json(&payload)
            .send()
            .await
            .unwrap();
        assert!(res.status().is_success());
    }
    let payload = json!({ "to": "you@example.test", "subject": "Later", "body": "x" });
    client
        .post(format!("{}/draft", base))
        .json(&payload)
        .send()
        .await
        .unwrap();

    let all: serde_json::Value = client.get(&base).send().await.unwrap().json().await.unwrap();
    assert_eq!(all.as_array().unwrap().len(), 3);

    let sent: serde_json::Value = client
        .get(format!("{}/sent", base))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let sent = sent.as_array().unwrap();
    assert_eq!(sent.len(), 2);
    // newest first
    assert_eq!(sent[0]["subject"], "Two");
    assert_eq!(sent[1]["subject"], "One");

    let received: serde_json::Value = client
        .get(format!("{}/received", base))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(received.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn unknown_id_is_404_and_delete_is_204() {
    let (base, _srv) = start_server().await;
    let client = reqwest::Client::new();

    let res = client.get(format!("{}/999", base)).send().await.unwrap();
    assert_eq!(res.status(), reqwest::StatusCode::NOT_FOUND);

    let payload = json!({ "to": "you@example.test", "subject": "Bye", "body": "" });
    let v: serde_json::Value = client
        .post(format!("{}/send", base))
        .json(&payload)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let id = v["id"].as_i64().unwrap();

    let res = client.delete(format!("{}/{}", base, id)).send().await.unwrap();
    assert_eq!(res.status(), reqwest::StatusCode::NO_CONTENT);
    let res = client.get(format!("{}/{}", base, id)).send().await.unwrap();
    assert_eq!(res.status(), reqwest::StatusCode::NOT_FOUND);

    // deleting again is still a success
    let res = client.delete(format!("{}/{}", base, id)).send().await.unwrap();
    assert_eq!(res.status(), reqwest::StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn failed_delivery_follows_policy() {
    let client = reqwest::Client::new();
    let payload = json!({
        "to": "a@b.com",
        "cc": "c@d.com",
        "subject": "Hi",
        "body": "Hello",
        "isHtml": true,
    });

    let (base, store, _srv) =
        start_server_with(Arc::new(BrokenRelay), FailurePolicy::RecordSent).await;
    let res = client
        .post(format!("{}/send", base))
        .json(&payload)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), reqwest::StatusCode::OK);
    let v: serde_json::Value = res.json().await.unwrap();
    assert_eq!(v["status"], "SENT");
    assert!(v["ccEmail"].is_null());
    assert_eq!(store.count().await.unwrap(), 1);

    let (base, _, _srv2) =
        start_server_with(Arc::new(BrokenRelay), FailurePolicy::RecordFailed).await;
    let v: serde_json::Value = client
        .post(format!("{}/send", base))
        .json(&payload)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(v["status"], "FAILED");
    assert_eq!(v["type"], "SENT");
}

#[tokio::test]
async fn address_and_date_range_queries() {
    let (base, store, _srv) =
        start_server_with(Arc::new(OfflineMailer), FailurePolicy::default()).await;
    db::seed_demo_data(&store).await.unwrap();
    let client = reqwest::Client::new();

    let res = client
        .get(format!("{}/address/john.doe@example.com", base))
        .send()
        .await
        .unwrap();
    assert!(res.status().is_success());
    let arr: serde_json::Value = res.json().await.unwrap();
    assert_eq!(arr.as_array().unwrap().len(), 1);

    let now = Utc::now();
    let res = client
        .get(format!("{}/between", base))
        .query(&[
            ("start", (now - Duration::days(3)).to_rfc3339()),
            ("end", now.to_rfc3339()),
        ])
        .send()
        .await
        .unwrap();
    assert!(res.status().is_success());
    let arr: serde_json::Value = res.json().await.unwrap();
    let arr = arr.as_array().unwrap();
    assert_eq!(arr.len(), 2);
    assert_eq!(arr[0]["subject"], "Monthly report");

    let res = client
        .get(format!("{}/between?start=yesterday", base))
        .send()
        .await
        .unwrap();
    assert!(res.status().is_client_error());
}

#[tokio::test]
async fn malformed_body_is_rejected() {
    let (base, _srv) = start_server().await;
    let client = reqwest::Client::new();
    let res = client
        .post(format!("{}/send", base))
        .json(&json!({ "subject": "no recipient" }))
        .send()
        .await
        .unwrap();
    assert!(res.status().is_client_error());
}

#[tokio::test]
async fn null_body_is_stored_empty() {
    let (base, _srv) = start_server().await;
    let client = reqwest::Client::new();

    for path in ["draft", "send"] {
        let res = client
            .post(format!("{}/{}", base, path))
            .json(&json!({ "to": "a@b.com", "subject": "Hi", "body": null }))
            .send()
            .await
            .unwrap();
        assert_eq!(res.status(), reqwest::StatusCode::OK, "{path}");
        let v: serde_json::Value = res.json().await.unwrap();
        assert_eq!(v["body"], "");
    }
}

#[tokio::test]
async fn store_failure_is_bare_500() {
    let pool = memory_pool().await;
    let (base, _srv) = serve(
        pool.clone(),
        Arc::new(OfflineMailer),
        FailurePolicy::default(),
    )
    .await;
    pool.close().await;
    let client = reqwest::Client::new();
    let payload = json!({ "to": "a@b.com", "subject": "Hi", "body": "Hello" });

    let requests = [
        client.post(format!("{}/send", base)).json(&payload),
        client.post(format!("{}/draft", base)).json(&payload),
        client.get(format!("{}/sent", base)),
        client.get(format!("{}/1", base)),
        client.delete(format!("{}/1", base)),
    ];
    for req in requests {
        let res = req.send().await.unwrap();
        assert_eq!(res.status(), reqwest::StatusCode::INTERNAL_SERVER_ERROR);
        assert!(res.bytes().await.unwrap().is_empty());
    }
}

#[tokio::test]
async fn cors_allows_configured_origin() {
    let (base, _srv) = start_server().await;
    let client = reqwest::Client::new();

    let res = client
        .get(format!("{}/sent", base))
        .header("Origin", ORIGIN)
        .send()
        .await
        .unwrap();
    assert_eq!(
        res.headers()
            .get("access-control-allow-origin")
            .and_then(|v| v.to_str().ok()),
        Some(ORIGIN)
    );

    let res = client
        .get(format!("{}/sent", base))
        .header("Origin", "http://evil.example")
        .send()
        .await
        .unwrap();
    assert!(res.headers().get("access-control-allow-origin").is_none());
}
