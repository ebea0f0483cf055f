//! HTTP integration tests for the DagBok server.
//!
//! Runs the full router against an in-memory database. The summarization
//! client is left without a credential here; summary behavior against a live
//! (mocked) endpoint is covered in summary_integration.rs.

use std::sync::Arc;

use axum::http::StatusCode;
use axum::Router;
use axum_test::TestServer;
use chrono::{DateTime, TimeZone, Utc};
use serde_json::{json, Value};

use dagbok::config::LlmConfig;
use dagbok::services::LlmService;
use dagbok::{api, db, AppState};

async fn test_server() -> (TestServer, db::DbPool) {
    let pool = db::init_pool(":memory:").await.unwrap();
    db::initialize_schema(&pool).await.unwrap();

    let llm = Arc::new(LlmService::new(&LlmConfig {
        base_url: "http://127.0.0.1:1".to_string(),
        model: "gpt-3.5-turbo".to_string(),
        api_key: None,
        max_tokens: 256,
    }));

    let state = AppState::from_parts(pool.clone(), llm, 256);
    let app = Router::new().merge(api::routes()).with_state(state);

    (TestServer::new(app).unwrap(), pool)
}

fn ts(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, mo, d, h, mi, 0).unwrap()
}

/// Insert a message with a fixed timestamp, bypassing the append operation
/// (which always stamps "now").
async fn insert_message_at(
    pool: &db::DbPool,
    content: &str,
    timestamp: DateTime<Utc>,
    project_id: Option<i64>,
    pinned: bool,
    archived: bool,
) -> i64 {
    let (id,): (i64,) = sqlx::query_as(
        r#"
        INSERT INTO messages (content, role, project_id, timestamp, pinned, archived)
        VALUES (?, 'user', ?, ?, ?, ?)
        RETURNING id
        "#,
    )
    .bind(content)
    .bind(project_id)
    .bind(timestamp)
    .bind(pinned)
    .bind(archived)
    .fetch_one(pool)
    .await
    .unwrap();
    id
}

fn message_ids(body: &Value) -> Vec<i64> {
    body["messages"]
        .as_array()
        .unwrap()
        .iter()
        .map(|m| m["id"].as_i64().unwrap())
        .collect()
}

// ============================================================================
// Health and status
// ============================================================================

#[tokio::test]
async fn test_health_and_status() {
    let (server, _pool) = test_server().await;

    let res = server.get("/health").await;
    res.assert_status_ok();
    let body: Value = res.json();
    assert_eq!(body["status"], "ok");

    let res = server.get("/status").await;
    res.assert_status_ok();
    let body: Value = res.json();
    assert_eq!(body["database_ok"], true);
    assert_eq!(body["summarizer_configured"], false);
    assert_eq!(body["messages"], 0);
}

// ============================================================================
// Projects
// ============================================================================

#[tokio::test]
async fn test_project_create_and_list() {
    let (server, _pool) = test_server().await;

    let res = server.post("/projects").json(&json!({"name": "Garden"})).await;
    res.assert_status_ok();
    let garden: Value = res.json();
    assert_eq!(garden["name"], "Garden");

    server
        .post("/projects")
        .json(&json!({"name": "Kitchen"}))
        .await
        .assert_status_ok();

    let res = server.get("/projects").await;
    res.assert_status_ok();
    let body: Value = res.json();
    assert_eq!(body["total"], 2);
    // Most recently created first
    assert_eq!(body["projects"][0]["name"], "Kitchen");

    let res = server.get(&format!("/projects/{}", garden["id"])).await;
    res.assert_status_ok();
}

#[tokio::test]
async fn test_project_validation_and_missing() {
    let (server, _pool) = test_server().await;

    let res = server.post("/projects").json(&json!({"name": "  "})).await;
    res.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = res.json();
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");

    let res = server.get("/projects/999").await;
    res.assert_status(StatusCode::NOT_FOUND);
}

// ============================================================================
// Appending messages
// ============================================================================

#[tokio::test]
async fn test_append_message() {
    let (server, _pool) = test_server().await;

    let res = server
        .post("/messages")
        .json(&json!({"content": "wrote the report"}))
        .await;
    res.assert_status_ok();
    let body: Value = res.json();
    assert_eq!(body["role"], "user");
    assert_eq!(body["pinned"], false);
    assert_eq!(body["archived"], false);

    let res = server
        .post("/messages")
        .json(&json!({"content": "summary text", "role": "assistant"}))
        .await;
    res.assert_status_ok();
    let body: Value = res.json();
    assert_eq!(body["role"], "assistant");
}

#[tokio::test]
async fn test_append_validation() {
    let (server, _pool) = test_server().await;

    let res = server.post("/messages").json(&json!({"content": ""})).await;
    res.assert_status(StatusCode::BAD_REQUEST);

    let res = server
        .post("/messages")
        .json(&json!({"content": "x", "role": "robot"}))
        .await;
    res.assert_status(StatusCode::BAD_REQUEST);

    let res = server
        .post("/messages")
        .json(&json!({"content": "x", "project_id": 99}))
        .await;
    res.assert_status(StatusCode::BAD_REQUEST);
}

// ============================================================================
// Filtered journal view
// ============================================================================

#[tokio::test]
async fn test_filter_by_date_descending() {
    let (server, pool) = test_server().await;

    let first = insert_message_at(&pool, "morning", ts(2024, 1, 1, 10, 0), None, false, false).await;
    let second = insert_message_at(&pool, "midday", ts(2024, 1, 1, 11, 0), None, true, false).await;
    insert_message_at(&pool, "other day", ts(2024, 1, 2, 9, 0), None, false, false).await;

    let res = server.get("/messages?date=2024-01-01").await;
    res.assert_status_ok();
    let body: Value = res.json();
    assert_eq!(message_ids(&body), vec![second, first]);
    assert_eq!(body["total"], 2);
    assert!(body["note"].is_null());
}

#[tokio::test]
async fn test_pinned_only_filter() {
    let (server, pool) = test_server().await;

    insert_message_at(&pool, "plain", ts(2024, 1, 1, 10, 0), None, false, false).await;
    let pinned = insert_message_at(&pool, "starred", ts(2024, 1, 1, 11, 0), None, true, false).await;

    let res = server.get("/messages?date=2024-01-01&pinned_only=true").await;
    res.assert_status_ok();
    assert_eq!(message_ids(&res.json()), vec![pinned]);
}

#[tokio::test]
async fn test_archived_filter_toggle() {
    let (server, pool) = test_server().await;

    let id = insert_message_at(&pool, "entry", ts(2024, 1, 1, 10, 0), None, false, false).await;

    server
        .put(&format!("/messages/{}/archived", id))
        .json(&json!({"archived": true}))
        .await
        .assert_status_ok();

    let res = server.get("/messages?date=2024-01-01").await;
    assert_eq!(message_ids(&res.json()), Vec::<i64>::new());

    let res = server.get("/messages?date=2024-01-01&show_archived=true").await;
    assert_eq!(message_ids(&res.json()), vec![id]);
}

#[tokio::test]
async fn test_no_filter_shows_nothing() {
    let (server, pool) = test_server().await;

    insert_message_at(&pool, "entry", ts(2024, 1, 1, 10, 0), None, false, false).await;

    let res = server.get("/messages").await;
    res.assert_status_ok();
    let body: Value = res.json();
    assert_eq!(body["total"], 0);
    assert!(body["messages"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_filter_by_project() {
    let (server, pool) = test_server().await;

    let res = server.post("/projects").json(&json!({"name": "Garden"})).await;
    let project_id = res.json::<Value>()["id"].as_i64().unwrap();

    let in_project =
        insert_message_at(&pool, "planted", ts(2024, 1, 1, 10, 0), Some(project_id), false, false)
            .await;
    insert_message_at(&pool, "unrelated", ts(2024, 1, 1, 11, 0), None, false, false).await;

    let res = server.get(&format!("/messages?project_id={}", project_id)).await;
    res.assert_status_ok();
    assert_eq!(message_ids(&res.json()), vec![in_project]);

    // Project takes precedence when both scope keys are present
    let res = server
        .get(&format!("/messages?project_id={}&date=2024-01-01", project_id))
        .await;
    assert_eq!(message_ids(&res.json()), vec![in_project]);
}

// ============================================================================
// Pin / archive mutations
// ============================================================================

#[tokio::test]
async fn test_pin_is_idempotent() {
    let (server, pool) = test_server().await;

    let id = insert_message_at(&pool, "entry", ts(2024, 1, 1, 10, 0), None, false, false).await;

    let res = server
        .put(&format!("/messages/{}/pinned", id))
        .json(&json!({"pinned": true}))
        .await;
    res.assert_status_ok();
    let once: Value = res.json();

    let res = server
        .put(&format!("/messages/{}/pinned", id))
        .json(&json!({"pinned": true}))
        .await;
    res.assert_status_ok();
    let twice: Value = res.json();

    assert_eq!(once, twice);
    assert_eq!(twice["pinned"], true);
}

#[tokio::test]
async fn test_mutating_missing_message() {
    let (server, _pool) = test_server().await;

    let res = server
        .put("/messages/12345/pinned")
        .json(&json!({"pinned": true}))
        .await;
    res.assert_status(StatusCode::NOT_FOUND);
    let body: Value = res.json();
    assert_eq!(body["error"]["code"], "NOT_FOUND");
}

// ============================================================================
// Notes and summaries without a credential
// ============================================================================

#[tokio::test]
async fn test_note_lookup_validation() {
    let (server, _pool) = test_server().await;

    let res = server.get("/notes/lookup").await;
    res.assert_status(StatusCode::BAD_REQUEST);

    let res = server.get("/notes/lookup?date=2024-01-01&project_id=1").await;
    res.assert_status(StatusCode::BAD_REQUEST);

    let res = server.get("/notes/lookup?date=2024-01-01").await;
    res.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_summary_without_credential() {
    let (server, pool) = test_server().await;

    insert_message_at(&pool, "entry", ts(2024, 1, 1, 10, 0), None, false, false).await;

    let res = server
        .post("/summaries")
        .json(&json!({"date": "2024-01-01"}))
        .await;
    res.assert_status(StatusCode::BAD_GATEWAY);
    let body: Value = res.json();
    assert_eq!(body["error"]["code"], "SUMMARY_UNAVAILABLE");

    // No note written
    let res = server.get("/notes").await;
    assert_eq!(res.json::<Value>()["total"], 0);
}

#[tokio::test]
async fn test_summary_scope_validation() {
    let (server, _pool) = test_server().await;

    let res = server.post("/summaries").json(&json!({})).await;
    res.assert_status(StatusCode::BAD_REQUEST);

    let res = server
        .post("/summaries")
        .json(&json!({"date": "2024-01-01", "project_id": 1}))
        .await;
    res.assert_status(StatusCode::BAD_REQUEST);
}
