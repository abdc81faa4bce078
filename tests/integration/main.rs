//! Integration tests for the pipeline validator
//!
//! These tests run the real server and the compiled CLI.

use std::net::SocketAddr;
use std::process::Command;

use pipeline_server::{create_router, ServerConfig};
use serde_json::{json, Value};
use tokio::net::TcpListener;

/// Start the API on an OS-assigned port and return its address.
async fn spawn_server() -> SocketAddr {
    let app = create_router(&ServerConfig::default()).expect("router");
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("local addr");

    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("server");
    });

    addr
}

async fn submit(addr: SocketAddr, pipeline: &Value) -> (u16, Value) {
    let response = reqwest::Client::new()
        .post(format!("http://{addr}/pipelines/parse"))
        .form(&[("pipeline", pipeline.to_string())])
        .send()
        .await
        .expect("request");

    let status = response.status().as_u16();
    (status, response.json().await.expect("json body"))
}

#[tokio::test]
async fn test_health_check() {
    let addr = spawn_server().await;

    let body: Value = reqwest::get(format!("http://{addr}/"))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body, json!({ "Ping": "Pong" }));
}

#[tokio::test]
async fn test_editor_pipeline_round_trip() {
    let addr = spawn_server().await;

    // Shape produced by the pipeline editor frontend.
    let pipeline = json!({
        "nodes": [
            {"id": "customInput-1", "type": "customInput", "position": {"x": 0, "y": 0}, "data": {"inputName": "q"}},
            {"id": "text-1", "type": "text", "position": {"x": 200, "y": 0}, "data": {"text": "{{q}}"}},
            {"id": "llm-1", "type": "llm", "position": {"x": 400, "y": 0}, "data": {}},
            {"id": "customOutput-1", "type": "customOutput", "position": {"x": 600, "y": 0}, "data": {}}
        ],
        "edges": [
            {"id": "e1", "source": "customInput-1", "sourceHandle": "customInput-1-value", "target": "text-1", "targetHandle": "text-1-q"},
            {"id": "e2", "source": "text-1", "sourceHandle": "text-1-output", "target": "llm-1", "targetHandle": "llm-1-prompt"},
            {"id": "e3", "source": "customInput-1", "sourceHandle": "customInput-1-value", "target": "llm-1", "targetHandle": "llm-1-system"},
            {"id": "e4", "source": "llm-1", "sourceHandle": "llm-1-response", "target": "customOutput-1", "targetHandle": "customOutput-1-value"}
        ]
    });

    let (status, body) = submit(addr, &pipeline).await;
    assert_eq!(status, 200);
    assert_eq!(body, json!({ "num_nodes": 4, "num_edges": 4, "is_dag": true }));
}

#[tokio::test]
async fn test_feedback_loop_is_not_a_dag() {
    let addr = spawn_server().await;

    let pipeline = json!({
        "nodes": [{"id": "lonely"}, {"id": "a"}, {"id": "b"}],
        "edges": [
            {"source": "a", "target": "b"},
            {"source": "b", "target": "a"},
            {"source": "b", "target": "a"}
        ]
    });

    let (status, body) = submit(addr, &pipeline).await;
    assert_eq!(status, 200);
    assert_eq!(body, json!({ "num_nodes": 3, "num_edges": 3, "is_dag": false }));
}

#[tokio::test]
async fn test_empty_submission() {
    let addr = spawn_server().await;

    let (status, body) = submit(addr, &json!({})).await;
    assert_eq!(status, 200);
    assert_eq!(body, json!({ "num_nodes": 0, "num_edges": 0, "is_dag": true }));
}

#[tokio::test]
async fn test_nodes_must_be_a_list() {
    let addr = spawn_server().await;

    let (status, body) = submit(addr, &json!({ "nodes": "a,b", "edges": [] })).await;
    assert_eq!(status, 400);
    assert_eq!(body, json!({ "detail": "Nodes must be a list" }));
}

#[test]
fn test_cli_help() {
    let output = Command::new(env!("CARGO_BIN_EXE_pipeline-validator"))
        .arg("--help")
        .output()
        .expect("Failed to execute command");

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(output.status.success());
    assert!(stdout.contains("Validate pipeline graphs"));
    assert!(stdout.contains("serve"));
    assert!(stdout.contains("validate"));
}

#[test]
fn test_cli_validate_file() {
    let temp_dir = tempfile::TempDir::new().unwrap();
    let path = temp_dir.path().join("diamond.json");
    std::fs::write(
        &path,
        json!({
            "nodes": [{"id": "a"}, {"id": "b"}, {"id": "c"}, {"id": "d"}],
            "edges": [
                {"source": "a", "target": "b"},
                {"source": "a", "target": "c"},
                {"source": "b", "target": "d"},
                {"source": "c", "target": "d"}
            ]
        })
        .to_string(),
    )
    .unwrap();

    let output = Command::new(env!("CARGO_BIN_EXE_pipeline-validator"))
        .arg("validate")
        .arg(&path)
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    let result: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(result, json!({ "num_nodes": 4, "num_edges": 4, "is_dag": true }));
}

#[test]
fn test_cli_validate_rejects_bad_json() {
    let temp_dir = tempfile::TempDir::new().unwrap();
    let path = temp_dir.path().join("broken.json");
    std::fs::write(&path, "{ not json").unwrap();

    let output = Command::new(env!("CARGO_BIN_EXE_pipeline-validator"))
        .arg("validate")
        .arg(&path)
        .output()
        .expect("Failed to execute command");

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Invalid JSON format"));
}
