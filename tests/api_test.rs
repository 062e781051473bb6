//! End-to-end tests for the HTTP API.
//!
//! Each test spins up the full router on a random port with scanner
//! executables pointing nowhere and no API token, so every scan resolves to
//! stand-in data.

use std::net::SocketAddr;

use reqwest::{Client, StatusCode};
use scanmetrics::config::AppConfig;
use scanmetrics::{routes, AppState};
use serde_json::{json, Value};
use tempfile::TempDir;
use tokio::net::TcpListener;

/// Running server plus the directories it reads and writes.
struct TestServer {
    base: String,
    _projects: TempDir,
    results: TempDir,
}

/// Start the app with the given project directories created on disk.
async fn start_server(existing_projects: &[&str]) -> TestServer {
    let projects = tempfile::tempdir().unwrap();
    for name in existing_projects {
        std::fs::create_dir(projects.path().join(name)).unwrap();
    }
    let results = tempfile::tempdir().unwrap();

    let projects_dir = projects.path().display().to_string();
    let results_dir = results.path().display().to_string();
    let config = AppConfig::from_vars(|key| match key {
        "PROJECTS_DIR" => Some(projects_dir.clone()),
        "RESULTS_DIR" => Some(results_dir.clone()),
        "SNYK_CLI_PATH" => Some("/nonexistent/snyk-cli-for-tests".to_string()),
        "DEEPSOURCE_CLI_PATH" => Some("/nonexistent/deepsource-cli-for-tests".to_string()),
        _ => None,
    });

    let app = routes::router(AppState::from_config(config));

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr: SocketAddr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, app).await.ok();
    });

    TestServer {
        base: format!("http://{addr}"),
        _projects: projects,
        results,
    }
}

/// Helper: extract `data` from the API envelope, panic with message on error.
fn extract_data(body: &Value) -> &Value {
    if let Some(err) = body.get("error").filter(|e| !e.is_null()) {
        panic!(
            "API error: {} — {}",
            err["code"].as_str().unwrap_or("?"),
            err["message"].as_str().unwrap_or("?"),
        );
    }
    body.get("data").expect("missing 'data' field")
}

async fn post_json(client: &Client, url: String, body: Option<Value>) -> (StatusCode, Value) {
    let mut request = client.post(url);
    if let Some(body) = body {
        request = request.json(&body);
    }
    let resp = request.send().await.unwrap();
    let status = resp.status();
    (status, resp.json().await.unwrap())
}

#[tokio::test]
async fn health_live() {
    let server = start_server(&[]).await;
    let resp = Client::new()
        .get(format!("{}/health/live", server.base))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(resp.text().await.unwrap(), "OK");
}

#[tokio::test]
async fn projects_listing_reports_existence() {
    let server = start_server(&["flask_demo"]).await;
    let body: Value = Client::new()
        .get(format!("{}/api/v1/projects", server.base))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    let data = extract_data(&body);
    assert_eq!(data["available_projects"], json!(["flask_demo", "nodejs-goof"]));
    assert_eq!(data["projects"][0]["name"], "flask_demo");
    assert_eq!(data["projects"][0]["exists"], true);
    assert_eq!(data["projects"][1]["name"], "nodejs-goof");
    assert_eq!(data["projects"][1]["exists"], false);
}

#[tokio::test]
async fn unknown_tool_is_not_found() {
    let server = start_server(&["flask_demo"]).await;
    let (status, body) =
        post_json(&Client::new(), format!("{}/api/v1/scans/sonarqube", server.base), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], "NOT_FOUND");
}

#[tokio::test]
async fn unregistered_project_is_rejected() {
    let server = start_server(&["flask_demo", "intruder"]).await;
    let (status, body) = post_json(
        &Client::new(),
        format!("{}/api/v1/scans/deepsource", server.base),
        Some(json!({"project": "intruder"})),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    let message = body["error"]["message"].as_str().unwrap();
    assert!(message.contains("flask_demo, nodejs-goof"), "{message}");
    assert_eq!(std::fs::read_dir(server.results.path()).unwrap().count(), 0);
}

#[tokio::test]
async fn deepsource_scan_defaults_to_flask_demo_and_stores_result() {
    let server = start_server(&["flask_demo"]).await;
    let client = Client::new();

    let (status, body) =
        post_json(&client, format!("{}/api/v1/scans/deepsource", server.base), None).await;
    assert_eq!(status, StatusCode::OK);

    let data = extract_data(&body);
    assert_eq!(data["success"], true);
    assert_eq!(data["project"], "flask_demo");
    let metrics = &data["metric_result"];
    assert_eq!(metrics["tool_name"], "DeepSource");
    assert_eq!(metrics["critical"], 0);
    assert_eq!(metrics["high"], 1);
    assert_eq!(metrics["medium"], 1);
    assert_eq!(metrics["low"], 0);
    assert_eq!(metrics["total_issues"], 2);
    assert_eq!(metrics["scan_duration"], 5.2);

    let file_path = data["file_path"].as_str().unwrap();
    assert!(file_path.contains("deepsource_flask_demo_"), "{file_path}");

    let latest: Value = client
        .get(format!("{}/api/v1/results/latest", server.base))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let latest = extract_data(&latest);
    let file_name = latest["file_name"].as_str().unwrap();
    assert!(file_path.ends_with(file_name));
    assert_eq!(latest["content"]["total_issues"], 2);

    let by_name: Value = client
        .get(format!("{}/api/v1/results/{file_name}", server.base))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(extract_data(&by_name)["content"], latest["content"]);
}

#[tokio::test]
async fn snyk_scan_accepts_project_in_query() {
    let server = start_server(&["nodejs-goof"]).await;
    let (status, body) = post_json(
        &Client::new(),
        format!("{}/api/v1/scans/snyk?project=nodejs-goof", server.base),
        None,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let data = extract_data(&body);
    assert_eq!(data["project"], "nodejs-goof");
    assert_eq!(data["metric_result"]["tool_name"], "Snyk Code");
    assert_eq!(data["metric_result"]["critical"], 1);
    assert_eq!(data["metric_result"]["medium"], 1);
    assert!(data["file_path"]
        .as_str()
        .unwrap()
        .contains("snyk_code_nodejs-goof_"));
}

#[tokio::test]
async fn empty_project_in_body_uses_query_project() {
    let server = start_server(&["nodejs-goof"]).await;
    let (status, body) = post_json(
        &Client::new(),
        format!("{}/api/v1/scans/deepsource?project=nodejs-goof", server.base),
        Some(json!({"project": ""})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(extract_data(&body)["project"], "nodejs-goof");
}

#[tokio::test]
async fn missing_project_directory_is_a_scan_failure() {
    let server = start_server(&["flask_demo"]).await;
    let (status, body) = post_json(
        &Client::new(),
        format!("{}/api/v1/scans/deepsource", server.base),
        Some(json!({"project": "nodejs-goof"})),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"]["code"], "SCAN_FAILED");
    assert!(body["error"]["message"]
        .as_str()
        .unwrap()
        .contains("not found in"));
}

#[tokio::test]
async fn scan_all_succeeds_when_any_project_succeeds() {
    let server = start_server(&["flask_demo"]).await;
    let (status, body) =
        post_json(&Client::new(), format!("{}/api/v1/scans/deepsource/all", server.base), None)
            .await;

    assert_eq!(status, StatusCode::OK);
    let data = extract_data(&body);
    assert_eq!(data["message"], "Scanned 1/2 projects");
    assert_eq!(data["results"][0]["success"], true);
    assert_eq!(data["results"][1]["project"], "nodejs-goof");
    assert_eq!(data["results"][1]["success"], false);
}

#[tokio::test]
async fn scan_all_fails_when_every_project_fails() {
    let server = start_server(&[]).await;
    let (status, body) =
        post_json(&Client::new(), format!("{}/api/v1/scans/snyk/all", server.base), None).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["data"]["succeeded"], 0);
    assert_eq!(body["data"]["total"], 2);
    assert_eq!(body["data"]["message"], "Scanned 0/2 projects");
}

#[tokio::test]
async fn latest_result_is_not_found_before_any_scan() {
    let server = start_server(&[]).await;
    let resp = Client::new()
        .get(format!("{}/api/v1/results/latest", server.base))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn named_result_rejects_traversal_and_missing_files() {
    let server = start_server(&[]).await;
    let client = Client::new();

    let resp = client
        .get(format!("{}/api/v1/results/..%2Fsecret.json", server.base))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let resp = client
        .get(format!("{}/api/v1/results/missing.json", server.base))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}
