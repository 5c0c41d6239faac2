// Cache builds over real HTTP against a local server with canned responses.
//
// To run: `cargo test --test http_source`

use axum::Router;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode, Uri, header};
use axum::response::{IntoResponse, Response};
use helpers_cache::fetch::USER_AGENT;
use helpers_cache::{BuildConfig, HttpSource, build};
use serde_json::{Value, json};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tempfile::TempDir;
use tokio::net::TcpListener;

enum Reply {
    Json(Value),
    Status(StatusCode),
}

struct Canned {
    routes: HashMap<String, Reply>,
    agents: Mutex<Vec<String>>,
}

async fn respond(State(state): State<Arc<Canned>>, uri: Uri, headers: HeaderMap) -> Response {
    let agent = headers
        .get(header::USER_AGENT)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    state.agents.lock().unwrap().push(agent);

    match state.routes.get(uri.path()) {
        Some(Reply::Json(body)) => axum::Json(body.clone()).into_response(),
        Some(Reply::Status(code)) => (*code).into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

/// Start a server on an ephemeral port. `routes` receives the server's base
/// URL so listings can point back at it.
async fn serve<F>(routes: F) -> (String, Arc<Canned>)
where
    F: FnOnce(&str) -> Vec<(&'static str, Reply)>,
{
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind test server");
    let base = format!("http://{}", listener.local_addr().unwrap());

    let state = Arc::new(Canned {
        routes: routes(&base)
            .into_iter()
            .map(|(path, reply)| (path.to_string(), reply))
            .collect(),
        agents: Mutex::default(),
    });

    let app = Router::new().fallback(respond).with_state(state.clone());
    tokio::spawn(async move {
        axum::serve(listener, app).await.ok();
    });

    (base, state)
}

/// Local server only; ignore any proxy set in the environment.
fn http_source() -> HttpSource {
    HttpSource::from_builder(reqwest::Client::builder().no_proxy()).expect("Failed to build HTTP source")
}

fn config(base: &str, dir: &TempDir) -> BuildConfig {
    BuildConfig::new(
        format!("{base}/contents/json"),
        format!("{base}/scripts"),
        dir.path().join("json").join("helpers_cache.json"),
    )
}

#[tokio::test]
async fn test_http_build_skips_failed_descriptors() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let (base, server) = serve(|base| {
        vec![
            (
                "/contents/json",
                Reply::Json(json!([
                    {"name": "nginx.json", "download_url": format!("{base}/json/nginx.json")},
                    {"name": "gone.json", "download_url": format!("{base}/json/gone.json")},
                    {"name": "error.json", "download_url": format!("{base}/json/error.json")},
                    {"name": "icons", "download_url": null}
                ])),
            ),
            (
                "/json/nginx.json",
                Reply::Json(json!({
                    "slug": "nginx",
                    "categories": [21],
                    "install_methods": [{"script": "ct/nginx.sh"}]
                })),
            ),
            ("/json/error.json", Reply::Status(StatusCode::INTERNAL_SERVER_ERROR)),
        ]
    })
    .await;
    let config = config(&base, &temp_dir);

    let http = http_source();
    let report = build(&http, &config).await.expect("build should succeed");

    assert_eq!(report.entry_count, 1);
    assert_eq!(report.skipped, 3);

    let written: Value =
        serde_json::from_str(&std::fs::read_to_string(&config.output_path).unwrap()).unwrap();
    assert_eq!(written[0]["slug"], "nginx");
    assert_eq!(written[0]["categories"], json!([21]));
    assert_eq!(written[0]["script_url"], format!("{base}/scripts/ct/nginx.sh"));

    let agents = server.agents.lock().unwrap().clone();
    assert_eq!(agents.len(), 4, "one listing request plus three descriptor requests");
    assert!(agents.iter().all(|a| a == USER_AGENT), "{agents:?}");
}

#[tokio::test]
async fn test_http_forbidden_listing_aborts() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let (base, _server) = serve(|_| vec![("/contents/json", Reply::Status(StatusCode::FORBIDDEN))]).await;
    let config = config(&base, &temp_dir);

    let http = http_source();
    let err = build(&http, &config).await.expect_err("403 listing must abort");

    assert!(format!("{err:#}").contains("403"), "unexpected error: {err:#}");
    assert!(!config.output_path.exists());
}

#[tokio::test]
async fn test_http_listing_object_aborts() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let (base, server) = serve(|_| {
        vec![(
            "/contents/json",
            Reply::Json(json!({"message": "API rate limit exceeded"})),
        )]
    })
    .await;
    let config = config(&base, &temp_dir);

    let http = http_source();
    let err = build(&http, &config).await.expect_err("non-array listing must abort");

    assert!(format!("{err:#}").contains("parse JSON"), "unexpected error: {err:#}");
    assert!(!config.output_path.exists());
    assert_eq!(server.agents.lock().unwrap().len(), 1);
}
