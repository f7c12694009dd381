//! The TickTick server driven through the line-delimited JSON-RPC loop

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use clap::Parser;
use serde_json::{json, Value};
use tempfile::TempDir;

use ticktick_mcp::auth::oauth::{DEFAULT_REDIRECT_URI, TOKEN_URL};
use ticktick_mcp::auth::{AuthManager, AuthSettings, OAuthClient, TokenStore};
use ticktick_mcp::client::transport::{HttpRequest, HttpResponse, Transport};
use ticktick_mcp::client::API_BASE;
use ticktick_mcp::handlers::ToolContext;
use ticktick_mcp::{Config, DescOptions, TickTickClient, TickTickResult, TickTickServer};

/// Server with no credentials and an empty token file: any API call fails
/// with the unauthenticated error before reaching the network
fn offline_server(dir: &TempDir) -> TickTickServer {
    let token_file = dir.path().join("tokens.json");
    let config = Config::try_parse_from([
        "ticktick-mcp",
        "--token-file",
        token_file.to_str().unwrap(),
    ])
    .unwrap();
    TickTickServer::from_config(&config).unwrap()
}

/// Answers `GET /project` and records request URLs
struct ProjectsOnly {
    urls: Mutex<Vec<String>>,
}

#[async_trait]
impl Transport for ProjectsOnly {
    async fn send(&self, request: HttpRequest) -> TickTickResult<HttpResponse> {
        self.urls.lock().unwrap().push(request.url.clone());
        let response = if request.url == format!("{API_BASE}/project") {
            HttpResponse {
                status: 200,
                content_type: Some("application/json".to_string()),
                body: json!([{"id": "p1", "name": "Work"}]).to_string(),
            }
        } else {
            HttpResponse {
                status: 404,
                content_type: None,
                body: "not found".to_string(),
            }
        };
        Ok(response)
    }
}

fn scripted_server(dir: &TempDir, transport: Arc<ProjectsOnly>) -> TickTickServer {
    let settings = AuthSettings {
        access_token: Some("token".to_string()),
        ..Default::default()
    };
    let store = TokenStore::new(dir.path().join("tokens.json"));
    let oauth = OAuthClient::new(transport.clone(), TOKEN_URL, DEFAULT_REDIRECT_URI);
    let auth = AuthManager::new(settings, store, oauth);
    let client = TickTickClient::new(transport, auth, API_BASE);
    TickTickServer::new(ToolContext::new(client, DescOptions::default()))
}

async fn run(server: &TickTickServer, input: &str) -> Vec<Value> {
    let mut output = Vec::new();
    mcp_common::serve(server, input.as_bytes(), &mut output)
        .await
        .unwrap();
    String::from_utf8(output)
        .unwrap()
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect()
}

#[tokio::test]
async fn unknown_tool_is_an_error_result() {
    let dir = tempfile::tempdir().unwrap();
    let server = offline_server(&dir);

    let responses = run(
        &server,
        r#"{"jsonrpc":"2.0","id":1,"method":"tools/call","params":{"name":"nonexistent_tool","arguments":{}}}"#,
    )
    .await;

    assert_eq!(responses.len(), 1);
    let response = &responses[0];
    assert_eq!(response["id"], 1);
    assert!(response.get("error").is_none());
    assert_eq!(response["result"]["isError"], true);
    let message = response["result"]["content"][0]["text"].as_str().unwrap();
    assert!(message.contains("nonexistent_tool"));
}

#[tokio::test]
async fn invalid_json_produces_no_output() {
    let dir = tempfile::tempdir().unwrap();
    let server = offline_server(&dir);

    let responses = run(&server, "{\"jsonrpc\": \"2.0\", \"id\": 1, \"method\": \n").await;
    assert!(responses.is_empty());
}

#[tokio::test]
async fn handshake_and_tool_listing() {
    let dir = tempfile::tempdir().unwrap();
    let server = offline_server(&dir);

    let input = [
        r#"{"jsonrpc":"2.0","id":1,"method":"initialize","params":{"protocolVersion":"2025-03-26","capabilities":{},"clientInfo":{"name":"test","version":"1"}}}"#,
        r#"{"jsonrpc":"2.0","method":"notifications/initialized"}"#,
        r#"{"jsonrpc":"2.0","id":2,"method":"tools/list"}"#,
        r#"{"jsonrpc":"2.0","id":3,"method":"resources/list"}"#,
    ]
    .join("\n");
    let responses = run(&server, &input).await;

    assert_eq!(responses.len(), 3);
    assert_eq!(responses[0]["result"]["protocolVersion"], "2025-03-26");
    assert_eq!(responses[0]["result"]["serverInfo"]["name"], "ticktick");
    assert!(responses[0]["result"]["capabilities"]["tools"].is_object());

    let tools = responses[1]["result"]["tools"].as_array().unwrap();
    assert_eq!(tools.len(), 15);
    assert!(tools.iter().all(|t| t["inputSchema"]["type"] == "object"));

    assert_eq!(responses[2]["error"]["code"], -32601);
}

#[tokio::test]
async fn unauthenticated_call_explains_setup() {
    let dir = tempfile::tempdir().unwrap();
    let server = offline_server(&dir);

    let responses = run(
        &server,
        r#"{"jsonrpc":"2.0","id":"a","method":"tools/call","params":{"name":"list_projects"}}"#,
    )
    .await;

    let result = &responses[0]["result"];
    assert_eq!(result["isError"], true);
    let message = result["content"][0]["text"].as_str().unwrap();
    assert!(message.starts_with("No authentication tokens found."));
}

#[tokio::test]
async fn tool_call_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let transport = Arc::new(ProjectsOnly {
        urls: Mutex::new(Vec::new()),
    });
    let server = scripted_server(&dir, transport.clone());

    let input = [
        r#"{"jsonrpc":"2.0","id":1,"method":"tools/call","params":{"name":"list_projects","arguments":{}}}"#,
        r#"{"jsonrpc":"2.0","id":2,"method":"tools/call","params":{"name":"get_project","arguments":{"projectId":"nope"}}}"#,
        r#"{"jsonrpc":"2.0","id":3,"method":"tools/call","params":{"name":"get_project","arguments":{}}}"#,
    ]
    .join("\n");
    let responses = run(&server, &input).await;
    assert_eq!(responses.len(), 3);

    let listed_text = responses[0]["result"]["content"][0]["text"].as_str().unwrap();
    let listed: Value = serde_json::from_str(listed_text).unwrap();
    assert_eq!(listed, json!([{"id": "p1", "name": "Work"}]));
    assert_ne!(responses[0]["result"]["isError"], true);

    let api_error = responses[1]["result"]["content"][0]["text"].as_str().unwrap();
    assert_eq!(responses[1]["result"]["isError"], true);
    assert_eq!(api_error, "TickTick API error 404 GET /project/nope: not found");

    assert_eq!(responses[2]["result"]["isError"], true);
    assert_eq!(transport.urls.lock().unwrap().len(), 2);
}
