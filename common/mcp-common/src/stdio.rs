//! Line-delimited JSON-RPC loop
//!
//! One JSON object per line in, one per line out. Each request is fully
//! handled and its response flushed before the next line is read.
//!
//! - lines that are not valid JSON are logged and dropped
//! - messages without an `id` (or with a null one) are notifications and get no reply
//! - `tools/call` failures, including unknown tool names, come back as a normal
//!   result with `isError: true`
//! - unknown top-level methods get a JSON-RPC error object (`-32601`)

use rmcp::model::CallToolResult;
use serde_json::{json, Value};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tracing::{debug, info, warn};

use crate::protocol::*;
use crate::result::error_result;
use crate::server::ToolServer;

/// Serve `server` over the process's stdin/stdout until stdin closes
pub async fn serve_stdio<S>(server: &S) -> anyhow::Result<()>
where
    S: ToolServer + ?Sized,
{
    let reader = BufReader::new(tokio::io::stdin());
    let writer = tokio::io::stdout();
    serve(server, reader, writer).await
}

/// Serve `server` over an arbitrary line reader and writer until end of input
pub async fn serve<S, R, W>(server: &S, mut reader: R, mut writer: W) -> anyhow::Result<()>
where
    S: ToolServer + ?Sized,
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    info!(server = server.server_name(), "waiting for requests");

    let mut buf = Vec::new();
    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf).await? == 0 {
            info!("input closed");
            break;
        }

        let line = match std::str::from_utf8(&buf) {
            Ok(line) => line.trim(),
            Err(e) => {
                warn!(error = %e, "dropping non UTF-8 line");
                continue;
            }
        };
        if line.is_empty() {
            continue;
        }

        if let Some(response) = handle_line(server, line).await {
            let encoded = serde_json::to_string(&response)?;
            writer.write_all(encoded.as_bytes()).await?;
            writer.write_all(b"\n").await?;
            writer.flush().await?;
        }
    }

    Ok(())
}

/// Handle one input line, returning the response to write, if any
pub async fn handle_line<S>(server: &S, line: &str) -> Option<JsonRpcResponse>
where
    S: ToolServer + ?Sized,
{
    let message: Value = match serde_json::from_str(line) {
        Ok(message) => message,
        Err(e) => {
            warn!(error = %e, "dropping malformed line");
            return None;
        }
    };

    if !message.is_object() {
        warn!(line, "dropping message that is not a JSON object");
        return None;
    }

    let id = match message.get("id") {
        Some(id) if !id.is_null() => id.clone(),
        _ => {
            let method = message.get("method").and_then(Value::as_str).unwrap_or("");
            debug!(method, "notification received");
            return None;
        }
    };

    let request: JsonRpcRequest = match serde_json::from_value(message) {
        Ok(request) => request,
        Err(e) => {
            warn!(error = %e, "invalid request");
            return Some(JsonRpcResponse::failure(id, INVALID_REQUEST, "Invalid request"));
        }
    };

    Some(dispatch(server, request).await)
}

async fn dispatch<S>(server: &S, request: JsonRpcRequest) -> JsonRpcResponse
where
    S: ToolServer + ?Sized,
{
    debug!(method = %request.method, "request received");

    match request.method.as_str() {
        "initialize" => {
            let params: InitializeParams =
                serde_json::from_value(request.params).unwrap_or_default();
            if let Some(client) = &params.client_info {
                info!(client = %client, "client connected");
            }
            let result = InitializeResult {
                protocol_version: params
                    .protocol_version
                    .unwrap_or_else(|| DEFAULT_PROTOCOL_VERSION.to_string()),
                capabilities: rmcp::model::ServerCapabilities::builder()
                    .enable_tools()
                    .build(),
                server_info: Implementation {
                    name: server.server_name().to_string(),
                    version: server.server_version().to_string(),
                },
                instructions: server.instructions().map(str::to_string),
            };
            encode(request.id, &result)
        }
        "tools/list" => {
            let result = ListToolsResult {
                tools: server.list_tools(),
            };
            encode(request.id, &result)
        }
        "tools/call" => {
            let result = call_tool(server, request.params).await;
            encode(request.id, &result)
        }
        other => JsonRpcResponse::failure(
            request.id,
            METHOD_NOT_FOUND,
            format!("Method not found: {}", other),
        ),
    }
}

async fn call_tool<S>(server: &S, params: Value) -> CallToolResult
where
    S: ToolServer + ?Sized,
{
    let params: CallToolParams = match serde_json::from_value(params) {
        Ok(params) => params,
        Err(e) => {
            warn!(error = %e, "invalid tools/call params");
            return error_result(format!("Invalid tools/call params: {}", e));
        }
    };

    let arguments = match params.arguments {
        Some(Value::Null) | None => json!({}),
        Some(arguments) => arguments,
    };

    info!(tool = %params.name, "tool call");
    match server.call_tool(&params.name, arguments).await {
        Ok(result) => result,
        Err(e) => {
            warn!(tool = %params.name, error = %e, "tool call failed");
            error_result(e.to_string())
        }
    }
}

fn encode<T: serde::Serialize>(id: Value, result: &T) -> JsonRpcResponse {
    match serde_json::to_value(result) {
        Ok(value) => JsonRpcResponse::success(id, value),
        Err(e) => JsonRpcResponse::failure(id, INTERNAL_ERROR, e.to_string()),
    }
}
