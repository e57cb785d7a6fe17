//! Shared utilities for integration testing.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;

use serde_json::{json, Value};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

/// Start a canned JSON-RPC node that answers each method with a fixed
/// result. Unknown methods get a JSON-RPC error response.
pub async fn start_mock_rpc_node(responses: HashMap<String, Value>) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let responses = Arc::new(responses);

    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((socket, _)) => {
                    let responses = responses.clone();
                    tokio::spawn(async move {
                        handle_connection(socket, responses).await;
                    });
                }
                Err(_) => break,
            }
        }
    });

    addr
}

async fn handle_connection(mut socket: TcpStream, responses: Arc<HashMap<String, Value>>) {
    let mut buf = Vec::new();
    let mut tmp = [0u8; 4096];

    // Read headers, then the body per Content-Length.
    let (body_start, content_length) = loop {
        let n = match socket.read(&mut tmp).await {
            Ok(0) => return,
            Ok(n) => n,
            Err(_) => return,
        };
        buf.extend_from_slice(&tmp[..n]);
        if let Some(pos) = find_subsequence(&buf, b"\r\n\r\n") {
            let headers = String::from_utf8_lossy(&buf[..pos]);
            let mut content_length = 0usize;
            for line in headers.lines() {
                if let Some((name, value)) = line.split_once(':') {
                    if name.eq_ignore_ascii_case("content-length") {
                        content_length = value.trim().parse().unwrap_or(0);
                    }
                }
            }
            break (pos + 4, content_length);
        }
    };

    while buf.len() < body_start + content_length {
        let n = match socket.read(&mut tmp).await {
            Ok(0) => break,
            Ok(n) => n,
            Err(_) => return,
        };
        buf.extend_from_slice(&tmp[..n]);
    }

    let request: Value = match serde_json::from_slice(&buf[body_start..body_start + content_length])
    {
        Ok(v) => v,
        Err(_) => return,
    };

    let response = match request.as_array() {
        Some(batch) => Value::Array(
            batch
                .iter()
                .map(|call| respond_single(call, &responses))
                .collect(),
        ),
        None => respond_single(&request, &responses),
    };

    let body = serde_json::to_string(&response).unwrap();
    let http = format!(
        "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        body.len(),
        body
    );
    let _ = socket.write_all(http.as_bytes()).await;
    let _ = socket.shutdown().await;
}

fn respond_single(request: &Value, responses: &HashMap<String, Value>) -> Value {
    let id = request.get("id").cloned().unwrap_or(Value::Null);
    let method = request
        .get("method")
        .and_then(Value::as_str)
        .unwrap_or_default();

    match responses.get(method) {
        Some(result) => json!({"jsonrpc": "2.0", "id": id, "result": result}),
        None => json!({
            "jsonrpc": "2.0",
            "id": id,
            "error": {"code": -32601, "message": format!("method not handled: {method}")}
        }),
    }
}

fn find_subsequence(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack
        .windows(needle.len())
        .position(|window| window == needle)
}
