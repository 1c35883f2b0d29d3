//! Shared utilities for integration testing: a scripted JSON-RPC node.

#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use alloy::consensus::TxEnvelope;
use alloy::eips::eip2718::Decodable2718;
use alloy::primitives::{Address, Bytes, TxHash};
use serde_json::{json, Value};
use tempkey_client::blockchain::{KeyRing, KeyRole, Wallet};
use tempkey_client::config::ClientConfig;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

// Anvil's first three accounts
pub const WORK_KEY: &str = "ac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";
pub const TEMP_KEY: &str = "59c6995e998f97a5a0044966f0945389dc9e86dae88c7a8412f4603b6b78690d";
pub const OPERATOR_KEY: &str = "5de4111afa1a4b94908f83103eb1f1706367c2e68ca870fc3fb9a804cdab365a";

/// A running mock node.
pub struct MockNode {
    pub addr: SocketAddr,
    methods: Arc<Mutex<Vec<String>>>,
}

impl MockNode {
    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Number of requests received for `method`.
    pub fn count(&self, method: &str) -> usize {
        self.methods
            .lock()
            .unwrap()
            .iter()
            .filter(|m| m.as_str() == method)
            .count()
    }
}

/// Start a JSON-RPC node answering every request through `handler`.
///
/// The handler gets the method name and params; `Err` becomes a JSON-RPC error.
pub async fn start_rpc_node<F>(handler: F) -> MockNode
where
    F: Fn(&str, &Value) -> Result<Value, String> + Send + Sync + 'static,
{
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let methods = Arc::new(Mutex::new(Vec::new()));
    let handler = Arc::new(handler);

    let seen = methods.clone();
    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((socket, _)) => {
                    let handler = handler.clone();
                    let seen = seen.clone();
                    tokio::spawn(async move {
                        let _ = serve(socket, handler.as_ref(), &seen).await;
                    });
                }
                Err(_) => break,
            }
        }
    });

    MockNode { addr, methods }
}

async fn serve<F>(mut socket: TcpStream, handler: &F, seen: &Mutex<Vec<String>>) -> std::io::Result<()>
where
    F: Fn(&str, &Value) -> Result<Value, String>,
{
    let body = read_body(&mut socket).await?;
    let request: Value = serde_json::from_slice(&body).unwrap_or(Value::Null);

    let method = request["method"].as_str().unwrap_or_default().to_string();
    seen.lock().unwrap().push(method.clone());

    let response = match handler(&method, &request["params"]) {
        Ok(result) => json!({ "jsonrpc": "2.0", "id": request["id"], "result": result }),
        Err(message) => json!({
            "jsonrpc": "2.0",
            "id": request["id"],
            "error": { "code": -32000, "message": message }
        }),
    };

    let payload = response.to_string();
    let response_str = format!(
        "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        payload.len(),
        payload
    );
    socket.write_all(response_str.as_bytes()).await?;
    socket.shutdown().await
}

async fn read_body(socket: &mut TcpStream) -> std::io::Result<Vec<u8>> {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];

    let header_end = loop {
        let n = socket.read(&mut chunk).await?;
        if n == 0 {
            return Ok(Vec::new());
        }
        buf.extend_from_slice(&chunk[..n]);
        if let Some(pos) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
            break pos + 4;
        }
    };

    let headers = String::from_utf8_lossy(&buf[..header_end]).to_ascii_lowercase();
    let content_length = headers
        .lines()
        .find_map(|line| line.strip_prefix("content-length:"))
        .and_then(|v| v.trim().parse::<usize>().ok())
        .unwrap_or(0);

    while buf.len() < header_end + content_length {
        let n = socket.read(&mut chunk).await?;
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);
    }

    Ok(buf[header_end..].to_vec())
}

/// Decode the raw transaction carried by `eth_sendRawTransaction` params.
pub fn decode_raw_tx(params: &Value) -> (TxEnvelope, Bytes) {
    let raw: Bytes = serde_json::from_value(params[0].clone()).unwrap();
    let envelope = TxEnvelope::decode_2718(&mut raw.as_ref()).unwrap();
    (envelope, raw)
}

/// A minimal successful legacy receipt.
pub fn receipt_json(tx_hash: TxHash, from: Address, to: Address, block_number: u64) -> Value {
    json!({
        "transactionHash": tx_hash,
        "transactionIndex": "0x0",
        "blockHash": format!("0x{}", "11".repeat(32)),
        "blockNumber": format!("0x{:x}", block_number),
        "from": from,
        "to": to,
        "cumulativeGasUsed": "0x5208",
        "gasUsed": "0x5208",
        "effectiveGasPrice": "0x3b9aca00",
        "contractAddress": null,
        "logs": [],
        "logsBloom": format!("0x{}", "00".repeat(256)),
        "type": "0x0",
        "status": "0x1"
    })
}

pub fn test_keys() -> KeyRing {
    KeyRing::new(
        Wallet::from_private_key(WORK_KEY, KeyRole::Work).unwrap(),
        Wallet::from_private_key(TEMP_KEY, KeyRole::Temporary).unwrap(),
        Wallet::from_private_key(OPERATOR_KEY, KeyRole::Operator).unwrap(),
    )
}

/// Configuration pointing at `rpc_url` with fast receipt polling.
pub fn test_config(rpc_url: &str) -> ClientConfig {
    let mut config = ClientConfig::default();
    config.chain.rpc_url = rpc_url.to_string();
    config.chain.rpc_timeout_secs = 5;
    config.receipts.poll_interval_ms = 10;
    config.receipts.timeout_secs = 5;
    config
}
