//! In-process JSON-RPC client talking to a real `Server` over an in-memory
//! pipe, so tests can observe what the server writes to the editor.

use jinie_lsp::Backend;
use serde_json::{Value, json};
use tokio::io::{
    AsyncBufReadExt, AsyncReadExt, AsyncWriteExt, BufReader, DuplexStream, ReadHalf, WriteHalf,
};
use tower_lsp::{LspService, Server};

pub struct WireClient {
    reader: BufReader<ReadHalf<DuplexStream>>,
    writer: WriteHalf<DuplexStream>,
    next_id: i64,
    /// Server-initiated messages, in the order they arrived.
    pub received: Vec<Value>,
}

impl WireClient {
    /// Spawn a backend behind `Server` and connect to it.
    pub fn start() -> Self {
        let (client_end, server_end) = tokio::io::duplex(64 * 1024);
        let (server_read, server_write) = tokio::io::split(server_end);
        let (service, socket) = LspService::new(Backend::new);
        tokio::spawn(Server::new(server_read, server_write, socket).serve(service));

        let (read, write) = tokio::io::split(client_end);
        Self {
            reader: BufReader::new(read),
            writer: write,
            next_id: 0,
            received: Vec::new(),
        }
    }

    /// `initialize` followed by `initialized`, waiting until the server
    /// reports readiness.
    pub async fn handshake(&mut self, root_uri: &str) {
        let response = self
            .request(
                "initialize",
                json!({ "rootUri": root_uri, "capabilities": {} }),
            )
            .await;
        assert!(response.get("result").is_some(), "initialize failed: {response}");

        self.notify("initialized", json!({})).await;
        self.wait_for_log("JinieLSP initialized!").await;
    }

    /// `didOpen`, waiting until the server has stored the document.
    pub async fn open(&mut self, uri: &str, text: &str) {
        self.notify(
            "textDocument/didOpen",
            json!({
                "textDocument": {
                    "uri": uri,
                    "languageId": "jinie",
                    "version": 1,
                    "text": text,
                }
            }),
        )
        .await;
        self.wait_for_log(&format!("Opened file: {uri}")).await;
    }

    /// Send a request and return its response.  Anything the server sends
    /// first is kept in `received`.
    pub async fn request(&mut self, method: &str, params: Value) -> Value {
        self.next_id += 1;
        let id = self.next_id;
        self.write_message(&json!({
            "jsonrpc": "2.0",
            "id": id,
            "method": method,
            "params": params,
        }))
        .await;

        loop {
            let message = self.read_message().await;
            if message.get("method").is_none() && message.get("id") == Some(&json!(id)) {
                return message;
            }
            self.received.push(message);
        }
    }

    pub async fn notify(&mut self, method: &str, params: Value) {
        self.write_message(&json!({
            "jsonrpc": "2.0",
            "method": method,
            "params": params,
        }))
        .await;
    }

    /// Params of every received message with the given method.
    pub fn received_with_method(&self, method: &str) -> Vec<Value> {
        self.received
            .iter()
            .filter(|message| message.get("method").and_then(Value::as_str) == Some(method))
            .filter_map(|message| message.get("params").cloned())
            .collect()
    }

    async fn wait_for_log(&mut self, text: &str) {
        loop {
            let message = self.read_message().await;
            let is_match = message.get("method").and_then(Value::as_str)
                == Some("window/logMessage")
                && message["params"]["message"].as_str() == Some(text);
            self.received.push(message);
            if is_match {
                return;
            }
        }
    }

    async fn write_message(&mut self, message: &Value) {
        let body = message.to_string();
        let frame = format!("Content-Length: {}\r\n\r\n{}", body.len(), body);
        self.writer
            .write_all(frame.as_bytes())
            .await
            .expect("failed to write to server");
    }

    async fn read_message(&mut self) -> Value {
        let mut content_length = None;
        loop {
            let mut line = String::new();
            let read = self
                .reader
                .read_line(&mut line)
                .await
                .expect("failed to read header");
            assert!(read > 0, "server closed the connection");

            let line = line.trim_end();
            if line.is_empty() {
                break;
            }
            if let Some(value) = line.strip_prefix("Content-Length:") {
                content_length = Some(value.trim().parse::<usize>().expect("numeric length"));
            }
        }

        let mut body = vec![0; content_length.expect("missing Content-Length header")];
        self.reader
            .read_exact(&mut body)
            .await
            .expect("failed to read body");
        serde_json::from_slice(&body).expect("server sent invalid JSON")
    }
}
