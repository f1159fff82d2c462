//! Line-delimited JSON-RPC over stdio.
//!
//! One JSON object per line in, at most one JSON object per line out. Lines that do not parse
//! are dropped without a reply, and nothing a single request does can stop the loop.

use std::io::{self, BufRead, Write};

use bundle_protocol::{
    CallToolParams, ListToolsResult, RpcRequest, RpcResponse, TOOL_ERROR_CODE,
};
use serde::Serialize;
use serde_json::{json, Value};

use crate::tools::{BundleService, ToolError};

pub struct StdioServer {
    service: BundleService,
}

impl StdioServer {
    pub fn new(service: BundleService) -> Self {
        Self { service }
    }

    /// Serves until EOF on `input`. Only transport failures are returned.
    pub fn serve<R: BufRead, W: Write>(&self, mut input: R, mut output: W) -> io::Result<()> {
        let mut buf = Vec::new();
        loop {
            buf.clear();
            if input.read_until(b'\n', &mut buf)? == 0 {
                return Ok(());
            }
            let Ok(line) = std::str::from_utf8(&buf) else {
                log::debug!("Skipping non UTF-8 input line ({} bytes)", buf.len());
                continue;
            };
            if let Some(response) = self.handle_line(line) {
                let mut encoded = serde_json::to_vec(&response)?;
                encoded.push(b'\n');
                output.write_all(&encoded)?;
                output.flush()?;
            }
        }
    }

    /// Returns the reply for one input line, or `None` when the line gets no reply.
    pub fn handle_line(&self, line: &str) -> Option<RpcResponse> {
        let line = line.trim();
        if line.is_empty() {
            return None;
        }
        match serde_json::from_str::<RpcRequest>(line) {
            Ok(request) => self.handle_request(request),
            Err(err) => {
                log::debug!("Skipping malformed request line: {err}");
                None
            }
        }
    }

    fn handle_request(&self, request: RpcRequest) -> Option<RpcResponse> {
        log::debug!("request method={}", request.method);
        let RpcRequest {
            id, method, params, ..
        } = request;

        match method.as_str() {
            "initialize" => Some(respond(id, &self.service.initialize_result())),
            "initialized" | "notifications/initialized" => None,
            "tools/list" => Some(respond(
                id,
                &ListToolsResult {
                    tools: self.service.tools().to_vec(),
                },
            )),
            "tools/call" => {
                let outcome = serde_json::from_value::<CallToolParams>(params)
                    .map_err(ToolError::InvalidParams)
                    .and_then(|params| self.service.call_tool(params));
                Some(match outcome {
                    Ok(result) => respond(id, &result),
                    Err(err) => {
                        log::warn!("tools/call failed: {err}");
                        RpcResponse::failure(id, TOOL_ERROR_CODE, err.to_string())
                    }
                })
            }
            "ping" => Some(RpcResponse::success(id, json!({}))),
            other => {
                log::debug!("Ignoring unknown method {other}");
                None
            }
        }
    }
}

fn respond<T: Serialize>(id: Option<Value>, result: &T) -> RpcResponse {
    match serde_json::to_value(result) {
        Ok(value) => RpcResponse::success(id, value),
        Err(err) => RpcResponse::failure(id, TOOL_ERROR_CODE, err.to_string()),
    }
}
