//! JSON-RPC 2.0 over a line-delimited TCP stream.
//!
//! Framing rules:
//! - Every request and response is a single JSON document followed by `\n`.
//! - `max_frame_bytes == 0` disables the frame size cap (daemon replies grow
//!   with the number of peers and sessions).
//! - Blank lines are skipped rather than treated as empty documents.

use bytes::{Bytes, BytesMut};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{ExporterError, Result};

#[derive(Debug, Serialize)]
struct RequestEnvelope<'a> {
    jsonrpc: &'static str,
    method: &'a str,
    params: &'a Value,
    id: u64,
}

#[derive(Debug, Deserialize)]
struct ResponseEnvelope {
    #[serde(default)]
    id: Option<Value>,
    #[serde(default)]
    result: Option<Value>,
    #[serde(default)]
    error: Option<RpcErrorObject>,
}

#[derive(Debug, Deserialize)]
struct RpcErrorObject {
    #[serde(default)]
    code: i64,
    #[serde(default)]
    message: String,
}

/// Encode one request line, trailing newline included.
pub fn encode_request(id: u64, method: &str, params: &Value) -> Result<Bytes> {
    let env = RequestEnvelope {
        jsonrpc: "2.0",
        method,
        params,
        id,
    };
    let mut out = serde_json::to_vec(&env)
        .map_err(|e| ExporterError::Internal(format!("encode request failed: {e}")))?;
    out.push(b'\n');
    Ok(Bytes::from(out))
}

/// Decode a response line and return its `result` member.
pub fn decode_response(line: &[u8], expected_id: u64) -> Result<Value> {
    let env: ResponseEnvelope = serde_json::from_slice(line)
        .map_err(|e| ExporterError::Protocol(format!("invalid response json: {e}")))?;

    if let Some(err) = env.error {
        return Err(ExporterError::Rpc {
            code: err.code,
            message: err.message,
        });
    }

    match env.id {
        Some(Value::Number(n)) if n.as_u64() == Some(expected_id) => {}
        other => {
            return Err(ExporterError::Protocol(format!(
                "response id {other:?} does not match request id {expected_id}"
            )));
        }
    }

    env.result
        .ok_or_else(|| ExporterError::Protocol("response carries no result".into()))
}

/// Incremental splitter turning raw socket reads into complete lines.
#[derive(Debug)]
pub struct LineFramer {
    buf: BytesMut,
    /// Prefix of `buf` already known to hold no `\n`.
    scanned: usize,
    max_frame_bytes: usize,
}

impl LineFramer {
    pub fn new(max_frame_bytes: usize) -> Self {
        Self {
            buf: BytesMut::new(),
            scanned: 0,
            max_frame_bytes,
        }
    }

    /// Append bytes read from the socket.
    pub fn extend(&mut self, chunk: &[u8]) {
        self.buf.extend_from_slice(chunk);
    }

    /// Bytes buffered but not yet returned as a frame.
    pub fn buffered(&self) -> usize {
        self.buf.len()
    }

    /// Pop the next complete line (without its terminator), if any.
    pub fn next_frame(&mut self) -> Result<Option<Bytes>> {
        loop {
            let found = self.buf[self.scanned..].iter().position(|b| *b == b'\n');
            let Some(pos) = found.map(|off| self.scanned + off) else {
                self.scanned = self.buf.len();
                // A partial line already over the cap can never become valid.
                if self.over_cap(self.buf.len()) {
                    return Err(ExporterError::FrameTooLarge(self.max_frame_bytes));
                }
                return Ok(None);
            };

            let mut line = self.buf.split_to(pos + 1);
            self.scanned = 0;
            line.truncate(pos);
            if line.last() == Some(&b'\r') {
                line.truncate(line.len() - 1);
            }

            if self.over_cap(line.len()) {
                return Err(ExporterError::FrameTooLarge(self.max_frame_bytes));
            }
            if line.iter().all(u8::is_ascii_whitespace) {
                continue;
            }
            return Ok(Some(line.freeze()));
        }
    }

    fn over_cap(&self, len: usize) -> bool {
        self.max_frame_bytes != 0 && len > self.max_frame_bytes
    }
}
