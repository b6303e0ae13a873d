//! ElectrumX local RPC client.
//!
//! One connection per call: connect, send `getinfo`, read a single response
//! line, hang up. The whole exchange is bounded by `timeout`; there are no
//! retries.

use std::time::Duration;

use async_trait::async_trait;
use bytes::BytesMut;
use serde_json::json;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;

use electrumx_exporter_core::error::{ExporterError, Result};
use electrumx_exporter_core::protocol::{
    decode_response, encode_request, GetInfo, LineFramer, GETINFO_METHOD,
};

use super::StatusSource;
use crate::config::RpcSection;

const REQUEST_ID: u64 = 0;
const READ_CHUNK: usize = 8 * 1024;

#[derive(Debug, Clone)]
pub struct RpcClient {
    host: String,
    port: u16,
    timeout: Duration,
    max_frame_bytes: usize,
}

impl RpcClient {
    pub fn new(host: impl Into<String>, port: u16, timeout: Duration) -> Self {
        Self {
            host: host.into(),
            port,
            timeout,
            max_frame_bytes: 0,
        }
    }

    pub fn from_config(cfg: &RpcSection) -> Self {
        Self::new(cfg.host.clone(), cfg.port, cfg.timeout())
            .with_max_frame_bytes(cfg.max_frame_bytes)
    }

    pub fn with_max_frame_bytes(mut self, max: usize) -> Self {
        self.max_frame_bytes = max;
        self
    }

    async fn exchange(&self) -> Result<GetInfo> {
        let mut stream = TcpStream::connect((self.host.as_str(), self.port))
            .await
            .map_err(|e| ExporterError::Unreachable(format!("{}:{}: {e}", self.host, self.port)))?;

        let req = encode_request(REQUEST_ID, GETINFO_METHOD, &json!([]))?;
        stream
            .write_all(&req)
            .await
            .map_err(|e| ExporterError::Unreachable(format!("send getinfo failed: {e}")))?;

        let mut framer = LineFramer::new(self.max_frame_bytes);
        let mut chunk = BytesMut::with_capacity(READ_CHUNK);
        loop {
            if let Some(line) = framer.next_frame()? {
                let result = decode_response(&line, REQUEST_ID)?;
                return GetInfo::from_value(result);
            }

            chunk.clear();
            let n = stream
                .read_buf(&mut chunk)
                .await
                .map_err(|e| ExporterError::Unreachable(format!("read reply failed: {e}")))?;
            if n == 0 {
                return Err(ExporterError::Unreachable(format!(
                    "connection closed with {} bytes buffered and no reply",
                    framer.buffered()
                )));
            }
            framer.extend(&chunk);
        }
    }
}

#[async_trait]
impl StatusSource for RpcClient {
    async fn fetch_status(&self) -> Result<GetInfo> {
        tokio::time::timeout(self.timeout, self.exchange())
            .await
            .map_err(|_| ExporterError::Timeout(self.timeout))?
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncBufReadExt, BufReader};
    use tokio::net::TcpListener;

    const REPLY: &str = r#"{"jsonrpc":"2.0","id":0,"result":{"daemon height":10,"db height":9,"db_flush_count":1,"peers":{"bad":0,"good":1,"never":0,"stale":0,"total":1},"request total":3,"sessions":{"count":1,"count with subs":0,"errors":0,"logged":0,"pending requests":0,"subs":0},"txs sent":0}}"#;

    async fn serve_once(reply: &'static str) -> u16 {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();
        tokio::spawn(async move {
            let (sock, _) = listener.accept().await.unwrap();
            let (r, mut w) = sock.into_split();
            let mut line = String::new();
            BufReader::new(r).read_line(&mut line).await.unwrap();
            assert!(line.contains("\"method\":\"getinfo\""));
            // Split the reply across writes to exercise framing.
            let (a, b) = reply.split_at(reply.len() / 2);
            w.write_all(a.as_bytes()).await.unwrap();
            w.flush().await.unwrap();
            w.write_all(b.as_bytes()).await.unwrap();
            w.write_all(b"\n").await.unwrap();
        });
        port
    }

    #[tokio::test]
    async fn fetches_getinfo() {
        let port = serve_once(REPLY).await;
        let client = RpcClient::new("127.0.0.1", port, Duration::from_secs(5));
        let info = client.fetch_status().await.unwrap();
        assert_eq!(info.daemon_height, 10);
        assert_eq!(info.request_total, 3);
    }

    #[tokio::test]
    async fn frame_cap_rejects_large_reply() {
        let port = serve_once(REPLY).await;
        let client =
            RpcClient::new("127.0.0.1", port, Duration::from_secs(5)).with_max_frame_bytes(32);
        let err = client.fetch_status().await.unwrap_err();
        assert!(matches!(err, ExporterError::FrameTooLarge(32)));
    }

    #[tokio::test]
    async fn refused_connection_is_unreachable() {
        // Bind then drop to get a port with nothing listening.
        let port = {
            let l = TcpListener::bind("127.0.0.1:0").await.unwrap();
            l.local_addr().unwrap().port()
        };
        let client = RpcClient::new("127.0.0.1", port, Duration::from_secs(5));
        let err = client.fetch_status().await.unwrap_err();
        assert!(err.is_unreachable());
    }
}
