//! Block explorer height fetcher (Insight-style `status` endpoint).
//!
//! Expected body: `{"info": {"blocks": <height>, ...}, ...}`.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use electrumx_exporter_core::error::{ExporterError, Result};

use super::HeightSource;

pub struct ExplorerClient {
    url: String,
    client: Client,
}

#[derive(Debug, Deserialize)]
struct StatusResponse {
    info: StatusInfo,
}

#[derive(Debug, Deserialize)]
struct StatusInfo {
    blocks: i64,
}

impl ExplorerClient {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ExporterError::Explorer(format!("failed to build HTTP client: {e}")))?;
        Ok(Self {
            url: url.into(),
            client,
        })
    }
}

#[async_trait]
impl HeightSource for ExplorerClient {
    async fn fetch_height(&self) -> Result<i64> {
        let resp = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| ExporterError::Explorer(format!("GET {} failed: {e}", self.url)))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(ExporterError::Explorer(format!(
                "explorer returned HTTP status {status}"
            )));
        }

        let body = resp
            .json::<StatusResponse>()
            .await
            .map_err(|e| ExporterError::Explorer(format!("failed to parse status json: {e}")))?;
        Ok(body.info.blocks)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_body_can_be_deserialized() {
        let json = r#"
        {
          "info": {
            "version": 120100,
            "blocks": 800001,
            "difficulty": 1.0,
            "network": "livenet"
          }
        }
        "#;
        let body: StatusResponse = serde_json::from_str(json).expect("status should parse");
        assert_eq!(body.info.blocks, 800001);
    }

    #[test]
    fn missing_blocks_is_rejected() {
        let json = r#"{"info": {"version": 120100}}"#;
        assert!(serde_json::from_str::<StatusResponse>(json).is_err());
    }
}
