use std::time::Duration;

use anyhow::{anyhow, Context};
use async_trait::async_trait;
use bytes::Bytes;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

/// Image classifier returning distinct ingredient labels in first-seen order.
#[async_trait]
pub trait IngredientDetector: Send + Sync {
    async fn detect(&self, image: Bytes, content_type: &str) -> anyhow::Result<Vec<String>>;
}

#[derive(Debug, Clone, Deserialize)]
pub struct Detection {
    pub label: String,
    pub confidence: f32,
}

#[derive(Debug, Deserialize)]
struct DetectResponse {
    #[serde(default)]
    detections: Vec<Detection>,
}

/// Drops low-confidence boxes and repeated labels, keeping first-seen order.
pub fn distinct_labels(detections: Vec<Detection>, min_confidence: f32) -> Vec<String> {
    let mut labels: Vec<String> = Vec::new();
    for d in detections {
        if d.confidence < min_confidence || labels.contains(&d.label) {
            continue;
        }
        labels.push(d.label);
    }
    labels
}

/// Talks to an object-detection sidecar: `POST {base}/detect` with the raw image body,
/// answered by `{"detections": [{"label", "confidence"}]}`.
pub struct HttpDetector {
    client: Client,
    url: String,
    min_confidence: f32,
}

impl HttpDetector {
    pub fn new(base_url: &str, min_confidence: f32, timeout_secs: u64) -> anyhow::Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .context("build detector http client")?;
        Ok(Self {
            client,
            url: format!("{}/detect", base_url.trim_end_matches('/')),
            min_confidence,
        })
    }
}

#[async_trait]
impl IngredientDetector for HttpDetector {
    async fn detect(&self, image: Bytes, content_type: &str) -> anyhow::Result<Vec<String>> {
        let response = self
            .client
            .post(&self.url)
            .header(reqwest::header::CONTENT_TYPE, content_type)
            .body(image)
            .send()
            .await
            .context("detector unreachable")?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(anyhow!("detector returned {}: {}", status.as_u16(), text));
        }

        let parsed: DetectResponse = response.json().await.context("malformed detector response")?;
        debug!(boxes = parsed.detections.len(), "detector answered");
        Ok(distinct_labels(parsed.detections, self.min_confidence))
    }
}

/// Used when no detector is configured.
pub struct DisabledDetector;

#[async_trait]
impl IngredientDetector for DisabledDetector {
    async fn detect(&self, _image: Bytes, _content_type: &str) -> anyhow::Result<Vec<String>> {
        Ok(Vec::new())
    }
}
