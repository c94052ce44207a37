//! HTTP client for the published lesson data

use std::time::Duration;

use anyhow::{Context, Result};
use courseplan_core::semester::{INDEX_FILE, lesson_file};
use tracing::{debug, info};

const REQUEST_TIMEOUT_SECS: u64 = 60;

/// Downloads the semester index and lesson files from a static host.
pub struct Client {
    http: reqwest::Client,
    base_url: String,
}

impl Client {
    pub fn new(base_url: &str) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// GET /lessonData_index.json
    pub async fn fetch_index(&self) -> Result<String> {
        self.get_text(INDEX_FILE).await
    }

    /// GET /LessonData/Parsed_<semester>.json
    pub async fn fetch_lessons(&self, semester: &str) -> Result<String> {
        self.get_text(&lesson_file(semester)).await
    }

    async fn get_text(&self, path: &str) -> Result<String> {
        let url = format!("{}/{}", self.base_url, path);
        debug!(%url, "requesting");

        let resp = self
            .http
            .get(&url)
            .send()
            .await
            .with_context(|| format!("Failed to connect to {url}"))?;

        if !resp.status().is_success() {
            anyhow::bail!("{} returned {}", url, resp.status());
        }

        let body = resp.text().await.with_context(|| format!("Failed to read {url}"))?;
        info!(%url, bytes = body.len(), "downloaded");
        Ok(body)
    }
}
