use reqwest::multipart::{Form, Part};
use reqwest::Client;
use std::path::Path;
use std::time::Duration;

use crate::error::AnalysisError;
use crate::models::{EmotionResult, ImageUpload, UploadResponse};
use crate::services::analyzer::EmotionAnalyzer;

/// HTTP client for the `POST /upload` endpoint
pub struct UploadClient {
    base_url: String,
    client: Client,
    seed: Option<u64>,
}

impl UploadClient {
    /// Create a new client pointing at a server root, e.g. `http://localhost:5000`
    pub fn new(base_url: impl Into<String>) -> Result<Self, AnalysisError> {
        let client = Client::builder().timeout(Duration::from_secs(30)).build()?;

        Ok(Self {
            base_url: base_url.into(),
            client,
            seed: None,
        })
    }

    /// Ask the server for a deterministic ranking
    pub fn with_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    fn upload_url(&self) -> String {
        format!("{}/upload", self.base_url.trim_end_matches('/'))
    }

    /// Post the upload as multipart field `file` and return the ranked results
    pub async fn upload(&self, upload: &ImageUpload) -> Result<Vec<EmotionResult>, AnalysisError> {
        let part = Part::bytes(upload.data.clone())
            .file_name(upload.filename.clone())
            .mime_str(&upload.content_type)?;
        let form = Form::new().part("file", part);

        let mut request = self.client.post(self.upload_url()).multipart(form);
        if let Some(seed) = self.seed {
            request = request.query(&[("seed", seed)]);
        }

        tracing::debug!("Uploading {} ({} bytes) to {}", upload.filename, upload.size(), self.upload_url());

        let response = request.send().await?;
        let status = response.status();
        let body: UploadResponse = response.json().await?;

        if body.success {
            return Ok(body.results);
        }

        let message = body
            .error
            .unwrap_or_else(|| format!("upload failed with status {}", status));
        tracing::warn!("Upload of {} rejected: {}", upload.filename, message);
        Err(AnalysisError::Server(message))
    }
}

impl EmotionAnalyzer for UploadClient {
    async fn analyze(&self, upload: &ImageUpload) -> Result<Vec<EmotionResult>, AnalysisError> {
        self.upload(upload).await
    }
}

/// Guess a MIME type from a file extension
///
/// Unknown extensions map to `application/octet-stream`, which validation rejects.
pub fn guess_content_type(path: &Path) -> &'static str {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());

    match extension.as_deref() {
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("png") => "image/png",
        Some("webp") => "image/webp",
        Some("gif") => "image/gif",
        Some("txt") => "text/plain",
        _ => "application/octet-stream",
    }
}
