use actix_multipart::Multipart;
use actix_web::{web, HttpResponse, Responder};
use futures_util::StreamExt;

use crate::core::validation::{validate_content_type, validate_image};
use crate::error::{AppError, ValidationError};
use crate::models::{HealthResponse, ImageUpload, UploadLimits, UploadParams, UploadResponse};
use crate::services::MockAnalysisService;

// Embed the upload page directly in the binary
const UI_HTML: &str = include_str!("ui.html");

/// Name of the multipart field carrying the image
pub const FILE_FIELD: &str = "file";

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub analyzer: MockAnalysisService,
    pub limits: UploadLimits,
}

/// Configure upload-related routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/", web::get().to(index))
        .route("/health", web::get().to(health_check))
        .route("/upload", web::post().to(upload));
}

async fn index() -> impl Responder {
    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(UI_HTML)
}

/// Health check endpoint
async fn health_check() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

/// Analyze an uploaded image
///
/// POST /upload?seed={seed}
///
/// Multipart form with a single `file` field. Response body:
/// ```json
/// {
///   "success": true,
///   "results": [{ "emotion": "happy", "confidence": 0.87, "description": "..." }]
/// }
/// ```
async fn upload(
    state: web::Data<AppState>,
    params: web::Query<UploadParams>,
    mut payload: Multipart,
) -> Result<HttpResponse, AppError> {
    let upload = match read_file_field(&mut payload, &state.limits).await {
        Ok(upload) => upload,
        Err(e) => {
            // Consume the body so the client reads the JSON error, not a reset
            drain_payload(&mut payload).await;
            return Err(e);
        }
    };
    validate_image(&upload, &state.limits)?;

    tracing::info!(
        "Analyzing upload {} ({}, {} bytes)",
        upload.filename,
        upload.content_type,
        upload.size()
    );

    let results = state.analyzer.analyze_seeded(&upload, params.seed).await?;

    Ok(HttpResponse::Ok().json(UploadResponse::success(results)))
}

/// Pull the `file` field out of a multipart body
///
/// Other fields are skipped. Once the file grows past the size limit the
/// rest of the field is read and discarded, so at most `limit` bytes are
/// buffered and the reported size is the full field length.
pub(crate) async fn read_file_field(
    payload: &mut Multipart,
    limits: &UploadLimits,
) -> Result<ImageUpload, AppError> {
    while let Some(field) = payload.next().await {
        let mut field = field?;

        let (name, filename) = match field.content_disposition() {
            Some(cd) => (
                cd.get_name().unwrap_or_default().to_string(),
                cd.get_filename().unwrap_or_default().to_string(),
            ),
            None => continue,
        };

        if name != FILE_FIELD {
            tracing::debug!("Skipping multipart field {:?}", name);
            continue;
        }

        if filename.is_empty() {
            return Err(ValidationError::EmptyFilename.into());
        }

        let content_type = field
            .content_type()
            .map(|mime| mime.essence_str().to_string())
            .unwrap_or_default();
        validate_content_type(&content_type, limits)?;

        let mut data = Vec::new();
        let mut size = 0usize;
        while let Some(chunk) = field.next().await {
            let chunk = chunk?;
            size += chunk.len();
            if size <= limits.max_file_size_bytes {
                data.extend_from_slice(&chunk);
            } else if !data.is_empty() {
                data = Vec::new();
            }
        }

        if size > limits.max_file_size_bytes {
            tracing::info!("Upload {} is {} bytes, over the {} byte limit", filename, size, limits.max_file_size_bytes);
            return Err(ValidationError::TooLarge {
                size,
                limit: limits.max_file_size_bytes,
            }
            .into());
        }

        return Ok(ImageUpload::new(filename, content_type, data));
    }

    Err(ValidationError::MissingFile.into())
}

/// Read and discard whatever is left of a multipart body
pub(crate) async fn drain_payload(payload: &mut Multipart) {
    while let Some(field) = payload.next().await {
        let mut field = match field {
            Ok(field) => field,
            Err(e) => {
                tracing::debug!("Stopped draining multipart body: {}", e);
                return;
            }
        };
        while let Some(chunk) = field.next().await {
            if chunk.is_err() {
                return;
            }
        }
    }
}
