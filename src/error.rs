use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use thiserror::Error;

use crate::models::UploadResponse;

/// A rejected upload. Recoverable: the user may pick another file.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("No file uploaded")]
    MissingFile,

    #[error("No file selected")]
    EmptyFilename,

    #[error("Please upload a valid image file (JPEG, PNG, or WebP)")]
    InvalidType { content_type: String },

    #[error("Image size must be less than {}MB", .limit / (1024 * 1024))]
    TooLarge { size: usize, limit: usize },
}

/// A failed analysis call. Recoverable: the user may retry.
#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("Please select an image first")]
    NothingSelected,

    #[error("Could not produce a ranked result after {attempts} draws")]
    Exhausted { attempts: usize },

    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Server rejected the upload: {0}")]
    Server(String),

    #[error("Failed to analyze emotion. Please try again.")]
    Failed,
}

/// Errors surfaced by the HTTP layer
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Analysis(#[from] AnalysisError),

    #[error("Malformed multipart body: {0}")]
    Multipart(#[from] actix_multipart::MultipartError),
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) | AppError::Multipart(_) => StatusCode::BAD_REQUEST,
            AppError::Analysis(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(UploadResponse::failure(self.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_messages() {
        let err = ValidationError::InvalidType {
            content_type: "text/plain".to_string(),
        };
        assert!(err.to_string().contains("valid image file"));

        let err = ValidationError::TooLarge {
            size: 15 * 1024 * 1024,
            limit: 10 * 1024 * 1024,
        };
        assert_eq!(err.to_string(), "Image size must be less than 10MB");
    }

    #[test]
    fn test_status_codes() {
        let err = AppError::from(ValidationError::MissingFile);
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);

        let err = AppError::from(AnalysisError::Failed);
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
