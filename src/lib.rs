//! Emotion Lens - image upload service with mocked emotion analysis
//!
//! Uploads are validated by MIME type and size, then handed to a mock
//! analysis service that fabricates a ranked list of emotion confidences.
//! No image content is ever inspected.

pub mod config;
pub mod core;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use crate::core::{generate_results, validate_image, Emotion, ResultsView, Stage, UploadSession};
pub use error::{AnalysisError, AppError, ValidationError};
pub use models::{EmotionResult, ImageUpload, UploadLimits, UploadResponse};
pub use services::{EmotionAnalyzer, MockAnalysisService, UploadClient};
