// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{EmotionResult, ImageUpload, UploadLimits};
pub use requests::UploadParams;
pub use responses::{HealthResponse, UploadResponse};
