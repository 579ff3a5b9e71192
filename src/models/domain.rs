use serde::{Deserialize, Serialize};
use crate::core::emotions::Emotion;

/// One ranked entry of an analysis response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmotionResult {
    pub emotion: Emotion,
    pub confidence: f64,
    pub description: String,
}

impl EmotionResult {
    pub fn new(emotion: Emotion, confidence: f64) -> Self {
        Self {
            emotion,
            confidence,
            description: emotion.description().to_string(),
        }
    }

    /// Confidence as a percentage (0-100)
    pub fn percent(&self) -> f64 {
        self.confidence * 100.0
    }
}

/// An uploaded image as received from a file picker or a multipart form
///
/// Only the declared MIME type and the byte length are ever inspected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageUpload {
    pub filename: String,
    pub content_type: String,
    pub data: Vec<u8>,
}

impl ImageUpload {
    pub fn new(
        filename: impl Into<String>,
        content_type: impl Into<String>,
        data: Vec<u8>,
    ) -> Self {
        Self {
            filename: filename.into(),
            content_type: content_type.into(),
            data,
        }
    }

    pub fn size(&self) -> usize {
        self.data.len()
    }
}

/// Size and type limits applied to uploads
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadLimits {
    pub max_file_size_bytes: usize,
    pub allowed_types: Vec<String>,
}

pub const DEFAULT_MAX_FILE_SIZE_BYTES: usize = 10 * 1024 * 1024;

pub const DEFAULT_ALLOWED_TYPES: [&str; 4] = ["image/jpeg", "image/jpg", "image/png", "image/webp"];

impl Default for UploadLimits {
    fn default() -> Self {
        Self {
            max_file_size_bytes: DEFAULT_MAX_FILE_SIZE_BYTES,
            allowed_types: DEFAULT_ALLOWED_TYPES.iter().map(|t| t.to_string()).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_result_carries_label_description() {
        let result = EmotionResult::new(Emotion::Fear, 0.12);
        assert_eq!(result.description, Emotion::Fear.description());
        assert!((result.percent() - 12.0).abs() < 1e-9);
    }

    #[test]
    fn test_result_json_shape() {
        let result = EmotionResult::new(Emotion::Happy, 0.8);
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["emotion"], "happy");
        assert_eq!(json["confidence"], 0.8);
        assert!(json["description"].as_str().unwrap().starts_with("A positive"));
    }

    #[test]
    fn test_default_limits() {
        let limits = UploadLimits::default();
        assert_eq!(limits.max_file_size_bytes, 10_485_760);
        assert_eq!(limits.allowed_types.len(), 4);
    }
}
