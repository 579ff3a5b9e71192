use serde::{Deserialize, Serialize};
use crate::models::domain::EmotionResult;

/// Response body of `POST /upload`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadResponse {
    pub success: bool,
    #[serde(default)]
    pub results: Vec<EmotionResult>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl UploadResponse {
    pub fn success(results: Vec<EmotionResult>) -> Self {
        Self {
            success: true,
            results,
            error: None,
        }
    }

    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            results: Vec::new(),
            error: Some(error.into()),
        }
    }
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_omits_error_field() {
        let json = serde_json::to_value(UploadResponse::success(vec![])).unwrap();
        assert_eq!(json["success"], true);
        assert!(json.get("error").is_none());
    }

    #[test]
    fn test_failure_carries_message() {
        let json = serde_json::to_value(UploadResponse::failure("No file uploaded")).unwrap();
        assert_eq!(json["success"], false);
        assert_eq!(json["results"].as_array().unwrap().len(), 0);
        assert_eq!(json["error"], "No file uploaded");
    }

    #[test]
    fn test_error_only_body_parses() {
        let parsed: UploadResponse =
            serde_json::from_str(r#"{"success": false, "error": "boom"}"#).unwrap();
        assert!(parsed.results.is_empty());
        assert_eq!(parsed.error.as_deref(), Some("boom"));
    }
}
