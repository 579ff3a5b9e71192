use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

use crate::core::validation::validate_image;
use crate::error::{AnalysisError, ValidationError};
use crate::models::{EmotionResult, ImageUpload, UploadLimits};
use crate::services::EmotionAnalyzer;

/// How long a notice stays visible
pub const NOTICE_TTL_SECS: i64 = 5;

/// Where a session is in the upload flow
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Idle,
    Previewing,
    Analyzing,
    ResultsShown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
    Info,
}

/// A transient user-facing message
#[derive(Debug, Clone, PartialEq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

impl Notice {
    fn new(kind: NoticeKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            created_at: Utc::now(),
        }
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now - self.created_at >= Duration::seconds(NOTICE_TTL_SECS)
    }
}

/// The file currently chosen for analysis, with its preview
#[derive(Debug, Clone)]
pub struct SelectedImage {
    pub upload: ImageUpload,
    pub preview: String,
}

/// Build a `data:` URL for previewing an upload
pub fn preview_data_url(upload: &ImageUpload) -> String {
    format!("data:{};base64,{}", upload.content_type, STANDARD.encode(&upload.data))
}

/// Per-session UI state of the upload flow
///
/// Holds at most one selected image. Selecting again replaces it.
#[derive(Debug)]
pub struct UploadSession {
    id: Uuid,
    limits: UploadLimits,
    stage: Stage,
    selected: Option<SelectedImage>,
    results: Vec<EmotionResult>,
    notices: Vec<Notice>,
}

impl UploadSession {
    pub fn new(limits: UploadLimits) -> Self {
        Self {
            id: Uuid::new_v4(),
            limits,
            stage: Stage::Idle,
            selected: None,
            results: Vec::new(),
            notices: Vec::new(),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn selected(&self) -> Option<&SelectedImage> {
        self.selected.as_ref()
    }

    pub fn results(&self) -> &[EmotionResult] {
        &self.results
    }

    pub fn notices(&self) -> &[Notice] {
        &self.notices
    }

    /// Validate and select an image for analysis
    ///
    /// On failure the previous selection and stage are left untouched.
    pub fn select(&mut self, upload: ImageUpload) -> Result<&SelectedImage, ValidationError> {
        if let Err(e) = validate_image(&upload, &self.limits) {
            tracing::info!(session = %self.id, filename = %upload.filename, "Rejected upload: {}", e);
            self.notify(NoticeKind::Error, e.to_string());
            return Err(e);
        }

        tracing::debug!(session = %self.id, filename = %upload.filename, size = upload.size(), "Selected image");

        let preview = preview_data_url(&upload);
        self.results.clear();
        self.stage = Stage::Previewing;
        self.notify(NoticeKind::Success, "Image uploaded successfully!");

        Ok(self.selected.insert(SelectedImage { upload, preview }))
    }

    /// Drop the selection and any results
    pub fn clear(&mut self) {
        self.selected = None;
        self.results.clear();
        self.stage = Stage::Idle;
    }

    /// Send the selected image to an analyzer and keep the ranked results
    pub async fn analyze<A: EmotionAnalyzer>(
        &mut self,
        analyzer: &A,
    ) -> Result<&[EmotionResult], AnalysisError> {
        let Some(selected) = self.selected.as_ref() else {
            self.notify(NoticeKind::Error, AnalysisError::NothingSelected.to_string());
            return Err(AnalysisError::NothingSelected);
        };

        self.stage = Stage::Analyzing;
        self.notices.push(Notice::new(NoticeKind::Info, "Analyzing..."));
        let outcome = analyzer.analyze(&selected.upload).await;

        match outcome {
            Ok(results) if !results.is_empty() => {
                let primary = &results[0];
                let message = format!(
                    "Analysis complete! Primary emotion: {} ({:.1}%)",
                    primary.emotion,
                    primary.percent()
                );
                self.results = results;
                self.stage = Stage::ResultsShown;
                self.notify(NoticeKind::Success, message);
                Ok(&self.results)
            }
            Ok(_) => self.fail_analysis(AnalysisError::Failed),
            Err(e) => self.fail_analysis(e),
        }
    }

    fn fail_analysis(&mut self, e: AnalysisError) -> Result<&[EmotionResult], AnalysisError> {
        tracing::warn!(session = %self.id, "Analysis failed: {}", e);
        self.stage = Stage::Previewing;
        self.notify(NoticeKind::Error, "Failed to analyze image. Please try again.");
        Err(e)
    }

    /// Drop notices older than the display time
    pub fn dismiss_expired(&mut self, now: DateTime<Utc>) {
        self.notices.retain(|n| !n.is_expired(now));
    }

    fn notify(&mut self, kind: NoticeKind, message: impl Into<String>) {
        self.notices.push(Notice::new(kind, message));
    }
}

impl Default for UploadSession {
    fn default() -> Self {
        Self::new(UploadLimits::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::emotions::Emotion;

    struct FixedAnalyzer(Vec<EmotionResult>);

    impl EmotionAnalyzer for FixedAnalyzer {
        async fn analyze(&self, _upload: &ImageUpload) -> Result<Vec<EmotionResult>, AnalysisError> {
            Ok(self.0.clone())
        }
    }

    struct FailingAnalyzer;

    impl EmotionAnalyzer for FailingAnalyzer {
        async fn analyze(&self, _upload: &ImageUpload) -> Result<Vec<EmotionResult>, AnalysisError> {
            Err(AnalysisError::Failed)
        }
    }

    fn png() -> ImageUpload {
        ImageUpload::new("face.png", "image/png", vec![1, 2, 3])
    }

    fn fixed() -> FixedAnalyzer {
        FixedAnalyzer(vec![
            EmotionResult::new(Emotion::Happy, 0.873),
            EmotionResult::new(Emotion::Sad, 0.08),
            EmotionResult::new(Emotion::Fear, 0.06),
        ])
    }

    #[test]
    fn test_preview_data_url() {
        assert_eq!(preview_data_url(&png()), "data:image/png;base64,AQID");
    }

    #[test]
    fn test_select_moves_to_previewing() {
        let mut session = UploadSession::default();
        assert_eq!(session.stage(), Stage::Idle);

        let selected = session.select(png()).unwrap();
        assert!(selected.preview.starts_with("data:image/png;base64,"));
        assert_eq!(session.stage(), Stage::Previewing);
        assert_eq!(session.notices().last().unwrap().message, "Image uploaded successfully!");
    }

    #[test]
    fn test_rejected_select_keeps_previous_selection() {
        let mut session = UploadSession::default();
        session.select(png()).unwrap();

        let err = session
            .select(ImageUpload::new("notes.txt", "text/plain", vec![0; 4]))
            .unwrap_err();
        assert!(matches!(err, ValidationError::InvalidType { .. }));
        assert_eq!(session.selected().unwrap().upload.filename, "face.png");
        assert_eq!(session.stage(), Stage::Previewing);
        assert_eq!(session.notices().last().unwrap().kind, NoticeKind::Error);
    }

    #[test]
    fn test_reselect_overwrites() {
        let mut session = UploadSession::default();
        session.select(png()).unwrap();
        session
            .select(ImageUpload::new("other.webp", "image/webp", vec![9]))
            .unwrap();
        assert_eq!(session.selected().unwrap().upload.filename, "other.webp");
    }

    #[tokio::test]
    async fn test_analyze_without_selection() {
        let mut session = UploadSession::default();
        let err = session.analyze(&fixed()).await.unwrap_err();
        assert!(matches!(err, AnalysisError::NothingSelected));
        assert_eq!(session.stage(), Stage::Idle);
        assert_eq!(session.notices()[0].message, "Please select an image first");
    }

    #[tokio::test]
    async fn test_analyze_shows_results() {
        let mut session = UploadSession::default();
        session.select(png()).unwrap();

        let results = session.analyze(&fixed()).await.unwrap();
        assert_eq!(results.len(), 3);
        assert_eq!(session.stage(), Stage::ResultsShown);

        let kinds: Vec<_> = session.notices().iter().map(|n| n.kind).collect();
        assert_eq!(kinds, vec![NoticeKind::Success, NoticeKind::Info, NoticeKind::Success]);
        assert_eq!(session.notices()[1].message, "Analyzing...");
        assert_eq!(
            session.notices().last().unwrap().message,
            "Analysis complete! Primary emotion: happy (87.3%)"
        );
    }

    #[tokio::test]
    async fn test_failed_analysis_is_recoverable() {
        let mut session = UploadSession::default();
        session.select(png()).unwrap();

        assert!(session.analyze(&FailingAnalyzer).await.is_err());
        assert_eq!(session.stage(), Stage::Previewing);
        assert_eq!(
            session.notices().last().unwrap().message,
            "Failed to analyze image. Please try again."
        );

        // Retry with a working analyzer
        assert!(session.analyze(&fixed()).await.is_ok());
        assert_eq!(session.stage(), Stage::ResultsShown);
    }

    #[tokio::test]
    async fn test_clear_resets() {
        let mut session = UploadSession::default();
        session.select(png()).unwrap();
        session.analyze(&fixed()).await.unwrap();

        session.clear();
        assert_eq!(session.stage(), Stage::Idle);
        assert!(session.selected().is_none());
        assert!(session.results().is_empty());
    }

    #[test]
    fn test_notices_expire() {
        let mut session = UploadSession::default();
        session.select(png()).unwrap();
        assert_eq!(session.notices().len(), 1);

        session.dismiss_expired(Utc::now());
        assert_eq!(session.notices().len(), 1);

        session.dismiss_expired(Utc::now() + Duration::seconds(NOTICE_TTL_SECS));
        assert!(session.notices().is_empty());
    }
}
