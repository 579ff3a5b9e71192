use std::future::Future;

use crate::error::AnalysisError;
use crate::models::{EmotionResult, ImageUpload};

/// Anything that can turn a validated upload into ranked emotion results
///
/// Implemented by the in-process mock service and by the HTTP client, so
/// an [`UploadSession`](crate::core::session::UploadSession) can drive either.
pub trait EmotionAnalyzer {
    fn analyze(
        &self,
        upload: &ImageUpload,
    ) -> impl Future<Output = Result<Vec<EmotionResult>, AnalysisError>> + Send;
}
