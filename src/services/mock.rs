use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::time::Duration;

use crate::core::generator::generate_results;
use crate::error::AnalysisError;
use crate::models::{EmotionResult, ImageUpload};
use crate::services::analyzer::EmotionAnalyzer;

/// Uniform range the artificial analysis delay is drawn from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DelayRange {
    pub min: Duration,
    pub max: Duration,
}

impl DelayRange {
    pub fn new(min: Duration, max: Duration) -> Self {
        Self { min, max }
    }

    pub fn from_millis(min_ms: u64, max_ms: u64) -> Self {
        Self::new(Duration::from_millis(min_ms), Duration::from_millis(max_ms))
    }

    /// No delay at all
    pub fn none() -> Self {
        Self::new(Duration::ZERO, Duration::ZERO)
    }

    /// Draw a delay in `[min, max)`; collapses to `min` when the range is empty
    pub fn sample<R: Rng>(&self, rng: &mut R) -> Duration {
        if self.max <= self.min {
            return self.min;
        }
        rng.gen_range(self.min..self.max)
    }
}

impl Default for DelayRange {
    fn default() -> Self {
        Self::from_millis(2000, 3000)
    }
}

/// Stand-in for an inference backend
///
/// Sleeps for a random delay, then fabricates a ranked list. The image
/// bytes are never read.
#[derive(Debug, Clone, Default)]
pub struct MockAnalysisService {
    delay: DelayRange,
}

impl MockAnalysisService {
    pub fn new(delay: DelayRange) -> Self {
        Self { delay }
    }

    pub fn delay(&self) -> DelayRange {
        self.delay
    }

    /// Analyze with an optional fixed seed
    pub async fn analyze_seeded(
        &self,
        upload: &ImageUpload,
        seed: Option<u64>,
    ) -> Result<Vec<EmotionResult>, AnalysisError> {
        let mut rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let delay = self.delay.sample(&mut rng);
        tracing::debug!(
            filename = %upload.filename,
            size = upload.size(),
            delay_ms = delay.as_millis() as u64,
            "Running mock analysis"
        );
        tokio::time::sleep(delay).await;

        let results = generate_results(&mut rng)?;

        if let Some(primary) = results.first() {
            tracing::info!(
                filename = %upload.filename,
                primary = %primary.emotion,
                confidence = primary.confidence,
                count = results.len(),
                "Mock analysis complete"
            );
        }

        Ok(results)
    }
}

impl EmotionAnalyzer for MockAnalysisService {
    async fn analyze(&self, upload: &ImageUpload) -> Result<Vec<EmotionResult>, AnalysisError> {
        self.analyze_seeded(upload, None).await
    }
}
