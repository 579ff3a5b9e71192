// Service exports
pub mod analyzer;
pub mod client;
pub mod mock;

pub use analyzer::EmotionAnalyzer;
pub use client::{guess_content_type, UploadClient};
pub use mock::{DelayRange, MockAnalysisService};
