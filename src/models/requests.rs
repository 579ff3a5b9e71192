use serde::{Deserialize, Serialize};

/// Query parameters accepted by `POST /upload`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UploadParams {
    /// Fixes the random source so the same upload yields the same ranking
    #[serde(default)]
    pub seed: Option<u64>,
}
