use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::domain::ExtractedBenefit;
use crate::models::profile::ProfileInput;

/// Request to recommend benefits for a profile
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendRequest {
    #[serde(flatten)]
    pub profile: ProfileInput,
    /// Caller-supplied priority ranking; any shape is accepted and a
    /// malformed value falls back to the local order
    #[serde(rename = "externalRanking", default)]
    pub external_ranking: Option<serde_json::Value>,
}

/// Request to merge freshly extracted benefits into the persisted set
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct IngestRequest {
    #[serde(rename = "existingTitles", default)]
    pub existing_titles: Vec<String>,
    #[validate(length(max = 500))]
    #[serde(default)]
    pub benefits: Vec<ExtractedBenefit>,
}
