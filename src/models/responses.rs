use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::core::ingest::QualifiedBenefit;
use crate::models::domain::ScoredBenefit;
use crate::models::profile::UserProfile;

/// Response for the recommend endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendResponse {
    pub benefits: Vec<ScoredBenefit>,
    #[serde(rename = "totalCount")]
    pub total_count: usize,
    #[serde(rename = "userProfile")]
    pub user_profile: UserProfile,
    pub cached: bool,
}

/// Outcome of one ingest run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateReport {
    pub timestamp: chrono::DateTime<chrono::Utc>,
    #[serde(rename = "totalExtracted")]
    pub total_extracted: usize,
    #[serde(rename = "highQuality")]
    pub high_quality: usize,
    #[serde(rename = "uniqueNew")]
    pub unique_new: usize,
    pub categories: BTreeMap<String, usize>,
    pub benefits: Vec<QualifiedBenefit>,
}

/// Response for the ingest endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IngestResponse {
    pub message: String,
    pub data: UpdateReport,
}

/// Ingest status snapshot
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateStatus {
    #[serde(rename = "isUpdating")]
    pub is_updating: bool,
    #[serde(rename = "lastUpdate")]
    pub last_update: Option<chrono::DateTime<chrono::Utc>>,
    #[serde(rename = "lastResults")]
    pub last_results: Option<UpdateReport>,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
    #[serde(rename = "catalogSize")]
    pub catalog_size: usize,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}
