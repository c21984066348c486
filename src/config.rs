use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::models::{ScoringPoints, SelectionPolicy};
use crate::services::RankingOptions;

/// Application configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub catalog: CatalogSettings,
    #[serde(default)]
    pub matching: MatchingSettings,
    #[serde(default)]
    pub scoring: ScoringSettings,
    #[serde(default)]
    pub selection: SelectionSettings,
    #[serde(default)]
    pub ranking: RankingSettings,
    #[serde(default)]
    pub cache: CacheSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    pub workers: Option<usize>,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            workers: None,
        }
    }
}

fn default_host() -> String { "0.0.0.0".to_string() }
fn default_port() -> u16 { 8080 }

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CatalogSettings {
    /// JSON catalog on disk; the compiled-in catalog is used when unset
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct MatchingSettings {
    /// Reject profiles carrying unknown or missing values instead of
    /// treating them as matching nothing
    #[serde(default)]
    pub strict_profile: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ScoringSettings {
    #[serde(default)]
    pub points: PointsConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PointsConfig {
    #[serde(default = "default_interest_points")]
    pub interest: i32,
    #[serde(default = "default_age_match_points")]
    pub age_match: i32,
    #[serde(default = "default_age_mismatch_penalty")]
    pub age_mismatch_penalty: i32,
    #[serde(default = "default_region_points")]
    pub region: i32,
    #[serde(default = "default_education_points")]
    pub education: i32,
    #[serde(default = "default_income_points")]
    pub income: i32,
    #[serde(default = "default_marital_status_points")]
    pub marital_status: i32,
    #[serde(default = "default_has_children_points")]
    pub has_children: i32,
    #[serde(default = "default_support_parents_points")]
    pub support_parents: i32,
    #[serde(default = "default_high_benefit_points")]
    pub high_benefit: i32,
    #[serde(default = "default_easy_application_points")]
    pub easy_application: i32,
}

impl Default for PointsConfig {
    fn default() -> Self {
        Self {
            interest: default_interest_points(),
            age_match: default_age_match_points(),
            age_mismatch_penalty: default_age_mismatch_penalty(),
            region: default_region_points(),
            education: default_education_points(),
            income: default_income_points(),
            marital_status: default_marital_status_points(),
            has_children: default_has_children_points(),
            support_parents: default_support_parents_points(),
            high_benefit: default_high_benefit_points(),
            easy_application: default_easy_application_points(),
        }
    }
}

fn default_interest_points() -> i32 { 50 }
fn default_age_match_points() -> i32 { 20 }
fn default_age_mismatch_penalty() -> i32 { 50 }
fn default_region_points() -> i32 { 15 }
fn default_education_points() -> i32 { 10 }
fn default_income_points() -> i32 { 25 }
fn default_marital_status_points() -> i32 { 10 }
fn default_has_children_points() -> i32 { 15 }
fn default_support_parents_points() -> i32 { 10 }
fn default_high_benefit_points() -> i32 { 10 }
fn default_easy_application_points() -> i32 { 5 }

impl From<&PointsConfig> for ScoringPoints {
    fn from(points: &PointsConfig) -> Self {
        ScoringPoints {
            interest: points.interest,
            age_match: points.age_match,
            age_mismatch_penalty: points.age_mismatch_penalty,
            region: points.region,
            education: points.education,
            income: points.income,
            marital_status: points.marital_status,
            has_children: points.has_children,
            support_parents: points.support_parents,
            high_benefit: points.high_benefit,
            easy_application: points.easy_application,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct SelectionSettings {
    #[serde(default = "default_score_floor")]
    pub score_floor: i32,
    #[serde(default = "default_score_window")]
    pub score_window: i32,
    #[serde(default = "default_min_results")]
    pub min_results: usize,
    #[serde(default = "default_max_results")]
    pub max_results: usize,
    #[serde(default = "default_gap_rank")]
    pub gap_rank: usize,
    #[serde(default = "default_max_gap")]
    pub max_gap: i32,
    #[serde(default = "default_compressed_results")]
    pub compressed_results: usize,
}

impl Default for SelectionSettings {
    fn default() -> Self {
        Self {
            score_floor: default_score_floor(),
            score_window: default_score_window(),
            min_results: default_min_results(),
            max_results: default_max_results(),
            gap_rank: default_gap_rank(),
            max_gap: default_max_gap(),
            compressed_results: default_compressed_results(),
        }
    }
}

fn default_score_floor() -> i32 { 30 }
fn default_score_window() -> i32 { 50 }
fn default_min_results() -> usize { 3 }
fn default_max_results() -> usize { 25 }
fn default_gap_rank() -> usize { 10 }
fn default_max_gap() -> i32 { 30 }
fn default_compressed_results() -> usize { 10 }

impl From<&SelectionSettings> for SelectionPolicy {
    fn from(selection: &SelectionSettings) -> Self {
        SelectionPolicy {
            score_floor: selection.score_floor,
            score_window: selection.score_window,
            min_results: selection.min_results,
            max_results: selection.max_results,
            gap_rank: selection.gap_rank,
            max_gap: selection.max_gap,
            compressed_results: selection.compressed_results,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct RankingSettings {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default = "default_ranking_endpoint")]
    pub endpoint: String,
    #[serde(default)]
    pub api_key: String,
    #[serde(default = "default_ranking_model")]
    pub model: String,
    #[serde(default = "default_ranking_timeout")]
    pub timeout_secs: u64,
    #[serde(default = "default_ranking_temperature")]
    pub temperature: f32,
    #[serde(default = "default_ranking_max_tokens")]
    pub max_tokens: u32,
}

impl Default for RankingSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            endpoint: default_ranking_endpoint(),
            api_key: String::new(),
            model: default_ranking_model(),
            timeout_secs: default_ranking_timeout(),
            temperature: default_ranking_temperature(),
            max_tokens: default_ranking_max_tokens(),
        }
    }
}

fn default_ranking_endpoint() -> String { "https://api.openai.com/v1".to_string() }
fn default_ranking_model() -> String { "gpt-4o-mini".to_string() }
fn default_ranking_timeout() -> u64 { 15 }
fn default_ranking_temperature() -> f32 { 0.7 }
fn default_ranking_max_tokens() -> u32 { 1000 }

impl RankingSettings {
    /// Client options, or `None` when ranking is disabled or has no key
    pub fn options(&self) -> Option<RankingOptions> {
        if !self.enabled || self.api_key.trim().is_empty() {
            return None;
        }

        Some(RankingOptions {
            endpoint: self.endpoint.clone(),
            api_key: self.api_key.clone(),
            model: self.model.clone(),
            timeout: Duration::from_secs(self.timeout_secs),
            temperature: self.temperature,
            max_tokens: self.max_tokens,
        })
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CacheSettings {
    #[serde(default = "default_cache_ttl")]
    pub ttl_secs: u64,
    #[serde(default = "default_cache_capacity")]
    pub capacity: u64,
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            ttl_secs: default_cache_ttl(),
            capacity: default_cache_capacity(),
        }
    }
}

fn default_cache_ttl() -> u64 { 600 }
fn default_cache_capacity() -> u64 { 1000 }

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String { "info".to_string() }
fn default_log_format() -> String { "json".to_string() }

fn environment() -> Environment {
    // e.g., BENEFIT__SERVER__PORT -> server.port
    Environment::with_prefix("BENEFIT")
        .prefix_separator("__")
        .separator("__")
        .try_parsing(true)
}

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Local overrides (config/local.toml)
    /// 4. Environment variables (prefixed with BENEFIT__)
    pub fn load() -> Result<Self, ConfigError> {
        let mut settings = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            .add_source(environment())
            .build()?;

        settings = substitute_env_vars(settings)?;

        settings.try_deserialize()
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(environment())
            .build()?;

        substitute_env_vars(settings)?.try_deserialize()
    }

    pub fn scoring_points(&self) -> ScoringPoints {
        ScoringPoints::from(&self.scoring.points)
    }

    pub fn selection_policy(&self) -> SelectionPolicy {
        SelectionPolicy::from(&self.selection)
    }
}

/// Apply well-known environment variables that live outside the BENEFIT__ namespace
fn substitute_env_vars(settings: Config) -> Result<Config, ConfigError> {
    use std::env;

    let mut builder = Config::builder().add_source(settings);

    // BENEFIT__RANKING__API_KEY is already applied by the environment source
    if env::var("BENEFIT__RANKING__API_KEY").is_err() {
        if let Ok(api_key) = env::var("OPENAI_API_KEY") {
            builder = builder.set_override("ranking.api_key", api_key)?;
        }
    }

    builder.build()
}
