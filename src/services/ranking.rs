use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;
use thiserror::Error;

use crate::models::{ScoredBenefit, UserProfile};

/// Errors that can occur when asking the ranking model for an ordering
#[derive(Debug, Error)]
pub enum RankingError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("API returned error {status}: {body}")]
    ApiError { status: u16, body: String },

    #[error("Ranking model returned no content")]
    EmptyResponse,
}

const SYSTEM_PROMPT: &str = "당신은 한국의 정부/기업 지원 혜택 상담가입니다. \
사용자의 상황에 맞춰 아래 혜택 목록의 우선순위를 정하고 각 혜택마다 한두 문장의 추천 이유를 작성하세요.\n\
우선순위 기준:\n\
1. 신청 난이도가 낮을수록 우선 (쉬움 > 보통 > 어려움)\n\
2. 혜택 크기가 클수록 우선 (높음 > 중간 > 낮음)\n\
3. 사용자 상황과의 적합성\n\
JSON 배열로만 답하세요. 예: [{\"id\": \"housing_001\", \"reason\": \"추천 이유\"}]";

/// Connection settings for the ranking model
#[derive(Debug, Clone)]
pub struct RankingOptions {
    pub endpoint: String,
    pub api_key: String,
    pub model: String,
    pub timeout: Duration,
    pub temperature: f32,
    pub max_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Debug, Deserialize)]
struct ChatMessage {
    content: Option<String>,
}

/// Chat-completions client that asks a language model to re-rank candidates
///
/// The client only fetches the raw payload; parsing and every failure path
/// belong to the reconciler.
pub struct RankingClient {
    options: RankingOptions,
    client: Client,
}

impl RankingClient {
    pub fn new(options: RankingOptions) -> Result<Self, RankingError> {
        let client = Client::builder().timeout(options.timeout).build()?;
        Ok(Self { options, client })
    }

    /// Ask the model to order the candidates; returns its raw reply
    pub async fn rank(
        &self,
        profile: &UserProfile,
        candidates: &[ScoredBenefit],
    ) -> Result<String, RankingError> {
        let url = format!("{}/chat/completions", self.options.endpoint.trim_end_matches('/'));
        let body = serde_json::json!({
            "model": self.options.model,
            "messages": [
                { "role": "system", "content": SYSTEM_PROMPT },
                { "role": "user", "content": build_prompt(profile, candidates) },
            ],
            "temperature": self.options.temperature,
            "max_tokens": self.options.max_tokens,
        });

        tracing::debug!("Requesting ranking for {} candidates from {}", candidates.len(), url);

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.options.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(RankingError::ApiError {
                status: status.as_u16(),
                body,
            });
        }

        let reply: ChatResponse = response.json().await?;
        reply
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .filter(|content| !content.trim().is_empty())
            .ok_or(RankingError::EmptyResponse)
    }
}

fn label<T: std::fmt::Display>(value: Option<T>) -> String {
    value.map_or_else(|| "-".to_string(), |v| v.to_string())
}

/// Describe the user and the locally ranked candidates for the model
pub fn build_prompt(profile: &UserProfile, candidates: &[ScoredBenefit]) -> String {
    let mut prompt = format!(
        "사용자 정보:\n- 연령대: {}\n- 거주지역: {}\n- 최종학력: {}\n- 소득수준: {}\n- 혼인상태: {}\n- 자녀유무: {}\n- 부모부양: {}\n- 관심분야: {}\n\n후보 혜택:\n",
        label(profile.age),
        label(profile.region),
        label(profile.education),
        label(profile.income),
        label(profile.marital_status),
        label(profile.has_children),
        label(profile.support_parents),
        profile.interest_labels(),
    );

    for benefit in candidates {
        prompt.push_str(&format!(
            "- [{}] {}: {} (신청난이도: {}, 혜택크기: {})\n",
            benefit.id, benefit.title, benefit.description, benefit.difficulty, benefit.benefit
        ));
    }

    prompt
}
