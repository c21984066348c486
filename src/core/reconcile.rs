use std::collections::HashMap;

use serde::Deserialize;

use crate::models::{ExternalRank, ScoredBenefit};

/// Reason stamped on every item when no usable external ranking exists
pub const MATCHED_REASON: &str = "조건에 맞는 혜택입니다.";

/// Reason stamped on items the external ranking did not mention
pub const ADDITIONAL_REASON: &str = "조건에 맞는 추가 혜택입니다.";

#[derive(Deserialize)]
#[serde(untagged)]
enum RankingPayload {
    List(Vec<ExternalRank>),
    Wrapped { recommendations: Vec<ExternalRank> },
}

impl From<RankingPayload> for Vec<ExternalRank> {
    fn from(payload: RankingPayload) -> Self {
        match payload {
            RankingPayload::List(ranks) => ranks,
            RankingPayload::Wrapped { recommendations } => recommendations,
        }
    }
}

/// Strip a Markdown code fence (```json ... ```) around a payload
fn strip_code_fence(raw: &str) -> &str {
    let trimmed = raw.trim();
    let Some(inner) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let inner = inner.strip_suffix("```").unwrap_or(inner);

    // The info string ("json") is a bare word, either on its own line
    // or directly in front of a single-line payload
    let is_info = |word: &str| word.chars().all(|c| c.is_ascii_alphanumeric());
    match inner.split_once('\n') {
        Some((first, body)) if is_info(first.trim()) => body.trim(),
        _ => inner.trim_start_matches(|c: char| c.is_ascii_alphanumeric()).trim(),
    }
}

/// Parse a raw ranking payload as returned by the ranking model
pub fn parse_external_ranking(raw: &str) -> Result<Vec<ExternalRank>, serde_json::Error> {
    let payload: RankingPayload = serde_json::from_str(strip_code_fence(raw))?;
    Ok(payload.into())
}

/// Parse a ranking supplied as a JSON value; a string is parsed as raw model output
pub fn parse_external_value(value: serde_json::Value) -> Result<Vec<ExternalRank>, serde_json::Error> {
    match value {
        serde_json::Value::String(raw) => parse_external_ranking(&raw),
        other => {
            let payload: RankingPayload = serde_json::from_value(other)?;
            Ok(payload.into())
        }
    }
}

/// Merge an external ordering with the local ranking
///
/// External entries come first, in their order, carrying their reason.
/// Unknown identifiers are dropped and repeated ones are placed once. Local
/// items the external ranking omitted follow in their original order. With no
/// external ranking the local order is kept and every item gets
/// [`MATCHED_REASON`].
pub fn reconcile(local: Vec<ScoredBenefit>, external: Option<&[ExternalRank]>) -> Vec<ScoredBenefit> {
    let Some(external) = external else {
        return stamp(local, MATCHED_REASON);
    };

    let mut positions: HashMap<String, usize> = HashMap::with_capacity(local.len());
    for (index, benefit) in local.iter().enumerate() {
        positions.entry(benefit.id.clone()).or_insert(index);
    }

    let mut slots: Vec<Option<ScoredBenefit>> = local.into_iter().map(Some).collect();
    let mut ordered = Vec::with_capacity(slots.len());

    for rank in external {
        let Some(&index) = positions.get(rank.id.as_str()) else {
            tracing::debug!("Dropping ranked id {} not present in local ranking", rank.id);
            continue;
        };
        if let Some(mut benefit) = slots[index].take() {
            let reason = if rank.reason.trim().is_empty() { MATCHED_REASON } else { rank.reason.as_str() };
            benefit.ai_reason = Some(reason.to_string());
            ordered.push(benefit);
        }
    }

    let remaining: Vec<ScoredBenefit> = slots.into_iter().flatten().collect();
    ordered.extend(stamp(remaining, ADDITIONAL_REASON));
    ordered
}

/// Reconcile against a raw payload, falling back to the local order when it
/// is absent or cannot be parsed
pub fn reconcile_raw(local: Vec<ScoredBenefit>, raw: Option<&str>) -> Vec<ScoredBenefit> {
    match raw.map(parse_external_ranking) {
        Some(Ok(ranks)) => reconcile(local, Some(ranks.as_slice())),
        Some(Err(e)) => {
            tracing::warn!("Malformed external ranking, using local order: {}", e);
            reconcile(local, None)
        }
        None => reconcile(local, None),
    }
}

fn stamp(benefits: Vec<ScoredBenefit>, reason: &str) -> Vec<ScoredBenefit> {
    benefits
        .into_iter()
        .map(|mut benefit| {
            benefit.ai_reason = Some(reason.to_string());
            benefit
        })
        .collect()
}
