use crate::models::ExtractedBenefit;

/// Minimum quality score for an extracted benefit to be kept
pub const QUALITY_THRESHOLD: u8 = 60;

const MAX_QUALITY_SCORE: u32 = 100;

/// Calculate a completeness score (0-100) for an extracted benefit
///
/// Scoring:
/// - title longer than 5 characters          +20
/// - description longer than 20 characters   +20
/// - eligibility longer than 10 characters   +15
/// - at least one required document          +15
/// - each populated condition dimension      +5
/// - well-formed http(s) application URL     +10
pub fn calculate_quality_score(benefit: &ExtractedBenefit) -> u8 {
    let mut score: u32 = 0;

    if benefit.title.chars().count() > 5 {
        score += 20;
    }
    if benefit.description.chars().count() > 20 {
        score += 20;
    }
    if benefit.eligibility.chars().count() > 10 {
        score += 15;
    }
    if !benefit.documents.is_empty() {
        score += 15;
    }

    score += benefit.conditions.populated_dimensions() as u32 * 5;

    if is_well_formed_url(&benefit.apply_url) {
        score += 10;
    }

    score.min(MAX_QUALITY_SCORE) as u8
}

/// Whether an extracted benefit is usable downstream
#[inline]
pub fn passes_quality_gate(score: u8) -> bool {
    score >= QUALITY_THRESHOLD
}

// Stricter than a bare scheme check: http(s) only, with a host
fn is_well_formed_url(raw: &str) -> bool {
    url::Url::parse(raw.trim())
        .map(|url| matches!(url.scheme(), "http" | "https") && url.has_host())
        .unwrap_or(false)
}
