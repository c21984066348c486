use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::core::dedup::{dedupe, Titled};
use crate::core::quality::{calculate_quality_score, passes_quality_gate};
use crate::models::ExtractedBenefit;

/// An extracted benefit that passed the quality gate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QualifiedBenefit {
    #[serde(flatten)]
    pub benefit: ExtractedBenefit,
    #[serde(rename = "qualityScore")]
    pub quality_score: u8,
}

impl Titled for QualifiedBenefit {
    fn title(&self) -> &str {
        &self.benefit.title
    }
}

/// Counts describing one ingest run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngestSummary {
    #[serde(rename = "totalExtracted")]
    pub total_extracted: usize,
    #[serde(rename = "highQuality")]
    pub high_quality: usize,
    #[serde(rename = "uniqueNew")]
    pub unique_new: usize,
    /// High-quality benefits per category
    pub categories: BTreeMap<String, usize>,
}

#[derive(Debug, Clone, Default)]
pub struct IngestOutcome {
    pub benefits: Vec<QualifiedBenefit>,
    pub summary: IngestSummary,
}

/// Assign identifiers and timestamps to freshly extracted records
pub fn stamp_new(batch: Vec<ExtractedBenefit>) -> Vec<ExtractedBenefit> {
    let now = chrono::Utc::now();
    batch
        .into_iter()
        .map(|mut benefit| {
            if benefit.id.trim().is_empty() {
                benefit.id = format!("extracted_{}", uuid::Uuid::new_v4().simple());
            }
            benefit.extracted_at.get_or_insert(now);
            benefit
        })
        .collect()
}

/// Quality-gate a batch, order it by quality and drop titles that already exist
pub fn process_extracted<I, S>(existing_titles: I, batch: Vec<ExtractedBenefit>) -> IngestOutcome
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let total_extracted = batch.len();

    let mut qualified: Vec<QualifiedBenefit> = batch
        .into_iter()
        .map(|benefit| {
            let quality_score = calculate_quality_score(&benefit);
            QualifiedBenefit { benefit, quality_score }
        })
        .filter(|q| passes_quality_gate(q.quality_score))
        .collect();

    qualified.sort_by(|a, b| b.quality_score.cmp(&a.quality_score));

    let mut categories = BTreeMap::new();
    for q in &qualified {
        *categories.entry(q.benefit.category.clone()).or_insert(0) += 1;
    }
    let high_quality = qualified.len();

    let benefits = dedupe(existing_titles, qualified);

    tracing::info!(
        "Ingested {} extracted benefits: {} high quality, {} new",
        total_extracted,
        high_quality,
        benefits.len()
    );

    IngestOutcome {
        summary: IngestSummary {
            total_extracted,
            high_quality,
            unique_new: benefits.len(),
            categories,
        },
        benefits,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TargetGroups;

    fn create_extracted(title: &str, category: &str, complete: bool) -> ExtractedBenefit {
        ExtractedBenefit {
            id: String::new(),
            title: title.to_string(),
            category: category.to_string(),
            description: if complete { "충분히 긴 혜택 설명 문장입니다. 스물 자 이상".to_string() } else { String::new() },
            difficulty: None,
            benefit: None,
            agency: "기관".to_string(),
            eligibility: if complete { "만 19세 이상 34세 이하".to_string() } else { String::new() },
            documents: if complete { vec!["신분증".to_string()] } else { vec![] },
            apply_url: "https://www.gov.kr".to_string(),
            conditions: TargetGroups {
                interests: Some(vec![category.to_string()]),
                ..Default::default()
            },
            source_url: None,
            extracted_at: None,
            is_new: true,
        }
    }

    #[test]
    fn test_process_extracted_summary() {
        let batch = vec![
            create_extracted("청년 월세 특별지원", "주거 지원", true),
            create_extracted("짧은 공지 사항입니다", "주거 지원", false),
            create_extracted("청년 전세자금대출", "주거 지원", true),
            create_extracted("국민취업지원제도", "교육/취업", true),
        ];

        let outcome = process_extracted(["청년전세자금대출"], batch);

        assert_eq!(outcome.summary.total_extracted, 4);
        assert_eq!(outcome.summary.high_quality, 3);
        assert_eq!(outcome.summary.unique_new, 2);
        assert_eq!(outcome.summary.categories.get("주거 지원"), Some(&2));
        assert_eq!(outcome.summary.categories.get("교육/취업"), Some(&1));

        let titles: Vec<&str> = outcome.benefits.iter().map(|b| b.title()).collect();
        assert_eq!(titles, vec!["청년 월세 특별지원", "국민취업지원제도"]);
        assert!(outcome.benefits.iter().all(|b| b.quality_score == 85));
    }

    #[test]
    fn test_stamp_new_preserves_existing_ids() {
        let mut keep = create_extracted("기존 혜택 항목", "주거 지원", true);
        keep.id = "extracted_fixed".to_string();
        let fresh = create_extracted("새로운 혜택 항목", "주거 지원", true);

        let stamped = stamp_new(vec![keep, fresh]);

        assert_eq!(stamped[0].id, "extracted_fixed");
        assert!(stamped[1].id.starts_with("extracted_"));
        assert_ne!(stamped[1].id, "extracted_");
        assert!(stamped.iter().all(|b| b.extracted_at.is_some()));
    }
}
