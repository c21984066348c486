use crate::core::{
    catalog::Catalog,
    materialize::{materialize_with, Placeholders},
    scoring::calculate_match_score,
};
use crate::models::{BenefitTemplate, ScoredBenefit, ScoringPoints, SelectionPolicy, UserProfile};

/// Result of the selection process
#[derive(Debug, Clone, Default)]
pub struct Selection {
    pub benefits: Vec<ScoredBenefit>,
    pub total_candidates: usize,
    pub top_score: Option<i32>,
    pub min_acceptable: Option<i32>,
}

impl Selection {
    /// An empty selection is a valid outcome, not a failure
    pub fn is_empty(&self) -> bool {
        self.benefits.is_empty()
    }
}

/// Main selection orchestrator - scores the catalog and applies the dynamic cutoff
///
/// # Pipeline Stages
/// 1. Score every template
/// 2. Stable sort by score, descending
/// 3. Keep scores within the window below the top score (and above the floor)
/// 4. Clamp the count, tightening it when scores drop off steeply
/// 5. Materialize the survivors
#[derive(Debug, Clone)]
pub struct Selector {
    points: ScoringPoints,
    policy: SelectionPolicy,
}

impl Selector {
    pub fn new(points: ScoringPoints, policy: SelectionPolicy) -> Self {
        Self { points, policy }
    }

    pub fn with_defaults() -> Self {
        Self::new(ScoringPoints::default(), SelectionPolicy::default())
    }

    pub fn policy(&self) -> &SelectionPolicy {
        &self.policy
    }

    /// Score one template against a profile
    pub fn score(&self, template: &BenefitTemplate, profile: &UserProfile) -> i32 {
        calculate_match_score(template, profile, &self.points)
    }

    /// Select the benefits relevant to a profile, best first
    ///
    /// Ties keep their catalog order.
    pub fn select(&self, catalog: &Catalog, profile: &UserProfile) -> Selection {
        let total_candidates = catalog.len();

        let mut scored: Vec<(&BenefitTemplate, i32)> = catalog
            .templates()
            .iter()
            .map(|template| (template, self.score(template, profile)))
            .collect();

        // sort_by is stable
        scored.sort_by(|a, b| b.1.cmp(&a.1));

        let Some(&(_, top_score)) = scored.first() else {
            return Selection::default();
        };

        let min_acceptable = self.policy.min_acceptable(top_score);
        scored.retain(|(_, score)| *score >= min_acceptable);

        let passing: Vec<i32> = scored.iter().map(|(_, score)| *score).collect();
        let count = self.policy.result_count(&passing);
        scored.truncate(count);

        tracing::debug!(
            "Selected {} of {} templates (top score {}, cutoff {})",
            scored.len(),
            total_candidates,
            top_score,
            min_acceptable
        );

        let placeholders = Placeholders::from_profile(profile);
        let benefits = scored
            .into_iter()
            .map(|(template, score)| materialize_with(template, &placeholders, score))
            .collect();

        Selection {
            benefits,
            total_candidates,
            top_score: Some(top_score),
            min_acceptable: Some(min_acceptable),
        }
    }
}

impl Default for Selector {
    fn default() -> Self {
        Self::with_defaults()
    }
}
