use crate::core::filters::{declared, matches_dimension, shares_interest};
use crate::models::{BenefitSize, BenefitTemplate, Difficulty, ScoringPoints, UserProfile};

/// Calculate the additive match score of a template for a profile
///
/// Scoring (default points):
/// - interest overlap          +50, all or nothing
/// - age in declared set       +20, declared but not a member: -50
/// - region                    +15
/// - education                 +10
/// - income                    +25
/// - marital status            +10
/// - has children              +15
/// - supports parents          +10
/// - high benefit size         +10
/// - easy application          +5
///
/// Only an age mismatch is penalized; every other mismatch adds nothing.
/// The result is not clamped and may be negative.
pub fn calculate_match_score(
    template: &BenefitTemplate,
    profile: &UserProfile,
    points: &ScoringPoints,
) -> i32 {
    let groups = &template.target_groups;
    let mut score = 0;

    if shares_interest(groups.interests.as_deref(), &profile.interests) {
        score += points.interest;
    }

    if declared(groups.age.as_deref()).is_some() {
        if matches_dimension(groups.age.as_deref(), profile.age.map(|v| v.as_str())) {
            score += points.age_match;
        } else {
            score -= points.age_mismatch_penalty;
        }
    }

    let symmetric = [
        (groups.region.as_deref(), profile.region.map(|v| v.as_str()), points.region),
        (groups.education.as_deref(), profile.education.map(|v| v.as_str()), points.education),
        (groups.income.as_deref(), profile.income.map(|v| v.as_str()), points.income),
        (
            groups.marital_status.as_deref(),
            profile.marital_status.map(|v| v.as_str()),
            points.marital_status,
        ),
        (
            groups.has_children.as_deref(),
            profile.has_children.map(|v| v.as_str()),
            points.has_children,
        ),
        (
            groups.support_parents.as_deref(),
            profile.support_parents.map(|v| v.as_str()),
            points.support_parents,
        ),
    ];
    for (values, value, bonus) in symmetric {
        if matches_dimension(values, value) {
            score += bonus;
        }
    }

    if template.benefit == BenefitSize::High {
        score += points.high_benefit;
    }
    if template.difficulty == Difficulty::Easy {
        score += points.easy_application;
    }

    score
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AgeBracket, Category, IncomeBracket, Presence, Region, TargetGroups};

    fn labels(values: &[&str]) -> Option<Vec<String>> {
        Some(values.iter().map(|v| v.to_string()).collect())
    }

    fn create_template(target_groups: TargetGroups) -> BenefitTemplate {
        BenefitTemplate {
            id: "test_001".to_string(),
            title: "테스트 혜택".to_string(),
            category: Category::Housing,
            agency: "테스트 기관".to_string(),
            base_description: "설명".to_string(),
            eligibility_template: "자격".to_string(),
            documents: vec![],
            apply_url: "https://www.gov.kr".to_string(),
            difficulty: Difficulty::Medium,
            benefit: BenefitSize::Medium,
            keywords: vec![],
            target_groups,
        }
    }

    fn create_profile() -> UserProfile {
        UserProfile {
            age: Some(AgeBracket::Twenties),
            region: Some(Region::Seoul),
            income: Some(IncomeBracket::Median80OrLess),
            has_children: Some(Presence::No),
            interests: [Category::Housing].into_iter().collect(),
            ..Default::default()
        }
    }

    #[test]
    fn test_housing_match_scores_each_dimension() {
        let template = create_template(TargetGroups {
            age: labels(&["20대", "30대"]),
            income: labels(&["중위소득 80% 이하", "중위소득 100% 이하"]),
            interests: labels(&["주거 지원"]),
            ..Default::default()
        });

        let score = calculate_match_score(&template, &create_profile(), &ScoringPoints::default());
        assert_eq!(score, 50 + 20 + 25);
    }

    #[test]
    fn test_age_mismatch_is_penalized() {
        let template = create_template(TargetGroups {
            age: labels(&["60대 이상"]),
            interests: labels(&["주거 지원"]),
            ..Default::default()
        });

        let score = calculate_match_score(&template, &create_profile(), &ScoringPoints::default());
        assert_eq!(score, 0);
    }

    #[test]
    fn test_other_mismatches_are_neutral() {
        let template = create_template(TargetGroups {
            region: labels(&["부산"]),
            has_children: labels(&["있음"]),
            ..Default::default()
        });

        let score = calculate_match_score(&template, &create_profile(), &ScoringPoints::default());
        assert_eq!(score, 0);
    }

    #[test]
    fn test_flat_bonuses() {
        let mut template = create_template(TargetGroups::default());
        template.benefit = BenefitSize::High;
        template.difficulty = Difficulty::Easy;

        let score = calculate_match_score(&template, &UserProfile::default(), &ScoringPoints::default());
        assert_eq!(score, 15);
    }

    #[test]
    fn test_score_can_go_negative() {
        let template = create_template(TargetGroups {
            age: labels(&["10대"]),
            ..Default::default()
        });

        let score = calculate_match_score(&template, &create_profile(), &ScoringPoints::default());
        assert_eq!(score, -50);
    }

    #[test]
    fn test_unrecognized_age_counts_as_mismatch() {
        let template = create_template(TargetGroups {
            age: labels(&["20대"]),
            ..Default::default()
        });
        let mut profile = create_profile();
        profile.age = None;

        let score = calculate_match_score(&template, &profile, &ScoringPoints::default());
        assert_eq!(score, -50);
    }
}
