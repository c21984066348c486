use std::collections::HashMap;

use crate::models::{BenefitTemplate, ScoredBenefit, UserProfile};

/// Substitution map for `{token}` placeholders in eligibility templates
///
/// Tokens without a value (unknown names, unrecognized profile values) are
/// left in the output verbatim, braces included.
#[derive(Debug, Clone, Default)]
pub struct Placeholders {
    values: HashMap<&'static str, String>,
}

impl Placeholders {
    pub fn from_profile(profile: &UserProfile) -> Self {
        let mut placeholders = Self::default();

        placeholders.set_opt("age", profile.age.map(|v| v.as_str()));
        placeholders.set_opt("region", profile.region.map(|v| v.as_str()));
        placeholders.set_opt("education", profile.education.map(|v| v.as_str()));
        placeholders.set_opt("income", profile.income.map(|v| v.as_str()));
        placeholders.set_opt("maritalStatus", profile.marital_status.map(|v| v.as_str()));
        placeholders.set_opt("hasChildren", profile.has_children.map(|v| v.as_str()));
        placeholders.set_opt("supportParents", profile.support_parents.map(|v| v.as_str()));
        if !profile.interests.is_empty() {
            placeholders.set("interests", profile.interest_labels());
        }

        placeholders
    }

    pub fn set(&mut self, token: &'static str, value: impl Into<String>) {
        self.values.insert(token, value.into());
    }

    fn set_opt(&mut self, token: &'static str, value: Option<&str>) {
        if let Some(value) = value {
            self.set(token, value);
        }
    }

    pub fn get(&self, token: &str) -> Option<&str> {
        self.values.get(token).map(String::as_str)
    }

    /// Resolve every known `{token}` in a template
    pub fn render(&self, template: &str) -> String {
        let mut out = String::with_capacity(template.len());
        let mut rest = template;

        while let Some(start) = rest.find('{') {
            out.push_str(&rest[..start]);
            let after = &rest[start + 1..];

            let Some(end) = after.find('}') else {
                // Unterminated brace
                out.push_str(&rest[start..]);
                return out;
            };

            let token = &after[..end];
            match self.get(token) {
                Some(value) => out.push_str(value),
                None => {
                    out.push('{');
                    out.push_str(token);
                    out.push('}');
                }
            }
            rest = &after[end + 1..];
        }

        out.push_str(rest);
        out
    }
}

/// Expand a template into the record shown to the user
pub fn materialize(template: &BenefitTemplate, profile: &UserProfile, match_score: i32) -> ScoredBenefit {
    materialize_with(template, &Placeholders::from_profile(profile), match_score)
}

/// Same as [`materialize`] with a prebuilt substitution map
pub fn materialize_with(
    template: &BenefitTemplate,
    placeholders: &Placeholders,
    match_score: i32,
) -> ScoredBenefit {
    ScoredBenefit {
        id: template.id.clone(),
        title: template.title.clone(),
        category: template.category,
        description: template.base_description.clone(),
        difficulty: template.difficulty,
        benefit: template.benefit,
        agency: template.agency.clone(),
        eligibility: placeholders.render(&template.eligibility_template),
        documents: template.documents.clone(),
        apply_url: template.apply_url.clone(),
        match_score,
        ai_reason: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AgeBracket, BenefitSize, Category, Difficulty, IncomeBracket, TargetGroups};

    fn create_profile() -> UserProfile {
        UserProfile {
            age: Some(AgeBracket::Thirties),
            income: Some(IncomeBracket::Median100OrLess),
            interests: [Category::WelfareMedical, Category::Housing].into_iter().collect(),
            ..Default::default()
        }
    }

    #[test]
    fn test_render_known_tokens() {
        let placeholders = Placeholders::from_profile(&create_profile());

        assert_eq!(
            placeholders.render("{age} 가구, {income} 대상"),
            "30대 가구, 중위소득 100% 이하 대상"
        );
        assert_eq!(placeholders.render("관심: {interests}"), "관심: 주거 지원, 복지/의료");
    }

    #[test]
    fn test_render_leaves_unresolved_tokens_verbatim() {
        let placeholders = Placeholders::from_profile(&create_profile());

        // region is unset on the profile, nickname is not a token at all
        assert_eq!(placeholders.render("{region} 거주 {nickname}"), "{region} 거주 {nickname}");
        assert_eq!(placeholders.render("소득 {income"), "소득 {income");
        assert_eq!(placeholders.render("자격 제한 없음"), "자격 제한 없음");
    }

    #[test]
    fn test_materialize_copies_fields() {
        let template = BenefitTemplate {
            id: "welfare_900".to_string(),
            title: "테스트 복지".to_string(),
            category: Category::WelfareMedical,
            agency: "보건복지부".to_string(),
            base_description: "생계비 지원".to_string(),
            eligibility_template: "{age}, {income}".to_string(),
            documents: vec!["신분증".to_string()],
            apply_url: "https://www.bokjiro.go.kr".to_string(),
            difficulty: Difficulty::Hard,
            benefit: BenefitSize::Low,
            keywords: vec!["복지".to_string()],
            target_groups: TargetGroups::default(),
        };

        let benefit = materialize(&template, &create_profile(), 42);

        assert_eq!(benefit.id, "welfare_900");
        assert_eq!(benefit.description, "생계비 지원");
        assert_eq!(benefit.eligibility, "30대, 중위소득 100% 이하");
        assert_eq!(benefit.documents, vec!["신분증"]);
        assert_eq!(benefit.difficulty, Difficulty::Hard);
        assert_eq!(benefit.benefit, BenefitSize::Low);
        assert_eq!(benefit.match_score, 42);
        assert_eq!(benefit.ai_reason, None);
    }
}
