use serde::{de, Deserialize, Deserializer, Serialize};

label_enum! {
    /// Benefit category; doubles as the interest dimension of a profile
    Category {
        Housing => "주거 지원",
        EducationEmployment => "교육/취업",
        StartupFinance => "창업/금융",
        WelfareMedical => "복지/의료",
        CultureLeisure => "문화/여가",
        AgricultureEnvironment => "농업/환경",
    }
}

label_enum! {
    /// How hard a benefit is to apply for
    Difficulty {
        Easy => "쉬움",
        Medium => "보통",
        Hard => "어려움",
    }
}

label_enum! {
    /// How large the benefit is for the recipient
    BenefitSize {
        High => "높음",
        Medium => "중간",
        Low => "낮음",
    }
}

/// Per-dimension allow-lists describing who a template is aimed at.
///
/// A dimension that is `None` places no constraint on that axis. Values are
/// plain labels: a catalog may name labels that no profile can carry, which
/// simply never match.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetGroups {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub education: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub income: Option<Vec<String>>,
    #[serde(rename = "maritalStatus", default, skip_serializing_if = "Option::is_none")]
    pub marital_status: Option<Vec<String>>,
    #[serde(rename = "hasChildren", default, skip_serializing_if = "Option::is_none")]
    pub has_children: Option<Vec<String>>,
    #[serde(rename = "supportParents", default, skip_serializing_if = "Option::is_none")]
    pub support_parents: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interests: Option<Vec<String>>,
}

impl TargetGroups {
    /// All dimensions paired with their wire names
    pub fn dimensions(&self) -> [(&'static str, Option<&[String]>); 8] {
        [
            ("age", self.age.as_deref()),
            ("region", self.region.as_deref()),
            ("education", self.education.as_deref()),
            ("income", self.income.as_deref()),
            ("maritalStatus", self.marital_status.as_deref()),
            ("hasChildren", self.has_children.as_deref()),
            ("supportParents", self.support_parents.as_deref()),
            ("interests", self.interests.as_deref()),
        ]
    }

    /// Number of dimensions carrying at least one value
    pub fn populated_dimensions(&self) -> usize {
        self.dimensions()
            .into_iter()
            .filter(|(_, values)| values.is_some_and(|v| !v.is_empty()))
            .count()
    }
}

/// Catalog entry describing one assistance program
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BenefitTemplate {
    pub id: String,
    pub title: String,
    pub category: Category,
    pub agency: String,
    #[serde(rename = "baseDescription")]
    pub base_description: String,
    #[serde(rename = "eligibilityTemplate")]
    pub eligibility_template: String,
    #[serde(default)]
    pub documents: Vec<String>,
    #[serde(rename = "applyUrl")]
    pub apply_url: String,
    pub difficulty: Difficulty,
    pub benefit: BenefitSize,
    #[serde(default)]
    pub keywords: Vec<String>,
    #[serde(rename = "targetGroups", default)]
    pub target_groups: TargetGroups,
}

/// A template materialized against a profile, ready for presentation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredBenefit {
    pub id: String,
    pub title: String,
    pub category: Category,
    pub description: String,
    pub difficulty: Difficulty,
    pub benefit: BenefitSize,
    pub agency: String,
    pub eligibility: String,
    pub documents: Vec<String>,
    #[serde(rename = "applyUrl")]
    pub apply_url: String,
    #[serde(rename = "matchScore")]
    pub match_score: i32,
    #[serde(rename = "aiReason", default)]
    pub ai_reason: Option<String>,
}

/// Benefit record produced by the extraction collaborator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractedBenefit {
    #[serde(default)]
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub benefit: Option<String>,
    #[serde(default)]
    pub agency: String,
    #[serde(default)]
    pub eligibility: String,
    #[serde(default)]
    pub documents: Vec<String>,
    #[serde(rename = "applyUrl", default)]
    pub apply_url: String,
    #[serde(default)]
    pub conditions: TargetGroups,
    #[serde(rename = "sourceUrl", default, skip_serializing_if = "Option::is_none")]
    pub source_url: Option<String>,
    #[serde(rename = "extractedAt", default, skip_serializing_if = "Option::is_none")]
    pub extracted_at: Option<chrono::DateTime<chrono::Utc>>,
    #[serde(rename = "isNew", default = "default_true")]
    pub is_new: bool,
}

fn default_true() -> bool {
    true
}

/// One entry of an externally produced ranking
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExternalRank {
    #[serde(deserialize_with = "id_from_string_or_number")]
    pub id: String,
    #[serde(default)]
    pub reason: String,
}

// Ranking models sometimes echo ids back as bare numbers.
fn id_from_string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(id) => Ok(id),
        serde_json::Value::Number(id) => Ok(id.to_string()),
        other => Err(de::Error::custom(format!("invalid ranking id: {}", other))),
    }
}

/// Point values used by the scorer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoringPoints {
    pub interest: i32,
    pub age_match: i32,
    pub age_mismatch_penalty: i32,
    pub region: i32,
    pub education: i32,
    pub income: i32,
    pub marital_status: i32,
    pub has_children: i32,
    pub support_parents: i32,
    pub high_benefit: i32,
    pub easy_application: i32,
}

impl Default for ScoringPoints {
    fn default() -> Self {
        Self {
            interest: 50,
            age_match: 20,
            age_mismatch_penalty: 50,
            region: 15,
            education: 10,
            income: 25,
            marital_status: 10,
            has_children: 15,
            support_parents: 10,
            high_benefit: 10,
            easy_application: 5,
        }
    }
}

/// Dynamic cutoff policy applied by the selector
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectionPolicy {
    /// Absolute minimum score a result must reach
    pub score_floor: i32,
    /// How far below the top score a result may fall
    pub score_window: i32,
    pub min_results: usize,
    pub max_results: usize,
    /// Rank compared against the top score when looking for a drop-off
    pub gap_rank: usize,
    pub max_gap: i32,
    /// Result count used once a drop-off is detected
    pub compressed_results: usize,
}

impl Default for SelectionPolicy {
    fn default() -> Self {
        Self {
            score_floor: 30,
            score_window: 50,
            min_results: 3,
            max_results: 25,
            gap_rank: 10,
            max_gap: 30,
            compressed_results: 10,
        }
    }
}

impl SelectionPolicy {
    /// Lowest score kept for a given top score
    pub fn min_acceptable(&self, top_score: i32) -> i32 {
        self.score_floor.max(top_score - self.score_window)
    }

    /// How many of the passing scores (sorted descending) to return
    pub fn result_count(&self, passing: &[i32]) -> usize {
        let n = passing.len();
        let min_results = self.min_results.min(n);
        let max_results = self.max_results.min(n);

        let mut final_count = max_results;
        if self.gap_rank > 0 && n > self.gap_rank {
            let gap = passing[0] - passing[self.gap_rank - 1];
            if gap > self.max_gap {
                final_count = self.compressed_results.min(max_results);
            }
        }

        min_results.max(final_count)
    }
}
