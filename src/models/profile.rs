use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::domain::Category;

label_enum! {
    AgeBracket {
        Teens => "10대",
        Twenties => "20대",
        Thirties => "30대",
        Forties => "40대",
        Fifties => "50대",
        SixtiesPlus => "60대 이상",
    }
}

label_enum! {
    Region {
        Seoul => "서울",
        Gyeonggi => "경기",
        Incheon => "인천",
        Busan => "부산",
        Daegu => "대구",
        Gwangju => "광주",
        Daejeon => "대전",
        Ulsan => "울산",
        Sejong => "세종",
        Gangwon => "강원",
        Chungbuk => "충북",
        Chungnam => "충남",
        Jeonbuk => "전북",
        Jeonnam => "전남",
        Gyeongbuk => "경북",
        Gyeongnam => "경남",
        Jeju => "제주",
    }
}

label_enum! {
    Education {
        HighSchoolGraduate => "고등학교 졸업",
        UniversityEnrolled => "대학교 재학",
        UniversityGraduate => "대학교 졸업",
        GraduateSchoolEnrolled => "대학원 재학",
        GraduateSchoolGraduate => "대학원 졸업",
    }
}

label_enum! {
    /// Household income relative to the national median
    IncomeBracket {
        Median50OrLess => "중위소득 50% 이하",
        Median80OrLess => "중위소득 80% 이하",
        Median100OrLess => "중위소득 100% 이하",
        Median120OrLess => "중위소득 120% 이하",
        Median150OrLess => "중위소득 150% 이하",
        Median150Over => "중위소득 150% 초과",
    }
}

label_enum! {
    MaritalStatus {
        Single => "미혼",
        Married => "기혼",
        Divorced => "이혼",
        Widowed => "사별",
    }
}

label_enum! {
    /// Yes/no answer used by the children and parent-support questions
    Presence {
        Yes => "있음",
        No => "없음",
    }
}

/// Profile validation failure
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProfileError {
    #[error("{0} field is missing")]
    MissingField(&'static str),

    #[error("invalid {field} value: {value}")]
    InvalidValue { field: &'static str, value: String },
}

impl ProfileError {
    /// Wire name of the offending field
    pub fn field(&self) -> &'static str {
        match self {
            ProfileError::MissingField(field) => field,
            ProfileError::InvalidValue { field, .. } => field,
        }
    }
}

/// Raw self-reported profile as submitted by the form
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProfileInput {
    #[serde(default)]
    pub age: Option<String>,
    #[serde(default)]
    pub region: Option<String>,
    #[serde(default)]
    pub education: Option<String>,
    #[serde(default)]
    pub income: Option<String>,
    #[serde(rename = "maritalStatus", default)]
    pub marital_status: Option<String>,
    #[serde(rename = "hasChildren", default)]
    pub has_children: Option<String>,
    #[serde(rename = "supportParents", default)]
    pub support_parents: Option<String>,
    #[serde(default)]
    pub interests: Option<Vec<String>>,
}

/// Typed demographic profile used by the scorer.
///
/// A scalar left as `None` did not carry a recognized value and matches
/// nothing on its dimension. [`ProfileInput::validate`] never produces `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserProfile {
    pub age: Option<AgeBracket>,
    pub region: Option<Region>,
    pub education: Option<Education>,
    pub income: Option<IncomeBracket>,
    #[serde(rename = "maritalStatus")]
    pub marital_status: Option<MaritalStatus>,
    #[serde(rename = "hasChildren")]
    pub has_children: Option<Presence>,
    #[serde(rename = "supportParents")]
    pub support_parents: Option<Presence>,
    pub interests: BTreeSet<Category>,
}

fn required<T>(
    field: &'static str,
    value: Option<&str>,
    parse: fn(&str) -> Option<T>,
) -> Result<T, ProfileError> {
    let value = value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .ok_or(ProfileError::MissingField(field))?;

    parse(value).ok_or_else(|| ProfileError::InvalidValue {
        field,
        value: value.to_string(),
    })
}

fn lenient<T>(value: Option<&str>, parse: fn(&str) -> Option<T>) -> Option<T> {
    value.map(str::trim).and_then(parse)
}

impl ProfileInput {
    /// Strictly validate every field against its enumeration
    pub fn validate(&self) -> Result<UserProfile, ProfileError> {
        let age = required("age", self.age.as_deref(), AgeBracket::from_label)?;
        let region = required("region", self.region.as_deref(), Region::from_label)?;
        let education = required("education", self.education.as_deref(), Education::from_label)?;
        let income = required("income", self.income.as_deref(), IncomeBracket::from_label)?;
        let marital_status = required(
            "maritalStatus",
            self.marital_status.as_deref(),
            MaritalStatus::from_label,
        )?;
        let has_children = required("hasChildren", self.has_children.as_deref(), Presence::from_label)?;
        let support_parents = required(
            "supportParents",
            self.support_parents.as_deref(),
            Presence::from_label,
        )?;

        let interests = self
            .interests
            .as_ref()
            .ok_or(ProfileError::MissingField("interests"))?
            .iter()
            .map(|interest| {
                Category::from_label(interest.trim()).ok_or_else(|| ProfileError::InvalidValue {
                    field: "interests",
                    value: interest.clone(),
                })
            })
            .collect::<Result<BTreeSet<_>, _>>()?;

        Ok(UserProfile {
            age: Some(age),
            region: Some(region),
            education: Some(education),
            income: Some(income),
            marital_status: Some(marital_status),
            has_children: Some(has_children),
            support_parents: Some(support_parents),
            interests,
        })
    }

    /// Convert without rejecting; unrecognized values match nothing
    pub fn into_lenient(self) -> UserProfile {
        UserProfile {
            age: lenient(self.age.as_deref(), AgeBracket::from_label),
            region: lenient(self.region.as_deref(), Region::from_label),
            education: lenient(self.education.as_deref(), Education::from_label),
            income: lenient(self.income.as_deref(), IncomeBracket::from_label),
            marital_status: lenient(self.marital_status.as_deref(), MaritalStatus::from_label),
            has_children: lenient(self.has_children.as_deref(), Presence::from_label),
            support_parents: lenient(self.support_parents.as_deref(), Presence::from_label),
            interests: self
                .interests
                .unwrap_or_default()
                .iter()
                .filter_map(|interest| Category::from_label(interest.trim()))
                .collect(),
        }
    }
}

impl UserProfile {
    /// Comma separated interest labels in canonical order
    pub fn interest_labels(&self) -> String {
        self.interests
            .iter()
            .map(Category::as_str)
            .collect::<Vec<_>>()
            .join(", ")
    }
}
