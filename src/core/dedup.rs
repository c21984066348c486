use std::collections::HashSet;

use crate::models::ExtractedBenefit;

/// Anything deduplicated by title
pub trait Titled {
    fn title(&self) -> &str;
}

impl Titled for ExtractedBenefit {
    fn title(&self) -> &str {
        &self.title
    }
}

/// Lower-case a title and strip every whitespace character
#[inline]
pub fn normalize_title(title: &str) -> String {
    title
        .chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect()
}

/// Drop candidates whose normalized title matches an existing title
///
/// Matching is exact on the normalized form; candidates are not compared
/// against each other.
pub fn dedupe<I, S, T>(existing_titles: I, candidates: Vec<T>) -> Vec<T>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
    T: Titled,
{
    let existing: HashSet<String> = existing_titles
        .into_iter()
        .map(|title| normalize_title(title.as_ref()))
        .collect();

    let before = candidates.len();
    let unique: Vec<T> = candidates
        .into_iter()
        .filter(|candidate| !existing.contains(&normalize_title(candidate.title())))
        .collect();

    tracing::debug!("Deduplication kept {} of {} candidates", unique.len(), before);
    unique
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_extracted(title: &str) -> ExtractedBenefit {
        ExtractedBenefit {
            id: String::new(),
            title: title.to_string(),
            category: "주거 지원".to_string(),
            description: String::new(),
            difficulty: None,
            benefit: None,
            agency: String::new(),
            eligibility: String::new(),
            documents: vec![],
            apply_url: String::new(),
            conditions: Default::default(),
            source_url: None,
            extracted_at: None,
            is_new: true,
        }
    }

    fn titles(benefits: &[ExtractedBenefit]) -> Vec<&str> {
        benefits.iter().map(|b| b.title.as_str()).collect()
    }

    #[test]
    fn test_normalize_title() {
        assert_eq!(normalize_title("  Housing\tLoan A "), "housingloana");
        assert_eq!(normalize_title("청년 전세자금 대출"), "청년전세자금대출");
    }

    #[test]
    fn test_dedupe_drops_normalized_matches() {
        let existing = ["청년 전세자금대출", "Housing Loan A"];
        let candidates = vec![
            create_extracted("청년전세자금 대출"),
            create_extracted("HOUSING LOAN A"),
            create_extracted("Housing Loan A!"),
            create_extracted("문화누리카드"),
        ];

        let unique = dedupe(existing, candidates);
        assert_eq!(titles(&unique), vec!["Housing Loan A!", "문화누리카드"]);
    }

    #[test]
    fn test_dedupe_keeps_batch_duplicates() {
        let candidates = vec![create_extracted("문화누리카드"), create_extracted("문화누리 카드")];
        let unique = dedupe(Vec::<String>::new(), candidates);

        assert_eq!(unique.len(), 2);
    }
}
