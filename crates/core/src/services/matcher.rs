//! Counsellor matching.
//!
//! Scores every available counsellor against a student's comma-separated
//! interests and picks the best one. Falls back to the highest-rated
//! counsellor when no interest matches anything.

use counselhub_common::AppResult;
use counselhub_db::{entities::counsellor, repositories::CounsellorRepository};
use tracing::debug;

/// Keyword taxonomy: a specialization equal to a category name also
/// matches interests containing any of that category's keywords.
pub const INTEREST_CATEGORIES: [(&str, &[&str]); 8] = [
    (
        "Technology",
        &["technology", "computer", "it", "software", "programming", "tech"],
    ),
    (
        "Healthcare",
        &["healthcare", "medical", "medicine", "health", "nursing"],
    ),
    (
        "Business",
        &["business", "finance", "management", "entrepreneurship", "marketing"],
    ),
    (
        "Engineering",
        &["engineering", "mechanical", "civil", "electrical", "electronics"],
    ),
    (
        "Arts",
        &["arts", "creative", "design", "music", "fine arts", "media"],
    ),
    (
        "Science",
        &["science", "physics", "chemistry", "biology", "research"],
    ),
    (
        "Education",
        &["education", "teaching", "training", "academic"],
    ),
    ("Law", &["law", "legal", "justice", "advocacy"]),
];

/// Score for an interest found inside the specialization text.
const DIRECT_MATCH: u32 = 2;
/// Score for an interest matched through the keyword taxonomy.
const CATEGORY_MATCH: u32 = 1;

/// Split on commas, trim, lowercase.
///
/// Empty tokens are kept. An empty token is contained in every
/// specialization, so `""` or a trailing comma scores every counsellor
/// equally and the first one seen wins.
#[must_use]
pub fn normalize_interests(raw: &str) -> Vec<String> {
    raw.split(',').map(|t| t.trim().to_lowercase()).collect()
}

/// Score one specialization against normalized interest tokens.
#[must_use]
pub fn score(tokens: &[String], specialization: &str) -> u32 {
    let spec = specialization.to_lowercase();
    let category = INTEREST_CATEGORIES
        .iter()
        .find(|(name, _)| name.to_lowercase() == spec)
        .map(|(_, keywords)| *keywords);

    tokens
        .iter()
        .map(|token| {
            if spec.contains(token.as_str()) {
                DIRECT_MATCH
            } else if category.is_some_and(|kws| kws.iter().any(|kw| token.contains(kw))) {
                CATEGORY_MATCH
            } else {
                0
            }
        })
        .sum()
}

/// Pick the best counsellor for `interests` out of `available`.
///
/// Ties keep the counsellor seen first, both for the score and for the
/// rating fallback. Returns `None` only when `available` is empty.
#[must_use]
pub fn best_match<'a>(
    interests: &str,
    available: &'a [counsellor::Model],
) -> Option<&'a counsellor::Model> {
    let tokens = normalize_interests(interests);

    let mut best: Option<(&counsellor::Model, u32)> = None;
    for c in available {
        let s = score(&tokens, c.specialization.as_deref().unwrap_or(""));
        if s > best.map_or(0, |(_, top)| top) {
            best = Some((c, s));
        }
    }

    if let Some((c, s)) = best {
        debug!(counsellor_id = %c.id, score = s, "Matched on interests");
        return Some(c);
    }

    highest_rated(available)
}

/// Highest rating wins; a missing rating ranks below any rating.
fn highest_rated(available: &[counsellor::Model]) -> Option<&counsellor::Model> {
    let mut iter = available.iter();
    let mut top = iter.next()?;
    for c in iter {
        if c.rating > top.rating {
            top = c;
        }
    }
    debug!(counsellor_id = %top.id, "No interest matched, using highest rating");
    Some(top)
}

/// Matches students to available counsellors.
#[derive(Clone)]
pub struct MatcherService {
    counsellor_repo: CounsellorRepository,
}

impl MatcherService {
    /// Create a new matcher service.
    #[must_use]
    pub const fn new(counsellor_repo: CounsellorRepository) -> Self {
        Self { counsellor_repo }
    }

    /// Best available counsellor for the interests, if any counsellor is available.
    pub async fn match_counsellor(&self, interests: &str) -> AppResult<Option<counsellor::Model>> {
        let available = self.counsellor_repo.find_available().await?;
        Ok(best_match(interests, &available).cloned())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn c(id: &str, specialization: Option<&str>, rating: Option<f64>) -> counsellor::Model {
        counsellor::Model {
            id: id.to_string(),
            email: format!("{id}@example.com"),
            password_hash: String::new(),
            first_name: id.to_string(),
            last_name: None,
            specialization: specialization.map(str::to_string),
            qualification: None,
            years_of_experience: None,
            bio: None,
            is_available: true,
            rating,
            created_at: Utc::now().into(),
            last_login_at: None,
        }
    }

    #[test]
    fn test_normalize_interests() {
        assert_eq!(
            normalize_interests(" Software ,MARKETING"),
            vec!["software".to_string(), "marketing".to_string()]
        );
        assert_eq!(normalize_interests("a,,b"), vec!["a", "", "b"]);
        assert_eq!(normalize_interests(""), vec![String::new()]);
    }

    #[test]
    fn test_empty_token_matches_every_specialization() {
        assert_eq!(score(&normalize_interests(""), "Law"), DIRECT_MATCH);
        assert_eq!(score(&normalize_interests(""), ""), DIRECT_MATCH);
    }

    #[test]
    fn test_trailing_comma_keeps_first_seen() {
        let pool = vec![
            c("a", Some("Law"), Some(3.0)),
            c("b", Some("Arts"), Some(4.9)),
        ];

        assert_eq!(best_match("cooking,", &pool).unwrap().id, "a");
        assert_eq!(best_match("cooking,,law", &pool).unwrap().id, "a");
        assert_eq!(best_match("", &pool).unwrap().id, "a");
        assert_eq!(best_match("cooking", &pool).unwrap().id, "b");
    }

    #[test]
    fn test_worked_example_falls_back_to_rating() {
        let pool = vec![
            c("a", Some("Technology & Engineering"), Some(4.5)),
            c("b", Some("Business & Finance"), Some(4.9)),
        ];

        let chosen = best_match("software, marketing", &pool).unwrap();
        assert_eq!(chosen.id, "b");
    }

    #[test]
    fn test_exact_token_scores_direct_match() {
        assert!(score(&normalize_interests("Law"), "Law") >= DIRECT_MATCH);
        assert_eq!(score(&normalize_interests("finance"), "Business & Finance"), 2);
    }

    #[test]
    fn test_category_keyword_match() {
        // "programming" is not in the text "Technology" but is a Technology keyword
        assert_eq!(score(&normalize_interests("programming"), "Technology"), 1);
        // Only exact category names use the taxonomy
        assert_eq!(score(&normalize_interests("programming"), "Technology & Startups"), 0);
    }

    #[test]
    fn test_direct_match_skips_category_check() {
        // "tech" is inside "technology" so it scores 2, not 2 + 1
        assert_eq!(score(&normalize_interests("tech"), "Technology"), 2);
    }

    #[test]
    fn test_scores_accumulate_across_tokens() {
        let pool = vec![
            c("a", Some("Healthcare & Medicine"), Some(4.6)),
            c("b", Some("Public Health & Research"), Some(4.8)),
        ];

        let chosen = best_match("health, research", &pool).unwrap();
        assert_eq!(chosen.id, "b");
    }

    #[test]
    fn test_score_tie_keeps_first_seen() {
        let pool = vec![
            c("a", Some("Technology & Engineering"), Some(4.5)),
            c("b", Some("Technology & Startups"), Some(4.7)),
        ];

        let chosen = best_match("technology", &pool).unwrap();
        assert_eq!(chosen.id, "a");
    }

    #[test]
    fn test_rating_tie_keeps_first_seen() {
        let pool = vec![
            c("a", Some("Law"), Some(4.0)),
            c("b", Some("Arts"), Some(4.0)),
        ];

        assert_eq!(best_match("cooking", &pool).unwrap().id, "a");
    }

    #[test]
    fn test_missing_rating_ranks_lowest() {
        let pool = vec![c("a", None, None), c("b", None, Some(1.0))];

        assert_eq!(best_match("cooking", &pool).unwrap().id, "b");
    }

    #[test]
    fn test_empty_pool() {
        assert!(best_match("software", &[]).is_none());
    }
}
