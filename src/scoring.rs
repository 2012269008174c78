//! Advisor–candidate compatibility scoring.
//!
//! # Scoring Rules
//!
//! | Contribution | Default weight | Counted |
//! |--------------|----------------|---------|
//! | Candidate major == advisor program | 1.0 | per major |
//! | Candidate minor == advisor program | 0.75 | per minor |
//! | Advisor category among the candidate's major categories | 0.25 | once |
//!
//! Scores are purely additive: no normalization, no capping. Equal scores
//! are expected and are resolved by the assigner, not here.

use serde::{Deserialize, Serialize};

use crate::error::{MatchError, Result};
use crate::models::{Advisor, Candidate, Catalog};

/// Weights for each score contribution.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoreWeights {
    /// Per matching major.
    pub major: f64,
    /// Per matching minor.
    pub minor: f64,
    /// Shared-category bonus.
    pub category: f64,
}

impl ScoreWeights {
    /// Creates custom weights.
    pub fn new(major: f64, minor: f64, category: f64) -> Self {
        Self {
            major,
            minor,
            category,
        }
    }

    /// Whether every weight is finite and non-negative.
    pub fn is_valid(&self) -> bool {
        [self.major, self.minor, self.category]
            .iter()
            .all(|w| w.is_finite() && *w >= 0.0)
    }
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            major: 1.0,
            minor: 0.75,
            category: 0.25,
        }
    }
}

/// Score and justification for one pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Compatibility {
    /// Additive affinity.
    pub score: f64,
    /// One entry per contribution, in the order they were counted.
    pub reasons: Vec<String>,
}

/// Computes compatibility between advisors and candidates.
///
/// # Example
///
/// ```
/// use u_match::models::{Advisor, Candidate, Catalog};
/// use u_match::scoring::CompatibilityScorer;
///
/// let catalog = Catalog::new()
///     .with_program("CS", "Science")
///     .with_program("Art", "Humanities");
/// let advisor = Advisor::new("1", "CS", 1);
///
/// let scorer = CompatibilityScorer::new();
/// let c = scorer.score(&advisor, &Candidate::new("10").with_major("CS"), &catalog).unwrap();
/// assert!((c.score - 1.25).abs() < 1e-10);
/// assert_eq!(c.reasons.len(), 2);
///
/// let c = scorer.score(&advisor, &Candidate::new("11").with_major("Art"), &catalog).unwrap();
/// assert_eq!(c.score, 0.0);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct CompatibilityScorer {
    weights: ScoreWeights,
}

impl CompatibilityScorer {
    /// Creates a scorer with default weights.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the weights.
    pub fn with_weights(mut self, weights: ScoreWeights) -> Self {
        self.weights = weights;
        self
    }

    /// Current weights.
    pub fn weights(&self) -> &ScoreWeights {
        &self.weights
    }

    /// Scores a pair.
    ///
    /// # Errors
    /// [`MatchError::UnknownProgram`] if the advisor's program is missing
    /// from `catalog`.
    pub fn score(
        &self,
        advisor: &Advisor,
        candidate: &Candidate,
        catalog: &Catalog,
    ) -> Result<Compatibility> {
        let category = catalog
            .category_of(&advisor.program)
            .ok_or_else(|| MatchError::UnknownProgram {
                advisor_id: advisor.id.clone(),
                program: advisor.program.clone(),
            })?;
        Ok(self.evaluate(advisor, candidate, catalog, Some(category)))
    }

    /// Scores a pair, treating an unknown advisor program as uncategorized.
    ///
    /// The pair then earns no category bonus. Lookup misses are reported by
    /// [`crate::diagnostics::audit_records`], not here.
    pub fn score_lenient(
        &self,
        advisor: &Advisor,
        candidate: &Candidate,
        catalog: &Catalog,
    ) -> Compatibility {
        let category = catalog.category_of(&advisor.program);
        self.evaluate(advisor, candidate, catalog, category)
    }

    fn evaluate(
        &self,
        advisor: &Advisor,
        candidate: &Candidate,
        catalog: &Catalog,
        advisor_category: Option<&str>,
    ) -> Compatibility {
        let mut score = 0.0;
        let mut reasons = Vec::new();

        for major in &candidate.majors {
            if *major == advisor.program {
                score += self.weights.major;
                reasons.push(format!("Student interested in {major} major"));
            }
        }

        for minor in &candidate.minors {
            if *minor == advisor.program {
                score += self.weights.minor;
                reasons.push(format!("Student interested in {minor} minor"));
            }
        }

        if let Some(category) = advisor_category {
            if catalog.categories_of(&candidate.majors).contains(category) {
                score += self.weights.category;
                reasons.push(format!(
                    "Student interested in majors in {category} division"
                ));
            }
        }

        Compatibility { score, reasons }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> Catalog {
        Catalog::new()
            .with_program("CS", "Science")
            .with_program("Math", "Science")
            .with_program("Physics", "Science")
            .with_program("Art", "Humanities")
    }

    #[test]
    fn test_major_and_category_match() {
        let advisor = Advisor::new("1", "CS", 1);
        let candidate = Candidate::new("10").with_major("CS");

        let c = CompatibilityScorer::new()
            .score(&advisor, &candidate, &catalog())
            .unwrap();
        assert!((c.score - 1.25).abs() < 1e-10);
        assert_eq!(
            c.reasons,
            vec![
                "Student interested in CS major".to_string(),
                "Student interested in majors in Science division".to_string(),
            ]
        );
    }

    #[test]
    fn test_no_affinity() {
        let advisor = Advisor::new("1", "CS", 1);
        let candidate = Candidate::new("11").with_major("Art");

        let c = CompatibilityScorer::new()
            .score(&advisor, &candidate, &catalog())
            .unwrap();
        assert_eq!(c.score, 0.0);
        assert!(c.reasons.is_empty());
    }

    #[test]
    fn test_category_bonus_counted_once() {
        let advisor = Advisor::new("1", "CS", 1);
        let candidate = Candidate::new("10").with_major("Math").with_major("Physics");

        let c = CompatibilityScorer::new()
            .score(&advisor, &candidate, &catalog())
            .unwrap();
        assert!((c.score - 0.25).abs() < 1e-10);
        assert_eq!(c.reasons.len(), 1);
    }

    #[test]
    fn test_minor_match() {
        let advisor = Advisor::new("1", "Art", 1);
        let candidate = Candidate::new("10").with_major("CS").with_minor("Art");

        let c = CompatibilityScorer::new()
            .score(&advisor, &candidate, &catalog())
            .unwrap();
        // Minor only; CS is Science, advisor is Humanities.
        assert!((c.score - 0.75).abs() < 1e-10);
        assert_eq!(c.reasons, vec!["Student interested in Art minor".to_string()]);
    }

    #[test]
    fn test_minor_does_not_earn_category_bonus() {
        let advisor = Advisor::new("1", "Math", 1);
        let candidate = Candidate::new("10").with_major("Art").with_minor("CS");

        let c = CompatibilityScorer::new()
            .score(&advisor, &candidate, &catalog())
            .unwrap();
        assert_eq!(c.score, 0.0);
    }

    #[test]
    fn test_reason_order_major_minor_category() {
        let advisor = Advisor::new("1", "CS", 1);
        let candidate = Candidate::new("10").with_major("CS").with_minor("CS");

        let c = CompatibilityScorer::new()
            .score(&advisor, &candidate, &catalog())
            .unwrap();
        assert!((c.score - 2.0).abs() < 1e-10);
        assert!(c.reasons[0].ends_with("CS major"));
        assert!(c.reasons[1].ends_with("CS minor"));
        assert!(c.reasons[2].contains("Science division"));
    }

    #[test]
    fn test_unknown_advisor_program_is_error() {
        let advisor = Advisor::new("1", "Alchemy", 1);
        let candidate = Candidate::new("10").with_major("Alchemy");

        let err = CompatibilityScorer::new()
            .score(&advisor, &candidate, &catalog())
            .unwrap_err();
        assert!(matches!(err, MatchError::UnknownProgram { ref program, .. } if program == "Alchemy"));
    }

    #[test]
    fn test_lenient_scores_uncategorized() {
        let advisor = Advisor::new("1", "Alchemy", 1);
        let candidate = Candidate::new("10").with_major("Alchemy");

        let c = CompatibilityScorer::new().score_lenient(&advisor, &candidate, &catalog());
        // Major match still counts; no category bonus.
        assert!((c.score - 1.0).abs() < 1e-10);
        assert_eq!(c.reasons, vec!["Student interested in Alchemy major".to_string()]);
    }

    #[test]
    fn test_lenient_matches_strict_for_known_program() {
        let advisor = Advisor::new("1", "CS", 1);
        let candidate = Candidate::new("10").with_major("CS");
        let scorer = CompatibilityScorer::new();

        let lenient = scorer.score_lenient(&advisor, &candidate, &catalog());
        let strict = scorer.score(&advisor, &candidate, &catalog()).unwrap();
        assert!((lenient.score - 1.25).abs() < 1e-10);
        assert_eq!(lenient, strict);
    }

    #[test]
    fn test_score_is_pure() {
        let scorer = CompatibilityScorer::new();
        let advisor = Advisor::new("1", "Math", 1);
        let candidate = Candidate::new("10")
            .with_major("Math")
            .with_major("CS")
            .with_minor("Math");

        let first = scorer.score(&advisor, &candidate, &catalog()).unwrap();
        let second = scorer.score(&advisor, &candidate, &catalog()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_custom_weights() {
        let scorer = CompatibilityScorer::new().with_weights(ScoreWeights::new(3.0, 1.0, 0.0));
        let advisor = Advisor::new("1", "CS", 1);
        let candidate = Candidate::new("10").with_major("CS");

        let c = scorer.score(&advisor, &candidate, &catalog()).unwrap();
        assert!((c.score - 3.0).abs() < 1e-10);
        // Zero-weight bonus still leaves its reason.
        assert_eq!(c.reasons.len(), 2);
    }

    #[test]
    fn test_weights_validity() {
        assert!(ScoreWeights::default().is_valid());
        assert!(!ScoreWeights::new(f64::NAN, 0.0, 0.0).is_valid());
        assert!(!ScoreWeights::new(1.0, 0.0, -0.1).is_valid());
    }
}
