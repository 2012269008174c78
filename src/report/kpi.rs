//! Assignment quality metrics (KPIs).
//!
//! Computes summary indicators from a finished assignment and the problem
//! it was produced for.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Total Score | Sum of match scores |
//! | Mean Score | Total score / matches |
//! | Min Score | Lowest single match score |
//! | Zero-Score Matches | Matches with no affinity at all |
//! | Utilization | Matches / effective capacity, per advisor |
//! | Unused Capacity | Effective capacity left after all matches |

use std::collections::BTreeMap;

use serde::Serialize;

use crate::models::{Assignment, MatchProblem};

/// Assignment performance indicators.
#[derive(Debug, Clone, Serialize)]
pub struct MatchKpi {
    /// Sum of all match scores.
    pub total_score: f64,
    /// Mean score per match.
    pub mean_score: f64,
    /// Lowest match score.
    pub min_score: f64,
    /// Number of matches scoring exactly zero.
    pub zero_score_count: usize,
    /// Per-advisor utilization (0.0..=1.0), keyed by advisor ID.
    pub utilization_by_advisor: BTreeMap<String, f64>,
    /// Mean utilization over advisors with non-zero effective capacity.
    pub avg_utilization: f64,
    /// Effective capacity not used by any match.
    pub unused_capacity: u64,
}

impl MatchKpi {
    /// Computes KPIs for an assignment.
    ///
    /// # Arguments
    /// * `assignment` - The finished assignment.
    /// * `problem` - The problem it was produced for.
    /// * `max_new_advisees` - Global cap used during the search.
    pub fn calculate(
        assignment: &Assignment<'_>,
        problem: &MatchProblem,
        max_new_advisees: u32,
    ) -> Self {
        let count = assignment.match_count();
        let total_score = assignment.total_score();
        let mut min_score = f64::INFINITY;
        let mut zero_score_count = 0;
        for m in assignment.iter() {
            min_score = min_score.min(m.score);
            if m.score == 0.0 {
                zero_score_count += 1;
            }
        }

        let mut utilization_by_advisor = BTreeMap::new();
        let mut unused_capacity: u64 = 0;
        let mut util_sum = 0.0;
        let mut util_count = 0usize;
        for advisor in problem.advisors() {
            let cap = advisor.effective_capacity(max_new_advisees) as usize;
            let used = assignment.count_for(&advisor.id);
            unused_capacity += cap.saturating_sub(used) as u64;

            let utilization = if cap == 0 {
                0.0
            } else {
                used as f64 / cap as f64
            };
            if cap > 0 {
                util_sum += utilization;
                util_count += 1;
            }
            utilization_by_advisor.insert(advisor.id.clone(), utilization);
        }

        Self {
            total_score,
            mean_score: if count == 0 {
                0.0
            } else {
                total_score / count as f64
            },
            min_score: if count == 0 { 0.0 } else { min_score },
            zero_score_count,
            utilization_by_advisor,
            avg_utilization: if util_count == 0 {
                0.0
            } else {
                util_sum / util_count as f64
            },
            unused_capacity,
        }
    }

    /// Whether the assignment meets the given quality thresholds.
    pub fn meets_thresholds(&self, min_mean_score: f64, max_zero_score: usize) -> bool {
        self.mean_score >= min_mean_score && self.zero_score_count <= max_zero_score
    }
}
