//! Flat output rows, one per committed match.

use serde::Serialize;

use crate::models::Assignment;

/// One output row describing a committed match.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchRow {
    /// Candidate identifier.
    pub candidate_id: String,
    /// Candidate given name.
    pub candidate_first_name: String,
    /// Candidate family name.
    pub candidate_last_name: String,
    /// Candidate login name.
    pub candidate_username: String,
    /// Candidate majors, sorted.
    pub candidate_majors: Vec<String>,
    /// Advisor identifier.
    pub advisor_id: String,
    /// Advisor given name.
    pub advisor_first_name: String,
    /// Advisor family name.
    pub advisor_last_name: String,
    /// Advisor capacity minus matches committed to that advisor.
    ///
    /// Uses the advisor's own capacity; the global cap is not applied.
    pub advisor_remaining_capacity: i64,
    /// Compatibility score of the pair.
    pub score: f64,
    /// Score justification, one entry per contribution.
    pub reasons: Vec<String>,
}

impl MatchRow {
    /// Reasons joined with `sep`.
    pub fn reasons_joined(&self, sep: &str) -> String {
        self.reasons.join(sep)
    }

    /// Majors joined with `sep`.
    pub fn majors_joined(&self, sep: &str) -> String {
        self.candidate_majors.join(sep)
    }
}

/// Flattens an assignment into rows ordered by advisor ID, then candidate ID.
pub fn rows(assignment: &Assignment<'_>) -> Vec<MatchRow> {
    let mut out = Vec::with_capacity(assignment.match_count());

    for (_, matches) in assignment.by_advisor() {
        let committed = matches.len() as i64;
        let mut sorted: Vec<_> = matches.iter().collect();
        sorted.sort_by(|a, b| a.candidate.id.cmp(&b.candidate.id));

        for m in sorted {
            let (advisor, candidate) = (m.advisor, m.candidate);
            out.push(MatchRow {
                candidate_id: candidate.id.clone(),
                candidate_first_name: candidate.first_name.clone(),
                candidate_last_name: candidate.last_name.clone(),
                candidate_username: candidate.username.clone(),
                candidate_majors: candidate.majors.iter().cloned().collect(),
                advisor_id: advisor.id.clone(),
                advisor_first_name: advisor.first_name.clone(),
                advisor_last_name: advisor.last_name.clone(),
                advisor_remaining_capacity: advisor.capacity as i64 - committed,
                score: m.score,
                reasons: m.reasons.clone(),
            });
        }
    }

    out
}
