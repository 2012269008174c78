//! Match and assignment (solution) models.
//!
//! A [`CandidateMatch`] is one scored advisor–candidate pairing. An
//! [`Assignment`] collects the matches committed during one trial, grouped
//! by advisor. Both borrow the advisor and candidate records from the
//! problem they were produced for.

use serde::Serialize;
use std::collections::BTreeMap;

use super::{Advisor, Candidate};

/// A scored, justified pairing of one advisor and one candidate.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CandidateMatch<'p> {
    /// Matched advisor.
    pub advisor: &'p Advisor,
    /// Matched candidate.
    pub candidate: &'p Candidate,
    /// Compatibility score (non-negative).
    pub score: f64,
    /// Human-readable justification, one entry per score contribution.
    pub reasons: Vec<String>,
}

impl<'p> CandidateMatch<'p> {
    /// Creates a new match.
    pub fn new(
        advisor: &'p Advisor,
        candidate: &'p Candidate,
        score: f64,
        reasons: Vec<String>,
    ) -> Self {
        Self {
            advisor,
            candidate,
            score,
            reasons,
        }
    }
}

/// Matches committed in one trial, keyed by advisor ID.
///
/// Advisor keys iterate in ID order; within an advisor, matches keep their
/// commit order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Assignment<'p> {
    matches: BTreeMap<&'p str, Vec<CandidateMatch<'p>>>,
}

impl<'p> Assignment<'p> {
    /// Creates an empty assignment.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a match under its advisor.
    pub fn commit(&mut self, m: CandidateMatch<'p>) {
        self.matches
            .entry(m.advisor.id.as_str())
            .or_default()
            .push(m);
    }

    /// Matches committed to an advisor (empty if none).
    pub fn matches_for(&self, advisor_id: &str) -> &[CandidateMatch<'p>] {
        self.matches
            .get(advisor_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Number of matches committed to an advisor.
    pub fn count_for(&self, advisor_id: &str) -> usize {
        self.matches_for(advisor_id).len()
    }

    /// Match for a given candidate, if any.
    pub fn match_for_candidate(&self, candidate_id: &str) -> Option<&CandidateMatch<'p>> {
        self.iter().find(|m| m.candidate.id == candidate_id)
    }

    /// Iterates `(advisor_id, matches)` groups in advisor ID order.
    pub fn by_advisor(&self) -> impl Iterator<Item = (&'p str, &[CandidateMatch<'p>])> + '_ {
        self.matches.iter().map(|(id, ms)| (*id, ms.as_slice()))
    }

    /// Iterates all committed matches.
    pub fn iter(&self) -> impl Iterator<Item = &CandidateMatch<'p>> + '_ {
        self.matches.values().flatten()
    }

    /// Total number of committed matches.
    pub fn match_count(&self) -> usize {
        self.matches.values().map(Vec::len).sum()
    }

    /// Number of advisors with at least one match.
    pub fn advisor_count(&self) -> usize {
        self.matches.values().filter(|ms| !ms.is_empty()).count()
    }

    /// Sum of all match scores.
    pub fn total_score(&self) -> f64 {
        self.iter().map(|m| m.score).sum()
    }

    /// Whether nothing has been committed.
    pub fn is_empty(&self) -> bool {
        self.match_count() == 0
    }
}
