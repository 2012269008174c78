//! Problem container.
//!
//! Bundles the category lookup, advisors, and candidates that stay
//! read-only for the duration of a search. Construction validates IDs,
//! sorts both record sets by ID, and audits them against the lookup.

use tracing::warn;

use super::{Advisor, Candidate, Catalog};
use crate::diagnostics::{audit_records, Diagnostic};
use crate::error::{MatchError, Result};
use crate::validation::validate_input;

/// Read-only input of a matching run.
#[derive(Debug, Clone)]
pub struct MatchProblem {
    catalog: Catalog,
    advisors: Vec<Advisor>,
    candidates: Vec<Candidate>,
    diagnostics: Vec<Diagnostic>,
}

impl MatchProblem {
    /// Creates a problem from loaded records.
    ///
    /// Advisors and candidates are sorted by ID so every later enumeration
    /// is independent of input order. Lookup misses are collected as
    /// diagnostics (see [`MatchProblem::diagnostics`]) and logged.
    ///
    /// # Errors
    /// [`MatchError::InvalidInput`] on duplicate or empty IDs.
    pub fn new(
        catalog: Catalog,
        mut advisors: Vec<Advisor>,
        mut candidates: Vec<Candidate>,
    ) -> Result<Self> {
        validate_input(&advisors, &candidates).map_err(MatchError::InvalidInput)?;

        advisors.sort_by(|a, b| a.id.cmp(&b.id));
        candidates.sort_by(|a, b| a.id.cmp(&b.id));

        let diagnostics = audit_records(&catalog, &advisors, &candidates);
        for d in &diagnostics {
            warn!(kind = ?d.kind, entity = %d.entity_id, "{}", d.message);
        }

        Ok(Self {
            catalog,
            advisors,
            candidates,
            diagnostics,
        })
    }

    /// Category lookup.
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Advisors, sorted by ID.
    pub fn advisors(&self) -> &[Advisor] {
        &self.advisors
    }

    /// Candidates, sorted by ID.
    pub fn candidates(&self) -> &[Candidate] {
        &self.candidates
    }

    /// Warnings found while loading the records.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Advisor by ID.
    pub fn advisor(&self, id: &str) -> Option<&Advisor> {
        self.advisor_index(id).map(|i| &self.advisors[i])
    }

    /// Candidate by ID.
    pub fn candidate(&self, id: &str) -> Option<&Candidate> {
        self.candidate_index(id).map(|i| &self.candidates[i])
    }

    /// Position of an advisor in [`MatchProblem::advisors`].
    pub fn advisor_index(&self, id: &str) -> Option<usize> {
        self.advisors
            .binary_search_by(|a| a.id.as_str().cmp(id))
            .ok()
    }

    /// Position of a candidate in [`MatchProblem::candidates`].
    pub fn candidate_index(&self, id: &str) -> Option<usize> {
        self.candidates
            .binary_search_by(|c| c.id.as_str().cmp(id))
            .ok()
    }

    /// Sum of effective capacities under a global cap.
    pub fn total_capacity(&self, max_new_advisees: u32) -> u64 {
        self.advisors
            .iter()
            .map(|a| a.effective_capacity(max_new_advisees) as u64)
            .sum()
    }

    /// Whether the advisors can absorb every candidate at all.
    pub fn has_sufficient_capacity(&self, max_new_advisees: u32) -> bool {
        self.total_capacity(max_new_advisees) >= self.candidates.len() as u64
    }
}
