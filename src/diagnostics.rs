//! Non-fatal data-quality warnings.
//!
//! Record problems that do not stop a run (a department missing from the
//! category lookup, a major nobody has categorized) are collected as
//! [`Diagnostic`] values and handed back to the caller alongside the data,
//! so a CLI, GUI, or test can render them however it likes.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::models::{Advisor, Candidate, Catalog};

/// Classification of diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DiagnosticKind {
    /// An advisor's program is not in the category lookup. Pairs with this
    /// advisor are scored as uncategorized.
    UnknownAdvisorProgram,
    /// A candidate major is not in the category lookup.
    UnknownCandidateMajor,
    /// A candidate declares no majors at all.
    MissingMajors,
}

/// A single warning about the input records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    /// Warning category.
    pub kind: DiagnosticKind,
    /// Advisor or candidate the warning is about.
    pub entity_id: String,
    /// Human-readable description.
    pub message: String,
}

impl Diagnostic {
    /// Advisor program missing from the lookup.
    pub fn unknown_advisor_program(advisor: &Advisor) -> Self {
        Self {
            kind: DiagnosticKind::UnknownAdvisorProgram,
            entity_id: advisor.id.clone(),
            message: format!(
                "Advisor {} has a department {} that is not in the category lookup",
                advisor, advisor.program
            ),
        }
    }

    /// Candidate major missing from the lookup.
    pub fn unknown_candidate_major(candidate: &Candidate, major: &str) -> Self {
        Self {
            kind: DiagnosticKind::UnknownCandidateMajor,
            entity_id: candidate.id.clone(),
            message: format!(
                "Candidate {} has a major {} that is not in the category lookup; \
                 check that programs are separated by the configured delimiter",
                candidate, major
            ),
        }
    }

    /// Candidate without any major.
    pub fn missing_majors(candidate: &Candidate) -> Self {
        Self {
            kind: DiagnosticKind::MissingMajors,
            entity_id: candidate.id.clone(),
            message: format!("Candidate {} has no majors", candidate),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Checks every record against the category lookup.
///
/// Advisors come first, then candidates, each in slice order.
pub fn audit_records(
    catalog: &Catalog,
    advisors: &[Advisor],
    candidates: &[Candidate],
) -> Vec<Diagnostic> {
    let mut diagnostics = Vec::new();

    for advisor in advisors {
        if !catalog.contains(&advisor.program) {
            diagnostics.push(Diagnostic::unknown_advisor_program(advisor));
        }
    }

    for candidate in candidates {
        if !candidate.has_majors() {
            diagnostics.push(Diagnostic::missing_majors(candidate));
        }
        for major in &candidate.majors {
            if !catalog.contains(major) {
                diagnostics.push(Diagnostic::unknown_candidate_major(candidate, major));
            }
        }
    }

    diagnostics
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> Catalog {
        Catalog::new()
            .with_program("CS", "Science")
            .with_program("Art", "Humanities")
    }

    #[test]
    fn test_clean_records() {
        let advisors = vec![Advisor::new("P1", "CS", 3)];
        let candidates = vec![Candidate::new("S1").with_major("Art")];
        assert!(audit_records(&catalog(), &advisors, &candidates).is_empty());
    }

    #[test]
    fn test_unknown_advisor_program() {
        let advisors = vec![Advisor::new("P1", "Alchemy", 3).with_name("Nicolas", "Flamel")];
        let diags = audit_records(&catalog(), &advisors, &[]);

        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].kind, DiagnosticKind::UnknownAdvisorProgram);
        assert_eq!(diags[0].entity_id, "P1");
        assert!(diags[0].message.contains("Nicolas Flamel"));
        assert!(diags[0].message.contains("Alchemy"));
    }

    #[test]
    fn test_unknown_major_and_missing_majors() {
        let candidates = vec![
            Candidate::new("S1").with_major("CS").with_major("CS, Art"),
            Candidate::new("S2"),
        ];
        let diags = audit_records(&catalog(), &[], &candidates);

        assert_eq!(diags.len(), 2);
        assert_eq!(diags[0].kind, DiagnosticKind::UnknownCandidateMajor);
        assert_eq!(diags[0].entity_id, "S1");
        assert!(diags[0].to_string().contains("delimiter"));
        assert_eq!(diags[1].kind, DiagnosticKind::MissingMajors);
        assert_eq!(diags[1].entity_id, "S2");
    }

    #[test]
    fn test_unknown_minor_is_not_reported() {
        let candidates = vec![Candidate::new("S1").with_major("CS").with_minor("Juggling")];
        assert!(audit_records(&catalog(), &[], &candidates).is_empty());
    }

    #[test]
    fn test_unnamed_records_reported_by_id() {
        let advisors = vec![Advisor::new("P1", "Alchemy", 3)];
        let candidates = vec![Candidate::new("S1")];
        let diags = audit_records(&catalog(), &advisors, &candidates);

        assert_eq!(
            diags[0].message,
            "Advisor P1 has a department Alchemy that is not in the category lookup"
        );
        assert_eq!(diags[1].message, "Candidate S1 has no majors");
    }
}
