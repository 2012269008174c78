//! Input and result validation for matching problems.
//!
//! Two layers of checks:
//! - [`validate_input`]: structural integrity of the records before a search
//!   (duplicate or empty IDs).
//! - [`validate_assignment`]: invariants a finished assignment must hold
//!   (every candidate matched exactly once, no advisor over its effective
//!   capacity). A failure here means the search itself is broken.

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fmt;

use crate::models::{Advisor, Assignment, Candidate};

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// An input validation error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of input validation errors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ValidationErrorKind {
    /// Two records of the same kind share an ID.
    DuplicateId,
    /// A record has an empty ID.
    EmptyId,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Validates the input records for a matching problem.
///
/// Checks:
/// 1. No empty advisor or candidate IDs
/// 2. No duplicate advisor IDs
/// 3. No duplicate candidate IDs
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_input(advisors: &[Advisor], candidates: &[Candidate]) -> ValidationResult {
    let mut errors = Vec::new();

    let mut advisor_ids = HashSet::new();
    for a in advisors {
        if a.id.is_empty() {
            errors.push(ValidationError::new(
                ValidationErrorKind::EmptyId,
                format!("Advisor '{}' has an empty ID", a),
            ));
        } else if !advisor_ids.insert(a.id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate advisor ID: {}", a.id),
            ));
        }
    }

    let mut candidate_ids = HashSet::new();
    for c in candidates {
        if c.id.is_empty() {
            errors.push(ValidationError::new(
                ValidationErrorKind::EmptyId,
                format!("Candidate '{}' has an empty ID", c),
            ));
        } else if !candidate_ids.insert(c.id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate candidate ID: {}", c.id),
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// An assignment invariant violation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    /// Type of violation.
    pub violation_type: ViolationType,
    /// Related advisor or candidate ID.
    pub entity_id: String,
    /// Measured count (matches for a candidate, or advisees for an advisor).
    pub measured: usize,
    /// Expected bound for `measured`.
    pub expected: usize,
    /// Human-readable description.
    pub message: String,
}

/// Classification of assignment violations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ViolationType {
    /// A candidate has no match.
    UnassignedCandidate,
    /// A candidate is matched more than once.
    DuplicateCandidate,
    /// A match names a candidate outside the input set.
    UnknownCandidate,
    /// A match names an advisor outside the input set.
    UnknownAdvisor,
    /// An advisor holds more matches than its effective capacity.
    CapacityExceeded,
}

impl Violation {
    fn new(
        violation_type: ViolationType,
        entity_id: impl Into<String>,
        measured: usize,
        expected: usize,
        message: String,
    ) -> Self {
        Self {
            violation_type,
            entity_id: entity_id.into(),
            measured,
            expected,
            message,
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Checks a finished assignment against the completeness and capacity
/// invariants.
///
/// Checks:
/// 1. Every candidate in `candidates` is matched exactly once
/// 2. Every matched candidate and advisor belongs to the input set
/// 3. No advisor holds more than `min(max_new_advisees, capacity)` matches
///
/// # Returns
/// `Ok(())` if the assignment is sound, `Err(violations)` listing every
/// breach with measured vs. expected counts.
pub fn validate_assignment(
    assignment: &Assignment<'_>,
    advisors: &[Advisor],
    candidates: &[Candidate],
    max_new_advisees: u32,
) -> Result<(), Vec<Violation>> {
    let mut violations = Vec::new();

    let mut seen: HashMap<&str, usize> = HashMap::new();
    for m in assignment.iter() {
        *seen.entry(m.candidate.id.as_str()).or_insert(0) += 1;
    }

    for c in candidates {
        let count = seen.remove(c.id.as_str()).unwrap_or(0);
        if count == 0 {
            violations.push(Violation::new(
                ViolationType::UnassignedCandidate,
                &c.id,
                0,
                1,
                format!("Candidate {} ({}) is not matched", c.id, c),
            ));
        } else if count > 1 {
            violations.push(Violation::new(
                ViolationType::DuplicateCandidate,
                &c.id,
                count,
                1,
                format!("Candidate {} ({}) is matched {} times", c.id, c, count),
            ));
        }
    }

    // Whatever is left in `seen` was never part of the input.
    let mut unknown: Vec<(&str, usize)> = seen.into_iter().collect();
    unknown.sort_unstable();
    for (id, count) in unknown {
        violations.push(Violation::new(
            ViolationType::UnknownCandidate,
            id,
            count,
            0,
            format!("Match references unknown candidate {}", id),
        ));
    }

    let by_id: HashMap<&str, &Advisor> = advisors.iter().map(|a| (a.id.as_str(), a)).collect();
    for (advisor_id, matches) in assignment.by_advisor() {
        match by_id.get(advisor_id) {
            None => violations.push(Violation::new(
                ViolationType::UnknownAdvisor,
                advisor_id,
                matches.len(),
                0,
                format!("Match references unknown advisor {}", advisor_id),
            )),
            Some(advisor) => {
                let bound = advisor.effective_capacity(max_new_advisees) as usize;
                if matches.len() > bound {
                    violations.push(Violation::new(
                        ViolationType::CapacityExceeded,
                        advisor_id,
                        matches.len(),
                        bound,
                        format!(
                            "Advisor {} ({}) has {} matches, limit is {}",
                            advisor_id,
                            advisor,
                            matches.len(),
                            bound
                        ),
                    ));
                }
            }
        }
    }

    if violations.is_empty() {
        Ok(())
    } else {
        Err(violations)
    }
}
