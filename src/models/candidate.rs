//! Candidate (student) model.
//!
//! A candidate needs exactly one advisor. Compatibility is driven by the
//! candidate's declared majors and minors.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// A candidate to be matched with an advisor.
///
/// Programs are kept in sorted sets so iteration order, and therefore the
/// order of scoring reasons, is deterministic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    /// Unique candidate identifier.
    pub id: String,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Login / account name.
    pub username: String,
    /// Declared major programs.
    pub majors: BTreeSet<String>,
    /// Declared minor programs (may be empty).
    pub minors: BTreeSet<String>,
}

impl Candidate {
    /// Creates a new candidate with the given ID.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            first_name: String::new(),
            last_name: String::new(),
            username: String::new(),
            majors: BTreeSet::new(),
            minors: BTreeSet::new(),
        }
    }

    /// Sets the candidate's name.
    pub fn with_name(mut self, first: impl Into<String>, last: impl Into<String>) -> Self {
        self.first_name = first.into();
        self.last_name = last.into();
        self
    }

    /// Sets the username.
    pub fn with_username(mut self, username: impl Into<String>) -> Self {
        self.username = username.into();
        self
    }

    /// Adds a major.
    pub fn with_major(mut self, major: impl Into<String>) -> Self {
        self.majors.insert(major.into());
        self
    }

    /// Adds a minor.
    pub fn with_minor(mut self, minor: impl Into<String>) -> Self {
        self.minors.insert(minor.into());
        self
    }

    /// Adds every major found in a delimited field (e.g. `"Math, Physics"`).
    pub fn with_majors_delimited(mut self, raw: &str, delimiter: &str) -> Self {
        self.majors.extend(Self::parse_programs(raw, delimiter));
        self
    }

    /// Adds every minor found in a delimited field.
    pub fn with_minors_delimited(mut self, raw: &str, delimiter: &str) -> Self {
        self.minors.extend(Self::parse_programs(raw, delimiter));
        self
    }

    /// Splits a delimited program field, trimming whitespace and dropping
    /// empty items.
    ///
    /// ```
    /// use u_match::models::Candidate;
    ///
    /// let programs = Candidate::parse_programs(" Math, ,Physics ,", ",");
    /// assert_eq!(programs.len(), 2);
    /// assert!(programs.contains("Math"));
    /// assert!(programs.contains("Physics"));
    /// ```
    pub fn parse_programs(raw: &str, delimiter: &str) -> BTreeSet<String> {
        raw.split(delimiter)
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .map(str::to_string)
            .collect()
    }

    /// "First Last" display name.
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Whether any major is declared.
    pub fn has_majors(&self) -> bool {
        !self.majors.is_empty()
    }
}

impl fmt::Display for Candidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.first_name.is_empty() && self.last_name.is_empty() {
            f.write_str(&self.id)
        } else {
            f.write_str(&self.display_name())
        }
    }
}
