//! Advisor model.
//!
//! Advisors are the capacitated side of the matching: each belongs to one
//! program (department) and accepts at most `capacity` new advisees.

use serde::{Deserialize, Serialize};
use std::fmt;

/// An advisor that candidates can be matched to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Advisor {
    /// Unique advisor identifier.
    pub id: String,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Program tag of the advisor's department.
    pub program: String,
    /// Advisee limit for this advisor.
    pub capacity: u32,
}

impl Advisor {
    /// Creates a new advisor in the given program.
    pub fn new(id: impl Into<String>, program: impl Into<String>, capacity: u32) -> Self {
        Self {
            id: id.into(),
            first_name: String::new(),
            last_name: String::new(),
            program: program.into(),
            capacity,
        }
    }

    /// Sets the advisor's name.
    pub fn with_name(mut self, first: impl Into<String>, last: impl Into<String>) -> Self {
        self.first_name = first.into();
        self.last_name = last.into();
        self
    }

    /// Sets the capacity.
    pub fn with_capacity(mut self, capacity: u32) -> Self {
        self.capacity = capacity;
        self
    }

    /// Number of matches this advisor may take under a global cap.
    #[inline]
    pub fn effective_capacity(&self, max_new_advisees: u32) -> u32 {
        self.capacity.min(max_new_advisees)
    }

    /// "First Last" display name.
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

impl fmt::Display for Advisor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.first_name.is_empty() && self.last_name.is_empty() {
            f.write_str(&self.id)
        } else {
            f.write_str(&self.display_name())
        }
    }
}
