//! Program → category lookup.
//!
//! Groups programs (majors, minors, departments) into categories
//! (divisions). Scoring awards a small bonus when a candidate's majors
//! share a category with the advisor's department.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Mapping from program tag to category name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Catalog {
    programs: BTreeMap<String, String>,
}

impl Catalog {
    /// Creates an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a program under a category.
    pub fn with_program(mut self, program: impl Into<String>, category: impl Into<String>) -> Self {
        self.insert(program, category);
        self
    }

    /// Adds or replaces a program's category.
    pub fn insert(&mut self, program: impl Into<String>, category: impl Into<String>) {
        self.programs.insert(program.into(), category.into());
    }

    /// Category of a program, if known.
    pub fn category_of(&self, program: &str) -> Option<&str> {
        self.programs.get(program).map(String::as_str)
    }

    /// Whether a program is listed.
    pub fn contains(&self, program: &str) -> bool {
        self.programs.contains_key(program)
    }

    /// Distinct categories of the given programs. Unknown programs are skipped.
    pub fn categories_of<'a, I>(&self, programs: I) -> BTreeSet<&str>
    where
        I: IntoIterator<Item = &'a String>,
    {
        programs
            .into_iter()
            .filter_map(|p| self.category_of(p))
            .collect()
    }

    /// Number of programs.
    pub fn len(&self) -> usize {
        self.programs.len()
    }

    /// Whether the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.programs.is_empty()
    }
}

impl<P: Into<String>, C: Into<String>> FromIterator<(P, C)> for Catalog {
    fn from_iter<T: IntoIterator<Item = (P, C)>>(iter: T) -> Self {
        Self {
            programs: iter
                .into_iter()
                .map(|(p, c)| (p.into(), c.into()))
                .collect(),
        }
    }
}
