//! Matching domain models.
//!
//! Provides the record types that describe a matching problem and its
//! solutions.
//!
//! # Domain Mappings
//!
//! | u-match | Academic advising | Mentoring | Clinical placement |
//! |---------|-------------------|-----------|--------------------|
//! | Advisor | Faculty advisor | Mentor | Supervisor |
//! | Candidate | Incoming student | Mentee | Trainee |
//! | Program | Major / minor / department | Skill track | Specialty |
//! | Category | Division | Practice area | Service line |

mod advisor;
mod assignment;
mod candidate;
mod catalog;
mod problem;

pub use advisor::Advisor;
pub use assignment::{Assignment, CandidateMatch};
pub use candidate::Candidate;
pub use catalog::Catalog;
pub use problem::MatchProblem;
