//! Capacitated advisor matching for the U-Engine ecosystem.
//!
//! Assigns every candidate to exactly one advisor, respecting each advisor's
//! capacity and a global cap on new advisees, while preferring pairs with
//! high program affinity.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `Advisor`, `Candidate`, `Catalog`,
//!   `MatchProblem`, `CandidateMatch`, `Assignment`
//! - **`scoring`**: Additive compatibility score with human-readable reasons
//! - **`search`**: Candidate pool, greedy randomized assigner, restarts
//! - **`validation`**: Input integrity checks and assignment invariants
//! - **`diagnostics`**: Non-fatal lookup warnings collected while loading
//! - **`report`**: Output rows and KPIs
//! - **`config`**: TOML-backed run configuration
//!
//! # Example
//!
//! ```
//! use u_match::config::MatchConfig;
//! use u_match::models::{Advisor, Candidate, Catalog, MatchProblem};
//! use u_match::{report, search};
//!
//! let catalog = Catalog::new()
//!     .with_program("CS", "Science")
//!     .with_program("Art", "Humanities");
//! let problem = MatchProblem::new(
//!     catalog,
//!     vec![Advisor::new("1", "CS", 1), Advisor::new("2", "Art", 1)],
//!     vec![
//!         Candidate::new("10").with_major("CS"),
//!         Candidate::new("11").with_major("Art"),
//!     ],
//! ).unwrap();
//!
//! let outcome = search::solve(&problem, &MatchConfig::default()).unwrap();
//! assert!((outcome.total_score - 2.5).abs() < 1e-10);
//!
//! let rows = report::rows(&outcome.assignment);
//! assert_eq!(rows[0].advisor_id, "1");
//! assert_eq!(rows[0].candidate_id, "10");
//! ```
//!
//! # Architecture
//!
//! The library never installs a `tracing` subscriber; run progress is
//! emitted as structured events for the caller to collect.
//!
//! # References
//!
//! - Feo & Resende (1995), "Greedy Randomized Adaptive Search Procedures"
//! - Burkard, Dell'Amico & Martello (2012), "Assignment Problems"

pub mod config;
pub mod diagnostics;
pub mod error;
pub mod models;
pub mod report;
pub mod scoring;
pub mod search;
pub mod validation;

pub use config::{ConfigError, MatchConfig, TrialMode};
pub use error::{MatchError, Result};
pub use search::{solve, MatchOutcome};
