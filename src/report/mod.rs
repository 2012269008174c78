//! Output rows and quality metrics for finished assignments.
//!
//! # Rows
//!
//! `rows` flattens an assignment into one `MatchRow` per committed match,
//! carrying the candidate and advisor identity fields, the advisor's
//! remaining capacity, and the score reasons. Rows are serializable; CSV or
//! spreadsheet writers are left to the caller.
//!
//! # KPI
//!
//! `MatchKpi` computes score and utilization summaries.

mod kpi;
mod rows;

pub use kpi::MatchKpi;
pub use rows::{rows, MatchRow};
