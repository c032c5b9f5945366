//! Core building blocks for release-gate
//!
//! - **config**: gate.toml parsing and validation (artifact naming, gate policy, retry budgets)
//! - **context**: explicit per-run inputs (branch, trigger, version sources)
//! - **error**: error types with contextual help messages and exit codes

pub mod config;
pub mod context;
pub mod error;
