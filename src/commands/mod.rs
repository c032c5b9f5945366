//! CLI commands for release-gate
//!
//! - **decide**: run the full release decision (version, gates, policy, routing)
//! - **version**: run the version resolver only
//! - **route**: compute the artifact target only
//! - **policy**: evaluate a compliance report only
//!
//! The `decide` command is the single entry point the outer pipeline calls;
//! the others exist for inspection and for wiring individual stages into
//! scripts.

pub mod decide;
pub mod policy;
pub mod route;
pub mod version;

pub use decide::run_decide;
pub use policy::run_policy;
pub use route::run_route;
pub use version::run_version;
