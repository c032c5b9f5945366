//! Integration tests for the release-gate CLI
//!
//! Each test drives the compiled binary against a temporary workspace with
//! its own gate.toml, status documents, and compliance report.

mod helpers;

mod test_decide;
mod test_version;
