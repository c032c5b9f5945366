//! Version resolution: trigger classification and semantic-version arithmetic
//!
//! # Core Invariants
//!
//! 1. **Resolution is pure** — classifying a trigger and computing the bumped
//!    version never touches the filesystem; writing the result back is the
//!    orchestrator's job.
//! 2. **Versions never decrement** — the only mutation is a bump producing a
//!    new value; the current version is read, never edited in place.
//! 3. **No guessing** — a malformed version string yields a recoverable error
//!    and no bump, not a fabricated baseline.

pub mod resolve;
pub mod source;

pub use resolve::{BumpType, Resolution, resolve};
pub use source::VersionSource;
