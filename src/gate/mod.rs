//! Remote verdict resolution: analysis task wait and quality gate
//!
//! Both stages turn eventual external state into a synchronous decision via
//! the bounded poller. The status-fetch side is a trait seam so the transport
//! (HTTP in the real pipeline, status files here and in tests) stays outside
//! the engine.

pub mod analysis;
pub mod quality;

pub use analysis::{AnalysisOutcome, FileTaskSource, TaskStatusSource, await_analysis};
pub use quality::{FileGateSource, GateStatus, GateStatusSource, resolve_gate};
