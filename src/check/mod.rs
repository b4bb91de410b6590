//! Version check orchestration
//!
//! One check fetches the release feed, compares the newest stable build with
//! the recorded version, and performs the side effects of the resulting
//! transition.
//!
//! # Modules
//!
//! - [`decision`]: Pure transition logic
//! - [`orchestrator`]: Runs one check against its collaborators
//! - [`outcome`]: Invocation input and output types
//! - [`schedule`]: Periodic execution
//! - [`error`]: Errors that abort a check

pub mod decision;
pub mod error;
pub mod orchestrator;
pub mod outcome;
pub mod schedule;

pub use decision::{Transition, decide};
pub use error::CheckError;
pub use orchestrator::{Orchestrator, OrchestratorSettings};
pub use outcome::{CheckOutcome, InvocationEvent, InvocationResponse};
pub use schedule::run_scheduled;
