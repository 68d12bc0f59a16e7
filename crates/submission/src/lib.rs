//! Submission workflows.
//!
//! Orchestrates validation, media uploads and the final insert for new actor
//! profiles, jobs and job scripts. Every workflow returns a
//! [`SubmissionResult`]; no error escapes as a `Result::Err` or a panic.

pub mod actor;
pub mod input;
pub mod job;
pub mod result;
pub mod saga;
pub mod script;
pub mod service;

#[cfg(test)]
mod test_support;

pub use input::{ActorInput, AudioSampleInput, JobInput};
pub use result::{SubmissionError, SubmissionResult};
pub use script::UploadedScript;
pub use service::Submissions;
