//! VoiceMatch domain core.
//!
//! Pure logic with no I/O: field validation, the rule table, catalog enums
//! and media constraints shared by the submission workflows and the API.

pub mod catalog;
pub mod error;
pub mod media;
pub mod types;
pub mod validation;
