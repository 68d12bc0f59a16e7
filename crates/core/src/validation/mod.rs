//! Field validation.
//!
//! A pure field validator plus the immutable rule table consulted by the
//! submission workflows.

pub mod field;
pub mod rules;

pub use field::{validate_field, FieldValue};
pub use rules::{RuleTable, ValidationRule};
