//! Data store gateway for the hosted backend.
//!
//! Holds the persisted record models, the [`store::DataStore`] trait the
//! submission workflows talk to, and two implementations: [`rest::RestStore`]
//! for the hosted backend's HTTP API and [`memory::MemoryStore`] for local
//! development and tests.

pub mod memory;
pub mod models;
pub mod rest;
pub mod store;

pub use store::{Bucket, DataStore, StoreError};
