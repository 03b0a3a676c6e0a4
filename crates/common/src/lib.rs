//! Shared runtime helpers for the registry crates: tracing setup and
//! filesystem preparation for file-backed storage.

pub mod utils;
pub mod env;
