//! Repository layer for api management metadata.
//! - `api::repository` holds the storage-agnostic contract.
//! - `api::memory` and `api::file` are the reference backends.
//! - `api::service` adds validation, logging and pagination on top.

pub mod errors;
pub mod pagination;
pub mod storage;
pub mod api;
pub mod runtime;
