//! Storage helpers for the file-backed repository.

pub mod json_map_store;
