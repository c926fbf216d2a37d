//! Storage abstractions for the service layer
//!
//! Contains the reusable file-backed document store so services that persist
//! small JSON state share one read/write path.

pub mod json_doc_store;
